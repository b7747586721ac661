//! # ESLint Task
//!
//! Configures ESLint for the target project: declares the lint dependencies,
//! adds an `eslint` script, materializes an ignore file, and generates an
//! `.eslintrc` based on the selected sub-options (TypeScript, React).
//!
//! A recognized ESLint config file in the directory snapshot, or an embedded
//! `eslintConfig` manifest field, is a conflict: the task reports a failure
//! naming it and stops without writing a config. Dependency and script edits
//! already applied by then are kept (best-effort partial configuration, not
//! atomic).

use serde_json::{json, Value};

use crate::context::{Context, EslintOptions};
use crate::error::Result;
use crate::fsutil;
use crate::templates::ESLINT_IGNORE;

/// Filename of the generated config.
const CONFIG_FILE: &str = ".eslintrc";

/// Default lint script body. Never overwrites an existing `scripts.eslint`.
const LINT_SCRIPT: &str = "eslint --ext .js,.mjs,.jsx,.ts,.tsx --fix --ignore-path .eslintignore ./";

/// Render the generated ESLint configuration.
///
/// The extends list is ordered: base preset, then TypeScript, then React.
fn render_config(opts: EslintOptions) -> Value {
    let mut extends = vec!["fe"];
    if opts.ts {
        extends.push("fe/ts");
    }
    if opts.react {
        extends.push("fe/react");
    }

    json!({
        "extends": extends,
        "plugins": ["simple-import-sort"],
        "globals": {
            "__DEV__": true
        },
        "rules": {
            "simple-import-sort/imports": "error",
            "simple-import-sort/exports": "error"
        }
    })
}

/// Run the ESLint task.
pub fn run(ctx: &mut Context<'_>) -> Result<()> {
    let Some(opts) = ctx.options.eslint else {
        return Ok(());
    };
    log::info!("configuring eslint (ts={}, react={})", opts.ts, opts.react);

    ctx.declare_dev_dependency("eslint");
    ctx.manifest.set_script_if_absent("eslint", LINT_SCRIPT);

    if !ctx.has_entry(ESLINT_IGNORE.file_name) {
        ESLINT_IGNORE.materialize(ctx.working_dir())?;
    }

    if let Some(file) = ctx.first_entry_matching(&ctx.registry().eslint_config_files) {
        ctx.fail(format!("config file '{file}' already exists"));
        return Ok(());
    }
    if ctx.manifest.eslint_config.is_some() {
        ctx.fail("'eslintConfig' is already set in package.json");
        return Ok(());
    }

    ctx.declare_dev_dependency("eslint-config-fe");
    ctx.declare_dev_dependency("eslint-plugin-simple-import-sort");
    if opts.react {
        ctx.declare_dev_dependency("eslint-plugin-react");
        ctx.declare_dev_dependency("eslint-plugin-react-hooks");
        ctx.declare_dev_dependency("@babel/preset-react");
        // A project linting React code without React installed gets it too.
        ctx.declare_dev_dependency("react");
    }

    fsutil::write_json(&ctx.path(CONFIG_FILE), &render_config(opts))?;

    ctx.done("eslint configured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SetupOptions;
    use crate::npm::NoopRunner;
    use crate::registry::Registry;
    use crate::report::{MemorySink, Outcome};
    use std::fs;
    use tempfile::TempDir;

    fn run_task(temp: &TempDir, options: SetupOptions) -> (MemorySink, crate::manifest::PackageManifest) {
        let mut sink = MemorySink::new();
        let runner = NoopRunner;
        let manifest = {
            let mut ctx = Context::new(
                temp.path(),
                options,
                Registry::default(),
                &mut sink,
                &runner,
            )
            .unwrap();
            run(&mut ctx).unwrap();
            ctx.manifest.clone()
        };
        (sink, manifest)
    }

    fn eslint_on(ts: bool, react: bool) -> SetupOptions {
        SetupOptions {
            eslint: Some(EslintOptions { ts, react }),
            husky: false,
        }
    }

    #[test]
    fn test_noop_when_not_requested() {
        let temp = TempDir::new().unwrap();
        let (sink, manifest) = run_task(&temp, SetupOptions::default());
        assert!(sink.outcomes().is_empty());
        assert!(manifest.dev_dependencies.is_empty());
        assert!(!temp.path().join(".eslintignore").exists());
    }

    #[test]
    fn test_basic_setup_writes_config_and_script() {
        let temp = TempDir::new().unwrap();
        let (sink, manifest) = run_task(&temp, eslint_on(false, false));

        assert_eq!(sink.outcomes().len(), 1);
        assert_eq!(
            sink.outcomes()[0],
            Outcome::Done("eslint configured".to_string())
        );
        assert_eq!(manifest.script("eslint"), Some(LINT_SCRIPT));
        assert_eq!(manifest.installed_version("eslint"), Some("^8.57.0"));
        assert_eq!(
            manifest.installed_version("eslint-config-fe"),
            Some("^2.1.2")
        );
        assert!(temp.path().join(".eslintignore").exists());

        let config: Value =
            serde_json::from_str(&fs::read_to_string(temp.path().join(".eslintrc")).unwrap())
                .unwrap();
        assert_eq!(config["extends"], json!(["fe"]));
    }

    #[test]
    fn test_existing_lint_script_left_untouched() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"scripts":{"eslint":"my-own-lint"}}"#,
        )
        .unwrap();
        let (_, manifest) = run_task(&temp, eslint_on(false, false));
        assert_eq!(manifest.script("eslint"), Some("my-own-lint"));
    }

    #[test]
    fn test_existing_ignore_file_not_replaced() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".eslintignore"), "vendor/\n").unwrap();
        run_task(&temp, eslint_on(false, false));
        assert_eq!(
            fs::read_to_string(temp.path().join(".eslintignore")).unwrap(),
            "vendor/\n"
        );
    }

    #[test]
    fn test_config_file_conflict_fails_without_writing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".eslintrc.json"), "{}").unwrap();
        let (sink, manifest) = run_task(&temp, eslint_on(false, false));

        assert_eq!(sink.failure_count(), 1);
        assert!(sink.outcomes()[0].message().contains(".eslintrc.json"));
        assert!(!temp.path().join(".eslintrc").exists());
        // The base preset packages are only declared past the conflict check.
        assert!(manifest.installed_version("eslint-config-fe").is_none());
        // The eslint dependency declared before the check is kept.
        assert_eq!(manifest.installed_version("eslint"), Some("^8.57.0"));
    }

    #[test]
    fn test_embedded_config_field_conflict() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"eslintConfig":{"extends":["airbnb"]}}"#,
        )
        .unwrap();
        let (sink, _) = run_task(&temp, eslint_on(false, false));
        assert_eq!(sink.failure_count(), 1);
        assert!(sink.outcomes()[0].message().contains("eslintConfig"));
        assert!(!temp.path().join(".eslintrc").exists());
    }

    #[test]
    fn test_ts_react_full_dependency_set_and_extends_order() {
        let temp = TempDir::new().unwrap();
        let (sink, manifest) = run_task(&temp, eslint_on(true, true));

        assert_eq!(sink.failure_count(), 0);
        for package in [
            "eslint-config-fe",
            "eslint-plugin-simple-import-sort",
            "eslint-plugin-react",
            "eslint-plugin-react-hooks",
            "@babel/preset-react",
            "react",
        ] {
            assert!(
                manifest.dev_dependencies.contains_key(package),
                "missing {package}"
            );
        }

        let config: Value =
            serde_json::from_str(&fs::read_to_string(temp.path().join(".eslintrc")).unwrap())
                .unwrap();
        assert_eq!(config["extends"], json!(["fe", "fe/ts", "fe/react"]));
    }

    #[test]
    fn test_react_already_installed_not_redeclared() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"dependencies":{"react":"^18.2.0"}}"#,
        )
        .unwrap();
        let (_, manifest) = run_task(&temp, eslint_on(false, true));
        assert_eq!(manifest.installed_version("react"), Some("^18.2.0"));
        assert!(!manifest.dev_dependencies.contains_key("react"));
        assert!(manifest.dev_dependencies.contains_key("eslint-plugin-react"));
    }

    #[test]
    fn test_second_run_against_fresh_snapshot_fails() {
        let temp = TempDir::new().unwrap();
        let (first, _) = run_task(&temp, eslint_on(false, false));
        assert_eq!(first.failure_count(), 0);

        // The first run created .eslintrc; a second run must refuse to
        // overwrite it, never silently regenerate.
        let (second, _) = run_task(&temp, eslint_on(false, false));
        assert_eq!(second.failure_count(), 1);
        assert!(second.outcomes()[0].message().contains(".eslintrc"));
    }
}
