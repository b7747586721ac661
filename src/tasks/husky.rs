//! # Husky Task
//!
//! Configures husky git hooks for the target project and drives the
//! lint-staged and commitlint sub-steps inline. One run emits up to three
//! outcomes: one per sub-step plus a single aggregate husky outcome once the
//! hook files have settled.
//!
//! ## Legacy migration
//!
//! Husky releases below the version floor configure themselves through an
//! rc-file or an embedded `husky` manifest field. When such an install is
//! detected, the rc-file is backed up and removed, and the manifest field is
//! persisted to `husky.bak` and deleted, before the modern setup proceeds.

use std::fs;

use crate::context::Context;
use crate::error::Result;
use crate::fsutil;
use crate::tasks::{commitlint, lint_staged};
use crate::version;

/// Hook line invoking lint-staged before each commit.
const PRE_COMMIT_LINE: &str = "npx --no-install -- lint-staged";

/// Hook line validating the commit message.
const COMMIT_MSG_LINE: &str = "npx --no-install -- commitlint --edit $1";

/// Back up and remove pre-floor husky configuration.
fn migrate_legacy_config(ctx: &mut Context<'_>) -> Result<()> {
    if let Some(rc_name) = ctx.first_entry_matching(&ctx.registry().husky_config_files) {
        let rc_path = ctx.path(rc_name);
        let backup = fsutil::backup_file(&rc_path)?;
        fs::remove_file(&rc_path)?;
        log::info!(
            "legacy {} moved to {}",
            rc_name,
            backup.file_name().unwrap_or_default().to_string_lossy()
        );
    }

    if let Some(legacy) = ctx.manifest.take_husky_field() {
        fsutil::write_json(&ctx.path("husky.bak"), &legacy)?;
        log::info!("legacy 'husky' manifest field moved to husky.bak");
    }

    Ok(())
}

/// Run the husky binary to activate the `.husky` hook directory.
///
/// A network install is only allowed when the package is not already present
/// under `node_modules`.
fn activate(ctx: &Context<'_>) -> Result<()> {
    let floor = ctx.registry().husky_version_floor;
    let major = ctx
        .manifest
        .installed_version("husky")
        .and_then(version::major_version)
        .filter(|major| *major >= floor)
        .unwrap_or(floor);

    let allow_install = !ctx.path("node_modules").join("husky").exists();
    ctx.run_package_binary(&format!("husky@{major}"), &[], allow_install)
}

/// Run the husky task.
pub fn run(ctx: &mut Context<'_>) -> Result<()> {
    if !ctx.options.husky {
        return Ok(());
    }
    log::info!("configuring husky");

    let floor = ctx.registry().husky_version_floor;
    match ctx.manifest.installed_version("husky").map(str::to_string) {
        None => {
            ctx.declare_dev_dependency("husky");
        }
        Some(installed) if !version::satisfies_floor(&installed, floor) => {
            log::info!("husky {installed} is below the v{floor} floor, migrating legacy config");
            migrate_legacy_config(ctx)?;
        }
        Some(_) => {}
    }

    ctx.manifest.ensure_prepare_invokes("husky");
    activate(ctx)?;

    lint_staged::run(ctx)?;
    commitlint::run(ctx)?;

    fsutil::ensure_script_line(&ctx.path(".husky/pre-commit"), PRE_COMMIT_LINE)?;
    fsutil::ensure_script_line(&ctx.path(".husky/commit-msg"), COMMIT_MSG_LINE)?;

    ctx.done("husky configured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SetupOptions;
    use crate::npm::NoopRunner;
    use crate::registry::Registry;
    use crate::report::MemorySink;
    use tempfile::TempDir;

    fn run_task(temp: &TempDir) -> (MemorySink, crate::manifest::PackageManifest) {
        let options = SetupOptions {
            eslint: None,
            husky: true,
        };
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

    #[test]
    fn test_noop_when_not_requested() {
        let temp = TempDir::new().unwrap();
        let mut sink = MemorySink::new();
        let runner = NoopRunner;
        {
            let mut ctx = Context::new(
                temp.path(),
                SetupOptions::default(),
                Registry::default(),
                &mut sink,
                &runner,
            )
            .unwrap();
            run(&mut ctx).unwrap();
        }
        assert!(sink.outcomes().is_empty());
        assert!(!temp.path().join(".husky").exists());
    }

    #[test]
    fn test_fresh_project_full_setup() {
        let temp = TempDir::new().unwrap();
        let (sink, manifest) = run_task(&temp);

        // lint-staged, commitlint, then the aggregate husky outcome.
        let messages: Vec<_> = sink.outcomes().iter().map(|o| o.message()).collect();
        assert_eq!(
            messages,
            vec![
                "lint-staged configured",
                "commitlint configured",
                "husky configured"
            ]
        );

        assert_eq!(manifest.installed_version("husky"), Some("^9.0.11"));
        assert_eq!(manifest.installed_version("lint-staged"), Some("^15.2.2"));
        assert_eq!(manifest.script("prepare"), Some("husky"));

        let pre_commit =
            fs::read_to_string(temp.path().join(".husky/pre-commit")).unwrap();
        assert_eq!(pre_commit, format!("{PRE_COMMIT_LINE}\n"));
        let commit_msg =
            fs::read_to_string(temp.path().join(".husky/commit-msg")).unwrap();
        assert_eq!(commit_msg, format!("{COMMIT_MSG_LINE}\n"));
    }

    #[test]
    fn test_prepare_script_appended() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"scripts":{"prepare":"some-other-hook"}}"#,
        )
        .unwrap();
        let (_, manifest) = run_task(&temp);
        assert_eq!(manifest.script("prepare"), Some("some-other-hook && husky"));
    }

    #[test]
    fn test_prepare_script_already_invoking_husky_unchanged() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"scripts":{"prepare":"husky install"}}"#,
        )
        .unwrap();
        let (_, manifest) = run_task(&temp);
        assert_eq!(manifest.script("prepare"), Some("husky install"));
    }

    #[test]
    fn test_legacy_version_triggers_migration() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"devDependencies":{"husky":"^5.0.0"},"husky":{"hooks":{"pre-commit":"lint"}}}"#,
        )
        .unwrap();
        fs::write(temp.path().join(".huskyrc"), "{\"hooks\":{}}").unwrap();

        let (_, manifest) = run_task(&temp);

        // rc file backed up and removed.
        assert!(!temp.path().join(".huskyrc").exists());
        assert!(temp.path().join(".huskyrc.bak").exists());
        // Embedded field persisted and deleted.
        assert!(manifest.husky.is_none());
        let bak = fs::read_to_string(temp.path().join("husky.bak")).unwrap();
        assert!(bak.contains("pre-commit"));
        // The old version entry is kept, never force-upgraded.
        assert_eq!(manifest.installed_version("husky"), Some("^5.0.0"));
    }

    #[test]
    fn test_modern_version_skips_migration() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"devDependencies":{"husky":"^9.1.0"}}"#,
        )
        .unwrap();
        fs::write(temp.path().join(".huskyrc"), "{}").unwrap();

        run_task(&temp);
        // No migration: the rc file stays.
        assert!(temp.path().join(".huskyrc").exists());
        assert!(!temp.path().join(".huskyrc.bak").exists());
    }

    #[test]
    fn test_latest_tag_skips_migration() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"devDependencies":{"husky":"latest"},"husky":{"hooks":{}}}"#,
        )
        .unwrap();
        let (_, manifest) = run_task(&temp);
        assert!(manifest.husky.is_some());
        assert!(!temp.path().join("husky.bak").exists());
    }

    #[test]
    fn test_hook_lines_not_duplicated_across_runs() {
        let temp = TempDir::new().unwrap();
        run_task(&temp);
        // Second run reports config conflicts for the sub-steps but must not
        // duplicate the hook lines.
        let (sink, _) = run_task(&temp);
        assert_eq!(sink.failure_count(), 2);

        let pre_commit =
            fs::read_to_string(temp.path().join(".husky/pre-commit")).unwrap();
        assert_eq!(pre_commit.matches(PRE_COMMIT_LINE).count(), 1);
        let commit_msg =
            fs::read_to_string(temp.path().join(".husky/commit-msg")).unwrap();
        assert_eq!(commit_msg.matches(COMMIT_MSG_LINE).count(), 1);
    }

    #[test]
    fn test_sub_step_conflicts_still_yield_aggregate_outcome() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".lintstagedrc"), "{}").unwrap();
        fs::write(temp.path().join("commitlint.config.js"), "").unwrap();

        let (sink, _) = run_task(&temp);
        let messages: Vec<_> = sink.outcomes().iter().map(|o| o.message()).collect();
        assert_eq!(sink.failure_count(), 2);
        assert_eq!(messages.last().copied(), Some("husky configured"));
    }
}
