//! # Setup Command Implementation
//!
//! This module implements the `setup` subcommand, the tool's main entry
//! point. It resolves the feature selection (from flags, or interactively
//! through a `dialoguer` wizard when no feature flag is given), binds the
//! pipeline's outcome stream to a spinner, runs the pipeline, and prints a
//! short summary with next steps.
//!
//! ## Functionality
//!
//! - **Feature flags**: `--eslint` (with `--ts` / `--react`) and `--husky`
//!   select features non-interactively; either extra flag implies `--eslint`.
//! - **Interactive selection**: with no feature flags, a multi-select prompt
//!   asks which features to enable and, for ESLint, which presets to add.
//!   Cancelling the prompt aborts before the pipeline runs.
//! - **Skip install**: `--skip-install` swaps the package runner for a no-op,
//!   so only files and the manifest are touched (offline / CI use).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use console::style;
use dialoguer::{theme::ColorfulTheme, MultiSelect};
use indicatif::{ProgressBar, ProgressDrawTarget};

use lintwright::context::{EslintOptions, SetupOptions};
use lintwright::npm::{NoopRunner, NpxRunner, PackageRunner};
use lintwright::output::{symbol, OutputConfig};
use lintwright::registry::Registry;
use lintwright::report::{Outcome, ReportSink};

/// Set up linting and commit-hygiene tooling in a project
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Target project directory (defaults to the current directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Configure ESLint
    #[arg(long)]
    pub eslint: bool,

    /// Extend the ESLint config with the TypeScript preset (implies --eslint)
    #[arg(long)]
    pub ts: bool,

    /// Extend the ESLint config with the React preset (implies --eslint)
    #[arg(long)]
    pub react: bool,

    /// Configure husky git hooks, lint-staged and commitlint
    #[arg(long)]
    pub husky: bool,

    /// Do not invoke the package manager; only write files and the manifest
    #[arg(long)]
    pub skip_install: bool,
}

impl SetupArgs {
    /// Whether any feature was selected on the command line.
    fn has_feature_flags(&self) -> bool {
        self.eslint || self.ts || self.react || self.husky
    }

    /// Build the pipeline options from the flags alone.
    fn options_from_flags(&self) -> SetupOptions {
        let eslint = (self.eslint || self.ts || self.react).then_some(EslintOptions {
            ts: self.ts,
            react: self.react,
        });
        SetupOptions {
            eslint,
            husky: self.husky,
        }
    }
}

/// Ask the user which features to enable.
fn select_features() -> Result<SetupOptions> {
    let theme = ColorfulTheme::default();

    let selection = MultiSelect::with_theme(&theme)
        .with_prompt("Select features to set up (space to toggle, enter to confirm)")
        .items(&["eslint", "husky git hooks"])
        .interact_opt()?;

    let Some(selection) = selection else {
        anyhow::bail!("Operation cancelled.");
    };
    if selection.is_empty() {
        anyhow::bail!("No features selected.");
    }

    let eslint_selected = selection.contains(&0);
    let husky = selection.contains(&1);

    let eslint = if eslint_selected {
        let extras = MultiSelect::with_theme(&theme)
            .with_prompt("ESLint presets (optional)")
            .items(&["typescript", "react"])
            .interact_opt()?;

        let Some(extras) = extras else {
            anyhow::bail!("Operation cancelled.");
        };
        Some(EslintOptions {
            ts: extras.contains(&0),
            react: extras.contains(&1),
        })
    } else {
        None
    };

    Ok(SetupOptions { eslint, husky })
}

/// Sink that renders outcomes as styled lines above the spinner.
struct SpinnerSink<'a> {
    bar: &'a ProgressBar,
    output: &'a OutputConfig,
    failures: usize,
}

impl ReportSink for SpinnerSink<'_> {
    fn report(&mut self, outcome: Outcome) {
        let line = match &outcome {
            Outcome::Done(message) => format!(
                "{} {}",
                style(symbol(self.output, "✔", "[OK]")).green(),
                message
            ),
            Outcome::Fail(message) => {
                self.failures += 1;
                format!(
                    "{} {}",
                    style(symbol(self.output, "✖", "[FAIL]")).red(),
                    message
                )
            }
        };
        self.bar.println(line);
    }
}

/// Execute the `setup` command.
pub fn execute(args: SetupArgs, output: &OutputConfig) -> Result<()> {
    if !output.use_color {
        console::set_colors_enabled(false);
    }

    let target = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    // Feature selection happens before any spinner exists, so prompt
    // cancellation stops the run cleanly with nothing touched.
    let options = if args.has_feature_flags() {
        args.options_from_flags()
    } else {
        select_features()?
    };

    let runner: Box<dyn PackageRunner> = if args.skip_install {
        Box::new(NoopRunner)
    } else {
        Box::new(NpxRunner)
    };

    let bar = ProgressBar::new_spinner();
    bar.set_draw_target(ProgressDrawTarget::stdout());
    bar.set_message("Setting up...");
    bar.enable_steady_tick(Duration::from_millis(80));

    let mut sink = SpinnerSink {
        bar: &bar,
        output,
        failures: 0,
    };

    let result = lintwright::execute_setup(
        &target,
        options,
        Registry::default(),
        &mut sink,
        runner.as_ref(),
    );
    let failures = sink.failures;
    bar.finish_and_clear();
    result?;

    if failures == 0 {
        println!(
            "{} Setup complete.",
            style(symbol(output, "✔", "[OK]")).green()
        );
    } else {
        println!(
            "{} Setup completed with {failures} skipped feature(s); see the messages above.",
            style(symbol(output, "!", "[WARN]")).yellow()
        );
    }
    println!("Run your package manager's install (e.g. `npm install`) to fetch the new devDependencies.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(eslint: bool, ts: bool, react: bool, husky: bool) -> SetupArgs {
        SetupArgs {
            dir: None,
            eslint,
            ts,
            react,
            husky,
            skip_install: false,
        }
    }

    #[test]
    fn test_options_from_flags_eslint_only() {
        let options = args(true, false, false, false).options_from_flags();
        assert_eq!(options.eslint, Some(EslintOptions::default()));
        assert!(!options.husky);
    }

    #[test]
    fn test_extras_imply_eslint() {
        let options = args(false, true, true, false).options_from_flags();
        assert_eq!(
            options.eslint,
            Some(EslintOptions {
                ts: true,
                react: true
            })
        );
    }

    #[test]
    fn test_husky_only_leaves_eslint_off() {
        let options = args(false, false, false, true).options_from_flags();
        assert!(options.eslint.is_none());
        assert!(options.husky);
    }

    #[test]
    fn test_has_feature_flags() {
        assert!(!args(false, false, false, false).has_feature_flags());
        assert!(args(false, true, false, false).has_feature_flags());
        assert!(args(false, false, false, true).has_feature_flags());
    }
}
