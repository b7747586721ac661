//! # lint-staged Sub-step
//!
//! Runs inline from the husky task. Declares the lint-staged dependency and
//! materializes a default `.lintstagedrc` unless a recognized config file or
//! an embedded `lint-staged` manifest field already exists, which is reported
//! as a conflict.

use crate::context::Context;
use crate::error::Result;
use crate::templates::LINT_STAGED_RC;

/// Run the lint-staged sub-step.
pub fn run(ctx: &mut Context<'_>) -> Result<()> {
    ctx.declare_dev_dependency("lint-staged");

    if let Some(file) = ctx.first_entry_matching(&ctx.registry().lint_staged_config_files) {
        ctx.fail(format!("config file '{file}' already exists"));
        return Ok(());
    }
    if ctx.manifest.lint_staged.is_some() {
        ctx.fail("'lint-staged' is already set in package.json");
        return Ok(());
    }

    LINT_STAGED_RC.materialize(ctx.working_dir())?;
    ctx.done("lint-staged configured");
    Ok(())
}
