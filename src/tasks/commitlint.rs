//! # commitlint Sub-step
//!
//! Runs inline from the husky task. Declares the commitlint CLI and its
//! conventional-config package (independently, since either may already be
//! installed without the other) and materializes `commitlint.config.js`
//! unless one already exists.

use crate::context::Context;
use crate::error::Result;
use crate::templates::COMMITLINT_CONFIG;

/// Run the commitlint sub-step.
pub fn run(ctx: &mut Context<'_>) -> Result<()> {
    ctx.declare_dev_dependency("@commitlint/cli");
    ctx.declare_dev_dependency("@commitlint/config-conventional");

    let config_name = ctx.registry().commitlint_config_file;
    if ctx.has_entry(config_name) {
        ctx.fail(format!("config file '{config_name}' already exists"));
        return Ok(());
    }

    COMMITLINT_CONFIG.materialize(ctx.working_dir())?;
    ctx.done("commitlint configured");
    Ok(())
}
