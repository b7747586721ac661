//! # Setup Tasks
//!
//! One module per feature. [`eslint`] and [`husky`] are registered as
//! pipeline entries; [`lint_staged`] and [`commitlint`] run as inline
//! sub-steps of the husky task, so a husky run yields their outcomes plus a
//! single aggregate husky outcome.
//!
//! Every task follows the same contract: inspect the context, decide
//! applicability (an unselected feature returns immediately with no outcome),
//! mutate the manifest and target directory, and emit at most one terminal
//! outcome through the context's sink. Feature conflicts are reported as
//! failures and never abort the pipeline; only faults (`Err`) do.

pub mod commitlint;
pub mod eslint;
pub mod husky;
pub mod lint_staged;
