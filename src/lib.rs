//! # Lintwright Library
//!
//! Core functionality for the `lintwright` command-line tool: a small task
//! pipeline that augments an existing project with linting and commit-hygiene
//! tooling (ESLint, husky git hooks, lint-staged, commitlint).
//!
//! ## Quick Example
//!
//! ```
//! use lintwright::context::SetupOptions;
//! use lintwright::npm::NoopRunner;
//! use lintwright::registry::Registry;
//! use lintwright::report::MemorySink;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut sink = MemorySink::new();
//!
//! // No features selected: the pipeline completes with zero outcomes and
//! // writes a fresh default manifest.
//! lintwright::execute_setup(
//!     dir.path(),
//!     SetupOptions::default(),
//!     Registry::default(),
//!     &mut sink,
//!     &NoopRunner,
//! )
//! .unwrap();
//!
//! assert!(sink.outcomes().is_empty());
//! assert!(dir.path().join("package.json").exists());
//! ```
//!
//! ## Core Concepts
//!
//! - **Context (`context`)**: the shared mutable state of one run — target
//!   directory, a one-shot directory snapshot, the parsed manifest, the
//!   feature selection, and the outcome sink — plus the FIFO task runner.
//! - **Tasks (`tasks`)**: one unit per feature. ESLint and husky are pipeline
//!   entries; lint-staged and commitlint run inline within husky.
//! - **Registry (`registry`)**: pinned dependency versions and recognized
//!   config filenames, injected as immutable data.
//! - **Manifest (`manifest`)**: typed `package.json` model with the accessors
//!   the tasks need; unknown fields round-trip untouched.
//! - **Reporting (`report`)**: tasks emit one terminal `Done`/`Fail` outcome
//!   per feature attempt through a sink; presentation is the caller's.
//!
//! ## Execution Flow
//!
//! [`execute_setup`] validates the target, builds the context, registers the
//! ESLint task then the husky task, drains the queue in order, and persists
//! the manifest exactly once after the queue completes. Feature conflicts are
//! reported through the sink without stopping the run; only a task fault
//! aborts it, in which case nothing is persisted.

pub mod context;
pub mod error;
pub mod fsutil;
pub mod manifest;
pub mod npm;
pub mod output;
pub mod registry;
pub mod report;
pub mod tasks;
pub mod templates;
pub mod version;

use std::path::Path;

use context::{Context, SetupOptions};
use error::Result;
use npm::PackageRunner;
use registry::Registry;
use report::ReportSink;

/// Run the complete setup pipeline against `target`.
///
/// This is the top-level orchestrator: it constructs the [`Context`],
/// registers the tasks in their fixed order (ESLint before husky), drives
/// them to completion, and writes the final manifest state to
/// `package.json`. The manifest is written exactly once, after the whole
/// queue has drained; an early abort persists nothing.
pub fn execute_setup(
    target: &Path,
    options: SetupOptions,
    registry: Registry,
    sink: &mut dyn ReportSink,
    runner: &dyn PackageRunner,
) -> Result<()> {
    let mut ctx = Context::new(target, options, registry, sink, runner)?;
    ctx.register(tasks::eslint::run);
    ctx.register(tasks::husky::run);
    ctx.run()?;
    ctx.persist_manifest()
}
