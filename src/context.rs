//! # Shared Context and Pipeline Runner
//!
//! One [`Context`] exists per setup run. It owns everything the tasks share:
//! the target directory, a snapshot of its entries, the parsed manifest, the
//! selected options, and the outcome sink. Tasks execute strictly in
//! registration order, one at a time, so no locking is needed anywhere —
//! serialization of manifest and file mutation falls out of the runner's
//! single-active-task design.
//!
//! ## Directory snapshot
//!
//! The entry listing is read exactly once, at construction. Tasks must
//! consult it rather than re-scanning disk, so "does config file X already
//! exist" decisions stay consistent across the whole run even though tasks
//! write files mid-pipeline.
//!
//! ## Failure semantics
//!
//! A task signals a *feature-level* failure (config conflict) through
//! [`Context::fail`] and returns `Ok(())`; later, independent features still
//! run. A task that returns `Err` has hit a fault (I/O, package runner), and
//! the runner stops the queue and propagates it.

use std::collections::BTreeSet;
use std::fs;
use std::mem;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::manifest::{PackageManifest, MANIFEST_FILE};
use crate::npm::PackageRunner;
use crate::registry::Registry;
use crate::report::{Outcome, ReportSink};

/// Sub-options for the ESLint feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EslintOptions {
    /// Extend the generated config with the TypeScript preset.
    pub ts: bool,
    /// Extend the generated config with the React preset and add the React
    /// lint packages.
    pub react: bool,
}

/// Feature selection for one setup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetupOptions {
    /// `None` disables the ESLint task entirely.
    pub eslint: Option<EslintOptions>,
    /// Enables the husky task (with its lint-staged and commitlint sub-steps).
    pub husky: bool,
}

/// A unit of the pipeline, responsible for one feature.
pub type Task = fn(&mut Context<'_>) -> Result<()>;

/// Mutable state threaded through the task queue.
pub struct Context<'a> {
    working_dir: PathBuf,
    entries: BTreeSet<String>,
    manifest_path: PathBuf,
    /// The parsed project manifest; exclusively owned by the context for the
    /// duration of the run and persisted once the queue drains.
    pub manifest: PackageManifest,
    /// Read-only feature selection.
    pub options: SetupOptions,
    registry: Registry,
    sink: &'a mut dyn ReportSink,
    runner: &'a dyn PackageRunner,
    queue: Vec<Task>,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("working_dir", &self.working_dir)
            .field("entries", &self.entries)
            .field("manifest_path", &self.manifest_path)
            .field("manifest", &self.manifest)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> Context<'a> {
    /// Build a context for `target`.
    ///
    /// Fails with [`Error::InvalidTarget`] before any task can execute when
    /// the target is missing or not a directory. A missing manifest is not an
    /// error: a minimal one is synthesized in memory and written at the end
    /// of the run.
    pub fn new(
        target: &Path,
        options: SetupOptions,
        registry: Registry,
        sink: &'a mut dyn ReportSink,
        runner: &'a dyn PackageRunner,
    ) -> Result<Self> {
        if !target.exists() {
            return Err(Error::InvalidTarget {
                path: target.to_path_buf(),
                hint: Some("the directory does not exist".to_string()),
            });
        }
        if !target.is_dir() {
            return Err(Error::InvalidTarget {
                path: target.to_path_buf(),
                hint: Some("the path is not a directory".to_string()),
            });
        }

        let working_dir = fs::canonicalize(target)?;

        let mut entries = BTreeSet::new();
        for entry in fs::read_dir(&working_dir)? {
            let entry = entry?;
            entries.insert(entry.file_name().to_string_lossy().into_owned());
        }

        let manifest_path = working_dir.join(MANIFEST_FILE);
        let manifest = if manifest_path.exists() {
            PackageManifest::load(&manifest_path)?
        } else {
            let project_name = working_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "project".to_string());
            log::info!("no {MANIFEST_FILE} found, starting a fresh manifest");
            PackageManifest::synthesize(&project_name)
        };

        Ok(Self {
            working_dir,
            entries,
            manifest_path,
            manifest,
            options,
            registry,
            sink,
            runner,
            queue: Vec::new(),
        })
    }

    /// The absolute target directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolve a filename against the target directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.working_dir.join(name)
    }

    /// Whether `name` was present in the directory snapshot.
    pub fn has_entry(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    /// First of `candidates` present in the directory snapshot.
    pub fn first_entry_matching(&self, candidates: &[&'static str]) -> Option<&'static str> {
        candidates.iter().copied().find(|name| self.has_entry(name))
    }

    /// The injected version/filename tables.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a package into `devDependencies` at its pinned version unless
    /// it is already installed. Returns whether an entry was added.
    pub fn declare_dev_dependency(&mut self, package: &str) -> bool {
        let added = self.manifest.ensure_dev_dependency(package, &self.registry);
        if added {
            log::debug!(
                "declared {package}@{}",
                self.registry.pinned_version(package)
            );
        }
        added
    }

    /// Run a package binary in the target directory.
    pub fn run_package_binary(&self, spec: &str, args: &[&str], allow_install: bool) -> Result<()> {
        self.runner
            .run_binary(&self.working_dir, spec, args, allow_install)
    }

    /// Emit a success outcome for the current feature.
    pub fn done(&mut self, message: impl Into<String>) {
        self.sink.report(Outcome::Done(message.into()));
    }

    /// Emit a failure outcome for the current feature.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.sink.report(Outcome::Fail(message.into()));
    }

    /// Append a task to the queue. Only meaningful before [`Context::run`].
    pub fn register(&mut self, task: Task) {
        self.queue.push(task);
    }

    /// Drain the queue in registration order.
    ///
    /// The runner is purely a sequencer: it never skips, reorders, or
    /// parallelizes tasks. The first task fault stops the run and propagates.
    pub fn run(&mut self) -> Result<()> {
        let queue = mem::take(&mut self.queue);
        for task in queue {
            task(self)?;
        }
        Ok(())
    }

    /// Write the manifest back to `package.json`.
    ///
    /// Called once by the orchestrator after the queue drains; tasks observe
    /// each other's manifest edits in memory only.
    pub fn persist_manifest(&self) -> Result<()> {
        self.manifest.save(&self.manifest_path)
    }
}
