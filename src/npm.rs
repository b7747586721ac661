//! # Package Runner
//!
//! Invocation of installed package binaries through `npx`. The pipeline only
//! needs one capability from the package manager: "run this package's binary,
//! optionally allowing a network install if it is not present locally".
//!
//! The capability is a trait so the pipeline can be driven without touching
//! the network or a node toolchain: the CLI injects [`NpxRunner`], while
//! tests and `--skip-install` runs inject [`NoopRunner`].

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Runs a package's binary via the project's package manager.
pub trait PackageRunner {
    /// Run `spec` (a `name` or `name@version` string) with `args` in
    /// `working_dir`.
    ///
    /// When `allow_install` is false the invocation must not reach the
    /// network (`npx --no-install`).
    fn run_binary(
        &self,
        working_dir: &Path,
        spec: &str,
        args: &[&str],
        allow_install: bool,
    ) -> Result<()>;
}

/// Production runner that shells out to `npx`.
#[derive(Debug, Default)]
pub struct NpxRunner;

impl PackageRunner for NpxRunner {
    fn run_binary(
        &self,
        working_dir: &Path,
        spec: &str,
        args: &[&str],
        allow_install: bool,
    ) -> Result<()> {
        let mut cmd = Command::new("npx");
        if !allow_install {
            cmd.arg("--no-install");
        }
        cmd.arg("--").arg(spec).args(args).current_dir(working_dir);

        log::debug!("running npx -- {} {}", spec, args.join(" "));
        let output = cmd.output().map_err(|e| Error::PackageRunner {
            command: format!("npx -- {spec}"),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::PackageRunner {
                command: format!("npx -- {spec}"),
                message: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Runner that records nothing and touches nothing.
///
/// Used for `--skip-install` runs and in tests, where the file and manifest
/// effects of the pipeline are wanted without the package-manager side
/// effects.
#[derive(Debug, Default)]
pub struct NoopRunner;

impl PackageRunner for NoopRunner {
    fn run_binary(
        &self,
        _working_dir: &Path,
        spec: &str,
        _args: &[&str],
        _allow_install: bool,
    ) -> Result<()> {
        log::debug!("skipping package binary invocation: {spec}");
        Ok(())
    }
}
