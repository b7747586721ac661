//! # Project Manifest
//!
//! Typed model of the project's `package.json` plus the handful of accessors
//! the setup tasks need. Unknown fields round-trip untouched through a
//! flattened passthrough map, so reading, mutating, and rewriting a manifest
//! never drops user data.
//!
//! The dependency maps are modeled as owned `BTreeMap`s that serialize only
//! when non-empty, which gives the "lazily created sub-maps" behavior for
//! free: a manifest with no `devDependencies` gains the field only once a
//! task actually records a package into it.
//!
//! The accessors here replace a generic dot-path object mutator: every nested
//! field the tasks touch (`scripts.*`, `dependencies.*`, `devDependencies.*`,
//! `eslintConfig`, `husky`, `lint-staged`) has a dedicated, typed entry point.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::registry::Registry;

/// The standard manifest filename.
pub const MANIFEST_FILE: &str = "package.json";

/// Parsed `package.json` contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scripts: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,

    #[serde(
        rename = "devDependencies",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub dev_dependencies: BTreeMap<String, String>,

    /// Embedded ESLint configuration, a conflict for the ESLint task.
    #[serde(rename = "eslintConfig", skip_serializing_if = "Option::is_none")]
    pub eslint_config: Option<Value>,

    /// Legacy embedded husky configuration (pre-v5 style).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub husky: Option<Value>,

    /// Embedded lint-staged configuration, a conflict for the lint-staged step.
    #[serde(rename = "lint-staged", skip_serializing_if = "Option::is_none")]
    pub lint_staged: Option<Value>,

    /// Everything else in the manifest, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl PackageManifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| Error::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Build a minimal manifest for a project that has none yet.
    pub fn synthesize(project_name: &str) -> Self {
        Self {
            name: Some(project_name.to_string()),
            version: Some("1.0.0".to_string()),
            ..Self::default()
        }
    }

    /// Serialize and write the manifest as pretty JSON with a trailing newline.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut rendered = serde_json::to_string_pretty(self)?;
        rendered.push('\n');
        fs::write(path, rendered).map_err(|e| Error::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The version spec under which `package` is installed, if any.
    ///
    /// `dependencies` takes precedence over `devDependencies`, matching how
    /// npm resolves a package present in both maps.
    pub fn installed_version(&self, package: &str) -> Option<&str> {
        self.dependencies
            .get(package)
            .or_else(|| self.dev_dependencies.get(package))
            .map(String::as_str)
    }

    /// Record `package` into `devDependencies` at its pinned version unless a
    /// satisfying entry already exists in either dependency map.
    ///
    /// Existing entries are never overwritten or downgraded. Returns whether
    /// an entry was added.
    pub fn ensure_dev_dependency(&mut self, package: &str, registry: &Registry) -> bool {
        if self.installed_version(package).is_some() {
            return false;
        }
        self.dev_dependencies
            .insert(package.to_string(), registry.pinned_version(package).to_string());
        true
    }

    /// The body of a script, if defined.
    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(String::as_str)
    }

    /// Define a script unless one with that name already exists.
    ///
    /// Never overwrites a user's script. Returns whether it was added.
    pub fn set_script_if_absent(&mut self, name: &str, body: &str) -> bool {
        if self.scripts.contains_key(name) {
            return false;
        }
        self.scripts.insert(name.to_string(), body.to_string());
        true
    }

    /// Make `scripts.prepare` invoke `command`.
    ///
    /// An existing prepare script that already mentions `command` is left
    /// unchanged; any other existing script gets `&& command` appended; with
    /// no prior script, `command` becomes the script outright.
    pub fn ensure_prepare_invokes(&mut self, command: &str) {
        match self.scripts.get_mut("prepare") {
            Some(prepare) if prepare.contains(command) => {}
            Some(prepare) => {
                prepare.push_str(" && ");
                prepare.push_str(command);
            }
            None => {
                self.scripts
                    .insert("prepare".to_string(), command.to_string());
            }
        }
    }

    /// Remove and return the embedded legacy `husky` field.
    pub fn take_husky_field(&mut self) -> Option<Value> {
        self.husky.take()
    }
}
