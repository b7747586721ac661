//! # Dependency Registry
//!
//! Static configuration data for the setup pipeline: the pinned version used
//! whenever a task decides a package must be added, the recognized config
//! filenames per tool, and the husky major-version floor.
//!
//! All of this is immutable for the lifetime of a run and injected into the
//! pipeline at construction. Tests can build a [`Registry`] with overridden
//! tables to exercise version/conflict paths deterministically; production
//! code uses [`Registry::default`].

use std::collections::BTreeMap;

/// Husky releases below this major version use the legacy rc-file/manifest
/// configuration and get migrated (backed up and removed).
pub const HUSKY_VERSION_FLOOR: u64 = 9;

/// Immutable package-name -> pinned-version table plus the config-file name
/// catalogs consulted by the tasks.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Pinned version string per package name.
    pinned: BTreeMap<&'static str, &'static str>,
    /// ESLint config filenames that constitute a conflict.
    pub eslint_config_files: Vec<&'static str>,
    /// Legacy husky rc filenames that get backed up during migration.
    pub husky_config_files: Vec<&'static str>,
    /// lint-staged config filenames that constitute a conflict.
    pub lint_staged_config_files: Vec<&'static str>,
    /// The single recognized commitlint config filename.
    pub commitlint_config_file: &'static str,
    /// Minimum acceptable husky major version.
    pub husky_version_floor: u64,
}

impl Default for Registry {
    fn default() -> Self {
        let pinned = BTreeMap::from([
            ("@commitlint/cli", "^19.2.0"),
            ("@commitlint/config-conventional", "^19.1.0"),
            ("eslint", "^8.57.0"),
            ("eslint-config-fe", "^2.1.2"),
            ("eslint-plugin-react", "^7.34.1"),
            ("eslint-plugin-react-hooks", "^4.6.0"),
            ("eslint-plugin-simple-import-sort", "^12.1.0"),
            ("@babel/preset-react", "^7.24.1"),
            ("husky", "^9.0.11"),
            ("lint-staged", "^15.2.2"),
            ("react", "^16.8.0"),
        ]);

        Self {
            pinned,
            eslint_config_files: vec![
                ".eslintrc",
                ".eslintrc.js",
                ".eslintrc.cjs",
                ".eslintrc.yaml",
                ".eslintrc.yml",
                ".eslintrc.json",
            ],
            husky_config_files: vec![".huskyrc", ".huskyrc.json"],
            lint_staged_config_files: vec![
                ".lintstagedrc",
                ".lintstagedrc.js",
                ".lintstagedrc.cjs",
                ".lintstagedrc.mjs",
                ".lintstagedrc.yaml",
                ".lintstagedrc.yml",
                ".lintstagedrc.json",
                "lint-staged.config.js",
            ],
            commitlint_config_file: "commitlint.config.js",
            husky_version_floor: HUSKY_VERSION_FLOOR,
        }
    }
}

impl Registry {
    /// Look up the pinned version for a package.
    ///
    /// Every package a task may add is expected to be in the table; an
    /// unknown name is a programming fault and panics in debug builds.
    pub fn pinned_version(&self, name: &str) -> &'static str {
        match self.pinned.get(name) {
            Some(version) => version,
            None => {
                debug_assert!(false, "no pinned version registered for '{name}'");
                "latest"
            }
        }
    }

    /// Whether the registry knows a pinned version for `name`.
    pub fn has_pinned_version(&self, name: &str) -> bool {
        self.pinned.contains_key(name)
    }
}
