//! # Bundled Templates
//!
//! Config file payloads shipped inside the binary and materialized into the
//! target project when a task decides one is needed. Each template knows its
//! destination filename; the destination directory is always the target
//! project root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A bundled config file payload.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// Destination filename relative to the target directory.
    pub file_name: &'static str,
    /// Full file contents.
    pub contents: &'static str,
}

/// Default ESLint ignore patterns.
pub const ESLINT_IGNORE: Template = Template {
    file_name: ".eslintignore",
    contents: include_str!("../templates/eslintignore"),
};

/// Default lint-staged configuration.
pub const LINT_STAGED_RC: Template = Template {
    file_name: ".lintstagedrc",
    contents: include_str!("../templates/lintstagedrc.json"),
};

/// Conventional-commits commitlint configuration.
pub const COMMITLINT_CONFIG: Template = Template {
    file_name: "commitlint.config.js",
    contents: include_str!("../templates/commitlint.config.js"),
};

impl Template {
    /// Write the template into `dir` and return the created path.
    pub fn materialize(&self, dir: &Path) -> Result<PathBuf> {
        let dest = dir.join(self.file_name);
        fs::write(&dest, self.contents).map_err(|e| Error::Template {
            name: self.file_name.to_string(),
            dest: dest.clone(),
            message: e.to_string(),
        })?;
        log::debug!("materialized template {}", dest.display());
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_materialize_writes_contents() {
        let temp = TempDir::new().unwrap();
        let path = LINT_STAGED_RC.materialize(temp.path()).unwrap();
        assert_eq!(path, temp.path().join(".lintstagedrc"));
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("eslint --fix"));
    }

    #[test]
    fn test_bundled_payloads_are_nonempty() {
        for template in [ESLINT_IGNORE, LINT_STAGED_RC, COMMITLINT_CONFIG] {
            assert!(!template.contents.is_empty(), "{}", template.file_name);
        }
    }

    #[test]
    fn test_commitlint_template_extends_conventional() {
        assert!(COMMITLINT_CONFIG
            .contents
            .contains("@commitlint/config-conventional"));
    }
}
