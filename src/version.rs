//! # Version Spec Inspection
//!
//! Helpers for the loose version strings found in `package.json` dependency
//! maps (`^9.0.11`, `~8.57.0`, `9`, `latest`). The husky task uses these to
//! decide whether an already-installed husky is old enough to need the legacy
//! configuration migration.
//!
//! A spec is reduced to its major version by stripping a leading range
//! operator and parsing the remainder with `semver` when it is a full
//! version, falling back to the leading numeral for partial specs like `^9`.

use std::sync::OnceLock;

use regex::Regex;
use semver::Version;

fn leading_major_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)").expect("static regex"))
}

/// Extract the major version from a dependency version spec.
///
/// Returns `None` for specs with no leading numeral (`latest`, `*`,
/// `workspace:^`, git URLs).
pub fn major_version(spec: &str) -> Option<u64> {
    let trimmed = spec
        .trim()
        .trim_start_matches(['^', '~', '=', 'v'])
        .trim_start();

    if let Ok(version) = Version::parse(trimmed) {
        return Some(version.major);
    }

    leading_major_re()
        .captures(trimmed)
        .and_then(|caps| caps[1].parse().ok())
}

/// Whether a version spec satisfies a minimum major version.
///
/// The literal `latest` tag is always sufficient. Specs that cannot be
/// reduced to a major version are treated as not satisfying the floor, which
/// routes them through the migration path.
pub fn satisfies_floor(spec: &str, floor: u64) -> bool {
    if spec.trim() == "latest" {
        return true;
    }
    major_version(spec).is_some_and(|major| major >= floor)
}
