//! Module version parsing and precedence
//!
//! Module versions follow semantic versioning with a few conventions of their own:
//! - A leading "v" is required: "v1.2.3" is a version, "1.2.3" is not
//! - Shorthand: "v1" means "v1.0.0", "v1.2" means "v1.2.0"
//! - Pseudo-versions are ordinary pre-releases: "v0.0.0-20210101000000-abcdef123456"
//! - Build metadata such as "+incompatible" does not affect precedence
//!
//! Strings that are not valid versions rank below every valid version and
//! equal to each other.

use std::cmp::Ordering;
use std::fmt;

use anyhow::{bail, Context, Result};

/// A parsed module version
#[derive(Debug, Clone)]
pub struct ModuleVersion {
    inner: semver::Version,
}

impl ModuleVersion {
    /// Parse a version string like "v1.2.3"
    pub fn parse(s: &str) -> Result<Self> {
        let Some(bare) = s.strip_prefix('v') else {
            bail!("Module version must start with 'v': '{}'", s);
        };
        let normalized = expand_shorthand(bare);
        let inner = semver::Version::parse(&normalized)
            .with_context(|| format!("Invalid module version: '{}'", s))?;
        Ok(Self { inner })
    }
}

/// Expand "1" / "1.2" shorthand to a full triple.
fn expand_shorthand(s: &str) -> String {
    // Shorthand is only valid without pre-release or build suffixes
    if s.contains(['-', '+']) {
        return s.to_string();
    }

    match s.matches('.').count() {
        0 => format!("{}.0.0", s),
        1 => format!("{}.0", s),
        _ => s.to_string(),
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.inner)
    }
}

impl PartialEq for ModuleVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ModuleVersion {}

impl PartialOrd for ModuleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModuleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = &self.inner;
        let b = &other.inner;

        // Build metadata is deliberately left out
        a.major
            .cmp(&b.major)
            .then(a.minor.cmp(&b.minor))
            .then(a.patch.cmp(&b.patch))
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

/// Compare two version strings by precedence.
///
/// Invalid versions sort before valid ones; two invalid versions are equal.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (ModuleVersion::parse(a).ok(), ModuleVersion::parse(b).ok()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
