//! Component versions.

use std::fmt;

/// A `major.minor` component version. `-1.-1` means "unspecified".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentVersion {
    major: i32,
    minor: i32,
}

impl ComponentVersion {
    /// The "match any" version.
    pub const UNSPECIFIED: Self = Self::new(-1, -1);

    pub const fn new(major: i32, minor: i32) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> i32 {
        self.major
    }

    pub fn minor(&self) -> i32 {
        self.minor
    }

    pub fn is_unspecified(&self) -> bool {
        self.major == -1 && self.minor == -1
    }

    /// Whether a component at this version satisfies a request for `requested`.
    ///
    /// An unspecified request always matches. Otherwise the component must have
    /// a greater major version, or the same major and at least the minor.
    pub fn satisfies(&self, requested: ComponentVersion) -> bool {
        if requested.is_unspecified() {
            return true;
        }
        self.major > requested.major
            || (self.major == requested.major && self.minor >= requested.minor)
    }

    /// Per-component match where `-1` on the requested side is a wildcard.
    pub fn matches(&self, requested: ComponentVersion) -> bool {
        (requested.major == -1 || requested.major == self.major)
            && (requested.minor == -1 || requested.minor == self.minor)
    }
}

impl Default for ComponentVersion {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl fmt::Display for ComponentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
