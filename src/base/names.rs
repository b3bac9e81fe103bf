//! Type and property names, and the composite cache key.

use std::fmt;

use smol_str::SmolStr;

use super::version::ComponentVersion;

/// A (possibly dotted) type name such as `QtQuick.Rectangle`.
pub type TypeName = SmolStr;

/// A (possibly dotted) property name such as `font.bold`.
pub type PropertyName = SmolStr;

/// Identity of a requested type: name plus requested version.
///
/// Displays as `name + major + "_" + minor`, the classic string form, but
/// compares structurally so `Foo1` at `1_0` never collides with `Foo` at `11_0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeKey {
    name: TypeName,
    version: ComponentVersion,
}

impl TypeKey {
    pub fn new(name: impl Into<TypeName>, version: ComponentVersion) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn version(&self) -> ComponentVersion {
        self.version
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}_{}",
            self.name,
            self.version.major(),
            self.version.minor()
        )
    }
}

/// Split a qualified type name on its last `.` into `(module, class)`.
///
/// Returns `None` for names without a module part.
pub fn split_module(name: &str) -> Option<(&str, &str)> {
    name.rsplit_once('.')
}

/// Split a type name into `(package, bare name)`.
///
/// The package is empty when the name is not qualified.
pub fn split_package(name: &str) -> (&str, &str) {
    split_module(name).unwrap_or(("", name))
}

/// The class part of a qualified name, or an empty string for bare names.
pub fn unqualified_name(name: &str) -> &str {
    split_module(name).map(|(_, class)| class).unwrap_or("")
}
