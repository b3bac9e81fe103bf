//! Document imports.

use std::path::PathBuf;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::NodeRef;
use crate::base::{ComponentVersion, TypeName};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImportKind {
    /// A versioned module such as `QtQuick 2.0`.
    Library,
    /// A directory of file components.
    Directory,
    /// A single script or document file.
    File,
}

/// An import of the document, with the names it makes visible.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Import {
    /// Dotted module path for libraries, directory path otherwise.
    pub path: SmolStr,
    pub kind: ImportKind,
    pub version: ComponentVersion,
    /// `import X as Alias`
    pub alias: Option<SmolStr>,
    pub members: IndexMap<TypeName, NodeRef>,
}

impl Import {
    pub fn library(path: impl Into<SmolStr>, major: i32, minor: i32) -> Self {
        Self {
            path: path.into(),
            kind: ImportKind::Library,
            version: ComponentVersion::new(major, minor),
            alias: None,
            members: IndexMap::new(),
        }
    }

    pub fn directory(path: impl Into<SmolStr>) -> Self {
        Self {
            path: path.into(),
            kind: ImportKind::Directory,
            version: ComponentVersion::UNSPECIFIED,
            alias: None,
            members: IndexMap::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<SmolStr>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_member(mut self, name: impl Into<TypeName>, node: NodeRef) -> Self {
        self.members.insert(name.into(), node);
        self
    }

    /// Look up a type name in this import's namespace.
    pub fn lookup_member(&self, type_name: &str) -> Option<NodeRef> {
        self.members.get(type_name).copied()
    }

    pub fn is_library(&self) -> bool {
        self.kind == ImportKind::Library
    }

    /// Relative directory of the import: dotted library paths map onto
    /// nested directories.
    pub fn filesystem_path(&self) -> PathBuf {
        match self.kind {
            ImportKind::Library => self.path.split('.').collect(),
            ImportKind::Directory | ImportKind::File => PathBuf::from(self.path.as_str()),
        }
    }
}
