//! Semantic model boundary.
//!
//! The engine never parses documents. It answers queries against an already
//! constructed semantic model exposed through [`SemanticModel`]:
//!
//! ```text
//! lookup_type(path)        ← document-level type lookup (imports, aliases)
//!     │
//!     ▼
//! NodeRef                  ← Native(NativeId) | Object(ObjectId)
//!     │
//!     ▼
//! prototype(node)          ← single-parent lookup, chained by prototype_chain
//! ```
//!
//! [`ModelIndex`] is an arena-backed in-memory implementation, assembled with
//! [`ModelBuilder`].

mod imports;
mod index;
mod native;
mod object;

pub use imports::{Import, ImportKind};
pub use index::{ModelBuilder, ModelIndex};
pub use native::{EnumDef, Export, NativeComponent, NativeProperty};
pub use object::{Member, MemberKind, ObjectNode, SourceLocation};

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{PropertyName, TypeName, split_module};

/// Global counter for model snapshot identities.
static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one immutable model snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModelId(u64);

impl ModelId {
    pub fn next() -> Self {
        Self(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Index of a native component in the model arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeId(u32);

impl NativeId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a document object in the model arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(u32);

impl ObjectId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A semantic node that can carry members and a prototype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeRef {
    /// Registered by a compiled plugin.
    Native(NativeId),
    /// Declared in a document.
    Object(ObjectId),
}

impl NodeRef {
    pub fn as_native(self) -> Option<NativeId> {
        match self {
            NodeRef::Native(id) => Some(id),
            NodeRef::Object(_) => None,
        }
    }

    pub fn as_object(self) -> Option<ObjectId> {
        match self {
            NodeRef::Object(id) => Some(id),
            NodeRef::Native(_) => None,
        }
    }
}

/// The value a member or alias target evaluates to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Node(NodeRef),
    Color,
    Url,
    String,
    Real,
    Int,
    Boolean,
    Undefined,
}

impl Value {
    /// Type name of a primitive value, `None` for nodes and undefined.
    pub fn primitive_name(&self) -> Option<&'static str> {
        match self {
            Value::Color => Some("color"),
            Value::Url => Some("url"),
            Value::String => Some("string"),
            Value::Real => Some("real"),
            Value::Int => Some("int"),
            Value::Boolean => Some("boolean"),
            Value::Node(_) | Value::Undefined => None,
        }
    }

    /// Map a declared primitive type name onto a value.
    pub fn from_primitive_name(type_name: &str) -> Option<Value> {
        match type_name {
            "color" | "QColor" => Some(Value::Color),
            "url" | "QUrl" => Some(Value::Url),
            "string" | "QString" => Some(Value::String),
            "real" | "double" | "float" | "qreal" => Some(Value::Real),
            "int" => Some(Value::Int),
            "bool" | "boolean" => Some(Value::Boolean),
            _ => None,
        }
    }
}

/// Failure of a prototype traversal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrototypeError {
    /// The chain revisits a node.
    #[error("prototype cycle through `{0}`")]
    Cycle(TypeName),

    /// A prototype name does not resolve to a type.
    #[error("unresolved prototype `{0}`")]
    Unresolved(TypeName),
}

/// The semantic model the resolver queries.
///
/// Implementations are immutable snapshots: a reparse yields a new snapshot
/// with a new [`ModelId`].
pub trait SemanticModel: Send + Sync {
    fn id(&self) -> ModelId;

    fn native(&self, id: NativeId) -> &NativeComponent;

    fn object(&self, id: ObjectId) -> &ObjectNode;

    /// Native component registered under an exact class name.
    fn native_by_class_name(&self, class_name: &str) -> Option<NativeId>;

    /// Imports of the document.
    fn imports(&self) -> &[Import];

    /// Resolve a dotted path to a type visible in the document.
    fn lookup_type(&self, path: &[&str]) -> Option<NodeRef>;

    /// The import that makes a bare type name visible.
    fn import_info(&self, type_name: &str) -> Option<&Import>;

    /// Resolve an alias target such as `label.color` in the scope of `owner`.
    fn lookup_reference(&self, owner: ObjectId, path: &[SmolStr]) -> Option<Value>;

    /// The immediate prototype of `node`.
    fn prototype(&self, node: NodeRef) -> Result<Option<NodeRef>, PrototypeError>;

    /// Source text of a document, by file name.
    fn document_source(&self, file: &str) -> Option<&str>;

    /// Directories searched for library imports.
    fn import_paths(&self) -> &[PathBuf];

    /// Class name of a node, empty for anonymous objects.
    fn class_name(&self, node: NodeRef) -> &str {
        match node {
            NodeRef::Native(id) => &self.native(id).class_name,
            NodeRef::Object(id) => &self.object(id).class_name,
        }
    }

    /// The chain starting at `start` (included), immediate parent next.
    fn prototype_chain(&self, start: NodeRef) -> Result<Vec<NodeRef>, PrototypeError> {
        let mut visited = FxHashSet::default();
        let mut chain = Vec::new();
        let mut current = Some(start);

        while let Some(node) = current {
            if !visited.insert(node) {
                return Err(PrototypeError::Cycle(TypeName::new(self.class_name(node))));
            }
            chain.push(node);
            current = self.prototype(node)?;
        }

        Ok(chain)
    }

    /// First natively backed node of the chain starting at `node`.
    fn nearest_native(&self, node: NodeRef) -> Option<NativeId> {
        let chain = self.prototype_chain(node).ok()?;
        chain.into_iter().find_map(NodeRef::as_native)
    }

    /// Property of a native component or of one of its native prototypes.
    fn native_property(&self, native: NativeId, name: &str) -> Option<&NativeProperty> {
        let chain = self.prototype_chain(NodeRef::Native(native)).ok()?;
        chain
            .into_iter()
            .filter_map(NodeRef::as_native)
            .find_map(|id| self.native(id).properties.get(name))
    }

    /// Enum declared by a native component or its prototypes, with the
    /// component that declares it.
    fn find_enum(&self, native: NativeId, enum_name: &str) -> Option<(NativeId, &EnumDef)> {
        let chain = self.prototype_chain(NodeRef::Native(native)).ok()?;
        chain
            .into_iter()
            .filter_map(NodeRef::as_native)
            .find_map(|id| self.native(id).enums.get(enum_name).map(|e| (id, e)))
    }

    /// First default property declared along the chain of `node`.
    fn default_property_name(&self, node: NodeRef) -> Option<PropertyName> {
        let chain = self.prototype_chain(node).ok()?;
        chain.into_iter().find_map(|n| match n {
            NodeRef::Native(id) => self.native(id).default_property.clone(),
            NodeRef::Object(id) => self.object(id).default_property.clone(),
        })
    }

    /// The value a member of declared type `type_name` holds.
    fn value_of_type(&self, type_name: &str) -> Value {
        if let Some(value) = Value::from_primitive_name(type_name) {
            return value;
        }
        let path: Vec<&str> = type_name.split('.').collect();
        self.lookup_type(&path)
            .or_else(|| self.native_by_class_name(type_name).map(NodeRef::Native))
            .map(Value::Node)
            .unwrap_or(Value::Undefined)
    }

    /// Rewrite `Module.Class` to `Alias.Class` when `Module` is imported
    /// under an alias.
    fn to_import_alias(&self, type_name: &str) -> String {
        if let Some((module, class)) = split_module(type_name) {
            let aliased = self
                .imports()
                .iter()
                .find(|import| import.path == module && import.alias.is_some());
            if let Some(alias) = aliased.and_then(|import| import.alias.as_ref()) {
                return format!("{alias}.{class}");
            }
        }
        type_name.to_string()
    }
}
