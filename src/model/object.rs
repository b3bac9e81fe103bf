//! Objects declared in documents.

use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;
use text_size::TextRange;

use super::Value;
use crate::base::constants::ALIAS_MEMBER_TYPE;
use crate::base::{PropertyName, TypeName};

/// Where an object's definition lives.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLocation {
    pub file: Arc<str>,
    /// Byte range from the type name to the closing brace.
    pub range: TextRange,
}

/// How a member gets its type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    /// `property <type> name`
    Declared(TypeName),
    /// `property alias name: id.member...`
    Alias(Vec<SmolStr>),
    /// A member holding a value directly.
    Bound(Value),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    pub name: PropertyName,
    pub kind: MemberKind,
}

impl Member {
    /// The type as written on the declaration.
    pub fn declared_type(&self) -> Option<&str> {
        match &self.kind {
            MemberKind::Declared(type_name) => Some(type_name),
            MemberKind::Alias(_) => Some(ALIAS_MEMBER_TYPE),
            MemberKind::Bound(_) => None,
        }
    }
}

/// A document object: a file component root or an inline object.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectNode {
    /// Empty for anonymous objects.
    pub class_name: TypeName,
    /// Prototype type name as written, possibly qualified.
    pub prototype: Option<TypeName>,
    pub members: Vec<Member>,
    /// Object ids visible from this object's scope.
    pub ids: IndexMap<SmolStr, Value>,
    pub default_property: Option<PropertyName>,
    pub source: Option<SourceLocation>,
}

impl ObjectNode {
    pub fn new(class_name: impl Into<TypeName>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    pub fn with_prototype(mut self, type_name: impl Into<TypeName>) -> Self {
        self.prototype = Some(type_name.into());
        self
    }

    pub fn with_property(
        mut self,
        name: impl Into<PropertyName>,
        type_name: impl Into<TypeName>,
    ) -> Self {
        self.members.push(Member {
            name: name.into(),
            kind: MemberKind::Declared(type_name.into()),
        });
        self
    }

    /// Declare an alias; `target` is a dotted reference like `label.color`.
    pub fn with_alias(mut self, name: impl Into<PropertyName>, target: &str) -> Self {
        self.members.push(Member {
            name: name.into(),
            kind: MemberKind::Alias(target.split('.').map(SmolStr::new).collect()),
        });
        self
    }

    pub fn with_binding(mut self, name: impl Into<PropertyName>, value: Value) -> Self {
        self.members.push(Member {
            name: name.into(),
            kind: MemberKind::Bound(value),
        });
        self
    }

    pub fn with_id(mut self, id: impl Into<SmolStr>, value: Value) -> Self {
        self.ids.insert(id.into(), value);
        self
    }

    pub fn with_default_property(mut self, name: impl Into<PropertyName>) -> Self {
        self.default_property = Some(name.into());
        self
    }

    pub fn with_source(mut self, file: impl Into<Arc<str>>, range: TextRange) -> Self {
        self.source = Some(SourceLocation {
            file: file.into(),
            range,
        });
        self
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}
