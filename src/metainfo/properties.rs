//! Property enumeration.
//!
//! Collects the `(name, type)` pairs of a type, resolving aliases and
//! flattening grouped and value-type properties into dotted names:
//!
//! ```text
//! font        QFont     ← value type
//! font.bold   bool      ← flattened member
//! icon        IconGroup ← read-only pointer
//! icon.name   string    ← flattened member of the pointee
//! ```
//!
//! Inherited properties are appended after the type's own, so a name may
//! appear more than once; lookups take the first occurrence.

use crate::base::constants::{ALIAS_MEMBER_TYPE, UNTYPED_MEMBER_TYPE};
use crate::base::{PropertyName, TypeName};
use crate::config::MetaInfoConfig;
use crate::model::{MemberKind, NativeId, NodeRef, ObjectId, SemanticModel, Value};

use super::error::ResolveError;

/// A property name with its declared (or resolved) type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: PropertyName,
    pub type_name: TypeName,
}

impl PropertyInfo {
    pub fn new(name: impl Into<PropertyName>, type_name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

pub(crate) struct PropertyCollector<'a> {
    model: &'a dyn SemanticModel,
    config: &'a MetaInfoConfig,
    /// Nodes currently being expanded, innermost last.
    in_progress: Vec<NodeRef>,
}

impl<'a> PropertyCollector<'a> {
    pub(crate) fn new(model: &'a dyn SemanticModel, config: &'a MetaInfoConfig) -> Self {
        Self {
            model,
            config,
            in_progress: Vec::new(),
        }
    }

    /// Properties of `node`, with those of its prototypes when `inherited`.
    pub(crate) fn collect(
        &mut self,
        node: NodeRef,
        inherited: bool,
    ) -> Result<Vec<PropertyInfo>, ResolveError> {
        if self.model.class_name(node).is_empty() {
            return Ok(Vec::new());
        }
        if self.in_progress.contains(&node) {
            return Err(ResolveError::RecursiveProperty(TypeName::new(
                self.model.class_name(node),
            )));
        }

        self.in_progress.push(node);
        let result = self.collect_node(node, inherited);
        self.in_progress.pop();
        result
    }

    fn collect_node(
        &mut self,
        node: NodeRef,
        inherited: bool,
    ) -> Result<Vec<PropertyInfo>, ResolveError> {
        let mut properties = match node {
            NodeRef::Native(id) => self.collect_native(id)?,
            NodeRef::Object(id) => self.collect_object(id)?,
        };

        if inherited {
            if let Some(prototype) = self.model.prototype(node)? {
                properties.extend(self.collect(prototype, true)?);
            }
        }

        Ok(properties)
    }

    fn collect_native(&mut self, id: NativeId) -> Result<Vec<PropertyInfo>, ResolveError> {
        let model = self.model;
        let mut properties = Vec::new();

        for (name, property) in &model.native(id).properties {
            let pointee = model.native_by_class_name(&property.type_name);

            let type_name = match pointee {
                Some(target) if property.pointer || property.list => {
                    model.native(target).qualified_name()
                }
                _ => property.type_name.clone(),
            };
            properties.push(PropertyInfo::new(name.clone(), type_name));

            // Grouped property objects such as `anchors` or `font`.
            let Some(target) = pointee else {
                continue;
            };
            let grouped = !property.writable && property.pointer;
            if grouped || self.config.is_value_type(&property.type_name) {
                let members = self.collect(NodeRef::Native(target), true)?;
                push_dotted(&mut properties, name, members);
            }
        }

        Ok(properties)
    }

    fn collect_object(&mut self, id: ObjectId) -> Result<Vec<PropertyInfo>, ResolveError> {
        let model = self.model;
        let mut properties = Vec::new();

        for member in &model.object(id).members {
            match &member.kind {
                MemberKind::Declared(type_name) => {
                    properties.push(PropertyInfo::new(member.name.clone(), type_name.clone()));
                    if self.config.is_value_type(type_name) {
                        if let Some(target) = model.native_by_class_name(type_name) {
                            let members = self.collect(NodeRef::Native(target), true)?;
                            push_dotted(&mut properties, &member.name, members);
                        }
                    }
                }
                MemberKind::Alias(target) => {
                    let resolved = model.lookup_reference(id, target);
                    match resolved {
                        Some(Value::Node(NodeRef::Object(object))) => {
                            let type_name = model.object(object).class_name.clone();
                            properties.push(PropertyInfo::new(member.name.clone(), type_name));
                            let members = self.collect(NodeRef::Object(object), true)?;
                            push_dotted(&mut properties, &member.name, members);
                        }
                        other => {
                            let type_name = other
                                .map(|value| self.value_type_name(value))
                                .unwrap_or_else(|| TypeName::new_static(ALIAS_MEMBER_TYPE));
                            properties.push(PropertyInfo::new(member.name.clone(), type_name));
                        }
                    }
                }
                MemberKind::Bound(value) => {
                    properties.push(PropertyInfo::new(
                        member.name.clone(),
                        self.value_type_name(*value),
                    ));
                }
            }
        }

        Ok(properties)
    }

    fn value_type_name(&self, value: Value) -> TypeName {
        match value {
            Value::Node(NodeRef::Native(id)) => self.model.native(id).qualified_name(),
            Value::Node(NodeRef::Object(id)) => self.model.object(id).class_name.clone(),
            Value::Undefined => TypeName::new_static(UNTYPED_MEMBER_TYPE),
            primitive => primitive
                .primitive_name()
                .map(TypeName::new_static)
                .unwrap_or_else(|| TypeName::new_static(UNTYPED_MEMBER_TYPE)),
        }
    }
}

fn push_dotted(out: &mut Vec<PropertyInfo>, prefix: &str, members: Vec<PropertyInfo>) {
    out.extend(members.into_iter().map(|member| {
        PropertyInfo::new(format!("{}.{}", prefix, member.name), member.type_name)
    }));
}
