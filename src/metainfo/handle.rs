//! The public query handle.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use smol_str::SmolStr;

use crate::base::constants::{LEGACY_POSITIONER_TYPE, POSITIONER_TYPE};
use crate::base::{ComponentVersion, PropertyName, TypeName};

use super::cache::TypeCache;
use super::error::ResolveError;
use super::properties::PropertyInfo;
use super::resolver::{Fact, PropertyFlag, ResolvedType};
use super::value::{PropertyValue, VariantKind};

static INVALID: LazyLock<NodeMetaInfo> = LazyLock::new(|| NodeMetaInfo {
    data: Arc::new(ResolvedType::empty()),
    cache: TypeCache::default(),
});

/// Read-only metadata of one component type.
///
/// Cheap to clone: handles share the resolved data of their cache. A type
/// that could not be resolved yields an invalid handle whose queries return
/// conservative defaults instead of failing.
#[derive(Clone)]
pub struct NodeMetaInfo {
    data: Arc<ResolvedType>,
    cache: TypeCache,
}

impl NodeMetaInfo {
    pub(crate) fn from_parts(data: Arc<ResolvedType>, cache: TypeCache) -> Self {
        Self { data, cache }
    }

    /// The shared "no type" handle.
    pub fn invalid() -> Self {
        INVALID.clone()
    }

    pub fn is_valid(&self) -> bool {
        self.data.is_valid()
    }

    /// Why resolution failed, if it did.
    pub fn error(&self) -> Option<&ResolveError> {
        self.data.error()
    }

    pub fn is_file_component(&self) -> bool {
        self.data.is_file_component()
    }

    /// Whether both handles share one resolution.
    pub fn ptr_eq(&self, other: &NodeMetaInfo) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    // ========================================================================
    // IDENTITY
    // ========================================================================

    pub fn type_name(&self) -> &TypeName {
        self.data.qualified_name()
    }

    pub fn version(&self) -> ComponentVersion {
        self.data.version()
    }

    pub fn major_version(&self) -> i32 {
        self.version().major()
    }

    pub fn minor_version(&self) -> i32 {
        self.version().minor()
    }

    /// Whether the type exists at `major.minor`. `-1.-1` asks for any version.
    pub fn available_in_version(&self, major: i32, minor: i32) -> bool {
        self.data.available_in(ComponentVersion::new(major, minor))
    }

    // ========================================================================
    // PROPERTIES
    // ========================================================================

    pub fn has_property(&self, name: &str) -> bool {
        self.data.property_type(name).is_some()
    }

    /// All properties, inherited ones last. Shadowed names are kept.
    pub fn properties(&self) -> &[PropertyInfo] {
        self.data.properties()
    }

    pub fn property_names(&self) -> impl Iterator<Item = &PropertyName> + '_ {
        self.data.properties().iter().map(|property| &property.name)
    }

    /// Names declared by the type itself, excluding inherited ones.
    pub fn direct_property_names(&self) -> &[PropertyName] {
        self.data.local_properties()
    }

    /// Declared type of the first property collected under `name`.
    pub fn property_type_name(&self, name: &str) -> Option<&TypeName> {
        self.data.property_type(name)
    }

    pub fn default_property_name(&self) -> &str {
        if let Some(name) = self.data.default_property() {
            return name.as_str();
        }
        if self.is_valid() {
            self.cache.config().fallback_default_property.as_str()
        } else {
            ""
        }
    }

    pub fn has_default_property(&self) -> bool {
        !self.default_property_name().is_empty()
    }

    pub fn property_writability(&self, name: &str) -> Fact {
        self.data.property_flag(&self.cache, name, PropertyFlag::Writable)
    }

    pub fn property_listness(&self, name: &str) -> Fact {
        self.data.property_flag(&self.cache, name, PropertyFlag::List)
    }

    pub fn property_pointerness(&self, name: &str) -> Fact {
        self.data.property_flag(&self.cache, name, PropertyFlag::Pointer)
    }

    pub fn property_is_writable(&self, name: &str) -> bool {
        self.property_writability(name).value()
    }

    pub fn property_is_list(&self, name: &str) -> bool {
        self.property_listness(name).value()
    }

    pub fn property_is_pointer(&self, name: &str) -> bool {
        self.property_pointerness(name).value()
    }

    pub fn property_is_enum_type(&self, name: &str) -> bool {
        self.data.property_is_enum(&self.cache, name)
    }

    /// Class name of the component declaring the enum `name` is typed with.
    pub fn property_enum_scope(&self, name: &str) -> Option<TypeName> {
        self.data.property_enum_scope(&self.cache, name)
    }

    /// Keys of the enum property `name` is typed with.
    pub fn property_keys_for_enum(&self, name: &str) -> Vec<SmolStr> {
        match self.property_type_name(name) {
            Some(enum_name) => self.data.keys_for_enum(enum_name),
            None => Vec::new(),
        }
    }

    pub fn property_variant_kind(&self, name: &str) -> VariantKind {
        self.property_type_name(name)
            .map(|type_name| VariantKind::from_type_name(type_name))
            .unwrap_or(VariantKind::Unknown)
    }

    /// Coerce an editor value to the kind of property `name`.
    ///
    /// Enum, untyped and object-typed properties take the value as is. When a
    /// conversion is impossible the value's text is read back as a literal.
    pub fn property_cast_value(&self, name: &str, value: PropertyValue) -> PropertyValue {
        if matches!(value, PropertyValue::List(_)) || self.property_is_enum_type(name) {
            return value;
        }
        let kind = self.property_variant_kind(name);
        if matches!(kind, VariantKind::UserType | VariantKind::Unknown) {
            return value;
        }
        match value.convert(&kind) {
            Some(converted) => converted,
            None => {
                tracing::trace!("cannot convert {:?} to {:?} for `{}`", value, kind, name);
                PropertyValue::from_literal(&value.to_string())
            }
        }
    }

    // ========================================================================
    // ANCESTRY
    // ========================================================================

    /// Ancestors, immediate parent first. Empty for invalid handles.
    pub fn super_classes(&self) -> Vec<NodeMetaInfo> {
        let Some(model) = self.data.model().filter(|_| self.is_valid()) else {
            return Vec::new();
        };
        self.data
            .prototypes()
            .iter()
            .map(|description| {
                let version = description.version;
                self.cache.resolve(
                    model,
                    &description.class_name,
                    version.major(),
                    version.minor(),
                )
            })
            .collect()
    }

    pub fn direct_super_class(&self) -> NodeMetaInfo {
        self.super_classes()
            .into_iter()
            .next()
            .unwrap_or_else(NodeMetaInfo::invalid)
    }

    /// Whether this type is `type_name` at `major.minor` or derives from it.
    pub fn is_subclass_of(&self, type_name: &str, major: i32, minor: i32) -> bool {
        self.data
            .is_subclass_of(&self.cache, type_name, ComponentVersion::new(major, minor))
    }

    /// Unversioned types count as pre-2.0 components.
    pub fn is_positioner(&self) -> bool {
        if self.major_version() < 2 {
            return self.is_subclass_of(LEGACY_POSITIONER_TYPE, -1, -1);
        }
        self.is_subclass_of(POSITIONER_TYPE, -1, -1)
    }

    // ========================================================================
    // FILE COMPONENTS
    // ========================================================================

    /// Source text of a file component's root object.
    pub fn component_source(&self) -> Option<&str> {
        self.data.component_source()
    }

    pub fn component_file_name(&self) -> Option<&str> {
        self.data.component_file_name()
    }

    /// Directory the type was imported from.
    pub fn import_directory_path(&self) -> Option<PathBuf> {
        self.data.import_directory_path()
    }
}

impl Default for NodeMetaInfo {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Debug for NodeMetaInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeMetaInfo")
            .field("type_name", self.type_name())
            .field("version", &self.version())
            .field("valid", &self.is_valid())
            .field("file_component", &self.is_file_component())
            .finish()
    }
}
