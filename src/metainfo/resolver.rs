//! Type resolution.
//!
//! A [`ResolvedType`] is built once per requested `(name, version)` against a
//! model snapshot:
//!
//! 1. Look for a native component: the class part of the name is matched
//!    exactly, then imports whose path equals the module part are asked.
//! 2. Otherwise look the (import-alias rewritten) name up in the document.
//!    Native results must match an explicit version; document objects are
//!    file components.
//! 3. Collect properties, the default property and the prototype chain
//!    eagerly. Any failure leaves an invalid resolution.
//!
//! Flag queries are answered on demand from the model, never from stored
//! flags, and dotted names recurse into resolutions of the head's type.

use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::{
    ComponentVersion, PropertyName, TypeKey, TypeName, split_module, split_package,
    unqualified_name,
};
use crate::config::MetaInfoConfig;
use crate::model::{ImportKind, NativeId, NodeRef, NativeProperty, SemanticModel};

use super::cache::{ModelRef, TypeCache};
use super::error::ResolveError;
use super::properties::{PropertyCollector, PropertyInfo};
use super::prototypes::{self, TypeDescription};

/// A property flag that is either read from a native descriptor or assumed.
///
/// Unknown properties default permissively: writable, not a list, not a
/// pointer. Callers that only need the answer use [`Fact::value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fact {
    Known(bool),
    Assumed(bool),
}

impl Fact {
    pub fn value(self) -> bool {
        match self {
            Fact::Known(value) | Fact::Assumed(value) => value,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Fact::Known(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PropertyFlag {
    Writable,
    List,
    Pointer,
}

impl PropertyFlag {
    /// The answer when nothing better is known.
    fn permissive(self) -> bool {
        matches!(self, PropertyFlag::Writable)
    }

    fn read(self, property: &NativeProperty) -> bool {
        match self {
            PropertyFlag::Writable => property.writable,
            PropertyFlag::List => property.list,
            PropertyFlag::Pointer => property.pointer,
        }
    }
}

#[derive(Debug, Default)]
struct SubtypeMemo {
    positive: FxHashSet<TypeKey>,
    negative: FxHashSet<TypeKey>,
}

/// Where a requested type was found.
struct Located {
    node: NodeRef,
    native: Option<NativeId>,
    qualified_name: TypeName,
    version: ComponentVersion,
    is_file_component: bool,
}

pub(crate) struct ResolvedType {
    qualified_name: TypeName,
    version: ComponentVersion,
    model: Option<ModelRef>,
    node: Option<NodeRef>,
    /// Native descriptor of a natively backed type.
    native: Option<NativeId>,
    is_file_component: bool,
    properties: Vec<PropertyInfo>,
    local_properties: Vec<PropertyName>,
    default_property: Option<PropertyName>,
    prototypes: Vec<TypeDescription>,
    error: Option<ResolveError>,
    memo: Mutex<SubtypeMemo>,
}

impl ResolvedType {
    /// The shared "no type" resolution.
    pub(crate) fn empty() -> Self {
        Self {
            qualified_name: TypeName::default(),
            version: ComponentVersion::UNSPECIFIED,
            model: None,
            node: None,
            native: None,
            is_file_component: false,
            properties: Vec::new(),
            local_properties: Vec::new(),
            default_property: None,
            prototypes: Vec::new(),
            error: None,
            memo: Mutex::new(SubtypeMemo::default()),
        }
    }

    fn failed(key: &TypeKey, model: &ModelRef, error: ResolveError) -> Self {
        tracing::debug!("resolution of `{}` failed: {}", key, error);
        Self {
            qualified_name: key.name().clone(),
            version: key.version(),
            model: Some(Arc::clone(model)),
            error: Some(error),
            ..Self::empty()
        }
    }

    pub(crate) fn resolve(model: &ModelRef, config: &MetaInfoConfig, key: &TypeKey) -> Self {
        let result = locate(model.as_ref(), key)
            .and_then(|located| Self::complete(model, config, located));
        match result {
            Ok(resolved) => resolved,
            Err(error) => Self::failed(key, model, error),
        }
    }

    fn complete(
        model: &ModelRef,
        config: &MetaInfoConfig,
        located: Located,
    ) -> Result<Self, ResolveError> {
        let semantic = model.as_ref();
        let mut collector = PropertyCollector::new(semantic, config);
        let properties = collector.collect(located.node, true)?;
        let local_properties = collector
            .collect(located.node, false)?
            .into_iter()
            .map(|property| property.name)
            .collect();
        let default_property = semantic.default_property_name(located.node);
        let prototypes = prototypes::ancestors(semantic, config, located.node)?;

        Ok(Self {
            qualified_name: located.qualified_name,
            version: located.version,
            model: Some(Arc::clone(model)),
            node: Some(located.node),
            native: located.native,
            is_file_component: located.is_file_component,
            properties,
            local_properties,
            default_property,
            prototypes,
            error: None,
            memo: Mutex::new(SubtypeMemo::default()),
        })
    }

    // ========================================================================
    // STATE
    // ========================================================================

    pub(crate) fn is_valid(&self) -> bool {
        self.error.is_none() && self.model.is_some()
    }

    pub(crate) fn error(&self) -> Option<&ResolveError> {
        self.error.as_ref()
    }

    pub(crate) fn model(&self) -> Option<&ModelRef> {
        self.model.as_ref()
    }

    pub(crate) fn qualified_name(&self) -> &TypeName {
        &self.qualified_name
    }

    pub(crate) fn version(&self) -> ComponentVersion {
        self.version
    }

    pub(crate) fn is_file_component(&self) -> bool {
        self.is_file_component
    }

    pub(crate) fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    pub(crate) fn local_properties(&self) -> &[PropertyName] {
        &self.local_properties
    }

    pub(crate) fn default_property(&self) -> Option<&PropertyName> {
        self.default_property.as_ref()
    }

    pub(crate) fn prototypes(&self) -> &[TypeDescription] {
        &self.prototypes
    }

    /// Type of the first property collected under `name`.
    pub(crate) fn property_type(&self, name: &str) -> Option<&TypeName> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .map(|property| &property.type_name)
    }

    fn valid_model(&self) -> Option<&ModelRef> {
        self.model.as_ref().filter(|_| self.is_valid())
    }

    /// Native descriptor answering flag queries: the type's own, or for file
    /// components the first natively backed ancestor.
    fn nearest_native(&self, model: &dyn SemanticModel) -> Option<NativeId> {
        if self.is_file_component {
            self.node.and_then(|node| model.nearest_native(node))
        } else {
            self.native
        }
    }

    // ========================================================================
    // PROPERTY FLAGS
    // ========================================================================

    pub(crate) fn property_flag(&self, cache: &TypeCache, name: &str, flag: PropertyFlag) -> Fact {
        let Some(model) = self.valid_model() else {
            return Fact::Assumed(flag.permissive());
        };

        if let Some((head, rest)) = name.split_once('.') {
            let Some(head_type) = self.property_type(head) else {
                return Fact::Assumed(flag.permissive());
            };
            if cache.config().is_value_type(head_type) {
                return Fact::Known(flag.permissive());
            }
            let sub = cache.entry(model, head_type, ComponentVersion::UNSPECIFIED);
            if !sub.is_valid() {
                return Fact::Assumed(flag.permissive());
            }
            return sub.property_flag(cache, rest, flag);
        }

        let semantic = model.as_ref();
        self.nearest_native(semantic)
            .and_then(|native| semantic.native_property(native, name))
            .map(|property| Fact::Known(flag.read(property)))
            .unwrap_or(Fact::Assumed(flag.permissive()))
    }

    /// Resolution owning the leaf of a dotted name, with the leaf name.
    ///
    /// Returns `None` when the chain passes through a value type or an
    /// unresolvable type.
    fn leaf_owner<'n>(
        self: &Arc<Self>,
        cache: &TypeCache,
        name: &'n str,
    ) -> Option<(Arc<ResolvedType>, &'n str)> {
        let model = self.valid_model()?;
        match name.split_once('.') {
            None => Some((Arc::clone(self), name)),
            Some((head, rest)) => {
                let head_type = self.property_type(head)?;
                if cache.config().is_value_type(head_type) {
                    return None;
                }
                let sub = cache.entry(model, head_type, ComponentVersion::UNSPECIFIED);
                if !sub.is_valid() {
                    return None;
                }
                sub.leaf_owner(cache, rest)
            }
        }
    }

    pub(crate) fn property_is_enum(self: &Arc<Self>, cache: &TypeCache, name: &str) -> bool {
        self.property_enum_owner(cache, name).is_some()
    }

    pub(crate) fn property_enum_scope(
        self: &Arc<Self>,
        cache: &TypeCache,
        name: &str,
    ) -> Option<TypeName> {
        let (model, defined_in) = self.property_enum_owner(cache, name)?;
        Some(model.native(defined_in).class_name.clone())
    }

    /// Model and declaring component of the enum a property is typed with.
    fn property_enum_owner(
        self: &Arc<Self>,
        cache: &TypeCache,
        name: &str,
    ) -> Option<(ModelRef, NativeId)> {
        let (owner, leaf) = self.leaf_owner(cache, name)?;
        let model = owner.valid_model()?;
        let native = owner.nearest_native(model.as_ref())?;
        let enum_name = owner.property_type(leaf)?;
        let (defined_in, _) = model.find_enum(native, enum_name)?;
        Some((Arc::clone(model), defined_in))
    }

    pub(crate) fn keys_for_enum(&self, enum_name: &str) -> Vec<SmolStr> {
        let Some(model) = self.valid_model() else {
            return Vec::new();
        };
        self.nearest_native(model.as_ref())
            .and_then(|native| model.find_enum(native, enum_name))
            .map(|(_, def)| def.keys.clone())
            .unwrap_or_default()
    }

    // ========================================================================
    // SUBTYPES
    // ========================================================================

    pub(crate) fn is_subclass_of(
        &self,
        cache: &TypeCache,
        type_name: &str,
        requested: ComponentVersion,
    ) -> bool {
        let Some(model) = self.valid_model() else {
            tracing::debug!("subtype query `{}` on an invalid type", type_name);
            return false;
        };
        if self.qualified_name.is_empty() {
            return false;
        }
        if self.qualified_name == type_name && self.available_in(requested) {
            return true;
        }

        let key = TypeKey::new(type_name, requested);
        {
            let memo = self.memo.lock();
            if memo.positive.contains(&key) {
                tracing::trace!("subtype memo hit: {} <: {}", self.qualified_name, key);
                return true;
            }
            if memo.negative.contains(&key) {
                tracing::trace!("subtype memo hit: {} !<: {}", self.qualified_name, key);
                return false;
            }
        }

        let matched = self.prototypes.iter().any(|description| {
            let ancestor = cache.entry(model, &description.class_name, description.version);
            ancestor.matches_type_name(type_name) && ancestor.available_in(requested)
        });

        let mut memo = self.memo.lock();
        if matched {
            memo.positive.insert(key);
        } else {
            memo.negative.insert(key);
        }
        matched
    }

    /// Version gate shared by availability and subtype queries. A type
    /// without a version is only available to unversioned requests.
    pub(crate) fn available_in(&self, requested: ComponentVersion) -> bool {
        self.version.satisfies(requested)
    }

    /// Module name of a natively backed type, empty otherwise.
    fn package_name(&self, model: &dyn SemanticModel) -> TypeName {
        if self.is_file_component {
            return TypeName::default();
        }
        self.native
            .map(|native| TypeName::new(model.native(native).package_name()))
            .unwrap_or_default()
    }

    /// Package-aware comparison of this type against `other`.
    ///
    /// File components only match by exact name. Natively backed types
    /// compare fully qualified names within their own module, and otherwise
    /// consult their export table for the requested package.
    fn matches_type_name(&self, other: &str) -> bool {
        if self.qualified_name == other {
            return true;
        }
        if self.is_file_component {
            return false;
        }
        let Some(model) = self.valid_model() else {
            return false;
        };
        let model = model.as_ref();

        let (package, bare) = split_package(other);
        let own_package = self.package_name(model);
        if own_package == package {
            return format!("{package}.{bare}")
                == format!("{own_package}.{}", unqualified_name(&self.qualified_name));
        }

        let Some(native) = self.native else {
            return false;
        };
        let component = model.native(native);
        let exported = component
            .export_in_package(package)
            .map(|export| export.type_name.as_str())
            .unwrap_or(component.class_name.as_str());
        bare == exported
    }

    // ========================================================================
    // FILE COMPONENTS
    // ========================================================================

    pub(crate) fn component_source(&self) -> Option<&str> {
        let model = self.file_component_model()?;
        let object = self.node?.as_object()?;
        let source = model.object(object).source.as_ref()?;
        let text = model.document_source(&source.file)?;
        text.get(Range::<usize>::from(source.range))
    }

    pub(crate) fn component_file_name(&self) -> Option<&str> {
        let model = self.file_component_model()?;
        let object = self.node?.as_object()?;
        model
            .object(object)
            .source
            .as_ref()
            .map(|source| source.file.as_ref())
    }

    pub(crate) fn import_directory_path(&self) -> Option<PathBuf> {
        let model = self.valid_model()?;
        let aliased = model.to_import_alias(&self.qualified_name);
        let bare = split_module(&aliased)
            .map(|(_, class)| class)
            .unwrap_or(aliased.as_str());
        let import = model.import_info(bare)?;

        match import.kind {
            ImportKind::Directory => Some(PathBuf::from(import.path.as_str())),
            ImportKind::Library => {
                let relative = import.filesystem_path();
                model
                    .import_paths()
                    .iter()
                    .map(|root| root.join(&relative))
                    .find(|candidate| candidate.is_dir())
            }
            ImportKind::File => None,
        }
    }

    fn file_component_model(&self) -> Option<&dyn SemanticModel> {
        if !self.is_file_component {
            return None;
        }
        self.valid_model().map(|model| model.as_ref())
    }
}

/// Find the node a requested type names.
fn locate(model: &dyn SemanticModel, key: &TypeKey) -> Result<Located, ResolveError> {
    let name = key.name();
    let requested = key.version();

    if let Some(native) = find_native(model, name, requested) {
        let version = if requested.is_unspecified() {
            model.native(native).version
        } else {
            requested
        };
        return Ok(Located {
            node: NodeRef::Native(native),
            native: Some(native),
            qualified_name: name.clone(),
            version,
            is_file_component: false,
        });
    }

    let aliased = model.to_import_alias(name);
    let path: Vec<&str> = aliased.split('.').collect();
    let node = model
        .lookup_type(&path)
        .ok_or_else(|| ResolveError::NotFound(name.clone()))?;

    match node {
        NodeRef::Native(id) => {
            let component = model.native(id);
            if !requested.is_unspecified() && requested != component.version {
                return Err(ResolveError::VersionMismatch {
                    name: name.clone(),
                    requested,
                    available: component.version,
                });
            }
            Ok(Located {
                node,
                native: Some(id),
                qualified_name: component.qualified_name(),
                version: component.version,
                is_file_component: false,
            })
        }
        NodeRef::Object(_) => {
            let bare = path.last().copied().unwrap_or_default();
            let version = match model.import_info(bare) {
                Some(import) if import.is_library() => import.version,
                _ => requested,
            };
            Ok(Located {
                node,
                native: None,
                qualified_name: name.clone(),
                version,
                is_file_component: true,
            })
        }
    }
}

/// Native component for a qualified name: by exact class name, or through an
/// import of the module at a matching version.
fn find_native(
    model: &dyn SemanticModel,
    name: &str,
    requested: ComponentVersion,
) -> Option<NativeId> {
    let (module, class) = split_module(name)?;
    if let Some(native) = model.native_by_class_name(class) {
        return Some(native);
    }

    model
        .imports()
        .iter()
        .filter(|import| import.path == module)
        .find_map(|import| match import.lookup_member(class) {
            Some(NodeRef::Native(id)) if model.native(id).version.matches(requested) => Some(id),
            _ => None,
        })
}
