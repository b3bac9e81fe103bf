//! Arena-backed in-memory semantic model.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{
    Import, ImportKind, MemberKind, ModelId, NativeComponent, NativeId, NodeRef, ObjectId,
    ObjectNode, PrototypeError, SemanticModel, Value,
};
use crate::base::{PropertyName, TypeName};

/// Assembles a [`ModelIndex`].
///
/// The builder can be cloned and built again to produce a fresh snapshot,
/// which is how a reparse of an unchanged document is modelled.
#[derive(Clone, Debug, Default)]
pub struct ModelBuilder {
    natives: Vec<NativeComponent>,
    objects: Vec<ObjectNode>,
    types: IndexMap<TypeName, NodeRef>,
    imports: Vec<Import>,
    documents: FxHashMap<Arc<str>, Arc<str>>,
    import_paths: Vec<PathBuf>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_native(&mut self, component: NativeComponent) -> NativeId {
        let id = NativeId::new(self.natives.len() as u32);
        self.natives.push(component);
        id
    }

    pub fn add_object(&mut self, object: ObjectNode) -> ObjectId {
        let id = ObjectId::new(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    /// Make a node visible in the document under `name`.
    pub fn register_type(&mut self, name: impl Into<TypeName>, node: NodeRef) {
        self.types.insert(name.into(), node);
    }

    pub fn add_import(&mut self, import: Import) {
        self.imports.push(import);
    }

    pub fn add_document(&mut self, file: impl Into<Arc<str>>, source: impl Into<Arc<str>>) {
        self.documents.insert(file.into(), source.into());
    }

    pub fn add_import_path(&mut self, path: impl Into<PathBuf>) {
        self.import_paths.push(path.into());
    }

    /// Freeze the builder into a snapshot with a new identity.
    ///
    /// Library imports gain every native component exported under the
    /// import's path at a version no newer than the import's.
    pub fn build(self) -> ModelIndex {
        let mut natives_by_name = FxHashMap::default();
        for (idx, native) in self.natives.iter().enumerate() {
            natives_by_name
                .entry(native.class_name.clone())
                .or_insert(NativeId::new(idx as u32));
        }

        let mut imports = self.imports;
        for import in imports.iter_mut().filter(|i| i.kind == ImportKind::Library) {
            for (idx, native) in self.natives.iter().enumerate() {
                for export in native.exports.iter().filter(|e| e.package == import.path) {
                    if !export.version.is_unspecified()
                        && !import.version.is_unspecified()
                        && !import.version.satisfies(export.version)
                    {
                        continue;
                    }
                    import
                        .members
                        .entry(export.type_name.clone())
                        .or_insert(NodeRef::Native(NativeId::new(idx as u32)));
                }
            }
        }

        ModelIndex {
            id: ModelId::next(),
            natives: self.natives,
            natives_by_name,
            objects: self.objects,
            types: self.types,
            imports,
            documents: self.documents,
            import_paths: self.import_paths,
        }
    }
}

/// An immutable model snapshot.
#[derive(Debug)]
pub struct ModelIndex {
    id: ModelId,
    natives: Vec<NativeComponent>,
    natives_by_name: FxHashMap<TypeName, NativeId>,
    objects: Vec<ObjectNode>,
    /// Types declared in the document itself, by (possibly dotted) name.
    types: IndexMap<TypeName, NodeRef>,
    imports: Vec<Import>,
    documents: FxHashMap<Arc<str>, Arc<str>>,
    import_paths: Vec<PathBuf>,
}

impl ModelIndex {
    pub fn native_count(&self) -> usize {
        self.natives.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Value of `member` on `value`, following object prototypes.
    fn member_value(
        &self,
        value: Value,
        member: &str,
        seen: &mut Vec<(ObjectId, PropertyName)>,
    ) -> Option<Value> {
        let node = match value {
            Value::Node(node) => node,
            _ => return None,
        };

        let chain = self.prototype_chain(node).ok()?;
        for link in chain {
            match link {
                NodeRef::Object(id) => {
                    let Some(found) = self.object(id).member(member) else {
                        continue;
                    };
                    return match &found.kind {
                        MemberKind::Declared(type_name) => Some(self.value_of_type(type_name)),
                        MemberKind::Bound(bound) => Some(*bound),
                        MemberKind::Alias(target) => {
                            let key = (id, found.name.clone());
                            if seen.contains(&key) {
                                return None;
                            }
                            seen.push(key);
                            self.resolve_reference(id, target, seen)
                        }
                    };
                }
                NodeRef::Native(id) => {
                    if let Some(property) = self.native(id).properties.get(member) {
                        return Some(self.value_of_type(&property.type_name));
                    }
                }
            }
        }
        None
    }

    fn resolve_reference(
        &self,
        owner: ObjectId,
        path: &[SmolStr],
        seen: &mut Vec<(ObjectId, PropertyName)>,
    ) -> Option<Value> {
        let (first, rest) = path.split_first()?;
        let mut value = *self.object(owner).ids.get(first)?;
        for segment in rest {
            value = self.member_value(value, segment, seen)?;
        }
        Some(value)
    }
}

impl SemanticModel for ModelIndex {
    fn id(&self) -> ModelId {
        self.id
    }

    fn native(&self, id: NativeId) -> &NativeComponent {
        &self.natives[id.index()]
    }

    fn object(&self, id: ObjectId) -> &ObjectNode {
        &self.objects[id.index()]
    }

    fn native_by_class_name(&self, class_name: &str) -> Option<NativeId> {
        self.natives_by_name.get(class_name).copied()
    }

    fn imports(&self) -> &[Import] {
        &self.imports
    }

    fn lookup_type(&self, path: &[&str]) -> Option<NodeRef> {
        match path {
            [] => None,
            [name] => self.types.get(*name).copied().or_else(|| {
                self.imports
                    .iter()
                    .filter(|import| import.alias.is_none())
                    .find_map(|import| import.lookup_member(name))
            }),
            [qualifier, name]
                if self
                    .imports
                    .iter()
                    .any(|i| i.alias.as_deref() == Some(*qualifier)) =>
            {
                self.imports
                    .iter()
                    .filter(|import| import.alias.as_deref() == Some(*qualifier))
                    .find_map(|import| import.lookup_member(name))
            }
            [module @ .., name] => {
                let module = module.join(".");
                self.imports
                    .iter()
                    .filter(|import| import.alias.is_none() && import.path == module.as_str())
                    .find_map(|import| import.lookup_member(name))
                    .or_else(|| self.types.get(path.join(".").as_str()).copied())
            }
        }
    }

    fn import_info(&self, type_name: &str) -> Option<&Import> {
        self.imports
            .iter()
            .find(|import| import.lookup_member(type_name).is_some())
    }

    fn lookup_reference(&self, owner: ObjectId, path: &[SmolStr]) -> Option<Value> {
        let mut seen = Vec::new();
        self.resolve_reference(owner, path, &mut seen)
    }

    fn prototype(&self, node: NodeRef) -> Result<Option<NodeRef>, PrototypeError> {
        match node {
            NodeRef::Native(id) => match &self.native(id).prototype {
                None => Ok(None),
                Some(name) => self
                    .native_by_class_name(name)
                    .map(|proto| Some(NodeRef::Native(proto)))
                    .ok_or_else(|| PrototypeError::Unresolved(name.clone())),
            },
            NodeRef::Object(id) => match &self.object(id).prototype {
                None => Ok(None),
                Some(name) => {
                    let path: Vec<&str> = name.split('.').collect();
                    self.lookup_type(&path)
                        .map(Some)
                        .ok_or_else(|| PrototypeError::Unresolved(name.clone()))
                }
            },
        }
    }

    fn document_source(&self, file: &str) -> Option<&str> {
        self.documents.get(file).map(|text| text.as_ref())
    }

    fn import_paths(&self) -> &[PathBuf] {
        &self.import_paths
    }
}
