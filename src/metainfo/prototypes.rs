//! Prototype chain walking.
//!
//! Turns the model's node chain into the ordered ancestor names the resolver
//! stores, immediate parent first. Native ancestors are named by their best
//! known export; document ancestors are kept only while the document can
//! still resolve their class name.

use crate::base::{ComponentVersion, TypeName};
use crate::config::MetaInfoConfig;
use crate::model::{NativeComponent, NodeRef, SemanticModel};

use super::error::ResolveError;

/// One link of a prototype chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeDescription {
    pub class_name: TypeName,
    pub version: ComponentVersion,
}

/// Ancestors of `start`, excluding `start` itself.
///
/// Any failure of the underlying traversal fails the whole walk; a partial
/// chain is never returned.
pub(crate) fn ancestors(
    model: &dyn SemanticModel,
    config: &MetaInfoConfig,
    start: NodeRef,
) -> Result<Vec<TypeDescription>, ResolveError> {
    let chain = model.prototype_chain(start)?;
    let mut descriptions = Vec::with_capacity(chain.len().saturating_sub(1));

    for node in chain.into_iter().skip(1) {
        match node {
            NodeRef::Native(id) => {
                let native = model.native(id);
                descriptions.push(TypeDescription {
                    class_name: export_name(native, config),
                    version: native.version,
                });
            }
            NodeRef::Object(id) => {
                let class_name = &model.object(id).class_name;
                if model.lookup_type(&[class_name.as_str()]).is_some() {
                    descriptions.push(TypeDescription {
                        class_name: class_name.clone(),
                        version: ComponentVersion::UNSPECIFIED,
                    });
                }
            }
        }
    }

    Ok(descriptions)
}

/// The name a native ancestor is best known by outside its module.
fn export_name(native: &NativeComponent, config: &MetaInfoConfig) -> TypeName {
    if let Some(export) = native.export_in_package(&config.preferred_export_package) {
        return export.qualified_name();
    }
    if native.package_name().is_empty() {
        if let Some(export) = native.export_in_package(&config.native_pseudo_package) {
            return export.qualified_name();
        }
    }
    native.qualified_name()
}
