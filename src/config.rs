//! Resolver configuration.

use crate::base::constants::{
    FALLBACK_DEFAULT_PROPERTY, NATIVE_PSEUDO_PACKAGE, PREFERRED_EXPORT_PACKAGE, VALUE_TYPES,
};
use crate::base::{PropertyName, TypeName};

/// Knobs that shape how types are named and flattened.
///
/// The defaults describe the classic Qt Quick component set. A cache is
/// configured once via [`crate::metainfo::TypeCache::with_config`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MetaInfoConfig {
    /// Structured value types flattened into dotted sub-properties.
    pub value_types: Vec<TypeName>,
    /// Export package preferred when naming native ancestors.
    pub preferred_export_package: TypeName,
    /// Pseudo-package of native-only exports.
    pub native_pseudo_package: TypeName,
    /// Default property reported when a valid type declares none.
    pub fallback_default_property: PropertyName,
}

impl MetaInfoConfig {
    pub fn is_value_type(&self, type_name: &str) -> bool {
        self.value_types.iter().any(|t| t == type_name)
    }
}

impl Default for MetaInfoConfig {
    fn default() -> Self {
        Self {
            value_types: VALUE_TYPES.iter().map(|t| TypeName::new(t)).collect(),
            preferred_export_package: TypeName::new_static(PREFERRED_EXPORT_PACKAGE),
            native_pseudo_package: TypeName::new_static(NATIVE_PSEUDO_PACKAGE),
            fallback_default_property: PropertyName::new_static(FALLBACK_DEFAULT_PROPERTY),
        }
    }
}
