//! Error types for type resolution.
//!
//! These never cross the public query surface: a failed resolution becomes an
//! invalid [`super::NodeMetaInfo`] that keeps the error for diagnostics.

use thiserror::Error;

use crate::base::{ComponentVersion, TypeName};
use crate::model::PrototypeError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Neither the native registry nor the document knows the type.
    #[error("no type named `{0}`")]
    NotFound(TypeName),

    /// An explicit version was requested but a different one is registered.
    #[error("`{name}` requested at {requested} but registered at {available}")]
    VersionMismatch {
        name: TypeName,
        requested: ComponentVersion,
        available: ComponentVersion,
    },

    /// The prototype chain could not be computed.
    #[error(transparent)]
    Prototype(#[from] PrototypeError),

    /// Property flattening re-entered a type it was already expanding.
    #[error("recursive property expansion through `{0}`")]
    RecursiveProperty(TypeName),
}
