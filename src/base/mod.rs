//! Foundation types for the metainfo engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TypeName`], [`PropertyName`] - Small interned-style strings
//! - [`ComponentVersion`] - Major/minor component versions and the version gate
//! - [`TypeKey`] - Cache identity of a requested type
//! - Domain constants (value types, export packages, fallbacks)
//!
//! This module has NO dependencies on other metainfo modules.

pub mod constants;
mod names;
mod version;

pub use names::{PropertyName, TypeKey, TypeName, split_module, split_package, unqualified_name};
pub use version::ComponentVersion;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
