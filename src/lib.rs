//! # metainfo-base
//!
//! Type metadata resolution for declarative component documents: which
//! properties a component type has, how they are typed and flagged, what it
//! inherits from, and whether it is a subtype of another type at a version.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! metainfo  → Resolver, TypeCache, NodeMetaInfo handles
//!   ↓
//! model     → SemanticModel boundary, in-memory ModelIndex
//!   ↓
//! config    → MetaInfoConfig (value types, export packages)
//!   ↓
//! base      → Primitives (TypeName, ComponentVersion, TypeKey, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → config → model → metainfo)
// ============================================================================

/// Foundation types: names, versions, cache keys
pub mod base;

/// Resolver configuration
pub mod config;

/// Semantic model boundary and its in-memory implementation
pub mod model;

/// Type resolution, caching and the public query handle
pub mod metainfo;

// Re-export foundation types
pub use base::{ComponentVersion, PropertyName, TextRange, TextSize, TypeKey, TypeName};

pub use config::MetaInfoConfig;
pub use metainfo::{Fact, ModelRef, NodeMetaInfo, PropertyInfo, ResolveError, TypeCache};
pub use model::{ModelBuilder, ModelIndex, SemanticModel};
