//! Type metadata resolution and caching.
//!
//! ```text
//! TypeCache::resolve(model, name, major, minor)
//!     │
//!     ├─ hit  → shared ResolvedType
//!     └─ miss → ResolvedType::resolve
//!                  ├─ locate          (native registry, then document lookup)
//!                  ├─ PropertyCollector  (aliases, grouped and value types)
//!                  └─ prototypes::ancestors
//!     ▼
//! NodeMetaInfo   ← cheap handle, never fails
//! ```
//!
//! Resolutions are immutable once built. Flag queries on dotted names and
//! subtype queries resolve related types through the same cache.

mod cache;
mod error;
mod handle;
mod properties;
mod prototypes;
mod resolver;
mod value;

pub use cache::{ModelRef, TypeCache};
pub use error::ResolveError;
pub use handle::NodeMetaInfo;
pub use properties::PropertyInfo;
pub use prototypes::TypeDescription;
pub use resolver::Fact;
pub use value::{PropertyValue, VariantKind};
