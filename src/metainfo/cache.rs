//! Memoization of resolved types.
//!
//! A [`TypeCache`] belongs to one document session. It maps
//! `(name, major, minor)` to a shared, immutable [`ResolvedType`] and is
//! scoped to a single model snapshot at a time: the first request made with a
//! different snapshot drops every entry before resolving.
//!
//! Only valid resolutions are stored, so a type that appears later in an
//! edited document is picked up on the next request.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::base::{ComponentVersion, TypeKey};
use crate::config::MetaInfoConfig;
use crate::model::{ModelId, SemanticModel};

use super::handle::NodeMetaInfo;
use super::resolver::ResolvedType;

/// Shared handle on a model snapshot.
pub type ModelRef = Arc<dyn SemanticModel>;

#[derive(Default)]
struct CacheState {
    /// Snapshot the entries were built against.
    model: Option<ModelId>,
    entries: FxHashMap<TypeKey, Arc<ResolvedType>>,
}

impl CacheState {
    fn bind(&mut self, model: ModelId) {
        if self.model == Some(model) {
            return;
        }
        if !self.entries.is_empty() {
            tracing::debug!(
                "dropping {} cached types: model changed to {:?}",
                self.entries.len(),
                model
            );
            self.entries.clear();
        }
        self.model = Some(model);
    }
}

#[derive(Default)]
struct CacheInner {
    config: MetaInfoConfig,
    state: Mutex<CacheState>,
}

/// Per-session cache of resolved types. Cloning shares the cache.
#[derive(Clone, Default)]
pub struct TypeCache {
    inner: Arc<CacheInner>,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MetaInfoConfig) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                config,
                state: Mutex::new(CacheState::default()),
            }),
        }
    }

    pub fn config(&self) -> &MetaInfoConfig {
        &self.inner.config
    }

    /// Metadata handle for `type_name` at `major.minor` (`-1` for any).
    ///
    /// Never fails: unknown types yield an invalid handle.
    pub fn resolve(
        &self,
        model: &ModelRef,
        type_name: &str,
        major: i32,
        minor: i32,
    ) -> NodeMetaInfo {
        let data = self.entry(model, type_name, ComponentVersion::new(major, minor));
        NodeMetaInfo::from_parts(data, self.clone())
    }

    pub(crate) fn entry(
        &self,
        model: &ModelRef,
        type_name: &str,
        version: ComponentVersion,
    ) -> Arc<ResolvedType> {
        let key = TypeKey::new(type_name, version);

        {
            let mut state = self.inner.state.lock();
            state.bind(model.id());
            if let Some(entry) = state.entries.get(&key) {
                tracing::trace!("type cache hit: {}", key);
                return Arc::clone(entry);
            }
        }

        tracing::trace!("type cache miss: {}", key);
        let resolved = Arc::new(ResolvedType::resolve(model, &self.inner.config, &key));
        if !resolved.is_valid() {
            return resolved;
        }

        let mut state = self.inner.state.lock();
        state.bind(model.id());
        tracing::trace!("type cache insert: {}", key);
        Arc::clone(state.entries.entry(key).or_insert(resolved))
    }

    /// Drop every cached type, e.g. after the document was reparsed.
    pub fn clear(&self) {
        let mut state = self.inner.state.lock();
        tracing::debug!("clearing {} cached types", state.entries.len());
        state.entries.clear();
        state.model = None;
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for TypeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCache")
            .field("config", &self.inner.config)
            .field("len", &self.len())
            .finish()
    }
}
