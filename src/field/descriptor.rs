//! Cached Field Descriptor
//!
//! Read-only computed attribute whose cache belongs to the accessor
//! definition, keyed by owning instance.

use std::fmt;

use tracing::debug;

use crate::cache::{CacheKey, CacheStats, KeyedCache};
use crate::config::Config;
use crate::error::Result;

// == Cached Field ==
/// A single-argument accessor paired with one cache for all its owners.
///
/// Owners only appear as keys: no storage is added to them, and owners that
/// compare equal read the same slot. An owner whose key-relevant state
/// changes after a read leaves its old entry behind and gets a new one.
pub struct CachedField<O, V>
where
    O: CacheKey,
{
    name: String,
    doc: Option<String>,
    accessor: fn(&O) -> V,
    cache: KeyedCache<O::Key, V>,
}

impl<O, V> CachedField<O, V>
where
    O: CacheKey,
    V: Clone,
{
    // == Constructor ==
    /// Wraps `accessor` under the attribute name `name`.
    pub fn new(name: impl Into<String>, accessor: fn(&O) -> V) -> Self {
        Self::with_config(name, accessor, &Config::default())
    }

    /// Same as [`new`](Self::new), building the cache from `config`.
    pub fn with_config(name: impl Into<String>, accessor: fn(&O) -> V, config: &Config) -> Self {
        let name = name.into();
        debug!("Caching field {}", name);

        Self {
            name,
            doc: None,
            accessor,
            cache: KeyedCache::with_config(config),
        }
    }

    /// Attaches the accessor's documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    // == Get ==
    /// Reads the field for `owner`, running the accessor on the first read
    /// of an owner with a new key.
    ///
    /// Fails with [`MemoError::UnhashableKey`](crate::MemoError::UnhashableKey)
    /// when no key can be derived from `owner`.
    pub fn get(&self, owner: &O) -> Result<V> {
        let key = owner.cache_key()?;
        Ok(self.cache.get_or_compute(key, || (self.accessor)(owner)))
    }

    /// Checks whether `owner` (or an owner equal to it) has been read.
    pub fn is_cached(&self, owner: &O) -> Result<bool> {
        Ok(self.cache.contains_key(&owner.cache_key()?))
    }

    /// Returns the attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the accessor's documentation, if any.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    // == Cache Views ==
    /// Returns lookup statistics for this field's cache.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Returns the number of distinct owner keys with a cached value.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if no owner has been read yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<O, V> fmt::Debug for CachedField<O, V>
where
    O: CacheKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedField")
            .field("name", &self.name)
            .field("cache", &self.cache)
            .finish()
    }
}
