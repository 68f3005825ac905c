//! Cache Module
//!
//! Provides the get-or-compute cache shared by memoized functions and
//! cached fields, together with cache key derivation.

mod key;
mod keyed;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use key::{CacheKey, FloatKey};
pub use keyed::KeyedCache;
pub use stats::CacheStats;
