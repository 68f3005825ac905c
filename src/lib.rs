//! Better Memoize - signature-preserving memoization
//!
//! Provides function memoization keyed by the argument tuple, and cached
//! fields whose single cache is shared by every owning instance.

pub mod cache;
pub mod config;
pub mod error;
pub mod field;
pub mod memoize;

pub use cache::{CacheKey, CacheStats, KeyedCache};
pub use config::Config;
pub use error::{MemoError, Result};
pub use field::CachedField;
pub use memoize::{Memoized, Signature};
