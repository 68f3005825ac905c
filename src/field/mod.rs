//! Field Module
//!
//! Per-field cached accessors: one cache per accessor definition, keyed by
//! the owning instance.

mod descriptor;
mod macros;

pub use descriptor::CachedField;
