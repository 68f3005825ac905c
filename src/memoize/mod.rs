//! Memoize Module
//!
//! Function memoization that keeps the wrapped function's declared
//! parameter list.
//!
//! [`Memoized`] is built once per function from its [`Signature`] and an
//! argument tuple type; the tuple itself is the cache key, so calls never
//! pack arguments into a generic structure. The [`memoize!`](crate::memoize!)
//! macro emits a function with the declared parameter list backed by such a
//! wrapper, and [`memoized!`](crate::memoized!) builds one as a value.

mod args;
mod function;
mod macros;
mod signature;

pub use args::ArgList;
pub use function::Memoized;
pub use signature::{Param, ParamKind, Signature};
