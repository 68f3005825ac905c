//! Error types for the memoization primitives
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::memoize::ParamKind;

// == Memo Error Enum ==
/// Unified error type for memoized functions and cached fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoError {
    /// The function declares a parameter the specialized path cannot key on
    #[error("function `{function}` declares {kind} parameter `{parameter}`, which cannot be memoized")]
    SignatureUnsupported {
        function: String,
        parameter: String,
        kind: ParamKind,
    },

    /// The declared parameter list does not match the argument tuple
    #[error("function `{function}` declares {declared} positional parameters but is called with {arity} arguments")]
    ArityMismatch {
        function: String,
        declared: usize,
        arity: usize,
    },

    /// Malformed parameter list
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// A cache key could not be derived from the arguments or owner
    #[error("Unhashable key of type `{type_name}`: {reason}")]
    UnhashableKey {
        type_name: &'static str,
        reason: String,
    },
}

impl MemoError {
    // == Unhashable Helper ==
    /// Builds an `UnhashableKey` error for the type `T`.
    pub fn unhashable<T: ?Sized>(reason: impl Into<String>) -> Self {
        MemoError::UnhashableKey {
            type_name: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }

    /// Returns true when the error was raised while building a wrapper.
    pub fn is_build_time(&self) -> bool {
        !matches!(self, MemoError::UnhashableKey { .. })
    }
}

// == Result Type Alias ==
/// Convenience Result type for the memoization primitives.
pub type Result<T> = std::result::Result<T, MemoError>;
