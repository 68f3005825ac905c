//! Memoized Function Module
//!
//! Wraps a fixed-arity function with a cache keyed by its argument tuple.

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::cache::{CacheStats, KeyedCache};
use crate::config::Config;
use crate::error::{MemoError, Result};
use crate::memoize::{ArgList, Signature};

// == Memoized ==
/// A function paired with the cache of its results.
///
/// Built once from the function's [`Signature`]; every call derives the key
/// from the argument tuple `A` and runs the function only when that key has
/// no stored result. The wrapper reports the same name, doc and signature
/// as the function it wraps.
pub struct Memoized<A, R, F>
where
    A: ArgList,
{
    signature: Signature,
    doc: Option<String>,
    func: F,
    cache: KeyedCache<A::Key, R>,
    _args: PhantomData<fn(A)>,
}

impl<A, R, F> Memoized<A, R, F>
where
    A: ArgList,
    R: Clone,
{
    fn build(signature: Signature, func: F, config: &Config) -> Result<Self> {
        signature.validate()?;
        signature.check_specializable()?;

        let declared = signature.positional_count();
        if declared != A::ARITY {
            return Err(MemoError::ArityMismatch {
                function: signature.name.clone(),
                declared,
                arity: A::ARITY,
            });
        }

        debug!("Memoizing function {}{}", signature.name, signature);

        Ok(Self {
            signature,
            doc: None,
            func,
            cache: KeyedCache::with_config(config),
            _args: PhantomData,
        })
    }

    // == Metadata ==
    /// Attaches the wrapped function's documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attaches documentation given as `#[doc]` lines.
    ///
    /// Each line loses the single leading space a `///` comment adds.
    pub fn with_doc_lines(mut self, lines: &[&str]) -> Self {
        if !lines.is_empty() {
            let doc = lines
                .iter()
                .map(|line| line.strip_prefix(' ').unwrap_or(line))
                .collect::<Vec<_>>()
                .join("\n");
            self.doc = Some(doc);
        }
        self
    }

    /// Returns the wrapped function's name.
    pub fn name(&self) -> &str {
        &self.signature.name
    }

    /// Returns the wrapped function's documentation, if any.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// The declared parameter list of the wrapped function.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    // == Cache Views ==
    /// Returns lookup statistics for this function's cache.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Returns the number of argument tuples with a stored result.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if no result has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Checks whether `args` already has a stored result.
    pub fn is_cached(&self, args: &A) -> Result<bool> {
        Ok(self.cache.contains_key(&args.cache_key()?))
    }
}

impl<A, R, F> Memoized<A, R, F>
where
    A: ArgList,
    R: Clone,
    F: Fn(A) -> R,
{
    // == Constructor ==
    /// Wraps `func`, whose declared parameters are `signature`.
    ///
    /// Fails when the signature is malformed, declares variadic parameters,
    /// or does not have exactly one positional parameter per tuple element.
    pub fn new(signature: Signature, func: F) -> Result<Self> {
        Self::build(signature, func, &Config::default())
    }

    /// Same as [`new`](Self::new), building the cache from `config`.
    pub fn with_config(signature: Signature, func: F, config: &Config) -> Result<Self> {
        Self::build(signature, func, config)
    }

    // == Call ==
    /// Returns the result for `args`, running the function on first use.
    ///
    /// Fails with [`MemoError::UnhashableKey`] when no key can be derived
    /// from `args`; the function is not run in that case.
    pub fn call(&self, args: A) -> Result<R> {
        let key = args.cache_key()?;
        Ok(self.cache.get_or_compute(key, || (self.func)(args)))
    }
}

impl<A, T, E, F> Memoized<A, T, F>
where
    A: ArgList,
    T: Clone,
    E: From<MemoError>,
    F: Fn(A) -> std::result::Result<T, E>,
{
    // == Fallible Constructor ==
    /// Wraps a function returning `Result`, storing only its `Ok` values.
    ///
    /// Build-time checks are the same as for [`new`](Self::new).
    pub fn fallible(signature: Signature, func: F) -> Result<Self> {
        Self::build(signature, func, &Config::default())
    }

    /// Same as [`fallible`](Self::fallible), building the cache from `config`.
    pub fn fallible_with_config(signature: Signature, func: F, config: &Config) -> Result<Self> {
        Self::build(signature, func, config)
    }

    // == Try Call ==
    /// Returns the result for `args` from a fallible function.
    ///
    /// Only successful results are stored. A function error is returned
    /// unchanged, and the next call with the same arguments runs the
    /// function again.
    pub fn try_call(&self, args: A) -> std::result::Result<T, E> {
        let key = args.cache_key()?;
        self.cache.get_or_try_compute(key, || (self.func)(args))
    }
}

impl<A, R, F> fmt::Debug for Memoized<A, R, F>
where
    A: ArgList,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("name", &self.signature.name)
            .field("signature", &self.signature.to_string())
            .field("cache", &self.cache)
            .finish()
    }
}
