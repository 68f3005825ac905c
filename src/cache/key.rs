//! Cache Key Module
//!
//! Derives hashable cache keys from call arguments and owning instances.
//!
//! A key is derived on every lookup, so derivation is where an input that
//! cannot act as a key is rejected. Floats are the main case: `NaN` never
//! equals itself and would occupy a slot no later lookup could reach.

use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{MemoError, Result};

// == Cache Key Trait ==
/// A value that can be turned into a cache key.
///
/// Two values whose keys compare equal share one cache slot, whatever
/// their identity. Types whose equality should follow identity must make
/// their key reflect that.
pub trait CacheKey {
    /// The stored key type.
    type Key: Hash + Eq;

    /// Derives the key, failing with [`MemoError::UnhashableKey`] when the
    /// value has no stable equality.
    fn cache_key(&self) -> Result<Self::Key>;
}

// == Value Keys ==
/// Implements [`CacheKey`] for `Hash + Eq + Clone` types, keyed by value.
///
/// Instances that compare equal share one slot in every cache they are
/// used with.
///
/// ```
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Point(i32, i32);
///
/// better_memoize::cache_key_by_value!(Point);
/// ```
#[macro_export]
macro_rules! cache_key_by_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::cache::CacheKey for $ty {
                type Key = $ty;

                fn cache_key(&self) -> $crate::error::Result<Self::Key> {
                    ::std::result::Result::Ok(::std::clone::Clone::clone(self))
                }
            }
        )+
    };
}

cache_key_by_value!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    String,
);

impl CacheKey for str {
    type Key = String;

    fn cache_key(&self) -> Result<String> {
        Ok(self.to_owned())
    }
}

// == Float Keys ==
/// Key form of a floating point argument.
///
/// Holds the bit pattern of the value widened to `f64`, with `-0.0`
/// folded into `0.0` since the two compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatKey(u64);

impl FloatKey {
    /// Creates a key for `value`, rejecting `NaN`.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(MemoError::unhashable::<f64>("NaN is not equal to itself"));
        }
        let value = if value == 0.0 { 0.0 } else { value };
        Ok(Self(value.to_bits()))
    }

    /// Returns the float this key was built from.
    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl CacheKey for f64 {
    type Key = FloatKey;

    fn cache_key(&self) -> Result<FloatKey> {
        FloatKey::new(*self)
    }
}

impl CacheKey for f32 {
    type Key = FloatKey;

    fn cache_key(&self) -> Result<FloatKey> {
        if self.is_nan() {
            return Err(MemoError::unhashable::<f32>("NaN is not equal to itself"));
        }
        FloatKey::new(f64::from(*self))
    }
}

// == Wrappers ==
impl<T: CacheKey + ?Sized> CacheKey for &T {
    type Key = T::Key;

    fn cache_key(&self) -> Result<T::Key> {
        (**self).cache_key()
    }
}

impl<T: CacheKey + ?Sized> CacheKey for Box<T> {
    type Key = T::Key;

    fn cache_key(&self) -> Result<T::Key> {
        (**self).cache_key()
    }
}

impl<T: CacheKey + ?Sized> CacheKey for Rc<T> {
    type Key = T::Key;

    fn cache_key(&self) -> Result<T::Key> {
        (**self).cache_key()
    }
}

impl<T: CacheKey + ?Sized> CacheKey for Arc<T> {
    type Key = T::Key;

    fn cache_key(&self) -> Result<T::Key> {
        (**self).cache_key()
    }
}

impl<T: CacheKey> CacheKey for Option<T> {
    type Key = Option<T::Key>;

    fn cache_key(&self) -> Result<Self::Key> {
        self.as_ref().map(CacheKey::cache_key).transpose()
    }
}

// == Sequences ==
impl<T: CacheKey> CacheKey for [T] {
    type Key = Vec<T::Key>;

    fn cache_key(&self) -> Result<Self::Key> {
        self.iter().map(CacheKey::cache_key).collect()
    }
}

impl<T: CacheKey> CacheKey for Vec<T> {
    type Key = Vec<T::Key>;

    fn cache_key(&self) -> Result<Self::Key> {
        self.as_slice().cache_key()
    }
}

impl<T: CacheKey, const N: usize> CacheKey for [T; N] {
    type Key = Vec<T::Key>;

    fn cache_key(&self) -> Result<Self::Key> {
        self.as_slice().cache_key()
    }
}

// == Tuples ==
macro_rules! impl_cache_key_tuple {
    ($($name:ident),+) => {
        impl<$($name: CacheKey),+> CacheKey for ($($name,)+) {
            type Key = ($($name::Key,)+);

            #[allow(non_snake_case)]
            fn cache_key(&self) -> Result<Self::Key> {
                let ($($name,)+) = self;
                Ok(($($name.cache_key()?,)+))
            }
        }
    };
}

impl_cache_key_tuple!(A);
impl_cache_key_tuple!(A, B);
impl_cache_key_tuple!(A, B, C);
impl_cache_key_tuple!(A, B, C, D);
impl_cache_key_tuple!(A, B, C, D, E);
impl_cache_key_tuple!(A, B, C, D, E, F);
impl_cache_key_tuple!(A, B, C, D, E, F, G);
impl_cache_key_tuple!(A, B, C, D, E, F, G, H);
impl_cache_key_tuple!(A, B, C, D, E, F, G, H, I);
impl_cache_key_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_cache_key_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_cache_key_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);
