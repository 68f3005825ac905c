//! Cached Field Macro

/// Declares read-only cached accessors on a type.
///
/// Each `fn name(&self) -> V { .. }` becomes an inherent method returning
/// `better_memoize::Result<V>`. The method owns one thread-local
/// [`CachedField`](crate::field::CachedField) shared by every instance of
/// the owner and configured from [`Config::from_env`](crate::Config::from_env)
/// on first read, so the owner type needs no storage of its own and may be a
/// plain immutable value. The owner must implement
/// [`CacheKey`](crate::cache::CacheKey).
///
/// ```
/// use better_memoize::{cache_key_by_value, cached_field};
///
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Person {
///     first_name: String,
///     last_name: String,
/// }
///
/// cache_key_by_value!(Person);
///
/// cached_field! {
///     impl Person {
///         /// First and last name joined by an underscore.
///         pub fn full_name(&self) -> String {
///             format!("{}_{}", self.first_name, self.last_name)
///         }
///     }
/// }
///
/// let steve = Person { first_name: "Steve".into(), last_name: "Zelaznik".into() };
/// assert_eq!(steve.full_name().unwrap(), "Steve_Zelaznik");
/// ```
#[macro_export]
macro_rules! cached_field {
    (
        impl $owner:ty {
            $(
                $(#[$meta:meta])*
                $vis:vis fn $name:ident (&$this:ident) -> $ret:ty $body:block
            )*
        }
    ) => {
        $(
            const _: () = {
                trait __Accessor {
                    fn __compute(&$this) -> $ret;
                }

                impl __Accessor for $owner {
                    fn __compute(&$this) -> $ret $body
                }

                impl $owner {
                    $(#[$meta])*
                    $vis fn $name(&$this) -> $crate::error::Result<$ret> {
                        ::std::thread_local! {
                            static __FIELD: $crate::field::CachedField<$owner, $ret> =
                                $crate::field::CachedField::with_config(
                                    ::std::stringify!($name),
                                    <$owner as __Accessor>::__compute,
                                    &$crate::config::Config::from_env(),
                                );
                        }

                        __FIELD.with(|field| field.get($this))
                    }
                }
            };
        )*
    };
}
