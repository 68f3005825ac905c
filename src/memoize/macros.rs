//! Memoize Macros
//!
//! Declaration-site forms of [`Memoized`](crate::memoize::Memoized).

/// Memoizes a function item, keeping its parameter list and docs.
///
/// The emitted function declares the same parameters, in the same order and
/// with the same types, and carries the same attributes. Its cache is a
/// thread-local [`Memoized`](crate::memoize::Memoized) owned by the
/// function and configured from [`Config::from_env`](crate::Config::from_env)
/// on first call. Default values written as `name: T = value` are recorded
/// in the signature; callers still pass every argument. Parameters should be
/// owned types, since the cache outlives any single call.
///
/// A return type whose last path segment is `Result` (`Result<T, E>`,
/// `std::result::Result<T, E>`, `better_memoize::Result<T>`, ...) is kept
/// as written: only `Ok` values are stored, a failed call runs again next
/// time, and the error type needs `From<MemoError>`. Any other return type
/// `R` becomes `better_memoize::Result<R>`, failing only when an argument
/// cannot be used as a key.
///
/// ```
/// use better_memoize::{memoize, MemoError};
///
/// memoize! {
///     /// Length of the vector `(x, y, z)`.
///     pub fn distance(x: f64, y: f64, z: f64) -> f64 {
///         (x * x + y * y + z * z).sqrt()
///     }
/// }
///
/// memoize! {
///     fn fib(n: u64) -> Result<u64, MemoError> {
///         if n < 2 { Ok(n) } else { Ok(fib(n - 1)? + fib(n - 2)?) }
///     }
/// }
///
/// assert_eq!(distance(3.0, 4.0, 12.0).unwrap(), 13.0);
/// assert_eq!(fib(80).unwrap(), 23_416_728_348_467_685);
/// ```
#[macro_export]
macro_rules! memoize {
    // Picks the emitted form from the last segment of a generic return path.
    (@classify [Result] $($item:tt)*) => {
        $crate::memoize! { @fallible $($item)* }
    };
    (@classify [$last:ident] $($item:tt)*) => {
        $crate::memoize! { @plain $($item)* }
    };
    (@classify [$head:ident $($tail:ident)+] $($item:tt)*) => {
        $crate::memoize! { @classify [$($tail)+] $($item)* }
    };

    (
        @fallible [$(#[$meta:meta])*] [$vis:vis] $name:ident
        [$($arg:ident : $ty:ty $(= $default:expr)?),*] [$ret:ty] [$ok:ty] $body:block
    ) => {
        $(#[$meta])*
        $vis fn $name($($arg: $ty),*) -> $ret {
            fn __memoized_body(($($arg,)*): ($($ty,)*)) -> $ret $body

            ::std::thread_local! {
                static __MEMOIZED: $crate::error::Result<
                    $crate::memoize::Memoized<($($ty,)*), $ok, fn(($($ty,)*)) -> $ret>,
                > = $crate::memoize::Memoized::fallible_with_config(
                    $crate::signature!($name($($arg $(= $default)?),*)),
                    __memoized_body as fn(($($ty,)*)) -> $ret,
                    &$crate::config::Config::from_env(),
                );
            }

            __MEMOIZED.with(|memoized| match memoized {
                ::std::result::Result::Ok(memoized) => memoized.try_call(($($arg,)*)),
                ::std::result::Result::Err(err) => ::std::result::Result::Err(
                    ::std::convert::From::from(::std::clone::Clone::clone(err)),
                ),
            })
        }
    };

    (
        @plain [$(#[$meta:meta])*] [$vis:vis] $name:ident
        [$($arg:ident : $ty:ty $(= $default:expr)?),*] [$ret:ty] [$ok:ty] $body:block
    ) => {
        $(#[$meta])*
        $vis fn $name($($arg: $ty),*) -> $crate::error::Result<$ret> {
            fn __memoized_body(($($arg,)*): ($($ty,)*)) -> $ret $body

            ::std::thread_local! {
                static __MEMOIZED: $crate::error::Result<
                    $crate::memoize::Memoized<($($ty,)*), $ret, fn(($($ty,)*)) -> $ret>,
                > = $crate::memoize::Memoized::with_config(
                    $crate::signature!($name($($arg $(= $default)?),*)),
                    __memoized_body as fn(($($ty,)*)) -> $ret,
                    &$crate::config::Config::from_env(),
                );
            }

            __MEMOIZED.with(|memoized| match memoized {
                ::std::result::Result::Ok(memoized) => memoized.call(($($arg,)*)),
                ::std::result::Result::Err(err) => {
                    ::std::result::Result::Err(::std::clone::Clone::clone(err))
                }
            })
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident ( $($arg:ident : $ty:ty $(= $default:expr)?),* $(,)? )
            -> $($seg:ident)::+ < $ok:ty $(, $err:ty)? > $body:block
    ) => {
        $crate::memoize! {
            @classify [$($seg)+]
            [$(#[$meta])*] [$vis] $name [$($arg : $ty $(= $default)?),*]
            [$($seg)::+ < $ok $(, $err)? >] [$ok] $body
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident ( $($arg:ident : $ty:ty $(= $default:expr)?),* $(,)? )
            -> :: $($seg:ident)::+ < $ok:ty $(, $err:ty)? > $body:block
    ) => {
        $crate::memoize! {
            @classify [$($seg)+]
            [$(#[$meta])*] [$vis] $name [$($arg : $ty $(= $default)?),*]
            [:: $($seg)::+ < $ok $(, $err)? >] [$ok] $body
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident ( $($arg:ident : $ty:ty $(= $default:expr)?),* $(,)? )
            -> $ret:ty $body:block
    ) => {
        $crate::memoize! {
            @plain [$(#[$meta])*] [$vis] $name [$($arg : $ty $(= $default)?),*]
            [$ret] [$ret] $body
        }
    };
}

/// Builds a [`Memoized`](crate::memoize::Memoized) value from a function
/// written inline.
///
/// Evaluates to `better_memoize::Result<Memoized<..>>`, with the cache
/// configured from [`Config::from_env`](crate::Config::from_env). The
/// wrapper's `signature()` and `doc()` come from the written declaration,
/// and return types are treated as in [`memoize!`](crate::memoize!): a
/// `Result` return is called with `try_call` and stores only `Ok` values.
/// The body may borrow from the enclosing scope.
///
/// ```
/// let area = better_memoize::memoized!(
///     /// Area of a rectangle.
///     fn area(width: u32, height: u32 = 1) -> u32 {
///         width * height
///     }
/// )
/// .unwrap();
///
/// assert_eq!(area.call((3, 4)).unwrap(), 12);
/// assert_eq!(area.signature().to_string(), "(width, height=1)");
/// assert_eq!(area.doc(), Some("Area of a rectangle."));
/// ```
#[macro_export]
macro_rules! memoized {
    (@classify [Result] $($item:tt)*) => {
        $crate::memoized!(@fallible $($item)*)
    };
    (@classify [$last:ident] $($item:tt)*) => {
        $crate::memoized!(@plain $($item)*)
    };
    (@classify [$head:ident $($tail:ident)+] $($item:tt)*) => {
        $crate::memoized!(@classify [$($tail)+] $($item)*)
    };

    (
        @fallible [$($doc:literal)*] $name:ident
        [$($arg:ident : $ty:ty $(= $default:expr)?),*] [$ret:ty] $body:block
    ) => {
        $crate::memoize::Memoized::fallible_with_config(
            $crate::signature!($name($($arg $(= $default)?),*)),
            |($($arg,)*): ($($ty,)*)| -> $ret { $body },
            &$crate::config::Config::from_env(),
        )
        .map(|memoized| memoized.with_doc_lines(&[$($doc),*]))
    };
    (
        @plain [$($doc:literal)*] $name:ident
        [$($arg:ident : $ty:ty $(= $default:expr)?),*] [$ret:ty] $body:block
    ) => {
        $crate::memoize::Memoized::with_config(
            $crate::signature!($name($($arg $(= $default)?),*)),
            |($($arg,)*): ($($ty,)*)| -> $ret { $body },
            &$crate::config::Config::from_env(),
        )
        .map(|memoized| memoized.with_doc_lines(&[$($doc),*]))
    };

    (
        $(#[doc = $doc:literal])*
        fn $name:ident ( $($arg:ident : $ty:ty $(= $default:expr)?),* $(,)? )
            -> $($seg:ident)::+ < $ok:ty $(, $err:ty)? > $body:block
    ) => {
        $crate::memoized!(
            @classify [$($seg)+]
            [$($doc)*] $name [$($arg : $ty $(= $default)?),*]
            [$($seg)::+ < $ok $(, $err)? >] $body
        )
    };
    (
        $(#[doc = $doc:literal])*
        fn $name:ident ( $($arg:ident : $ty:ty $(= $default:expr)?),* $(,)? )
            -> :: $($seg:ident)::+ < $ok:ty $(, $err:ty)? > $body:block
    ) => {
        $crate::memoized!(
            @classify [$($seg)+]
            [$($doc)*] $name [$($arg : $ty $(= $default)?),*]
            [:: $($seg)::+ < $ok $(, $err)? >] $body
        )
    };
    (
        $(#[doc = $doc:literal])*
        fn $name:ident ( $($arg:ident : $ty:ty $(= $default:expr)?),* $(,)? )
            -> $ret:ty $body:block
    ) => {
        $crate::memoized!(
            @plain [$($doc)*] $name [$($arg : $ty $(= $default)?),*] [$ret] $body
        )
    };
}
