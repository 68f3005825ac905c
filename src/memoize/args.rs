//! Argument Tuple Module
//!
//! Fixed-arity argument tuples used as the key of a memoized call.

use crate::cache::CacheKey;

// == Arg List ==
/// A fixed-size tuple of positional arguments.
///
/// The key of a memoized call is the tuple itself, mapped element by
/// element through [`CacheKey`]. Implemented for tuples of up to twelve
/// elements.
pub trait ArgList: CacheKey {
    /// Number of positional arguments in the tuple.
    const ARITY: usize;
}

impl ArgList for () {
    const ARITY: usize = 0;
}

macro_rules! impl_arg_list {
    ($arity:expr; $($name:ident),+) => {
        impl<$($name: CacheKey),+> ArgList for ($($name,)+) {
            const ARITY: usize = $arity;
        }
    };
}

impl_arg_list!(1; A);
impl_arg_list!(2; A, B);
impl_arg_list!(3; A, B, C);
impl_arg_list!(4; A, B, C, D);
impl_arg_list!(5; A, B, C, D, E);
impl_arg_list!(6; A, B, C, D, E, F);
impl_arg_list!(7; A, B, C, D, E, F, G);
impl_arg_list!(8; A, B, C, D, E, F, G, H);
impl_arg_list!(9; A, B, C, D, E, F, G, H, I);
impl_arg_list!(10; A, B, C, D, E, F, G, H, I, J);
impl_arg_list!(11; A, B, C, D, E, F, G, H, I, J, K);
impl_arg_list!(12; A, B, C, D, E, F, G, H, I, J, K, L);

#[cfg(test)]
mod tests {
    use super::*;

    fn arity<A: ArgList>(_: &A) -> usize {
        A::ARITY
    }

    #[test]
    fn test_arity_counts_elements() {
        assert_eq!(arity(&()), 0);
        assert_eq!(arity(&(1,)), 1);
        assert_eq!(arity(&(1.0, "two", 'c')), 3);
        assert_eq!(arity(&(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12)), 12);
    }
}
