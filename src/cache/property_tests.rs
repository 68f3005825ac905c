//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the get-or-compute guarantees against arbitrary
//! lookup sequences.

use proptest::prelude::*;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use crate::cache::{CacheKey, KeyedCache};
use crate::error::MemoError;
use crate::memoize::{Memoized, Signature};

// == Strategies ==
/// Small key domain so sequences revisit keys often
fn key_strategy() -> impl Strategy<Value = u8> {
    0u8..16
}

/// Argument triples drawn from a small grid of finite floats
fn triple_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
    let coord = prop::sample::select(vec![-2.0, -0.0, 0.0, 1.0, 2.5, 3.0, 4.0, 12.0]);
    (coord.clone(), coord.clone(), coord)
}

/// Parameter-list shapes: required count, defaulted count, `*args`, `**kwargs`
fn shape_strategy() -> impl Strategy<Value = (usize, usize, bool, bool)> {
    (0usize..4, 0usize..4, any::<bool>(), any::<bool>())
}

fn shaped_signature(required: usize, defaulted: usize, varargs: bool, keywords: bool) -> Signature {
    let names = ["x", "y", "z", "a", "b", "c", "d", "e"];
    let mut signature = Signature::new("shaped");
    for name in &names[..required] {
        signature = signature.param(*name);
    }
    for (i, name) in names[required..required + defaulted].iter().enumerate() {
        signature = signature.param_with_default(*name, &i.to_string());
    }
    if varargs {
        signature = signature.variadic("varargs");
    }
    if keywords {
        signature = signature.keyword_variadic("keywords");
    }
    signature
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The producer runs exactly once per distinct key and every lookup
    // returns the first computed value for its key.
    #[test]
    fn prop_compute_once_per_key(keys in prop::collection::vec(key_strategy(), 1..64)) {
        let cache = KeyedCache::new();
        let calls = Cell::new(0usize);
        let mut first_seen: HashMap<u8, usize> = HashMap::new();

        for key in &keys {
            let value = cache.get_or_compute(*key, || {
                calls.set(calls.get() + 1);
                calls.get()
            });
            let expected = *first_seen.entry(*key).or_insert(value);
            prop_assert_eq!(value, expected, "Value changed after first computation");
        }

        let distinct: HashSet<_> = keys.iter().collect();
        prop_assert_eq!(calls.get(), distinct.len());
        prop_assert_eq!(cache.len(), distinct.len());
    }

    // Statistics account for every lookup.
    #[test]
    fn prop_statistics_accuracy(keys in prop::collection::vec(key_strategy(), 1..64)) {
        let cache = KeyedCache::new();
        for key in &keys {
            cache.get_or_compute(*key, || u32::from(*key) * 3);
        }

        let distinct: HashSet<_> = keys.iter().collect();
        let stats = cache.stats();
        prop_assert_eq!(stats.misses as usize, distinct.len());
        prop_assert_eq!((stats.hits + stats.misses) as usize, keys.len());
        prop_assert_eq!(stats.total_entries, distinct.len());
    }

    // Failed computations leave no entry behind.
    #[test]
    fn prop_failures_are_not_cached(keys in prop::collection::vec(key_strategy(), 1..64)) {
        let cache: KeyedCache<u8, u8> = KeyedCache::new();
        for key in &keys {
            let result: Result<u8, ()> = cache.get_or_try_compute(*key, || {
                if key % 2 == 0 { Ok(*key) } else { Err(()) }
            });
            prop_assert_eq!(result.is_ok(), key % 2 == 0);
        }

        let odd_lookups = keys.iter().filter(|k| *k % 2 == 1).count() as u64;
        prop_assert_eq!(cache.stats().failures, odd_lookups);
        prop_assert!(keys.iter().filter(|k| *k % 2 == 1).all(|k| !cache.contains_key(k)));
    }

    // A memoized function agrees with the plain function and runs its body
    // once per distinct argument tuple.
    #[test]
    fn prop_memoized_matches_plain(calls_in in prop::collection::vec(triple_strategy(), 1..40)) {
        fn plain((x, y, z): (f64, f64, f64)) -> f64 {
            (x * x + y * y + z * z).sqrt()
        }

        let runs = Cell::new(0usize);
        let memoized = Memoized::new(
            Signature::new("distance").param("x").param("y").param("z"),
            |args: (f64, f64, f64)| {
                runs.set(runs.get() + 1);
                plain(args)
            },
        ).unwrap();

        for args in &calls_in {
            prop_assert_eq!(memoized.call(*args).unwrap(), plain(*args));
        }

        let distinct: HashSet<_> = calls_in.iter().map(|a| a.cache_key().unwrap()).collect();
        prop_assert_eq!(runs.get(), distinct.len());
    }

    // Every parameter shape validates; only shapes without variadic markers
    // can be memoized, and the rendered list keeps names, order and defaults.
    #[test]
    fn prop_signature_shapes((required, defaulted, varargs, keywords) in shape_strategy()) {
        let signature = shaped_signature(required, defaulted, varargs, keywords);
        prop_assert!(signature.validate().is_ok());
        prop_assert_eq!(signature.positional_count(), required + defaulted);
        prop_assert_eq!(signature.required_count(), required);

        let rendered = signature.to_string();
        prop_assert_eq!(rendered.contains("*varargs"), varargs);
        prop_assert_eq!(rendered.contains("**keywords"), keywords);
        prop_assert_eq!(Signature::from_json(&signature.to_json().unwrap()).unwrap(), signature.clone());

        match signature.check_specializable() {
            Ok(()) => prop_assert!(!varargs && !keywords),
            Err(MemoError::SignatureUnsupported { parameter, .. }) => {
                let expected = if varargs { "varargs" } else { "keywords" };
                prop_assert_eq!(parameter, expected);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
