//! Integration Tests for environment configuration
//!
//! Environment variables are process-wide, so this binary holds a single
//! test that sets them before any cache is built.

use std::env;

use better_memoize::{cache_key_by_value, cached_field, memoize, memoized, Config};

memoize! {
    fn cube(n: i64) -> i64 {
        n * n * n
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct Tag(String);

cache_key_by_value!(Tag);

cached_field! {
    impl Tag {
        fn shout(&self) -> String {
            self.0.to_uppercase()
        }
    }
}

#[test]
fn test_macro_caches_follow_environment() {
    env::set_var("MEMO_INITIAL_CAPACITY", "32");
    env::set_var("MEMO_RECORD_STATS", "off");

    let config = Config::from_env();
    assert_eq!(config.initial_capacity, 32);
    assert!(!config.record_stats);

    let calls = std::cell::Cell::new(0);
    let square = memoized!(
        fn square(n: i64) -> i64 {
            calls.set(calls.get() + 1);
            n * n
        }
    )
    .unwrap();

    assert_eq!(square.call((4,)).unwrap(), 16);
    assert_eq!(square.call((4,)).unwrap(), 16);
    assert_eq!(calls.get(), 1);
    let stats = square.stats();
    assert_eq!((stats.hits, stats.misses, stats.failures), (0, 0, 0));
    assert_eq!(stats.total_entries, 1);

    assert_eq!(cube(3).unwrap(), 27);
    assert_eq!(Tag("hey".into()).shout().unwrap(), "HEY");

    env::remove_var("MEMO_INITIAL_CAPACITY");
    env::remove_var("MEMO_RECORD_STATS");
}
