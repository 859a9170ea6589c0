//! Property-based tests for CodeGenerator.
//!
//! - A generated code never satisfies the existence check
//! - Codes generated at different seconds never collide

use std::collections::HashSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use super::generator::CodeGenerator;

/// Instants within 2026, at second granularity.
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..31_536_000i64).prop_map(|secs| {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(secs)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* set of taken suffixes, the returned code is free.
    #[test]
    fn prop_generated_code_is_free(
        at in instant(),
        taken_suffixes in prop::collection::hash_set(0u32..50, 0..40),
    ) {
        let generator = CodeGenerator::new(100);
        let taken: HashSet<String> = generator
            .candidates("PR", at)
            .enumerate()
            .filter(|(i, _)| taken_suffixes.contains(&u32::try_from(*i).unwrap()))
            .map(|(_, code)| code)
            .collect();

        let code = generator.generate("PR", at, |c| taken.contains(c)).unwrap();
        prop_assert!(!taken.contains(&code));
    }

    /// *For any* two distinct seconds, no candidates overlap.
    #[test]
    fn prop_distinct_instants_never_collide(
        first in instant(),
        offset in 1i64..86_400i64,
    ) {
        let generator = CodeGenerator::new(20);
        let second = first + Duration::seconds(offset);

        let a: HashSet<String> = generator.candidates("SR", first).collect();
        let b: HashSet<String> = generator.candidates("SR", second).collect();

        prop_assert!(a.is_disjoint(&b));
    }

    /// Sequential generation with recorded codes never repeats.
    #[test]
    fn prop_sequential_generation_unique(at in instant(), calls in 1usize..60) {
        let generator = CodeGenerator::new(100);
        let mut issued = HashSet::new();

        for _ in 0..calls {
            let code = generator.generate("RV", at, |c| issued.contains(c)).unwrap();
            prop_assert!(issued.insert(code));
        }
    }
}
