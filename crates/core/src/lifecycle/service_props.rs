//! Property-based tests for LifecycleService.

use proptest::prelude::*;

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::service::LifecycleService;
use crate::lifecycle::types::{DocumentStatus, EffectAction};

fn arb_status() -> impl Strategy<Value = DocumentStatus> {
    prop_oneof![
        Just(DocumentStatus::Draft),
        Just(DocumentStatus::Confirmed),
        Just(DocumentStatus::Cancelled),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Cancelled documents reject every update with DocumentLocked.
    #[test]
    fn prop_cancelled_rejects_every_update(target in arb_status()) {
        prop_assert_eq!(
            LifecycleService::update(DocumentStatus::Cancelled, target),
            Err(LifecycleError::DocumentLocked)
        );
    }

    /// Effects are applied only when entering confirmed and reversed only
    /// when leaving it.
    #[test]
    fn prop_effects_follow_confirmed_boundary(
        current in arb_status(),
        target in arb_status(),
    ) {
        if let Ok(transition) = LifecycleService::update(current, target) {
            let entering = current != DocumentStatus::Confirmed && target == DocumentStatus::Confirmed;
            let leaving = current == DocumentStatus::Confirmed && target != DocumentStatus::Confirmed;
            prop_assert_eq!(transition.effects == EffectAction::Apply, entering);
            prop_assert_eq!(transition.effects == EffectAction::Reverse, leaving);
        }
    }

    /// The predicate agrees with the transition functions.
    #[test]
    fn prop_predicate_matches_update(current in arb_status(), target in arb_status()) {
        prop_assert_eq!(
            LifecycleService::is_valid_transition(Some(current), target),
            LifecycleService::update(current, target).is_ok()
        );
    }

    /// Delete is always allowed and reverses effects only for confirmed.
    #[test]
    fn prop_delete_always_allowed(current in arb_status()) {
        let transition = LifecycleService::delete(current);
        prop_assert!(transition.is_removal());
        prop_assert_eq!(
            transition.effects == EffectAction::Reverse,
            current == DocumentStatus::Confirmed
        );
    }
}
