//! Lifecycle service for document status transitions.

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::types::{DocumentStatus, EffectAction, Transition};

/// Stateless service deciding which transitions are legal.
///
/// All methods are associated functions returning the accepted
/// `Transition` with the effect to run.
pub struct LifecycleService;

impl LifecycleService {
    /// Creates a document in the requested status.
    ///
    /// # Returns
    /// * `Ok(Transition)` for draft (no effects) or confirmed (apply)
    /// * `Err(LifecycleError::InvalidTransition)` for cancelled
    pub fn create(target: DocumentStatus) -> Result<Transition, LifecycleError> {
        let effects = match target {
            DocumentStatus::Draft => EffectAction::None,
            DocumentStatus::Confirmed => EffectAction::Apply,
            DocumentStatus::Cancelled => {
                return Err(LifecycleError::InvalidTransition {
                    from: None,
                    to: target,
                });
            }
        };

        Ok(Transition {
            from: None,
            to: Some(target),
            effects,
        })
    }

    /// Updates an existing document towards `target`.
    ///
    /// # Returns
    /// * `Err(LifecycleError::DocumentLocked)` if the document is cancelled
    /// * `Err(LifecycleError::InvalidTransition)` for confirmed → anything but
    ///   cancelled, and for draft → cancelled
    pub fn update(
        current: DocumentStatus,
        target: DocumentStatus,
    ) -> Result<Transition, LifecycleError> {
        let effects = match (current, target) {
            (DocumentStatus::Cancelled, _) => return Err(LifecycleError::DocumentLocked),
            (DocumentStatus::Draft, DocumentStatus::Draft) => EffectAction::None,
            (DocumentStatus::Draft, DocumentStatus::Confirmed) => EffectAction::Apply,
            (DocumentStatus::Confirmed, DocumentStatus::Cancelled) => EffectAction::Reverse,
            (DocumentStatus::Draft | DocumentStatus::Confirmed, _) => {
                return Err(LifecycleError::InvalidTransition {
                    from: Some(current),
                    to: target,
                });
            }
        };

        Ok(Transition {
            from: Some(current),
            to: Some(target),
            effects,
        })
    }

    /// Confirms a draft.
    pub fn confirm(current: DocumentStatus) -> Result<Transition, LifecycleError> {
        Self::update(current, DocumentStatus::Confirmed)
    }

    /// Cancels a confirmed document.
    pub fn cancel(current: DocumentStatus) -> Result<Transition, LifecycleError> {
        Self::update(current, DocumentStatus::Cancelled)
    }

    /// Deletes a document. Allowed in every status; effects are reversed
    /// only when the document was confirmed.
    #[must_use]
    pub fn delete(current: DocumentStatus) -> Transition {
        let effects = if current == DocumentStatus::Confirmed {
            EffectAction::Reverse
        } else {
            EffectAction::None
        };

        Transition {
            from: Some(current),
            to: None,
            effects,
        }
    }

    /// Returns true if moving from `from` (`None` for a new document) to `to` is allowed.
    #[must_use]
    pub fn is_valid_transition(from: Option<DocumentStatus>, to: DocumentStatus) -> bool {
        match from {
            None => Self::create(to).is_ok(),
            Some(current) => Self::update(current, to).is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::lifecycle::types::DocumentStatus::{Cancelled, Confirmed, Draft};

    #[rstest]
    #[case(Draft, EffectAction::None)]
    #[case(Confirmed, EffectAction::Apply)]
    fn test_create(#[case] target: DocumentStatus, #[case] effects: EffectAction) {
        let transition = LifecycleService::create(target).unwrap();
        assert_eq!(transition.from, None);
        assert_eq!(transition.to, Some(target));
        assert_eq!(transition.effects, effects);
    }

    #[test]
    fn test_create_cancelled_rejected() {
        assert_eq!(
            LifecycleService::create(Cancelled),
            Err(LifecycleError::InvalidTransition {
                from: None,
                to: Cancelled
            })
        );
    }

    #[rstest]
    #[case(Draft, Draft, EffectAction::None)]
    #[case(Draft, Confirmed, EffectAction::Apply)]
    #[case(Confirmed, Cancelled, EffectAction::Reverse)]
    fn test_allowed_updates(
        #[case] current: DocumentStatus,
        #[case] target: DocumentStatus,
        #[case] effects: EffectAction,
    ) {
        let transition = LifecycleService::update(current, target).unwrap();
        assert_eq!(transition.effects, effects);
    }

    #[rstest]
    #[case(Draft, Cancelled)]
    #[case(Confirmed, Draft)]
    #[case(Confirmed, Confirmed)]
    fn test_invalid_updates(#[case] current: DocumentStatus, #[case] target: DocumentStatus) {
        assert_eq!(
            LifecycleService::update(current, target),
            Err(LifecycleError::InvalidTransition {
                from: Some(current),
                to: target
            })
        );
    }

    #[rstest]
    #[case(Draft)]
    #[case(Confirmed)]
    #[case(Cancelled)]
    fn test_cancelled_is_locked(#[case] target: DocumentStatus) {
        assert_eq!(
            LifecycleService::update(Cancelled, target),
            Err(LifecycleError::DocumentLocked)
        );
    }

    #[test]
    fn test_confirm_and_cancel_shortcuts() {
        assert_eq!(
            LifecycleService::confirm(Draft).unwrap().effects,
            EffectAction::Apply
        );
        assert!(LifecycleService::confirm(Confirmed).is_err());
        assert_eq!(
            LifecycleService::cancel(Confirmed).unwrap().effects,
            EffectAction::Reverse
        );
        assert!(LifecycleService::cancel(Draft).is_err());
    }

    #[rstest]
    #[case(Draft, EffectAction::None)]
    #[case(Confirmed, EffectAction::Reverse)]
    #[case(Cancelled, EffectAction::None)]
    fn test_delete(#[case] current: DocumentStatus, #[case] effects: EffectAction) {
        let transition = LifecycleService::delete(current);
        assert!(transition.is_removal());
        assert_eq!(transition.effects, effects);
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(LifecycleService::is_valid_transition(None, Draft));
        assert!(LifecycleService::is_valid_transition(None, Confirmed));
        assert!(!LifecycleService::is_valid_transition(None, Cancelled));
        assert!(LifecycleService::is_valid_transition(Some(Confirmed), Cancelled));
        assert!(!LifecycleService::is_valid_transition(Some(Cancelled), Draft));
    }
}
