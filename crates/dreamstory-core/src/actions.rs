//! Player-triggered interactions with catalog objects.
//!
//! An interaction is accepted only when the object is usable. Rejections
//! are not errors: nothing is mutated and the outcome says why. On success
//! the object's effects are applied, the clock advances by its time cost,
//! the action is logged and the use is stamped in the cooldown ledger.
//!
//! Neither the current room nor the play/pause state is checked here.

use dreamstory_types::{GameState, ObjectId};
use tracing::{debug, info};

use crate::catalog::{Catalog, InteractableObject, Usability};
use crate::clock;
use crate::cooldown::{CooldownLedger, UsageStamp};

/// What happened when the player tried to use an object.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// Effects, time cost, history and cooldown were all applied.
    Applied {
        /// The object used.
        object: ObjectId,
        /// The label prepended to the action history.
        label: String,
        /// Day boundaries crossed by the time cost.
        days_rolled: u32,
    },
    /// The availability predicate rejected the use.
    Unavailable {
        /// The object requested.
        object: ObjectId,
    },
    /// The object was used too recently.
    CoolingDown {
        /// The object requested.
        object: ObjectId,
        /// In-game hours until it can be used again.
        remaining_hours: f64,
    },
}

impl InteractionOutcome {
    /// Whether the interaction changed the state.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Apply `object` to `state` if it is usable.
///
/// # Order of operations
///
/// 1. Check usability (availability, then cooldown)
/// 2. Apply need effects, clamped
/// 3. Advance the clock by `time_cost`
/// 4. Prepend `"<name> (<kind>)"` to the action history
/// 5. Stamp the ledger at the post-advance clock
pub fn apply_interaction(
    state: &mut GameState,
    ledger: &mut CooldownLedger,
    object: &InteractableObject,
) -> InteractionOutcome {
    match Catalog::usability(object, state, ledger) {
        Usability::Usable => {}
        Usability::Unavailable => {
            debug!(object = %object.id, "Interaction rejected: unavailable");
            return InteractionOutcome::Unavailable {
                object: object.id.clone(),
            };
        }
        Usability::CoolingDown { remaining_hours } => {
            debug!(object = %object.id, remaining_hours, "Interaction rejected: cooling down");
            return InteractionOutcome::CoolingDown {
                object: object.id.clone(),
                remaining_hours,
            };
        }
    }

    state.needs.apply(&object.effects);
    let days_rolled = clock::advance(state, object.time_cost);

    let label = object.history_label();
    state.history.record_action(label.clone());
    ledger.record(object.id.clone(), UsageStamp::at(state));

    info!(
        object = %object.id,
        day = state.day,
        time = state.time,
        "Interaction applied"
    );

    InteractionOutcome::Applied {
        object: object.id.clone(),
        label,
        days_rolled,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn use_object(
        catalog: &Catalog,
        state: &mut GameState,
        ledger: &mut CooldownLedger,
        id: &str,
    ) -> InteractionOutcome {
        let object = catalog.get(&ObjectId::from(id)).unwrap();
        apply_interaction(state, ledger, object)
    }

    #[test]
    fn sleeping_at_night_rolls_the_day() {
        let catalog = Catalog::standard();
        let mut ledger = CooldownLedger::new();
        let mut state = GameState {
            time: 22.0,
            ..GameState::default()
        };

        let outcome = use_object(&catalog, &mut state, &mut ledger, "bed");
        assert_eq!(
            outcome,
            InteractionOutcome::Applied {
                object: ObjectId::from("bed"),
                label: "Cama (sleep)".to_owned(),
                days_rolled: 1,
            }
        );
        assert_eq!(state.needs.energy, 100.0);
        assert_eq!(state.needs.sleepiness, 0.0);
        assert_eq!(state.needs.health, 95.0);
        assert_eq!(state.time, 6.0);
        assert_eq!(state.day, 2);
        assert_eq!(ledger.last_used(&ObjectId::from("bed")), Some(UsageStamp { day: 2, time: 6.0 }));
    }

    #[test]
    fn unavailable_leaves_everything_untouched() {
        let catalog = Catalog::standard();
        let mut ledger = CooldownLedger::new();
        let mut state = GameState::default();
        let before = state.clone();

        let outcome = use_object(&catalog, &mut state, &mut ledger, "shower");
        assert!(matches!(outcome, InteractionOutcome::Unavailable { .. }));
        assert!(!outcome.is_applied());
        assert_eq!(state, before);
        assert!(ledger.is_empty());
    }

    #[test]
    fn second_use_inside_cooldown_is_rejected() {
        let catalog = Catalog::standard();
        let mut ledger = CooldownLedger::new();
        let mut state = GameState::default();

        assert!(use_object(&catalog, &mut state, &mut ledger, "bookshelf").is_applied());
        let after_first = state.clone();

        // Stamped at 10:00, the clock the use itself produced.
        let again = use_object(&catalog, &mut state, &mut ledger, "bookshelf");
        assert_eq!(
            again,
            InteractionOutcome::CoolingDown {
                object: ObjectId::from("bookshelf"),
                remaining_hours: 1.0,
            }
        );
        assert_eq!(state, after_first);
    }

    #[test]
    fn applies_effects_with_clamping() {
        let catalog = Catalog::standard();
        let mut ledger = CooldownLedger::new();
        let mut state = GameState::default();

        use_object(&catalog, &mut state, &mut ledger, "stove");
        assert_eq!(state.needs.hunger, 0.0);
        assert_eq!(state.needs.happiness, 95.0);
        assert_eq!(state.needs.energy, 95.0);
        assert_eq!(state.time, 10.0);
        assert_eq!(state.history.last_actions, vec!["Fogão (eat)"]);
    }
}
