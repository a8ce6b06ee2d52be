//! Passive need decay applied by the tick cycle.
//!
//! When decay fires, every configured need moves by its signed amount:
//!
//! - Energy and cleanliness drain
//! - Hunger, thirst and sleepiness build up
//! - Health never decays passively
//!
//! Each step goes through the shared clamp, so needs stay in `[0, 100]`.

use dreamstory_types::GameState;
use rand::Rng;

use crate::config::{DecayConfig, TickConfig};
use crate::tick::roll;

/// Apply one decay step unconditionally.
pub fn apply_decay(state: &mut GameState, decay: &DecayConfig) {
    state.needs.apply(&decay.deltas());
}

/// Roll `decay_chance` and apply one decay step on success.
///
/// Returns whether decay was applied.
pub fn maybe_decay<R: Rng>(state: &mut GameState, config: &TickConfig, rng: &mut R) -> bool {
    let fired = roll(rng, config.decay_chance);
    if fired {
        apply_decay(state, &config.decay);
    }
    fired
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn decay_step_moves_each_need() {
        let mut state = GameState::default();
        apply_decay(&mut state, &DecayConfig::default());
        assert_eq!(state.needs.energy, 79.0);
        assert_eq!(state.needs.hunger, 61.0);
        assert_eq!(state.needs.thirst, 71.0);
        assert_eq!(state.needs.cleanliness, 79.5);
        assert_eq!(state.needs.sleepiness, 31.0);
        assert_eq!(state.needs.health, 85.0);
        assert_eq!(state.needs.happiness, 70.0);
    }

    #[test]
    fn decay_is_clamped() {
        let mut state = GameState::default();
        state.needs.energy = 0.5;
        state.needs.hunger = 100.0;
        apply_decay(&mut state, &DecayConfig::default());
        assert_eq!(state.needs.energy, 0.0);
        assert_eq!(state.needs.hunger, 100.0);
    }

    #[test]
    fn certain_and_impossible_chances() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = GameState::default();

        let never = TickConfig {
            decay_chance: 0.0,
            ..TickConfig::default()
        };
        assert!(!maybe_decay(&mut state, &never, &mut rng));
        assert_eq!(state, GameState::default());

        let always = TickConfig {
            decay_chance: 1.0,
            ..TickConfig::default()
        };
        assert!(maybe_decay(&mut state, &always, &mut rng));
        assert_eq!(state.needs.energy, 79.0);
    }
}
