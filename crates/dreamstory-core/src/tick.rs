//! One tick of the simulation clock.
//!
//! Each tick runs three phases against the session's state:
//!
//! 1. **Clock** -- advance `time` by `hours_per_tick * game_speed`, wrapping
//!    past midnight.
//! 2. **Decay** -- with probability `decay_chance`, apply passive decay.
//! 3. **Situations** -- walk the special situation registry in order,
//!    firing each whose condition holds and whose chance roll succeeds.
//!
//! [`run_tick`] is synchronous and owns no timer; the scheduler decides when
//! it runs. Given the same state, registry, config and RNG stream it is
//! deterministic.

use dreamstory_types::{GameState, SituationId};
use rand::Rng;
use tracing::debug;

use crate::clock;
use crate::config::TickConfig;
use crate::decay;
use crate::situations::SituationRegistry;

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// Day after the tick.
    pub day: u32,
    /// Hour of day after the tick.
    pub time: f64,
    /// Day boundaries crossed by the clock advance.
    pub days_rolled: u32,
    /// Whether passive decay was applied.
    pub decayed: bool,
    /// Special situations that fired, in evaluation order.
    pub fired: Vec<SituationId>,
}

/// Bernoulli trial with success probability `p`.
///
/// `p <= 0` never succeeds and `p >= 1` always does.
pub fn roll<R: Rng>(rng: &mut R, p: f64) -> bool {
    rng.random::<f64>() < p
}

/// Run one tick against `state`.
pub fn run_tick<R: Rng>(
    state: &mut GameState,
    registry: &SituationRegistry,
    rng: &mut R,
    config: &TickConfig,
) -> TickSummary {
    // --- Clock ---
    let days_rolled = clock::advance(state, config.hours_per_tick * state.game_speed);

    // --- Decay ---
    let decayed = decay::maybe_decay(state, config, rng);

    // --- Situations ---
    let fired = registry.evaluate(state, rng);

    debug!(
        day = state.day,
        time = state.time,
        decayed,
        fired = fired.len(),
        "Tick complete"
    );

    TickSummary {
        day: state.day,
        time: state.time,
        days_rolled,
        decayed,
        fired,
    }
}
