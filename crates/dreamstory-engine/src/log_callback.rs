//! Tick callback that writes special events and day changes to the log.
//!
//! The console has no UI toast, so every situation that fires on a timer
//! tick is announced through `tracing` at info level instead.

use std::sync::Arc;

use dreamstory_core::clock::format_clock;
use dreamstory_core::scheduler::TickCallback;
use dreamstory_core::situations::SituationRegistry;
use dreamstory_core::tick::TickSummary;
use dreamstory_types::GameState;
use tracing::{debug, info, warn};

/// Logs fired situations by name, looked up in the session's registry.
pub struct EventLogCallback {
    situations: Arc<SituationRegistry>,
    ticks: u64,
    events: u64,
}

impl EventLogCallback {
    /// Create a callback that resolves ids against `situations`.
    pub const fn new(situations: Arc<SituationRegistry>) -> Self {
        Self {
            situations,
            ticks: 0,
            events: 0,
        }
    }

    /// Ticks observed so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Special events announced so far.
    pub const fn events(&self) -> u64 {
        self.events
    }
}

impl TickCallback for EventLogCallback {
    fn on_tick(&mut self, summary: &TickSummary, state: &GameState) {
        self.ticks = self.ticks.saturating_add(1);
        debug!(
            tick = self.ticks,
            day = summary.day,
            time = %format_clock(summary.time),
            decayed = summary.decayed,
            "Tick"
        );

        if summary.days_rolled > 0 {
            info!(day = state.day, "A new day begins");
        }

        for id in &summary.fired {
            self.events = self.events.saturating_add(1);
            match self.situations.get(id) {
                Some(situation) => info!(
                    situation = %id,
                    name = situation.display_name,
                    description = situation.description,
                    day = summary.day,
                    time = %format_clock(summary.time),
                    "Special event"
                ),
                None => warn!(situation = %id, "Fired situation missing from registry"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use dreamstory_types::SituationId;

    use super::*;

    fn summary(fired: &[&str], days_rolled: u32) -> TickSummary {
        TickSummary {
            day: 1,
            time: 8.5,
            days_rolled,
            decayed: false,
            fired: fired.iter().copied().map(SituationId::from).collect(),
        }
    }

    #[test]
    fn counts_ticks_and_events() {
        let registry = Arc::new(SituationRegistry::standard(0.3));
        let mut callback = EventLogCallback::new(registry);
        let state = GameState::default();

        callback.on_tick(&summary(&[], 0), &state);
        callback.on_tick(&summary(&["gaming_flow", "power_nap"], 0), &state);
        callback.on_tick(&summary(&["not_registered"], 1), &state);

        assert_eq!(callback.ticks(), 3);
        assert_eq!(callback.events(), 3);
    }
}
