//! A single play session: one owned [`GameState`] and everything that
//! mutates it.
//!
//! [`Session`] is synchronous. It turns player [`Intent`]s into state
//! changes and runs ticks on demand; the [`scheduler`](crate::scheduler)
//! wraps it in an actor that adds the timer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dreamstory_types::{GameState, ObjectId, Room, SessionId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::actions::{self, InteractionOutcome};
use crate::catalog::{Catalog, ObjectView};
use crate::config::DreamStoryConfig;
use crate::cooldown::CooldownLedger;
use crate::situations::SituationRegistry;
use crate::tick::{self, TickSummary};

/// A player or presentation-layer request.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Use a catalog object.
    Interact(ObjectId),
    /// Move to another room.
    SetRoom(Room),
    /// Start or stop the tick scheduler.
    TogglePlaying,
    /// Replace the state with the starting snapshot.
    Reset,
    /// Change the speed multiplier. Stored as given.
    SetSpeed(f64),
    /// Change the stored music volume.
    SetVolume(f64),
    /// Flip the stored mute flag.
    ToggleMute,
    /// Flip the stored room drawing style.
    ToggleViewStyle,
}

impl Intent {
    /// Whether handling this intent can change the tick timer.
    pub const fn affects_timer(&self) -> bool {
        matches!(self, Self::TogglePlaying | Self::Reset | Self::SetSpeed(_))
    }
}

/// What handling an [`Intent`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    /// The intent was an interaction; see the inner outcome.
    Interaction(InteractionOutcome),
    /// No catalog object has this id. Nothing changed.
    UnknownObject(ObjectId),
    /// A plain field update was applied.
    Updated,
}

/// One character's simulation.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    started_at: DateTime<Utc>,
    state: GameState,
    ledger: CooldownLedger,
    rng: StdRng,
    catalog: Arc<Catalog>,
    situations: Arc<SituationRegistry>,
    config: Arc<DreamStoryConfig>,
}

impl Session {
    /// Start a session with the standard catalog and situations.
    pub fn new(config: Arc<DreamStoryConfig>) -> Self {
        let catalog = Arc::new(Catalog::standard());
        let situations = Arc::new(SituationRegistry::standard(config.situations.chance));
        Self::with_registries(config, catalog, situations)
    }

    /// Start a session over shared registries.
    ///
    /// Seeds the RNG from `world.seed` when set, otherwise from the OS.
    pub fn with_registries(
        config: Arc<DreamStoryConfig>,
        catalog: Arc<Catalog>,
        situations: Arc<SituationRegistry>,
    ) -> Self {
        let rng = config
            .world
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let id = SessionId::new();
        info!(
            session = %id,
            seed = config.world.seed,
            objects = catalog.len(),
            situations = situations.len(),
            "Session started"
        );
        Self {
            id,
            started_at: Utc::now(),
            state: config.initial_state(),
            ledger: CooldownLedger::new(),
            rng,
            catalog,
            situations,
            config,
        }
    }

    /// Replace the current state, e.g. to resume from a known snapshot.
    #[must_use]
    pub fn from_state(mut self, state: GameState) -> Self {
        self.state = state;
        self
    }

    /// Session identifier.
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Wall-clock time the session was created.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Borrow the current state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Clone the current state for publishing.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Borrow the cooldown ledger.
    pub const fn ledger(&self) -> &CooldownLedger {
        &self.ledger
    }

    /// The shared object catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The shared situation registry.
    pub fn situations(&self) -> &SituationRegistry {
        &self.situations
    }

    /// The configuration this session runs with.
    pub fn config(&self) -> &DreamStoryConfig {
        &self.config
    }

    /// Objects in the current room with their usability.
    pub fn room_view(&self) -> Vec<ObjectView> {
        self.catalog
            .views_for_room(self.state.current_room, &self.state, &self.ledger)
    }

    /// Apply one intent.
    pub fn handle(&mut self, intent: Intent) -> IntentOutcome {
        match intent {
            Intent::Interact(id) => self.interact(id),
            Intent::SetRoom(room) => {
                debug!(session = %self.id, %room, "Room changed");
                self.state.current_room = room;
                IntentOutcome::Updated
            }
            Intent::TogglePlaying => {
                self.state.is_playing = !self.state.is_playing;
                info!(session = %self.id, playing = self.state.is_playing, "Play state toggled");
                IntentOutcome::Updated
            }
            Intent::Reset => {
                self.reset();
                IntentOutcome::Updated
            }
            Intent::SetSpeed(speed) => {
                if !speed.is_finite() || speed <= 0.0 {
                    warn!(session = %self.id, speed, "Non-positive speed stored; timer keeps its period");
                }
                self.state.game_speed = speed;
                IntentOutcome::Updated
            }
            Intent::SetVolume(volume) => {
                if volume.is_finite() {
                    self.state.preferences.volume = volume.clamp(0.0, 1.0);
                }
                IntentOutcome::Updated
            }
            Intent::ToggleMute => {
                self.state.preferences.muted = !self.state.preferences.muted;
                IntentOutcome::Updated
            }
            Intent::ToggleViewStyle => {
                self.state.preferences.view_style = self.state.preferences.view_style.toggled();
                IntentOutcome::Updated
            }
        }
    }

    /// Run one tick against the current state.
    pub fn tick(&mut self) -> TickSummary {
        tick::run_tick(
            &mut self.state,
            &self.situations,
            &mut self.rng,
            &self.config.tick,
        )
    }

    fn interact(&mut self, id: ObjectId) -> IntentOutcome {
        let Some(object) = self.catalog.get(&id) else {
            debug!(session = %self.id, object = %id, "Unknown object ignored");
            return IntentOutcome::UnknownObject(id);
        };
        IntentOutcome::Interaction(actions::apply_interaction(
            &mut self.state,
            &mut self.ledger,
            object,
        ))
    }

    fn reset(&mut self) {
        self.state = self.config.initial_state();
        if self.config.cooldowns.clear_on_reset {
            self.ledger.clear();
        }
        info!(
            session = %self.id,
            ledger_entries = self.ledger.len(),
            "Session reset"
        );
    }
}
