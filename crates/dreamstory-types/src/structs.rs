//! Core state structs for the DreamStory simulation.
//!
//! [`GameState`] is the single mutable aggregate the simulation owns. The
//! presentation layer only ever sees cloned snapshots of it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Need, NeedLevel, Room, ViewStyle};

/// Lower bound of every need.
pub const NEED_MIN: f64 = 0.0;

/// Upper bound of every need.
pub const NEED_MAX: f64 = 100.0;

/// Hours in one in-game day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Number of entries each history list keeps by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Clamp a need value into `[NEED_MIN, NEED_MAX]`.
///
/// `NaN` collapses to [`NEED_MIN`] so a bad delta can never poison a stat.
pub fn clamp_need(value: f64) -> f64 {
    if value.is_nan() {
        NEED_MIN
    } else {
        value.clamp(NEED_MIN, NEED_MAX)
    }
}

// ---------------------------------------------------------------------------
// Needs
// ---------------------------------------------------------------------------

/// The seven need attributes of the character.
///
/// Fields are public for reading; writes should go through [`Needs::set`]
/// or [`Needs::adjust`] so the `[0, 100]` clamp is never bypassed.
/// Missing fields deserialize to the starting values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct Needs {
    /// Physical energy.
    pub energy: f64,
    /// Mood.
    pub happiness: f64,
    /// Long-term wellbeing.
    pub health: f64,
    /// Hunger (higher is worse).
    pub hunger: f64,
    /// Thirst (higher is worse).
    pub thirst: f64,
    /// Hygiene.
    pub cleanliness: f64,
    /// Sleepiness (higher is worse).
    pub sleepiness: f64,
}

impl Default for Needs {
    fn default() -> Self {
        Self {
            energy: 80.0,
            happiness: 70.0,
            health: 85.0,
            hunger: 60.0,
            thirst: 70.0,
            cleanliness: 80.0,
            sleepiness: 30.0,
        }
    }
}

impl Needs {
    /// Read one need.
    pub const fn get(&self, need: Need) -> f64 {
        match need {
            Need::Energy => self.energy,
            Need::Happiness => self.happiness,
            Need::Health => self.health,
            Need::Hunger => self.hunger,
            Need::Thirst => self.thirst,
            Need::Cleanliness => self.cleanliness,
            Need::Sleepiness => self.sleepiness,
        }
    }

    /// Overwrite one need, clamping into `[0, 100]`.
    pub fn set(&mut self, need: Need, value: f64) {
        *self.slot_mut(need) = clamp_need(value);
    }

    /// Add a signed delta to one need, clamping into `[0, 100]`.
    pub fn adjust(&mut self, need: Need, delta: f64) {
        let slot = self.slot_mut(need);
        *slot = clamp_need(*slot + delta);
    }

    /// Apply every delta in order.
    pub fn apply(&mut self, deltas: &[NeedDelta]) {
        for delta in deltas {
            self.adjust(delta.need, delta.amount);
        }
    }

    /// Iterate over `(need, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Need, f64)> + '_ {
        Need::ALL.into_iter().map(|need| (need, self.get(need)))
    }

    /// Classify every need for display.
    pub fn levels(&self) -> Vec<(Need, NeedLevel)> {
        self.iter().map(|(need, value)| (need, need.level(value))).collect()
    }

    const fn slot_mut(&mut self, need: Need) -> &mut f64 {
        match need {
            Need::Energy => &mut self.energy,
            Need::Happiness => &mut self.happiness,
            Need::Health => &mut self.health,
            Need::Hunger => &mut self.hunger,
            Need::Thirst => &mut self.thirst,
            Need::Cleanliness => &mut self.cleanliness,
            Need::Sleepiness => &mut self.sleepiness,
        }
    }
}

/// A signed change to one need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NeedDelta {
    /// The need being changed.
    pub need: Need,
    /// Signed amount added to the need before clamping.
    pub amount: f64,
}

impl NeedDelta {
    /// Create a delta.
    pub const fn new(need: Need, amount: f64) -> Self {
        Self { need, amount }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Bounded, most-recent-first logs of what happened in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct History {
    /// Labels of executed interactions, e.g. `"Cama (sleep)"`.
    pub last_actions: Vec<String>,
    /// Labels of fired special situations.
    pub special_events: Vec<String>,
    /// Maximum entries kept per list.
    pub capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// Create empty logs keeping at most `capacity` entries each.
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            last_actions: Vec::new(),
            special_events: Vec::new(),
            capacity,
        }
    }

    /// Prepend an interaction label, evicting the oldest beyond capacity.
    pub fn record_action(&mut self, label: String) {
        push_front_bounded(&mut self.last_actions, label, self.capacity);
    }

    /// Prepend a special-event label, evicting the oldest beyond capacity.
    pub fn record_event(&mut self, label: String) {
        push_front_bounded(&mut self.special_events, label, self.capacity);
    }
}

fn push_front_bounded(list: &mut Vec<String>, entry: String, capacity: usize) {
    list.insert(0, entry);
    list.truncate(capacity);
}

// ---------------------------------------------------------------------------
// Presentation preferences
// ---------------------------------------------------------------------------

/// Settings the core stores on behalf of the presentation layer.
///
/// No simulation rule reads these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Preferences {
    /// Music volume in `[0, 1]`.
    pub volume: f64,
    /// Whether audio is muted.
    pub muted: bool,
    /// Room drawing style.
    pub view_style: ViewStyle,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            volume: 0.3,
            muted: false,
            view_style: ViewStyle::Isometric,
        }
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The complete simulation snapshot for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameState {
    /// The character's needs.
    pub needs: Needs,
    /// Hour of day in `[0, 24)`.
    pub time: f64,
    /// Day counter, starting at 1.
    pub day: u32,
    /// Room the character is in.
    pub current_room: Room,
    /// Whether the tick scheduler is running.
    pub is_playing: bool,
    /// Speed multiplier for tick interval and per-tick time advance.
    pub game_speed: f64,
    /// Recent actions and special events.
    pub history: History,
    /// Unlocked achievements. Reserved; no rule populates it yet.
    pub achievements: BTreeSet<String>,
    /// Presentation pass-through settings.
    pub preferences: Preferences,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            needs: Needs::default(),
            time: 8.0,
            day: 1,
            current_room: Room::Bedroom,
            is_playing: false,
            game_speed: 1.0,
            history: History::default(),
            achievements: BTreeSet::new(),
            preferences: Preferences::default(),
        }
    }
}

impl GameState {
    /// Hours elapsed since the start of day 0, used for cooldown math.
    pub fn absolute_hours(&self) -> f64 {
        f64::from(self.day).mul_add(HOURS_PER_DAY, self.time)
    }
}
