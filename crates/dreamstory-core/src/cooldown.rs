//! Per-session record of when each object was last used.
//!
//! The catalog itself is immutable and shared between sessions, so usage
//! timestamps live here instead. A ledger belongs to exactly one session.

use std::collections::BTreeMap;

use dreamstory_types::{GameState, ObjectId};

use crate::clock::absolute_hours;

/// Clock reading taken right after an interaction advanced time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageStamp {
    /// Day of use.
    pub day: u32,
    /// Hour of use, after the interaction's time cost was applied.
    pub time: f64,
}

impl UsageStamp {
    /// Stamp the current clock of `state`.
    pub const fn at(state: &GameState) -> Self {
        Self {
            day: state.day,
            time: state.time,
        }
    }

    /// Absolute hours elapsed between this stamp and the clock of `state`.
    pub fn elapsed_until(self, state: &GameState) -> f64 {
        state.absolute_hours() - absolute_hours(self.day, self.time)
    }
}

/// Last-use stamps keyed by object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CooldownLedger {
    stamps: BTreeMap<ObjectId, UsageStamp>,
}

impl CooldownLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a use of `object`, replacing any earlier stamp.
    pub fn record(&mut self, object: ObjectId, stamp: UsageStamp) {
        self.stamps.insert(object, stamp);
    }

    /// Most recent stamp for `object`, if it was ever used.
    pub fn last_used(&self, object: &ObjectId) -> Option<UsageStamp> {
        self.stamps.get(object).copied()
    }

    /// Hours since `object` was last used, measured against `state`.
    pub fn elapsed_since_use(&self, object: &ObjectId, state: &GameState) -> Option<f64> {
        self.last_used(object).map(|stamp| stamp.elapsed_until(state))
    }

    /// Forget every recorded use.
    pub fn clear(&mut self) {
        self.stamps.clear();
    }

    /// Number of objects with a recorded use.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    /// Whether no use has been recorded.
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}
