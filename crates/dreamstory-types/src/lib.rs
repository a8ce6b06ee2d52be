//! Shared type definitions for the DreamStory simulation.
//!
//! This crate is the single source of truth for the state model used across
//! the DreamStory workspace. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for the presentation layer that renders them.
//!
//! # Modules
//!
//! - [`ids`] -- Session UUIDs and object/situation slugs
//! - [`enums`] -- Needs, rooms, action kinds, view style
//! - [`structs`] -- Needs, history, preferences and the `GameState` snapshot

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ActionKind, Need, NeedLevel, ParseEnumError, Room, ViewStyle};
pub use ids::{ObjectId, SessionId, SituationId};
pub use structs::{
    DEFAULT_HISTORY_CAPACITY, GameState, HOURS_PER_DAY, History, NEED_MAX, NEED_MIN, NeedDelta,
    Needs, Preferences, clamp_need,
};
