//! Simulation core for DreamStory.
//!
//! A single character with seven needs lives in a five-room home. The
//! player restores needs by using catalog objects; a timer advances the
//! in-game clock, applies passive decay and rolls special situations.
//!
//! # Modules
//!
//! - [`clock`] -- Clock wrap, elapsed-hour math and `HH:MM` formatting.
//! - [`config`] -- Configuration loading from `dreamstory-config.yaml`
//!   into strongly-typed structs.
//! - [`catalog`] -- The twenty interactable objects and their usability.
//! - [`cooldown`] -- Per-session last-use ledger.
//! - [`actions`] -- Applying a player interaction.
//! - [`decay`] -- Passive need decay.
//! - [`situations`] -- The ten special situations.
//! - [`tick`] -- One synchronous tick: clock, decay, situations.
//! - [`session`] -- [`Session`] and the [`Intent`]s it accepts.
//! - [`scheduler`] -- Tokio actor that runs a session on a timer.
//!
//! [`Session`]: session::Session
//! [`Intent`]: session::Intent

pub mod actions;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod cooldown;
pub mod decay;
pub mod scheduler;
pub mod session;
pub mod situations;
pub mod tick;
