//! In-game clock arithmetic.
//!
//! The clock is the `(day, time)` pair stored on [`GameState`]. `time` is a
//! fractional hour in `[0, 24)` and `day` starts at 1. Every path that
//! moves time forward (interactions and ticks) goes through [`advance`] so
//! the wrap rule is applied in exactly one place.
//!
//! # Design Principles
//!
//! - Overflowing `time` subtracts whole days and increments `day`; it never
//!   snaps back to midnight, so fractional hours carry over.
//! - The day counter uses saturating arithmetic.
//! - Durations between two clock readings use absolute hours
//!   (`day * 24 + time`) so intervals spanning midnight are measured
//!   correctly.

use dreamstory_types::{GameState, HOURS_PER_DAY};

/// Errors that can occur when constructing a clock reading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClockError {
    /// The hour is not a finite value in `[0, 24)`.
    #[error("invalid hour of day: {hour} (expected 0 <= hour < 24)")]
    InvalidHour {
        /// The rejected hour.
        hour: f64,
    },

    /// Days are counted from 1.
    #[error("invalid day: 0 (days start at 1)")]
    InvalidDay,
}

/// A validated point on the in-game clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTime {
    day: u32,
    hour: f64,
}

impl ClockTime {
    /// Build a reading from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidHour`] if `hour` is outside `[0, 24)` or
    /// not finite, and [`ClockError::InvalidDay`] if `day` is 0.
    pub fn new(day: u32, hour: f64) -> Result<Self, ClockError> {
        if !is_valid_hour(hour) {
            return Err(ClockError::InvalidHour { hour });
        }
        if day == 0 {
            return Err(ClockError::InvalidDay);
        }
        Ok(Self { day, hour })
    }

    /// Read the clock of a game state.
    pub const fn of(state: &GameState) -> Self {
        Self {
            day: state.day,
            hour: state.time,
        }
    }

    /// Day counter.
    pub const fn day(self) -> u32 {
        self.day
    }

    /// Fractional hour of the day.
    pub const fn hour(self) -> f64 {
        self.hour
    }

    /// Hours since the start of day 0.
    pub fn absolute_hours(self) -> f64 {
        absolute_hours(self.day, self.hour)
    }

    /// Hours elapsed from `earlier` to `self`. Negative if `earlier` is in
    /// the future.
    pub fn hours_since(self, earlier: Self) -> f64 {
        self.absolute_hours() - earlier.absolute_hours()
    }
}

impl core::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "day {} {}", self.day, format_clock(self.hour))
    }
}

/// Whether `hour` is a finite value in `[0, 24)`.
pub fn is_valid_hour(hour: f64) -> bool {
    hour.is_finite() && (0.0..HOURS_PER_DAY).contains(&hour)
}

/// `day * 24 + hour`.
pub fn absolute_hours(day: u32, hour: f64) -> f64 {
    f64::from(day).mul_add(HOURS_PER_DAY, hour)
}

/// Move the clock of `state` forward by `hours`, wrapping past midnight.
///
/// Returns the number of day boundaries crossed. Non-positive or
/// non-finite amounts leave the clock untouched.
pub fn advance(state: &mut GameState, hours: f64) -> u32 {
    if !hours.is_finite() || hours <= 0.0 {
        return 0;
    }

    let total = state.time + hours;
    let whole_days = (total / HOURS_PER_DAY).floor();
    state.time = total.rem_euclid(HOURS_PER_DAY);

    // `whole_days` is a non-negative integer-valued float; saturate it
    // into the counter's range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let crossed = whole_days.min(f64::from(u32::MAX)) as u32;
    state.day = state.day.saturating_add(crossed);
    crossed
}

/// Format a fractional hour as `"HH:MM"`.
///
/// Minutes are truncated, not rounded: `8.999` renders as `"08:59"`.
/// Out-of-range input is wrapped into `[0, 24)` first.
pub fn format_clock(hour: f64) -> String {
    let wrapped = if hour.is_finite() {
        hour.rem_euclid(HOURS_PER_DAY)
    } else {
        0.0
    };
    let whole = wrapped.floor();
    let minutes = ((wrapped - whole) * 60.0).floor();

    // Both values are small non-negative integers after the floor.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (hh, mm) = (whole as u32, minutes as u32);
    format!("{hh:02}:{mm:02}")
}
