//! Enumeration types for the DreamStory simulation.
//!
//! Every closed set the simulation reasons about lives here: the seven
//! needs, the five rooms, the semantic action tags carried by catalog
//! objects, and the presentation-only view style.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Error returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    /// Which enumeration was being parsed (e.g. `"room"`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Needs
// ---------------------------------------------------------------------------

/// One of the seven bounded character stats.
///
/// Every need is a real number in `[0, 100]`. For energy, happiness,
/// health and cleanliness a high value is good; for hunger, thirst and
/// sleepiness a high value is bad (see [`Need::higher_is_worse`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Need {
    /// Physical energy; drained by exercise, restored by sleep and food.
    Energy,
    /// Mood.
    Happiness,
    /// Long-term wellbeing. Never decays passively.
    Health,
    /// Accumulates over time; reduced by eating.
    Hunger,
    /// Accumulates over time; reduced by drinking.
    Thirst,
    /// Hygiene; drains slowly, restored in the bathroom.
    Cleanliness,
    /// Accumulates over time; reduced by sleeping.
    Sleepiness,
}

impl Need {
    /// All needs in display order.
    pub const ALL: [Self; 7] = [
        Self::Energy,
        Self::Happiness,
        Self::Health,
        Self::Hunger,
        Self::Thirst,
        Self::Cleanliness,
        Self::Sleepiness,
    ];

    /// Stable lowercase name of the need.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Happiness => "happiness",
            Self::Health => "health",
            Self::Hunger => "hunger",
            Self::Thirst => "thirst",
            Self::Cleanliness => "cleanliness",
            Self::Sleepiness => "sleepiness",
        }
    }

    /// Whether a high value of this need is bad for the character.
    pub const fn higher_is_worse(self) -> bool {
        matches!(self, Self::Hunger | Self::Thirst | Self::Sleepiness)
    }

    /// Classify a value of this need into a [`NeedLevel`].
    ///
    /// "Higher is better" needs are good at 70 and above, fair at 40 and
    /// above. "Higher is worse" needs are good at 30 and below, fair at 60
    /// and below. Everything else is critical.
    pub fn level(self, value: f64) -> NeedLevel {
        if self.higher_is_worse() {
            if value <= 30.0 {
                NeedLevel::Good
            } else if value <= 60.0 {
                NeedLevel::Fair
            } else {
                NeedLevel::Critical
            }
        } else if value >= 70.0 {
            NeedLevel::Good
        } else if value >= 40.0 {
            NeedLevel::Fair
        } else {
            NeedLevel::Critical
        }
    }
}

impl fmt::Display for Need {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse health of a single need, used by presentation to colour stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum NeedLevel {
    /// Comfortable range.
    Good,
    /// Worth attending to soon.
    Fair,
    /// Needs attention now.
    Critical,
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// A room of the character's home. Every catalog object belongs to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Room {
    /// Bed, computer, wardrobe.
    Bedroom,
    /// Sofa, TV, bookshelf, videogame.
    Living,
    /// Table, fridge, stove, microwave, water.
    Kitchen,
    /// Exercise equipment, treadmill, dumbbells, yoga mat.
    Gym,
    /// Shower, sink, toilet, skincare.
    Bathroom,
}

impl Room {
    /// All rooms in navigation order.
    pub const ALL: [Self; 5] = [
        Self::Bedroom,
        Self::Living,
        Self::Kitchen,
        Self::Gym,
        Self::Bathroom,
    ];

    /// Stable lowercase name of the room.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bedroom => "bedroom",
            Self::Living => "living",
            Self::Kitchen => "kitchen",
            Self::Gym => "gym",
            Self::Bathroom => "bathroom",
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Room {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|room| room.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("room", s))
    }
}

// ---------------------------------------------------------------------------
// Action kinds
// ---------------------------------------------------------------------------

/// Semantic tag of what using an object means for the character.
///
/// The tag appears verbatim in the action history label, e.g.
/// `"Cama (sleep)"` or `"Água (drinkWater)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ActionKind {
    /// Sleeping in bed.
    Sleep,
    /// Eating a meal or snack.
    Eat,
    /// Working out.
    Exercise,
    /// Leisure.
    Relax,
    /// Personal hygiene.
    Shower,
    /// Drinking water.
    DrinkWater,
}

impl ActionKind {
    /// Label used in the action history.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Eat => "eat",
            Self::Exercise => "exercise",
            Self::Relax => "relax",
            Self::Shower => "shower",
            Self::DrinkWater => "drinkWater",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Presentation pass-through
// ---------------------------------------------------------------------------

/// How the presentation layer draws rooms. The core only stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ViewStyle {
    /// Isometric rooms.
    #[default]
    Isometric,
    /// Flat 2D pixel rooms.
    Flat,
}

impl ViewStyle {
    /// The other style.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Isometric => Self::Flat,
            Self::Flat => Self::Isometric,
        }
    }
}
