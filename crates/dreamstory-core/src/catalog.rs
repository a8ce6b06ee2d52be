//! The interactable-object catalog.
//!
//! Twenty objects spread over five rooms. Each entry carries its need
//! effects, the in-game hours using it takes, an availability predicate
//! over the current state and a cooldown. Entries are immutable and shared
//! across sessions; per-session usage lives in a [`CooldownLedger`].

use dreamstory_types::{ActionKind, GameState, Need, NeedDelta, ObjectId, Room};

use crate::cooldown::CooldownLedger;

/// Pure predicate deciding whether an object can be used right now.
pub type Availability = fn(&GameState) -> bool;

/// One usable object in a room.
#[derive(Debug, Clone)]
pub struct InteractableObject {
    /// Catalog key.
    pub id: ObjectId,
    /// Name shown to the player and used in the action history.
    pub display_name: &'static str,
    /// Room the object lives in.
    pub room: Room,
    /// What using it means.
    pub action_kind: ActionKind,
    /// Need deltas applied on use.
    pub effects: Vec<NeedDelta>,
    /// In-game hours one use takes.
    pub time_cost: f64,
    /// State predicate gating use.
    pub availability: Availability,
    /// Minimum in-game hours between uses.
    pub cooldown_hours: f64,
}

impl InteractableObject {
    /// History label, e.g. `"Cama (sleep)"`.
    pub fn history_label(&self) -> String {
        format!("{} ({})", self.display_name, self.action_kind)
    }
}

/// Whether an object can be used, and if not, why.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Usability {
    /// Availability holds and no cooldown is pending.
    Usable,
    /// The availability predicate is false for the current state.
    Unavailable,
    /// Used too recently.
    CoolingDown {
        /// In-game hours until the cooldown expires.
        remaining_hours: f64,
    },
}

impl Usability {
    /// Shorthand for `matches!(self, Usability::Usable)`.
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Usable)
    }
}

/// An object paired with its usability, for rendering a room.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectView {
    /// Catalog key.
    pub id: ObjectId,
    /// Display name.
    pub display_name: &'static str,
    /// Action kind.
    pub action_kind: ActionKind,
    /// Current usability.
    pub usability: Usability,
}

/// Immutable registry of interactable objects.
#[derive(Debug, Clone)]
pub struct Catalog {
    objects: Vec<InteractableObject>,
}

impl Catalog {
    /// Build a catalog from explicit entries. Order is preserved.
    pub const fn new(objects: Vec<InteractableObject>) -> Self {
        Self { objects }
    }

    /// Every object, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &InteractableObject> {
        self.objects.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects located in `room`, in catalog order.
    pub fn list_for_room(&self, room: Room) -> Vec<&InteractableObject> {
        self.objects.iter().filter(|o| o.room == room).collect()
    }

    /// Look up an object by key.
    pub fn get(&self, id: &ObjectId) -> Option<&InteractableObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    /// Classify `object` against the current state and usage ledger.
    ///
    /// Availability is checked before the cooldown, so an object that is
    /// both unavailable and cooling down reports [`Usability::Unavailable`].
    /// A stamp later than the current clock (left over from before a reset)
    /// is stale and does not block use.
    pub fn usability(
        object: &InteractableObject,
        state: &GameState,
        ledger: &CooldownLedger,
    ) -> Usability {
        if !(object.availability)(state) {
            return Usability::Unavailable;
        }
        match ledger.elapsed_since_use(&object.id, state) {
            Some(elapsed) if (0.0..object.cooldown_hours).contains(&elapsed) => {
                Usability::CoolingDown {
                    remaining_hours: object.cooldown_hours - elapsed,
                }
            }
            _ => Usability::Usable,
        }
    }

    /// Whether `object` can be used right now.
    pub fn is_usable(object: &InteractableObject, state: &GameState, ledger: &CooldownLedger) -> bool {
        Self::usability(object, state, ledger).is_usable()
    }

    /// Objects in `room` with their current usability.
    pub fn views_for_room(
        &self,
        room: Room,
        state: &GameState,
        ledger: &CooldownLedger,
    ) -> Vec<ObjectView> {
        self.list_for_room(room)
            .into_iter()
            .map(|object| ObjectView {
                id: object.id.clone(),
                display_name: object.display_name,
                action_kind: object.action_kind,
                usability: Self::usability(object, state, ledger),
            })
            .collect()
    }

    /// The standard twenty-object home.
    #[allow(clippy::too_many_lines)]
    pub fn standard() -> Self {
        Self::new(vec![
            // Bedroom
            InteractableObject {
                id: ObjectId::from("bed"),
                display_name: "Cama",
                room: Room::Bedroom,
                action_kind: ActionKind::Sleep,
                effects: deltas(&[
                    (Need::Energy, 40.0),
                    (Need::Sleepiness, -60.0),
                    (Need::Health, 10.0),
                ]),
                time_cost: 8.0,
                availability: |s| s.needs.sleepiness > 40.0 || s.time >= 22.0 || s.time <= 6.0,
                cooldown_hours: 12.0,
            },
            InteractableObject {
                id: ObjectId::from("computer"),
                display_name: "Computador",
                room: Room::Bedroom,
                action_kind: ActionKind::Relax,
                effects: deltas(&[
                    (Need::Happiness, 20.0),
                    (Need::Energy, -10.0),
                    (Need::Sleepiness, 5.0),
                ]),
                time_cost: 2.0,
                availability: |s| s.needs.energy > 20.0,
                cooldown_hours: 1.0,
            },
            InteractableObject {
                id: ObjectId::from("wardrobe"),
                display_name: "Guarda-roupa",
                room: Room::Bedroom,
                action_kind: ActionKind::Relax,
                effects: deltas(&[(Need::Happiness, 10.0), (Need::Cleanliness, 5.0)]),
                time_cost: 1.0,
                availability: always,
                cooldown_hours: 2.0,
            },
            // Living room
            InteractableObject {
                id: ObjectId::from("sofa"),
                display_name: "Sofá",
                room: Room::Living,
                action_kind: ActionKind::Relax,
                effects: deltas(&[
                    (Need::Happiness, 15.0),
                    (Need::Energy, 5.0),
                    (Need::Sleepiness, 10.0),
                ]),
                time_cost: 2.0,
                availability: always,
                cooldown_hours: 1.0,
            },
            InteractableObject {
                id: ObjectId::from("tv"),
                display_name: "TV",
                room: Room::Living,
                action_kind: ActionKind::Relax,
                effects: deltas(&[
                    (Need::Happiness, 25.0),
                    (Need::Energy, -5.0),
                    (Need::Sleepiness, 15.0),
                ]),
                time_cost: 3.0,
                availability: always,
                cooldown_hours: 1.0,
            },
            InteractableObject {
                id: ObjectId::from("bookshelf"),
                display_name: "Estante",
                room: Room::Living,
                action_kind: ActionKind::Relax,
                effects: deltas(&[
                    (Need::Happiness, 20.0),
                    (Need::Health, 5.0),
                    (Need::Sleepiness, 20.0),
                ]),
                time_cost: 2.0,
                availability: always,
                cooldown_hours: 1.0,
            },
            InteractableObject {
                id: ObjectId::from("videogame"),
                display_name: "Videogame",
                room: Room::Living,
                action_kind: ActionKind::Relax,
                effects: deltas(&[
                    (Need::Happiness, 30.0),
                    (Need::Energy, -15.0),
                    (Need::Sleepiness, -5.0),
                ]),
                time_cost: 3.0,
                availability: |s| s.needs.energy > 25.0,
                cooldown_hours: 2.0,
            },
            // Kitchen
            InteractableObject {
                id: ObjectId::from("table"),
                display_name: "Mesa",
                room: Room::Kitchen,
                action_kind: ActionKind::Eat,
                effects: deltas(&[
                    (Need::Hunger, -50.0),
                    (Need::Happiness, 15.0),
                    (Need::Energy, 20.0),
                ]),
                time_cost: 1.0,
                availability: |s| s.needs.hunger > 30.0,
                cooldown_hours: 3.0,
            },
            InteractableObject {
                id: ObjectId::from("fridge"),
                display_name: "Geladeira",
                room: Room::Kitchen,
                action_kind: ActionKind::Eat,
                effects: deltas(&[
                    (Need::Hunger, -30.0),
                    (Need::Thirst, -20.0),
                    (Need::Happiness, 10.0),
                ]),
                time_cost: 1.0,
                availability: |s| s.needs.hunger > 20.0 || s.needs.thirst > 30.0,
                cooldown_hours: 2.0,
            },
            InteractableObject {
                id: ObjectId::from("stove"),
                display_name: "Fogão",
                room: Room::Kitchen,
                action_kind: ActionKind::Eat,
                effects: deltas(&[
                    (Need::Hunger, -60.0),
                    (Need::Happiness, 25.0),
                    (Need::Energy, 15.0),
                ]),
                time_cost: 2.0,
                availability: |s| s.needs.hunger > 40.0,
                cooldown_hours: 4.0,
            },
            InteractableObject {
                id: ObjectId::from("microwave"),
                display_name: "Microondas",
                room: Room::Kitchen,
                action_kind: ActionKind::Eat,
                effects: deltas(&[
                    (Need::Hunger, -40.0),
                    (Need::Happiness, 10.0),
                    (Need::Energy, 10.0),
                ]),
                time_cost: 1.0,
                availability: |s| s.needs.hunger > 25.0,
                cooldown_hours: 2.0,
            },
            InteractableObject {
                id: ObjectId::from("water"),
                display_name: "Água",
                room: Room::Kitchen,
                action_kind: ActionKind::DrinkWater,
                effects: deltas(&[
                    (Need::Thirst, -40.0),
                    (Need::Health, 10.0),
                    (Need::Energy, 5.0),
                ]),
                time_cost: 1.0,
                availability: |s| s.needs.thirst > 20.0,
                cooldown_hours: 1.0,
            },
            // Gym
            InteractableObject {
                id: ObjectId::from("exercise"),
                display_name: "Equipamento",
                room: Room::Gym,
                action_kind: ActionKind::Exercise,
                effects: deltas(&[
                    (Need::Health, 25.0),
                    (Need::Energy, -20.0),
                    (Need::Happiness, 20.0),
                    (Need::Sleepiness, -10.0),
                ]),
                time_cost: 2.0,
                availability: |s| s.needs.energy > 30.0,
                cooldown_hours: 3.0,
            },
            InteractableObject {
                id: ObjectId::from("treadmill"),
                display_name: "Esteira",
                room: Room::Gym,
                action_kind: ActionKind::Exercise,
                effects: deltas(&[
                    (Need::Health, 30.0),
                    (Need::Energy, -25.0),
                    (Need::Happiness, 15.0),
                    (Need::Sleepiness, -15.0),
                ]),
                time_cost: 3.0,
                availability: |s| s.needs.energy > 35.0,
                cooldown_hours: 4.0,
            },
            InteractableObject {
                id: ObjectId::from("dumbbells"),
                display_name: "Halteres",
                room: Room::Gym,
                action_kind: ActionKind::Exercise,
                effects: deltas(&[
                    (Need::Health, 20.0),
                    (Need::Energy, -15.0),
                    (Need::Happiness, 10.0),
                    (Need::Sleepiness, -5.0),
                ]),
                time_cost: 1.0,
                availability: |s| s.needs.energy > 25.0,
                cooldown_hours: 2.0,
            },
            InteractableObject {
                id: ObjectId::from("yoga-mat"),
                display_name: "Tapete de Yoga",
                room: Room::Gym,
                action_kind: ActionKind::Exercise,
                effects: deltas(&[
                    (Need::Health, 15.0),
                    (Need::Energy, 5.0),
                    (Need::Happiness, 25.0),
                    (Need::Sleepiness, 10.0),
                ]),
                time_cost: 2.0,
                availability: always,
                cooldown_hours: 2.0,
            },
            // Bathroom
            InteractableObject {
                id: ObjectId::from("shower"),
                display_name: "Chuveiro",
                room: Room::Bathroom,
                action_kind: ActionKind::Shower,
                effects: deltas(&[
                    (Need::Cleanliness, 60.0),
                    (Need::Happiness, 20.0),
                    (Need::Energy, 10.0),
                    (Need::Sleepiness, -10.0),
                ]),
                time_cost: 1.0,
                availability: |s| s.needs.cleanliness < 80.0,
                cooldown_hours: 2.0,
            },
            InteractableObject {
                id: ObjectId::from("bathroom-sink"),
                display_name: "Pia",
                room: Room::Bathroom,
                action_kind: ActionKind::Shower,
                effects: deltas(&[
                    (Need::Cleanliness, 20.0),
                    (Need::Happiness, 5.0),
                    (Need::Thirst, -10.0),
                ]),
                time_cost: 1.0,
                availability: |s| s.needs.cleanliness < 90.0,
                cooldown_hours: 1.0,
            },
            InteractableObject {
                id: ObjectId::from("toilet"),
                display_name: "Vaso Sanitário",
                room: Room::Bathroom,
                action_kind: ActionKind::Shower,
                effects: deltas(&[(Need::Happiness, 10.0), (Need::Health, 5.0)]),
                time_cost: 1.0,
                availability: always,
                cooldown_hours: 2.0,
            },
            InteractableObject {
                id: ObjectId::from("skincare"),
                display_name: "Produtos de Beleza",
                room: Room::Bathroom,
                action_kind: ActionKind::Shower,
                effects: deltas(&[
                    (Need::Cleanliness, 30.0),
                    (Need::Happiness, 25.0),
                    (Need::Health, 10.0),
                ]),
                time_cost: 2.0,
                availability: always,
                cooldown_hours: 3.0,
            },
        ])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

const fn always(_: &GameState) -> bool {
    true
}

/// Expand `(need, amount)` pairs into deltas.
pub(crate) fn deltas(pairs: &[(Need, f64)]) -> Vec<NeedDelta> {
    pairs
        .iter()
        .map(|&(need, amount)| NeedDelta::new(need, amount))
        .collect()
}
