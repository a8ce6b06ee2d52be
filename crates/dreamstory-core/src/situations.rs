//! Special situations: conditional, probabilistic bonus events.
//!
//! After passive decay, every tick walks the registry in order. A situation
//! whose condition holds fires with its own independent chance, applies its
//! effects and is logged to the special-event history. Later situations see
//! the state left by earlier ones in the same tick.

use dreamstory_types::{GameState, Need, NeedDelta, Room, SituationId};
use rand::Rng;
use tracing::debug;

use crate::catalog::deltas;
use crate::tick::roll;

/// Pure predicate deciding whether a situation may fire.
pub type Condition = fn(&GameState) -> bool;

/// One registry entry.
#[derive(Debug, Clone)]
pub struct SpecialSituation {
    /// Registry key.
    pub id: SituationId,
    /// Title shown to the player.
    pub display_name: &'static str,
    /// Flavor text shown to the player.
    pub description: &'static str,
    /// State predicate gating the roll.
    pub condition: Condition,
    /// Need deltas applied when it fires.
    pub effects: Vec<NeedDelta>,
    /// Probability of firing when the condition holds.
    pub chance: f64,
}

impl SpecialSituation {
    /// Special-event history label, `"<name>: <description>"`.
    pub fn event_label(&self) -> String {
        format!("{}: {}", self.display_name, self.description)
    }
}

/// Immutable, ordered list of special situations.
#[derive(Debug, Clone)]
pub struct SituationRegistry {
    situations: Vec<SpecialSituation>,
}

impl SituationRegistry {
    /// Build a registry from explicit entries. Order is evaluation order.
    pub const fn new(situations: Vec<SpecialSituation>) -> Self {
        Self { situations }
    }

    /// Every situation, in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &SpecialSituation> {
        self.situations.iter()
    }

    /// Look up a situation by key.
    pub fn get(&self, id: &SituationId) -> Option<&SpecialSituation> {
        self.situations.iter().find(|s| &s.id == id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.situations.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.situations.is_empty()
    }

    /// Roll every situation against `state`, applying the ones that fire.
    ///
    /// The chance is only drawn for situations whose condition holds.
    /// Returns the ids that fired, in evaluation order.
    pub fn evaluate<R: Rng>(&self, state: &mut GameState, rng: &mut R) -> Vec<SituationId> {
        let mut fired = Vec::new();
        for situation in &self.situations {
            if !(situation.condition)(state) || !roll(rng, situation.chance) {
                continue;
            }
            state.needs.apply(&situation.effects);
            state.history.record_event(situation.event_label());
            debug!(situation = %situation.id, "Special situation fired");
            fired.push(situation.id.clone());
        }
        fired
    }

    /// The ten standard situations, all sharing `chance`.
    #[allow(clippy::too_many_lines)]
    pub fn standard(chance: f64) -> Self {
        Self::new(vec![
            SpecialSituation {
                id: SituationId::from("perfect_morning"),
                display_name: "🌅 Manhã Perfeita",
                description: "Você acordou naturalmente e se sente revigorado!",
                condition: |s| {
                    (6.0..=8.0).contains(&s.time)
                        && s.needs.energy > 70.0
                        && s.needs.sleepiness < 20.0
                },
                effects: deltas(&[
                    (Need::Happiness, 30.0),
                    (Need::Energy, 20.0),
                    (Need::Health, 15.0),
                ]),
                chance,
            },
            SpecialSituation {
                id: SituationId::from("workout_motivation"),
                display_name: "💪 Motivação Total",
                description: "Você está se sentindo super motivado para se exercitar!",
                condition: |s| {
                    s.current_room == Room::Gym && s.needs.energy > 50.0 && s.needs.health > 60.0
                },
                effects: deltas(&[
                    (Need::Happiness, 25.0),
                    (Need::Energy, 15.0),
                    (Need::Health, 20.0),
                ]),
                chance,
            },
            SpecialSituation {
                id: SituationId::from("cooking_inspiration"),
                display_name: "👨‍🍳 Inspiração Culinária",
                description: "Você teve uma ideia incrível para uma receita deliciosa!",
                condition: |s| {
                    s.current_room == Room::Kitchen
                        && s.needs.hunger > 40.0
                        && s.needs.happiness > 50.0
                },
                effects: deltas(&[
                    (Need::Happiness, 35.0),
                    (Need::Hunger, -30.0),
                    (Need::Energy, 10.0),
                ]),
                chance,
            },
            SpecialSituation {
                id: SituationId::from("relaxing_bath"),
                display_name: "🛁 Banho Relaxante",
                description: "Este banho está sendo extremamente relaxante e revigorante!",
                condition: |s| {
                    s.current_room == Room::Bathroom
                        && s.needs.cleanliness < 60.0
                        && s.needs.energy < 50.0
                },
                effects: deltas(&[
                    (Need::Cleanliness, 40.0),
                    (Need::Happiness, 30.0),
                    (Need::Energy, 25.0),
                ]),
                chance,
            },
            SpecialSituation {
                id: SituationId::from("gaming_flow"),
                display_name: "🎮 Estado de Flow",
                description: "Você entrou em um estado de flow incrível jogando!",
                condition: |s| {
                    s.current_room == Room::Living
                        && s.needs.happiness > 60.0
                        && s.needs.energy > 40.0
                },
                effects: deltas(&[
                    (Need::Happiness, 40.0),
                    (Need::Energy, -5.0),
                    (Need::Sleepiness, -10.0),
                ]),
                chance,
            },
            SpecialSituation {
                id: SituationId::from("power_nap"),
                display_name: "😴 Cochilo Perfeito",
                description: "Um cochilo rápido que te deixou completamente renovado!",
                condition: |s| {
                    s.current_room == Room::Bedroom
                        && s.needs.sleepiness > 30.0
                        && (13.0..=16.0).contains(&s.time)
                },
                effects: deltas(&[
                    (Need::Energy, 30.0),
                    (Need::Sleepiness, -25.0),
                    (Need::Happiness, 15.0),
                ]),
                chance,
            },
            SpecialSituation {
                id: SituationId::from("hydration_boost"),
                display_name: "💧 Hidratação Perfeita",
                description: "Você se sente perfeitamente hidratado e energizado!",
                condition: |s| s.needs.thirst < 30.0 && s.needs.health > 70.0,
                effects: deltas(&[
                    (Need::Thirst, -40.0),
                    (Need::Energy, 20.0),
                    (Need::Health, 15.0),
                ]),
                chance,
            },
            SpecialSituation {
                id: SituationId::from("social_energy"),
                display_name: "📱 Energia Social",
                description: "Uma conversa online te deixou super animado!",
                condition: |s| {
                    s.current_room == Room::Bedroom
                        && s.needs.happiness < 50.0
                        && s.needs.energy > 30.0
                },
                effects: deltas(&[
                    (Need::Happiness, 35.0),
                    (Need::Energy, 10.0),
                    (Need::Sleepiness, -5.0),
                ]),
                chance,
            },
            SpecialSituation {
                id: SituationId::from("midnight_snack"),
                display_name: "🌙 Lanche da Madrugada",
                description: "Um lanche noturno que satisfez perfeitamente sua fome!",
                condition: |s| {
                    (s.time >= 22.0 || s.time <= 2.0)
                        && s.needs.hunger > 50.0
                        && s.current_room == Room::Kitchen
                },
                effects: deltas(&[
                    (Need::Hunger, -40.0),
                    (Need::Happiness, 25.0),
                    (Need::Sleepiness, 15.0),
                ]),
                chance,
            },
            SpecialSituation {
                id: SituationId::from("morning_stretch"),
                display_name: "🧘‍♂️ Alongamento Matinal",
                description: "Um alongamento matinal que despertou todo seu corpo!",
                condition: |s| {
                    (6.0..=9.0).contains(&s.time)
                        && s.current_room == Room::Gym
                        && s.needs.energy < 60.0
                },
                effects: deltas(&[
                    (Need::Energy, 25.0),
                    (Need::Health, 20.0),
                    (Need::Happiness, 20.0),
                    (Need::Sleepiness, -15.0),
                ]),
                chance,
            },
        ])
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn condition_of(registry: &SituationRegistry, id: &str) -> Condition {
        registry.get(&SituationId::from(id)).unwrap().condition
    }

    #[test]
    fn standard_registry_order() {
        let registry = SituationRegistry::standard(0.3);
        let ids: Vec<&str> = registry.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "perfect_morning",
                "workout_motivation",
                "cooking_inspiration",
                "relaxing_bath",
                "gaming_flow",
                "power_nap",
                "hydration_boost",
                "social_energy",
                "midnight_snack",
                "morning_stretch",
            ]
        );
        assert!(registry.iter().all(|s| s.chance == 0.3));
    }

    #[test]
    fn midnight_snack_requires_the_kitchen_at_any_late_hour() {
        let registry = SituationRegistry::standard(0.3);
        let snack = condition_of(&registry, "midnight_snack");

        let mut state = GameState {
            time: 23.0,
            current_room: Room::Kitchen,
            ..GameState::default()
        };
        state.needs.hunger = 70.0;
        assert!(snack(&state));

        state.time = 1.0;
        assert!(snack(&state));

        state.current_room = Room::Bedroom;
        assert!(!snack(&state));

        state.current_room = Room::Kitchen;
        state.time = 12.0;
        assert!(!snack(&state));
    }

    fn at(room: Room, time: f64, needs: &[(Need, f64)]) -> GameState {
        let mut state = GameState {
            current_room: room,
            time,
            ..GameState::default()
        };
        for &(need, value) in needs {
            state.needs.set(need, value);
        }
        state
    }

    #[test]
    fn conditions_hold_inside_their_bounds_and_fail_just_outside() {
        use dreamstory_types::Need::{Cleanliness, Energy, Happiness, Sleepiness};
        use dreamstory_types::Room::{Bathroom, Bedroom, Gym, Kitchen};

        let registry = SituationRegistry::standard(0.3);
        let rested = [(Energy, 80.0), (Sleepiness, 10.0)];
        let cases: Vec<(&str, GameState, GameState)> = vec![
            (
                "perfect_morning",
                at(Bedroom, 8.0, &rested),
                at(Bedroom, 8.5, &rested),
            ),
            (
                "perfect_morning",
                at(Bedroom, 6.0, &rested),
                at(Bedroom, 6.0, &[(Energy, 70.0), (Sleepiness, 10.0)]),
            ),
            (
                "workout_motivation",
                at(Gym, 12.0, &[]),
                at(Gym, 12.0, &[(Energy, 50.0)]),
            ),
            (
                "cooking_inspiration",
                at(Kitchen, 12.0, &[]),
                at(Kitchen, 12.0, &[(Happiness, 50.0)]),
            ),
            (
                "relaxing_bath",
                at(Bathroom, 12.0, &[(Cleanliness, 59.0), (Energy, 49.0)]),
                at(Bathroom, 12.0, &[(Cleanliness, 60.0), (Energy, 49.0)]),
            ),
            (
                "power_nap",
                at(Bedroom, 16.0, &[(Sleepiness, 31.0)]),
                at(Bedroom, 16.5, &[(Sleepiness, 31.0)]),
            ),
            (
                "power_nap",
                at(Bedroom, 13.0, &[(Sleepiness, 31.0)]),
                at(Bedroom, 13.0, &[(Sleepiness, 30.0)]),
            ),
            (
                "morning_stretch",
                at(Gym, 9.0, &[(Energy, 59.0)]),
                at(Gym, 9.5, &[(Energy, 59.0)]),
            ),
            (
                "morning_stretch",
                at(Gym, 6.0, &[(Energy, 59.0)]),
                at(Gym, 5.5, &[(Energy, 59.0)]),
            ),
        ];

        for (id, holds, fails) in &cases {
            let condition = condition_of(&registry, id);
            assert!(condition(holds), "{id} should hold for {holds:?}");
            assert!(!condition(fails), "{id} should fail for {fails:?}");
        }
    }

    #[test]
    fn certain_chance_fires_every_matching_situation() {
        let registry = SituationRegistry::standard(1.0);
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = GameState {
            current_room: Room::Living,
            ..GameState::default()
        };

        let fired = registry.evaluate(&mut state, &mut rng);
        let ids: Vec<&str> = fired.iter().map(SituationId::as_str).collect();
        // Default happiness 70 and energy 80 satisfy the flow state only.
        assert_eq!(ids, vec!["gaming_flow"]);
        assert_eq!(state.needs.happiness, 100.0);
        assert_eq!(state.needs.energy, 75.0);
        assert_eq!(state.needs.sleepiness, 20.0);
        assert_eq!(
            state.history.special_events,
            vec!["🎮 Estado de Flow: Você entrou em um estado de flow incrível jogando!"]
        );
    }

    #[test]
    fn later_situations_see_earlier_effects() {
        let registry = SituationRegistry::standard(1.0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = GameState {
            current_room: Room::Bedroom,
            ..GameState::default()
        };
        state.needs.happiness = 40.0;
        state.needs.thirst = 10.0;
        // Too tired for social energy until hydration adds 20.
        state.needs.energy = 25.0;

        let fired = registry.evaluate(&mut state, &mut rng);
        let ids: Vec<&str> = fired.iter().map(SituationId::as_str).collect();
        assert_eq!(ids, vec!["hydration_boost", "social_energy"]);
        // Most recent first.
        let newest = state.history.special_events.first().unwrap();
        assert!(newest.starts_with("📱"));
        assert_eq!(state.needs.energy, 55.0);
    }

    #[test]
    fn zero_chance_never_fires() {
        let registry = SituationRegistry::standard(0.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = GameState {
            current_room: Room::Living,
            ..GameState::default()
        };
        let before = state.clone();
        for _ in 0..100 {
            assert!(registry.evaluate(&mut state, &mut rng).is_empty());
        }
        assert_eq!(state, before);
    }
}
