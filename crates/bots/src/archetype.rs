use std::fmt;

use arena_gameplay::ArenaGamePhase;
use serde::Deserialize;
use serde::Serialize;

/// The five fixed bot archetypes, per §4.8. Drawn round-robin when the
/// orchestrator seats bots at a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Archetype {
    TightPassive,
    TightAggressive,
    LoosePassive,
    LooseAggressive,
    Random,
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Archetype::TightPassive => "TIGHT_PASSIVE",
            Archetype::TightAggressive => "TIGHT_AGGRESSIVE",
            Archetype::LoosePassive => "LOOSE_PASSIVE",
            Archetype::LooseAggressive => "LOOSE_AGGRESSIVE",
            Archetype::Random => "RANDOM",
        };
        write!(f, "{s}")
    }
}

pub const ALL_ARCHETYPES: [Archetype; 5] = [
    Archetype::TightPassive,
    Archetype::TightAggressive,
    Archetype::LoosePassive,
    Archetype::LooseAggressive,
    Archetype::Random,
];

impl Archetype {
    /// Round-robin archetype assignment for the `n`th bot seated.
    pub fn round_robin(index: usize) -> Archetype {
        ALL_ARCHETYPES[index % ALL_ARCHETYPES.len()]
    }

    /// Per-phase `{FOLD, CHECK, CALL, RAISE}` weight vector. Weights
    /// need not sum to any particular total; the decider normalises.
    pub fn weights(&self, phase: ArenaGamePhase) -> [f64; 4] {
        let is_preflop = phase == ArenaGamePhase::Preflop;
        match self {
            Archetype::TightPassive => {
                if is_preflop {
                    [50.0, 5.0, 40.0, 5.0]
                } else {
                    [30.0, 20.0, 45.0, 5.0]
                }
            }
            Archetype::TightAggressive => {
                if is_preflop {
                    [45.0, 5.0, 25.0, 25.0]
                } else {
                    [25.0, 15.0, 30.0, 30.0]
                }
            }
            Archetype::LoosePassive => {
                if is_preflop {
                    [10.0, 10.0, 70.0, 10.0]
                } else {
                    [10.0, 20.0, 60.0, 10.0]
                }
            }
            Archetype::LooseAggressive => {
                if is_preflop {
                    [10.0, 5.0, 40.0, 45.0]
                } else {
                    [10.0, 10.0, 30.0, 50.0]
                }
            }
            Archetype::Random => [25.0, 25.0, 25.0, 25.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_cycles_through_all_five() {
        let assigned: Vec<Archetype> = (0..10).map(Archetype::round_robin).collect();
        assert_eq!(assigned[0], assigned[5]);
        assert_eq!(assigned[4], Archetype::Random);
    }

    #[test]
    fn tight_passive_folds_more_preflop_than_loose_aggressive() {
        let tight = Archetype::TightPassive.weights(ArenaGamePhase::Preflop)[0];
        let loose = Archetype::LooseAggressive.weights(ArenaGamePhase::Preflop)[0];
        assert!(tight > loose);
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(Archetype::LooseAggressive.to_string(), "LOOSE_AGGRESSIVE");
    }
}
