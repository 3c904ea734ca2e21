use serde::Deserialize;
use serde::Serialize;

/// The hand lifecycle: `WAITING -> PREFLOP -> FLOP -> TURN -> RIVER ->
/// SHOWDOWN -> COMPLETE -> WAITING ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaGamePhase {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Complete,
}

impl ArenaGamePhase {
    pub fn is_betting_phase(&self) -> bool {
        matches!(
            self,
            ArenaGamePhase::Preflop | ArenaGamePhase::Flop | ArenaGamePhase::Turn | ArenaGamePhase::River
        )
    }

    /// Number of community cards visible once this phase is reached.
    pub fn community_card_count(&self) -> usize {
        match self {
            ArenaGamePhase::Waiting | ArenaGamePhase::Preflop | ArenaGamePhase::Complete => 0,
            ArenaGamePhase::Flop => 3,
            ArenaGamePhase::Turn => 4,
            ArenaGamePhase::River | ArenaGamePhase::Showdown => 5,
        }
    }

    pub fn next_betting_phase(&self) -> Option<ArenaGamePhase> {
        match self {
            ArenaGamePhase::Preflop => Some(ArenaGamePhase::Flop),
            ArenaGamePhase::Flop => Some(ArenaGamePhase::Turn),
            ArenaGamePhase::Turn => Some(ArenaGamePhase::River),
            ArenaGamePhase::River => Some(ArenaGamePhase::Showdown),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn community_card_counts_match_phase() {
        assert_eq!(ArenaGamePhase::Preflop.community_card_count(), 0);
        assert_eq!(ArenaGamePhase::Flop.community_card_count(), 3);
        assert_eq!(ArenaGamePhase::Turn.community_card_count(), 4);
        assert_eq!(ArenaGamePhase::River.community_card_count(), 5);
    }

    #[test]
    fn betting_phase_chain_terminates_at_showdown() {
        let mut phase = ArenaGamePhase::Preflop;
        let mut seen = vec![phase];
        while let Some(next) = phase.next_betting_phase() {
            seen.push(next);
            phase = next;
        }
        assert_eq!(
            seen,
            vec![
                ArenaGamePhase::Preflop,
                ArenaGamePhase::Flop,
                ArenaGamePhase::Turn,
                ArenaGamePhase::River,
                ArenaGamePhase::Showdown,
            ]
        );
    }
}
