use arena_cards::Card;
use arena_core::Chips;
use arena_gameplay::ArenaGamePhase;
use arena_gameplay::MultiActionRecord;
use arena_gameplay::WinnerShare;

/// Lifecycle events a Table emits, per §4.6. Ordering guarantees (§5):
/// `HandStart` precedes all `PhaseChange` of that hand, which precede
/// all `PlayerTurn`/`PlayerAction` of that phase, which precede
/// `HandComplete`.
#[derive(Debug, Clone)]
pub enum Event {
    HandStart {
        hand_number: u64,
        dealer_seat_index: usize,
        stacks: Vec<Chips>,
    },
    PhaseChange {
        hand_number: u64,
        phase: ArenaGamePhase,
        community_cards: Vec<Card>,
    },
    PlayerTurn {
        hand_number: u64,
        seat_index: usize,
    },
    PlayerAction {
        hand_number: u64,
        record: MultiActionRecord,
    },
    HandComplete {
        hand_number: u64,
        winners: Vec<WinnerShare>,
    },
    WaitingForPlayers,
}
