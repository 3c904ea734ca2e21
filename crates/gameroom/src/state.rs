use arena_cards::Card;
use arena_gameplay::ArenaGamePhase;
use arena_gameplay::MultiActionRecord;
use arena_gameplay::Seat;
use arena_gameplay::SidePot;
use arena_gameplay::TableConfig;

/// A deep-copy snapshot of a Table's internal state, per §3. Other
/// components read the table through this (or `PlayerView`), never
/// through a live reference, per the "shared mutable graphs" design
/// note (§9): the Table is the exclusive owner of its seats.
#[derive(Debug, Clone)]
pub struct TableState {
    pub config: TableConfig,
    pub seats: Vec<Seat>,
    pub dealer_button_index: Option<usize>,
    pub phase: ArenaGamePhase,
    pub community_cards: Vec<Card>,
    pub pots: Vec<SidePot>,
    pub current_bet: i64,
    pub min_raise: i64,
    pub active_player_index: Option<usize>,
    pub hand_number: u64,
    pub action_history: Vec<MultiActionRecord>,
}
