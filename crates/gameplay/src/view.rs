use arena_cards::Card;
use arena_core::Chips;
use serde::Deserialize;
use serde::Serialize;

use crate::action::Action;
use crate::phase::ArenaGamePhase;
use crate::position::Position;

/// Per-seat public projection, with opponents' hole cards hidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicSeat {
    pub seat_index: usize,
    pub player_id: Option<String>,
    pub player_name: Option<String>,
    pub stack: Chips,
    pub position: Option<Position>,
    pub bet_this_round: Chips,
    pub bet_this_hand: Chips,
    /// Only populated for the hero's own seat, or at showdown reveal.
    pub hole_cards: Option<Vec<Card>>,
}

/// Per-player projection of `TableState`, per §3: strips private
/// internal fields and exposes only what that seat may legally see,
/// plus the precomputed action envelope (§4.7 decision validation
/// reads straight off these fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub table_id: String,
    pub hand_number: u64,
    pub phase: ArenaGamePhase,
    pub community_cards: Vec<Card>,
    pub seats: Vec<PublicSeat>,
    pub hero_seat_index: usize,
    pub current_bet: Chips,
    pub pot_total: Chips,
    pub valid_actions: Vec<Action>,
    pub call_amount: Chips,
    pub min_raise_amount: Chips,
    pub max_raise_amount: Chips,
}
