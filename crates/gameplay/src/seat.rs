use arena_cards::Card;
use arena_core::Chips;
use serde::Deserialize;
use serde::Serialize;

use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    Empty,
    Waiting,
    Active,
    Folded,
    AllIn,
    SittingOut,
}

/// One seat at a table. `stack`, `bet_this_round`, and `bet_this_hand`
/// are the quantities the chip-conservation invariant is stated over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub status: SeatStatus,
    pub player_id: Option<String>,
    pub player_name: Option<String>,
    pub stack: Chips,
    pub position: Option<Position>,
    pub hole_cards: Vec<Card>,
    pub bet_this_round: Chips,
    pub bet_this_hand: Chips,
    pub has_acted: bool,
}

impl Seat {
    pub fn empty() -> Self {
        Self {
            status: SeatStatus::Empty,
            player_id: None,
            player_name: None,
            stack: 0,
            position: None,
            hole_cards: Vec::new(),
            bet_this_round: 0,
            bet_this_hand: 0,
            has_acted: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status == SeatStatus::Empty
    }

    /// Active in the `spec.md` sense: eligible to receive a turn this
    /// street (not folded, not all-in, not sitting out, not empty).
    pub fn is_active(&self) -> bool {
        self.status == SeatStatus::Active
    }

    /// Still live in the hand: dealt in and hasn't folded.
    pub fn is_live(&self) -> bool {
        matches!(self.status, SeatStatus::Active | SeatStatus::AllIn)
    }

    /// Resets the per-hand fields in place ahead of a new deal, leaving
    /// `stack`/`player_id`/`player_name` untouched.
    pub fn reset_for_new_hand(&mut self) {
        self.hole_cards.clear();
        self.bet_this_round = 0;
        self.bet_this_hand = 0;
        self.has_acted = false;
        self.position = None;
    }

    /// Resets only the per-street fields, per the street-reset rule in
    /// §4.2: zeroes `bet_this_round` and `has_acted` on ACTIVE/ALL_IN
    /// seats.
    pub fn reset_for_new_street(&mut self) {
        if matches!(self.status, SeatStatus::Active | SeatStatus::AllIn) {
            self.bet_this_round = 0;
            self.has_acted = false;
        }
    }

    /// Moves `amount` (clamped to the remaining stack) into the seat's
    /// bet totals, flipping to ALL_IN if the stack is exhausted.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let posted = amount.min(self.stack);
        self.stack -= posted;
        self.bet_this_round += posted;
        self.bet_this_hand += posted;
        if self.stack == 0 {
            self.status = SeatStatus::AllIn;
        }
        posted
    }
}
