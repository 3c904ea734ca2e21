use std::collections::HashMap;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use arena_cards::evaluate;
use arena_cards::Card;
use arena_cards::Deck;
use arena_core::ArenaError;
use arena_core::ArenaResult;
use arena_core::Chips;
use arena_gameplay::assign_positions;
use arena_gameplay::call_amount;
use arena_gameplay::first_to_act;
use arena_gameplay::is_hand_over_early;
use arena_gameplay::max_raise_amount;
use arena_gameplay::min_raise_amount;
use arena_gameplay::process_action as apply_betting_action;
use arena_gameplay::resolve_fold_win;
use arena_gameplay::resolve_showdown;
use arena_gameplay::round_complete;
use arena_gameplay::should_skip_to_showdown;
use arena_gameplay::street_reset;
use arena_gameplay::valid_actions;
use arena_gameplay::Action;
use arena_gameplay::ArenaGamePhase;
use arena_gameplay::BettingState;
use arena_gameplay::MultiActionRecord;
use arena_gameplay::PlayerView;
use arena_gameplay::Position;
use arena_gameplay::PublicSeat;
use arena_gameplay::Seat;
use arena_gameplay::SeatStatus;
use arena_gameplay::SidePot;
use arena_gameplay::TableConfig;
use arena_gameplay::WinnerShare;
use rand::seq::IteratorRandom;
use rand::rng;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::Event;
use crate::state::TableState;
use crate::timer::TurnTimer;

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// The Table state machine (C7). Owns every seat exclusively; helpers
/// in `arena-gameplay` receive plain slices and return deltas applied
/// here, so there is exactly one mutator of the seat vector.
pub struct Table {
    config: TableConfig,
    seats: Vec<Seat>,
    dealer_button_index: Option<usize>,
    phase: ArenaGamePhase,
    community_cards: Vec<Card>,
    pending_flop: Vec<Card>,
    pending_turn: Vec<Card>,
    pending_river: Vec<Card>,
    pots: Vec<SidePot>,
    betting: BettingState,
    active_player_index: Option<usize>,
    hand_number: u64,
    action_history: Vec<MultiActionRecord>,
    timer: TurnTimer,
    subscribers: Vec<UnboundedSender<Event>>,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        let n = config.max_players;
        let timer = TurnTimer::new(config.action_timeout_ms);
        Self {
            seats: (0..n).map(|_| Seat::empty()).collect(),
            betting: BettingState::new_street(config.big_blind),
            dealer_button_index: None,
            phase: ArenaGamePhase::Waiting,
            community_cards: Vec::new(),
            pending_flop: Vec::new(),
            pending_turn: Vec::new(),
            pending_river: Vec::new(),
            pots: Vec::new(),
            active_player_index: None,
            hand_number: 0,
            action_history: Vec::new(),
            timer,
            subscribers: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn phase(&self) -> ArenaGamePhase {
        self.phase
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<Event> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: Event) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    // ----- Seating -----

    pub fn seat_player(&mut self, player_id: &str, player_name: &str) -> ArenaResult<usize> {
        if let Some(idx) = self.seat_index_for_player(player_id) {
            return Ok(idx);
        }
        let idx = self
            .seats
            .iter()
            .position(|s| s.is_empty())
            .ok_or_else(|| ArenaError::validation("table is full"))?;
        self.seats[idx] = Seat {
            status: SeatStatus::Waiting,
            player_id: Some(player_id.to_string()),
            player_name: Some(player_name.to_string()),
            stack: self.config.starting_stack,
            position: None,
            hole_cards: Vec::new(),
            bet_this_round: 0,
            bet_this_hand: 0,
            has_acted: false,
        };
        Ok(idx)
    }

    pub fn remove_player(&mut self, player_id: &str) -> ArenaResult<()> {
        let idx = self
            .seat_index_for_player(player_id)
            .ok_or_else(|| ArenaError::validation("unknown player"))?;
        if self.phase.is_betting_phase() || self.phase == ArenaGamePhase::Showdown {
            self.seats[idx].status = SeatStatus::Folded;
        } else {
            self.seats[idx] = Seat::empty();
        }
        Ok(())
    }

    fn seat_index_for_player(&self, player_id: &str) -> Option<usize> {
        self.seats
            .iter()
            .position(|s| s.player_id.as_deref() == Some(player_id))
    }

    // ----- Hand lifecycle -----

    pub fn can_start_hand(&self) -> bool {
        let eligible = self
            .seats
            .iter()
            .filter(|s| !s.is_empty() && s.stack > 0)
            .count();
        eligible >= 2 && matches!(self.phase, ArenaGamePhase::Waiting | ArenaGamePhase::Complete)
    }

    pub fn deal_new_hand(&mut self) -> ArenaResult<()> {
        if !self.can_start_hand() {
            return Err(ArenaError::validation("table cannot start a hand"));
        }

        self.hand_number += 1;
        self.phase = ArenaGamePhase::Preflop;
        self.community_cards.clear();
        self.pots.clear();
        self.action_history.clear();
        self.betting = BettingState::new_street(self.config.big_blind);

        for seat in self.seats.iter_mut() {
            if seat.is_empty() {
                continue;
            }
            seat.reset_for_new_hand();
            seat.status = if seat.stack > 0 {
                SeatStatus::Active
            } else {
                SeatStatus::SittingOut
            };
        }

        self.rotate_dealer_button()?;
        let dealer = self.dealer_button_index.unwrap();
        let deal_order = self.active_order_from(dealer);
        let position_order = self.active_order_from_inclusive(dealer);
        for (seat_index, position) in assign_positions(&position_order) {
            self.seats[seat_index].position = Some(position);
        }

        self.deal_hole_cards(&deal_order);
        self.post_blinds()?;

        let bb_index = self.position_index(Position::Bb);
        self.active_player_index = first_to_act(&self.seats, dealer, bb_index, true);

        self.emit(Event::HandStart {
            hand_number: self.hand_number,
            dealer_seat_index: dealer,
            stacks: self.seats.iter().map(|s| s.stack).collect(),
        });
        self.emit(Event::PhaseChange {
            hand_number: self.hand_number,
            phase: self.phase,
            community_cards: self.community_cards.clone(),
        });
        self.announce_turn();
        Ok(())
    }

    fn rotate_dealer_button(&mut self) -> ArenaResult<()> {
        let active: Vec<usize> = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_active())
            .map(|(i, _)| i)
            .collect();
        if active.is_empty() {
            return Err(ArenaError::invariant("no active seats to deal to"));
        }
        self.dealer_button_index = Some(match self.dealer_button_index {
            None => *active.iter().choose(&mut rng()).unwrap(),
            Some(prev) => self.next_active_after(prev, &active),
        });
        Ok(())
    }

    fn next_active_after(&self, from: usize, active: &[usize]) -> usize {
        let n = self.seats.len();
        for offset in 1..=n {
            let idx = (from + offset) % n;
            if active.contains(&idx) {
                return idx;
            }
        }
        from
    }

    /// Active seat indices in clockwise order, starting at the seat
    /// after `start`.
    fn active_order_from(&self, start: usize) -> Vec<usize> {
        let n = self.seats.len();
        (1..=n)
            .map(|offset| (start + offset) % n)
            .filter(|&i| self.seats[i].is_active())
            .collect()
    }

    /// Active seat indices in clockwise order, starting at `start`
    /// itself. Used for position assignment, which labels the dealer
    /// button seat as `Position::Btn` rather than skipping past it.
    fn active_order_from_inclusive(&self, start: usize) -> Vec<usize> {
        let n = self.seats.len();
        (0..n)
            .map(|offset| (start + offset) % n)
            .filter(|&i| self.seats[i].is_active())
            .collect()
    }

    fn position_index(&self, position: Position) -> Option<usize> {
        self.seats
            .iter()
            .position(|s| s.position == Some(position))
    }

    fn deal_hole_cards(&mut self, order: &[usize]) {
        let mut deck = Deck::new();
        deck.shuffle();
        for _ in 0..2 {
            for &idx in order {
                if let Some(card) = deck.deal_one() {
                    self.seats[idx].hole_cards.push(card);
                }
            }
        }
        self.pending_flop = {
            deck.deal_one();
            deck.deal(3)
        };
        self.pending_turn = {
            deck.deal_one();
            deck.deal(1)
        };
        self.pending_river = {
            deck.deal_one();
            deck.deal(1)
        };
    }

    fn post_blinds(&mut self) -> ArenaResult<()> {
        let active_count = self.seats.iter().filter(|s| s.is_active()).count();
        let (sb_idx, bb_idx) = if active_count == 2 {
            let btn = self.position_index(Position::Btn).unwrap();
            let bb = self.position_index(Position::Bb).unwrap();
            (btn, bb)
        } else {
            let sb = self
                .position_index(Position::Sb)
                .ok_or_else(|| ArenaError::invariant("no small blind seat"))?;
            let bb = self
                .position_index(Position::Bb)
                .ok_or_else(|| ArenaError::invariant("no big blind seat"))?;
            (sb, bb)
        };
        self.seats[sb_idx].commit(self.config.small_blind);
        self.seats[bb_idx].commit(self.config.big_blind);
        self.betting.current_bet = self.config.big_blind;
        Ok(())
    }

    fn announce_turn(&mut self) {
        match self.active_player_index {
            Some(idx) => {
                let can_check = call_amount(&self.seats[idx], self.betting.current_bet) <= 0;
                self.timer.start(can_check);
                self.emit(Event::PlayerTurn {
                    hand_number: self.hand_number,
                    seat_index: idx,
                });
            }
            None => self.emit(Event::WaitingForPlayers),
        }
    }

    // ----- Action processing -----

    pub fn process_action(
        &mut self,
        player_id: &str,
        action: Action,
        amount: Chips,
    ) -> ArenaResult<()> {
        if !self.phase.is_betting_phase() {
            return Err(ArenaError::validation("table is not in a betting phase"));
        }
        let idx = self
            .seat_index_for_player(player_id)
            .ok_or_else(|| ArenaError::validation("unknown player"))?;
        if self.active_player_index != Some(idx) {
            return Err(ArenaError::validation("not this seat's turn"));
        }

        self.timer.cancel();
        apply_betting_action(&mut self.seats, idx, action, amount, &mut self.betting)?;

        let record = MultiActionRecord {
            player_id: player_id.to_string(),
            player_name: self.seats[idx].player_name.clone().unwrap_or_default(),
            action,
            amount,
            phase: self.phase,
            seat_index: idx,
            timestamp_ms: now_ms(),
        };
        self.action_history.push(record.clone());
        self.emit(Event::PlayerAction {
            hand_number: self.hand_number,
            record,
        });

        if is_hand_over_early(&self.seats) {
            self.resolve_fold_win()?;
        } else if round_complete(&self.seats, self.betting.current_bet) {
            self.advance_phase()?;
        } else {
            self.active_player_index = self.next_active_seat(idx);
            self.announce_turn();
        }
        Ok(())
    }

    /// Applies the default action on behalf of the seat whose timer
    /// has expired: CHECK if legal, else FOLD. Callers (the table
    /// manager's ticker) invoke this only once `timer.expired()`.
    pub fn apply_timeout(&mut self) -> ArenaResult<()> {
        let idx = self
            .active_player_index
            .ok_or_else(|| ArenaError::invariant("timer fired with no active seat"))?;
        let player_id = self.seats[idx]
            .player_id
            .clone()
            .ok_or_else(|| ArenaError::invariant("active seat has no player"))?;
        let action = if self.timer.can_check() {
            Action::Check
        } else {
            Action::Fold
        };
        self.process_action(&player_id, action, 0)
    }

    pub fn timer_deadline(&self) -> Option<tokio::time::Instant> {
        self.timer.deadline()
    }

    fn next_active_seat(&self, from: usize) -> Option<usize> {
        let n = self.seats.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&i| self.seats[i].is_active())
    }

    fn advance_phase(&mut self) -> ArenaResult<()> {
        self.recompute_side_pots();
        street_reset(&mut self.seats);

        if should_skip_to_showdown(&self.seats) {
            self.reveal_remaining();
            return self.run_showdown();
        }

        loop {
            match self.phase.next_betting_phase() {
                Some(ArenaGamePhase::Flop) => {
                    let cards = std::mem::take(&mut self.pending_flop);
                    self.community_cards.extend(cards);
                    self.phase = ArenaGamePhase::Flop;
                }
                Some(ArenaGamePhase::Turn) => {
                    let cards = std::mem::take(&mut self.pending_turn);
                    self.community_cards.extend(cards);
                    self.phase = ArenaGamePhase::Turn;
                }
                Some(ArenaGamePhase::River) => {
                    let cards = std::mem::take(&mut self.pending_river);
                    self.community_cards.extend(cards);
                    self.phase = ArenaGamePhase::River;
                }
                Some(ArenaGamePhase::Showdown) | None => {
                    return self.run_showdown();
                }
                Some(_) => unreachable!("next_betting_phase only yields betting phases or showdown"),
            }

            self.emit(Event::PhaseChange {
                hand_number: self.hand_number,
                phase: self.phase,
                community_cards: self.community_cards.clone(),
            });

            let dealer = self
                .dealer_button_index
                .ok_or_else(|| ArenaError::invariant("no dealer button set"))?;
            self.active_player_index = first_to_act(&self.seats, dealer, None, false);
            if self.active_player_index.is_some() {
                self.announce_turn();
                return Ok(());
            }
            // No seat can act at this street; loop to the next phase.
        }
    }

    fn reveal_remaining(&mut self) {
        for cards in [
            std::mem::take(&mut self.pending_flop),
            std::mem::take(&mut self.pending_turn),
            std::mem::take(&mut self.pending_river),
        ] {
            self.community_cards.extend(cards);
        }
    }

    fn recompute_side_pots(&mut self) {
        let contributions: Vec<(String, Chips, SeatStatus)> = self
            .seats
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| {
                (
                    s.player_id.clone().unwrap_or_default(),
                    s.bet_this_hand,
                    s.status,
                )
            })
            .collect();
        self.pots = arena_gameplay::compute_side_pots(&contributions);
    }

    fn resolve_fold_win(&mut self) -> ArenaResult<()> {
        self.recompute_side_pots();
        let sole = self
            .seats
            .iter()
            .find(|s| s.is_live())
            .and_then(|s| s.player_id.clone())
            .ok_or_else(|| ArenaError::invariant("fold-win with no live seat"))?;
        let winners = resolve_fold_win(&sole, &self.pots);
        self.complete_hand(winners)
    }

    fn run_showdown(&mut self) -> ArenaResult<()> {
        self.phase = ArenaGamePhase::Showdown;
        let mut evaluations = HashMap::new();
        let mut seat_order = Vec::new();
        for seat in self.seats.iter() {
            if seat.is_live() && seat.hole_cards.len() == 2 {
                if let Some(player_id) = &seat.player_id {
                    let mut cards = seat.hole_cards.clone();
                    cards.extend_from_slice(&self.community_cards);
                    evaluations.insert(player_id.clone(), evaluate(&cards));
                    seat_order.push(player_id.clone());
                }
            }
        }
        let winners = resolve_showdown(&self.pots, &evaluations, &seat_order);
        self.complete_hand(winners)
    }

    fn complete_hand(&mut self, winners: Vec<WinnerShare>) -> ArenaResult<()> {
        for winner in &winners {
            if let Some(idx) = self.seat_index_for_player(&winner.player_id) {
                self.seats[idx].stack += winner.amount;
            }
        }
        self.phase = ArenaGamePhase::Complete;
        self.active_player_index = None;
        self.timer.cancel();
        for seat in self.seats.iter_mut() {
            if seat.is_empty() {
                continue;
            }
            seat.status = if seat.stack <= 0 {
                SeatStatus::SittingOut
            } else {
                SeatStatus::Waiting
            };
        }
        self.emit(Event::HandComplete {
            hand_number: self.hand_number,
            winners,
        });
        Ok(())
    }

    // ----- Projections -----

    pub fn snapshot(&self) -> TableState {
        TableState {
            config: self.config.clone(),
            seats: self.seats.clone(),
            dealer_button_index: self.dealer_button_index,
            phase: self.phase,
            community_cards: self.community_cards.clone(),
            pots: self.pots.clone(),
            current_bet: self.betting.current_bet,
            min_raise: self.betting.min_raise,
            active_player_index: self.active_player_index,
            hand_number: self.hand_number,
            action_history: self.action_history.clone(),
        }
    }

    pub fn player_view(&self, player_id: &str) -> ArenaResult<PlayerView> {
        let hero_idx = self
            .seat_index_for_player(player_id)
            .ok_or_else(|| ArenaError::validation("unknown player"))?;

        let public_seats = self
            .seats
            .iter()
            .enumerate()
            .map(|(i, s)| PublicSeat {
                seat_index: i,
                player_id: s.player_id.clone(),
                player_name: s.player_name.clone(),
                stack: s.stack,
                position: s.position,
                bet_this_round: s.bet_this_round,
                bet_this_hand: s.bet_this_hand,
                hole_cards: if i == hero_idx && !s.hole_cards.is_empty() {
                    Some(s.hole_cards.clone())
                } else {
                    None
                },
            })
            .collect();

        let hero = &self.seats[hero_idx];
        let valid = if self.active_player_index == Some(hero_idx) && self.phase.is_betting_phase() {
            valid_actions(hero, self.betting.current_bet)
        } else {
            Vec::new()
        };

        Ok(PlayerView {
            table_id: self.config.table_id.clone(),
            hand_number: self.hand_number,
            phase: self.phase,
            community_cards: self.community_cards.clone(),
            seats: public_seats,
            hero_seat_index: hero_idx,
            current_bet: self.betting.current_bet,
            pot_total: self.pots.iter().map(|p| p.amount).sum::<Chips>()
                + self.seats.iter().map(|s| s.bet_this_round).sum::<Chips>(),
            valid_actions: valid,
            call_amount: call_amount(hero, self.betting.current_bet),
            min_raise_amount: min_raise_amount(&self.betting),
            max_raise_amount: max_raise_amount(hero),
        })
    }
}
