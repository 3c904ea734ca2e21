use arena_core::ArenaError;
use arena_core::ArenaResult;
use arena_core::Chips;

use crate::action::Action;
use crate::seat::Seat;
use crate::seat::SeatStatus;

/// The two numbers the betting round tracks outside the seats
/// themselves: the current bet to match, and the minimum raise
/// increment, which only ever grows within a street and resets to the
/// big blind at the next street.
#[derive(Debug, Clone, Copy)]
pub struct BettingState {
    pub current_bet: Chips,
    pub min_raise: Chips,
}

impl BettingState {
    pub fn new_street(big_blind: Chips) -> Self {
        Self {
            current_bet: 0,
            min_raise: big_blind,
        }
    }
}

fn to_call(seat: &Seat, current_bet: Chips) -> Chips {
    current_bet - seat.bet_this_round
}

/// Valid actions for the seat whose turn it is, per §4.2.
pub fn valid_actions(seat: &Seat, current_bet: Chips) -> Vec<Action> {
    let to_call = to_call(seat, current_bet);
    let mut actions = vec![Action::Fold];
    if to_call <= 0 {
        actions.push(Action::Check);
        if seat.stack > 0 {
            actions.push(Action::Raise);
        }
    } else if to_call >= seat.stack {
        actions.push(Action::AllIn);
    } else {
        actions.push(Action::Call);
        if seat.stack > to_call {
            actions.push(Action::Raise);
        }
        actions.push(Action::AllIn);
    }
    actions
}

pub fn call_amount(seat: &Seat, current_bet: Chips) -> Chips {
    to_call(seat, current_bet).max(0).min(seat.stack)
}

pub fn min_raise_amount(state: &BettingState) -> Chips {
    state.current_bet + state.min_raise
}

pub fn max_raise_amount(seat: &Seat) -> Chips {
    seat.bet_this_round + seat.stack
}

/// Applies one action to `seats[idx]`, updating `state` in place and
/// clearing `has_acted` on the rest of the active seats when betting
/// reopens, per §4.2. Rejects an action not returned by
/// [`valid_actions`] without mutating anything.
pub fn process_action(
    seats: &mut [Seat],
    idx: usize,
    action: Action,
    amount: Chips,
    state: &mut BettingState,
) -> ArenaResult<()> {
    let legal = valid_actions(&seats[idx], state.current_bet);
    if !legal.contains(&action) {
        return Err(ArenaError::validation(format!(
            "{action} is not legal for seat {idx}"
        )));
    }

    match action {
        Action::Fold => {
            seats[idx].status = SeatStatus::Folded;
            seats[idx].has_acted = true;
        }
        Action::Check => {
            seats[idx].has_acted = true;
        }
        Action::Call => {
            let call = call_amount(&seats[idx], state.current_bet);
            seats[idx].commit(call);
            seats[idx].has_acted = true;
        }
        Action::Raise => {
            let target = amount
                .max(min_raise_amount(state))
                .min(max_raise_amount(&seats[idx]));
            let increment = target - state.current_bet;
            let delta = target - seats[idx].bet_this_round;
            seats[idx].commit(delta);
            if increment >= state.min_raise {
                state.min_raise = increment;
            }
            state.current_bet = target;
            seats[idx].has_acted = true;
            reopen_betting(seats, idx);
        }
        Action::AllIn => {
            let delta = seats[idx].stack;
            seats[idx].commit(delta);
            let new_total = seats[idx].bet_this_round;
            if new_total > state.current_bet {
                let increment = new_total - state.current_bet;
                let reopens = increment >= state.min_raise;
                state.current_bet = new_total;
                if reopens {
                    state.min_raise = increment;
                    reopen_betting(seats, idx);
                }
            }
            seats[idx].has_acted = true;
        }
    }
    Ok(())
}

fn reopen_betting(seats: &mut [Seat], except: usize) {
    for (i, seat) in seats.iter_mut().enumerate() {
        if i != except && seat.status == SeatStatus::Active {
            seat.has_acted = false;
        }
    }
}

/// Round is complete when every ACTIVE seat has acted and matched the
/// current bet; with <=1 ACTIVE seat, complete once that seat acted (or
/// immediately with zero ACTIVE seats).
pub fn round_complete(seats: &[Seat], current_bet: Chips) -> bool {
    let active: Vec<&Seat> = seats.iter().filter(|s| s.is_active()).collect();
    if active.is_empty() {
        return true;
    }
    active
        .iter()
        .all(|s| s.has_acted && s.bet_this_round >= current_bet)
}

/// Hand is over early when at most one non-folded, non-empty,
/// non-sitting-out seat remains.
pub fn is_hand_over_early(seats: &[Seat]) -> bool {
    seats.iter().filter(|s| s.is_live()).count() <= 1
}

/// Skip-to-showdown when more than one live seat remains but at most
/// one is still ACTIVE (the rest are all-in).
pub fn should_skip_to_showdown(seats: &[Seat]) -> bool {
    let live = seats.iter().filter(|s| s.is_live()).count();
    let active = seats.iter().filter(|s| s.is_active()).count();
    live > 1 && active <= 1
}

/// Zeroes `bet_this_round`/`has_acted` on ACTIVE and ALL_IN seats.
pub fn street_reset(seats: &mut [Seat]) {
    for seat in seats.iter_mut() {
        seat.reset_for_new_street();
    }
}

/// First seat index (clockwise, i.e. ascending with wraparound) to act.
/// Preflop heads-up: the dealer/SB acts first. Preflop with >2 active:
/// first active seat after the big blind. Postflop: first active seat
/// after the dealer button.
pub fn first_to_act(
    seats: &[Seat],
    dealer_idx: usize,
    bb_idx: Option<usize>,
    preflop: bool,
) -> Option<usize> {
    let n = seats.len();
    let active_count = seats.iter().filter(|s| s.is_active()).count();
    let start = if preflop {
        if active_count == 2 {
            dealer_idx
        } else {
            bb_idx.unwrap_or(dealer_idx)
        }
    } else {
        dealer_idx
    };
    for offset in 1..=n {
        let idx = (start + offset) % n;
        if seats[idx].is_active() {
            return Some(idx);
        }
    }
    if preflop && active_count == 2 && seats[start].is_active() {
        return Some(start);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(stack: Chips, bet_this_round: Chips, status: SeatStatus) -> Seat {
        let mut s = Seat::empty();
        s.status = status;
        s.stack = stack;
        s.bet_this_round = bet_this_round;
        s
    }

    #[test]
    fn check_and_raise_valid_when_nothing_to_call() {
        let s = seat(100, 0, SeatStatus::Active);
        let actions = valid_actions(&s, 0);
        assert!(actions.contains(&Action::Check));
        assert!(actions.contains(&Action::Raise));
        assert!(!actions.contains(&Action::Call));
    }

    #[test]
    fn short_stack_facing_bet_only_gets_all_in() {
        let s = seat(5, 0, SeatStatus::Active);
        let actions = valid_actions(&s, 10);
        assert_eq!(actions, vec![Action::Fold, Action::AllIn]);
    }

    #[test]
    fn minimum_legal_raise_scenario() {
        // Heads-up, blinds 5/10. SB(=BTN) faces currentBet=10 having
        // posted 5; raises to 20 (increment 10 >= minRaise 10).
        let mut seats = vec![seat(995, 5, SeatStatus::Active), seat(990, 10, SeatStatus::Active)];
        seats[1].has_acted = true;
        let mut state = BettingState {
            current_bet: 10,
            min_raise: 10,
        };
        process_action(&mut seats, 0, Action::Raise, 20, &mut state).unwrap();
        assert_eq!(state.current_bet, 20);
        assert_eq!(seats[0].bet_this_round, 20);
        assert!(!seats[1].has_acted);
        assert!(seats[0].has_acted);
    }

    #[test]
    fn short_all_in_call_does_not_reopen_betting() {
        let mut seats = vec![
            seat(100, 0, SeatStatus::Active),
            seat(40, 0, SeatStatus::Active),
        ];
        let mut state = BettingState {
            current_bet: 100,
            min_raise: 20,
        };
        seats[0].bet_this_round = 100;
        seats[0].has_acted = true;
        seats[1].has_acted = false;
        process_action(&mut seats, 1, Action::AllIn, 0, &mut state).unwrap();
        assert_eq!(state.current_bet, 100);
        assert_eq!(state.min_raise, 20);
        assert_eq!(seats[1].bet_this_round, 40);
        assert!(seats[0].has_acted);
    }

    #[test]
    fn all_in_over_by_exactly_min_raise_reopens() {
        let mut seats = vec![
            seat(100, 10, SeatStatus::Active),
            seat(30, 0, SeatStatus::Active),
        ];
        seats[0].has_acted = true;
        let mut state = BettingState {
            current_bet: 10,
            min_raise: 10,
        };
        process_action(&mut seats, 1, Action::AllIn, 0, &mut state).unwrap();
        assert_eq!(state.current_bet, 30);
        assert_eq!(state.min_raise, 20);
        assert!(!seats[0].has_acted);
    }

    #[test]
    fn round_complete_requires_every_active_seat_matched() {
        let mut a = seat(100, 10, SeatStatus::Active);
        a.has_acted = true;
        let mut b = seat(100, 5, SeatStatus::Active);
        b.has_acted = true;
        assert!(!round_complete(&[a.clone(), b.clone()], 10));
        b.bet_this_round = 10;
        assert!(round_complete(&[a, b], 10));
    }

    #[test]
    fn illegal_action_does_not_mutate_state() {
        let mut seats = vec![seat(100, 0, SeatStatus::Active)];
        let mut state = BettingState {
            current_bet: 0,
            min_raise: 10,
        };
        let before = seats[0].stack;
        let err = process_action(&mut seats, 0, Action::Call, 0, &mut state);
        assert!(err.is_err());
        assert_eq!(seats[0].stack, before);
    }

    #[test]
    fn heads_up_preflop_dealer_acts_first() {
        let seats = vec![seat(100, 5, SeatStatus::Active), seat(100, 10, SeatStatus::Active)];
        assert_eq!(first_to_act(&seats, 0, Some(1), true), Some(0));
    }

    #[test]
    fn postflop_dealer_acts_last_i_e_first_to_act_is_after_dealer() {
        let seats = vec![
            seat(100, 0, SeatStatus::Active),
            seat(100, 0, SeatStatus::Active),
            seat(100, 0, SeatStatus::Active),
        ];
        assert_eq!(first_to_act(&seats, 0, None, false), Some(1));
    }
}
