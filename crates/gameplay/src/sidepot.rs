use std::collections::BTreeSet;

use arena_core::Chips;

use crate::pot::SidePot;
use crate::seat::Seat;
use crate::seat::SeatStatus;

/// Partitions the final `bet_this_hand` vector into side pots, per
/// §4.3: level-based partition over sorted distinct positive
/// contributions, then merge consecutive pots with identical eligible
/// sets.
pub fn compute_side_pots(seats: &[(String, Chips, SeatStatus)]) -> Vec<SidePot> {
    let mut boundaries: Vec<Chips> = seats
        .iter()
        .map(|(_, bet, _)| *bet)
        .filter(|&b| b > 0)
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut pots = Vec::new();
    let mut prev = 0;
    for &boundary in &boundaries {
        let mut amount = 0;
        let mut eligible = BTreeSet::new();
        for (player_id, bet, status) in seats {
            let contribution = (*bet).min(boundary) - (*bet).min(prev);
            amount += contribution.max(0);
            if *bet >= boundary && *status != SeatStatus::Folded {
                eligible.insert(player_id.clone());
            }
        }
        if amount > 0 && !eligible.is_empty() {
            pots.push(SidePot {
                amount,
                eligible_player_ids: eligible,
            });
        }
        prev = boundary;
    }

    merge_consecutive_identical(pots)
}

fn merge_consecutive_identical(pots: Vec<SidePot>) -> Vec<SidePot> {
    let mut merged: Vec<SidePot> = Vec::with_capacity(pots.len());
    for pot in pots {
        match merged.last_mut() {
            Some(last) if last.eligible_player_ids == pot.eligible_player_ids => {
                last.amount += pot.amount;
            }
            _ => merged.push(pot),
        }
    }
    merged
}
