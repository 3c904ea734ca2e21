use std::collections::HashMap;

use arena_cards::Evaluation;
use arena_core::Chips;
use serde::Deserialize;
use serde::Serialize;

use crate::pot::SidePot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerShare {
    pub player_id: String,
    pub amount: Chips,
    pub description: String,
}

/// All non-folded seats with hole cards win: fold-win short circuit,
/// per §4.4. The lone seat takes every pot, no cards revealed.
pub fn resolve_fold_win(sole_winner: &str, pots: &[SidePot]) -> Vec<WinnerShare> {
    let total: Chips = pots.iter().map(|p| p.amount).sum();
    vec![WinnerShare {
        player_id: sole_winner.to_string(),
        amount: total,
        description: "Opponents folded".to_string(),
    }]
}

/// Distributes each pot among its eligible evaluated seats. Ties split
/// the pot integer-equally with any remainder assigned to the first
/// tied winner in iteration order (stable by insertion order of
/// `evaluations`, which callers should populate in seat order).
pub fn resolve_showdown(
    pots: &[SidePot],
    evaluations: &HashMap<String, Evaluation>,
    seat_order: &[String],
) -> Vec<WinnerShare> {
    let mut shares: HashMap<String, Chips> = HashMap::new();

    for pot in pots {
        let mut contenders: Vec<&String> = seat_order
            .iter()
            .filter(|id| pot.eligible_player_ids.contains(*id) && evaluations.contains_key(*id))
            .collect();
        if contenders.is_empty() {
            continue;
        }
        if contenders.len() == 1 {
            *shares.entry(contenders[0].clone()).or_insert(0) += pot.amount;
            continue;
        }

        let best = contenders
            .iter()
            .map(|id| evaluations[*id])
            .max()
            .expect("non-empty contenders");
        contenders.retain(|id| evaluations[*id] == best);

        let share = pot.amount / contenders.len() as Chips;
        let remainder = pot.amount % contenders.len() as Chips;
        for (i, id) in contenders.iter().enumerate() {
            let bonus = if i == 0 { remainder } else { 0 };
            *shares.entry((*id).clone()).or_insert(0) += share + bonus;
        }
    }

    let description = |id: &str| -> String {
        evaluations
            .get(id)
            .map(|e| e.description().to_string())
            .unwrap_or_default()
    };

    shares
        .into_iter()
        .map(|(player_id, amount)| {
            let description = description(&player_id);
            WinnerShare {
                player_id,
                amount,
                description,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_cards::evaluate;
    use arena_cards::Card;
    use std::collections::BTreeSet;

    fn eval(cards: &[&str]) -> Evaluation {
        let cards: Vec<Card> = cards.iter().map(|s| Card::try_from(*s).unwrap()).collect();
        evaluate(&cards)
    }

    #[test]
    fn single_eligible_winner_takes_whole_pot() {
        let mut evaluations = HashMap::new();
        evaluations.insert(
            "A".to_string(),
            eval(&["As", "Ad", "Kc", "Qh", "2s", "3d", "4c"]),
        );
        let pots = vec![SidePot {
            amount: 100,
            eligible_player_ids: BTreeSet::from(["A".to_string()]),
        }];
        let shares = resolve_showdown(&pots, &evaluations, &["A".to_string()]);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].amount, 100);
    }

    #[test]
    fn tie_splits_with_remainder_to_first_in_order() {
        let mut evaluations = HashMap::new();
        evaluations.insert("A".to_string(), eval(&["As", "Ad", "Kc", "Qh", "2s", "3d", "4c"]));
        evaluations.insert("B".to_string(), eval(&["Ah", "Ac", "Kd", "Qs", "2d", "3h", "4s"]));
        let pots = vec![SidePot {
            amount: 101,
            eligible_player_ids: BTreeSet::from(["A".to_string(), "B".to_string()]),
        }];
        let shares = resolve_showdown(&pots, &evaluations, &["A".to_string(), "B".to_string()]);
        let a = shares.iter().find(|s| s.player_id == "A").unwrap();
        let b = shares.iter().find(|s| s.player_id == "B").unwrap();
        assert_eq!(a.amount + b.amount, 101);
        assert_eq!(a.amount, 51);
        assert_eq!(b.amount, 50);
    }

    #[test]
    fn fold_win_awards_entire_sum_of_pots() {
        let pots = vec![
            SidePot {
                amount: 100,
                eligible_player_ids: BTreeSet::from(["A".to_string()]),
            },
            SidePot {
                amount: 50,
                eligible_player_ids: BTreeSet::from(["A".to_string()]),
            },
        ];
        let shares = resolve_fold_win("A", &pots);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].amount, 150);
        assert_eq!(shares[0].description, "Opponents folded");
    }

    #[test]
    fn better_hand_wins_whole_pot_no_split() {
        let mut evaluations = HashMap::new();
        evaluations.insert("A".to_string(), eval(&["As", "Ks", "Qs", "Js", "Ts", "2d", "3c"]));
        evaluations.insert("B".to_string(), eval(&["2h", "7d", "9c", "Jh", "4s", "3h", "5s"]));
        let pots = vec![SidePot {
            amount: 300,
            eligible_player_ids: BTreeSet::from(["A".to_string(), "B".to_string()]),
        }];
        let shares = resolve_showdown(&pots, &evaluations, &["A".to_string(), "B".to_string()]);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].player_id, "A");
        assert_eq!(shares[0].amount, 300);
    }
}
