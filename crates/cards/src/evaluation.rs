use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::card::Card;

/// The ten standard hand categories, declared worst-to-best so the
/// derived `Ord` gives the right total order directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        };
        write!(f, "{}", name)
    }
}

/// A fully-evaluated hand: category plus a packed total-order tiebreak
/// within that category. `Ord` compares category first, then `rank`,
/// matching the {−1,0,+1} comparison the spec calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    category: HandCategory,
    rank: u32,
    description: &'static str,
}

impl Evaluation {
    pub fn category(&self) -> HandCategory {
        self.category
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns -1, 0, or +1, matching the spec's comparison contract.
    pub fn compare(&self, other: &Evaluation) -> i8 {
        match self.cmp(other) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then(self.rank.cmp(&other.rank))
    }
}

const KICKER_BASE: u32 = 15;

fn pack(ranks: &[u8]) -> u32 {
    ranks.iter().fold(0u32, |acc, &r| acc * KICKER_BASE + r as u32)
}

/// Evaluates 5, 6, or 7 cards by exhaustively scoring every 5-card
/// combination and keeping the best. Deliberately enumeration-based
/// rather than table-driven: at most C(7,5)=21 combinations, cheap
/// enough to stay simple and auditable.
pub fn evaluate(cards: &[Card]) -> Evaluation {
    assert!(
        (5..=7).contains(&cards.len()),
        "hand evaluation requires 5 to 7 cards, got {}",
        cards.len()
    );
    combinations5(cards)
        .into_iter()
        .map(|five| evaluate_five(&five))
        .max()
        .expect("at least one 5-card combination exists")
}

fn combinations5(cards: &[Card]) -> Vec<[Card; 5]> {
    let n = cards.len();
    let mut out = Vec::new();
    let mut idx = [0usize; 5];
    for i in 0..5 {
        idx[i] = i;
    }
    loop {
        out.push([
            cards[idx[0]],
            cards[idx[1]],
            cards[idx[2]],
            cards[idx[3]],
            cards[idx[4]],
        ]);
        let mut i = 4;
        loop {
            if idx[i] < n - 5 + i {
                idx[i] += 1;
                for j in (i + 1)..5 {
                    idx[j] = idx[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                return out;
            }
            i -= 1;
        }
    }
}

fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank().value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.windows(2).all(|w| w[0].suit() == w[1].suit());
    let straight_high = straight_high_card(&values);

    let mut counts: HashMap<u8, u8> = HashMap::new();
    for &v in &values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut groups: Vec<(u8, u8)> = counts.into_iter().collect(); // (value, count)
    groups.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    let counts_desc: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let ordered_ranks: Vec<u8> = groups
        .iter()
        .flat_map(|&(value, count)| std::iter::repeat(value).take(count as usize))
        .collect();

    if is_flush {
        if let Some(high) = straight_high {
            let category = if high == 14 {
                HandCategory::RoyalFlush
            } else {
                HandCategory::StraightFlush
            };
            let description = if high == 14 {
                "Royal Flush"
            } else {
                "Straight Flush"
            };
            return Evaluation {
                category,
                rank: pack(&[high]),
                description,
            };
        }
    }

    if counts_desc == [4, 1] {
        return Evaluation {
            category: HandCategory::FourOfAKind,
            rank: pack(&ordered_ranks),
            description: "Four of a Kind",
        };
    }
    if counts_desc == [3, 2] {
        return Evaluation {
            category: HandCategory::FullHouse,
            rank: pack(&ordered_ranks),
            description: "Full House",
        };
    }
    if is_flush {
        return Evaluation {
            category: HandCategory::Flush,
            rank: pack(&values),
            description: "Flush",
        };
    }
    if let Some(high) = straight_high {
        return Evaluation {
            category: HandCategory::Straight,
            rank: pack(&[high]),
            description: "Straight",
        };
    }
    if counts_desc == [3, 1, 1] {
        return Evaluation {
            category: HandCategory::ThreeOfAKind,
            rank: pack(&ordered_ranks),
            description: "Three of a Kind",
        };
    }
    if counts_desc == [2, 2, 1] {
        return Evaluation {
            category: HandCategory::TwoPair,
            rank: pack(&ordered_ranks),
            description: "Two Pair",
        };
    }
    if counts_desc == [2, 1, 1, 1] {
        return Evaluation {
            category: HandCategory::Pair,
            rank: pack(&ordered_ranks),
            description: "Pair",
        };
    }
    Evaluation {
        category: HandCategory::HighCard,
        rank: pack(&values),
        description: "High Card",
    }
}

/// Returns the high card of a straight among five descending-sorted,
/// deduplication-agnostic rank values, or `None`. Handles the wheel
/// (A-2-3-4-5, high card 5) as well as ordinary runs.
fn straight_high_card(values_desc: &[u8]) -> Option<u8> {
    let mut unique: Vec<u8> = values_desc.to_vec();
    unique.dedup();
    if unique.len() != 5 {
        return None;
    }
    if unique[0] - unique[4] == 4 {
        return Some(unique[0]);
    }
    if unique == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::Rank;
    use crate::suit::Suit;

    fn card(s: &str) -> Card {
        Card::try_from(s).unwrap()
    }

    #[test]
    fn royal_flush_beats_straight_flush() {
        let royal = evaluate(&[
            card("As"),
            card("Ks"),
            card("Qs"),
            card("Js"),
            card("Ts"),
        ]);
        let lesser = evaluate(&[
            card("9s"),
            card("8s"),
            card("7s"),
            card("6s"),
            card("5s"),
        ]);
        assert_eq!(royal.category(), HandCategory::RoyalFlush);
        assert_eq!(lesser.category(), HandCategory::StraightFlush);
        assert_eq!(royal.compare(&lesser), 1);
    }

    #[test]
    fn wheel_straight_ranks_as_five_high() {
        let wheel = evaluate(&[card("As"), card("2d"), card("3c"), card("4h"), card("5s")]);
        assert_eq!(wheel.category(), HandCategory::Straight);
        let six_high = evaluate(&[card("2s"), card("3d"), card("4c"), card("5h"), card("6s")]);
        assert_eq!(six_high.compare(&wheel), 1);
    }

    #[test]
    fn four_of_a_kind_beats_full_house() {
        let quads = evaluate(&[card("7s"), card("7d"), card("7c"), card("7h"), card("2s")]);
        let boat = evaluate(&[card("8s"), card("8d"), card("8c"), card("2h"), card("2s")]);
        assert_eq!(quads.compare(&boat), 1);
    }

    #[test]
    fn kicker_breaks_tie_within_category() {
        let pair_ace_king = evaluate(&[card("As"), card("Ad"), card("Kc"), card("Qh"), card("2s")]);
        let pair_ace_queen = evaluate(&[card("Ah"), card("Ac"), card("Qc"), card("Jh"), card("2d")]);
        assert_eq!(pair_ace_king.category(), HandCategory::Pair);
        assert_eq!(pair_ace_queen.category(), HandCategory::Pair);
        assert_eq!(pair_ace_king.compare(&pair_ace_queen), 1);
    }

    #[test]
    fn seven_card_hand_picks_best_five() {
        let best = evaluate(&[
            card("As"), card("Ks"), card("Qs"), card("Js"), card("Ts"),
            card("2d"), card("3c"),
        ]);
        assert_eq!(best.category(), HandCategory::RoyalFlush);
    }

    #[test]
    fn identical_hands_tie() {
        let a = evaluate(&[card("As"), card("Ad"), card("Kc"), card("Qh"), card("2s")]);
        let b = evaluate(&[card("Ah"), card("Ac"), card("Kd"), card("Qs"), card("2d")]);
        assert_eq!(a.compare(&b), 0);
    }

    #[test]
    #[should_panic]
    fn rejects_too_few_cards() {
        let _ = evaluate(&[card("As"), card("Ks"), card("Qs"), card("Js")]);
    }

    #[test]
    fn non_flush_non_straight_is_high_card() {
        let e = evaluate(&[card("As"), card("Kd"), card("8c"), card("4h"), card("2s")]);
        assert_eq!(e.category(), HandCategory::HighCard);
    }

    #[test]
    fn all_rank_all_suit_enumeration_has_no_panics() {
        // Spot-check a slice of the 133,784,560 7-card hand space rather
        // than enumerate it in a unit test: every suit's top five plus
        // two low kickers of another suit.
        for s in Suit::all() {
            let cards = [
                Card::new(Rank::Ace, s),
                Card::new(Rank::King, s),
                Card::new(Rank::Queen, s),
                Card::new(Rank::Jack, s),
                Card::new(Rank::Ten, s),
                Card::new(Rank::Two, Suit::Clubs),
                Card::new(Rank::Three, Suit::Diamonds),
            ];
            let e = evaluate(&cards);
            assert!(e.category() >= HandCategory::Straight);
        }
    }
}
