use crate::card::Card;
use crate::deck::Deck;
use crate::evaluation::evaluate;

pub const DEFAULT_ITERATIONS: u32 = 3000;

/// Monte Carlo equity of a hero's two hole cards against `opponents`
/// random opponents, given `board` (0..5 known community cards).
///
/// Each iteration deals `5 - board.len()` more community cards plus two
/// hole cards per opponent from a deck excluding every known card, then
/// compares hero's best five-of-seven against each opponent's. Hero
/// "beats all" only by strictly beating every opponent and tying none;
/// ties count as half a win; a loss to anyone is a loss.
pub fn estimate_equity(
    hero: [Card; 2],
    board: &[Card],
    opponents: usize,
    iterations: u32,
) -> f64 {
    assert!((1..=5).contains(&opponents), "opponents must be in 1..=5");
    assert!(board.len() <= 5, "board cannot exceed 5 cards");

    let mut known: Vec<Card> = Vec::with_capacity(2 + board.len());
    known.extend_from_slice(&hero);
    known.extend_from_slice(board);

    let to_deal_board = 5 - board.len();
    let mut wins = 0.0f64;

    for _ in 0..iterations {
        let mut deck = Deck::full_deck_excluding(&known);
        let mut full_board: Vec<Card> = board.to_vec();
        full_board.extend(deck.deal(to_deal_board));

        let mut hero_cards = hero.to_vec();
        hero_cards.extend_from_slice(&full_board);
        let hero_eval = evaluate(&hero_cards);

        let mut beats_all = true;
        let mut ties_any = false;
        for _ in 0..opponents {
            let opp_hole = deck.deal(2);
            let mut opp_cards = opp_hole;
            opp_cards.extend_from_slice(&full_board);
            let opp_eval = evaluate(&opp_cards);
            match hero_eval.compare(&opp_eval) {
                1 => {}
                0 => ties_any = true,
                _ => {
                    beats_all = false;
                    break;
                }
            }
        }

        if beats_all {
            wins += if ties_any { 0.5 } else { 1.0 };
        }
    }

    wins / iterations as f64
}

/// A call of `call` into a pot of `pot` (before the call) is profitable
/// iff equity exceeds the pot odds `call / (pot + call)`.
pub fn is_profitable_call(equity: f64, call: i64, pot: i64) -> bool {
    if call <= 0 {
        return true;
    }
    let call = call as f64;
    let pot = pot as f64;
    equity > call / (pot + call)
}
