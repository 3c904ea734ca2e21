use rand::rng;
use rand::seq::SliceRandom;

use crate::card::Card;
use crate::rank::Rank;
use crate::suit::Suit;

/// The 52-card deck. Owns a `Vec<Card>` acting as a stack: dealing pops
/// from the end, so `shuffle` is the only place order matters.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        let mut deck = Self { cards: Vec::new() };
        deck.reset();
        deck
    }

    /// Refills with all 52 cards in canonical (unshuffled) order.
    pub fn reset(&mut self) {
        self.cards.clear();
        for suit in Suit::all() {
            for rank in Rank::all() {
                self.cards.push(Card::new(rank, suit));
            }
        }
    }

    /// Fisher-Yates shuffle of the remaining cards via `rand`'s
    /// `SliceRandom::shuffle`, which is Fisher-Yates under the hood.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rng());
    }

    pub fn deal_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        let mut dealt = Vec::with_capacity(n);
        for _ in 0..n {
            match self.deal_one() {
                Some(card) => dealt.push(card),
                None => break,
            }
        }
        dealt
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(pos) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// A freshly shuffled 52-card deck with `known` cards removed, for
    /// Monte Carlo equity sampling against a fixed board/hole-card set.
    pub fn full_deck_excluding(known: &[Card]) -> Self {
        let mut deck = Self::new();
        for &card in known {
            deck.remove(card);
        }
        deck.shuffle();
        deck
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_deck_has_52_unique_cards() {
        let deck = Deck::new();
        assert_eq!(deck.remaining(), 52);
        let mut seen = std::collections::HashSet::new();
        for c in &deck.cards {
            assert!(seen.insert(*c));
        }
    }

    #[test]
    fn deal_shrinks_deck() {
        let mut deck = Deck::new();
        let dealt = deck.deal(5);
        assert_eq!(dealt.len(), 5);
        assert_eq!(deck.remaining(), 47);
    }

    #[test]
    fn deal_past_empty_stops_early() {
        let mut deck = Deck::new();
        let dealt = deck.deal(60);
        assert_eq!(dealt.len(), 52);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn full_deck_excluding_omits_known_cards() {
        let known = vec![
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Hearts),
        ];
        let deck = Deck::full_deck_excluding(&known);
        assert_eq!(deck.remaining(), 50);
        assert!(!deck.cards.contains(&known[0]));
        assert!(!deck.cards.contains(&known[1]));
    }

    #[test]
    fn remove_reports_presence() {
        let mut deck = Deck::new();
        let card = Card::new(Rank::Two, Suit::Clubs);
        assert!(deck.remove(card));
        assert!(!deck.remove(card));
    }
}
