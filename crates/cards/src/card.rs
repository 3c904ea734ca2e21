use std::fmt;

use crate::rank::Rank;
use crate::suit::Suit;

/// A single playing card. Value object: two `Card`s are equal iff rank
/// and suit both match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(&self) -> Rank {
        self.rank
    }

    pub const fn suit(&self) -> Suit {
        self.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl TryFrom<&str> for Card {
    type Error = ();

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        let rank = Rank::try_from(chars.next().ok_or(())?)?;
        let suit = Suit::try_from(chars.next().ok_or(())?)?;
        if chars.next().is_some() {
            return Err(());
        }
        Ok(Card::new(rank, suit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_roundtrip() {
        let card = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(card.to_string(), "As");
        assert_eq!(Card::try_from("As"), Ok(card));
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(Card::try_from("Zz").is_err());
        assert!(Card::try_from("A").is_err());
        assert!(Card::try_from("Asx").is_err());
    }
}
