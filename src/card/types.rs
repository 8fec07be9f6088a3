use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("empty card label")]
    Empty,
    #[error("unknown rank: {0}")]
    UnknownRank(String),
    #[error("unknown suit: {0}")]
    UnknownSuit(String),
}

/// Card rank. Aces are low: the discriminant is the rank's numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

const RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

impl Rank {
    /// All ranks in deck-building order (2 through 10, J, Q, K, A).
    pub fn all() -> [Rank; 13] {
        RANKS
    }

    /// Numeric value used for sets, runs and ordering: A=1 .. K=13.
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Rank> {
        RANKS.iter().copied().find(|r| r.value() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl FromStr for Rank {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "ACE" | "1" => Ok(Rank::Ace),
            "J" | "JACK" | "11" => Ok(Rank::Jack),
            "Q" | "QUEEN" | "12" => Ok(Rank::Queen),
            "K" | "KING" | "13" => Ok(Rank::King),
            "T" => Ok(Rank::Ten),
            other => other
                .parse::<u8>()
                .ok()
                .filter(|v| (2..=10).contains(v))
                .and_then(Rank::from_value)
                .ok_or_else(|| CardParseError::UnknownRank(s.to_string())),
        }
    }
}

/// The four suits. Their order only breaks ties between equal ranks when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Hearts,
    Spades,
    Diamonds,
}

const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Hearts, Suit::Spades, Suit::Diamonds];

impl Suit {
    pub fn all() -> [Suit; 4] {
        SUITS
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
            Suit::Diamonds => "Diamonds",
        }
    }
}

impl FromStr for Suit {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" | "CLUB" | "CLUBS" | "♣" => Ok(Suit::Clubs),
            "H" | "HEART" | "HEARTS" | "♥" => Ok(Suit::Hearts),
            "S" | "SPADE" | "SPADES" | "♠" => Ok(Suit::Spades),
            "D" | "DIAMOND" | "DIAMONDS" | "♦" => Ok(Suit::Diamonds),
            _ => Err(CardParseError::UnknownSuit(s.to_string())),
        }
    }
}

/// One playing card. Immutable; the derived ordering sorts by value, then suit.
///
/// Serializes as its short label (`"QH"`, `"10C"`), so rule files can name cards
/// the same way the console does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    /// Display label, e.g. "10 of Diamonds".
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank.label(), self.suit.name())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Accepts "7C", "10♦", "Q of Hearts" and "queen of hearts".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CardParseError::Empty);
        }

        if let Some((rank, suit)) = s.split_once(" of ") {
            return Ok(Card::new(rank.parse()?, suit.parse()?));
        }

        let split = s
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .ok_or(CardParseError::Empty)?;
        let (rank, suit) = s.split_at(split);
        if rank.is_empty() {
            return Err(CardParseError::UnknownRank(s.to_string()));
        }
        Ok(Card::new(rank.parse()?, suit.parse()?))
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        format!("{}{}", card.rank.label(), &card.suit.name()[..1])
    }
}
