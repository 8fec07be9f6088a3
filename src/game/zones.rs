use crate::card::Card;
use crate::game::error::GameError;
use std::fmt;
use std::str::FromStr;

/// Kind tag of a meld on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeldKind {
    Set,
    Run,
}

impl fmt::Display for MeldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeldKind::Set => write!(f, "Set"),
            MeldKind::Run => write!(f, "Run"),
        }
    }
}

/// A meld placed on the table. Runs are kept in ascending value order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meld {
    kind: MeldKind,
    cards: Vec<Card>,
}

impl Meld {
    pub fn new(kind: MeldKind, cards: Vec<Card>) -> Self {
        Meld { kind, cards }
    }

    pub fn kind(&self) -> MeldKind {
        self.kind
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Lowest value in the meld (a Run's low end, a Set's common value).
    pub fn min_value(&self) -> Option<u8> {
        self.cards.iter().map(Card::value).min()
    }

    pub fn max_value(&self) -> Option<u8> {
        self.cards.iter().map(Card::value).max()
    }

    pub(crate) fn push_front(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    pub(crate) fn push_back(&mut self, card: Card) {
        self.cards.push(card);
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.cards.iter().map(Card::label).collect();
        write!(f, "{} [{}]", self.kind, labels.join(", "))
    }
}

/// Cards held by one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Hand {
            cards: Vec::with_capacity(cap),
        }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove_card(&mut self, index: usize) -> Result<Card, GameError> {
        if index < self.cards.len() {
            Ok(self.cards.remove(index))
        } else {
            Err(GameError::InvalidCardIndex {
                index,
                hand_size: self.cards.len(),
            })
        }
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Stable sort by value, suit breaking ties.
    pub fn sort(&mut self) {
        self.cards.sort();
    }

    /// Comma-joined labels in ascending value order. Does not reorder the hand.
    pub fn render(&self) -> String {
        let mut sorted = self.cards.clone();
        sorted.sort();
        sorted
            .iter()
            .map(Card::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand { cards }
    }
}

/// Where a player takes their card from at the start of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawSource {
    DrawPile,
    DiscardPile,
}

impl fmt::Display for DrawSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawSource::DrawPile => write!(f, "draw pile"),
            DrawSource::DiscardPile => write!(f, "discard pile"),
        }
    }
}

impl FromStr for DrawSource {
    type Err = GameError;

    /// Accepts the bare pile name or the console form `draw <pile>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let pile = lowered
            .strip_prefix("draw ")
            .map(str::trim_start)
            .unwrap_or(&lowered);
        match pile {
            "deck" | "draw" | "pile" => Ok(DrawSource::DrawPile),
            "discard" => Ok(DrawSource::DiscardPile),
            _ => Err(GameError::InvalidDrawSource(s.trim().to_string())),
        }
    }
}

/// Face-down stack. The top card is the last element.
#[derive(Debug, Clone, Default)]
pub struct DrawPile {
    cards: Vec<Card>,
}

impl DrawPile {
    pub fn new() -> Self {
        DrawPile { cards: Vec::new() }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }
}

/// Face-up stack. The top card is the last element.
#[derive(Debug, Clone, Default)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn new() -> Self {
        DiscardPile { cards: Vec::new() }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn take_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Everything below the top card, leaving only the top behind.
    pub(crate) fn take_all_but_top(&mut self) -> Vec<Card> {
        let keep = self.cards.pop();
        let rest = std::mem::take(&mut self.cards);
        self.cards.extend(keep);
        rest
    }
}
