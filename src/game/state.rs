use crate::card::{Card, Rank, Suit};
use crate::config::HouseRules;
use crate::game::error::GameError;
use crate::game::melds;
use crate::game::zones::{DiscardPile, DrawPile, DrawSource, Hand, Meld};
use crate::rng::GameRng;
use tracing::{debug, info};

/// Cards dealt to each player for a given table size.
pub fn hand_size(num_players: usize) -> usize {
    match num_players {
        0..=2 => 10,
        3..=4 => 7,
        _ => 6,
    }
}

/// Every card the rules put in the deck, unshuffled: suit by suit, 2 through A.
pub fn full_deck(rules: &HouseRules) -> Vec<Card> {
    let mut cards = Vec::with_capacity(rules.deck_size());
    for suit in Suit::all() {
        for rank in Rank::all() {
            let card = Card::new(rank, suit);
            if rules.excluded_card != Some(card) {
                cards.push(card);
            }
        }
    }
    cards
}

/// Shared table: draw pile, discard pile and the melds laid down so far.
///
/// Hands live outside the table and are passed in by the caller, so the only
/// way cards move between collections is through the methods here and in
/// [`melds`](crate::game::melds).
#[derive(Debug, Clone)]
pub struct TableState {
    pub draw_pile: DrawPile,
    pub discard_pile: DiscardPile,
    pub melds: Vec<Meld>,
    rules: HouseRules,
    rng: GameRng,
}

impl TableState {
    /// Build and shuffle a standard deck.
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_rules(HouseRules::default(), seed)
    }

    pub fn with_rules(rules: HouseRules, seed: Option<u64>) -> Self {
        let mut rng = GameRng::new(seed);
        let mut draw_pile = DrawPile::new();
        let cards = draw_pile.cards_mut();
        cards.extend(full_deck(&rules));
        rng.shuffle(cards);

        debug!(seed = rng.seed(), cards = draw_pile.size(), "built deck");
        TableState {
            draw_pile,
            discard_pile: DiscardPile::new(),
            melds: Vec::new(),
            rules,
            rng,
        }
    }

    pub fn rules(&self) -> &HouseRules {
        &self.rules
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Deal round-robin until every hand is full or the draw pile runs out,
    /// then turn the next card face up to start the discard pile.
    pub fn deal(&mut self, num_players: usize) -> Result<Vec<Hand>, GameError> {
        if num_players < 1 {
            return Err(GameError::Configuration {
                players: num_players,
            });
        }

        let target = hand_size(num_players);
        let mut hands: Vec<Hand> = (0..num_players).map(|_| Hand::with_capacity(target + 1)).collect();

        'dealing: for _ in 0..target {
            for hand in hands.iter_mut() {
                match self.draw_pile.draw() {
                    Some(card) => hand.add_card(card),
                    None => break 'dealing,
                }
            }
        }

        for hand in hands.iter_mut() {
            hand.sort();
        }

        if let Some(card) = self.draw_pile.draw() {
            self.discard_pile.add_card(card);
        }

        info!(
            players = num_players,
            hand_size = target,
            remaining = self.draw_pile.size(),
            "dealt hands"
        );
        Ok(hands)
    }

    /// Take the top card of `source`. An empty draw pile is rebuilt from the
    /// discard pile (all but its top card) before drawing.
    pub fn draw(&mut self, source: DrawSource) -> Result<Card, GameError> {
        match source {
            DrawSource::DiscardPile => self
                .discard_pile
                .take_top()
                .ok_or(GameError::EmptyPile { pile: source }),
            DrawSource::DrawPile => {
                if self.draw_pile.is_empty() {
                    if self.discard_pile.size() <= 1 {
                        return Err(GameError::EmptyPile { pile: source });
                    }
                    self.reshuffle();
                }
                self.draw_pile
                    .draw()
                    .ok_or(GameError::EmptyPile { pile: source })
            }
        }
    }

    fn reshuffle(&mut self) {
        let mut recycled = self.discard_pile.take_all_but_top();
        self.rng.shuffle(&mut recycled);
        debug!(cards = recycled.len(), "reshuffled discard pile into draw pile");
        self.draw_pile.cards_mut().extend(recycled);
    }

    /// Move the card at `index` from `hand` to the top of the discard pile.
    pub fn discard(&mut self, hand: &mut Hand, index: usize) -> Result<Card, GameError> {
        let card = hand.remove_card(index)?;
        self.discard_pile.add_card(card);
        Ok(card)
    }

    /// Pull every Set and Run out of `hand` onto the table.
    pub fn extract_melds(&mut self, hand: &mut Hand) -> bool {
        melds::extract_melds(hand, &mut self.melds)
    }

    /// Lay single cards from `hand` onto matching table melds.
    pub fn attach(&mut self, hand: &mut Hand) -> bool {
        melds::attach(hand, &mut self.melds, self.rules.max_set_size)
    }

    /// One line per meld, in the order they were laid down.
    pub fn render_melds(&self) -> String {
        self.melds
            .iter()
            .map(Meld::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Reorder the draw pile so `deal` hands out `hands` (in seat order) and
    /// then turns `flip` face up.
    #[cfg(test)]
    pub(crate) fn stack_deal(&mut self, hands: &[Vec<Card>], flip: Card) {
        let per_hand = hands.iter().map(Vec::len).max().unwrap_or(0);
        let mut order: Vec<Card> = (0..per_hand)
            .flat_map(|round| hands.iter().filter_map(move |hand| hand.get(round).copied()))
            .collect();
        order.push(flip);

        let cards = self.draw_pile.cards_mut();
        cards.retain(|c| !order.contains(c));
        cards.extend(order.into_iter().rev());
    }

    /// Check that the piles, the melds and `hands` together hold every card of
    /// the deck exactly once.
    pub fn audit(&self, hands: &[Hand]) -> Result<(), GameError> {
        let mut seen: Vec<Card> = self
            .draw_pile
            .cards()
            .iter()
            .chain(self.discard_pile.cards())
            .chain(self.melds.iter().flat_map(|m| m.cards()))
            .chain(hands.iter().flat_map(|h| h.cards()))
            .copied()
            .collect();
        seen.sort();

        if let Some(pair) = seen.windows(2).find(|w| w[0] == w[1]) {
            return Err(GameError::CardConservation(format!(
                "{} appears more than once",
                pair[0]
            )));
        }

        let expected = full_deck(&self.rules);
        if seen.len() != self.rules.deck_size() {
            let missing: Vec<String> = expected
                .iter()
                .filter(|c| seen.binary_search(c).is_err())
                .map(Card::label)
                .collect();
            return Err(GameError::CardConservation(format!(
                "expected {} cards, found {} (missing: {})",
                expected.len(),
                seen.len(),
                missing.join(", ")
            )));
        }
        if let Some(stray) = seen.iter().find(|c| !expected.contains(c)) {
            return Err(GameError::CardConservation(format!(
                "{} is not part of this deck",
                stray
            )));
        }
        Ok(())
    }
}
