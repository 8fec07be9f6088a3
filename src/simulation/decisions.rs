use crate::card::Card;
use crate::game::melds::{card_is_useful, placement};
use crate::game::scoring::card_points;
use crate::game::state::TableState;
use crate::game::zones::{DrawSource, Hand};

/// Choices for automated players.
pub struct DecisionEngine;

impl DecisionEngine {
    /// Take the discard when it would meld or attach right away, otherwise draw blind.
    pub fn choose_draw_source(hand: &Hand, table: &TableState) -> DrawSource {
        let Some(top) = table.discard_pile.peek_top() else {
            return DrawSource::DrawPile;
        };

        // Nothing left to reshuffle: the discard is the only card available.
        if table.draw_pile.is_empty() && table.discard_pile.size() == 1 {
            return DrawSource::DiscardPile;
        }

        if card_is_useful(hand, top, &table.melds, table.rules().max_set_size) {
            DrawSource::DiscardPile
        } else {
            DrawSource::DrawPile
        }
    }

    /// Pick the card to throw away.
    ///
    /// Prefers the highest-scoring card with no partner in hand (same value or
    /// one away) that no table meld would take; falls back to the highest-scoring card.
    pub fn choose_discard(hand: &Hand, table: &TableState) -> Option<usize> {
        let cards = hand.cards();
        let cap = table.rules().max_set_size;

        let loose = cards.iter().enumerate().filter(|(idx, card)| {
            !Self::has_partner(cards, *idx, card)
                && !table.melds.iter().any(|m| placement(m, card, cap).is_some())
        });

        Self::highest(loose).or_else(|| Self::highest(cards.iter().enumerate()))
    }

    fn has_partner(cards: &[Card], idx: usize, card: &Card) -> bool {
        cards
            .iter()
            .enumerate()
            .any(|(other, c)| other != idx && c.value().abs_diff(card.value()) <= 1)
    }

    fn highest<'a>(candidates: impl Iterator<Item = (usize, &'a Card)>) -> Option<usize> {
        candidates
            .max_by_key(|(_, card)| (card_points(card), card.value()))
            .map(|(idx, _)| idx)
    }
}
