//! Meld detection and attachment.
//!
//! These functions work on a player's [`Hand`] and the table's meld list. They
//! only ever move cards from the hand into melds, so the total set of cards is
//! preserved whatever they find.

use crate::card::Card;
use crate::game::zones::{Hand, Meld, MeldKind};
use tracing::debug;

const MIN_MELD: usize = 3;
const MAX_SET: usize = 4;

/// Number of cards starting at `start` that share the value of `cards[start]`,
/// looking at most `limit` cards ahead.
fn equal_window(cards: &[Card], start: usize, limit: usize) -> usize {
    let value = cards[start].value();
    cards[start..]
        .iter()
        .take(limit)
        .take_while(|c| c.value() == value)
        .count()
}

/// Remove every group of 3 or 4 equal-valued cards from `hand` as a Set.
///
/// The hand is left sorted. After each extraction the scan steps back one
/// position so groups that close up around the removed window are still seen.
pub fn extract_sets(hand: &mut Hand, melds: &mut Vec<Meld>) -> bool {
    if hand.size() < MIN_MELD {
        return false;
    }

    hand.sort();
    let cards = hand.cards_mut();
    let mut found = false;
    let mut i = 0;

    while i + MIN_MELD <= cards.len() {
        let run = equal_window(cards, i, MAX_SET);
        if run >= MIN_MELD {
            let set: Vec<Card> = cards.drain(i..i + run).collect();
            debug!(value = set[0].value(), size = set.len(), "extracted set");
            melds.push(Meld::new(MeldKind::Set, set));
            found = true;
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }

    found
}

/// Indices (into sorted `cards`) of the longest run of consecutive values.
/// Cards repeating the run's last value are skipped; the first longest run wins ties.
fn longest_run(cards: &[Card]) -> Vec<usize> {
    let Some(first) = cards.first() else {
        return Vec::new();
    };

    let mut current = vec![0];
    let mut last = first.value();
    let mut longest = current.clone();

    for (idx, card) in cards.iter().enumerate().skip(1) {
        let value = card.value();
        if value == last + 1 {
            current.push(idx);
            last = value;
            if current.len() > longest.len() {
                longest = current.clone();
            }
        } else if value > last {
            current = vec![idx];
            last = value;
        }
    }

    longest
}

/// Repeatedly remove the longest run of 3 or more consecutive values from
/// `hand` as a Run, until none is left.
pub fn extract_runs(hand: &mut Hand, melds: &mut Vec<Meld>) -> bool {
    let mut found = false;

    loop {
        hand.sort();
        let picked = longest_run(hand.cards());
        if picked.len() < MIN_MELD {
            break;
        }

        let cards = hand.cards_mut();
        let mut run = Vec::with_capacity(picked.len());
        let mut kept = Vec::with_capacity(cards.len() - picked.len());
        let mut next = picked.iter().peekable();
        for (idx, card) in cards.drain(..).enumerate() {
            if next.peek() == Some(&&idx) {
                next.next();
                run.push(card);
            } else {
                kept.push(card);
            }
        }
        *cards = kept;

        debug!(
            low = run[0].value(),
            high = run[run.len() - 1].value(),
            "extracted run"
        );
        melds.push(Meld::new(MeldKind::Run, run));
        found = true;
    }

    found
}

/// Sets first, then runs. True if either found anything.
pub fn extract_melds(hand: &mut Hand, melds: &mut Vec<Meld>) -> bool {
    let sets = extract_sets(hand, melds);
    let runs = extract_runs(hand, melds);
    sets || runs
}

/// Where a card would go on a meld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Front,
    Back,
}

/// Whether `card` can be laid on `meld`, and at which end.
///
/// Runs grow by one value at either end and never wrap between King and Ace.
/// Sets take another card of their value while below `max_set_size`.
pub fn placement(meld: &Meld, card: &Card, max_set_size: Option<usize>) -> Option<Placement> {
    let (low, high) = (meld.min_value()?, meld.max_value()?);
    let value = card.value();
    match meld.kind() {
        MeldKind::Run => {
            if low > 1 && value == low - 1 {
                Some(Placement::Front)
            } else if high < 13 && value == high + 1 {
                Some(Placement::Back)
            } else {
                None
            }
        }
        MeldKind::Set => {
            let has_room = max_set_size.map_or(true, |cap| meld.len() < cap);
            (value == low && has_room).then_some(Placement::Back)
        }
    }
}

/// Attach cards from `hand` to the first meld (in table order) that takes
/// each one. Cards that fit nowhere stay in the hand, in their original order.
pub fn attach(hand: &mut Hand, melds: &mut [Meld], max_set_size: Option<usize>) -> bool {
    let cards = hand.cards_mut();
    let mut kept = Vec::with_capacity(cards.len());
    let mut attached = false;

    for card in cards.drain(..) {
        let target = melds
            .iter_mut()
            .find_map(|m| placement(m, &card, max_set_size).map(|p| (m, p)));
        match target {
            Some((meld, Placement::Front)) => {
                debug!(card = %card, meld = %meld.kind(), "attached to low end");
                meld.push_front(card);
                attached = true;
            }
            Some((meld, Placement::Back)) => {
                debug!(card = %card, meld = %meld.kind(), "attached");
                meld.push_back(card);
                attached = true;
            }
            None => kept.push(card),
        }
    }

    *cards = kept;
    attached
}

/// Would `card` join a new meld with `hand`, or attach to a table meld?
pub fn card_is_useful(hand: &Hand, card: &Card, melds: &[Meld], max_set_size: Option<usize>) -> bool {
    if melds
        .iter()
        .any(|m| placement(m, card, max_set_size).is_some())
    {
        return true;
    }
    let mut trial = hand.clone();
    trial.add_card(*card);
    let mut scratch = Vec::new();
    extract_melds(&mut trial, &mut scratch);
    scratch.iter().any(|m| m.cards().contains(card))
}
