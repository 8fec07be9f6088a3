use crate::card::Card;
use crate::game::zones::Hand;

/// Face value capped at 10: aces 1, faces 10.
pub fn card_points(card: &Card) -> u32 {
    u32::from(card.value().min(10))
}

/// Points left in an unmelded hand.
pub fn score(hand: &Hand) -> u32 {
    hand.cards().iter().map(card_points).sum()
}

/// What the player who went out collects: everything left in every hand.
pub fn settle(hands: &[Hand]) -> u32 {
    hands.iter().map(score).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(labels: &[&str]) -> Hand {
        Hand::from(labels.iter().map(|s| s.parse().unwrap()).collect::<Vec<Card>>())
    }

    #[test]
    fn test_mixed_hand() {
        assert_eq!(score(&hand(&["AC", "10D", "JS", "5H"])), 26);
    }

    #[test]
    fn test_faces_capped_at_ten() {
        assert_eq!(score(&hand(&["JC", "QD", "KS"])), 30);
    }

    #[test]
    fn test_empty_hand_scores_zero() {
        assert_eq!(score(&Hand::new()), 0);
    }

    #[test]
    fn test_settle_sums_all_hands() {
        let hands = vec![Hand::new(), hand(&["2C", "KD"]), hand(&["AS"])];
        assert_eq!(settle(&hands), 13);
    }
}
