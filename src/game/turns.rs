use crate::card::Card;
use crate::config::HouseRules;
use crate::game::error::GameError;
use crate::game::scoring;
use crate::game::state::TableState;
use crate::game::zones::{DrawSource, Hand};
use std::fmt;
use tracing::{debug, info};

/// Where the current player is within their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Must take a card from the draw or discard pile.
    Draw,
    /// May attach cards any number of times, then must discard.
    Play,
    /// Someone has gone out.
    Finished,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnPhase::Draw => write!(f, "draw"),
            TurnPhase::Play => write!(f, "play"),
            TurnPhase::Finished => write!(f, "finished"),
        }
    }
}

/// Result of the draw step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOutcome {
    pub card: Card,
    /// Whether drawing let the player lay down new melds.
    pub melded: bool,
}

/// A whole game: the table, every hand, and whose turn it is.
///
/// A turn is `draw`, any number of `attach`, then `discard`. A player whose
/// hand empties at any point goes out and wins at once.
#[derive(Debug, Clone)]
pub struct Game {
    pub table: TableState,
    hands: Vec<Hand>,
    current: usize,
    rounds: u32,
    phase: TurnPhase,
    winner: Option<usize>,
}

impl Game {
    /// Clamp the player count, shuffle, deal, and lay down any melds dealt outright.
    pub fn new(requested_players: usize, rules: HouseRules, seed: Option<u64>) -> Result<Self, GameError> {
        Self::with_table(TableState::with_rules(rules, seed), requested_players)
    }

    /// Start a game on a table that has been built but not dealt.
    pub fn with_table(mut table: TableState, requested_players: usize) -> Result<Self, GameError> {
        let players = table.rules().clamp_players(requested_players);
        let mut hands = table.deal(players)?;

        for (player, hand) in hands.iter_mut().enumerate() {
            if table.extract_melds(hand) {
                debug!(player, left = hand.size(), "melded from the deal");
            }
        }

        let mut game = Game {
            table,
            hands,
            current: 0,
            rounds: 0,
            phase: TurnPhase::Draw,
            winner: None,
        };
        game.check_out();
        Ok(game)
    }

    pub fn num_players(&self) -> usize {
        self.hands.len()
    }

    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn current_hand(&self) -> &Hand {
        &self.hands[self.current]
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::Finished
    }

    /// Points collected by the winner, once there is one.
    pub fn final_score(&self) -> Option<u32> {
        self.winner.map(|_| scoring::settle(&self.hands))
    }

    fn expect_phase(&self, expected: TurnPhase) -> Result<(), GameError> {
        match self.phase {
            TurnPhase::Finished => Err(GameError::GameOver),
            actual if actual != expected => Err(GameError::WrongPhase { expected, actual }),
            _ => Ok(()),
        }
    }

    /// Take a card, then lay down whatever melds the hand now holds.
    pub fn draw(&mut self, source: DrawSource) -> Result<DrawOutcome, GameError> {
        self.expect_phase(TurnPhase::Draw)?;

        let card = self.table.draw(source)?;
        let hand = &mut self.hands[self.current];
        hand.add_card(card);
        let melded = self.table.extract_melds(hand);
        debug!(player = self.current, card = %card, %source, melded, "drew");

        self.phase = TurnPhase::Play;
        self.check_out();
        Ok(DrawOutcome { card, melded })
    }

    /// Lay single cards from the current hand onto table melds.
    pub fn attach(&mut self) -> Result<bool, GameError> {
        self.expect_phase(TurnPhase::Play)?;

        let attached = self.table.attach(&mut self.hands[self.current]);
        self.check_out();
        Ok(attached)
    }

    /// Discard the card at `index` and pass the turn.
    pub fn discard(&mut self, index: usize) -> Result<Card, GameError> {
        self.expect_phase(TurnPhase::Play)?;

        let card = self.table.discard(&mut self.hands[self.current], index)?;
        debug!(player = self.current, card = %card, "discarded");
        self.check_out();
        if !self.is_over() {
            self.advance();
        }
        Ok(card)
    }

    fn advance(&mut self) {
        self.current += 1;
        if self.current >= self.hands.len() {
            self.current = 0;
            self.rounds += 1;
        }
        self.phase = TurnPhase::Draw;
    }

    fn check_out(&mut self) {
        if self.winner.is_some() {
            return;
        }
        if let Some(player) = self.hands.iter().position(Hand::is_empty) {
            self.current = player;
            self.winner = Some(player);
            self.phase = TurnPhase::Finished;
            info!(
                player,
                rounds = self.rounds,
                score = scoring::settle(&self.hands),
                "player went out"
            );
        }
    }

    /// Check every card of the deck is in exactly one place.
    pub fn audit(&self) -> Result<(), GameError> {
        self.table.audit(&self.hands)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn new_game(players: usize, seed: u64) -> Game {
        Game::new(players, HouseRules::default(), Some(seed)).unwrap()
    }

    fn cards(labels: &[&str]) -> Vec<Card> {
        labels.iter().map(|s| s.parse().unwrap()).collect()
    }

    /// Two players dealt hands with pairs and gaps only, and the King of
    /// Spades face up. One draw can meld at most three cards, so nobody can
    /// go out within the first few turns.
    pub(crate) fn quiet_game() -> Game {
        let mut table = TableState::new(Some(1));
        table.stack_deal(
            &[
                cards(&["2C", "2H", "4D", "6C", "6H", "8D", "10C", "10H", "QD", "QH"]),
                cards(&["2D", "2S", "4C", "4H", "6D", "8C", "8H", "10D", "QC", "QS"]),
            ],
            "KS".parse().unwrap(),
        );
        let game = Game::with_table(table, 2).unwrap();
        assert!(!game.is_over());
        assert!(game.table.melds.is_empty());
        game
    }

    #[test]
    fn test_new_game_clamps_players() {
        assert_eq!(new_game(1, 1).num_players(), 2);
        assert_eq!(new_game(9, 1).num_players(), 6);
        assert_eq!(new_game(4, 1).num_players(), 4);
    }

    #[test]
    fn test_new_game_conserves_cards() {
        for seed in 0..20 {
            let game = new_game(3, seed);
            assert!(game.audit().is_ok());
            match game.winner() {
                Some(winner) => {
                    assert_eq!(game.phase(), TurnPhase::Finished);
                    assert!(game.hands()[winner].is_empty());
                }
                None => assert_eq!(game.phase(), TurnPhase::Draw),
            }
        }
    }

    #[test]
    fn test_going_out_on_the_deal() {
        let mut table = TableState::new(Some(8));
        table.stack_deal(
            &[
                cards(&["2C", "4D", "6C", "8D", "10C", "QD", "KC"]),
                cards(&["2D", "4C", "6D", "8C", "10D", "QC", "KD"]),
                cards(&["2H", "3H", "4H", "9C", "9D", "9S", "9H"]),
            ],
            "5S".parse().unwrap(),
        );

        let mut game = Game::with_table(table, 3).unwrap();

        assert!(game.is_over());
        assert_eq!(game.winner(), Some(2));
        assert_eq!(game.current_player(), 2);
        assert_eq!(game.rounds(), 0);
        assert_eq!(game.table.melds.len(), 2);
        assert_eq!(game.final_score(), Some(2 * (2 + 4 + 6 + 8 + 10 + 10 + 10)));
        assert!(game.audit().is_ok());
        assert_eq!(game.draw(DrawSource::DrawPile), Err(GameError::GameOver));
    }

    #[test]
    fn test_turn_sequence() {
        let mut game = quiet_game();
        assert_eq!(game.current_player(), 0);

        assert_eq!(
            game.discard(0),
            Err(GameError::WrongPhase {
                expected: TurnPhase::Play,
                actual: TurnPhase::Draw
            })
        );

        game.draw(DrawSource::DrawPile).unwrap();
        assert!(!game.is_over());
        assert_eq!(game.phase(), TurnPhase::Play);
        assert!(matches!(
            game.draw(DrawSource::DrawPile),
            Err(GameError::WrongPhase { .. })
        ));

        game.attach().unwrap();
        let size = game.current_hand().size();
        let top = game.discard(size - 1).unwrap();
        assert_eq!(game.table.discard_pile.peek_top(), Some(&top));

        assert!(!game.is_over());
        assert_eq!(game.current_player(), 1);
        assert_eq!(game.phase(), TurnPhase::Draw);
        assert!(game.audit().is_ok());
    }

    #[test]
    fn test_invalid_discard_keeps_turn() {
        let mut game = quiet_game();
        let outcome = game.draw(DrawSource::DiscardPile).unwrap();
        assert_eq!(outcome.card, "KS".parse::<Card>().unwrap());
        assert!(!outcome.melded);
        let size = game.current_hand().size();

        assert!(matches!(
            game.discard(size + 5),
            Err(GameError::InvalidCardIndex { .. })
        ));
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.phase(), TurnPhase::Play);
        assert_eq!(game.current_hand().size(), size);
    }

    #[test]
    fn test_rounds_count_full_cycles() {
        let mut game = quiet_game();
        for _ in 0..4 {
            game.draw(DrawSource::DrawPile).unwrap();
            assert!(!game.is_over());
            game.discard(0).unwrap();
        }
        assert!(!game.is_over());
        assert_eq!(game.rounds(), 2);
        assert_eq!(game.current_player(), 0);
        assert!(game.audit().is_ok());
    }

    #[test]
    fn test_finished_game_rejects_moves() {
        let mut game = quiet_game();
        game.phase = TurnPhase::Finished;
        game.winner = Some(0);
        assert_eq!(game.draw(DrawSource::DrawPile), Err(GameError::GameOver));
        assert_eq!(game.attach(), Err(GameError::GameOver));
        assert!(game.final_score().is_some());
    }
}
