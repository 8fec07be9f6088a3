use crate::game::turns::TurnPhase;
use crate::game::zones::DrawSource;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid player count {players}: at least one player is required")]
    Configuration { players: usize },
    #[error("cannot draw from the {pile}: no cards left to draw")]
    EmptyPile { pile: DrawSource },
    #[error("invalid draw source '{0}': choose 'deck' or 'discard'")]
    InvalidDrawSource(String),
    #[error("card {index} does not exist in a hand of {hand_size} cards")]
    InvalidCardIndex { index: usize, hand_size: usize },
    #[error("cannot do that during the {actual} phase (expected {expected})")]
    WrongPhase { expected: TurnPhase, actual: TurnPhase },
    #[error("the game is already over")]
    GameOver,
    #[error("card conservation violated: {0}")]
    CardConservation(String),
}
