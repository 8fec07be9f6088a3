use crate::config::HouseRules;
use crate::game::error::GameError;
use crate::game::turns::Game;
use crate::simulation::decisions::DecisionEngine;
use serde::Serialize;
use tracing::{debug, warn};

/// Result of a single automated game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub seed: u64,
    pub players: usize,
    /// Player who went out (None if the round limit was reached first)
    pub winner: Option<usize>,
    /// Points collected by the winner
    pub score: u32,
    /// Full rounds played
    pub rounds: u32,
    /// Melds on the table at the end
    pub melds: usize,
}

/// Play one turn for the current player.
pub fn play_turn(game: &mut Game) -> Result<(), GameError> {
    let source = DecisionEngine::choose_draw_source(game.current_hand(), &game.table);
    game.draw(source)?;

    while !game.is_over() && game.attach()? {}
    if game.is_over() {
        return Ok(());
    }

    let index = DecisionEngine::choose_discard(game.current_hand(), &game.table).unwrap_or(0);
    game.discard(index)?;
    Ok(())
}

/// Play a whole game between automated players.
pub fn run_game(players: usize, seed: u64, rules: &HouseRules) -> Result<GameResult, GameError> {
    let max_rounds = rules.max_rounds;
    let mut game = Game::new(players, rules.clone(), Some(seed))?;

    while !game.is_over() && game.rounds() < max_rounds {
        match play_turn(&mut game) {
            Ok(()) => {}
            Err(GameError::EmptyPile { pile }) => {
                warn!(seed, %pile, "ran out of cards; stopping game");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    debug_assert!(game.audit().is_ok(), "cards lost or duplicated");

    let result = GameResult {
        seed,
        players: game.num_players(),
        winner: game.winner(),
        score: game.final_score().unwrap_or(0),
        rounds: game.rounds(),
        melds: game.table.melds.len(),
    };
    debug!(?result, "game finished");
    Ok(result)
}
