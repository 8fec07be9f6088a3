//! Console front end for a game played by people sharing one terminal.

use crate::game::error::GameError;
use crate::game::turns::Game;
use crate::game::zones::{DrawSource, Hand};
use std::io::{self, BufRead, Write};

const ACTIONS: &str = "meld, discard <n>, table, hand, help";

/// Print `message` and read one trimmed line. `None` once input is exhausted.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Hand in play order, numbered from 1 for `discard <n>`.
pub fn numbered(hand: &Hand) -> String {
    hand.cards()
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}) {}", i + 1, c.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run turns until someone goes out or input runs dry.
pub fn play<R: BufRead, W: Write>(game: &mut Game, input: &mut R, out: &mut W) -> io::Result<()> {
    writeln!(out, "Welcome to the game of Rummy!")?;
    if !game.table.melds.is_empty() {
        writeln!(out, "Melds laid down from the deal:\n{}", game.table.render_melds())?;
    }

    while !game.is_over() {
        let player = game.current_player() + 1;
        writeln!(out, "======================================")?;
        writeln!(out, "Player #{}, these are your cards:", player)?;
        writeln!(out, "{}", game.current_hand().render())?;

        let top = game
            .table
            .discard_pile
            .peek_top()
            .map(|c| c.label())
            .unwrap_or_else(|| "empty".to_string());
        let outcome = loop {
            let message = format!("Draw from deck or discard? (top of discard: {}) ", top);
            let Some(choice) = prompt(input, out, &message)? else {
                return Ok(());
            };
            match choice.parse::<DrawSource>().and_then(|source| game.draw(source)) {
                Ok(outcome) => break outcome,
                Err(e @ GameError::EmptyPile { .. })
                    if game.table.draw_pile.is_empty() && game.table.discard_pile.is_empty() =>
                {
                    writeln!(out, "{}. Nothing left to play with; the game ends here.", e)?;
                    return Ok(());
                }
                Err(e) => writeln!(out, "{}", e)?,
            }
        };

        writeln!(out, "Player #{}, you drew {}", player, outcome.card.label())?;
        if outcome.melded {
            writeln!(out, "You laid down melds! On the table now:\n{}", game.table.render_melds())?;
        } else {
            writeln!(out, "No melds found!")?;
        }

        if !game.is_over() && !action_loop(game, input, out)? {
            return Ok(());
        }
    }

    if let (Some(winner), Some(score)) = (game.winner(), game.final_score()) {
        writeln!(
            out,
            "Player #{} has no more cards and wins after {} rounds! Score: {}",
            winner + 1,
            game.rounds(),
            score
        )?;
    }
    Ok(())
}

/// Actions after drawing, until a discard ends the turn. Returns false on end of input.
fn action_loop<R: BufRead, W: Write>(game: &mut Game, input: &mut R, out: &mut W) -> io::Result<bool> {
    loop {
        let Some(line) = prompt(input, out, "What do you want to do now? (type \"help\" for actions): ")? else {
            return Ok(false);
        };
        let mut words = line.split_whitespace();
        let action = words.next().unwrap_or("").to_ascii_lowercase();

        match action.as_str() {
            "meld" => match game.attach() {
                Ok(true) => {
                    writeln!(out, "Cards attached! On the table now:\n{}", game.table.render_melds())?;
                    if game.is_over() {
                        return Ok(true);
                    }
                }
                Ok(false) => writeln!(out, "No melds found!")?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            "discard" => {
                let arg = match words.next() {
                    Some(arg) => arg.to_string(),
                    None => {
                        writeln!(out, "{}", numbered(game.current_hand()))?;
                        let message = format!("Choose a card to discard (1-{}): ", game.current_hand().size());
                        match prompt(input, out, &message)? {
                            Some(arg) => arg,
                            None => return Ok(false),
                        }
                    }
                };
                let Some(index) = arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
                    writeln!(out, "Invalid card number '{}'", arg)?;
                    continue;
                };
                match game.discard(index) {
                    Ok(card) => {
                        writeln!(out, "Throwing out your {}...", card.label())?;
                        return Ok(true);
                    }
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            "table" => {
                if game.table.melds.is_empty() {
                    writeln!(out, "No melds on the table yet.")?;
                } else {
                    writeln!(out, "{}", game.table.render_melds())?;
                }
            }
            "hand" => writeln!(out, "{}", numbered(game.current_hand()))?,
            _ => writeln!(out, "The actions you can take are: {}", ACTIONS)?,
        }
    }
}
