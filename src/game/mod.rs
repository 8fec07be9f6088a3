pub mod error;
pub mod melds;
pub mod scoring;
pub mod state;
pub mod turns;
pub mod zones;

pub use error::GameError;
pub use melds::{attach, extract_melds, extract_runs, extract_sets};
pub use scoring::{card_points, score, settle};
pub use state::{full_deck, hand_size, TableState};
pub use turns::{DrawOutcome, Game, TurnPhase};
pub use zones::{DiscardPile, DrawPile, DrawSource, Hand, Meld, MeldKind};
