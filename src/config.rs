use crate::card::Card;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}

/// House rules that vary between tables.
///
/// Every field has a default, so a rules file only needs the lines it changes:
///
/// ```json
/// { "excluded_card": "QH", "max_set_size": 4 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseRules {
    /// Card left out of the deck when it is built.
    pub excluded_card: Option<Card>,
    /// Largest a Set may grow through attachment. `None` means uncapped.
    pub max_set_size: Option<usize>,
    pub min_players: usize,
    pub max_players: usize,
    /// Automated games stop after this many full rounds without a winner.
    pub max_rounds: u32,
}

impl Default for HouseRules {
    fn default() -> Self {
        HouseRules {
            excluded_card: None,
            max_set_size: None,
            min_players: 2,
            max_players: 6,
            max_rounds: 200,
        }
    }
}

impl HouseRules {
    /// Load rules from a JSON file and validate them
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let rules: HouseRules = serde_json::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(cap) = self.max_set_size {
            if cap < 3 {
                return Err(ConfigError::InvalidRule(format!(
                    "max_set_size must be at least 3, got {}",
                    cap
                )));
            }
        }
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(ConfigError::InvalidRule(format!(
                "player range {}..={} is empty or starts at zero",
                self.min_players, self.max_players
            )));
        }
        Ok(())
    }

    /// Number of cards the deck is built with.
    pub fn deck_size(&self) -> usize {
        if self.excluded_card.is_some() {
            51
        } else {
            52
        }
    }

    /// Clamp a requested player count into the supported range, warning when it changes.
    pub fn clamp_players(&self, requested: usize) -> usize {
        let players = requested.clamp(self.min_players, self.max_players);
        if players != requested {
            warn!(
                requested,
                players, "player count out of range; playing with {} instead", players
            );
        }
        players
    }
}
