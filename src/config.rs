use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

use crate::{chips::Chips, error::GameError};

fn default_player_name() -> String {
    "Player".to_string()
}

fn default_starting_stack() -> Chips {
    Chips::whole(100)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    #[serde(default = "default_player_name")]
    pub player_name: String,
    #[serde(default = "default_starting_stack")]
    pub starting_stack: Chips,
    /// The dealer matches the player's stack unless told otherwise.
    #[serde(default)]
    pub dealer_stack: Option<Chips>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            player_name: default_player_name(),
            starting_stack: default_starting_stack(),
            dealer_stack: None,
            seed: None,
            log_level: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json(input: &str) -> Result<Self, GameError> {
        let config: SessionConfig =
            serde_json::from_str(input).map_err(|err| GameError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn dealer_stack(&self) -> Chips {
        self.dealer_stack.unwrap_or(self.starting_stack)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, GameError> {
        match &self.log_level {
            Some(level) => LevelFilter::from_str(level)
                .map_err(|_| GameError::InvalidConfig(format!("unknown log level {level:?}"))),
            None => Ok(LevelFilter::Info),
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        for stack in [self.starting_stack, self.dealer_stack()] {
            if !stack.is_positive() {
                return Err(GameError::InvalidAmount(stack.to_f64()));
            }
        }
        if self.player_name.trim().is_empty() {
            return Err(GameError::InvalidConfig("player name is empty".to_string()));
        }
        self.level_filter()?;
        Ok(())
    }
}
