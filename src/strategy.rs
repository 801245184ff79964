use serde::{Deserialize, Serialize};

use crate::{
    error::GameError,
    hand::{Hand, Standing, BUST_LIMIT, MIN_STAND},
};

fn default_stand_on() -> u8 {
    MIN_STAND
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyInput {
    #[serde(default = "default_stand_on")]
    pub stand_on: u8,
}

impl Default for StrategyInput {
    fn default() -> Self {
        StrategyInput { stand_on: default_stand_on() }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    Hit,
    Stand,
}

impl Action {
    pub fn as_code(&self) -> &'static str {
        match self {
            Action::Hit => "H",
            Action::Stand => "S",
        }
    }
}

/// Fixed player policy: stand once the hand is worth `stand_on` or more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strategy {
    stand_on: u8,
}

impl Strategy {
    pub fn new(stand_on: u8) -> Result<Self, GameError> {
        if !(MIN_STAND..=BUST_LIMIT).contains(&stand_on) {
            return Err(GameError::InvalidStrategy(stand_on));
        }
        Ok(Strategy { stand_on })
    }

    pub fn from_input(input: StrategyInput) -> Result<Self, GameError> {
        Strategy::new(input.stand_on)
    }

    pub fn stand_on(&self) -> u8 {
        self.stand_on
    }

    pub fn decide_action(&self, hand: &Hand) -> Action {
        match hand.standing_value() {
            Standing::Standable(value) if value >= self.stand_on => Action::Stand,
            _ => Action::Hit,
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy { stand_on: MIN_STAND }
    }
}
