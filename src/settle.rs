use std::fmt;

use serde::Serialize;

use crate::chips::Chips;
use crate::game::Participant;
use crate::hand::BUST_LIMIT;
use crate::special::{Claims, Special};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    PlayerWins,
    DealerWins,
    Draw,
}

/// What decided the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Reason {
    BanBan,
    BanLuck,
    TripleSeven,
    WuLong,
    BustedWuLong,
    Bust,
    BothBust,
    HigherValue,
    EqualValue,
}

impl Reason {
    fn from_special(special: Special) -> Option<Reason> {
        match special {
            Special::BanBan => Some(Reason::BanBan),
            Special::BanLuck => Some(Reason::BanLuck),
            Special::TripleSeven => Some(Reason::TripleSeven),
            Special::WuLongWin => Some(Reason::WuLong),
            Special::WuLongBust => Some(Reason::BustedWuLong),
            Special::None => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::BanBan => "ban ban",
            Reason::BanLuck => "ban luck",
            Reason::TripleSeven => "triple seven",
            Reason::WuLong => "wu long",
            Reason::BustedWuLong => "busted wu long",
            Reason::Bust => "bust",
            Reason::BothBust => "both bust",
            Reason::HigherValue => "higher value",
            Reason::EqualValue => "equal value",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Net stack movement of a finished round. Deltas exclude the escrowed wager,
/// which is always handed back to the player.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub outcome: Outcome,
    pub reason: Reason,
    pub multiplier: i8,
    pub wager: Chips,
    pub player_value: u8,
    pub dealer_value: u8,
    pub player_delta: Chips,
    pub dealer_delta: Chips,
    pub description: String,
}

impl Settlement {
    fn new(multiplier: i8, reason: Reason, player_value: u8, dealer_value: u8, wager: Chips) -> Self {
        let outcome = match multiplier {
            m if m > 0 => Outcome::PlayerWins,
            m if m < 0 => Outcome::DealerWins,
            _ => Outcome::Draw,
        };
        let player_delta = wager.times(multiplier);
        let dealer_delta = -player_delta;
        let description = match outcome {
            Outcome::PlayerWins => format!("player wins {player_delta} on {reason}"),
            Outcome::DealerWins => format!("player loses {dealer_delta} on {reason}"),
            Outcome::Draw => format!("draw on {reason}"),
        };
        Settlement {
            outcome,
            reason,
            multiplier,
            wager,
            player_value,
            dealer_value,
            player_delta,
            dealer_delta,
            description,
        }
    }

    /// Returns the escrowed wager and moves the winnings between stacks.
    pub fn apply(&self, player: &mut Participant, dealer: &mut Participant) {
        player.stack += self.wager + self.player_delta;
        dealer.stack += self.dealer_delta;
    }
}

/// Resolves a finished round by the payout table.
///
/// Special claims go first in precedence order; equal Ban Ban or Ban Luck
/// claims cancel out. Without a claim, busts and then values decide.
pub fn settle_round(player_final: u8, dealer_final: u8, claims: Claims, wager: Chips) -> Settlement {
    let Claims { player, dealer } = claims;
    if player.is_some() || dealer.is_some() {
        if player.is_initial() && player == dealer {
            let reason = Reason::from_special(player).unwrap_or(Reason::EqualValue);
            return Settlement::new(0, reason, player_final, dealer_final, wager);
        }
        let (multiplier, special) = if player.precedence() >= dealer.precedence() {
            (player.multiplier(), player)
        } else {
            (-dealer.multiplier(), dealer)
        };
        if let Some(reason) = Reason::from_special(special) {
            return Settlement::new(multiplier, reason, player_final, dealer_final, wager);
        }
    }

    let player_bust = player_final > BUST_LIMIT;
    let dealer_bust = dealer_final > BUST_LIMIT;
    let (multiplier, reason) = match (player_bust, dealer_bust) {
        (true, true) => (0, Reason::BothBust),
        (false, true) => (1, Reason::Bust),
        (true, false) => (-1, Reason::Bust),
        (false, false) if player_final > dealer_final => (1, Reason::HigherValue),
        (false, false) if player_final < dealer_final => (-1, Reason::HigherValue),
        (false, false) => (0, Reason::EqualValue),
    };
    Settlement::new(multiplier, reason, player_final, dealer_final, wager)
}
