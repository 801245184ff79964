use serde::Serialize;

use crate::deck::Rank;
use crate::hand::{Hand, BUST_LIMIT, MAX_HAND_SIZE};

/// Hand shapes that override a plain comparison of values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Special {
    BanBan,
    BanLuck,
    TripleSeven,
    WuLongWin,
    WuLongBust,
    None,
}

impl Special {
    /// Higher resolves first: Ban Ban > Ban Luck > Triple Seven > Wu Long.
    pub fn precedence(self) -> u8 {
        match self {
            Special::BanBan => 4,
            Special::BanLuck => 3,
            Special::TripleSeven => 2,
            Special::WuLongWin | Special::WuLongBust => 1,
            Special::None => 0,
        }
    }

    /// Multiplier from the holder's point of view.
    pub fn multiplier(self) -> i8 {
        match self {
            Special::BanBan => 3,
            Special::BanLuck => 2,
            Special::TripleSeven => 7,
            Special::WuLongWin => 2,
            Special::WuLongBust => -2,
            Special::None => 0,
        }
    }

    pub fn is_initial(self) -> bool {
        matches!(self, Special::BanBan | Special::BanLuck)
    }

    pub fn is_some(self) -> bool {
        self != Special::None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Claims {
    pub player: Special,
    pub dealer: Special,
}

impl Claims {
    pub const NONE: Claims = Claims {
        player: Special::None,
        dealer: Special::None,
    };

    pub fn player(special: Special) -> Self {
        Claims { player: special, dealer: Special::None }
    }

    pub fn dealer(special: Special) -> Self {
        Claims { player: Special::None, dealer: special }
    }

    pub fn is_empty(&self) -> bool {
        !self.player.is_some() && !self.dealer.is_some()
    }
}

pub fn is_ban_ban(hand: &Hand) -> bool {
    hand.len() == 2 && hand.all_rank(Rank::Ace)
}

pub fn is_ban_luck(hand: &Hand) -> bool {
    hand.len() == 2 && hand.totals().high == BUST_LIMIT
}

pub fn is_triple_seven(hand: &Hand) -> bool {
    hand.len() == 3 && hand.all_rank(Rank::Seven)
}

pub fn is_wu_long(hand: &Hand) -> bool {
    hand.len() == MAX_HAND_SIZE && hand.totals().low <= BUST_LIMIT
}

pub fn is_busted_wu_long(hand: &Hand) -> bool {
    hand.len() == MAX_HAND_SIZE && hand.totals().low > BUST_LIMIT
}

/// Classifies `hand` against the special shapes in precedence order.
///
/// Ban Ban and Ban Luck only count on the initial deal. A Ban Luck facing
/// an opponent's Ban Ban is reported as `None` since it cannot decide the
/// round.
pub fn classify_special(hand: &Hand, opponent: &Hand, initial_deal: bool) -> Special {
    if initial_deal && is_ban_ban(hand) {
        return Special::BanBan;
    }
    if initial_deal && is_ban_luck(hand) {
        if is_ban_ban(opponent) {
            return Special::None;
        }
        return Special::BanLuck;
    }
    if is_triple_seven(hand) {
        return Special::TripleSeven;
    }
    if is_wu_long(hand) {
        return Special::WuLongWin;
    }
    if is_busted_wu_long(hand) {
        return Special::WuLongBust;
    }
    Special::None
}
