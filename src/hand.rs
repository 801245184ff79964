use serde::Serialize;

use crate::deck::{Card, CardValue, Rank};

/// Five cards is the structural cap of a hand (the Wu Long rule).
pub const MAX_HAND_SIZE: usize = 5;
pub const MIN_STAND: u8 = 16;
pub const BUST_LIMIT: u8 = 21;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::with_capacity(MAX_HAND_SIZE) }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Hand { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= MAX_HAND_SIZE
    }

    pub fn has_ace(&self) -> bool {
        self.cards.iter().any(Card::is_ace)
    }

    pub fn all_rank(&self, rank: Rank) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.rank == rank)
    }

    pub fn totals(&self) -> HandTotals {
        evaluate(self)
    }

    pub fn standing_value(&self) -> Standing {
        standing_value(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HandTotals {
    pub low: u8,
    pub high: u8,
}

impl HandTotals {
    pub fn is_bust(&self) -> bool {
        self.low > BUST_LIMIT
    }

    /// The larger total that does not exceed 21, falling back to the low one.
    pub fn best(&self) -> u8 {
        if self.high <= BUST_LIMIT {
            self.high.max(self.low)
        } else {
            self.low
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Standing {
    NotStandable,
    Standable(u8),
}

/// Ace-low and ace-high totals. An ace is worth 1 or 11 in a two-card hand,
/// 1 or 10 in a three-card hand and only 1 beyond that.
pub fn evaluate(hand: &Hand) -> HandTotals {
    let size = hand.len();
    let mut low = 0u8;
    let mut high = 0u8;
    for card in hand.cards() {
        match card.value() {
            CardValue::Fixed(value) => {
                low = low.saturating_add(value);
                high = high.saturating_add(value);
            }
            CardValue::Ace { low: one, mid_hand, high_pair } => {
                low = low.saturating_add(one);
                high = high.saturating_add(match size {
                    2 => high_pair,
                    3 => mid_hand,
                    _ => one,
                });
            }
        }
    }
    HandTotals { low, high }
}

pub fn standing_value(hand: &Hand) -> Standing {
    let HandTotals { low, high } = evaluate(hand);
    [low, high]
        .into_iter()
        .filter(|value| (MIN_STAND..=BUST_LIMIT).contains(value))
        .max()
        .map_or(Standing::NotStandable, Standing::Standable)
}
