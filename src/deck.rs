use std::fmt;

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const DECK_SIZE: usize = 52;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn value(self) -> CardValue {
        match self {
            Rank::Ace => CardValue::ACE,
            Rank::Two => CardValue::Fixed(2),
            Rank::Three => CardValue::Fixed(3),
            Rank::Four => CardValue::Fixed(4),
            Rank::Five => CardValue::Fixed(5),
            Rank::Six => CardValue::Fixed(6),
            Rank::Seven => CardValue::Fixed(7),
            Rank::Eight => CardValue::Fixed(8),
            Rank::Nine => CardValue::Fixed(9),
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => CardValue::Fixed(10),
        }
    }
}

/// Point value of a card. An ace counts differently depending on how many
/// cards share the hand, so it carries every candidate value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardValue {
    Fixed(u8),
    #[serde(rename_all = "camelCase")]
    Ace { low: u8, mid_hand: u8, high_pair: u8 },
}

impl CardValue {
    pub const ACE: CardValue = CardValue::Ace {
        low: 1,
        mid_hand: 10,
        high_pair: 11,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    pub fn value(&self) -> CardValue {
        self.rank.value()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} of {:?}", self.rank, self.suit)
    }
}

/// A single 52-card deck. The top of the deck is the end of the vector.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Canonical order: suit by suit, ace to king.
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Deck::new();
        deck.shuffle(rng);
        deck
    }

    /// Builds a deck in the given order; the last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}
