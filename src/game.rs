use serde::Serialize;

use crate::{
    chips::Chips,
    deck::{Card, Deck},
    error::GameError,
    hand::{Hand, HandTotals, Standing, BUST_LIMIT},
    settle::{settle_round, Settlement},
    special::{classify_special, Claims},
};

/// The part of a participant that outlives a round.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    pub stack: Chips,
}

impl Participant {
    pub fn new(name: impl Into<String>, stack: Chips) -> Self {
        Participant { name: name.into(), stack }
    }

    pub fn is_broke(&self) -> bool {
        !self.stack.is_positive()
    }
}

/// A participant's hand for the duration of one round.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub hand: Hand,
    pub final_value: Option<u8>,
}

impl Seat {
    pub fn totals(&self) -> HandTotals {
        self.hand.totals()
    }

    fn settle_value(&self) -> u8 {
        self.final_value.unwrap_or_else(|| self.totals().best())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Dealing,
    PlayerBetting,
    PlayerActing,
    DealerActing,
    Showdown,
    Settled,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "settlement", rename_all = "camelCase")]
pub enum Progress {
    PlayerToAct,
    Settled(Settlement),
}

pub fn place_bet(player: &mut Participant, amount: Chips) -> Result<(), GameError> {
    if !amount.is_positive() {
        return Err(GameError::InvalidAmount(amount.to_f64()));
    }
    if amount > player.stack {
        return Err(GameError::InsufficientFunds {
            wager: amount,
            stack: player.stack,
        });
    }
    player.stack -= amount;
    Ok(())
}

/// Deals two cards each, alternating and starting with the player.
pub fn deal_initial(deck: &mut Deck, player: &mut Hand, dealer: &mut Hand) -> Result<(), GameError> {
    for _ in 0..2 {
        player.push(deck.draw()?);
        dealer.push(deck.draw()?);
    }
    Ok(())
}

pub fn player_hit(hand: &mut Hand, deck: &mut Deck) -> Result<Card, GameError> {
    if hand.is_full() {
        return Err(GameError::HandFull);
    }
    let card = deck.draw()?;
    hand.push(card);
    Ok(card)
}

/// Dealer draws until the hand can stand, busts or holds five cards.
/// Returns the final value, which is the ace-low total on a bust or a
/// fifth card.
pub fn dealer_auto_play(dealer: &mut Hand, deck: &mut Deck) -> Result<u8, GameError> {
    loop {
        if let Standing::Standable(value) = dealer.standing_value() {
            return Ok(value);
        }
        dealer.push(deck.draw()?);
        let totals = dealer.totals();
        if totals.is_bust() || dealer.is_full() {
            return Ok(totals.low);
        }
    }
}

/// Context of one round. Stacks stay with the session; the round only
/// escrows the wager and produces a `Settlement`.
#[derive(Clone, Debug)]
pub struct Round {
    deck: Deck,
    player: Seat,
    dealer: Seat,
    wager: Chips,
    phase: Phase,
    settlement: Option<Settlement>,
}

impl Round {
    pub fn deal(deck: Deck) -> Result<Self, GameError> {
        let mut round = Round {
            deck,
            player: Seat::default(),
            dealer: Seat::default(),
            wager: Chips::ZERO,
            phase: Phase::Dealing,
            settlement: None,
        };
        deal_initial(&mut round.deck, &mut round.player.hand, &mut round.dealer.hand)?;
        round.phase = Phase::PlayerBetting;
        Ok(round)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn wager(&self) -> Chips {
        self.wager
    }

    pub fn player(&self) -> &Seat {
        &self.player
    }

    pub fn dealer(&self) -> &Seat {
        &self.dealer
    }

    pub fn dealer_up_card(&self) -> Option<&Card> {
        self.dealer.hand.cards().first()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    pub fn is_settled(&self) -> bool {
        self.phase == Phase::Settled
    }

    /// Escrows the wager and checks the dealt hands for Ban Ban and Ban Luck.
    pub fn bet(&mut self, bettor: &mut Participant, amount: Chips) -> Result<Progress, GameError> {
        self.require_phase(Phase::PlayerBetting)?;
        place_bet(bettor, amount)?;
        self.wager = amount;
        log::debug!("{} wagers {}", bettor.name, amount);

        let claims = Claims {
            player: classify_special(&self.player.hand, &self.dealer.hand, true),
            dealer: classify_special(&self.dealer.hand, &self.player.hand, true),
        };
        if claims.player.is_initial() || claims.dealer.is_initial() {
            return Ok(self.settle(claims));
        }
        self.phase = Phase::PlayerActing;
        Ok(Progress::PlayerToAct)
    }

    pub fn hit(&mut self) -> Result<Progress, GameError> {
        self.require_phase(Phase::PlayerActing)?;
        let card = player_hit(&mut self.player.hand, &mut self.deck).inspect_err(log_fatal)?;
        log::debug!("player draws {card}");

        let special = classify_special(&self.player.hand, &self.dealer.hand, false);
        if special.is_some() {
            return Ok(self.settle(Claims::player(special)));
        }

        let totals = self.player.totals();
        if totals.is_bust() || totals.low == BUST_LIMIT {
            self.player.final_value = Some(totals.low);
            return self.dealer_turn();
        }
        Ok(Progress::PlayerToAct)
    }

    /// Rejected with `IllegalStand` while the hand is below 16; the round
    /// stays with the player.
    pub fn stand(&mut self) -> Result<Progress, GameError> {
        self.require_phase(Phase::PlayerActing)?;
        match self.player.hand.standing_value() {
            Standing::Standable(value) => {
                self.player.final_value = Some(value);
                self.dealer_turn()
            }
            Standing::NotStandable => {
                let HandTotals { low, high } = self.player.totals();
                Err(GameError::IllegalStand { low, high })
            }
        }
    }

    fn dealer_turn(&mut self) -> Result<Progress, GameError> {
        self.phase = Phase::DealerActing;
        let value = dealer_auto_play(&mut self.dealer.hand, &mut self.deck).inspect_err(log_fatal)?;
        self.dealer.final_value = Some(value);
        log::debug!("dealer finishes on {value} with {} cards", self.dealer.hand.len());

        self.phase = Phase::Showdown;
        let special = classify_special(&self.dealer.hand, &self.player.hand, false);
        Ok(self.settle(Claims::dealer(special)))
    }

    fn settle(&mut self, claims: Claims) -> Progress {
        let settlement = settle_round(
            self.player.settle_value(),
            self.dealer.settle_value(),
            claims,
            self.wager,
        );
        log::info!("round settled: {}", settlement.description);
        self.phase = Phase::Settled;
        self.settlement = Some(settlement.clone());
        Progress::Settled(settlement)
    }

    fn require_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::OutOfPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Cards left in the deck plus cards in both hands.
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.player.hand.len() + self.dealer.hand.len()
    }
}

fn log_fatal(err: &GameError) {
    log::error!("round aborted: {err}");
}
