use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;

use crate::{
    chips::Chips,
    config::SessionConfig,
    deck::{Card, Deck},
    error::GameError,
    game::{Participant, Phase, Progress, Round},
    hand::HandTotals,
    settle::Settlement,
};

const DEALER_NAME: &str = "Computer dealer";

/// What a front end may show of the table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    pub player: Participant,
    pub dealer: Participant,
    pub phase: Option<Phase>,
    pub wager: Chips,
    pub player_cards: Vec<Card>,
    pub player_totals: Option<HandTotals>,
    /// Only the face-up card until the round is settled.
    pub dealer_cards: Vec<Card>,
    pub settlement: Option<Settlement>,
    pub rounds_played: u32,
    pub games_played: u32,
    pub game_over: bool,
}

/// A sequence of rounds between one player and the dealer. Stacks carry
/// over between rounds; `new_game` starts over once a stack runs dry.
pub struct Session {
    config: SessionConfig,
    rng: SmallRng,
    player: Participant,
    dealer: Participant,
    round: Option<Round>,
    rounds_played: u32,
    games_played: u32,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, GameError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let player = Participant::new(config.player_name.clone(), config.starting_stack);
        let dealer = Participant::new(DEALER_NAME, config.dealer_stack());
        log::info!(
            "session opened for {} with {} against {}",
            player.name,
            player.stack,
            dealer.stack
        );
        Ok(Session {
            config,
            rng,
            player,
            dealer,
            round: None,
            rounds_played: 0,
            games_played: 1,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn player(&self) -> &Participant {
        &self.player
    }

    pub fn dealer(&self) -> &Participant {
        &self.dealer
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn is_over(&self) -> bool {
        self.player.is_broke() || self.dealer.is_broke()
    }

    /// Shuffles a fresh deck and deals the next round.
    pub fn deal(&mut self) -> Result<&Round, GameError> {
        if self.round.as_ref().is_some_and(|round| !round.is_settled()) {
            return Err(GameError::RoundInProgress);
        }
        if self.is_over() {
            return Err(GameError::SessionOver);
        }
        let round = Round::deal(Deck::shuffled(&mut self.rng))?;
        log::info!("dealing round {}", self.rounds_played + 1);
        Ok(&*self.round.insert(round))
    }

    pub fn bet(&mut self, amount: Chips) -> Result<Progress, GameError> {
        let round = self.round.as_mut().ok_or(GameError::NoRound)?;
        let progress = round.bet(&mut self.player, amount)?;
        self.record(&progress);
        Ok(progress)
    }

    pub fn hit(&mut self) -> Result<Progress, GameError> {
        let progress = self.round.as_mut().ok_or(GameError::NoRound)?.hit()?;
        self.record(&progress);
        Ok(progress)
    }

    pub fn stand(&mut self) -> Result<Progress, GameError> {
        let progress = self.round.as_mut().ok_or(GameError::NoRound)?.stand()?;
        self.record(&progress);
        Ok(progress)
    }

    /// Resets both stacks to their configured values for a replay.
    pub fn new_game(&mut self) {
        self.player.stack = self.config.starting_stack;
        self.dealer.stack = self.config.dealer_stack();
        self.round = None;
        self.rounds_played = 0;
        self.games_played += 1;
        log::info!("starting game {}", self.games_played);
    }

    pub fn snapshot(&self) -> TableSnapshot {
        let round = self.round.as_ref();
        let settled = round.is_some_and(Round::is_settled);
        let dealer_cards = match round {
            Some(round) if settled => round.dealer().hand.cards().to_vec(),
            Some(round) => round.dealer_up_card().copied().into_iter().collect(),
            None => Vec::new(),
        };
        TableSnapshot {
            player: self.player.clone(),
            dealer: self.dealer.clone(),
            phase: round.map(Round::phase),
            wager: round.map_or(Chips::ZERO, Round::wager),
            player_cards: round.map_or_else(Vec::new, |round| round.player().hand.cards().to_vec()),
            player_totals: round.map(|round| round.player().totals()),
            dealer_cards,
            settlement: round.and_then(Round::settlement).cloned(),
            rounds_played: self.rounds_played,
            games_played: self.games_played,
            game_over: self.is_over(),
        }
    }

    fn record(&mut self, progress: &Progress) {
        let Progress::Settled(settlement) = progress else {
            return;
        };
        settlement.apply(&mut self.player, &mut self.dealer);
        self.rounds_played += 1;
        log::info!(
            "stacks after round {}: {} {}, {} {}",
            self.rounds_played,
            self.player.name,
            self.player.stack,
            self.dealer.name,
            self.dealer.stack
        );
        if self.player.is_broke() {
            log::info!("{} has lost the whole stack", self.player.name);
        } else if self.dealer.is_broke() {
            log::info!("the dealer has lost the whole stack");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Session {
        Session::new(SessionConfig {
            player_name: "Mei".to_string(),
            starting_stack: Chips::whole(50),
            seed: Some(seed),
            ..SessionConfig::default()
        })
        .unwrap()
    }

    fn play_round(session: &mut Session, wager: Chips) -> Settlement {
        session.deal().unwrap();
        play_round_from_bet(session, wager)
    }

    /// Bets, then hits until the hand can stand and stands.
    fn play_round_from_bet(session: &mut Session, wager: Chips) -> Settlement {
        let mut progress = session.bet(wager).unwrap();
        loop {
            match progress {
                Progress::Settled(settlement) => return settlement,
                Progress::PlayerToAct => {
                    progress = match session.stand() {
                        Err(GameError::IllegalStand { .. }) => session.hit().unwrap(),
                        other => other.unwrap(),
                    };
                }
            }
        }
    }

    #[test]
    fn actions_need_a_round() {
        let mut session = seeded(1);
        assert_eq!(session.bet(Chips::whole(5)), Err(GameError::NoRound));
        assert_eq!(session.hit(), Err(GameError::NoRound));
        assert_eq!(session.stand(), Err(GameError::NoRound));
    }

    #[test]
    fn cannot_deal_over_an_open_round() {
        let mut session = seeded(2);
        session.deal().unwrap();
        assert!(matches!(session.deal(), Err(GameError::RoundInProgress)));
    }

    #[test]
    fn rejected_bet_keeps_the_stack() {
        let mut session = seeded(3);
        session.deal().unwrap();
        assert_eq!(
            session.bet(Chips::whole(80)),
            Err(GameError::InsufficientFunds {
                wager: Chips::whole(80),
                stack: Chips::whole(50),
            })
        );
        assert_eq!(session.player().stack, Chips::whole(50));
        assert_eq!(session.round().map(Round::phase), Some(Phase::PlayerBetting));
    }

    #[test]
    fn chips_are_conserved_across_rounds() {
        let mut session = seeded(4);
        for _ in 0..20 {
            if session.is_over() {
                break;
            }
            let wager = session.player().stack.min(Chips::whole(5));
            play_round(&mut session, wager);
            assert_eq!(session.player().stack + session.dealer().stack, Chips::whole(100));
        }
    }

    #[test]
    fn cent_wagers_keep_the_table_total() {
        let mut session = seeded(7);
        for n in 1..=200 {
            if session.is_over() {
                session.new_game();
            }
            let wager = Chips::from_cents(n * 37 % 500 + 1).min(session.player().stack);
            play_round(&mut session, wager);
            assert_eq!(session.player().stack + session.dealer().stack, Chips::whole(100));
        }
    }

    #[test]
    fn same_seed_same_rounds() {
        let mut first = seeded(42);
        let mut second = seeded(42);
        for _ in 0..5 {
            assert_eq!(play_round(&mut first, Chips::whole(1)), play_round(&mut second, Chips::whole(1)));
        }
    }

    #[test]
    fn session_ends_when_a_stack_is_gone_and_replays() {
        let mut session = seeded(5);
        while !session.is_over() {
            let wager = session.player().stack;
            play_round(&mut session, wager);
        }
        assert!(matches!(session.deal(), Err(GameError::SessionOver)));
        assert!(session.snapshot().game_over);

        session.new_game();
        assert_eq!(session.player().stack, Chips::whole(50));
        assert_eq!(session.dealer().stack, Chips::whole(50));
        assert_eq!(session.rounds_played(), 0);
        assert_eq!(session.snapshot().games_played, 2);
        assert!(session.deal().is_ok());
    }

    #[test]
    fn snapshot_hides_the_dealer_hole_card() {
        let mut session = seeded(6);
        session.deal().unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Some(Phase::PlayerBetting));
        assert_eq!(snapshot.player_cards.len(), 2);
        assert_eq!(snapshot.dealer_cards.len(), 1);

        let settlement = play_round_from_bet(&mut session, Chips::whole(1));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Some(Phase::Settled));
        assert!(snapshot.dealer_cards.len() >= 2);
        assert_eq!(snapshot.settlement, Some(settlement));
    }
}
