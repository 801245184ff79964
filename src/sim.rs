use std::collections::HashMap;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    chips::Chips,
    deck::{Card, Deck},
    error::GameError,
    game::{Participant, Progress, Round},
    settle::{Outcome, Settlement},
    strategy::{Action, Strategy, StrategyInput},
};

fn default_wager() -> Chips {
    Chips::whole(10)
}

fn default_progress_interval() -> u32 {
    10_000
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    pub iterations: u32,
    pub seed: u64,
    #[serde(default)]
    pub strategy: StrategyInput,
    #[serde(default = "default_wager")]
    pub wager: Chips,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub total_rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Rounds keyed by what decided them ("ban luck", "bust", ...).
    pub reasons: HashMap<String, u32>,
    pub total_winnings: Chips,
    pub total_wagered: Chips,
    pub expected_value: f64,
    pub win_rate: f64,
    pub return_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    /// Player decisions in order, `H` for hit and `S` for stand.
    pub actions: String,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub settlement: Settlement,
}

pub fn run(input: SimulationInput) -> Result<SimulationResult, GameError> {
    run_with_progress(input, |_current, _total| {})
}

pub fn run_with_progress<F>(input: SimulationInput, mut progress_cb: F) -> Result<SimulationResult, GameError>
where
    F: FnMut(u32, u32),
{
    let strategy = Strategy::from_input(input.strategy)?;
    let wager = input.wager;
    if !wager.is_positive() {
        return Err(GameError::InvalidAmount(wager.to_f64()));
    }
    let mut rng = SmallRng::seed_from_u64(input.seed);
    let progress_interval = input.progress_interval.max(1);
    log::info!(
        "simulating {} rounds standing on {}",
        input.iterations,
        strategy.stand_on()
    );

    let mut wins = 0;
    let mut losses = 0;
    let mut draws = 0;
    let mut reasons: HashMap<String, u32> = HashMap::new();
    let mut total_winnings = Chips::ZERO;
    let mut total_wagered = Chips::ZERO;

    for round_index in 0..input.iterations {
        let record = play_round(&mut rng, &strategy, wager)?;
        let settlement = &record.settlement;
        match settlement.outcome {
            Outcome::PlayerWins => wins += 1,
            Outcome::DealerWins => losses += 1,
            Outcome::Draw => draws += 1,
        }
        *reasons.entry(settlement.reason.to_string()).or_default() += 1;
        total_winnings += settlement.player_delta;
        total_wagered += settlement.wager;

        let completed = round_index + 1;
        if completed % progress_interval == 0 || completed == input.iterations {
            log::debug!("simulated {completed}/{}", input.iterations);
            progress_cb(completed, input.iterations);
        }
    }

    let total_rounds = input.iterations;
    let expected_value = if total_rounds > 0 {
        total_winnings.to_f64() / total_rounds as f64
    } else {
        0.0
    };
    let win_rate = if total_rounds > 0 {
        (wins as f64 / total_rounds as f64) * 100.0
    } else {
        0.0
    };
    let return_rate = if total_wagered.is_positive() {
        (total_winnings.to_f64() / total_wagered.to_f64()) * 100.0
    } else {
        0.0
    };

    Ok(SimulationResult {
        total_rounds,
        wins,
        losses,
        draws,
        reasons,
        total_winnings,
        total_wagered,
        expected_value,
        win_rate,
        return_rate,
    })
}

/// Plays one round on a fresh deck with the given policy. The bankroll only
/// covers the wager, so stacks are not tracked across rounds.
pub fn play_round<R: Rng + ?Sized>(
    rng: &mut R,
    strategy: &Strategy,
    wager: Chips,
) -> Result<RoundRecord, GameError> {
    let mut bankroll = Participant::new("Simulated player", wager);
    let mut round = Round::deal(Deck::shuffled(rng))?;
    let mut progress = round.bet(&mut bankroll, wager)?;
    let mut actions = String::new();

    let settlement = loop {
        match progress {
            Progress::Settled(settlement) => break settlement,
            Progress::PlayerToAct => {
                let action = strategy.decide_action(&round.player().hand);
                actions.push_str(action.as_code());
                progress = match action {
                    Action::Hit => round.hit()?,
                    Action::Stand => round.stand()?,
                };
            }
        }
    };

    Ok(RoundRecord {
        actions,
        player_cards: round.player().hand.cards().to_vec(),
        dealer_cards: round.dealer().hand.cards().to_vec(),
        settlement,
    })
}
