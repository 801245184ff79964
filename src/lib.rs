use js_sys::Function;
use log::LevelFilter;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

pub mod chips;
pub mod config;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod logging;
pub mod session;
pub mod settle;
pub mod sim;
pub mod special;
pub mod strategy;

use chips::Chips;
use config::SessionConfig;
use error::GameError;
use rand::{rngs::SmallRng, SeedableRng};
use session::Session;
use sim::SimulationInput;

fn install_hooks(level: LevelFilter) {
    console_error_panic_hook::set_once();
    logging::init(level);
}

fn from_js<T: DeserializeOwned>(value: &JsValue, context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value.clone())
        .map_err(|err| JsValue::from_str(&format!("{context}: {err}")))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

/// Turns a rejected game action into the message a front end shows.
fn rejected(context: &'static str) -> impl Fn(GameError) -> JsValue {
    move |err| JsValue::from_str(&format!("{context}: {err}"))
}

fn simulate(params: &JsValue, on_progress: impl FnMut(u32, u32)) -> Result<JsValue, JsValue> {
    install_hooks(LevelFilter::Info);
    let input: SimulationInput = from_js(params, "Invalid input")?;
    let result = sim::run_with_progress(input, on_progress).map_err(rejected("Simulation failed"))?;
    to_js(&result)
}

#[wasm_bindgen]
pub fn run_simulation(params: &JsValue) -> Result<JsValue, JsValue> {
    simulate(params, |_current, _total| {})
}

/// `progress_callback(current, total)` fires every `progressInterval` rounds
/// and once at the end.
#[wasm_bindgen]
pub fn run_simulation_with_progress(
    params: &JsValue,
    progress_callback: &Function,
) -> Result<JsValue, JsValue> {
    simulate(params, |current, total| {
        let _ = progress_callback.call2(&JsValue::NULL, &current.into(), &total.into());
    })
}

#[wasm_bindgen]
pub fn play_single_round(params: &JsValue) -> Result<JsValue, JsValue> {
    install_hooks(LevelFilter::Info);
    let input: SimulationInput = from_js(params, "Invalid input")?;
    let strategy = strategy::Strategy::from_input(input.strategy).map_err(rejected("Strategy error"))?;
    let mut rng = SmallRng::seed_from_u64(input.seed);
    let record = sim::play_round(&mut rng, &strategy, input.wager).map_err(rejected("Round failed"))?;
    to_js(&record)
}

/// Interactive table for a front end: one player against the dealer.
#[wasm_bindgen]
pub struct BanLuckTable {
    session: Session,
}

#[wasm_bindgen]
impl BanLuckTable {
    #[wasm_bindgen(constructor)]
    pub fn new(params: &JsValue) -> Result<BanLuckTable, JsValue> {
        let config: SessionConfig = if params.is_undefined() || params.is_null() {
            SessionConfig::default()
        } else {
            from_js(params, "Invalid config")?
        };
        install_hooks(config.level_filter().map_err(rejected("Invalid config"))?);
        let session = Session::new(config).map_err(rejected("Invalid config"))?;
        Ok(BanLuckTable { session })
    }

    pub fn deal(&mut self) -> Result<JsValue, JsValue> {
        self.session.deal().map_err(rejected("Deal rejected"))?;
        self.snapshot()
    }

    /// `amount` is in whole units and rounds to the nearest cent.
    pub fn bet(&mut self, amount: f64) -> Result<JsValue, JsValue> {
        let bet_rejected = rejected("Bet rejected");
        let amount = Chips::try_from(amount).map_err(&bet_rejected)?;
        let progress = self.session.bet(amount).map_err(bet_rejected)?;
        to_js(&progress)
    }

    pub fn hit(&mut self) -> Result<JsValue, JsValue> {
        let progress = self.session.hit().map_err(rejected("Hit rejected"))?;
        to_js(&progress)
    }

    pub fn stand(&mut self) -> Result<JsValue, JsValue> {
        let progress = self.session.stand().map_err(rejected("Stand rejected"))?;
        to_js(&progress)
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> Result<JsValue, JsValue> {
        self.session.new_game();
        self.snapshot()
    }

    #[wasm_bindgen(js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.snapshot())
    }
}
