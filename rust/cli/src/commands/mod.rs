//! Command handler modules for the holdem CLI.
//!
//! Each command lives in its own module and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, taking its output
//! streams as `&mut dyn Write` so tests can capture them.

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use sim::handle_sim_command;

use crate::config::{self, Config};
use crate::error::CliError;
use holdem_engine::player::Player;

/// Resolved config with the command-line overrides applied.
pub(crate) fn resolve(seed: Option<u64>, players: Option<usize>) -> Result<(Config, u64), CliError> {
    let mut cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(n) = players {
        config::validate_players(n).map_err(|e| CliError::InvalidInput(e.to_string()))?;
        cfg.players = n;
    }
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    Ok((cfg, seed))
}

/// Seats `P1..Pn`, each with the configured starting stack.
pub(crate) fn seat_players(cfg: &Config) -> Vec<Player> {
    (1..=cfg.players)
        .map(|i| Player::new(format!("P{}", i), cfg.table.starting_stack))
        .collect()
}
