//! Simulation command: plays hands through the state machine with a fixed
//! call-down policy and checks chip conservation after every hand.

use super::{resolve, seat_players};
use crate::error::CliError;
use crate::formatters::{format_board, format_winner_info};
use crate::ui;
use holdem_engine::engine::{Phase, PokerStateMachine};
use holdem_engine::errors::GameError;
use holdem_engine::game::GameState;
use holdem_engine::player::{ActionKind, PlayerAction};
use std::io::Write;
use tracing::debug;

/// Check when possible, call otherwise; all-in when the call can't be covered.
fn call_down(gs: &GameState) -> PlayerAction {
    let options = gs.current_player_options();
    if options.contains(&ActionKind::Check) {
        PlayerAction::Check
    } else if options.contains(&ActionKind::Call) {
        PlayerAction::Call
    } else {
        PlayerAction::AllIn
    }
}

pub fn handle_sim_command(
    hands: u64,
    seed: Option<u64>,
    players: Option<usize>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let (cfg, seed) = resolve(seed, players)?;
    let mut sm = PokerStateMachine::new(seat_players(&cfg), cfg.table, seed)?;
    let total_chips = sm.game_state().total_chips();
    writeln!(out, "Seed: {}", seed)?;

    let mut played = 0u64;
    while played < hands {
        match sm.run_until_player_action() {
            Ok(Phase::HandOver) => {
                played += 1;
                let gs = sm.game_state();
                if gs.total_chips() != total_chips {
                    return Err(CliError::Internal(format!(
                        "chip count changed from {} to {} in hand {}",
                        total_chips,
                        gs.total_chips(),
                        sm.hand_number()
                    )));
                }
                writeln!(
                    out,
                    "Hand {}: board {}",
                    sm.hand_number(),
                    format_board(gs.community_cards())
                )?;
                if let Some(info) = sm.last_winner_info() {
                    for line in format_winner_info(info) {
                        writeln!(out, "  {}", line)?;
                    }
                }
            }
            Ok(phase) => {
                let action = call_down(sm.game_state());
                debug!(%phase, seat = sm.game_state().current_player_idx(), ?action, "sim action");
                if let Some(msg) = sm.apply_action(action)? {
                    ui::display_warning(err, &msg)?;
                }
            }
            Err(GameError::TableFinished) => {
                writeln!(out, "Table finished after {} hands", played)?;
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let stacks = sm
        .game_state()
        .players()
        .iter()
        .map(|p| format!("{}={}", p.name(), p.stack()))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "Final stacks: {}", stacks)?;
    Ok(())
}
