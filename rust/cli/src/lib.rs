//! # holdem CLI Library
//!
//! Command-line front end for the `holdem-engine` crate. The primary entry
//! point is [`run`], which parses arguments and dispatches to a subcommand,
//! writing to the given streams so it can be driven from tests.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = holdem_cli::run(["holdem", "eval", "As", "Ks", "Qs", "Js", "Ts"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Straight Flush"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal a single hand for inspection
//! - `eval`: Evaluate 5 to 7 cards
//! - `sim`: Play hands through the state machine with a call-down policy
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod ui;

use cli::{Commands, HoldemCli};
use commands::{handle_cfg_command, handle_deal_command, handle_eval_command, handle_sim_command};

pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "eval", "sim", "cfg"];

/// Parses `args` and runs the selected command.
///
/// Returns `0` on success and `2` on any error; errors are written to `err`.
/// Help and version output go to `out` with exit code `0`.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Deal { seed, players } => handle_deal_command(seed, players, out),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Sim {
            hands,
            seed,
            players,
        } => handle_sim_command(hands, seed, players, out, err),
        Commands::Cfg => handle_cfg_command(out),
    };
    if let Err(e) = &result {
        if ui::write_error(err, &e.to_string()).is_err() {
            return exit_code::ERROR;
        }
    }
    exit_code::from_result(&result)
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = write_usage(e, err);
    exit_code::ERROR
}

fn write_usage(e: clap::Error, err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err, "Usage: holdem <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: holdem --help")
}
