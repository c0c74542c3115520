//! Command-line definitions (clap derive).

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "holdem", version, about = "Texas Hold'em rules engine CLI")]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal hole cards and a full board from a seeded deck
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        /// Number of seats (2-10); defaults to the configured value
        #[arg(long)]
        players: Option<usize>,
    },
    /// Evaluate 5 to 7 cards, e.g. `holdem eval As Kd Qh Jc Ts`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Play hands with a check/call policy and report each settlement
    Sim {
        #[arg(long, default_value_t = 10)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        players: Option<usize>,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Deal { .. } => "deal",
            Commands::Eval { .. } => "eval",
            Commands::Sim { .. } => "sim",
            Commands::Cfg => "cfg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        HoldemCli::command().debug_assert();
    }

    #[test]
    fn sim_defaults_to_ten_hands() {
        let cli = HoldemCli::try_parse_from(["holdem", "sim"]).unwrap();
        match cli.cmd {
            Commands::Sim { hands, seed, players } => {
                assert_eq!(hands, 10);
                assert!(seed.is_none() && players.is_none());
            }
            other => panic!("parsed {}", other.name()),
        }
    }
}
