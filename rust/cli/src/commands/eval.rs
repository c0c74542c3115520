//! Eval command: categorize five to seven cards.

use crate::error::CliError;
use crate::formatters::{format_cards, format_evaluation};
use holdem_engine::cards::parse_cards;
use holdem_engine::hand::evaluate_hand;
use std::collections::HashSet;
use std::io::Write;

/// Parses `cards` (e.g. `As Kd` or `"As Kd Qh"`), evaluates the best
/// five-card hand and prints its category, values and kickers.
pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(&cards.join(" "))?;
    if !(5..=7).contains(&cards.len()) {
        return Err(CliError::InvalidInput(format!(
            "expected 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    let unique: HashSet<_> = cards.iter().collect();
    if unique.len() != cards.len() {
        return Err(CliError::InvalidInput(format!(
            "duplicate card in {}",
            format_cards(&cards)
        )));
    }

    let result = evaluate_hand(&cards);
    writeln!(out, "Cards: {}", format_cards(&cards))?;
    writeln!(out, "{}", format_evaluation(&result))?;
    Ok(())
}
