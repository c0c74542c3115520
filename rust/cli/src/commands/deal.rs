//! Deal command: one seeded deal of hole cards and a full board.

use super::{resolve, seat_players};
use crate::error::CliError;
use crate::formatters::format_cards;
use holdem_engine::deck::Deck;
use holdem_engine::game::GameState;
use holdem_engine::hand::evaluate_hand;
use std::io::Write;

/// Deals hole cards to every seat and runs the board out, burning before
/// each street, then prints each player's best hand.
pub fn handle_deal_command(
    seed: Option<u64>,
    players: Option<usize>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let (cfg, seed) = resolve(seed, players)?;
    let mut deck = Deck::new_with_seed(seed);
    deck.shuffle();

    let gs = GameState::new(seat_players(&cfg), &cfg.table)
        .start_hand(0)
        .deal_hole_cards(&mut deck)?
        .deal_community_cards(&mut deck, 3)?
        .deal_community_cards(&mut deck, 1)?
        .deal_community_cards(&mut deck, 1)?;

    writeln!(out, "Seed: {}", seed)?;
    for p in gs.players() {
        let mut cards = p.hand().to_vec();
        cards.extend_from_slice(gs.community_cards());
        let best = evaluate_hand(&cards);
        writeln!(out, "Hole {}: {} ({})", p.name(), format_cards(p.hand()), best.category)?;
    }
    writeln!(out, "Board: {}", format_cards(gs.community_cards()))?;
    Ok(())
}
