//! Text formatting for cards, hands and settlements.
//!
//! Cards print in their two-character text form (`As`, `Td`), the same form
//! `holdem eval` accepts, so output can be pasted back in as input.
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_cli::formatters::format_board;
//!
//! let board = parse_cards("As Kd 7c").unwrap();
//! assert_eq!(format_board(&board), "[As Kd 7c]");
//! ```

use holdem_engine::cards::Card;
use holdem_engine::hand::HandEvaluationResult;
use holdem_engine::pot::WinnerInfo;

pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Board in bracket notation; an empty board prints as `[]`.
pub fn format_board(cards: &[Card]) -> String {
    format!("[{}]", format_cards(cards))
}

/// Rank symbols in order, e.g. `AK9`.
fn rank_symbols(result: &HandEvaluationResult, kickers: bool) -> String {
    let seq = if kickers {
        &result.kicker_values
    } else {
        &result.hand_values
    };
    seq.iter().map(|r| r.symbol()).collect()
}

/// Multi-line description of an evaluated hand.
pub fn format_evaluation(result: &HandEvaluationResult) -> String {
    let mut s = format!(
        "Category: {} (rank {})\nHand values: {}",
        result.category,
        result.hand_rank(),
        rank_symbols(result, false)
    );
    if !result.kicker_values.is_empty() {
        s.push_str(&format!("\nKickers: {}", rank_symbols(result, true)));
    }
    s
}

/// One line per pot tier and per returned stack.
pub fn format_winner_info(info: &WinnerInfo) -> Vec<String> {
    let mut lines = Vec::new();
    for tier in &info.pot_breakdown {
        let winners = tier
            .winners
            .iter()
            .map(|w| format!("{} +{}", w.name, w.amount))
            .collect::<Vec<_>>()
            .join(", ");
        let how = tier
            .winning_category
            .map(|c| format!(" with {}", c))
            .unwrap_or_else(|| " uncontested".to_string());
        lines.push(format!(
            "{} ({}): {}{}",
            tier.pot_name, tier.total_amount, winners, how
        ));
    }
    for (name, amount) in &info.returned_chips {
        lines.push(format!("Returned to {}: {}", name, amount));
    }
    lines
}
