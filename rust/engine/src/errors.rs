use thiserror::Error;

use crate::player::ActionKind;

/// Recoverable errors surfaced to the caller.
///
/// Invariant violations that would corrupt chip accounting are not
/// represented here; they panic at the point of detection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    #[error("Not enough players with chips to start a hand (have {have}, need 2)")]
    NotEnoughPlayers { have: usize },
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
    #[error("Deck is empty")]
    DeckExhausted,
    #[error("No action is awaited in phase {phase}")]
    NotAwaitingAction { phase: String },
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Action {action} is not available (available: {available:?})")]
    ActionNotAvailable {
        action: ActionKind,
        available: Vec<ActionKind>,
    },
    #[error("Table finished: fewer than two players have chips")]
    TableFinished,
}
