use crate::cards::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A player's decision during a betting round.
///
/// Amounts are absolute "raise to" totals for the current street, never
/// increments over the current bet.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet
    Call,
    /// Raise the street bet to the given total
    Raise(u32),
    /// Bet all remaining chips
    AllIn,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::AllIn => ActionKind::AllIn,
        }
    }
}

/// Action names without amounts, as offered to the player to act.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all_in",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One seat at the table.
///
/// Players are owned by [`crate::game::GameState`]; every change produces a
/// new snapshot, so the fields are read through accessors and only the game
/// module rewrites them.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) stack: u32,
    /// Chips put in on the current street, not yet swept into the pot.
    pub(crate) bet: u32,
    pub(crate) hand: Vec<Card>,
    pub(crate) is_folded: bool,
    pub(crate) is_all_in: bool,
    pub(crate) has_acted: bool,
    pub(crate) is_human: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u32) -> Self {
        Self {
            name: name.into(),
            stack,
            bet: 0,
            hand: Vec::with_capacity(2),
            is_folded: false,
            is_all_in: false,
            has_acted: false,
            is_human: false,
        }
    }

    pub fn human(mut self) -> Self {
        self.is_human = true;
        self
    }

    /// Sets the street bet, mostly useful for building snapshots in tests
    /// and when restoring a persisted hand.
    pub fn with_bet(mut self, bet: u32) -> Self {
        self.bet = bet;
        self
    }

    pub fn with_hand(mut self, hand: [Card; 2]) -> Self {
        self.hand = hand.to_vec();
        self
    }

    pub fn folded(mut self) -> Self {
        self.is_folded = true;
        self
    }

    pub fn all_in(mut self) -> Self {
        self.is_all_in = true;
        self
    }

    pub fn acted(mut self) -> Self {
        self.has_acted = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn bet(&self) -> u32 {
        self.bet
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn is_folded(&self) -> bool {
        self.is_folded
    }
    pub fn is_all_in(&self) -> bool {
        self.is_all_in
    }
    pub fn has_acted(&self) -> bool {
        self.has_acted
    }
    pub fn is_human(&self) -> bool {
        self.is_human
    }

    /// Still contesting the pot and holding chips to act with.
    pub fn can_act(&self) -> bool {
        !self.is_folded && !self.is_all_in && self.stack > 0
    }

    /// Moves up to `amount` from the stack into the street bet and returns
    /// what was actually moved. Emptying the stack marks the player all-in.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.stack);
        self.stack -= moved;
        self.bet += moved;
        if self.stack == 0 {
            self.is_all_in = true;
        }
        moved
    }

    pub(crate) fn reset_for_new_hand(&mut self) {
        self.bet = 0;
        self.hand.clear();
        self.has_acted = false;
        self.is_all_in = false;
        // an empty stack sits the hand out
        self.is_folded = self.stack == 0;
    }
}
