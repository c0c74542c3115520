use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::game::GameState;
use crate::player::ActionKind;

/// Betting situation of the player to act, captured from one snapshot.
///
/// Every amount is an absolute "raise to" street total. A raise to 300
/// against a bet of 100 means the player's bet becomes 300, not 400.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BettingContext {
    pub player_stack: u32,
    pub player_current_bet: u32,
    pub highest_bet: u32,
    pub pot_total: u32,
    pub min_raise_amount: u32,
    pub available_actions: Vec<ActionKind>,
}

/// How a target street total splits into calling and raising chips.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct BetBreakdown {
    pub call_portion: u32,
    pub raise_portion: u32,
    pub total_to_add: u32,
    pub stack_after: u32,
}

/// Serialized view of a [`BettingContext`], including derived amounts.
///
/// Field names are stable and consumed by display and storage layers.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BettingSnapshot {
    pub player_stack: u32,
    pub player_current_bet: u32,
    pub highest_bet: u32,
    pub pot_total: u32,
    pub min_raise_amount: u32,
    pub available_actions: Vec<ActionKind>,
    pub cost_to_call: u32,
    pub min_raise_to: u32,
    pub max_raise_to: u32,
    pub effective_stack: u32,
}

impl BettingContext {
    pub fn from_game_state(game_state: &GameState) -> Self {
        let player = game_state.current_player();
        Self {
            player_stack: player.stack(),
            player_current_bet: player.bet(),
            highest_bet: game_state.highest_bet(),
            pot_total: game_state.pot_total(),
            min_raise_amount: game_state.min_raise_amount(),
            available_actions: game_state.current_player_options(),
        }
    }

    pub fn cost_to_call(&self) -> u32 {
        self.highest_bet.saturating_sub(self.player_current_bet)
    }

    pub fn min_raise_to(&self) -> u32 {
        self.highest_bet + self.min_raise_amount
    }

    /// All-in ceiling.
    pub fn max_raise_to(&self) -> u32 {
        self.player_current_bet + self.player_stack
    }

    pub fn effective_stack(&self) -> u32 {
        self.player_stack.saturating_sub(self.cost_to_call())
    }

    /// Clamps a requested raise-to amount to the nearest legal one.
    ///
    /// Never rejects: the returned amount is always usable, and the message
    /// explains any correction that was made.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_engine::rules::BettingContext;
    ///
    /// let ctx = BettingContext {
    ///     player_stack: 1000,
    ///     player_current_bet: 0,
    ///     highest_bet: 100,
    ///     pot_total: 150,
    ///     min_raise_amount: 100,
    ///     available_actions: vec![],
    /// };
    /// // below the minimum: raised to 200
    /// let (amount, msg) = ctx.validate_and_sanitize(150);
    /// assert_eq!(amount, 200);
    /// assert!(msg.is_some());
    ///
    /// // more than the stack: all-in
    /// let (amount, _) = ctx.validate_and_sanitize(5000);
    /// assert_eq!(amount, 1000);
    /// ```
    pub fn validate_and_sanitize(&self, requested_raise_to: u32) -> (u32, Option<String>) {
        let max_to = self.max_raise_to();
        let min_to = self.min_raise_to();

        let (amount, message) = if requested_raise_to > max_to {
            (
                max_to,
                Some(format!(
                    "Raise to {requested_raise_to} exceeds available chips; going all-in for {max_to}"
                )),
            )
        } else if requested_raise_to == max_to {
            // all-in is exempt from the minimum raise
            (max_to, None)
        } else if requested_raise_to < min_to && max_to < min_to {
            (
                max_to,
                Some(format!(
                    "Raise to {requested_raise_to} is below the minimum of {min_to} and the stack cannot reach it; going all-in for {max_to}"
                )),
            )
        } else if requested_raise_to < min_to {
            (
                min_to,
                Some(format!(
                    "Raise to {requested_raise_to} is below the minimum; adjusted to {min_to}"
                )),
            )
        } else {
            (requested_raise_to, None)
        };

        if let Some(m) = &message {
            warn!(requested_raise_to, amount, "{m}");
        }
        (amount, message)
    }

    /// Splits a raise-to total into what calls and what raises.
    pub fn get_call_and_raise_breakdown(&self, raise_to: u32) -> BetBreakdown {
        let total_to_add = raise_to
            .saturating_sub(self.player_current_bet)
            .min(self.player_stack);
        let call_portion = self.cost_to_call().min(total_to_add);
        BetBreakdown {
            call_portion,
            raise_portion: total_to_add - call_portion,
            total_to_add,
            stack_after: self.player_stack - total_to_add,
        }
    }

    pub fn snapshot(&self) -> BettingSnapshot {
        BettingSnapshot {
            player_stack: self.player_stack,
            player_current_bet: self.player_current_bet,
            highest_bet: self.highest_bet,
            pot_total: self.pot_total,
            min_raise_amount: self.min_raise_amount,
            available_actions: self.available_actions.clone(),
            cost_to_call: self.cost_to_call(),
            min_raise_to: self.min_raise_to(),
            max_raise_to: self.max_raise_to(),
            effective_stack: self.effective_stack(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}
