//! Immutable hand snapshots.
//!
//! [`GameState`] is never edited in place by callers. Every transition in
//! this module borrows the current snapshot and returns a fresh one, so
//! older snapshots stay valid for replay or audit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::{ActionKind, Player, PlayerAction};
use crate::rules::BettingContext;

/// Stakes and buy-in for a table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 50,
            big_blind: 100,
            starting_stack: 10_000,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.big_blind == 0 {
            return Err(GameError::InvalidConfig("big_blind must be > 0".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(GameError::InvalidConfig(
                "small_blind must not exceed big_blind".into(),
            ));
        }
        if self.starting_stack == 0 {
            return Err(GameError::InvalidConfig("starting_stack must be > 0".into()));
        }
        Ok(())
    }
}

/// Chips already swept in from closed betting rounds, tracked per seat.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pot {
    total: u32,
    contributions: Vec<u32>,
}

impl Pot {
    pub fn for_seats(seats: usize) -> Self {
        Self {
            total: 0,
            contributions: vec![0; seats],
        }
    }

    pub fn from_contributions(contributions: Vec<u32>) -> Self {
        Self {
            total: contributions.iter().sum(),
            contributions,
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn contributions(&self) -> &[u32] {
        &self.contributions
    }

    pub fn contribution(&self, seat: usize) -> u32 {
        self.contributions.get(seat).copied().unwrap_or(0)
    }

    fn add(&mut self, seat: usize, amount: u32) {
        self.contributions[seat] += amount;
        self.total += amount;
    }
}

/// Snapshot of a hand in progress.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    players: Vec<Player>,
    community_cards: Vec<Card>,
    pot: Pot,
    dealer_idx: usize,
    current_player_idx: usize,
    small_blind: u32,
    big_blind: u32,
    min_raise_amount: u32,
    awaiting_action: bool,
    run_it_out: bool,
}

impl GameState {
    /// Builds the opening snapshot for `players` in seat order.
    ///
    /// # Panics
    ///
    /// Panics on an empty player list.
    pub fn new(players: Vec<Player>, config: &TableConfig) -> Self {
        assert!(!players.is_empty(), "a table needs at least one seat");
        Self {
            pot: Pot::for_seats(players.len()),
            players,
            community_cards: Vec::with_capacity(5),
            dealer_idx: 0,
            current_player_idx: 0,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            min_raise_amount: config.big_blind,
            awaiting_action: false,
            run_it_out: false,
        }
    }

    pub fn with_dealer(mut self, dealer_idx: usize) -> Self {
        self.dealer_idx = dealer_idx % self.players.len();
        self
    }

    pub fn with_current_player(mut self, idx: usize) -> Self {
        self.current_player_idx = idx % self.players.len();
        self
    }

    pub fn with_community_cards(mut self, cards: Vec<Card>) -> Self {
        assert!(
            matches!(cards.len(), 0 | 3 | 4 | 5),
            "community cards must number 0, 3, 4 or 5"
        );
        self.community_cards = cards;
        self
    }

    /// # Panics
    ///
    /// Panics when the contribution list does not cover every seat.
    pub fn with_pot(mut self, pot: Pot) -> Self {
        assert_eq!(
            pot.contributions.len(),
            self.players.len(),
            "pot contributions must cover every seat"
        );
        self.pot = pot;
        self
    }

    pub fn with_min_raise_amount(mut self, amount: u32) -> Self {
        self.min_raise_amount = amount;
        self
    }

    pub fn with_awaiting_action(mut self, awaiting: bool) -> Self {
        self.awaiting_action = awaiting;
        self
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, idx: usize) -> &Player {
        &self.players[idx]
    }
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_idx]
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community_cards
    }
    pub fn pot(&self) -> &Pot {
        &self.pot
    }
    pub fn dealer_idx(&self) -> usize {
        self.dealer_idx
    }
    pub fn current_player_idx(&self) -> usize {
        self.current_player_idx
    }
    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }
    pub fn big_blind(&self) -> u32 {
        self.big_blind
    }
    pub fn min_raise_amount(&self) -> u32 {
        self.min_raise_amount
    }
    pub fn awaiting_action(&self) -> bool {
        self.awaiting_action
    }
    pub fn run_it_out(&self) -> bool {
        self.run_it_out
    }

    pub fn seat_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn highest_bet(&self) -> u32 {
        self.players.iter().map(|p| p.bet).max().unwrap_or(0)
    }

    /// Swept pot plus the bets still in front of the players.
    pub fn pot_total(&self) -> u32 {
        self.pot.total + self.players.iter().map(|p| p.bet).sum::<u32>()
    }

    /// Every chip on the table; constant across any single action.
    pub fn total_chips(&self) -> u64 {
        self.players
            .iter()
            .map(|p| u64::from(p.stack) + u64::from(p.bet))
            .sum::<u64>()
            + u64::from(self.pot.total)
    }

    /// Chips each seat has put into this hand, swept or not.
    pub fn hand_contributions(&self) -> Vec<u32> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| self.pot.contribution(i) + p.bet)
            .collect()
    }

    pub fn active_player_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_folded).count()
    }

    pub fn players_able_to_act(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    pub fn funded_player_count(&self) -> usize {
        self.players.iter().filter(|p| p.stack > 0).count()
    }

    fn needs_action(&self, p: &Player) -> bool {
        p.can_act() && (!p.has_acted || p.bet < self.highest_bet())
    }

    /// True once no further wager is possible or required this street.
    pub fn is_betting_complete(&self) -> bool {
        if self.active_player_count() <= 1 {
            return true;
        }
        let high = self.highest_bet();
        let mut actors = self.players.iter().filter(|p| p.can_act());
        match (actors.next(), actors.next()) {
            (None, _) => true,
            // nobody left to bet against
            (Some(lone), None) if lone.bet >= high => true,
            _ => !self.players.iter().any(|p| self.needs_action(p)),
        }
    }

    /// Every contesting player but at most one is all-in, so the remaining
    /// streets can be dealt without betting.
    pub fn should_run_it_out(&self) -> bool {
        self.active_player_count() >= 2 && self.players_able_to_act() <= 1
    }

    fn seats_after(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let n = self.players.len();
        (1..=n).map(move |k| (idx + k) % n)
    }

    fn next_needing_action(&self, after: usize) -> Option<usize> {
        self.seats_after(after)
            .find(|&i| self.needs_action(&self.players[i]))
    }

    fn next_funded(&self, after: usize) -> usize {
        self.seats_after(after)
            .find(|&i| self.players[i].stack > 0 && !self.players[i].is_folded)
            .unwrap_or(after)
    }

    /// Actions open to the player whose turn it is.
    pub fn current_player_options(&self) -> Vec<ActionKind> {
        let p = self.current_player();
        if !p.can_act() {
            return Vec::new();
        }
        let high = self.highest_bet();
        let to_call = high.saturating_sub(p.bet);
        let opponents_can_act = self
            .players
            .iter()
            .enumerate()
            .any(|(i, o)| i != self.current_player_idx && o.can_act());

        // having acted already while facing a bet means the last raise was
        // incomplete, which does not reopen raising
        let may_raise = opponents_can_act && !p.has_acted && p.bet + p.stack > high;

        let mut options = Vec::with_capacity(4);
        if to_call > 0 {
            // a call the stack cannot cover goes all-in
            options.push(ActionKind::Fold);
            options.push(ActionKind::Call);
        } else {
            options.push(ActionKind::Check);
        }
        if may_raise {
            options.push(ActionKind::Raise);
        }
        if may_raise || p.stack <= to_call {
            options.push(ActionKind::AllIn);
        }
        options
    }

    /// First seat, counting from seat 0, that still has chips. Used for the
    /// opening button.
    pub fn first_funded_seat(&self) -> usize {
        self.seats_after(self.players.len() - 1)
            .find(|&i| self.players[i].stack > 0)
            .unwrap_or(0)
    }

    /// Seat that receives the button for the next hand.
    pub fn next_dealer_idx(&self) -> usize {
        self.seats_after(self.dealer_idx)
            .find(|&i| self.players[i].stack > 0)
            .unwrap_or(self.dealer_idx)
    }

    /// Clears per-hand state, keeping stacks, and moves the button to
    /// `dealer_idx`.
    pub fn start_hand(&self, dealer_idx: usize) -> GameState {
        let mut next = self.clone();
        for p in &mut next.players {
            p.reset_for_new_hand();
        }
        next.community_cards.clear();
        next.pot = Pot::for_seats(next.players.len());
        next.dealer_idx = dealer_idx % next.players.len();
        next.current_player_idx = next.dealer_idx;
        next.min_raise_amount = next.big_blind;
        next.awaiting_action = false;
        next.run_it_out = false;
        next
    }

    /// Small and big blind seats for the current button.
    ///
    /// Heads-up the button posts the small blind.
    pub fn blind_seats(&self) -> (usize, usize) {
        let live = self
            .players
            .iter()
            .filter(|p| !p.is_folded && p.stack > 0)
            .count();
        let sb = if live == 2 {
            self.dealer_idx
        } else {
            self.next_funded(self.dealer_idx)
        };
        (sb, self.next_funded(sb))
    }

    /// Posts both blinds and hands the action to the first player after the
    /// big blind. A short stack posts what it has and is all-in.
    pub fn post_blinds(&self) -> GameState {
        let mut next = self.clone();
        let (sb, bb) = next.blind_seats();
        let posted_sb = next.players[sb].commit(next.small_blind);
        let posted_bb = next.players[bb].commit(next.big_blind);
        debug!(
            small_blind = %next.players[sb].name,
            big_blind = %next.players[bb].name,
            posted_sb,
            posted_bb,
            "blinds posted"
        );
        next.min_raise_amount = next.big_blind;
        next.current_player_idx = next.next_needing_action(bb).unwrap_or(bb);
        next
    }

    /// Deals two hole cards to every seated player, one at a time,
    /// starting left of the button.
    pub fn deal_hole_cards(&self, deck: &mut Deck) -> Result<GameState, GameError> {
        let mut next = self.clone();
        let order: Vec<usize> = next
            .seats_after(next.dealer_idx)
            .filter(|&i| !next.players[i].is_folded)
            .collect();
        for _ in 0..2 {
            for &i in &order {
                let card = deck.deal_card()?;
                next.players[i].hand.push(card);
            }
        }
        Ok(next)
    }

    /// Burns one card and adds `count` cards to the board.
    ///
    /// # Panics
    ///
    /// Panics when the board would grow past five cards.
    pub fn deal_community_cards(&self, deck: &mut Deck, count: usize) -> Result<GameState, GameError> {
        assert!(
            self.community_cards.len() + count <= 5,
            "board cannot exceed five cards"
        );
        let mut next = self.clone();
        deck.burn_card()?;
        next.community_cards.extend(deck.deal_n(count)?);
        Ok(next)
    }

    /// Opens a post-flop betting round: first to act is the first live
    /// player left of the button.
    pub fn start_betting_round(&self) -> GameState {
        let mut next = self.clone();
        for p in &mut next.players {
            p.has_acted = false;
        }
        next.min_raise_amount = next.big_blind;
        next.current_player_idx = next
            .next_needing_action(next.dealer_idx)
            .unwrap_or(next.dealer_idx);
        next.awaiting_action = false;
        next
    }

    /// Moves every street bet into the pot.
    pub fn sweep_bets(&self) -> GameState {
        let mut next = self.clone();
        for i in 0..next.players.len() {
            let bet = std::mem::take(&mut next.players[i].bet);
            next.pot.add(i, bet);
        }
        next
    }

    pub fn set_awaiting_action(&self, awaiting: bool) -> GameState {
        let mut next = self.clone();
        next.awaiting_action = awaiting;
        next
    }

    pub fn set_run_it_out(&self, run_it_out: bool) -> GameState {
        let mut next = self.clone();
        next.run_it_out = run_it_out;
        next
    }

    /// Applies `action` for the player whose turn it is.
    ///
    /// Raise amounts are sanitized through [`BettingContext`]; any correction
    /// is returned alongside the new snapshot. An action outside
    /// [`Self::current_player_options`] is rejected and leaves the state as
    /// it was.
    pub fn apply_action(&self, action: PlayerAction) -> Result<(GameState, Option<String>), GameError> {
        let available = self.current_player_options();
        if !available.contains(&action.kind()) {
            return Err(GameError::ActionNotAvailable {
                action: action.kind(),
                available,
            });
        }

        let idx = self.current_player_idx;
        let mut next = self.clone();
        let mut correction = None;
        match action {
            PlayerAction::Fold => next.players[idx].is_folded = true,
            PlayerAction::Check => {}
            PlayerAction::Call => {
                let to_call = next.highest_bet().saturating_sub(next.players[idx].bet);
                next.players[idx].commit(to_call);
            }
            PlayerAction::Raise(raise_to) => {
                let (amount, message) =
                    BettingContext::from_game_state(self).validate_and_sanitize(raise_to);
                correction = message;
                next.raise_to(idx, amount);
            }
            PlayerAction::AllIn => {
                let p = &next.players[idx];
                let total = p.bet + p.stack;
                next.raise_to(idx, total);
            }
        }
        next.players[idx].has_acted = true;
        debug!(
            player = %next.players[idx].name,
            ?action,
            stack = next.players[idx].stack,
            bet = next.players[idx].bet,
            "action applied"
        );

        if next.is_betting_complete() {
            next.awaiting_action = false;
        } else if let Some(seat) = next.next_needing_action(idx) {
            next.current_player_idx = seat;
        }
        Ok((next, correction))
    }

    fn raise_to(&mut self, idx: usize, total: u32) {
        let previous_high = self.highest_bet();
        let add = total.saturating_sub(self.players[idx].bet);
        self.players[idx].commit(add);
        let new_bet = self.players[idx].bet;
        if new_bet > previous_high {
            let increment = new_bet - previous_high;
            // only a full raise reopens the action; a short all-in just has
            // to be called
            if increment >= self.min_raise_amount {
                self.min_raise_amount = increment;
                for (i, p) in self.players.iter_mut().enumerate() {
                    if i != idx && p.can_act() {
                        p.has_acted = false;
                    }
                }
            }
        }
    }

    /// Zeroes bets and pot after winnings have been paid out.
    pub(crate) fn clear_pot(&mut self) {
        for p in &mut self.players {
            p.bet = 0;
        }
        self.pot = Pot::for_seats(self.players.len());
    }

    pub(crate) fn credit(&mut self, seat: usize, amount: u32) {
        self.players[seat].stack += amount;
    }
}
