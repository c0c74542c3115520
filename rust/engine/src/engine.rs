use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{GameState, TableConfig};
use crate::player::{Player, PlayerAction};
use crate::pot::{award_pot_winnings, determine_winner, WinnerInfo};

/// Phases a hand moves through.
///
/// Serializes to a stable upper-case name (`"PRE_FLOP"`) used when a
/// snapshot is persisted and restored.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    InitializingGame,
    InitializingHand,
    PreFlop,
    DealingCards,
    Flop,
    Turn,
    River,
    Showdown,
    EvaluatingHand,
    HandOver,
}

impl Phase {
    pub const ALL: [Phase; 10] = [
        Phase::InitializingGame,
        Phase::InitializingHand,
        Phase::PreFlop,
        Phase::DealingCards,
        Phase::Flop,
        Phase::Turn,
        Phase::River,
        Phase::Showdown,
        Phase::EvaluatingHand,
        Phase::HandOver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::InitializingGame => "INITIALIZING_GAME",
            Phase::InitializingHand => "INITIALIZING_HAND",
            Phase::PreFlop => "PRE_FLOP",
            Phase::DealingCards => "DEALING_CARDS",
            Phase::Flop => "FLOP",
            Phase::Turn => "TURN",
            Phase::River => "RIVER",
            Phase::Showdown => "SHOWDOWN",
            Phase::EvaluatingHand => "EVALUATING_HAND",
            Phase::HandOver => "HAND_OVER",
        }
    }

    pub fn is_betting_round(&self) -> bool {
        matches!(self, Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown phase {s:?}"))
    }
}

/// Linear successor of `phase` given how many community cards are out.
///
/// Leaving `DealingCards` depends on the board just dealt: three cards lead
/// to the flop, four to the turn, five to the river.
///
/// # Panics
///
/// Panics when `DealingCards` is paired with a board size that no street
/// produces.
pub fn next_phase(phase: Phase, community_cards: usize) -> Phase {
    match phase {
        Phase::InitializingGame => Phase::InitializingHand,
        Phase::InitializingHand => Phase::PreFlop,
        Phase::PreFlop | Phase::Flop | Phase::Turn => Phase::DealingCards,
        Phase::River => Phase::Showdown,
        Phase::DealingCards => match community_cards {
            3 => Phase::Flop,
            4 => Phase::Turn,
            5 => Phase::River,
            n => panic!("no phase follows DEALING_CARDS with {n} community cards"),
        },
        Phase::Showdown => Phase::EvaluatingHand,
        Phase::EvaluatingHand => Phase::HandOver,
        Phase::HandOver => Phase::InitializingHand,
    }
}

/// Drives one table hand after hand.
///
/// The machine is the single writer for its table: it owns the current
/// [`GameState`] snapshot and replaces it on every step. Readers get a
/// shared borrow, and clones of past snapshots stay valid.
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::{Phase, PokerStateMachine};
/// use holdem_engine::game::TableConfig;
/// use holdem_engine::player::{Player, PlayerAction};
///
/// let players = vec![Player::new("alice", 1000), Player::new("bob", 1000)];
/// let mut sm = PokerStateMachine::new(players, TableConfig::default(), 7).unwrap();
///
/// let phase = sm.run_until_player_action().unwrap();
/// assert_eq!(phase, Phase::PreFlop);
///
/// // the button folds, the big blind takes the pot
/// sm.apply_action(PlayerAction::Fold).unwrap();
/// assert_eq!(sm.run_until_player_action().unwrap(), Phase::HandOver);
/// assert_eq!(sm.game_state().player(1).stack(), 1050);
/// ```
#[derive(Debug)]
pub struct PokerStateMachine {
    phase: Phase,
    game_state: GameState,
    deck: Deck,
    config: TableConfig,
    seed: u64,
    hand_number: u64,
    hand_settled: bool,
    last_winner_info: Option<WinnerInfo>,
}

impl PokerStateMachine {
    /// Seats `players`; the first hand's button goes to the first seat with
    /// chips.
    pub fn new(players: Vec<Player>, config: TableConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let funded = players.iter().filter(|p| p.stack() > 0).count();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers { have: funded });
        }
        let game_state = GameState::new(players, &config);
        Ok(Self {
            phase: Phase::InitializingGame,
            game_state,
            deck: Deck::new_with_seed(seed),
            config,
            seed,
            hand_number: 0,
            hand_settled: false,
            last_winner_info: None,
        })
    }

    /// Resumes a table from a persisted phase and snapshot.
    ///
    /// Cards already visible in the snapshot are kept out of the fresh deck.
    pub fn restore(
        phase: Phase,
        game_state: GameState,
        config: TableConfig,
        seed: u64,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        let visible: Vec<_> = game_state
            .players()
            .iter()
            .flat_map(|p| p.hand().iter().copied())
            .chain(game_state.community_cards().iter().copied())
            .collect();
        deck.exclude(&visible);
        Ok(Self {
            phase,
            game_state,
            deck,
            config,
            seed,
            hand_number: 0,
            // a restored HAND_OVER has already been paid out
            hand_settled: phase == Phase::HandOver,
            last_winner_info: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Settlement of the most recently finished hand.
    pub fn last_winner_info(&self) -> Option<&WinnerInfo> {
        self.last_winner_info.as_ref()
    }

    pub fn is_table_finished(&self) -> bool {
        self.phase == Phase::HandOver && self.game_state.funded_player_count() < 2
    }

    fn transition(&mut self, to: Phase) {
        debug!(from = %self.phase, to = %to, hand = self.hand_number, "phase transition");
        self.phase = to;
    }

    /// Performs one step of the hand and returns the resulting phase.
    ///
    /// In a betting round that still needs a decision the phase does not
    /// change; the snapshot is flagged as awaiting action instead.
    ///
    /// # Panics
    ///
    /// Panics if `EVALUATING_HAND` is reached for a hand that was already
    /// paid out, since paying twice would create chips.
    pub fn advance(&mut self) -> Result<Phase, GameError> {
        match self.phase {
            Phase::InitializingGame => {
                let funded = self.game_state.funded_player_count();
                if funded < 2 {
                    return Err(GameError::NotEnoughPlayers { have: funded });
                }
                let dealer = self.game_state.first_funded_seat();
                self.game_state = self.game_state.start_hand(dealer);
                self.transition(Phase::InitializingHand);
            }
            Phase::InitializingHand => self.start_hand()?,
            Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River => self.betting_step(),
            Phase::DealingCards => self.deal_street()?,
            Phase::Showdown => {
                let to = next_phase(self.phase, self.game_state.community_cards().len());
                self.transition(to);
            }
            Phase::EvaluatingHand => self.settle_hand(),
            Phase::HandOver => {
                if self.game_state.funded_player_count() < 2 {
                    return Err(GameError::TableFinished);
                }
                let dealer = self.game_state.next_dealer_idx();
                self.game_state = self.game_state.start_hand(dealer);
                self.transition(Phase::InitializingHand);
            }
        }
        Ok(self.phase)
    }

    /// Advances until a player must act or the hand is over.
    pub fn run_until_player_action(&mut self) -> Result<Phase, GameError> {
        loop {
            let phase = self.advance()?;
            if phase == Phase::HandOver
                || (phase.is_betting_round() && self.game_state.awaiting_action())
            {
                return Ok(phase);
            }
        }
    }

    /// Applies `action` for the player whose turn it is and returns any
    /// correction made to a raise amount.
    pub fn apply_action(&mut self, action: PlayerAction) -> Result<Option<String>, GameError> {
        if !self.phase.is_betting_round() || !self.game_state.awaiting_action() {
            return Err(GameError::NotAwaitingAction {
                phase: self.phase.to_string(),
            });
        }
        let (next, correction) = self.game_state.apply_action(action)?;
        self.game_state = next;
        Ok(correction)
    }

    /// Like [`Self::apply_action`], checking that `seat` is the one to act.
    pub fn apply_action_for(
        &mut self,
        seat: usize,
        action: PlayerAction,
    ) -> Result<Option<String>, GameError> {
        let expected = self.game_state.current_player_idx();
        if seat != expected {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }
        self.apply_action(action)
    }

    fn start_hand(&mut self) -> Result<(), GameError> {
        self.hand_number += 1;
        self.hand_settled = false;
        self.deck.shuffle();
        let gs = self.game_state.post_blinds();
        self.game_state = gs.deal_hole_cards(&mut self.deck)?;
        info!(
            hand = self.hand_number,
            dealer = self.game_state.dealer_idx(),
            players = self.game_state.active_player_count(),
            "hand started"
        );
        self.transition(next_phase(self.phase, 0));
        Ok(())
    }

    fn betting_step(&mut self) {
        let gs = &self.game_state;
        if gs.active_player_count() <= 1 {
            // everyone else folded: nothing left to deal or bet
            self.game_state = gs.sweep_bets().set_awaiting_action(false);
            self.transition(Phase::Showdown);
            return;
        }
        if !gs.run_it_out() && !gs.is_betting_complete() {
            self.game_state = gs.set_awaiting_action(true);
            return;
        }
        let mut next = gs.sweep_bets().set_awaiting_action(false);
        if !next.run_it_out() && next.should_run_it_out() {
            info!(hand = self.hand_number, "no further betting possible, running it out");
            next = next.set_run_it_out(true);
        }
        self.game_state = next;
        let to = next_phase(self.phase, self.game_state.community_cards().len());
        self.transition(to);
    }

    fn deal_street(&mut self) -> Result<(), GameError> {
        let count = match self.game_state.community_cards().len() {
            0 => 3,
            3 | 4 => 1,
            n => panic!("cannot deal a street onto a board of {n} cards"),
        };
        let gs = self.game_state.deal_community_cards(&mut self.deck, count)?;
        self.game_state = gs.start_betting_round();
        let to = next_phase(self.phase, self.game_state.community_cards().len());
        self.transition(to);
        Ok(())
    }

    fn settle_hand(&mut self) {
        assert!(
            !self.hand_settled,
            "hand {} was already settled; re-entering EVALUATING_HAND would pay the pot twice",
            self.hand_number
        );
        let before = self.game_state.total_chips();
        let info = determine_winner(&self.game_state);
        let next = award_pot_winnings(&self.game_state, &info);
        assert_eq!(next.total_chips(), before, "settlement changed the chip count");
        self.game_state = next;
        self.last_winner_info = Some(info);
        self.hand_settled = true;
        self.transition(next_phase(Phase::EvaluatingHand, 0));
    }
}
