//! # holdem-engine: Texas Hold'em Rules Engine
//!
//! A deterministic No-Limit Hold'em engine for two to ten seats. Every
//! transition reads an immutable [`game::GameState`] snapshot and returns a
//! new one, so any past snapshot can be kept for replay or audit.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text parsing
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Five-to-seven card hand evaluation and comparison
//! - [`player`] - Player state and betting actions
//! - [`game`] - Table config, pot and the immutable hand snapshot
//! - [`rules`] - Raise validation and sanitization (BettingContext)
//! - [`pot`] - Main/side pot distribution and payouts
//! - [`engine`] - Phase state machine driving a hand to completion
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate_hand, HandCategory};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let result = evaluate_hand(&cards);
//! assert_eq!(result.category, HandCategory::StraightFlush);
//! assert_eq!(result.hand_rank(), 1);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! The same seed deals the same cards:
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! deck1.shuffle();
//! deck2.shuffle();
//! assert_eq!(deck1.deal_n(5).unwrap(), deck2.deal_n(5).unwrap());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod player;
pub mod pot;
pub mod rules;
