//! Showdown settlement: main and side pots, split pots, uncalled bets.
//!
//! [`determine_winner`] reads a snapshot and describes who gets what;
//! [`award_pot_winnings`] applies that description and returns the next
//! snapshot. Both keep `Σ tiers + Σ returned == pot total` exactly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::game::GameState;
use crate::hand::{evaluate_hand, HandCategory, HandEvaluationResult};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotWinner {
    pub name: String,
    pub amount: u32,
}

/// One contribution tier: the main pot or a side pot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotTier {
    pub pot_name: String,
    pub total_amount: u32,
    /// Winners in odd-chip order (first seat left of the button first).
    pub winners: Vec<PotWinner>,
    /// Category of the winning hand; absent when the pot was won uncontested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winning_category: Option<HandCategory>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WinnerInfo {
    pub pot_breakdown: Vec<PotTier>,
    /// Uncalled chips handed back to the player who bet them.
    pub returned_chips: BTreeMap<String, u32>,
}

impl WinnerInfo {
    /// Everything this result pays out.
    pub fn total_distributed(&self) -> u64 {
        let tiers: u64 = self
            .pot_breakdown
            .iter()
            .map(|t| u64::from(t.total_amount))
            .sum();
        tiers + self.returned_chips.values().map(|&v| u64::from(v)).sum::<u64>()
    }

    /// Total received by `name` across tiers and returned chips.
    pub fn amount_for(&self, name: &str) -> u32 {
        let won: u32 = self
            .pot_breakdown
            .iter()
            .flat_map(|t| t.winners.iter())
            .filter(|w| w.name == name)
            .map(|w| w.amount)
            .sum();
        won + self.returned_chips.get(name).copied().unwrap_or(0)
    }
}

fn tier_name(index: usize) -> String {
    if index == 0 {
        "Main Pot".to_string()
    } else {
        format!("Side Pot {index}")
    }
}

/// Splits the pot of `game_state` into tiers and picks each tier's winners.
///
/// Contributions include bets not yet swept into the pot. A hand with a
/// single non-folded player is won outright without looking at any cards.
///
/// # Panics
///
/// Panics when chips are in the pot but every player has folded, and when a
/// contested showdown has fewer than five cards to evaluate per player.
pub fn determine_winner(game_state: &GameState) -> WinnerInfo {
    let players = game_state.players();
    let mut contributions = game_state.hand_contributions();
    let total: u32 = contributions.iter().sum();
    if total == 0 {
        warn!("determine_winner called with an empty pot");
        return WinnerInfo::default();
    }

    let live: Vec<usize> = (0..players.len())
        .filter(|&i| !players[i].is_folded())
        .collect();
    assert!(
        !live.is_empty(),
        "cannot distribute a pot of {total} with no player left in the hand"
    );

    if let [winner] = live.as_slice() {
        let name = players[*winner].name().to_string();
        info!(winner = %name, amount = total, "pot won uncontested");
        return WinnerInfo {
            pot_breakdown: vec![PotTier {
                pot_name: tier_name(0),
                total_amount: total,
                winners: vec![PotWinner { name, amount: total }],
                winning_category: None,
            }],
            returned_chips: BTreeMap::new(),
        };
    }

    let mut returned_chips = BTreeMap::new();
    if let Some((seat, excess)) = uncalled_excess(game_state, &contributions) {
        contributions[seat] -= excess;
        let name = players[seat].name().to_string();
        info!(player = %name, amount = excess, "uncalled chips returned");
        returned_chips.insert(name, excess);
    }

    let mut levels: Vec<u32> = live
        .iter()
        .map(|&i| contributions[i])
        .filter(|&c| c > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let board = game_state.community_cards();
    let hands: Vec<Option<HandEvaluationResult>> = (0..players.len())
        .map(|i| {
            (!players[i].is_folded()).then(|| {
                let mut cards = players[i].hand().to_vec();
                cards.extend_from_slice(board);
                evaluate_hand(&cards)
            })
        })
        .collect();

    let seat_order = odd_chip_order(game_state);
    let mut pot_breakdown = Vec::with_capacity(levels.len());
    let mut previous = 0u32;
    for (index, &level) in levels.iter().enumerate() {
        let mut amount: u32 = contributions
            .iter()
            .map(|&c| c.min(level) - c.min(previous))
            .sum();
        if index == levels.len() - 1 {
            // dead money from folded players above the top live level
            amount += contributions
                .iter()
                .map(|&c| c.saturating_sub(level))
                .sum::<u32>();
        }
        previous = level;

        let eligible: Vec<usize> = live
            .iter()
            .copied()
            .filter(|&i| contributions[i] >= level)
            .collect();
        let best = eligible
            .iter()
            .filter_map(|&i| hands[i].as_ref())
            .max()
            .cloned();
        let Some(best) = best else { continue };
        let tier_winners: Vec<usize> = seat_order
            .iter()
            .copied()
            .filter(|i| eligible.contains(i) && hands[*i].as_ref() == Some(&best))
            .collect();

        let tier = PotTier {
            pot_name: tier_name(index),
            total_amount: amount,
            winners: split_amount(amount, &tier_winners)
                .into_iter()
                .map(|(seat, share)| PotWinner {
                    name: players[seat].name().to_string(),
                    amount: share,
                })
                .collect(),
            winning_category: Some(best.category),
        };
        info!(
            pot = %tier.pot_name,
            amount = tier.total_amount,
            winners = tier.winners.len(),
            hand = %best,
            "pot tier settled"
        );
        pot_breakdown.push(tier);
    }

    let info = WinnerInfo {
        pot_breakdown,
        returned_chips,
    };
    assert_eq!(
        info.total_distributed(),
        u64::from(total),
        "pot distribution must account for every chip"
    );
    info
}

/// The top contributor's chips that nobody matched. Only a live player
/// gets chips back; a folded player's surplus stays in the pot.
fn uncalled_excess(game_state: &GameState, contributions: &[u32]) -> Option<(usize, u32)> {
    let (top_seat, &top) = contributions
        .iter()
        .enumerate()
        .max_by_key(|&(_, c)| *c)?;
    let second = contributions
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != top_seat)
        .map(|(_, &c)| c)
        .max()
        .unwrap_or(0);
    let excess = top - second;
    (excess > 0 && !game_state.player(top_seat).is_folded()).then_some((top_seat, excess))
}

/// Seats clockwise starting immediately left of the button.
fn odd_chip_order(game_state: &GameState) -> Vec<usize> {
    let n = game_state.players().len();
    let dealer = game_state.dealer_idx();
    (1..=n).map(|k| (dealer + k) % n).collect()
}

/// Equal shares, with the remainder handed out one chip at a time to the
/// winners in the given order.
fn split_amount(amount: u32, winners: &[usize]) -> Vec<(usize, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let count = winners.len() as u32;
    let share = amount / count;
    let remainder = (amount % count) as usize;
    winners
        .iter()
        .enumerate()
        .map(|(pos, &seat)| (seat, share + u32::from(pos < remainder)))
        .collect()
}

/// Credits every payout in `winner_info` to the players' stacks and clears
/// the pot and street bets.
///
/// # Panics
///
/// Panics when a payout names a player who is not seated, or when the
/// payouts do not add up to the chips in the pot.
pub fn award_pot_winnings(game_state: &GameState, winner_info: &WinnerInfo) -> GameState {
    let pot_total = game_state.pot_total();
    assert_eq!(
        winner_info.total_distributed(),
        u64::from(pot_total),
        "winnings do not match the pot"
    );

    let mut per_seat: BTreeMap<usize, u32> = BTreeMap::new();
    let payouts = winner_info
        .pot_breakdown
        .iter()
        .flat_map(|t| t.winners.iter().map(|w| (w.name.as_str(), w.amount)))
        .chain(
            winner_info
                .returned_chips
                .iter()
                .map(|(name, &amount)| (name.as_str(), amount)),
        );
    for (name, amount) in payouts {
        let seat = game_state
            .seat_of(name)
            .unwrap_or_else(|| panic!("payout for unknown player {name:?}"));
        *per_seat.entry(seat).or_default() += amount;
    }

    let mut next = game_state.clone();
    for (&seat, &amount) in &per_seat {
        next.credit(seat, amount);
    }
    next.clear_pot();
    next
}
