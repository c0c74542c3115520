//! Hand evaluation.
//!
//! [`evaluate_hand`] picks the best five-card hand out of five to seven cards
//! by scoring every five-card subset. The result orders strictly: category
//! first, then the ranks forming the category, then the kickers.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::cards::{Card, Rank};

/// Poker hand categories. `hand_rank` 1 is the strongest, 9 the weakest.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    StraightFlush = 1,
    FourOfAKind = 2,
    FullHouse = 3,
    Flush = 4,
    Straight = 5,
    ThreeOfAKind = 6,
    TwoPair = 7,
    OnePair = 8,
    HighCard = 9,
}

impl HandCategory {
    pub fn hand_rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::FullHouse => "Full House",
            HandCategory::Flush => "Flush",
            HandCategory::Straight => "Straight",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::OnePair => "One Pair",
            HandCategory::HighCard => "High Card",
        }
    }
}

// Stronger categories compare greater.
impl Ord for HandCategory {
    fn cmp(&self, other: &Self) -> Ordering {
        other.hand_rank().cmp(&self.hand_rank())
    }
}

impl PartialOrd for HandCategory {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ranks ordered from most to least significant.
///
/// The order is fixed at construction and there is no way to reorder the
/// contents in place, so comparisons always read the sequence the way the
/// evaluator built it. Comparison is lexicographic.
#[derive(Debug, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankSequence(Vec<Rank>);

impl RankSequence {
    /// Keeps the given significance order, e.g. `[trips, pair]` for a full
    /// house where the pair may outrank the trips.
    pub fn by_significance(ranks: impl IntoIterator<Item = Rank>) -> Self {
        Self(ranks.into_iter().collect())
    }

    /// Orders the ranks from highest to lowest.
    pub fn descending(ranks: impl IntoIterator<Item = Rank>) -> Self {
        let mut v: Vec<Rank> = ranks.into_iter().collect();
        v.sort_unstable_by(|a, b| b.cmp(a));
        Self(v)
    }

    pub fn as_slice(&self) -> &[Rank] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rank> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of evaluating a hand.
///
/// `Ord` follows poker strength: a better hand compares greater, and two
/// results compare equal exactly when the hands tie.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandEvaluationResult {
    pub category: HandCategory,
    /// Ranks forming the category, most significant first.
    pub hand_values: RankSequence,
    /// Remaining ranks, highest first.
    pub kicker_values: RankSequence,
}

impl HandEvaluationResult {
    pub fn hand_rank(&self) -> u8 {
        self.category.hand_rank()
    }
}

impl Ord for HandEvaluationResult {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.hand_values.cmp(&other.hand_values))
            .then_with(|| self.kicker_values.cmp(&other.kicker_values))
    }
}

impl PartialOrd for HandEvaluationResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandEvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = |seq: &RankSequence| seq.iter().map(|r| r.symbol()).collect::<String>();
        write!(f, "{} [{}]", self.category, symbols(&self.hand_values))?;
        if !self.kicker_values.is_empty() {
            write!(f, " kickers [{}]", symbols(&self.kicker_values))?;
        }
        Ok(())
    }
}

/// Evaluates the best five-card hand from `cards`.
///
/// # Panics
///
/// Panics when given fewer than 5 or more than 7 cards. Callers are
/// expected to pass hole cards plus a dealt board.
pub fn evaluate_hand(cards: &[Card]) -> HandEvaluationResult {
    assert!(
        (5..=7).contains(&cards.len()),
        "hand evaluation needs 5 to 7 cards, got {}",
        cards.len()
    );
    cards
        .iter()
        .copied()
        .combinations(5)
        .map(|five| categorize_five(&five))
        .max()
        .expect("at least one five-card subset exists")
}

pub fn compare_hands(a: &HandEvaluationResult, b: &HandEvaluationResult) -> Ordering {
    a.cmp(b)
}

fn categorize_five(cards: &[Card]) -> HandEvaluationResult {
    debug_assert_eq!(cards.len(), 5);

    // Rank groups ordered by size, then by rank: [(rank, count)]
    let groups: Vec<(Rank, usize)> = cards
        .iter()
        .map(|c| c.rank)
        .counts()
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)))
        .collect();
    let shape: Vec<usize> = groups.iter().map(|g| g.1).collect();
    let is_flush = cards.iter().map(|c| c.suit).all_equal();
    let straight_high = straight_high(&groups);

    let result = |category, hand: Vec<Rank>, kickers: Vec<Rank>| HandEvaluationResult {
        category,
        hand_values: RankSequence::by_significance(hand),
        kicker_values: RankSequence::descending(kickers),
    };
    let rank_at = |i: usize| groups[i].0;

    match (straight_high, is_flush, shape.as_slice()) {
        (Some(high), true, _) => result(HandCategory::StraightFlush, vec![high], vec![]),
        (_, _, [4, 1]) => result(HandCategory::FourOfAKind, vec![rank_at(0)], vec![rank_at(1)]),
        (_, _, [3, 2]) => result(HandCategory::FullHouse, vec![rank_at(0), rank_at(1)], vec![]),
        (_, true, _) => result(
            HandCategory::Flush,
            groups.iter().map(|g| g.0).collect(),
            vec![],
        ),
        (Some(high), false, _) => result(HandCategory::Straight, vec![high], vec![]),
        (_, _, [3, 1, 1]) => result(
            HandCategory::ThreeOfAKind,
            vec![rank_at(0)],
            vec![rank_at(1), rank_at(2)],
        ),
        (_, _, [2, 2, 1]) => result(
            HandCategory::TwoPair,
            vec![rank_at(0), rank_at(1)],
            vec![rank_at(2)],
        ),
        (_, _, [2, 1, 1, 1]) => result(
            HandCategory::OnePair,
            vec![rank_at(0)],
            vec![rank_at(1), rank_at(2), rank_at(3)],
        ),
        _ => result(
            HandCategory::HighCard,
            vec![rank_at(0)],
            groups[1..].iter().map(|g| g.0).collect(),
        ),
    }
}

/// Highest card of a straight, if the five ranks form one. The wheel
/// (A-2-3-4-5) plays as a five-high straight.
fn straight_high(groups: &[(Rank, usize)]) -> Option<Rank> {
    if groups.len() != 5 {
        return None;
    }
    // groups are all singletons here, sorted high to low
    let high = groups[0].0.value();
    let low = groups[4].0.value();
    if high - low == 4 {
        return Some(groups[0].0);
    }
    let wheel = [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];
    if groups.iter().map(|g| g.0).eq(wheel) {
        return Some(Rank::Five);
    }
    None
}
