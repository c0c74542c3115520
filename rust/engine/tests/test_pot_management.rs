use holdem_engine::cards::parse_cards;
use holdem_engine::game::{GameState, Pot, TableConfig};
use holdem_engine::hand::HandCategory;
use holdem_engine::player::Player;
use holdem_engine::pot::{award_pot_winnings, determine_winner, WinnerInfo};

fn seat(name: &str, stack: u32, hole: &str) -> Player {
    let c = parse_cards(hole).unwrap();
    Player::new(name, stack).with_hand([c[0], c[1]])
}

fn showdown(players: Vec<Player>, board: &str, contributions: Vec<u32>) -> GameState {
    GameState::new(players, &TableConfig::default())
        .with_dealer(0)
        .with_community_cards(parse_cards(board).unwrap())
        .with_pot(Pot::from_contributions(contributions))
}

#[test]
fn side_pots_and_uncalled_chips() {
    let gs = showdown(
        vec![
            seat("alice", 0, "As Ad").all_in(),
            seat("bob", 0, "Ks Kd").all_in(),
            seat("carol", 0, "Qs Qd").all_in(),
        ],
        "2c 7d 9h Jc 3s",
        vec![30, 60, 100],
    );
    let info = determine_winner(&gs);

    assert_eq!(info.pot_breakdown.len(), 2);
    let main = &info.pot_breakdown[0];
    assert_eq!(main.pot_name, "Main Pot");
    assert_eq!(main.total_amount, 90);
    assert_eq!(main.winners.len(), 1);
    assert_eq!(main.winners[0].name, "alice");
    assert_eq!(main.winning_category, Some(HandCategory::OnePair));

    let side = &info.pot_breakdown[1];
    assert_eq!(side.pot_name, "Side Pot 1");
    assert_eq!(side.total_amount, 60);
    assert_eq!(side.winners[0].name, "bob");

    assert_eq!(info.returned_chips.get("carol"), Some(&40));
    assert_eq!(info.total_distributed(), 190);

    let after = award_pot_winnings(&gs, &info);
    let stacks: Vec<u32> = after.players().iter().map(|p| p.stack()).collect();
    assert_eq!(stacks, vec![90, 60, 40]);
    assert_eq!(after.pot_total(), 0);
    assert_eq!(after.total_chips(), gs.total_chips());
}

#[test]
fn odd_chips_go_left_of_the_button_first() {
    let gs = showdown(
        vec![
            seat("p0", 0, "2h 3d"),
            Player::new("p1", 0).folded(),
            seat("p2", 0, "4h 5d"),
            seat("p3", 0, "6h 7s"),
        ],
        "Ac Kd Qh Jc Ts",
        vec![100, 50, 100, 100],
    );
    let info = determine_winner(&gs);
    assert_eq!(info.pot_breakdown.len(), 1);
    let tier = &info.pot_breakdown[0];
    assert_eq!(tier.total_amount, 350);
    assert_eq!(tier.winning_category, Some(HandCategory::Straight));
    let paid: Vec<(&str, u32)> = tier
        .winners
        .iter()
        .map(|w| (w.name.as_str(), w.amount))
        .collect();
    assert_eq!(paid, vec![("p2", 117), ("p3", 117), ("p0", 116)]);
}

#[test]
fn last_player_standing_wins_without_showdown() {
    let gs = GameState::new(
        vec![
            Player::new("alice", 950).folded(),
            Player::new("bob", 900).with_bet(100),
        ],
        &TableConfig::default(),
    )
    .with_pot(Pot::from_contributions(vec![50, 0]));
    let info = determine_winner(&gs);
    assert_eq!(info.pot_breakdown.len(), 1);
    assert_eq!(info.pot_breakdown[0].winning_category, None);
    assert_eq!(info.amount_for("bob"), 150);
    assert!(info.returned_chips.is_empty());

    let after = award_pot_winnings(&gs, &info);
    assert_eq!(after.player(1).stack(), 1050);
    assert_eq!(after.player(1).bet(), 0);
}

#[test]
fn folded_overbet_stays_in_the_pot() {
    let gs = showdown(
        vec![
            seat("alice", 0, "As Ad").all_in(),
            seat("bob", 0, "Ks Kd").all_in(),
            Player::new("carol", 300).folded(),
        ],
        "2c 7d 9h Jc 3s",
        vec![200, 200, 500],
    );
    let info = determine_winner(&gs);
    assert!(info.returned_chips.is_empty());
    assert_eq!(info.pot_breakdown.len(), 1);
    assert_eq!(info.pot_breakdown[0].total_amount, 900);
    assert_eq!(info.amount_for("alice"), 900);
}

#[test]
fn empty_pot_distributes_nothing() {
    let gs = GameState::new(
        vec![Player::new("a", 100), Player::new("b", 100)],
        &TableConfig::default(),
    );
    let info = determine_winner(&gs);
    assert_eq!(info, WinnerInfo::default());
    assert_eq!(award_pot_winnings(&gs, &info), gs);
}

#[test]
#[should_panic(expected = "no player left in the hand")]
fn pot_with_everyone_folded_is_fatal() {
    let gs = GameState::new(
        vec![Player::new("a", 100).folded(), Player::new("b", 100).folded()],
        &TableConfig::default(),
    )
    .with_pot(Pot::from_contributions(vec![50, 100]));
    determine_winner(&gs);
}

#[test]
#[should_panic(expected = "winnings do not match the pot")]
fn mismatched_payout_is_fatal() {
    let gs = GameState::new(
        vec![Player::new("a", 100), Player::new("b", 100)],
        &TableConfig::default(),
    )
    .with_pot(Pot::from_contributions(vec![50, 100]));
    award_pot_winnings(&gs, &WinnerInfo::default());
}

#[test]
fn three_tiers_with_a_split_side_pot_and_dead_money() {
    let gs = showdown(
        vec![
            seat("ann", 0, "As Ad").all_in(),
            seat("bo", 0, "Ks Kd").all_in(),
            seat("cy", 0, "Kh Kc").all_in(),
            seat("dee", 0, "Qs Qd").all_in(),
            Player::new("eve", 0).folded(),
        ],
        "2c 7d 9h Jc 3s",
        vec![100, 300, 500, 500, 201],
    );
    let info = determine_winner(&gs);
    assert!(info.returned_chips.is_empty());

    let tiers: Vec<(&str, u32)> = info
        .pot_breakdown
        .iter()
        .map(|t| (t.pot_name.as_str(), t.total_amount))
        .collect();
    assert_eq!(
        tiers,
        vec![("Main Pot", 500), ("Side Pot 1", 701), ("Side Pot 2", 400)]
    );

    let split: Vec<(&str, u32)> = info.pot_breakdown[1]
        .winners
        .iter()
        .map(|w| (w.name.as_str(), w.amount))
        .collect();
    // odd chip to the first seat left of the button
    assert_eq!(split, vec![("bo", 351), ("cy", 350)]);
    assert_eq!(info.pot_breakdown[0].winners[0].name, "ann");
    assert_eq!(info.pot_breakdown[2].winners[0].name, "cy");
    assert_eq!(info.total_distributed(), u64::from(gs.pot_total()));

    let after = award_pot_winnings(&gs, &info);
    let stacks: Vec<u32> = after.players().iter().map(|p| p.stack()).collect();
    assert_eq!(stacks, vec![500, 351, 750, 0, 0]);
    assert_eq!(after.total_chips(), gs.total_chips());
}
