use holdem_engine::cards::parse_cards;
use holdem_engine::game::{GameState, Pot, TableConfig};
use holdem_engine::player::{ActionKind, Player, PlayerAction};

fn table(stacks: &[u32]) -> GameState {
    let players = stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| Player::new(format!("p{i}"), s))
        .collect();
    GameState::new(players, &TableConfig::default())
}

#[test]
fn builders_shape_a_snapshot() {
    let c = parse_cards("Ah Kd").unwrap();
    let p = Player::new("alice", 500)
        .human()
        .with_hand([c[0], c[1]])
        .with_bet(40)
        .acted();
    assert!(p.is_human());
    assert_eq!(p.hand(), &c[..]);
    assert_eq!(p.bet(), 40);
    assert!(p.has_acted());
    assert!(p.can_act());
    assert!(!Player::new("b", 0).can_act());
    assert!(!Player::new("c", 10).folded().can_act());
}

#[test]
fn pot_total_counts_unswept_bets() {
    let gs = GameState::new(
        vec![Player::new("a", 900).with_bet(100), Player::new("b", 950).with_bet(50)],
        &TableConfig::default(),
    )
    .with_pot(Pot::from_contributions(vec![200, 200]));
    assert_eq!(gs.pot_total(), 550);
    assert_eq!(gs.hand_contributions(), vec![300, 250]);
    assert_eq!(gs.total_chips(), 2400);
    assert_eq!(gs.seat_of("b"), Some(1));
    assert_eq!(gs.seat_of("zed"), None);
}

#[test]
fn button_skips_busted_seats() {
    let gs = table(&[1000, 0, 1000]).start_hand(0);
    assert_eq!(gs.next_dealer_idx(), 2);
    assert!(gs.player(1).is_folded());
}

#[test]
fn busted_seat_turns_table_heads_up() {
    let gs = table(&[1000, 0, 1000]).start_hand(0);
    assert_eq!(gs.blind_seats(), (0, 2));
    let gs = gs.post_blinds();
    assert_eq!(gs.player(0).bet(), 50);
    assert_eq!(gs.player(2).bet(), 100);
    assert_eq!(gs.current_player_idx(), 0);
}

#[test]
fn post_flop_action_starts_left_of_button() {
    let gs = table(&[1000, 1000, 1000]).start_hand(2).post_blinds();
    assert_eq!(gs.blind_seats(), (0, 1));
    assert_eq!(gs.current_player_idx(), 2);
    let gs = gs.sweep_bets().start_betting_round();
    assert_eq!(gs.current_player_idx(), 0);
    assert_eq!(gs.highest_bet(), 0);
}

#[test]
fn folded_player_is_skipped() {
    let gs = table(&[1000, 1000, 1000]).start_hand(0).post_blinds();
    let (gs, _) = gs.apply_action(PlayerAction::Fold).unwrap();
    assert_eq!(gs.active_player_count(), 2);
    assert_eq!(gs.current_player_idx(), 1);
    let (gs, _) = gs.apply_action(PlayerAction::Call).unwrap();
    let (gs, _) = gs.apply_action(PlayerAction::Check).unwrap();
    assert!(gs.is_betting_complete());

    let gs = gs.sweep_bets().start_betting_round();
    assert_eq!(gs.current_player_idx(), 1);
}

#[test]
fn facing_a_full_stack_shove_cannot_raise() {
    let gs = table(&[1000, 1000])
        .start_hand(0)
        .post_blinds()
        .apply_action(PlayerAction::AllIn)
        .unwrap()
        .0;
    let options = gs.current_player_options();
    assert_eq!(options, vec![ActionKind::Fold, ActionKind::Call, ActionKind::AllIn]);
    assert_eq!(gs.players_able_to_act(), 1);
}

#[test]
fn snapshot_round_trips_through_json() {
    let gs = table(&[1000, 1000]).start_hand(0).post_blinds();
    let json = serde_json::to_string(&gs).unwrap();
    let back: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, gs);
}

#[test]
fn first_funded_seat_counts_from_seat_zero() {
    assert_eq!(table(&[1000, 1000]).first_funded_seat(), 0);
    assert_eq!(table(&[0, 0, 500, 500]).first_funded_seat(), 2);
}
