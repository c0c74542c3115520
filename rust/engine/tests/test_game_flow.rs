use holdem_engine::cards::parse_cards;
use holdem_engine::engine::{next_phase, Phase, PokerStateMachine};
use holdem_engine::errors::GameError;
use holdem_engine::game::{GameState, Pot, TableConfig};
use holdem_engine::player::{ActionKind, Player, PlayerAction};

fn table(stacks: &[u32], seed: u64) -> PokerStateMachine {
    let players = stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| Player::new(format!("p{i}"), s))
        .collect();
    PokerStateMachine::new(players, TableConfig::default(), seed).expect("table")
}

fn check_or_call(sm: &PokerStateMachine) -> PlayerAction {
    let options = sm.game_state().current_player_options();
    if options.contains(&ActionKind::Check) {
        PlayerAction::Check
    } else if options.contains(&ActionKind::Call) {
        PlayerAction::Call
    } else {
        PlayerAction::AllIn
    }
}

/// Plays one hand with a passive policy, returning every phase visited.
fn play_hand(sm: &mut PokerStateMachine) -> Vec<Phase> {
    let mut visited = vec![sm.phase()];
    loop {
        let phase = sm.advance().expect("advance");
        if visited.last() != Some(&phase) {
            visited.push(phase);
        }
        if phase == Phase::HandOver {
            return visited;
        }
        if phase.is_betting_round() && sm.game_state().awaiting_action() {
            let action = check_or_call(sm);
            sm.apply_action(action).expect("action");
        }
    }
}

#[test]
fn showdown_hand_visits_every_phase_in_order() {
    let mut sm = table(&[1000, 1000, 1000], 11);
    let total = sm.game_state().total_chips();
    let visited = play_hand(&mut sm);
    assert_eq!(
        visited,
        vec![
            Phase::InitializingGame,
            Phase::InitializingHand,
            Phase::PreFlop,
            Phase::DealingCards,
            Phase::Flop,
            Phase::DealingCards,
            Phase::Turn,
            Phase::DealingCards,
            Phase::River,
            Phase::Showdown,
            Phase::EvaluatingHand,
            Phase::HandOver,
        ]
    );
    let gs = sm.game_state();
    assert_eq!(gs.community_cards().len(), 5);
    assert_eq!(gs.pot_total(), 0);
    assert_eq!(gs.total_chips(), total);
    let info = sm.last_winner_info().expect("settled");
    assert_eq!(info.total_distributed(), 300);
    assert_eq!(sm.hand_number(), 1);
}

#[test]
fn same_seed_deals_same_cards() {
    let mut a = table(&[1000, 1000], 99);
    let mut b = table(&[1000, 1000], 99);
    a.run_until_player_action().unwrap();
    b.run_until_player_action().unwrap();
    assert_eq!(a.game_state(), b.game_state());
    assert_eq!(a.game_state().player(0).hand().len(), 2);
}

#[test]
fn next_phase_is_a_pure_function() {
    for phase in Phase::ALL {
        if phase == Phase::DealingCards {
            continue;
        }
        assert_eq!(next_phase(phase, 0), next_phase(phase, 5));
    }
    assert_eq!(next_phase(Phase::River, 5), Phase::Showdown);
    assert_eq!(next_phase(Phase::HandOver, 5), Phase::InitializingHand);
}

#[test]
#[should_panic(expected = "no phase follows DEALING_CARDS")]
fn dealing_cards_with_two_card_board_is_fatal() {
    next_phase(Phase::DealingCards, 2);
}

#[test]
fn all_in_preflop_runs_the_board_out() {
    let mut sm = table(&[1000, 1000], 5);
    assert_eq!(sm.run_until_player_action().unwrap(), Phase::PreFlop);
    sm.apply_action(PlayerAction::AllIn).unwrap();
    // facing an all-in for the whole stack, a call puts the rest in
    assert_eq!(
        sm.game_state().current_player_options(),
        vec![ActionKind::Fold, ActionKind::Call, ActionKind::AllIn]
    );
    sm.apply_action(PlayerAction::Call).unwrap();
    assert!(sm.game_state().player(1).is_all_in());
    assert_eq!(sm.run_until_player_action().unwrap(), Phase::HandOver);

    let gs = sm.game_state();
    assert_eq!(gs.community_cards().len(), 5);
    assert_eq!(gs.total_chips(), 2000);
    let stacks: Vec<u32> = gs.players().iter().map(|p| p.stack()).collect();
    assert!(stacks == vec![2000, 0] || stacks == vec![0, 2000] || stacks == vec![1000, 1000]);
    if sm.is_table_finished() {
        assert_eq!(sm.advance(), Err(GameError::TableFinished));
    }
}

#[test]
fn fold_ends_hand_without_board() {
    let mut sm = table(&[1000, 1000, 1000], 3);
    sm.run_until_player_action().unwrap();
    sm.apply_action(PlayerAction::Fold).unwrap();
    sm.apply_action(PlayerAction::Fold).unwrap();
    assert_eq!(sm.run_until_player_action().unwrap(), Phase::HandOver);
    let gs = sm.game_state();
    assert!(gs.community_cards().is_empty());
    assert_eq!(gs.player(2).stack(), 1050);
    let info = sm.last_winner_info().unwrap();
    assert_eq!(info.pot_breakdown[0].winning_category, None);
}

#[test]
fn button_rotates_between_hands() {
    let mut sm = table(&[1000, 1000, 1000], 8);
    play_hand(&mut sm);
    assert_eq!(sm.game_state().dealer_idx(), 0);
    assert_eq!(sm.advance().unwrap(), Phase::InitializingHand);
    assert_eq!(sm.game_state().dealer_idx(), 1);
    play_hand(&mut sm);
    assert_eq!(sm.hand_number(), 2);
    assert_eq!(sm.game_state().total_chips(), 3000);
}

#[test]
fn wrong_seat_is_rejected() {
    let mut sm = table(&[1000, 1000, 1000], 2);
    sm.run_until_player_action().unwrap();
    let err = sm.apply_action_for(1, PlayerAction::Call).unwrap_err();
    assert_eq!(err, GameError::NotPlayersTurn { expected: 0, actual: 1 });
    assert!(sm.apply_action_for(0, PlayerAction::Call).is_ok());
}

#[test]
fn undersized_raise_reports_correction() {
    let mut sm = table(&[1000, 1000, 1000], 4);
    sm.run_until_player_action().unwrap();
    let msg = sm.apply_action(PlayerAction::Raise(120)).unwrap();
    assert!(msg.is_some());
    assert_eq!(sm.game_state().player(0).bet(), 200);
}

#[test]
fn restored_showdown_pays_out_once() {
    let hole = |s: &str| {
        let c = parse_cards(s).unwrap();
        [c[0], c[1]]
    };
    let players = vec![
        Player::new("alice", 900).with_hand(hole("As Ad")),
        Player::new("bob", 900).with_hand(hole("Ks Kd")),
    ];
    let gs = GameState::new(players, &TableConfig::default())
        .with_community_cards(parse_cards("2c 7d 9h Jc 3s").unwrap())
        .with_pot(Pot::from_contributions(vec![100, 100]));
    let mut sm =
        PokerStateMachine::restore(Phase::EvaluatingHand, gs, TableConfig::default(), 1).unwrap();
    assert_eq!(sm.advance().unwrap(), Phase::HandOver);
    assert_eq!(sm.game_state().player(0).stack(), 1100);
    assert_eq!(sm.last_winner_info().unwrap().amount_for("alice"), 200);
}

#[test]
fn busted_table_reports_finished() {
    let mut sm = table(&[1000, 1000], 21);
    for _ in 0..200 {
        match sm.run_until_player_action() {
            Ok(Phase::HandOver) => {}
            Ok(_) => {
                let options = sm.game_state().current_player_options();
                let action = if options.contains(&ActionKind::AllIn) {
                    PlayerAction::AllIn
                } else {
                    PlayerAction::Call
                };
                sm.apply_action(action).unwrap();
                continue;
            }
            Err(GameError::TableFinished) => break,
            Err(e) => panic!("unexpected error: {e}"),
        }
        assert_eq!(sm.game_state().total_chips(), 2000);
    }
    assert!(sm.is_table_finished());
}

#[test]
fn opening_button_skips_an_empty_seat() {
    let players = vec![
        Player::new("p0", 0),
        Player::new("p1", 1000),
        Player::new("p2", 1000),
    ];
    let mut sm = PokerStateMachine::new(players, TableConfig::default(), 6).unwrap();
    assert_eq!(sm.run_until_player_action().unwrap(), Phase::PreFlop);

    let gs = sm.game_state();
    assert_eq!(gs.dealer_idx(), 1);
    let bets: Vec<u32> = gs.players().iter().map(|p| p.bet()).collect();
    assert_eq!(bets, vec![0, 50, 100]);
    assert_eq!(gs.pot_total(), 150);
    assert!(gs.player(0).is_folded());
    assert!(!gs.player(0).is_all_in());
    assert!(gs.player(0).hand().is_empty());
    // heads-up: the button posts the small blind and acts first
    assert_eq!(gs.current_player_idx(), 1);
}
