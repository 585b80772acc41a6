//! Правила раунда ставок: допустимые действия и завершение раунда.

use holdem_core::domain::{Chips, Player, Street};
use holdem_core::engine::{ActionKind, BettingRound, ValidAction};

fn player(seat: u8, chips: u64) -> Player {
    Player::new(seat, format!("p{seat}"), Chips::new(chips))
}

fn kinds(actions: &[ValidAction]) -> Vec<ActionKind> {
    actions.iter().map(|a| a.kind).collect()
}

/// Раунд с текущей ставкой `bet` (как после блайндов).
fn round_with_bet(players: usize, bet: u64) -> BettingRound {
    let mut round = BettingRound::new(players, Chips::new(10), Some(2));
    round.current_bet = Chips::new(bet);
    round
}

#[test]
fn nothing_to_call_offers_check_and_raise() {
    let round = BettingRound::new(3, Chips::new(10), None);
    let p = player(0, 100);

    let actions = round.valid_actions(&p);
    assert_eq!(
        kinds(&actions),
        vec![ActionKind::Fold, ActionKind::Check, ActionKind::Raise]
    );

    let raise = actions[2];
    assert_eq!(raise.min_amount, Chips::new(10));
    assert_eq!(raise.max_amount, Chips::new(100));
    assert_eq!(actions[0].min_amount, Chips::ZERO);
    assert_eq!(actions[1].max_amount, Chips::ZERO);
}

#[test]
fn short_stack_with_nothing_to_call_can_only_shove() {
    let round = BettingRound::new(3, Chips::new(10), None);
    let p = player(0, 10);

    let actions = round.valid_actions(&p);
    assert_eq!(
        kinds(&actions),
        vec![ActionKind::Fold, ActionKind::Check, ActionKind::AllIn]
    );
    assert_eq!(actions[2].min_amount, Chips::new(10));
}

#[test]
fn facing_bet_offers_call_and_raise() {
    let round = round_with_bet(3, 10);
    let p = player(0, 100);

    let actions = round.valid_actions(&p);
    assert_eq!(
        kinds(&actions),
        vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise]
    );
    assert_eq!(actions[1].min_amount, Chips::new(10));
    assert_eq!(actions[2].min_amount, Chips::new(20));
    assert_eq!(actions[2].max_amount, Chips::new(100));
}

#[test]
fn facing_bet_without_room_for_full_raise_offers_all_in() {
    let round = round_with_bet(3, 10);
    // to_call 10 + min_raise 10 = 20: 20 фишек на полный рейз не хватает.
    let p = player(0, 20);

    let actions = round.valid_actions(&p);
    assert_eq!(
        kinds(&actions),
        vec![ActionKind::Fold, ActionKind::Call, ActionKind::AllIn]
    );
    assert_eq!(actions[2].max_amount, Chips::new(20));
}

#[test]
fn call_for_less_is_all_in_only() {
    let round = round_with_bet(3, 50);
    let p = player(0, 30);

    let actions = round.valid_actions(&p);
    assert_eq!(kinds(&actions), vec![ActionKind::Fold, ActionKind::AllIn]);
    assert_eq!(actions[1].max_amount, Chips::new(30));
}

#[test]
fn folded_or_all_in_players_have_no_actions() {
    let round = round_with_bet(3, 10);

    let mut folded = player(0, 100);
    folded.fold();
    assert!(round.valid_actions(&folded).is_empty());

    let mut shoved = player(1, 40);
    shoved.commit(Chips::new(40));
    assert!(shoved.is_all_in());
    assert!(round.valid_actions(&shoved).is_empty());
}

#[test]
fn big_blind_option_blocks_preflop_completion() {
    let mut round = round_with_bet(3, 10);
    let mut players: Vec<Player> = (0..3).map(|s| player(s, 100)).collect();
    for p in &mut players {
        p.commit(Chips::new(10));
    }
    round.mark_player_acted(0);
    round.mark_player_acted(1);
    round.mark_player_acted(2);

    assert!(round.big_blind_option_pending(&players));
    assert!(!round.is_betting_complete(&players, Street::Preflop));
    // На других улицах опциона нет.
    assert!(round.is_betting_complete(&players, Street::Flop));

    round.mark_big_blind_acted();
    assert!(round.is_betting_complete(&players, Street::Preflop));
}

#[test]
fn big_blind_option_ignored_when_big_blind_is_all_in() {
    let mut round = round_with_bet(3, 10);
    let mut players: Vec<Player> = vec![player(0, 100), player(1, 100), player(2, 10)];
    for p in &mut players {
        p.commit(Chips::new(10));
    }
    assert!(players[2].is_all_in());
    round.mark_player_acted(0);
    round.mark_player_acted(1);

    assert!(!round.big_blind_option_pending(&players));
    assert!(round.is_betting_complete(&players, Street::Preflop));
}

#[test]
fn round_is_incomplete_until_everyone_matches_and_acts() {
    let mut round = BettingRound::new(3, Chips::new(10), None);
    let mut players: Vec<Player> = (0..3).map(|s| player(s, 100)).collect();

    round.mark_player_acted(0);
    round.mark_player_acted(1);
    assert!(!round.is_betting_complete(&players, Street::Flop));

    players[2].commit(Chips::new(30));
    round.on_raise(2, Chips::new(30));
    assert!(round.has_acted(2));
    assert!(!round.has_acted(0));
    assert!(!round.is_betting_complete(&players, Street::Flop));

    players[0].commit(Chips::new(30));
    round.mark_player_acted(0);
    players[1].fold();
    assert!(round.is_betting_complete(&players, Street::Flop));
}

#[test]
fn single_player_left_to_act_must_still_match() {
    let round = round_with_bet(2, 50);
    let mut players = vec![player(0, 50), player(1, 100)];
    players[0].commit(Chips::new(50));
    players[1].commit(Chips::new(10));

    assert!(!round.is_betting_complete(&players, Street::Preflop));

    players[1].commit(Chips::new(40));
    assert!(round.is_betting_complete(&players, Street::Preflop));
}

#[test]
fn full_raise_sets_min_raise_short_all_in_does_not() {
    let mut round = round_with_bet(3, 10);

    round.on_raise(0, Chips::new(35));
    assert_eq!(round.current_bet, Chips::new(35));
    assert_eq!(round.min_raise, Chips::new(25));
    assert_eq!(round.min_raise_to(), Chips::new(60));
    assert_eq!(round.last_raiser, Some(0));

    round.mark_player_acted(1);
    round.on_raise(2, Chips::new(45));
    assert_eq!(round.current_bet, Chips::new(45));
    assert_eq!(round.min_raise, Chips::new(25));
    assert_eq!(round.last_raiser, Some(2));
    assert!(!round.has_acted(0));
    assert!(!round.has_acted(1));
    assert!(round.has_acted(2));
}

#[test]
fn reset_for_new_round_keeps_big_blind_flag() {
    let mut round = round_with_bet(3, 10);
    round.on_raise(1, Chips::new(40));
    round.mark_big_blind_acted();

    round.reset_for_new_round(3);
    assert_eq!(round.current_bet, Chips::ZERO);
    assert_eq!(round.min_raise, Chips::new(10));
    assert_eq!(round.last_raiser, None);
    assert!((0..3).all(|s| !round.has_acted(s)));
    assert!(round.bb_acted);
}

#[test]
fn forget_raiser_only_clears_matching_seat() {
    let mut round = round_with_bet(3, 10);
    round.on_raise(1, Chips::new(30));

    round.forget_raiser(0);
    assert_eq!(round.last_raiser, Some(1));
    round.forget_raiser(1);
    assert_eq!(round.last_raiser, None);
}
