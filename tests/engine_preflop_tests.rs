//! Старт раздачи и переход улиц.
//!
//! Проверяем:
//! - блайнды и первый ход (хедз-ап и 3+ игрока);
//! - порядок сдачи карманных карт из подготовленной колоды;
//! - опцион большого блайнда;
//! - переход Preflop -> Flop -> Turn -> River -> Showdown и рост борда;
//! - автодокладку борда, когда ходить некому.

use std::sync::{Arc, Mutex};

use holdem_core::domain::{BlindKind, Card, Chips, HandConfig, PlayerStatus, Street};
use holdem_core::engine::{
    ActionKind, EventSink, HandEventKind, HandState, NoopSink, PlayerAction,
};
use holdem_core::eval::StandardEvaluator;
use holdem_core::infra::DeterministicRng;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("p{i}")).collect()
}

fn start(config: HandConfig) -> HandState {
    HandState::with_defaults(config, DeterministicRng::from_u64(7)).expect("валидный конфиг")
}

fn three_players() -> HandState {
    start(HandConfig::new(names(3), 0, Chips::new(5), Chips::new(10)).with_default_stack(Chips::new(100)))
}

fn kinds(hand: &HandState) -> Vec<ActionKind> {
    hand.valid_actions().iter().map(|a| a.kind).collect()
}

#[test]
fn three_handed_blinds_and_first_to_act() {
    let hand = three_players();

    assert_eq!(hand.street(), Street::Preflop);
    assert_eq!(hand.blind_seats().small_blind, 1);
    assert_eq!(hand.blind_seats().big_blind, 2);
    assert_eq!(hand.players()[1].bet_this_round, Chips::new(5));
    assert_eq!(hand.players()[2].bet_this_round, Chips::new(10));
    assert_eq!(hand.betting().current_bet, Chips::new(10));
    // Кнопка+3 по кругу – снова кнопка.
    assert_eq!(hand.acting_seat(), Some(0));

    for p in hand.players() {
        assert_eq!(p.hole_cards.len(), 2);
    }
    assert!(hand.board_cards().is_empty());
}

#[test]
fn four_handed_action_starts_after_big_blind() {
    let hand = start(HandConfig::new(names(4), 2, Chips::new(5), Chips::new(10)));

    assert_eq!(hand.blind_seats().small_blind, 3);
    assert_eq!(hand.blind_seats().big_blind, 0);
    assert_eq!(hand.acting_seat(), Some(1));
}

#[test]
fn heads_up_button_posts_small_blind_and_acts_first() {
    let hand = start(HandConfig::new(names(2), 1, Chips::new(5), Chips::new(10)));

    assert_eq!(hand.blind_seats().small_blind, 1);
    assert_eq!(hand.blind_seats().big_blind, 0);
    assert_eq!(hand.players()[1].bet_this_round, Chips::new(5));
    assert_eq!(hand.acting_seat(), Some(1));
}

#[test]
fn scenario_a_limped_pot_reaches_flop() {
    let mut hand = three_players();

    hand.process_action(PlayerAction::Call).unwrap(); // UTG (кнопка)
    hand.process_action(PlayerAction::Call).unwrap(); // SB
    assert_eq!(hand.acting_seat(), Some(2));
    hand.process_action(PlayerAction::Check).unwrap(); // BB

    assert_eq!(hand.street(), Street::Flop);
    assert_eq!(hand.board_cards().len(), 3);
    assert_eq!(hand.pot_total(), Chips::new(30));

    let pots = hand.pots();
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].amount, Chips::new(30));
    assert_eq!(pots[0].eligible, vec![0, 1, 2]);

    // Постфлоп первым ходит первый активный после кнопки.
    assert_eq!(hand.acting_seat(), Some(1));
    assert!(hand.players().iter().all(|p| p.bet_this_round.is_zero()));
}

#[test]
fn scenario_d_big_blind_keeps_option_after_limps() {
    let mut hand = three_players();

    hand.process_action(PlayerAction::Call).unwrap();
    hand.process_action(PlayerAction::Call).unwrap();

    // Ставки уравнены, но улица не закончилась: ход за BB.
    assert_eq!(hand.street(), Street::Preflop);
    assert_eq!(hand.acting_seat(), Some(2));
    assert_eq!(
        kinds(&hand),
        vec![ActionKind::Fold, ActionKind::Check, ActionKind::Raise]
    );

    hand.process_action(PlayerAction::Raise(Chips::new(30))).unwrap();
    assert_eq!(hand.street(), Street::Preflop);
    assert_eq!(hand.acting_seat(), Some(0));

    hand.process_action(PlayerAction::Call).unwrap();
    hand.process_action(PlayerAction::Call).unwrap();
    assert_eq!(hand.street(), Street::Flop);
    assert_eq!(hand.pot_total(), Chips::new(90));
}

#[test]
fn hole_cards_dealt_one_at_a_time_from_left_of_button() {
    let deck = Card::parse_list("2c 3c 4c 5c 6c 7c 8d 9d Td Jh Qh").unwrap();
    let config = HandConfig::new(names(3), 0, Chips::new(5), Chips::new(10))
        .with_preset_deck(deck.clone());
    let mut hand = start(config);

    // Порядок сдачи: seat 1, 2, 0, затем второй круг.
    assert_eq!(hand.players()[1].hole_cards, vec![deck[0], deck[3]]);
    assert_eq!(hand.players()[2].hole_cards, vec![deck[1], deck[4]]);
    assert_eq!(hand.players()[0].hole_cards, vec![deck[2], deck[5]]);

    hand.process_action(PlayerAction::Call).unwrap();
    hand.process_action(PlayerAction::Call).unwrap();
    hand.process_action(PlayerAction::Check).unwrap();
    assert_eq!(hand.board_cards(), &deck[6..9]);
}

#[test]
fn streets_progress_to_showdown_with_checks() {
    let mut hand = three_players();
    hand.process_action(PlayerAction::Call).unwrap();
    hand.process_action(PlayerAction::Call).unwrap();
    hand.process_action(PlayerAction::Check).unwrap();

    for (street, board_len) in [(Street::Flop, 3), (Street::Turn, 4), (Street::River, 5)] {
        assert_eq!(hand.street(), street);
        assert_eq!(hand.board_cards().len(), board_len);
        assert_eq!(street.board_len(), board_len);
        assert_eq!(hand.acting_seat(), Some(1));
        for _ in 0..3 {
            hand.process_action(PlayerAction::Check).unwrap();
        }
    }

    assert_eq!(hand.street(), Street::Showdown);
    assert!(hand.is_complete());
    assert_eq!(hand.acting_seat(), None);
    assert!(hand.valid_actions().is_empty());
    assert!(!hand.winners().is_empty());

    let total: Chips = hand.players().iter().map(|p| p.chips).sum();
    assert_eq!(total, Chips::new(300));
}

#[test]
fn short_big_blind_posts_what_it_has() {
    let config = HandConfig::new(names(3), 0, Chips::new(5), Chips::new(10))
        .with_starting_chips(vec![Chips::new(100), Chips::new(100), Chips::new(4)]);
    let hand = start(config);

    let bb = &hand.players()[2];
    assert_eq!(bb.bet_this_round, Chips::new(4));
    assert_eq!(bb.status, PlayerStatus::AllIn);
    // Ставка для остальных – номинальный BB.
    assert_eq!(hand.betting().current_bet, Chips::new(10));
    assert_eq!(hand.acting_seat(), Some(0));
}

#[test]
fn blinds_putting_everyone_all_in_run_out_the_board() {
    let config = HandConfig::new(names(2), 0, Chips::new(5), Chips::new(10))
        .with_starting_chips(vec![Chips::new(5), Chips::new(10)]);
    let hand = start(config);

    assert!(hand.is_complete());
    assert_eq!(hand.street(), Street::Showdown);
    assert_eq!(hand.board_cards().len(), 5);
    assert_eq!(hand.acting_seat(), None);

    // Лишние 5 фишек BB никто не мог уравнять – отдельный банк только для него.
    let pots = hand.pots();
    assert_eq!(pots.len(), 2);
    assert_eq!(pots[1].amount, Chips::new(5));
    assert_eq!(pots[1].eligible, vec![1]);

    let total: Chips = hand.players().iter().map(|p| p.chips).sum();
    assert_eq!(total, Chips::new(15));
}

#[test]
fn short_small_blind_heads_up_leaves_nothing_to_decide() {
    let config = HandConfig::new(names(2), 0, Chips::new(5), Chips::new(10))
        .with_starting_chips(vec![Chips::new(3), Chips::new(100)]);
    let hand = start(config);

    assert!(hand.is_complete());
    assert_eq!(hand.street(), Street::Showdown);
    assert_eq!(hand.chips_in_play(), Chips::new(103));
}

#[test]
fn history_records_hand_lifecycle() {
    let mut hand = three_players();
    hand.process_action(PlayerAction::Fold).unwrap();
    hand.process_action(PlayerAction::Fold).unwrap();

    let kinds: Vec<&HandEventKind> = hand.history().kinds().collect();
    assert!(matches!(kinds[0], HandEventKind::HandStarted { button: 0, .. }));
    assert!(matches!(
        kinds[1],
        HandEventKind::BlindPosted {
            seat: 1,
            blind: BlindKind::Small,
            ..
        }
    ));
    assert!(matches!(
        kinds[2],
        HandEventKind::BlindPosted {
            seat: 2,
            blind: BlindKind::Big,
            ..
        }
    ));
    let dealt = kinds
        .iter()
        .filter(|k| matches!(k, HandEventKind::HoleCardsDealt { .. }))
        .count();
    assert_eq!(dealt, 3);
    assert!(matches!(
        kinds.last(),
        Some(HandEventKind::HandFinished {
            street_reached: Street::Preflop
        })
    ));

    let json = hand.history().to_json().unwrap();
    assert!(json.contains("PotAwarded"));
}

/// Наблюдатель, который складывает события в общий список.
struct Recorder(Arc<Mutex<Vec<HandEventKind>>>);

impl EventSink for Recorder {
    fn on_event(&mut self, event: &HandEventKind) {
        self.0.lock().unwrap().push(event.clone());
    }
}

#[test]
fn event_sink_sees_the_same_events_as_history() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let config = HandConfig::new(names(3), 0, Chips::new(5), Chips::new(10));
    let mut hand = HandState::new(
        config,
        DeterministicRng::from_u64(1),
        Box::new(StandardEvaluator),
        Box::new(Recorder(Arc::clone(&seen))),
    )
    .unwrap();

    hand.process_action(PlayerAction::Call).unwrap();

    let recorded: Vec<HandEventKind> = hand.history().kinds().cloned().collect();
    assert_eq!(*seen.lock().unwrap(), recorded);
    assert!(matches!(
        recorded.last(),
        Some(HandEventKind::PlayerActed {
            seat: 0,
            action: PlayerAction::Call,
            ..
        })
    ));
}

#[test]
fn noop_sink_hand_is_fully_functional() {
    let config = HandConfig::new(names(2), 0, Chips::new(5), Chips::new(10));
    let mut hand = HandState::new(
        config,
        DeterministicRng::from_u64(3),
        Box::new(StandardEvaluator),
        Box::new(NoopSink),
    )
    .unwrap();

    hand.process_action(PlayerAction::Call).unwrap();
    hand.process_action(PlayerAction::Check).unwrap();
    assert_eq!(hand.street(), Street::Flop);
    assert_eq!(hand.history().len(), 1 + 2 + 2 + 2 + 1);
}
