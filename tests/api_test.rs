//! Внешний API: команды, запросы, снимки с учётом того, кто смотрит.

use holdem_core::api::{
    apply_command, build_snapshot, handle_query, parse_command, ApiError, Command,
    CommandResponse, Query, QueryResponse, Viewer,
};
use holdem_core::domain::{Chips, ConfigError, HandConfig, Street};
use holdem_core::engine::{ActionKind, EngineError, HandState, PlayerAction};
use holdem_core::infra::DeterministicRng;

fn hand() -> HandState {
    let config = HandConfig::new(["alice", "bob", "carol"], 0, Chips::new(5), Chips::new(10));
    HandState::with_defaults(config, DeterministicRng::from_u64(8)).unwrap()
}

#[test]
fn act_out_of_turn_is_rejected() {
    let mut hand = hand();
    let err = apply_command(
        &mut hand,
        Command::Act {
            seat: 1,
            action: PlayerAction::Call,
        },
    )
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::NotYourTurn {
            seat: 1,
            acting: Some(0)
        }
    );
}

#[test]
fn act_returns_snapshot_for_the_actor() {
    let mut hand = hand();
    let response = apply_command(
        &mut hand,
        Command::Act {
            seat: 0,
            action: PlayerAction::Call,
        },
    )
    .unwrap();

    let CommandResponse::Updated(snapshot) = response else {
        panic!("раздача не должна закончиться");
    };
    assert_eq!(snapshot.acting_seat, Some(1));
    assert_eq!(snapshot.total_pot, Chips::new(25));
    assert_eq!(snapshot.seats[0].hole_cards.as_ref().map(Vec::len), Some(2));
    assert!(snapshot.seats[1].hole_cards.is_none());
    // Действия видит только тот, чей ход.
    assert!(snapshot.valid_actions.is_empty());
}

#[test]
fn invalid_action_maps_to_api_error() {
    let mut hand = hand();
    let err = apply_command(
        &mut hand,
        Command::Act {
            seat: 0,
            action: PlayerAction::Check,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidAction(_)));
}

#[test]
fn finishing_command_returns_summary() {
    let mut hand = hand();
    apply_command(&mut hand, Command::ForceFold { seat: 0 }).unwrap();
    let response = apply_command(&mut hand, Command::ForceFold { seat: 1 }).unwrap();

    match response {
        CommandResponse::HandFinished { snapshot, summary } => {
            assert!(snapshot.is_complete);
            assert_eq!(summary.street_reached, Street::Preflop);
            assert_eq!(summary.awards[0].winners, vec![2]);
        }
        other => panic!("ожидали конец раздачи, получили {other:?}"),
    }

    assert_eq!(
        apply_command(&mut hand, Command::ForceFold { seat: 2 }),
        Err(ApiError::HandComplete)
    );
}

#[test]
fn snapshot_hides_cards_per_viewer() {
    let hand = hand();

    let spectator = build_snapshot(&hand, Viewer::Spectator);
    assert!(spectator.seats.iter().all(|s| s.hole_cards.is_none()));
    assert!(spectator.valid_actions.is_empty());

    let bob = build_snapshot(&hand, Viewer::Seat(1));
    assert!(bob.seats[1].hole_cards.is_some());
    assert!(bob.seats[0].hole_cards.is_none());

    let acting = build_snapshot(&hand, Viewer::Seat(0));
    assert_eq!(acting.valid_actions[0].kind, ActionKind::Fold);

    let admin = build_snapshot(&hand, Viewer::Admin);
    assert!(admin.seats.iter().all(|s| s.hole_cards.is_some()));
    assert_eq!(admin.big_blind, Chips::new(10));
    assert_eq!(admin.current_bet, Chips::new(10));
}

#[test]
fn showdown_reveals_contesting_hands_to_everyone() {
    let mut hand = hand();
    hand.process_action(PlayerAction::Fold).unwrap();
    hand.process_action(PlayerAction::Call).unwrap();
    while !hand.is_complete() {
        hand.process_action(PlayerAction::Check).unwrap();
    }

    let spectator = build_snapshot(&hand, Viewer::Spectator);
    assert!(spectator.seats[0].hole_cards.is_none());
    assert!(spectator.seats[1].hole_cards.is_some());
    assert!(spectator.seats[2].hole_cards.is_some());
}

#[test]
fn queries_expose_read_only_views() {
    let mut hand = hand();

    match handle_query(&hand, Query::ValidActions) {
        QueryResponse::ValidActions { seat, actions } => {
            assert_eq!(seat, Some(0));
            assert_eq!(actions.len(), 3);
        }
        other => panic!("{other:?}"),
    }

    match handle_query(&hand, Query::Pots) {
        QueryResponse::Pots(pots) => {
            assert_eq!(pots.len(), 1);
            assert_eq!(pots[0].amount, Chips::new(15));
        }
        other => panic!("{other:?}"),
    }

    assert_eq!(handle_query(&hand, Query::Summary), QueryResponse::Summary(None));

    hand.process_action(PlayerAction::Fold).unwrap();
    hand.process_action(PlayerAction::Fold).unwrap();

    match handle_query(&hand, Query::Winners) {
        QueryResponse::Winners(winners) => assert_eq!(winners[&0], vec![2]),
        other => panic!("{other:?}"),
    }
    match handle_query(&hand, Query::Board) {
        QueryResponse::Board {
            street,
            cards,
            acting_seat,
            is_complete,
        } => {
            assert_eq!(street, Street::Preflop);
            assert!(cards.is_empty());
            assert_eq!(acting_seat, None);
            assert!(is_complete);
        }
        other => panic!("{other:?}"),
    }
    match handle_query(&hand, Query::History) {
        QueryResponse::History(history) => assert!(!history.is_empty()),
        other => panic!("{other:?}"),
    }
}

#[test]
fn commands_parse_from_json() {
    let cmd = parse_command(r#"{"Act":{"seat":2,"action":{"Raise":40}}}"#).unwrap();
    assert_eq!(
        cmd,
        Command::Act {
            seat: 2,
            action: PlayerAction::Raise(Chips::new(40))
        }
    );

    let fold = parse_command(r#"{"ForceFold":{"seat":1}}"#).unwrap();
    assert_eq!(fold, Command::ForceFold { seat: 1 });

    assert!(matches!(
        parse_command("{\"Dance\":{}}"),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn engine_errors_map_to_api_errors() {
    assert_eq!(ApiError::from(EngineError::HandComplete), ApiError::HandComplete);
    assert!(matches!(
        ApiError::from(EngineError::CannotCall),
        ApiError::InvalidAction(_)
    ));
    assert!(matches!(
        ApiError::from(EngineError::SeatAlreadyFolded(1)),
        ApiError::InvalidAction(_)
    ));
    assert!(matches!(
        ApiError::from(EngineError::Config(ConfigError::NotEnoughPlayers(1))),
        ApiError::BadRequest(_)
    ));
    assert!(matches!(
        ApiError::from(EngineError::Internal("x")),
        ApiError::Internal(_)
    ));
}
