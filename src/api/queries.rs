use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::hand::Street;
use crate::domain::SeatIndex;
use crate::engine::{HandHistory, HandState, HandSummary, ValidAction};

use super::dto::{build_snapshot, HandSnapshot, PotView, Viewer};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Снимок стола глазами `viewer`.
    Snapshot { viewer: Viewer },

    /// Допустимые действия того, чей ход.
    ValidActions,

    /// Живые банки.
    Pots,

    /// Победители по банкам (после завершения).
    Winners,

    /// Борд, улица и чей ход.
    Board,

    /// Итог раздачи (после завершения).
    Summary,

    /// Полная история событий.
    History,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Snapshot(HandSnapshot),
    ValidActions {
        seat: Option<SeatIndex>,
        actions: Vec<ValidAction>,
    },
    Pots(Vec<PotView>),
    Winners(BTreeMap<usize, Vec<SeatIndex>>),
    Board {
        street: Street,
        cards: Vec<Card>,
        acting_seat: Option<SeatIndex>,
        is_complete: bool,
    },
    Summary(Option<HandSummary>),
    History(HandHistory),
}

pub fn handle_query(hand: &HandState, query: Query) -> QueryResponse {
    match query {
        Query::Snapshot { viewer } => QueryResponse::Snapshot(build_snapshot(hand, viewer)),
        Query::ValidActions => QueryResponse::ValidActions {
            seat: hand.acting_seat(),
            actions: hand.valid_actions(),
        },
        Query::Pots => QueryResponse::Pots(hand.pots().iter().map(PotView::from).collect()),
        Query::Winners => QueryResponse::Winners(hand.winners()),
        Query::Board => QueryResponse::Board {
            street: hand.street(),
            cards: hand.board_cards().to_vec(),
            acting_seat: hand.acting_seat(),
            is_complete: hand.is_complete(),
        },
        Query::Summary => QueryResponse::Summary(hand.summary()),
        Query::History => QueryResponse::History(hand.history().clone()),
    }
}
