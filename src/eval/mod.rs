//! Оценка силы покерных рук (Texas Hold'em).
//!
//! Движок не знает, как устроен оценщик: он получает его снаружи
//! как `HandEvaluator`. `StandardEvaluator` – реализация по умолчанию.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

use std::cmp::Ordering;

use crate::domain::card::Card;
use crate::domain::hand::HandRank;

pub use evaluator::evaluate_best_hand;
pub use hand_rank::{describe_hand, HandCategory};

/// Оценщик 7-карточных рук (2 карманные + 5 общих).
pub trait HandEvaluator: Send {
    fn evaluate7(&self, cards: &[Card; 7]) -> HandRank;

    /// Сравнение двух рангов: `Greater` – первая рука сильнее.
    fn compare(&self, a: HandRank, b: HandRank) -> Ordering {
        a.cmp(&b)
    }
}

/// Оценщик по маскам рангов/мастей.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn evaluate7(&self, cards: &[Card; 7]) -> HandRank {
        evaluator::evaluate_cards(cards)
    }
}
