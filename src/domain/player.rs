use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Статус игрока в контексте раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен и ещё может делать ставки.
    Active,
    /// Игрок сфолдил: его фишки остаются в банке, но выиграть он ничего не может.
    Folded,
    /// Игрок в олл-ине – стек 0, больше не ходит до конца раздачи.
    AllIn,
}

/// Состояние игрока в раздаче.
///
/// Пассивная структура: вся логика ставок живёт в engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    /// Стабильный индекс места (0-based).
    pub seat: SeatIndex,
    pub name: String,
    /// Фишки, которые ещё не поставлены.
    pub chips: Chips,
    /// Карманные карты (ровно 2 после сдачи).
    pub hole_cards: Vec<Card>,
    /// Ставка на текущей улице (обнуляется каждую улицу).
    pub bet_this_round: Chips,
    /// Суммарный вклад за раздачу (никогда не обнуляется).
    pub total_bet: Chips,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(seat: SeatIndex, name: impl Into<String>, chips: Chips) -> Self {
        Self {
            seat,
            name: name.into(),
            chips,
            hole_cards: Vec::with_capacity(2),
            bet_this_round: Chips::ZERO,
            total_bet: Chips::ZERO,
            status: PlayerStatus::Active,
        }
    }

    pub fn is_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }

    pub fn is_all_in(&self) -> bool {
        self.status == PlayerStatus::AllIn
    }

    /// Может ли игрок ещё делать ходы (не сфолдил и не в олл-ине).
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Претендует ли игрок на банк.
    pub fn is_contesting(&self) -> bool {
        !self.is_folded()
    }

    /// Сколько нужно доплатить до `current_bet`.
    pub fn to_call(&self, current_bet: Chips) -> Chips {
        current_bet.saturating_sub(self.bet_this_round)
    }

    /// Ставка, если поставить весь стек.
    pub fn all_in_total(&self) -> Chips {
        self.bet_this_round + self.chips
    }

    /// Переложить из стека в ставку не больше `amount`.
    /// Возвращает реально поставленную сумму; при нулевом стеке – олл-ин.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.bet_this_round += paid;
        self.total_bet += paid;
        if self.chips.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    pub fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }

    /// Конец улицы: ставка уходит в банк.
    pub fn clear_round_bet(&mut self) -> Chips {
        std::mem::replace(&mut self.bet_this_round, Chips::ZERO)
    }
}
