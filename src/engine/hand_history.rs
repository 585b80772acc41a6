use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{BlindKind, SeatIndex};
use crate::engine::actions::PlayerAction;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted {
        button: SeatIndex,
        players: Vec<(SeatIndex, String, Chips)>,
    },

    /// Блайнд поставлен (может быть меньше номинала у короткого стека).
    BlindPosted {
        seat: SeatIndex,
        blind: BlindKind,
        amount: Chips,
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt { seat: SeatIndex, cards: Vec<Card> },

    /// Действие игрока.
    PlayerActed {
        seat: SeatIndex,
        action: PlayerAction,
        /// Сколько фишек добавлено в ставку этим действием.
        added: Chips,
        stack_after: Chips,
        pot_after: Chips,
    },

    /// Принудительный фолд вне очереди (дисконнект, нарушение).
    PlayerForceFolded { seat: SeatIndex },

    /// Переход на новую улицу, с бордом после открытия.
    StreetChanged { street: Street, board: Vec<Card> },

    /// Выплата из банка.
    PotAwarded {
        pot_index: usize,
        seat: SeatIndex,
        amount: Chips,
    },

    /// Раздача завершена.
    HandFinished { street_reached: Street },
}

/// Получатель событий раздачи (UI, сеть, логирование истории).
pub trait EventSink: Send {
    fn on_event(&mut self, event: &HandEventKind);
}

/// Ничего не делает. Движок полностью работает и без наблюдателей.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn on_event(&mut self, _event: &HandEventKind) {}
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &HandEventKind> {
        self.events.iter().map(|e| &e.kind)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl EventSink for HandHistory {
    fn on_event(&mut self, event: &HandEventKind) {
        self.push(event.clone());
    }
}
