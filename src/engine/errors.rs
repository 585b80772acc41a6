use thiserror::Error;

use crate::domain::{Chips, ConfigError, DeckError, SeatIndex};
use crate::engine::actions::ActionKind;

/// Ошибки движка покера.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("раздача уже завершена")]
    HandComplete,

    #[error("место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("игрок на месте {0} уже сфолдил")]
    SeatAlreadyFolded(SeatIndex),

    #[error("действие {0} недопустимо в текущем состоянии раздачи")]
    IllegalAction(ActionKind),

    #[error("невозможно выполнить check – нужно доплатить {to_call}")]
    CannotCheck { to_call: Chips },

    #[error("невозможно выполнить call – нет ставки для уравнивания")]
    CannotCall,

    #[error("рейз до {amount} слишком мал, минимум {min}")]
    RaiseTooSmall { amount: Chips, min: Chips },

    #[error("недостаточно фишек: ставка до {amount}, максимум {max}")]
    NotEnoughChips { amount: Chips, max: Chips },

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("нарушено сохранение фишек: ожидалось {expected}, насчитано {actual}")]
    ChipConservation { expected: Chips, actual: Chips },

    #[error("внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Ошибка ввода игрока (а не дефект движка).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::IllegalAction(_)
                | EngineError::CannotCheck { .. }
                | EngineError::CannotCall
                | EngineError::RaiseTooSmall { .. }
                | EngineError::NotEnoughChips { .. }
        )
    }
}
