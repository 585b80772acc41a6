use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::SeatIndex;
use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    #[error("некорректный запрос: {0}")]
    BadRequest(String),

    /// Действие прислал не тот, чей ход.
    #[error("сейчас не ход места {seat} (ходит {acting:?})")]
    NotYourTurn {
        seat: SeatIndex,
        acting: Option<SeatIndex>,
    },

    /// Действие отклонено правилами (чек при ставке, маленький рейз и т.п.).
    #[error("недопустимое действие: {0}")]
    InvalidAction(String),

    /// Раздача уже закончена.
    #[error("раздача завершена")]
    HandComplete,

    /// Дефект движка.
    #[error("внутренняя ошибка: {0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::HandComplete => ApiError::HandComplete,
            EngineError::Config(e) => ApiError::BadRequest(e.to_string()),
            e @ (EngineError::InvalidSeat(_) | EngineError::SeatAlreadyFolded(_)) => {
                ApiError::InvalidAction(e.to_string())
            }
            e if e.is_validation() => ApiError::InvalidAction(e.to_string()),
            e => ApiError::Internal(e.to_string()),
        }
    }
}
