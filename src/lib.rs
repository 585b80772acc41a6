//! Движок одной раздачи Texas Hold'em (No-Limit).
//!
//! Слои:
//! - `domain` – пассивные данные: карты, колода, фишки, игроки, конфиг;
//! - `engine` – ставки, банки, шоудаун, машина состояний `HandState`;
//! - `eval` – оценка 7-карточных рук;
//! - `infra` – реализации RNG;
//! - `api` – сериализуемый фасад (команды, запросы, DTO).

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use domain::{Card, Chips, HandConfig, SeatIndex, Street};
pub use engine::{EngineError, HandState, PlayerAction};
