//! Движок одной раздачи: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `HandState`
//! Основные операции:
//!   - `HandState::new` – поставить блайнды, раздать карты
//!   - `HandState::process_action` – применить действие игрока
//!   - `HandState::force_fold` – фолд вне очереди

pub mod actions;
pub mod betting;
pub mod errors;
pub mod hand_history;
pub mod hand_state;
pub mod positions;
pub mod pot;
pub mod showdown;
pub mod side_pots;
pub mod validation;

pub use actions::{ActionKind, PlayerAction, ValidAction};
pub use betting::BettingRound;
pub use errors::EngineError;
pub use hand_history::{EventSink, HandEvent, HandEventKind, HandHistory, NoopSink};
pub use hand_state::{HandState, HandSummary};
pub use pot::Pot;
pub use showdown::PotAward;
pub use side_pots::{compute_side_pots, PotManager};

/// Источник случайности для перемешивания колоды.
/// Реализации – в `infra::rng`.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
