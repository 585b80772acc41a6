use serde::{Deserialize, Serialize};

use crate::domain::SeatIndex;
use crate::engine::actions::PlayerAction;
use crate::engine::{HandState, HandSummary};

use super::dto::{build_snapshot, HandSnapshot, Viewer};
use super::errors::ApiError;

/// Команда, меняющая состояние раздачи.
///
/// В таком виде команды приходят от UI / сети / бота (JSON).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Действие игрока. Место указывается явно и сверяется с очередью хода.
    Act { seat: SeatIndex, action: PlayerAction },

    /// Принудительный фолд (дисконнект, таймаут, нарушение).
    ForceFold { seat: SeatIndex },
}

/// Ответ на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Раздача продолжается: новое состояние глазами отправителя.
    Updated(HandSnapshot),

    /// Раздача закончилась этой командой.
    HandFinished {
        snapshot: HandSnapshot,
        summary: HandSummary,
    },
}

/// Применить команду к раздаче.
pub fn apply_command(hand: &mut HandState, command: Command) -> Result<CommandResponse, ApiError> {
    let viewer = match command {
        Command::Act { seat, action } => {
            let acting = hand.acting_seat();
            if acting != Some(seat) {
                return Err(ApiError::NotYourTurn { seat, acting });
            }
            hand.process_action(action)?;
            Viewer::Seat(seat)
        }
        Command::ForceFold { seat } => {
            hand.force_fold(seat)?;
            Viewer::Spectator
        }
    };

    let snapshot = build_snapshot(hand, viewer);
    Ok(match hand.summary() {
        Some(summary) => CommandResponse::HandFinished { snapshot, summary },
        None => CommandResponse::Updated(snapshot),
    })
}

/// Разобрать команду из JSON.
pub fn parse_command(json: &str) -> Result<Command, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::BadRequest(e.to_string()))
}
