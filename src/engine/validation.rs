use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::engine::actions::{find_action, ActionKind, PlayerAction, ValidAction};
use crate::engine::betting::BettingRound;
use crate::engine::errors::EngineError;

/// Проверка конкретного действия игрока против списка допустимых.
///
/// `valid` – результат `HandState::valid_actions` для этого игрока.
pub fn validate_action(
    player: &Player,
    action: &PlayerAction,
    valid: &[ValidAction],
    betting: &BettingRound,
) -> Result<(), EngineError> {
    if valid.is_empty() {
        return Err(EngineError::IllegalAction(action.kind()));
    }

    let to_call = betting.to_call(player);

    match action {
        PlayerAction::Fold => Ok(()),

        PlayerAction::Check => {
            if find_action(valid, ActionKind::Check).is_some() {
                Ok(())
            } else {
                Err(EngineError::CannotCheck { to_call })
            }
        }

        PlayerAction::Call => {
            if to_call.is_zero() {
                Err(EngineError::CannotCall)
            } else {
                // Если стека не хватает – это колл на меньшую сумму (олл-ин).
                Ok(())
            }
        }

        PlayerAction::Raise(amount) => validate_raise(player, *amount, valid, betting),

        PlayerAction::AllIn => {
            let allowed = find_action(valid, ActionKind::AllIn).is_some()
                || find_action(valid, ActionKind::Raise).is_some();
            if allowed {
                Ok(())
            } else {
                Err(EngineError::IllegalAction(ActionKind::AllIn))
            }
        }
    }
}

/// Рейз до `amount`:
/// - не больше стека;
/// - не меньше current_bet + min_raise, кроме олл-ина на весь стек.
fn validate_raise(
    player: &Player,
    amount: Chips,
    valid: &[ValidAction],
    betting: &BettingRound,
) -> Result<(), EngineError> {
    let max = player.all_in_total();
    if amount > max {
        return Err(EngineError::NotEnoughChips { amount, max });
    }

    if let Some(raise) = find_action(valid, ActionKind::Raise) {
        return if amount >= raise.min_amount {
            Ok(())
        } else {
            Err(EngineError::RaiseTooSmall {
                amount,
                min: raise.min_amount,
            })
        };
    }

    // Полного рейза нет, но олл-ин выше текущей ставки разрешён.
    match find_action(valid, ActionKind::AllIn) {
        Some(all_in) if all_in.max_amount > betting.current_bet => {
            if amount == all_in.max_amount {
                Ok(())
            } else {
                Err(EngineError::RaiseTooSmall {
                    amount,
                    min: all_in.max_amount,
                })
            }
        }
        _ => Err(EngineError::IllegalAction(ActionKind::Raise)),
    }
}
