use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Действие игрока.
///
/// Суммы в `Raise` – это новая ПОЛНАЯ ставка игрока на улице, а не прибавка.
/// Сумму колла движок считает сам.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    /// Bet/raise до указанной суммы на улице.
    Raise(Chips),
    /// Поставить весь оставшийся стек.
    AllIn,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::AllIn => ActionKind::AllIn,
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Raise(to) => write!(f, "raise to {to}"),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Тип действия без суммы (для списка допустимых действий).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all-in",
        };
        f.write_str(s)
    }
}

/// Допустимое действие с диапазоном сумм (полная ставка на улице).
/// Для Fold/Check суммы нулевые.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidAction {
    pub kind: ActionKind,
    pub min_amount: Chips,
    pub max_amount: Chips,
}

impl ValidAction {
    pub fn new(kind: ActionKind, min_amount: Chips, max_amount: Chips) -> Self {
        Self {
            kind,
            min_amount,
            max_amount,
        }
    }

    pub fn fixed(kind: ActionKind, amount: Chips) -> Self {
        Self::new(kind, amount, amount)
    }

    /// Действие, которое ничего не стоит.
    pub fn free(kind: ActionKind) -> Self {
        Self::fixed(kind, Chips::ZERO)
    }
}

/// Найти действие нужного типа в списке.
pub fn find_action(actions: &[ValidAction], kind: ActionKind) -> Option<&ValidAction> {
    actions.iter().find(|a| a.kind == kind)
}
