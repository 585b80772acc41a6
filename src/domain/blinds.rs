use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Размеры блайндов раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Blinds {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl Blinds {
    pub fn new(small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            small_blind,
            big_blind,
        }
    }

    /// BB > 0 и SB <= BB.
    pub fn is_valid(&self) -> bool {
        !self.big_blind.is_zero() && self.small_blind <= self.big_blind
    }
}

/// Кто какой блайнд ставит в этой раздаче.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindSeats {
    pub small_blind: SeatIndex,
    pub big_blind: SeatIndex,
}

/// Какой блайнд поставлен (для истории раздачи).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlindKind {
    Small,
    Big,
}
