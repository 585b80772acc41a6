use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Один банк: основной (индекс 0) или сайд-пот.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    /// Кто может выиграть этот банк (по возрастанию мест).
    pub eligible: Vec<SeatIndex>,
}

impl Pot {
    pub fn new(amount: Chips, eligible: Vec<SeatIndex>) -> Self {
        Self { amount, eligible }
    }

    pub fn is_eligible(&self, seat: SeatIndex) -> bool {
        self.eligible.contains(&seat)
    }
}

/// Сумма всех банков.
pub fn total_of(pots: &[Pot]) -> Chips {
    pots.iter().map(|p| p.amount).sum()
}
