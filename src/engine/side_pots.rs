use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::SeatIndex;
use crate::engine::pot::{total_of, Pot};

/// Разложить вклады игроков (`total_bet`) на основной банк и сайд-поты.
///
/// Идём по уровням вкладов снизу вверх. Слой между уровнями `prev` и `level`
/// стоит `(level - prev) * n`, где n – сколько игроков внесли хотя бы `level`.
/// Выиграть слой могут только несфолдившие из этих n.
///
/// Дополнительно:
/// - соседние слои с одинаковым составом претендентов склеиваются;
/// - слой без претендентов (непринятая ставка сфолдившего) уходит в предыдущий банк;
/// - если претендентов нет ни у одного слоя, всё забирают оставшиеся в раздаче.
pub fn compute_side_pots(players: &[Player]) -> Vec<Pot> {
    let mut entries: Vec<&Player> = players.iter().filter(|p| !p.total_bet.is_zero()).collect();
    if entries.is_empty() {
        return Vec::new();
    }

    // Сортируем по размеру вклада (возрастание).
    entries.sort_by_key(|p| (p.total_bet, p.seat));

    let mut levels: Vec<Chips> = entries.iter().map(|p| p.total_bet).collect();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    let mut orphaned = Chips::ZERO;
    let mut prev_level = Chips::ZERO;

    for level in levels {
        let contributors: Vec<&Player> = entries
            .iter()
            .copied()
            .filter(|p| p.total_bet >= level)
            .collect();
        let slice = (level - prev_level).times(contributors.len());
        prev_level = level;

        let mut eligible: Vec<SeatIndex> = contributors
            .iter()
            .filter(|p| !p.is_folded())
            .map(|p| p.seat)
            .collect();
        eligible.sort_unstable();

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(last) => last.amount += slice,
                None => orphaned += slice,
            }
            continue;
        }

        let amount = slice + std::mem::take(&mut orphaned);
        match pots.last_mut() {
            Some(last) if last.eligible == eligible => last.amount += amount,
            _ => pots.push(Pot::new(amount, eligible)),
        }
    }

    if !orphaned.is_zero() {
        let survivors: Vec<SeatIndex> = players
            .iter()
            .filter(|p| p.is_contesting())
            .map(|p| p.seat)
            .collect();
        pots.push(Pot::new(orphaned, survivors));
    }

    pots
}

/// Менеджер банков раздачи.
///
/// Хранит банки на момент последнего сбора ставок (конец улицы).
/// После выплаты банки остаются для отображения, но фишек в них уже нет.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotManager {
    pots: Vec<Pot>,
    awarded: bool,
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Конец улицы: ставки игроков уходят в банк, банки пересчитываются.
    pub fn collect(&mut self, players: &mut [Player]) -> Chips {
        let collected: Chips = players.iter_mut().map(Player::clear_round_bet).sum();
        self.pots = compute_side_pots(players);
        collected
    }

    /// Собранные банки (без ставок текущей улицы).
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// Фишки, которые лежат в банках и ещё не выплачены.
    pub fn unawarded_total(&self) -> Chips {
        if self.awarded {
            Chips::ZERO
        } else {
            total_of(&self.pots)
        }
    }

    pub fn mark_awarded(&mut self) {
        self.awarded = true;
    }

    pub fn is_awarded(&self) -> bool {
        self.awarded
    }
}
