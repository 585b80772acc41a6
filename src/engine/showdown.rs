//! Шоудаун: кто выигрывает каждый банк и сколько получает.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::{Card, Chips, HandRank, Player, SeatIndex};
use crate::engine::errors::EngineError;
use crate::engine::positions::distance_from_button;
use crate::engine::pot::Pot;
use crate::eval::HandEvaluator;

/// Итог розыгрыша одного банка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    pub pot_index: usize,
    pub amount: Chips,
    /// Победители по возрастанию мест.
    pub winners: Vec<SeatIndex>,
    /// Выплаты (seat, сумма); сумма выплат == amount.
    pub payouts: Vec<(SeatIndex, Chips)>,
    /// Ранг выигравшей руки (если сравнивали руки).
    pub rank: Option<HandRank>,
}

/// Разыграть все банки по очереди (основной первым).
///
/// Каждый банк независим: игрок может проиграть сайд-пот и выиграть основной.
pub fn resolve_pots(
    pots: &[Pot],
    players: &[Player],
    board: &[Card],
    button: SeatIndex,
    evaluator: &dyn HandEvaluator,
) -> Result<Vec<PotAward>, EngineError> {
    let mut awards = Vec::with_capacity(pots.len());

    for (pot_index, pot) in pots.iter().enumerate() {
        let contenders: Vec<&Player> = pot
            .eligible
            .iter()
            .filter_map(|&seat| players.get(usize::from(seat)))
            .filter(|p| p.is_contesting())
            .collect();

        let (winners, rank) = match contenders.as_slice() {
            [] => return Err(EngineError::Internal("банк без претендентов")),
            [only] => (vec![only.seat], None),
            _ => best_hands(&contenders, board, evaluator)?,
        };

        let payouts = split_pot(pot.amount, &winners, button, players.len());
        awards.push(PotAward {
            pot_index,
            amount: pot.amount,
            winners,
            payouts,
            rank,
        });
    }

    Ok(awards)
}

/// Лучшие руки среди претендентов (несколько – при ничьей).
fn best_hands(
    contenders: &[&Player],
    board: &[Card],
    evaluator: &dyn HandEvaluator,
) -> Result<(Vec<SeatIndex>, Option<HandRank>), EngineError> {
    let mut best: Option<HandRank> = None;
    let mut winners: Vec<SeatIndex> = Vec::new();

    for player in contenders {
        let cards = seven_cards(player, board)?;
        let rank = evaluator.evaluate7(&cards);

        let ordering = best.map_or(Ordering::Greater, |b| evaluator.compare(rank, b));
        match ordering {
            Ordering::Greater => {
                best = Some(rank);
                winners.clear();
                winners.push(player.seat);
            }
            Ordering::Equal => winners.push(player.seat),
            Ordering::Less => {}
        }
    }

    winners.sort_unstable();
    Ok((winners, best))
}

/// 2 карманные + 5 общих.
fn seven_cards(player: &Player, board: &[Card]) -> Result<[Card; 7], EngineError> {
    const NOT_ENOUGH_CARDS: EngineError =
        EngineError::Internal("для шоудауна нужны 2 карманные и 5 общих карт");
    let hole: &[Card; 2] = player
        .hole_cards
        .as_slice()
        .try_into()
        .map_err(|_| NOT_ENOUGH_CARDS)?;
    let board: &[Card; 5] = board.try_into().map_err(|_| NOT_ENOUGH_CARDS)?;
    Ok([
        hole[0], hole[1], board[0], board[1], board[2], board[3], board[4],
    ])
}

/// Поделить банк между победителями поровну.
///
/// Нечётные фишки целиком получает победитель, ближайший к кнопке
/// по часовой стрелке (кнопка+1 первый, сама кнопка последняя).
pub fn split_pot(
    amount: Chips,
    winners: &[SeatIndex],
    button: SeatIndex,
    num_players: usize,
) -> Vec<(SeatIndex, Chips)> {
    let (share, remainder) = amount.split(winners.len());
    let odd_chip_seat = winners
        .iter()
        .copied()
        .min_by_key(|&seat| distance_from_button(seat, button, num_players));

    winners
        .iter()
        .map(|&seat| {
            if Some(seat) == odd_chip_seat {
                (seat, share + remainder)
            } else {
                (seat, share)
            }
        })
        .collect()
}
