use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerStatus;
use crate::domain::SeatIndex;
use crate::engine::{HandState, Pot, ValidAction};

/// Кто смотрит на стол. От этого зависит, чьи карты видны.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Viewer {
    /// Зритель: видит карты только на шоудауне.
    Spectator,
    /// Игрок за столом: видит свои карты.
    Seat(SeatIndex),
    /// Администратор / реплей: видит всё.
    Admin,
}

/// DTO одного места.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub seat: SeatIndex,
    pub name: String,
    pub stack: Chips,
    pub bet_this_round: Chips,
    pub total_bet: Chips,
    pub status: PlayerStatus,
    /// `None`, если карты скрыты от смотрящего.
    pub hole_cards: Option<Vec<Card>>,
}

/// DTO банка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotView {
    pub amount: Chips,
    pub eligible: Vec<SeatIndex>,
}

impl From<&Pot> for PotView {
    fn from(pot: &Pot) -> Self {
        Self {
            amount: pot.amount,
            eligible: pot.eligible.clone(),
        }
    }
}

/// Снимок раздачи для фронта / бота.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSnapshot {
    pub street: Street,
    pub button: SeatIndex,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub board: Vec<Card>,
    pub seats: Vec<SeatView>,
    /// Живые банки, включая ставки текущей улицы.
    pub pots: Vec<PotView>,
    pub total_pot: Chips,
    pub current_bet: Chips,
    pub acting_seat: Option<SeatIndex>,
    /// Допустимые действия – только для того, чей ход (или админа).
    pub valid_actions: Vec<ValidAction>,
    pub is_complete: bool,
}

/// Собрать снимок раздачи глазами `viewer`.
pub fn build_snapshot(hand: &HandState, viewer: Viewer) -> HandSnapshot {
    let showdown = hand.street() == Street::Showdown;

    let seats = hand
        .players()
        .iter()
        .map(|p| {
            let visible = match viewer {
                Viewer::Admin => true,
                Viewer::Seat(seat) if seat == p.seat => true,
                _ => showdown && p.is_contesting(),
            };
            SeatView {
                seat: p.seat,
                name: p.name.clone(),
                stack: p.chips,
                bet_this_round: p.bet_this_round,
                total_bet: p.total_bet,
                status: p.status,
                hole_cards: visible.then(|| p.hole_cards.clone()),
            }
        })
        .collect();

    let acting_seat = hand.acting_seat();
    let show_actions = match viewer {
        Viewer::Admin => true,
        Viewer::Seat(seat) => Some(seat) == acting_seat,
        Viewer::Spectator => false,
    };

    let blinds = hand.blinds();
    HandSnapshot {
        street: hand.street(),
        button: hand.button(),
        small_blind: blinds.small_blind,
        big_blind: blinds.big_blind,
        board: hand.board_cards().to_vec(),
        seats,
        pots: hand.pots().iter().map(PotView::from).collect(),
        total_pot: hand.pot_total(),
        current_bet: hand.betting().current_bet,
        acting_seat,
        valid_actions: if show_actions {
            hand.valid_actions()
        } else {
            Vec::new()
        },
        is_complete: hand.is_complete(),
    }
}
