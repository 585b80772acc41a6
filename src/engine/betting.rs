use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::Player;
use crate::domain::SeatIndex;
use crate::engine::actions::{ActionKind, ValidAction};

/// Состояние раунда ставок на одной улице.
///
/// Считает допустимые действия и решает, закончен ли раунд.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingRound {
    /// Ставка, до которой должны дотянуться все активные игроки.
    pub current_bet: Chips,
    /// Размер последнего полного рейза (на новой улице = BB).
    pub min_raise: Chips,
    /// Seat последнего рейзера на улице.
    pub last_raiser: Option<SeatIndex>,
    /// Кто уже сделал добровольное действие на этой улице.
    pub acted: Vec<bool>,
    /// Сходил ли биг-блайнд сам на префлопе (опцион BB).
    /// Не сбрасывается до конца раздачи.
    pub bb_acted: bool,
    /// Место биг-блайнда в этой раздаче.
    pub big_blind_seat: Option<SeatIndex>,
    big_blind: Chips,
}

impl BettingRound {
    pub fn new(num_players: usize, big_blind: Chips, big_blind_seat: Option<SeatIndex>) -> Self {
        Self {
            current_bet: Chips::ZERO,
            min_raise: big_blind,
            last_raiser: None,
            acted: vec![false; num_players],
            bb_acted: false,
            big_blind_seat,
            big_blind,
        }
    }

    /// Сколько игроку нужно доплатить до колла.
    pub fn to_call(&self, player: &Player) -> Chips {
        player.to_call(self.current_bet)
    }

    /// Минимальная полная ставка для рейза.
    pub fn min_raise_to(&self) -> Chips {
        self.current_bet + self.min_raise
    }

    /// Допустимые действия игрока. Fold есть всегда, кроме случая,
    /// когда игрок вообще не может ходить (сфолдил / олл-ин) – тогда пусто.
    pub fn valid_actions(&self, player: &Player) -> Vec<ValidAction> {
        if !player.can_act() {
            return Vec::new();
        }

        let chips = player.chips;
        let to_call = self.to_call(player);
        let all_in_to = player.all_in_total();
        let mut actions = vec![ValidAction::free(ActionKind::Fold)];

        if to_call.is_zero() {
            actions.push(ValidAction::free(ActionKind::Check));
            if chips > self.min_raise {
                actions.push(ValidAction::new(
                    ActionKind::Raise,
                    self.min_raise_to(),
                    all_in_to,
                ));
            } else if !chips.is_zero() {
                actions.push(ValidAction::fixed(ActionKind::AllIn, all_in_to));
            }
        } else if to_call >= chips {
            // Колл на меньшую сумму – только олл-ин.
            actions.push(ValidAction::fixed(ActionKind::AllIn, all_in_to));
        } else {
            actions.push(ValidAction::fixed(ActionKind::Call, self.current_bet));
            if chips > to_call + self.min_raise {
                actions.push(ValidAction::new(
                    ActionKind::Raise,
                    self.min_raise_to(),
                    all_in_to,
                ));
            } else {
                actions.push(ValidAction::fixed(ActionKind::AllIn, all_in_to));
            }
        }

        actions
    }

    /// Отметить, что seat сделал добровольное действие (идемпотентно).
    pub fn mark_player_acted(&mut self, seat: SeatIndex) {
        if let Some(flag) = self.acted.get_mut(usize::from(seat)) {
            *flag = true;
        }
    }

    pub fn has_acted(&self, seat: SeatIndex) -> bool {
        self.acted.get(usize::from(seat)).copied().unwrap_or(false)
    }

    pub fn mark_big_blind_acted(&mut self) {
        self.bb_acted = true;
    }

    /// Ставка выше текущей (полный рейз или олл-ин на меньшую прибавку):
    /// - новый current_bet и last_raiser;
    /// - min_raise растёт только при полном рейзе;
    /// - все остальные обязаны ответить заново.
    pub fn on_raise(&mut self, seat: SeatIndex, new_bet: Chips) {
        let increment = new_bet.saturating_sub(self.current_bet);
        if increment >= self.min_raise {
            self.min_raise = increment;
        }
        self.current_bet = new_bet;
        self.last_raiser = Some(seat);
        for (idx, flag) in self.acted.iter_mut().enumerate() {
            *flag = idx == usize::from(seat);
        }
    }

    /// Снять seat с роли последнего рейзера (принудительный фолд).
    pub fn forget_raiser(&mut self, seat: SeatIndex) {
        if self.last_raiser == Some(seat) {
            self.last_raiser = None;
        }
    }

    /// Закончен ли раунд ставок.
    ///
    /// - не больше одного игрока может ходить, и он уравнял ставку; или
    /// - все, кто может ходить, уравняли ставку и сходили.
    ///
    /// Исключение – опцион BB на префлопе: без рейза раунд не закрывается,
    /// пока биг-блайнд (если он ещё может ходить) не сделал ход сам.
    pub fn is_betting_complete(&self, players: &[Player], street: Street) -> bool {
        let active: Vec<&Player> = players.iter().filter(|p| p.can_act()).collect();

        if active.len() <= 1 {
            return active
                .first()
                .map_or(true, |p| p.bet_this_round >= self.current_bet);
        }

        let settled = active
            .iter()
            .all(|p| p.bet_this_round == self.current_bet && self.has_acted(p.seat));
        if !settled {
            return false;
        }

        !(street == Street::Preflop && self.big_blind_option_pending(players))
    }

    /// Опцион BB ещё не использован.
    pub fn big_blind_option_pending(&self, players: &[Player]) -> bool {
        if self.last_raiser.is_some() || self.bb_acted {
            return false;
        }
        self.big_blind_seat
            .and_then(|seat| players.get(usize::from(seat)))
            .map_or(false, Player::can_act)
    }

    /// Новая улица: ставка 0, min_raise = BB, флаги ходов очищены.
    /// `bb_acted` не трогаем.
    pub fn reset_for_new_round(&mut self, num_players: usize) {
        self.current_bet = Chips::ZERO;
        self.min_raise = self.big_blind;
        self.last_raiser = None;
        self.acted = vec![false; num_players];
    }
}
