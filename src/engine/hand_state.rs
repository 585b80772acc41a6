use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    BlindKind, BlindSeats, Blinds, Card, Chips, Deck, HandConfig, Player, SeatIndex, Street,
};
use crate::engine::actions::{ActionKind, PlayerAction, ValidAction};
use crate::engine::betting::BettingRound;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{EventSink, HandEventKind, HandHistory, NoopSink};
use crate::engine::positions::{blind_seats, first_seat_from, next_seat_where, preflop_start_seat};
use crate::engine::pot::{total_of, Pot};
use crate::engine::showdown::{resolve_pots, PotAward};
use crate::engine::side_pots::{compute_side_pots, PotManager};
use crate::engine::validation::validate_action;
use crate::engine::RandomSource;
use crate::eval::{HandEvaluator, StandardEvaluator};

/// Итог завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub pots: Vec<Pot>,
    pub awards: Vec<PotAward>,
    /// Итог по каждому месту: выигрыш минус вклад.
    pub net: Vec<(SeatIndex, i64)>,
}

/// Состояние одной раздачи: от блайндов до расчёта.
///
/// Меняется только через `process_action` / `force_fold`.
/// Не переиспользуется: на каждую раздачу – новый `HandState`.
pub struct HandState {
    players: Vec<Player>,
    button: SeatIndex,
    blinds: Blinds,
    blind_seats: BlindSeats,
    street: Street,
    board: Vec<Card>,
    active_seat: Option<SeatIndex>,
    deck: Deck,
    betting: BettingRound,
    pots: PotManager,
    starting_total: Chips,
    starting_stacks: Vec<Chips>,
    awards: Vec<PotAward>,
    finished: bool,
    evaluator: Box<dyn HandEvaluator>,
    sink: Box<dyn EventSink>,
    history: HandHistory,
}

impl HandState {
    /// Создать раздачу: проверить конфиг, перемешать колоду, поставить блайнды,
    /// раздать карманные карты и определить первого ходящего.
    ///
    /// RNG принадлежит раздаче: чужой RNG не влияет на эту колоду.
    pub fn new<R: RandomSource>(
        config: HandConfig,
        mut rng: R,
        evaluator: Box<dyn HandEvaluator>,
        sink: Box<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let num_players = config.num_players();
        let stacks = config.starting_stacks();

        let deck = match config.preset_deck {
            Some(cards) => Deck::from_cards(cards)?,
            None => {
                let mut deck = Deck::standard_52();
                rng.shuffle(deck.undealt_mut());
                deck
            }
        };

        let players: Vec<Player> = config
            .player_names
            .into_iter()
            .zip(stacks.iter().copied())
            .enumerate()
            .map(|(seat, (name, chips))| Player::new(seat as SeatIndex, name, chips))
            .collect();

        let blind_seats = blind_seats(config.button, num_players);

        let mut hand = Self {
            players,
            button: config.button,
            blinds: config.blinds,
            blind_seats,
            street: Street::Preflop,
            board: Vec::with_capacity(5),
            active_seat: None,
            deck,
            betting: BettingRound::new(
                num_players,
                config.blinds.big_blind,
                Some(blind_seats.big_blind),
            ),
            pots: PotManager::new(),
            starting_total: stacks.iter().sum(),
            starting_stacks: stacks,
            awards: Vec::new(),
            finished: false,
            evaluator,
            sink,
            history: HandHistory::new(),
        };

        let started = HandEventKind::HandStarted {
            button: hand.button,
            players: hand
                .players
                .iter()
                .map(|p| (p.seat, p.name.clone(), p.chips))
                .collect(),
        };
        hand.emit(started);

        hand.post_blinds();
        hand.deal_hole_cards()?;

        let start = preflop_start_seat(hand.button, num_players);
        hand.active_seat = first_seat_from(&hand.players, start, Player::can_act);

        // Блайнды могли отправить всех в олл-ин: тогда сразу докладываем борд.
        if hand.active_seat.is_none()
            || hand.betting.is_betting_complete(&hand.players, hand.street)
        {
            hand.next_street()?;
        }

        hand.verify_chip_conservation()?;
        Ok(hand)
    }

    /// Тонкий адаптер: стандартный оценщик и без наблюдателя.
    pub fn with_defaults<R: RandomSource>(config: HandConfig, rng: R) -> Result<Self, EngineError> {
        Self::new(config, rng, Box::new(StandardEvaluator), Box::new(NoopSink))
    }

    // ---------------------------------------------------------------------
    // Чтение состояния
    // ---------------------------------------------------------------------

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&Player> {
        self.players.get(usize::from(seat))
    }

    pub fn button(&self) -> SeatIndex {
        self.button
    }

    pub fn blinds(&self) -> Blinds {
        self.blinds
    }

    pub fn blind_seats(&self) -> BlindSeats {
        self.blind_seats
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn board_cards(&self) -> &[Card] {
        &self.board
    }

    /// Чей сейчас ход. `None` – никто не ходит (раздача закончена).
    pub fn acting_seat(&self) -> Option<SeatIndex> {
        self.active_seat
    }

    pub fn betting(&self) -> &BettingRound {
        &self.betting
    }

    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    /// Раздача закончена: шоудаун или остался один претендент.
    pub fn is_complete(&self) -> bool {
        self.finished || self.street == Street::Showdown || self.contesting_count() <= 1
    }

    /// Банки, включая ставки текущей улицы (для отображения живого банка).
    pub fn pots(&self) -> Vec<Pot> {
        compute_side_pots(&self.players)
    }

    /// Сумма всех банков с несобранными ставками.
    pub fn pot_total(&self) -> Chips {
        self.players.iter().map(|p| p.total_bet).sum()
    }

    /// Победители по индексу банка. Пусто, пока раздача не закончена.
    pub fn winners(&self) -> BTreeMap<usize, Vec<SeatIndex>> {
        self.awards
            .iter()
            .map(|a| (a.pot_index, a.winners.clone()))
            .collect()
    }

    pub fn awards(&self) -> &[PotAward] {
        &self.awards
    }

    /// Допустимые действия текущего игрока.
    ///
    /// Рейз не предлагается, если ответить на него некому:
    /// все остальные претенденты уже в олл-ине.
    pub fn valid_actions(&self) -> Vec<ValidAction> {
        if self.is_complete() {
            return Vec::new();
        }
        let Some(player) = self.active_seat.and_then(|s| self.player(s)) else {
            return Vec::new();
        };

        let mut actions = self.betting.valid_actions(player);
        let someone_can_answer = self
            .players
            .iter()
            .any(|p| p.seat != player.seat && p.can_act());
        if !someone_can_answer {
            let current_bet = self.betting.current_bet;
            actions.retain(|a| match a.kind {
                ActionKind::Raise => false,
                ActionKind::AllIn => a.max_amount <= current_bet,
                _ => true,
            });
        }
        actions
    }

    /// Сводка. Есть только у завершённой раздачи.
    pub fn summary(&self) -> Option<HandSummary> {
        if !self.is_complete() {
            return None;
        }
        let net = self
            .players
            .iter()
            .map(|p| {
                let start = self.starting_stacks[usize::from(p.seat)];
                (p.seat, p.chips.0 as i64 - start.0 as i64)
            })
            .collect();
        Some(HandSummary {
            street_reached: self.street,
            board: self.board.clone(),
            pots: self.pots(),
            awards: self.awards.clone(),
            net,
        })
    }

    /// Фишки в игре: стеки + несобранные ставки + невыплаченные банки.
    /// Всегда равно сумме стартовых стеков.
    pub fn chips_in_play(&self) -> Chips {
        let stacks: Chips = self.players.iter().map(|p| p.chips).sum();
        let bets: Chips = self.players.iter().map(|p| p.bet_this_round).sum();
        stacks + bets + self.pots.unawarded_total()
    }

    pub fn starting_total(&self) -> Chips {
        self.starting_total
    }

    // ---------------------------------------------------------------------
    // Действия
    // ---------------------------------------------------------------------

    /// Применить действие текущего игрока.
    pub fn process_action(&mut self, action: PlayerAction) -> Result<(), EngineError> {
        if self.is_complete() {
            return Err(EngineError::HandComplete);
        }
        let seat = self
            .active_seat
            .ok_or(EngineError::Internal("нет игрока, чей ход"))?;

        let valid = self.valid_actions();
        let player = &self.players[usize::from(seat)];
        if let Err(err) = validate_action(player, &action, &valid, &self.betting) {
            log::warn!("seat {seat}: отклонено действие {action}: {err}");
            return Err(err);
        }

        let added = self.apply(seat, action);
        self.betting.mark_player_acted(seat);
        if self.street == Street::Preflop && seat == self.blind_seats.big_blind {
            self.betting.mark_big_blind_acted();
        }

        let stack_after = self.players[usize::from(seat)].chips;
        let pot_after = self.pot_total();
        log::debug!(
            "{:?}: seat {seat} {action} (+{added}), стек {stack_after}, банк {pot_after}",
            self.street
        );
        self.emit(HandEventKind::PlayerActed {
            seat,
            action,
            added,
            stack_after,
            pot_after,
        });

        self.after_action(seat)?;
        self.verify_chip_conservation()
    }

    /// Фолд вне очереди (дисконнект / нарушение).
    pub fn force_fold(&mut self, seat: SeatIndex) -> Result<(), EngineError> {
        if self.is_complete() {
            return Err(EngineError::HandComplete);
        }
        let player = self
            .players
            .get_mut(usize::from(seat))
            .ok_or(EngineError::InvalidSeat(seat))?;
        if player.is_folded() {
            return Err(EngineError::SeatAlreadyFolded(seat));
        }
        player.fold();

        self.betting.mark_player_acted(seat);
        self.betting.forget_raiser(seat);
        if self.street == Street::Preflop && seat == self.blind_seats.big_blind {
            self.betting.mark_big_blind_acted();
        }

        log::warn!("seat {seat}: принудительный фолд на {:?}", self.street);
        self.emit(HandEventKind::PlayerForceFolded { seat });

        if self.contesting_count() <= 1 {
            self.finish_uncontested()?;
        } else if self.betting.is_betting_complete(&self.players, self.street) {
            self.next_street()?;
        } else if self.active_seat == Some(seat) {
            self.active_seat = self.next_actor_after(seat);
            if self.active_seat.is_none() {
                self.next_street()?;
            }
        }

        self.verify_chip_conservation()
    }

    /// Движение фишек и обновление раунда ставок. Возвращает, сколько добавлено.
    fn apply(&mut self, seat: SeatIndex, action: PlayerAction) -> Chips {
        let current_bet = self.betting.current_bet;
        let player = &mut self.players[usize::from(seat)];

        let added = match action {
            PlayerAction::Fold => {
                player.fold();
                Chips::ZERO
            }
            PlayerAction::Check => Chips::ZERO,
            PlayerAction::Call => {
                let to_call = player.to_call(current_bet);
                player.commit(to_call)
            }
            PlayerAction::Raise(total) => {
                let delta = total.saturating_sub(player.bet_this_round);
                player.commit(delta)
            }
            PlayerAction::AllIn => {
                let stack = player.chips;
                player.commit(stack)
            }
        };

        let new_bet = player.bet_this_round;
        if new_bet > current_bet {
            self.betting.on_raise(seat, new_bet);
        }
        added
    }

    /// После действия: конец раздачи, конец улицы или передача хода.
    fn after_action(&mut self, seat: SeatIndex) -> Result<(), EngineError> {
        if self.contesting_count() <= 1 {
            return self.finish_uncontested();
        }
        if self.betting.is_betting_complete(&self.players, self.street) {
            return self.next_street();
        }
        match self.next_actor_after(seat) {
            Some(next) => {
                self.active_seat = Some(next);
                Ok(())
            }
            None => self.next_street(),
        }
    }

    /// Следующий, кому нужно ходить: может ходить и ещё не ответил на ставку.
    fn next_actor_after(&self, seat: SeatIndex) -> Option<SeatIndex> {
        let current_bet = self.betting.current_bet;
        next_seat_where(&self.players, seat, |p| {
            p.can_act() && (!self.betting.has_acted(p.seat) || p.bet_this_round < current_bet)
        })
        .or_else(|| next_seat_where(&self.players, seat, Player::can_act))
    }

    /// Закрыть улицу: собрать ставки в банк и открыть следующую.
    ///
    /// Если ходить больше некому (олл-ин), борд докладывается до конца.
    fn next_street(&mut self) -> Result<(), EngineError> {
        loop {
            let collected = self.pots.collect(&mut self.players);
            log::debug!(
                "{:?} закрыт: собрано {collected}, банков {}",
                self.street,
                self.pots.pots().len()
            );

            if self.contesting_count() < 2 {
                return self.finish_uncontested();
            }

            let next = self.street.next();
            if next == Street::Showdown {
                return self.showdown();
            }

            let cards = self.deck.deal(next.cards_to_deal())?;
            self.board.extend(cards);
            self.street = next;
            self.betting.reset_for_new_round(self.players.len());
            self.emit(HandEventKind::StreetChanged {
                street: next,
                board: self.board.clone(),
            });

            self.active_seat = next_seat_where(&self.players, self.button, Player::can_act);
            if self.active_seat.is_some()
                && !self.betting.is_betting_complete(&self.players, self.street)
            {
                log::debug!("{next:?}: первым ходит seat {:?}", self.active_seat);
                return Ok(());
            }
            log::debug!("{next:?}: ставок нет, докладываем борд");
        }
    }

    /// Шоудаун: разыграть все банки и выплатить.
    fn showdown(&mut self) -> Result<(), EngineError> {
        self.street = Street::Showdown;
        self.active_seat = None;
        let awards = resolve_pots(
            self.pots.pots(),
            &self.players,
            &self.board,
            self.button,
            self.evaluator.as_ref(),
        )?;
        self.pay_out(awards)
    }

    /// Остался один претендент: он забирает всё без вскрытия.
    fn finish_uncontested(&mut self) -> Result<(), EngineError> {
        self.pots.collect(&mut self.players);
        self.active_seat = None;
        let awards = resolve_pots(
            self.pots.pots(),
            &self.players,
            &self.board,
            self.button,
            self.evaluator.as_ref(),
        )?;
        self.pay_out(awards)
    }

    fn pay_out(&mut self, awards: Vec<PotAward>) -> Result<(), EngineError> {
        for award in &awards {
            for &(seat, amount) in &award.payouts {
                let player = self
                    .players
                    .get_mut(usize::from(seat))
                    .ok_or(EngineError::InvalidSeat(seat))?;
                player.chips += amount;
                log::info!("банк #{}: seat {seat} получает {amount}", award.pot_index);
                self.emit(HandEventKind::PotAwarded {
                    pot_index: award.pot_index,
                    seat,
                    amount,
                });
            }
        }
        self.pots.mark_awarded();
        self.awards = awards;
        self.finished = true;

        log::info!(
            "раздача завершена на {:?}, банк {}",
            self.street,
            total_of(self.pots.pots())
        );
        self.emit(HandEventKind::HandFinished {
            street_reached: self.street,
        });
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Старт раздачи
    // ---------------------------------------------------------------------

    fn post_blinds(&mut self) {
        let seats = self.blind_seats;
        for (seat, blind, amount) in [
            (seats.small_blind, BlindKind::Small, self.blinds.small_blind),
            (seats.big_blind, BlindKind::Big, self.blinds.big_blind),
        ] {
            let paid = self.players[usize::from(seat)].commit(amount);
            log::debug!("seat {seat} ставит {blind:?} blind {paid}");
            self.emit(HandEventKind::BlindPosted {
                seat,
                blind,
                amount: paid,
            });
        }
        self.betting.current_bet = self.blinds.big_blind;
        self.betting.min_raise = self.blinds.big_blind;
    }

    /// По одной карте по кругу, начиная слева от кнопки, два круга.
    fn deal_hole_cards(&mut self) -> Result<(), EngineError> {
        let n = self.players.len();
        let order: Vec<usize> = (1..=n)
            .map(|offset| (usize::from(self.button) + offset) % n)
            .collect();

        for _round in 0..2 {
            for &idx in &order {
                let card = self.deck.deal_one()?;
                self.players[idx].hole_cards.push(card);
            }
        }

        for idx in order {
            let player = &self.players[idx];
            let event = HandEventKind::HoleCardsDealt {
                seat: player.seat,
                cards: player.hole_cards.clone(),
            };
            self.emit(event);
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Вспомогательное
    // ---------------------------------------------------------------------

    fn contesting_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_contesting()).count()
    }

    fn emit(&mut self, event: HandEventKind) {
        self.sink.on_event(&event);
        self.history.push(event);
    }

    fn verify_chip_conservation(&self) -> Result<(), EngineError> {
        let actual = self.chips_in_play();
        if actual != self.starting_total {
            log::error!(
                "нарушено сохранение фишек: ожидалось {}, насчитано {actual}",
                self.starting_total
            );
            return Err(EngineError::ChipConservation {
                expected: self.starting_total,
                actual,
            });
        }
        Ok(())
    }
}
