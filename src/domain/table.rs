use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::blinds::Blinds;
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::{Deck, DeckError};

/// Индекс места за столом (0..players-1).
pub type SeatIndex = u8;

/// Максимум игроков: 52-карточной колоды хватает на 2 * 23 + 5 карт.
pub const MAX_PLAYERS: usize = 23;

/// Стек по умолчанию в больших блайндах.
pub const DEFAULT_STACK_IN_BB: u64 = 100;

/// Ошибки конфигурации раздачи. Проверяются до создания `HandState`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("для раздачи нужно минимум 2 игрока, передано {0}")]
    NotEnoughPlayers(usize),

    #[error("слишком много игроков: {0} (максимум {MAX_PLAYERS})")]
    TooManyPlayers(usize),

    #[error("кнопка на месте {button}, а игроков всего {players}")]
    ButtonOutOfRange { button: SeatIndex, players: usize },

    #[error("стартовых стеков {got}, а игроков {expected}")]
    StartingChipsMismatch { expected: usize, got: usize },

    #[error("у игрока на месте {0} нулевой стартовый стек")]
    EmptyStack(SeatIndex),

    #[error("некорректные блайнды {small}/{big}")]
    InvalidBlinds { small: Chips, big: Chips },

    #[error("в подготовленной колоде {got} карт, нужно минимум {needed}")]
    DeckTooShort { needed: usize, got: usize },

    #[error("некорректная колода: {0}")]
    InvalidDeck(#[from] DeckError),

    #[error("не удалось разобрать конфиг: {0}")]
    Json(String),
}

/// Конфиг одной раздачи: кто сидит, где кнопка, блайнды, стеки.
///
/// Единственный способ описать раздачу для `HandState::new`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandConfig {
    /// Имена игроков в порядке мест (индекс = SeatIndex).
    pub player_names: Vec<String>,
    pub button: SeatIndex,
    pub blinds: Blinds,
    /// Стек для всех, если `starting_chips` не задан.
    pub default_stack: Chips,
    /// Индивидуальные стартовые стеки (по одному на игрока).
    #[serde(default)]
    pub starting_chips: Option<Vec<Chips>>,
    /// Заранее подготовленная колода (сдаётся сверху, без перемешивания).
    #[serde(default)]
    pub preset_deck: Option<Vec<Card>>,
}

impl HandConfig {
    pub fn new<S: Into<String>>(
        player_names: impl IntoIterator<Item = S>,
        button: SeatIndex,
        small_blind: Chips,
        big_blind: Chips,
    ) -> Self {
        Self {
            player_names: player_names.into_iter().map(Into::into).collect(),
            button,
            blinds: Blinds::new(small_blind, big_blind),
            default_stack: big_blind.times(DEFAULT_STACK_IN_BB as usize),
            starting_chips: None,
            preset_deck: None,
        }
    }

    pub fn with_default_stack(mut self, stack: Chips) -> Self {
        self.default_stack = stack;
        self
    }

    pub fn with_starting_chips(mut self, chips: Vec<Chips>) -> Self {
        self.starting_chips = Some(chips);
        self
    }

    pub fn with_preset_deck(mut self, cards: Vec<Card>) -> Self {
        self.preset_deck = Some(cards);
        self
    }

    /// Загрузить конфиг из JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    pub fn num_players(&self) -> usize {
        self.player_names.len()
    }

    /// Стартовые стеки по местам.
    pub fn starting_stacks(&self) -> Vec<Chips> {
        match &self.starting_chips {
            Some(chips) => chips.clone(),
            None => vec![self.default_stack; self.num_players()],
        }
    }

    /// Проверка всех предусловий раздачи.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.num_players();
        if n < 2 {
            return Err(ConfigError::NotEnoughPlayers(n));
        }
        if n > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(n));
        }
        if usize::from(self.button) >= n {
            return Err(ConfigError::ButtonOutOfRange {
                button: self.button,
                players: n,
            });
        }
        if !self.blinds.is_valid() {
            return Err(ConfigError::InvalidBlinds {
                small: self.blinds.small_blind,
                big: self.blinds.big_blind,
            });
        }
        if let Some(chips) = &self.starting_chips {
            if chips.len() != n {
                return Err(ConfigError::StartingChipsMismatch {
                    expected: n,
                    got: chips.len(),
                });
            }
        }
        if let Some(seat) = self.starting_stacks().iter().position(Chips::is_zero) {
            return Err(ConfigError::EmptyStack(seat as SeatIndex));
        }
        if let Some(cards) = &self.preset_deck {
            let needed = Deck::cards_needed(n);
            if cards.len() < needed {
                return Err(ConfigError::DeckTooShort {
                    needed,
                    got: cards.len(),
                });
            }
            Deck::from_cards(cards.clone())?;
        }
        Ok(())
    }
}
