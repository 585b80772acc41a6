use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};

/// Ошибки колоды.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("в колоде осталось {remaining} карт, запрошено {requested}")]
    Exhausted { requested: usize, remaining: usize },

    #[error("карта {0} встречается в колоде дважды")]
    DuplicateCard(Card),
}

/// Колода карт: упорядоченный список + курсор сдачи.
///
/// Карты сдаются сверху (с начала списка) и никогда не возвращаются.
/// Перемешивание делает engine (через `RandomSource`), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    dealt: usize,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Deck { cards, dealt: 0 }
    }

    /// Заранее подготовленная колода (для детерминированных тестов).
    /// Сдаётся в переданном порядке, без перемешивания.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(*card) {
                return Err(DeckError::DuplicateCard(*card));
            }
        }
        Ok(Deck { cards, dealt: 0 })
    }

    /// Сколько карт ещё можно сдать.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.dealt
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Несданная часть колоды (её и перемешивает RNG).
    pub fn undealt_mut(&mut self) -> &mut [Card] {
        &mut self.cards[self.dealt..]
    }

    /// Взять одну карту сверху колоды.
    pub fn deal_one(&mut self) -> Result<Card, DeckError> {
        let card = self
            .cards
            .get(self.dealt)
            .copied()
            .ok_or(DeckError::Exhausted {
                requested: 1,
                remaining: 0,
            })?;
        self.dealt += 1;
        Ok(card)
    }

    /// Взять n карт сверху. Либо все n, либо ошибка без изменения колоды.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.remaining() {
            return Err(DeckError::Exhausted {
                requested: n,
                remaining: self.remaining(),
            });
        }
        let taken = self.cards[self.dealt..self.dealt + n].to_vec();
        self.dealt += n;
        Ok(taken)
    }

    /// Сколько карт нужно на раздачу холдема для `players` игроков.
    pub fn cards_needed(players: usize) -> usize {
        players * 2 + 5
    }
}
