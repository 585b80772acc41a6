use crate::domain::card::{Card, Rank, Suit};
use crate::domain::hand::HandRank;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_to_bit, ranks_desc, RankMask};

/// Вычислить лучшую 5-карточную руку из hole + board.
///
/// Работает для 5–7 карт; для другого количества – `None`.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Option<HandRank> {
    let total = hole.len() + board.len();
    if !(5..=7).contains(&total) {
        return None;
    }
    let mut all_cards = Vec::with_capacity(total);
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    Some(evaluate_cards(&all_cards))
}

/// Оценка набора карт без перебора комбинаций: по маскам рангов и мастей.
pub(crate) fn evaluate_cards(cards: &[Card]) -> HandRank {
    let mut suit_masks: [RankMask; 4] = [0; 4];
    let mut rank_counts = [0u8; 15];
    let mut all_mask: RankMask = 0;

    for card in cards {
        let bit = rank_to_bit(card.rank);
        suit_masks[card.suit.index()] |= bit;
        rank_counts[usize::from(card.rank.value())] += 1;
        all_mask |= bit;
    }

    let flush_mask = Suit::ALL
        .iter()
        .map(|s| suit_masks[s.index()])
        .find(|m| m.count_ones() >= 5);

    if let Some(high) = flush_mask.and_then(detect_straight) {
        return HandRank::from_category_and_ranks(
            HandCategory::StraightFlush,
            straight_rank_array(high),
        );
    }

    // Группы одинаковых рангов, от старшего к младшему.
    let mut quads = Vec::new();
    let mut trips = Vec::new();
    let mut pairs = Vec::new();
    for rank in Rank::ALL.iter().rev().copied() {
        match rank_counts[usize::from(rank.value())] {
            4 => quads.push(rank),
            3 => trips.push(rank),
            2 => pairs.push(rank),
            _ => {}
        }
    }

    if let Some(&four) = quads.first() {
        let rest = kickers(all_mask, &[four], 1);
        return build(HandCategory::FourOfAKind, &[&[four][..], &rest[..]]);
    }

    if let Some(&three) = trips.first() {
        // Вторые трипсы тоже годятся как пара.
        if let Some(&pair) = trips.get(1).or_else(|| pairs.first()) {
            return build(HandCategory::FullHouse, &[&[three, pair][..]]);
        }
    }

    if let Some(mask) = flush_mask {
        let top: Vec<Rank> = ranks_desc(mask).take(5).collect();
        return build(HandCategory::Flush, &[&top[..]]);
    }

    if let Some(high) = detect_straight(all_mask) {
        return HandRank::from_category_and_ranks(
            HandCategory::Straight,
            straight_rank_array(high),
        );
    }

    if let Some(&three) = trips.first() {
        let rest = kickers(all_mask, &[three], 2);
        return build(HandCategory::ThreeOfAKind, &[&[three][..], &rest[..]]);
    }

    if let [high_pair, low_pair, ..] = pairs[..] {
        let rest = kickers(all_mask, &[high_pair, low_pair], 1);
        return build(HandCategory::TwoPair, &[&[high_pair, low_pair][..], &rest[..]]);
    }

    if let Some(&pair) = pairs.first() {
        let rest = kickers(all_mask, &[pair], 3);
        return build(HandCategory::OnePair, &[&[pair][..], &rest[..]]);
    }

    let top: Vec<Rank> = ranks_desc(all_mask).take(5).collect();
    build(HandCategory::HighCard, &[&top[..]])
}

/// Старшие `n` рангов, кроме уже использованных.
fn kickers(mask: RankMask, used: &[Rank], n: usize) -> Vec<Rank> {
    let used_mask = used.iter().fold(0, |m, r| m | rank_to_bit(*r));
    ranks_desc(mask & !used_mask).take(n).collect()
}

/// Склеить части в 5 рангов (недостающие – двойки) и закодировать.
fn build(category: HandCategory, parts: &[&[Rank]]) -> HandRank {
    let mut ranks = [Rank::Two; 5];
    for (slot, rank) in ranks.iter_mut().zip(parts.iter().flat_map(|p| p.iter())) {
        *slot = *rank;
    }
    HandRank::from_category_and_ranks(category, ranks)
}

/// Массив рангов [r0..r4] для стрита с заданной старшей картой.
fn straight_rank_array(high: Rank) -> [Rank; 5] {
    if high == Rank::Five {
        // wheel: 5432A
        return [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace];
    }
    let mut ranks = [high; 5];
    for (i, slot) in ranks.iter_mut().enumerate() {
        *slot = Rank::from_value(high.value() - i as u8).unwrap_or(Rank::Two);
    }
    ranks
}
