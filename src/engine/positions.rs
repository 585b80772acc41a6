use crate::domain::{BlindSeats, Player, SeatIndex};

/// Следующее место по кругу.
pub fn next_seat(seat: SeatIndex, num_players: usize) -> SeatIndex {
    if num_players == 0 {
        return seat;
    }
    ((usize::from(seat) + 1) % num_players) as SeatIndex
}

/// Первое место ПОСЛЕ `start` (по кругу), удовлетворяющее условию.
/// Сам `start` проверяется последним.
pub fn next_seat_where(
    players: &[Player],
    start: SeatIndex,
    pred: impl Fn(&Player) -> bool,
) -> Option<SeatIndex> {
    let n = players.len();
    (1..=n)
        .map(|offset| (usize::from(start) + offset) % n)
        .map(|idx| &players[idx])
        .find(|p| pred(p))
        .map(|p| p.seat)
}

/// Первое место, начиная С `start` включительно, удовлетворяющее условию.
pub fn first_seat_from(
    players: &[Player],
    start: SeatIndex,
    pred: impl Fn(&Player) -> bool,
) -> Option<SeatIndex> {
    let n = players.len();
    (0..n)
        .map(|offset| (usize::from(start) + offset) % n)
        .map(|idx| &players[idx])
        .find(|p| pred(p))
        .map(|p| p.seat)
}

/// Кто ставит блайнды.
///
/// Хедз-ап: кнопка – малый блайнд, второй игрок – большой.
/// 3+ игрока: кнопка+1 – малый, кнопка+2 – большой.
pub fn blind_seats(button: SeatIndex, num_players: usize) -> BlindSeats {
    let sb = if num_players == 2 {
        button
    } else {
        next_seat(button, num_players)
    };
    BlindSeats {
        small_blind: sb,
        big_blind: next_seat(sb, num_players),
    }
}

/// С кого начинаются торги на префлопе (до пропуска тех, кто не может ходить).
/// Хедз-ап – кнопка, иначе следующий после BB.
pub fn preflop_start_seat(button: SeatIndex, num_players: usize) -> SeatIndex {
    if num_players == 2 {
        button
    } else {
        next_seat(blind_seats(button, num_players).big_blind, num_players)
    }
}

/// Расстояние по часовой от кнопки: кнопка+1 → 0, сама кнопка → n-1.
pub fn distance_from_button(seat: SeatIndex, button: SeatIndex, num_players: usize) -> usize {
    let n = num_players.max(1);
    (usize::from(seat) + n - usize::from(button) - 1) % n
}
