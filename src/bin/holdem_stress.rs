use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use holdem_core::domain::{Chips, HandConfig, Street};
use holdem_core::engine::{ActionKind, EngineError, HandState, PlayerAction, ValidAction};
use holdem_core::infra::RngSeed;

// Параметры нагрузки.
const NUM_THREADS: u64 = 8;
const HANDS_PER_THREAD: u64 = 2_000;
const MAX_STEPS: u32 = 500;
const BASE_SEED: u64 = 0x5EED;

/// Итог одной раздачи для статистики.
struct HandStats {
    total_pot: u64,
    reached_showdown: bool,
}

#[derive(Default)]
struct ThreadStats {
    hands: u64,
    showdowns: u64,
    total_pot: u64,
    max_pot: u64,
    failures: u64,
}

fn main() {
    env_logger::init();
    println!("holdem_stress: стартуем стресс-тест движка раздачи…");

    let base = RngSeed::from_u64(BASE_SEED);
    let workers: Vec<_> = (0..NUM_THREADS)
        .map(|t| thread::spawn(move || run_worker(base, t)))
        .collect();

    let mut totals = ThreadStats::default();
    for worker in workers {
        match worker.join() {
            Ok(stats) => {
                totals.hands += stats.hands;
                totals.showdowns += stats.showdowns;
                totals.total_pot += stats.total_pot;
                totals.max_pot = totals.max_pot.max(stats.max_pot);
                totals.failures += stats.failures;
            }
            Err(_) => {
                log::error!("поток стресс-теста упал");
                totals.failures += 1;
            }
        }
    }

    println!();
    println!("=========== STRESS TEST SUMMARY ===========");
    println!("Всего сыграно рук: {}", totals.hands);
    if totals.hands > 0 {
        println!("Суммарный пот за все руки: {}", totals.total_pot);
        println!("Средний пот: {}", totals.total_pot / totals.hands);
        println!("Максимальный пот: {}", totals.max_pot);
        println!("Рук дошло до шоудауна: {}", totals.showdowns);
    }
    println!("Ошибок: {}", totals.failures);
    println!("===========================================");

    if totals.failures > 0 {
        std::process::exit(1);
    }
}

/// Один поток: своя серия раздач, у каждой раздачи свой RNG.
fn run_worker(base: RngSeed, thread_index: u64) -> ThreadStats {
    let mut stats = ThreadStats::default();

    for i in 0..HANDS_PER_THREAD {
        let hand_index = thread_index * HANDS_PER_THREAD + i;
        let seed = base.derive(hand_index);

        match play_hand(seed, hand_index) {
            Ok(hand) => {
                stats.hands += 1;
                stats.total_pot += hand.total_pot;
                stats.max_pot = stats.max_pot.max(hand.total_pot);
                if hand.reached_showdown {
                    stats.showdowns += 1;
                }
            }
            Err(e) => {
                log::error!("hand #{hand_index}: {e}");
                stats.failures += 1;
            }
        }
    }

    stats
}

/// Сыграть одну раздачу случайными допустимыми действиями.
fn play_hand(seed: RngSeed, hand_index: u64) -> Result<HandStats, EngineError> {
    // Случайность ботов отделена от колоды.
    let mut bots = StdRng::from_seed(seed.derive(u64::MAX).bytes);

    let num_players = bots.gen_range(2..=9usize);
    let names = (0..num_players).map(|i| format!("bot{i}"));
    let button = bots.gen_range(0..num_players) as u8;
    let stacks = (0..num_players)
        .map(|_| Chips::new(bots.gen_range(1..=400u64) * 5))
        .collect();

    let config =
        HandConfig::new(names, button, Chips::new(5), Chips::new(10)).with_starting_chips(stacks);
    let mut hand = HandState::with_defaults(config, seed.to_rng())?;

    let mut steps = 0;
    while !hand.is_complete() {
        steps += 1;
        if steps > MAX_STEPS {
            return Err(EngineError::Internal("превышен лимит шагов"));
        }

        // Иногда кто-то отваливается.
        if bots.gen_ratio(1, 50) {
            let seat = bots.gen_range(0..num_players) as u8;
            match hand.force_fold(seat) {
                Ok(()) | Err(EngineError::SeatAlreadyFolded(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        let valid = hand.valid_actions();
        let action = pick_action(&mut bots, &valid)
            .ok_or(EngineError::Internal("у текущего игрока нет действий"))?;
        log::trace!("hand #{hand_index}: {action}");
        hand.process_action(action)?;
    }

    Ok(HandStats {
        total_pot: hand.pot_total().0,
        reached_showdown: hand.street() == Street::Showdown,
    })
}

/// Случайное действие из допустимых. Фолд редкий, чтобы раздачи доходили до шоудауна.
fn pick_action(rng: &mut StdRng, valid: &[ValidAction]) -> Option<PlayerAction> {
    let non_fold: Vec<&ValidAction> = valid.iter().filter(|a| a.kind != ActionKind::Fold).collect();
    let chosen = if non_fold.is_empty() || rng.gen_ratio(1, 10) {
        valid.first()?
    } else {
        non_fold[rng.gen_range(0..non_fold.len())]
    };

    Some(match chosen.kind {
        ActionKind::Fold => PlayerAction::Fold,
        ActionKind::Check => PlayerAction::Check,
        ActionKind::Call => PlayerAction::Call,
        ActionKind::AllIn => PlayerAction::AllIn,
        ActionKind::Raise => {
            PlayerAction::Raise(Chips::new(rng.gen_range(chosen.min_amount.0..=chosen.max_amount.0)))
        }
    })
}
