use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_mahjong::core::{GameOptions, GameRng, PlayerId, Tile};
use rust_mahjong::hand::shanten::calculate_shanten;
use rust_mahjong::round::{Round, RoundSetup, RoundStatus};
use rust_mahjong::scoring::{Scorer, Win};

fn bench_shanten(c: &mut Criterion) {
    let hands: Vec<Vec<u8>> = vec![
        vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 12, 13, 14, 15],
        vec![1, 1, 1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9],
        vec![1, 4, 7, 12, 15, 18, 23, 26, 29, 31, 33, 35, 37],
        vec![1, 9, 11, 19, 21, 29, 31, 32, 33, 34, 35, 36, 37],
    ];
    c.bench_function("shanten_13_tiles", |b| {
        b.iter(|| {
            for hand in &hands {
                black_box(calculate_shanten(black_box(hand)));
            }
        });
    });
}

fn bench_scoring(c: &mut Criterion) {
    // 111222333m as triplets or runs, so several decompositions compete.
    let hand: Vec<Tile> = [10, 11, 12, 20, 21, 22, 30, 31, 32, 170, 180, 190, 150, 151]
        .into_iter()
        .map(Tile::new)
        .collect();
    let win = Win::new(PlayerId::new(1), None, hand, 4);
    let options = GameOptions::default();
    c.bench_function("score_ambiguous_hand", |b| {
        b.iter(|| Scorer::score(black_box(&win), &options));
    });
}

fn bench_round(c: &mut Criterion) {
    c.bench_function("round_default_actions", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut round = Round::new(GameOptions::default(), RoundSetup::default(), &mut GameRng::new(seed));
            while round.status() != RoundStatus::End {
                let proposals: Vec<_> = round
                    .all_allowed_actions()
                    .values()
                    .map(|list| Some(list.default_action()))
                    .collect();
                let Some(record) = round.get_priority_action(&proposals) else {
                    break;
                };
                if round.do_action(record.player, record.action).is_err() {
                    break;
                }
            }
            round.history().len()
        });
    });
}

criterion_group!(benches, bench_shanten, bench_scoring, bench_round);
criterion_main!(benches);
