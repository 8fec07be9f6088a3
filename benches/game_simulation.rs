use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rummy_engine::config::HouseRules;
use rummy_engine::game::{extract_melds, Hand, TableState};
use rummy_engine::simulation::engine::run_game;

fn benchmark_single_game(c: &mut Criterion) {
    let rules = HouseRules::default();

    c.bench_function("single_game_seed_12345", |b| {
        b.iter(|| run_game(black_box(2), black_box(12345), black_box(&rules)))
    });
}

fn benchmark_multiple_games(c: &mut Criterion) {
    let rules = HouseRules::default();

    c.bench_function("100_games_4_players", |b| {
        b.iter(|| {
            for seed in 0..100 {
                let _ = run_game(black_box(4), black_box(seed), black_box(&rules));
            }
        })
    });
}

fn benchmark_extract_melds(c: &mut Criterion) {
    let mut table = TableState::new(Some(42));
    let hands: Vec<Hand> = table.deal(2).expect("deal should succeed");

    c.bench_function("extract_melds_dealt_hand", |b| {
        b.iter(|| {
            let mut hand = hands[0].clone();
            let mut melds = Vec::new();
            extract_melds(black_box(&mut hand), &mut melds)
        })
    });
}

criterion_group!(benches, benchmark_single_game, benchmark_multiple_games, benchmark_extract_melds);
criterion_main!(benches);
