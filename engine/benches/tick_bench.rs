use std::collections::HashSet;
use std::time::{Duration, Instant};

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use snake_engine::config::GameConfig;
use snake_engine::game::{rules, GameEngine, Point, SessionRng};
use snake_engine::storage::MemoryHighScoreStore;

fn create_started_engine() -> (GameEngine, Instant) {
    let mut engine = GameEngine::new(
        GameConfig::default(),
        Box::new(MemoryHighScoreStore::new()),
        SessionRng::new(42),
    );
    let t0 = Instant::now();
    engine.start(t0);
    (engine, t0)
}

fn tick_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    group.bench_function("single_tick", |b| {
        b.iter_batched(
            create_started_engine,
            |(mut engine, t0)| {
                engine.advance(t0 + Duration::from_millis(150));
                engine
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("food_placement_crowded_grid", |b| {
        let occupied: HashSet<Point> = (0..19)
            .flat_map(|y| (0..20).map(move |x| Point::new(x, y)))
            .collect();
        let mut rng = SessionRng::new(42);
        b.iter(|| rules::random_food_position(&mut rng, &occupied, 20))
    });

    group.finish();
}

criterion_group!(benches, tick_bench);
criterion_main!(benches);
