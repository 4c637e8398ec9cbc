use criterion::{Criterion, criterion_group, criterion_main};
use snake_engine::{BotController, GameConfig, SessionRng, SnakeGame};

fn bench_autopilot_rounds(c: &mut Criterion) {
    c.bench_function("autopilot_20x20_500_ticks", |b| {
        b.iter(|| {
            let config = GameConfig {
                initial_food: None,
                seed: Some(42),
                ..GameConfig::default()
            };
            let Ok(mut game) = SnakeGame::new(config) else {
                return;
            };
            let mut rng = SessionRng::new(7);

            for _ in 0..500 {
                if let Some(direction) = BotController::calculate_move(&game.snapshot(), &mut rng) {
                    game.request_direction(direction);
                }
                game.tick();
                if !game.status().is_running() {
                    game.reset();
                }
            }
        });
    });
}

fn bench_single_tick_long_snake(c: &mut Criterion) {
    let grid_size = 64;
    let body: Vec<_> = (0..grid_size)
        .map(|x| snake_engine::Cell::new(grid_size - 1 - x, 32))
        .collect();

    c.bench_function("tick_64x64_snake_len_64", |b| {
        b.iter(|| {
            let config = GameConfig {
                rows: grid_size as u32,
                columns: grid_size as u32,
                initial_food: None,
                seed: Some(1),
                ..GameConfig::default()
            };
            let Ok(mut game) = SnakeGame::from_parts(
                config,
                SessionRng::new(1),
                body.clone(),
                None,
                snake_engine::Direction::Up,
            ) else {
                return;
            };
            for _ in 0..30 {
                game.tick();
            }
        });
    });
}

criterion_group!(benches, bench_autopilot_rounds, bench_single_tick_long_snake);
criterion_main!(benches);
