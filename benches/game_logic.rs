use criterion::{black_box, criterion_group, criterion_main, Criterion};
use drift_tetris::core::{GameSession, Grid, SessionConfig};
use drift_tetris::types::{Coord, DrawCall, InputAction, InputFrame, NoInput, TileId};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(SessionConfig::default()).unwrap();
    let mut sink: Vec<DrawCall> = Vec::new();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session.restart();
            }
            session.tick(black_box(16), &NoInput);
            session.flush_draws(&mut sink);
            sink.clear();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new(10, 20);
            let cells: Vec<Coord> = (-10..-6)
                .flat_map(|y| (-5..5).map(move |x| (x, y)))
                .collect();
            grid.occupy(&cells, TileId(1));
            black_box(grid.clear_completed_rows());
        })
    });
}

fn bench_hard_drop_and_spawn(c: &mut Criterion) {
    let mut session = GameSession::new(SessionConfig::default()).unwrap();
    let mut sink: Vec<DrawCall> = Vec::new();
    let frame = InputFrame::with(&[InputAction::HardDrop]);

    c.bench_function("hard_drop_lock_spawn", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session.restart();
            }
            session.tick(0, &frame);
            session.flush_draws(&mut sink);
            sink.clear();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut session = GameSession::new(SessionConfig::default()).unwrap();
    let mut sink: Vec<DrawCall> = Vec::new();
    let frame = InputFrame::with(&[InputAction::Rotate]);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            session.tick(0, black_box(&frame));
            session.flush_draws(&mut sink);
            sink.clear();
        })
    });
}

fn bench_is_valid_position(c: &mut Criterion) {
    let grid = Grid::new(10, 20);
    let offsets = [(-1, 0), (0, 0), (1, 0), (2, 0)];

    c.bench_function("is_valid_position", |b| {
        b.iter(|| grid.is_valid_position(black_box((0, 0)), &offsets))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop_and_spawn,
    bench_rotate,
    bench_is_valid_position
);
criterion_main!(benches);
