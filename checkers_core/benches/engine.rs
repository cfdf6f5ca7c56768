//! `checkers_core::engine` の性能計測（強制手の検出、着手の適用）。

use core::hint::black_box;
use criterion::BatchSize;
use criterion::Criterion;
use checkers_core::engine;

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args()
}

/// 取りが2通りある中盤風の局面を返す。
fn capture_position() -> engine::Board {
    let mut board = engine::Board::standard();
    let moves = [((2, 2), (3, 3)), ((5, 5), (4, 4)), ((6, 2), (7, 3))];

    for ((from_x, from_y), (to_x, to_y)) in moves {
        let Some(piece) = board.piece_at(engine::Cell::new(from_x, from_y)) else {
            continue;
        };
        let _moved = board.move_piece(piece.id(), engine::Cell::new(to_x, to_y));
    }

    board
}

/// `Engine::attempt_move` を計測する。
fn bench_attempt_move(criterion: &mut Criterion) {
    let Some(piece) = engine::Board::standard().piece_at(engine::Cell::new(2, 2)) else {
        return;
    };
    let dest = engine::Cell::new(3, 3);

    criterion.bench_function("engine/attempt_move_initial", |bench| {
        bench.iter_batched(
            engine::Engine::initial,
            |mut session| black_box(session.attempt_move(piece.id(), dest)),
            BatchSize::SmallInput,
        );
    });
}

/// `Engine::forced_moves` を計測する。
fn bench_forced_moves(criterion: &mut Criterion) {
    let initial = engine::Engine::initial();
    criterion.bench_function("engine/forced_moves_initial", |bench| {
        bench.iter(|| black_box(initial.forced_moves()));
    });

    let midgame = engine::Engine::new(capture_position(), engine::Rules::default());
    criterion.bench_function("engine/forced_moves_capture", |bench| {
        bench.iter(|| black_box(midgame.forced_moves()));
    });
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();

    bench_attempt_move(&mut criterion);
    bench_forced_moves(&mut criterion);

    criterion.final_summary();
}
