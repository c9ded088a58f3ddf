//! Benchmarks for drawing boards onto a canvas.
//!
//! Run with: cargo bench -p fttt-render --bench render_bench
//!
//! `fresh` pays for layout on every frame; `reused` draws with a layout
//! computed once, the way an interactive game redraws after each move.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fttt_core::Board;
use fttt_render::{Canvas, Renderer, render};
use std::hint::black_box;

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/uniform");

    for (side, levels) in [(3, 0), (3, 1), (3, 2), (3, 3)] {
        let board = Board::uniform(side, side, levels).expect("benchmark board");
        let renderer = Renderer::new(&board);
        let label = format!("{side}x{side}@{levels}");
        group.throughput(Throughput::Elements(renderer.layout().size().area() as u64));

        group.bench_with_input(BenchmarkId::new("fresh", &label), &board, |b, board| {
            b.iter(|| black_box(render(board)))
        });
        group.bench_with_input(BenchmarkId::new("reused", &label), &board, |b, board| {
            b.iter(|| black_box(renderer.render(board)))
        });

        let mut canvas = Canvas::new(renderer.width(), renderer.height());
        group.bench_with_input(BenchmarkId::new("into", &label), &board, |b, board| {
            b.iter(|| {
                renderer.render_into(board, &mut canvas, 0, 0);
                black_box(&canvas);
            })
        });
        group.bench_function(BenchmarkId::new("to_text", &label), |b| {
            b.iter(|| black_box(canvas.to_text()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
