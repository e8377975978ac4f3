//! Benchmarks for the paginated placement structure.
//!
//! Run with: cargo bench -p pagegrid

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use pagegrid::{FixedGrid, GridIndex, PagedLayout};
use std::hint::black_box;

/// A grid of `pages` full pages at `capacity`, loaded into a structure.
fn full_grid(capacity: usize, pages: usize) -> (FixedGrid, PagedLayout) {
    let mut grid = FixedGrid::new(capacity);
    grid.push_tiles(capacity * pages);
    let mut layout = PagedLayout::new();
    layout.load_from_metadata(&grid);
    (grid, layout)
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure/load_from_metadata");

    for tiles in [64usize, 512, 4096] {
        let mut grid = FixedGrid::new(20);
        grid.push_tiles(tiles);
        group.bench_with_input(BenchmarkId::from_parameter(tiles), &grid, |b, grid| {
            let mut layout = PagedLayout::new();
            b.iter(|| {
                layout.load_from_metadata(grid);
                black_box(layout.total_pages())
            })
        });
    }

    group.finish();
}

fn bench_front_insert_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure/front_insert_cascade");

    for pages in [4usize, 32, 128] {
        let (mut grid, layout) = full_grid(20, pages);
        let tile = grid.push_tile();
        group.bench_with_input(
            BenchmarkId::from_parameter(pages),
            &(grid, layout),
            |b, (grid, layout)| {
                b.iter_batched(
                    || layout.clone(),
                    |mut layout| {
                        // Every page is full, so this overflows all of them.
                        layout.add(grid, tile, GridIndex::ZERO);
                        black_box(layout.total_pages())
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_index_translation(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure/index_translation");

    let (grid, layout) = full_grid(20, 64);
    let last = grid.view_model().len() - 1;
    group.bench_function("index_from_model_index/last", |b| {
        b.iter(|| black_box(layout.index_from_model_index(&grid, last)))
    });
    group.bench_function("model_index_from_index/last", |b| {
        let index = GridIndex::new(63, 19);
        b.iter(|| black_box(layout.model_index_from_index(&grid, index)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_load,
    bench_front_insert_cascade,
    bench_index_translation
);
criterion_main!(benches);
