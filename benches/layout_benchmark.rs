//! Benchmarks for deckdown segmentation and layout performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use a synthetic deck generator so timings scale with
//! page count rather than any particular document.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic deck with the given number of pages, exercising
/// images, columns, tables and callout boxes.
fn create_test_deck(page_count: usize) -> String {
    let mut text = String::from("---\nlayout: image_right_half\ncolumns: 2\n---\n");

    for i in 0..page_count {
        text.push_str(&format!("# Page {i}\n"));
        text.push_str("## Subtitle line\n");
        text.push_str("First paragraph of body text for layout measurement.\n");
        text.push_str("* bullet one\n* bullet two\n");
        text.push_str("----\n");
        text.push_str("Second column content with a [link](#Page 0).\n");
        text.push_str("|cell a|cell b|\n|cell c|cell d|\n");
        text.push_str(&format!("![chart](figure-{i}.png)\n"));
        text.push_str("#### Note\nboxed remark\n");
    }

    text
}

/// Benchmark segmentation at various deck sizes.
fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    for page_count in [1, 10, 100].iter() {
        let text = create_test_deck(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| deckdown::segment(black_box(&text)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark plan building over an already segmented deck.
fn bench_plan_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_building");

    for page_count in [10, 100].iter() {
        let deck = deckdown::segment(&create_test_deck(*page_count)).unwrap();

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| deckdown::plan_document(black_box(&deck)));
        });
    }

    group.finish();
}

/// Benchmark the grid math in isolation.
fn bench_image_grid(c: &mut Criterion) {
    let dims = deckdown::Dimensions::default();

    c.bench_function("image_grid_9_cells", |b| {
        b.iter(|| {
            deckdown::layout::image_grid_cells(
                black_box(9),
                deckdown::Layout::ImageFill,
                &dims,
                true,
                false,
            )
        });
    });
}

criterion_group!(
    benches,
    bench_segmentation,
    bench_plan_building,
    bench_image_grid,
);
criterion_main!(benches);
