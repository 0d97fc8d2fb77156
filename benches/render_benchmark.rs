//! Render benchmark: Measure the cost of one render pass.
//!
//! Target: < 100µs for a 40-line live block at 120 columns

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use progressline::{
    ColorChoice, FixedGeometry, Message, MessageRenderer, MessageStatus, MessageStore,
    OutputConfig, Target, Update,
};
use std::io;

/// Create a store with `running` started messages and `done` finished ones.
fn create_test_store(running: usize, done: usize) -> MessageStore {
    let mut store = MessageStore::new();
    for i in 0..running {
        store
            .push(&Update::new(format!("task {i}: compiling crate number {i}")).status(MessageStatus::Started))
            .unwrap();
    }
    for i in 0..done {
        let mut msg = Message::new(format!("finished task {i}"), MessageStatus::Success);
        msg.details = "warning: unused variable `x`\n  --> src/lib.rs:1:5".to_string();
        store.add(msg).unwrap();
    }
    store
}

fn renderer(width: u16, height: u16, colors: ColorChoice) -> MessageRenderer {
    let target = Target::with_geometry(io::sink(), FixedGeometry::new(width, height));
    let mut config = OutputConfig::with_target(target);
    config.colors = colors;
    MessageRenderer::new(config)
}

fn repaint_live_block(c: &mut Criterion) {
    let store = create_test_store(40, 0);
    let mut renderer = renderer(120, 50, ColorChoice::Always);

    c.bench_function("repaint_40_lines_120_cols", |b| {
        b.iter(|| renderer.render(black_box(&store)))
    });
}

fn plain_stream_idle(c: &mut Criterion) {
    let store = create_test_store(40, 0);
    let mut renderer = renderer(120, 0, ColorChoice::Never);
    renderer.render(&store).unwrap();

    // Everything is logged already; passes should be near free.
    c.bench_function("plain_stream_idle_pass", |b| {
        b.iter(|| renderer.render(black_box(&store)))
    });
}

fn format_finished(c: &mut Criterion) {
    let renderer = renderer(120, 50, ColorChoice::Always);
    let frame = renderer.frame();
    let store = create_test_store(0, 1);
    let msg = &store.list_finished()[0];

    c.bench_function("format_finished_with_details", |b| {
        b.iter(|| renderer.format_message(black_box(msg), frame))
    });
}

fn repaint_various_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("repaint_by_width");
    let store = create_test_store(20, 0);

    for width in [40u16, 80, 160, 320] {
        let mut renderer = renderer(width, 50, ColorChoice::Always);
        group.bench_with_input(BenchmarkId::from_parameter(width), &store, |b, store| {
            b.iter(|| renderer.render(black_box(store)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    repaint_live_block,
    plain_stream_idle,
    format_finished,
    repaint_various_widths,
);
criterion_main!(benches);
