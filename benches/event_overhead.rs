//! Benchmarks for per-call instrumentation overhead

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stagelog_rs::prelude::*;

fn setup(timing: bool) -> Logger {
    let config = LoggerConfig::builder()
        .class_name("bench")
        .timing(timing)
        .build()
        .unwrap();
    let mut logger = Logger::with_config(config).unwrap();
    logger.initialize();
    for i in 0..16 {
        logger.register_event(&format!("event {i}")).unwrap();
        logger.register_stage(&format!("stage {i}")).unwrap();
    }
    logger
}

fn bench_event_by_id(c: &mut Criterion) {
    let mut logger = setup(true);
    let id = logger.event_id("event 7").unwrap();

    c.bench_function("event_begin_end_by_id", |b| {
        b.iter(|| {
            logger.event_begin_id(black_box(id)).unwrap();
            logger.event_end_id(black_box(id)).unwrap();
        });
    });
}

fn bench_event_by_name(c: &mut Criterion) {
    let mut logger = setup(true);

    c.bench_function("event_begin_end_by_name", |b| {
        b.iter(|| {
            logger.event_begin(black_box("event 7")).unwrap();
            logger.event_end(black_box("event 7")).unwrap();
        });
    });
}

fn bench_event_untimed(c: &mut Criterion) {
    let mut logger = setup(false);
    let id = logger.event_id("event 7").unwrap();

    c.bench_function("event_begin_end_untimed", |b| {
        b.iter(|| {
            logger.event_begin_id(black_box(id)).unwrap();
            logger.event_end_id(black_box(id)).unwrap();
        });
    });
}

fn bench_stage_push_pop(c: &mut Criterion) {
    let mut logger = setup(true);
    let outer = logger.stage_id("stage 0").unwrap();
    let inner = logger.stage_id("stage 1").unwrap();

    c.bench_function("stage_push_pop_nested", |b| {
        b.iter(|| {
            logger.stage_push_id(black_box(outer)).unwrap();
            logger.stage_push_id(black_box(inner)).unwrap();
            logger.stage_pop().unwrap();
            logger.stage_pop().unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_event_by_id,
    bench_event_by_name,
    bench_event_untimed,
    bench_stage_push_pop
);
criterion_main!(benches);
