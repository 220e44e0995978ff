//! Benchmarks for pipeline execution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use sigflow::prelude::*;
use std::sync::Arc;

fn gain_stage(index: usize, width: usize) -> Arc<dyn Stage> {
    Arc::new(FnStage::new(
        format!("gain-{index}"),
        width,
        width,
        |input, output| {
            for (out, x) in output.iter_mut().zip(input) {
                *out = x * 1.0001;
            }
            Ok(())
        },
    ))
}

fn pipeline_benchmark(c: &mut Criterion) {
    let width = 1024;
    let depth = 8;

    let mut pipeline = Pipeline::new();
    for index in 0..depth {
        pipeline.add(gain_stage(index, width));
    }

    let mut rng = rand::thread_rng();
    let input: Vec<f32> = (0..width).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let mut sink = vec![0.0_f32; width];

    c.bench_function("execute_8_stages_1024_elems", |b| {
        b.iter(|| {
            let written = pipeline
                .execute_into(black_box(&input), &mut sink)
                .unwrap();
            black_box(written)
        });
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
