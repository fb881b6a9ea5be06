//! Discovery and rendering benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sosgen_bench::{MARKER, synthetic_compilation, synthetic_manifest};
use sosgen_codegen::template::{render, singleton_fragments};
use sosgen_codegen::{Generator, discover};
use std::hint::black_box;

fn benchmark_render(c: &mut Criterion) {
    let fragments = singleton_fragments(true);
    let args = ["GameSettings", "App.Config", "public"];

    c.bench_function("render_singleton_unit", |b| {
        b.iter(|| render(black_box(&fragments), black_box(&args)))
    });
}

fn benchmark_discover(c: &mut Criterion) {
    let mut group = c.benchmark_group("discover");
    for depth in [0usize, 8, 64] {
        let compilation = synthetic_compilation(1_000, depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &compilation, |b, comp| {
            b.iter(|| discover(black_box(comp), MARKER))
        });
    }
    group.finish();
}

fn benchmark_generate(c: &mut Criterion) {
    let compilation = synthetic_compilation(1_000, 4);

    c.bench_function("generate_1000_declarations", |b| {
        b.iter(|| Generator::new(black_box(&compilation)).generate())
    });
}

fn benchmark_parse(c: &mut Criterion) {
    let xml = synthetic_manifest(1_000);

    c.bench_function("parse_manifest_1000", |b| {
        b.iter(|| sosgen_model::parse_compilation(black_box(&xml)))
    });
}

criterion_group!(
    benches,
    benchmark_render,
    benchmark_discover,
    benchmark_generate,
    benchmark_parse
);
criterion_main!(benches);
