use bench::apply_large_runtime_config;
use bench::apply_medium_runtime_config;
use bench::apply_small_runtime_config;
use bench::default_rng;
use bench::random_values;
use criterion::BenchmarkGroup;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::measurement::Measurement;
use phrase::Replacer;
use phrase::Seq;
use std::hint::black_box;

const SIZES: [usize; 4] = [1_024, 4_096, 16_384, 65_536];
const VALUE_RANGE: std::ops::RangeInclusive<i64> = -64..=64;

fn apply_runtime_config_for_size<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, size: usize) {
    if size <= 4_096 {
        apply_small_runtime_config(group);
    } else if size <= 16_384 {
        apply_medium_runtime_config(group);
    } else {
        apply_large_runtime_config(group);
    }
}

fn bench_replace_indices(c: &mut Criterion) {
    let mut rng = default_rng();
    let mut group = c.benchmark_group("replace_indices");

    for size in SIZES {
        apply_runtime_config_for_size(&mut group, size);
        let seq = Seq::new(random_values(&mut rng, size, VALUE_RANGE));
        let spec: Vec<i64> = (0..size as i64).step_by(16).collect();
        let rep = Replacer::values([0, 0]);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(seq.replace_indices(spec.clone(), &rep).unwrap()));
        });
    }

    group.finish();
}

fn bench_split_at(c: &mut Criterion) {
    let mut rng = default_rng();
    let mut group = c.benchmark_group("split_at");

    for size in SIZES {
        apply_runtime_config_for_size(&mut group, size);
        let seq = Seq::new(random_values(&mut rng, size, VALUE_RANGE));
        let spec: Vec<i64> = (0..=size as i64).step_by(64).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(seq.split_at(spec.clone()).unwrap()));
        });
    }

    group.finish();
}

fn bench_replace_if_window(c: &mut Criterion) {
    let mut rng = default_rng();
    let mut group = c.benchmark_group("replace_if_window");

    for size in SIZES {
        apply_runtime_config_for_size(&mut group, size);
        let seq = Seq::new(random_values(&mut rng, size, VALUE_RANGE));
        let rep = Replacer::values([0]);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                black_box(
                    seq.replace_if_window(4, 4, |w| w.iter().sum::<i64>() > 0, &rep)
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

fn bench_while_do_drain(c: &mut Criterion) {
    let mut rng = default_rng();
    let mut group = c.benchmark_group("while_do_drain");

    for size in SIZES {
        apply_runtime_config_for_size(&mut group, size);
        let seq = Seq::new(random_values(&mut rng, size, VALUE_RANGE));
        let floor = size / 2;

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                black_box(
                    seq.clone()
                        .while_(move |v| v.len() > floor)
                        .do_(|v| v.drop(64)),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_replace_indices,
    bench_split_at,
    bench_replace_if_window,
    bench_while_do_drain
);
criterion_main!(benches);
