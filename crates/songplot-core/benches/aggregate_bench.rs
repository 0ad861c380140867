use criterion::{black_box, criterion_group, criterion_main, Criterion};
use songplot_core::aggregate;

fn rows(n: usize) -> Vec<(i32, f64)> {
    (0..n)
        .map(|i| (1957 + (i % 14) as i32, (i as f64 * 0.37).sin() * 100.0 + 200.0))
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for &n in &[300usize, 10_000usize] {
        let data = rows(n);
        group.bench_function(format!("by_year_{n}"), |b| {
            b.iter(|| black_box(aggregate(&data, |r| r.0, |r| r.1)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
