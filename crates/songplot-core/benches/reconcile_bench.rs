use criterion::{black_box, criterion_group, criterion_main, Criterion};
use songplot_core::{PointStyle, Reconciler, Scene, Shape, Surface, ValueScale};

fn keys(n: usize, offset: usize) -> Vec<(String, f64, f64)> {
    (offset..offset + n)
        .map(|i| (format!("song-{i}"), (i % 100) as f64, (i % 37) as f64))
        .collect()
}

fn bench_sync(c: &mut Criterion) {
    let sx = ValueScale::new_linear(600.0, 40.0, 0.0, 100.0);
    let sy = ValueScale::new_linear(80.0, 370.0, 0.0, 40.0);
    let style = PointStyle::default();
    let mut group = c.benchmark_group("reconcile");
    for &n in &[300usize, 5_000usize] {
        let a = keys(n, 0);
        let b = keys(n, n / 2);
        group.bench_function(format!("half_overlap_{n}"), |bench| {
            bench.iter(|| {
                let mut scene = Scene::new(640.0, 400.0);
                let root = scene.root();
                let layer = scene.append(root, Shape::Group, Default::default());
                let mut rec = Reconciler::new();
                rec.sync(&mut scene, layer, &a, |r| r.0.as_str(), |r| r.1, |r| r.2, &sx, &sy, &style);
                let d = rec.sync(&mut scene, layer, &b, |r| r.0.as_str(), |r| r.1, |r| r.2, &sx, &sy, &style);
                scene.settle();
                black_box(d)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sync);
criterion_main!(benches);
