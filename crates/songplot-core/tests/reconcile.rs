// File: crates/songplot-core/tests/reconcile.rs
// Purpose: Keyed join semantics of the reconciler and one-time chart scaffolding.

use chrono::NaiveDate;
use songplot_core::charts::calendar_domain;
use songplot_core::{
    ChartId, ChartOptions, ChartRegistry, Domain, Point, PointStyle, Reconciler, Scene, Shape, Surface,
    TickFormat, ValueScale,
};

#[derive(Clone)]
struct Row {
    key: &'static str,
    x: f64,
    y: f64,
}

fn row(key: &'static str, x: f64, y: f64) -> Row {
    Row { key, x, y }
}

fn scales() -> (ValueScale, ValueScale) {
    // identity mapping: value v lands on pixel v
    let s = ValueScale::new_linear(100.0, 0.0, 0.0, 100.0);
    (s, s)
}

fn sync(rec: &mut Reconciler, scene: &mut Scene, layer: songplot_core::NodeId, rows: &[Row]) -> songplot_core::Diff {
    let (sx, sy) = scales();
    rec.sync(scene, layer, rows, |r| r.key, |r| r.x, |r| r.y, &sx, &sy, &PointStyle::default())
}

fn center(scene: &Scene, rec: &Reconciler, key: &str) -> Point {
    let node = rec.node(key).expect("bound");
    match scene.node(node).expect("in scene").shape {
        Shape::Circle { center, .. } => center,
        _ => panic!("not a circle"),
    }
}

fn radius(scene: &Scene, rec: &Reconciler, key: &str) -> f32 {
    match scene.node(rec.node(key).unwrap()).unwrap().shape {
        Shape::Circle { radius, .. } => radius,
        _ => panic!("not a circle"),
    }
}

fn setup() -> (Scene, songplot_core::NodeId, Reconciler) {
    let mut scene = Scene::new(100.0, 100.0);
    let root = scene.root();
    let layer = scene.append(root, Shape::Group, Default::default());
    (scene, layer, Reconciler::new())
}

#[test]
fn abc_to_bcd_enters_d_and_exits_a() {
    let (mut scene, layer, mut rec) = setup();
    sync(&mut rec, &mut scene, layer, &[row("A", 1.0, 1.0), row("B", 2.0, 2.0), row("C", 3.0, 3.0)]);
    let a = rec.node("A").unwrap();
    scene.settle();

    let d = sync(&mut rec, &mut scene, layer, &[row("B", 2.0, 2.0), row("C", 3.0, 3.0), row("D", 4.0, 4.0)]);
    assert_eq!(d.enter, vec!["D"]);
    assert_eq!(d.update, vec!["B", "C"]);
    assert_eq!(d.exit, vec!["A"]);
    assert_eq!(rec.keys().collect::<Vec<_>>(), vec!["B", "C", "D"]);

    // A fades out, then disappears; the layer ends with exactly one circle per bound key
    assert!(scene.node(a).unwrap().is_leaving());
    scene.settle();
    assert!(!scene.contains(a));
    assert_eq!(scene.children(layer).len(), 3);
}

#[test]
fn entering_points_grow_from_zero() {
    let (mut scene, layer, mut rec) = setup();
    sync(&mut rec, &mut scene, layer, &[row("A", 10.0, 10.0)]);
    assert_eq!(radius(&scene, &rec, "A"), 0.0);
    scene.advance(250.0);
    let mid = radius(&scene, &rec, "A");
    assert!(mid > 0.0 && mid < 3.0);
    scene.settle();
    assert_eq!(radius(&scene, &rec, "A"), 3.0);
    assert_eq!(center(&scene, &rec, "A"), Point::new(10.0, 10.0));
}

#[test]
fn update_keeps_the_original_position() {
    // Documented behaviour: a key that stays bound is not repositioned,
    // even when its record now maps somewhere else.
    let (mut scene, layer, mut rec) = setup();
    sync(&mut rec, &mut scene, layer, &[row("A", 10.0, 10.0)]);
    scene.settle();
    let d = sync(&mut rec, &mut scene, layer, &[row("A", 50.0, 80.0)]);
    assert_eq!(d.update, vec!["A"]);
    scene.settle();
    assert_eq!(center(&scene, &rec, "A"), Point::new(10.0, 10.0));
}

#[test]
fn duplicate_keys_bind_one_element_at_the_last_position() {
    let (mut scene, layer, mut rec) = setup();
    let d = sync(&mut rec, &mut scene, layer, &[row("A", 10.0, 10.0), row("A", 25.0, 50.0)]);
    assert_eq!(d.enter, vec!["A"]);
    assert_eq!(rec.len(), 1);
    assert_eq!(scene.children(layer).len(), 1);
    assert_eq!(center(&scene, &rec, "A"), Point::new(25.0, 50.0));
}

#[test]
fn key_that_exits_and_returns_gets_a_fresh_element() {
    let (mut scene, layer, mut rec) = setup();
    sync(&mut rec, &mut scene, layer, &[row("A", 10.0, 10.0)]);
    let first = rec.node("A").unwrap();
    sync(&mut rec, &mut scene, layer, &[]);
    assert!(rec.is_empty());
    sync(&mut rec, &mut scene, layer, &[row("A", 10.0, 10.0)]);
    let second = rec.node("A").unwrap();
    assert_ne!(first, second);
    scene.settle();
    assert!(!scene.contains(first));
    assert!(scene.contains(second));
}

fn ensure(reg: &mut ChartRegistry<Scene>) -> songplot_core::ChartHandle {
    reg.ensure(
        ChartId::Duration,
        "Duration (Minutes)",
        calendar_domain(),
        Domain::Fixed { min: 0.0, max: 600.0 },
        TickFormat::MinutesSeconds,
    )
    .handles()
}

#[test]
fn ensure_builds_scaffolding_once() {
    let mut reg: ChartRegistry<Scene> = ChartRegistry::new(ChartOptions::default());
    let h1 = ensure(&mut reg);
    let nodes = reg.get(ChartId::Duration).unwrap().surface().len();
    let h2 = ensure(&mut reg);
    assert_eq!(h1, h2);
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.get(ChartId::Duration).unwrap().surface().len(), nodes);
}

#[test]
fn layers_are_stacked_axes_band_line_points() {
    let mut reg: ChartRegistry<Scene> = ChartRegistry::new(ChartOptions::default());
    let h = ensure(&mut reg);
    let scene = reg.get(ChartId::Duration).unwrap().surface();
    let order = scene.draw_order();
    let pos = |id| order.iter().position(|n| *n == id).unwrap();
    assert!(pos(h.x_axis) < pos(h.band));
    assert!(pos(h.y_axis) < pos(h.band));
    assert!(pos(h.band) < pos(h.mean_line));
    assert!(pos(h.mean_line) < pos(h.points));
    // fixed domain: y ticks exist from the start; x ticks always do
    assert!(scene.children(h.y_axis).len() > 1);
    assert!(scene.children(h.x_axis).len() > 1);
}

#[test]
fn fitted_axis_starts_without_ticks() {
    let mut reg: ChartRegistry<Scene> = ChartRegistry::new(ChartOptions::default());
    let start = NaiveDate::from_ymd_opt(1957, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(1970, 12, 31).unwrap();
    let chart = reg.ensure(ChartId::Takes, "Recording Takes", (start, end), Domain::Fitted, TickFormat::Integer);
    let h = chart.handles();
    // just the axis line
    assert_eq!(chart.surface().children(h.y_axis).len(), 1);
    assert!(chart.rescale_y(&[3.0, 40.0]));
    assert!(chart.surface().children(h.y_axis).len() > 1);
    assert!(!chart.rescale_y(&[3.0, 40.0]), "same domain, nothing to redraw");
}
