// File: crates/songplot-core/src/reconcile.rs
// Summary: Keyed data join: binds records to point elements and applies enter/update/exit.
// Notes:
// - One element per key. If a key repeats within one call, the last record
//   supplies the position of a newly entering element.
// - Update is a no-op: an element that stays bound keeps the position it was
//   created with, even if its record's x/y would now map elsewhere.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;

use crate::scale::Scale;
use crate::surface::{Hover, NodeId, Shape, Style, Surface};
use crate::transition::{Attr, Transition};
use crate::types::{Point, Rgba};

/// Enter/update/exit partition of one reconciliation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diff {
    /// New keys, in record order.
    pub enter: Vec<String>,
    /// Keys that stay bound, in record order.
    pub update: Vec<String>,
    /// Keys that lost their record, in key order.
    pub exit: Vec<String>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}

/// Partition `next` against the `bound` keys. Duplicate keys in `next` count once.
pub fn diff<'a, B, N>(bound: B, next: N) -> Diff
where
    B: IntoIterator<Item = &'a str>,
    N: IntoIterator<Item = &'a str>,
{
    let bound: BTreeSet<&str> = bound.into_iter().collect();
    let mut seen = BTreeSet::new();
    let mut out = Diff::default();
    for k in next {
        if !seen.insert(k) {
            continue;
        }
        if bound.contains(k) {
            out.update.push(k.to_string());
        } else {
            out.enter.push(k.to_string());
        }
    }
    out.exit = bound.difference(&seen).map(|k| k.to_string()).collect();
    out
}

/// Look and timing of bound points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointStyle {
    pub radius: f32,
    pub lifted_radius: f32,
    pub stroke: Rgba,
    pub stroke_width: f32,
    pub enter: Transition,
    pub exit: Transition,
    pub hover: Transition,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            radius: 3.0,
            lifted_radius: 6.0,
            stroke: Rgba::from_argb(255, 70, 130, 180),
            stroke_width: 1.5,
            enter: Transition::new(500.0),
            exit: Transition::new(250.0),
            hover: Transition::new(150.0),
        }
    }
}

/// Binding set of one chart's points layer: key -> element.
#[derive(Clone, Debug, Default)]
pub struct Reconciler {
    bound: BTreeMap<String, NodeId>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently bound keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bound.keys().map(String::as_str)
    }

    pub fn node(&self, key: &str) -> Option<NodeId> {
        self.bound.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Reconcile `records` against the elements bound in `layer`.
    #[allow(clippy::too_many_arguments)]
    pub fn sync<S, T, X, Y, FK, FX, FY>(
        &mut self,
        surface: &mut S,
        layer: NodeId,
        records: &[T],
        key: FK,
        x: FX,
        y: FY,
        scale_x: &X,
        scale_y: &Y,
        style: &PointStyle,
    ) -> Diff
    where
        S: Surface,
        X: Scale,
        Y: Scale,
        FK: Fn(&T) -> &str,
        FX: Fn(&T) -> X::Domain,
        FY: Fn(&T) -> Y::Domain,
    {
        let mut latest: HashMap<&str, &T> = HashMap::with_capacity(records.len());
        for r in records {
            if latest.insert(key(r), r).is_some() {
                debug!("duplicate key {:?}; last record wins", key(r));
            }
        }
        let d = diff(self.keys(), records.iter().map(|r| key(r)));

        for k in &d.exit {
            if let Some(node) = self.bound.remove(k) {
                surface.animate(node, Attr::Radius(0.0), style.exit);
                surface.animate(node, Attr::Opacity(0.0), style.exit);
                surface.remove_after(node, style.exit);
            }
        }

        for k in &d.enter {
            let Some(&r) = latest.get(k.as_str()) else { continue };
            let at = Point::new(scale_x.to_px(x(r)), scale_y.to_px(y(r)));
            let node = surface.append(
                layer,
                Shape::Circle { center: at, radius: 0.0 },
                Style::stroked(style.stroke, style.stroke_width),
            );
            surface.set_hover(node, Hover {
                label: k.clone(),
                rest_radius: style.radius,
                lifted_radius: style.lifted_radius,
                transition: style.hover,
            });
            surface.animate(node, Attr::Radius(style.radius), style.enter);
            self.bound.insert(k.clone(), node);
        }

        debug!(
            "sync: {} enter, {} update, {} exit, {} bound",
            d.enter.len(),
            d.update.len(),
            d.exit.len(),
            self.bound.len()
        );
        d
    }
}
