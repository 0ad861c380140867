// File: crates/songplot-core/src/registry.rs
// Summary: Typed chart registry; builds each chart's scaffolding once and hands out its layers.

use std::collections::btree_map::{self, BTreeMap};

use chrono::{Datelike, NaiveDate};
use log::{debug, info};

use crate::aggregate::{band_outline, mean_line, TrendPoint};
use crate::axis::{format_year, Domain, TickFormat};
use crate::charts::{ChartId, Datum};
use crate::config::ChartOptions;
use crate::reconcile::{Diff, PointStyle, Reconciler};
use crate::scale::{Scale, TimeScale, ValueScale};
use crate::surface::{Anchor, NodeId, Shape, Style, Surface};
use crate::transition::{Attr, Transition};
use crate::types::Point;

/// Layer handles of one chart, fixed for the chart's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartHandle {
    pub title: NodeId,
    pub x_axis: NodeId,
    pub y_axis: NodeId,
    /// Filled mean ± stddev polygon.
    pub band: NodeId,
    /// Polyline through the means.
    pub mean_line: NodeId,
    /// Parent of every bound point.
    pub points: NodeId,
}

pub struct Chart<S> {
    id: ChartId,
    title: String,
    surface: S,
    handles: ChartHandle,
    x: TimeScale,
    y: ValueScale,
    y_domain: Domain,
    format: TickFormat,
    y_ticks: Vec<NodeId>,
    reconciler: Reconciler,
    trend: Vec<TrendPoint<i32>>,
    opts: ChartOptions,
}

impl<S: Surface> Chart<S> {
    fn build(
        id: ChartId,
        title: &str,
        x_domain: (NaiveDate, NaiveDate),
        y_domain: Domain,
        format: TickFormat,
        opts: &ChartOptions,
    ) -> Self {
        let theme = &opts.theme;
        let mut surface = S::with_size(opts.width, opts.height);
        let (l, t, r, b) = opts.plot_rect();
        let root = surface.root();

        let title_node = surface.append(
            root,
            Shape::Text {
                at: Point::new(opts.width / 2.0, t - 20.0),
                content: title.to_string(),
                size: opts.title_size,
                anchor: Anchor::Middle,
            },
            Style::filled(theme.title),
        );
        let x_axis = surface.append(root, Shape::Group, Style::default());
        let y_axis = surface.append(root, Shape::Group, Style::default());
        let band_layer = surface.append(root, Shape::Group, Style::default());
        let line_layer = surface.append(root, Shape::Group, Style::default());
        let points = surface.append(root, Shape::Group, Style::default());

        let band = surface.append(
            band_layer,
            Shape::Path { points: Vec::new(), closed: true },
            Style::filled(theme.band_fill),
        );
        let mean_line = surface.append(
            line_layer,
            Shape::Path { points: Vec::new(), closed: false },
            Style::stroked(theme.mean_stroke, 1.5),
        );

        let x = TimeScale::new(x_domain.0, x_domain.1, l, r);
        let (vmin, vmax) = y_domain.initial();
        let y = ValueScale::new_linear(t, b, vmin, vmax);

        let axis_style = Style::stroked(theme.axis_line, 1.0);
        let tick_style = Style::stroked(theme.tick, 1.0);
        surface.append(x_axis, Shape::Line { from: Point::new(l, b), to: Point::new(r, b) }, axis_style);
        surface.append(y_axis, Shape::Line { from: Point::new(l, t), to: Point::new(l, b) }, axis_style);
        for d in x.ticks() {
            let px = x.to_px(d);
            surface.append(x_axis, Shape::Line { from: Point::new(px, b), to: Point::new(px, b + opts.tick_len) }, tick_style);
            surface.append(
                x_axis,
                Shape::Text {
                    at: Point::new(px, b + opts.tick_len + opts.tick_size),
                    content: format_year(d),
                    size: opts.tick_size,
                    anchor: Anchor::Middle,
                },
                Style::filled(theme.axis_label),
            );
        }

        let mut chart = Self {
            id,
            title: title.to_string(),
            surface,
            handles: ChartHandle { title: title_node, x_axis, y_axis, band, mean_line, points },
            x,
            y,
            y_domain,
            format,
            y_ticks: Vec::new(),
            reconciler: Reconciler::new(),
            trend: Vec::new(),
            opts: *opts,
        };
        if y_domain.is_known_up_front() {
            chart.y_ticks = chart.draw_y_ticks(None);
        }
        info!("built chart {:?} ({})", id, title);
        chart
    }

    /// Tick marks and labels for the current y scale. With a transition they fade in.
    fn draw_y_ticks(&mut self, fade_in: Option<Transition>) -> Vec<NodeId> {
        let (l, _, _, _) = self.opts.plot_rect();
        let tick_style = Style::stroked(self.opts.theme.tick, 1.0);
        let label_style = Style::filled(self.opts.theme.axis_label);
        let min_step = if self.format == TickFormat::Integer { 1.0 } else { 0.0 };
        let mut nodes = Vec::new();
        for v in self.y.ticks_with_min_step(min_step) {
            let py = self.y.to_px(v);
            let mark = self.surface.append(
                self.handles.y_axis,
                Shape::Line { from: Point::new(l - self.opts.tick_len, py), to: Point::new(l, py) },
                tick_style,
            );
            let label = self.surface.append(
                self.handles.y_axis,
                Shape::Text {
                    at: Point::new(l - self.opts.tick_len - 3.0, py + self.opts.tick_size * 0.35),
                    content: self.format.format(v),
                    size: self.opts.tick_size,
                    anchor: Anchor::End,
                },
                label_style,
            );
            nodes.push(mark);
            nodes.push(label);
        }
        if let Some(tr) = fade_in {
            for n in &nodes {
                self.surface.set(*n, Attr::Opacity(0.0));
                self.surface.animate(*n, Attr::Opacity(1.0), tr);
            }
        }
        nodes
    }

    /// Refit a fitted y domain to `values`, redrawing ticks with a transition.
    /// Fixed domains and empty inputs leave the scale alone. Returns whether the domain changed.
    pub fn rescale_y(&mut self, values: &[f64]) -> bool {
        if self.y_domain.is_known_up_front() {
            return false;
        }
        let Some(next) = self.y.fitted(values.iter().copied()) else {
            return false;
        };
        if next.same_domain(&self.y) && !self.y_ticks.is_empty() {
            return false;
        }
        let tr = self.opts.axis;
        for n in std::mem::take(&mut self.y_ticks) {
            self.surface.animate(n, Attr::Opacity(0.0), tr);
            self.surface.remove_after(n, tr);
        }
        debug!("{:?}: y domain [{}, {}] -> [{}, {}]", self.id, self.y.vmin, self.y.vmax, next.vmin, next.vmax);
        self.y = next;
        self.y_ticks = self.draw_y_ticks(Some(tr));
        true
    }

    /// Reconcile the points layer with `data`.
    pub fn sync_points(&mut self, data: &[Datum<'_>], style: &PointStyle) -> Diff {
        self.reconciler.sync(
            &mut self.surface,
            self.handles.points,
            data,
            |d| d.key,
            |d| d.date(),
            |d| d.value,
            &self.x,
            &self.y,
            style,
        )
    }

    /// Redraw band and mean line from a freshly aggregated trend (keyed by year).
    pub fn draw_trend(&mut self, trend: Vec<TrendPoint<i32>>) {
        let x = self.x;
        let y = self.y;
        let px = |year: i32| x.to_px(NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(x.start));
        let py = |v: f64| y.to_px(v);
        let band = band_outline(&trend, px, py);
        let line = mean_line(&trend, px, py);
        self.surface.animate(self.handles.band, Attr::Points(band), self.opts.trend);
        self.surface.animate(self.handles.mean_line, Attr::Points(line), self.opts.trend);
        self.trend = trend;
    }

    pub fn id(&self) -> ChartId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn handles(&self) -> ChartHandle {
        self.handles
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Keys of the points currently bound, sorted.
    pub fn bound_keys(&self) -> Vec<String> {
        self.reconciler.keys().map(str::to_string).collect()
    }

    pub fn trend(&self) -> &[TrendPoint<i32>] {
        &self.trend
    }

    pub fn x_scale(&self) -> &TimeScale {
        &self.x
    }

    pub fn y_scale(&self) -> &ValueScale {
        &self.y
    }

    /// Years covered by the x axis.
    pub fn year_span(&self) -> (i32, i32) {
        (self.x.start.year(), self.x.end.year())
    }
}

/// Exactly one chart per `ChartId` for the registry's lifetime.
pub struct ChartRegistry<S> {
    charts: BTreeMap<ChartId, Chart<S>>,
    options: ChartOptions,
}

impl<S: Surface> ChartRegistry<S> {
    pub fn new(options: ChartOptions) -> Self {
        Self { charts: BTreeMap::new(), options }
    }

    /// Existing chart for `id`, or a newly built one. Arguments other than `id`
    /// only matter on first use; scaffolding is never rebuilt.
    pub fn ensure(
        &mut self,
        id: ChartId,
        title: &str,
        x_domain: (NaiveDate, NaiveDate),
        y_domain: Domain,
        format: TickFormat,
    ) -> &mut Chart<S> {
        match self.charts.entry(id) {
            btree_map::Entry::Occupied(e) => e.into_mut(),
            btree_map::Entry::Vacant(v) => {
                v.insert(Chart::build(id, title, x_domain, y_domain, format, &self.options))
            }
        }
    }

    pub fn get(&self, id: ChartId) -> Option<&Chart<S>> {
        self.charts.get(&id)
    }

    pub fn get_mut(&mut self, id: ChartId) -> Option<&mut Chart<S>> {
        self.charts.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chart<S>> {
        self.charts.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Chart<S>> {
        self.charts.values_mut()
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }
}
