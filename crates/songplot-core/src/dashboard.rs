// File: crates/songplot-core/src/dashboard.rs
// Summary: Refresh orchestration: filter the dataset, then ensure/sync/aggregate every declared chart.

use chrono::NaiveDate;
use log::{debug, info};

use crate::aggregate::aggregate;
use crate::charts::{calendar_domain, declared, ChartId, ChartSpec};
use crate::config::ChartOptions;
use crate::dataset::Dataset;
use crate::reconcile::Diff;
use crate::record::Song;
use crate::registry::{Chart, ChartRegistry};
use crate::surface::Surface;
use crate::tooltip::{FloatingTooltip, Tooltip};
use crate::types::Point;

/// Authorship filter: keep only the band's own compositions.
pub fn authorship(song: &Song) -> bool {
    song.is_original()
}

/// Songs passing the authorship filter (all songs when inactive), in dataset order.
pub fn filter_songs(songs: &[Song], filter_active: bool) -> Vec<&Song> {
    songs.iter().filter(|s| !filter_active || authorship(s)).collect()
}

/// What one refresh did to one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartReport {
    pub id: ChartId,
    pub eligible: usize,
    pub diff: Diff,
    pub groups: usize,
    pub rescaled: bool,
}

pub struct Dashboard<S> {
    dataset: Dataset,
    specs: Vec<ChartSpec>,
    registry: ChartRegistry<S>,
    tooltip: FloatingTooltip,
    x_domain: (NaiveDate, NaiveDate),
    filter: bool,
}

impl<S: Surface> Dashboard<S> {
    pub fn new(dataset: Dataset, options: ChartOptions) -> Self {
        Self::with_specs(dataset, declared(), options)
    }

    pub fn with_specs(dataset: Dataset, specs: Vec<ChartSpec>, options: ChartOptions) -> Self {
        Self {
            dataset,
            specs,
            registry: ChartRegistry::new(options),
            tooltip: FloatingTooltip::new(),
            x_domain: calendar_domain(),
            filter: false,
        }
    }

    pub fn filter_active(&self) -> bool {
        self.filter
    }

    /// Toggle handler: record the new filter state and re-render.
    pub fn set_filter(&mut self, active: bool) -> Vec<ChartReport> {
        self.filter = active;
        self.refresh(active)
    }

    pub fn filtered_songs(&self, filter_active: bool) -> Vec<&Song> {
        filter_songs(self.dataset.songs(), filter_active)
    }

    /// Re-derive every chart's subset and bring its scene up to date.
    /// Charts are visited in declared order.
    pub fn refresh(&mut self, filter_active: bool) -> Vec<ChartReport> {
        let style = self.registry.options().point_style();
        let filtered = filter_songs(self.dataset.songs(), filter_active);
        debug!("refresh: filter {}, {} of {} songs", filter_active, filtered.len(), self.dataset.len());

        let mut reports = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let data = spec.eligible(filtered.iter().copied());
            let chart = self
                .registry
                .ensure(spec.id, spec.title, self.x_domain, spec.y_domain, spec.tick_format);
            let values: Vec<f64> = data.iter().map(|d| d.value).collect();
            let rescaled = chart.rescale_y(&values);
            let hovering = chart.surface().hovered().is_some();
            let diff = chart.sync_points(&data, &style);
            if hovering && chart.surface().hovered().is_none() {
                // the point under the pointer just exited
                self.tooltip.hide();
            }
            let trend = aggregate(&data, |d| d.year, |d| d.value);
            let groups = trend.len();
            chart.draw_trend(trend);
            reports.push(ChartReport { id: spec.id, eligible: data.len(), diff, groups, rescaled });
        }
        info!(
            "refreshed {} charts (filter {})",
            reports.len(),
            if filter_active { "on" } else { "off" }
        );
        reports
    }

    /// Pointer moved over chart `id`; hover handlers update the shared tooltip.
    pub fn pointer_move(&mut self, id: ChartId, at: Point) {
        if let Some(chart) = self.registry.get_mut(id) {
            chart.surface_mut().pointer_move(at, &mut self.tooltip);
        }
    }

    pub fn pointer_leave(&mut self, id: ChartId) {
        if let Some(chart) = self.registry.get_mut(id) {
            chart.surface_mut().pointer_leave(&mut self.tooltip);
        }
    }

    pub fn tooltip(&self) -> &FloatingTooltip {
        &self.tooltip
    }

    pub fn chart(&self, id: ChartId) -> Option<&Chart<S>> {
        self.registry.get(id)
    }

    pub fn registry(&self) -> &ChartRegistry<S> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ChartRegistry<S> {
        &mut self.registry
    }

    pub fn specs(&self) -> &[ChartSpec] {
        &self.specs
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}
