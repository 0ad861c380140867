// File: crates/songplot-core/src/config.rs
// Summary: Chart layout, styling and timing options with sensible defaults.

use crate::reconcile::PointStyle;
use crate::theme::Theme;
use crate::transition::Transition;
use crate::types::{Insets, HEIGHT, WIDTH};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartOptions {
    pub width: f32,
    pub height: f32,
    pub insets: Insets,
    pub theme: Theme,
    pub title_size: f32,
    pub tick_size: f32,
    /// Length of tick marks, in pixels.
    pub tick_len: f32,
    pub point_radius: f32,
    pub hover_radius: f32,
    pub enter: Transition,
    pub exit: Transition,
    pub hover: Transition,
    /// Band and mean-line redraw.
    pub trend: Transition,
    /// Axis tick redraw after a rescale.
    pub axis: Transition,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::light(),
            title_size: 16.0,
            tick_size: 10.0,
            tick_len: 6.0,
            point_radius: 3.0,
            hover_radius: 6.0,
            enter: Transition::new(500.0),
            exit: Transition::new(250.0),
            hover: Transition::new(150.0),
            trend: Transition::new(750.0),
            axis: Transition::new(750.0),
        }
    }
}

impl ChartOptions {
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn point_style(&self) -> PointStyle {
        PointStyle {
            radius: self.point_radius,
            lifted_radius: self.hover_radius,
            stroke: self.theme.point_stroke,
            stroke_width: 1.5,
            enter: self.enter,
            exit: self.exit,
            hover: self.hover,
        }
    }

    /// Plot area edges: (left, top, right, bottom).
    pub fn plot_rect(&self) -> (f32, f32, f32, f32) {
        (
            self.insets.left as f32,
            self.insets.top as f32,
            self.width - self.insets.right as f32,
            self.height - self.insets.bottom as f32,
        )
    }
}
