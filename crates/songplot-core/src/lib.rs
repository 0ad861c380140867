// File: crates/songplot-core/src/lib.rs
// Summary: Core library entry point; exports the data model, reconciliation engine, aggregation, and scene.

pub mod aggregate;
pub mod axis;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod reconcile;
pub mod record;
pub mod registry;
pub mod scale;
pub mod scene;
pub mod surface;
pub mod svg;
pub mod theme;
pub mod tooltip;
pub mod transition;
pub mod types;

pub use aggregate::{aggregate, TrendPoint};
pub use axis::{Domain, TickFormat};
pub use charts::{declared, ChartId, ChartSpec, Datum};
pub use config::ChartOptions;
pub use dashboard::{ChartReport, Dashboard};
pub use dataset::{Dataset, DatasetError};
pub use reconcile::{diff, Diff, PointStyle, Reconciler};
pub use record::{Feature, Song};
pub use registry::{Chart, ChartHandle, ChartRegistry};
pub use scale::{Scale, TimeScale, ValueScale};
pub use scene::Scene;
pub use surface::{NodeId, Shape, Style, Surface};
pub use theme::Theme;
pub use tooltip::{FloatingTooltip, Tooltip};
pub use transition::{Ease, Transition};
pub use types::{Insets, Point, Rgba};
