// File: crates/songplot-demo/src/main.rs
// Summary: Loads the song dataset, refreshes the dashboard with the authorship filter off and on,
// and writes each chart to PNG and SVG once its transitions have settled.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use songplot_core::svg::write_svg;
use songplot_core::theme;
use songplot_core::{ChartId, ChartOptions, ChartReport, Dashboard, Dataset, Scene, Shape};
use songplot_render_skia::SkiaRenderer;

#[derive(Parser)]
#[command(name = "songplot", version, about = "Render the song dashboard to image files")]
struct Cli {
    /// Song dataset (JSON array of song records)
    #[arg(default_value = "crates/songplot-demo/data/songs.json")]
    data: PathBuf,

    /// Audio-feature CSV merged into the dataset by song title
    #[arg(long)]
    features: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "target/out")]
    out: PathBuf,

    /// Theme preset (light or dark)
    #[arg(long, default_value = "light")]
    theme: String,

    /// Which authorship filter states to render
    #[arg(long, value_enum, default_value_t = FilterStates::Both)]
    filter: FilterStates,

    /// Hover the first bound point of each chart so the tooltip is drawn
    #[arg(long)]
    hover: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterStates {
    Off,
    On,
    Both,
}

impl FilterStates {
    fn states(self) -> &'static [bool] {
        match self {
            Self::Off => &[false],
            Self::On => &[true],
            Self::Both => &[false, true],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let mut dataset = Dataset::load(&cli.data)
        .with_context(|| format!("failed to load dataset '{}'", cli.data.display()))?;
    if let Some(csv) = &cli.features {
        let merged = dataset
            .merge_audio_features_file(csv)
            .with_context(|| format!("failed to merge features from '{}'", csv.display()))?;
        println!("Merged audio features into {} songs", merged);
    }
    println!("Loaded {} songs from {}", dataset.len(), cli.data.display());

    let theme = theme::find(&cli.theme);
    if !theme.name.eq_ignore_ascii_case(&cli.theme) {
        warn!("unknown theme {:?}, using {}", cli.theme, theme.name);
    }
    let renderer = SkiaRenderer::new(theme);
    let mut dash: Dashboard<Scene> = Dashboard::new(dataset, ChartOptions::default().with_theme(theme));

    for &filter in cli.filter.states() {
        let reports = dash.refresh(filter);
        summarize(&reports, filter);
        for chart in dash.registry_mut().iter_mut() {
            chart.surface_mut().settle();
        }
        let dir = cli.out.join(if filter { "originals" } else { "all" });
        render_all(&mut dash, &renderer, &dir, cli.hover)?;
    }
    Ok(())
}

fn summarize(reports: &[ChartReport], filter: bool) {
    println!("Authorship filter {}:", if filter { "on" } else { "off" });
    for r in reports {
        println!(
            "  {:<18} {:>4} points ({:+} / -{}), {} years{}",
            r.id.slug(),
            r.eligible,
            r.diff.enter.len(),
            r.diff.exit.len(),
            r.groups,
            if r.rescaled { ", y rescaled" } else { "" }
        );
    }
}

fn first_point(dash: &Dashboard<Scene>, id: ChartId) -> Option<songplot_core::Point> {
    let chart = dash.chart(id)?;
    let key = chart.bound_keys().into_iter().next()?;
    let node = chart.reconciler().node(&key)?;
    match chart.surface().node(node)?.shape {
        Shape::Circle { center, .. } => Some(center),
        _ => None,
    }
}

fn render_all(dash: &mut Dashboard<Scene>, renderer: &SkiaRenderer, dir: &Path, hover: bool) -> Result<()> {
    let ids: Vec<ChartId> = dash.specs().iter().map(|s| s.id).collect();
    for id in ids {
        if hover {
            if let Some(at) = first_point(dash, id) {
                dash.pointer_move(id, at);
            }
        }
        let Some(chart) = dash.chart(id) else { continue };
        let tooltip = dash.tooltip().is_visible().then(|| dash.tooltip());
        let png = dir.join(format!("{}.png", id.slug()));
        renderer.render_to_png(chart.surface(), tooltip, &png)?;
        write_svg(chart.surface(), renderer.theme(), tooltip, png.with_extension("svg"))?;
        info!("rendered {} to {}", chart.title(), png.display());
        println!("Wrote {}", png.display());
        if hover {
            dash.pointer_leave(id);
        }
    }
    Ok(())
}
