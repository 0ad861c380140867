// File: crates/songplot-render-skia/src/lib.rs
// Summary: Paints a songplot `Scene` (and the floating tooltip) onto a Skia CPU raster surface and encodes PNG.

use std::path::Path;

use anyhow::{anyhow, Result};
use log::debug;
use skia_safe as skia;

use songplot_core::scene::Scene;
use songplot_core::surface::{Anchor, Shape, Style, Surface};
use songplot_core::{FloatingTooltip, Point, Rgba, Theme};

pub mod text;

pub use text::TextShaper;

const TOOLTIP_SIZE: f32 = 12.0;
const TOOLTIP_PAD: f32 = 6.0;

fn color(c: Rgba, opacity: f32) -> skia::Color {
    let a = (c.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    skia::Color::from_argb(a, c.r, c.g, c.b)
}

fn fill_paint(c: Rgba, opacity: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color(c, opacity));
    paint
}

fn stroke_paint(c: Rgba, width: f32, opacity: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color(c, opacity));
    paint
}

fn build_path(points: &[Point], closed: bool) -> skia::Path {
    let mut path = skia::Path::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to((p.x, p.y));
        } else {
            path.line_to((p.x, p.y));
        }
    }
    if closed {
        path.close();
    }
    path
}

/// Renders scenes headlessly. Holds the font collection so repeated renders reuse it.
pub struct SkiaRenderer {
    shaper: TextShaper,
    theme: Theme,
}

impl SkiaRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { shaper: TextShaper::new(), theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Paint the scene's current state, mid-transition values included.
    pub fn paint(&self, canvas: &skia::Canvas, scene: &Scene, tooltip: Option<&FloatingTooltip>) {
        canvas.clear(color(self.theme.background, 1.0));

        for id in scene.draw_order() {
            let Some(node) = scene.node(id) else { continue };
            self.paint_shape(canvas, &node.shape, &node.style);
        }

        if let Some((label, at)) = tooltip.and_then(|t| Some((t.text()?, t.position()?))) {
            self.paint_tooltip(canvas, label, at);
        }
    }

    fn paint_shape(&self, canvas: &skia::Canvas, shape: &Shape, style: &Style) {
        let Style { fill, stroke, stroke_width, opacity } = *style;
        if opacity <= 0.0 {
            return;
        }
        match shape {
            Shape::Group => {}
            Shape::Circle { center, radius } => {
                if *radius <= 0.0 {
                    return;
                }
                if let Some(c) = fill {
                    canvas.draw_circle((center.x, center.y), *radius, &fill_paint(c, opacity));
                }
                if let Some(c) = stroke {
                    canvas.draw_circle((center.x, center.y), *radius, &stroke_paint(c, stroke_width, opacity));
                }
            }
            Shape::Path { points, closed } => {
                if points.len() < 2 {
                    return;
                }
                let path = build_path(points, *closed);
                if let Some(c) = fill {
                    canvas.draw_path(&path, &fill_paint(c, opacity));
                }
                if let Some(c) = stroke {
                    canvas.draw_path(&path, &stroke_paint(c, stroke_width, opacity));
                }
            }
            Shape::Line { from, to } => {
                if let Some(c) = stroke {
                    canvas.draw_line((from.x, from.y), (to.x, to.y), &stroke_paint(c, stroke_width, opacity));
                }
            }
            Shape::Text { at, content, size, anchor } => {
                let c = fill.or(stroke).unwrap_or(self.theme.axis_label);
                self.shaper.draw(canvas, content, at.x, at.y, *size, color(c, opacity), *anchor);
            }
        }
    }

    fn paint_tooltip(&self, canvas: &skia::Canvas, label: &str, at: Point) {
        let width = self.shaper.measure_width(label, TOOLTIP_SIZE) + 2.0 * TOOLTIP_PAD;
        let height = TOOLTIP_SIZE + 2.0 * TOOLTIP_PAD;
        let rect = skia::Rect::from_xywh(at.x, at.y - height + TOOLTIP_PAD, width, height);
        canvas.draw_round_rect(rect, 3.0, 3.0, &fill_paint(self.theme.tooltip_fill, 1.0));
        self.shaper.draw(
            canvas,
            label,
            at.x + TOOLTIP_PAD,
            at.y,
            TOOLTIP_SIZE,
            color(self.theme.tooltip_text, 1.0),
            Anchor::Start,
        );
    }

    /// Render to encoded PNG bytes using a CPU raster surface sized to the scene.
    pub fn render_png(&self, scene: &Scene, tooltip: Option<&FloatingTooltip>) -> Result<Vec<u8>> {
        let (w, h) = scene.size();
        let mut surface = skia::surfaces::raster_n32_premul((w.ceil() as i32, h.ceil() as i32))
            .ok_or_else(|| anyhow!("failed to create {}x{} raster surface", w, h))?;
        self.paint(surface.canvas(), scene, tooltip);

        let image = surface.image_snapshot();
        let data = image
            .encode(None, skia::EncodedImageFormat::PNG, None)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    pub fn render_to_png(
        &self,
        scene: &Scene,
        tooltip: Option<&FloatingTooltip>,
        output_png_path: impl AsRef<Path>,
    ) -> Result<()> {
        let bytes = self.render_png(scene, tooltip)?;
        let path = output_png_path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &bytes)?;
        debug!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}
