// File: crates/songplot-core/src/svg.rs
// Summary: Serialises a scene (and optionally the tooltip) to a standalone SVG document.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use crate::scene::Scene;
use crate::surface::{Anchor, Shape, Style, Surface};
use crate::theme::Theme;
use crate::tooltip::FloatingTooltip;
use crate::types::Point;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn paint_attrs(style: &Style) -> String {
    let mut out = String::new();
    match style.fill {
        Some(c) => {
            let _ = write!(out, " fill=\"{}\"", c.hex());
            if c.a < 255 {
                let _ = write!(out, " fill-opacity=\"{:.3}\"", c.alpha());
            }
        }
        None => out.push_str(" fill=\"none\""),
    }
    if let Some(c) = style.stroke {
        let _ = write!(out, " stroke=\"{}\" stroke-width=\"{}\"", c.hex(), style.stroke_width);
        if c.a < 255 {
            let _ = write!(out, " stroke-opacity=\"{:.3}\"", c.alpha());
        }
    }
    if style.opacity < 1.0 {
        let _ = write!(out, " opacity=\"{:.3}\"", style.opacity);
    }
    out
}

fn path_data(points: &[Point], closed: bool) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let _ = write!(d, "{}{:.2},{:.2}", if i == 0 { "M" } else { "L" }, p.x, p.y);
    }
    if closed && !points.is_empty() {
        d.push('Z');
    }
    d
}

/// Render the scene's current state (mid-transition values included).
pub fn to_svg(scene: &Scene, theme: &Theme, tooltip: Option<&FloatingTooltip>) -> String {
    let (w, h) = scene.size();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    let _ = writeln!(out, "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", theme.background.hex());

    for id in scene.draw_order() {
        let Some(node) = scene.node(id) else { continue };
        let paint = paint_attrs(&node.style);
        match &node.shape {
            Shape::Group => {}
            Shape::Circle { center, radius } => {
                let title = node.hover.as_ref().map(|h| format!("<title>{}</title>", escape(&h.label))).unwrap_or_default();
                let _ = writeln!(
                    out,
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"{paint}>{title}</circle>",
                    center.x, center.y, radius
                );
            }
            Shape::Path { points, closed } => {
                if points.is_empty() {
                    continue;
                }
                let _ = writeln!(out, "<path d=\"{}\"{paint}/>", path_data(points, *closed));
            }
            Shape::Text { at, content, size, anchor } => {
                let anchor = match anchor {
                    Anchor::Start => "start",
                    Anchor::Middle => "middle",
                    Anchor::End => "end",
                };
                let _ = writeln!(
                    out,
                    "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{size}\" text-anchor=\"{anchor}\" font-family=\"sans-serif\"{paint}>{}</text>",
                    at.x, at.y, escape(content)
                );
            }
            Shape::Line { from, to } => {
                let _ = writeln!(
                    out,
                    "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"{paint}/>",
                    from.x, from.y, to.x, to.y
                );
            }
        }
    }

    if let Some((text, at)) = tooltip.and_then(|t| Some((t.text()?, t.position()?))) {
        let width = 7.0 * text.chars().count() as f32 + 12.0;
        let _ = writeln!(
            out,
            "<g class=\"tooltip\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"20\" rx=\"3\" fill=\"{}\"/><text x=\"{:.2}\" y=\"{:.2}\" font-size=\"12\" font-family=\"sans-serif\" fill=\"{}\">{}</text></g>",
            at.x, at.y - 15.0, width, theme.tooltip_fill.hex(), at.x + 6.0, at.y, theme.tooltip_text.hex(), escape(text)
        );
    }
    out.push_str("</svg>\n");
    out
}

pub fn write_svg(scene: &Scene, theme: &Theme, tooltip: Option<&FloatingTooltip>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_svg(scene, theme, tooltip))?;
    Ok(())
}
