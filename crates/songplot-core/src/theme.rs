// File: crates/songplot-core/src/theme.rs
// Summary: Light/Dark theming for chart colors.

use crate::types::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub axis_line: Rgba,
    pub axis_label: Rgba,
    pub tick: Rgba,
    pub title: Rgba,
    pub point_stroke: Rgba,
    pub band_fill: Rgba,
    pub mean_stroke: Rgba,
    pub tooltip_fill: Rgba,
    pub tooltip_text: Rgba,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::from_argb(255, 18, 18, 20),
            axis_line: Rgba::from_argb(255, 180, 180, 190),
            axis_label: Rgba::from_argb(255, 235, 235, 245),
            tick: Rgba::from_argb(255, 150, 150, 160),
            title: Rgba::from_argb(255, 235, 235, 245),
            point_stroke: Rgba::from_argb(255, 64, 160, 255),
            band_fill: Rgba::from_argb(72, 255, 170, 60),
            mean_stroke: Rgba::from_argb(255, 255, 170, 60),
            tooltip_fill: Rgba::from_argb(230, 40, 40, 45),
            tooltip_text: Rgba::from_argb(255, 235, 235, 245),
        }
    }

    /// Steelblue points on white, the classic look.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::from_argb(255, 255, 255, 255),
            axis_line: Rgba::from_argb(255, 60, 60, 70),
            axis_label: Rgba::from_argb(255, 20, 20, 30),
            tick: Rgba::from_argb(255, 100, 100, 110),
            title: Rgba::from_argb(255, 20, 20, 30),
            point_stroke: Rgba::from_argb(255, 70, 130, 180),
            band_fill: Rgba::from_argb(64, 230, 120, 30),
            mean_stroke: Rgba::from_argb(255, 230, 120, 30),
            tooltip_fill: Rgba::from_argb(240, 250, 250, 252),
            tooltip_text: Rgba::from_argb(255, 20, 20, 30),
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive_and_falls_back() {
        assert_eq!(find("DARK").name, "dark");
        assert_eq!(find("no-such-theme").name, "light");
    }
}
