// File: crates/songplot-core/src/tooltip.rs
// Summary: Tooltip service shared by every chart's hover handling.

use crate::types::Point;

/// Pixel offset from the pointer to the tooltip's anchor.
pub const POINTER_OFFSET: (f32, f32) = (10.0, -10.0);

pub trait Tooltip {
    fn show(&mut self, text: &str, at: Point);
    fn hide(&mut self);
}

/// A single floating label; the demo paints it, tests inspect it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloatingTooltip {
    content: Option<(String, Point)>,
}

impl FloatingTooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().map(|(t, _)| t.as_str())
    }

    pub fn position(&self) -> Option<Point> {
        self.content.as_ref().map(|(_, p)| *p)
    }
}

impl Tooltip for FloatingTooltip {
    fn show(&mut self, text: &str, at: Point) {
        self.content = Some((text.to_string(), at.offset(POINTER_OFFSET.0, POINTER_OFFSET.1)));
    }

    fn hide(&mut self) {
        self.content = None;
    }
}
