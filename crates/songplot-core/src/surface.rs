// File: crates/songplot-core/src/surface.rs
// Summary: Renderer-agnostic drawing surface: retained shapes, animated attributes, pointer hover.

use crate::tooltip::Tooltip;
use crate::transition::{Attr, Transition};
use crate::types::{Point, Rgba};

/// Handle to a shape on a surface. Stable until the shape is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Container; children draw in insertion order.
    Group,
    Circle { center: Point, radius: f32 },
    Path { points: Vec<Point>, closed: bool },
    Text { at: Point, content: String, size: f32, anchor: Anchor },
    Line { from: Point, to: Point },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Rgba>,
    pub stroke: Option<Rgba>,
    pub stroke_width: f32,
    pub opacity: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: None, stroke: None, stroke_width: 1.0, opacity: 1.0 }
    }
}

impl Style {
    pub fn stroked(color: Rgba, width: f32) -> Self {
        Self { stroke: Some(color), stroke_width: width, ..Self::default() }
    }

    pub fn filled(color: Rgba) -> Self {
        Self { fill: Some(color), ..Self::default() }
    }
}

/// Hover behaviour attached to a point: grow and show `label` on enter,
/// shrink back and hide the tooltip on leave.
#[derive(Clone, Debug, PartialEq)]
pub struct Hover {
    pub label: String,
    pub rest_radius: f32,
    pub lifted_radius: f32,
    pub transition: Transition,
}

/// Drawing primitives consumed by the chart registry and the reconciler.
pub trait Surface {
    fn with_size(width: f32, height: f32) -> Self
    where
        Self: Sized;

    fn size(&self) -> (f32, f32);

    fn root(&self) -> NodeId;

    /// Append `shape` as the last (topmost) child of `parent`.
    fn append(&mut self, parent: NodeId, shape: Shape, style: Style) -> NodeId;

    /// Set an attribute immediately, cancelling any running tween on it.
    fn set(&mut self, node: NodeId, attr: Attr);

    /// Animate an attribute from its current value. Interrupts a running tween on the same attribute.
    fn animate(&mut self, node: NodeId, to: Attr, transition: Transition);

    fn set_text(&mut self, node: NodeId, content: &str);

    /// Remove a node and its children now.
    fn remove(&mut self, node: NodeId);

    /// Remove a node once `transition` has elapsed. A hovered node stops being hovered.
    fn remove_after(&mut self, node: NodeId, transition: Transition);

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn set_hover(&mut self, node: NodeId, hover: Hover);

    /// Node under the pointer whose hover-start has fired, if any.
    fn hovered(&self) -> Option<NodeId>;

    /// Route a pointer position: fires hover-end on the previously hovered
    /// node and hover-start on the node now under the pointer.
    fn pointer_move(&mut self, at: Point, tooltip: &mut dyn Tooltip);

    fn pointer_leave(&mut self, tooltip: &mut dyn Tooltip);
}
