// File: crates/songplot-core/src/transition.rs
// Summary: Transition timing (duration + easing) and attribute tweens on a surface timeline.

use crate::types::{lerp, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    #[default]
    CubicInOut,
}

impl Ease {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Duration in milliseconds and easing of an attribute change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub duration_ms: f32,
    pub ease: Ease,
}

impl Transition {
    pub const fn new(duration_ms: f32) -> Self {
        Self { duration_ms, ease: Ease::CubicInOut }
    }

    pub const fn instant() -> Self {
        Self { duration_ms: 0.0, ease: Ease::Linear }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// An animatable attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum Attr {
    Radius(f32),
    Opacity(f32),
    Center(Point),
    /// Vertices of a path or polyline.
    Points(Vec<Point>),
    /// Two endpoints of a line.
    Segment(Point, Point),
    /// Text anchor position.
    At(Point),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrKind {
    Radius,
    Opacity,
    Center,
    Points,
    Segment,
    At,
}

impl Attr {
    pub fn kind(&self) -> AttrKind {
        match self {
            Attr::Radius(_) => AttrKind::Radius,
            Attr::Opacity(_) => AttrKind::Opacity,
            Attr::Center(_) => AttrKind::Center,
            Attr::Points(_) => AttrKind::Points,
            Attr::Segment(..) => AttrKind::Segment,
            Attr::At(_) => AttrKind::At,
        }
    }

    /// Value between `self` (t = 0) and `to` (t = 1). Mismatched kinds jump to `to`.
    pub fn interpolate(&self, to: &Attr, t: f32) -> Attr {
        match (self, to) {
            (Attr::Radius(a), Attr::Radius(b)) => Attr::Radius(lerp(*a, *b, t)),
            (Attr::Opacity(a), Attr::Opacity(b)) => Attr::Opacity(lerp(*a, *b, t)),
            (Attr::Center(a), Attr::Center(b)) => Attr::Center(a.lerp(*b, t)),
            (Attr::At(a), Attr::At(b)) => Attr::At(a.lerp(*b, t)),
            (Attr::Segment(a0, a1), Attr::Segment(b0, b1)) => Attr::Segment(a0.lerp(*b0, t), a1.lerp(*b1, t)),
            (Attr::Points(a), Attr::Points(b)) => Attr::Points(lerp_points(a, b, t)),
            _ => to.clone(),
        }
    }
}

/// Vertex-wise interpolation. When the vertex counts differ, `from` is padded by
/// repeating its last vertex; an empty `from` jumps straight to `to`.
fn lerp_points(from: &[Point], to: &[Point], t: f32) -> Vec<Point> {
    let Some(last) = from.last() else {
        return to.to_vec();
    };
    to.iter()
        .enumerate()
        .map(|(i, b)| from.get(i).unwrap_or(last).lerp(*b, t))
        .collect()
}

/// A running attribute animation on the surface timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub from: Attr,
    pub to: Attr,
    pub start_ms: f32,
    pub transition: Transition,
}

impl Tween {
    pub fn end_ms(&self) -> f32 {
        self.start_ms + self.transition.duration_ms
    }

    /// Value at `now` and whether the tween has finished.
    pub fn sample(&self, now_ms: f32) -> (Attr, bool) {
        if self.transition.duration_ms <= 0.0 || now_ms >= self.end_ms() {
            return (self.to.clone(), true);
        }
        let t = ((now_ms - self.start_ms) / self.transition.duration_ms).max(0.0);
        (self.from.interpolate(&self.to, self.transition.ease.apply(t)), false)
    }
}
