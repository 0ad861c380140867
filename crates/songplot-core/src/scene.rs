// File: crates/songplot-core/src/scene.rs
// Summary: Headless retained scene implementing `Surface`; owns the transition timeline.
// Notes:
// - Time only moves through `advance`/`settle`, so tests drive animations deterministically.
// - A node scheduled for removal stays visible (and animating) until its removal time.

use std::collections::BTreeMap;

use log::trace;

use crate::surface::{Hover, NodeId, Shape, Style, Surface};
use crate::tooltip::Tooltip;
use crate::transition::{Attr, AttrKind, Transition, Tween};
use crate::types::Point;

#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub shape: Shape,
    pub style: Style,
    pub hover: Option<Hover>,
    children: Vec<NodeId>,
    tweens: Vec<Tween>,
    remove_at: Option<f32>,
}

impl Node {
    fn new(parent: Option<NodeId>, shape: Shape, style: Style) -> Self {
        Self { parent, shape, style, hover: None, children: Vec::new(), tweens: Vec::new(), remove_at: None }
    }

    pub fn is_leaving(&self) -> bool {
        self.remove_at.is_some()
    }

    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    fn read(&self, kind: AttrKind) -> Option<Attr> {
        match (kind, &self.shape) {
            (AttrKind::Opacity, _) => Some(Attr::Opacity(self.style.opacity)),
            (AttrKind::Radius, Shape::Circle { radius, .. }) => Some(Attr::Radius(*radius)),
            (AttrKind::Center, Shape::Circle { center, .. }) => Some(Attr::Center(*center)),
            (AttrKind::Points, Shape::Path { points, .. }) => Some(Attr::Points(points.clone())),
            (AttrKind::Segment, Shape::Line { from, to }) => Some(Attr::Segment(*from, *to)),
            (AttrKind::At, Shape::Text { at, .. }) => Some(Attr::At(*at)),
            _ => None,
        }
    }

    fn write(&mut self, attr: Attr) {
        match (attr, &mut self.shape) {
            (Attr::Opacity(o), _) => self.style.opacity = o.clamp(0.0, 1.0),
            (Attr::Radius(r), Shape::Circle { radius, .. }) => *radius = r.max(0.0),
            (Attr::Center(p), Shape::Circle { center, .. }) => *center = p,
            (Attr::Points(p), Shape::Path { points, .. }) => *points = p,
            (Attr::Segment(a, b), Shape::Line { from, to }) => {
                *from = a;
                *to = b;
            }
            (Attr::At(p), Shape::Text { at, .. }) => *at = p,
            (attr, shape) => trace!("ignoring {:?} on {:?}", attr.kind(), shape),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    width: f32,
    height: f32,
    nodes: BTreeMap<NodeId, Node>,
    next_id: u32,
    now_ms: f32,
    hovered: Option<NodeId>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(NodeId(0), Node::new(None, Shape::Group, Style::default()));
        Self { width, height, nodes, next_id: 1, now_ms: 0.0, hovered: None }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn now_ms(&self) -> f32 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Any tween still running or removal still scheduled.
    pub fn is_busy(&self) -> bool {
        self.nodes.values().any(|n| n.is_animating() || n.is_leaving())
    }

    /// Move the timeline forward: apply tweens, then drop nodes whose removal time has come.
    pub fn advance(&mut self, ms: f32) {
        self.now_ms += ms.max(0.0);
        let now = self.now_ms;
        for node in self.nodes.values_mut() {
            if node.tweens.is_empty() {
                continue;
            }
            let mut done = Vec::new();
            let mut values = Vec::with_capacity(node.tweens.len());
            for (i, tw) in node.tweens.iter().enumerate() {
                let (v, finished) = tw.sample(now);
                values.push(v);
                if finished {
                    done.push(i);
                }
            }
            for v in values {
                node.write(v);
            }
            for i in done.into_iter().rev() {
                node.tweens.remove(i);
            }
        }
        let expired: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.remove_at.is_some_and(|t| t <= now))
            .map(|(id, _)| *id)
            .collect();
        for id in expired {
            self.remove(id);
        }
    }

    /// Jump every running transition to its end and perform pending removals.
    pub fn settle(&mut self) {
        let end = self
            .nodes
            .values()
            .flat_map(|n| n.tweens.iter().map(Tween::end_ms).chain(n.remove_at))
            .fold(self.now_ms, f32::max);
        self.advance(end - self.now_ms);
    }

    /// Node ids in painter's order (parents before children, siblings in insertion order).
    pub fn draw_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId(0)];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else { continue };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Topmost hoverable circle under `at` that is not on its way out.
    pub fn hit_test(&self, at: Point) -> Option<NodeId> {
        self.draw_order().into_iter().rev().find(|id| {
            let Some(node) = self.nodes.get(id) else { return false };
            if node.hover.is_none() || node.is_leaving() {
                return false;
            }
            match node.shape {
                Shape::Circle { center, radius } => center.distance(at) <= radius.max(1.0) + 1.0,
                _ => false,
            }
        })
    }

    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn hover_end(&mut self, id: NodeId, tooltip: &mut dyn Tooltip) {
        // a leaving node keeps its exit tween
        if let Some(h) = self.nodes.get(&id).filter(|n| !n.is_leaving()).and_then(|n| n.hover.clone()) {
            self.animate(id, Attr::Radius(h.rest_radius), h.transition);
        }
        tooltip.hide();
    }

    fn hover_start(&mut self, id: NodeId, at: Point, tooltip: &mut dyn Tooltip) {
        if let Some(h) = self.nodes.get(&id).and_then(|n| n.hover.clone()) {
            self.animate(id, Attr::Radius(h.lifted_radius), h.transition);
            tooltip.show(&h.label, at);
        }
    }
}

impl Surface for Scene {
    fn with_size(width: f32, height: f32) -> Self {
        Scene::new(width, height)
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn append(&mut self, parent: NodeId, shape: Shape, style: Style) -> NodeId {
        let id = self.alloc();
        let parent = if self.nodes.contains_key(&parent) { parent } else { NodeId(0) };
        self.nodes.insert(id, Node::new(Some(parent), shape, style));
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        id
    }

    fn set(&mut self, node: NodeId, attr: Attr) {
        if let Some(n) = self.nodes.get_mut(&node) {
            let kind = attr.kind();
            n.tweens.retain(|t| t.to.kind() != kind);
            n.write(attr);
        }
    }

    fn animate(&mut self, node: NodeId, to: Attr, transition: Transition) {
        let now = self.now_ms;
        let Some(n) = self.nodes.get_mut(&node) else { return };
        let kind = to.kind();
        let Some(from) = n.read(kind) else {
            trace!("node {:?} has no {:?} attribute", node, kind);
            return;
        };
        n.tweens.retain(|t| t.to.kind() != kind);
        if transition.duration_ms <= 0.0 {
            n.write(to);
            return;
        }
        n.tweens.push(Tween { from, to, start_ms: now, transition });
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(Node { shape: Shape::Text { content, .. }, .. }) = self.nodes.get_mut(&node) {
            *content = text.to_string();
        }
    }

    fn remove(&mut self, node: NodeId) {
        if node == NodeId(0) {
            return;
        }
        let Some(n) = self.nodes.remove(&node) else { return };
        if let Some(parent) = n.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != node);
        }
        if self.hovered == Some(node) {
            self.hovered = None;
        }
        for child in n.children {
            self.remove(child);
        }
    }

    fn remove_after(&mut self, node: NodeId, transition: Transition) {
        let at = self.now_ms + transition.duration_ms.max(0.0);
        if let Some(n) = self.nodes.get_mut(&node) {
            n.remove_at = Some(at);
        }
        if self.hovered == Some(node) {
            self.hovered = None;
        }
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.get(&node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn set_hover(&mut self, node: NodeId, hover: Hover) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.hover = Some(hover);
        }
    }

    fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    fn pointer_move(&mut self, at: Point, tooltip: &mut dyn Tooltip) {
        let hit = self.hit_test(at);
        if hit == self.hovered {
            return;
        }
        if let Some(old) = self.hovered.take() {
            self.hover_end(old, tooltip);
        }
        if let Some(new) = hit {
            self.hover_start(new, at, tooltip);
            self.hovered = Some(new);
        }
    }

    fn pointer_leave(&mut self, tooltip: &mut dyn Tooltip) {
        if let Some(old) = self.hovered.take() {
            self.hover_end(old, tooltip);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tooltip::FloatingTooltip;

    fn circle(scene: &mut Scene, at: Point) -> NodeId {
        let root = scene.root();
        scene.append(root, Shape::Circle { center: at, radius: 3.0 }, Style::default())
    }

    fn radius(scene: &Scene, id: NodeId) -> f32 {
        match scene.node(id).unwrap().shape {
            Shape::Circle { radius, .. } => radius,
            _ => panic!("not a circle"),
        }
    }

    #[test]
    fn animate_then_settle_reaches_target() {
        let mut s = Scene::new(100.0, 100.0);
        let c = circle(&mut s, Point::new(10.0, 10.0));
        s.animate(c, Attr::Radius(9.0), Transition::new(300.0));
        assert!(s.is_busy());
        s.advance(150.0);
        let mid = radius(&s, c);
        assert!(mid > 3.0 && mid < 9.0);
        s.settle();
        assert_eq!(radius(&s, c), 9.0);
        assert!(!s.is_busy());
    }

    #[test]
    fn interrupt_starts_from_current_value() {
        let mut s = Scene::new(100.0, 100.0);
        let c = circle(&mut s, Point::new(10.0, 10.0));
        s.animate(c, Attr::Radius(13.0), Transition::new(100.0).with_ease(crate::transition::Ease::Linear));
        s.advance(50.0);
        assert_eq!(radius(&s, c), 8.0);
        s.animate(c, Attr::Radius(0.0), Transition::new(100.0).with_ease(crate::transition::Ease::Linear));
        s.advance(50.0);
        assert_eq!(radius(&s, c), 4.0);
    }

    #[test]
    fn remove_after_keeps_node_until_transition_ends() {
        let mut s = Scene::new(100.0, 100.0);
        let root = s.root();
        let g = s.append(root, Shape::Group, Style::default());
        let c = s.append(g, Shape::Circle { center: Point::new(1.0, 1.0), radius: 3.0 }, Style::default());
        s.remove_after(g, Transition::new(200.0));
        s.advance(100.0);
        assert!(s.contains(g) && s.contains(c));
        s.advance(100.0);
        assert!(!s.contains(g));
        assert!(!s.contains(c), "children go with their parent");
        assert!(s.children(root).is_empty());
    }

    #[test]
    fn draw_order_is_depth_first_insertion_order() {
        let mut s = Scene::new(100.0, 100.0);
        let root = s.root();
        let a = s.append(root, Shape::Group, Style::default());
        let b = s.append(root, Shape::Group, Style::default());
        let a1 = s.append(a, Shape::Group, Style::default());
        assert_eq!(s.draw_order(), vec![root, a, a1, b]);
    }

    #[test]
    fn hover_grows_point_and_shows_tooltip() {
        let mut s = Scene::new(100.0, 100.0);
        let c = circle(&mut s, Point::new(50.0, 50.0));
        s.set_hover(c, Hover {
            label: "Help!".into(),
            rest_radius: 3.0,
            lifted_radius: 6.0,
            transition: Transition::new(100.0),
        });
        let mut tip = FloatingTooltip::new();

        s.pointer_move(Point::new(51.0, 50.0), &mut tip);
        assert_eq!(s.hovered(), Some(c));
        assert_eq!(tip.text(), Some("Help!"));
        s.settle();
        assert_eq!(radius(&s, c), 6.0);

        s.pointer_move(Point::new(90.0, 90.0), &mut tip);
        assert!(!tip.is_visible());
        s.settle();
        assert_eq!(radius(&s, c), 3.0);
    }

    #[test]
    fn leaving_points_are_not_hit() {
        let mut s = Scene::new(100.0, 100.0);
        let c = circle(&mut s, Point::new(50.0, 50.0));
        s.set_hover(c, Hover {
            label: "x".into(),
            rest_radius: 3.0,
            lifted_radius: 6.0,
            transition: Transition::new(100.0),
        });
        assert_eq!(s.hit_test(Point::new(50.0, 50.0)), Some(c));
        s.remove_after(c, Transition::new(100.0));
        assert_eq!(s.hit_test(Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn hovered_point_that_exits_keeps_shrinking() {
        let mut s = Scene::new(100.0, 100.0);
        let c = circle(&mut s, Point::new(50.0, 50.0));
        s.set_hover(c, Hover {
            label: "Revolution 9".into(),
            rest_radius: 3.0,
            lifted_radius: 6.0,
            transition: Transition::new(150.0),
        });
        let mut tip = FloatingTooltip::new();
        s.pointer_move(Point::new(50.0, 50.0), &mut tip);
        s.settle();

        let exit = Transition::new(250.0);
        s.animate(c, Attr::Radius(0.0), exit);
        s.remove_after(c, exit);
        assert_eq!(s.hovered(), None);

        s.advance(50.0);
        let before = radius(&s, c);
        s.pointer_move(Point::new(50.0, 50.0), &mut tip);
        s.advance(100.0);
        assert!(radius(&s, c) < before, "exit tween was replaced");
        s.settle();
        assert!(!s.contains(c));
    }

    #[test]
    fn hover_end_on_a_leaving_node_only_hides_the_tooltip() {
        let mut s = Scene::new(100.0, 100.0);
        let c = circle(&mut s, Point::new(50.0, 50.0));
        s.set_hover(c, Hover {
            label: "x".into(),
            rest_radius: 3.0,
            lifted_radius: 6.0,
            transition: Transition::new(100.0),
        });
        let mut tip = FloatingTooltip::new();
        s.pointer_move(Point::new(50.0, 50.0), &mut tip);
        s.settle();
        s.animate(c, Attr::Radius(0.0), Transition::new(200.0));
        s.nodes.get_mut(&c).unwrap().remove_at = Some(s.now_ms + 200.0);

        s.pointer_leave(&mut tip);
        assert!(!tip.is_visible());
        s.advance(150.0);
        assert!(radius(&s, c) < 1.0, "still heading for zero");
        s.advance(50.0);
        assert!(!s.contains(c));
    }
}
