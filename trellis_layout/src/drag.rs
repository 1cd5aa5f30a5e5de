// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag resize/reposition with an ephemeral proxy.
//!
//! A press near a container border begins a resize; a press in its banner
//! strip begins a reposition. In optimised mode a transient [`Kind::Proxy`]
//! sibling of identical geometry is installed as the router's capture target
//! and every drag sample mutates only the proxy; the real container adopts
//! the proxy's final frame once, on release, and re-flows once. Non-optimised
//! mode mutates the real container and re-flows on every sample — the same
//! result at a higher cost.

use kurbo::{Point, Rect, Size, Vec2};
use trellis_router::{ActiveTarget, InputState, Router};
use trellis_scene::{Event, EventKind, Kind, NodeData, NodeFlags, NodeId, Tree};

use crate::container;

/// Which border a resize drag grabbed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    /// The left border.
    Left,
    /// The right border.
    Right,
    /// The top border.
    Top,
    /// The bottom border.
    Bottom,
}

/// What a drag interaction does to its container.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragMode {
    /// Move one border, clamped to the container's effective minimum size.
    Resize(Edge),
    /// Translate the whole container.
    Reposition,
}

/// Tunables for drag interactions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragConfig {
    /// Route drags through an ephemeral proxy, committing once on release.
    pub optimised: bool,
    /// How close to a border a press counts as grabbing it.
    pub border_threshold: f64,
    /// Height of the banner strip that accepts reposition drags.
    pub banner_height: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            optimised: true,
            border_threshold: 6.0,
            banner_height: 18.0,
        }
    }
}

/// Classify a point near the outer bounds of `id` as an edge grab.
///
/// Inside the threshold band of two edges at once (a corner), the nearer
/// edge wins.
#[must_use]
pub fn hit_edge(tree: &Tree, id: NodeId, point: Point, threshold: f64) -> Option<Edge> {
    let outer = tree.outer_bounds(id)?;
    if !outer.inflate(threshold, threshold).contains(point) {
        return None;
    }
    let candidates = [
        (Edge::Left, (point.x - outer.x0).abs()),
        (Edge::Right, (point.x - outer.x1).abs()),
        (Edge::Top, (point.y - outer.y0).abs()),
        (Edge::Bottom, (point.y - outer.y1).abs()),
    ];
    candidates
        .into_iter()
        .filter(|(_, d)| *d <= threshold)
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal))
        .map(|(edge, _)| edge)
}

/// Whether a point falls in the banner strip at the top of `id`'s frame.
#[must_use]
pub fn in_banner_region(tree: &Tree, id: NodeId, point: Point, height: f64) -> bool {
    tree.frame(id).is_some_and(|f| {
        Rect::new(f.x0, f.y0, f.x1, f.y0 + height).contains(point)
    })
}

/// One in-flight drag interaction.
///
/// Create with [`DragInteraction::begin`], feed pointer samples through
/// [`DragInteraction::update`], and commit with [`DragInteraction::finish`].
#[derive(Debug)]
pub struct DragInteraction {
    container: NodeId,
    proxy: Option<NodeId>,
    mode: DragMode,
    last: Point,
}

impl DragInteraction {
    /// Begin a drag on `container`.
    ///
    /// Refuses (logged, `None`) when the container lacks the capability for
    /// the requested mode — embedded subtrees have theirs stripped. In
    /// optimised mode this inserts the proxy next to the container and makes
    /// it the router's active element, so capture feeds it every sample.
    pub fn begin(
        tree: &mut Tree,
        router: &mut Router,
        container: NodeId,
        mode: DragMode,
        input: &InputState,
        config: &DragConfig,
    ) -> Option<Self> {
        let flags = tree.flags(container);
        let allowed = match mode {
            DragMode::Resize(_) => flags.contains(NodeFlags::RESIZABLE),
            DragMode::Reposition => flags.contains(NodeFlags::MOVABLE),
        };
        if !allowed || !tree.is_alive(container) {
            tracing::warn!("drag: node does not permit this interaction, ignoring");
            return None;
        }

        let proxy = if config.optimised {
            // The swap is two steps; Reserved marks the gap where the active
            // element is neither the container nor yet the proxy.
            router.set_active(ActiveTarget::Reserved);
            let (frame, margin, corner_radius) = {
                let source = tree.data(container)?;
                (source.frame, source.margin, source.corner_radius)
            };
            let stand_in = tree.insert(NodeData {
                kind: Kind::Proxy,
                frame,
                margin,
                corner_radius,
                flags: NodeFlags::empty(),
                ..NodeData::default()
            });
            match tree.parent_of(container) {
                Some(parent) => {
                    let _ = tree.attach(parent, stand_in);
                }
                None => {
                    let _ = tree.add_layer(stand_in);
                }
            }
            Some(stand_in)
        } else {
            None
        };
        router.set_active(ActiveTarget::Node(proxy.unwrap_or(container)));

        Some(Self {
            container,
            proxy,
            mode,
            last: input.pointer,
        })
    }

    /// The node receiving drag geometry: the proxy, or the container itself
    /// in non-optimised mode.
    #[must_use]
    pub fn target(&self) -> NodeId {
        self.proxy.unwrap_or(self.container)
    }

    /// Apply one drag sample.
    ///
    /// Optimised: only the proxy's frame changes. Non-optimised: the real
    /// container changes and re-flows immediately.
    pub fn update(&mut self, tree: &mut Tree, input: &InputState) {
        let delta = input.pointer - self.last;
        self.last = input.pointer;
        match self.proxy {
            Some(proxy) => {
                let Some(frame) = tree.frame(proxy) else {
                    return;
                };
                let min = tree.effective_min_size(self.container);
                tree.set_frame(proxy, apply_delta(frame, self.mode, delta, min));
            }
            None => {
                self.apply_direct(tree, delta);
            }
        }
    }

    /// Commit the interaction: the container adopts the proxy's final
    /// geometry, re-flows once, becomes the active element again, and the
    /// proxy is destroyed.
    pub fn finish(self, tree: &mut Tree, router: &mut Router) {
        if let Some(proxy) = self.proxy {
            if let (Some(final_frame), Some(current)) =
                (tree.frame(proxy), tree.frame(self.container))
            {
                match self.mode {
                    DragMode::Resize(_) => {
                        tree.set_frame(self.container, final_frame);
                        container::reflow(tree, self.container);
                        self.notify(tree, EventKind::Resize);
                    }
                    DragMode::Reposition => {
                        let delta = Point::new(final_frame.x0, final_frame.y0)
                            - Point::new(current.x0, current.y0);
                        tree.translate_subtree(self.container, delta);
                        container::reflow(tree, self.container);
                        self.notify(tree, EventKind::Reposition);
                    }
                }
            }
            router.set_active(ActiveTarget::Node(self.container));
            tree.remove(proxy);
        }
    }

    fn apply_direct(&self, tree: &mut Tree, delta: Vec2) {
        match self.mode {
            DragMode::Resize(_) => {
                let Some(frame) = tree.frame(self.container) else {
                    return;
                };
                let min = tree.effective_min_size(self.container);
                tree.set_frame(self.container, apply_delta(frame, self.mode, delta, min));
                container::reflow(tree, self.container);
                self.notify(tree, EventKind::Resize);
            }
            DragMode::Reposition => {
                tree.translate_subtree(self.container, delta);
                container::reflow(tree, self.container);
                self.notify(tree, EventKind::Reposition);
            }
        }
    }

    fn notify(&self, tree: &mut Tree, kind: EventKind) {
        let origin = tree
            .frame(self.container)
            .map_or(Point::ZERO, |f| Point::new(f.x0, f.y0));
        let mut ev = Event::pointer(kind, origin, self.container);
        tree.dispatch_trickle(self.container, &mut ev);
    }
}

/// Move one border (or the whole frame) by `delta`, keeping the frame at
/// least `min` in both extents.
fn apply_delta(frame: Rect, mode: DragMode, delta: Vec2, min: Size) -> Rect {
    let mut f = frame;
    match mode {
        DragMode::Resize(Edge::Left) => f.x0 = (f.x0 + delta.x).min(f.x1 - min.width),
        DragMode::Resize(Edge::Right) => f.x1 = (f.x1 + delta.x).max(f.x0 + min.width),
        DragMode::Resize(Edge::Top) => f.y0 = (f.y0 + delta.y).min(f.y1 - min.height),
        DragMode::Resize(Edge::Bottom) => f.y1 = (f.y1 + delta.y).max(f.y0 + min.height),
        DragMode::Reposition => f = f + delta,
    }
    f
}
