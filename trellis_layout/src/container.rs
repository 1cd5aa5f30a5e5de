// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared container contract: content boxes, re-flow dispatch, subtree
//! embedding, and banner transitions.
//!
//! Both layout engines route through this module so that a container behaves
//! the same regardless of its discipline: embedding strips drag capability
//! from the subtree, re-geometry recurses into nested layout hosts, and leaf
//! widgets hear about it through a trickle-down [`EventKind::Resize`] so they
//! can recompute their internal fit.

use alloc::vec::Vec;
use kurbo::{Insets, Point, Rect, Vec2};
use trellis_scene::{Axis, AttachError, Banner, Event, EventKind, Kind, NodeFlags, NodeId, Tree};

use crate::{flow, grid};

/// The content box of a container: its frame shrunk by the container's own
/// padding, with the banner strip carved off the top while it shows.
#[must_use]
pub fn content_box(tree: &Tree, id: NodeId) -> Option<Rect> {
    let data = tree.data(id)?;
    let (padding, banner) = match &data.kind {
        Kind::Grid(g) => (g.padding, g.banner),
        Kind::Flow(f) => (f.padding, f.banner),
        _ => (Insets::ZERO, Banner::default()),
    };
    let mut content = data.frame - padding;
    if banner.showing() {
        content.y0 += banner.height;
    }
    Some(content)
}

/// Recompute every descendant's geometry from the container's current frame.
pub fn reflow(tree: &mut Tree, id: NodeId) {
    match tree.kind(id) {
        Some(Kind::Grid(_)) => grid::reflow(tree, id),
        Some(Kind::Flow(_)) => flow::reflow(tree, id),
        _ => {}
    }
}

/// Recompute geometry after a width change.
pub fn reflow_width(tree: &mut Tree, id: NodeId) {
    match tree.kind(id) {
        Some(Kind::Grid(_)) => grid::reflow(tree, id),
        Some(Kind::Flow(_)) => flow::reflow_width(tree, id),
        _ => {}
    }
}

/// Recompute geometry after a height change.
pub fn reflow_height(tree: &mut Tree, id: NodeId) {
    match tree.kind(id) {
        Some(Kind::Grid(_)) => grid::reflow(tree, id),
        Some(Kind::Flow(_)) => flow::reflow_height(tree, id),
        _ => {}
    }
}

/// Show the container's banner strip.
///
/// On a container whose vertical axis scrolls, every child shifts down by
/// the banner height (content keeps its scroll offset); otherwise the
/// content box shrinks and a full re-flow redistributes the children.
pub fn show_banner(tree: &mut Tree, id: NodeId) {
    set_banner_visible(tree, id, true);
}

/// Hide the container's banner strip. The inverse of [`show_banner`];
/// pinned banners stay visible.
pub fn hide_banner(tree: &mut Tree, id: NodeId) {
    set_banner_visible(tree, id, false);
}

fn set_banner_visible(tree: &mut Tree, id: NodeId, visible: bool) {
    let (was_showing, height, translate) = match tree.kind(id) {
        Some(Kind::Grid(g)) => (g.banner.showing(), g.banner.height, false),
        Some(Kind::Flow(f)) => (f.banner.showing(), f.banner.height, f.scrolls(Axis::Vertical)),
        _ => {
            tracing::warn!("banner: node is not a container, ignoring");
            return;
        }
    };
    match tree.kind_mut(id) {
        Some(Kind::Grid(g)) => g.banner.visible = visible,
        Some(Kind::Flow(f)) => f.banner.visible = visible,
        _ => return,
    }
    let now_showing = match tree.kind(id) {
        Some(Kind::Grid(g)) => g.banner.showing(),
        Some(Kind::Flow(f)) => f.banner.showing(),
        _ => return,
    };
    if now_showing == was_showing {
        return;
    }
    if translate {
        // Scrolling axis: a rigid shift preserves the scroll offset.
        let dy = if now_showing { height } else { -height };
        let children: Vec<NodeId> = tree.children_of(id).to_vec();
        for child in children {
            tree.translate_subtree(child, Vec2::new(0.0, dy));
        }
    } else {
        reflow(tree, id);
    }
}

/// Attach `child` into `parent` and strip drag capability from the embedded
/// subtree: cells and slots are positioned by their container, never by a
/// border or banner drag of their own.
pub(crate) fn embed(tree: &mut Tree, parent: NodeId, child: NodeId) -> Result<(), AttachError> {
    tree.attach(parent, child)?;
    tree.clear_flags_subtree(child, NodeFlags::RESIZABLE | NodeFlags::MOVABLE);
    Ok(())
}

/// Push a freshly computed geometry down a placed child: nested layout hosts
/// re-flow recursively, everything else is notified by trickle-down so leaf
/// widgets can recompute their internal fit.
pub(crate) fn propagate(tree: &mut Tree, child: NodeId, kind: EventKind) {
    if tree.kind(child).is_some_and(Kind::is_layout_host) {
        reflow(tree, child);
    } else {
        let origin = tree
            .frame(child)
            .map_or(Point::ZERO, |f| Point::new(f.x0, f.y0));
        let mut ev = Event::pointer(kind, origin, child);
        tree.dispatch_trickle(child, &mut ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use core::cell::Cell as CoreCell;
    use trellis_scene::{FlowState, GridState, NodeData, ScrollAxes};

    #[test]
    fn content_box_subtracts_padding_and_banner() {
        let mut tree = Tree::new();
        let grid = tree.insert(NodeData {
            frame: Rect::new(0.0, 0.0, 100.0, 100.0),
            kind: Kind::Grid(
                GridState::new(1, 1).with_padding(Insets::uniform(10.0)),
            ),
            ..NodeData::default()
        });
        assert_eq!(
            content_box(&tree, grid),
            Some(Rect::new(10.0, 10.0, 90.0, 90.0))
        );

        if let Some(Kind::Grid(state)) = tree.kind_mut(grid) {
            state.banner.height = 20.0;
            state.banner.pinned = true;
        }
        assert_eq!(
            content_box(&tree, grid),
            Some(Rect::new(10.0, 30.0, 90.0, 90.0))
        );
    }

    fn flow_with_banner(axis: Axis, height: f64) -> FlowState {
        let mut state = FlowState::new(axis);
        state.banner.height = height;
        state
    }

    #[test]
    fn banner_reflow_on_non_scrolling_container() {
        let mut tree = Tree::new();
        let flow = tree.insert(NodeData {
            frame: Rect::new(0.0, 0.0, 100.0, 100.0),
            kind: Kind::Flow(flow_with_banner(Axis::Vertical, 20.0)),
            ..NodeData::default()
        });
        let child = tree.insert(NodeData::default());
        crate::flow::add(&mut tree, flow, child, 1.0, Insets::ZERO);
        assert_eq!(tree.frame(child), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));

        show_banner(&mut tree, flow);
        // Content origin dropped by the banner height and the weighted
        // extent compressed to fit.
        assert_eq!(tree.frame(child), Some(Rect::new(0.0, 20.0, 100.0, 100.0)));

        hide_banner(&mut tree, flow);
        assert_eq!(tree.frame(child), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn banner_translates_children_on_scrolling_container() {
        let mut tree = Tree::new();
        let flow = tree.insert(NodeData {
            frame: Rect::new(0.0, 0.0, 100.0, 100.0),
            kind: Kind::Flow(flow_with_banner(Axis::Vertical, 20.0).with_scroll(ScrollAxes::Y)),
            ..NodeData::default()
        });
        let child = tree.insert(NodeData {
            frame: Rect::new(0.0, 0.0, 80.0, 60.0),
            ..NodeData::default()
        });
        crate::flow::add(&mut tree, flow, child, 1.0, Insets::ZERO);
        let before = tree.frame(child).unwrap();

        show_banner(&mut tree, flow);
        let after = tree.frame(child).unwrap();
        assert_eq!(after.y0, before.y0 + 20.0, "rigid shift, no compression");
        assert_eq!(after.height(), before.height());

        hide_banner(&mut tree, flow);
        assert_eq!(tree.frame(child), Some(before));
    }

    #[test]
    fn pinned_banner_ignores_hide() {
        let mut tree = Tree::new();
        let grid = tree.insert(NodeData {
            frame: Rect::new(0.0, 0.0, 100.0, 100.0),
            kind: Kind::Grid(GridState::new(1, 1)),
            ..NodeData::default()
        });
        if let Some(Kind::Grid(state)) = tree.kind_mut(grid) {
            state.banner.height = 20.0;
            state.banner.pinned = true;
        }
        let child = tree.insert(NodeData::default());
        crate::grid::add(&mut tree, grid, child, 0, 0, 1, 1, Insets::ZERO);
        assert_eq!(tree.frame(child), Some(Rect::new(0.0, 20.0, 100.0, 100.0)));

        hide_banner(&mut tree, grid);
        assert_eq!(
            tree.frame(child),
            Some(Rect::new(0.0, 20.0, 100.0, 100.0)),
            "pinned banners keep their space"
        );
    }

    #[test]
    fn leaf_children_hear_resize_via_trickle_down() {
        let mut tree = Tree::new();
        let grid = tree.insert(NodeData {
            frame: Rect::new(0.0, 0.0, 100.0, 100.0),
            kind: Kind::Grid(GridState::new(1, 1)),
            ..NodeData::default()
        });
        let leaf = tree.insert(NodeData::default());
        let grand = tree.insert(NodeData::default());
        tree.attach(leaf, grand).unwrap();

        let count = Rc::new(CoreCell::new(0));
        let seen = Rc::clone(&count);
        tree.add_listener(
            grand,
            EventKind::Resize,
            Box::new(move |_| seen.set(seen.get() + 1)),
        );
        crate::grid::add(&mut tree, grid, leaf, 0, 0, 1, 1, Insets::ZERO);
        assert_eq!(count.get(), 1, "broadcast reaches grandchildren");
    }
}
