// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The weighted linear/scroll engine.
//!
//! A flow container stacks its children along an alignment axis. Child order
//! is the child list itself; a parallel slot array carries each child's
//! weight and padding. On a non-scrolling axis the weighted fractions
//! compress children to fit the content box; on a scrolling axis children
//! keep their natural extent and discrete scroll steps translate the whole
//! content instead.
//!
//! ## Extremal-child caches
//!
//! While a scroll axis is enabled the container tracks the indices of its
//! leftmost/rightmost/topmost/deepest children so scroll boundary checks are
//! O(1). The caches update incrementally on insert by comparing only the
//! appended child against the current extremum — never a full rescan.
//! **Removal does not correct them**: after a removal the cached indices may
//! address a different child entirely until [`refresh_extremes`] runs. This
//! is a deliberately preserved limitation of the scroll model, not an
//! oversight; scroll stepping therefore treats an out-of-range cache as "no
//! tracked extremum" and declines to move.

use alloc::vec::Vec;
use kurbo::{Insets, Rect, Vec2};
use trellis_scene::{Axis, EventKind, Extremes, FlowSlot, FlowState, Kind, NodeId, Tree};

use crate::container;

/// Append `child` to the flow with a proportional `weight` and per-slot
/// padding.
///
/// Fails as a logged no-op on a stale child, a child already present in this
/// tree, a non-positive weight, or a duplicate identifier (the attach is
/// atomic). On success the embedded subtree loses drag capability, the flow
/// re-flows, and — while a scroll axis is enabled — the extremal caches are
/// updated against the appended child alone.
pub fn add(tree: &mut Tree, container: NodeId, child: NodeId, weight: f64, pad: Insets) {
    let Some(Kind::Flow(_)) = tree.kind(container) else {
        tracing::warn!("flow add: node is not a flow container, ignoring");
        return;
    };
    if !tree.is_alive(child) {
        tracing::warn!("flow add: stale child id, ignoring");
        return;
    }
    if weight <= 0.0 {
        tracing::warn!("flow add: weight must be positive, got {weight}, ignoring");
        return;
    }
    let top = tree.subtree_root(container);
    if child == top || tree.is_descendant_of(child, top) {
        tracing::warn!("flow add: child is already present in this tree, ignoring");
        return;
    }
    if let Err(err) = container::embed(tree, container, child) {
        tracing::warn!("flow add: {err}, ignoring");
        return;
    }
    if let Some(Kind::Flow(state)) = tree.kind_mut(container) {
        state.slots.push(FlowSlot { weight, pad });
        state.total_weight += weight;
    }
    reflow(tree, container);
    note_appended(tree, container);
}

/// Remove `child` from the flow: its slot and weight leave the parallel
/// arrays, the subtree detaches (staying alive), and the flow re-flows.
///
/// The extremal caches are intentionally left as they are; see the module
/// docs.
pub fn remove(tree: &mut Tree, container: NodeId, child: NodeId) {
    let Some(Kind::Flow(_)) = tree.kind(container) else {
        tracing::warn!("flow remove: node is not a flow container, ignoring");
        return;
    };
    let Some(index) = tree.children_of(container).iter().position(|&c| c == child) else {
        tracing::warn!("flow remove: child is not in this flow, ignoring");
        return;
    };
    if let Some(Kind::Flow(state)) = tree.kind_mut(container) {
        if index < state.slots.len() {
            let slot = state.slots.remove(index);
            state.total_weight -= slot.weight;
        }
    }
    tree.detach(child);
    reflow(tree, container);
}

/// Recompute both axes and notify the children.
pub fn reflow(tree: &mut Tree, id: NodeId) {
    layout_axis(tree, id, Axis::Horizontal);
    layout_axis(tree, id, Axis::Vertical);
    notify(tree, id);
}

/// Recompute the horizontal axis only (after a width change).
pub fn reflow_width(tree: &mut Tree, id: NodeId) {
    layout_axis(tree, id, Axis::Horizontal);
    notify(tree, id);
}

/// Recompute the vertical axis only (after a height change).
pub fn reflow_height(tree: &mut Tree, id: NodeId) {
    layout_axis(tree, id, Axis::Vertical);
    notify(tree, id);
}

/// Step the content up: a no-op unless the topmost tracked child starts
/// above the padded content box.
pub fn scroll_up(tree: &mut Tree, id: NodeId) {
    scroll_step(tree, id, Axis::Vertical, -1.0);
}

/// Step the content down: a no-op when the deepest tracked child's trailing
/// edge is already within the padded content box.
pub fn scroll_down(tree: &mut Tree, id: NodeId) {
    scroll_step(tree, id, Axis::Vertical, 1.0);
}

/// Step the content left: a no-op unless the leftmost tracked child starts
/// left of the padded content box.
pub fn scroll_left(tree: &mut Tree, id: NodeId) {
    scroll_step(tree, id, Axis::Horizontal, -1.0);
}

/// Step the content right: a no-op when the rightmost tracked child's
/// trailing edge is already within the padded content box.
pub fn scroll_right(tree: &mut Tree, id: NodeId) {
    scroll_step(tree, id, Axis::Horizontal, 1.0);
}

/// Rebuild the extremal caches with a full scan.
///
/// The explicit recovery from post-removal staleness; never called
/// implicitly.
pub fn refresh_extremes(tree: &mut Tree, id: NodeId) {
    let Some(Kind::Flow(_)) = tree.kind(id) else {
        return;
    };
    let children = tree.children_of(id);
    let mut extremes = Extremes::default();
    for (i, &child) in children.iter().enumerate() {
        let Some(ob) = tree.outer_bounds(child) else {
            continue;
        };
        if extreme_bounds(tree, children, extremes.left).is_none_or(|b| ob.x0 < b.x0) {
            extremes.left = Some(i);
        }
        if extreme_bounds(tree, children, extremes.right).is_none_or(|b| ob.x1 > b.x1) {
            extremes.right = Some(i);
        }
        if extreme_bounds(tree, children, extremes.top).is_none_or(|b| ob.y0 < b.y0) {
            extremes.top = Some(i);
        }
        if extreme_bounds(tree, children, extremes.bottom).is_none_or(|b| ob.y1 > b.y1) {
            extremes.bottom = Some(i);
        }
    }
    if let Some(Kind::Flow(state)) = tree.kind_mut(id) {
        state.extremes = extremes;
    }
}

// --- internals ---

/// One axis pass. Placement along an axis is stacked when the axis is the
/// alignment axis or scrolls; extent along a stacked axis is the weighted
/// fraction unless the axis scrolls, in which case the child keeps its
/// natural extent and overflow is handled purely by offset.
fn layout_axis(tree: &mut Tree, id: NodeId, axis: Axis) {
    let state = match tree.kind(id) {
        Some(Kind::Flow(state)) => state.clone(),
        _ => return,
    };
    let Some(content) = container::content_box(tree, id) else {
        return;
    };
    let children: Vec<NodeId> = tree.children_of(id).to_vec();
    let stacked = axis == state.axis || state.scrolls(axis);
    let scrolls = state.scrolls(axis);
    let (lead, avail) = match axis {
        Axis::Horizontal => (content.x0, content.width()),
        Axis::Vertical => (content.y0, content.height()),
    };
    let mut cursor = lead;
    for (i, &child) in children.iter().enumerate() {
        let slot = state.slots.get(i).copied().unwrap_or(FlowSlot {
            weight: 1.0,
            pad: Insets::ZERO,
        });
        let margin = tree.margin(child);
        let frame = tree.frame(child).unwrap_or(Rect::ZERO);
        let (pad_lead, pad_trail, m_lead, m_trail, natural) = match axis {
            Axis::Horizontal => (slot.pad.x0, slot.pad.x1, margin.x0, margin.x1, frame.width()),
            Axis::Vertical => (slot.pad.y0, slot.pad.y1, margin.y0, margin.y1, frame.height()),
        };
        let extent = if scrolls {
            natural
        } else if axis == state.axis {
            let share = if state.total_weight > 0.0 {
                slot.weight / state.total_weight * avail
            } else {
                0.0
            };
            (share - pad_lead - pad_trail - m_lead - m_trail).max(0.0)
        } else {
            (avail - pad_lead - pad_trail - m_lead - m_trail).max(0.0)
        };
        let pos = if stacked {
            cursor + pad_lead + m_lead
        } else {
            lead + pad_lead + m_lead
        };
        let new_frame = match axis {
            Axis::Horizontal => Rect::new(pos, frame.y0, pos + extent, frame.y1),
            Axis::Vertical => Rect::new(frame.x0, pos, frame.x1, pos + extent),
        };
        tree.set_frame(child, new_frame);
        if stacked {
            cursor = pos + extent + m_trail + pad_trail;
        }
    }
}

fn notify(tree: &mut Tree, id: NodeId) {
    let children: Vec<NodeId> = tree.children_of(id).to_vec();
    for child in children {
        container::propagate(tree, child, EventKind::Resize);
    }
}

/// O(1) extremal-cache update against the just-appended child.
fn note_appended(tree: &mut Tree, container: NodeId) {
    let Some(Kind::Flow(state)) = tree.kind(container) else {
        return;
    };
    if state.scroll.is_empty() {
        return;
    }
    let mut extremes = state.extremes;
    let children = tree.children_of(container);
    let Some(index) = children.len().checked_sub(1) else {
        return;
    };
    let Some(ob) = tree.outer_bounds(children[index]) else {
        return;
    };
    if extreme_bounds(tree, children, extremes.left).is_none_or(|b| ob.x0 < b.x0) {
        extremes.left = Some(index);
    }
    if extreme_bounds(tree, children, extremes.right).is_none_or(|b| ob.x1 > b.x1) {
        extremes.right = Some(index);
    }
    if extreme_bounds(tree, children, extremes.top).is_none_or(|b| ob.y0 < b.y0) {
        extremes.top = Some(index);
    }
    if extreme_bounds(tree, children, extremes.bottom).is_none_or(|b| ob.y1 > b.y1) {
        extremes.bottom = Some(index);
    }
    if let Some(Kind::Flow(state)) = tree.kind_mut(container) {
        state.extremes = extremes;
    }
}

fn extreme_bounds(tree: &Tree, children: &[NodeId], index: Option<usize>) -> Option<Rect> {
    children
        .get(index?)
        .and_then(|&child| tree.outer_bounds(child))
}

fn scroll_step(tree: &mut Tree, id: NodeId, axis: Axis, dir: f64) {
    let state = match tree.kind(id) {
        Some(Kind::Flow(state)) => state.clone(),
        _ => {
            tracing::warn!("scroll: node is not a flow container, ignoring");
            return;
        }
    };
    if !state.scrolls(axis) {
        tracing::warn!("scroll: axis is not scroll-enabled, ignoring");
        return;
    }
    let Some(content) = container::content_box(tree, id) else {
        return;
    };
    let children: Vec<NodeId> = tree.children_of(id).to_vec();
    if children.is_empty() {
        return;
    }
    let forward = dir > 0.0;
    let guard_index = match (axis, forward) {
        (Axis::Vertical, true) => state.extremes.bottom,
        (Axis::Vertical, false) => state.extremes.top,
        (Axis::Horizontal, true) => state.extremes.right,
        (Axis::Horizontal, false) => state.extremes.left,
    };
    // A stale cache may point past the child list after removals; with no
    // valid tracked extremum the boundary is unknowable, so stay put.
    let Some(guard) = extreme_bounds(tree, &children, guard_index) else {
        return;
    };
    let within = match (axis, forward) {
        (Axis::Vertical, true) => guard.y1 <= content.y1,
        (Axis::Vertical, false) => guard.y0 >= content.y0,
        (Axis::Horizontal, true) => guard.x1 <= content.x1,
        (Axis::Horizontal, false) => guard.x0 >= content.x0,
    };
    if within {
        return;
    }
    let delta = match axis {
        Axis::Vertical => Vec2::new(0.0, -dir * state.sensitivity),
        Axis::Horizontal => Vec2::new(-dir * state.sensitivity, 0.0),
    };
    for &child in &children {
        tree.translate_subtree(child, delta);
    }
}
