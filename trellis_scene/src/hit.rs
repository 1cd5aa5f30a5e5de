// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing over the scene tree.
//!
//! A node hits when the point is inside its outer box (frame plus margins),
//! survives the rounded-corner rejection, and — when the node sits inside a
//! scrolling flow container — is also accepted by that viewport, so content
//! scrolled out of view cannot be hit. [`Tree::find_hit_target`] turns the
//! per-node test into the canonical front-to-back, deepest-first resolution.

use kurbo::Point;

use crate::containers::ScrollAxes;
use crate::tree::Tree;
use crate::types::{Kind, NodeId};

impl Tree {
    /// Whether `point` hits the node's outer visible box.
    ///
    /// Acceptance additionally requires the nearest scrolling ancestor's own
    /// hit test, recursively through nested scroll viewports.
    #[must_use]
    pub fn hit_test(&self, id: NodeId, point: Point) -> bool {
        if !self.is_alive(id) || !self.hits_outer_box(id, point) {
            return false;
        }
        // A scroll viewport clips its content: delegate final acceptance to
        // the nearest scrolling ancestor, which in turn delegates to its own.
        let mut cur = self.parent_of(id);
        while let Some(p) = cur {
            if self.is_scroll_viewport(p) {
                return self.hit_test(p, point);
            }
            cur = self.parent_of(p);
        }
        true
    }

    /// Resolve the deepest, frontmost node under `point` in this subtree.
    ///
    /// Children are tested in reverse insertion order (later-added renders in
    /// front); the first child whose own recursive search yields a hit wins.
    /// Only if no child hits is the node itself tested, so descendants always
    /// outrank ancestors.
    #[must_use]
    pub fn find_hit_target(&self, id: NodeId, point: Point) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        for &child in self.children_of(id).iter().rev() {
            if let Some(hit) = self.find_hit_target(child, point) {
                return Some(hit);
            }
        }
        self.hit_test(id, point).then_some(id)
    }

    /// Axis-aligned test against the outer box, with the four corner
    /// quadrants rejected by a circular-arc distance test when a corner
    /// radius is configured.
    fn hits_outer_box(&self, id: NodeId, point: Point) -> bool {
        let Some(outer) = self.outer_bounds(id) else {
            return false;
        };
        if !outer.contains(point) {
            return false;
        }
        let radius = self.node_radius(id);
        if radius > 0.0 {
            let r = radius.min(outer.width() * 0.5).min(outer.height() * 0.5);
            // Distance to the nearest point of the radius-inset core; only
            // corner quadrants produce a nonzero distance. Squared distances
            // keep this exact and sqrt-free.
            let cx = point.x.clamp(outer.x0 + r, outer.x1 - r);
            let cy = point.y.clamp(outer.y0 + r, outer.y1 - r);
            let dx = point.x - cx;
            let dy = point.y - cy;
            if dx * dx + dy * dy > r * r {
                return false;
            }
        }
        true
    }

    fn node_radius(&self, id: NodeId) -> f64 {
        self.data(id).map_or(0.0, |d| d.corner_radius)
    }

    fn is_scroll_viewport(&self, id: NodeId) -> bool {
        matches!(
            self.kind(id),
            Some(Kind::Flow(f)) if f.scroll.intersects(ScrollAxes::X | ScrollAxes::Y)
        )
    }
}
