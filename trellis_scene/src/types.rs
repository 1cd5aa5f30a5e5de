// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene tree: node identifiers, flags, margins, and node data.

use alloc::string::String;
use kurbo::{Insets, Rect, Size};

use crate::containers::{FlowState, GridState};

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling interactive capabilities.
    ///
    /// Containers strip `RESIZABLE | MOVABLE` from every node of a subtree
    /// they embed: a grid cell or flow slot is positioned by its container
    /// and must not be dragged independently.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node may be resized by a border drag.
        const RESIZABLE = 0b0000_0001;
        /// Node may be repositioned by a banner drag.
        const MOVABLE   = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::RESIZABLE | Self::MOVABLE
    }
}

/// Margin shorthand with per-side override precedence.
///
/// Each side resolves independently: an explicit per-side value wins over the
/// per-axis value, which wins over the unified value, which defaults to zero.
///
/// ```rust
/// use trellis_scene::MarginSpec;
///
/// let spec = MarginSpec::uniform(4.0).with_x(8.0).with_left(1.0);
/// let insets = spec.resolve();
/// assert_eq!(insets.x0, 1.0); // explicit per-side
/// assert_eq!(insets.x1, 8.0); // per-axis
/// assert_eq!(insets.y0, 4.0); // unified
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarginSpec {
    /// Unified margin applied to all four sides unless overridden.
    pub all: Option<f64>,
    /// Horizontal (left/right) margin, overriding `all`.
    pub x: Option<f64>,
    /// Vertical (top/bottom) margin, overriding `all`.
    pub y: Option<f64>,
    /// Explicit left margin, overriding `x` and `all`.
    pub left: Option<f64>,
    /// Explicit right margin, overriding `x` and `all`.
    pub right: Option<f64>,
    /// Explicit top margin, overriding `y` and `all`.
    pub top: Option<f64>,
    /// Explicit bottom margin, overriding `y` and `all`.
    pub bottom: Option<f64>,
}

impl MarginSpec {
    /// A spec with no margins on any side.
    pub const NONE: Self = Self {
        all: None,
        x: None,
        y: None,
        left: None,
        right: None,
        top: None,
        bottom: None,
    };

    /// Uniform margin on all four sides.
    #[must_use]
    pub fn uniform(v: f64) -> Self {
        Self {
            all: Some(v),
            ..Self::NONE
        }
    }

    /// Per-axis margins (horizontal, vertical).
    #[must_use]
    pub fn axes(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::NONE
        }
    }

    /// Override the horizontal (left/right) margin.
    #[must_use]
    pub fn with_x(mut self, v: f64) -> Self {
        self.x = Some(v);
        self
    }

    /// Override the vertical (top/bottom) margin.
    #[must_use]
    pub fn with_y(mut self, v: f64) -> Self {
        self.y = Some(v);
        self
    }

    /// Override the left margin.
    #[must_use]
    pub fn with_left(mut self, v: f64) -> Self {
        self.left = Some(v);
        self
    }

    /// Override the right margin.
    #[must_use]
    pub fn with_right(mut self, v: f64) -> Self {
        self.right = Some(v);
        self
    }

    /// Override the top margin.
    #[must_use]
    pub fn with_top(mut self, v: f64) -> Self {
        self.top = Some(v);
        self
    }

    /// Override the bottom margin.
    #[must_use]
    pub fn with_bottom(mut self, v: f64) -> Self {
        self.bottom = Some(v);
        self
    }

    /// Resolve the shorthand into concrete per-side insets.
    ///
    /// Precedence per side: explicit per-side, then per-axis, then unified,
    /// then zero.
    #[must_use]
    pub fn resolve(&self) -> Insets {
        let base = self.all.unwrap_or(0.0);
        let x = self.x.unwrap_or(base);
        let y = self.y.unwrap_or(base);
        Insets::new(
            self.left.unwrap_or(x),
            self.top.unwrap_or(y),
            self.right.unwrap_or(x),
            self.bottom.unwrap_or(y),
        )
    }
}

/// Behavioral variant of a node.
///
/// This is a closed set: layout engines and the router branch on the variant
/// (or on the capability predicates below) rather than on an open type tag.
/// Container-specific layout state travels inside the variant so that a node
/// and its layout data cannot disagree about what the node is.
#[derive(Clone, Debug)]
pub enum Kind {
    /// A leaf widget with no children of layout significance.
    Plain,
    /// A plain container: owns children but applies no layout discipline.
    Frame,
    /// A container laying children out on a weighted row/column grid.
    Grid(GridState),
    /// A container stacking children along a weighted, optionally
    /// scrollable axis.
    Flow(FlowState),
    /// A leaf widget that can hold keyboard focus.
    Input,
    /// A transient stand-in substituted as the interaction target during an
    /// optimised drag. Never part of a layout.
    Proxy,
}

impl Kind {
    /// Whether this node owns children as a container.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Frame | Self::Grid(_) | Self::Flow(_))
    }

    /// Whether this node runs a layout engine over its children.
    #[must_use]
    pub const fn is_layout_host(&self) -> bool {
        matches!(self, Self::Grid(_) | Self::Flow(_))
    }

    /// Whether this node can take keyboard focus.
    #[must_use]
    pub const fn is_focusable(&self) -> bool {
        matches!(self, Self::Input)
    }
}

/// Per-node data: geometry, identity, and behavioral variant.
///
/// `frame` is in absolute canvas coordinates. Containers rewrite descendant
/// frames wholesale on layout; there is no parent-relative accumulation.
#[derive(Clone, Debug)]
pub struct NodeData {
    /// Optional unique identifier. `None` means unindexed: the node never
    /// appears in the registry and can coexist with any other node.
    pub name: Option<String>,
    /// Behavioral variant, including container layout state.
    pub kind: Kind,
    /// Absolute bounds of the content box, excluding margins.
    pub frame: Rect,
    /// Margin shorthand, resolved on access.
    pub margin: MarginSpec,
    /// Advisory minimum size. Containers fold children's minimums into an
    /// effective minimum; drag-resize clamps against it.
    pub min_size: Size,
    /// Corner radius for hit testing. Zero means square corners.
    pub corner_radius: f64,
    /// Interactive capability flags.
    pub flags: NodeFlags,
}

impl Default for NodeData {
    fn default() -> Self {
        Self {
            name: None,
            kind: Kind::Plain,
            frame: Rect::ZERO,
            margin: MarginSpec::NONE,
            min_size: Size::ZERO,
            corner_radius: 0.0,
            flags: NodeFlags::default(),
        }
    }
}
