// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container layout state: the data model the layout engines operate on.
//!
//! The engines themselves live in `trellis_layout`; this module only defines
//! the state a container node carries inside its [`Kind`](crate::Kind)
//! variant, so that the scene tree remains the single source of truth for
//! every node's data.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::Insets;
use smallvec::SmallVec;

/// Primary layout axis of a flow container.
///
/// The alignment axis is where children stack; the cross axis is where they
/// fill the container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Children stack left to right.
    Horizontal,
    /// Children stack top to bottom.
    Vertical,
}

impl Axis {
    /// Returns the opposite axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

bitflags::bitflags! {
    /// Which axes of a flow container scroll.
    ///
    /// On a scrolling axis children keep their natural extent and overflow is
    /// handled purely by offset; on a non-scrolling axis the weighted
    /// fractions compress children to fit.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ScrollAxes: u8 {
        /// Horizontal scrolling enabled.
        const X = 0b01;
        /// Vertical scrolling enabled.
        const Y = 0b10;
    }
}

/// A draggable header strip at the top of a container.
///
/// While showing, the banner height is carved out of the container's content
/// box (or, on a scrolling axis, children are shifted by it instead).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Banner {
    /// Keep the banner visible permanently instead of on pointer proximity.
    pub pinned: bool,
    /// Whether the banner currently shows.
    pub visible: bool,
    /// Height of the strip in canvas units.
    pub height: f64,
}

impl Banner {
    /// Whether the banner currently occupies space.
    #[must_use]
    pub const fn showing(&self) -> bool {
        self.pinned || self.visible
    }
}

/// One cell of a grid container's table.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// Nothing placed here.
    Empty,
    /// Reserved by a neighboring anchor's span; carries no widget and is not
    /// independently addressable.
    Covered,
    /// Anchor cell of a placed child.
    Occupied(CellEntry),
}

/// The anchor record of a placed grid child.
#[derive(Clone, Debug, PartialEq)]
pub struct CellEntry {
    /// The placed child node.
    pub node: crate::NodeId,
    /// Effective (possibly truncated) row span, including the anchor row.
    pub row_span: usize,
    /// Effective (possibly truncated) column span, including the anchor column.
    pub col_span: usize,
    /// Per-cell padding between the cell bounds and the child's margin box.
    pub pad: Insets,
}

/// Layout state of a grid container.
///
/// A grid starts unconfigured; [`configure`](Self::configure) (or the
/// engine's auto-configuration on first add) initializes the weight tables
/// and the cell table. Reconfiguring clears every cell.
#[derive(Clone, Debug)]
pub struct GridState {
    /// Declared row count; the table is built from this on configuration.
    pub rows: usize,
    /// Declared column count.
    pub cols: usize,
    /// Row-major cell table; empty until configured.
    pub cells: Vec<Cell>,
    /// Proportional row weights.
    pub row_weights: SmallVec<[f64; 8]>,
    /// Proportional column weights.
    pub col_weights: SmallVec<[f64; 8]>,
    /// Running total of `row_weights`.
    pub total_row_weight: f64,
    /// Running total of `col_weights`.
    pub total_col_weight: f64,
    /// Padding between the container frame and the cell area.
    pub padding: Insets,
    /// Drag banner strip.
    pub banner: Banner,
    /// Whether the weight and cell tables have been initialized.
    pub configured: bool,
}

impl GridState {
    /// Declare a grid with the given row/column counts, not yet configured.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            cells: Vec::new(),
            row_weights: SmallVec::new(),
            col_weights: SmallVec::new(),
            total_row_weight: 0.0,
            total_col_weight: 0.0,
            padding: Insets::ZERO,
            banner: Banner::default(),
            configured: false,
        }
    }

    /// Set the padding between the container frame and the cell area.
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// (Re)initialize the weight tables with uniform weights and clear every
    /// cell. Irreversible except by calling this again.
    pub fn configure(&mut self, rows: usize, cols: usize) {
        self.rows = rows.max(1);
        self.cols = cols.max(1);
        self.row_weights = SmallVec::from_elem(1.0, self.rows);
        self.col_weights = SmallVec::from_elem(1.0, self.cols);
        #[allow(clippy::cast_precision_loss, reason = "row/col counts are small")]
        {
            self.total_row_weight = self.rows as f64;
            self.total_col_weight = self.cols as f64;
        }
        self.cells = vec![Cell::Empty; self.rows * self.cols];
        self.configured = true;
    }

    /// Replace one row's weight, keeping the running total consistent.
    pub fn set_row_weight(&mut self, row: usize, weight: f64) {
        if let Some(w) = self.row_weights.get_mut(row)
            && weight > 0.0
        {
            self.total_row_weight += weight - *w;
            *w = weight;
        }
    }

    /// Replace one column's weight, keeping the running total consistent.
    pub fn set_col_weight(&mut self, col: usize, weight: f64) {
        if let Some(w) = self.col_weights.get_mut(col)
            && weight > 0.0
        {
            self.total_col_weight += weight - *w;
            *w = weight;
        }
    }

    /// Index into the row-major cell table.
    #[must_use]
    pub const fn cell_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Shared view of a cell. Out-of-range coordinates read as [`Cell::Empty`].
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        if row < self.rows && col < self.cols {
            self.cells.get(self.cell_index(row, col)).unwrap_or(&Cell::Empty)
        } else {
            &Cell::Empty
        }
    }

    /// Fraction of the content extent consumed by columns before `col`.
    #[must_use]
    pub fn col_offset_fraction(&self, col: usize) -> f64 {
        Self::prefix_fraction(&self.col_weights, self.total_col_weight, col)
    }

    /// Fraction of the content extent consumed by rows before `row`.
    #[must_use]
    pub fn row_offset_fraction(&self, row: usize) -> f64 {
        Self::prefix_fraction(&self.row_weights, self.total_row_weight, row)
    }

    /// Fraction of the content extent covered by `span` columns from `col`.
    #[must_use]
    pub fn col_span_fraction(&self, col: usize, span: usize) -> f64 {
        Self::span_fraction(&self.col_weights, self.total_col_weight, col, span)
    }

    /// Fraction of the content extent covered by `span` rows from `row`.
    #[must_use]
    pub fn row_span_fraction(&self, row: usize, span: usize) -> f64 {
        Self::span_fraction(&self.row_weights, self.total_row_weight, row, span)
    }

    fn prefix_fraction(weights: &[f64], total: f64, upto: usize) -> f64 {
        if total <= 0.0 {
            return 0.0;
        }
        weights.iter().take(upto).sum::<f64>() / total
    }

    fn span_fraction(weights: &[f64], total: f64, start: usize, span: usize) -> f64 {
        if total <= 0.0 {
            return 0.0;
        }
        weights.iter().skip(start).take(span).sum::<f64>() / total
    }
}

/// Per-child layout preferences of a flow container, parallel to the node's
/// child list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowSlot {
    /// Proportional share of the alignment axis when it does not scroll.
    pub weight: f64,
    /// Padding between the slot bounds and the child's margin box.
    pub pad: Insets,
}

/// Cached indices of the extremal children of a scrolling flow container.
///
/// Maintained incrementally on insert by comparing only the appended child
/// against the current extremum. Removal does **not** correct these caches;
/// see the flow engine documentation for the consequences.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Extremes {
    /// Index of the leftmost child (smallest outer `x0`).
    pub left: Option<usize>,
    /// Index of the rightmost child (largest outer `x1`).
    pub right: Option<usize>,
    /// Index of the topmost child (smallest outer `y0`).
    pub top: Option<usize>,
    /// Index of the deepest child (largest outer `y1`).
    pub bottom: Option<usize>,
}

/// Layout state of a linear/scroll container.
#[derive(Clone, Debug)]
pub struct FlowState {
    /// Per-child preferences, index-parallel to the node's child list.
    pub slots: Vec<FlowSlot>,
    /// Running total of slot weights.
    pub total_weight: f64,
    /// Axis along which children stack.
    pub axis: Axis,
    /// Padding between the container frame and the content area.
    pub padding: Insets,
    /// Which axes scroll instead of compressing.
    pub scroll: ScrollAxes,
    /// Signed step applied per satisfied scroll sample.
    pub sensitivity: f64,
    /// Drag banner strip.
    pub banner: Banner,
    /// Extremal-child caches, live only while a scroll axis is enabled.
    pub extremes: Extremes,
}

impl FlowState {
    /// Default scroll step in canvas units.
    pub const DEFAULT_SENSITIVITY: f64 = 16.0;

    /// A non-scrolling stack along `axis`.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            slots: Vec::new(),
            total_weight: 0.0,
            axis,
            padding: Insets::ZERO,
            scroll: ScrollAxes::empty(),
            sensitivity: Self::DEFAULT_SENSITIVITY,
            banner: Banner::default(),
            extremes: Extremes::default(),
        }
    }

    /// Enable scrolling on the given axes.
    #[must_use]
    pub fn with_scroll(mut self, scroll: ScrollAxes) -> Self {
        self.scroll = scroll;
        self
    }

    /// Set the padding between the container frame and the content area.
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Set the per-step scroll distance.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Whether the given axis scrolls.
    #[must_use]
    pub fn scrolls(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.scroll.contains(ScrollAxes::X),
            Axis::Vertical => self.scroll.contains(ScrollAxes::Y),
        }
    }
}
