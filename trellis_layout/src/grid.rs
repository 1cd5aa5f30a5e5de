// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The weighted grid engine.
//!
//! A grid container owns a row-major table of cells, each empty, reserved by
//! a neighbor's span, or anchoring a placed child. Cell extents derive from
//! per-row/per-column weights: a cell's share of the content box is its
//! weight over the running total, so geometry is independent of absolute
//! container size. Requested spans are a maximum, not a guarantee — expansion
//! silently truncates at the first occupied cell or the grid boundary.
//!
//! Misuse (stale ids, out-of-range coordinates, occupied cells, duplicate
//! identifiers) is never fatal: the operation is a no-op, prior state is
//! preserved, and a `tracing` warning is the only signal.

use alloc::vec::Vec;
use kurbo::{Insets, Rect};
use trellis_scene::{Cell, CellEntry, EventKind, Kind, NodeId, Tree};

use crate::container;

/// (Re)initialize the grid's weight and cell tables.
///
/// Reconfiguring clears every cell; previously placed children stay attached
/// but are no longer addressed by the table until placed again.
pub fn configure(tree: &mut Tree, id: NodeId, rows: usize, cols: usize) {
    let Some(Kind::Grid(state)) = tree.kind_mut(id) else {
        tracing::warn!("grid configure: node is not a grid container, ignoring");
        return;
    };
    state.configure(rows, cols);
}

/// Place `child` at the anchor cell `(row, col)`, spanning up to
/// `row_span` × `col_span` cells, with per-cell padding.
///
/// An unconfigured grid auto-configures from its declared counts first. The
/// requested spans truncate at the first occupied cell or the boundary. On
/// success the embedded subtree loses its drag capability and the child's
/// geometry is computed immediately.
pub fn add(
    tree: &mut Tree,
    container: NodeId,
    child: NodeId,
    row: usize,
    col: usize,
    row_span: usize,
    col_span: usize,
    pad: Insets,
) {
    let Some(Kind::Grid(state)) = tree.kind(container) else {
        tracing::warn!("grid add: node is not a grid container, ignoring");
        return;
    };
    if !state.configured {
        let (rows, cols) = (state.rows, state.cols);
        if let Some(Kind::Grid(state)) = tree.kind_mut(container) {
            state.configure(rows, cols);
        }
        tracing::debug!("grid add: auto-configured {rows}x{cols} on first add");
    }
    if !tree.is_alive(child) {
        tracing::warn!("grid add: stale child id, ignoring");
        return;
    }
    let top = tree.subtree_root(container);
    if child == top || tree.is_descendant_of(child, top) {
        tracing::warn!("grid add: child is already present in this tree, ignoring");
        return;
    }
    let Some(Kind::Grid(state)) = tree.kind(container) else {
        return;
    };
    if row >= state.rows || col >= state.cols {
        tracing::warn!(
            "grid add: cell ({row}, {col}) is outside the {}x{} grid, ignoring",
            state.rows,
            state.cols
        );
        return;
    }
    if state.cell(row, col) != &Cell::Empty {
        tracing::warn!("grid add: cell ({row}, {col}) is already occupied, ignoring");
        return;
    }
    let (eff_row_span, eff_col_span) = expand_span(tree, container, row, col, row_span, col_span);

    // The identifier check inside attach is atomic; a duplicate anywhere in
    // the child subtree leaves both trees untouched.
    if let Err(err) = container::embed(tree, container, child) {
        tracing::warn!("grid add: {err}, ignoring");
        return;
    }

    if let Some(Kind::Grid(state)) = tree.kind_mut(container) {
        for r in row..row + eff_row_span {
            for c in col..col + eff_col_span {
                let i = state.cell_index(r, c);
                state.cells[i] = if r == row && c == col {
                    Cell::Occupied(CellEntry {
                        node: child,
                        row_span: eff_row_span,
                        col_span: eff_col_span,
                        pad,
                    })
                } else {
                    Cell::Covered
                };
            }
        }
    }
    place(tree, container, child, row, col, eff_row_span, eff_col_span, pad);
}

/// Remove `child` from the grid: its anchor and every covered cell revert to
/// empty, the subtree detaches (staying alive), and the grid re-flows.
pub fn remove(tree: &mut Tree, container: NodeId, child: NodeId) {
    let Some(Kind::Grid(state)) = tree.kind(container) else {
        tracing::warn!("grid remove: node is not a grid container, ignoring");
        return;
    };
    let Some((row, col, entry)) = anchors(state).into_iter().find(|(_, _, e)| e.node == child)
    else {
        tracing::warn!("grid remove: child is not placed in this grid, ignoring");
        return;
    };
    if let Some(Kind::Grid(state)) = tree.kind_mut(container) {
        for r in row..row + entry.row_span {
            for c in col..col + entry.col_span {
                let i = state.cell_index(r, c);
                state.cells[i] = Cell::Empty;
            }
        }
    }
    tree.detach(child);
    reflow(tree, container);
}

/// Recompute every placed child's geometry from the current content box.
pub fn reflow(tree: &mut Tree, id: NodeId) {
    let Some(Kind::Grid(state)) = tree.kind(id) else {
        return;
    };
    for (row, col, entry) in anchors(state) {
        place(
            tree,
            id,
            entry.node,
            row,
            col,
            entry.row_span,
            entry.col_span,
            entry.pad,
        );
    }
}

/// Collect `(row, col, entry)` for every anchor cell.
fn anchors(state: &trellis_scene::GridState) -> Vec<(usize, usize, CellEntry)> {
    let mut out = Vec::new();
    for row in 0..state.rows {
        for col in 0..state.cols {
            if let Cell::Occupied(entry) = state.cell(row, col) {
                out.push((row, col, entry.clone()));
            }
        }
    }
    out
}

/// Truncate a requested span at the first occupied cell or the boundary.
///
/// Columns to the right of the anchor are scanned first along the anchor
/// row; rows below are then admitted only while their whole column strip is
/// empty. Truncation is silent.
fn expand_span(
    tree: &Tree,
    container: NodeId,
    row: usize,
    col: usize,
    row_span: usize,
    col_span: usize,
) -> (usize, usize) {
    let Some(Kind::Grid(state)) = tree.kind(container) else {
        return (1, 1);
    };
    let want_rows = row_span.max(1);
    let want_cols = col_span.max(1);

    let mut cols_eff = 1;
    while cols_eff < want_cols
        && col + cols_eff < state.cols
        && state.cell(row, col + cols_eff) == &Cell::Empty
    {
        cols_eff += 1;
    }

    let mut rows_eff = 1;
    'rows: while rows_eff < want_rows && row + rows_eff < state.rows {
        for c in col..col + cols_eff {
            if state.cell(row + rows_eff, c) != &Cell::Empty {
                break 'rows;
            }
        }
        rows_eff += 1;
    }
    (rows_eff, cols_eff)
}

/// Compute and apply one child's geometry from its cell coordinates.
///
/// The cell extent is the spanned weight fraction of the content box; the
/// child's frame shrinks further by the cell padding and its own margins.
fn place(
    tree: &mut Tree,
    container: NodeId,
    child: NodeId,
    row: usize,
    col: usize,
    row_span: usize,
    col_span: usize,
    pad: Insets,
) {
    let Some(content) = container::content_box(tree, container) else {
        return;
    };
    let frame = {
        let Some(Kind::Grid(state)) = tree.kind(container) else {
            return;
        };
        let m = tree.margin(child);
        let x0 = content.x0 + state.col_offset_fraction(col) * content.width();
        let y0 = content.y0 + state.row_offset_fraction(row) * content.height();
        let w = state.col_span_fraction(col, col_span) * content.width();
        let h = state.row_span_fraction(row, row_span) * content.height();
        let left = x0 + pad.x0 + m.x0;
        let top = y0 + pad.y0 + m.y0;
        let right = (x0 + w - pad.x1 - m.x1).max(left);
        let bottom = (y0 + h - pad.y1 - m.y1).max(top);
        Rect::new(left, top, right, bottom)
    };
    tree.set_frame(child, frame);
    container::propagate(tree, child, EventKind::Resize);
}
