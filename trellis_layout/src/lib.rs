// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Layout: the geometry engines of the Trellis toolkit.
//!
//! ## Overview
//!
//! Containers in the scene tree carry their layout state
//! ([`trellis_scene::GridState`], [`trellis_scene::FlowState`]); this crate
//! holds the engines that act on it:
//!
//! - [`grid`] — a weighted row/column table with cell occupation, truncating
//!   span expansion, and recursive re-flow.
//! - [`flow`] — a weighted linear stack with an alignment axis, per-axis
//!   scrolling by discrete steps, and incrementally tracked extremal
//!   children.
//! - [`container`] — the shared contract both engines route through:
//!   content boxes, re-flow dispatch, subtree embedding, and banner
//!   show/hide transitions.
//! - [`drag`] — border-resize and banner-reposition interactions, routed
//!   through an ephemeral proxy node in optimised mode.
//!
//! Everything here follows the toolkit's error doctrine: user-triggerable
//! misuse (stale ids, occupied cells, non-positive weights, out-of-range
//! coordinates) is a logged no-op that preserves prior state exactly, and
//! nothing aborts the host.
//!
//! ## Re-flow protocol
//!
//! A container mutation — resize, reposition, add, remove, banner toggle —
//! recomputes every affected descendant's absolute frame. Nested layout
//! hosts re-flow recursively; all other children receive a trickle-down
//! [`trellis_scene::EventKind::Resize`] so leaf widgets can re-fit their
//! content.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod container;
pub mod drag;
pub mod flow;
pub mod grid;

pub use container::{content_box, hide_banner, reflow, reflow_height, reflow_width, show_banner};
pub use drag::{DragConfig, DragInteraction, DragMode, Edge};
