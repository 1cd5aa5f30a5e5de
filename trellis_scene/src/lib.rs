// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Scene: the retained node tree of the Trellis widget toolkit.
//!
//! This crate owns everything a routed, laid-out UI needs to know about its
//! components, and nothing about how they are drawn:
//!
//! - A generational-arena [`Tree`] of nodes with absolute-coordinate frames,
//!   margin shorthands, advisory minimum sizes, and corner radii.
//! - Stage state: an ordered top-level layer list (z-order; later is
//!   frontmost) and an identifier registry with an atomic, all-or-nothing
//!   attach contract.
//! - Per-node listener tables and the three dispatch primitives (bubble,
//!   self-only, trickle-down) the router builds its policy on.
//! - Hit testing: outer-box tests with rounded-corner rejection and
//!   scroll-viewport clipping, plus front-to-back deepest-first target
//!   resolution.
//!
//! ## Ownership model
//!
//! Children are owned by the arena and addressed by [`NodeId`] (slot index
//! plus generation). Parent and layer references are plain ids, so the
//! parent/child cycle of a pointer-based scene graph never exists here:
//! freeing a subtree simply bumps generations, and stale ids fail every
//! liveness check. [`Tree::detach`] unlinks but keeps a subtree alive for
//! re-attachment; [`Tree::remove`] frees it.
//!
//! ## What this crate is not
//!
//! No drawing, no styling, no text metrics: a renderer consumes per-node
//! geometry through [`Tree::frame`]/[`Tree::outer_bounds`] and supplies
//! pointer/keyboard samples to the router crate. Layout engines live in
//! `trellis_layout`; this crate only carries their per-container state
//! (see [`GridState`], [`FlowState`]) so a node and its layout data stay in
//! one place.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod containers;
mod error;
mod event;
mod hit;
mod tree;
mod types;

pub use containers::{
    Axis, Banner, Cell, CellEntry, Extremes, FlowSlot, FlowState, GridState, ScrollAxes,
};
pub use error::AttachError;
pub use event::{Event, EventHandler, EventKind};
pub use tree::Tree;
pub use types::{Kind, MarginSpec, NodeData, NodeFlags, NodeId};
