// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Router: the input-routing state machine of the Trellis toolkit.
//!
//! ## Overview
//!
//! The scene crate supplies the mechanisms — hit testing and the three
//! dispatch primitives. This crate supplies the policy that turns raw host
//! samples into a coherent interaction model:
//!
//! - **Capture**: while a button is held, pointer kinds route straight to
//!   the active element, so drags survive leaving the node's bounds.
//! - **Hit-test routing**: top-level layers are scanned back-to-front and
//!   the deepest frontmost node becomes the active element.
//! - **Enter/leave tracking**: an entry-order stack of the ancestor chain
//!   under the pointer, re-derived every tick (level-triggered, never
//!   edge-triggered) and drained correctly across discontinuous jumps.
//! - **Focus**: exclusive transfer on click/press over input-capable nodes,
//!   with keyboard samples bypassing hit testing while something is focused.
//!
//! ## Driving the router
//!
//! The host owns the event loop. Once per frame it calls [`Router::tick`]
//! with a fresh [`InputState`]; for each discrete input occurrence it calls
//! [`Router::route_pointer`] or [`Router::route_key`] exactly once. All
//! routing is synchronous and single-threaded: a dispatch runs to completion
//! before the entry point returns, and there is no cancellation.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use trellis_router::{InputState, Router};
//! use trellis_scene::{EventKind, NodeData, Tree};
//!
//! let mut tree = Tree::new();
//! let layer = tree.insert(NodeData {
//!     frame: Rect::new(0.0, 0.0, 100.0, 100.0),
//!     ..NodeData::default()
//! });
//! tree.add_layer(layer).unwrap();
//!
//! let mut router = Router::new();
//! let sample = InputState::at(Point::new(50.0, 50.0));
//! router.tick(&mut tree, &sample);
//! router.route_pointer(&mut tree, &sample, EventKind::Click);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod input;
mod router;

pub use input::InputState;
pub use router::{ActiveTarget, Router};
