// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-tick input snapshot.
//!
//! The router never reads ambient input state: the host samples its pointer
//! and keyboard once per tick (or once per discrete input occurrence) and
//! threads the snapshot into every router entry point. This keeps routing a
//! pure function of (tree, router state, snapshot).

use kurbo::Point;

/// One sample of the host's input devices.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InputState {
    /// Pointer position in canvas coordinates.
    pub pointer: Point,
    /// Whether the primary button is currently held.
    pub pressed: bool,
    /// The active key for keyboard samples, if any.
    pub key: Option<u32>,
}

impl InputState {
    /// A snapshot with the pointer at `pos` and nothing held.
    #[must_use]
    pub fn at(pos: Point) -> Self {
        Self {
            pointer: pos,
            ..Self::default()
        }
    }

    /// The same snapshot with the primary button held.
    #[must_use]
    pub fn held(mut self) -> Self {
        self.pressed = true;
        self
    }

    /// The same snapshot carrying an active key.
    #[must_use]
    pub fn with_key(mut self, key: u32) -> Self {
        self.key = Some(key);
        self
    }
}
