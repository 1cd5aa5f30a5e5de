// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error values surfaced by scene-tree operations.
//!
//! Almost every misuse of the tree is a non-throwing diagnostic: the
//! operation is a no-op, prior state is preserved, and a `tracing` warning is
//! the only signal. Subtree attachment is the one operation with a
//! result-bearing contract, because callers need the colliding identifier to
//! report it.

use alloc::string::String;

/// Why a subtree could not be attached.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// The attaching subtree contains an identifier that is already present
    /// in the destination tree (or twice within the subtree itself). The
    /// whole attach is rejected; neither the registry nor any parent link is
    /// touched.
    #[error("duplicate identifier `{0}` in attached tree")]
    DuplicateId(String),
}
