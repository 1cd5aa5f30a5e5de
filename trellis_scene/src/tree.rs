// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: storage, attachment, identity, queries.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::{Insets, Rect, Size, Vec2};

use crate::error::AttachError;
use crate::event::ListenerTable;
use crate::types::{NodeData, NodeFlags, NodeId};

/// The scene tree: a generational arena of nodes plus the stage state that a
/// routed UI needs — an ordered list of top-level layers and a registry of
/// node identifiers.
///
/// Nodes are created detached with [`Tree::insert`], wired into a hierarchy
/// with [`Tree::attach`] or [`Tree::add_layer`], and unlinked with
/// [`Tree::detach`] (keeping the subtree alive for re-attachment) or freed
/// with [`Tree::remove`]. Stale [`NodeId`]s fail liveness checks and every
/// accessor returns `None` or no-ops for them.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use trellis_scene::{NodeData, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(NodeData {
///     frame: Rect::new(0.0, 0.0, 100.0, 100.0),
///     ..NodeData::default()
/// });
/// tree.add_layer(root).unwrap();
/// assert!(tree.is_attached(root));
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    /// Ordered top-level nodes; later entries are frontmost.
    layers: Vec<NodeId>,
    /// Identifier index over every attached, named node.
    registry: HashMap<String, NodeId>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("layers", &self.layers)
            .field("registered", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
    pub(crate) listeners: ListenerTable,
}

impl Node {
    fn new(generation: u32, data: NodeData) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
            listeners: ListenerTable::new(),
        }
    }
}

impl Tree {
    /// Create an empty tree with no layers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            layers: Vec::new(),
            registry: HashMap::new(),
        }
    }

    /// Create a new detached node and return its identifier.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    // --- liveness and basic queries ---

    /// Returns true if `id` refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns the parent of a live node, or `None` for roots or stale ids.
    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Returns the children of a live node, or an empty slice for stale ids.
    ///
    /// Insertion order is z-order: later children render (and hit) in front.
    #[must_use]
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.node(id).children
    }

    /// Walks the parent chain of `id`; true if it passes through `ancestor`.
    ///
    /// A node is not its own ancestor.
    #[must_use]
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cur = self.parent_of(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent_of(p);
        }
        false
    }

    /// Topmost ancestor of `id` (itself, if it has no parent).
    #[must_use]
    pub fn subtree_root(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        while let Some(p) = self.parent_of(cur) {
            cur = p;
        }
        cur
    }

    /// Whether `id` is reachable from the layer list.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.is_alive(id) && self.layers.contains(&self.subtree_root(id))
    }

    /// The top-level layer owning `id`, if it is attached.
    #[must_use]
    pub fn layer_of(&self, id: NodeId) -> Option<NodeId> {
        let root = self.subtree_root(id);
        self.layers.contains(&root).then_some(root)
    }

    /// The ordered top-level layers; later entries are frontmost.
    #[must_use]
    pub fn layers(&self) -> &[NodeId] {
        &self.layers
    }

    /// Look up an attached node by identifier.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.registry.get(name).copied()
    }

    // --- data access ---

    /// Shared view of a live node's data.
    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.node_opt(id).map(|n| &n.data)
    }

    /// The content-box frame of a live node, in absolute coordinates.
    #[must_use]
    pub fn frame(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.data.frame)
    }

    /// Resolved margins of a node; zero for stale ids.
    #[must_use]
    pub fn margin(&self, id: NodeId) -> Insets {
        self.node_opt(id)
            .map_or(Insets::ZERO, |n| n.data.margin.resolve())
    }

    /// The outer box of a node: frame expanded by its margins.
    ///
    /// This is the box hit testing sees. Purely derived; never stored.
    #[must_use]
    pub fn outer_bounds(&self, id: NodeId) -> Option<Rect> {
        let n = self.node_opt(id)?;
        Some(n.data.frame + n.data.margin.resolve())
    }

    /// Shared view of a live node's behavioral variant.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&crate::Kind> {
        self.node_opt(id).map(|n| &n.data.kind)
    }

    /// Mutable view of a live node's behavioral variant.
    ///
    /// Layout engines use this to update container state in place.
    pub fn kind_mut(&mut self, id: NodeId) -> Option<&mut crate::Kind> {
        self.node_opt_mut(id).map(|n| &mut n.data.kind)
    }

    /// Flags of a live node; empty for stale ids.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.node_opt(id)
            .map_or(NodeFlags::empty(), |n| n.data.flags)
    }

    /// Replace a node's frame. Does not run layout; containers re-derive
    /// descendant geometry through their engines.
    pub fn set_frame(&mut self, id: NodeId, frame: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.frame = frame;
        }
    }

    /// Replace a node's flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.flags = flags;
        }
    }

    /// Replace a node's margin shorthand.
    pub fn set_margin(&mut self, id: NodeId, margin: crate::MarginSpec) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.margin = margin;
        }
    }

    /// Replace a node's advisory minimum size.
    pub fn set_min_size(&mut self, id: NodeId, min_size: Size) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.min_size = min_size;
        }
    }

    /// Replace a node's corner radius.
    pub fn set_corner_radius(&mut self, id: NodeId, radius: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.corner_radius = radius;
        }
    }

    /// Rigidly shift a node and every descendant by `delta`.
    ///
    /// Frames store absolute coordinates, so moving a container means moving
    /// its whole subtree; scrolling and banner shifts are built on this.
    pub fn translate_subtree(&mut self, id: NodeId, delta: Vec2) {
        if !self.is_alive(id) {
            return;
        }
        let n = self.node_mut(id);
        n.data.frame = n.data.frame + delta;
        let children = n.children.clone();
        for child in children {
            self.translate_subtree(child, delta);
        }
    }

    /// Clear `flags` on a node and every descendant.
    ///
    /// Containers use this to strip drag capability from embedded subtrees.
    pub fn clear_flags_subtree(&mut self, id: NodeId, flags: NodeFlags) {
        if !self.is_alive(id) {
            return;
        }
        let n = self.node_mut(id);
        n.data.flags -= flags;
        let children = n.children.clone();
        for child in children {
            self.clear_flags_subtree(child, flags);
        }
    }

    /// Effective minimum size: the node's own advisory minimum folded with
    /// every child's effective minimum plus that child's margins.
    #[must_use]
    pub fn effective_min_size(&self, id: NodeId) -> Size {
        let Some(n) = self.node_opt(id) else {
            return Size::ZERO;
        };
        let mut w = n.data.min_size.width;
        let mut h = n.data.min_size.height;
        for &child in &n.children {
            let m = self.margin(child);
            let cm = self.effective_min_size(child);
            w = w.max(cm.width + m.x0 + m.x1);
            h = h.max(cm.height + m.y0 + m.y1);
        }
        Size::new(w, h)
    }

    // --- attachment ---

    /// Attach `child` (and its subtree) under `parent`.
    ///
    /// The child is detached from any previous parent or layer slot first, so
    /// a node never has two parents. If the destination tree is attached to
    /// the stage, every identifier in the child subtree is checked against
    /// the registry; otherwise against the destination subtree's own names.
    /// A collision rejects the entire subtree with
    /// [`AttachError::DuplicateId`] and mutates nothing.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), AttachError> {
        if !self.is_alive(parent) || !self.is_alive(child) {
            tracing::warn!("attach: stale node id, ignoring");
            return Ok(());
        }
        if parent == child || self.is_descendant_of(parent, child) {
            tracing::warn!("attach: would create a cycle, ignoring");
            return Ok(());
        }

        let names = self.collect_names(child)?;
        if self.is_attached(parent) {
            for (name, _) in &names {
                if let Some(&existing) = self.registry.get(name)
                    && existing != child
                    && !self.is_descendant_of(existing, child)
                {
                    return Err(AttachError::DuplicateId(name.clone()));
                }
            }
        } else {
            let dest_root = self.subtree_root(parent);
            for (name, id) in &names {
                if let Some(found) = self.find_named(dest_root, name)
                    && found != *id
                {
                    return Err(AttachError::DuplicateId(name.clone()));
                }
            }
        }

        self.detach_quiet(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        if self.is_attached(parent) {
            for (name, id) in names {
                self.registry.insert(name, id);
            }
        }
        Ok(())
    }

    /// Attach `node` as the frontmost top-level layer.
    ///
    /// Same identifier contract as [`Tree::attach`]: a duplicate anywhere in
    /// the subtree rejects the whole call and leaves the layer list and
    /// registry untouched.
    pub fn add_layer(&mut self, node: NodeId) -> Result<(), AttachError> {
        if !self.is_alive(node) {
            tracing::warn!("add_layer: stale node id, ignoring");
            return Ok(());
        }
        if self.layers.contains(&node) {
            tracing::warn!("add_layer: node is already a layer, ignoring");
            return Ok(());
        }
        let names = self.collect_names(node)?;
        for (name, id) in &names {
            if let Some(&existing) = self.registry.get(name)
                && existing != *id
            {
                return Err(AttachError::DuplicateId(name.clone()));
            }
        }
        self.detach_quiet(node);
        self.layers.push(node);
        for (name, id) in names {
            self.registry.insert(name, id);
        }
        Ok(())
    }

    /// Unlink `id` from its parent or layer slot, keeping the subtree alive.
    ///
    /// Every identifier in the subtree leaves the registry, so the same node
    /// can be attached again later under the same name.
    pub fn detach(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            tracing::warn!("detach: stale node id, ignoring");
            return;
        }
        self.detach_quiet(id);
    }

    /// Unlink and free `id` and its entire subtree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            tracing::warn!("remove: stale node id, ignoring");
            return;
        }
        self.detach_quiet(id);
        self.free_subtree(id);
    }

    // --- z-order ---

    /// Swap the layer owning `id` with its next-frontmost neighbor.
    ///
    /// `id` may be any descendant; the owning top-level layer is resolved
    /// first. A frontmost layer (or unknown node) is a logged no-op.
    pub fn send_forward(&mut self, id: NodeId) {
        let Some(i) = self.owning_layer_index(id) else {
            tracing::warn!("send_forward: node is not on the stage, ignoring");
            return;
        };
        if i + 1 < self.layers.len() {
            self.layers.swap(i, i + 1);
        }
    }

    /// Swap the layer owning `id` with its next-backmost neighbor.
    pub fn send_backward(&mut self, id: NodeId) {
        let Some(i) = self.owning_layer_index(id) else {
            tracing::warn!("send_backward: node is not on the stage, ignoring");
            return;
        };
        if i > 0 {
            self.layers.swap(i, i - 1);
        }
    }

    /// Rotate the layer owning `id` to the front of the ordering.
    pub fn send_to_front(&mut self, id: NodeId) {
        let Some(i) = self.owning_layer_index(id) else {
            tracing::warn!("send_to_front: node is not on the stage, ignoring");
            return;
        };
        let layer = self.layers.remove(i);
        self.layers.push(layer);
    }

    /// Rotate the layer owning `id` to the back of the ordering.
    pub fn send_to_back(&mut self, id: NodeId) {
        let Some(i) = self.owning_layer_index(id) else {
            tracing::warn!("send_to_back: node is not on the stage, ignoring");
            return;
        };
        let layer = self.layers.remove(i);
        self.layers.insert(0, layer);
    }

    // --- internals ---

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    pub(crate) fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn owning_layer_index(&self, id: NodeId) -> Option<usize> {
        self.layers
            .iter()
            .position(|&l| l == id || self.is_descendant_of(id, l))
    }

    /// Gather `(name, id)` for every named node in the subtree, rejecting
    /// duplicates within the subtree itself. The check half of the two-phase
    /// check/commit attach.
    fn collect_names(&self, id: NodeId) -> Result<Vec<(String, NodeId)>, AttachError> {
        let mut out = Vec::new();
        self.collect_names_into(id, &mut out)?;
        Ok(out)
    }

    fn collect_names_into(
        &self,
        id: NodeId,
        out: &mut Vec<(String, NodeId)>,
    ) -> Result<(), AttachError> {
        let n = self.node(id);
        if let Some(name) = &n.data.name {
            if out.iter().any(|(seen, _)| seen == name) {
                return Err(AttachError::DuplicateId(name.clone()));
            }
            out.push((name.clone(), id));
        }
        for &c in &n.children {
            self.collect_names_into(c, out)?;
        }
        Ok(())
    }

    /// Search a subtree for a node carrying `name`.
    fn find_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let n = self.node(id);
        if n.data.name.as_deref() == Some(name) {
            return Some(id);
        }
        n.children.iter().find_map(|&c| self.find_named(c, name))
    }

    /// Unlink without the liveness diagnostic; callers have checked.
    fn detach_quiet(&mut self, id: NodeId) {
        if self.is_attached(id) {
            self.unregister_subtree(id);
        }
        if let Some(parent) = self.node(id).parent {
            let p = self.node_mut(parent);
            p.children.retain(|c| *c != id);
            self.node_mut(id).parent = None;
        } else {
            self.layers.retain(|l| *l != id);
        }
    }

    fn unregister_subtree(&mut self, id: NodeId) {
        let n = self.node(id);
        let name = n.data.name.clone();
        let children = n.children.clone();
        if let Some(name) = name {
            // Only drop the entry if it still points at this node.
            if self.registry.get(&name) == Some(&id) {
                self.registry.remove(&name);
            }
        }
        for c in children {
            self.unregister_subtree(c);
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = self.node(id).children.clone();
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }
}
