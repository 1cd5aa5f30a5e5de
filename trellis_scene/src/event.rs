// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event values, listener registration, and the dispatch primitives.
//!
//! Three propagation shapes exist, and they are deliberately primitive — all
//! routing policy (capture, enter/leave sequencing, focus) lives in the
//! router crate:
//!
//! - **Bubble**: target's listeners in registration order, then the parent,
//!   up to the tree root. The stop flag is checked after every callback, so
//!   remaining listeners on the *same* node after the stopping one are also
//!   skipped.
//! - **Self-only**: the target's listeners only; the stop flag is ignored.
//! - **Trickle-down**: the node, then every child in forward order,
//!   unconditionally. A broadcast for resize/reposition notifications that
//!   must reach all descendants.
//!
//! Listeners receive only the event, never the tree. The listener table is
//! taken out of the node for the duration of its batch, so re-entrant tree
//! mutation from inside a callback is structurally impossible rather than a
//! guarded hazard.

use alloc::boxed::Box;
use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::Point;

use crate::tree::Tree;
use crate::types::NodeId;

/// The event kinds the core recognizes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer is over the node this tick.
    Hover,
    /// Pointer entered the node (self-only; sequenced by the router).
    Enter,
    /// Pointer left the node (self-only; sequenced by the router).
    Leave,
    /// Button press and release on the same target.
    Click,
    /// Button went down.
    Press,
    /// Button went up.
    Release,
    /// Pointer moved while a button is held.
    Drag,
    /// Two clicks in quick succession.
    DoubleClick,
    /// Scroll input over the node.
    Scroll,
    /// A key produced input while the node was focused or hovered.
    KeyPress,
    /// A key went down while the node was focused or hovered.
    KeyDown,
    /// The node's container resized it (trickle-down only).
    Resize,
    /// The node's container moved it (trickle-down only).
    Reposition,
    /// The node gained keyboard focus (self-only).
    Focus,
    /// The node lost keyboard focus (self-only).
    Blur,
}

/// A dispatched event.
///
/// Mutable so a listener can raise the propagation-stopped flag; that flag is
/// the only inter-listener signal.
#[derive(Debug)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Pointer position at dispatch time, in canvas coordinates.
    pub pos: Point,
    /// The resolved target node.
    pub target: NodeId,
    /// Active key for keyboard kinds.
    pub key: Option<u32>,
    stopped: bool,
}

impl Event {
    /// A pointer-shaped event.
    #[must_use]
    pub fn pointer(kind: EventKind, pos: Point, target: NodeId) -> Self {
        Self {
            kind,
            pos,
            target,
            key: None,
            stopped: false,
        }
    }

    /// A keyboard-shaped event.
    #[must_use]
    pub fn key(kind: EventKind, pos: Point, key: u32, target: NodeId) -> Self {
        Self {
            kind,
            pos,
            target,
            key: Some(key),
            stopped: false,
        }
    }

    /// Stop propagation to later listeners and ancestors.
    ///
    /// Self-only and trickle-down dispatch ignore the flag.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Whether a listener has stopped propagation.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// A registered listener callback.
pub type EventHandler = Box<dyn FnMut(&mut Event)>;

/// Per-node listener storage: kind to callbacks, insertion order preserved.
pub(crate) type ListenerTable = HashMap<EventKind, Vec<EventHandler>>;

impl Tree {
    /// Register a listener for `kind` on a node.
    ///
    /// Listeners run in registration order; any number may be registered per
    /// kind. Stale ids are a logged no-op.
    pub fn add_listener(&mut self, id: NodeId, kind: EventKind, handler: EventHandler) {
        let Some(node) = self.node_opt_mut(id) else {
            tracing::warn!("add_listener: stale node id, ignoring");
            return;
        };
        node.listeners.entry(kind).or_default().push(handler);
    }

    /// Bubble `event` from its target up the parent chain.
    ///
    /// Terminates at the tree root, or as soon as a listener stops
    /// propagation — including the remaining listeners on the node where the
    /// stop was raised.
    pub fn dispatch_bubble(&mut self, target: NodeId, event: &mut Event) {
        let mut cur = Some(target);
        while let Some(id) = cur {
            if !self.is_alive(id) {
                return;
            }
            self.run_listeners(id, event, true);
            if event.is_stopped() {
                return;
            }
            cur = self.parent_of(id);
        }
    }

    /// Invoke the target's listeners only. The stop flag is ignored.
    pub fn dispatch_self(&mut self, target: NodeId, event: &mut Event) {
        if !self.is_alive(target) {
            return;
        }
        self.run_listeners(target, event, false);
    }

    /// Broadcast `event` to a node and every descendant, forward order,
    /// regardless of the stop flag.
    pub fn dispatch_trickle(&mut self, target: NodeId, event: &mut Event) {
        if !self.is_alive(target) {
            return;
        }
        self.run_listeners(target, event, false);
        let children = self.node(target).children.clone();
        for child in children {
            self.dispatch_trickle(child, event);
        }
    }

    /// Run one node's listener batch for the event's kind.
    ///
    /// The batch is moved out of the node while it runs; listeners therefore
    /// never observe the tree mid-dispatch.
    fn run_listeners(&mut self, id: NodeId, event: &mut Event, honor_stop: bool) {
        let Some(mut handlers) = self
            .node_opt_mut(id)
            .and_then(|n| n.listeners.remove(&event.kind))
        else {
            return;
        };
        for handler in handlers.iter_mut() {
            handler(event);
            if honor_stop && event.is_stopped() {
                break;
            }
        }
        if let Some(node) = self.node_opt_mut(id) {
            node.listeners.insert(event.kind, handlers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeData;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn chain(tree: &mut Tree, len: usize) -> Vec<NodeId> {
        let mut out = Vec::new();
        for i in 0..len {
            let id = tree.insert(NodeData::default());
            if i > 0 {
                tree.attach(out[i - 1], id).unwrap();
            }
            out.push(id);
        }
        out
    }

    fn record(
        tree: &mut Tree,
        id: NodeId,
        kind: EventKind,
        log: &Rc<RefCell<Vec<&'static str>>>,
        tag: &'static str,
    ) {
        let log = Rc::clone(log);
        tree.add_listener(
            id,
            kind,
            Box::new(move |_| {
                log.borrow_mut().push(tag);
            }),
        );
    }

    #[test]
    fn bubble_walks_to_root() {
        let mut tree = Tree::new();
        let nodes = chain(&mut tree, 3);
        let log = Rc::new(RefCell::new(Vec::new()));
        record(&mut tree, nodes[0], EventKind::Click, &log, "outer");
        record(&mut tree, nodes[1], EventKind::Click, &log, "middle");
        record(&mut tree, nodes[2], EventKind::Click, &log, "inner");

        let mut ev = Event::pointer(EventKind::Click, Point::ZERO, nodes[2]);
        tree.dispatch_bubble(nodes[2], &mut ev);
        assert_eq!(*log.borrow(), vec!["inner", "middle", "outer"]);
    }

    #[test]
    fn stop_on_middle_node_halts_ancestors() {
        let mut tree = Tree::new();
        let nodes = chain(&mut tree, 3);
        let log = Rc::new(RefCell::new(Vec::new()));
        record(&mut tree, nodes[0], EventKind::Click, &log, "outer");
        record(&mut tree, nodes[2], EventKind::Click, &log, "inner");
        {
            let log = Rc::clone(&log);
            tree.add_listener(
                nodes[1],
                EventKind::Click,
                Box::new(move |ev| {
                    log.borrow_mut().push("middle");
                    ev.stop_propagation();
                }),
            );
        }

        let mut ev = Event::pointer(EventKind::Click, Point::ZERO, nodes[2]);
        tree.dispatch_bubble(nodes[2], &mut ev);
        assert_eq!(
            *log.borrow(),
            vec!["inner", "middle"],
            "outermost listener never fires"
        );
    }

    #[test]
    fn stop_skips_remaining_listeners_on_same_node() {
        // Pins the interruption granularity: the flag is checked after each
        // callback, so listeners registered after the stopping one on the
        // same node do not run.
        let mut tree = Tree::new();
        let n = tree.insert(NodeData::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = Rc::clone(&log);
            tree.add_listener(
                n,
                EventKind::Press,
                Box::new(move |ev| {
                    log.borrow_mut().push("first");
                    ev.stop_propagation();
                }),
            );
        }
        record(&mut tree, n, EventKind::Press, &log, "second");

        let mut ev = Event::pointer(EventKind::Press, Point::ZERO, n);
        tree.dispatch_bubble(n, &mut ev);
        assert_eq!(*log.borrow(), vec!["first"]);
    }

    #[test]
    fn self_only_ignores_stop_flag() {
        let mut tree = Tree::new();
        let nodes = chain(&mut tree, 2);
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = Rc::clone(&log);
            tree.add_listener(
                nodes[1],
                EventKind::Enter,
                Box::new(move |ev| {
                    log.borrow_mut().push("a");
                    ev.stop_propagation();
                }),
            );
        }
        record(&mut tree, nodes[1], EventKind::Enter, &log, "b");
        record(&mut tree, nodes[0], EventKind::Enter, &log, "parent");

        let mut ev = Event::pointer(EventKind::Enter, Point::ZERO, nodes[1]);
        tree.dispatch_self(nodes[1], &mut ev);
        // Both listeners on the target fired; the parent never did.
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn trickle_reaches_every_descendant_despite_stop() {
        let mut tree = Tree::new();
        let root = tree.insert(NodeData::default());
        let a = tree.insert(NodeData::default());
        let b = tree.insert(NodeData::default());
        let a1 = tree.insert(NodeData::default());
        tree.attach(root, a).unwrap();
        tree.attach(root, b).unwrap();
        tree.attach(a, a1).unwrap();

        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = Rc::clone(&log);
            tree.add_listener(
                root,
                EventKind::Resize,
                Box::new(move |ev| {
                    log.borrow_mut().push("root");
                    ev.stop_propagation();
                }),
            );
        }
        record(&mut tree, a, EventKind::Resize, &log, "a");
        record(&mut tree, a1, EventKind::Resize, &log, "a1");
        record(&mut tree, b, EventKind::Resize, &log, "b");

        let mut ev = Event::pointer(EventKind::Resize, Point::ZERO, root);
        tree.dispatch_trickle(root, &mut ev);
        // Forward order, depth first, and the stop flag changed nothing.
        assert_eq!(*log.borrow(), vec!["root", "a", "a1", "b"]);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let mut tree = Tree::new();
        let n = tree.insert(NodeData::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        record(&mut tree, n, EventKind::Hover, &log, "1");
        record(&mut tree, n, EventKind::Hover, &log, "2");
        record(&mut tree, n, EventKind::Hover, &log, "3");
        let mut ev = Event::pointer(EventKind::Hover, Point::ZERO, n);
        tree.dispatch_self(n, &mut ev);
        assert_eq!(*log.borrow(), vec!["1", "2", "3"]);
    }

    #[test]
    fn kinds_are_independent() {
        let mut tree = Tree::new();
        let n = tree.insert(NodeData::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        record(&mut tree, n, EventKind::Click, &log, "click");
        record(&mut tree, n, EventKind::Press, &log, "press");
        let mut ev = Event::pointer(EventKind::Press, Point::ZERO, n);
        tree.dispatch_self(n, &mut ev);
        assert_eq!(*log.borrow(), vec!["press"]);
    }
}
