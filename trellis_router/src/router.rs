// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The routing state machine.
//!
//! ## Overview
//!
//! [`Router`] owns the stage's interaction state: the active element, the
//! entry-order stack of "entered" ancestors, and the focused input. Each
//! host-supplied sample flows through one of three entry points:
//!
//! - [`Router::route_pointer`] for discrete pointer kinds (press, release,
//!   click, drag, scroll, ...).
//! - [`Router::route_key`] for keyboard kinds.
//! - [`Router::tick`] once per frame, which re-runs hover routing and the
//!   enter/leave bookkeeping. Hover is level-triggered: it is derived from
//!   re-hit-testing every tick, not from edge events.
//!
//! ## Capture
//!
//! While the button is held and the active element is a real node, every
//! pointer kind routes by bubbling straight to that node, bypassing hit
//! testing. This is what keeps a drag or resize fed with samples after the
//! pointer leaves the node's bounds.
//!
//! ## Enter/leave
//!
//! The entered stack always holds an ancestor-chain prefix still under the
//! pointer. Entering a deep target pushes its not-yet-entered ancestors
//! silently (root-most first) and dispatches a self-only `Enter` to the
//! target alone; leaving is detected by re-testing the stack top each tick.
//! A discontinuous active-element change (the new target is neither ancestor
//! nor descendant of the old) additionally drains the stack down to the
//! nearest entry that is itself a top-level layer, so entries belonging to a
//! since-removed subtree cannot linger.

use kurbo::Point;
use smallvec::SmallVec;

use trellis_scene::{Event, EventKind, NodeId, Tree};

use crate::input::InputState;

/// What the pointer is currently engaged with.
///
/// Three-way on purpose: [`ActiveTarget::Reserved`] marks an interaction in
/// progress whose target is not a scene node (for example, the instant an
/// optimised drag swaps the real container for its proxy), which must not be
/// confused with "nothing engaged".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ActiveTarget {
    /// Nothing engaged.
    #[default]
    Vacant,
    /// Engaged, but not by a scene node.
    Reserved,
    /// Engaged by this node.
    Node(NodeId),
}

impl ActiveTarget {
    /// The node, if this target is a real node.
    #[must_use]
    pub const fn node(self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(id),
            _ => None,
        }
    }
}

/// The stage's routing state machine. See the module docs for the protocol.
#[derive(Debug, Default)]
pub struct Router {
    active: ActiveTarget,
    last_active: ActiveTarget,
    entered: SmallVec<[NodeId; 8]>,
    focus: Option<NodeId>,
}

impl Router {
    /// A router with nothing engaged, entered, or focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current active element.
    #[must_use]
    pub fn active(&self) -> ActiveTarget {
        self.active
    }

    /// The previous active element, kept to detect discontinuous transitions.
    #[must_use]
    pub fn last_active(&self) -> ActiveTarget {
        self.last_active
    }

    /// The focused input node, if any.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focus
    }

    /// The entry-order stack, root-most first.
    #[must_use]
    pub fn entered(&self) -> &[NodeId] {
        &self.entered
    }

    /// Install an active element directly.
    ///
    /// The drag interaction uses this to substitute its proxy as the capture
    /// target and to restore the real container on release.
    pub fn set_active(&mut self, target: ActiveTarget) {
        if self.active != target {
            self.last_active = self.active;
        }
        self.active = target;
    }

    /// Route one discrete pointer sample.
    pub fn route_pointer(&mut self, tree: &mut Tree, input: &InputState, kind: EventKind) {
        self.prune(tree);

        // Capture: a held button pins routing to the active element.
        if input.pressed
            && let ActiveTarget::Node(id) = self.active
        {
            let mut ev = Event::pointer(kind, input.pointer, id);
            tree.dispatch_bubble(id, &mut ev);
            return;
        }

        match self.hit_scan(tree, input) {
            None => {
                if matches!(kind, EventKind::Click | EventKind::Press) {
                    self.blur_focus(tree, input);
                }
                self.set_active(ActiveTarget::Vacant);
            }
            Some(target) => {
                self.update_active(tree, target);
                let mut ev = Event::pointer(kind, input.pointer, target);
                tree.dispatch_bubble(target, &mut ev);
                if matches!(kind, EventKind::Click | EventKind::Press)
                    && tree.kind(target).is_some_and(|k| k.is_focusable())
                {
                    self.transfer_focus(tree, target, input);
                }
            }
        }
    }

    /// Route one keyboard sample.
    ///
    /// A focused input receives keys directly, bypassing hit testing;
    /// otherwise the key goes to the node under the pointer, and with no hit
    /// the active element is cleared.
    pub fn route_key(&mut self, tree: &mut Tree, input: &InputState, kind: EventKind) {
        self.prune(tree);
        let key = input.key.unwrap_or(0);
        if let Some(focused) = self.focus {
            let mut ev = Event::key(kind, input.pointer, key, focused);
            tree.dispatch_bubble(focused, &mut ev);
            return;
        }
        match self.hit_scan(tree, input) {
            Some(target) => {
                let mut ev = Event::key(kind, input.pointer, key, target);
                tree.dispatch_bubble(target, &mut ev);
            }
            None => self.set_active(ActiveTarget::Vacant),
        }
    }

    /// Per-frame maintenance: re-route hover and update enter/leave state.
    ///
    /// Level-triggered: the host calls this every frame and the router
    /// re-derives hover, enter, and leave from fresh hit tests.
    pub fn tick(&mut self, tree: &mut Tree, input: &InputState) {
        self.route_pointer(tree, input, EventKind::Hover);
        self.track_leave(tree, input);
        self.track_enter(tree, input);
    }

    /// Drop routing references that point at dead or detached nodes.
    ///
    /// Removing the active element resets it to vacant; removing the focused
    /// input (or any of its ancestors) blurs it — with a `Blur` dispatch if
    /// the node is still alive — and clears focus.
    pub fn prune(&mut self, tree: &mut Tree) {
        if let ActiveTarget::Node(id) = self.active
            && !tree.is_attached(id)
        {
            tracing::debug!("active element left the stage, clearing");
            self.active = ActiveTarget::Vacant;
        }
        if let ActiveTarget::Node(id) = self.last_active
            && !tree.is_attached(id)
        {
            self.last_active = ActiveTarget::Vacant;
        }
        if let Some(focused) = self.focus
            && !tree.is_attached(focused)
        {
            tracing::debug!("focused input left the stage, blurring");
            if tree.is_alive(focused) {
                let mut ev = Event::pointer(EventKind::Blur, Point::ZERO, focused);
                tree.dispatch_self(focused, &mut ev);
            }
            self.focus = None;
        }
        self.entered.retain(|&mut id| tree.is_attached(id));
    }

    // --- internals ---

    /// Scan top-level layers back-to-front for the deepest frontmost hit.
    fn hit_scan(&self, tree: &Tree, input: &InputState) -> Option<NodeId> {
        tree.layers()
            .iter()
            .rev()
            .find_map(|&layer| tree.find_hit_target(layer, input.pointer))
    }

    /// Make `target` the active element, draining the entered stack first on
    /// a discontinuous transition.
    fn update_active(&mut self, tree: &mut Tree, target: NodeId) {
        if let ActiveTarget::Node(old) = self.active
            && old != target
            && !tree.is_descendant_of(target, old)
            && !tree.is_descendant_of(old, target)
        {
            self.leave_transition(tree);
        }
        self.set_active(ActiveTarget::Node(target));
    }

    /// Drain the entered stack down to the nearest entry that is itself a
    /// top-level layer, dispatching `Leave` to each drained entry from the
    /// topmost down. Entries of a since-removed subtree have no surviving
    /// layer below them and therefore all drain.
    fn leave_transition(&mut self, tree: &mut Tree) {
        let keep = self
            .entered
            .iter()
            .rposition(|id| tree.layers().contains(id))
            .map_or(0, |i| i + 1);
        let drained: SmallVec<[NodeId; 8]> = self.entered.drain(keep..).collect();
        for &id in drained.iter().rev() {
            let mut ev = Event::pointer(EventKind::Leave, Point::ZERO, id);
            tree.dispatch_self(id, &mut ev);
        }
    }

    /// Pop every stack top that no longer hits the pointer, dispatching a
    /// self-only `Leave` to each; stop at the first entry still hit, so the
    /// stack stays a valid ancestor-chain prefix under the pointer.
    fn track_leave(&mut self, tree: &mut Tree, input: &InputState) {
        while let Some(&top) = self.entered.last() {
            if tree.hit_test(top, input.pointer) {
                break;
            }
            self.entered.pop();
            let mut ev = Event::pointer(EventKind::Leave, input.pointer, top);
            tree.dispatch_self(top, &mut ev);
        }
    }

    /// If the active element is a real node not yet entered, push its
    /// not-yet-entered ancestors silently (root-most first), dispatch a
    /// self-only `Enter` to the target, and push the target.
    fn track_enter(&mut self, tree: &mut Tree, input: &InputState) {
        let Some(target) = self.active.node() else {
            return;
        };
        if self.entered.contains(&target) {
            return;
        }
        let mut chain: SmallVec<[NodeId; 8]> = SmallVec::new();
        let mut cur = tree.parent_of(target);
        while let Some(ancestor) = cur {
            chain.push(ancestor);
            cur = tree.parent_of(ancestor);
        }
        for &ancestor in chain.iter().rev() {
            if !self.entered.contains(&ancestor) {
                self.entered.push(ancestor);
            }
        }
        let mut ev = Event::pointer(EventKind::Enter, input.pointer, target);
        tree.dispatch_self(target, &mut ev);
        self.entered.push(target);
    }

    /// Exclusive focus transfer: blur the previous input, focus the target.
    fn transfer_focus(&mut self, tree: &mut Tree, target: NodeId, input: &InputState) {
        if self.focus == Some(target) {
            return;
        }
        self.blur_focus(tree, input);
        self.focus = Some(target);
        let mut ev = Event::pointer(EventKind::Focus, input.pointer, target);
        tree.dispatch_self(target, &mut ev);
    }

    /// Blur and clear the focused input, if any.
    fn blur_focus(&mut self, tree: &mut Tree, input: &InputState) {
        if let Some(old) = self.focus.take() {
            let mut ev = Event::pointer(EventKind::Blur, input.pointer, old);
            tree.dispatch_self(old, &mut ev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Rect;
    use trellis_scene::{Kind, NodeData};

    type Log = Rc<RefCell<Vec<(&'static str, EventKind)>>>;

    fn spy(tree: &mut Tree, id: NodeId, kind: EventKind, log: &Log, tag: &'static str) {
        let log = Rc::clone(log);
        tree.add_listener(
            id,
            kind,
            Box::new(move |ev| {
                log.borrow_mut().push((tag, ev.kind));
            }),
        );
    }

    fn node(tree: &mut Tree, frame: Rect, kind: Kind) -> NodeId {
        tree.insert(NodeData {
            frame,
            kind,
            ..NodeData::default()
        })
    }

    /// One layer at (0,0)-(200,200) with an input field and a button inside.
    fn stage(tree: &mut Tree) -> (NodeId, NodeId, NodeId) {
        let layer = node(tree, Rect::new(0.0, 0.0, 200.0, 200.0), Kind::Frame);
        let field = node(tree, Rect::new(10.0, 10.0, 60.0, 40.0), Kind::Input);
        let button = node(tree, Rect::new(100.0, 10.0, 160.0, 40.0), Kind::Plain);
        tree.add_layer(layer).unwrap();
        tree.attach(layer, field).unwrap();
        tree.attach(layer, button).unwrap();
        (layer, field, button)
    }

    #[test]
    fn hover_tick_sets_active_to_deepest_hit() {
        let mut tree = Tree::new();
        let (_, field, _) = stage(&mut tree);
        let mut router = Router::new();
        router.tick(&mut tree, &InputState::at(Point::new(20.0, 20.0)));
        assert_eq!(router.active(), ActiveTarget::Node(field));
    }

    #[test]
    fn capture_routes_to_active_while_button_held() {
        let mut tree = Tree::new();
        let (_, field, button) = stage(&mut tree);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        spy(&mut tree, field, EventKind::Drag, &log, "field");
        spy(&mut tree, button, EventKind::Drag, &log, "button");

        let mut router = Router::new();
        // Hover over the field engages it.
        router.tick(&mut tree, &InputState::at(Point::new(20.0, 20.0)));
        // Button goes down and the pointer drags across the button's bounds;
        // capture keeps routing to the field.
        let drag = InputState::at(Point::new(120.0, 20.0)).held();
        router.route_pointer(&mut tree, &drag, EventKind::Drag);

        assert_eq!(*log.borrow(), vec![("field", EventKind::Drag)]);
        assert_eq!(router.active(), ActiveTarget::Node(field));
    }

    #[test]
    fn frontmost_layer_wins_hit_scan() {
        let mut tree = Tree::new();
        let back = node(&mut tree, Rect::new(0.0, 0.0, 100.0, 100.0), Kind::Frame);
        let front = node(&mut tree, Rect::new(0.0, 0.0, 100.0, 100.0), Kind::Frame);
        tree.add_layer(back).unwrap();
        tree.add_layer(front).unwrap();

        let mut router = Router::new();
        router.tick(&mut tree, &InputState::at(Point::new(50.0, 50.0)));
        assert_eq!(router.active(), ActiveTarget::Node(front));

        tree.send_to_front(back);
        router.tick(&mut tree, &InputState::at(Point::new(50.0, 50.0)));
        assert_eq!(router.active(), ActiveTarget::Node(back));
    }

    #[test]
    fn click_on_input_transfers_focus_exclusively() {
        let mut tree = Tree::new();
        let layer = node(&mut tree, Rect::new(0.0, 0.0, 200.0, 200.0), Kind::Frame);
        let first = node(&mut tree, Rect::new(10.0, 10.0, 60.0, 40.0), Kind::Input);
        let second = node(&mut tree, Rect::new(10.0, 60.0, 60.0, 90.0), Kind::Input);
        tree.add_layer(layer).unwrap();
        tree.attach(layer, first).unwrap();
        tree.attach(layer, second).unwrap();

        let log: Log = Rc::new(RefCell::new(Vec::new()));
        spy(&mut tree, first, EventKind::Focus, &log, "first");
        spy(&mut tree, first, EventKind::Blur, &log, "first");
        spy(&mut tree, second, EventKind::Focus, &log, "second");

        let mut router = Router::new();
        router.route_pointer(
            &mut tree,
            &InputState::at(Point::new(20.0, 20.0)),
            EventKind::Click,
        );
        assert_eq!(router.focused(), Some(first));
        router.route_pointer(
            &mut tree,
            &InputState::at(Point::new(20.0, 70.0)),
            EventKind::Click,
        );
        assert_eq!(router.focused(), Some(second));
        assert_eq!(
            *log.borrow(),
            vec![
                ("first", EventKind::Focus),
                ("first", EventKind::Blur),
                ("second", EventKind::Focus),
            ]
        );
    }

    #[test]
    fn click_on_empty_space_blurs_focus() {
        let mut tree = Tree::new();
        let (_, field, _) = stage(&mut tree);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        spy(&mut tree, field, EventKind::Blur, &log, "field");

        let mut router = Router::new();
        router.route_pointer(
            &mut tree,
            &InputState::at(Point::new(20.0, 20.0)),
            EventKind::Click,
        );
        assert_eq!(router.focused(), Some(field));

        router.route_pointer(
            &mut tree,
            &InputState::at(Point::new(500.0, 500.0)),
            EventKind::Click,
        );
        assert_eq!(router.focused(), None);
        assert_eq!(router.active(), ActiveTarget::Vacant);
        assert_eq!(*log.borrow(), vec![("field", EventKind::Blur)]);
    }

    #[test]
    fn plain_targets_do_not_take_focus() {
        let mut tree = Tree::new();
        let (_, field, button) = stage(&mut tree);
        let mut router = Router::new();
        router.route_pointer(
            &mut tree,
            &InputState::at(Point::new(20.0, 20.0)),
            EventKind::Click,
        );
        assert_eq!(router.focused(), Some(field));
        router.route_pointer(
            &mut tree,
            &InputState::at(Point::new(120.0, 20.0)),
            EventKind::Click,
        );
        // A plain button neither takes nor drops focus.
        assert_eq!(router.focused(), Some(field));
        assert_eq!(router.active(), ActiveTarget::Node(button));
    }

    #[test]
    fn enter_pushes_silent_ancestors_and_fires_target_only() {
        let mut tree = Tree::new();
        let (layer, field, _) = stage(&mut tree);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        spy(&mut tree, layer, EventKind::Enter, &log, "layer");
        spy(&mut tree, field, EventKind::Enter, &log, "field");

        let mut router = Router::new();
        // Pointer arrives directly over the nested field.
        router.tick(&mut tree, &InputState::at(Point::new(20.0, 20.0)));

        // Ancestors are pushed without events; only the target gets Enter.
        assert_eq!(router.entered(), &[layer, field]);
        assert_eq!(*log.borrow(), vec![("field", EventKind::Enter)]);
    }

    #[test]
    fn gradual_entry_fires_enter_per_hop() {
        let mut tree = Tree::new();
        let (layer, field, _) = stage(&mut tree);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        spy(&mut tree, layer, EventKind::Enter, &log, "layer");
        spy(&mut tree, field, EventKind::Enter, &log, "field");

        let mut router = Router::new();
        // First over empty layer area, then over the field.
        router.tick(&mut tree, &InputState::at(Point::new(190.0, 190.0)));
        router.tick(&mut tree, &InputState::at(Point::new(20.0, 20.0)));

        assert_eq!(router.entered(), &[layer, field]);
        assert_eq!(
            *log.borrow(),
            vec![("layer", EventKind::Enter), ("field", EventKind::Enter)]
        );
    }

    #[test]
    fn leave_pops_in_inner_to_outer_order() {
        let mut tree = Tree::new();
        let (layer, field, _) = stage(&mut tree);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        spy(&mut tree, layer, EventKind::Leave, &log, "layer");
        spy(&mut tree, field, EventKind::Leave, &log, "field");

        let mut router = Router::new();
        router.tick(&mut tree, &InputState::at(Point::new(20.0, 20.0)));
        assert_eq!(router.entered(), &[layer, field]);

        // Pointer jumps off the stage entirely.
        router.tick(&mut tree, &InputState::at(Point::new(500.0, 500.0)));
        assert!(router.entered().is_empty());
        assert_eq!(
            *log.borrow(),
            vec![("field", EventKind::Leave), ("layer", EventKind::Leave)]
        );
    }

    #[test]
    fn sibling_hop_leaves_old_and_enters_new() {
        let mut tree = Tree::new();
        let (_, field, button) = stage(&mut tree);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        spy(&mut tree, field, EventKind::Leave, &log, "field");
        spy(&mut tree, button, EventKind::Enter, &log, "button");

        let mut router = Router::new();
        router.tick(&mut tree, &InputState::at(Point::new(20.0, 20.0)));
        router.tick(&mut tree, &InputState::at(Point::new(120.0, 20.0)));

        assert_eq!(
            *log.borrow(),
            vec![
                ("field", EventKind::Leave),
                ("button", EventKind::Enter),
            ]
        );
        assert!(router.entered().contains(&button));
        assert!(!router.entered().contains(&field));
    }

    #[test]
    fn layer_hop_drains_entered_stack() {
        let mut tree = Tree::new();
        let left = node(&mut tree, Rect::new(0.0, 0.0, 100.0, 100.0), Kind::Frame);
        let left_child = node(&mut tree, Rect::new(10.0, 10.0, 90.0, 90.0), Kind::Plain);
        let right = node(&mut tree, Rect::new(200.0, 0.0, 300.0, 100.0), Kind::Frame);
        tree.add_layer(left).unwrap();
        tree.add_layer(right).unwrap();
        tree.attach(left, left_child).unwrap();

        let log: Log = Rc::new(RefCell::new(Vec::new()));
        spy(&mut tree, left, EventKind::Leave, &log, "left");
        spy(&mut tree, left_child, EventKind::Leave, &log, "left_child");
        spy(&mut tree, right, EventKind::Enter, &log, "right");

        let mut router = Router::new();
        router.tick(&mut tree, &InputState::at(Point::new(50.0, 50.0)));
        assert_eq!(router.entered(), &[left, left_child]);

        router.tick(&mut tree, &InputState::at(Point::new(250.0, 50.0)));
        assert_eq!(router.entered(), &[right]);
        assert_eq!(
            *log.borrow(),
            vec![
                ("left_child", EventKind::Leave),
                ("left", EventKind::Leave),
                ("right", EventKind::Enter),
            ]
        );
    }

    #[test]
    fn removing_active_element_vacates_it() {
        let mut tree = Tree::new();
        let (_, field, _) = stage(&mut tree);
        let mut router = Router::new();
        router.tick(&mut tree, &InputState::at(Point::new(20.0, 20.0)));
        assert_eq!(router.active(), ActiveTarget::Node(field));

        tree.remove(field);
        router.prune(&mut tree);
        assert_eq!(router.active(), ActiveTarget::Vacant);
    }

    #[test]
    fn removing_focus_ancestor_blurs_and_clears() {
        let mut tree = Tree::new();
        let layer = node(&mut tree, Rect::new(0.0, 0.0, 200.0, 200.0), Kind::Frame);
        let panel = node(&mut tree, Rect::new(0.0, 0.0, 100.0, 100.0), Kind::Frame);
        let field = node(&mut tree, Rect::new(10.0, 10.0, 60.0, 40.0), Kind::Input);
        tree.add_layer(layer).unwrap();
        tree.attach(layer, panel).unwrap();
        tree.attach(panel, field).unwrap();

        let log: Log = Rc::new(RefCell::new(Vec::new()));
        spy(&mut tree, field, EventKind::Blur, &log, "field");

        let mut router = Router::new();
        router.route_pointer(
            &mut tree,
            &InputState::at(Point::new(20.0, 20.0)),
            EventKind::Click,
        );
        assert_eq!(router.focused(), Some(field));

        // Detaching an ancestor takes the field off the stage; the field is
        // still alive, so it observes its Blur.
        tree.detach(panel);
        router.prune(&mut tree);
        assert_eq!(router.focused(), None);
        assert_eq!(*log.borrow(), vec![("field", EventKind::Blur)]);
    }

    #[test]
    fn keyboard_routes_to_focus_without_hit_test() {
        let mut tree = Tree::new();
        let (_, field, button) = stage(&mut tree);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        spy(&mut tree, field, EventKind::KeyPress, &log, "field");
        spy(&mut tree, button, EventKind::KeyPress, &log, "button");

        let mut router = Router::new();
        router.route_pointer(
            &mut tree,
            &InputState::at(Point::new(20.0, 20.0)),
            EventKind::Click,
        );
        // Pointer now rests over the button, but the focused field gets keys.
        let sample = InputState::at(Point::new(120.0, 20.0)).with_key(97);
        router.route_key(&mut tree, &sample, EventKind::KeyPress);
        assert_eq!(*log.borrow(), vec![("field", EventKind::KeyPress)]);
    }

    #[test]
    fn keyboard_without_focus_falls_back_to_hit_test() {
        let mut tree = Tree::new();
        let (_, _, button) = stage(&mut tree);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        spy(&mut tree, button, EventKind::KeyDown, &log, "button");

        let mut router = Router::new();
        let sample = InputState::at(Point::new(120.0, 20.0)).with_key(32);
        router.route_key(&mut tree, &sample, EventKind::KeyDown);
        assert_eq!(*log.borrow(), vec![("button", EventKind::KeyDown)]);

        // No hit anywhere clears the active element.
        router.tick(&mut tree, &InputState::at(Point::new(120.0, 20.0)));
        let off = InputState::at(Point::new(500.0, 500.0)).with_key(32);
        router.route_key(&mut tree, &off, EventKind::KeyDown);
        assert_eq!(router.active(), ActiveTarget::Vacant);
    }

    #[test]
    fn set_active_records_last_active() {
        let mut tree = Tree::new();
        let (_, field, button) = stage(&mut tree);
        let mut router = Router::new();
        router.tick(&mut tree, &InputState::at(Point::new(20.0, 20.0)));
        router.tick(&mut tree, &InputState::at(Point::new(120.0, 20.0)));
        assert_eq!(router.active(), ActiveTarget::Node(button));
        assert_eq!(router.last_active(), ActiveTarget::Node(field));
    }
}
