// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Host`] for tests, benchmarks, and headless tooling.
//!
//! [`MemoryHost`] models just enough of a document for the controller: a body,
//! element and text nodes in a tree, class and id attributes, bounding
//! rectangles, computed and inline styles, and counters for listener and
//! subscription traffic.
//!
//! Nodes are addressed by [`NodeId`]. Removing a node detaches it but keeps the
//! handle valid; a detached element reports no bounding rectangle, which is how
//! the controller sees a stale handle.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::memory::MemoryHost;
//! use understory_drag_drop::{DragDrop, PointerEvent, Target};
//!
//! let mut host = MemoryHost::new();
//! let card = host.add_element(Rect::new(0.0, 0.0, 50.0, 50.0));
//! host.add_class(card, "card");
//!
//! let mut dd = DragDrop::new(host);
//! let summary = dd.set_draggable([Target::selector(".card")]);
//! assert_eq!(summary.added, 1);
//! assert_eq!(dd.host().press_listeners(card), 1);
//!
//! dd.pointer_down(&card, PointerEvent::mouse(Point::new(5.0, 5.0), 0)).unwrap();
//! assert_eq!(dd.host().active_subscriptions(), 1);
//! ```

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;

use crate::host::{ChildNode, Host};
use crate::input::InputSource;
use crate::selector::Selector;

/// Handle to a node in a [`MemoryHost`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Index of the node in creation order.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Handle to an active subscription in a [`MemoryHost`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    serial: u64,
    source: InputSource,
}

impl SubscriptionId {
    /// Listener family this subscription routes.
    pub const fn source(self) -> InputSource {
        self.source
    }
}

#[derive(Clone, Debug, Default)]
struct Node {
    text: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    id: Option<String>,
    bounds: Option<Rect>,
    computed: BTreeMap<String, String>,
    inline: BTreeMap<String, String>,
    press_listeners: usize,
}

/// An in-memory document.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    nodes: Vec<Node>,
    subscriptions: Vec<SubscriptionId>,
    next_serial: u64,
    subscribe_calls: usize,
    unsubscribe_calls: usize,
    removals: usize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    const BODY: NodeId = NodeId(0);

    /// Creates a document holding only an empty body.
    pub fn new() -> Self {
        Self {
            nodes: alloc::vec![Node::default()],
            subscriptions: Vec::new(),
            next_serial: 0,
            subscribe_calls: 0,
            unsubscribe_calls: 0,
            removals: 0,
        }
    }

    /// The body node.
    pub const fn body(&self) -> NodeId {
        Self::BODY
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        self.unlink(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn unlink(&mut self, child: NodeId) {
        let Some(parent) = self.node_mut(child).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != child);
        }
    }

    /// Adds an element with `bounds` as the last child of the body.
    pub fn add_element(&mut self, bounds: Rect) -> NodeId {
        self.add_child_element(Self::BODY, bounds)
    }

    /// Adds an element with `bounds` as the last child of `parent`.
    pub fn add_child_element(&mut self, parent: NodeId, bounds: Rect) -> NodeId {
        let id = self.push(Node {
            bounds: Some(bounds),
            ..Node::default()
        });
        self.link(parent, id);
        id
    }

    /// Adds a text node as the last child of `parent`.
    pub fn add_text(&mut self, parent: NodeId) -> NodeId {
        let id = self.push(Node {
            text: true,
            ..Node::default()
        });
        self.link(parent, id);
        id
    }

    /// Adds a class to an element.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    /// The element's id attribute.
    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.node(node)?.id.as_deref()
    }

    /// Replaces an element's bounding rectangle.
    pub fn set_bounds(&mut self, node: NodeId, bounds: Rect) {
        if let Some(n) = self.node_mut(node) {
            n.bounds = Some(bounds);
        }
    }

    /// Sets a computed style value, by CSS property name.
    pub fn set_computed(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.computed.insert(property.to_string(), value.to_string());
        }
    }

    /// An inline style value, by the name it was set with.
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node)?.inline.get(property).map(String::as_str)
    }

    /// Number of inline style properties set on a node.
    pub fn style_count(&self, node: NodeId) -> usize {
        self.node(node).map_or(0, |n| n.inline.len())
    }

    /// Direct children of a node.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// Parent of a node, if attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    /// Returns `true` if the node is reachable from the body.
    pub fn is_in_document(&self, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == Self::BODY {
                return true;
            }
            cursor = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    /// Press listeners attached to a node.
    pub fn press_listeners(&self, node: NodeId) -> usize {
        self.node(node).map_or(0, |n| n.press_listeners)
    }

    /// Subscriptions started and not yet stopped.
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    /// Listener families of the active subscriptions.
    pub fn subscribed_sources(&self) -> impl Iterator<Item = InputSource> + '_ {
        self.subscriptions.iter().map(|s| s.source)
    }

    /// Total calls to [`Host::subscribe`].
    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls
    }

    /// Total calls to [`Host::unsubscribe`].
    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribe_calls
    }

    /// Total calls to [`Host::remove`].
    pub fn removals(&self) -> usize {
        self.removals
    }

    fn clone_subtree(&mut self, source: NodeId) -> NodeId {
        let Some(node) = self.node(source) else {
            return source;
        };
        let copy = Node {
            text: node.text,
            parent: None,
            children: Vec::new(),
            classes: node.classes.clone(),
            id: node.id.clone(),
            bounds: node.bounds,
            computed: node.computed.clone(),
            inline: node.inline.clone(),
            press_listeners: 0,
        };
        let children = node.children.clone();
        let id = self.push(copy);
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.link(id, child_copy);
        }
        id
    }

    fn matches(node: &Node, selector: &Selector<'_>) -> bool {
        match selector {
            Selector::Class(name) => node.classes.iter().any(|c| c == name),
            Selector::Id(name) => node.id.as_deref() == Some(*name),
        }
    }

    fn collect(&self, root: NodeId, selector: &Selector<'_>, out: &mut Vec<NodeId>) {
        for &child in self.children(root) {
            if let Some(node) = self.node(child) {
                if !node.text && Self::matches(node, selector) {
                    out.push(child);
                }
            }
            self.collect(child, selector, out);
        }
    }
}

impl Host for MemoryHost {
    type Element = NodeId;
    type Subscription = SubscriptionId;

    fn find(&self, selector: &Selector<'_>) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect(Self::BODY, selector, &mut out);
        if matches!(selector, Selector::Id(_)) {
            out.truncate(1);
        }
        out
    }

    fn bounding_rect(&self, element: &NodeId) -> Option<Rect> {
        if !self.is_in_document(*element) {
            return None;
        }
        self.node(*element)?.bounds
    }

    fn computed_style(&self, element: &NodeId, property: &str) -> String {
        self.node(*element)
            .and_then(|n| n.computed.get(property))
            .cloned()
            .unwrap_or_default()
    }

    fn set_style(&mut self, element: &NodeId, property: &str, value: &str) {
        if let Some(n) = self.node_mut(*element) {
            n.inline.insert(property.to_string(), value.to_string());
        }
    }

    fn deep_clone(&mut self, element: &NodeId) -> NodeId {
        self.clone_subtree(*element)
    }

    fn child_nodes(&self, element: &NodeId) -> Vec<ChildNode<NodeId>> {
        self.children(*element)
            .iter()
            .map(|&c| match self.node(c) {
                Some(n) if n.text => ChildNode::Text,
                _ => ChildNode::Element(c),
            })
            .collect()
    }

    fn create_overlay(&mut self) -> NodeId {
        self.push(Node::default())
    }

    fn set_id(&mut self, element: &NodeId, id: &str) {
        if let Some(n) = self.node_mut(*element) {
            n.id = Some(id.to_string());
        }
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.link(*parent, *child);
    }

    fn attach_to_body(&mut self, element: &NodeId) {
        self.link(Self::BODY, *element);
    }

    fn remove(&mut self, element: &NodeId) {
        self.removals += 1;
        self.unlink(*element);
    }

    fn listen_for_press(&mut self, element: &NodeId) {
        if let Some(n) = self.node_mut(*element) {
            n.press_listeners += 1;
        }
    }

    fn subscribe(&mut self, source: InputSource) -> SubscriptionId {
        self.subscribe_calls += 1;
        let subscription = SubscriptionId {
            serial: self.next_serial,
            source,
        };
        self.next_serial += 1;
        self.subscriptions.push(subscription);
        subscription
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.unsubscribe_calls += 1;
        self.subscriptions.retain(|s| *s != subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn find_returns_document_order() {
        let mut host = MemoryHost::new();
        let a = host.add_element(rect());
        let b = host.add_element(rect());
        let inner = host.add_child_element(a, rect());
        for node in [b, inner, a] {
            host.add_class(node, "zone");
        }
        assert_eq!(host.find(&Selector::Class("zone")), [a, inner, b]);
        assert!(host.find(&Selector::Class("missing")).is_empty());
    }

    #[test]
    fn id_lookup_returns_first_match() {
        let mut host = MemoryHost::new();
        let a = host.add_element(rect());
        let b = host.add_element(rect());
        host.set_id(&a, "target");
        host.set_id(&b, "target");
        assert_eq!(host.find(&Selector::Id("target")), [a]);
    }

    #[test]
    fn removed_elements_go_stale() {
        let mut host = MemoryHost::new();
        let a = host.add_element(rect());
        let child = host.add_child_element(a, rect());
        assert_eq!(host.bounding_rect(&child), Some(rect()));

        host.remove(&a);
        assert_eq!(host.bounding_rect(&a), None);
        assert_eq!(host.bounding_rect(&child), None);
        assert_eq!(host.removals(), 1);
    }

    #[test]
    fn deep_clone_is_detached_and_drops_listeners() {
        let mut host = MemoryHost::new();
        let a = host.add_element(rect());
        host.add_text(a);
        host.add_child_element(a, rect());
        host.listen_for_press(&a);
        host.set_computed(a, "color", "red");

        let copy = host.deep_clone(&a);
        assert!(!host.is_in_document(copy));
        assert_eq!(host.press_listeners(copy), 0);
        assert_eq!(host.computed_style(&copy, "color"), "red");
        assert_eq!(host.computed_style(&copy, "width"), "");
        assert!(matches!(
            host.child_nodes(&copy).as_slice(),
            [ChildNode::Text, ChildNode::Element(_)]
        ));
    }

    #[test]
    fn subscriptions_are_tracked() {
        let mut host = MemoryHost::new();
        let s = host.subscribe(InputSource::Touch);
        assert_eq!(s.source(), InputSource::Touch);
        assert_eq!(host.active_subscriptions(), 1);
        host.unsubscribe(s);
        assert_eq!(host.active_subscriptions(), 0);
        assert_eq!(host.subscribe_calls(), 1);
        assert_eq!(host.unsubscribe_calls(), 1);
    }
}
