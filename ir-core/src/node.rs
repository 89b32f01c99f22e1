// SPDX-License-Identifier: LGPL-3.0-only

//! The universal IR object, and the control-flow graph overlay built on it.
//!
//! [`Node`] is the single concrete type behind every object in the tree. It
//! carries an immutable [`Uuid`] identity, an ordered list of owned children,
//! a string-to-string property map, and a [`NodeKind`] tag that says which of
//! the closed set of kinds this crate ships (`Plain`, `CfgNodeInfo`,
//! `CfgNode`, `Cfg`) it plays. Parent/child admission is enforced uniformly
//! through [`Node::is_valid_parent`] and [`Node::push_back`]; the edge
//! bookkeeping in [`NodeKind::CfgNode`] is exposed through methods that
//! reject misuse on non-CFG-node kinds with [`IrError::NodeStructure`].
//!
//! Concrete IR node kinds outside this crate's scope (basic blocks,
//! instructions, symbols, procedures, modules) are expected to either embed a
//! `Node` or extend `NodeKind` with their own variants; see DESIGN.md.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{trace, warn};
use uuid::Uuid;

use crate::error::IrError;

/// A strong, owning handle to a [`Node`].
pub type NodeRef = Rc<Node>;
/// A non-owning handle to a [`Node`]; must be [`Weak::upgrade`]d before use.
pub type WeakNodeRef = Weak<Node>;

/// The flow-kind metadata a [`CfgNodeInfo`] attachment carries.
///
/// This is a representative closed set (mirroring the node types the
/// original BDA control-flow graph distinguished: entry, normal, call,
/// return, exit) plus `Branch` for conditional-jump targets. Collaborators
/// needing a richer flow-kind vocabulary extend this enum rather than invent
/// a second attachment mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CfgNodeInfoKind {
    /// First node of a procedure; only ever has incoming edges from callers.
    Entry,
    /// A node without special meaning in the graph.
    Normal,
    /// A node that calls another procedure.
    Call,
    /// A node that is the target of a conditional branch.
    Branch,
    /// A leaf node returning control to the caller.
    Return,
    /// A node that exits the procedure without returning.
    Exit,
}

/// One edge endpoint: a non-owning target plus the executable flag.
#[derive(Clone)]
struct Edge {
    target: WeakNodeRef,
    executable: bool,
}

/// Successor/predecessor bookkeeping carried only by `NodeKind::CfgNode`.
#[derive(Default)]
struct CfgEdges {
    successors: RefCell<Vec<Edge>>,
    predecessors: RefCell<Vec<Edge>>,
}

/// The tag distinguishing the closed set of node kinds this crate ships.
enum NodeKind {
    /// A plain Node with no extra behavior; accepts any parent.
    Plain,
    /// A polymorphic flow-kind attachment; admissible only under a CfgNode.
    CfgNodeInfo(CfgNodeInfoKind),
    /// A Node carrying successor/predecessor edge lists.
    CfgNode(CfgEdges),
    /// A top-level container Node for one procedure's CFG.
    Cfg,
}

impl NodeKind {
    fn name(&self) -> &'static str {
        match self {
            NodeKind::Plain => "Node",
            NodeKind::CfgNodeInfo(_) => "CfgNodeInfo",
            NodeKind::CfgNode(_) => "CfgNode",
            NodeKind::Cfg => "Cfg",
        }
    }
}

/// The universal IR object: identity, owned children, local properties.
pub struct Node {
    id: Uuid,
    self_weak: WeakNodeRef,
    parent: RefCell<Option<WeakNodeRef>>,
    children: RefCell<Vec<NodeRef>>,
    local_properties: RefCell<HashMap<String, String>>,
    kind: NodeKind,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind.name())
            .field("children", &self.children.borrow().len())
            .finish()
    }
}

impl Node {
    fn new(kind: NodeKind) -> NodeRef {
        Rc::new_cyclic(|self_weak| Node {
            id: Uuid::new_v4(),
            self_weak: self_weak.clone(),
            parent: RefCell::new(None),
            children: RefCell::new(Vec::new()),
            local_properties: RefCell::new(HashMap::new()),
            kind,
        })
    }

    /// Construct an orphan, plain Node. Never fails.
    pub fn new_plain() -> NodeRef {
        Node::new(NodeKind::Plain)
    }

    /// Construct an orphan CfgNodeInfo attachment of the given flow-kind.
    pub fn new_cfg_node_info(kind: CfgNodeInfoKind) -> NodeRef {
        Node::new(NodeKind::CfgNodeInfo(kind))
    }

    /// Construct an orphan CfgNode with empty successor/predecessor lists.
    pub fn new_cfg_node() -> NodeRef {
        Node::new(NodeKind::CfgNode(CfgEdges::default()))
    }

    /// Construct an orphan top-level Cfg container.
    pub fn new_cfg() -> NodeRef {
        Node::new(NodeKind::Cfg)
    }

    /// The immutable identity assigned at construction.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// A weak, non-owning handle to this node. Hand these out instead of
    /// strong `NodeRef`s when referencing a node already owned by a tree,
    /// e.g. to build a CFG edge.
    pub fn weak(&self) -> WeakNodeRef {
        self.self_weak.clone()
    }

    /// The owning parent, or `None` if this node is currently an orphan.
    pub fn parent(&self) -> Option<NodeRef> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn is_owned(&self) -> bool {
        self.parent().is_some()
    }

    /// Whether `self` would accept `candidate_parent` as its parent.
    ///
    /// The base kind accepts any parent. `CfgNode` accepts `CfgNode` or
    /// `Cfg`. `CfgNodeInfo` accepts only `CfgNode`. `Cfg` accepts nothing —
    /// it is a top-level container only.
    pub fn is_valid_parent(&self, candidate_parent: &Node) -> bool {
        match (&self.kind, &candidate_parent.kind) {
            (NodeKind::Plain, _) => true,
            (NodeKind::CfgNodeInfo(_), NodeKind::CfgNode(_)) => true,
            (NodeKind::CfgNodeInfo(_), _) => false,
            (NodeKind::CfgNode(_), NodeKind::CfgNode(_) | NodeKind::Cfg) => true,
            (NodeKind::CfgNode(_), _) => false,
            (NodeKind::Cfg, _) => false,
        }
    }

    /// Admit `child` into `self`'s child list, transferring effective
    /// ownership (the tree now shares the `Rc`; the caller's own handle keeps
    /// working but the node is no longer an orphan).
    ///
    /// Fails with [`IrError::NodeStructure`] if `child.is_valid_parent(self)`
    /// is false, if `child` is already owned elsewhere, or if `child` is a
    /// second `CfgNodeInfo` attached to a `CfgNode` that already has one. On
    /// failure the tree is left unchanged.
    pub fn push_back(&self, child: &NodeRef) -> Result<(), IrError> {
        if !child.is_valid_parent(self) {
            warn!(
                "rejected admission of node {} ({}) under node {} ({})",
                child.id,
                child.kind.name(),
                self.id,
                self.kind.name()
            );
            return Err(IrError::node_structure(
                child.id,
                format!(
                    "{} is not a valid parent for {}",
                    self.kind.name(),
                    child.kind.name()
                ),
            ));
        }
        if child.is_owned() {
            warn!("rejected admission of already-owned node {}", child.id);
            return Err(IrError::node_structure(child.id, "child is already owned"));
        }
        if matches!(child.kind, NodeKind::CfgNodeInfo(_)) && self.cfg_node_info().is_some() {
            warn!(
                "rejected second CfgNodeInfo child {} on node {}",
                child.id, self.id
            );
            return Err(IrError::node_structure(
                child.id,
                "node already has a CfgNodeInfo child",
            ));
        }
        self.children.borrow_mut().push(Rc::clone(child));
        *child.parent.borrow_mut() = Some(self.self_weak.clone());
        trace!("admitted node {} under node {}", child.id, self.id);
        Ok(())
    }

    /// Number of direct children.
    pub fn size(&self) -> usize {
        self.children.borrow().len()
    }

    /// Whether this node has no children.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The child at `index`, or [`IrError::OutOfRange`].
    pub fn child(&self, index: usize) -> Result<NodeRef, IrError> {
        let children = self.children.borrow();
        children
            .get(index)
            .cloned()
            .ok_or(IrError::OutOfRange {
                index,
                len: children.len(),
            })
    }

    /// The single `CfgNodeInfo` child, if one has been admitted.
    pub fn cfg_node_info(&self) -> Option<NodeRef> {
        self.children
            .borrow()
            .iter()
            .find(|c| matches!(c.kind, NodeKind::CfgNodeInfo(_)))
            .cloned()
    }

    /// The flow-kind this attachment carries, if `self` is a `CfgNodeInfo`.
    pub fn cfg_node_info_kind(&self) -> Option<CfgNodeInfoKind> {
        match self.kind {
            NodeKind::CfgNodeInfo(kind) => Some(kind),
            _ => None,
        }
    }

    // --- local properties --------------------------------------------------

    /// Insert or overwrite `key` with `value`.
    pub fn set_local_property(&self, key: impl Into<String>, value: impl Into<String>) {
        self.local_properties
            .borrow_mut()
            .insert(key.into(), value.into());
    }

    /// The value stored under `key`, if any.
    pub fn local_property(&self, key: &str) -> Option<String> {
        self.local_properties.borrow().get(key).cloned()
    }

    /// Number of distinct keys.
    pub fn local_property_len(&self) -> usize {
        self.local_properties.borrow().len()
    }

    /// Whether the property map has no entries.
    pub fn local_properties_is_empty(&self) -> bool {
        self.local_property_len() == 0
    }

    /// Remove `key`, returning whether it was present.
    pub fn remove_local_property(&self, key: &str) -> bool {
        self.local_properties.borrow_mut().remove(key).is_some()
    }

    /// Remove every property.
    pub fn clear_local_properties(&self) {
        self.local_properties.borrow_mut().clear();
    }

    // --- CFG edges (CfgNode kind only) -------------------------------------

    fn cfg_edges(&self) -> Result<&CfgEdges, IrError> {
        match &self.kind {
            NodeKind::CfgNode(edges) => Ok(edges),
            _ => Err(IrError::node_structure(
                self.id,
                format!("{} is not a CfgNode", self.kind.name()),
            )),
        }
    }

    /// Validate an edge target: it must not be `self`, and it must resolve to
    /// a node that is currently owned by some tree.
    fn validate_edge_target(&self, target: &WeakNodeRef) -> Result<(), IrError> {
        if Weak::ptr_eq(&self.self_weak, target) {
            warn!("rejected self-loop edge on node {}", self.id);
            return Err(IrError::node_structure(
                self.id,
                "self-loop edges are forbidden",
            ));
        }
        match target.upgrade() {
            Some(node) if node.is_owned() => Ok(()),
            _ => {
                warn!("rejected edge to an expired or unowned node");
                Err(IrError::ExpiredReference)
            }
        }
    }

    /// Append `(target, executable)` to the successor list.
    pub fn add_successor(&self, target: &WeakNodeRef, executable: bool) -> Result<(), IrError> {
        self.validate_edge_target(target)?;
        let edges = self.cfg_edges()?;
        edges.successors.borrow_mut().push(Edge {
            target: target.clone(),
            executable,
        });
        trace!(
            "added successor edge on node {} (executable={})",
            self.id,
            executable
        );
        Ok(())
    }

    /// Admit `child` as a child of `self` (see [`Node::push_back`]), then
    /// append it to the successor list with `executable = false`.
    pub fn add_owned_successor(&self, child: &NodeRef) -> Result<(), IrError> {
        self.push_back(child)?;
        self.add_successor(&child.weak(), false)
    }

    /// Replace the successor edge at `index`.
    pub fn set_successor(
        &self,
        index: usize,
        target: &WeakNodeRef,
        executable: bool,
    ) -> Result<(), IrError> {
        self.validate_edge_target(target)?;
        let edges = self.cfg_edges()?;
        let mut successors = edges.successors.borrow_mut();
        let len = successors.len();
        let slot = successors
            .get_mut(index)
            .ok_or(IrError::OutOfRange { index, len })?;
        *slot = Edge {
            target: target.clone(),
            executable,
        };
        Ok(())
    }

    /// The successor edge at `index`, as `(target, executable)`.
    pub fn get_successor(&self, index: usize) -> Result<(WeakNodeRef, bool), IrError> {
        let edges = self.cfg_edges()?;
        let successors = edges.successors.borrow();
        successors
            .get(index)
            .map(|e| (e.target.clone(), e.executable))
            .ok_or(IrError::OutOfRange {
                index,
                len: successors.len(),
            })
    }

    /// Number of successor edges.
    pub fn successor_len(&self) -> Result<usize, IrError> {
        Ok(self.cfg_edges()?.successors.borrow().len())
    }

    /// Whether the successor list is empty.
    pub fn successors_is_empty(&self) -> Result<bool, IrError> {
        Ok(self.successor_len()? == 0)
    }

    /// Erase the successor edge at `index`. A no-op if `index` is out of
    /// range (this is the one edge operation that tolerates an OOB index).
    pub fn remove_successor_at(&self, index: usize) -> Result<(), IrError> {
        let edges = self.cfg_edges()?;
        let mut successors = edges.successors.borrow_mut();
        if index < successors.len() {
            successors.remove(index);
        }
        Ok(())
    }

    /// Erase every successor edge whose target and executable flag both
    /// match. A no-op if none match.
    pub fn remove_successor(&self, target: &WeakNodeRef, executable: bool) -> Result<(), IrError> {
        let edges = self.cfg_edges()?;
        edges
            .successors
            .borrow_mut()
            .retain(|e| !(Weak::ptr_eq(&e.target, target) && e.executable == executable));
        Ok(())
    }

    /// Admit `child` as a child of `self` (see [`Node::push_back`]), then
    /// append it to the predecessor list with `executable = false`.
    pub fn add_owned_predecessor(&self, child: &NodeRef) -> Result<(), IrError> {
        self.push_back(child)?;
        self.add_predecessor(&child.weak(), false)
    }

    /// Append `(target, executable)` to the predecessor list.
    pub fn add_predecessor(&self, target: &WeakNodeRef, executable: bool) -> Result<(), IrError> {
        self.validate_edge_target(target)?;
        let edges = self.cfg_edges()?;
        edges.predecessors.borrow_mut().push(Edge {
            target: target.clone(),
            executable,
        });
        trace!(
            "added predecessor edge on node {} (executable={})",
            self.id,
            executable
        );
        Ok(())
    }

    /// Replace the predecessor edge at `index`.
    pub fn set_predecessor(
        &self,
        index: usize,
        target: &WeakNodeRef,
        executable: bool,
    ) -> Result<(), IrError> {
        self.validate_edge_target(target)?;
        let edges = self.cfg_edges()?;
        let mut predecessors = edges.predecessors.borrow_mut();
        let len = predecessors.len();
        let slot = predecessors
            .get_mut(index)
            .ok_or(IrError::OutOfRange { index, len })?;
        *slot = Edge {
            target: target.clone(),
            executable,
        };
        Ok(())
    }

    /// The predecessor edge at `index`, as `(target, executable)`.
    pub fn get_predecessor(&self, index: usize) -> Result<(WeakNodeRef, bool), IrError> {
        let edges = self.cfg_edges()?;
        let predecessors = edges.predecessors.borrow();
        predecessors
            .get(index)
            .map(|e| (e.target.clone(), e.executable))
            .ok_or(IrError::OutOfRange {
                index,
                len: predecessors.len(),
            })
    }

    /// Number of predecessor edges.
    pub fn predecessor_len(&self) -> Result<usize, IrError> {
        Ok(self.cfg_edges()?.predecessors.borrow().len())
    }

    /// Whether the predecessor list is empty.
    pub fn predecessors_is_empty(&self) -> Result<bool, IrError> {
        Ok(self.predecessor_len()? == 0)
    }

    /// Erase the predecessor edge at `index`. A no-op if out of range.
    pub fn remove_predecessor_at(&self, index: usize) -> Result<(), IrError> {
        let edges = self.cfg_edges()?;
        let mut predecessors = edges.predecessors.borrow_mut();
        if index < predecessors.len() {
            predecessors.remove(index);
        }
        Ok(())
    }

    /// Erase every predecessor edge whose target and executable flag both
    /// match. A no-op if none match.
    pub fn remove_predecessor(
        &self,
        target: &WeakNodeRef,
        executable: bool,
    ) -> Result<(), IrError> {
        let edges = self.cfg_edges()?;
        edges
            .predecessors
            .borrow_mut()
            .retain(|e| !(Weak::ptr_eq(&e.target, target) && e.executable == executable));
        Ok(())
    }
}

/// Factory for plain, behavior-free nodes. Accepts any parent.
pub struct PlainNode;

impl PlainNode {
    pub fn new() -> NodeRef {
        Node::new_plain()
    }
}

/// Factory for `CfgNodeInfo` attachments.
pub struct CfgNodeInfo;

impl CfgNodeInfo {
    pub fn new(kind: CfgNodeInfoKind) -> NodeRef {
        Node::new_cfg_node_info(kind)
    }
}

/// Factory for `CfgNode`s: Nodes carrying successor/predecessor edge lists.
pub struct CfgNode;

impl CfgNode {
    pub fn new() -> NodeRef {
        Node::new_cfg_node()
    }
}

/// Factory for `Cfg` containers: the top-level root of a procedure's CFG.
pub struct Cfg;

impl Cfg {
    pub fn new() -> NodeRef {
        Node::new_cfg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_is_an_orphan_with_no_children_or_properties() {
        let n = PlainNode::new();
        assert!(n.parent().is_none());
        assert_eq!(n.size(), 0);
        assert!(n.is_empty());
        assert!(n.local_properties_is_empty());
    }

    #[test]
    fn uuids_are_distinct_across_512_nodes() {
        let mut ids = std::collections::HashSet::new();
        for _ in 0..512 {
            assert!(ids.insert(PlainNode::new().id()));
        }
        assert_eq!(ids.len(), 512);
    }

    #[test]
    fn push_back_sets_parent_and_appends_child() {
        let cfg = Cfg::new();
        let n = CfgNode::new();
        cfg.push_back(&n).unwrap();
        assert_eq!(cfg.size(), 1);
        assert!(Rc::ptr_eq(&cfg.child(0).unwrap(), &n));
        assert!(Rc::ptr_eq(&n.parent().unwrap(), &cfg));
    }

    #[test]
    fn plain_node_rejects_cfg_node_as_child() {
        let plain = PlainNode::new();
        let cfg_node = CfgNode::new();
        let err = plain.push_back(&cfg_node).unwrap_err();
        assert!(matches!(err, IrError::NodeStructure { .. }));
        assert!(cfg_node.parent().is_none());
        assert_eq!(plain.size(), 0);
    }

    #[test]
    fn cfg_admits_a_plain_node_since_plain_declares_any_parent_valid() {
        let cfg = Cfg::new();
        let plain = PlainNode::new();
        cfg.push_back(&plain).unwrap();
        assert!(Rc::ptr_eq(&plain.parent().unwrap(), &cfg));
    }

    #[test]
    fn cfg_node_accepts_cfg_or_cfg_node_as_parent() {
        let cfg = Cfg::new();
        let a = CfgNode::new();
        let b = CfgNode::new();
        cfg.push_back(&a).unwrap();
        a.push_back(&b).unwrap();
        assert!(Rc::ptr_eq(&b.parent().unwrap(), &a));
    }

    #[test]
    fn already_owned_child_cannot_be_admitted_twice() {
        let cfg = Cfg::new();
        let other_cfg = Cfg::new();
        let n = CfgNode::new();
        cfg.push_back(&n).unwrap();
        let err = other_cfg.push_back(&n).unwrap_err();
        assert!(matches!(err, IrError::NodeStructure { .. }));
        assert!(Rc::ptr_eq(&n.parent().unwrap(), &cfg));
    }

    #[test]
    fn self_loop_successor_is_rejected() {
        let cfg = Cfg::new();
        let n = CfgNode::new();
        cfg.push_back(&n).unwrap();
        let err = n.add_successor(&n.weak(), false).unwrap_err();
        assert!(matches!(err, IrError::NodeStructure { .. }));
        assert_eq!(n.successor_len().unwrap(), 0);
    }

    #[test]
    fn successor_to_orphan_is_expired_reference() {
        let cfg = Cfg::new();
        let a = CfgNode::new();
        let orphan = CfgNode::new();
        cfg.push_back(&a).unwrap();
        let err = a.add_successor(&orphan.weak(), false).unwrap_err();
        assert!(matches!(err, IrError::ExpiredReference));
    }

    #[test]
    fn successors_and_predecessors_are_independent() {
        let cfg = Cfg::new();
        let a = CfgNode::new();
        let b = CfgNode::new();
        cfg.push_back(&a).unwrap();
        cfg.push_back(&b).unwrap();
        for _ in 0..3 {
            a.add_successor(&b.weak(), true).unwrap();
        }
        assert_eq!(a.successor_len().unwrap(), 3);
        assert_eq!(b.predecessor_len().unwrap(), 0);
    }

    #[test]
    fn remove_successor_is_flag_sensitive() {
        let cfg = Cfg::new();
        let a = CfgNode::new();
        let x = CfgNode::new();
        cfg.push_back(&a).unwrap();
        cfg.push_back(&x).unwrap();
        a.add_successor(&x.weak(), true).unwrap();
        a.add_successor(&x.weak(), false).unwrap();
        a.add_successor(&x.weak(), true).unwrap();

        a.remove_successor(&x.weak(), false).unwrap();
        assert_eq!(a.successor_len().unwrap(), 2);
        assert!((0..2).all(|i| a.get_successor(i).unwrap().1));

        a.remove_successor(&x.weak(), true).unwrap();
        assert_eq!(a.successor_len().unwrap(), 0);
    }

    #[test]
    fn remove_successor_at_on_empty_list_is_a_no_op() {
        let cfg = Cfg::new();
        let a = CfgNode::new();
        cfg.push_back(&a).unwrap();
        a.remove_successor_at(0).unwrap();
        assert_eq!(a.successor_len().unwrap(), 0);
    }

    #[test]
    fn remove_successor_at_shifts_subsequent_edges_down() {
        let cfg = Cfg::new();
        let a = CfgNode::new();
        let b = CfgNode::new();
        let c = CfgNode::new();
        let d = CfgNode::new();
        for n in [&a, &b, &c, &d] {
            cfg.push_back(n).unwrap();
        }
        a.add_successor(&b.weak(), false).unwrap();
        a.add_successor(&c.weak(), false).unwrap();
        a.add_successor(&d.weak(), false).unwrap();

        a.remove_successor_at(0).unwrap();
        assert_eq!(a.successor_len().unwrap(), 2);
        assert!(Weak::ptr_eq(&a.get_successor(0).unwrap().0, &c.weak()));
        assert!(Weak::ptr_eq(&a.get_successor(1).unwrap().0, &d.weak()));
    }

    #[test]
    fn set_successor_replaces_only_the_given_index() {
        let cfg = Cfg::new();
        let a = CfgNode::new();
        let b = CfgNode::new();
        let c = CfgNode::new();
        let d = CfgNode::new();
        for n in [&a, &b, &c, &d] {
            cfg.push_back(n).unwrap();
        }
        a.add_successor(&b.weak(), false).unwrap();
        a.add_successor(&c.weak(), false).unwrap();
        a.add_successor(&c.weak(), false).unwrap();

        a.set_successor(1, &d.weak(), true).unwrap();

        assert!(Weak::ptr_eq(&a.get_successor(0).unwrap().0, &b.weak()));
        assert_eq!(a.get_successor(0).unwrap().1, false);
        assert!(Weak::ptr_eq(&a.get_successor(1).unwrap().0, &d.weak()));
        assert_eq!(a.get_successor(1).unwrap().1, true);
        assert!(Weak::ptr_eq(&a.get_successor(2).unwrap().0, &c.weak()));
        assert_eq!(a.get_successor(2).unwrap().1, false);
    }

    #[test]
    fn set_successor_out_of_range_is_an_error() {
        let cfg = Cfg::new();
        let a = CfgNode::new();
        let b = CfgNode::new();
        cfg.push_back(&a).unwrap();
        cfg.push_back(&b).unwrap();
        let err = a.set_successor(0, &b.weak(), true).unwrap_err();
        assert!(matches!(err, IrError::OutOfRange { .. }));
    }

    #[test]
    fn get_successor_out_of_range_is_an_error() {
        let a = CfgNode::new();
        let err = a.get_successor(0).unwrap_err();
        assert!(matches!(err, IrError::OutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn add_owned_successor_admits_and_links_in_one_call() {
        let cfg = Cfg::new();
        let a = CfgNode::new();
        cfg.push_back(&a).unwrap();
        let b = CfgNode::new();
        a.add_owned_successor(&b).unwrap();
        assert!(Rc::ptr_eq(&b.parent().unwrap(), &a));
        assert_eq!(a.successor_len().unwrap(), 1);
        assert_eq!(a.get_successor(0).unwrap().1, false);
    }

    #[test]
    fn add_owned_predecessor_admits_and_links_in_one_call() {
        let cfg = Cfg::new();
        let a = CfgNode::new();
        cfg.push_back(&a).unwrap();
        let b = CfgNode::new();
        a.add_owned_predecessor(&b).unwrap();
        assert!(Rc::ptr_eq(&b.parent().unwrap(), &a));
        assert_eq!(a.predecessor_len().unwrap(), 1);
        assert_eq!(a.get_predecessor(0).unwrap().1, false);
        assert_eq!(a.successor_len().unwrap(), 0);
    }

    #[test]
    fn edge_operations_on_non_cfg_node_are_structural_errors() {
        let plain = PlainNode::new();
        assert!(matches!(
            plain.successor_len().unwrap_err(),
            IrError::NodeStructure { .. }
        ));
    }

    #[test]
    fn set_local_property_overwrites_without_changing_size() {
        let n = PlainNode::new();
        n.set_local_property("k", "v1");
        assert_eq!(n.local_property_len(), 1);
        n.set_local_property("k", "v2");
        assert_eq!(n.local_property_len(), 1);
        assert_eq!(n.local_property("k").as_deref(), Some("v2"));
    }

    #[test]
    fn remove_local_property_reports_presence() {
        let n = PlainNode::new();
        assert!(!n.remove_local_property("missing"));
        n.set_local_property("k", "v");
        assert!(n.remove_local_property("k"));
        assert!(n.local_properties_is_empty());
    }

    #[test]
    fn clear_local_properties_empties_the_map() {
        let n = PlainNode::new();
        n.set_local_property("a", "1");
        n.set_local_property("b", "2");
        n.clear_local_properties();
        assert!(n.local_properties_is_empty());
    }

    #[test]
    fn cfg_node_info_accessor_reflects_attachment_cardinality() {
        let cfg_node = CfgNode::new();
        assert!(cfg_node.cfg_node_info().is_none());

        let info = CfgNodeInfo::new(CfgNodeInfoKind::Call);
        cfg_node.push_back(&info).unwrap();
        let attached = cfg_node.cfg_node_info().unwrap();
        assert!(Rc::ptr_eq(&attached, &info));
        assert_eq!(attached.cfg_node_info_kind(), Some(CfgNodeInfoKind::Call));
    }

    #[test]
    fn a_second_cfg_node_info_is_rejected() {
        let cfg_node = CfgNode::new();
        cfg_node
            .push_back(&CfgNodeInfo::new(CfgNodeInfoKind::Entry))
            .unwrap();
        let err = cfg_node
            .push_back(&CfgNodeInfo::new(CfgNodeInfoKind::Exit))
            .unwrap_err();
        assert!(matches!(err, IrError::NodeStructure { .. }));
        assert_eq!(cfg_node.size(), 1);
    }

    #[test]
    fn cfg_node_info_rejects_non_cfg_node_parents() {
        let cfg = Cfg::new();
        let info = CfgNodeInfo::new(CfgNodeInfoKind::Normal);
        assert!(cfg.push_back(&info).is_err());
    }

    #[test]
    fn cfg_rejects_being_adopted_by_anything() {
        let outer = Cfg::new();
        let inner = Cfg::new();
        assert!(outer.push_back(&inner).is_err());
    }
}
