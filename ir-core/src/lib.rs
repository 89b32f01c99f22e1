// SPDX-License-Identifier: LGPL-3.0-only

//! Tree-node substrate and control-flow graph overlay for a binary-analysis
//! intermediate representation.
//!
//! Every object in the IR is a [`node::Node`]: a uniquely-identified tree
//! node with owned children and a string-keyed property bag. The CFG overlay
//! in this crate attaches flow-kind metadata ([`node::CfgNodeInfo`]) and
//! successor/predecessor edges ([`node::CfgNode`]) to that same substrate,
//! rooted under a per-procedure [`node::Cfg`] container.

pub mod error;
pub mod limits;
pub mod node;

pub use error::IrError;
pub use limits::GraphLimits;
pub use node::{
    Cfg, CfgNode, CfgNodeInfo, CfgNodeInfoKind, Node, NodeRef, PlainNode, WeakNodeRef,
};
