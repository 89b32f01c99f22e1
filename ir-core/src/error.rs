// SPDX-License-Identifier: LGPL-3.0-only

//! Error taxonomy for the node substrate and CFG overlay.
//!
//! Every fallible public operation returns `Result<T, IrError>`. Failures here
//! are structural programmer errors (a bad parent, a stale edge target, an
//! out-of-range index), not conditions a caller is expected to retry.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the node substrate and CFG overlay.
#[derive(Debug, Error)]
pub enum IrError {
    /// A structural rule was violated: an invalid parent type, a self-loop
    /// edge, or a second `CfgNodeInfo` attached to the same `CfgNode`.
    #[error("node {child_id} rejected: {reason}")]
    NodeStructure { child_id: Uuid, reason: String },

    /// An edge target could not be resolved to a currently-owned node.
    #[error("edge target is not currently owned by any tree")]
    ExpiredReference,

    /// An index operand exceeded the bounds of the sequence it indexes.
    #[error("index {index} out of range (length {len})")]
    OutOfRange { index: usize, len: usize },

    /// Catch-all for conditions not covered by the variants above. Reserved
    /// for IR layers built on top of this substrate.
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl IrError {
    pub(crate) fn node_structure(child_id: Uuid, reason: impl Into<String>) -> Self {
        IrError::NodeStructure {
            child_id,
            reason: reason.into(),
        }
    }
}
