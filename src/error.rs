//! Replay pipeline errors.
//!
//! Fatal errors only: they are all detected eagerly, before any frame is
//! produced. Events with missing payload fields are not errors at all; they
//! are absorbed per-effect during frame application.

use std::path::PathBuf;

use crate::event::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The event log must start with exactly one `INIT` event.
    #[error("missing or misplaced INIT")]
    MissingInit,

    /// The log is not a well-formed JSON event array (includes unknown
    /// `NodeState` strings, which are a closed set).
    #[error("malformed event log: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Strict mode only: an event references a node the topology never
    /// declared.
    #[error("event references unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("could not read event log {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
