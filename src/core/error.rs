//! Error kinds for the scene core.
//!
//! Operations come in two tiers. Strict operations (creating a child with a
//! taken name, looking up a child that does not exist, constructing a type
//! that was never registered) are programming errors: their plain form logs
//! with `error!` and panics through [`OrFatal`]. Each of them also has a
//! `try_*` form returning [`SceneError`] so callers that want to recover can.
//! Tolerant operations (component lookups, downcasts, duplicate registration)
//! log a warning and hand back `None` or an `Err` without panicking.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::hash::StringHash;
use crate::scene::arena::NodeId;

/// Everything that can go wrong in the scene core.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("a child named '{name}' already exists under node {parent}")]
    DuplicateName { parent: NodeId, name: String },

    #[error("invalid child name '{0}'")]
    InvalidName(String),

    #[error("child '{name}' not found under node {parent}")]
    ChildNotFound { parent: NodeId, name: String },

    #[error("component {hash} not found on node {node}")]
    ComponentNotFound { node: NodeId, hash: StringHash },

    #[error("component '{name}' already attached to node {node}")]
    DuplicateComponent { node: NodeId, name: String },

    #[error("component '{name}' failed to initialize on node {node}")]
    InitializationFailed { node: NodeId, name: String },

    #[error("type '{0}' is not registered at the factory")]
    UnregisteredType(String),

    #[error("object '{0}' is not a component")]
    NotAComponent(String),

    #[error("node {0} no longer exists")]
    StaleNode(NodeId),

    #[error("document field '{key}': {reason}")]
    Document { key: String, reason: String },

    #[error("io error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Logs `error` and panics with it.
#[track_caller]
pub fn fatal(error: SceneError) -> ! {
    log::error!("{}", error);
    panic!("{}", error);
}

/// Escalates a strict-tier failure into a panic.
///
/// The error is logged first so it also reaches the log sink when the panic
/// hook is replaced or the build aborts on panic.
pub trait OrFatal<T> {
    fn or_fatal(self) -> T;
}

impl<T> OrFatal<T> for Result<T, SceneError> {
    #[track_caller]
    fn or_fatal(self) -> T {
        match self {
            Ok(value) => value,
            Err(e) => fatal(e),
        }
    }
}
