//! The scene graph.
//!
//! Submodules overview:
//! - [`arena`] – generational node storage and [`NodeId`](arena::NodeId)
//! - [`gameobject`] – per-node state
//! - [`tree`] – [`Scene`](tree::Scene): hierarchy, components, transforms
//! - [`dispatch`] – recursive event, fixed update and update passes
//! - [`commands`] – structural changes deferred until after a pass
//! - [`persistence`] – JSON documents and scene files

pub mod arena;
pub mod commands;
pub mod dispatch;
pub mod gameobject;
pub mod persistence;
pub mod tree;
