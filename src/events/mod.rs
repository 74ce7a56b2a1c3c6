//! Events consumed by the scene.
//!
//! Submodules:
//! - [`window`] – pointer, keyboard and resize notifications forwarded from the host
pub mod window;
