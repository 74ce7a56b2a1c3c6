//! Long-lived settings shared by the scene and the host.
//!
//! Overview
//! - `sceneconfig` – where scene documents live and how they are written
pub mod sceneconfig;
