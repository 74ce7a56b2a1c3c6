//! Components attached to scene nodes.
//!
//! This module holds the [`Component`](component::Component) contract and
//! the components shipped with the crate. Components define behavior such
//! as movement, rotation, timed destruction and signal storage; the
//! [`Factory`](crate::core::factory::Factory) builds them by name when a
//! scene document is loaded.
//!
//! Submodules overview:
//! - [`component`] – the `Component` trait and the context hooks run in
//! - [`lifetime`] – destroys its owner after a delay
//! - [`mover`] – constant-velocity movement in the owner's frame
//! - [`signals`] – per-node signal storage and key state
//! - [`spinner`] – constant rotation per fixed step

pub mod component;
pub mod lifetime;
pub mod mover;
pub mod signals;
pub mod spinner;
