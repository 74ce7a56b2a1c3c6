//! Aberred Scene library.
//!
//! Object identity and scene composition for 2D games: hash-based type
//! descriptors with checked downcasts, a factory that builds objects from
//! type names, and a tree of game objects with attached components, GUI
//! widgets, transform composition and JSON save/load.
//!
//! # Project Structure
//!
//! - [`core`] – string hashes, type descriptors, the factory, errors
//! - [`components`] – the `Component` trait and built-in components
//! - [`scene`] – the scene tree, dispatch, deferred commands, documents
//! - [`gui`] – widgets, alignment and pointer callbacks
//! - [`events`] – window events fed into the scene
//! - [`document`] – bidirectional save/load helpers
//! - [`resources`] – scene configuration

pub mod components;
pub mod core;
pub mod document;
pub mod events;
pub mod gui;
pub mod resources;
pub mod scene;
