//! GUI widgets.
//!
//! Widgets are scene nodes with extra state: alignment inside the parent,
//! pointer hover and press tracking, and user callbacks. They live in the
//! same tree as every other node and receive dispatch the same way.
//!
//! Submodules overview:
//! - [`widget`] – [`GuiWidget`](widget::GuiWidget) state, alignment, pointer handling
//! - [`image`] – texture-backed widgets
//! - [`label`] – text widgets
//! - [`button`] – image plus label with hover/press textures
//! - [`builder`] – `Scene` helpers that create widget nodes
pub mod builder;
pub mod button;
pub mod image;
pub mod label;
pub mod widget;
