//! Object identity: string hashes, type descriptors, the factory and the
//! error kinds shared by the rest of the crate.
//!
//! - [`hash`] – deterministic [`StringHash`](hash::StringHash)
//! - [`typeinfo`] – [`TypeInfo`](typeinfo::TypeInfo), the [`Object`](typeinfo::Object) trait, checked downcasts
//! - [`factory`] – name/hash driven construction
//! - [`error`] – [`SceneError`](error::SceneError) and fatal escalation

pub mod error;
pub mod factory;
pub mod hash;
pub mod typeinfo;
