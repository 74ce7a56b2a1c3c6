//! Process-wide constructor registry.
//!
//! The [`Factory`] maps a type hash to a zero-argument constructor so that
//! objects can be built from a name found in a scene document. Types are
//! registered in an explicit startup pass ([`register_builtin_types`] plus
//! any [`Factory::register`] calls the application makes) before the first
//! scene is loaded.
//!
//! Registering the same type twice only logs a warning. Asking for a type
//! that was never registered is a programming error and panics; the
//! `try_*` variants return [`SceneError::UnregisteredType`] instead.

use std::sync::RwLock;

use log::{info, warn};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::components::component::Component;
use crate::core::error::{OrFatal, SceneError, fatal};
use crate::core::hash::StringHash;
use crate::core::typeinfo::{Object, StaticType};

/// Builds a fresh, default-initialized object.
pub type Constructor = fn() -> Box<dyn Object>;

struct Registration {
    name: &'static str,
    ctor: Constructor,
}

static CTORS: Lazy<RwLock<FxHashMap<StringHash, Registration>>> =
    Lazy::new(|| RwLock::new(FxHashMap::default()));

fn construct<T: Object + Default>() -> Box<dyn Object> {
    Box::new(T::default())
}

/// Handle to the process-wide constructor table.
pub struct Factory;

impl Factory {
    /// Register `T` under its declared type name. Idempotent.
    pub fn register<T>()
    where
        T: Object + StaticType + Default,
    {
        let hash = T::type_hash_static();
        let name = T::type_name_static();
        let mut ctors = CTORS.write().unwrap_or_else(|e| e.into_inner());
        if ctors.contains_key(&hash) {
            warn!(
                "Object '{}' with name '{}' already registered at factory",
                std::any::type_name::<T>(),
                name
            );
            return;
        }
        ctors.insert(
            hash,
            Registration {
                name,
                ctor: construct::<T>,
            },
        );
        info!(
            "Object '{}' with name '{}' registered at factory",
            std::any::type_name::<T>(),
            name
        );
    }

    pub fn is_registered(hash: StringHash) -> bool {
        CTORS
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&hash)
    }

    pub fn registered_count() -> usize {
        CTORS.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Registered name for `hash`, if any.
    pub fn type_name_of(hash: StringHash) -> Option<&'static str> {
        CTORS
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&hash)
            .map(|r| r.name)
    }

    pub fn try_create_by_hash(hash: StringHash) -> Result<Box<dyn Object>, SceneError> {
        // Copy the fn pointer out so the lock is released before user code runs.
        let ctor = CTORS
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&hash)
            .map(|r| r.ctor);
        match ctor {
            Some(ctor) => Ok(ctor()),
            None => Err(SceneError::UnregisteredType(hash.to_string())),
        }
    }

    pub fn try_create(name: &str) -> Result<Box<dyn Object>, SceneError> {
        Self::try_create_by_hash(StringHash::new(name))
            .map_err(|_| SceneError::UnregisteredType(name.to_string()))
    }

    /// Construct the type registered under `hash`. Panics if there is none.
    pub fn create_by_hash(hash: StringHash) -> Box<dyn Object> {
        Self::try_create_by_hash(hash).or_fatal()
    }

    /// Construct the type registered under `name`. Panics if there is none.
    pub fn create(name: &str) -> Box<dyn Object> {
        Self::try_create(name).or_fatal()
    }

    /// Construct a component. An unregistered hash is an `Err`, not a panic,
    /// so the caller decides which tier the failure belongs to.
    pub fn try_create_component(hash: StringHash) -> Result<Box<dyn Component>, SceneError> {
        let object = Self::try_create_by_hash(hash)?;
        let name = object.type_name();
        if !object.is_instance_of_info(<dyn Component as StaticType>::type_info_static()) {
            warn!("Failed to cast object '{}' to 'Component'", name);
            return Err(SceneError::NotAComponent(name.to_string()));
        }
        object
            .into_component()
            .ok_or_else(|| SceneError::NotAComponent(name.to_string()))
    }

    /// Construct a component. Panics if `hash` is not registered; a
    /// registered type that is not a component is
    /// [`SceneError::NotAComponent`].
    #[track_caller]
    pub fn create_component(hash: StringHash) -> Result<Box<dyn Component>, SceneError> {
        match Self::try_create_component(hash) {
            Err(e @ SceneError::UnregisteredType(_)) => fatal(e),
            other => other,
        }
    }
}

/// Registers every component type shipped with the crate.
///
/// Call once during startup, before loading scene documents.
pub fn register_builtin_types() {
    use crate::components::{lifetime::Lifetime, mover::Mover, signals::Signals, spinner::Spinner};

    Factory::register::<Mover>();
    Factory::register::<Spinner>();
    Factory::register::<Lifetime>();
    Factory::register::<Signals>();
}
