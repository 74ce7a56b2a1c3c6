//! Per-node signal storage.
//!
//! [`Signals`] is a small bag of named values other components and the host
//! can read and write: scalars, integers and flags. It also tracks keyboard
//! state for its owner: a `KeyPressed` event sets the flag `key:<code>` and
//! the matching `KeyReleased` clears it.

use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;

use crate::components::component::{Component, ComponentContext};
use crate::core::error::SceneError;
use crate::document::{Direction, sync};
use crate::events::window::WindowEvent;

#[derive(Debug, Clone, Default)]
pub struct Signals {
    pub scalars: FxHashMap<String, f32>,
    pub integers: FxHashMap<String, i32>,
    pub flags: FxHashSet<String>,
}

crate::component_type!(Signals, "Signals");

/// Flag name set while key `code` is held down.
pub fn key_flag(code: i32) -> String {
    format!("key:{}", code)
}

impl Signals {
    pub fn set_scalar(&mut self, key: impl Into<String>, value: f32) {
        self.scalars.insert(key.into(), value);
    }
    pub fn get_scalar(&self, key: &str) -> Option<f32> {
        self.scalars.get(key).copied()
    }
    pub fn set_integer(&mut self, key: impl Into<String>, value: i32) {
        self.integers.insert(key.into(), value);
    }
    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.integers.get(key).copied()
    }
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    pub fn clear_flag(&mut self, key: &str) {
        self.flags.remove(key);
    }
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}

impl Component for Signals {
    fn on_event(&mut self, _ctx: &mut ComponentContext<'_>, event: &WindowEvent) {
        match *event {
            WindowEvent::KeyPressed { code } => self.set_flag(key_flag(code)),
            WindowEvent::KeyReleased { code } => self.clear_flag(&key_flag(code)),
            _ => {}
        }
    }

    fn on_save_load(&mut self, data: &mut Value, direction: Direction) -> Result<(), SceneError> {
        sync(data, "scalars", &mut self.scalars, direction)?;
        sync(data, "integers", &mut self.integers, direction)?;

        // Saved sorted so documents diff cleanly.
        let mut flags: Vec<String> = self.flags.iter().cloned().collect();
        flags.sort();
        sync(data, "flags", &mut flags, direction)?;
        if direction.is_load() {
            self.flags = flags.into_iter().collect();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::tree::Scene;
    use serde_json::json;

    #[test]
    fn test_values() {
        let mut signals = Signals::default();
        signals.set_scalar("speed", 2.5);
        signals.set_integer("lives", 3);
        signals.set_flag("boss");
        assert_eq!(signals.get_scalar("speed"), Some(2.5));
        assert_eq!(signals.get_integer("lives"), Some(3));
        assert!(signals.has_flag("boss"));
        signals.clear_flag("boss");
        assert!(!signals.has_flag("boss"));
        assert_eq!(signals.get_scalar("missing"), None);
    }

    #[test]
    fn test_key_events_track_flags() {
        let mut scene = Scene::new();
        let root = scene.root();
        scene.add_component(root, Signals::default()).unwrap();

        scene.event(&WindowEvent::KeyPressed { code: 32 });
        assert!(scene.component::<Signals>(root).unwrap().has_flag("key:32"));
        scene.event(&WindowEvent::KeyReleased { code: 32 });
        assert!(!scene.component::<Signals>(root).unwrap().has_flag("key:32"));
    }

    #[test]
    fn test_save_load() {
        let mut signals = Signals::default();
        signals.set_scalar("speed", 1.5);
        signals.set_integer("score", 10);
        signals.set_flag("b");
        signals.set_flag("a");

        let mut data = json!({});
        signals.on_save_load(&mut data, Direction::Save).unwrap();
        assert_eq!(data["flags"], json!(["a", "b"]));

        let mut loaded = Signals::default();
        loaded.on_save_load(&mut data, Direction::Load).unwrap();
        assert_eq!(loaded.get_scalar("speed"), Some(1.5));
        assert_eq!(loaded.get_integer("score"), Some(10));
        assert!(loaded.has_flag("a") && loaded.has_flag("b"));
    }
}
