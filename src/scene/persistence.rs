//! Scene documents.
//!
//! A node and its subtree serialize to one JSON object:
//!
//! ```json
//! {
//!   "name": "player",
//!   "isActive": true,
//!   "position": [10.0, 0.0, 0.0],
//!   "size": [32.0, 32.0],
//!   "angle": 0.0,
//!   "components": { "Mover": { "velocity": [1.0, 0.0] } },
//!   "children": [ { "name": "weapon", ... } ]
//! }
//! ```
//!
//! Widget nodes add a `"widget"` object. [`Scene::save_load`] runs the same
//! field list in both directions. Loading creates children in document order
//! before it creates components. A named child or a component that already
//! existed before the load is reused instead of created again; two entries
//! with the same name in one `children` array are a
//! [`SceneError::DuplicateName`]. Files are read from
//! and written to paths relative to the configured root.

use std::fs;
use std::path::Path;

use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::error::SceneError;
use crate::core::factory::Factory;
use crate::core::hash::StringHash;
use crate::document::{Direction, ensure_object, sync};
use crate::gui::widget::GuiWidget;
use crate::scene::arena::NodeId;
use crate::scene::tree::Scene;

impl Scene {
    /// Save the subtree at `id` into `data`, or load it from there.
    ///
    /// On load the document's `name` is only applied to a node without a
    /// parent; a child keeps the name its parent indexed it under.
    pub fn save_load(&mut self, id: NodeId, data: &mut Value, direction: Direction) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::StaleNode(id))?;

        if direction.is_save() || node.parent.is_none() {
            sync(data, "name", &mut node.name, direction)?;
        }

        let mut active = node.is_active();
        sync(data, "isActive", &mut active, direction)?;
        node.set_active(active);

        let mut position = node.position();
        sync(data, "position", &mut position, direction)?;
        node.set_position(position);

        let mut size = node.size();
        sync(data, "size", &mut size, direction)?;
        node.set_size(size);

        let mut angle = node.angle();
        sync(data, "angle", &mut angle, direction)?;
        node.set_angle(angle);

        if direction.is_load() && node.widget.is_none() && data.get("widget").is_some() {
            node.widget = Some(GuiWidget::default());
        }
        if let Some(widget) = node.widget.as_mut() {
            widget.save_load(data, direction)?;
        }

        match direction {
            Direction::Save => {
                self.save_children(id, data)?;
                self.save_components(id, data)?;
            }
            Direction::Load => {
                self.load_children(id, data)?;
                self.load_components(id, data)?;
            }
        }
        Ok(())
    }

    fn save_children(&mut self, id: NodeId, data: &mut Value) -> Result<(), SceneError> {
        let children = self.node(id).children().to_vec();
        let mut entries = Vec::with_capacity(children.len());
        for child in children {
            let mut entry = Value::Object(Map::new());
            self.save_load(child, &mut entry, Direction::Save)?;
            entries.push(entry);
        }
        ensure_object(data).insert("children".to_string(), Value::Array(entries));
        Ok(())
    }

    fn save_components(&mut self, id: NodeId, data: &mut Value) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::StaleNode(id))?;
        let mut entries = Map::new();
        for component in node.components.iter_mut().flatten() {
            let mut entry = Value::Object(Map::new());
            component.on_save_load(&mut entry, Direction::Save)?;
            entries.insert(component.type_name().to_string(), entry);
        }
        ensure_object(data).insert("components".to_string(), Value::Object(entries));
        Ok(())
    }

    fn load_children(&mut self, id: NodeId, data: &mut Value) -> Result<(), SceneError> {
        let Some(entries) = data.get_mut("children").and_then(Value::as_array_mut) else {
            return Ok(());
        };
        // Only children that existed before this load are reused. A name
        // repeated inside the document is a duplicate sibling.
        let existing: FxHashMap<String, NodeId> = self.node(id).children_by_name.clone();
        for entry in entries.iter_mut() {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let child = match existing.get(&name) {
                Some(&reused) => reused,
                None => self.try_create_child(id, &name)?,
            };
            self.save_load(child, entry, Direction::Load)?;
        }
        Ok(())
    }

    fn load_components(&mut self, id: NodeId, data: &mut Value) -> Result<(), SceneError> {
        let Some(entries) = data.get_mut("components").and_then(Value::as_object_mut) else {
            return Ok(());
        };
        for (type_name, state) in entries.iter_mut() {
            let hash = StringHash::new(type_name);
            if !self.node(id).has_component(hash) {
                let component = Factory::try_create_component(hash).map_err(|e| match e {
                    SceneError::UnregisteredType(_) => SceneError::UnregisteredType(type_name.clone()),
                    other => other,
                })?;
                if let Err(e) = self.attach_component(id, component) {
                    warn!("Skipping component '{}' while loading: {}", type_name, e);
                    continue;
                }
            }
            if let Some(component) = self.find_component_mut(id, hash) {
                component.on_save_load(state, Direction::Load)?;
            }
        }
        Ok(())
    }

    /// Serialize the subtree at `id` into a fresh document.
    pub fn to_document(&mut self, id: NodeId) -> Result<Value, SceneError> {
        let mut data = Value::Object(Map::new());
        self.save_load(id, &mut data, Direction::Save)?;
        Ok(data)
    }

    /// Create a child named `name` under `parent` and load `data` into it.
    ///
    /// If loading fails the half-built child is destroyed again.
    pub fn create_child_from_value(
        &mut self,
        parent: NodeId,
        name: &str,
        data: &mut Value,
    ) -> Result<NodeId, SceneError> {
        let child = self.try_create_child(parent, name)?;
        if let Err(e) = self.save_load(child, data, Direction::Load) {
            self.destroy_node(child);
            return Err(e);
        }
        Ok(child)
    }

    /// Load the document at `<config_root>/<path>` into a new child named
    /// `name`.
    pub fn create_child_from_file(
        &mut self,
        parent: NodeId,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<NodeId, SceneError> {
        let full_path = self.config().full_path(path);
        let text = fs::read_to_string(&full_path).map_err(|source| SceneError::Io {
            path: full_path.clone(),
            source,
        })?;
        let mut data: Value = serde_json::from_str(&text)?;
        let child = self.create_child_from_value(parent, name, &mut data)?;
        info!("Loaded '{}' from {:?}", name, full_path);
        Ok(child)
    }

    /// Write the subtree at `id` to `<config_root>/<path>` as indented JSON
    /// followed by a newline. Missing directories are created.
    pub fn save_to_file(&mut self, id: NodeId, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let data = self.to_document(id)?;

        let indent = " ".repeat(self.config().indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut bytes = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
        data.serialize(&mut serializer)?;
        bytes.push(b'\n');

        let full_path = self.config().full_path(path);
        if let Some(dir) = full_path.parent() {
            fs::create_dir_all(dir).map_err(|source| SceneError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&full_path, bytes).map_err(|source| SceneError::Io {
            path: full_path.clone(),
            source,
        })?;
        info!("Saved '{}' to {:?}", self.node(id).name(), full_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use serde_json::json;

    #[test]
    fn test_save_plain_node() {
        let mut scene = Scene::new();
        let root = scene.root();
        let child = scene.create_child(root, "player");
        scene.node_mut(child).set_position(Vec3::new(1.0, 2.0, 3.0));
        scene.node_mut(child).set_size(Vec2::new(4.0, 5.0));
        scene.node_mut(child).set_angle(90.0);

        let doc = scene.to_document(child).unwrap();
        assert_eq!(
            doc,
            json!({
                "name": "player",
                "isActive": true,
                "position": [1.0, 2.0, 3.0],
                "size": [4.0, 5.0],
                "angle": 90.0,
                "children": [],
                "components": {}
            })
        );
    }

    #[test]
    fn test_load_missing_keys_keep_values() {
        let mut scene = Scene::new();
        let root = scene.root();
        let mut doc = json!({ "angle": 45.0 });
        let child = scene.create_child_from_value(root, "x", &mut doc).unwrap();
        let node = scene.node(child);
        assert!(node.is_active());
        assert_eq!(node.position(), Vec3::ZERO);
        assert!((node.angle() - 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_keeps_requested_name() {
        let mut scene = Scene::new();
        let root = scene.root();
        let mut doc = json!({ "name": "from_file" });
        let child = scene.create_child_from_value(root, "wanted", &mut doc).unwrap();
        assert_eq!(scene.node(child).name(), "wanted");
        assert_eq!(scene.find_child_by_name(root, "wanted"), child);
    }

    #[test]
    fn test_load_children_in_order() {
        let mut scene = Scene::new();
        let root = scene.root();
        let mut doc = json!({
            "children": [
                { "name": "b", "position": [1.0, 0.0, 0.0] },
                { "name": "a", "isActive": false },
                { "name": "" }
            ]
        });
        let group = scene.create_child_from_value(root, "group", &mut doc).unwrap();
        let children = scene.node(group).children().to_vec();
        assert_eq!(children.len(), 3);
        assert_eq!(scene.node(children[0]).name(), "b");
        assert_eq!(scene.node(children[1]).name(), "a");
        assert!(!scene.node(children[1]).is_active());
        assert_eq!(scene.node(children[2]).name(), "");
    }

    #[test]
    fn test_load_duplicate_child_names_fails_and_rolls_back() {
        let mut scene = Scene::new();
        let root = scene.root();
        let mut doc = json!({
            "children": [
                { "name": "a", "position": [1.0, 0.0, 0.0] },
                { "name": "a", "position": [2.0, 0.0, 0.0] }
            ]
        });
        let result = scene.create_child_from_value(root, "g", &mut doc);
        assert!(matches!(result, Err(SceneError::DuplicateName { ref name, .. }) if name == "a"));
        assert!(scene.try_find_child_by_name(root, "g").is_err());
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn test_load_reuses_preexisting_child() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.create_child(root, "g");
        let a = scene.create_child(group, "a");
        let mut doc = json!({ "children": [{ "name": "a", "angle": 30.0 }, { "name": "b" }] });
        scene.save_load(group, &mut doc, Direction::Load).unwrap();
        assert_eq!(scene.node(group).children().len(), 2);
        assert_eq!(scene.find_child_by_name(group, "a"), a);
        assert!((scene.node(a).angle() - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_unregistered_component_fails_and_rolls_back() {
        let mut scene = Scene::new();
        let root = scene.root();
        let mut doc = json!({ "components": { "PersistenceTestNoSuchType": {} } });
        let result = scene.create_child_from_value(root, "broken", &mut doc);
        assert!(matches!(result, Err(SceneError::UnregisteredType(ref n)) if n == "PersistenceTestNoSuchType"));
        assert!(scene.try_find_child_by_name(root, "broken").is_err());
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn test_load_bad_field_type_is_document_error() {
        let mut scene = Scene::new();
        let root = scene.root();
        let mut doc = json!({ "position": "here" });
        let result = scene.create_child_from_value(root, "bad", &mut doc);
        assert!(matches!(result, Err(SceneError::Document { ref key, .. }) if key == "position"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut scene = Scene::with_config(crate::resources::sceneconfig::SceneConfig::with_root(dir.path()));
        let root = scene.root();
        let result = scene.create_child_from_file(root, "x", "nope.json");
        assert!(matches!(result, Err(SceneError::Io { .. })));
    }

    #[test]
    fn test_save_to_file_uses_indent_and_newline() {
        let dir = tempfile::tempdir().unwrap();
        let mut scene = Scene::with_config(crate::resources::sceneconfig::SceneConfig::with_root(dir.path()));
        let root = scene.root();
        scene.save_to_file(root, "nested/root.json").unwrap();

        let text = fs::read_to_string(dir.path().join("nested/root.json")).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"name\": \"root\""));
    }
}
