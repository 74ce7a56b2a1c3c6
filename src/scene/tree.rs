//! The scene tree.
//!
//! A [`Scene`] owns every [`GameObject`] in an arena and always has a root
//! node. Nodes refer to each other by [`NodeId`]: a node's children are kept
//! in creation order, named children are also indexed by name, and the
//! parent link is a plain id.
//!
//! Operations here come in the two tiers described in
//! [`core::error`](crate::core::error): `create_child` and
//! `find_child_by_name` panic on misuse and have `try_*` forms, while
//! component lookups and removals only log a warning.
//!
//! Dispatch lives in [`dispatch`](crate::scene::dispatch), the deferred
//! command queue in [`commands`](crate::scene::commands) and document I/O in
//! [`persistence`](crate::scene::persistence).

use glam::{Vec2, Vec3};
use log::{debug, warn};

use crate::components::component::{Component, ComponentContext};
use crate::core::error::{OrFatal, SceneError, fatal};
use crate::core::factory::Factory;
use crate::core::hash::StringHash;
use crate::core::typeinfo::StaticType;
use crate::resources::sceneconfig::SceneConfig;
use crate::scene::arena::{Arena, NodeId};
use crate::scene::commands::SceneCommands;
use crate::scene::gameobject::GameObject;

/// Name given to the root node of a new scene.
pub const ROOT_NAME: &str = "root";

/// Rotate `v` counter-clockwise by `degrees`.
pub fn rotate_2d(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// A tree of game objects rooted at [`Scene::root`].
pub struct Scene {
    pub(crate) nodes: Arena<GameObject>,
    root: NodeId,
    pub(crate) commands: SceneCommands,
    pub(crate) flushing: bool,
    config: SceneConfig,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_config(SceneConfig::new())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.insert(GameObject::new(ROOT_NAME, None));
        Self {
            nodes,
            root,
            commands: SceneCommands::default(),
            flushing: false,
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SceneConfig {
        &mut self.config
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&GameObject> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut GameObject> {
        self.nodes.get_mut(id)
    }

    /// Node behind `id`. Panics if it was destroyed.
    #[track_caller]
    pub fn node(&self, id: NodeId) -> &GameObject {
        self.nodes.get(id).ok_or(SceneError::StaleNode(id)).or_fatal()
    }

    /// Mutable node behind `id`. Panics if it was destroyed.
    #[track_caller]
    pub fn node_mut(&mut self, id: NodeId) -> &mut GameObject {
        self.nodes
            .get_mut(id)
            .ok_or(SceneError::StaleNode(id))
            .or_fatal()
    }

    /// Queue of structural changes waiting for [`Scene::apply_commands`].
    pub fn commands(&mut self) -> &mut SceneCommands {
        &mut self.commands
    }

    // ==================== Hierarchy ====================

    /// Append a new child named `name` to `parent`.
    ///
    /// Unnamed children (empty `name`) are allowed and are not indexed, so
    /// they can only be reached through [`GameObject::children`].
    pub fn try_create_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId, SceneError> {
        let parent_node = self.nodes.get(parent).ok_or(SceneError::StaleNode(parent))?;
        if !name.is_empty() && parent_node.children_by_name.contains_key(name) {
            return Err(SceneError::DuplicateName {
                parent,
                name: name.to_string(),
            });
        }

        let id = self.nodes.insert(GameObject::new(name, Some(parent)));
        let parent_node = self.nodes.get_mut(parent).ok_or(SceneError::StaleNode(parent))?;
        parent_node.children.push(id);
        if !name.is_empty() {
            parent_node.children_by_name.insert(name.to_string(), id);
        }
        Ok(id)
    }

    /// Append a new child. Panics if `parent` already has a child named
    /// `name`.
    #[track_caller]
    pub fn create_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.try_create_child(parent, name).or_fatal()
    }

    /// Destroy the child of `parent` named `name` together with its subtree.
    /// Does nothing if there is no such child.
    pub fn destroy_child(&mut self, parent: NodeId, name: &str) {
        let Some(child) = self.nodes.get(parent).and_then(|p| p.child_id(name)) else {
            debug!("destroy_child: no child '{}' under node {}", name, parent);
            return;
        };
        self.detach(parent, child);
        self.destroy_subtree(child);
    }

    /// Destroy `id` and its subtree. The root cannot be destroyed.
    pub fn destroy_node(&mut self, id: NodeId) {
        if id == self.root {
            warn!("Refusing to destroy the scene root");
            return;
        }
        let Some(node) = self.nodes.get(id) else {
            warn!("destroy_node: node {} no longer exists", id);
            return;
        };
        if let Some(parent) = node.parent {
            self.detach(parent, id);
        }
        self.destroy_subtree(id);
    }

    /// Destroy every child of `id` with their subtrees. Returns the number
    /// of nodes removed.
    pub fn destroy_all_children(&mut self, id: NodeId) -> usize {
        let Some(node) = self.nodes.get_mut(id) else {
            warn!("destroy_all_children: node {} no longer exists", id);
            return 0;
        };
        let children = std::mem::take(&mut node.children);
        node.children_by_name.clear();
        children
            .into_iter()
            .map(|child| self.destroy_subtree(child))
            .sum()
    }

    /// Drop every component attached to `id`.
    pub fn destroy_all_components(&mut self, id: NodeId) {
        match self.nodes.get_mut(id) {
            Some(node) => node.components.clear(),
            None => warn!("destroy_all_components: node {} no longer exists", id),
        }
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return;
        };
        parent_node.children.retain(|c| *c != child);
        parent_node.children_by_name.retain(|_, c| *c != child);
    }

    /// Remove `id` and all its descendants from the arena, dropping their
    /// components. Returns the number of nodes removed.
    fn destroy_subtree(&mut self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children.iter().copied());
                removed += 1;
            }
        }
        removed
    }

    pub fn try_find_child_by_name(&self, parent: NodeId, name: &str) -> Result<NodeId, SceneError> {
        if name.is_empty() {
            return Err(SceneError::InvalidName(name.to_string()));
        }
        let parent_node = self.nodes.get(parent).ok_or(SceneError::StaleNode(parent))?;
        parent_node
            .child_id(name)
            .ok_or_else(|| SceneError::ChildNotFound {
                parent,
                name: name.to_string(),
            })
    }

    /// Direct child of `parent` named `name`. Panics if `name` is empty or
    /// there is no such child.
    #[track_caller]
    pub fn find_child_by_name(&self, parent: NodeId, name: &str) -> NodeId {
        self.try_find_child_by_name(parent, name).or_fatal()
    }

    /// Follow a `/`-separated path of child names starting at `from`.
    pub fn find_path(&self, from: NodeId, path: &str) -> Option<NodeId> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(from, |current, segment| self.nodes.get(current)?.child_id(segment))
    }

    /// Pre-order walk of the subtree at `start`, with depths relative to it.
    pub fn depth_first(&self, start: NodeId) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(start, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push((id, depth));
            for child in node.children.iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        out
    }

    // ==================== Components ====================

    /// Attach an already constructed component to `node`.
    ///
    /// A second component of the same type is rejected before
    /// `on_initialize` runs. A component whose `on_initialize` returns
    /// `false` is dropped.
    pub fn attach_component(
        &mut self,
        node: NodeId,
        mut component: Box<dyn Component>,
    ) -> Result<&mut (dyn Component + 'static), SceneError> {
        let target = self.nodes.get(node).ok_or(SceneError::StaleNode(node))?;
        let name = component.type_name();
        if target.has_component(component.type_hash()) {
            warn!(
                "Failed to add component '{}' because a component of this type already exists on '{}'",
                name, target.name
            );
            return Err(SceneError::DuplicateComponent {
                node,
                name: name.to_string(),
            });
        }

        let initialized = {
            let mut ctx = ComponentContext::new(self, node);
            component.on_initialize(&mut ctx)
        };
        if !initialized {
            warn!(
                "Failed to add component '{}' because it was not successfully initialized",
                name
            );
            return Err(SceneError::InitializationFailed {
                node,
                name: name.to_string(),
            });
        }

        let target = self.nodes.get_mut(node).ok_or(SceneError::StaleNode(node))?;
        target.components.push(Some(component));
        target
            .components
            .last_mut()
            .and_then(|slot| slot.as_deref_mut())
            .ok_or(SceneError::ComponentNotFound {
                node,
                hash: StringHash::new(name),
            })
    }

    /// Attach `component` and hand back a typed reference to it.
    pub fn add_component<C>(&mut self, node: NodeId, component: C) -> Result<&mut C, SceneError>
    where
        C: Component + StaticType,
    {
        let attached = self.attach_component(node, Box::new(component))?;
        attached
            .downcast_mut::<C>()
            .ok_or(SceneError::ComponentNotFound {
                node,
                hash: C::type_hash_static(),
            })
    }

    /// Construct the component registered under `hash` and attach it.
    ///
    /// Panics if `hash` was never registered at the factory.
    #[track_caller]
    pub fn create_component(
        &mut self,
        node: NodeId,
        hash: StringHash,
    ) -> Result<&mut (dyn Component + 'static), SceneError> {
        let component = Factory::create_component(hash)?;
        self.attach_component(node, component)
    }

    #[track_caller]
    pub fn create_component_by_name(
        &mut self,
        node: NodeId,
        type_name: &str,
    ) -> Result<&mut (dyn Component + 'static), SceneError> {
        let component = match Factory::try_create_component(StringHash::new(type_name)) {
            Ok(component) => component,
            Err(SceneError::UnregisteredType(_)) => {
                fatal(SceneError::UnregisteredType(type_name.to_string()))
            }
            Err(e) => return Err(e),
        };
        self.attach_component(node, component)
    }

    /// Drop the component of type `hash` from `node`. Logs a warning if
    /// there is none.
    pub fn destroy_component(&mut self, node: NodeId, hash: StringHash) {
        let Some(target) = self.nodes.get_mut(node) else {
            warn!("destroy_component: node {} no longer exists", node);
            return;
        };
        match target.component_index(hash) {
            Some(index) => {
                target.components.remove(index);
            }
            None => {
                let name = Factory::type_name_of(hash)
                    .map(str::to_string)
                    .unwrap_or_else(|| hash.to_string());
                warn!("Failed to destroy component '{}' on '{}'", name, target.name);
            }
        }
    }

    pub fn find_component(&self, node: NodeId, hash: StringHash) -> Option<&(dyn Component + 'static)> {
        self.nodes.get(node)?.find_component(hash)
    }

    pub fn find_component_mut(
        &mut self,
        node: NodeId,
        hash: StringHash,
    ) -> Option<&mut (dyn Component + 'static)> {
        self.nodes.get_mut(node)?.find_component_mut(hash)
    }

    pub fn component<T: Component + StaticType>(&self, node: NodeId) -> Option<&T> {
        self.nodes.get(node)?.component::<T>()
    }

    pub fn component_mut<T: Component + StaticType>(&mut self, node: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(node)?.component_mut::<T>()
    }

    // ==================== Transforms ====================

    /// Move `id` by `(dx, dy)` in its own rotated frame.
    pub fn move_by(&mut self, id: NodeId, dx: f32, dy: f32) {
        let offset = rotate_2d(Vec2::new(dx, dy), self.absolute_angle(id));
        self.node_mut(id).translate(offset.extend(0.0));
    }

    /// Sum of the local angles of `id` and all its ancestors, in degrees.
    pub fn absolute_angle(&self, id: NodeId) -> f32 {
        let mut angle = 0.0;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            angle += node.angle();
            current = node.parent;
        }
        angle
    }

    /// Position of `id` in scene space.
    ///
    /// Each non-root node contributes its local offset rotated by its
    /// parent's absolute angle; depth is added unrotated. The root's own
    /// position is added as is.
    pub fn absolute_position(&self, id: NodeId) -> Vec3 {
        let mut position = Vec3::ZERO;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            let local = node.position();
            match node.parent {
                Some(parent) => {
                    let rotated = rotate_2d(local.truncate(), self.absolute_angle(parent));
                    position += rotated.extend(local.z);
                }
                None => position += local,
            }
            current = node.parent;
        }
        position
    }
}
