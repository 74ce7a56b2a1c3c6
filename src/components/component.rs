//! The [`Component`] contract and the context components run in.
//!
//! A component is a unit of behavior attached to exactly one
//! [`GameObject`](crate::scene::gameobject::GameObject). Components are
//! built by the [`Factory`](crate::core::factory::Factory) from their type
//! name, attached to a node, and from then on receive the node's lifecycle
//! calls:
//!
//! - `on_initialize` – once, right after attaching. Returning `false` rejects
//!   the component; it is dropped and the attach reports an error.
//! - `on_event` – for every window event reaching the owner.
//! - `on_fixed_update` – once per fixed step.
//! - `on_update` – once per frame with the frame delta in seconds.
//! - `on_save_load` – serializes the component's own state in both
//!   directions.
//!
//! Calls only reach a component while its owner and every ancestor are
//! active.
//!
//! # Context
//!
//! Hooks receive a [`ComponentContext`]. It gives free access to node-local
//! state such as transforms and sibling components. Structural changes
//! (creating or destroying nodes and components) go through
//! [`ComponentContext::commands`] and are applied once the current traversal
//! returns.

use glam::{Vec2, Vec3};
use serde_json::Value;

use crate::core::error::SceneError;
use crate::core::typeinfo::{
    Object, StaticType, TypeInfo, TypeInfoCell, cast_mut, cast_ref, is_instance_of,
};
use crate::document::Direction;
use crate::events::window::WindowEvent;
use crate::scene::arena::NodeId;
use crate::scene::commands::SceneCommands;
use crate::scene::gameobject::GameObject;
use crate::scene::tree::Scene;

/// Behavior attached to a scene node.
///
/// Declare the type with [`component_type!`](crate::component_type) and
/// register it with [`Factory::register`](crate::core::factory::Factory::register)
/// to make it loadable from scene documents.
pub trait Component: Object {
    fn on_initialize(&mut self, _ctx: &mut ComponentContext<'_>) -> bool {
        true
    }

    fn on_event(&mut self, _ctx: &mut ComponentContext<'_>, _event: &WindowEvent) {}

    fn on_fixed_update(&mut self, _ctx: &mut ComponentContext<'_>) {}

    fn on_update(&mut self, _ctx: &mut ComponentContext<'_>, _dt: f32) {}

    /// Save into or load from `data`, the component's own sub-document.
    fn on_save_load(&mut self, _data: &mut Value, _direction: Direction) -> Result<(), SceneError> {
        Ok(())
    }
}

impl StaticType for dyn Component {
    fn type_info_static() -> &'static TypeInfo {
        static INFO: TypeInfoCell<TypeInfo> = TypeInfoCell::new();
        INFO.get_or_init(|| TypeInfo::new("Component", Some(<dyn Object>::type_info_static())))
    }
}

impl dyn Component {
    pub fn is_instance_of<T: StaticType + ?Sized>(&self) -> bool {
        is_instance_of::<T, _>(self)
    }

    pub fn downcast_ref<T: StaticType + 'static>(&self) -> Option<&T> {
        cast_ref::<T, _>(self)
    }

    pub fn downcast_mut<T: StaticType + 'static>(&mut self) -> Option<&mut T> {
        cast_mut::<T, _>(self)
    }
}

/// What a component hook can reach while it runs.
pub struct ComponentContext<'a> {
    scene: &'a mut Scene,
    owner: NodeId,
}

impl<'a> ComponentContext<'a> {
    pub(crate) fn new(scene: &'a mut Scene, owner: NodeId) -> Self {
        Self { scene, owner }
    }

    /// The node this component is attached to.
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn node(&self) -> &GameObject {
        self.scene.node(self.owner)
    }

    pub fn node_mut(&mut self) -> &mut GameObject {
        self.scene.node_mut(self.owner)
    }

    /// Read-only view of the whole scene.
    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// Local state of any live node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut GameObject> {
        self.scene.get_mut(id)
    }

    /// Move the owner relative to its current facing.
    pub fn move_by(&mut self, offset: Vec2) {
        self.scene.move_by(self.owner, offset.x, offset.y);
    }

    pub fn absolute_position(&self) -> Vec3 {
        self.scene.absolute_position(self.owner)
    }

    pub fn absolute_angle(&self) -> f32 {
        self.scene.absolute_angle(self.owner)
    }

    /// Queue for structural changes, applied after the current traversal.
    pub fn commands(&mut self) -> &mut SceneCommands {
        &mut self.scene.commands
    }
}
