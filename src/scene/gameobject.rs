//! Scene node data.
//!
//! A [`GameObject`] holds one node's local state: its name, the handles of
//! its parent and children, the attached components, the local transform
//! and the active flag. Widgets are game objects carrying a
//! [`GuiWidget`](crate::gui::widget::GuiWidget).
//!
//! Everything here is node-local. Operations that touch more than one node
//! (creating children, composing transforms with ancestors, dispatch) live
//! on [`Scene`](crate::scene::tree::Scene).

use glam::{Vec2, Vec3};
use log::warn;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::components::component::Component;
use crate::core::hash::StringHash;
use crate::core::typeinfo::{Object, StaticType, TypeInfo};
use crate::gui::widget::GuiWidget;
use crate::scene::arena::NodeId;

/// A node of the scene tree.
pub struct GameObject {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) children_by_name: FxHashMap<String, NodeId>,
    /// Slots are only `None` while their component is running a hook.
    pub(crate) components: Vec<Option<Box<dyn Component>>>,
    pub(crate) widget: Option<GuiWidget>,
    position: Vec3,
    size: Vec2,
    /// Degrees.
    angle: f32,
    active: bool,
}

crate::static_type!(GameObject, "GameObject", dyn Object);

impl Object for GameObject {
    fn type_info(&self) -> &'static TypeInfo {
        match &self.widget {
            Some(widget) => widget.kind().type_info(),
            None => GameObject::type_info_static(),
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl GameObject {
    pub(crate) fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            children: SmallVec::new(),
            children_by_name: FxHashMap::default(),
            components: Vec::new(),
            widget: None,
            position: Vec3::ZERO,
            size: Vec2::ZERO,
            angle: 0.0,
            active: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in creation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Direct child named `name`, without logging on a miss.
    pub fn child_id(&self, name: &str) -> Option<NodeId> {
        self.children_by_name.get(name).copied()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Local angle in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, degrees: f32) {
        self.angle = degrees;
    }

    /// Add `offset` to the local position, ignoring rotation.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Add `delta` to the local size.
    pub fn scale(&mut self, delta: Vec2) {
        self.size += delta;
    }

    /// Add `degrees` to the local angle.
    pub fn rotate(&mut self, degrees: f32) {
        self.angle += degrees;
    }

    pub fn widget(&self) -> Option<&GuiWidget> {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut GuiWidget> {
        self.widget.as_mut()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Attached components in attach order. A component currently running a
    /// hook is skipped.
    pub fn components(&self) -> impl Iterator<Item = &(dyn Component + 'static)> {
        self.components.iter().filter_map(|slot| slot.as_deref())
    }

    pub fn component_names(&self) -> Vec<&'static str> {
        self.components().map(|c| c.type_name()).collect()
    }

    pub(crate) fn component_index(&self, hash: StringHash) -> Option<usize> {
        self.components.iter().position(|slot| match slot {
            Some(component) => component.type_hash() == hash,
            None => false,
        })
    }

    /// Attached component of type `hash`, without logging on a miss.
    pub fn has_component(&self, hash: StringHash) -> bool {
        self.component_index(hash).is_some()
    }

    /// Attached component of type `hash`. Logs a warning if there is none.
    pub fn find_component(&self, hash: StringHash) -> Option<&(dyn Component + 'static)> {
        match self.component_index(hash) {
            Some(index) => self.components[index].as_deref(),
            None => {
                warn!("Component '{}' not found on '{}'", hash, self.name);
                None
            }
        }
    }

    pub fn find_component_mut(
        &mut self,
        hash: StringHash,
    ) -> Option<&mut (dyn Component + 'static)> {
        match self.component_index(hash) {
            Some(index) => self.components[index].as_deref_mut(),
            None => {
                warn!("Component '{}' not found on '{}'", hash, self.name);
                None
            }
        }
    }

    pub fn component<T: Component + StaticType>(&self) -> Option<&T> {
        self.find_component(T::type_hash_static())
            .and_then(|c| c.downcast_ref::<T>())
    }

    pub fn component_mut<T: Component + StaticType>(&mut self) -> Option<&mut T> {
        self.find_component_mut(T::type_hash_static())
            .and_then(|c| c.downcast_mut::<T>())
    }
}
