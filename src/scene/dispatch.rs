//! Recursive lifecycle dispatch.
//!
//! [`Scene::event`], [`Scene::fixed_update`] and [`Scene::update`] walk the
//! tree from the root, depth-first in child order. At each node:
//!
//! 1. an inactive node is skipped together with its whole subtree,
//! 2. a widget node runs its own hook (pointer handling on events,
//!    alignment on fixed updates),
//! 3. every attached component receives the call, in attach order,
//! 4. the children are visited.
//!
//! The queued [`SceneCommand`](crate::scene::commands::SceneCommand)s are
//! applied after the walk returns.

use glam::Vec2;
use smallvec::SmallVec;

use crate::components::component::ComponentContext;
use crate::events::window::WindowEvent;
use crate::scene::arena::NodeId;
use crate::scene::tree::Scene;

#[derive(Clone, Copy)]
enum Pass<'e> {
    Event(&'e WindowEvent),
    FixedUpdate,
    Update(f32),
}

impl Scene {
    /// Forward `event` to every active node.
    ///
    /// A [`WindowEvent::Resized`] first sets the root's size, so aligned
    /// widgets directly under the root re-anchor on the next fixed update.
    pub fn event(&mut self, event: &WindowEvent) {
        if let WindowEvent::Resized { width, height } = *event {
            let root = self.root();
            self.node_mut(root).set_size(Vec2::new(width, height));
        }
        self.dispatch(self.root(), Pass::Event(event));
        self.apply_commands();
    }

    pub fn fixed_update(&mut self) {
        self.dispatch(self.root(), Pass::FixedUpdate);
        self.apply_commands();
    }

    /// `dt` is the frame time in seconds.
    pub fn update(&mut self, dt: f32) {
        self.dispatch(self.root(), Pass::Update(dt));
        self.apply_commands();
    }

    fn dispatch(&mut self, id: NodeId, pass: Pass<'_>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.is_active() {
            return;
        }

        if node.widget.is_some() {
            match pass {
                Pass::Event(event) => self.widget_pointer(id, event),
                Pass::FixedUpdate => self.widget_align(id),
                Pass::Update(_) => {}
            }
        }

        let count = self.nodes.get(id).map_or(0, |n| n.components.len());
        for index in 0..count {
            self.run_component(id, index, pass);
        }

        let children: SmallVec<[NodeId; 8]> = match self.nodes.get(id) {
            Some(node) => node.children.iter().copied().collect(),
            None => return,
        };
        for child in children {
            self.dispatch(child, pass);
        }
    }

    /// Run one component hook. The component is taken out of its slot for
    /// the duration of the call so the hook can borrow the scene.
    fn run_component(&mut self, id: NodeId, index: usize, pass: Pass<'_>) {
        let Some(mut component) = self
            .nodes
            .get_mut(id)
            .and_then(|n| n.components.get_mut(index))
            .and_then(|slot| slot.take())
        else {
            return;
        };

        {
            let mut ctx = ComponentContext::new(self, id);
            match pass {
                Pass::Event(event) => component.on_event(&mut ctx, event),
                Pass::FixedUpdate => component.on_fixed_update(&mut ctx),
                Pass::Update(dt) => component.on_update(&mut ctx, dt),
            }
        }

        if let Some(slot) = self
            .nodes
            .get_mut(id)
            .and_then(|n| n.components.get_mut(index))
        {
            *slot = Some(component);
        }
    }

    fn widget_align(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get(id).and_then(|n| n.parent) else {
            return;
        };
        let Some(parent_size) = self.nodes.get(parent).map(|p| p.size()) else {
            return;
        };
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let Some(widget) = node.widget.as_ref() else {
            return;
        };
        let aligned = widget.aligned_position(node.position(), node.size(), parent_size);
        node.set_position(aligned);
    }

    fn widget_pointer(&mut self, id: NodeId, event: &WindowEvent) {
        if !event.is_mouse() {
            return;
        }
        let top_left = self.absolute_position(id).truncate();
        let Scene {
            nodes, commands, ..
        } = self;
        let Some(node) = nodes.get_mut(id) else {
            return;
        };
        let size = node.size();
        let Some(widget) = node.widget.as_mut() else {
            return;
        };
        if let Some(transition) = widget.handle_pointer(event, top_left, size) {
            if let Some(callback) = widget.callback_mut(transition) {
                callback(id, commands);
            }
        }
    }
}
