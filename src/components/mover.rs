//! Constant-velocity movement.
//!
//! [`Mover`] moves its owner by `velocity * dt` every frame. The offset is
//! applied in the owner's rotated frame, so a node facing 90 degrees moves
//! along y for a velocity along x.

use glam::Vec2;
use serde_json::Value;

use crate::components::component::{Component, ComponentContext};
use crate::core::error::SceneError;
use crate::document::{Direction, sync};

/// Moves the owner at a fixed velocity in units per second.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mover {
    pub velocity: Vec2,
}

crate::component_type!(Mover, "Mover");

impl Mover {
    pub fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }
}

impl Component for Mover {
    fn on_update(&mut self, ctx: &mut ComponentContext<'_>, dt: f32) {
        ctx.move_by(self.velocity * dt);
    }

    fn on_save_load(&mut self, data: &mut Value, direction: Direction) -> Result<(), SceneError> {
        sync(data, "velocity", &mut self.velocity, direction)
    }
}
