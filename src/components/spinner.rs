//! Fixed-step rotation.

use serde_json::Value;

use crate::components::component::{Component, ComponentContext};
use crate::core::error::SceneError;
use crate::document::{Direction, sync};

/// Rotates the owner by `degrees_per_step` on every fixed update.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner {
    pub degrees_per_step: f32,
}

crate::component_type!(Spinner, "Spinner");

impl Spinner {
    pub fn new(degrees_per_step: f32) -> Self {
        Self { degrees_per_step }
    }
}

impl Component for Spinner {
    fn on_fixed_update(&mut self, ctx: &mut ComponentContext<'_>) {
        ctx.node_mut().rotate(self.degrees_per_step);
    }

    fn on_save_load(&mut self, data: &mut Value, direction: Direction) -> Result<(), SceneError> {
        sync(data, "degreesPerStep", &mut self.degrees_per_step, direction)
    }
}
