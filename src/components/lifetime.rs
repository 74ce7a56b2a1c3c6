//! Time-to-live for scene nodes.
//!
//! [`Lifetime`] counts down every frame. When the remaining time reaches
//! zero it queues the destruction of its owner, which happens after the
//! current update pass together with the owner's subtree.
//!
//! Unlike a timer there is no callback; it is a "fire and forget" mechanism
//! for bullets, particles and transient effects.

use log::debug;
use serde_json::Value;

use crate::components::component::{Component, ComponentContext};
use crate::core::error::SceneError;
use crate::document::{Direction, sync};

const DEFAULT_LIFETIME: f32 = 1.0;

/// Destroys its owner after `remaining` seconds.
#[derive(Debug, Clone, Copy)]
pub struct Lifetime {
    /// Remaining time in seconds before the owner is destroyed.
    pub remaining: f32,
    expired: bool,
}

crate::component_type!(Lifetime, "Lifetime");

impl Default for Lifetime {
    fn default() -> Self {
        Self::new(DEFAULT_LIFETIME)
    }
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds,
            expired: false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

impl Component for Lifetime {
    fn on_update(&mut self, ctx: &mut ComponentContext<'_>, dt: f32) {
        if self.expired {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.expired = true;
            let owner = ctx.owner();
            debug!("Lifetime of '{}' ran out", ctx.node().name());
            ctx.commands().destroy_node(owner);
        }
    }

    fn on_save_load(&mut self, data: &mut Value, direction: Direction) -> Result<(), SceneError> {
        sync(data, "remaining", &mut self.remaining, direction)
    }
}
