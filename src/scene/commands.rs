//! Deferred structural changes.
//!
//! While the scene is being traversed, components and widget callbacks may
//! not add or remove nodes or components directly. They push a
//! [`SceneCommand`] onto [`SceneCommands`] instead, and the scene applies
//! the queue once the traversal has returned.
//!
//! Commands run in submission order. Commands queued while the queue is
//! being applied (for example by a component's `on_initialize`) run in the
//! same flush, after the current batch. A command whose target node has been
//! destroyed in the meantime is skipped with a warning. If a command panics,
//! the rest of its batch is lost but the queue keeps working.

use std::path::PathBuf;

use log::{debug, warn};

use crate::core::hash::StringHash;
use crate::scene::arena::NodeId;
use crate::scene::tree::Scene;

/// One queued structural change.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    CreateChild {
        parent: NodeId,
        name: String,
    },
    /// Load a document relative to the config root into a new child.
    CreateChildFromFile {
        parent: NodeId,
        name: String,
        path: PathBuf,
    },
    DestroyChild {
        parent: NodeId,
        name: String,
    },
    DestroyNode {
        node: NodeId,
    },
    DestroyAllChildren {
        node: NodeId,
    },
    CreateComponent {
        node: NodeId,
        type_name: String,
    },
    DestroyComponent {
        node: NodeId,
        hash: StringHash,
    },
    DestroyAllComponents {
        node: NodeId,
    },
    SetActive {
        node: NodeId,
        active: bool,
    },
}

/// FIFO of [`SceneCommand`]s.
#[derive(Debug, Default)]
pub struct SceneCommands {
    queue: Vec<SceneCommand>,
}

impl SceneCommands {
    pub fn push(&mut self, command: SceneCommand) {
        self.queue.push(command);
    }

    pub fn create_child(&mut self, parent: NodeId, name: impl Into<String>) {
        self.push(SceneCommand::CreateChild {
            parent,
            name: name.into(),
        });
    }

    pub fn create_child_from_file(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) {
        self.push(SceneCommand::CreateChildFromFile {
            parent,
            name: name.into(),
            path: path.into(),
        });
    }

    pub fn destroy_child(&mut self, parent: NodeId, name: impl Into<String>) {
        self.push(SceneCommand::DestroyChild {
            parent,
            name: name.into(),
        });
    }

    pub fn destroy_node(&mut self, node: NodeId) {
        self.push(SceneCommand::DestroyNode { node });
    }

    pub fn destroy_all_children(&mut self, node: NodeId) {
        self.push(SceneCommand::DestroyAllChildren { node });
    }

    pub fn create_component(&mut self, node: NodeId, type_name: impl Into<String>) {
        self.push(SceneCommand::CreateComponent {
            node,
            type_name: type_name.into(),
        });
    }

    pub fn destroy_component(&mut self, node: NodeId, hash: StringHash) {
        self.push(SceneCommand::DestroyComponent { node, hash });
    }

    pub fn destroy_all_components(&mut self, node: NodeId) {
        self.push(SceneCommand::DestroyAllComponents { node });
    }

    pub fn set_active(&mut self, node: NodeId, active: bool) {
        self.push(SceneCommand::SetActive { node, active });
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending commands in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneCommand> {
        self.queue.iter()
    }

    pub(crate) fn take(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.queue)
    }
}

/// Marks the scene as flushing until dropped, so a command that panics
/// does not leave the queue locked.
struct Flushing<'a> {
    scene: &'a mut Scene,
}

impl<'a> Flushing<'a> {
    fn start(scene: &'a mut Scene) -> Self {
        scene.flushing = true;
        Self { scene }
    }
}

impl Drop for Flushing<'_> {
    fn drop(&mut self) {
        self.scene.flushing = false;
    }
}

impl Scene {
    /// Apply every queued command. Returns how many ran.
    ///
    /// Calls made while a flush is already in progress return 0 and leave
    /// the queue to the outer flush.
    pub fn apply_commands(&mut self) -> usize {
        if self.flushing {
            return 0;
        }
        let mut guard = Flushing::start(self);
        let mut applied = 0;
        loop {
            let batch = guard.scene.commands.take();
            if batch.is_empty() {
                break;
            }
            for command in batch {
                guard.scene.apply_command(command);
                applied += 1;
            }
        }
        drop(guard);
        if applied > 0 {
            debug!("Applied {} scene commands", applied);
        }
        applied
    }

    fn apply_command(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::CreateChild { parent, name } => {
                if self.skip_stale(parent, "CreateChild") {
                    return;
                }
                self.create_child(parent, &name);
            }
            SceneCommand::CreateChildFromFile { parent, name, path } => {
                if self.skip_stale(parent, "CreateChildFromFile") {
                    return;
                }
                if let Err(e) = self.create_child_from_file(parent, &name, &path) {
                    warn!("Failed to create '{}' from {:?}: {}", name, path, e);
                }
            }
            SceneCommand::DestroyChild { parent, name } => {
                if self.skip_stale(parent, "DestroyChild") {
                    return;
                }
                self.destroy_child(parent, &name);
            }
            SceneCommand::DestroyNode { node } => {
                if self.skip_stale(node, "DestroyNode") {
                    return;
                }
                self.destroy_node(node);
            }
            SceneCommand::DestroyAllChildren { node } => {
                if self.skip_stale(node, "DestroyAllChildren") {
                    return;
                }
                self.destroy_all_children(node);
            }
            SceneCommand::CreateComponent { node, type_name } => {
                if self.skip_stale(node, "CreateComponent") {
                    return;
                }
                // Failures are already logged by the attach path.
                let _ = self.create_component_by_name(node, &type_name);
            }
            SceneCommand::DestroyComponent { node, hash } => {
                if self.skip_stale(node, "DestroyComponent") {
                    return;
                }
                self.destroy_component(node, hash);
            }
            SceneCommand::DestroyAllComponents { node } => {
                if self.skip_stale(node, "DestroyAllComponents") {
                    return;
                }
                self.destroy_all_components(node);
            }
            SceneCommand::SetActive { node, active } => {
                if let Some(target) = self.get_mut(node) {
                    target.set_active(active);
                } else {
                    warn!("Skipping SetActive: node {} no longer exists", node);
                }
            }
        }
    }

    fn skip_stale(&self, node: NodeId, what: &str) -> bool {
        if self.contains(node) {
            return false;
        }
        warn!("Skipping {}: node {} no longer exists", what, node);
        true
    }
}
