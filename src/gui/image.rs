//! Image widgets.

use serde::{Deserialize, Serialize};

use crate::gui::widget::GuiWidget;

crate::static_type!(GuiImage, "GUIImage", GuiWidget);

/// A widget showing one texture, referenced by asset key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiImage {
    pub texture: String,
}

impl GuiImage {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
        }
    }
}
