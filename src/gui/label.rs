//! Text widgets.

use serde::{Deserialize, Serialize};

use crate::gui::widget::GuiWidget;

crate::static_type!(GuiLabel, "GUILabel", GuiWidget);

/// A widget showing a line of text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiLabel {
    pub text: String,
    /// Font asset key. Empty means the host's default font.
    pub font: String,
}

impl GuiLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}
