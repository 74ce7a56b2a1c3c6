//! Push buttons.
//!
//! A button is an image widget with a label child named [`LABEL_NAME`]. The
//! image switches between three textures as the pointer moves over, presses
//! and releases the button. The label text is read and written through
//! [`Scene::button_text`](crate::scene::tree::Scene::button_text) and
//! [`Scene::set_button_text`](crate::scene::tree::Scene::set_button_text).

use serde::{Deserialize, Serialize};

use crate::gui::image::GuiImage;
use crate::gui::widget::PointerTransition;

crate::static_type!(GuiButton, "GUIButton", GuiImage);

/// Name of the label child every button carries.
pub const LABEL_NAME: &str = "label";

/// Image state of a button.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GuiButton {
    /// Texture currently shown.
    pub texture: String,
    pub normal_texture: String,
    pub hovered_texture: String,
    pub pressed_texture: String,
}

impl GuiButton {
    /// A button that shows `normal` until the pointer reaches it.
    pub fn new(normal: impl Into<String>, hovered: impl Into<String>, pressed: impl Into<String>) -> Self {
        let normal = normal.into();
        Self {
            texture: normal.clone(),
            normal_texture: normal,
            hovered_texture: hovered.into(),
            pressed_texture: pressed.into(),
        }
    }

    /// The texture currently shown, as an image.
    pub fn image(&self) -> GuiImage {
        GuiImage::new(self.texture.clone())
    }

    pub(crate) fn on_pointer(&mut self, transition: PointerTransition, hovered: bool) {
        let next = match transition {
            PointerTransition::Enter => &self.hovered_texture,
            PointerTransition::Leave => &self.normal_texture,
            PointerTransition::Pressed => &self.pressed_texture,
            PointerTransition::Released if hovered => &self.hovered_texture,
            PointerTransition::Released => &self.normal_texture,
        };
        self.texture = next.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_shows_normal_texture() {
        let button = GuiButton::new("btn", "btn_hover", "btn_down");
        assert_eq!(button.texture, "btn");
        assert_eq!(button.image(), GuiImage::new("btn"));
    }

    #[test]
    fn test_texture_follows_pointer() {
        let mut button = GuiButton::new("btn", "btn_hover", "btn_down");
        button.on_pointer(PointerTransition::Enter, true);
        assert_eq!(button.texture, "btn_hover");
        button.on_pointer(PointerTransition::Pressed, true);
        assert_eq!(button.texture, "btn_down");
        button.on_pointer(PointerTransition::Released, true);
        assert_eq!(button.texture, "btn_hover");
        button.on_pointer(PointerTransition::Leave, false);
        assert_eq!(button.texture, "btn");
    }

    #[test]
    fn test_release_outside_shows_normal() {
        let mut button = GuiButton::new("btn", "btn_hover", "btn_down");
        button.on_pointer(PointerTransition::Pressed, true);
        button.on_pointer(PointerTransition::Released, false);
        assert_eq!(button.texture, "btn");
    }
}
