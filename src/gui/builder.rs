//! Creating widget nodes.
//!
//! These are [`Scene`] methods because a widget is only meaningful as a node
//! of the tree: it needs a parent to align in and a place in dispatch.

use log::warn;

use crate::core::error::{OrFatal, SceneError};
use crate::gui::button::{GuiButton, LABEL_NAME};
use crate::gui::image::GuiImage;
use crate::gui::label::GuiLabel;
use crate::gui::widget::{GuiWidget, HAlign, VAlign, WidgetKind};
use crate::scene::arena::NodeId;
use crate::scene::tree::Scene;

impl Scene {
    /// Create a child of `parent` that carries a widget of `kind`.
    pub fn try_create_widget(&mut self, parent: NodeId, name: &str, kind: WidgetKind) -> Result<NodeId, SceneError> {
        let id = self.try_create_child(parent, name)?;
        self.node_mut(id).widget = Some(GuiWidget::new(kind));
        Ok(id)
    }

    /// Panics on a duplicate sibling name, like
    /// [`create_child`](Scene::create_child).
    #[track_caller]
    pub fn create_widget(&mut self, parent: NodeId, name: &str, kind: WidgetKind) -> NodeId {
        self.try_create_widget(parent, name, kind).or_fatal()
    }

    #[track_caller]
    pub fn create_image(&mut self, parent: NodeId, name: &str, texture: &str) -> NodeId {
        self.create_widget(parent, name, WidgetKind::Image(GuiImage::new(texture)))
    }

    #[track_caller]
    pub fn create_label(&mut self, parent: NodeId, name: &str, text: &str) -> NodeId {
        self.create_widget(parent, name, WidgetKind::Label(GuiLabel::new(text)))
    }

    /// Create a button with a centered label child showing `text`.
    #[track_caller]
    pub fn create_button(&mut self, parent: NodeId, name: &str, text: &str) -> NodeId {
        self.create_button_with(parent, name, text, GuiButton::default())
    }

    /// Like [`create_button`](Scene::create_button) with explicit textures.
    #[track_caller]
    pub fn create_button_with(&mut self, parent: NodeId, name: &str, text: &str, button: GuiButton) -> NodeId {
        let id = self.create_widget(parent, name, WidgetKind::Button(button));
        let label = self.create_label(id, LABEL_NAME, text);
        if let Some(widget) = self.widget_mut(label) {
            widget.set_align(HAlign::Center, VAlign::Center);
        }
        id
    }

    pub fn widget(&self, id: NodeId) -> Option<&GuiWidget> {
        self.get(id)?.widget()
    }

    pub fn widget_mut(&mut self, id: NodeId) -> Option<&mut GuiWidget> {
        self.get_mut(id)?.widget_mut()
    }

    /// Set the text of `button`'s label child. Panics if the button has no
    /// label child.
    #[track_caller]
    pub fn set_button_text(&mut self, button: NodeId, text: &str) {
        let label = self.find_child_by_name(button, LABEL_NAME);
        match self.widget_mut(label).map(GuiWidget::kind_mut) {
            Some(WidgetKind::Label(label)) => label.text = text.to_string(),
            _ => warn!("Child '{}' of button {} is not a label", LABEL_NAME, button),
        }
    }

    /// Text of `button`'s label child. Panics if the button has no label
    /// child.
    #[track_caller]
    pub fn button_text(&self, button: NodeId) -> &str {
        let label = self.find_child_by_name(button, LABEL_NAME);
        match self.widget(label).map(GuiWidget::kind) {
            Some(WidgetKind::Label(label)) => &label.text,
            _ => {
                warn!("Child '{}' of button {} is not a label", LABEL_NAME, button);
                ""
            }
        }
    }
}
