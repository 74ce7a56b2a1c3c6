//! Widget state carried by GUI nodes.
//!
//! A widget is a [`GameObject`](crate::scene::gameobject::GameObject) with a
//! [`GuiWidget`] attached. The widget tracks its alignment inside the parent,
//! whether the pointer hovers it, whether a press started on it, and the
//! user callbacks for the four pointer transitions. What the widget shows is
//! described by its [`WidgetKind`].
//!
//! The scene drives widgets during dispatch: on each fixed update an aligned
//! widget is re-anchored inside its parent's size, and mouse events are fed
//! through [`GuiWidget::handle_pointer`].

use std::fmt;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::SceneError;
use crate::core::typeinfo::{StaticType, TypeInfo};
use crate::document::{Direction, ensure_object, sync};
use crate::events::window::{MouseButton, WindowEvent};
use crate::gui::button::GuiButton;
use crate::gui::image::GuiImage;
use crate::gui::label::GuiLabel;
use crate::scene::arena::NodeId;
use crate::scene::commands::SceneCommands;
use crate::scene::gameobject::GameObject;

/// Horizontal anchoring inside the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HAlign {
    /// Keep the current x.
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// Vertical anchoring inside the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VAlign {
    /// Keep the current y.
    #[default]
    None,
    Top,
    Center,
    Bottom,
}

/// User reaction to a pointer transition. Receives the widget's node and
/// the scene's command queue.
pub type WidgetCallback = Box<dyn FnMut(NodeId, &mut SceneCommands)>;

/// Pointer state changes reported by [`GuiWidget::handle_pointer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTransition {
    Enter,
    Leave,
    Pressed,
    Released,
}

/// What a widget node displays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WidgetKind {
    /// Bare widget without visuals, used for grouping and hit areas.
    #[default]
    #[serde(rename = "GUIWidget")]
    Panel,
    #[serde(rename = "GUIImage")]
    Image(GuiImage),
    #[serde(rename = "GUILabel")]
    Label(GuiLabel),
    #[serde(rename = "GUIButton")]
    Button(GuiButton),
}

impl WidgetKind {
    /// Descriptor of the node type this kind makes.
    pub fn type_info(&self) -> &'static TypeInfo {
        match self {
            WidgetKind::Panel => GuiWidget::type_info_static(),
            WidgetKind::Image(_) => GuiImage::type_info_static(),
            WidgetKind::Label(_) => GuiLabel::type_info_static(),
            WidgetKind::Button(_) => GuiButton::type_info_static(),
        }
    }
}

crate::static_type!(GuiWidget, "GUIWidget", GameObject);

/// Alignment, pointer state and callbacks of a widget node.
#[derive(Default)]
pub struct GuiWidget {
    h_align: HAlign,
    v_align: VAlign,
    hovered: bool,
    pressed: bool,
    on_mouse_button_pressed: Option<WidgetCallback>,
    on_mouse_button_released: Option<WidgetCallback>,
    on_mouse_enter: Option<WidgetCallback>,
    on_mouse_leave: Option<WidgetCallback>,
    kind: WidgetKind,
}

impl fmt::Debug for GuiWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuiWidget")
            .field("h_align", &self.h_align)
            .field("v_align", &self.v_align)
            .field("hovered", &self.hovered)
            .field("pressed", &self.pressed)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl GuiWidget {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut WidgetKind {
        &mut self.kind
    }

    pub fn h_align(&self) -> HAlign {
        self.h_align
    }

    pub fn v_align(&self) -> VAlign {
        self.v_align
    }

    pub fn set_h_align(&mut self, align: HAlign) {
        self.h_align = align;
    }

    pub fn set_v_align(&mut self, align: VAlign) {
        self.v_align = align;
    }

    pub fn set_align(&mut self, h_align: HAlign, v_align: VAlign) {
        self.h_align = h_align;
        self.v_align = v_align;
    }

    pub fn is_mouse_hovered(&self) -> bool {
        self.hovered
    }

    /// True between a left press on this widget and the matching release.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn set_on_mouse_button_pressed(&mut self, callback: impl FnMut(NodeId, &mut SceneCommands) + 'static) {
        self.on_mouse_button_pressed = Some(Box::new(callback));
    }

    pub fn set_on_mouse_button_released(&mut self, callback: impl FnMut(NodeId, &mut SceneCommands) + 'static) {
        self.on_mouse_button_released = Some(Box::new(callback));
    }

    pub fn set_on_mouse_enter(&mut self, callback: impl FnMut(NodeId, &mut SceneCommands) + 'static) {
        self.on_mouse_enter = Some(Box::new(callback));
    }

    pub fn set_on_mouse_leave(&mut self, callback: impl FnMut(NodeId, &mut SceneCommands) + 'static) {
        self.on_mouse_leave = Some(Box::new(callback));
    }

    /// The user callback registered for `transition`, if any.
    pub fn callback_mut(&mut self, transition: PointerTransition) -> Option<&mut WidgetCallback> {
        match transition {
            PointerTransition::Enter => self.on_mouse_enter.as_mut(),
            PointerTransition::Leave => self.on_mouse_leave.as_mut(),
            PointerTransition::Pressed => self.on_mouse_button_pressed.as_mut(),
            PointerTransition::Released => self.on_mouse_button_released.as_mut(),
        }
    }

    /// Local position that anchors a widget of `size` inside `parent_size`.
    /// Axes aligned to `None` keep their value from `position`.
    pub fn aligned_position(&self, position: Vec3, size: Vec2, parent_size: Vec2) -> Vec3 {
        let x = match self.h_align {
            HAlign::None => position.x,
            HAlign::Left => 0.0,
            HAlign::Center => parent_size.x / 2.0 - size.x / 2.0,
            HAlign::Right => parent_size.x - size.x,
        };
        let y = match self.v_align {
            VAlign::None => position.y,
            VAlign::Top => 0.0,
            VAlign::Center => parent_size.y / 2.0 - size.y / 2.0,
            VAlign::Bottom => parent_size.y - size.y,
        };
        Vec3::new(x, y, position.z)
    }

    /// Update pointer state from `event` for a widget covering the
    /// rectangle at `top_left` with `size`.
    ///
    /// # Contract
    ///
    /// - The rectangle is half-open: the top and left edges are inside, the
    ///   right and bottom edges are not.
    /// - Only [`MouseButton::Left`] presses and releases widgets. Right and
    ///   middle button events never produce a transition.
    /// - A release is reported when the press started on this widget,
    ///   wherever the pointer is by then.
    pub fn handle_pointer(&mut self, event: &WindowEvent, top_left: Vec2, size: Vec2) -> Option<PointerTransition> {
        let transition = match *event {
            WindowEvent::MouseMoved { x, y } => {
                let inside = x >= top_left.x
                    && x < top_left.x + size.x
                    && y >= top_left.y
                    && y < top_left.y + size.y;
                if inside == self.hovered {
                    return None;
                }
                self.hovered = inside;
                if inside {
                    PointerTransition::Enter
                } else {
                    PointerTransition::Leave
                }
            }
            WindowEvent::MouseButtonPressed {
                button: MouseButton::Left,
            } if self.hovered => {
                self.pressed = true;
                PointerTransition::Pressed
            }
            WindowEvent::MouseButtonReleased {
                button: MouseButton::Left,
            } if self.pressed => {
                self.pressed = false;
                PointerTransition::Released
            }
            _ => return None,
        };

        if let WidgetKind::Button(button) = &mut self.kind {
            button.on_pointer(transition, self.hovered);
        }
        Some(transition)
    }

    /// Save into or load from the `"widget"` object of a node document.
    pub fn save_load(&mut self, data: &mut Value, direction: Direction) -> Result<(), SceneError> {
        let widget_data = match direction {
            Direction::Save => ensure_object(data)
                .entry("widget")
                .or_insert_with(|| Value::Object(Default::default())),
            Direction::Load => match data.get_mut("widget") {
                Some(widget_data) => widget_data,
                None => return Ok(()),
            },
        };
        sync(widget_data, "hAlign", &mut self.h_align, direction)?;
        sync(widget_data, "vAlign", &mut self.v_align, direction)?;
        sync(widget_data, "kind", &mut self.kind, direction)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::typeinfo::Object;
    use serde_json::json;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn moved(x: f32, y: f32) -> WindowEvent {
        WindowEvent::MouseMoved { x, y }
    }

    const PRESS_LEFT: WindowEvent = WindowEvent::MouseButtonPressed {
        button: MouseButton::Left,
    };
    const RELEASE_LEFT: WindowEvent = WindowEvent::MouseButtonReleased {
        button: MouseButton::Left,
    };

    // ==================== ALIGNMENT ====================

    #[test]
    fn test_align_none_keeps_position() {
        let widget = GuiWidget::default();
        let p = widget.aligned_position(Vec3::new(7.0, 9.0, 1.0), Vec2::new(10.0, 10.0), Vec2::new(100.0, 50.0));
        assert_eq!(p, Vec3::new(7.0, 9.0, 1.0));
    }

    #[test]
    fn test_align_center_right_bottom() {
        let mut widget = GuiWidget::default();
        let size = Vec2::new(20.0, 10.0);
        let parent = Vec2::new(100.0, 50.0);

        widget.set_align(HAlign::Center, VAlign::Center);
        let p = widget.aligned_position(Vec3::ZERO, size, parent);
        assert!(approx_eq(p.x, 40.0));
        assert!(approx_eq(p.y, 20.0));

        widget.set_align(HAlign::Right, VAlign::Bottom);
        let p = widget.aligned_position(Vec3::ZERO, size, parent);
        assert!(approx_eq(p.x, 80.0));
        assert!(approx_eq(p.y, 40.0));

        widget.set_align(HAlign::Left, VAlign::Top);
        let p = widget.aligned_position(Vec3::new(5.0, 5.0, 2.0), size, parent);
        assert_eq!(p, Vec3::new(0.0, 0.0, 2.0));
    }

    // ==================== POINTER ====================

    #[test]
    fn test_enter_and_leave_fire_once() {
        let mut widget = GuiWidget::default();
        let (tl, size) = (Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert_eq!(widget.handle_pointer(&moved(0.0, 0.0), tl, size), None);
        assert_eq!(
            widget.handle_pointer(&moved(15.0, 15.0), tl, size),
            Some(PointerTransition::Enter)
        );
        assert_eq!(widget.handle_pointer(&moved(16.0, 16.0), tl, size), None);
        assert!(widget.is_mouse_hovered());
        assert_eq!(
            widget.handle_pointer(&moved(40.0, 15.0), tl, size),
            Some(PointerTransition::Leave)
        );
        assert!(!widget.is_mouse_hovered());
    }

    #[test]
    fn test_press_requires_hover() {
        let mut widget = GuiWidget::default();
        let (tl, size) = (Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert_eq!(widget.handle_pointer(&PRESS_LEFT, tl, size), None);
        widget.handle_pointer(&moved(5.0, 5.0), tl, size);
        assert_eq!(
            widget.handle_pointer(&PRESS_LEFT, tl, size),
            Some(PointerTransition::Pressed)
        );
        assert!(widget.is_pressed());
    }

    #[test]
    fn test_release_after_dragging_out() {
        let mut widget = GuiWidget::default();
        let (tl, size) = (Vec2::ZERO, Vec2::new(10.0, 10.0));
        widget.handle_pointer(&moved(5.0, 5.0), tl, size);
        widget.handle_pointer(&PRESS_LEFT, tl, size);
        widget.handle_pointer(&moved(50.0, 50.0), tl, size);
        assert_eq!(
            widget.handle_pointer(&RELEASE_LEFT, tl, size),
            Some(PointerTransition::Released)
        );
        assert_eq!(widget.handle_pointer(&RELEASE_LEFT, tl, size), None);
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut widget = GuiWidget::default();
        let (tl, size) = (Vec2::ZERO, Vec2::new(10.0, 10.0));
        widget.handle_pointer(&moved(5.0, 5.0), tl, size);
        let right = WindowEvent::MouseButtonPressed {
            button: MouseButton::Right,
        };
        assert_eq!(widget.handle_pointer(&right, tl, size), None);
        let middle = WindowEvent::MouseButtonPressed {
            button: MouseButton::Middle,
        };
        assert_eq!(widget.handle_pointer(&middle, tl, size), None);
        assert!(!widget.is_pressed());

        // A left press followed by a right release stays pressed.
        widget.handle_pointer(&PRESS_LEFT, tl, size);
        let right_up = WindowEvent::MouseButtonReleased {
            button: MouseButton::Right,
        };
        assert_eq!(widget.handle_pointer(&right_up, tl, size), None);
        assert!(widget.is_pressed());
    }

    // ==================== TYPES & DOCUMENTS ====================

    #[test]
    fn test_kind_descriptors_chain() {
        let button = WidgetKind::Button(GuiButton::default()).type_info();
        let names: Vec<&str> = button.ancestry().map(|i| i.name()).collect();
        assert_eq!(names, vec!["GUIButton", "GUIImage", "GUIWidget", "GameObject", "Object"]);
        assert!(WidgetKind::Label(GuiLabel::default())
            .type_info()
            .is_type_of_static::<GuiWidget>());
    }

    #[test]
    fn test_widget_node_reports_widget_type() {
        let mut go = GameObject::new("ok", None);
        go.widget = Some(GuiWidget::new(WidgetKind::Image(GuiImage::new("ok.png"))));
        assert_eq!(go.type_name(), "GUIImage");
        assert!(go.is_instance_of_info(GameObject::type_info_static()));
    }

    #[test]
    fn test_save_load_document() {
        let mut widget = GuiWidget::new(WidgetKind::Label(GuiLabel::new("Hello")));
        widget.set_align(HAlign::Center, VAlign::Top);
        let mut data = json!({});
        widget.save_load(&mut data, Direction::Save).unwrap();
        assert_eq!(data["widget"]["hAlign"], json!("Center"));
        assert_eq!(data["widget"]["kind"]["type"], json!("GUILabel"));
        assert_eq!(data["widget"]["kind"]["text"], json!("Hello"));

        let mut loaded = GuiWidget::default();
        loaded.save_load(&mut data, Direction::Load).unwrap();
        assert_eq!(loaded.h_align(), HAlign::Center);
        assert_eq!(loaded.v_align(), VAlign::Top);
        assert_eq!(loaded.kind(), widget.kind());
    }
}
