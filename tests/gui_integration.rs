//! Integration tests for widgets driven through the scene: alignment,
//! pointer callbacks, buttons and widget documents.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test gui_integration
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};

use aberredscene::core::typeinfo::Object;
use aberredscene::events::window::{MouseButton, WindowEvent};
use aberredscene::gui::button::{GuiButton, LABEL_NAME};
use aberredscene::gui::widget::{HAlign, VAlign, WidgetKind};
use aberredscene::scene::arena::NodeId;
use aberredscene::scene::tree::Scene;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn mouse_to(scene: &mut Scene, x: f32, y: f32) {
    scene.event(&WindowEvent::MouseMoved { x, y });
}

fn press(scene: &mut Scene, button: MouseButton) {
    scene.event(&WindowEvent::MouseButtonPressed { button });
}

fn release(scene: &mut Scene, button: MouseButton) {
    scene.event(&WindowEvent::MouseButtonReleased { button });
}

/// Records every callback as `"<kind>"` strings in order.
fn record_all(scene: &mut Scene, id: NodeId) -> Rc<RefCell<Vec<&'static str>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let widget = scene.widget_mut(id).unwrap();
    let l = Rc::clone(&log);
    widget.set_on_mouse_enter(move |_, _| l.borrow_mut().push("enter"));
    let l = Rc::clone(&log);
    widget.set_on_mouse_leave(move |_, _| l.borrow_mut().push("leave"));
    let l = Rc::clone(&log);
    widget.set_on_mouse_button_pressed(move |_, _| l.borrow_mut().push("pressed"));
    let l = Rc::clone(&log);
    widget.set_on_mouse_button_released(move |_, _| l.borrow_mut().push("released"));
    log
}

/// A 100x40 panel at (10, 20) directly under a 800x600 root.
fn panel_scene() -> (Scene, NodeId) {
    let mut scene = Scene::new();
    let root = scene.root();
    scene.node_mut(root).set_size(Vec2::new(800.0, 600.0));
    let panel = scene.create_widget(root, "panel", WidgetKind::Panel);
    scene.node_mut(panel).set_position(Vec3::new(10.0, 20.0, 0.0));
    scene.node_mut(panel).set_size(Vec2::new(100.0, 40.0));
    (scene, panel)
}

// =============================================================================
// Alignment
// =============================================================================

#[test]
fn alignment_applies_on_fixed_update() {
    let (mut scene, panel) = panel_scene();
    scene
        .widget_mut(panel)
        .unwrap()
        .set_align(HAlign::Center, VAlign::Bottom);

    assert_eq!(scene.node(panel).position(), Vec3::new(10.0, 20.0, 0.0));
    scene.fixed_update();
    let p = scene.node(panel).position();
    assert!(approx_eq(p.x, 350.0));
    assert!(approx_eq(p.y, 560.0));
}

#[test]
fn alignment_follows_parent_resize() {
    let (mut scene, panel) = panel_scene();
    scene
        .widget_mut(panel)
        .unwrap()
        .set_align(HAlign::Right, VAlign::None);
    scene.fixed_update();
    assert!(approx_eq(scene.node(panel).position().x, 700.0));

    scene.event(&WindowEvent::Resized {
        width: 1024.0,
        height: 768.0,
    });
    scene.fixed_update();
    let p = scene.node(panel).position();
    assert!(approx_eq(p.x, 924.0));
    assert!(approx_eq(p.y, 20.0));
}

#[test]
fn inactive_widget_is_not_aligned() {
    let (mut scene, panel) = panel_scene();
    scene
        .widget_mut(panel)
        .unwrap()
        .set_align(HAlign::Left, VAlign::Top);
    scene.node_mut(panel).set_active(false);
    scene.fixed_update();
    assert_eq!(scene.node(panel).position(), Vec3::new(10.0, 20.0, 0.0));
}

// =============================================================================
// Pointer callbacks
// =============================================================================

#[test]
fn pointer_transitions_fire_callbacks_in_order() {
    let (mut scene, panel) = panel_scene();
    let log = record_all(&mut scene, panel);

    mouse_to(&mut scene, 0.0, 0.0);
    mouse_to(&mut scene, 50.0, 30.0);
    mouse_to(&mut scene, 60.0, 30.0);
    press(&mut scene, MouseButton::Left);
    release(&mut scene, MouseButton::Left);
    mouse_to(&mut scene, 500.0, 500.0);

    assert_eq!(*log.borrow(), vec!["enter", "pressed", "released", "leave"]);
}

#[test]
fn press_outside_does_nothing() {
    let (mut scene, panel) = panel_scene();
    let log = record_all(&mut scene, panel);

    mouse_to(&mut scene, 500.0, 500.0);
    press(&mut scene, MouseButton::Left);
    release(&mut scene, MouseButton::Left);

    assert!(log.borrow().is_empty());
}

#[test]
fn right_button_is_ignored() {
    let (mut scene, panel) = panel_scene();
    let log = record_all(&mut scene, panel);

    mouse_to(&mut scene, 50.0, 30.0);
    press(&mut scene, MouseButton::Right);
    release(&mut scene, MouseButton::Right);

    assert_eq!(*log.borrow(), vec!["enter"]);
}

#[test]
fn bounds_use_absolute_position() {
    let (mut scene, panel) = panel_scene();
    let inner = scene.create_widget(panel, "inner", WidgetKind::Panel);
    scene.node_mut(inner).set_position(Vec3::new(5.0, 5.0, 0.0));
    scene.node_mut(inner).set_size(Vec2::new(10.0, 10.0));
    let log = record_all(&mut scene, inner);

    // Local (5, 5) inside a panel at (10, 20) covers x 15..25, y 25..35.
    mouse_to(&mut scene, 8.0, 8.0);
    assert!(log.borrow().is_empty());
    mouse_to(&mut scene, 20.0, 30.0);
    assert_eq!(*log.borrow(), vec!["enter"]);
}

#[test]
fn callback_can_queue_structural_change() {
    let (mut scene, panel) = panel_scene();
    let root = scene.root();
    scene
        .widget_mut(panel)
        .unwrap()
        .set_on_mouse_button_released(|id, commands| commands.destroy_node(id));

    mouse_to(&mut scene, 50.0, 30.0);
    press(&mut scene, MouseButton::Left);
    assert!(scene.contains(panel));
    release(&mut scene, MouseButton::Left);
    assert!(!scene.contains(panel));
    assert!(scene.node(root).children().is_empty());
}

#[test]
fn hidden_widget_gets_no_pointer_events() {
    let (mut scene, panel) = panel_scene();
    let log = record_all(&mut scene, panel);
    scene.node_mut(panel).set_active(false);

    mouse_to(&mut scene, 50.0, 30.0);
    press(&mut scene, MouseButton::Left);

    assert!(log.borrow().is_empty());
    assert!(!scene.widget(panel).unwrap().is_mouse_hovered());
}

// =============================================================================
// Buttons
// =============================================================================

#[test]
fn button_text_delegates_to_label() {
    let mut scene = Scene::new();
    let root = scene.root();
    let ok = scene.create_button(root, "ok", "OK");
    assert_eq!(scene.button_text(ok), "OK");

    scene.set_button_text(ok, "Confirm");
    let label = scene.find_child_by_name(ok, LABEL_NAME);
    match scene.widget(label).unwrap().kind() {
        WidgetKind::Label(l) => assert_eq!(l.text, "Confirm"),
        other => panic!("expected a label, got {:?}", other),
    }
}

#[test]
fn button_swaps_textures_before_callbacks() {
    let mut scene = Scene::new();
    let root = scene.root();
    scene.node_mut(root).set_size(Vec2::new(200.0, 200.0));
    let button = scene.create_button_with(root, "go", "Go", GuiButton::new("up", "over", "down"));
    scene.node_mut(button).set_size(Vec2::new(50.0, 20.0));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    scene
        .widget_mut(button)
        .unwrap()
        .set_on_mouse_button_pressed(move |_, _| s.borrow_mut().push("pressed"));

    let texture = |scene: &Scene| match scene.widget(button).unwrap().kind() {
        WidgetKind::Button(b) => b.texture.clone(),
        _ => String::new(),
    };

    assert_eq!(texture(&scene), "up");
    mouse_to(&mut scene, 10.0, 10.0);
    assert_eq!(texture(&scene), "over");
    press(&mut scene, MouseButton::Left);
    assert_eq!(texture(&scene), "down");
    assert_eq!(*seen.borrow(), vec!["pressed"]);
    mouse_to(&mut scene, 150.0, 150.0);
    release(&mut scene, MouseButton::Left);
    assert_eq!(texture(&scene), "up");
}

// =============================================================================
// Documents
// =============================================================================

#[test]
fn widget_tree_round_trips_through_document() {
    let mut scene = Scene::new();
    let root = scene.root();
    let menu = scene.create_widget(root, "menu", WidgetKind::Panel);
    scene
        .widget_mut(menu)
        .unwrap()
        .set_align(HAlign::Center, VAlign::Center);
    scene.create_image(menu, "logo", "logo.png");
    scene.create_button(menu, "play", "Play");

    let mut doc = scene.to_document(menu).unwrap();

    let mut other = Scene::new();
    let other_root = other.root();
    let copy = other.create_child_from_value(other_root, "menu", &mut doc).unwrap();

    assert_eq!(other.node(copy).type_name(), "GUIWidget");
    assert_eq!(other.widget(copy).unwrap().h_align(), HAlign::Center);
    let logo = other.find_child_by_name(copy, "logo");
    assert_eq!(other.node(logo).type_name(), "GUIImage");
    let play = other.find_child_by_name(copy, "play");
    assert_eq!(other.node(play).type_name(), "GUIButton");
    assert_eq!(other.button_text(play), "Play");
    assert_eq!(other.widget(play).unwrap().v_align(), VAlign::None);
}
