//! The single-writer input queue.
//!
//! Collectors translate window, mouse and keyboard state into [`LatticeInput`]
//! events. [`apply_inputs`] is the only system that writes to the pointer,
//! the navigator or glyph selection, and it runs before the glyph tick so
//! every frame sees a consistent view.
use bevy::{
    input::{keyboard::KeyboardInput, ButtonState},
    prelude::*,
    window::PrimaryWindow,
};

use crate::systems::{
    motion::{GlyphMotion, MotionConfig},
    navigation::{GridNavigator, NavDirection, NavigationKeys},
    pointer::PointerState,
};

use super::field::{GlyphId, GridField};

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum LatticeInput {
    CursorMoved(Vec2),
    DragStarted,
    DragEnded,
    Clicked(GlyphId),
    Hovered(GlyphId),
    Navigate(NavDirection),
    ViewportResized(Vec2),
}

/// Glyph currently under the cursor, so hover fires once per entry.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct HoverTarget(pub Option<GlyphId>);

pub fn collect_cursor(
    window: Query<&Window, With<PrimaryWindow>>,
    navigator: Res<GridNavigator>,
    field: Res<GridField>,
    mut hover: ResMut<HoverTarget>,
    mut last_local: Local<Option<Vec2>>,
    mut inputs: EventWriter<LatticeInput>,
) {
    let Some(screen) = window.single().ok().and_then(Window::cursor_position) else {
        return;
    };

    let local = navigator.screen_to_local(screen);
    if *last_local == Some(local) {
        return;
    }
    *last_local = Some(local);
    inputs.write(LatticeInput::CursorMoved(local));

    let target = field.glyph_at(local);
    if target != hover.0 {
        hover.0 = target;
        if let Some(id) = target {
            inputs.write(LatticeInput::Hovered(id));
        }
    }
}

pub fn collect_buttons(
    mouse: Res<ButtonInput<MouseButton>>,
    hover: Res<HoverTarget>,
    mut inputs: EventWriter<LatticeInput>,
) {
    if mouse.just_pressed(MouseButton::Left) {
        inputs.write(LatticeInput::DragStarted);
        if let Some(id) = hover.0 {
            inputs.write(LatticeInput::Clicked(id));
        }
    }
    if mouse.just_released(MouseButton::Left) {
        inputs.write(LatticeInput::DragEnded);
    }
}

/// Reads raw key events rather than `ButtonInput` so OS key repeat keeps
/// panning while an arrow is held.
pub fn collect_navigation(
    mut keys: EventReader<KeyboardInput>,
    bindings: Res<NavigationKeys>,
    mut inputs: EventWriter<LatticeInput>,
) {
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }
        if let Some(direction) = bindings.direction_for(key.key_code) {
            inputs.write(LatticeInput::Navigate(direction));
        }
    }
}

pub fn apply_inputs(
    mut inputs: EventReader<LatticeInput>,
    mut pointer: ResMut<PointerState>,
    mut navigator: ResMut<GridNavigator>,
    field: Res<GridField>,
    config: Res<MotionConfig>,
    mut glyphs: Query<&mut GlyphMotion>,
) {
    for input in inputs.read() {
        match *input {
            LatticeInput::CursorMoved(local) => pointer.set_cursor(local),
            LatticeInput::DragStarted => pointer.set_dragging(true),
            LatticeInput::DragEnded => pointer.set_dragging(false),
            LatticeInput::Clicked(id) => {
                if let Some(mut glyph) = field.entity(id).and_then(|entity| glyphs.get_mut(entity).ok()) {
                    glyph.on_click(&config);
                    debug!("glyph {} {}", id.0, if glyph.selected { "selected" } else { "released" });
                }
            }
            LatticeInput::Hovered(id) => {
                if let Some(mut glyph) = field.entity(id).and_then(|entity| glyphs.get_mut(entity).ok()) {
                    if glyph.on_hover_while_dragging(&pointer, &config) {
                        debug!("glyph {} painted {}", id.0, if glyph.selected { "on" } else { "off" });
                    }
                }
            }
            LatticeInput::Navigate(direction) => navigator.navigate(direction),
            LatticeInput::ViewportResized(size) => {
                navigator.resize(size);
                debug!("viewport resized to {}x{}", size.x, size.y);
            }
        }
    }
}
