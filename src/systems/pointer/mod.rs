use bevy::prelude::*;

pub struct PointerPlugin;
impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>();
    }
}

/// Last known cursor in field-local coordinates and whether a drag is held.
///
/// Written only while the input queue is flushed, read by every glyph tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub cursor: Vec2,
    pub dragging: bool,
}

impl PointerState {
    pub fn set_cursor(&mut self, cursor: Vec2) {
        self.cursor = cursor;
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }
}
