use bevy::{
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};

use crate::scenes::lattice::{input::LatticeInput, LatticeSystem};

pub struct ResizePlugin;
impl Plugin for ResizePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_resize.in_set(LatticeSystem::Collect))
            .insert_resource(ResizeDebounce::default());
    }
}

#[derive(Resource)]
pub struct ResizeDebounce {
    pub timer: Timer,
    pub pending: Option<Vec2>,
}

impl Default for ResizeDebounce {
    fn default() -> Self {
        let mut timer = Timer::from_seconds(0.1, TimerMode::Once);
        timer.pause();
        Self {
            timer,
            pending: None,
        }
    }
}

/// Waits for the window to settle before re-clamping the viewport, so a drag
/// resize does not re-clamp every frame.
fn handle_resize(
    mut resize_events: EventReader<WindowResized>,
    window: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    mut debounce: ResMut<ResizeDebounce>,
    mut inputs: EventWriter<LatticeInput>,
) {
    // If any resize event is detected, mark as pending and reset timer.
    if let Some(event) = resize_events.read().last() {
        debounce.pending = Some(Vec2::new(event.width, event.height));
        debounce.timer.reset();
        debounce.timer.unpause();
    }

    debounce.timer.tick(time.delta());

    if debounce.timer.just_finished() {
        debounce.timer.pause();
        let pending = debounce.pending.take();
        let size = window.single().map(|window| window.size()).ok().or(pending);
        if let Some(size) = size {
            inputs.write(LatticeInput::ViewportResized(size));
        }
    }
}
