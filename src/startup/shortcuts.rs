use bevy::prelude::*;
use bevy::app::AppExit;

use crate::systems::time::Dilation;

pub fn close_on_esc(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut app_exit_events: EventWriter<AppExit>,
) {
    if keyboard_input.just_pressed(KeyCode::Escape) {
        info!("escape pressed, exiting");
        app_exit_events.write(AppExit::Success);
    }
}

/// Space freezes the lattice in place; pressing it again resumes.
pub fn toggle_freeze(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut dilation: ResMut<Dilation>,
) {
    if keyboard_input.just_pressed(KeyCode::Space) {
        dilation.0 = if dilation.0 == 0.0 { 1.0 } else { 0.0 };
        debug!("dilation set to {}", dilation.0);
    }
}
