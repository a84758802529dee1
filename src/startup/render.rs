use bevy::prelude::*;

pub struct RenderPlugin;
impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Post-processing is left to whatever sits on top of this camera; the
/// lattice only needs a plain 2D view.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}
