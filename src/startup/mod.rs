use bevy::prelude::*;

//#[cfg(debug_assertions)]
use bevy::diagnostic::{
    LogDiagnosticsPlugin,
    FrameTimeDiagnosticsPlugin
};

use crate::{
    systems::{
        pointer::PointerPlugin,
        resize::ResizePlugin,
        time::DilationPlugin
    },
    data::rng::RngPlugin
};

pub mod shortcuts;
pub mod render;

use render::RenderPlugin;
pub struct StartupPlugin;
impl Plugin for StartupPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_plugins((
                RenderPlugin,
                RngPlugin,
                ResizePlugin,
                PointerPlugin,
                DilationPlugin
            ))
            .add_systems(
                Update, (
                shortcuts::close_on_esc,
                shortcuts::toggle_freeze,
            ));

            //#[cfg(debug_assertions)]
            app
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_plugins(LogDiagnosticsPlugin::default());
    }
}
