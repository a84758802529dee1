use bevy::prelude::*;

mod data;
mod scenes;
mod startup;
mod systems;

use scenes::lattice::LatticePlugin;
use startup::StartupPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: String::from("Digit Lattice"),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((StartupPlugin, LatticePlugin))
        .run();
}
