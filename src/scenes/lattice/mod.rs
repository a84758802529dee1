use bevy::{prelude::*, window::PrimaryWindow};

use crate::{
    data::rng::GlobalRng,
    systems::{
        motion::GlyphMotion,
        navigation::NavigationKeys,
        pointer::PointerState,
    },
};

pub mod config;
pub mod field;
pub mod input;
pub mod render;

use config::LatticeConfig;
use field::{GridField, LatticeLayout};
use input::{HoverTarget, LatticeInput};
use render::LatticeRoot;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum LatticeSystem {
    Collect,
    Apply,
    Motion,
    Render,
}

pub struct LatticePlugin;
impl Plugin for LatticePlugin {
    fn build(&self, app: &mut App) {
        let config = LatticeConfig::load();

        match config.seed {
            Some(seed) => {
                info!("lattice seeded with {seed}");
                app.insert_resource(GlobalRng::seeded(seed));
            }
            None => {
                app.insert_resource(GlobalRng::from_entropy());
            }
        }

        app.insert_resource(ClearColor(Color::srgb_u8(
            config.render.background_color[0],
            config.render.background_color[1],
            config.render.background_color[2],
        )))
        .insert_resource(config.motion.clone())
        .insert_resource(config)
        .init_resource::<PointerState>()
        .init_resource::<NavigationKeys>()
        .init_resource::<HoverTarget>()
        .add_event::<LatticeInput>()
        .configure_sets(
            Update,
            (
                LatticeSystem::Collect,
                LatticeSystem::Apply,
                LatticeSystem::Motion,
                LatticeSystem::Render,
            )
                .chain()
                .run_if(resource_exists::<GridField>),
        )
        .add_systems(Startup, spawn_field)
        .add_systems(
            Update,
            (
                input::collect_cursor,
                input::collect_buttons,
                input::collect_navigation,
            )
                .chain()
                .in_set(LatticeSystem::Collect),
        )
        .add_systems(Update, input::apply_inputs.in_set(LatticeSystem::Apply))
        .add_systems(Update, GlyphMotion::enact.in_set(LatticeSystem::Motion))
        .add_systems(
            Update,
            (render::sync_root, render::sync_glyphs).in_set(LatticeSystem::Render),
        );
    }
}

/// Builds the lattice, spawns one text entity per glyph under a shared root
/// and installs the navigator sized to the current window.
pub fn spawn_field(
    mut commands: Commands,
    config: Res<LatticeConfig>,
    mut rng: ResMut<GlobalRng>,
    window: Query<&Window, With<PrimaryWindow>>,
) {
    let layout = LatticeLayout::from(&config.grid);
    let viewport = window
        .single()
        .map(|window| window.size())
        .unwrap_or_else(|_| Vec2::from(config.navigation.fallback_viewport));

    let navigator = layout.navigator(viewport, config.grid.centered, &config.navigation);
    let glyphs = layout.build(&config.motion, &mut rng.uniform);

    let [r, g, b] = config.render.glyph_color;
    let glyph_color = Color::srgb_u8(r, g, b).with_alpha(0.0);
    let font = TextFont {
        font_size: config.render.font_size,
        ..default()
    };

    let root = commands
        .spawn((
            LatticeRoot,
            Transform::from_translation(render::root_translation(navigator.offset(), viewport)),
            Visibility::default(),
        ))
        .id();

    let mut entities = Vec::with_capacity(glyphs.len());
    commands.entity(root).with_children(|parent| {
        for glyph in glyphs {
            let entity = parent
                .spawn((
                    Text2d::new(glyph.value().to_string()),
                    font.clone(),
                    TextColor(glyph_color),
                    Transform::from_translation(render::local_to_child(glyph.base()))
                        .with_scale(Vec3::new(glyph.scale, glyph.scale, 1.0)),
                    glyph,
                ))
                .id();
            entities.push(entity);
        }
    });

    let field = GridField::new(layout, config.grid.hit_radius, entities);
    info!(
        "spawned {}x{} lattice ({} glyphs), offset {:?}",
        layout.rows,
        layout.cols,
        field.len(),
        navigator.offset()
    );

    commands.insert_resource(navigator);
    commands.insert_resource(field);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::systems::{motion::MotionConfig, navigation::GridNavigator, time::Dilation};

    fn small_config(centered: bool) -> LatticeConfig {
        let mut config = LatticeConfig::default();
        config.grid.rows = 3;
        config.grid.cols = 4;
        config.grid.centered = centered;
        config
    }

    fn make_field_app(config: LatticeConfig) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
            .insert_resource(Dilation(1.0))
            .insert_resource(GlobalRng::seeded(5))
            .insert_resource(config.motion.clone())
            .insert_resource(config)
            .init_resource::<PointerState>()
            .init_resource::<HoverTarget>()
            .add_event::<LatticeInput>()
            .add_systems(Startup, spawn_field)
            .add_systems(
                Update,
                (input::apply_inputs, GlyphMotion::enact, render::sync_glyphs)
                    .chain()
                    .run_if(resource_exists::<GridField>),
            );
        app
    }

    #[test]
    fn startup_spawns_one_entity_per_lattice_point() {
        let mut app = make_field_app(small_config(true));
        app.update();

        assert_eq!(app.world().resource::<GridField>().len(), 12);

        let world = app.world_mut();
        let root = world
            .query_filtered::<Entity, With<LatticeRoot>>()
            .single(world)
            .expect("exactly one lattice root");
        let mut query = world.query::<(&GlyphMotion, &ChildOf)>();
        let parented = query
            .iter(world)
            .filter(|(_, child_of)| child_of.parent() == root)
            .count();
        assert_eq!(parented, 12);
    }

    #[test]
    fn startup_centres_navigator_within_bounds() {
        let mut app = make_field_app(small_config(true));
        app.update();

        let navigator = app.world().resource::<GridNavigator>();
        assert!(navigator.bounds().contains(navigator.offset()));
        assert_eq!(navigator.viewport(), Vec2::new(1280.0, 720.0));
    }

    #[test]
    fn fixed_grid_variant_starts_at_origin() {
        let mut config = small_config(false);
        config.grid.rows = 40;
        config.grid.cols = 40;
        let mut app = make_field_app(config);
        app.update();

        assert_eq!(app.world().resource::<GridNavigator>().offset(), Vec2::ZERO);
    }

    #[test]
    fn far_cursor_shrinks_every_glyph_to_minimum() {
        let mut app = make_field_app(small_config(true));
        app.update();

        app.world_mut()
            .send_event(LatticeInput::CursorMoved(Vec2::new(100_000.0, 100_000.0)));
        for _ in 0..3 {
            app.update();
        }

        let min_scale = MotionConfig::default().min_scale;
        let world = app.world_mut();
        let mut query = world.query::<&GlyphMotion>();
        for glyph in query.iter(world) {
            assert!((glyph.scale - min_scale).abs() < 1e-3);
        }
    }

    #[test]
    fn glyphs_fade_in_over_time() {
        let mut config = small_config(true);
        config.motion.fade_delay = crate::systems::motion::SpawnRange::new(0.0, 0.0);
        let mut app = make_field_app(config);
        for _ in 0..30 {
            app.update();
        }

        let world = app.world_mut();
        let mut query = world.query::<(&GlyphMotion, &TextColor)>();
        for (glyph, color) in query.iter(world) {
            assert!(glyph.alpha > 0.0);
            assert!((color.0.alpha() - glyph.alpha).abs() < 1e-6);
        }
    }
}
