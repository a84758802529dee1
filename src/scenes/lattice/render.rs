use bevy::{prelude::*, window::PrimaryWindow};

use crate::systems::{motion::GlyphMotion, navigation::GridNavigator};

/// Parent of every glyph; its transform carries the navigator offset.
#[derive(Component)]
pub struct LatticeRoot;

/// Field-local space is y-down with the origin at the window's top-left.
/// World space is y-up and centred, so the root absorbs both flips.
pub fn root_translation(offset: Vec2, viewport: Vec2) -> Vec3 {
    Vec3::new(offset.x - viewport.x / 2.0, viewport.y / 2.0 - offset.y, 0.0)
}

pub fn local_to_child(position: Vec2) -> Vec3 {
    Vec3::new(position.x, -position.y, 0.0)
}

pub fn sync_root(
    navigator: Res<GridNavigator>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut root: Query<&mut Transform, With<LatticeRoot>>,
) {
    let viewport = window
        .single()
        .map(|window| window.size())
        .unwrap_or_else(|_| navigator.viewport());

    for mut transform in root.iter_mut() {
        transform.translation = root_translation(navigator.offset(), viewport);
    }
}

pub fn sync_glyphs(
    mut glyphs: Query<(&GlyphMotion, &mut Transform, &mut TextColor), Changed<GlyphMotion>>,
) {
    for (glyph, mut transform, mut color) in glyphs.iter_mut() {
        let pose = glyph.pose();
        transform.translation = local_to_child(pose.position);
        transform.scale = Vec3::new(pose.scale, pose.scale, 1.0);
        color.0.set_alpha(pose.alpha);
    }
}
