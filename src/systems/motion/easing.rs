use bevy::prelude::*;

/// Linear interpolation; `rate` is clamped so a long frame never overshoots.
pub fn lerp(from: f32, to: f32, rate: f32) -> f32 {
    from + (to - from) * rate.clamp(0.0, 1.0)
}

pub fn lerp_vec2(from: Vec2, to: Vec2, rate: f32) -> Vec2 {
    Vec2::new(lerp(from.x, to.x, rate), lerp(from.y, to.y, rate))
}

/// Smooth falloff from `max` at zero distance toward `min` at infinity.
pub fn proximity_falloff(distance: f32, min: f32, max: f32, max_distance: f32) -> f32 {
    min + (max - min) * (-distance / max_distance).exp()
}
