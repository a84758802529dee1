use bevy::prelude::*;

/// Motion constants are tuned per display frame at this rate.
pub const FRAMES_PER_SECOND: f32 = 60.0;

/// Global time multiplier; 0 freezes the lattice.
#[derive(Resource)]
pub struct Dilation(pub f32);

impl Default for Dilation {
    fn default() -> Self {
        Dilation(1.0)
    }
}

pub struct DilationPlugin;
impl Plugin for DilationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Dilation>();
    }
}

/// Converts wall-clock seconds to dilated frame units. A stalled or
/// backwards clock yields zero instead of a negative step.
pub fn frame_delta(seconds: f32, dilation: f32) -> f32 {
    let delta = seconds * FRAMES_PER_SECOND * dilation;
    if delta.is_finite() {
        delta.max(0.0)
    } else {
        0.0
    }
}
