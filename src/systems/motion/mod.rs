use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    Rng,
};
use serde::{Deserialize, Serialize};

use crate::{
    data::rng::GlobalRng,
    systems::{
        pointer::PointerState,
        time::{frame_delta, Dilation},
    },
};

pub mod easing;


use easing::{lerp, lerp_vec2, proximity_falloff};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Oscillation {
    #[default]
    None,
    AxisX,
    AxisY,
}

impl Oscillation {
    const ALL: [Oscillation; 3] = [Oscillation::None, Oscillation::AxisX, Oscillation::AxisY];

    /// Normalized waveform for this axis, in `[-1, 1]`.
    pub fn wave(self, phase: f32) -> f32 {
        match self {
            Oscillation::None => 0.0,
            Oscillation::AxisX => phase.cos(),
            Oscillation::AxisY => phase.sin(),
        }
    }

    fn swapped(self) -> Self {
        match self {
            Oscillation::None => Oscillation::None,
            Oscillation::AxisX => Oscillation::AxisY,
            Oscillation::AxisY => Oscillation::AxisX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: f32,
    pub max: f32,
}

impl SpawnRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    #[cfg(test)]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionWeights {
    pub none: f32,
    pub axis_x: f32,
    pub axis_y: f32,
}

impl DirectionWeights {
    pub fn as_array(&self) -> [f32; 3] {
        [self.none, self.axis_x, self.axis_y]
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Oscillation {
        match WeightedIndex::<f32>::new(self.as_array()) {
            Ok(distribution) => Oscillation::ALL[distribution.sample(rng)],
            Err(error) => {
                warn!("invalid oscillation weights {:?}: {error}", self);
                Oscillation::None
            }
        }
    }
}

impl Default for DirectionWeights {
    fn default() -> Self {
        Self {
            none: 0.5,
            axis_x: 0.25,
            axis_y: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSwitch {
    pub enabled: bool,
    pub epsilon: f32,
    pub probability: f32,
}

impl Default for AxisSwitch {
    fn default() -> Self {
        Self {
            enabled: true,
            epsilon: 0.1,
            probability: 0.1,
        }
    }
}

/// Tuning for every glyph. Rates are per 60 Hz frame.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    pub max_distance: f32,
    pub selected_scale: f32,
    pub fade_rate: f32,
    pub ease_rate: f32,
    pub speed: SpawnRange,
    pub amplitude: SpawnRange,
    pub fade_delay: SpawnRange,
    pub direction_weights: DirectionWeights,
    pub axis_switch: AxisSwitch,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.8,
            max_scale: 1.2,
            max_distance: 200.0,
            selected_scale: 1.6,
            fade_rate: 0.1,
            ease_rate: 0.1,
            speed: SpawnRange::new(0.0125, 0.025),
            amplitude: SpawnRange::new(5.0, 15.0),
            fade_delay: SpawnRange::new(0.0, 4.0),
            direction_weights: DirectionWeights::default(),
            axis_switch: AxisSwitch::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Applied,
    Skipped,
}

/// What the renderer needs from a glyph each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPose {
    pub position: Vec2,
    pub scale: f32,
    pub alpha: f32,
}

/// Animation state for a single digit. Positions are field-local, y down.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GlyphMotion {
    value: u8,
    base: Vec2,
    pub desired: Vec2,
    pub current: Vec2,
    pub direction: Oscillation,
    pub phase: f32,
    pub speed: f32,
    pub amplitude: f32,
    pub fade_delay: f32,
    pub alpha: f32,
    pub scale: f32,
    pub selected: bool,
}

impl GlyphMotion {
    pub fn spawn<R: Rng + ?Sized>(
        value: u8,
        position: Vec2,
        config: &MotionConfig,
        rng: &mut R,
    ) -> Self {
        let direction = config.direction_weights.draw(rng);
        let speed = config.speed.sample(rng);
        let amplitude = config.amplitude.sample(rng);
        let fade_delay = config.fade_delay.sample(rng);

        Self {
            value: value.min(9),
            base: position,
            desired: position,
            current: position,
            direction,
            phase: 0.0,
            speed,
            amplitude,
            fade_delay,
            alpha: 0.0,
            scale: config.min_scale,
            selected: false,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn base(&self) -> Vec2 {
        self.base
    }

    pub fn pose(&self) -> GlyphPose {
        GlyphPose {
            position: self.current,
            scale: self.scale,
            alpha: self.alpha,
        }
    }

    /// Advances the glyph by `delta` frames. A step that would produce a
    /// non-finite value is dropped whole and the previous pose kept.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        delta: f32,
        pointer: &PointerState,
        config: &MotionConfig,
        rng: &mut R,
    ) -> TickOutcome {
        let mut next = *self;

        next.fade_in(delta, config);
        next.oscillate(delta, config, rng);
        next.current = lerp_vec2(next.current, next.desired, config.ease_rate * delta);
        next.update_scale(pointer, config);

        if !next.is_finite() {
            return TickOutcome::Skipped;
        }

        *self = next;
        TickOutcome::Applied
    }

    pub fn on_click(&mut self, config: &MotionConfig) {
        self.selected = !self.selected;
        if self.selected {
            self.scale = config.selected_scale;
        }
    }

    /// Drag-painting: hovering with the button held acts as a click.
    pub fn on_hover_while_dragging(&mut self, pointer: &PointerState, config: &MotionConfig) -> bool {
        if pointer.dragging {
            self.on_click(config);
        }
        pointer.dragging
    }

    fn fade_in(&mut self, delta: f32, config: &MotionConfig) {
        if self.phase >= self.fade_delay {
            self.alpha = lerp(self.alpha, 1.0, delta * config.fade_rate);
        }
    }

    fn oscillate<R: Rng + ?Sized>(&mut self, delta: f32, config: &MotionConfig, rng: &mut R) {
        self.phase += delta * self.speed;

        if self.direction == Oscillation::None {
            return;
        }

        let switch = config.axis_switch;
        if switch.enabled
            && self.direction.wave(self.phase).abs() < switch.epsilon
            && rng.random_bool(f64::from(switch.probability.clamp(0.0, 1.0)))
        {
            self.direction = self.direction.swapped();
            self.phase += FRAC_PI_2;
        }

        let offset = self.direction.wave(self.phase) * self.amplitude;
        match self.direction {
            Oscillation::AxisX => self.desired.x = self.base.x + offset,
            Oscillation::AxisY => self.desired.y = self.base.y + offset,
            Oscillation::None => {}
        }
    }

    fn update_scale(&mut self, pointer: &PointerState, config: &MotionConfig) {
        if self.selected {
            return;
        }
        let distance = self.base.distance(pointer.cursor);
        self.scale = proximity_falloff(
            distance,
            config.min_scale,
            config.max_scale,
            config.max_distance,
        );
    }

    fn is_finite(&self) -> bool {
        self.desired.is_finite()
            && self.current.is_finite()
            && self.phase.is_finite()
            && self.alpha.is_finite()
            && self.scale.is_finite()
    }

    pub fn enact(
        time: Res<Time>,
        dilation: Res<Dilation>,
        pointer: Res<PointerState>,
        config: Res<MotionConfig>,
        mut rng: ResMut<GlobalRng>,
        mut query: Query<&mut GlyphMotion>,
    ) {
        let delta = frame_delta(time.delta_secs(), dilation.0);

        let mut skipped = 0usize;
        for mut glyph in query.iter_mut() {
            if glyph.tick(delta, &pointer, &config, &mut rng.uniform) == TickOutcome::Skipped {
                skipped += 1;
            }
        }

        if skipped > 0 {
            debug!("kept previous pose for {skipped} glyph(s) after a non-finite step");
        }
    }
}
