use bevy::prelude::*;
use enum_map::{enum_map, Enum, EnumMap};
use serde::{Deserialize, Serialize};

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NavDirection {
    /// Offset change for one step. Moving the view left shifts the lattice
    /// right, so the signs are inverted relative to the arrow.
    pub fn pan_delta(self, step: f32) -> Vec2 {
        match self {
            NavDirection::Left => Vec2::new(step, 0.0),
            NavDirection::Right => Vec2::new(-step, 0.0),
            NavDirection::Up => Vec2::new(0.0, step),
            NavDirection::Down => Vec2::new(0.0, -step),
        }
    }
}

#[derive(Resource, Clone)]
pub struct NavigationKeys(pub EnumMap<NavDirection, Vec<KeyCode>>);

impl Default for NavigationKeys {
    fn default() -> Self {
        NavigationKeys(enum_map! {
            NavDirection::Up => vec![KeyCode::ArrowUp, KeyCode::KeyW],
            NavDirection::Down => vec![KeyCode::ArrowDown, KeyCode::KeyS],
            NavDirection::Left => vec![KeyCode::ArrowLeft, KeyCode::KeyA],
            NavDirection::Right => vec![KeyCode::ArrowRight, KeyCode::KeyD],
        })
    }
}

impl NavigationKeys {
    pub fn direction_for(&self, key: KeyCode) -> Option<NavDirection> {
        self.0
            .iter()
            .find(|(_, keys)| keys.contains(&key))
            .map(|(direction, _)| direction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// How far the lattice may be dragged past its origin edge.
    pub slack: f32,
    pub step: f32,
    pub fallback_viewport: [f32; 2],
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            slack: 90.0,
            step: 10.0,
            fallback_viewport: [1280.0, 720.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigatorBounds {
    pub lower: Vec2,
    pub upper: Vec2,
}

impl NavigatorBounds {
    #[cfg(test)]
    pub fn contains(&self, offset: Vec2) -> bool {
        offset.x >= self.lower.x
            && offset.x <= self.upper.x
            && offset.y >= self.lower.y
            && offset.y <= self.upper.y
    }
}

/// Bounded viewport offset over the lattice. Every mutation re-clamps.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GridNavigator {
    offset: Vec2,
    lattice: Vec2,
    viewport: Vec2,
    slack: f32,
    step: f32,
}

impl GridNavigator {
    pub fn new(lattice: Vec2, viewport: Vec2, config: &NavigationConfig) -> Self {
        let mut navigator = Self {
            offset: Vec2::ZERO,
            lattice,
            viewport,
            slack: config.slack,
            step: config.step,
        };
        navigator.clamp();
        navigator
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn bounds(&self) -> NavigatorBounds {
        let upper = Vec2::splat(self.slack);
        let lower = (self.viewport - self.lattice).min(upper);
        NavigatorBounds { lower, upper }
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.clamp();
    }

    pub fn pan(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        self.offset += delta;
        self.clamp();
    }

    pub fn navigate(&mut self, direction: NavDirection) {
        self.pan(direction.pan_delta(self.step));
    }

    pub fn resize(&mut self, viewport: Vec2) {
        if !viewport.is_finite() {
            return;
        }
        self.viewport = viewport.max(Vec2::ZERO);
        self.clamp();
    }

    fn clamp(&mut self) {
        let bounds = self.bounds();
        self.offset = self.offset.clamp(bounds.lower, bounds.upper);
    }

    /// Converts a screen position (top-left origin, y down) to field-local
    /// coordinates.
    pub fn screen_to_local(&self, screen: Vec2) -> Vec2 {
        screen - self.offset
    }
}

impl Default for GridNavigator {
    fn default() -> Self {
        GridNavigator::new(Vec2::ZERO, Vec2::ZERO, &NavigationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator() -> GridNavigator {
        GridNavigator::new(
            Vec2::new(8080.0, 8080.0),
            Vec2::new(1280.0, 720.0),
            &NavigationConfig::default(),
        )
    }

    #[test]
    fn pan_past_origin_edge_stops_at_slack() {
        let mut navigator = navigator();
        navigator.pan(Vec2::new(1000.0, 0.0));
        assert_eq!(navigator.offset().x, 90.0);
        assert_eq!(navigator.offset().y, 0.0);
    }

    #[test]
    fn pan_past_far_edge_stops_at_lattice_end() {
        let mut navigator = navigator();
        navigator.pan(Vec2::new(-100_000.0, -100_000.0));
        assert_eq!(navigator.offset(), Vec2::new(1280.0 - 8080.0, 720.0 - 8080.0));
    }

    #[test]
    fn arbitrary_pan_and_resize_sequences_stay_in_bounds() {
        let mut navigator = navigator();
        let deltas = [
            Vec2::new(-3000.0, 250.0),
            Vec2::new(12.5, -9000.0),
            Vec2::new(777.0, 777.0),
            Vec2::new(-0.5, 40_000.0),
        ];
        let viewports = [
            Vec2::new(640.0, 480.0),
            Vec2::new(9000.0, 200.0),
            Vec2::new(1920.0, 1080.0),
            Vec2::new(0.0, 0.0),
        ];

        for round in 0..40 {
            navigator.pan(deltas[round % deltas.len()] * (round as f32 * 0.37).sin());
            assert!(navigator.bounds().contains(navigator.offset()));
            if round % 3 == 0 {
                navigator.resize(viewports[(round / 3) % viewports.len()]);
                assert!(navigator.bounds().contains(navigator.offset()));
            }
        }
    }

    #[test]
    fn clamp_is_idempotent() {
        let mut navigator = navigator();
        navigator.set_offset(Vec2::new(-9999.0, 9999.0));
        let once = navigator.offset();
        navigator.pan(Vec2::ZERO);
        assert_eq!(navigator.offset(), once);
    }

    #[test]
    fn viewport_larger_than_lattice_pins_to_slack() {
        let mut navigator = GridNavigator::new(
            Vec2::new(400.0, 400.0),
            Vec2::new(1280.0, 720.0),
            &NavigationConfig::default(),
        );
        navigator.pan(Vec2::new(-50.0, -50.0));
        assert_eq!(navigator.offset(), Vec2::splat(90.0));
    }

    #[test]
    fn navigate_moves_one_step_per_direction() {
        let mut navigator = navigator();
        navigator.set_offset(Vec2::new(-500.0, -500.0));

        navigator.navigate(NavDirection::Left);
        assert_eq!(navigator.offset(), Vec2::new(-490.0, -500.0));
        navigator.navigate(NavDirection::Right);
        navigator.navigate(NavDirection::Right);
        assert_eq!(navigator.offset(), Vec2::new(-510.0, -500.0));
        navigator.navigate(NavDirection::Up);
        assert_eq!(navigator.offset(), Vec2::new(-510.0, -490.0));
        navigator.navigate(NavDirection::Down);
        assert_eq!(navigator.offset(), Vec2::new(-510.0, -500.0));
    }

    #[test]
    fn non_finite_pan_is_ignored() {
        let mut navigator = navigator();
        navigator.pan(Vec2::new(f32::NAN, 4.0));
        assert_eq!(navigator.offset(), Vec2::ZERO);
    }

    #[test]
    fn default_keys_cover_arrows_and_wasd() {
        let keys = NavigationKeys::default();
        assert_eq!(keys.direction_for(KeyCode::ArrowLeft), Some(NavDirection::Left));
        assert_eq!(keys.direction_for(KeyCode::KeyS), Some(NavDirection::Down));
        assert_eq!(keys.direction_for(KeyCode::Space), None);
    }

    #[test]
    fn screen_to_local_subtracts_offset() {
        let mut navigator = navigator();
        navigator.set_offset(Vec2::new(-400.0, -300.0));
        assert_eq!(
            navigator.screen_to_local(Vec2::new(100.0, 50.0)),
            Vec2::new(500.0, 350.0)
        );
    }
}
