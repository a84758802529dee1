use bevy::prelude::*;
use rand::Rng;

use crate::systems::{
    motion::{GlyphMotion, MotionConfig},
    navigation::{GridNavigator, NavigationConfig},
};

use super::config::GridConfig;

/// Row-major index of a glyph in its lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeLayout {
    pub rows: usize,
    pub cols: usize,
    pub gap: f32,
}

impl LatticeLayout {
    pub fn new(rows: usize, cols: usize, gap: f32) -> Self {
        Self { rows, cols, gap }
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Full extent including one gap of margin, used for viewport clamping.
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 * self.gap + self.gap,
            self.rows as f32 * self.gap + self.gap,
        )
    }

    pub fn anchor(&self, id: GlyphId) -> Vec2 {
        let row = id.0 / self.cols;
        let col = id.0 % self.cols;
        Vec2::new(col as f32 * self.gap, row as f32 * self.gap)
    }

    /// Glyph whose anchor lies within `hit_radius` of `local` on both axes.
    pub fn glyph_at(&self, local: Vec2, hit_radius: f32) -> Option<GlyphId> {
        if !local.is_finite() {
            return None;
        }
        let col = (local.x / self.gap).round();
        let row = (local.y / self.gap).round();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }

        let id = GlyphId(row as usize * self.cols + col as usize);
        let offset = (local - self.anchor(id)).abs();
        (offset.x <= hit_radius && offset.y <= hit_radius).then_some(id)
    }

    /// Spawns one glyph per lattice point with a random digit and motion.
    pub fn build<R: Rng + ?Sized>(&self, config: &MotionConfig, rng: &mut R) -> Vec<GlyphMotion> {
        (0..self.len())
            .map(|index| {
                let value = rng.random_range(0..10u8);
                GlyphMotion::spawn(value, self.anchor(GlyphId(index)), config, rng)
            })
            .collect()
    }

    /// Navigator sized for this lattice, centred on it or left at the origin.
    pub fn navigator(&self, viewport: Vec2, centered: bool, config: &NavigationConfig) -> GridNavigator {
        let mut navigator = GridNavigator::new(self.size(), viewport, config);
        if centered {
            navigator.set_offset(-self.size() / 2.0);
        }
        navigator
    }
}

impl From<&GridConfig> for LatticeLayout {
    fn from(config: &GridConfig) -> Self {
        LatticeLayout::new(config.rows, config.cols, config.gap)
    }
}

/// The spawned lattice: layout plus the entity carrying each glyph.
#[derive(Resource, Debug, Clone)]
pub struct GridField {
    pub layout: LatticeLayout,
    pub hit_radius: f32,
    glyphs: Vec<Entity>,
}

impl GridField {
    pub fn new(layout: LatticeLayout, hit_radius: f32, glyphs: Vec<Entity>) -> Self {
        Self {
            layout,
            hit_radius,
            glyphs,
        }
    }

    pub fn entity(&self, id: GlyphId) -> Option<Entity> {
        self.glyphs.get(id.0).copied()
    }

    pub fn glyph_at(&self, local: Vec2) -> Option<GlyphId> {
        self.layout.glyph_at(local, self.hit_radius)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn build_spawns_every_lattice_point() {
        let layout = LatticeLayout::new(4, 6, 80.0);
        let glyphs = layout.build(&MotionConfig::default(), &mut Pcg64Mcg::seed_from_u64(1));

        assert_eq!(glyphs.len(), 24);
        assert_eq!(glyphs[0].base(), Vec2::ZERO);
        assert_eq!(glyphs[5].base(), Vec2::new(400.0, 0.0));
        assert_eq!(glyphs[6].base(), Vec2::new(0.0, 80.0));
        assert_eq!(glyphs[23].base(), Vec2::new(400.0, 240.0));
        assert!(glyphs.iter().all(|glyph| glyph.value() <= 9));
    }

    #[test]
    fn digits_vary_across_the_lattice() {
        let layout = LatticeLayout::new(10, 10, 80.0);
        let glyphs = layout.build(&MotionConfig::default(), &mut Pcg64Mcg::seed_from_u64(2));
        let mut seen = [false; 10];
        for glyph in &glyphs {
            seen[glyph.value() as usize] = true;
        }
        assert!(seen.iter().all(|digit| *digit));
    }

    #[test]
    fn same_seed_builds_same_field() {
        let layout = LatticeLayout::new(5, 5, 80.0);
        let config = MotionConfig::default();
        let first = layout.build(&config, &mut Pcg64Mcg::seed_from_u64(9));
        let second = layout.build(&config, &mut Pcg64Mcg::seed_from_u64(9));
        assert_eq!(first, second);
    }

    #[test]
    fn size_adds_one_gap_of_margin() {
        let layout = LatticeLayout::new(100, 100, 80.0);
        assert_eq!(layout.size(), Vec2::new(8080.0, 8080.0));
        assert_eq!(LatticeLayout::new(2, 3, 10.0).size(), Vec2::new(40.0, 30.0));
    }

    #[test]
    fn glyph_at_snaps_to_nearest_anchor() {
        let layout = LatticeLayout::new(3, 4, 80.0);
        assert_eq!(layout.glyph_at(Vec2::new(162.0, 78.0), 24.0), Some(GlyphId(6)));
        assert_eq!(layout.glyph_at(Vec2::new(-10.0, 0.0), 24.0), Some(GlyphId(0)));
        assert_eq!(layout.glyph_at(Vec2::new(40.0, 40.0), 24.0), None);
        assert_eq!(layout.glyph_at(Vec2::new(400.0, 0.0), 24.0), None);
        assert_eq!(layout.glyph_at(Vec2::new(-50.0, 0.0), 24.0), None);
        assert_eq!(layout.glyph_at(Vec2::new(f32::NAN, 0.0), 24.0), None);
    }

    #[test]
    fn centered_navigator_starts_mid_lattice() {
        let layout = LatticeLayout::new(100, 100, 80.0);
        let navigator = layout.navigator(Vec2::new(1280.0, 720.0), true, &NavigationConfig::default());
        assert_eq!(navigator.offset(), Vec2::new(-4040.0, -4040.0));
    }

    #[test]
    fn fixed_navigator_starts_at_origin() {
        let layout = LatticeLayout::new(100, 100, 80.0);
        let navigator = layout.navigator(Vec2::new(1280.0, 720.0), false, &NavigationConfig::default());
        assert_eq!(navigator.offset(), Vec2::ZERO);
    }

    #[test]
    fn centering_small_lattice_respects_bounds() {
        let layout = LatticeLayout::new(2, 2, 80.0);
        let navigator = layout.navigator(Vec2::new(1280.0, 720.0), true, &NavigationConfig::default());
        assert!(navigator.bounds().contains(navigator.offset()));
    }
}
