// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    Rng,
};

use crate::particle::Vec2;

pub const GROUND_VERTICES: usize = 25;
pub const GROUND_START: Vec2 = Vec2 { x: -1.0, y: -0.4 };
pub const MAX_STEP: f32 = 0.05;

/// Top edge of the terrain strip: evenly spaced in x, random walk in y.
pub struct Ground {
    vertices: Vec<Vec2>,
    step: Uniform<f32>,
}

impl Ground {
    pub fn new<R: Rng + ?Sized>(vertex_count: usize, rng: &mut R) -> Self {
        let mut ground = Self {
            vertices: vec![GROUND_START; vertex_count.max(2)],
            step: Uniform::new_inclusive(-MAX_STEP, MAX_STEP).expect("valid range"),
        };
        ground.regenerate(rng);
        ground
    }

    #[allow(dead_code)]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Rewrites every vertex in place.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let spacing = 2.0 / (self.vertices.len() - 1) as f32;
        self.vertices[0] = GROUND_START;
        for i in 1..self.vertices.len() {
            let prev_y = self.vertices[i - 1].y;
            self.vertices[i] = Vec2 {
                x: GROUND_START.x + i as f32 * spacing,
                y: prev_y + self.step.sample(rng),
            };
        }
        log::debug!(
            "ground regenerated: {} vertices, y range {:.3}..{:.3}",
            self.vertices.len(),
            self.min_y(),
            self.max_y()
        );
    }

    pub fn height_at(&self, x: f32) -> f32 {
        let first = self.vertices[0];
        let last = self.vertices[self.vertices.len() - 1];
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }
        for pair in self.vertices.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if x <= b.x {
                let t = (x - a.x) / (b.x - a.x);
                return a.y + (b.y - a.y) * t;
            }
        }
        last.y
    }

    fn min_y(&self) -> f32 {
        self.vertices.iter().map(|v| v.y).fold(f32::INFINITY, f32::min)
    }

    fn max_y(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.y)
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn vertices_span_unit_range_evenly() {
        let mut rng = StdRng::seed_from_u64(11);
        let ground = Ground::new(GROUND_VERTICES, &mut rng);
        let v = ground.vertices();

        assert_eq!(v.len(), 25);
        assert_eq!(v[0], GROUND_START);
        assert!((v[24].x - 1.0).abs() < 1e-5);

        let step = 2.0 / 24.0;
        for pair in v.windows(2) {
            assert!(((pair[1].x - pair[0].x) - step).abs() < 1e-5);
            let dy = pair[1].y - pair[0].y;
            assert!(dy.abs() <= MAX_STEP + 1e-6, "dy {} out of range", dy);
        }
    }

    #[test]
    fn regenerate_replaces_the_line() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut ground = Ground::new(GROUND_VERTICES, &mut rng);
        let before = ground.vertices().to_vec();

        ground.regenerate(&mut rng);

        assert_eq!(ground.vertices().len(), before.len());
        assert_eq!(ground.vertices()[0], GROUND_START);
        assert_ne!(ground.vertices(), &before[..]);
    }

    #[test]
    fn height_at_interpolates_and_clamps() {
        let mut rng = StdRng::seed_from_u64(13);
        let ground = Ground::new(3, &mut rng);
        let v = ground.vertices().to_vec();

        assert_eq!(ground.height_at(-5.0), v[0].y);
        assert_eq!(ground.height_at(5.0), v[2].y);
        let mid = ground.height_at(0.5);
        assert!((mid - (v[1].y + v[2].y) / 2.0).abs() < 1e-5);
    }
}
