// Copyright (c) 2026 rezky_nightky

use rand::{
    distr::{Distribution, Uniform},
    Rng,
};

use crate::runtime::SimParams;

pub const SPAWN_Y: f32 = 1.1;
pub const BOTTOM_Y: f32 = -1.0;
const DRIFT_FACTOR: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub location: Vec2,
    pub size: f32,
    pub transparency: f32,
    pub speed: f32,
    pub alive: bool,
}

impl Particle {
    pub fn fall_speed(size: f32, base_speed: f32) -> f32 {
        size * 0.5 * base_speed
    }

    /// Advances one tick. Returns true when the particle was recycled.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        params: &SimParams,
        spawn: &SpawnDist,
        rng: &mut R,
    ) -> bool {
        self.speed = Self::fall_speed(self.size, params.base_speed);
        self.location.y -= self.speed;

        if params.drift_enabled {
            let x = self.location.x;
            let target = params.cursor_x;
            let pull = self.speed * DRIFT_FACTOR * (x - target).abs();
            if x > target {
                self.location.x -= pull;
            } else if x < target {
                self.location.x += pull;
            }
        }

        if self.location.y < BOTTOM_Y && params.animating {
            spawn.respawn(self, rng);
            self.speed = Self::fall_speed(self.size, params.base_speed);
            self.alive = true;
            return true;
        }
        false
    }
}

/// Ranges for fresh spawn state: x in [-1, 2), size in [1.5, 3.5),
/// transparency in [0.1, 0.6).
#[derive(Clone, Debug)]
pub struct SpawnDist {
    x: Uniform<f32>,
    size: Uniform<f32>,
    transparency: Uniform<f32>,
}

impl Default for SpawnDist {
    fn default() -> Self {
        Self {
            x: Uniform::new(-1.0, 2.0).expect("valid range"),
            size: Uniform::new(1.5, 3.5).expect("valid range"),
            transparency: Uniform::new(0.1, 0.6).expect("valid range"),
        }
    }
}

impl SpawnDist {
    pub fn dormant<R: Rng + ?Sized>(&self, base_speed: f32, rng: &mut R) -> Particle {
        let mut p = Particle {
            location: Vec2 { x: 0.0, y: SPAWN_Y },
            size: 0.0,
            transparency: 0.0,
            speed: 0.0,
            alive: false,
        };
        self.respawn(&mut p, rng);
        p.speed = Particle::fall_speed(p.size, base_speed);
        p
    }

    pub fn respawn<R: Rng + ?Sized>(&self, p: &mut Particle, rng: &mut R) {
        p.location.x = self.x.sample(rng);
        p.location.y = SPAWN_Y;
        p.size = self.size.sample(rng);
        p.transparency = self.transparency.sample(rng);
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle {
            location: Vec2 { x, y },
            size: 2.0,
            transparency: 0.3,
            speed: 0.0,
            alive: true,
        }
    }

    #[test]
    fn update_recomputes_speed_and_falls() {
        let mut rng = StdRng::seed_from_u64(1);
        let spawn = SpawnDist::default();
        let params = SimParams {
            drift_enabled: false,
            ..SimParams::default()
        };
        let mut p = particle_at(0.2, 0.5);

        assert!(!p.update(&params, &spawn, &mut rng));
        assert_eq!(p.speed, 2.0 * 0.5 * params.base_speed);
        assert_eq!(p.location.y, 0.5 - p.speed);
        assert_eq!(p.location.x, 0.2);
    }

    #[test]
    fn drift_pulls_toward_cursor_proportionally() {
        let mut rng = StdRng::seed_from_u64(2);
        let spawn = SpawnDist::default();
        let params = SimParams {
            cursor_x: 0.5,
            base_speed: 0.1,
            ..SimParams::default()
        };

        let mut left = particle_at(-0.5, 0.0);
        left.update(&params, &spawn, &mut rng);
        let speed = Particle::fall_speed(2.0, 0.1);
        assert!((left.location.x - (-0.5 + speed * 0.25 * 1.0)).abs() < 1e-6);

        let mut right = particle_at(1.0, 0.0);
        right.update(&params, &spawn, &mut rng);
        assert!((right.location.x - (1.0 - speed * 0.25 * 0.5)).abs() < 1e-6);

        let mut on_target = particle_at(0.5, 0.0);
        on_target.update(&params, &spawn, &mut rng);
        assert_eq!(on_target.location.x, 0.5);
    }

    #[test]
    fn crossing_bottom_recycles_when_animating() {
        let mut rng = StdRng::seed_from_u64(3);
        let spawn = SpawnDist::default();
        let params = SimParams::default();
        let mut p = particle_at(0.0, -0.9999);
        p.alive = false;

        assert!(p.update(&params, &spawn, &mut rng));
        assert!(p.alive);
        assert_eq!(p.location.y, SPAWN_Y);
        assert!((-1.0..2.0).contains(&p.location.x));
        assert!((1.5..3.5).contains(&p.size));
        assert!((0.1..0.6).contains(&p.transparency));
        assert_eq!(p.speed, Particle::fall_speed(p.size, params.base_speed));
    }

    #[test]
    fn crossing_bottom_parks_when_paused() {
        let mut rng = StdRng::seed_from_u64(4);
        let spawn = SpawnDist::default();
        let params = SimParams {
            animating: false,
            ..SimParams::default()
        };
        let mut p = particle_at(0.0, -0.9999);
        p.alive = false;

        assert!(!p.update(&params, &spawn, &mut rng));
        assert!(p.location.y < BOTTOM_Y);
        assert!(!p.alive);
        assert_eq!(p.size, 2.0);
    }

    #[test]
    fn dormant_particles_start_at_spawn_line() {
        let mut rng = StdRng::seed_from_u64(5);
        let spawn = SpawnDist::default();
        for _ in 0..200 {
            let p = spawn.dormant(0.001, &mut rng);
            assert!(!p.alive);
            assert_eq!(p.location.y, SPAWN_Y);
            assert_eq!(p.speed, Particle::fall_speed(p.size, 0.001));
        }
    }
}
