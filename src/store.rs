// Copyright (c) 2026 rezky_nightky

use rand::Rng;

use crate::particle::{Particle, SpawnDist};
use crate::runtime::SimParams;

pub const MAX_PARTICLES: usize = 1000;

/// Fixed arena of snow particles. Slots `0..cursor` are tracked (in play);
/// the rest stay dormant until the cursor reaches them.
pub struct ParticleStore {
    slots: Box<[Particle]>,
    cursor: usize,
    spawn: SpawnDist,
}

impl ParticleStore {
    pub fn new<R: Rng + ?Sized>(capacity: usize, base_speed: f32, rng: &mut R) -> Self {
        let spawn = SpawnDist::default();
        let slots = (0..capacity)
            .map(|_| spawn.dormant(base_speed, rng))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            slots,
            cursor: 0,
            spawn,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn tracked_len(&self) -> usize {
        self.cursor
    }

    pub fn is_full(&self) -> bool {
        self.cursor >= self.slots.len()
    }

    pub fn tracked(&self) -> &[Particle] {
        &self.slots[..self.cursor]
    }

    /// Brings the next dormant slot into play. No-op once every slot is tracked.
    pub fn activate_next(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots[self.cursor].alive = true;
        self.cursor += 1;
        assert!(
            self.cursor <= self.slots.len(),
            "activation cursor past capacity"
        );
        if self.is_full() {
            log::info!("all {} particles in play", self.slots.len());
        }
        true
    }

    /// Hides every tracked particle in place. Positions and the cursor are kept.
    pub fn deactivate_tracked(&mut self) {
        for p in &mut self.slots[..self.cursor] {
            p.alive = false;
        }
    }

    /// Runs the per-particle rule over the tracked slots; returns how many recycled.
    pub fn update_tracked<R: Rng + ?Sized>(&mut self, params: &SimParams, rng: &mut R) -> usize {
        let spawn = &self.spawn;
        let mut recycled = 0usize;
        for p in &mut self.slots[..self.cursor] {
            if p.update(params, spawn, rng) {
                recycled += 1;
            }
        }
        recycled
    }
}
