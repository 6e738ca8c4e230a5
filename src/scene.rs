// Copyright (c) 2026 rezky_nightky

use rand::rngs::StdRng;

use crate::ground::Ground;
use crate::input::Command;
use crate::runtime::SimParams;
use crate::store::ParticleStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything the renderer reads, plus the rng that feeds spawns and terrain.
pub struct Scene {
    pub params: SimParams,
    pub store: ParticleStore,
    pub ground: Ground,
    rng: StdRng,
}

impl Scene {
    pub fn new(params: SimParams, capacity: usize, ground_vertices: usize, mut rng: StdRng) -> Self {
        let store = ParticleStore::new(capacity, params.base_speed, &mut rng);
        let ground = Ground::new(ground_vertices, &mut rng);
        Self {
            params,
            store,
            ground,
            rng,
        }
    }

    /// One simulation step: grow the snowfall by a slot, then move every tracked flake.
    pub fn tick(&mut self) {
        if self.params.animating {
            self.store.activate_next();
        }
        self.store.update_tracked(&self.params, &mut self.rng);
    }

    pub fn apply(&mut self, cmd: Command) -> Flow {
        log::debug!("command {:?}", cmd);
        match cmd {
            Command::Quit => return Flow::Exit,
            Command::ToggleAnimation => {
                self.params.animating = !self.params.animating;
                if !self.params.animating {
                    self.store.deactivate_tracked();
                }
                log::info!(
                    "snow {}",
                    if self.params.animating { "falling" } else { "stopped" }
                );
            }
            Command::ToggleDiagnostics => {
                self.params.diagnostics_visible = !self.params.diagnostics_visible;
            }
            Command::RegenerateGround => {
                self.ground.regenerate(&mut self.rng);
                log::info!("ground regenerated");
            }
            Command::Faster => self.params.speed_up(),
            Command::Slower => self.params.slow_down(),
            Command::ToggleDrift => {
                self.params.drift_enabled = !self.params.drift_enabled;
            }
        }
        Flow::Continue
    }

    pub fn set_cursor_x(&mut self, x: f32) {
        self.params.cursor_x = x;
    }
}
