// Copyright (c) 2026 rezky_nightky

pub const DEFAULT_BASE_SPEED: f32 = 0.001;
pub const FASTER_RATIO: f32 = 1.1;
pub const SLOWER_RATIO: f32 = 0.9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color16,
    Color256,
    TrueColor,
}

/// Scene-wide toggles and scalars. Only input handling writes these; the
/// particle updater and the renderer read them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimParams {
    pub animating: bool,
    pub diagnostics_visible: bool,
    pub drift_enabled: bool,
    pub base_speed: f32,
    /// Drift target in normalized x, -1 (left edge) to 1 (right edge).
    pub cursor_x: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            animating: true,
            diagnostics_visible: true,
            drift_enabled: true,
            base_speed: DEFAULT_BASE_SPEED,
            cursor_x: 0.0,
        }
    }
}

impl SimParams {
    // No clamping; repeated presses compound without bound.
    pub fn speed_up(&mut self) {
        self.base_speed *= FASTER_RATIO;
    }

    pub fn slow_down(&mut self) {
        self.base_speed *= SLOWER_RATIO;
    }
}
