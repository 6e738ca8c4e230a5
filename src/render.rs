// Copyright (c) 2026 rezky_nightky

use crate::canvas::Canvas;
use crate::ground::Ground;
use crate::input::CONTROLS;
use crate::palette::{
    Rgb, BLACK, DIAGNOSTICS, EYE, GROUND_BOTTOM, GROUND_TOP, NOSE, SKY_BOTTOM, SKY_TOP,
    SNOWMAN_EDGE, WHITE,
};
use crate::particle::{Particle, Vec2};
use crate::scene::Scene;

const SNOWMAN_X: f32 = -0.45;

struct Ellipse {
    center: Vec2,
    rx: f32,
    ry: f32,
}

// Lower body, upper body, head.
const SNOWMAN_BODY: [Ellipse; 3] = [
    Ellipse {
        center: Vec2 { x: SNOWMAN_X, y: -0.5 },
        rx: 1.0 / 5.0,
        ry: 1.0 / 4.0,
    },
    Ellipse {
        center: Vec2 { x: SNOWMAN_X, y: -0.15 },
        rx: 1.0 / 6.0,
        ry: 1.0 / 4.8,
    },
    Ellipse {
        center: Vec2 { x: SNOWMAN_X, y: 0.15 },
        rx: 1.0 / 7.5,
        ry: 1.0 / 6.0,
    },
];

const EYES: [Vec2; 2] = [Vec2 { x: -0.5, y: 0.2 }, Vec2 { x: -0.395, y: 0.2 }];
const NOSE_AT: Vec2 = Vec2 { x: -0.4475, y: 0.1 };

const RIGHT_HAND: Vec2 = Vec2 { x: -0.16, y: -0.049 };
const LEFT_HAND: Vec2 = Vec2 { x: -0.74, y: -0.049 };

const ARMS: [(Vec2, Vec2); 8] = [
    (Vec2 { x: -0.3, y: -0.12 }, Vec2 { x: -0.15, y: -0.05 }),
    (Vec2 { x: -0.6, y: -0.12 }, Vec2 { x: -0.75, y: -0.05 }),
    (RIGHT_HAND, Vec2 { x: -0.09, y: 0.035 }),
    (RIGHT_HAND, Vec2 { x: -0.07, y: -0.01 }),
    (RIGHT_HAND, Vec2 { x: -0.085, y: -0.08 }),
    (LEFT_HAND, Vec2 { x: -0.81, y: 0.035 }),
    (LEFT_HAND, Vec2 { x: -0.83, y: -0.01 }),
    (LEFT_HAND, Vec2 { x: -0.815, y: -0.08 }),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct Style {
    pub ascii: bool,
    pub mono: bool,
}

impl Style {
    fn flake(&self, size: f32) -> char {
        let idx = if size < 2.0 {
            0
        } else if size < 3.0 {
            1
        } else {
            2
        };
        if self.ascii {
            ['.', '+', '*'][idx]
        } else {
            ['·', '•', '*'][idx]
        }
    }

    fn ground_fill(&self) -> char {
        match (self.mono, self.ascii) {
            (false, _) => ' ',
            (true, true) => '#',
            (true, false) => '▓',
        }
    }

    fn snow_fill(&self) -> char {
        match (self.mono, self.ascii) {
            (false, _) => ' ',
            (true, true) => ':',
            (true, false) => '░',
        }
    }
}

/// Paints the whole scene, back to front. The flake arena is split in thirds:
/// the first third falls behind the ground, the second between ground and
/// snowman, the last in front of everything.
pub fn draw_scene(scene: &Scene, canvas: &mut Canvas, style: &Style) {
    draw_background(canvas);

    let flakes = scene.store.tracked();
    let third = scene.store.capacity() / 3;
    let (back, rest) = flakes.split_at(third.min(flakes.len()));
    let (middle, front) = rest.split_at(third.min(rest.len()));

    draw_snow(canvas, back, style);
    draw_ground(canvas, &scene.ground, style);
    draw_snow(canvas, middle, style);
    draw_snowman(canvas, style);
    draw_snow(canvas, front, style);

    if scene.params.diagnostics_visible {
        draw_diagnostics(canvas, scene);
    }
}

fn draw_background(canvas: &mut Canvas) {
    let rows = canvas.height.max(1) as f32;
    for row in 0..canvas.height {
        let color = SKY_TOP.lerp(SKY_BOTTOM, row as f32 / (rows - 1.0).max(1.0));
        for col in 0..canvas.width {
            canvas.set_bg(col, row, ' ', color);
        }
    }
}

fn draw_snow(canvas: &mut Canvas, flakes: &[Particle], style: &Style) {
    for p in flakes.iter().filter(|p| p.alive) {
        let Some((col, row)) = canvas.to_cell(p.location.x, p.location.y) else {
            continue;
        };
        let under = canvas.get(col, row).and_then(|c| c.bg).unwrap_or(SKY_TOP);
        let fg = under.lerp(WHITE, p.transparency);
        canvas.put_glyph(col, row, style.flake(p.size), fg);
    }
}

fn draw_ground(canvas: &mut Canvas, ground: &Ground, style: &Style) {
    let fill = style.ground_fill();
    for col in 0..canvas.width {
        let (x, _) = canvas.cell_center(col, 0);
        let top = ground.height_at(x);
        let depth = (top + 1.0).max(f32::EPSILON);
        for row in 0..canvas.height {
            let (_, y) = canvas.cell_center(col, row);
            if y > top {
                continue;
            }
            let color = GROUND_TOP.lerp(GROUND_BOTTOM, (top - y) / depth);
            canvas.set_bg(col, row, fill, color);
        }
    }
}

fn draw_snowman(canvas: &mut Canvas, style: &Style) {
    let fill = style.snow_fill();
    for body in &SNOWMAN_BODY {
        for row in 0..canvas.height {
            for col in 0..canvas.width {
                let (x, y) = canvas.cell_center(col, row);
                let dx = (x - body.center.x) / body.rx;
                let dy = (y - body.center.y) / body.ry;
                let d = (dx * dx + dy * dy).sqrt();
                if d <= 1.0 {
                    canvas.set_bg(col, row, fill, WHITE.lerp(SNOWMAN_EDGE, d));
                }
            }
        }
    }

    for (a, b) in &ARMS {
        draw_line(canvas, *a, *b, BLACK);
    }

    let eye = if style.ascii { 'o' } else { '●' };
    for e in &EYES {
        if let Some((col, row)) = canvas.to_cell(e.x, e.y) {
            canvas.put_glyph(col, row, eye, EYE);
        }
    }
    if let Some((col, row)) = canvas.to_cell(NOSE_AT.x, NOSE_AT.y) {
        canvas.put_glyph(col, row, if style.ascii { 'v' } else { '▼' }, NOSE);
    }
}

fn draw_line(canvas: &mut Canvas, a: Vec2, b: Vec2, color: Rgb) {
    let (Some(ca), Some(cb)) = (canvas.to_cell(a.x, a.y), canvas.to_cell(b.x, b.y)) else {
        return;
    };
    let dc = cb.0 as i32 - ca.0 as i32;
    let dr = cb.1 as i32 - ca.1 as i32;
    let glyph = if dr == 0 {
        '-'
    } else if dc == 0 {
        '|'
    } else if (dc > 0) == (dr < 0) {
        '/'
    } else {
        '\\'
    };

    let steps = dc.abs().max(dr.abs()).max(1);
    for k in 0..=steps {
        let t = k as f32 / steps as f32;
        let x = a.x + (b.x - a.x) * t;
        let y = a.y + (b.y - a.y) * t;
        if let Some((col, row)) = canvas.to_cell(x, y) {
            canvas.put_glyph(col, row, glyph, color);
        }
    }
}

pub fn diagnostics_lines(scene: &Scene) -> Vec<String> {
    let mut lines = vec![
        "Diagnostics".to_string(),
        format!(
            " current particles: {} of {}",
            scene.store.tracked_len(),
            scene.store.capacity()
        ),
        format!(
            " current base snow speed: {:.1}",
            scene.params.base_speed * 1000.0
        ),
        "Scene controls:".to_string(),
    ];
    lines.extend(CONTROLS.iter().map(|(key, what)| format!(" {}: {}", key, what)));
    lines
}

fn draw_diagnostics(canvas: &mut Canvas, scene: &Scene) {
    let (col, row) = canvas.to_cell(-0.99, 0.95).unwrap_or((0, 0));
    for (i, line) in diagnostics_lines(scene).iter().enumerate() {
        let Ok(dy) = u16::try_from(i) else {
            break;
        };
        canvas.put_str(col, row.saturating_add(dy), line, DIAGNOSTICS);
    }
}
