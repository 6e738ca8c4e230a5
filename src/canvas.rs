// Copyright (c) 2026 rezky_nightky

use crate::palette::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: None,
        bg: None,
    };
}

/// Character grid addressed either by cell or by normalized scene coordinates
/// (x right, y up, both in [-1, 1]).
#[derive(Clone, Debug)]
pub struct Canvas {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }

    pub fn index(&self, col: u16, row: u16) -> Option<usize> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    #[allow(dead_code)]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn set_bg(&mut self, col: u16, row: u16, ch: char, bg: Rgb) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell {
                ch,
                fg: None,
                bg: Some(bg),
            };
        }
    }

    /// Draws a glyph over whatever background the cell already has.
    pub fn put_glyph(&mut self, col: u16, row: u16, ch: char, fg: Rgb) {
        if let Some(i) = self.index(col, row) {
            let c = &mut self.cells[i];
            c.ch = ch;
            c.fg = Some(fg);
        }
    }

    pub fn put_str(&mut self, col: u16, row: u16, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            let Ok(dx) = u16::try_from(i) else {
                break;
            };
            let x = col.saturating_add(dx);
            if x >= self.width {
                break;
            }
            self.put_glyph(x, row, ch, fg);
        }
    }

    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = ((x + 1.0) * 0.5 * self.width as f32).floor();
        let row = ((1.0 - y) * 0.5 * self.height as f32).floor();
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }
        let (col, row) = (col as u32, row as u32);
        if col >= self.width as u32 || row >= self.height as u32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Scene coordinates of a cell's centre.
    pub fn cell_center(&self, col: u16, row: u16) -> (f32, f32) {
        let x = (col as f32 + 0.5) / self.width.max(1) as f32 * 2.0 - 1.0;
        let y = 1.0 - (row as f32 + 0.5) / self.height.max(1) as f32 * 2.0;
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_corners_map_to_grid_corners() {
        let c = Canvas::new(80, 24);
        assert_eq!(c.to_cell(-1.0, 1.0), Some((0, 0)));
        assert_eq!(c.to_cell(0.999, -0.999), Some((79, 23)));
        assert_eq!(c.to_cell(0.0, 0.0), Some((40, 12)));
        assert_eq!(c.to_cell(1.0, 0.0), None);
        assert_eq!(c.to_cell(0.0, -1.0), None);
        assert_eq!(c.to_cell(-1.5, 0.0), None);
        assert_eq!(c.to_cell(0.0, 1.1), None);
        assert_eq!(c.to_cell(f32::NAN, 0.0), None);
    }

    #[test]
    fn cell_center_round_trips() {
        let c = Canvas::new(80, 24);
        for &(col, row) in &[(0u16, 0u16), (13, 7), (79, 23)] {
            let (x, y) = c.cell_center(col, row);
            assert_eq!(c.to_cell(x, y), Some((col, row)));
        }
    }

    #[test]
    fn glyphs_keep_background() {
        let mut c = Canvas::new(4, 2);
        let bg = Rgb::new(1, 2, 3);
        c.set_bg(1, 1, ' ', bg);
        c.put_glyph(1, 1, '*', Rgb::new(9, 9, 9));
        let cell = c.get(1, 1).unwrap();
        assert_eq!(cell.ch, '*');
        assert_eq!(cell.bg, Some(bg));
    }

    #[test]
    fn put_str_clips_at_right_edge() {
        let mut c = Canvas::new(4, 1);
        c.put_str(2, 0, "abcd", Rgb::new(0, 255, 0));
        assert_eq!(c.get(2, 0).unwrap().ch, 'a');
        assert_eq!(c.get(3, 0).unwrap().ch, 'b');
        assert_eq!(c.get(1, 0).unwrap().ch, ' ');
    }
}
