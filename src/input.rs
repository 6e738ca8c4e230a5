// Copyright (c) 2026 rezky_nightky

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const KEY_EXIT2: char = 'q';
pub const KEY_ANIMATE: char = 's';
pub const KEY_DIAGNOSTICS: char = 'd';
pub const KEY_GENERATE_GROUND: char = 'g';
pub const KEY_FASTER_SNOW: char = '2';
pub const KEY_SLOWER_SNOW: char = '1';
pub const KEY_SNOW_DRIFT: char = 'w';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleAnimation,
    ToggleDiagnostics,
    RegenerateGround,
    Faster,
    Slower,
    ToggleDrift,
}

impl Command {
    /// Maps a key press to a command. Letters match regardless of case;
    /// releases and repeats are ignored.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Esc => Some(Self::Quit),
            KeyCode::Char('c') | KeyCode::Char('C')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Some(Self::Quit)
            }
            KeyCode::Char(c) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            KEY_EXIT2 => Some(Self::Quit),
            KEY_ANIMATE => Some(Self::ToggleAnimation),
            KEY_DIAGNOSTICS => Some(Self::ToggleDiagnostics),
            KEY_GENERATE_GROUND => Some(Self::RegenerateGround),
            KEY_FASTER_SNOW => Some(Self::Faster),
            KEY_SLOWER_SNOW => Some(Self::Slower),
            KEY_SNOW_DRIFT => Some(Self::ToggleDrift),
            _ => None,
        }
    }
}

pub const CONTROLS: &[(&str, &str)] = &[
    ("q", "quit"),
    ("s", "toggle snow"),
    ("d", "toggle diagnostics display"),
    ("g", "regenerate ground"),
    ("w", "toggle snow cursor drift"),
    ("1", "reduce snow fall speed"),
    ("2", "increase snow fall speed"),
];

/// Column on a surface `width` cells wide to normalized x in [-1, 1].
pub fn cursor_x_from_column(column: u16, width: u16) -> f32 {
    let w = f32::from(width.max(1));
    (f32::from(column) / w) * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(
            Command::from_key(press(KeyCode::Char('S'))),
            Some(Command::ToggleAnimation)
        );
        assert_eq!(
            Command::from_key(press(KeyCode::Char('s'))),
            Some(Command::ToggleAnimation)
        );
        assert_eq!(
            Command::from_key(press(KeyCode::Char('W'))),
            Some(Command::ToggleDrift)
        );
        assert_eq!(Command::from_key(press(KeyCode::Char('Q'))), Some(Command::Quit));
    }

    #[test]
    fn two_exit_keys_and_ctrl_c() {
        assert_eq!(Command::from_key(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(Command::from_key(press(KeyCode::Char('q'))), Some(Command::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key(ctrl_c), Some(Command::Quit));
        assert_eq!(Command::from_key(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn speed_keys_and_unknowns() {
        assert_eq!(Command::from_key(press(KeyCode::Char('2'))), Some(Command::Faster));
        assert_eq!(Command::from_key(press(KeyCode::Char('1'))), Some(Command::Slower));
        assert_eq!(Command::from_key(press(KeyCode::Char('x'))), None);
        assert_eq!(Command::from_key(press(KeyCode::Up)), None);
    }

    #[test]
    fn releases_are_ignored() {
        let mut k = press(KeyCode::Char('g'));
        assert_eq!(Command::from_key(k), Some(Command::RegenerateGround));
        k.kind = KeyEventKind::Release;
        assert_eq!(Command::from_key(k), None);
        k.kind = KeyEventKind::Repeat;
        assert_eq!(Command::from_key(k), None);
    }

    #[test]
    fn column_maps_to_normalized_x() {
        assert_eq!(cursor_x_from_column(0, 80), -1.0);
        assert_eq!(cursor_x_from_column(40, 80), 0.0);
        assert!((cursor_x_from_column(79, 80) - 0.975).abs() < 1e-6);
        assert_eq!(cursor_x_from_column(0, 0), -1.0);
    }
}
