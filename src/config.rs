// Copyright (c) 2026 rezky_nightky

use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use crate::error::{Result, SceneError};
use crate::ground::GROUND_VERTICES;
use crate::input::CONTROLS;
use crate::runtime::{ColorMode, SimParams, DEFAULT_BASE_SPEED};
use crate::scheduler::TARGET_FPS;
use crate::store::MAX_PARTICLES;

pub fn color_enabled_stdout() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowscene",
    about = "Falling snow, a snowman and a random ground line in the terminal",
    version,
    disable_version_flag = true
)]
pub struct Args {
    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = TARGET_FPS,
        help_heading = "TIMING",
        help = "Target frames per second (min 1 max 240)"
    )]
    pub fps: u32,

    #[arg(
        long = "duration",
        help_heading = "TIMING",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        short = 'p',
        long = "particles",
        default_value_t = MAX_PARTICLES,
        help_heading = "SCENE",
        help = "Snow particle capacity (min 1 max 10000)"
    )]
    pub particles: usize,

    #[arg(
        long = "ground-vertices",
        default_value_t = GROUND_VERTICES,
        help_heading = "SCENE",
        help = "Vertices in the ground line (min 2 max 512)"
    )]
    pub ground_vertices: usize,

    #[arg(
        short = 'S',
        long = "speed",
        default_value_t = 1.0,
        help_heading = "SCENE",
        help = "Base snow speed as shown in diagnostics (min 0.001 max 1000)"
    )]
    pub speed: f32,

    #[arg(long = "seed", help_heading = "SCENE", help = "Random seed")]
    pub seed: Option<u64>,

    #[arg(
        long = "paused",
        help_heading = "SCENE",
        help = "Start with snowfall stopped"
    )]
    pub paused: bool,

    #[arg(
        long = "no-diagnostics",
        help_heading = "SCENE",
        help = "Start with the diagnostics overlay hidden"
    )]
    pub no_diagnostics: bool,

    #[arg(
        long = "no-drift",
        help_heading = "SCENE",
        help = "Start with cursor drift disabled"
    )]
    pub no_drift: bool,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,16,8/256,24/32). Default: 24-bit if supported (COLORTERM), else 8-bit"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "ascii",
        help_heading = "APPEARANCE",
        help = "Use ASCII glyphs only (default when LANG is not UTF-8)"
    )]
    pub ascii: bool,

    #[arg(
        long = "log-file",
        help_heading = "LOGGING",
        help = "Write log output to this file"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "log-level",
        default_value = "info",
        help_heading = "LOGGING",
        help = "Log level: off, error, warn, info, debug, trace (RUST_LOG overrides)"
    )]
    pub log_level: String,

    #[arg(
        long = "list-controls",
        help_heading = "HELP",
        help = "List key bindings and exit"
    )]
    pub list_controls: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

/// Validated startup configuration.
#[derive(Clone, Debug)]
pub struct Settings {
    pub fps: u32,
    pub duration: Option<Duration>,
    pub capacity: usize,
    pub ground_vertices: usize,
    pub params: SimParams,
    pub seed: Option<u64>,
    pub color_mode: ColorMode,
    pub ascii: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Settings {
    pub fn from_args(args: &Args) -> Result<Self> {
        let fps = require_range("--fps", args.fps, 1, 240)?;
        let capacity = require_range("--particles", args.particles, 1, 10_000)?;
        let ground_vertices = require_range("--ground-vertices", args.ground_vertices, 2, 512)?;
        let speed = require_f32_range("--speed", args.speed, 0.001, 1000.0)?;

        let duration = match args.duration {
            Some(s) if !s.is_finite() => {
                return Err(SceneError::invalid("--duration", s, "must be a finite number"))
            }
            Some(s) if s > 0.0 => {
                let s = require_f64_range("--duration", s, 0.1, 86400.0)?;
                Some(Duration::from_secs_f64(s))
            }
            _ => None,
        };

        let log_level = args
            .log_level
            .parse::<LevelFilter>()
            .map_err(|_| SceneError::invalid("--log-level", &args.log_level, "unknown level"))?;

        let params = SimParams {
            animating: !args.paused,
            diagnostics_visible: !args.no_diagnostics,
            drift_enabled: !args.no_drift,
            base_speed: DEFAULT_BASE_SPEED * speed,
            cursor_x: 0.0,
        };

        Ok(Self {
            fps,
            duration,
            capacity,
            ground_vertices,
            params,
            seed: args.seed,
            color_mode: detect_color_mode(args.colormode)?,
            ascii: args.ascii || default_to_ascii(),
            log_file: args.log_file.clone(),
            log_level,
        })
    }
}

fn require_range<T>(name: &'static str, v: T, min: T, max: T) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if v < min || v > max {
        return Err(SceneError::invalid(name, v, format!("min {} max {}", min, max)));
    }
    Ok(v)
}

fn require_f32_range(name: &'static str, v: f32, min: f32, max: f32) -> Result<f32> {
    if !v.is_finite() {
        return Err(SceneError::invalid(name, v, "must be a finite number"));
    }
    require_range(name, v, min, max)
}

fn require_f64_range(name: &'static str, v: f64, min: f64, max: f64) -> Result<f64> {
    if !v.is_finite() {
        return Err(SceneError::invalid(name, v, "must be a finite number"));
    }
    require_range(name, v, min, max)
}

fn default_to_ascii() -> bool {
    let lang = env::var("LANG").unwrap_or_default();
    !lang.to_ascii_uppercase().contains("UTF")
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }
    ColorMode::Color256
}

pub fn color_mode_from_flag(m: u16) -> Result<ColorMode> {
    match m {
        0 => Ok(ColorMode::Mono),
        16 => Ok(ColorMode::Color16),
        8 | 256 => Ok(ColorMode::Color256),
        24 | 32 => Ok(ColorMode::TrueColor),
        _ => Err(SceneError::invalid(
            "--colormode",
            m,
            "allowed: 0,16,8/256,24/32",
        )),
    }
}

fn detect_color_mode(flag: Option<u16>) -> Result<ColorMode> {
    match flag {
        Some(m) => color_mode_from_flag(m),
        None => Ok(detect_color_mode_auto()),
    }
}

pub fn print_list_controls() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mSCENE CONTROLS:\x1b[0m");
    } else {
        println!("SCENE CONTROLS:");
    }
    println!("  esc  quit");
    for (key, what) in CONTROLS {
        println!("  {:<4} {}", key, what);
    }
    println!();
    println!("Moving the mouse pulls the snow toward the cursor while drift is on.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["snowscene"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn defaults_match_the_classic_scene() {
        let s = Settings::from_args(&parse(&["--colormode", "24"])).unwrap();
        assert_eq!(s.fps, 60);
        assert_eq!(s.capacity, 1000);
        assert_eq!(s.ground_vertices, 25);
        assert_eq!(s.params, SimParams::default());
        assert_eq!(s.duration, None);
        assert_eq!(s.color_mode, ColorMode::TrueColor);
        assert_eq!(s.log_level, LevelFilter::Info);
    }

    #[test]
    fn startup_toggles_and_speed() {
        let s = Settings::from_args(&parse(&[
            "--paused",
            "--no-drift",
            "--no-diagnostics",
            "-S",
            "2",
            "--colormode",
            "0",
        ]))
        .unwrap();
        assert!(!s.params.animating);
        assert!(!s.params.drift_enabled);
        assert!(!s.params.diagnostics_visible);
        assert!((s.params.base_speed - 0.002).abs() < 1e-9);
        assert_eq!(s.color_mode, ColorMode::Mono);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = Settings::from_args(&parse(&["--fps", "0"])).unwrap_err();
        assert_eq!(err.to_string(), "failed to apply --fps 0 (min 1 max 240)");
        assert!(Settings::from_args(&parse(&["--particles", "20000"])).is_err());
        assert!(Settings::from_args(&parse(&["--ground-vertices", "1"])).is_err());
        assert!(Settings::from_args(&parse(&["--colormode", "7"])).is_err());
        assert!(Settings::from_args(&parse(&["--log-level", "loud"])).is_err());
        assert!(Settings::from_args(&parse(&["--duration", "0.01"])).is_err());
    }

    #[test]
    fn non_positive_duration_disables_the_limit() {
        let s = Settings::from_args(&parse(&["--duration", "0", "--colormode", "8"])).unwrap();
        assert_eq!(s.duration, None);
        let s = Settings::from_args(&parse(&["--duration", "2.5", "--colormode", "8"])).unwrap();
        assert_eq!(s.duration, Some(Duration::from_millis(2500)));
    }
}
