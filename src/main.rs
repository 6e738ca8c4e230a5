// Copyright (c) 2026 rezky_nightky

mod canvas;
mod config;
mod error;
mod ground;
mod input;
mod logging;
mod palette;
mod particle;
mod render;
mod runtime;
mod scene;
mod scheduler;
mod store;
mod terminal;

use std::process::ExitCode;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, MouseEventKind};
use rand::{rngs::StdRng, SeedableRng};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::canvas::Canvas;
use crate::config::{color_enabled_stdout, print_list_controls, Args, Settings};
use crate::error::Result;
use crate::input::{cursor_x_from_column, Command};
use crate::render::{draw_scene, Style};
use crate::runtime::ColorMode;
use crate::scene::{Flow, Scene};
use crate::scheduler::{FrameScheduler, Phase};
use crate::terminal::{restore_terminal_best_effort, Terminal};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn install_exit_handlers() {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }
}

fn parse_args() -> Args {
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    let mut cmd = Args::command()
        .styles(clap_styles())
        .help_template(help_template);
    cmd.build();
    if cmd.get_arguments().any(|a| a.get_id().as_str() == "help") {
        cmd = cmd.mut_arg("help", |a| a.help_heading("HELP"));
    }
    let matches = cmd.get_matches();
    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn main() -> ExitCode {
    install_exit_handlers();

    let args = parse_args();

    if args.list_controls {
        print_list_controls();
        return ExitCode::SUCCESS;
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match Settings::from_args(&args).and_then(|s| run(&s)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            restore_terminal_best_effort();
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Dispatches one terminal event against the scene. A resize replaces the
/// canvas and leaves the simulation alone.
fn handle_event(scene: &mut Scene, canvas: &mut Canvas, ev: Event) -> Flow {
    match ev {
        Event::Key(k) => match Command::from_key(k) {
            Some(cmd) => scene.apply(cmd),
            None => Flow::Continue,
        },
        Event::Mouse(m) if m.kind == MouseEventKind::Moved => {
            scene.set_cursor_x(cursor_x_from_column(m.column, canvas.width));
            Flow::Continue
        }
        Event::Resize(w, h) => {
            log::debug!("resize to {}x{}", w, h);
            *canvas = Canvas::new(w, h);
            Flow::Continue
        }
        _ => Flow::Continue,
    }
}

fn run(settings: &Settings) -> Result<()> {
    let logging = logging::init(settings.log_file.as_deref(), settings.log_level)?;
    log::info!(
        "starting: fps={} particles={} ground_vertices={} base_speed={} color_mode={:?} logging={}",
        settings.fps,
        settings.capacity,
        settings.ground_vertices,
        settings.params.base_speed,
        settings.color_mode,
        logging
    );

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut scene = Scene::new(
        settings.params,
        settings.capacity,
        settings.ground_vertices,
        rng,
    );
    let style = Style {
        ascii: settings.ascii,
        mono: settings.color_mode == ColorMode::Mono,
    };

    let mut term = Terminal::new(settings.color_mode)?;
    let (w, h) = term.size()?;
    let mut canvas = Canvas::new(w, h);

    let start = Instant::now();
    let end_time = settings.duration.map(|d| start + d);
    let mut sched = FrameScheduler::new(settings.fps, start);
    log::debug!("frame time {:?}", sched.frame_time());

    draw_scene(&scene, &mut canvas, &style);
    term.draw(&canvas)?;

    'frames: loop {
        match sched.phase() {
            Phase::Rendering => {
                scene.tick();
                draw_scene(&scene, &mut canvas, &style);
                term.draw(&canvas)?;
                sched.enter_idle();
            }
            Phase::Idle => {
                while Terminal::poll_event(Duration::ZERO)? {
                    if handle_event(&mut scene, &mut canvas, Terminal::read_event()?) == Flow::Exit {
                        break 'frames;
                    }
                }

                let now = Instant::now();
                if end_time.is_some_and(|end| now >= end) {
                    log::info!("duration elapsed");
                    break 'frames;
                }
                match sched.remaining(now) {
                    Some(wait) => {
                        let wait = end_time.map_or(wait, |end| wait.min(end - now));
                        let _ = Terminal::poll_event(wait)?;
                    }
                    None => sched.begin_tick(now),
                }
            }
        }
    }

    drop(term);
    log::info!(
        "stopped after {} ticks in {:.1}s, {} of {} particles in play",
        sched.ticks(),
        start.elapsed().as_secs_f64(),
        scene.store.tracked_len(),
        scene.store.capacity()
    );
    Ok(())
}
