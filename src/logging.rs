// Copyright (c) 2026 rezky_nightky

use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::error::{Result, SceneError};

/// Installs the logger. With no log file, output goes to stderr only when
/// stderr is redirected; a terminal stderr would draw over the scene.
/// Returns false when logging stays off.
pub fn init(log_file: Option<&Path>, level: LevelFilter) -> Result<bool> {
    let target = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| SceneError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
            Target::Pipe(Box::new(file))
        }
        None if !std::io::stderr().is_terminal() => Target::Stderr,
        None => return Ok(false),
    };

    Builder::new()
        .filter_level(level)
        .parse_env(Env::default())
        .target(target)
        .format_timestamp_millis()
        .try_init()?;
    Ok(true)
}
