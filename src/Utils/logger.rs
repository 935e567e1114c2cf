//! Logging backend for the binary and for anyone embedding the library: terminal output
//! through `simplelog`, optionally mirrored into a timestamped `log_*.txt` file.
//! The library itself only uses the `log` macros.
use chrono::Local;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("loglevel must be debug, info, warn, error or off, got '{0}'")]
    UnknownLevel(String),
    #[error("cannot create log file: {0}")]
    File(#[from] io::Error),
}

pub fn parse_level(loglevel: &str) -> Result<LevelFilter, LoggerError> {
    match loglevel.trim().to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" => Ok(LevelFilter::Off),
        _ => Err(LoggerError::UnknownLevel(loglevel.to_string())),
    }
}

/// log_<date>_<time>.txt
pub fn log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Installs the global logger. Returns false if a logger was already installed, which is
/// not an error: the first one stays in charge.
pub fn init_logger(loglevel: &str, to_file: bool) -> Result<bool, LoggerError> {
    let level = parse_level(loglevel)?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if to_file && level != LevelFilter::Off {
        let file = File::create(log_file_name())?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    Ok(CombinedLogger::init(loggers).is_ok())
}
