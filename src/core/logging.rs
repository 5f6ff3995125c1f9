//! Diagnostic Logging and Console Output
//!
//! Every command writes a fresh diagnostic log to
//! `<log_dir>/<command>_debug.log` and prints a short styled summary to the
//! terminal when it finishes:
//! - File layer: plain text, no ANSI, everything at the configured level
//! - Stderr layer: compact, warnings and above
//! - `log` macros from the library are bridged into `tracing`

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use console::{style, Term};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Cannot prepare log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid log level '{level}': {message}")]
    InvalidLevel { level: String, message: String },

    #[error("A global logger is already installed: {0}")]
    AlreadyInitialized(String),
}

// ============================================================================
// Terminal Capability Detection
// ============================================================================

static TERMINAL_CAPS: OnceLock<TerminalCapabilities> = OnceLock::new();

fn get_terminal_caps() -> &'static TerminalCapabilities {
    TERMINAL_CAPS.get_or_init(TerminalCapabilities::detect)
}

/// Detected terminal capabilities
#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub supports_unicode: bool,
    pub width: u16,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities from environment
    pub fn detect() -> Self {
        let width = Term::stdout().size().1;

        // Unicode support heuristic
        let supports_unicode = std::env::var("TERM")
            .map(|t| !t.contains("dumb"))
            .unwrap_or(true)
            && std::env::var("LANG")
                .map(|l| l.contains("UTF-8") || l.contains("utf8"))
                .unwrap_or(true);

        Self {
            supports_unicode,
            width,
        }
    }
}

// ============================================================================
// Logging Initialization
// ============================================================================

/// Path of the diagnostic log for `command` under `log_dir`.
pub fn log_file_path(log_dir: &Path, command: &str) -> PathBuf {
    log_dir.join(format!("{command}_debug.log"))
}

/// Initialize logging for one command run.
///
/// The log file is created (or truncated) before the subscriber is
/// installed, so each run starts with a fresh log. `RUST_LOG` overrides
/// `level` when set.
///
/// Returns a `WorkerGuard` which must be held until exit so buffered lines
/// are flushed.
pub fn init(log_file: &Path, level: &str) -> Result<WorkerGuard, LoggingError> {
    let (file_layer_writer, guard) = open_log_file(log_file)?;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidLevel {
            level: level.to_string(),
            message: e.to_string(),
        })?,
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_layer_writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(env_filter);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .compact()
        .without_time()
        .with_target(false)
        .with_filter(EnvFilter::new("warn"));

    // try_init also installs the log -> tracing bridge
    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    log::info!("Logging initialized. Writing to: {}", log_file.display());

    Ok(guard)
}

fn open_log_file(
    log_file: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), LoggingError> {
    let to_error = |source| LoggingError::LogFile {
        path: log_file.to_path_buf(),
        source,
    };

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    let file = File::create(log_file).map_err(to_error)?;

    Ok(tracing_appender::non_blocking(file))
}

// ============================================================================
// Console Output Utilities
// ============================================================================

fn prefix(unicode: &'static str, fallback: &'static str) -> &'static str {
    if get_terminal_caps().supports_unicode {
        unicode
    } else {
        fallback
    }
}

/// Print a styled panel with title and content
pub fn print_panel(title: &str, content: &str) {
    let caps = get_terminal_caps();
    let width = (caps.width as usize).clamp(20, 80);

    let border_char = if caps.supports_unicode { "─" } else { "-" };
    let corner_tl = if caps.supports_unicode { "╭" } else { "+" };
    let corner_tr = if caps.supports_unicode { "╮" } else { "+" };
    let corner_bl = if caps.supports_unicode { "╰" } else { "+" };
    let corner_br = if caps.supports_unicode { "╯" } else { "+" };
    let side = if caps.supports_unicode { "│" } else { "|" };

    let title_display = format!(" {} ", title);
    let border_len = width
        .saturating_sub(title_display.chars().count())
        .saturating_sub(2)
        .max(1);
    let top = format!(
        "{}{}{}{}",
        style(corner_tl).cyan(),
        style(&title_display).cyan().bold(),
        style(border_char.repeat(border_len)).cyan(),
        style(corner_tr).cyan()
    );

    let bottom_border_len = width.saturating_sub(2).max(1);
    let bottom = format!(
        "{}{}{}",
        style(corner_bl).cyan(),
        style(border_char.repeat(bottom_border_len)).cyan(),
        style(corner_br).cyan()
    );

    println!("{}", top);
    let content_width = width.saturating_sub(4).max(1);
    for line in content.lines() {
        let padded = format!("{:width$}", line, width = content_width);
        println!("{} {} {}", style(side).cyan(), padded, style(side).cyan());
    }
    println!("{}", bottom);
}

pub fn print_success(message: &str) {
    println!("{} {}", style(prefix("✔", "[v]")).green(), style(message).green());
}

/// Errors go to stderr so piped lookup output stays clean.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style(prefix("✖", "[x]")).red(), style(message).red().bold());
}

pub fn print_warning(message: &str) {
    println!(
        "{} {}",
        style(prefix("⚠", "[!]")).yellow(),
        style(message).yellow().bold()
    );
}

pub fn print_info(message: &str) {
    println!("{} {}", style(prefix("ℹ", "(i)")).blue(), style(message).blue());
}

// ============================================================================
// Tests
// ============================================================================
