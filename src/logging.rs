use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for stackit
///
/// This sets up colored output for terminals with automatic detection of:
/// - NO_COLOR environment variable (disables colors)
/// - TTY detection (no colors when piped)
/// - RUST_LOG environment variable for filtering
pub fn init_logging() {
    let use_ansi = should_use_colors();

    // Set up the env filter - defaults to "info" if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(use_ansi)
                .with_target(false) // Don't show module paths for cleaner output
                .with_thread_ids(false) // Don't show thread IDs for CLI tool
                .with_file(false)
                .with_line_number(false)
                .without_time() // Remove timestamps for cleaner CLI output
                .compact(),
        )
        .with(env_filter)
        .init();
}

/// Determine if we should use ANSI colors based on environment and TTY detection
fn should_use_colors() -> bool {
    // Check NO_COLOR standard first
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check stackit-specific override
    if env::var("STACKIT_NO_COLOR").is_ok() {
        return false;
    }

    // Check for force color
    if env::var("FORCE_COLOR").is_ok() || env::var("STACKIT_FORCE_COLOR").is_ok() {
        return true;
    }

    // Default to true - tracing-subscriber will handle TTY detection
    true
}
