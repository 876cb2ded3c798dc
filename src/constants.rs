//! Application-wide constants and configuration values.
//!
//! This module defines all static configuration values used throughout Tunnelscope,
//! including timing intervals, telemetry bounds, file paths, and UI messages.

use std::time::Duration;

// === Application Metadata ===

/// Application name used in logging and directories.
pub const APP_NAME: &str = "tunnelscope";

// === Timing Configuration ===

/// UI refresh rate in milliseconds.
pub const DEFAULT_TICK_RATE: u64 = 200;
/// Interval between simulated telemetry samples while connected.
pub const TELEMETRY_INTERVAL: Duration = Duration::from_millis(1400);
/// How long the "Copied!" style label stays on the config preview.
pub const COPY_LABEL_TTL: Duration = Duration::from_millis(1200);
/// How long a toast notification stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

// === Telemetry Bounds ===

/// Simulated latency never drops below this many milliseconds.
pub const LATENCY_FLOOR_MS: f64 = 12.0;
/// Simulated throughput never drops below this many Mbps.
pub const THROUGHPUT_FLOOR_MBPS: f64 = 90.0;
/// Upper bound for simulated packet loss.
///
/// Kept as the literal reference value even though the panel renders it with a `%` suffix.
pub const LOSS_CEILING: f64 = 1.4;

// === Personalisation ===

/// Slowest pulse loop, in seconds.
pub const ANIMATION_SPEED_MIN: f64 = 0.6;
/// Fastest pulse loop, in seconds.
pub const ANIMATION_SPEED_MAX: f64 = 3.0;
/// Increment applied by the speed up/down keys.
pub const ANIMATION_SPEED_STEP: f64 = 0.1;
/// Accent colours offered by the palette cycler.
pub const ACCENT_PALETTE: [&str; 5] = ["#7cf6d2", "#89a8ff", "#f6d27c", "#ff8fa3", "#c3a6ff"];

// === Path Configuration ===

/// Name of the configuration directory under ~/.config/
pub const CONFIG_DIR_NAME: &str = "tunnelscope";
/// File holding the single persisted settings record.
pub const SETTINGS_FILE_NAME: &str = "settings.json";
/// Default log file; the TUI owns stdout so logs never go there.
pub const DEFAULT_LOG_FILE: &str = "/tmp/tunnelscope.log";

// === UI Messages ===

/// Diagnostic shown after importing an existing config.
pub const MSG_IMPORTED: &str = "Imported config ready. Validate keys before connecting.";
/// Empty diagnostics placeholder.
pub const MSG_NO_DIAGNOSTICS: &str = "No diagnostics yet.";
/// Resting label of the copy button.
pub const MSG_COPY_IDLE: &str = "Copy snippet";
/// Copy succeeded.
pub const MSG_COPY_DONE: &str = "Copied!";
/// No clipboard helper could be reached.
pub const MSG_COPY_UNAVAILABLE: &str = "Clipboard unavailable";
/// Hero subtitle before anything is imported.
pub const MSG_SUBTITLE_DEFAULT: &str =
    "Guide non-technical teammates through VPN setup with visuals, not jargon.";
/// Hero subtitle after an import.
pub const MSG_SUBTITLE_IMPORTED: &str =
    "Config imported. Review settings, then visualize the route before you connect.";
