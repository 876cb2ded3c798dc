//! Utility functions for formatting and path management.
//!
//! This module provides helper functions for common operations like
//! formatting durations, truncating labels, and managing configuration directories.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Formats a duration into a human-readable time string.
///
/// # Arguments
///
/// * `duration` - The duration to format
///
/// # Returns
///
/// A formatted string in the format:
/// - `Xd XXh` for durations >= 1 day
/// - `HH:MM:SS` for durations >= 1 hour
/// - `00:MM:SS` for shorter durations
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 86400 {
        format!("{}d {:02}h", secs / 86400, (secs % 86400) / 3600)
    } else if secs >= 3600 {
        format!(
            "{:02}:{:02}:{:02}",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    } else {
        format!("00:{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Returns the application configuration directory path.
///
/// Creates the directory at `~/.config/tunnelscope` if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or
/// if directory creation fails.
pub fn get_app_config_dir() -> std::io::Result<PathBuf> {
    let home = home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    let path = home.join(".config").join(crate::constants::CONFIG_DIR_NAME);

    if !path.exists() {
        std::fs::create_dir_all(&path)?;
    }

    Ok(path)
}

/// Expands a leading `~/` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    Path::new(path).to_path_buf()
}

/// Truncates a string to a maximum number of characters.
///
/// If the string exceeds `max_chars`, it is truncated and "..." is appended.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}

/// Returns the user's home directory.
///
/// Uses the HOME environment variable on Unix systems.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_seconds() {
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_duration(Duration::from_secs(59)), "00:00:59");
    }

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(format_duration(Duration::from_secs(90)), "00:01:30");
        assert_eq!(format_duration(Duration::from_secs(3599)), "00:59:59");
    }

    #[test]
    fn test_format_duration_hours_and_days() {
        assert_eq!(format_duration(Duration::from_secs(7200)), "02:00:00");
        assert_eq!(format_duration(Duration::from_secs(90000)), "1d 01h");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("vpc-0abc1234", 20), "vpc-0abc1234");
        assert_eq!(truncate("cvpn-endpoint-0a12bc3d45", 10), "cvpn-en...");
        assert_eq!(truncate("São Paulo gateway", 8), "São P...");
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/etc/settings.json"), PathBuf::from("/etc/settings.json"));
        assert_eq!(expand_tilde("rel/a.json"), PathBuf::from("rel/a.json"));
    }

    #[test]
    fn test_expand_tilde_uses_home() {
        if let Some(home) = home_dir() {
            assert_eq!(expand_tilde("~/a.json"), home.join("a.json"));
        }
    }
}
