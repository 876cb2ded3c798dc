//! Best-effort clipboard writes.
//!
//! There is no clipboard API in a terminal, so the snippet is piped into the
//! first system helper that accepts it. When none does, the caller gets
//! [`CopyOutcome::Unavailable`] instead of an error.

use std::io::Write;
use std::process::{Command, Stdio};

/// Helper programs tried in order, with their arguments.
const HELPERS: [(&str, &[&str]); 4] = [
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Result of a copy request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Unavailable,
}

impl CopyOutcome {
    /// Transient label for the config preview.
    pub fn label(self) -> &'static str {
        match self {
            CopyOutcome::Copied => crate::constants::MSG_COPY_DONE,
            CopyOutcome::Unavailable => crate::constants::MSG_COPY_UNAVAILABLE,
        }
    }
}

/// Copies `text` to the system clipboard if any helper is available.
pub fn copy(text: &str) -> CopyOutcome {
    copy_with(&HELPERS, text)
}

fn copy_with(helpers: &[(&str, &[&str])], text: &str) -> CopyOutcome {
    for (program, args) in helpers {
        match pipe_into(program, args, text) {
            Ok(()) => {
                tracing::debug!(program, "snippet copied");
                return CopyOutcome::Copied;
            }
            Err(e) => tracing::debug!(program, error = %e, "clipboard helper unavailable"),
        }
    }
    CopyOutcome::Unavailable
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    // Dropping stdin closes the pipe so the helper sees EOF.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    // Reap the helper even when the write failed.
    let status = child.wait()?;
    written?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("{program} exited with {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_helpers_report_unavailable() {
        let helpers: [(&str, &[&str]); 1] = [("tunnelscope-no-such-helper", &[])];
        assert_eq!(copy_with(&helpers, "x"), CopyOutcome::Unavailable);
        assert_eq!(copy_with(&[], "x"), CopyOutcome::Unavailable);
    }

    #[cfg(unix)]
    #[test]
    fn test_first_working_helper_wins() {
        let helpers: [(&str, &[&str]); 2] = [("tunnelscope-no-such-helper", &[]), ("cat", &[])];
        assert_eq!(copy_with(&helpers, "[Interface]"), CopyOutcome::Copied);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_helper_is_skipped() {
        let helpers: [(&str, &[&str]); 1] = [("false", &[])];
        assert_eq!(copy_with(&helpers, "x"), CopyOutcome::Unavailable);
    }

    #[cfg(unix)]
    #[test]
    fn test_helper_that_exits_early_is_reaped() {
        // `true` exits without reading, so a large write hits a closed pipe.
        let helpers: [(&str, &[&str]); 1] = [("true", &[])];
        let text = "x".repeat(1 << 20);
        assert_eq!(copy_with(&helpers, &text), CopyOutcome::Unavailable);
        assert!(pipe_into("true", &[], &text).is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(CopyOutcome::Copied.label(), "Copied!");
        assert_eq!(CopyOutcome::Unavailable.label(), "Clipboard unavailable");
    }
}
