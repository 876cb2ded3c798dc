//! CLI command handlers.

use std::path::Path;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde_json::Value;

use crate::cli::args::Commands;
use crate::session::SelectionState;
use crate::settings::{self, PersistedSettings, SettingsStore};

/// Handles CLI commands that don't require the TUI.
///
/// Returns `true` if the command was handled and the program should exit,
/// or `false` if the TUI should be started.
pub fn handle_command(command: &Commands, store: &SettingsStore) -> Result<bool> {
    match command {
        Commands::Snippet => {
            print!("{}", crate::snippet::build(&store.load()));
            Ok(true)
        }
        Commands::Import { file } => {
            handle_import(file, store)?;
            Ok(true)
        }
        Commands::Reset => {
            handle_reset(store)?;
            Ok(true)
        }
    }
}

/// Imports a settings record from the specified file path.
fn handle_import(file: &str, store: &SettingsStore) -> Result<()> {
    let path = crate::utils::expand_tilde(file);
    let (selection, rejected) = import_record(&path)?;

    store
        .save(&PersistedSettings::from(&selection))
        .wrap_err_with(|| format!("failed to write {}", store.path().display()))?;

    println!("✅ Imported settings: {}", selection.connection_name);
    println!("   Target:   {}", selection.deployment_target.name());
    println!("   Region:   {}", selection.region().name);
    println!("   Protocol: {}", selection.protocol().name);
    if !rejected.is_empty() {
        println!("   Skipped:  {}", rejected.join(", "));
    }
    println!("   Saved to: {}", store.path().display());
    Ok(())
}

/// Reads `path` and merges its well-typed fields over the defaults.
///
/// Unlike loading at startup, a file that is not a JSON object is an error here.
fn import_record(path: &Path) -> Result<(SelectionState, Vec<String>)> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("{} is not valid JSON", path.display()))?;
    let Value::Object(record) = value else {
        return Err(eyre!("{} does not contain a settings object", path.display()));
    };

    let mut selection = SelectionState::default();
    let rejected = settings::apply_record(&mut selection, &record);
    Ok((selection, rejected))
}

fn handle_reset(store: &SettingsStore) -> Result<()> {
    let removed = store
        .clear()
        .wrap_err_with(|| format!("failed to remove {}", store.path().display()))?;
    if removed {
        println!("🗑  Removed {}", store.path().display());
    } else {
        println!("Nothing to reset at {}", store.path().display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DeploymentTarget;

    #[test]
    fn test_import_record_keeps_valid_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.json");
        std::fs::write(
            &path,
            r#"{"deploymentTarget": "aws-sidecar", "selectedRegion": 42, "username": "ops"}"#,
        )
        .unwrap();

        let (selection, rejected) = import_record(&path).unwrap();
        assert_eq!(selection.deployment_target, DeploymentTarget::AwsSidecar);
        assert_eq!(selection.username, "ops");
        assert_eq!(selection.region_id, "ams");
        assert_eq!(rejected, vec!["selectedRegion".to_string()]);
    }

    #[test]
    fn test_import_record_rejects_non_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(import_record(&path).is_err());

        std::fs::write(&path, "{not json").unwrap();
        assert!(import_record(&path).is_err());

        assert!(import_record(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_import_then_reset() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        std::fs::write(&input, r#"{"connectionName": "Branch link"}"#).unwrap();
        let store = SettingsStore::new(dir.path().join("slot").join("settings.json"));

        let handled = handle_command(
            &Commands::Import {
                file: input.display().to_string(),
            },
            &store,
        )
        .unwrap();
        assert!(handled);
        assert_eq!(store.load().connection_name, "Branch link");

        assert!(handle_command(&Commands::Reset, &store).unwrap());
        assert!(!store.path().exists());
        assert!(handle_command(&Commands::Reset, &store).unwrap());
    }
}
