//! Persisted preferences.
//!
//! One JSON record in one file. Loading is best-effort and field-by-field: a
//! malformed file is discarded with a warning, and a single mistyped field is
//! skipped without blocking the others. Saving always rewrites the whole record.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::DeploymentTarget;
use crate::constants::{ANIMATION_SPEED_MAX, ANIMATION_SPEED_MIN};
use crate::session::{AuthMethod, SelectionState};

/// The tracked fields, in their on-disk shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSettings {
    pub connection_name: String,
    pub auth_method: AuthMethod,
    pub deployment_target: DeploymentTarget,
    pub username: String,
    pub selected_region: String,
    pub selected_protocol: String,
    pub accent: String,
    pub animation_speed: f64,
    pub aws_vpc_id: String,
    pub aws_subnet: String,
    pub aws_security_group: String,
    pub aws_cidr: String,
}

impl From<&SelectionState> for PersistedSettings {
    fn from(s: &SelectionState) -> Self {
        Self {
            connection_name: s.connection_name.clone(),
            auth_method: s.auth_method,
            deployment_target: s.deployment_target,
            username: s.username.clone(),
            selected_region: s.region_id.clone(),
            selected_protocol: s.protocol_id.clone(),
            accent: s.accent.clone(),
            animation_speed: s.animation_speed,
            aws_vpc_id: s.aws.vpc_id.clone(),
            aws_subnet: s.aws.subnet.clone(),
            aws_security_group: s.aws.security_group.clone(),
            aws_cidr: s.aws.cidr.clone(),
        }
    }
}

/// Applies every well-typed field of `record` onto `selection`.
///
/// Returns the names of fields that were present but rejected.
pub fn apply_record(selection: &mut SelectionState, record: &Map<String, Value>) -> Vec<String> {
    let mut rejected = Vec::new();

    let mut string_field = |key: &str, slot: &mut String| match record.get(key) {
        Some(Value::String(v)) => v.clone_into(slot),
        Some(_) => rejected.push(key.to_string()),
        None => {}
    };
    string_field("connectionName", &mut selection.connection_name);
    string_field("username", &mut selection.username);
    string_field("selectedRegion", &mut selection.region_id);
    string_field("selectedProtocol", &mut selection.protocol_id);
    string_field("accent", &mut selection.accent);
    string_field("awsVpcId", &mut selection.aws.vpc_id);
    string_field("awsSubnet", &mut selection.aws.subnet);
    string_field("awsSecurityGroup", &mut selection.aws.security_group);
    string_field("awsCidr", &mut selection.aws.cidr);

    if let Some(v) = record.get("authMethod") {
        match v.as_str().and_then(AuthMethod::from_id) {
            Some(method) => selection.auth_method = method,
            None => rejected.push("authMethod".to_string()),
        }
    }

    if let Some(v) = record.get("deploymentTarget") {
        match v.as_str().and_then(DeploymentTarget::from_id) {
            Some(target) => selection.deployment_target = target,
            None => rejected.push("deploymentTarget".to_string()),
        }
    }

    if let Some(v) = record.get("animationSpeed") {
        match v.as_f64() {
            Some(speed) if speed.is_finite() => {
                selection.animation_speed = speed.clamp(ANIMATION_SPEED_MIN, ANIMATION_SPEED_MAX);
            }
            _ => rejected.push("animationSpeed".to_string()),
        }
    }

    rejected
}

/// Parses a raw record and applies it over `base`.
///
/// Never fails: anything that is not a JSON object leaves `base` untouched.
pub fn merge_raw(base: SelectionState, raw: &str) -> SelectionState {
    let mut selection = base;
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(record)) => {
            let rejected = apply_record(&mut selection, &record);
            if !rejected.is_empty() {
                tracing::warn!(?rejected, "ignoring mistyped settings fields");
            }
        }
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "saved settings are not an object, using defaults");
        }
        Err(e) => {
            tracing::warn!(error = %e, "unable to load saved settings, using defaults");
        }
    }
    selection
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The single settings slot on disk.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.config/tunnelscope/settings.json`.
    pub fn default_location() -> std::io::Result<Self> {
        let dir = crate::utils::get_app_config_dir()?;
        Ok(Self::new(dir.join(crate::constants::SETTINGS_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved selection over the built-in defaults.
    ///
    /// A missing file is silent; unreadable or malformed content is logged and discarded.
    pub fn load(&self) -> SelectionState {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => merge_raw(SelectionState::default(), &raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SelectionState::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unable to read saved settings");
                SelectionState::default()
            }
        }
    }

    /// Overwrites the slot with the full record.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file cannot be written.
    pub fn save(&self, settings: &PersistedSettings) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, body)
    }

    /// Deletes the slot. Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> std::io::Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bogus_target_skipped_other_fields_applied() {
        let raw = r##"{"deploymentTarget": "bogus", "accent": "#ff0000", "username": "ops"}"##;
        let s = merge_raw(SelectionState::default(), raw);
        assert_eq!(s.deployment_target, DeploymentTarget::AwsClientVpn);
        assert_eq!(s.accent, "#ff0000");
        assert_eq!(s.username, "ops");
    }

    #[test]
    fn test_mistyped_fields_are_reported_and_skipped() {
        let record: Map<String, Value> = serde_json::from_str(
            r#"{"connectionName": 5, "animationSpeed": "fast", "authMethod": "keys", "awsCidr": null}"#,
        )
        .unwrap();
        let mut s = SelectionState::default();
        let rejected = apply_record(&mut s, &record);
        assert_eq!(s.connection_name, "Training Lab Tunnel");
        assert!((s.animation_speed - 1.4).abs() < f64::EPSILON);
        assert_eq!(s.auth_method, AuthMethod::Keys);
        assert_eq!(s.aws.cidr, "10.20.0.0/16");
        assert!(rejected.contains(&"connectionName".to_string()));
        assert!(rejected.contains(&"animationSpeed".to_string()));
        assert!(rejected.contains(&"awsCidr".to_string()));
    }

    #[test]
    fn test_malformed_json_falls_back_to_defaults() {
        let s = merge_raw(SelectionState::default(), "{not json");
        assert_eq!(s, SelectionState::default());
        let s = merge_raw(SelectionState::default(), "[1, 2, 3]");
        assert_eq!(s, SelectionState::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let s = merge_raw(
            SelectionState::default(),
            r#"{"theme": "dark", "selectedRegion": "syd"}"#,
        );
        assert_eq!(s.region_id, "syd");
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let value = serde_json::to_value(PersistedSettings::from(&SelectionState::default())).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "connectionName",
            "authMethod",
            "deploymentTarget",
            "username",
            "selectedRegion",
            "selectedProtocol",
            "accent",
            "animationSpeed",
            "awsVpcId",
            "awsSubnet",
            "awsSecurityGroup",
            "awsCidr",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 12);
        assert_eq!(obj["authMethod"], "credentials");
        assert_eq!(obj["deploymentTarget"], "aws-client-vpn");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));

        let mut selection = SelectionState::default();
        selection.deployment_target = DeploymentTarget::AwsSidecar;
        selection.region_id = "sao".to_string();
        selection.aws.cidr = String::new();
        selection.animation_speed = 2.2;
        selection.connected = true;
        selection.step = 2;
        store.save(&PersistedSettings::from(&selection)).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.deployment_target, DeploymentTarget::AwsSidecar);
        assert_eq!(loaded.region_id, "sao");
        assert_eq!(loaded.aws.cidr, "");
        assert!((loaded.animation_speed - 2.2).abs() < f64::EPSILON);
        // Connection flag and wizard step are never persisted.
        assert!(!loaded.connected);
        assert_eq!(loaded.step, 0);
    }

    #[test]
    fn test_save_overwrites_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"legacy": true, "username": "old"}"#).unwrap();

        let store = SettingsStore::new(&path);
        store
            .save(&PersistedSettings::from(&SelectionState::default()))
            .unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("legacy"));
        assert!(raw.contains("\"username\": \"analyst\""));
    }

    #[test]
    fn test_animation_speed_is_clamped_on_load() {
        let slow = merge_raw(SelectionState::default(), r#"{"animationSpeed": -4}"#);
        assert!((slow.animation_speed - ANIMATION_SPEED_MIN).abs() < f64::EPSILON);

        let fast = merge_raw(SelectionState::default(), r#"{"animationSpeed": 40.5}"#);
        assert!((fast.animation_speed - ANIMATION_SPEED_MAX).abs() < f64::EPSILON);

        let fine = merge_raw(SelectionState::default(), r#"{"animationSpeed": 2.2}"#);
        assert!((fine.animation_speed - 2.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_and_garbage_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load(), SelectionState::default());
        assert!(!store.clear().unwrap());

        std::fs::write(store.path(), "\u{0}\u{1}garbage").unwrap();
        assert_eq!(store.load(), SelectionState::default());
        assert!(store.clear().unwrap());
    }
}
