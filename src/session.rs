//! Session state and its transitions.
//!
//! [`Session`] is the single owner of everything the user can change plus the
//! derived simulation state (metrics, diagnostics). Target and region changes
//! are expressed as explicit [`SelectionChange`] events that are consumed
//! exactly once, so preset adoption never depends on cached "previous" values.

use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;

use crate::catalog::{self, DeploymentTarget, LAST_STEP};
use crate::constants::{
    ACCENT_PALETTE, ANIMATION_SPEED_MAX, ANIMATION_SPEED_MIN, ANIMATION_SPEED_STEP, MSG_IMPORTED,
};
use crate::diagnostics;
use crate::presets::{self, PresetBundle};
use crate::telemetry::{Metrics, TelemetryTask};

/// How the user signs in to the tunnel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// Username and password.
    #[default]
    Credentials,
    /// Public/private key pair.
    Keys,
}

impl AuthMethod {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "credentials" => Some(AuthMethod::Credentials),
            "keys" => Some(AuthMethod::Keys),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            AuthMethod::Credentials => AuthMethod::Keys,
            AuthMethod::Keys => AuthMethod::Credentials,
        }
    }

    /// Label of the free-text identity field for this method.
    pub fn identity_label(self) -> &'static str {
        match self {
            AuthMethod::Credentials => "Username",
            AuthMethod::Keys => "Key comment",
        }
    }
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMethod::Credentials => write!(f, "Username & password"),
            AuthMethod::Keys => write!(f, "Public/private keys"),
        }
    }
}

/// User-editable AWS identifiers. Pre-filled from presets, freely overridable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AwsFields {
    pub vpc_id: String,
    pub subnet: String,
    pub security_group: String,
    pub cidr: String,
}

impl Default for AwsFields {
    fn default() -> Self {
        Self {
            vpc_id: "vpc-0abc1234".to_string(),
            subnet: "subnet-0ff45e2a".to_string(),
            security_group: "sg-0d931ac1".to_string(),
            cidr: "10.20.0.0/16".to_string(),
        }
    }
}

impl AwsFields {
    /// Overwrites each field the bundle populates; absent fields are left alone.
    pub fn adopt(&mut self, bundle: PresetBundle) {
        if let Some(vpc) = bundle.vpc_id() {
            vpc.clone_into(&mut self.vpc_id);
        }
        if let Some(subnet) = bundle.subnet_id() {
            subnet.clone_into(&mut self.subnet);
        }
        if let Some(sg) = bundle.security_group_id() {
            sg.clone_into(&mut self.security_group);
        }
        if let Some(cidr) = bundle.cidr() {
            cidr.clone_into(&mut self.cidr);
        }
    }
}

/// The user's current choices.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionState {
    pub connection_name: String,
    pub auth_method: AuthMethod,
    /// Username, or key comment when using keys.
    pub username: String,
    pub deployment_target: DeploymentTarget,
    pub region_id: String,
    pub protocol_id: String,
    pub aws: AwsFields,
    /// Accent colour as `#rrggbb`.
    pub accent: String,
    /// Pulse loop length in seconds.
    pub animation_speed: f64,
    pub connected: bool,
    pub step: usize,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            connection_name: "Training Lab Tunnel".to_string(),
            auth_method: AuthMethod::Credentials,
            username: "analyst".to_string(),
            deployment_target: DeploymentTarget::AwsClientVpn,
            region_id: "ams".to_string(),
            protocol_id: "wireguard".to_string(),
            aws: AwsFields::default(),
            accent: ACCENT_PALETTE[0].to_string(),
            animation_speed: 1.4,
            connected: false,
            step: 0,
        }
    }
}

impl SelectionState {
    pub fn region(&self) -> &'static catalog::Region {
        catalog::region(&self.region_id)
    }

    pub fn protocol(&self) -> &'static catalog::Protocol {
        catalog::protocol(&self.protocol_id)
    }
}

/// A discrete change of target or region, carrying both old and new values.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionChange {
    Target {
        from: DeploymentTarget,
        to: DeploymentTarget,
    },
    Region {
        from: String,
        to: String,
    },
}

impl SelectionChange {
    /// True when the value actually moved.
    pub fn is_transition(&self) -> bool {
        match self {
            SelectionChange::Target { from, to } => from != to,
            SelectionChange::Region { from, to } => from != to,
        }
    }
}

/// Free-text fields of the identity step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    ConnectionName,
    Username,
    VpcId,
    Subnet,
    SecurityGroup,
    Cidr,
}

/// One running visualizer session.
#[derive(Debug)]
pub struct Session {
    pub selection: SelectionState,
    pub metrics: Metrics,
    /// Replaced wholesale by connect, import and troubleshoot.
    pub diagnostics: Vec<String>,
    pub imported_config: bool,
    /// When the current simulated connection began.
    pub connected_since: Option<Instant>,
    telemetry: TelemetryTask,
}

impl Session {
    /// Builds a session from an initial selection.
    ///
    /// The initial selection is not a transition, so its AWS fields are kept as given.
    pub fn new(selection: SelectionState, telemetry_interval: Duration) -> Self {
        let metrics = Metrics::baseline(selection.deployment_target);
        Self {
            selection: SelectionState {
                connected: false,
                ..selection
            },
            metrics,
            diagnostics: Vec::new(),
            imported_config: false,
            connected_since: None,
            telemetry: TelemetryTask::new(telemetry_interval),
        }
    }

    /// Switches deployment target and resets metrics to its baseline.
    pub fn set_target(&mut self, target: DeploymentTarget) {
        let change = SelectionChange::Target {
            from: self.selection.deployment_target,
            to: target,
        };
        self.selection.deployment_target = target;
        self.metrics = Metrics::baseline(target);
        self.apply_change(&change);
    }

    pub fn set_region(&mut self, region_id: &str) {
        let change = SelectionChange::Region {
            from: std::mem::replace(&mut self.selection.region_id, region_id.to_string()),
            to: region_id.to_string(),
        };
        self.apply_change(&change);
    }

    pub fn set_protocol(&mut self, protocol_id: &str) {
        protocol_id.clone_into(&mut self.selection.protocol_id);
    }

    pub fn set_auth(&mut self, method: AuthMethod) {
        self.selection.auth_method = method;
    }

    /// Mutable access to a free-text field; edits are never overwritten
    /// except by a later target/region transition.
    pub fn text_field_mut(&mut self, field: TextField) -> &mut String {
        let s = &mut self.selection;
        match field {
            TextField::ConnectionName => &mut s.connection_name,
            TextField::Username => &mut s.username,
            TextField::VpcId => &mut s.aws.vpc_id,
            TextField::Subnet => &mut s.aws.subnet,
            TextField::SecurityGroup => &mut s.aws.security_group,
            TextField::Cidr => &mut s.aws.cidr,
        }
    }

    pub fn text_field(&self, field: TextField) -> &str {
        let s = &self.selection;
        match field {
            TextField::ConnectionName => &s.connection_name,
            TextField::Username => &s.username,
            TextField::VpcId => &s.aws.vpc_id,
            TextField::Subnet => &s.aws.subnet,
            TextField::SecurityGroup => &s.aws.security_group,
            TextField::Cidr => &s.aws.cidr,
        }
    }

    /// Consumes a change event, adopting preset defaults on a real transition.
    fn apply_change(&mut self, change: &SelectionChange) {
        if !change.is_transition() {
            return;
        }
        let target = self.selection.deployment_target;
        let region_code = self.selection.region().aws_region;
        if let Some(bundle) = presets::resolve_defaults(target, region_code) {
            tracing::debug!(?change, preset_region = bundle.region(), "adopting AWS preset");
            self.selection.aws.adopt(bundle);
        }
    }

    /// Starts the simulated tunnel and replaces diagnostics with the connect report.
    pub fn connect(&mut self, now: Instant) {
        self.selection.step = LAST_STEP;
        self.imported_config = false;
        if !self.selection.connected {
            self.connected_since = Some(now);
        }
        self.selection.connected = true;
        self.telemetry.start(now);
        self.diagnostics = diagnostics::connect(
            self.selection.deployment_target,
            &self.selection.aws,
            self.selection.region(),
        );
        tracing::info!(
            deployment = %self.selection.deployment_target,
            region = self.selection.region().name,
            "simulated tunnel connected"
        );
    }

    /// Stops the tunnel. Metrics keep their last value.
    pub fn disconnect(&mut self) {
        if self.selection.connected {
            tracing::info!("simulated tunnel disconnected");
        }
        self.selection.connected = false;
        self.connected_since = None;
        self.telemetry.stop();
    }

    pub fn import_config(&mut self) {
        self.imported_config = true;
        self.selection.step = LAST_STEP;
        self.disconnect();
        self.diagnostics = vec![MSG_IMPORTED.to_string()];
        tracing::info!("existing config imported");
    }

    pub fn troubleshoot(&mut self) {
        self.diagnostics = diagnostics::troubleshoot(self.selection.deployment_target);
        tracing::info!(deployment = %self.selection.deployment_target, "troubleshooting checks run");
    }

    /// Jumps back to the first wizard step.
    pub fn new_connection(&mut self) {
        self.selection.step = 0;
    }

    pub fn set_step(&mut self, step: usize) {
        self.selection.step = step.min(LAST_STEP);
    }

    pub fn next_step(&mut self) {
        self.set_step(self.selection.step + 1);
    }

    pub fn previous_step(&mut self) {
        self.set_step(self.selection.step.saturating_sub(1));
    }

    /// Cycles the accent through the palette. Unknown accents restart the cycle.
    pub fn cycle_accent(&mut self) {
        let next = ACCENT_PALETTE
            .iter()
            .position(|c| c.eq_ignore_ascii_case(&self.selection.accent))
            .map_or(0, |i| (i + 1) % ACCENT_PALETTE.len());
        self.selection.accent = ACCENT_PALETTE[next].to_string();
    }

    /// Nudges the animation speed by `steps` increments, staying within range.
    pub fn adjust_animation_speed(&mut self, steps: i32) {
        let speed = self.selection.animation_speed + f64::from(steps) * ANIMATION_SPEED_STEP;
        let speed = (speed * 10.0).round() / 10.0;
        self.selection.animation_speed = speed.clamp(ANIMATION_SPEED_MIN, ANIMATION_SPEED_MAX);
    }

    /// Advances the telemetry task; returns true when a new sample was drawn.
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> bool {
        if !self.selection.connected || !self.telemetry.poll(now) {
            return false;
        }
        self.metrics = Metrics::jitter(Metrics::baseline(self.selection.deployment_target), rng);
        true
    }

    pub fn telemetry_running(&self) -> bool {
        self.telemetry.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LATENCY_FLOOR_MS, LOSS_CEILING, THROUGHPUT_FLOOR_MBPS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const INTERVAL: Duration = Duration::from_millis(1400);

    fn session() -> Session {
        Session::new(SelectionState::default(), INTERVAL)
    }

    #[test]
    fn test_defaults() {
        let s = session();
        assert_eq!(s.selection.deployment_target, DeploymentTarget::AwsClientVpn);
        assert_eq!(s.selection.aws.vpc_id, "vpc-0abc1234");
        assert_eq!(s.metrics, Metrics::baseline(DeploymentTarget::AwsClientVpn));
        assert!(s.diagnostics.is_empty());
        assert!(!s.telemetry_running());
    }

    #[test]
    fn test_target_change_resets_metrics_to_baseline() {
        let mut s = session();
        s.set_target(DeploymentTarget::AwsSidecar);
        assert_eq!(
            s.metrics,
            Metrics {
                latency: 32.0,
                throughput: 240.0,
                loss: 0.14
            }
        );
    }

    #[test]
    fn test_target_change_resets_metrics_while_connected() {
        let t0 = Instant::now();
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = session();
        s.connect(t0);
        assert!(s.tick(t0 + INTERVAL, &mut rng));
        s.set_target(DeploymentTarget::Custom);
        assert_eq!(s.metrics, Metrics::baseline(DeploymentTarget::Custom));
        assert!(s.telemetry_running());
    }

    #[test]
    fn test_target_change_adopts_preset_for_region() {
        let mut s = session();
        s.set_target(DeploymentTarget::AwsSiteToSite);
        // ams -> eu-west-1
        assert_eq!(s.selection.aws.vpc_id, "vpc-0e12aa10");
        assert_eq!(s.selection.aws.cidr, "169.254.12.0/30");
        // Site-to-site has no subnet or security group; earlier values stay.
        assert_eq!(s.selection.aws.subnet, "subnet-0ff45e2a");
        assert_eq!(s.selection.aws.security_group, "sg-0d931ac1");
    }

    #[test]
    fn test_region_change_adopts_preset() {
        let mut s = session();
        s.set_region("nyc");
        assert_eq!(s.selection.aws.vpc_id, "vpc-0ba9cd31");
        assert_eq!(s.selection.aws.subnet, "subnet-0c91d2b3");
        assert_eq!(s.selection.aws.security_group, "sg-0123ab45");
        assert_eq!(s.selection.aws.cidr, "10.20.0.0/16");
    }

    #[test]
    fn test_same_value_is_not_a_transition() {
        let mut s = session();
        s.text_field_mut(TextField::VpcId).push_str("-edited");
        s.set_region("ams");
        s.set_target(DeploymentTarget::AwsClientVpn);
        assert_eq!(s.selection.aws.vpc_id, "vpc-0abc1234-edited");
    }

    #[test]
    fn test_manual_edits_survive_unrelated_changes() {
        let mut s = session();
        s.set_region("nyc");
        *s.text_field_mut(TextField::Cidr) = "192.168.0.0/24".to_string();
        s.set_protocol("openvpn");
        s.set_auth(AuthMethod::Keys);
        s.cycle_accent();
        assert_eq!(s.selection.aws.cidr, "192.168.0.0/24");
    }

    #[test]
    fn test_custom_target_keeps_aws_fields() {
        let mut s = session();
        let before = s.selection.aws.clone();
        s.set_target(DeploymentTarget::Custom);
        s.set_region("syd");
        assert_eq!(s.selection.aws, before);
    }

    #[test]
    fn test_ticks_only_while_connected() {
        let t0 = Instant::now();
        let mut rng = StdRng::seed_from_u64(9);
        let mut s = session();
        assert!(!s.tick(t0 + INTERVAL * 3, &mut rng));
        assert_eq!(s.metrics, Metrics::baseline(DeploymentTarget::AwsClientVpn));

        s.connect(t0);
        let mut now = t0;
        for _ in 0..200 {
            now += INTERVAL;
            assert!(s.tick(now, &mut rng));
            assert!(s.metrics.latency >= LATENCY_FLOOR_MS);
            assert!(s.metrics.throughput >= THROUGHPUT_FLOOR_MBPS);
            assert!((0.0..=LOSS_CEILING).contains(&s.metrics.loss));
        }
    }

    #[test]
    fn test_disconnect_freezes_metrics() {
        let t0 = Instant::now();
        let mut rng = StdRng::seed_from_u64(11);
        let mut s = session();
        s.connect(t0);
        assert!(s.tick(t0 + INTERVAL, &mut rng));
        let frozen = s.metrics;

        s.disconnect();
        assert!(!s.telemetry_running());
        for i in 2..20 {
            assert!(!s.tick(t0 + INTERVAL * i, &mut rng));
        }
        assert_eq!(s.metrics, frozen);
    }

    #[test]
    fn test_tick_reads_current_target_baseline() {
        let t0 = Instant::now();
        let mut rng = StdRng::seed_from_u64(5);
        let mut s = session();
        s.connect(t0);
        s.set_target(DeploymentTarget::AwsSiteToSite);
        assert!(s.tick(t0 + INTERVAL, &mut rng));
        assert!((s.metrics.throughput - 260.0).abs() <= 20.0);
    }

    #[test]
    fn test_connect_moves_to_review_and_replaces_diagnostics() {
        let mut s = session();
        s.troubleshoot();
        s.imported_config = true;
        s.connect(Instant::now());
        assert_eq!(s.selection.step, LAST_STEP);
        assert!(!s.imported_config);
        assert!(s.selection.connected);
        assert_eq!(s.diagnostics.len(), 6);
        assert!(s.diagnostics[0].contains("vpc-0abc1234"));
    }

    #[test]
    fn test_site_to_site_singapore_connect_report() {
        let mut s = session();
        s.set_target(DeploymentTarget::AwsSiteToSite);
        s.set_region("sin");
        s.connect(Instant::now());
        assert_eq!(s.diagnostics.len(), 6);
        assert!(s.diagnostics[0].contains("IPsec phase 1/2 established"));
        assert!(s.diagnostics[1].contains("Singapore"));
        assert!(s.diagnostics[2].contains("Key exchange succeeded"));
        assert!(s.diagnostics[3].contains("Gateway responds"));
        assert!(s.diagnostics[4].contains("no leaks detected"));
        assert!(s.diagnostics[5].contains("Suggested MTU"));
    }

    #[test]
    fn test_import_disconnects_and_replaces_diagnostics() {
        let mut s = session();
        s.connect(Instant::now());
        s.import_config();
        assert!(!s.selection.connected);
        assert!(!s.telemetry_running());
        assert!(s.imported_config);
        assert_eq!(s.selection.step, LAST_STEP);
        assert_eq!(s.diagnostics, vec![MSG_IMPORTED.to_string()]);
    }

    #[test]
    fn test_troubleshoot_replaces_not_appends() {
        let mut s = session();
        s.connect(Instant::now());
        s.troubleshoot();
        assert_eq!(s.diagnostics.len(), 7);
        assert!(s.diagnostics[0].starts_with("⚠️ Verify SG"));
    }

    #[test]
    fn test_step_navigation_is_clamped() {
        let mut s = session();
        s.previous_step();
        assert_eq!(s.selection.step, 0);
        s.set_step(99);
        assert_eq!(s.selection.step, LAST_STEP);
        s.next_step();
        assert_eq!(s.selection.step, LAST_STEP);
        s.new_connection();
        assert_eq!(s.selection.step, 0);
    }

    #[test]
    fn test_animation_speed_bounds() {
        let mut s = session();
        s.adjust_animation_speed(100);
        assert!((s.selection.animation_speed - ANIMATION_SPEED_MAX).abs() < f64::EPSILON);
        s.adjust_animation_speed(-100);
        assert!((s.selection.animation_speed - ANIMATION_SPEED_MIN).abs() < f64::EPSILON);
        s.adjust_animation_speed(3);
        assert!((s.selection.animation_speed - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_accent_cycle() {
        let mut s = session();
        s.cycle_accent();
        assert_eq!(s.selection.accent, ACCENT_PALETTE[1]);
        s.selection.accent = "#123456".to_string();
        s.cycle_accent();
        assert_eq!(s.selection.accent, ACCENT_PALETTE[0]);
    }

    #[test]
    fn test_auth_method_ids() {
        assert_eq!(AuthMethod::from_id("keys"), Some(AuthMethod::Keys));
        assert_eq!(AuthMethod::from_id("password"), None);
        assert_eq!(AuthMethod::Keys.toggle(), AuthMethod::Credentials);
    }
}
