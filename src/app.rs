//! Core application state and logic.
//!
//! This module contains the main [`App`] struct that wires the [`Session`] to
//! keyboard input, the telemetry tick, the settings slot, and UI-only state
//! such as the identity-form cursor, toasts, and the map animation phase.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;

use crate::catalog::{self, DeploymentTarget, LAST_STEP, PROTOCOLS, REGIONS};
use crate::clipboard::{self, CopyOutcome};
use crate::constants::{COPY_LABEL_TTL, DEFAULT_TICK_RATE, TELEMETRY_INTERVAL, TOAST_TTL};
use crate::session::{Session, TextField};
use crate::settings::{PersistedSettings, SettingsStore};

/// Rows of the identity step, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentityRow {
    Text(TextField),
    Target,
    Auth,
}

impl IdentityRow {
    /// Rows visible for a target; AWS fields only show for managed targets.
    pub fn rows(target: DeploymentTarget) -> Vec<IdentityRow> {
        let mut rows = vec![
            IdentityRow::Text(TextField::ConnectionName),
            IdentityRow::Target,
            IdentityRow::Auth,
            IdentityRow::Text(TextField::Username),
        ];
        if target.is_managed() {
            rows.extend([
                IdentityRow::Text(TextField::VpcId),
                IdentityRow::Text(TextField::Subnet),
                IdentityRow::Text(TextField::SecurityGroup),
                IdentityRow::Text(TextField::Cidr),
            ]);
        }
        rows
    }
}

/// Current input mode determining keyboard behavior.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode.
    #[default]
    Normal,
    /// A free-text field is being edited.
    Editing {
        field: TextField,
        /// Pending value, committed on Enter.
        buffer: String,
    },
}

/// Toast notification for temporary messages.
#[derive(Clone)]
pub struct Toast {
    /// Message to display.
    pub message: String,
    /// When the toast should disappear.
    pub expires: Instant,
}

/// Main application state container.
pub struct App {
    /// Flag indicating the application should exit.
    pub should_quit: bool,

    /// The simulated tunnel and everything the user selected.
    pub session: Session,

    // === UI State ===
    pub input_mode: InputMode,
    pub show_help: bool,
    /// Whether the protocol step lists full cards or a compact summary.
    pub protocols_expanded: bool,
    pub identity_cursor: usize,
    pub toast: Option<Toast>,
    /// Transient copy-button label and when it reverts.
    pub copy_label: Option<(&'static str, Instant)>,
    /// Position of the packets along the tunnel arcs, in `[0, 1)`.
    pub map_phase: f64,
    pub terminal_size: (u16, u16),

    // === Persistence / Simulation ===
    store: SettingsStore,
    last_saved: PersistedSettings,
    rng: StdRng,
}

impl App {
    /// Creates the app, loading any saved selection from `store`.
    pub fn new(store: SettingsStore, rng: StdRng) -> Self {
        let selection = store.load();
        let last_saved = PersistedSettings::from(&selection);
        tracing::info!(
            path = %store.path().display(),
            deployment = %selection.deployment_target,
            region = %selection.region_id,
            "session started"
        );

        Self {
            should_quit: false,
            session: Session::new(selection, TELEMETRY_INTERVAL),
            input_mode: InputMode::Normal,
            show_help: false,
            protocols_expanded: false,
            identity_cursor: 0,
            toast: None,
            copy_label: None,
            map_phase: 0.0,
            terminal_size: (80, 24),
            store,
            last_saved,
            rng,
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global: Handle Help Toggle
        if self.show_help {
            self.show_help = false;
            return;
        }

        let input_mode = self.input_mode.clone();
        match input_mode {
            InputMode::Editing { field, mut buffer } => {
                self.handle_editing_keys(key, field, &mut buffer);
                if matches!(self.input_mode, InputMode::Editing { .. }) {
                    self.input_mode = InputMode::Editing { field, buffer };
                }
            }
            InputMode::Normal => {
                // Global: Quit
                if key.code == KeyCode::Char('q')
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL))
                {
                    self.should_quit = true;
                    return;
                }
                self.handle_normal_keys(key);
            }
        }

        self.persist_if_changed();
    }

    fn handle_editing_keys(&mut self, key: KeyEvent, field: TextField, buffer: &mut String) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                buffer.clone_into(self.session.text_field_mut(field));
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
    }

    fn handle_normal_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Left | KeyCode::Char('h') => self.session.previous_step(),
            KeyCode::Right | KeyCode::Char('l') => self.session.next_step(),
            KeyCode::Char(c @ '1'..='4') => {
                self.session.set_step(c as usize - '1' as usize);
            }
            KeyCode::Char('n') => self.session.new_connection(),
            KeyCode::Char('c') => self.connect(),
            KeyCode::Char('d') => self.disconnect(),
            KeyCode::Char('i') => self.import_config(),
            KeyCode::Char('t') => self.session.troubleshoot(),
            KeyCode::Char('y') => self.copy_snippet(),
            KeyCode::Char('a') => self.session.cycle_accent(),
            KeyCode::Char('+' | '=') => self.session.adjust_animation_speed(1),
            KeyCode::Char('-') => self.session.adjust_animation_speed(-1),
            KeyCode::Char('e') => self.protocols_expanded = !self.protocols_expanded,
            _ => self.handle_step_keys(key),
        }
    }

    /// Keys whose meaning depends on the active wizard step.
    fn handle_step_keys(&mut self, key: KeyEvent) {
        match self.session.selection.step {
            0 => self.handle_identity_keys(key),
            1 => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.cycle_region(-1),
                KeyCode::Down | KeyCode::Char('j') => self.cycle_region(1),
                _ => {}
            },
            2 => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.cycle_protocol(-1),
                KeyCode::Down | KeyCode::Char('j') => self.cycle_protocol(1),
                _ => {}
            },
            _ => match key.code {
                KeyCode::Enter => self.connect(),
                KeyCode::Char('r') => self.session.set_step(1),
                _ => {}
            },
        }
    }

    fn handle_identity_keys(&mut self, key: KeyEvent) {
        let rows = IdentityRow::rows(self.session.selection.deployment_target);
        self.identity_cursor = self.identity_cursor.min(rows.len().saturating_sub(1));

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.identity_cursor = if self.identity_cursor == 0 {
                    rows.len().saturating_sub(1)
                } else {
                    self.identity_cursor - 1
                };
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.identity_cursor = if self.identity_cursor + 1 >= rows.len() {
                    0
                } else {
                    self.identity_cursor + 1
                };
            }
            KeyCode::Enter | KeyCode::Char(' ') => match rows.get(self.identity_cursor) {
                Some(IdentityRow::Text(field)) => {
                    self.input_mode = InputMode::Editing {
                        field: *field,
                        buffer: self.session.text_field(*field).to_string(),
                    };
                }
                Some(IdentityRow::Target) => {
                    let next = self.session.selection.deployment_target.next();
                    self.session.set_target(next);
                }
                Some(IdentityRow::Auth) => {
                    let next = self.session.selection.auth_method.toggle();
                    self.session.set_auth(next);
                }
                None => {}
            },
            KeyCode::BackTab => {
                if rows.get(self.identity_cursor) == Some(&IdentityRow::Target) {
                    let previous = self.session.selection.deployment_target.previous();
                    self.session.set_target(previous);
                }
            }
            _ => {}
        }
    }

    fn cycle_region(&mut self, delta: isize) {
        let current = catalog::region_index(&self.session.selection.region_id).unwrap_or(0);
        let next = cycle(current, delta, REGIONS.len());
        self.session.set_region(REGIONS[next].id);
    }

    fn cycle_protocol(&mut self, delta: isize) {
        let current = catalog::protocol_index(&self.session.selection.protocol_id).unwrap_or(0);
        let next = cycle(current, delta, PROTOCOLS.len());
        self.session.set_protocol(PROTOCOLS[next].id);
    }

    /// Connect and visualize.
    pub fn connect(&mut self) {
        self.session.connect(Instant::now());
        let region = self.session.selection.region().name;
        self.show_toast(format!("Connected to {region}"));
    }

    pub fn disconnect(&mut self) {
        if self.session.selection.connected {
            self.session.disconnect();
            self.show_toast("Disconnected".to_string());
        }
    }

    fn import_config(&mut self) {
        self.session.import_config();
        self.show_toast("Config imported".to_string());
    }

    fn copy_snippet(&mut self) {
        let snippet = crate::snippet::build(&self.session.selection);
        let outcome = clipboard::copy(&snippet);
        if outcome == CopyOutcome::Unavailable {
            tracing::warn!("no clipboard helper available");
        }
        self.copy_label = Some((outcome.label(), Instant::now() + COPY_LABEL_TTL));
    }

    /// Show a toast notification
    fn show_toast(&mut self, message: String) {
        self.toast = Some(Toast {
            message,
            expires: Instant::now() + TOAST_TTL,
        });
    }

    /// Writes the settings slot whenever a tracked field differs from the last write.
    fn persist_if_changed(&mut self) {
        let current = PersistedSettings::from(&self.session.selection);
        if current == self.last_saved {
            return;
        }
        if let Err(e) = self.store.save(&current) {
            tracing::warn!(path = %self.store.path().display(), error = %e, "unable to save settings");
        }
        self.last_saved = current;
    }

    /// Called on each UI tick
    pub fn on_tick(&mut self) {
        let now = Instant::now();
        self.session.tick(now, &mut self.rng);

        if self.session.selection.connected {
            self.advance_map_phase(Duration::from_millis(DEFAULT_TICK_RATE));
        }

        // Expire toast
        if let Some(ref toast) = self.toast {
            if now > toast.expires {
                self.toast = None;
            }
        }

        if let Some((_, expires)) = self.copy_label {
            if now > expires {
                self.copy_label = None;
            }
        }
    }

    /// Moves the packets by one tick; one full loop takes `animation_speed` seconds.
    fn advance_map_phase(&mut self, elapsed: Duration) {
        let loop_secs = self.session.selection.animation_speed.max(0.1);
        self.map_phase = (self.map_phase + elapsed.as_secs_f64() / loop_secs).fract();
    }

    /// Called when terminal is resized
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    /// Label currently shown on the copy button.
    pub fn copy_button_label(&self) -> &'static str {
        self.copy_label
            .map_or(crate::constants::MSG_COPY_IDLE, |(label, _)| label)
    }

    /// True on the final "Review & launch" step.
    pub fn on_review_step(&self) -> bool {
        self.session.selection.step == LAST_STEP
    }
}

/// Steps `current` by `delta` within `0..len`, wrapping at both ends.
fn cycle(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = isize::try_from(len).unwrap_or(isize::MAX);
    let current = isize::try_from(current).unwrap_or(0);
    usize::try_from((current + delta).rem_euclid(len)).unwrap_or(0)
}
