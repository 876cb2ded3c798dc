//! Simulated tunnel telemetry.
//!
//! Nothing here is measured. While the session is connected a periodic task
//! perturbs a fixed per-target baseline with bounded symmetric noise and
//! clamps the result to sane floors and ceilings.
//!
//! The random source is injected so that callers (and tests) can seed it.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::catalog::DeploymentTarget;
use crate::constants::{LATENCY_FLOOR_MS, LOSS_CEILING, THROUGHPUT_FLOOR_MBPS};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// One telemetry reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    /// Round trip in milliseconds.
    pub latency: f64,
    /// Throughput in Mbps.
    pub throughput: f64,
    /// Packet loss.
    pub loss: f64,
}

impl Metrics {
    /// Fixed starting point for a deployment target, before jitter.
    pub fn baseline(target: DeploymentTarget) -> Self {
        match target {
            DeploymentTarget::Custom => Self {
                latency: 52.0,
                throughput: 180.0,
                loss: 0.28,
            },
            DeploymentTarget::AwsClientVpn => Self {
                latency: 38.0,
                throughput: 215.0,
                loss: 0.18,
            },
            DeploymentTarget::AwsSiteToSite => Self {
                latency: 42.0,
                throughput: 260.0,
                loss: 0.12,
            },
            DeploymentTarget::AwsSidecar => Self {
                latency: 32.0,
                throughput: 240.0,
                loss: 0.14,
            },
        }
    }

    /// Draws one jittered sample around `baseline`.
    ///
    /// Noise bands: latency ±5 and ±1 ms, throughput ±15 and ±5 Mbps, loss ±0.125.
    pub fn jitter<R: Rng + ?Sized>(baseline: Self, rng: &mut R) -> Self {
        Self {
            latency: (baseline.latency + noise(rng, 10.0) + noise(rng, 2.0)).max(LATENCY_FLOOR_MS),
            throughput: (baseline.throughput + noise(rng, 30.0) + noise(rng, 10.0))
                .max(THROUGHPUT_FLOOR_MBPS),
            loss: (baseline.loss + noise(rng, 0.25)).clamp(0.0, LOSS_CEILING),
        }
    }
}

/// Uniform draw from `[-width/2, width/2)`.
fn noise<R: Rng + ?Sized>(rng: &mut R, width: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * width
}

/// The single periodic telemetry task.
///
/// Started and stopped explicitly alongside the connected flag; there is no
/// background thread, the owner polls it from its own tick.
#[derive(Debug)]
pub struct TelemetryTask {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TelemetryTask {
    /// Intervals shorter than a millisecond are raised to one.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            next_due: None,
        }
    }

    /// Schedules the first sample one interval after `now`. No-op if already running.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Cancels the task immediately; later polls never fire.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when a sample is due at `now` and schedules the next one.
    ///
    /// Missed intervals are skipped rather than replayed in a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.interval;
                while next <= now {
                    next += self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }
}
