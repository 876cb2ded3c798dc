//! Terminal event loop.
//!
//! A background thread polls crossterm for input and emits a [`Event::Tick`]
//! at a fixed rate. The main loop receives everything over one MPSC channel.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Events delivered to the main loop.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Periodic tick for animation and telemetry.
    Tick,
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
}

/// Owns the receiving side of the event channel.
pub struct EventHandler {
    rx: Receiver<Event>,
}

impl EventHandler {
    /// Spawns the input thread with a tick every `tick_rate_ms` milliseconds.
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(ev) = forwarded {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    if tx.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx }
    }

    /// Blocks until the next event.
    ///
    /// # Errors
    ///
    /// Returns an error if the input thread has stopped.
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}
