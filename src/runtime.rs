use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

pub const DEFAULT_TICK_MS: u64 = 100;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TimerEvent {
    Key(KeyEvent),
    Resize,
    /// The terminal regained focus; treated as "visible again"
    FocusGained,
    Tick,
    /// The event source is gone; no further input can arrive
    Disconnected,
}

/// Source of terminal events (keyboard, resize, focus)
pub trait TimerEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TimerEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    Some(TimerEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => Some(TimerEvent::Resize),
                Ok(CtEvent::FocusGained) => Some(TimerEvent::FocusGained),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!(error = %err, "terminal event reader stopped");
                    break;
                }
            };

            if let Some(evt) = evt {
                if tx.send(evt).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::from_millis(DEFAULT_TICK_MS)
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-backed event source for headless runs
pub struct ChannelEventSource {
    rx: Receiver<TimerEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<TimerEvent>) -> Self {
        Self { rx }
    }
}

impl TimerEventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time.
///
/// A tick is only a prompt to recompute; the controller reads the clock
/// itself, so ticks arriving late or being starved by key events is harmless.
pub struct Runner<E: TimerEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: TimerEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout.
    /// Returns Disconnected without waiting once the source has hung up.
    pub fn step(&self) -> TimerEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => TimerEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => TimerEvent::Disconnected,
        }
    }
}
