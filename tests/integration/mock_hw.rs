//! Mock hardware adapters for integration tests.
//!
//! Records every relay write so tests can assert on the full command
//! history without touching real GPIO registers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use humidistat::app::events::AppEvent;
use humidistat::app::ports::{ActuatorPort, EnvironmentReading, EventSink, SensorPort};
use humidistat::error::SensorError;

// ── MockRelay ─────────────────────────────────────────────────

/// Relay whose write history stays readable after the humidistat takes
/// ownership (clones share the log).
#[derive(Clone, Default)]
pub struct MockRelay {
    writes: Rc<RefCell<Vec<bool>>>,
}

#[allow(dead_code)]
impl MockRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<bool> {
        self.writes.borrow().clone()
    }

    pub fn is_on(&self) -> bool {
        self.writes.borrow().last().copied().unwrap_or(false)
    }
}

impl ActuatorPort for MockRelay {
    fn write(&mut self, on: bool) {
        self.writes.borrow_mut().push(on);
    }
}

// ── MockSensor ────────────────────────────────────────────────

/// Hygrometer that replays queued results, then falls back to a steady
/// reading.
pub struct MockSensor {
    queue: VecDeque<Result<EnvironmentReading, SensorError>>,
    steady: EnvironmentReading,
}

#[allow(dead_code)]
impl MockSensor {
    pub fn constant(humidity: f32) -> Self {
        Self {
            queue: VecDeque::new(),
            steady: reading(humidity),
        }
    }

    pub fn push(&mut self, humidity: f32) {
        self.queue.push_back(Ok(reading(humidity)));
    }

    pub fn push_fault(&mut self, e: SensorError) {
        self.queue.push_back(Err(e));
    }

    pub fn set(&mut self, humidity: f32) {
        self.queue.clear();
        self.steady = reading(humidity);
    }
}

pub fn reading(humidity: f32) -> EnvironmentReading {
    EnvironmentReading {
        humidity_percent: humidity,
        temperature: Some(21.0),
    }
}

impl SensorPort for MockSensor {
    fn read(&mut self) -> Result<EnvironmentReading, SensorError> {
        self.queue.pop_front().unwrap_or(Ok(self.steady))
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn state_changes(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { running } => Some(*running),
                _ => None,
            })
            .collect()
    }

    pub fn telemetry_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Telemetry(_)))
            .count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
