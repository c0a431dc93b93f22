//! Testing utilities.
//!
//! - `TestHarness` drives an engine with decay disabled and a fixed seed
//! - Helpers to stage a scenario (position, meters, day, tasks)
//! - Assertion helpers over the emitted events

use crate::config::EngineConfig;
use crate::engine::GameEngine;
use crate::event::{GameEvent, LogKind};
use crate::location::LocationId;
use crate::narrative::{NarrativeFlags, NarrativePhase};
use crate::status::Meter;
use std::time::Duration;

/// Seed used by [`TestHarness::new`].
pub const TEST_SEED: u64 = 42;

/// Upper bound on timeline steps taken by [`TestHarness::settle`].
const MAX_SETTLE_STEPS: usize = 1_000;

/// Test harness for running game scenarios.
pub struct TestHarness {
    pub engine: GameEngine,
    /// Every event emitted so far, in order.
    pub events: Vec<GameEvent>,
}

impl TestHarness {
    /// Engine with passive decay disabled and a fixed seed, already started.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::new().without_decay().with_seed(TEST_SEED))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let events = engine.start();
        Self { engine, events }
    }

    fn record(&mut self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        self.events.extend(events.iter().cloned());
        events
    }

    /// Submit a line of input.
    pub fn input(&mut self, text: &str) -> Vec<GameEvent> {
        let events = self.engine.submit(text);
        self.record(events)
    }

    /// Let real time pass.
    pub fn wait(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let events = self.engine.advance(elapsed);
        self.record(events)
    }

    /// Run the timeline until no delayed job is left.
    pub fn settle(&mut self) -> Vec<GameEvent> {
        let mut collected = Vec::new();
        for _ in 0..MAX_SETTLE_STEPS {
            if !self.engine.has_pending_jobs() {
                break;
            }
            let Some(deadline) = self.engine.next_deadline() else {
                break;
            };
            collected.extend(self.engine.advance(deadline));
        }
        self.record(collected)
    }

    /// Submit a line and settle the timeline.
    pub fn run(&mut self, text: &str) -> Vec<GameEvent> {
        let mut events = self.input(text);
        events.extend(self.settle());
        events
    }

    /// Put the soul somewhere directly.
    pub fn place(&mut self, location: LocationId) -> &mut Self {
        self.engine.state_mut().player.position = Some(location);
        self
    }

    pub fn set_meter(&mut self, meter: Meter, value: f32) -> &mut Self {
        self.engine.state_mut().player.status.set(meter, value);
        self
    }

    /// Mark every task of the day done without running the actions.
    pub fn finish_tasks(&mut self) -> &mut Self {
        self.engine.state_mut().tasks.complete_all();
        self
    }

    /// Jump to the morning of `day` and let its opening events play out.
    pub fn goto_day(&mut self, day: u32) -> Vec<GameEvent> {
        self.run(&format!("test.day({day})"))
    }

    /// Finish the current day properly: tasks, body check, bed, sleep.
    pub fn sleep_through(&mut self) -> Vec<GameEvent> {
        self.finish_tasks();
        self.engine
            .state_mut()
            .narrative
            .flags
            .need_check_body = false;
        self.place(LocationId::Bed);
        self.run("sleep()")
    }

    pub fn day(&self) -> u32 {
        self.engine.state().day()
    }

    pub fn position(&self) -> Option<LocationId> {
        self.engine.state().player.position
    }

    pub fn meter(&self, meter: Meter) -> f32 {
        self.engine.state().player.status.get(meter)
    }

    pub fn flags(&self) -> &NarrativeFlags {
        &self.engine.state().narrative.flags
    }

    pub fn phase(&self) -> NarrativePhase {
        self.engine.state().narrative.phase
    }

    pub fn input_enabled(&self) -> bool {
        self.engine.state().input_enabled
    }

    /// Messages of a kind among all recorded events.
    pub fn logs(&self, kind: LogKind) -> Vec<&str> {
        messages(&self.events, kind)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Messages of a kind among `events`.
pub fn messages(events: &[GameEvent], kind: LogKind) -> Vec<&str> {
    events.iter().filter_map(|e| e.log_message(kind)).collect()
}

/// Number of error lines among `events`.
pub fn error_count(events: &[GameEvent]) -> usize {
    events.iter().filter(|e| e.is_error()).count()
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert that some log line of `kind` contains `text`.
#[track_caller]
pub fn assert_logged(events: &[GameEvent], kind: LogKind, text: &str) {
    let found = messages(events, kind);
    assert!(
        found.iter().any(|m| m.contains(text)),
        "Expected a {kind} line containing '{text}', got {found:?}"
    );
}

/// Assert that no error line was emitted.
#[track_caller]
pub fn assert_no_error(events: &[GameEvent]) {
    let errors = messages(events, LogKind::Error);
    assert!(errors.is_empty(), "Expected no errors, got {errors:?}");
}

#[track_caller]
pub fn assert_position(harness: &TestHarness, expected: LocationId) {
    assert_eq!(
        harness.position(),
        Some(expected),
        "Expected the soul at {expected}"
    );
}

#[track_caller]
pub fn assert_meter(harness: &TestHarness, meter: Meter, expected: f32) {
    let actual = harness.meter(meter);
    assert!(
        (actual - expected).abs() < 1e-3,
        "Expected {meter} {expected}, got {actual}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_starts_at_desk() {
        let harness = TestHarness::new();
        assert_position(&harness, LocationId::Desk);
        assert_eq!(harness.day(), 1);
        assert_logged(&harness.events, LogKind::System, "Welcome");
    }

    #[test]
    fn test_settle_runs_delayed_action() {
        let mut harness = TestHarness::new();
        harness.place(LocationId::Bookshelf).set_meter(Meter::Sanity, 50.0);
        let events = harness.input("read()");
        assert_logged(&events, LogKind::System, "Reading a book...");
        assert_meter(&harness, Meter::Sanity, 50.0);

        let events = harness.settle();
        assert_logged(&events, LogKind::System, "Finished reading");
        assert_meter(&harness, Meter::Sanity, 70.0);
    }

    #[test]
    fn test_same_seed_same_tasks() {
        let a = TestHarness::new();
        let b = TestHarness::new();
        assert_eq!(a.engine.state().tasks, b.engine.state().tasks);
    }
}
