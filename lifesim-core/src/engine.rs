//! The game engine facade.
//!
//! [`GameEngine`] owns the whole simulation. Drivers feed it two things:
//! submitted input lines ([`GameEngine::submit`]) and elapsed real time
//! ([`GameEngine::advance`]). Both return the [`GameEvent`]s the
//! presentation layer should show.

use crate::command::{Command, Gate};
use crate::config::EngineConfig;
use crate::event::{GameEvent, LogKind, StatusBars};
use crate::help::{self, Tutorial, TutorialStep};
use crate::narrative::{NarrativePhase, Sequence};
use crate::rules::{apply_effect, Dirty, Effect, RuleViolation, RulesEngine};
use crate::schedule::day_schedule;
use crate::state::GameState;
use crate::task::TaskSet;
use crate::timeline::{Fired, Job, JobKind, Timeline};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, debug_span, trace};

pub struct GameEngine {
    pub(crate) config: EngineConfig,
    pub(crate) rules: RulesEngine,
    pub(crate) state: GameState,
    pub(crate) timeline: Timeline,
    pub(crate) rng: StdRng,
    pub(crate) dirty: Dirty,
    pub(crate) outbox: Vec<GameEvent>,
}

impl GameEngine {
    /// Build a new game on the morning of day 1.
    pub fn new(config: EngineConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let tasks = TaskSet::generate(1, &mut rng);
        let start = day_schedule(1, None).start;
        let state = GameState::new(tasks, start);
        debug!(session = %state.session_id, ?config, "engine created");

        Self {
            rules: RulesEngine::new(config.clone()),
            timeline: Timeline::new(config.tick_period),
            config,
            state,
            rng,
            dirty: Dirty::default(),
            outbox: Vec::new(),
        }
    }

    /// Welcome banner plus a full render of every view.
    pub fn start(&mut self) -> Vec<GameEvent> {
        let location = format!("Current location: {}", self.state.player.position_name());
        for line in [
            help::WELCOME,
            "Type \"help\" for available commands",
            "Type \"tutorial\" to view the tutorial",
            location.as_str(),
            help::MAP_LEGEND,
        ] {
            self.emit_log(LogKind::System, line);
        }
        self.dirty.merge(Dirty::all());
        self.flush();
        self.take_events()
    }

    /// Interpret one line of player input.
    pub fn submit(&mut self, raw: &str) -> Vec<GameEvent> {
        let input = raw.trim();
        if input.is_empty() && self.state.tutorial.is_none() {
            return Vec::new();
        }
        let span = debug_span!("submit", session = %self.state.session_id, day = self.state.day());
        let _enter = span.enter();

        if self.state.tutorial.is_some() {
            self.advance_tutorial();
            return self.take_events();
        }

        let command = Command::parse(input);
        let gate = Gate::current(&self.state);
        if gate == Gate::Closed {
            debug!(%command, "input ignored after the ending");
            return Vec::new();
        }

        self.outbox.push(GameEvent::Echo {
            input: raw.to_string(),
        });
        debug!(%command, ?gate, "dispatch");

        let outcome = gate
            .check(&command)
            .and_then(|_| self.rules.resolve(&self.state, &command));
        match outcome {
            Ok(resolution) => self.apply_all(resolution.effects),
            Err(violation) => self.report(violation),
        }
        self.flush();
        self.take_events()
    }

    /// Let `elapsed` real time pass, firing ticks and due jobs in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let until = self.timeline.now() + elapsed;
        while let Some(fired) = self.timeline.pop_due(until) {
            match fired {
                Fired::Tick => self.decay_tick(),
                Fired::Job(job) => self.run_job(job),
            }
            self.flush();
        }
        self.timeline.settle(until);
        self.take_events()
    }

    /// Real time until the next tick or job is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeline.next_deadline()
    }

    /// Whether delayed effects are still waiting on the timeline.
    pub fn has_pending_jobs(&self) -> bool {
        self.timeline.has_pending_jobs()
    }

    pub fn pending_jobs(&self, kind: JobKind) -> usize {
        self.timeline.pending(kind)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for test setup and debug tooling.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The game reached its ending.
    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    /// Current status bars.
    pub fn status_bars(&self) -> StatusBars {
        StatusBars::from(&self.state.player.status)
    }

    fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub(crate) fn emit_log(&mut self, kind: LogKind, message: impl Into<String>) {
        self.outbox.push(GameEvent::log(kind, message));
    }

    fn report(&mut self, violation: RuleViolation) {
        debug!(%violation, "rule violation");
        self.emit_log(LogKind::Error, violation.to_string());
        if let Some(hint) = violation.hint() {
            self.emit_log(LogKind::System, hint);
        }
    }

    /// Emit one update per invalidated view.
    pub(crate) fn flush(&mut self) {
        let dirty = std::mem::take(&mut self.dirty);
        if dirty.status {
            let bars = self.status_bars();
            self.outbox.push(GameEvent::StatusBars(bars));
        }
        if dirty.tasks {
            let snapshot = self.state.tasks.snapshot();
            self.outbox.push(GameEvent::Tasks(snapshot));
        }
        if dirty.map {
            let (position, entity) = (self.state.player.position, self.state.narrative.entity);
            self.outbox.push(GameEvent::MapRedraw { position, entity });
        }
        if dirty.clock {
            let clock = self.state.clock;
            self.outbox.push(GameEvent::Clock(clock));
        }
    }

    fn decay_tick(&mut self) {
        if self.state.game_over || self.state.narrative.phase == NarrativePhase::Terminated {
            return;
        }
        let low = self.state.player.status.decay();
        self.state.clock.tick();
        self.dirty.status = true;
        self.dirty.clock = true;
        trace!(clock = %self.state.clock, "decay tick");
        for meter in low {
            if let Some(warning) = meter.low_warning() {
                self.emit_log(LogKind::Warning, warning);
            }
        }
    }

    fn run_job(&mut self, job: Job) {
        if let Some(guard) = job.guard {
            if self.state.narrative.phase != guard {
                debug!(?guard, phase = ?self.state.narrative.phase, "stale story beat dropped");
                return;
            }
        }
        trace!(kind = ?job.kind, effects = job.effects.len(), "job fired");
        self.apply_all(job.effects);
    }

    pub(crate) fn apply_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Log { kind, message } => self.emit_log(kind, message),
            Effect::Transcript(line) => self.outbox.push(GameEvent::transcript(line)),
            Effect::SetInputEnabled(enabled) => {
                if self.state.input_enabled != enabled {
                    self.state.input_enabled = enabled;
                    self.outbox.push(GameEvent::InputEnabled { enabled });
                }
            }
            Effect::Schedule {
                delay,
                kind,
                guard,
                effects,
            } => {
                self.timeline
                    .schedule(delay, Job::new(kind, effects).with_guard(guard));
            }
            Effect::RunSequence(sequence) => self.run_sequence(sequence),
            Effect::EndDay => self.end_day(),
            Effect::StartDay(day) => self.start_day(day),
            Effect::JumpToDay(day) => self.jump_to_day(day),
            Effect::StartTutorial => {
                self.state.tutorial = Some(Tutorial::new());
                self.emit_log(LogKind::System, help::TUTORIAL_INTRO);
                self.advance_tutorial();
            }
            Effect::GameOver => {
                self.state.game_over = true;
                self.outbox.push(GameEvent::GameOver);
            }
            other => {
                let dirty = apply_effect(&mut self.state, &other);
                self.dirty.merge(dirty);
                if dirty.task_completed {
                    self.on_task_completed();
                }
            }
        }
    }

    /// Queue a scripted sequence. Steps are spaced by their delays; a leading
    /// step with no delay runs right away.
    pub(crate) fn run_sequence(&mut self, sequence: Sequence) {
        debug!(?sequence, "sequence started");
        let timing = self.config.narrative_timing();
        let mut offset = Duration::ZERO;
        for step in sequence.steps(&timing) {
            offset += step.delay;
            if offset.is_zero() {
                self.apply_all(step.effects);
            } else {
                self.timeline.schedule(
                    offset,
                    Job::new(JobKind::Narrative, step.effects).with_guard(step.guard),
                );
            }
        }
    }

    fn advance_tutorial(&mut self) {
        let Some(tutorial) = self.state.tutorial.as_mut() else {
            return;
        };
        match tutorial.advance() {
            TutorialStep::Lines(lines) => {
                for line in lines {
                    self.emit_log(LogKind::Tutorial, line);
                }
            }
            TutorialStep::Finished => {
                self.state.tutorial = None;
                for line in help::TUTORIAL_DONE {
                    self.emit_log(LogKind::System, line);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationId;
    use crate::status::Meter;

    fn engine() -> GameEngine {
        GameEngine::new(EngineConfig::new().without_decay().with_seed(7))
    }

    #[test]
    fn test_start_renders_everything() {
        let mut engine = engine();
        let events = engine.start();
        assert_eq!(
            events[0].log_message(LogKind::System),
            Some(help::WELCOME)
        );
        assert!(events.iter().any(|e| matches!(e, GameEvent::StatusBars(_))));
        assert!(events.iter().any(|e| matches!(e, GameEvent::Tasks(_))));
        assert!(events.contains(&GameEvent::MapRedraw {
            position: Some(LocationId::Desk),
            entity: None,
        }));
    }

    #[test]
    fn test_submit_echoes_first() {
        let mut engine = engine();
        let events = engine.submit("dance()");
        assert_eq!(
            events[0],
            GameEvent::Echo {
                input: "dance()".to_string()
            }
        );
        assert_eq!(
            events[1].log_message(LogKind::Error),
            Some("Unknown command: dance")
        );
    }

    #[test]
    fn test_echo_keeps_raw_input() {
        let mut engine = engine();
        let events = engine.submit("  status()  ");
        assert_eq!(
            events[0],
            GameEvent::Echo {
                input: "  status()  ".to_string()
            }
        );
    }

    #[test]
    fn test_disabled_input_is_echoed_then_rejected() {
        let mut engine = engine();
        engine.state_mut().input_enabled = false;
        let events = engine.submit("eat()");
        assert_eq!(
            events[0],
            GameEvent::Echo {
                input: "eat()".to_string()
            }
        );
        assert_eq!(
            events[1].log_message(LogKind::Error),
            Some("Input is disabled")
        );
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut engine = engine();
        assert!(engine.submit("   ").is_empty());
    }

    #[test]
    fn test_decay_tick_warns() {
        let mut engine = GameEngine::new(
            EngineConfig::new()
                .with_tick_period(Some(Duration::from_secs(60)))
                .with_seed(7),
        );
        engine.state_mut().player.status.set(Meter::Hunger, 20.0);
        let events = engine.advance(Duration::from_secs(60));
        assert!(events
            .iter()
            .any(|e| e.log_message(LogKind::Warning) == Some("Hunger level critical")));
        assert_eq!(engine.state().clock.minute, 10);
        assert_eq!(engine.state().player.status.get(Meter::Hunger), 19.0);
    }

    #[test]
    fn test_tutorial_swallows_input() {
        let mut engine = engine();
        engine.submit("tutorial");
        assert!(engine.state().tutorial.is_some());
        let events = engine.submit("eat()");
        assert!(events.iter().all(|e| matches!(
            e,
            GameEvent::Log {
                kind: LogKind::Tutorial,
                ..
            }
        )));
    }
}
