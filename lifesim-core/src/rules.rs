//! Action resolution.
//!
//! Commands are resolved against an immutable view of the [`GameState`]
//! into a [`Resolution`]: a list of [`Effect`]s, some immediate and some
//! scheduled for later. A command that breaks a rule produces a
//! [`RuleViolation`] instead and nothing is applied, so every handler is
//! all-or-nothing.

use crate::action::Action;
use crate::command::Command;
use crate::config::EngineConfig;
use crate::event::LogKind;
use crate::help;
use crate::location::{room_names, LocationId};
use crate::narrative::{FlagChange, NarrativePhase, Sequence, StoryBranch};
use crate::schedule::{BODY_CHECK_FROM_DAY, CLUE_DAY};
use crate::state::GameState;
use crate::status::{format_percent, Meter, HUNGER_GATE, SANITY_GATE};
use crate::timeline::JobKind;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// A player-facing rule violation. The `Display` text is the ERROR line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("Must be at {location} to {requirement}")]
    WrongLocation {
        location: LocationId,
        requirement: &'static str,
    },

    #[error("Too hungry to focus. Eat or cook something first")]
    TooHungry,

    #[error("Mental state too unstable to work")]
    TooUnstable,

    #[error("Please specify a location")]
    MissingLocation,

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Your body is no longer at the DESK. scan() the study for clues instead")]
    BodyMissing,

    #[error("Cannot sleep yet. You still have uncompleted tasks!")]
    TasksRemaining,

    #[error("You should check on your body first. Go to the DESK and checkBody()")]
    MustCheckBody,

    #[error("You are already asleep")]
    AlreadyAsleep,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("You can't move. hide() or lock()")]
    ChoiceRequired,

    #[error("There is no time for that. grab() or stab()")]
    FinalOnly,

    #[error("Input is disabled")]
    InputDisabled,

    #[error("The game is over")]
    GameOver,

    #[error("There is nothing to hide from")]
    NoThreat,

    #[error("You have already made your choice")]
    AlreadyChosen,

    #[error("There is nothing here to grab")]
    NothingToGrab,

    #[error("You are already holding the knife")]
    AlreadyHoldingKnife,

    #[error("There is nothing here to stab")]
    NothingToStab,

    #[error("Your hands are empty. grab() the knife first")]
    NoKnife,

    #[error("Invalid day: {0}")]
    InvalidDay(u32),
}

impl RuleViolation {
    /// Extra SYSTEM line shown after the error.
    pub fn hint(&self) -> Option<String> {
        match self {
            RuleViolation::InvalidLocation(_) => Some(format!("Valid rooms are: {}", room_names())),
            _ => None,
        }
    }
}

/// A concrete state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AdjustMeter { meter: Meter, delta: f32 },
    AdvanceTime { minutes: u32 },
    /// Complete the first pending task for this location and action. Ignored
    /// once the day it was issued on has ended.
    CompleteTask {
        day: u32,
        location: LocationId,
        action: Action,
    },
    CompleteWorkTask { day: u32, task_id: u32 },
    MoveTo(Option<LocationId>),
    SetEntity(Option<LocationId>),
    SetFlag(FlagChange),
    SetPhase(NarrativePhase),
    SetInputEnabled(bool),
    Log { kind: LogKind, message: String },
    Transcript(String),
    /// Run `effects` after `delay` of real time.
    Schedule {
        delay: Duration,
        kind: JobKind,
        guard: Option<NarrativePhase>,
        effects: Vec<Effect>,
    },
    RunSequence(Sequence),
    EndDay,
    StartDay(u32),
    JumpToDay(u32),
    StartTutorial,
    GameOver,
}

impl Effect {
    pub fn system(message: impl Into<String>) -> Self {
        Effect::Log {
            kind: LogKind::System,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Effect::Log {
            kind: LogKind::Warning,
            message: message.into(),
        }
    }

    pub fn story(message: impl Into<String>) -> Self {
        Effect::Log {
            kind: LogKind::Story,
            message: message.into(),
        }
    }
}

/// The outcome of resolving a command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub effects: Vec<Effect>,
}

impl Resolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// Add effects that land after a real-time delay. A zero delay applies
    /// them immediately.
    pub fn after(self, delay: Duration, effects: Vec<Effect>) -> Self {
        if delay.is_zero() {
            return self.with_effects(effects);
        }
        self.with_effect(Effect::Schedule {
            delay,
            kind: JobKind::Action,
            guard: None,
            effects,
        })
    }
}

/// Which presentation views a batch of effects invalidated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dirty {
    pub status: bool,
    pub tasks: bool,
    pub map: bool,
    pub clock: bool,
    /// A task was actually completed.
    pub task_completed: bool,
}

impl Dirty {
    pub fn all() -> Self {
        Self {
            status: true,
            tasks: true,
            map: true,
            clock: true,
            task_completed: false,
        }
    }

    pub fn merge(&mut self, other: Dirty) {
        self.status |= other.status;
        self.tasks |= other.tasks;
        self.map |= other.map;
        self.clock |= other.clock;
        self.task_completed |= other.task_completed;
    }

    pub fn any_view(&self) -> bool {
        self.status || self.tasks || self.map || self.clock
    }
}

/// Resolves commands into effects.
#[derive(Debug, Clone)]
pub struct RulesEngine {
    config: EngineConfig,
}

impl RulesEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn resolve(
        &self,
        state: &GameState,
        command: &Command,
    ) -> Result<Resolution, RuleViolation> {
        match command {
            Command::Help => Ok(Resolution::new()
                .with_effects(help::help_lines().into_iter().map(Effect::Transcript))),
            Command::Move(target) => self.resolve_move(state, target),
            Command::Status => Ok(self.resolve_status(state)),
            Command::Scan => Ok(self.resolve_scan(state)),
            Command::Tutorial => Ok(Resolution::new().with_effect(Effect::StartTutorial)),
            Command::Act(action) => self.resolve_action(state, *action),
            Command::Hide => self.resolve_choice(state, StoryBranch::Hide),
            Command::Lock => self.resolve_choice(state, StoryBranch::Lock),
            Command::Grab => self.resolve_grab(state),
            Command::Stab => self.resolve_stab(state),
            Command::DebugDay(0) => Err(RuleViolation::InvalidDay(0)),
            Command::DebugDay(day) => Ok(Resolution::new().with_effect(Effect::JumpToDay(*day))),
            Command::Unknown(verb) => Err(RuleViolation::UnknownCommand(verb.clone())),
        }
    }

    fn resolve_move(&self, state: &GameState, target: &str) -> Result<Resolution, RuleViolation> {
        if target.is_empty() {
            return Err(RuleViolation::MissingLocation);
        }
        let location: LocationId = target
            .parse()
            .map_err(|_| RuleViolation::InvalidLocation(target.to_string()))?;
        if location == LocationId::Desk && state.narrative.flags.physical_body_missing {
            return Err(RuleViolation::BodyMissing);
        }

        let resolution = Resolution::new().with_effect(Effect::MoveTo(Some(location)));
        if location.is_room() {
            let mut lines = vec![Effect::system(format!("Successfully moved to {location}"))];
            if let Some(description) = location.room_description() {
                lines.push(Effect::system(description));
            }
            lines.extend(
                location
                    .items()
                    .iter()
                    .map(|(item, hint)| Effect::system(format!("- move.to({item}) to {hint}"))),
            );
            Ok(resolution.with_effects(lines))
        } else {
            let mut lines = vec![Effect::system(format!("Moved to {location}"))];
            if let Some(hint) = location.item_hint() {
                lines.push(Effect::system(format!("You can {hint}")));
            }
            Ok(resolution.with_effects(lines))
        }
    }

    fn resolve_status(&self, state: &GameState) -> Resolution {
        let status = &state.player.status;
        let mut lines: Vec<String> = Meter::ALL
            .iter()
            .map(|m| format!("{}: {}", m.name(), format_percent(status.get(*m))))
            .collect();
        lines.push(format!("Location: {}", state.player.position_name()));
        lines.push(format!("Time: {}", state.clock));
        Resolution::new().with_effects(lines.into_iter().map(Effect::Transcript))
    }

    fn resolve_scan(&self, state: &GameState) -> Resolution {
        let flags = &state.narrative.flags;
        let position = state.player.position;
        let mut resolution = Resolution::new().with_effect(Effect::system(format!(
            "Scanning current location: {}",
            state.player.position_name()
        )));

        let body_gone = flags.physical_body_missing;
        let description = match position {
            Some(LocationId::Desk) if body_gone => {
                "The chair is pushed back. The keyboard is still warm, but your body is gone."
            }
            Some(location) => location.scan_description(),
            None => "Nothing special here",
        };
        resolution = resolution.with_effect(Effect::system(description));

        if state.narrative.phase != NarrativePhase::CluePhase || !body_gone {
            return resolution;
        }
        match (flags.clue_found, position) {
            (0, Some(LocationId::Desk | LocationId::Study)) => resolution.with_effects([
                Effect::SetFlag(FlagChange::ClueFound(1)),
                Effect::story("There are wet footprints leading away from the desk."),
                Effect::story("They head toward the bathroom. Someone walked to the SHOWER."),
            ]),
            (1, Some(LocationId::Shower)) => resolution.with_effects([
                Effect::SetFlag(FlagChange::ClueFound(2)),
                Effect::SetFlag(FlagChange::NeedCheckBody(false)),
                Effect::story("The drain is clogged with dark hair. Your hair."),
                Effect::story("Whatever took your body washed it here. There is nothing left to check at the desk."),
            ]),
            (0, _) => resolution.with_effect(Effect::warning(
                "Nothing here. Start where your body used to sit.",
            )),
            (1, _) => resolution.with_effect(Effect::warning(
                "The footprints do not lead here. Follow them to the SHOWER.",
            )),
            _ => resolution,
        }
    }

    fn require_location(state: &GameState, action: Action) -> Result<(), RuleViolation> {
        let profile = action.profile();
        if state.player.is_at(profile.location) {
            Ok(())
        } else {
            Err(RuleViolation::WrongLocation {
                location: profile.location,
                requirement: profile.requirement,
            })
        }
    }

    /// Hunger and sanity gates.
    fn check_state_for_action(state: &GameState, action: Action) -> Result<(), RuleViolation> {
        if !action.is_status_gated() {
            return Ok(());
        }
        let status = &state.player.status;
        if status.get(Meter::Hunger) <= HUNGER_GATE {
            return Err(RuleViolation::TooHungry);
        }
        if action == Action::Work && status.get(Meter::Sanity) <= SANITY_GATE {
            return Err(RuleViolation::TooUnstable);
        }
        Ok(())
    }

    fn resolve_action(&self, state: &GameState, action: Action) -> Result<Resolution, RuleViolation> {
        Self::require_location(state, action)?;
        Self::check_state_for_action(state, action)?;

        match action {
            Action::Eat => Ok(self.resolve_eat(state)),
            Action::Sleep => self.resolve_sleep(state),
            Action::Work => Ok(self.resolve_work(state)),
            Action::CheckBody => Ok(self.resolve_check_body(state)),
            _ => Ok(self.resolve_timed(state, action)),
        }
    }

    fn meter_effects(action: Action) -> impl Iterator<Item = Effect> {
        let profile = action.profile();
        let time = (profile.minutes > 0).then_some(Effect::AdvanceTime {
            minutes: profile.minutes,
        });
        profile
            .deltas
            .iter()
            .map(|(meter, delta)| Effect::AdjustMeter {
                meter: *meter,
                delta: *delta,
            })
            .chain(time)
    }

    fn resolve_eat(&self, state: &GameState) -> Resolution {
        if state.player.status.is_full(Meter::Hunger) {
            return Resolution::new().with_effect(Effect::system("Already full"));
        }
        let profile = Action::Eat.profile();
        Resolution::new()
            .with_effects(Self::meter_effects(Action::Eat))
            .with_effect(Effect::CompleteTask {
                day: state.day(),
                location: profile.location,
                action: Action::Eat,
            })
            .with_effect(Effect::system(profile.complete_text))
    }

    /// Start text now; deltas, time, task completion and the completion text
    /// after the action's delay.
    fn resolve_timed(&self, state: &GameState, action: Action) -> Resolution {
        let profile = action.profile();
        let mut deferred: Vec<Effect> = Self::meter_effects(action).collect();
        deferred.push(Effect::CompleteTask {
            day: state.day(),
            location: profile.location,
            action,
        });
        deferred.push(Effect::system(profile.complete_text));

        Resolution::new()
            .with_effect(Effect::system(profile.start_text))
            .after(self.config.scaled(profile.delay), deferred)
    }

    fn resolve_work(&self, state: &GameState) -> Resolution {
        let Some(task) = state.tasks.next_work() else {
            return Resolution::new().with_effect(Effect::system("No more work tasks to complete!"));
        };
        let profile = Action::Work.profile();
        let mut deferred: Vec<Effect> = Self::meter_effects(Action::Work).collect();
        deferred.push(Effect::CompleteWorkTask {
            day: state.day(),
            task_id: task.id,
        });
        deferred.push(Effect::system(format!(
            "{}: {}",
            profile.complete_text, task.description
        )));

        Resolution::new()
            .with_effect(Effect::system(format!("Working on: {}...", task.description)))
            .after(self.config.scaled(profile.delay), deferred)
    }

    fn resolve_check_body(&self, state: &GameState) -> Resolution {
        let flags = &state.narrative.flags;
        let profile = Action::CheckBody.profile();
        let delay = self.config.scaled(profile.delay);

        if flags.physical_body_missing {
            return Resolution::new()
                .with_effect(Effect::warning("There is nothing at the desk. Your body is gone."));
        }
        if flags.body_compromised {
            return Resolution::new()
                .with_effect(Effect::warning(
                    "Your body is typing. The words on the screen are not yours.",
                ))
                .after(
                    delay,
                    vec![
                        Effect::SetFlag(FlagChange::NeedCheckBody(false)),
                        Effect::warning("It stops. Slowly, it turns its head toward you."),
                        Effect::system("You back away. You can sleep now."),
                    ],
                );
        }
        if !flags.need_check_body {
            return Resolution::new()
                .with_effect(Effect::system("Your body is fine. There is nothing new to see."));
        }
        Resolution::new()
            .with_effect(Effect::system(profile.start_text))
            .after(
                delay,
                vec![
                    Effect::SetFlag(FlagChange::NeedCheckBody(false)),
                    Effect::system(profile.complete_text),
                ],
            )
    }

    fn resolve_sleep(&self, state: &GameState) -> Result<Resolution, RuleViolation> {
        if state.transition_pending {
            return Err(RuleViolation::AlreadyAsleep);
        }
        let flags = &state.narrative.flags;
        let day = state.day();

        if day == CLUE_DAY && flags.story_branch == Some(StoryBranch::Lock) {
            debug!(day, "sleep override for the clue day");
            return Ok(Resolution::new()
                .with_effect(Effect::story(
                    "You lie down without a body to return to. Sleep takes you anyway.",
                ))
                .with_effect(Effect::EndDay));
        }
        if !flags.physical_body_missing && !state.tasks.all_completed() {
            return Err(RuleViolation::TasksRemaining);
        }
        if day >= BODY_CHECK_FROM_DAY && flags.need_check_body {
            return Err(RuleViolation::MustCheckBody);
        }
        Ok(Resolution::new()
            .with_effect(Effect::system(Action::Sleep.profile().complete_text))
            .with_effect(Effect::EndDay))
    }

    fn resolve_choice(
        &self,
        state: &GameState,
        branch: StoryBranch,
    ) -> Result<Resolution, RuleViolation> {
        let narrative = &state.narrative;
        if narrative.phase != NarrativePhase::ChoicePending {
            return Err(if narrative.flags.day10_event_active {
                RuleViolation::AlreadyChosen
            } else {
                RuleViolation::NoThreat
            });
        }
        let sequence = match branch {
            StoryBranch::Hide => Sequence::Hide,
            StoryBranch::Lock => Sequence::Lock,
        };
        Ok(Resolution::new().with_effect(Effect::RunSequence(sequence)))
    }

    fn resolve_grab(&self, state: &GameState) -> Result<Resolution, RuleViolation> {
        let flags = &state.narrative.flags;
        if !flags.final_day {
            return Err(RuleViolation::NothingToGrab);
        }
        if flags.has_knife {
            return Err(RuleViolation::AlreadyHoldingKnife);
        }
        Ok(Resolution::new().with_effects([
            Effect::SetFlag(FlagChange::HasKnife(true)),
            Effect::story("You take the knife from the counter."),
            Effect::MoveTo(Some(LocationId::Desk)),
            Effect::story("Your feet carry you to the DESK. It does not look up."),
        ]))
    }

    fn resolve_stab(&self, state: &GameState) -> Result<Resolution, RuleViolation> {
        let flags = &state.narrative.flags;
        if !flags.final_day {
            return Err(RuleViolation::NothingToStab);
        }
        if !flags.has_knife {
            return Err(RuleViolation::NoKnife);
        }
        Ok(Resolution::new().with_effect(Effect::RunSequence(Sequence::Ending)))
    }
}

/// Apply a state-only effect. Effects that need the scheduler or produce
/// output are handled by the engine and leave the state untouched here.
pub fn apply_effect(state: &mut GameState, effect: &Effect) -> Dirty {
    let mut dirty = Dirty::default();
    match effect {
        Effect::AdjustMeter { meter, delta } => {
            state.player.status.adjust(*meter, *delta);
            dirty.status = true;
        }
        Effect::AdvanceTime { minutes } => {
            state.clock.advance_minutes(*minutes);
            dirty.clock = true;
        }
        Effect::CompleteTask {
            day,
            location,
            action,
        } => {
            if *day == state.day() && state.tasks.complete_matching(*location, *action).is_some() {
                dirty.tasks = true;
                dirty.task_completed = true;
            }
        }
        Effect::CompleteWorkTask { day, task_id } => {
            if *day == state.day() && state.tasks.complete_id(*task_id) {
                dirty.tasks = true;
                dirty.task_completed = true;
            }
        }
        Effect::MoveTo(location) => {
            state.player.position = *location;
            dirty.map = true;
        }
        Effect::SetEntity(location) => {
            state.narrative.entity = *location;
            dirty.map = true;
        }
        Effect::SetFlag(change) => {
            state.narrative.flags.apply(*change);
        }
        Effect::SetPhase(phase) => {
            if state.narrative.phase != *phase {
                debug!(from = ?state.narrative.phase, to = ?phase, "narrative phase change");
                state.narrative.phase = *phase;
            }
        }
        Effect::SetInputEnabled(enabled) => {
            state.input_enabled = *enabled;
        }
        Effect::Log { .. }
        | Effect::Transcript(_)
        | Effect::Schedule { .. }
        | Effect::RunSequence(_)
        | Effect::EndDay
        | Effect::StartDay(_)
        | Effect::JumpToDay(_)
        | Effect::StartTutorial
        | Effect::GameOver => {}
    }
    dirty
}

/// Apply a list of state-only effects.
pub fn apply_effects(state: &mut GameState, effects: &[Effect]) -> Dirty {
    let mut dirty = Dirty::default();
    for effect in effects {
        dirty.merge(apply_effect(state, effect));
    }
    dirty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskSet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_at(location: LocationId) -> GameState {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = GameState::new(TaskSet::generate(1, &mut rng), location);
        state.player.position = Some(location);
        state
    }

    fn rules() -> RulesEngine {
        RulesEngine::new(EngineConfig::default())
    }

    #[test]
    fn test_wrong_location_message() {
        let state = state_at(LocationId::Kitchen);
        let err = rules()
            .resolve(&state, &Command::Act(Action::Shower))
            .unwrap_err();
        assert_eq!(err.to_string(), "Must be at SHOWER to take a shower");
    }

    #[test]
    fn test_eat_is_immediate() {
        let mut state = state_at(LocationId::Fridge);
        state.player.status.set(Meter::Hunger, 50.0);
        let resolution = rules().resolve(&state, &Command::Act(Action::Eat)).unwrap();
        assert!(!resolution
            .effects
            .iter()
            .any(|e| matches!(e, Effect::Schedule { .. })));
        apply_effects(&mut state, &resolution.effects);
        assert_eq!(state.player.status.get(Meter::Hunger), 80.0);
    }

    #[test]
    fn test_eat_when_full_changes_nothing() {
        let state = state_at(LocationId::Fridge);
        let resolution = rules().resolve(&state, &Command::Act(Action::Eat)).unwrap();
        assert_eq!(resolution.effects, vec![Effect::system("Already full")]);
    }

    #[test]
    fn test_hunger_gate() {
        let mut state = state_at(LocationId::Desk);
        state.player.status.set(Meter::Hunger, 15.0);
        assert_eq!(
            rules().resolve(&state, &Command::Act(Action::Work)),
            Err(RuleViolation::TooHungry)
        );
    }

    #[test]
    fn test_sanity_gate_only_for_work() {
        let mut state = state_at(LocationId::Desk);
        state.player.status.set(Meter::Sanity, 20.0);
        assert_eq!(
            rules().resolve(&state, &Command::Act(Action::Work)),
            Err(RuleViolation::TooUnstable)
        );
        state.player.position = Some(LocationId::Bookshelf);
        assert!(rules().resolve(&state, &Command::Act(Action::Read)).is_ok());
    }

    #[test]
    fn test_shower_defers_effects() {
        let state = state_at(LocationId::Shower);
        let resolution = rules()
            .resolve(&state, &Command::Act(Action::Shower))
            .unwrap();
        assert_eq!(resolution.effects[0], Effect::system("Taking a shower..."));
        match &resolution.effects[1] {
            Effect::Schedule { delay, effects, .. } => {
                assert_eq!(*delay, Duration::from_secs(3));
                assert!(effects.contains(&Effect::AdvanceTime { minutes: 15 }));
            }
            other => panic!("expected a scheduled batch, got {other:?}"),
        }
    }

    #[test]
    fn test_move_validation() {
        let state = state_at(LocationId::Desk);
        assert_eq!(
            rules().resolve(&state, &Command::Move(String::new())),
            Err(RuleViolation::MissingLocation)
        );
        let err = rules()
            .resolve(&state, &Command::Move("GARAGE".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid location: GARAGE");
        assert_eq!(
            err.hint().as_deref(),
            Some("Valid rooms are: BEDROOM, STUDY, BATHROOM, KITCHEN, LIVING, BALCONY")
        );
    }

    #[test]
    fn test_move_to_room_lists_items() {
        let state = state_at(LocationId::Desk);
        let resolution = rules()
            .resolve(&state, &Command::Move("BATHROOM".into()))
            .unwrap();
        assert_eq!(resolution.effects[0], Effect::MoveTo(Some(LocationId::Bathroom)));
        assert!(resolution
            .effects
            .contains(&Effect::system("- move.to(SINK) to washHands() to freshen up")));
    }

    #[test]
    fn test_move_to_desk_blocked_without_body() {
        let mut state = state_at(LocationId::Kitchen);
        state.narrative.flags.physical_body_missing = true;
        assert_eq!(
            rules().resolve(&state, &Command::Move("DESK".into())),
            Err(RuleViolation::BodyMissing)
        );
    }

    #[test]
    fn test_sleep_requires_tasks() {
        let state = state_at(LocationId::Bed);
        assert_eq!(
            rules().resolve(&state, &Command::Act(Action::Sleep)),
            Err(RuleViolation::TasksRemaining)
        );
    }

    #[test]
    fn test_sleep_requires_body_check_from_day_five() {
        let mut state = state_at(LocationId::Bed);
        state.clock.start_day(5);
        state.tasks = TaskSet::from_tasks(5, Vec::new());
        state.narrative.flags.need_check_body = true;
        assert_eq!(
            rules().resolve(&state, &Command::Act(Action::Sleep)),
            Err(RuleViolation::MustCheckBody)
        );
    }

    #[test]
    fn test_choice_outside_event() {
        let state = state_at(LocationId::Bed);
        assert_eq!(
            rules().resolve(&state, &Command::Hide),
            Err(RuleViolation::NoThreat)
        );
    }

    #[test]
    fn test_stab_needs_knife() {
        let mut state = state_at(LocationId::Kitchen);
        state.narrative.flags.final_day = true;
        assert_eq!(
            rules().resolve(&state, &Command::Stab),
            Err(RuleViolation::NoKnife)
        );
    }

    #[test]
    fn test_stale_task_completion_is_ignored() {
        let mut state = state_at(LocationId::Desk);
        let id = state.tasks.next_work().unwrap().id;
        let dirty = apply_effect(&mut state, &Effect::CompleteWorkTask { day: 0, task_id: id });
        assert!(!dirty.task_completed);
        assert_eq!(state.tasks.completed_count(), 0);
    }
}
