//! Story flags, narrative phases and scripted sequences.
//!
//! The story is a small state machine:
//!
//! ```text
//! Normal --(day 4, all tasks done)--> ForcedEvent --> Normal
//! Normal --(day 10 wake)--> ChoicePending --> HideSequence | LockSequence --> Normal
//! LockSequence --(day 12)--> CluePhase --(day 13)--> FinalSequence --(stab)--> Terminated
//! ```
//!
//! Multi-step events are [`Sequence`]s: ordered steps, each a delay followed
//! by a batch of effects. The engine schedules them on its timeline and
//! drops a step whose phase guard no longer holds.

use crate::event::LogKind;
use crate::location::LocationId;
use crate::rules::Effect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The day-10 choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryBranch {
    Hide,
    Lock,
}

impl fmt::Display for StoryBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryBranch::Hide => write!(f, "hide"),
            StoryBranch::Lock => write!(f, "lock"),
        }
    }
}

/// Named phase of the story state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NarrativePhase {
    #[default]
    Normal,
    ForcedEvent,
    ChoicePending,
    HideSequence,
    LockSequence,
    CluePhase,
    FinalSequence,
    Terminated,
}

/// Story gates consulted by the interpreter and the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeFlags {
    pub need_check_body: bool,
    pub body_compromised: bool,
    pub physical_body_missing: bool,
    pub story_branch: Option<StoryBranch>,
    pub day10_event_active: bool,
    pub can_move: bool,
    pub final_day: bool,
    pub has_knife: bool,
    /// Clues found during the day-12 search (0, 1 or 2).
    pub clue_found: u8,
}

impl Default for NarrativeFlags {
    fn default() -> Self {
        Self {
            need_check_body: false,
            body_compromised: false,
            physical_body_missing: false,
            story_branch: None,
            day10_event_active: false,
            can_move: true,
            final_day: false,
            has_knife: false,
            clue_found: 0,
        }
    }
}

/// A single flag assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagChange {
    NeedCheckBody(bool),
    BodyCompromised(bool),
    PhysicalBodyMissing(bool),
    StoryBranch(Option<StoryBranch>),
    Day10EventActive(bool),
    CanMove(bool),
    FinalDay(bool),
    HasKnife(bool),
    ClueFound(u8),
}

impl NarrativeFlags {
    pub fn apply(&mut self, change: FlagChange) {
        match change {
            FlagChange::NeedCheckBody(v) => self.need_check_body = v,
            FlagChange::BodyCompromised(v) => self.body_compromised = v,
            FlagChange::PhysicalBodyMissing(v) => self.physical_body_missing = v,
            FlagChange::StoryBranch(v) => self.story_branch = v,
            FlagChange::Day10EventActive(v) => self.day10_event_active = v,
            FlagChange::CanMove(v) => self.can_move = v,
            FlagChange::FinalDay(v) => self.final_day = v,
            FlagChange::HasKnife(v) => self.has_knife = v,
            FlagChange::ClueFound(v) => self.clue_found = v.min(2),
        }
    }

    /// Whether only `hide`/`lock` are accepted.
    pub fn choice_window_open(&self) -> bool {
        self.day10_event_active && !self.can_move
    }
}

/// All story state owned by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeState {
    pub flags: NarrativeFlags,
    pub phase: NarrativePhase,
    /// Where the entity marker is drawn, if it is on the map.
    pub entity: Option<LocationId>,
    /// One-shot events that already happened, keyed by day.
    pub fired: Vec<(u32, Sequence)>,
}

impl NarrativeState {
    pub fn has_fired(&self, day: u32, sequence: Sequence) -> bool {
        self.fired.contains(&(day, sequence))
    }

    pub fn mark_fired(&mut self, day: u32, sequence: Sequence) {
        if !self.has_fired(day, sequence) {
            self.fired.push((day, sequence));
        }
    }
}

/// Real-time pacing of scripted sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrativeTiming {
    /// Gap between ordinary story beats.
    pub beat: Duration,
    /// How long input stays disabled during the forced relocation.
    pub forced_event: Duration,
}

impl Default for NarrativeTiming {
    fn default() -> Self {
        Self {
            beat: Duration::from_secs(2),
            forced_event: Duration::from_secs(5),
        }
    }
}

/// One beat of a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Delay after the previous step.
    pub delay: Duration,
    /// The step only runs if the story is still in this phase.
    pub guard: Option<NarrativePhase>,
    pub effects: Vec<Effect>,
}

impl Step {
    fn now(effects: Vec<Effect>) -> Self {
        Self {
            delay: Duration::ZERO,
            guard: None,
            effects,
        }
    }

    fn after(delay: Duration, guard: NarrativePhase, effects: Vec<Effect>) -> Self {
        Self {
            delay,
            guard: Some(guard),
            effects,
        }
    }
}

/// Scripted multi-step story events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sequence {
    /// Day 4: the house drags the soul into the kitchen.
    ForcedRelocation,
    /// Day 10: something walks through the house.
    Day10Encounter,
    Hide,
    Lock,
    /// Day 13: the end.
    Ending,
}

fn story(message: &str) -> Effect {
    Effect::Log {
        kind: LogKind::Story,
        message: message.to_string(),
    }
}

fn warning(message: &str) -> Effect {
    Effect::Log {
        kind: LogKind::Warning,
        message: message.to_string(),
    }
}

fn system(message: &str) -> Effect {
    Effect::Log {
        kind: LogKind::System,
        message: message.to_string(),
    }
}

impl Sequence {
    pub fn steps(&self, timing: &NarrativeTiming) -> Vec<Step> {
        let beat = timing.beat;
        match self {
            Sequence::ForcedRelocation => vec![
                Step::now(vec![
                    Effect::SetInputEnabled(false),
                    Effect::SetPhase(NarrativePhase::ForcedEvent),
                    story("The lights flicker. The walls fold inward."),
                    Effect::MoveTo(Some(LocationId::Kitchen)),
                    warning("You are in the KITCHEN. You did not walk here."),
                ]),
                Step::after(
                    timing.forced_event,
                    NarrativePhase::ForcedEvent,
                    vec![
                        Effect::SetPhase(NarrativePhase::Normal),
                        Effect::SetInputEnabled(true),
                        system("The flickering stops. You can move again."),
                    ],
                ),
            ],
            Sequence::Day10Encounter => vec![
                Step::now(vec![
                    Effect::SetFlag(FlagChange::Day10EventActive(true)),
                    Effect::SetFlag(FlagChange::CanMove(false)),
                    Effect::SetPhase(NarrativePhase::ChoicePending),
                    story("You wake up. The house is too quiet."),
                ]),
                Step::after(
                    beat,
                    NarrativePhase::ChoicePending,
                    vec![
                        Effect::SetEntity(Some(LocationId::Living)),
                        warning("Something is standing in the living room."),
                    ],
                ),
                Step::after(
                    beat,
                    NarrativePhase::ChoicePending,
                    vec![warning("It turns toward the bedroom. It is coming.")],
                ),
                Step::after(
                    beat,
                    NarrativePhase::ChoicePending,
                    vec![story(
                        "Decide now: hide() in the wardrobe, or lock() the bedroom door.",
                    )],
                ),
            ],
            Sequence::Hide => vec![
                Step::now(vec![
                    Effect::SetFlag(FlagChange::StoryBranch(Some(StoryBranch::Hide))),
                    Effect::SetPhase(NarrativePhase::HideSequence),
                    Effect::MoveTo(None),
                    story("You slip into the wardrobe and pull the door shut."),
                ]),
                Step::after(
                    beat,
                    NarrativePhase::HideSequence,
                    vec![
                        Effect::SetEntity(Some(LocationId::Bedroom)),
                        warning("Footsteps. It is in the bedroom."),
                    ],
                ),
                Step::after(
                    beat,
                    NarrativePhase::HideSequence,
                    vec![
                        Effect::SetEntity(None),
                        story("The footsteps fade. It is gone."),
                    ],
                ),
                Step::after(
                    beat,
                    NarrativePhase::HideSequence,
                    vec![
                        Effect::MoveTo(Some(LocationId::Bedroom)),
                        Effect::SetFlag(FlagChange::Day10EventActive(false)),
                        Effect::SetFlag(FlagChange::CanMove(true)),
                        Effect::SetPhase(NarrativePhase::Normal),
                        system("You step out of the wardrobe. You can move again."),
                    ],
                ),
            ],
            Sequence::Lock => vec![
                Step::now(vec![
                    Effect::SetFlag(FlagChange::StoryBranch(Some(StoryBranch::Lock))),
                    Effect::SetPhase(NarrativePhase::LockSequence),
                    story("You throw the bolt on the bedroom door."),
                ]),
                Step::after(
                    beat,
                    NarrativePhase::LockSequence,
                    vec![
                        Effect::SetEntity(Some(LocationId::Study)),
                        warning("The handle rattles. Then it walks away, into the study."),
                    ],
                ),
                Step::after(
                    beat,
                    NarrativePhase::LockSequence,
                    vec![
                        Effect::SetEntity(None),
                        Effect::SetFlag(FlagChange::BodyCompromised(true)),
                        story("A chair creaks in the study. Then nothing."),
                    ],
                ),
                Step::after(
                    beat,
                    NarrativePhase::LockSequence,
                    vec![
                        Effect::SetFlag(FlagChange::Day10EventActive(false)),
                        Effect::SetFlag(FlagChange::CanMove(true)),
                        Effect::SetPhase(NarrativePhase::Normal),
                        system("The house is silent. You can move again."),
                    ],
                ),
            ],
            Sequence::Ending => vec![
                Step::now(vec![
                    Effect::SetPhase(NarrativePhase::Terminated),
                    story("You drive the knife into the thing wearing your body."),
                ]),
                Step::after(
                    beat,
                    NarrativePhase::Terminated,
                    vec![story("It turns around. It has your face.")],
                ),
                Step::after(
                    beat,
                    NarrativePhase::Terminated,
                    vec![story("The terminal goes dark."), Effect::GameOver],
                ),
            ],
        }
    }
}
