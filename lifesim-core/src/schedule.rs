//! Per-day story schedule.
//!
//! Everything that depends on the day number lives in this table. The day
//! cycle looks up a [`DaySchedule`] when a day starts and when the last task
//! of a day is completed; action handlers never branch on the day.

use crate::location::LocationId;
use crate::narrative::{FlagChange, NarrativePhase, Sequence, StoryBranch};

pub const FORCED_EVENT_DAY: u32 = 4;
pub const BODY_CHECK_FROM_DAY: u32 = 5;
pub const ENCOUNTER_DAY: u32 = 10;
pub const CLUE_DAY: u32 = 12;
pub const FINAL_DAY: u32 = 13;

/// What a day looks like when it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    pub start: LocationId,
    pub flags: Vec<FlagChange>,
    pub phase: NarrativePhase,
    pub entity: Option<LocationId>,
    /// Warnings shown right after waking up.
    pub wake_messages: Vec<&'static str>,
    pub on_start: Option<Sequence>,
    /// One-shot event fired when every task of the day is done.
    pub on_all_tasks_done: Option<Sequence>,
}

impl DaySchedule {
    fn ordinary(day: u32, start: LocationId) -> Self {
        Self {
            start,
            flags: vec![
                FlagChange::NeedCheckBody(day >= BODY_CHECK_FROM_DAY),
                FlagChange::PhysicalBodyMissing(false),
                FlagChange::FinalDay(false),
                FlagChange::HasKnife(false),
            ],
            phase: NarrativePhase::Normal,
            entity: None,
            wake_messages: Vec::new(),
            on_start: None,
            on_all_tasks_done: None,
        }
    }

    fn with_flag(mut self, change: FlagChange) -> Self {
        self.flags.push(change);
        self
    }

    fn with_wake_messages(mut self, messages: &[&'static str]) -> Self {
        self.wake_messages.extend_from_slice(messages);
        self
    }
}

const WRONG_ROOM: [&str; 2] = [
    "You wake up in the KITCHEN.",
    "This is not where you fell asleep.",
];

/// Look up the schedule for `day` given the day-10 choice.
pub fn day_schedule(day: u32, branch: Option<StoryBranch>) -> DaySchedule {
    use LocationId::*;
    match (day, branch) {
        (1, _) => DaySchedule::ordinary(day, Desk),
        (FORCED_EVENT_DAY, _) => DaySchedule {
            on_all_tasks_done: Some(Sequence::ForcedRelocation),
            ..DaySchedule::ordinary(day, Bed)
        },
        (2..=5, _) => DaySchedule::ordinary(day, Bed),
        (6..=9, _) => DaySchedule::ordinary(day, Kitchen).with_wake_messages(&WRONG_ROOM),
        (ENCOUNTER_DAY, _) => DaySchedule {
            on_start: Some(Sequence::Day10Encounter),
            ..DaySchedule::ordinary(day, Bed).with_flag(FlagChange::StoryBranch(None))
        },
        (11, Some(StoryBranch::Lock)) => {
            DaySchedule::ordinary(day, Kitchen).with_wake_messages(&WRONG_ROOM)
        }
        (CLUE_DAY, Some(StoryBranch::Lock)) => DaySchedule {
            phase: NarrativePhase::CluePhase,
            ..DaySchedule::ordinary(day, Desk)
                .with_flag(FlagChange::PhysicalBodyMissing(true))
                .with_flag(FlagChange::ClueFound(0))
                .with_wake_messages(&[
                    "You wake up at the DESK. The chair is empty.",
                    "Your body is gone. scan() around the house for clues.",
                ])
        },
        (FINAL_DAY, Some(StoryBranch::Lock)) => DaySchedule {
            phase: NarrativePhase::FinalSequence,
            entity: Some(Desk),
            ..DaySchedule::ordinary(day, Kitchen)
                .with_flag(FlagChange::FinalDay(true))
                .with_wake_messages(&[
                    "Your body is back at the desk. It is not alone in there.",
                    "There is a knife on the counter. grab() it. stab() it.",
                ])
        },
        _ => DaySchedule::ordinary(day, Bed),
    }
}
