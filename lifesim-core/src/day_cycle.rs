//! Day transitions.
//!
//! A successful `sleep` ends the day: the summary is shown and the next
//! morning is scheduled on the timeline. Starting a day regenerates the
//! task list and applies the day's entry from the story schedule.

use crate::engine::GameEngine;
use crate::event::{GameEvent, LogKind};
use crate::narrative::{FlagChange, StoryBranch};
use crate::rules::{Dirty, Effect};
use crate::schedule::{day_schedule, CLUE_DAY, ENCOUNTER_DAY, FINAL_DAY};
use crate::state::GameState;
use crate::status::{format_percent, Meter};
use crate::task::TaskSet;
use crate::timeline::{Job, JobKind};
use tracing::info;

/// Text of the end-of-day modal.
pub fn day_summary(state: &GameState) -> String {
    let status = &state.player.status;
    let mut lines = vec![
        format!("Day {} Summary:", state.day()),
        String::new(),
        format!(
            "Tasks Completed: {}/{}",
            state.tasks.completed_count(),
            state.tasks.len()
        ),
        format!("Time Spent Working: {} hours", state.tasks.work_hours()),
        "Current Status:".to_string(),
    ];
    for meter in Meter::ALL {
        let label = match meter {
            Meter::Cleanliness => "Clean",
            other => other.name(),
        };
        lines.push(format!("- {}: {}", label, format_percent(status.get(meter))));
    }
    lines.join("\n")
}

impl GameEngine {
    pub(crate) fn end_day(&mut self) {
        let day = self.state.day();
        info!(session = %self.state.session_id, day, "day ended");
        self.state.transition_pending = true;
        let summary = day_summary(&self.state);
        self.outbox.push(GameEvent::DayEnd { day, summary });

        let delay = self.config.scaled(self.config.day_transition);
        self.timeline.schedule(
            delay,
            Job::new(JobKind::DayCycle, vec![Effect::StartDay(day.saturating_add(1))]),
        );
    }

    pub(crate) fn start_day(&mut self, day: u32) {
        let branch = self.state.narrative.flags.story_branch;
        let schedule = day_schedule(day, branch);
        info!(session = %self.state.session_id, day, ?branch, start = %schedule.start, "day started");

        self.state.clock.start_day(day);
        self.state.tasks = TaskSet::generate(day, &mut self.rng);
        self.state.transition_pending = false;

        let flags = &mut self.state.narrative.flags;
        flags.apply(FlagChange::CanMove(true));
        flags.apply(FlagChange::Day10EventActive(false));
        for change in &schedule.flags {
            flags.apply(*change);
        }
        self.state.narrative.phase = schedule.phase;
        self.state.narrative.entity = schedule.entity;
        self.state.player.position = Some(schedule.start);
        self.dirty.merge(Dirty::all());

        self.apply_all(vec![Effect::SetInputEnabled(true)]);
        self.emit_log(LogKind::System, format!("=== Day {day} ==="));
        self.emit_log(
            LogKind::System,
            format!("Current location: {}", schedule.start),
        );
        for message in &schedule.wake_messages {
            self.emit_log(LogKind::Warning, *message);
        }

        if let Some(sequence) = schedule.on_start {
            self.state.narrative.mark_fired(day, sequence);
            self.run_sequence(sequence);
        }
    }

    /// Debug jump straight to the morning of `day`.
    pub(crate) fn jump_to_day(&mut self, day: u32) {
        let dropped = self
            .timeline
            .discard(&[JobKind::Narrative, JobKind::DayCycle]);
        info!(session = %self.state.session_id, day, dropped, "debug day jump");

        let flags = &mut self.state.narrative.flags;
        if (ENCOUNTER_DAY + 1..=FINAL_DAY).contains(&day) && flags.story_branch.is_none() {
            flags.apply(FlagChange::StoryBranch(Some(StoryBranch::Lock)));
            flags.apply(FlagChange::BodyCompromised(true));
        }
        if day != CLUE_DAY {
            flags.apply(FlagChange::ClueFound(0));
        }
        self.state.narrative.fired.retain(|(fired_day, _)| *fired_day < day);

        self.emit_log(LogKind::System, format!("Debug: jumping to day {day}"));
        self.start_day(day);
    }

    /// Fire the day's one-shot event once the last task is done.
    pub(crate) fn on_task_completed(&mut self) {
        if self.state.tasks.is_empty() || !self.state.tasks.all_completed() {
            return;
        }
        let day = self.state.day();
        self.emit_log(
            LogKind::System,
            "All tasks for today are done. You can sleep() at the BED.",
        );

        let schedule = day_schedule(day, self.state.narrative.flags.story_branch);
        if let Some(sequence) = schedule.on_all_tasks_done {
            if !self.state.narrative.has_fired(day, sequence) {
                self.state.narrative.mark_fired(day, sequence);
                self.run_sequence(sequence);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_summary_format() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tasks = TaskSet::generate(2, &mut rng);
        let work_id = tasks.next_work().unwrap().id;
        tasks.complete_id(work_id);
        let mut state = GameState::new(tasks, LocationId::Bed);
        state.clock.start_day(2);
        state.player.status.set(Meter::Hunger, 62.5);

        let summary = day_summary(&state);
        let total = state.tasks.len();
        assert!(summary.starts_with("Day 2 Summary:"));
        assert!(summary.contains(&format!("Tasks Completed: 1/{total}")));
        assert!(summary.contains("Time Spent Working: 3 hours"));
        assert!(summary.contains("- Hunger: 62.5%"));
        assert!(summary.contains("- Clean: 100%"));
    }
}
