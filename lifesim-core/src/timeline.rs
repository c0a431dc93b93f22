//! Cooperative virtual-time scheduler.
//!
//! The engine never sleeps. A driver tells the [`Timeline`] how much real time
//! passed and the engine pops everything that came due in that window: the
//! recurring decay tick and one-shot jobs (delayed action effects, narrative
//! beats, the day transition). Items fire in due-time order; items due at the
//! same instant fire in the order they were scheduled.

use crate::narrative::NarrativePhase;
use crate::rules::Effect;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

/// Who scheduled a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Delayed effects of an ordinary action.
    Action,
    /// A beat of a scripted story sequence.
    Narrative,
    /// The transition into the next day.
    DayCycle,
}

/// A batch of effects waiting on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub kind: JobKind,
    /// Skip the job if the story has left this phase by the time it fires.
    pub guard: Option<NarrativePhase>,
    pub effects: Vec<Effect>,
}

impl Job {
    pub fn new(kind: JobKind, effects: Vec<Effect>) -> Self {
        Self {
            kind,
            guard: None,
            effects,
        }
    }

    pub fn with_guard(mut self, guard: Option<NarrativePhase>) -> Self {
        self.guard = guard;
        self
    }
}

/// Something that came due.
#[derive(Debug, Clone, PartialEq)]
pub enum Fired {
    Tick,
    Job(Job),
}

#[derive(Debug, Clone)]
struct Entry {
    due: Duration,
    seq: u64,
    payload: Fired,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Debug, Clone)]
pub struct Timeline {
    now: Duration,
    next_seq: u64,
    tick_period: Option<Duration>,
    queue: BinaryHeap<Reverse<Entry>>,
}

impl Timeline {
    /// A timeline whose first tick is one period from now. `None` disables
    /// the recurring tick.
    pub fn new(tick_period: Option<Duration>) -> Self {
        let mut timeline = Self {
            now: Duration::ZERO,
            next_seq: 0,
            tick_period: tick_period.filter(|p| !p.is_zero()),
            queue: BinaryHeap::new(),
        };
        if let Some(period) = timeline.tick_period {
            timeline.push(period, Fired::Tick);
        }
        timeline
    }

    /// Virtual time elapsed since the timeline was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn tick_period(&self) -> Option<Duration> {
        self.tick_period
    }

    fn push(&mut self, due: Duration, payload: Fired) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry { due, seq, payload }));
    }

    /// Schedule a job `delay` after the current instant.
    pub fn schedule(&mut self, delay: Duration, job: Job) {
        self.push(self.now + delay, Fired::Job(job));
    }

    /// Pop the earliest item due at or before `until`, moving the clock to its
    /// due time. A fired tick re-arms itself one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        if self.queue.peek()?.0.due > until {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        self.now = self.now.max(entry.due);
        if let (Fired::Tick, Some(period)) = (&entry.payload, self.tick_period) {
            self.push(entry.due + period, Fired::Tick);
        }
        Some(entry.payload)
    }

    /// Move the clock to `until` once everything due has been popped.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Time until the next item comes due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue
            .peek()
            .map(|Reverse(entry)| entry.due.saturating_sub(self.now))
    }

    /// Drop every pending job of the given kinds. The tick is never dropped.
    pub fn discard(&mut self, kinds: &[JobKind]) -> usize {
        let before = self.queue.len();
        self.queue.retain(|Reverse(entry)| match &entry.payload {
            Fired::Tick => true,
            Fired::Job(job) => !kinds.contains(&job.kind),
        });
        before - self.queue.len()
    }

    /// Number of pending jobs of a kind.
    pub fn pending(&self, kind: JobKind) -> usize {
        self.queue
            .iter()
            .filter(|Reverse(entry)| matches!(&entry.payload, Fired::Job(job) if job.kind == kind))
            .count()
    }

    pub fn has_pending_jobs(&self) -> bool {
        self.queue
            .iter()
            .any(|Reverse(entry)| matches!(entry.payload, Fired::Job(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LogKind;

    fn note(message: &str) -> Job {
        Job::new(
            JobKind::Action,
            vec![Effect::Log {
                kind: LogKind::System,
                message: message.to_string(),
            }],
        )
    }

    fn drain(timeline: &mut Timeline, until: Duration) -> Vec<Fired> {
        let mut fired = Vec::new();
        while let Some(item) = timeline.pop_due(until) {
            fired.push(item);
        }
        timeline.settle(until);
        fired
    }

    #[test]
    fn test_jobs_fire_in_due_order() {
        let mut timeline = Timeline::new(None);
        timeline.schedule(Duration::from_secs(3), note("late"));
        timeline.schedule(Duration::from_secs(1), note("early"));
        timeline.schedule(Duration::from_secs(3), note("late again"));

        let fired = drain(&mut timeline, Duration::from_secs(5));
        assert_eq!(
            fired,
            vec![
                Fired::Job(note("early")),
                Fired::Job(note("late")),
                Fired::Job(note("late again")),
            ]
        );
        assert_eq!(timeline.now(), Duration::from_secs(5));
    }

    #[test]
    fn test_nothing_fires_early() {
        let mut timeline = Timeline::new(None);
        timeline.schedule(Duration::from_secs(2), note("later"));
        assert!(drain(&mut timeline, Duration::from_secs(1)).is_empty());
        assert_eq!(timeline.next_deadline(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_tick_rearms() {
        let mut timeline = Timeline::new(Some(Duration::from_secs(60)));
        let fired = drain(&mut timeline, Duration::from_secs(180));
        assert_eq!(fired, vec![Fired::Tick, Fired::Tick, Fired::Tick]);
        assert_eq!(timeline.next_deadline(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_job_scheduled_while_draining_uses_fire_time() {
        let mut timeline = Timeline::new(None);
        timeline.schedule(Duration::from_secs(1), note("first"));
        let until = Duration::from_secs(10);
        assert!(timeline.pop_due(until).is_some());
        assert_eq!(timeline.now(), Duration::from_secs(1));
        timeline.schedule(Duration::from_secs(2), note("chained"));
        assert_eq!(timeline.pop_due(until), Some(Fired::Job(note("chained"))));
        assert_eq!(timeline.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_discard_keeps_tick_and_other_kinds() {
        let mut timeline = Timeline::new(Some(Duration::from_secs(60)));
        timeline.schedule(Duration::from_secs(1), note("action"));
        timeline.schedule(
            Duration::from_secs(1),
            Job::new(JobKind::DayCycle, Vec::new()),
        );
        timeline.schedule(
            Duration::from_secs(1),
            Job::new(JobKind::Narrative, Vec::new()),
        );
        assert_eq!(
            timeline.discard(&[JobKind::Narrative, JobKind::DayCycle]),
            2
        );
        assert_eq!(timeline.pending(JobKind::Action), 1);
        assert_eq!(timeline.next_deadline(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_disabled_tick() {
        let timeline = Timeline::new(None);
        assert_eq!(timeline.next_deadline(), None);
        assert!(!timeline.has_pending_jobs());
    }
}
