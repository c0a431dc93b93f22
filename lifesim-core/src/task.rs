//! Daily task lists.
//!
//! Each morning a fresh [`TaskSet`] is generated: two or three work tasks
//! at the desk followed by exactly three housework tasks. Nothing carries
//! over between days.

use crate::action::Action;
use crate::location::LocationId;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// From this day on the task pools switch to their corrupted wording.
pub const CORRUPTION_DAY: u32 = 7;

pub const HOUSEWORK_PER_DAY: usize = 3;

/// Game hours one completed work task accounts for in the day summary.
pub const HOURS_PER_WORK_TASK: u32 = 3;

const WORK_POOL: &[&str] = &[
    "Fix website bug",
    "Review pull requests",
    "Write documentation",
    "Attend team meeting",
    "Debug production issue",
    "Implement new feature",
    "Optimize database queries",
    "Update dependencies",
];

const CORRUPTED_WORK_POOL: &[&str] = &[
    "Fix the bug that keeps watching you",
    "Review pull requests from an unknown author",
    "Write documentation for a body that isn't yours",
    "Attend a meeting nobody else joins",
    "Debug the breathing in the walls",
    "Implement the feature it asked for",
    "Optimize the queries that return your name",
    "Update dependencies you never installed",
];

const HOUSEWORK_POOL: &[(&str, Action)] = &[
    ("Take a shower", Action::Shower),
    ("Do laundry", Action::WashClothes),
    ("Change clothes", Action::ChangeClothes),
    ("Water the plants", Action::WaterPlants),
    ("Cook a meal", Action::Cook),
    ("Clean the floor", Action::CleanFloor),
];

const CORRUPTED_HOUSEWORK_POOL: &[(&str, Action)] = &[
    ("Wash off what isn't water", Action::Shower),
    ("Launder the stained shirt", Action::WashClothes),
    ("Change out of someone else's clothes", Action::ChangeClothes),
    ("Water the plants that lean toward the study", Action::WaterPlants),
    ("Cook for two", Action::Cook),
    ("Scrub the footprints off the floor", Action::CleanFloor),
];

/// Which list a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Work,
    Housework,
}

/// A single objective for the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub description: String,
    pub location: LocationId,
    pub action: Action,
    pub kind: TaskKind,
    pub completed: bool,
}

/// Display entry for the task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLine {
    pub description: String,
    pub completed: bool,
}

/// Task list grouped by kind, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub work: Vec<TaskLine>,
    pub housework: Vec<TaskLine>,
}

/// All tasks for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSet {
    day: u32,
    tasks: Vec<Task>,
}

impl TaskSet {
    /// Generate a fresh set for `day`.
    pub fn generate<R: Rng>(day: u32, rng: &mut R) -> Self {
        let corrupted = day >= CORRUPTION_DAY;
        let work_pool = if corrupted { CORRUPTED_WORK_POOL } else { WORK_POOL };
        let housework_pool = if corrupted {
            CORRUPTED_HOUSEWORK_POOL
        } else {
            HOUSEWORK_POOL
        };

        let work_count = rng.gen_range(2..=3);
        let mut tasks: Vec<Task> = work_pool
            .choose_multiple(rng, work_count)
            .map(|description| Task {
                id: 0,
                description: description.to_string(),
                location: Action::Work.profile().location,
                action: Action::Work,
                kind: TaskKind::Work,
                completed: false,
            })
            .collect();

        tasks.extend(
            housework_pool
                .choose_multiple(rng, HOUSEWORK_PER_DAY)
                .map(|(description, action)| Task {
                    id: 0,
                    description: description.to_string(),
                    location: action.profile().location,
                    action: *action,
                    kind: TaskKind::Housework,
                    completed: false,
                }),
        );

        for (index, task) in tasks.iter_mut().enumerate() {
            task.id = index as u32 + 1;
        }

        Self { day, tasks }
    }

    /// Build a set from explicit tasks (used by tests and debug tooling).
    pub fn from_tasks(day: u32, tasks: Vec<Task>) -> Self {
        Self { day, tasks }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn count(&self, kind: TaskKind) -> usize {
        self.tasks.iter().filter(|t| t.kind == kind).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn all_completed(&self) -> bool {
        self.tasks.iter().all(|t| t.completed)
    }

    /// First uncompleted work task in insertion order.
    pub fn next_work(&self) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| t.kind == TaskKind::Work && !t.completed)
    }

    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Mark the first uncompleted task for this location and action as done.
    /// Returns its id.
    pub fn complete_matching(&mut self, location: LocationId, action: Action) -> Option<u32> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.location == location && t.action == action && !t.completed)?;
        task.completed = true;
        Some(task.id)
    }

    /// Mark a task done by id. Returns false if it was unknown or already done.
    pub fn complete_id(&mut self, id: u32) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id && !t.completed) {
            Some(task) => {
                task.completed = true;
                true
            }
            None => false,
        }
    }

    /// Mark everything done.
    pub fn complete_all(&mut self) {
        for task in &mut self.tasks {
            task.completed = true;
        }
    }

    /// Work hours accounted for by completed work tasks.
    pub fn work_hours(&self) -> u32 {
        self.tasks
            .iter()
            .filter(|t| t.kind == TaskKind::Work && t.completed)
            .count() as u32
            * HOURS_PER_WORK_TASK
    }

    pub fn snapshot(&self) -> TaskSnapshot {
        let lines = |kind: TaskKind| {
            self.tasks
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| TaskLine {
                    description: t.description.clone(),
                    completed: t.completed,
                })
                .collect()
        };
        TaskSnapshot {
            work: lines(TaskKind::Work),
            housework: lines(TaskKind::Housework),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_generation_counts() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = TaskSet::generate(1, &mut rng);
            let work = set.count(TaskKind::Work);
            assert!((2..=3).contains(&work), "seed {seed}: {work} work tasks");
            assert_eq!(set.count(TaskKind::Housework), HOUSEWORK_PER_DAY);
            assert!(set.tasks().iter().all(|t| !t.completed));
        }
    }

    #[test]
    fn test_work_tasks_come_first_with_unique_ids() {
        let mut rng = StdRng::seed_from_u64(7);
        let set = TaskSet::generate(2, &mut rng);
        let first_housework = set
            .tasks()
            .iter()
            .position(|t| t.kind == TaskKind::Housework)
            .unwrap();
        assert!(set.tasks()[..first_housework]
            .iter()
            .all(|t| t.kind == TaskKind::Work && t.location == LocationId::Desk));
        let ids: HashSet<u32> = set.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), set.len());
    }

    #[test]
    fn test_corrupted_pool_from_day_seven() {
        let mut rng = StdRng::seed_from_u64(3);
        let set = TaskSet::generate(CORRUPTION_DAY, &mut rng);
        assert!(set
            .tasks()
            .iter()
            .filter(|t| t.kind == TaskKind::Work)
            .all(|t| CORRUPTED_WORK_POOL.contains(&t.description.as_str())));
    }

    #[test]
    fn test_next_work_and_completion() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut set = TaskSet::generate(1, &mut rng);
        let first = set.next_work().unwrap().id;
        assert!(set.complete_id(first));
        assert!(!set.complete_id(first));
        assert_ne!(set.next_work().map(|t| t.id), Some(first));
        assert_eq!(set.work_hours(), HOURS_PER_WORK_TASK);
    }

    #[test]
    fn test_complete_matching_ignores_unknown_pairs() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut set = TaskSet::generate(1, &mut rng);
        assert_eq!(set.complete_matching(LocationId::Fridge, Action::Eat), None);
        assert_eq!(set.completed_count(), 0);
    }

    #[test]
    fn test_snapshot_groups_by_kind() {
        let mut rng = StdRng::seed_from_u64(9);
        let set = TaskSet::generate(1, &mut rng);
        let snapshot = set.snapshot();
        assert_eq!(snapshot.work.len(), set.count(TaskKind::Work));
        assert_eq!(snapshot.housework.len(), HOUSEWORK_PER_DAY);
    }
}
