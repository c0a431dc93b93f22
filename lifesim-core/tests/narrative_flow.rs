//! The story arc: the day-10 choice, both branches and the ending.

use lifesim_core::testing::{assert_logged, assert_no_error, assert_position, messages, TestHarness};
use lifesim_core::{GameEvent, JobKind, LocationId, LogKind, NarrativePhase, StoryBranch};

fn at_encounter() -> TestHarness {
    let mut harness = TestHarness::new();
    harness.goto_day(10);
    assert_eq!(harness.phase(), NarrativePhase::ChoicePending);
    harness
}

#[test]
fn test_hide_branch() {
    let mut harness = at_encounter();

    let events = harness.input("hide()");
    assert_no_error(&events);
    assert_eq!(harness.flags().story_branch, Some(StoryBranch::Hide));
    assert_eq!(harness.phase(), NarrativePhase::HideSequence);
    assert_eq!(harness.position(), None);

    let events = harness.input("lock()");
    assert_logged(&events, LogKind::Error, "already made your choice");
    assert_eq!(harness.flags().story_branch, Some(StoryBranch::Hide));

    harness.settle();
    assert_position(&harness, LocationId::Bedroom);
    assert_eq!(harness.phase(), NarrativePhase::Normal);
    assert!(harness.flags().can_move);
    assert!(!harness.flags().day10_event_active);
    assert_eq!(harness.engine.state().narrative.entity, None);
    assert!(!harness.flags().body_compromised);

    let events = harness.input("move.to(KITCHEN)");
    assert_no_error(&events);
}

#[test]
fn test_early_choice_drops_pending_beats() {
    let mut harness = TestHarness::new();
    harness.input("test.day(10)");
    harness.input("lock()");
    harness.settle();

    let warnings = harness.logs(LogKind::Warning);
    assert!(!warnings.contains(&"Something is standing in the living room."));
    assert!(warnings.contains(&"The handle rattles. Then it walks away, into the study."));
    assert_eq!(harness.phase(), NarrativePhase::Normal);
}

#[test]
fn test_choice_outside_encounter() {
    let mut harness = TestHarness::new();
    let events = harness.input("hide()");
    assert_logged(&events, LogKind::Error, "nothing to hide from");
}

#[test]
fn test_lock_branch_to_the_end() {
    let mut harness = at_encounter();

    // Day 10: lock the door.
    harness.run("lock()");
    assert_eq!(harness.flags().story_branch, Some(StoryBranch::Lock));
    assert!(harness.flags().body_compromised);
    assert_eq!(harness.phase(), NarrativePhase::Normal);
    assert_position(&harness, LocationId::Bed);

    harness.place(LocationId::Desk);
    let events = harness.run("checkBody()");
    assert_logged(&events, LogKind::Warning, "The words on the screen are not yours.");
    assert!(!harness.flags().need_check_body);

    // Day 11: waking in the wrong room.
    harness.sleep_through();
    assert_eq!(harness.day(), 11);
    assert_position(&harness, LocationId::Kitchen);
    assert_logged(&harness.events, LogKind::Warning, "This is not where you fell asleep.");

    // Day 12: the body is gone.
    harness.sleep_through();
    assert_eq!(harness.day(), 12);
    assert_position(&harness, LocationId::Desk);
    assert_eq!(harness.phase(), NarrativePhase::CluePhase);
    assert!(harness.flags().physical_body_missing);

    let events = harness.input("checkBody()");
    assert_logged(&events, LogKind::Warning, "Your body is gone.");

    let events = harness.input("scan()");
    assert_logged(&events, LogKind::Story, "wet footprints");
    assert_eq!(harness.flags().clue_found, 1);

    harness.input("move.to(KITCHEN)");
    let events = harness.input("move.to(DESK)");
    assert_logged(&events, LogKind::Error, "no longer at the DESK");
    assert_position(&harness, LocationId::Kitchen);

    let events = harness.input("scan()");
    assert_logged(&events, LogKind::Warning, "Follow them to the SHOWER");
    assert_eq!(harness.flags().clue_found, 1);

    harness.input("move.to(SHOWER)");
    let events = harness.input("scan()");
    assert_logged(&events, LogKind::Story, "Your hair.");
    assert_eq!(harness.flags().clue_found, 2);
    assert!(!harness.flags().need_check_body);

    // Tasks are not required tonight.
    harness.input("move.to(BED)");
    let events = harness.run("sleep()");
    assert_no_error(&events);
    assert_eq!(harness.day(), 13);

    // Day 13: the knife.
    assert_position(&harness, LocationId::Kitchen);
    assert_eq!(harness.phase(), NarrativePhase::FinalSequence);
    assert_eq!(harness.engine.state().narrative.entity, Some(LocationId::Desk));
    assert!(harness.flags().final_day);

    let events = harness.input("status()");
    assert_logged(&events, LogKind::Error, "grab() or stab()");
    let events = harness.input("stab()");
    assert_logged(&events, LogKind::Error, "grab() the knife first");

    let events = harness.input("grab()");
    assert_no_error(&events);
    assert!(harness.flags().has_knife);
    assert_position(&harness, LocationId::Desk);

    let events = harness.input("grab()");
    assert_logged(&events, LogKind::Error, "already holding the knife");

    harness.input("stab()");
    assert_eq!(harness.phase(), NarrativePhase::Terminated);
    assert!(harness.input("help").is_empty());

    let events = harness.settle();
    assert!(events.contains(&GameEvent::GameOver));
    assert!(harness.engine.is_over());
    assert!(harness.input("help").is_empty());
    assert!(harness.input("test.day(1)").is_empty());
    assert_eq!(harness.day(), 13);
}

#[test]
fn test_debug_jump_to_clue_day_assumes_lock() {
    let mut harness = TestHarness::new();
    let events = harness.goto_day(12);

    assert_logged(&events, LogKind::System, "Debug: jumping to day 12");
    assert_eq!(harness.flags().story_branch, Some(StoryBranch::Lock));
    assert!(harness.flags().body_compromised);
    assert_eq!(harness.phase(), NarrativePhase::CluePhase);
    assert_eq!(harness.flags().clue_found, 0);
}

#[test]
fn test_debug_jump_discards_story_beats() {
    let mut harness = TestHarness::new();
    harness.input("test.day(10)");
    assert!(harness.engine.pending_jobs(JobKind::Narrative) > 0);

    harness.input("test.day(3)");
    assert_eq!(harness.engine.pending_jobs(JobKind::Narrative), 0);
    assert_eq!(harness.day(), 3);
    assert_eq!(harness.phase(), NarrativePhase::Normal);
    assert!(harness.flags().can_move);
    assert!(!harness.flags().day10_event_active);

    harness.settle();
    let stories = messages(&harness.events, LogKind::Story);
    assert!(!stories.iter().any(|m| m.starts_with("Decide now")));
}

#[test]
fn test_encounter_replays_after_jumping_back() {
    let mut harness = at_encounter();
    harness.run("hide()");
    harness.goto_day(10);
    assert_eq!(harness.phase(), NarrativePhase::ChoicePending);
    assert_eq!(harness.flags().story_branch, None);
}

#[test]
fn test_clue_day_sleep_skips_tasks_and_body_check() {
    let mut harness = TestHarness::new();
    harness.goto_day(12);
    assert!(harness.flags().need_check_body);
    assert!(!harness.engine.state().tasks.all_completed());
    assert_eq!(harness.flags().clue_found, 0);

    harness.input("move.to(BED)");
    let events = harness.run("sleep()");

    assert_no_error(&events);
    assert_logged(&events, LogKind::Story, "Sleep takes you anyway");
    assert_eq!(harness.day(), 13);
    assert_eq!(harness.phase(), NarrativePhase::FinalSequence);
}

#[test]
fn test_sleep_on_last_representable_day() {
    let mut harness = TestHarness::new();
    harness.goto_day(u32::MAX);
    assert_eq!(harness.day(), u32::MAX);

    let events = harness.sleep_through();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::DayEnd { day: u32::MAX, .. })));
    assert_eq!(harness.day(), u32::MAX);
    assert!(!harness.engine.state().transition_pending);
}
