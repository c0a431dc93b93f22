//! Command parsing and narrative gating.
//!
//! Raw input is parsed into a [`Command`]. `move.to(X)` keeps its argument
//! (uppercased); every other input has its parentheses stripped and is
//! lowercased to obtain the verb. Before dispatch, the current [`Gate`]
//! decides whether the command is allowed at all.

use crate::action::Action;
use crate::narrative::NarrativePhase;
use crate::rules::RuleViolation;
use crate::state::GameState;
use std::fmt;

const MOVE_PREFIX: &str = "move.to(";
const DEBUG_DAY_PREFIX: &str = "test.day(";
const DEBUG_SHORT_PREFIX: &str = "test.";

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// `move.to(X)`; the argument is uppercased and may be empty.
    Move(String),
    Status,
    Scan,
    Tutorial,
    Act(Action),
    Hide,
    Lock,
    Grab,
    Stab,
    /// `test.day(N)` / `test.N`: jump straight to day N.
    DebugDay(u32),
    Unknown(String),
}

impl Command {
    pub fn parse(raw: &str) -> Command {
        let input = raw.trim();
        let lower = input.to_ascii_lowercase();

        if lower.starts_with(MOVE_PREFIX) {
            let arg = &input[MOVE_PREFIX.len()..];
            let arg = arg.strip_suffix(')').unwrap_or(arg);
            return Command::Move(arg.trim().to_ascii_uppercase());
        }

        if let Some(day) = parse_debug_day(&lower) {
            return Command::DebugDay(day);
        }

        let verb: String = lower.chars().filter(|c| *c != '(' && *c != ')').collect();
        match verb.as_str() {
            "help" => Command::Help,
            "status" => Command::Status,
            "scan" => Command::Scan,
            "tutorial" => Command::Tutorial,
            "hide" => Command::Hide,
            "lock" => Command::Lock,
            "grab" => Command::Grab,
            "stab" => Command::Stab,
            other => match Action::from_verb(other) {
                Some(action) => Command::Act(action),
                None => Command::Unknown(verb),
            },
        }
    }

    /// Verb name for diagnostics.
    pub fn verb(&self) -> &str {
        match self {
            Command::Help => "help",
            Command::Move(_) => "move",
            Command::Status => "status",
            Command::Scan => "scan",
            Command::Tutorial => "tutorial",
            Command::Act(action) => action.verb(),
            Command::Hide => "hide",
            Command::Lock => "lock",
            Command::Grab => "grab",
            Command::Stab => "stab",
            Command::DebugDay(_) => "test.day",
            Command::Unknown(verb) => verb,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(arg) => write!(f, "move.to({arg})"),
            Command::DebugDay(day) => write!(f, "test.day({day})"),
            other => write!(f, "{}()", other.verb()),
        }
    }
}

fn parse_debug_day(lower: &str) -> Option<u32> {
    let rest = if let Some(rest) = lower.strip_prefix(DEBUG_DAY_PREFIX) {
        rest.strip_suffix(')')?
    } else {
        lower.strip_prefix(DEBUG_SHORT_PREFIX)?
    };
    rest.trim().parse().ok()
}

/// Which commands the story currently lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Open,
    /// Day-10 choice window: only `hide`/`lock`.
    ChoiceOnly,
    /// Day 13: only `grab`/`stab`.
    FinalOnly,
    /// A scripted event holds the terminal.
    Disabled,
    /// The game is over.
    Closed,
}

impl Gate {
    pub fn current(state: &GameState) -> Gate {
        if state.game_over || state.narrative.phase == NarrativePhase::Terminated {
            Gate::Closed
        } else if !state.input_enabled {
            Gate::Disabled
        } else if state.narrative.flags.choice_window_open() {
            Gate::ChoiceOnly
        } else if state.narrative.flags.final_day {
            Gate::FinalOnly
        } else {
            Gate::Open
        }
    }

    /// Reject commands the gate does not let through. The debug jump passes
    /// every gate except a closed one.
    pub fn check(&self, command: &Command) -> Result<(), RuleViolation> {
        match (self, command) {
            (Gate::Closed, _) => Err(RuleViolation::GameOver),
            (_, Command::DebugDay(_)) => Ok(()),
            (Gate::Disabled, _) => Err(RuleViolation::InputDisabled),
            (Gate::ChoiceOnly, Command::Hide | Command::Lock) => Ok(()),
            (Gate::ChoiceOnly, _) => Err(RuleViolation::ChoiceRequired),
            (Gate::FinalOnly, Command::Grab | Command::Stab) => Ok(()),
            (Gate::FinalOnly, _) => Err(RuleViolation::FinalOnly),
            (Gate::Open, _) => Ok(()),
        }
    }
}
