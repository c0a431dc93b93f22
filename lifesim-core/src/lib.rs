//! Game state and progression engine for the programmer's life simulator.
//!
//! A soul wanders a small apartment while its body types at the desk. The
//! player keeps four meters up, finishes a daily task list and sleeps to end
//! the day; over thirteen days the house stops behaving.
//!
//! This crate is the whole simulation and nothing else:
//!
//! - [`clock`], [`status`], [`task`], [`location`], [`action`]: the
//!   day-to-day model
//! - [`narrative`] and [`schedule`]: story flags, phases and the per-day
//!   table
//! - [`command`] and [`rules`]: input parsing, gating and action resolution
//! - [`timeline`]: the cooperative scheduler behind every delay
//! - [`engine`] and [`day_cycle`]: the facade drivers talk to
//!
//! Rendering is left to the caller, which consumes [`GameEvent`]s.
//!
//! ```
//! use lifesim_core::{EngineConfig, GameEngine};
//! use std::time::Duration;
//!
//! let mut engine = GameEngine::new(EngineConfig::new().with_seed(1));
//! let _welcome = engine.start();
//! let _events = engine.submit("move.to(BOOKSHELF)");
//! let _events = engine.submit("read()");
//! let _later = engine.advance(Duration::from_secs(5));
//! ```

pub mod action;
pub mod clock;
pub mod command;
pub mod config;
pub mod day_cycle;
pub mod engine;
pub mod event;
pub mod help;
pub mod location;
pub mod narrative;
pub mod rules;
pub mod schedule;
pub mod state;
pub mod status;
pub mod task;
pub mod testing;
pub mod timeline;

pub use action::{Action, ActionProfile};
pub use clock::Clock;
pub use command::{Command, Gate};
pub use config::{ConfigError, EngineConfig};
pub use engine::GameEngine;
pub use event::{GameEvent, LogKind, StatusBars};
pub use location::{LocationId, MapPoint, UnknownLocation};
pub use narrative::{NarrativeFlags, NarrativePhase, NarrativeState, StoryBranch};
pub use rules::{Effect, Resolution, RuleViolation, RulesEngine};
pub use state::{GameState, PlayerState};
pub use status::{Meter, StatusModel};
pub use task::{Task, TaskKind, TaskSet, TaskSnapshot};
pub use timeline::{JobKind, Timeline};
