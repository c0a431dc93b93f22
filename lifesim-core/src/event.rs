//! Output events consumed by a presentation layer.
//!
//! The engine never draws anything itself. Every observable change is
//! reported as a [`GameEvent`]; a frontend decides how to show it.

use crate::clock::Clock;
use crate::location::LocationId;
use crate::status::StatusModel;
use crate::task::TaskSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogKind {
    System,
    Error,
    Warning,
    Tutorial,
    Story,
}

impl LogKind {
    pub fn label(&self) -> &'static str {
        match self {
            LogKind::System => "SYSTEM",
            LogKind::Error => "ERROR",
            LogKind::Warning => "WARNING",
            LogKind::Tutorial => "TUTORIAL",
            LogKind::Story => "STORY",
        }
    }

    /// Styling hint for the presentation layer.
    pub fn style_class(&self) -> Option<&'static str> {
        match self {
            LogKind::Error => Some("error"),
            LogKind::Warning => Some("warning"),
            LogKind::Story => Some("story"),
            LogKind::System | LogKind::Tutorial => None,
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Status bar percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBars {
    pub health: u8,
    pub hunger: u8,
    pub cleanliness: u8,
    pub sanity: u8,
}

impl From<&StatusModel> for StatusBars {
    fn from(status: &StatusModel) -> Self {
        let [health, hunger, cleanliness, sanity] = status.percentages();
        Self {
            health,
            hunger,
            cleanliness,
            sanity,
        }
    }
}

/// Something the presentation layer should show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Raw input echoed to the transcript.
    Echo { input: String },
    /// Categorized log line.
    Log { kind: LogKind, message: String },
    /// Plain transcript output (help, status, ...).
    Transcript { line: String },
    StatusBars(StatusBars),
    Tasks(TaskSnapshot),
    Clock(Clock),
    /// Redraw the map with the soul's position and the entity marker.
    MapRedraw {
        position: Option<LocationId>,
        entity: Option<LocationId>,
    },
    InputEnabled { enabled: bool },
    /// Show the end-of-day modal.
    DayEnd { day: u32, summary: String },
    /// Blank out the terminal; nothing follows.
    GameOver,
}

impl GameEvent {
    pub fn log(kind: LogKind, message: impl Into<String>) -> Self {
        GameEvent::Log {
            kind,
            message: message.into(),
        }
    }

    pub fn transcript(line: impl Into<String>) -> Self {
        GameEvent::Transcript { line: line.into() }
    }

    /// The message if this is a log line of the given kind.
    pub fn log_message(&self, wanted: LogKind) -> Option<&str> {
        match self {
            GameEvent::Log { kind, message } if *kind == wanted => Some(message),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.log_message(LogKind::Error).is_some()
    }
}
