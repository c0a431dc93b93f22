//! The single game-state aggregate.

use crate::clock::Clock;
use crate::help::Tutorial;
use crate::location::LocationId;
use crate::narrative::NarrativeState;
use crate::status::StatusModel;
use crate::task::TaskSet;
use uuid::Uuid;

/// The soul: meters plus where it is standing. A position of `None` means
/// the soul is off the map (hiding).
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub status: StatusModel,
    pub position: Option<LocationId>,
}

impl PlayerState {
    pub fn new(position: LocationId) -> Self {
        Self {
            status: StatusModel::new(),
            position: Some(position),
        }
    }

    pub fn is_at(&self, location: LocationId) -> bool {
        self.position == Some(location)
    }

    /// Position as shown to the player.
    pub fn position_name(&self) -> &'static str {
        self.position.map(|p| p.name()).unwrap_or("UNKNOWN")
    }
}

/// Everything the simulation owns. Mutated only by the engine.
#[derive(Debug, Clone)]
pub struct GameState {
    pub session_id: Uuid,
    pub player: PlayerState,
    pub clock: Clock,
    pub tasks: TaskSet,
    pub narrative: NarrativeState,
    /// False while a scripted event holds the terminal.
    pub input_enabled: bool,
    /// Set between a successful `sleep` and the next morning.
    pub transition_pending: bool,
    /// Active tutorial, if any.
    pub tutorial: Option<Tutorial>,
    pub game_over: bool,
}

impl GameState {
    pub fn new(tasks: TaskSet, start: LocationId) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            player: PlayerState::new(start),
            clock: Clock::default(),
            tasks,
            narrative: NarrativeState::default(),
            input_enabled: true,
            transition_pending: false,
            tutorial: None,
            game_over: false,
        }
    }

    pub fn day(&self) -> u32 {
        self.clock.day
    }
}
