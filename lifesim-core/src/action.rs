//! Location-bound actions and their fixed effects.
//!
//! Every verb that does something at a place in the house is an [`Action`].
//! The [`ActionProfile`] table holds the required location, how long the
//! action takes in real time, how much game time it costs and what it does
//! to the meters.

use crate::location::LocationId;
use crate::status::Meter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A location-bound action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Eat,
    Sleep,
    Shower,
    Work,
    WatchTv,
    WaterPlants,
    ChangeClothes,
    Relax,
    Read,
    Cook,
    WashHands,
    WashClothes,
    CleanFloor,
    CheckBody,
}

/// Static description of an action.
#[derive(Debug, Clone, Copy)]
pub struct ActionProfile {
    pub location: LocationId,
    /// Phrase completing "Must be at <LOCATION> to ...".
    pub requirement: &'static str,
    /// Real time before the effects land.
    pub delay: Duration,
    /// Game minutes consumed.
    pub minutes: u32,
    pub deltas: &'static [(Meter, f32)],
    pub start_text: &'static str,
    pub complete_text: &'static str,
}

impl Action {
    pub const ALL: [Action; 14] = [
        Action::Eat,
        Action::Sleep,
        Action::Shower,
        Action::Work,
        Action::WatchTv,
        Action::WaterPlants,
        Action::ChangeClothes,
        Action::Relax,
        Action::Read,
        Action::Cook,
        Action::WashHands,
        Action::WashClothes,
        Action::CleanFloor,
        Action::CheckBody,
    ];

    /// The verb as typed by the player (lowercase, parentheses stripped).
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Eat => "eat",
            Action::Sleep => "sleep",
            Action::Shower => "shower",
            Action::Work => "work",
            Action::WatchTv => "watchtv",
            Action::WaterPlants => "waterplants",
            Action::ChangeClothes => "changeclothes",
            Action::Relax => "relax",
            Action::Read => "read",
            Action::Cook => "cook",
            Action::WashHands => "washhands",
            Action::WashClothes => "washclothes",
            Action::CleanFloor => "cleanfloor",
            Action::CheckBody => "checkbody",
        }
    }

    pub fn from_verb(verb: &str) -> Option<Action> {
        Self::ALL.iter().copied().find(|a| a.verb() == verb)
    }

    /// Whether the hunger/sanity gate is consulted before this action.
    pub fn is_status_gated(&self) -> bool {
        !matches!(self, Action::Eat | Action::Cook | Action::Sleep | Action::CheckBody)
    }

    pub fn profile(&self) -> ActionProfile {
        use Meter::*;
        match self {
            Action::Eat => ActionProfile {
                location: LocationId::Fridge,
                requirement: "eat",
                delay: Duration::ZERO,
                minutes: 0,
                deltas: &[(Hunger, 30.0)],
                start_text: "Opening the fridge...",
                complete_text: "Food consumed",
            },
            Action::Sleep => ActionProfile {
                location: LocationId::Bed,
                requirement: "sleep",
                delay: Duration::ZERO,
                minutes: 0,
                deltas: &[],
                start_text: "Lying down...",
                complete_text: "You drift off to sleep.",
            },
            Action::Shower => ActionProfile {
                location: LocationId::Shower,
                requirement: "take a shower",
                delay: Duration::from_secs(3),
                minutes: 15,
                deltas: &[(Cleanliness, 50.0), (Hunger, -5.0)],
                start_text: "Taking a shower...",
                complete_text: "Shower complete. Feeling fresh!",
            },
            Action::Work => ActionProfile {
                location: LocationId::Desk,
                requirement: "work",
                delay: Duration::from_secs(5),
                minutes: 180,
                deltas: &[(Sanity, -10.0), (Hunger, -25.0)],
                start_text: "Working...",
                complete_text: "Completed task",
            },
            Action::WatchTv => ActionProfile {
                location: LocationId::Sofa,
                requirement: "watch television",
                delay: Duration::from_secs(3),
                minutes: 0,
                deltas: &[(Sanity, 15.0)],
                start_text: "Watching TV while relaxing on the sofa...",
                complete_text: "Entertainment time complete. Feeling relaxed!",
            },
            Action::WaterPlants => ActionProfile {
                location: LocationId::Plants,
                requirement: "water them",
                delay: Duration::from_secs(2),
                minutes: 10,
                deltas: &[(Sanity, 5.0), (Hunger, -5.0)],
                start_text: "Watering plants...",
                complete_text: "Plants watered. The greenery is soothing.",
            },
            Action::ChangeClothes => ActionProfile {
                location: LocationId::Wardrobe,
                requirement: "change clothes",
                delay: Duration::from_secs(2),
                minutes: 10,
                deltas: &[(Cleanliness, 20.0), (Hunger, -3.0)],
                start_text: "Changing clothes...",
                complete_text: "Changed into fresh clothes. Feeling neat!",
            },
            Action::Relax => ActionProfile {
                location: LocationId::Chair,
                requirement: "relax",
                delay: Duration::from_secs(3),
                minutes: 0,
                deltas: &[(Sanity, 25.0)],
                start_text: "Relaxing on the balcony...",
                complete_text: "Fresh air and city views are refreshing!",
            },
            Action::Read => ActionProfile {
                location: LocationId::Bookshelf,
                requirement: "read",
                delay: Duration::from_secs(4),
                minutes: 0,
                deltas: &[(Sanity, 20.0)],
                start_text: "Reading a book...",
                complete_text: "Finished reading. Gained some knowledge!",
            },
            Action::Cook => ActionProfile {
                location: LocationId::Stove,
                requirement: "cook",
                delay: Duration::from_secs(4),
                minutes: 30,
                deltas: &[(Hunger, 60.0)],
                start_text: "Cooking a meal...",
                complete_text: "Meal prepared and eaten. Delicious!",
            },
            Action::WashHands => ActionProfile {
                location: LocationId::Sink,
                requirement: "wash hands",
                delay: Duration::from_secs(1),
                minutes: 0,
                deltas: &[(Cleanliness, 10.0)],
                start_text: "Washing hands...",
                complete_text: "Hands clean!",
            },
            Action::WashClothes => ActionProfile {
                location: LocationId::Washer,
                requirement: "wash clothes",
                delay: Duration::from_secs(4),
                minutes: 30,
                deltas: &[(Cleanliness, 40.0), (Hunger, -8.0)],
                start_text: "Washing clothes...",
                complete_text: "Laundry complete! Your clothes are fresh and clean.",
            },
            Action::CleanFloor => ActionProfile {
                location: LocationId::Living,
                requirement: "clean the floor",
                delay: Duration::from_secs(3),
                minutes: 20,
                deltas: &[(Cleanliness, 30.0), (Hunger, -10.0)],
                start_text: "Mopping the floor...",
                complete_text: "The floor is spotless.",
            },
            Action::CheckBody => ActionProfile {
                location: LocationId::Desk,
                requirement: "check on your body",
                delay: Duration::from_secs(2),
                minutes: 0,
                deltas: &[],
                start_text: "You lean in to look at your body...",
                complete_text: "Your body is still typing. Its breathing is slow and even.",
            },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_verb(action.verb()), Some(action));
        }
        assert_eq!(Action::from_verb("dance"), None);
    }

    #[test]
    fn test_gate_exemptions() {
        assert!(!Action::Eat.is_status_gated());
        assert!(!Action::Cook.is_status_gated());
        assert!(!Action::Sleep.is_status_gated());
        assert!(Action::Work.is_status_gated());
        assert!(Action::Read.is_status_gated());
    }

    #[test]
    fn test_work_profile() {
        let profile = Action::Work.profile();
        assert_eq!(profile.location, LocationId::Desk);
        assert_eq!(profile.minutes, 180);
        assert!(profile.deltas.contains(&(Meter::Sanity, -10.0)));
        assert!(profile.deltas.contains(&(Meter::Hunger, -25.0)));
    }
}
