//! Rooms, items and the fixed house layout.
//!
//! Any location is directly addressable by name; there is no adjacency.
//! A position is either a room or an item inside a room.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Every addressable place in the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationId {
    // Rooms
    Bedroom,
    Study,
    Bathroom,
    Kitchen,
    Living,
    Balcony,

    // Items
    Bed,
    Wardrobe,
    Desk,
    Bookshelf,
    Shower,
    Sink,
    Fridge,
    Stove,
    Sofa,
    Tv,
    Washer,
    Plants,
    Chair,
}

/// Map coordinates of a location on the ASCII floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: usize,
    pub y: usize,
}

impl LocationId {
    pub const ROOMS: [LocationId; 6] = [
        LocationId::Bedroom,
        LocationId::Study,
        LocationId::Bathroom,
        LocationId::Kitchen,
        LocationId::Living,
        LocationId::Balcony,
    ];

    pub const ALL: [LocationId; 19] = [
        LocationId::Bedroom,
        LocationId::Study,
        LocationId::Bathroom,
        LocationId::Kitchen,
        LocationId::Living,
        LocationId::Balcony,
        LocationId::Bed,
        LocationId::Wardrobe,
        LocationId::Desk,
        LocationId::Bookshelf,
        LocationId::Shower,
        LocationId::Sink,
        LocationId::Fridge,
        LocationId::Stove,
        LocationId::Sofa,
        LocationId::Tv,
        LocationId::Washer,
        LocationId::Plants,
        LocationId::Chair,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LocationId::Bedroom => "BEDROOM",
            LocationId::Study => "STUDY",
            LocationId::Bathroom => "BATHROOM",
            LocationId::Kitchen => "KITCHEN",
            LocationId::Living => "LIVING",
            LocationId::Balcony => "BALCONY",
            LocationId::Bed => "BED",
            LocationId::Wardrobe => "WARDROBE",
            LocationId::Desk => "DESK",
            LocationId::Bookshelf => "BOOKSHELF",
            LocationId::Shower => "SHOWER",
            LocationId::Sink => "SINK",
            LocationId::Fridge => "FRIDGE",
            LocationId::Stove => "STOVE",
            LocationId::Sofa => "SOFA",
            LocationId::Tv => "TV",
            LocationId::Washer => "WASHER",
            LocationId::Plants => "PLANTS",
            LocationId::Chair => "CHAIR",
        }
    }

    pub fn is_room(&self) -> bool {
        Self::ROOMS.contains(self)
    }

    /// The room an item belongs to; rooms return themselves.
    pub fn room(&self) -> LocationId {
        match self {
            LocationId::Bed | LocationId::Wardrobe => LocationId::Bedroom,
            LocationId::Desk | LocationId::Bookshelf => LocationId::Study,
            LocationId::Shower | LocationId::Sink => LocationId::Bathroom,
            LocationId::Fridge | LocationId::Stove => LocationId::Kitchen,
            LocationId::Sofa | LocationId::Tv => LocationId::Living,
            LocationId::Washer | LocationId::Plants | LocationId::Chair => LocationId::Balcony,
            room => *room,
        }
    }

    /// Items contained in a room, each with the hint shown on arrival.
    pub fn items(&self) -> &'static [(LocationId, &'static str)] {
        match self {
            LocationId::Bedroom => &[
                (LocationId::Bed, "sleep() to end the day"),
                (LocationId::Wardrobe, "changeClothes() to improve cleanliness"),
            ],
            LocationId::Study => &[
                (LocationId::Desk, "work() to code and earn money"),
                (LocationId::Bookshelf, "read() to gain knowledge"),
            ],
            LocationId::Bathroom => &[
                (LocationId::Shower, "shower() to improve cleanliness"),
                (LocationId::Sink, "washHands() to freshen up"),
            ],
            LocationId::Kitchen => &[
                (LocationId::Fridge, "eat() to restore hunger"),
                (LocationId::Stove, "cook() for a better meal"),
            ],
            LocationId::Living => &[
                (LocationId::Sofa, "watchTV() to relax and watch TV"),
                (LocationId::Tv, "move.to(SOFA) to watch TV"),
            ],
            LocationId::Balcony => &[
                (LocationId::Washer, "washClothes() to clean your clothes"),
                (LocationId::Plants, "waterPlants() to improve mood"),
                (LocationId::Chair, "relax() to enjoy fresh air"),
            ],
            _ => &[],
        }
    }

    /// Hint for an item, as listed in its room.
    pub fn item_hint(&self) -> Option<&'static str> {
        self.room()
            .items()
            .iter()
            .find(|(item, _)| item == self)
            .map(|(_, hint)| *hint)
    }

    /// Arrival text for a room.
    pub fn room_description(&self) -> Option<&'static str> {
        match self {
            LocationId::Bedroom => Some("You are in the bedroom. You can move to:"),
            LocationId::Study => Some("You are in the study. You can move to:"),
            LocationId::Bathroom => Some("You are in the bathroom. You can move to:"),
            LocationId::Kitchen => Some("You are in the kitchen. You can move to:"),
            LocationId::Living => Some(
                "You are in the living room. The floor could use cleanfloor(). You can move to:",
            ),
            LocationId::Balcony => Some("You are on the balcony. You can move to:"),
            _ => None,
        }
    }

    /// What `scan()` reports at this location.
    pub fn scan_description(&self) -> &'static str {
        match self {
            LocationId::Desk => "A computer desk with multiple monitors. Your physical body sits here, typing commands endlessly into the terminal while your spirit roams freely.",
            LocationId::Bed => "A comfortable bed in the spacious bedroom, rarely used as your body remains at the desk.",
            LocationId::Shower => "A modern shower in the bright bathroom.",
            LocationId::Sink => "A clean sink with a large mirror.",
            LocationId::Fridge => "A well-stocked fridge in the open-plan kitchen.",
            LocationId::Stove => "A modern cooking station with good ventilation.",
            LocationId::Bookshelf => "A tall bookshelf filled with programming books and novels.",
            LocationId::Sofa => "A comfortable sofa in the living room with a view of the TV.",
            LocationId::Tv => "A large flat-screen TV mounted on the wall.",
            LocationId::Plants => "Some potted plants on the peaceful balcony.",
            LocationId::Chair => "A comfortable outdoor chair perfect for relaxation.",
            LocationId::Wardrobe => "A spacious wardrobe with your clothes neatly organized.",
            LocationId::Washer => "A modern washing machine on the balcony.",
            _ => "Nothing special here",
        }
    }

    /// Fixed position on the floor plan.
    pub fn map_point(&self) -> MapPoint {
        let (x, y) = match self {
            LocationId::Bedroom => (7, 2),
            LocationId::Study => (19, 2),
            LocationId::Bathroom => (27, 2),
            LocationId::Kitchen => (25, 11),
            LocationId::Living => (18, 7),
            LocationId::Balcony => (6, 8),
            LocationId::Bed => (2, 2),
            LocationId::Wardrobe => (10, 2),
            LocationId::Desk => (15, 2),
            LocationId::Bookshelf => (21, 2),
            LocationId::Shower => (26, 2),
            LocationId::Sink => (28, 3),
            LocationId::Fridge => (26, 11),
            LocationId::Stove => (23, 11),
            LocationId::Sofa => (17, 6),
            LocationId::Tv => (21, 6),
            LocationId::Washer => (2, 8),
            LocationId::Plants => (2, 9),
            LocationId::Chair => (4, 9),
        };
        MapPoint { x, y }
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, LocationId> =
        LocationId::ALL.iter().map(|loc| (loc.name(), *loc)).collect();
}

/// Error for names that match neither a room nor an item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid location: {0}")]
pub struct UnknownLocation(pub String);

impl FromStr for LocationId {
    type Err = UnknownLocation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BY_NAME
            .get(s.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| UnknownLocation(s.to_string()))
    }
}

/// Comma-separated room names for the invalid-location hint.
pub fn room_names() -> String {
    LocationId::ROOMS
        .iter()
        .map(|r| r.name())
        .collect::<Vec<_>>()
        .join(", ")
}
