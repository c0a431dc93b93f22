//! Help text and the guided tutorial.

use crate::location::LocationId;

pub const WELCOME: &str = "=== Welcome to Programmer's Life Simulator ===";
pub const MAP_LEGEND: &str = "Map Legend: @ - Your spirit, & - Your physical body";

/// Lines printed by `help`.
pub fn help_lines() -> Vec<String> {
    let mut lines = vec![
        "help - Show command list".to_string(),
        "tutorial - Start the interactive tutorial".to_string(),
        "move.to(location) - Move to a location:".to_string(),
    ];
    for room in LocationId::ROOMS {
        let items: Vec<String> = room
            .items()
            .iter()
            .map(|(item, _)| item.name().to_ascii_lowercase())
            .collect();
        lines.push(format!("  {}: {}", title_case(room.name()), items.join(", ")));
    }
    lines.extend(
        [
            "status() - Show current status",
            "scan() - Scan surroundings",
            "",
            "You can also move directly to specific items. When at an item, you can interact with it.",
        ]
        .map(String::from),
    );
    lines
}

fn title_case(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

struct Section {
    title: &'static str,
    content: &'static [&'static str],
}

const SECTIONS: &[Section] = &[
    Section {
        title: "Basic Controls Guide",
        content: &[
            "Welcome to the Programmer's Life Simulator. You need to balance your basic needs while coding.",
            "The @ symbol on the map marks your current position.",
            "You can use these basic commands:",
            "1. move.to(location) - Move to a specific location",
            "2. status() - Check your current status",
            "3. scan() - Look around your environment",
            "4. help - Show all available commands",
        ],
    },
    Section {
        title: "Rooms and Locations",
        content: &[
            "The house is divided into these areas:",
            "- Bedroom: Has a bed(BED) and wardrobe(WARDROBE)",
            "- Study: Has a desk(DESK) and bookshelf(BOOKSHELF)",
            "- Bathroom: Has a shower(SHOWER) and sink(SINK)",
            "- Kitchen: Has a fridge(FRIDGE) and stove(STOVE)",
            "- Living Room: Has a sofa(SOFA) and TV(TV)",
            "- Balcony: Has a washer(WASHER), plants(PLANTS) and chair(CHAIR)",
        ],
    },
    Section {
        title: "Daily Activities",
        content: &[
            "Different locations allow different activities:",
            "- At bed: sleep() - End the day once your tasks are done",
            "- At shower: shower() - Improve cleanliness",
            "- At fridge: eat() - Restore hunger",
            "- At desk: work() - Code and work",
            "- At sofa: watchTV() - Relax",
            "- At washer: washClothes() - Clean your clothes",
            "- At chair: relax() - Enjoy fresh air",
        ],
    },
    Section {
        title: "Status Management",
        content: &[
            "You need to monitor these status bars:",
            "- Hunger: Need regular meals from fridge",
            "- Clean: Need showers and change of clothes",
            "- Sanity: Need rest and entertainment",
            "You'll receive warnings when any status drops below 20%",
        ],
    },
    Section {
        title: "Example Actions",
        content: &[
            "For example, to go to sleep:",
            "1. Type move.to(bed) to move to the bed",
            "2. Type sleep() to start sleeping",
            "",
            "To take a shower:",
            "1. Type move.to(shower) to move to the shower",
            "2. Type shower() to start showering",
        ],
    },
];

pub const TUTORIAL_INTRO: &str = "Press ENTER to continue through the tutorial...";
pub const TUTORIAL_DONE: [&str; 2] = [
    "Tutorial completed! Try typing \"help\" to see all commands, or \"scan()\" to check your surroundings.",
    "Enjoy your game!",
];

/// Position inside the tutorial. While one exists, submitted lines only
/// advance it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tutorial {
    section: usize,
    line: usize,
}

/// What the next step of the tutorial shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TutorialStep {
    Lines(Vec<String>),
    Finished,
}

impl Tutorial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one line. A section header is shown together with the
    /// section's first line and a blank line closes each section.
    pub fn advance(&mut self) -> TutorialStep {
        let Some(section) = SECTIONS.get(self.section) else {
            return TutorialStep::Finished;
        };
        let mut lines = Vec::new();
        if self.line == 0 {
            lines.push(format!("=== {} ===", section.title));
        }
        match section.content.get(self.line) {
            Some(line) => {
                lines.push(line.to_string());
                self.line += 1;
            }
            None => {
                lines.push(String::new());
                self.section += 1;
                self.line = 0;
            }
        }
        TutorialStep::Lines(lines)
    }
}
