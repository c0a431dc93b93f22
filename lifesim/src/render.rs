//! Plain-text rendering of engine events.

use lifesim_core::{GameEvent, LocationId, StatusBars, TaskSnapshot};

const FLOOR_PLAN: [&str; 13] = [
    "+-------------+-----------+----+",
    "|  BEDROOM    | STUDY    |BATH|",
    "| [___]    [] |[=&=] [#] |[=] |",
    "| BED      W  |DESK   B  | S  |",
    "+------+------+-----------+----+",
    "|      |     LIVING          |",
    "|      | [===]     [##]      |",
    "|BALC  |  SOFA      TV       |",
    "| [W]  |                     |",
    "| P C  |            +--------+",
    "+------+------------+KITCHEN |",
    "                    |[##] F  |",
    "                    +--------+",
];

const BAR_WIDTH: usize = 20;

/// Lines to print for one event. Empty when the event has no text form.
pub fn render_event(event: &GameEvent) -> Vec<String> {
    match event {
        GameEvent::Echo { input } => vec![format!("> {input}")],
        GameEvent::Log { kind, message } => {
            if message.is_empty() {
                vec![format!("[{kind}]")]
            } else {
                vec![format!("[{kind}] {message}")]
            }
        }
        GameEvent::Transcript { line } => vec![line.clone()],
        GameEvent::StatusBars(bars) => render_bars(bars),
        GameEvent::Tasks(snapshot) => render_tasks(snapshot),
        GameEvent::Clock(clock) => vec![format!("[TIME] {clock}")],
        GameEvent::MapRedraw { position, entity } => render_map(*position, *entity),
        GameEvent::InputEnabled { enabled } => {
            let state = if *enabled { "enabled" } else { "disabled" };
            vec![format!("[INPUT] {state}")]
        }
        GameEvent::DayEnd { day, summary } => {
            let mut lines = vec![format!("===== Day {day} Complete =====")];
            lines.extend(summary.lines().map(String::from));
            lines.push("=".repeat(28));
            lines
        }
        GameEvent::GameOver => vec![String::new(), "[GAME OVER]".to_string()],
    }
}

fn bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        percent
    )
}

fn render_bars(bars: &StatusBars) -> Vec<String> {
    vec![
        format!("[STATUS] Health      {}", bar(bars.health)),
        format!("[STATUS] Hunger      {}", bar(bars.hunger)),
        format!("[STATUS] Cleanliness {}", bar(bars.cleanliness)),
        format!("[STATUS] Sanity      {}", bar(bars.sanity)),
    ]
}

fn render_tasks(snapshot: &TaskSnapshot) -> Vec<String> {
    let mut lines = vec!["[TASKS] Work:".to_string()];
    for task in &snapshot.work {
        let mark = if task.completed { 'x' } else { ' ' };
        lines.push(format!("  [{mark}] {}", task.description));
    }
    lines.push("[TASKS] Housework:".to_string());
    for task in &snapshot.housework {
        let mark = if task.completed { 'x' } else { ' ' };
        lines.push(format!("  [{mark}] {}", task.description));
    }
    lines
}

/// Floor plan with `@` for the soul and `X` for the entity.
pub fn render_map(position: Option<LocationId>, entity: Option<LocationId>) -> Vec<String> {
    let mut grid: Vec<Vec<char>> = FLOOR_PLAN.iter().map(|row| row.chars().collect()).collect();
    let mut mark = |location: LocationId, glyph: char| {
        let point = location.map_point();
        if let Some(cell) = grid.get_mut(point.y).and_then(|row| row.get_mut(point.x)) {
            *cell = glyph;
        }
    };
    if let Some(location) = entity {
        mark(location, 'X');
    }
    if let Some(location) = position {
        mark(location, '@');
    }
    grid.into_iter()
        .map(|row| row.into_iter().collect())
        .collect()
}
