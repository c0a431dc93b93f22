//! In-game time tracking.
//!
//! The clock counts days, hours and minutes. Minutes roll over into hours,
//! but hours are never wrapped at 24 and never roll over into days: a day
//! only ends when the player sleeps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hour every new day starts at.
pub const DAY_START_HOUR: u32 = 9;

/// Game minutes added by each passive decay tick.
pub const TICK_MINUTES: u32 = 10;

/// In-game day and time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Clock {
    pub fn new(day: u32, hour: u32, minute: u32) -> Self {
        Self { day, hour, minute }
    }

    /// Advance by a number of game minutes.
    ///
    /// Minutes roll over into hours; the hour keeps counting past 23.
    pub fn advance_minutes(&mut self, minutes: u32) {
        let total_minutes = self.minute + minutes;
        self.minute = total_minutes % 60;
        self.hour += total_minutes / 60;
    }

    /// Advance by one passive tick.
    pub fn tick(&mut self) {
        self.advance_minutes(TICK_MINUTES);
    }

    /// Move to the morning of the given day.
    pub fn start_day(&mut self, day: u32) {
        self.day = day;
        self.hour = DAY_START_HOUR;
        self.minute = 0;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(1, DAY_START_HOUR, 0)
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {} - {:02}:{:02}", self.day, self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_rollover() {
        let mut clock = Clock::new(1, 9, 30);
        clock.advance_minutes(75);
        assert_eq!((clock.hour, clock.minute), (10, 45));
    }

    #[test]
    fn test_hour_is_not_wrapped() {
        let mut clock = Clock::new(3, 23, 50);
        clock.advance_minutes(150);
        assert_eq!((clock.day, clock.hour, clock.minute), (3, 26, 20));
    }

    #[test]
    fn test_tick_adds_ten_minutes() {
        let mut clock = Clock::new(1, 9, 55);
        clock.tick();
        assert_eq!((clock.hour, clock.minute), (10, 5));
    }

    #[test]
    fn test_start_day_resets_time() {
        let mut clock = Clock::new(4, 27, 40);
        clock.start_day(5);
        assert_eq!(clock, Clock::new(5, 9, 0));
        assert_eq!(clock.to_string(), "Day 5 - 09:00");
    }
}
