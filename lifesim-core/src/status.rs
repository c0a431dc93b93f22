//! The soul's four status meters.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const METER_MIN: f32 = 0.0;
pub const METER_MAX: f32 = 100.0;

/// Below this value the decay tick emits a warning.
pub const WARNING_THRESHOLD: f32 = 20.0;

/// At or below this hunger only eating and cooking are possible.
pub const HUNGER_GATE: f32 = 15.0;

/// At or below this sanity work is refused.
pub const SANITY_GATE: f32 = 20.0;

/// One of the four meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meter {
    Health,
    Hunger,
    Cleanliness,
    Sanity,
}

impl Meter {
    pub const ALL: [Meter; 4] = [Meter::Health, Meter::Hunger, Meter::Cleanliness, Meter::Sanity];

    pub fn name(&self) -> &'static str {
        match self {
            Meter::Health => "Health",
            Meter::Hunger => "Hunger",
            Meter::Cleanliness => "Cleanliness",
            Meter::Sanity => "Sanity",
        }
    }

    /// Amount lost on every decay tick.
    pub fn decay_per_tick(&self) -> f32 {
        match self {
            Meter::Health => 0.0,
            Meter::Hunger => 1.0,
            Meter::Cleanliness => 0.5,
            Meter::Sanity => 0.3,
        }
    }

    /// Warning emitted by the decay tick when the meter is low.
    pub fn low_warning(&self) -> Option<&'static str> {
        match self {
            Meter::Health => None,
            Meter::Hunger => Some("Hunger level critical"),
            Meter::Cleanliness => Some("Cleanliness level low"),
            Meter::Sanity => Some("Mental state unstable"),
        }
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The four bounded meters. Every value stays within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusModel {
    health: f32,
    hunger: f32,
    cleanliness: f32,
    sanity: f32,
}

impl StatusModel {
    pub fn new() -> Self {
        Self {
            health: METER_MAX,
            hunger: METER_MAX,
            cleanliness: METER_MAX,
            sanity: METER_MAX,
        }
    }

    pub fn get(&self, meter: Meter) -> f32 {
        match meter {
            Meter::Health => self.health,
            Meter::Hunger => self.hunger,
            Meter::Cleanliness => self.cleanliness,
            Meter::Sanity => self.sanity,
        }
    }

    fn slot(&mut self, meter: Meter) -> &mut f32 {
        match meter {
            Meter::Health => &mut self.health,
            Meter::Hunger => &mut self.hunger,
            Meter::Cleanliness => &mut self.cleanliness,
            Meter::Sanity => &mut self.sanity,
        }
    }

    /// Set a meter, clamping into range.
    pub fn set(&mut self, meter: Meter, value: f32) {
        *self.slot(meter) = value.clamp(METER_MIN, METER_MAX);
    }

    /// Apply a signed delta and return the new value.
    pub fn adjust(&mut self, meter: Meter, delta: f32) -> f32 {
        let slot = self.slot(meter);
        *slot = (*slot + delta).clamp(METER_MIN, METER_MAX);
        *slot
    }

    pub fn is_full(&self, meter: Meter) -> bool {
        self.get(meter) >= METER_MAX
    }

    /// Apply one decay tick and return the meters that are now below the
    /// warning threshold.
    pub fn decay(&mut self) -> Vec<Meter> {
        let mut low = Vec::new();
        for meter in Meter::ALL {
            let decay = meter.decay_per_tick();
            if decay > 0.0 {
                let value = self.adjust(meter, -decay);
                if value < WARNING_THRESHOLD {
                    low.push(meter);
                }
            }
        }
        low
    }

    /// Whole-number percentages for display, in `Meter::ALL` order.
    pub fn percentages(&self) -> [u8; 4] {
        Meter::ALL.map(|m| self.get(m).round() as u8)
    }
}

impl Default for StatusModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a meter value the way the status screen shows it.
pub fn format_percent(value: f32) -> String {
    if value.fract().abs() < f32::EPSILON {
        format!("{value:.0}%")
    } else {
        format!("{value:.1}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_clamps_high() {
        let mut status = StatusModel::new();
        status.set(Meter::Hunger, 90.0);
        assert_eq!(status.adjust(Meter::Hunger, 30.0), 100.0);
    }

    #[test]
    fn test_adjust_clamps_low() {
        let mut status = StatusModel::new();
        status.set(Meter::Sanity, 5.0);
        assert_eq!(status.adjust(Meter::Sanity, -1000.0), 0.0);
        status.set(Meter::Sanity, 250.0);
        assert_eq!(status.get(Meter::Sanity), 100.0);
    }

    #[test]
    fn test_decay_rates() {
        let mut status = StatusModel::new();
        let low = status.decay();
        assert!(low.is_empty());
        assert_eq!(status.get(Meter::Hunger), 99.0);
        assert_eq!(status.get(Meter::Cleanliness), 99.5);
        assert!((status.get(Meter::Sanity) - 99.7).abs() < 1e-4);
        assert_eq!(status.get(Meter::Health), 100.0);
    }

    #[test]
    fn test_decay_floors_at_zero_and_warns() {
        let mut status = StatusModel::new();
        status.set(Meter::Hunger, 0.5);
        status.set(Meter::Cleanliness, 19.0);
        let low = status.decay();
        assert_eq!(status.get(Meter::Hunger), 0.0);
        assert!(low.contains(&Meter::Hunger));
        assert!(low.contains(&Meter::Cleanliness));
        assert!(!low.contains(&Meter::Sanity));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(80.0), "80%");
        assert_eq!(format_percent(99.5), "99.5%");
    }
}
