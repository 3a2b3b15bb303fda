//! Damage tiers and integrity.

use serde::{Deserialize, Serialize};

use crate::core::config::SupermatterConfig;
use crate::core::types::Color;

/// Severity band determined by damage against the configured thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Nominal,
    Warning,
    Emergency,
    /// Past the explosion point
    Terminal,
}

impl Tier {
    /// Whether this tier runs the time-gated announcer
    pub fn announces(self) -> bool {
        matches!(self, Tier::Warning | Tier::Emergency)
    }

    /// Light energy and color for this tier; `None` for terminal
    pub fn light(self, config: &SupermatterConfig) -> Option<(f32, Color)> {
        match self {
            Tier::Nominal => Some((config.base_light_energy, config.base_color)),
            Tier::Warning => Some((config.warning_light_energy, config.warning_color)),
            Tier::Emergency => Some((config.emergency_light_energy, config.emergency_color)),
            Tier::Terminal => None,
        }
    }
}

/// Classify damage, most severe first. Boundaries belong to the lower tier.
pub fn classify(damage: f32, config: &SupermatterConfig) -> Tier {
    if damage > config.explosion_point {
        Tier::Terminal
    } else if damage > config.emergency_point {
        Tier::Emergency
    } else if damage > config.warning_point {
        Tier::Warning
    } else {
        Tier::Nominal
    }
}

/// Integrity percentage: 100 when undamaged, 0 at or past the explosion point
pub fn integrity(damage: f32, explosion_point: f32) -> u32 {
    let ratio = damage / explosion_point;
    (100.0 - ratio * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Textual severity shown to onlookers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stability {
    Stable,
    Unstable,
    HighlyUnstable,
}

impl Stability {
    pub fn from_integrity(integrity: u32) -> Self {
        match integrity {
            0..=30 => Stability::HighlyUnstable,
            31..=69 => Stability::Unstable,
            _ => Stability::Stable,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stability::Stable => "The crystal looks stable.",
            Stability::Unstable => "The crystal is humming unsteadily.",
            Stability::HighlyUnstable => "The crystal is violently unstable!",
        }
    }
}
