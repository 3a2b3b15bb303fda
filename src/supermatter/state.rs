//! Per-instance mutable state and the optional presentation components.

use serde::{Deserialize, Serialize};

use crate::core::types::{Color, Seconds};
use crate::supermatter::announcer::AlertState;
use crate::supermatter::threshold::Tier;

/// Mutable record for one core. No behavior of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupermatterState {
    pub damage: f32,
    /// Damage before the most recent damage step
    pub damage_archived: f32,
    pub power: f32,
    /// Tick time banked toward the next damage step
    pub damage_accumulator: f32,
    pub last_warning: Seconds,
    pub alert: AlertState,
    /// Set once the failure cascade has fired; the core is inert afterwards
    pub exploded: bool,
    pub glowing: bool,
    /// Tier whose light was last applied
    pub tier: Option<Tier>,
}

impl SupermatterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_power(power: f32) -> Self {
        Self {
            power,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub energy: f32,
    pub color: Color,
}

/// Emitter read by the radiation engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RadiationSource {
    pub intensity: f32,
    pub slope: f32,
}
