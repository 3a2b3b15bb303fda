//! Power-grid devices the failure cascade can reach

use serde::{Deserialize, Serialize};

use crate::core::damage::DamageSpecifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulbState {
    Intact,
    Broken,
}

/// A wall or ceiling light fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoweredLight {
    pub bulb: BulbState,
}

impl Default for PoweredLight {
    fn default() -> Self {
        Self {
            bulb: BulbState::Intact,
        }
    }
}

/// Area power controller with a main breaker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apc {
    pub main_breaker_enabled: bool,
}

impl Default for Apc {
    fn default() -> Self {
        Self {
            main_breaker_enabled: true,
        }
    }
}

/// Storage devices come in two sizes with different cascade odds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKind {
    Battery,
    /// Superconducting magnetic energy storage; the large-capacity variant
    Smes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battery {
    pub kind: StorageKind,
    pub charge: f32,
    pub max_charge: f32,
}

impl Battery {
    pub fn new(kind: StorageKind, max_charge: f32) -> Self {
        Self {
            kind,
            charge: max_charge,
            max_charge,
        }
    }

    pub fn set_charge(&mut self, charge: f32) {
        self.charge = charge.clamp(0.0, self.max_charge);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolarPanel {
    pub damage: DamageSpecifier,
}

/// What an infrastructure entity is
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Device {
    Light(PoweredLight),
    Breaker(Apc),
    Storage(Battery),
    Solar(SolarPanel),
}
