//! Supermatter configuration with documented constants
//!
//! Every instance is spawned with one of these. Values are immutable for the
//! lifetime of the instance; nothing re-validates them at runtime.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::damage::DamageType;
use crate::core::error::{Result, SupermatterError};
use crate::core::types::Color;

/// Radio channel identifier (e.g. "Engineering", "Common")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RadioChannel(pub String);

impl RadioChannel {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for RadioChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-instance configuration for a supermatter core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupermatterConfig {
    // === THRESHOLDS ===
    /// Damage above which the core delaminates and the cascade fires
    pub explosion_point: f32,

    /// Damage above which the core is in emergency (public alert, bright light)
    pub emergency_point: f32,

    /// Damage above which warnings start going out on the alert channel
    pub warning_point: f32,

    // === DAMAGE ===
    /// Seconds of banked tick time per damage step
    ///
    /// Damage only moves once per `damage_frequency` regardless of frame rate.
    pub damage_frequency: f32,

    /// Maximum damage change per step
    ///
    /// Below critical temperature damage heals by at most this much per step.
    /// Above it, growth is capped at `(power/300) * (explosion_point/1000)`
    /// times this value.
    pub damage_rate_limit: f32,

    /// Temperature (K) of the absorbed gas above which damage grows
    pub critical_temperature: f32,

    // === POWER ===
    /// Fraction of the tile's total moles pulled into the reaction each tick
    pub gas_efficiency: f32,

    /// Scales the vacuum damage floor and the power gained from feeding
    pub power_factor: f32,

    /// Cubic damping constant
    ///
    /// Power loses `(power / decay_factor)^3` per tick. At the default of 700,
    /// a core at 700 power sheds 1 power per tick; at 1400 it sheds 8.
    pub decay_factor: f32,

    /// How strongly nitrogen counteracts oxygen in the reaction ratio
    pub nitrogen_retardation_factor: f32,

    /// Power gained from a tagged feed is `feed * charging_factor / power_factor`
    pub charging_factor: f32,

    /// Flat power gain when a generic body is consumed
    pub consumption_power_bonus: f32,

    // === RELEASE ===
    /// Converts power into reaction energy per second
    pub reaction_power_modifier: f32,

    /// Divisor turning reaction energy into released plasma moles
    pub plasma_release_modifier: f32,

    /// Divisor turning reaction energy (plus gas heat) into released oxygen moles
    pub oxygen_release_modifier: f32,

    /// Multiplier turning reaction energy into heat added to the gas
    pub thermal_release_modifier: f32,

    /// Radiation intensity per unit of power
    pub radiation_release_modifier: f32,

    // === ALERTS ===
    /// Base delay between announcements, in seconds
    ///
    /// Regular warnings repeat every `warning_delay * 10` seconds. An
    /// emergency announcement rewinds the timer by `warning_delay * 4`.
    pub warning_delay: f32,

    /// Restricted channel for technical alerts
    pub alert_channel: RadioChannel,

    /// Station-wide channel for emergency notices
    pub public_channel: RadioChannel,

    // === CASCADE ===
    /// Chance that a lighting fixture in the locality bursts
    pub lights_overload_chance: f32,

    /// Chance that a regular battery is drained to zero
    pub battery_disable_chance: f32,

    /// Chance that a large-capacity (SMES) storage unit is drained to zero
    pub smes_disable_chance: f32,

    /// Chance that a solar panel takes structural damage
    pub break_solar_panel_chance: f32,

    /// Damage type applied to broken solar panels
    pub break_solar_panel_damage_type: DamageType,

    /// Damage amount applied to broken solar panels
    pub break_solar_panel_damage_value: f32,

    // === PRESENTATION ===
    pub base_color: Color,
    pub warning_color: Color,
    pub emergency_color: Color,
    pub base_light_energy: f32,
    pub warning_light_energy: f32,
    pub emergency_light_energy: f32,
}

impl Default for SupermatterConfig {
    fn default() -> Self {
        Self {
            // Thresholds (warning < emergency < explosion)
            explosion_point: 1000.0,
            emergency_point: 700.0,
            warning_point: 100.0,

            // Damage
            damage_frequency: 1.0,
            damage_rate_limit: 4.5,
            critical_temperature: 5000.0,

            // Power
            gas_efficiency: 0.25,
            power_factor: 1.0,
            decay_factor: 700.0,
            nitrogen_retardation_factor: 0.15,
            charging_factor: 0.05,
            consumption_power_bonus: 200.0,

            // Release
            reaction_power_modifier: 1.1,
            plasma_release_modifier: 1500.0,
            oxygen_release_modifier: 15000.0,
            thermal_release_modifier: 15000.0,
            radiation_release_modifier: 0.4,

            // Alerts
            warning_delay: 20.0,
            alert_channel: RadioChannel::new("Engineering"),
            public_channel: RadioChannel::new("Common"),

            // Cascade
            lights_overload_chance: 0.1,
            battery_disable_chance: 0.5,
            smes_disable_chance: 0.8,
            break_solar_panel_chance: 0.1,
            break_solar_panel_damage_type: DamageType::Structural,
            break_solar_panel_damage_value: 150.0,

            // Presentation
            base_color: Color::rgb(146, 122, 16),
            warning_color: Color::rgb(255, 208, 79),
            emergency_color: Color::rgb(199, 140, 32),
            base_light_energy: 4.0,
            warning_light_energy: 5.0,
            emergency_light_energy: 7.0,
        }
    }
}

impl SupermatterConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SupermatterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.warning_point < self.emergency_point
            && self.emergency_point < self.explosion_point)
        {
            return Err(SupermatterError::InvalidConfig(format!(
                "thresholds must satisfy warning ({}) < emergency ({}) < explosion ({})",
                self.warning_point, self.emergency_point, self.explosion_point
            )));
        }

        if self.decay_factor <= 0.0 {
            return Err(SupermatterError::InvalidConfig(
                "decay_factor must be positive".into(),
            ));
        }

        if self.damage_frequency <= 0.0 {
            return Err(SupermatterError::InvalidConfig(
                "damage_frequency must be positive".into(),
            ));
        }

        if self.damage_rate_limit < 0.0 {
            return Err(SupermatterError::InvalidConfig(
                "damage_rate_limit must not be negative".into(),
            ));
        }

        if self.power_factor <= 0.0 {
            return Err(SupermatterError::InvalidConfig(
                "power_factor must be positive".into(),
            ));
        }

        let chances = [
            ("lights_overload_chance", self.lights_overload_chance),
            ("battery_disable_chance", self.battery_disable_chance),
            ("smes_disable_chance", self.smes_disable_chance),
            ("break_solar_panel_chance", self.break_solar_panel_chance),
        ];
        for (name, chance) in chances {
            if !(0.0..=1.0).contains(&chance) {
                return Err(SupermatterError::InvalidConfig(format!(
                    "{} ({}) must be within [0, 1]",
                    name, chance
                )));
            }
        }

        Ok(())
    }
}
