//! What an onlooker sees when examining the crystal
//!
//! Read-only. Power is only shown inside detail range and is jittered and
//! rounded so nobody can read exact internal state.

use serde::{Deserialize, Serialize};

use crate::core::config::SupermatterConfig;
use crate::supermatter::state::SupermatterState;
use crate::supermatter::threshold::{integrity, Stability};

const POWER_ROUNDING: f32 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    pub integrity: u32,
    pub stability: Stability,
    /// Noisy power estimate, present only in detail range
    pub power_estimate: Option<i64>,
}

/// Build a readout. `jitter` is a uniform draw in `[0, 1)` that maps onto a
/// `[0.85, 1.15)` multiplier on power.
pub fn examine(
    state: &SupermatterState,
    config: &SupermatterConfig,
    in_details_range: bool,
    jitter: f32,
) -> Readout {
    let integrity = integrity(state.damage, config.explosion_point);
    let power_estimate = in_details_range.then(|| {
        let displayed = state.power * (0.85 + 0.3 * jitter.clamp(0.0, 1.0));
        round_to_multiple(displayed, POWER_ROUNDING)
    });

    Readout {
        integrity,
        stability: Stability::from_integrity(integrity),
        power_estimate,
    }
}

/// Round half away from zero to the nearest multiple of `factor`
fn round_to_multiple(value: f32, factor: f32) -> i64 {
    (value / factor).round() as i64 * factor as i64
}

impl std::fmt::Display for Readout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stability.description())?;
        if let Some(power) = self.power_estimate {
            write!(f, "\nThe crystal is radiating roughly {} MeV/cm3.", power)?;
        }
        Ok(())
    }
}
