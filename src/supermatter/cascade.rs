//! Failure cascade
//!
//! Fires once when a core passes its explosion point. Every grid device in
//! the same locality gets its own independent roll; devices elsewhere are
//! never touched. Finishes with a detonation request at the core itself.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::damage::DamageSpecifier;
use crate::core::error::Result;
use crate::core::types::EntityId;
use crate::grid::{GridServices, StorageKind};
use crate::supermatter::events::SupermatterEvent;
use crate::supermatter::Supermatter;

/// What the cascade did to the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub lights_destroyed: u32,
    pub breakers_tripped: u32,
    pub batteries_drained: u32,
    pub smes_drained: u32,
    pub panels_broken: u32,
    /// Collaborator calls that failed (entity gone, wrong kind)
    pub skipped: u32,
}

/// Single probability draw; `1.0` always hits and `0.0` never does
pub fn prob<R: Rng + ?Sized>(rng: &mut R, chance: f32) -> bool {
    rng.gen::<f32>() < chance
}

/// Run the cascade for `sm` against `grid`, returning the events it emits
pub fn trigger_cascade<G, R>(sm: &Supermatter, grid: &mut G, rng: &mut R) -> Vec<SupermatterEvent>
where
    G: GridServices + ?Sized,
    R: Rng + ?Sized,
{
    let locality = sm.position.locality;
    let config = &sm.config;
    let mut report = CascadeReport::default();

    tracing::warn!(entity = ?sm.id, locality = locality.0, "supermatter delaminating, cascade firing");

    for light in grid.lights_in(locality) {
        if prob(rng, config.lights_overload_chance) {
            record(&mut report, light, grid.destroy_bulb(light), |r| r.lights_destroyed += 1);
        }
    }

    for (breaker, enabled) in grid.breakers_in(locality) {
        if enabled {
            record(&mut report, breaker, grid.toggle_breaker(breaker), |r| r.breakers_tripped += 1);
        }
    }

    for (storage, kind) in grid.storage_in(locality) {
        let chance = match kind {
            StorageKind::Smes => config.smes_disable_chance,
            StorageKind::Battery => config.battery_disable_chance,
        };
        if prob(rng, chance) {
            record(&mut report, storage, grid.set_charge(storage, 0.0), |r| match kind {
                StorageKind::Smes => r.smes_drained += 1,
                StorageKind::Battery => r.batteries_drained += 1,
            });
        }
    }

    let panel_damage = DamageSpecifier::single(
        config.break_solar_panel_damage_type,
        config.break_solar_panel_damage_value,
    );
    for panel in grid.solar_panels_in(locality) {
        if prob(rng, config.break_solar_panel_chance) {
            record(&mut report, panel, grid.set_damage(panel, &panel_damage), |r| r.panels_broken += 1);
        }
    }

    tracing::info!(entity = ?sm.id, ?report, "cascade applied");

    vec![
        SupermatterEvent::CascadeFired {
            entity: sm.id,
            locality,
            report,
        },
        SupermatterEvent::Detonation {
            entity: sm.id,
            position: sm.position,
        },
    ]
}

fn record<F>(report: &mut CascadeReport, target: EntityId, outcome: Result<()>, on_success: F)
where
    F: FnOnce(&mut CascadeReport),
{
    match outcome {
        Ok(()) => on_success(report),
        Err(e) => {
            tracing::warn!(?target, error = %e, "cascade skipped entity");
            report.skipped += 1;
        }
    }
}
