//! Collision handling
//!
//! Physical contact with the core happens outside the tick. Feed pellets
//! charge it, harmful projectiles are ignored, inverted (negative) projectile
//! damage lands as damage, and anything else is consumed.

use serde::{Deserialize, Serialize};

use crate::core::damage::DamageSpecifier;
use crate::core::types::EntityId;
use crate::supermatter::events::SupermatterEvent;
use crate::supermatter::Supermatter;

/// What hit the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImpactKind {
    /// Tagged feed carrying a power payload
    Feed { power: f32 },
    /// Projectile carrying a damage payload
    Projectile { damage: DamageSpecifier },
    /// Anything else: people, items, debris
    Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Impactor {
    pub id: EntityId,
    pub kind: ImpactKind,
}

impl Impactor {
    pub fn new(kind: ImpactKind) -> Self {
        Self {
            id: EntityId::new(),
            kind,
        }
    }
}

/// Apply one contact event. Returns a deletion request for consumed bodies.
pub fn handle_collision(
    sm: &mut Supermatter,
    impactor: &Impactor,
    projectile_modifier: f32,
) -> Option<SupermatterEvent> {
    let state = &mut sm.state;
    let config = &sm.config;

    match &impactor.kind {
        ImpactKind::Feed { power } => {
            state.power += power * config.charging_factor / config.power_factor;
            state.power = state.power.max(0.0);
            None
        }
        ImpactKind::Projectile { damage } => {
            let scaled = damage.scaled(projectile_modifier);
            let total = scaled.total();
            if scaled.any_positive() || total >= 0.0 {
                return None;
            }
            tracing::debug!(entity = ?sm.id, amount = -total, "projectile damaged supermatter");
            state.damage += total.abs();
            None
        }
        ImpactKind::Body => {
            state.power += config.consumption_power_bonus;
            tracing::debug!(entity = ?sm.id, consumed = ?impactor.id, "supermatter consumed body");
            Some(SupermatterEvent::Consumed {
                entity: sm.id,
                consumed: impactor.id,
            })
        }
    }
}
