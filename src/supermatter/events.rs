//! Side-effect requests produced by the core
//!
//! Returned from ticks and collisions for external systems (rendering,
//! radio, explosions, entity deletion) to act on.

use serde::{Deserialize, Serialize};

use crate::core::config::RadioChannel;
use crate::core::types::{Color, EntityId, LocalityId, Position};
use crate::supermatter::announcer::AlertMessage;
use crate::supermatter::cascade::CascadeReport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SupermatterEvent {
    /// The point light moved to a new tier's energy and color
    LightShifted {
        entity: EntityId,
        energy: f32,
        color: Color,
    },
    /// Oxygen-rich reaction started or stopped glowing
    GlowChanged { entity: EntityId, glowing: bool },
    /// Radio broadcast from the core
    Radio {
        entity: EntityId,
        channel: RadioChannel,
        message: AlertMessage,
    },
    /// Grid effects applied by the failure cascade
    CascadeFired {
        entity: EntityId,
        locality: LocalityId,
        report: CascadeReport,
    },
    /// Large-area explosion requested at the core's position
    Detonation { entity: EntityId, position: Position },
    /// A body touched the core and should be deleted
    Consumed { entity: EntityId, consumed: EntityId },
}
