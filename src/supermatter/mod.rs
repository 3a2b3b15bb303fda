//! The supermatter crystal: a volatile core fed by ambient gas.
//!
//! Each tick it absorbs a slice of the gas on its tile, turns heat and oxygen
//! into power, takes or sheds damage against a critical temperature, and
//! radiates. Past its explosion point it blows out the local power grid.

pub mod announcer;
pub mod cascade;
pub mod collision;
pub mod events;
pub mod readout;
pub mod state;
pub mod threshold;
pub mod update;

use crate::core::config::SupermatterConfig;
use crate::core::types::{EntityId, Position};

pub use announcer::{AlertMessage, AlertState, Announcement};
pub use cascade::{trigger_cascade, CascadeReport};
pub use collision::{handle_collision, ImpactKind, Impactor};
pub use events::SupermatterEvent;
pub use readout::{examine, Readout};
pub use state::{PointLight, RadiationSource, SupermatterState};
pub use threshold::{classify, integrity, Stability, Tier};
pub use update::update_supermatter;

/// One live core with its configuration and optional components
#[derive(Debug, Clone)]
pub struct Supermatter {
    pub id: EntityId,
    pub position: Position,
    pub config: SupermatterConfig,
    pub state: SupermatterState,
    pub light: Option<PointLight>,
    pub radiation: Option<RadiationSource>,
}

impl Supermatter {
    pub fn new(position: Position, config: SupermatterConfig) -> Self {
        Self {
            id: EntityId::new(),
            position,
            config,
            state: SupermatterState::new(),
            light: None,
            radiation: None,
        }
    }

    /// Attach a point light at the nominal tier's settings
    pub fn with_light(mut self) -> Self {
        self.light = Some(PointLight {
            energy: self.config.base_light_energy,
            color: self.config.base_color,
        });
        self
    }

    pub fn with_radiation(mut self) -> Self {
        self.radiation = Some(RadiationSource::default());
        self
    }

    pub fn tier(&self) -> Tier {
        classify(self.state.damage, &self.config)
    }

    pub fn integrity(&self) -> u32 {
        integrity(self.state.damage, self.config.explosion_point)
    }
}
