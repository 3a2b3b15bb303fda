//! Tick system - advances every core on the station by one frame
//!
//! Cores are processed one at a time in storage order. Each core's update
//! runs to completion before the next starts, so no core ever sees another
//! mid-update. Cascades from several cores in one tick apply in sequence.

use crate::simulation::station::Station;
use crate::supermatter::{update_supermatter, SupermatterEvent};

/// Run a single simulation tick of `frame_time` seconds
///
/// Returns every side-effect request the cores produced this tick.
pub fn run_simulation_tick(station: &mut Station, frame_time: f32) -> Vec<SupermatterEvent> {
    station.clock.advance(frame_time);
    let now = station.clock.now();

    let Station {
        supermatters,
        atmosphere,
        grid,
        rng,
        ..
    } = &mut *station;

    let mut events = Vec::new();
    for sm in supermatters.iter_mut() {
        events.extend(update_supermatter(sm, frame_time, now, atmosphere, grid, rng));
    }

    if !events.is_empty() {
        tracing::debug!(
            tick = station.clock.ticks(),
            event_count = events.len(),
            "simulation tick produced events"
        );
    }

    events
}
