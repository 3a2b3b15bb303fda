//! Simulation systems

pub mod station;
pub mod tick;

pub use station::Station;
pub use tick::run_simulation_tick;
