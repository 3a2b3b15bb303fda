//! Supermatter Sim - a volatile crystal core and the station grid it can take down

pub mod core;
pub mod gas;
pub mod grid;
pub mod simulation;
pub mod supermatter;
