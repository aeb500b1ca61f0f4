pub mod aim;
pub mod background;
pub mod camera;
pub mod config;
pub mod dash;
pub mod debug;
pub mod ease;
pub mod input;
pub mod integrator;
pub mod rng;
pub mod scenario;
pub mod ship;
pub mod simulation;
pub mod snapshot;
pub mod thrust;
pub mod trail;
