pub mod aim;
pub mod cannon;
pub mod collision;
pub mod config;
pub mod controller;
pub mod debug;
pub mod error;
pub mod events;
pub mod input;
pub mod projectile;
pub mod rng;
pub mod scenario;
pub mod score;
pub mod simulation;
pub mod snapshot;
pub mod spawner;
pub mod tank;
pub mod timer;

pub use error::Error;
