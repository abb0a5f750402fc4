//! UCI front end for the Brick engine.

pub mod config;
pub mod session;

pub use config::EngineConfig;
pub use session::{Flow, UciSession};
