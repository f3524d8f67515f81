//! Tower Clash - real-time two-player tower destruction battles

pub mod arena;
pub mod combat;
pub mod command;
pub mod core;
pub mod net;
pub mod progression;
pub mod session;
pub mod store;
