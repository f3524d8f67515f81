//! Network front end: sockets, login and matchmaking

pub mod auth;
pub mod link;
pub mod lobby;
pub mod server;

pub use auth::login;
pub use link::spawn_link;
pub use lobby::Lobby;
pub use server::{serve, serve_on};
