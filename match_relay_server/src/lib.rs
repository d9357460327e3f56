//! # Match relay server
//! This crate hosts the HTTP surface of the match relay. It is responsible for:
//! * Receiving matchmaking and placement notifications from the provider's pub/sub transport and folding them into
//!   the ticket and session projections.
//! * Answering client queries against those projections.
//! * Forwarding the simple session and matchmaking requests that clients cannot make to the provider themselves.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/matchmaking-events`, `/placement-events`: pub/sub delivery targets.
//! * `/search-sessions`, `/close-session`, `/check-tickets`: reads and writes against the projections.
//! * `/create-session`, `/queue-session`, `/start-matchmaking`, `/stop-matchmaking`, `/create-player-session`:
//!   provider pass-through.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod notifications;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
