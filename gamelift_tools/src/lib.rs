//! # GameLift tools
//!
//! The match relay server never talks to GameLift directly. Everything goes through the [`SessionProvider`] trait,
//! which is a deliberately narrow request/response contract. [`GameLiftApi`] is the production implementation. It
//! speaks the GameLift JSON 1.1 protocol over HTTPS and signs requests with AWS Signature Version 4.
//!
//! Responses are returned as raw JSON ([`serde_json::Value`]), since most callers pass them straight back to the game
//! client. Use the helpers in [`data_objects`] to pull typed data out of a response where needed.
mod api;
mod config;
mod error;
mod provider;
mod signing;

pub mod data_objects;

pub use api::GameLiftApi;
pub use config::GameLiftConfig;
pub use error::{GameLiftApiError, CAPACITY_EXCEEDED_CODE};
pub use provider::SessionProvider;
pub use signing::{sign_request, SigningParams};
