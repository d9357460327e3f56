//! # Match relay engine public API
//!
//! Each API is a thin facade over a storage backend. It is created by supplying a backend that implements the traits
//! the API needs, e.g.
//!
//! ```rust,ignore
//! use match_relay_engine::{SqliteDatabase, TicketQueryApi};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! // SqliteDatabase implements TicketManagement
//! let api = TicketQueryApi::new(db);
//! let tickets = api.fetch_tickets(&ids).await?;
//! ```
//!
//! * [`ticket_flow_api`] folds matchmaking notifications into the ticket projection.
//! * [`ticket_query_api`] serves batch ticket lookups for polling clients.
//! * [`session_directory_api`] owns the session directory: placement fulfillment, listing and termination.
pub mod batch_objects;
pub mod errors;
pub mod session_directory_api;
pub mod ticket_flow_api;
pub mod ticket_query_api;
