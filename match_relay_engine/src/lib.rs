//! Match Relay Engine
//!
//! The engine turns asynchronous matchmaking and placement notifications from the session provider into durable,
//! query-friendly projections, and serves the client-facing reads of those projections.
//!
//! The library is divided into these sections:
//! 1. Notification decoding ([`mod@events`]). The inner `detail` object of a notification is decoded once into
//!    [`events::MatchmakingEvent`] or [`events::PlacementEvent`].
//! 2. The ticket state machine ([`mod@ticket_machine`]). A pure function from (ticket exists, event, now) to a write
//!    intent.
//! 3. Storage contracts ([`mod@traits`]) and the SQLite backend, [`SqliteDatabase`].
//! 4. The public API: [`TicketFlowApi`], [`TicketQueryApi`] and [`SessionDirectoryApi`].
//!
//! The projections are eventually consistent with the provider. Client reads never wait on the notification path.
mod relay_api;
mod sqlite;

pub mod db_types;
pub mod events;
pub mod ticket_machine;
pub mod traits;

pub use relay_api::{
    batch_objects::{BatchReport, TicketOutcome},
    errors::{SessionDirectoryError, TicketApiError},
    session_directory_api::{new_game_session, PlacementOutcome, SessionDirectoryApi},
    ticket_flow_api::TicketFlowApi,
    ticket_query_api::TicketQueryApi,
};
pub use sqlite::SqliteDatabase;
pub use traits::{SessionManagement, SessionStoreError, TicketManagement, TicketStoreError};
