//! # Document store contracts
//!
//! Backends implement these traits to hold the ticket and session projections. Every method is a single-document
//! operation (or a simple equality-filtered query). Callers never rely on transactions spanning several documents.
//!
//! * [`TicketManagement`] stores matchmaking tickets. Tickets are created once and then updated in place. They are
//!   never deleted.
//! * [`SessionManagement`] stores the session directory. Entries are created by placement fulfillment and deleted by
//!   session termination.
mod session_management;
mod ticket_management;

pub use session_management::{SessionManagement, SessionStoreError};
pub use ticket_management::{TicketManagement, TicketStoreError};
