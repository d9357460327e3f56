mod helpers;
mod mocks;

mod check_tickets;
mod notifications;
mod passthrough;
