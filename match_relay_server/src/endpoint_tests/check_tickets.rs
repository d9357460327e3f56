use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use match_relay_engine::{db_types::Ticket, TicketQueryApi, TicketStoreError};
use mockall::predicate::eq;
use serde_json::{json, Value};

use super::{helpers::post_request, mocks::MockTicketStore};
use crate::routes::CheckTicketsRoute;

fn configure(store: MockTicketStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(TicketQueryApi::new(store))).service(CheckTicketsRoute::<MockTicketStore>::new());
    }
}

#[actix_web::test]
async fn empty_ticket_list() {
    let mut store = MockTicketStore::new();
    store.expect_fetch_ticket().never();
    let (status, body) = post_request("/check-tickets", r#"{"TicketIds": []}"#, configure(store)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "Missing TicketIds");
}

#[actix_web::test]
async fn missing_ticket_list() {
    let (status, body) = post_request("/check-tickets", "{}", configure(MockTicketStore::new())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "Missing TicketIds");
    let (status, _) = post_request("/check-tickets", "TicketIds=A", configure(MockTicketStore::new())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn tickets_in_request_order() {
    let mut store = MockTicketStore::new();
    store.expect_fetch_ticket().with(eq("A")).times(1).returning(|id| {
        let mut ticket = Ticket::searching(id, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        ticket.match_id = Some("m-1".into());
        Ok(Some(ticket))
    });
    store.expect_fetch_ticket().with(eq("B")).times(1).returning(|_| Ok(None));
    let (status, body) = post_request("/check-tickets", r#"{"TicketIds": ["A", "B"]}"#, configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        value,
        json!({"TicketList": [
            {"ticketId": "A", "status": "SEARCHING", "timestamp": 1_714_564_800_000_i64, "matchId": "m-1"},
            null
        ]})
    );
}

#[actix_web::test]
async fn store_failure() {
    let mut store = MockTicketStore::new();
    store
        .expect_fetch_ticket()
        .returning(|_| Err(TicketStoreError::DatabaseError("disk I/O error".into())));
    let (status, _) = post_request("/check-tickets", r#"{"TicketIds": ["A"]}"#, configure(store)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
