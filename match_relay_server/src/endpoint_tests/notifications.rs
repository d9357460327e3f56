use actix_web::{http::StatusCode, web, web::ServiceConfig};
use match_relay_engine::{
    db_types::TicketStatus,
    SessionDirectoryApi,
    SessionStoreError,
    TicketFlowApi,
    TicketStoreError,
};
use mockall::predicate::eq;
use serde_json::{json, Value};

use super::{
    helpers::{capacity_error, invalid_request_error, post_request, session, stored},
    mocks::{MockProvider, MockSessionStore, MockTicketStore},
};
use crate::{
    notifications::SubscriptionConfirmer,
    routes::{MatchmakingEventsRoute, PlacementEventsRoute},
};

fn matchmaking(store: MockTicketStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(TicketFlowApi::new(store)))
            .app_data(web::Data::new(SubscriptionConfirmer::new(false, "us-east-1")))
            .service(MatchmakingEventsRoute::<MockTicketStore>::new());
    }
}

fn placement(store: MockSessionStore, provider: MockProvider) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(SessionDirectoryApi::new(store)))
            .app_data(web::Data::new(provider))
            .app_data(web::Data::new(SubscriptionConfirmer::new(false, "us-east-1")))
            .service(PlacementEventsRoute::<MockSessionStore, MockProvider>::new());
    }
}

fn delivery(detail: Value) -> String {
    let message = json!({
        "version": "0",
        "id": "5c3a8c9e-0000-0000-0000-000000000000",
        "detail-type": "GameLift Matchmaking Event",
        "source": "aws.gamelift",
        "detail": detail
    });
    json!({
        "Type": "Notification",
        "MessageId": "d-1",
        "TopicArn": "arn:aws:sns:us-east-1:123456789012:gamelift-events",
        "Message": message.to_string(),
        "Timestamp": "2024-05-01T12:00:00.000Z"
    })
    .to_string()
}

fn handshake() -> String {
    json!({
        "Type": "SubscriptionConfirmation",
        "MessageId": "d-0",
        "Token": "2336412f37",
        "TopicArn": "arn:aws:sns:us-east-1:123456789012:gamelift-events",
        "Message": "You have chosen to subscribe to the topic",
        "SubscribeURL": "https://sns.us-east-1.amazonaws.com/?Action=ConfirmSubscription&Token=2336412f37"
    })
    .to_string()
}

fn fulfilled() -> Value {
    json!({
        "type": "PlacementFulfilled",
        "placementId": "p-1",
        "port": "7777",
        "gameSessionArn": "arn:gs-1",
        "ipAddress": "10.1.2.3"
    })
}

fn description() -> Value {
    json!({"GameSessionPlacement": {
        "PlacementId": "p-1",
        "Status": "FULFILLED",
        "GameSessionName": "duel",
        "GameSessionArn": "arn:gs-1",
        "IpAddress": "10.1.2.3",
        "Port": 7777,
        "StartTime": 1714564800.5,
        "MaximumPlayerSessionCount": 2
    }})
}

//----------------------------------------------   Matchmaking  ----------------------------------------------------

#[actix_web::test]
async fn matchmaking_handshake() {
    let mut store = MockTicketStore::new();
    store.expect_fetch_ticket().never();
    store.expect_insert_ticket().never();
    let (status, body) = post_request("/matchmaking-events", &handshake(), matchmaking(store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[actix_web::test]
async fn foreign_subscribe_url_is_acknowledged_but_not_visited() {
    let mut store = MockTicketStore::new();
    store.expect_fetch_ticket().never();
    let configure = move |cfg: &mut ServiceConfig| {
        cfg.app_data(web::Data::new(TicketFlowApi::new(store)))
            .app_data(web::Data::new(SubscriptionConfirmer::new(true, "us-east-1")))
            .service(MatchmakingEventsRoute::<MockTicketStore>::new());
    };
    let body = json!({
        "Type": "SubscriptionConfirmation",
        "TopicArn": "arn:aws:sns:us-east-1:123456789012:gamelift-events",
        "SubscribeURL": "http://169.254.169.254/latest/meta-data/iam/security-credentials/"
    })
    .to_string();
    let (status, body) = post_request("/matchmaking-events", &body, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[actix_web::test]
async fn searching_creates_each_ticket() {
    let mut store = MockTicketStore::new();
    store.expect_fetch_ticket().times(2).returning(|_| Ok(None));
    store
        .expect_insert_ticket()
        .withf(|t| (t.ticket_id == "t-1" || t.ticket_id == "t-2") && t.status == TicketStatus::Searching)
        .times(2)
        .returning(|_| Ok(()));
    let body = delivery(json!({
        "type": "MatchmakingSearching",
        "tickets": [{"ticketId": "t-1"}, {"ticketId": "t-2"}]
    }));
    let (status, body) = post_request("/matchmaking-events", &body, matchmaking(store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[actix_web::test]
async fn store_failures_are_acknowledged() {
    let mut store = MockTicketStore::new();
    store.expect_fetch_ticket().with(eq("t-1")).returning(|_| Err(TicketStoreError::DatabaseError("locked".into())));
    let body = delivery(json!({"type": "MatchmakingCancelled", "tickets": [{"ticketId": "t-1"}]}));
    let (status, _) = post_request("/matchmaking-events", &body, matchmaking(store)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn malformed_envelope() {
    let mut store = MockTicketStore::new();
    store.expect_fetch_ticket().never();
    let (status, _) = post_request("/matchmaking-events", "{not json", matchmaking(store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) =
        post_request("/matchmaking-events", r#"{"Type": "Notification"}"#, matchmaking(MockTicketStore::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unreadable_messages_are_dropped() {
    let mut store = MockTicketStore::new();
    store.expect_fetch_ticket().never();
    let body = json!({"Type": "Notification", "MessageId": "d-2", "Message": "{not json"}).to_string();
    let (status, body) = post_request("/matchmaking-events", &body, matchmaking(store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let mut store = MockTicketStore::new();
    store.expect_fetch_ticket().never();
    let body = delivery(json!({"type": "MatchmakingSucceeded", "tickets": [{"ticketId": "t-1"}]}));
    let (status, _) = post_request("/matchmaking-events", &body, matchmaking(store)).await;
    assert_eq!(status, StatusCode::OK);
}

//----------------------------------------------   Placements  ----------------------------------------------------

#[actix_web::test]
async fn placement_handshake() {
    let mut provider = MockProvider::new();
    provider.expect_describe_game_session_placement().never();
    let (status, body) = post_request("/placement-events", &handshake(), placement(MockSessionStore::new(), provider)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[actix_web::test]
async fn fulfilled_placement_is_stored() {
    let mut provider = MockProvider::new();
    provider.expect_describe_game_session_placement().with(eq("p-1")).times(1).returning(|_| Ok(description()));
    let mut store = MockSessionStore::new();
    store
        .expect_insert_game_session()
        .withf(|s| {
            s.placement_id == "p-1" &&
                s.game_session_id == "arn:gs-1" &&
                s.name.as_deref() == Some("duel") &&
                s.port == Some(7777) &&
                s.details["type"] == "PlacementFulfilled" &&
                s.details["Status"] == "FULFILLED"
        })
        .times(1)
        .returning(|s| Ok(stored(1, s)));
    let (status, body) = post_request("/placement-events", &delivery(fulfilled()), placement(store, provider)).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value, description());
}

#[actix_web::test]
async fn redelivered_placement() {
    let mut provider = MockProvider::new();
    provider.expect_describe_game_session_placement().returning(|_| Ok(description()));
    let mut store = MockSessionStore::new();
    store
        .expect_insert_game_session()
        .times(1)
        .returning(|_| Err(SessionStoreError::DuplicateSession("p-1".into())));
    store
        .expect_fetch_game_session_for_placement()
        .with(eq("p-1"))
        .times(1)
        .returning(|_| Ok(Some(session(1, "arn:gs-1", "duel"))));
    let (status, body) = post_request("/placement-events", &delivery(fulfilled()), placement(store, provider)).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["GameSessionPlacement"]["PlacementId"], "p-1");
}

#[actix_web::test]
async fn placement_store_failure() {
    let mut provider = MockProvider::new();
    provider.expect_describe_game_session_placement().returning(|_| Ok(description()));
    let mut store = MockSessionStore::new();
    store.expect_insert_game_session().returning(|_| Err(SessionStoreError::DatabaseError("disk full".into())));
    let (status, _) = post_request("/placement-events", &delivery(fulfilled()), placement(store, provider)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn placement_without_capacity() {
    let mut provider = MockProvider::new();
    provider.expect_describe_game_session_placement().returning(|_| Err(capacity_error()));
    let mut store = MockSessionStore::new();
    store.expect_insert_game_session().never();
    let (status, body) = post_request("/placement-events", &delivery(fulfilled()), placement(store, provider)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "FleetCapacityExceededException");
}

#[actix_web::test]
async fn placement_provider_failure() {
    let mut provider = MockProvider::new();
    provider.expect_describe_game_session_placement().returning(|_| Err(invalid_request_error()));
    let mut store = MockSessionStore::new();
    store.expect_insert_game_session().never();
    let (status, body) = post_request("/placement-events", &delivery(fulfilled()), placement(store, provider)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "An error occurred");
}

#[actix_web::test]
async fn other_placement_events_are_acknowledged() {
    let mut provider = MockProvider::new();
    provider.expect_describe_game_session_placement().never();
    let mut store = MockSessionStore::new();
    store.expect_insert_game_session().never();
    let body = delivery(json!({"type": "PlacementTimedOut", "placementId": "p-1"}));
    let (status, body) = post_request("/placement-events", &body, placement(store, provider)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[actix_web::test]
async fn fulfilled_without_placement_id() {
    let mut provider = MockProvider::new();
    provider.expect_describe_game_session_placement().never();
    let body = delivery(json!({"type": "PlacementFulfilled", "gameSessionArn": "arn:gs-1"}));
    let (status, body) = post_request("/placement-events", &body, placement(MockSessionStore::new(), provider)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
