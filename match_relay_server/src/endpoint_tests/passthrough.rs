use actix_web::{http::StatusCode, web, web::ServiceConfig};
use mockall::predicate::eq;
use serde_json::{json, Value};

use super::{
    helpers::{capacity_error, invalid_request_error, post_request},
    mocks::MockProvider,
};
use crate::routes::{
    CreatePlayerSessionRoute,
    CreateSessionRoute,
    QueueSessionRoute,
    StartMatchmakingRoute,
    StopMatchmakingRoute,
};

fn configure(provider: MockProvider) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(provider))
            .service(CreateSessionRoute::<MockProvider>::new())
            .service(QueueSessionRoute::<MockProvider>::new())
            .service(CreatePlayerSessionRoute::<MockProvider>::new())
            .service(StartMatchmakingRoute::<MockProvider>::new())
            .service(StopMatchmakingRoute::<MockProvider>::new());
    }
}

async fn call(path: &str, body: Value, provider: MockProvider) -> (StatusCode, String) {
    post_request(path, &body.to_string(), configure(provider)).await
}

#[actix_web::test]
async fn create_session_missing_fields() {
    let mut provider = MockProvider::new();
    provider.expect_create_game_session().never();
    let (status, body) = call("/create-session", json!({"SessionName": "duel"}), provider).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Missing CreatorId");

    let (status, body) = call("/create-session", json!({"CreatorId": "player-1"}), MockProvider::new()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Missing SessionName");
}

#[actix_web::test]
async fn create_session() {
    let mut provider = MockProvider::new();
    provider
        .expect_create_game_session()
        .withf(|creator, name| creator == "player-1" && name == "duel")
        .times(1)
        .returning(|_, name| Ok(json!({"GameSession": {"Name": name, "Status": "ACTIVATING"}})));
    let (status, body) =
        call("/create-session", json!({"CreatorId": "player-1", "SessionName": "duel"}), provider).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["GameSession"]["Status"], "ACTIVATING");
}

#[actix_web::test]
async fn create_session_without_capacity() {
    let mut provider = MockProvider::new();
    provider.expect_create_game_session().returning(|_, _| Err(capacity_error()));
    let (status, body) =
        call("/create-session", json!({"CreatorId": "player-1", "SessionName": "duel"}), provider).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "FleetCapacityExceededException");
}

#[actix_web::test]
async fn provider_details_are_not_leaked() {
    let mut provider = MockProvider::new();
    provider.expect_create_game_session().returning(|_, _| Err(invalid_request_error()));
    let (status, body) =
        call("/create-session", json!({"CreatorId": "player-1", "SessionName": "duel"}), provider).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "An error occurred");
}

#[actix_web::test]
async fn queue_session() {
    let (status, body) = call("/queue-session", json!({"SessionName": "duel"}), MockProvider::new()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Missing PlacementId");
    let (status, body) = call("/queue-session", json!({"PlacementId": "p-1"}), MockProvider::new()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Missing SessionName");

    let mut provider = MockProvider::new();
    provider
        .expect_start_game_session_placement()
        .withf(|placement, name| placement == "p-1" && name == "duel")
        .times(1)
        .returning(|id, _| Ok(json!({"GameSessionPlacement": {"PlacementId": id, "Status": "PENDING"}})));
    let (status, body) = call("/queue-session", json!({"SessionName": "duel", "PlacementId": "p-1"}), provider).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["GameSessionPlacement"]["Status"], "PENDING");
}

#[actix_web::test]
async fn start_matchmaking() {
    let (status, body) = call("/start-matchmaking", json!({"Config": "duel-config"}), MockProvider::new()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Missing PlayerData");
    let (status, body) =
        call("/start-matchmaking", json!({"PlayerData": [{"PlayerId": "p1"}]}), MockProvider::new()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Missing Config");

    let players = json!([{"PlayerId": "p1", "PlayerAttributes": {"skill": {"N": 23}}}]);
    let mut provider = MockProvider::new();
    provider
        .expect_start_matchmaking()
        .with(eq("duel-config"), eq(players.clone()))
        .times(1)
        .returning(|_, _| Ok(json!({"MatchmakingTicket": {"TicketId": "t-1", "Status": "QUEUED"}})));
    let (status, body) =
        call("/start-matchmaking", json!({"PlayerData": players, "Config": "duel-config"}), provider).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["MatchmakingTicket"]["TicketId"], "t-1");
}

#[actix_web::test]
async fn stop_matchmaking() {
    let (status, body) = call("/stop-matchmaking", json!({}), MockProvider::new()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Missing TicketId");

    let mut provider = MockProvider::new();
    provider.expect_stop_matchmaking().with(eq("t-1")).times(1).returning(|_| Ok(json!({})));
    let (status, body) = call("/stop-matchmaking", json!({"TicketId": "t-1"}), provider).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{}");
}

#[actix_web::test]
async fn create_player_session_missing_fields() {
    let (status, body) =
        call("/create-player-session", json!({"GameSessionId": "arn:gs-1"}), MockProvider::new()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Missing PlayerID");

    let (status, body) = call("/create-player-session", json!({"PlayerID": "player-1"}), MockProvider::new()).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body, "Missing GameSessionID");
}

#[actix_web::test]
async fn create_player_session() {
    let mut provider = MockProvider::new();
    provider
        .expect_create_player_session()
        .withf(|session, player, data| {
            session == "arn:gs-1" && player == "player-1" && data.as_deref() == Some(r#"{"team":"red"}"#)
        })
        .times(1)
        .returning(|_, player, _| Ok(json!({"PlayerSession": {"PlayerId": player, "Port": 7777}})));
    let body = json!({"PlayerID": "player-1", "GameSessionId": "arn:gs-1", "PlayerData": {"team": "red"}});
    let (status, body) = call("/create-player-session", body, provider).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["PlayerSession"]["PlayerId"], "player-1");
}
