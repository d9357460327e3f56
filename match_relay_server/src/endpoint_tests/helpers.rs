use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chrono::{TimeZone, Utc};
use gamelift_tools::GameLiftApiError;
use log::debug;
use match_relay_engine::db_types::{GameSession, NewGameSession};
use sqlx::types::Json;

pub async fn post_request<F>(path: &str, body: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let _ = env_logger::try_init();
    let req = TestRequest::post().uri(path).set_payload(body.to_string()).to_request();
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request to {path}");
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub fn capacity_error() -> GameLiftApiError {
    GameLiftApiError::ServiceError {
        status: 400,
        code: "FleetCapacityExceededException".into(),
        message: "No available process".into(),
    }
}

pub fn invalid_request_error() -> GameLiftApiError {
    GameLiftApiError::ServiceError {
        status: 400,
        code: "InvalidRequestException".into(),
        message: "Bad fleet id arn:aws:gamelift:secret-details".into(),
    }
}

/// What the store would hand back for `session`.
pub fn stored(id: i64, session: NewGameSession) -> GameSession {
    GameSession {
        id,
        placement_id: session.placement_id,
        game_session_id: session.game_session_id,
        name: session.name,
        ip_address: session.ip_address,
        port: session.port,
        creation_time: session.creation_time,
        maximum_player_session_count: session.maximum_player_session_count,
        time: session.time,
        details: Json(session.details),
    }
}

pub fn session(id: i64, arn: &str, name: &str) -> GameSession {
    GameSession {
        id,
        placement_id: format!("p-{id}"),
        game_session_id: arn.to_string(),
        name: Some(name.to_string()),
        ip_address: Some("10.1.2.3".into()),
        port: Some(7777),
        creation_time: Some(1714564800.5),
        maximum_player_session_count: Some(2),
        time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        details: Json(serde_json::json!({})),
    }
}
