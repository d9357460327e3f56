use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use gamelift_tools::GameLiftApi;
use log::*;
use match_relay_engine::{SessionDirectoryApi, SqliteDatabase, TicketFlowApi, TicketQueryApi};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    notifications::SubscriptionConfirmer,
    routes::{
        health,
        CheckTicketsRoute,
        CloseSessionRoute,
        CreatePlayerSessionRoute,
        CreateSessionRoute,
        MatchmakingEventsRoute,
        PlacementEventsRoute,
        QueueSessionRoute,
        SearchSessionsRoute,
        StartMatchmakingRoute,
        StopMatchmakingRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.database_pool_size)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let provider =
        GameLiftApi::new(config.gamelift.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🕹️ Using GameLift at {} ({})", provider.config().endpoint, provider.config().region);
    info!("🗃️ Session and ticket store at {}", db.url());
    let srv = create_server_instance(config, db, provider)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    provider: GameLiftApi,
) -> Result<Server, ServerError> {
    let confirmer = SubscriptionConfirmer::new(config.auto_confirm_subscriptions, &config.gamelift.region);
    if !confirmer.is_enabled() {
        info!("📨️ Subscription handshakes will be logged but not confirmed");
    }
    let srv = HttpServer::new(move || {
        let ticket_flow_api = TicketFlowApi::new(db.clone());
        let ticket_query_api = TicketQueryApi::new(db.clone());
        let session_api = SessionDirectoryApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("mrs::access_log"))
            .app_data(web::Data::new(ticket_flow_api))
            .app_data(web::Data::new(ticket_query_api))
            .app_data(web::Data::new(session_api))
            .app_data(web::Data::new(provider.clone()))
            .app_data(web::Data::new(confirmer.clone()))
            .service(health)
            .service(SearchSessionsRoute::<SqliteDatabase>::new())
            .service(CloseSessionRoute::<SqliteDatabase, GameLiftApi>::new())
            .service(CreateSessionRoute::<GameLiftApi>::new())
            .service(QueueSessionRoute::<GameLiftApi>::new())
            .service(CreatePlayerSessionRoute::<GameLiftApi>::new())
            .service(StartMatchmakingRoute::<GameLiftApi>::new())
            .service(StopMatchmakingRoute::<GameLiftApi>::new())
            .service(CheckTicketsRoute::<SqliteDatabase>::new())
            .service(MatchmakingEventsRoute::<SqliteDatabase>::new())
            .service(PlacementEventsRoute::<SqliteDatabase, GameLiftApi>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
