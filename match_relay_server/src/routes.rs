//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over their storage backend and session provider, so that the endpoint tests can swap in mocks.
//! Every handler is a short validation pipeline returning `Result<HttpResponse, ServerError>`; status codes are decided
//! by [`ServerError`] alone.
//!
//! The two pub/sub delivery targets acknowledge everything they can read with 200. The transport redelivers on any
//! other status, so only a malformed outer envelope (400) and the provider outcomes of a placement fulfillment are
//! reported as failures.
use actix_web::{get, web, HttpResponse, Responder};
use gamelift_tools::SessionProvider;
use log::*;
use match_relay_engine::{
    events::{MatchmakingNotification, PlacementEvent, PlacementNotification},
    SessionDirectoryApi,
    SessionManagement,
    TicketFlowApi,
    TicketManagement,
    TicketQueryApi,
};
use serde_json::Value;

use crate::{
    data_objects::{
        parse_body,
        required,
        CheckTicketsRequest,
        CheckTicketsResponse,
        CloseSessionRequest,
        CreatePlayerSessionRequest,
        CreateSessionRequest,
        QueueSessionRequest,
        SearchSessionsResponse,
        StartMatchmakingRequest,
        StopMatchmakingRequest,
    },
    errors::ServerError,
    notifications::{message_detail, Envelope, SubscriptionConfirmer},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

/// The plain acknowledgement returned to the notification transport.
fn ok() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Sessions  ----------------------------------------------------
route!(search_sessions => Post "/search-sessions" impl SessionManagement);
pub async fn search_sessions<B: SessionManagement>(
    api: web::Data<SessionDirectoryApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("🏟️ POST search sessions");
    let game_sessions = api.list_sessions().await?;
    Ok(HttpResponse::Ok().json(SearchSessionsResponse { game_sessions }))
}

route!(close_session => Post "/close-session" impl SessionManagement, SessionProvider);
pub async fn close_session<B, P>(
    body: web::Bytes,
    api: web::Data<SessionDirectoryApi<B>>,
    provider: web::Data<P>,
) -> Result<HttpResponse, ServerError>
where
    B: SessionManagement,
    P: SessionProvider,
{
    let req = parse_body::<CloseSessionRequest>(&body);
    let game_session_id = required(req.game_session_id, "GameSessionId")?;
    debug!("🏟️ POST close session {game_session_id}");
    let response = api.terminate_session(provider.get_ref(), &game_session_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

route!(create_session => Post "/create-session" impl SessionProvider);
pub async fn create_session<P: SessionProvider>(
    body: web::Bytes,
    provider: web::Data<P>,
) -> Result<HttpResponse, ServerError> {
    let req = parse_body::<CreateSessionRequest>(&body);
    let creator_id = required(req.creator_id, "CreatorId")?;
    let session_name = required(req.session_name, "SessionName")?;
    debug!("🏟️ POST create session '{session_name}' for {creator_id}");
    let response = provider.create_game_session(&creator_id, &session_name).await?;
    Ok(HttpResponse::Ok().json(response))
}

route!(queue_session => Post "/queue-session" impl SessionProvider);
pub async fn queue_session<P: SessionProvider>(
    body: web::Bytes,
    provider: web::Data<P>,
) -> Result<HttpResponse, ServerError> {
    let req = parse_body::<QueueSessionRequest>(&body);
    let session_name = required(req.session_name, "SessionName")?;
    let placement_id = required(req.placement_id, "PlacementId")?;
    debug!("🏟️ POST queue session '{session_name}' as placement {placement_id}");
    let response = provider.start_game_session_placement(&placement_id, &session_name).await?;
    Ok(HttpResponse::Ok().json(response))
}

route!(create_player_session => Post "/create-player-session" impl SessionProvider);
pub async fn create_player_session<P: SessionProvider>(
    body: web::Bytes,
    provider: web::Data<P>,
) -> Result<HttpResponse, ServerError> {
    let req = parse_body::<CreatePlayerSessionRequest>(&body);
    let player_data = req.player_data_string();
    let player_id = required(req.player_id, "PlayerID")?;
    let game_session_id =
        req.game_session_id.filter(|s| !s.is_empty()).ok_or(ServerError::MissingGameSessionId)?;
    debug!("🏟️ POST create player session for {player_id} in {game_session_id}");
    let response = provider.create_player_session(&game_session_id, &player_id, player_data).await?;
    Ok(HttpResponse::Ok().json(response))
}

//----------------------------------------------   Matchmaking  ----------------------------------------------------
route!(start_matchmaking => Post "/start-matchmaking" impl SessionProvider);
pub async fn start_matchmaking<P: SessionProvider>(
    body: web::Bytes,
    provider: web::Data<P>,
) -> Result<HttpResponse, ServerError> {
    let req = parse_body::<StartMatchmakingRequest>(&body);
    let players = req.player_data.filter(|v| !v.is_null()).ok_or(ServerError::MissingField("PlayerData"))?;
    let config = required(req.config, "Config")?;
    debug!("🎟️ POST start matchmaking with {config}");
    let response = provider.start_matchmaking(&config, players).await?;
    Ok(HttpResponse::Ok().json(response))
}

route!(stop_matchmaking => Post "/stop-matchmaking" impl SessionProvider);
pub async fn stop_matchmaking<P: SessionProvider>(
    body: web::Bytes,
    provider: web::Data<P>,
) -> Result<HttpResponse, ServerError> {
    let req = parse_body::<StopMatchmakingRequest>(&body);
    let ticket_id = required(req.ticket_id, "TicketId")?;
    debug!("🎟️ POST stop matchmaking for {ticket_id}");
    let response = provider.stop_matchmaking(&ticket_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

route!(check_tickets => Post "/check-tickets" impl TicketManagement);
pub async fn check_tickets<B: TicketManagement>(
    body: web::Bytes,
    api: web::Data<TicketQueryApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let req = parse_body::<CheckTicketsRequest>(&body);
    let ticket_ids = req.ticket_ids.unwrap_or_default();
    trace!("🎟️ POST check tickets for {} ids", ticket_ids.len());
    let ticket_list = api.fetch_tickets(&ticket_ids).await?;
    Ok(HttpResponse::Ok().json(CheckTicketsResponse { ticket_list }))
}

//----------------------------------------------   Notifications  ----------------------------------------------------
/// Unwraps a delivery down to the event `detail`. `Ok(None)` means the delivery has been fully handled already: it was
/// a handshake, a type we don't process, or its message could not be read.
fn unwrap_delivery(body: &[u8], confirmer: &SubscriptionConfirmer) -> Result<Option<Value>, ServerError> {
    let message = match Envelope::from_body(body)? {
        Envelope::SubscriptionConfirmation { topic_arn, subscribe_url } => {
            confirmer.confirm(topic_arn.as_deref(), subscribe_url.as_deref());
            return Ok(None);
        },
        Envelope::UnsubscribeConfirmation { topic_arn } => {
            info!("📨️ Unsubscribed from {}", topic_arn.as_deref().unwrap_or("(unknown topic)"));
            return Ok(None);
        },
        Envelope::Other(kind) => {
            info!("📨️ Ignoring {kind} delivery");
            return Ok(None);
        },
        Envelope::Notification { message_id, message } => {
            trace!("📨️ Notification {} received", message_id.as_deref().unwrap_or("(no id)"));
            message
        },
    };
    match message_detail(&message) {
        Ok(detail) => Ok(Some(detail)),
        Err(e) => {
            warn!("📨️ Dropping unreadable notification. {e}");
            Ok(None)
        },
    }
}

route!(matchmaking_events => Post "/matchmaking-events" impl TicketManagement);
pub async fn matchmaking_events<B: TicketManagement>(
    body: web::Bytes,
    api: web::Data<TicketFlowApi<B>>,
    confirmer: web::Data<SubscriptionConfirmer>,
) -> Result<HttpResponse, ServerError> {
    let Some(detail) = unwrap_delivery(&body, &confirmer)? else {
        return Ok(ok());
    };
    match MatchmakingNotification::from_detail(&detail) {
        Ok(notification) => {
            debug!("📨️ {} notification for {} tickets", notification.event, notification.tickets.len());
            api.process_notification(notification).await;
        },
        Err(e) => warn!("📨️ Dropping matchmaking notification. {e}"),
    }
    Ok(ok())
}

route!(placement_events => Post "/placement-events" impl SessionManagement, SessionProvider);
pub async fn placement_events<B, P>(
    body: web::Bytes,
    api: web::Data<SessionDirectoryApi<B>>,
    provider: web::Data<P>,
    confirmer: web::Data<SubscriptionConfirmer>,
) -> Result<HttpResponse, ServerError>
where
    B: SessionManagement,
    P: SessionProvider,
{
    let Some(detail) = unwrap_delivery(&body, &confirmer)? else {
        return Ok(ok());
    };
    let notification = match PlacementNotification::from_detail(detail) {
        Ok(n) => n,
        Err(e) => {
            warn!("📨️ Dropping placement notification. {e}");
            return Ok(ok());
        },
    };
    match notification.event {
        PlacementEvent::Fulfilled { placement_id } => {
            debug!("📨️ Placement {placement_id} fulfilled");
            let outcome = api.fulfil_placement(provider.get_ref(), &placement_id, notification.detail).await?;
            Ok(HttpResponse::Ok().json(outcome.response))
        },
        PlacementEvent::Other(kind) => {
            info!("📨️ {kind} placement notification acknowledged");
            Ok(ok())
        },
    }
}
