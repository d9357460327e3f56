use std::fmt::Debug;

use chrono::{DateTime, Utc};
use gamelift_tools::{data_objects::GameSessionPlacement, GameLiftApiError, SessionProvider};
use log::*;
use serde_json::Value;

use crate::{
    db_types::{GameSession, NewGameSession, SessionSummary},
    relay_api::errors::SessionDirectoryError,
    traits::{SessionManagement, SessionStoreError},
};

/// The result of handling a `PlacementFulfilled` notification.
#[derive(Debug, Clone)]
pub struct PlacementOutcome {
    /// The provider's raw `DescribeGameSessionPlacement` response
    pub response: Value,
    /// False if the placement had already been materialized by an earlier delivery.
    pub created: bool,
    /// The directory entry for the placement. For a redelivery this is the entry stored the first time.
    pub session: GameSession,
}

/// `SessionDirectoryApi` owns the session directory. It is the only writer of session documents.
pub struct SessionDirectoryApi<B> {
    db: B,
}

impl<B> Debug for SessionDirectoryApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionDirectoryApi")
    }
}

impl<B> SessionDirectoryApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> SessionDirectoryApi<B>
where B: SessionManagement
{
    /// Every session in the directory, in store order.
    pub async fn list_sessions(&self) -> Result<Vec<SessionSummary>, SessionDirectoryError> {
        let sessions = self.db.fetch_game_sessions().await?;
        trace!("🏟️ {} sessions in the directory", sessions.len());
        Ok(sessions.iter().map(SessionSummary::from).collect())
    }

    /// Removes the session from the directory, then asks the provider to terminate it.
    ///
    /// The directory entries are gone even when the provider call fails; the provider error is still returned to the
    /// caller.
    pub async fn terminate_session<P: SessionProvider>(
        &self,
        provider: &P,
        game_session_id: &str,
    ) -> Result<Value, SessionDirectoryError> {
        let removed = self.db.delete_game_sessions(game_session_id).await?;
        if removed > 1 {
            warn!("🏟️ Removed {removed} directory entries for {game_session_id}. Expected at most one.");
        } else {
            debug!("🏟️ Removed {removed} directory entries for {game_session_id}");
        }
        let response = provider.terminate_game_session(game_session_id).await.map_err(|e| {
            warn!("🏟️ Session {game_session_id} left the directory but could not be terminated. {e}");
            e
        })?;
        info!("🏟️ Session {game_session_id} terminated");
        Ok(response)
    }

    /// Materializes the directory entry for a fulfilled placement.
    ///
    /// The provider is asked for the full placement details, which are merged into the notification `detail`. A
    /// redelivered notification finds the entry already present; that counts as success and the stored entry is left
    /// as it is.
    pub async fn fulfil_placement<P: SessionProvider>(
        &self,
        provider: &P,
        placement_id: &str,
        detail: Value,
    ) -> Result<PlacementOutcome, SessionDirectoryError> {
        let response = provider.describe_game_session_placement(placement_id).await.map_err(|e| {
            warn!("🏟️ Could not describe placement {placement_id}. {e}");
            e
        })?;
        let session = new_game_session(placement_id, detail, &response, Utc::now())?;
        let (session, created) = match self.db.insert_game_session(session).await {
            Ok(session) => {
                info!("🏟️ Placement {placement_id} fulfilled with session {}", session.game_session_id);
                (session, true)
            },
            Err(SessionStoreError::DuplicateSession(_)) => {
                let existing = self.db.fetch_game_session_for_placement(placement_id).await?.ok_or_else(|| {
                    SessionStoreError::DatabaseError(format!(
                        "Placement {placement_id} was rejected as a duplicate, but it has no directory entry"
                    ))
                })?;
                info!(
                    "🏟️ Placement {placement_id} was already fulfilled with session {}. Keeping the existing entry.",
                    existing.game_session_id
                );
                (existing, false)
            },
            Err(e) => {
                error!("🏟️ Could not save the session for placement {placement_id}. {e}");
                return Err(e.into());
            },
        };
        Ok(PlacementOutcome { response, created, session })
    }
}

/// Builds the directory entry for a placement. Typed fields come from the provider's description, falling back to
/// the notification where the provider left them out.
pub fn new_game_session(
    placement_id: &str,
    detail: Value,
    response: &Value,
    now: DateTime<Utc>,
) -> Result<NewGameSession, GameLiftApiError> {
    let placement = GameSessionPlacement::from_response(response).unwrap_or_else(|e| {
        warn!("🏟️ Placement {placement_id} description is incomplete. {e}");
        GameSessionPlacement::default()
    });
    let game_session_id = placement
        .session_identifier()
        .map(str::to_string)
        .or_else(|| detail_str(&detail, "gameSessionArn"))
        .ok_or_else(|| GameLiftApiError::JsonError(format!("Placement {placement_id} has no game session id")))?;
    let ip_address = placement.ip_address.clone().or_else(|| detail_str(&detail, "ipAddress"));
    let port = placement.port.or_else(|| detail_port(&detail));
    let details = merge_details(detail, response.get("GameSessionPlacement").unwrap_or(response));
    Ok(NewGameSession {
        placement_id: placement_id.to_string(),
        game_session_id,
        name: placement.game_session_name,
        ip_address,
        port,
        creation_time: placement.start_time,
        maximum_player_session_count: placement.maximum_player_session_count,
        time: Some(now),
        details,
    })
}

/// Overlays the fields of `placement` onto the notification detail. Provider values win.
fn merge_details(detail: Value, placement: &Value) -> Value {
    let mut merged = match detail {
        Value::Object(map) => map,
        _ => Default::default(),
    };
    if let Value::Object(fields) = placement {
        merged.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    Value::Object(merged)
}

fn detail_str(detail: &Value, key: &str) -> Option<String> {
    detail.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Placement notifications carry the port as a string.
fn detail_port(detail: &Value) -> Option<i64> {
    match detail.get("port")? {
        Value::String(s) => s.parse().ok(),
        v => v.as_i64(),
    }
}
