use log::debug;
use sqlx::{types::Json, SqliteConnection};

use super::is_duplicate_key;
use crate::{
    db_types::{GameSession, NewGameSession},
    traits::SessionStoreError,
};

const SESSION_COLUMNS: &str = "id, placement_id, game_session_id, name, ip_address, port, creation_time, \
                               maximum_player_session_count, time, details";

pub async fn insert_game_session(
    session: NewGameSession,
    conn: &mut SqliteConnection,
) -> Result<GameSession, SessionStoreError> {
    let sql = format!(
        r#"
        INSERT INTO game_sessions (
            placement_id,
            game_session_id,
            name,
            ip_address,
            port,
            creation_time,
            maximum_player_session_count,
            time,
            details
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {SESSION_COLUMNS}"#
    );
    let placement_id = session.placement_id.clone();
    let result = sqlx::query_as::<_, GameSession>(&sql)
        .bind(session.placement_id)
        .bind(session.game_session_id)
        .bind(session.name)
        .bind(session.ip_address)
        .bind(session.port)
        .bind(session.creation_time)
        .bind(session.maximum_player_session_count)
        .bind(session.time)
        .bind(Json(session.details))
        .fetch_all(conn)
        .await
        .map_err(|e| {
            if is_duplicate_key(&e) {
                SessionStoreError::DuplicateSession(placement_id.clone())
            } else {
                e.into()
            }
        })?
        .pop()
        .ok_or_else(|| SessionStoreError::DatabaseError(format!("No row returned for placement {placement_id}")))?;
    debug!("🗃️ Session {} saved for placement {placement_id}", result.game_session_id);
    Ok(result)
}

/// Returns every session in the directory, oldest first.
pub async fn fetch_game_sessions(conn: &mut SqliteConnection) -> Result<Vec<GameSession>, SessionStoreError> {
    let sql = format!("SELECT {SESSION_COLUMNS} FROM game_sessions ORDER BY id ASC");
    let sessions = sqlx::query_as::<_, GameSession>(&sql).fetch_all(conn).await?;
    Ok(sessions)
}

pub async fn fetch_game_session_for_placement(
    placement_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<GameSession>, SessionStoreError> {
    let sql = format!("SELECT {SESSION_COLUMNS} FROM game_sessions WHERE placement_id = $1");
    let session = sqlx::query_as::<_, GameSession>(&sql).bind(placement_id).fetch_optional(conn).await?;
    Ok(session)
}

pub async fn delete_game_sessions(
    game_session_id: &str,
    conn: &mut SqliteConnection,
) -> Result<u64, SessionStoreError> {
    let result =
        sqlx::query("DELETE FROM game_sessions WHERE game_session_id = $1").bind(game_session_id).execute(conn).await?;
    let count = result.rows_affected();
    debug!("🗃️ Deleted {count} directory entries for session {game_session_id}");
    Ok(count)
}
