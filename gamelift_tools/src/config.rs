use log::*;
use mrs_common::Secret;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_MAX_PLAYERS: u32 = 2;

#[derive(Debug, Clone, Default)]
pub struct GameLiftConfig {
    pub region: String,
    /// The service endpoint. Defaults to the public regional endpoint, but can point at a local stand-in for testing.
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: Secret<String>,
    pub session_token: Option<Secret<String>>,
    pub fleet_id: String,
    /// Custom location (e.g. an Anywhere fleet location). Omitted from requests when not set.
    pub location: Option<String>,
    pub queue_name: String,
    /// `MaximumPlayerSessionCount` used for every new game session requested through this client.
    pub max_players: u32,
}

impl GameLiftConfig {
    pub fn new(region: &str, endpoint: &str) -> Self {
        Self {
            region: region.to_string(),
            endpoint: endpoint.to_string(),
            max_players: DEFAULT_MAX_PLAYERS,
            ..Default::default()
        }
    }

    pub fn default_endpoint(region: &str) -> String {
        format!("https://gamelift.{region}.amazonaws.com")
    }

    pub fn new_from_env_or_default() -> Self {
        let region = std::env::var("MRS_GAMELIFT_REGION").unwrap_or_else(|_| {
            warn!("🪛️ MRS_GAMELIFT_REGION not set, using {DEFAULT_REGION} as default");
            DEFAULT_REGION.to_string()
        });
        let endpoint = std::env::var("MRS_GAMELIFT_ENDPOINT").unwrap_or_else(|_| Self::default_endpoint(&region));
        let access_key_id = std::env::var("MRS_GAMELIFT_ACCESS_KEY_ID").unwrap_or_else(|_| {
            error!("🪛️ MRS_GAMELIFT_ACCESS_KEY_ID is not set. Requests to GameLift will be rejected.");
            String::default()
        });
        let secret_access_key = Secret::new(std::env::var("MRS_GAMELIFT_SECRET_ACCESS_KEY").unwrap_or_else(|_| {
            error!("🪛️ MRS_GAMELIFT_SECRET_ACCESS_KEY is not set. Requests to GameLift will be rejected.");
            String::default()
        }));
        let session_token = std::env::var("MRS_GAMELIFT_SESSION_TOKEN").ok().map(Secret::new);
        let fleet_id = std::env::var("MRS_GAMELIFT_FLEET_ID").unwrap_or_else(|_| {
            warn!("🪛️ MRS_GAMELIFT_FLEET_ID is not set. create-session requests will fail.");
            String::default()
        });
        let location = std::env::var("MRS_GAMELIFT_LOCATION").ok().filter(|s| !s.is_empty());
        let queue_name = std::env::var("MRS_GAMELIFT_QUEUE_NAME").unwrap_or_else(|_| {
            warn!("🪛️ MRS_GAMELIFT_QUEUE_NAME is not set. queue-session requests will fail.");
            String::default()
        });
        let max_players = std::env::var("MRS_GAMELIFT_MAX_PLAYERS")
            .ok()
            .and_then(|s| {
                s.parse::<u32>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for MRS_GAMELIFT_MAX_PLAYERS. {e}"))
                    .ok()
            })
            .unwrap_or(DEFAULT_MAX_PLAYERS);
        Self {
            region,
            endpoint,
            access_key_id,
            secret_access_key,
            session_token,
            fleet_id,
            location,
            queue_name,
            max_players,
        }
    }
}
