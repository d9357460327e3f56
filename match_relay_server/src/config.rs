//! Server configuration.
//!
//! Every setting is read from an `MRS_*` environment variable (a `.env` file is loaded first by `main`). Missing or
//! invalid values fall back to defaults with a warning, so the server always starts.
use std::env;

use gamelift_tools::GameLiftConfig;
use log::*;
use mrs_common::helpers::parse_boolean_flag;

const DEFAULT_MRS_HOST: &str = "127.0.0.1";
const DEFAULT_MRS_PORT: u16 = 8370;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/match_relay.db";
const DEFAULT_DATABASE_POOL_SIZE: u32 = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_pool_size: u32,
    /// If true, SNS subscription confirmations are answered by visiting their `SubscribeURL`.
    pub auto_confirm_subscriptions: bool,
    pub gamelift: GameLiftConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_MRS_HOST.to_string(),
            port: DEFAULT_MRS_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_pool_size: DEFAULT_DATABASE_POOL_SIZE,
            auto_confirm_subscriptions: false,
            gamelift: GameLiftConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("MRS_HOST").ok().unwrap_or_else(|| DEFAULT_MRS_HOST.into());
        let port = env::var("MRS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for MRS_PORT. {e} Using the default, {DEFAULT_MRS_PORT}, instead."
                    );
                    DEFAULT_MRS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_MRS_PORT);
        let database_url = env::var("MRS_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ MRS_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let database_pool_size = env::var("MRS_DATABASE_POOL_SIZE")
            .ok()
            .and_then(|s| {
                s.parse::<u32>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for MRS_DATABASE_POOL_SIZE. {e}"))
                    .ok()
            })
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_DATABASE_POOL_SIZE);
        let auto_confirm_subscriptions = parse_boolean_flag(env::var("MRS_AUTO_CONFIRM_SUBSCRIPTIONS").ok(), false);
        if auto_confirm_subscriptions {
            info!("🪛️ SNS subscriptions will be confirmed automatically");
        }
        let gamelift = GameLiftConfig::new_from_env_or_default();
        Self { host, port, database_url, database_pool_size, auto_confirm_subscriptions, gamelift }
    }
}
