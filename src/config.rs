use crate::error::Error;
use crate::zone_store::{CloudflareZoneStore, DynZoneStore, InMemoryZoneStore};
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub type Shared = Arc<Config>;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_api_timeout")]
    pub api_timeout: Duration,
    /// TTL written on every upserted record. One process-wide value.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_ttl")]
    pub ttl: Duration,
    pub username: String,
    pub password: String,
    pub zones: ZoneStoreConfig,
}

fn default_api_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_ttl() -> Duration {
    Duration::from_secs(5 * 60)
}

#[derive(Deserialize, Clone)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ZoneStoreConfig {
    /// Fixed in-process zones, for tests and local development.
    Memory { zones: Vec<String> },
    /// Live Cloudflare account.
    Cloudflare { api_token: String },
}

// Hand-written so the API token never lands in logs.
impl fmt::Debug for ZoneStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneStoreConfig::Memory { zones } => {
                f.debug_struct("Memory").field("zones", zones).finish()
            }
            ZoneStoreConfig::Cloudflare { .. } => f
                .debug_struct("Cloudflare")
                .field("api_token", &"<REDACTED>")
                .finish(),
        }
    }
}

impl Config {
    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] or [`Error::InvalidJSON`] if the file can't be
    /// read or parsed, and [`Error::MissingCredentials`] if either expected
    /// credential is empty. Credential problems must fail at startup, not
    /// surface as 500s on the first update.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        if conf.username.is_empty() || conf.password.is_empty() {
            return Err(Error::MissingCredentials);
        }
        Ok(conf)
    }

    /// Build the zone store this config selects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the provider HTTP client can't be built.
    pub fn zone_store(&self) -> Result<DynZoneStore, Error> {
        Ok(match &self.zones {
            ZoneStoreConfig::Memory { zones } => {
                Arc::new(RwLock::new(InMemoryZoneStore::new(zones.iter())))
            }
            ZoneStoreConfig::Cloudflare { api_token } => {
                Arc::new(RwLock::new(CloudflareZoneStore::new(api_token.clone())?))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_and_token_is_redacted() {
        let conf: Config = serde_json::from_str(
            r#"{
                "bind_addr": "127.0.0.1:8053",
                "username": "user",
                "password": "pass",
                "zones": {"provider": "cloudflare", "api_token": "secret-token"}
            }"#,
        )
        .unwrap();
        assert_eq!(conf.ttl, Duration::from_secs(300));
        assert_eq!(conf.api_timeout, Duration::from_secs(30));
        assert!(!format!("{conf:?}").contains("secret-token"));
    }
}
