//! Hosted-zone directory and address-record storage.
//!
//! Abstracts the authoritative DNS provider behind a single trait: one call
//! to list every zone visible to the configured credentials, and one call to
//! create-or-replace an address record inside a zone. The update flow fetches
//! a fresh listing per request and never caches it, so a store implementation
//! holds no state the provider does not own.
//!
//! Two implementations are provided, [`memory::InMemoryZoneStore`] and
//! [`cloudflare::CloudflareZoneStore`]. The former backs tests and local
//! development; the latter talks to the Cloudflare v4 API.

use crate::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub mod cloudflare;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use cloudflare::CloudflareZoneStore;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryZoneStore;

/// `DynZoneStore` is a type alias for a [`ZoneStore`] shared between request
/// handlers through an [`Arc`] and a [`RwLock`].
#[allow(clippy::module_name_repetitions)]
pub type DynZoneStore = Arc<RwLock<dyn ZoneStore + Send + Sync>>;

/// Opaque provider-assigned zone identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ZoneId(pub String);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One zone from a directory listing. `name` is always fully qualified with
/// a trailing dot; implementations qualify on ingest if their provider
/// returns bare names.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
}

/// Receipt for one committed address-record upsert. `submitted_at` is the
/// provider's change-tracking timestamp, serialized as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReceipt {
    pub hostname: String,
    pub address: String,
    pub zone: ZoneId,
    pub submitted_at: String,
}

/// An async trait describing the zone directory and record store exposed by
/// an authoritative DNS provider.
#[async_trait::async_trait]
pub trait ZoneStore {
    /// List every zone visible to the configured credentials.
    async fn list_zones(&self) -> Result<Vec<Zone>, Error>;

    /// Create or replace the address record for `fqdn` inside `zone`.
    /// Repeated calls with identical arguments converge to the same record
    /// state.
    async fn upsert_address_record(
        &mut self,
        zone: &ZoneId,
        fqdn: &str,
        address: &str,
        ttl: Duration,
    ) -> Result<UpdateReceipt, Error>;
}
