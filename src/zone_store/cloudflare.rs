//! A Cloudflare v4 API implementation of the [`ZoneStore`][super::ZoneStore]
//! trait.
//!
//! Single-shot calls only: one GET for the zone listing, and a record lookup
//! followed by one PUT (replace) or POST (create) for an upsert. Failures
//! surface as [`Error::Provider`] with Cloudflare's own message and are never
//! retried here. The API token never appears in logs or `Debug` output.

use crate::error::Error;
use crate::update::params::qualify;
use crate::zone_store::{UpdateReceipt, Zone, ZoneId, ZoneStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv6Addr;
use std::time::Duration;

const API_BASE: &str = "https://api.cloudflare.com/client/v4";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct CloudflareZoneStore {
    api_token: String,
    client: reqwest::Client,
}

impl fmt::Debug for CloudflareZoneStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareZoneStore")
            .field("api_token", &"<REDACTED>")
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize, Debug)]
struct ApiResponse<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<T>,
}

#[derive(Deserialize, Debug)]
struct ApiMessage {
    code: i64,
    message: String,
}

#[derive(Deserialize, Debug)]
struct ZoneObject {
    id: String,
    name: String,
}

#[derive(Deserialize, Debug)]
struct RecordObject {
    id: String,
    modified_on: String,
}

#[derive(Serialize, Debug)]
struct RecordPayload<'a> {
    #[serde(rename = "type")]
    record_type: &'a str,
    name: &'a str,
    content: &'a str,
    ttl: u64,
}

/// The record type to write for an address value. The update protocol does
/// not validate addresses, so anything that isn't an IPv6 literal is sent as
/// an A record verbatim.
fn record_type(address: &str) -> &'static str {
    if address.parse::<Ipv6Addr>().is_ok() {
        "AAAA"
    } else {
        "A"
    }
}

impl CloudflareZoneStore {
    /// Create a store using the given API token (Zone:Read + DNS:Edit).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn new(api_token: impl Into<String>) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(CloudflareZoneStore {
            api_token: api_token.into(),
            client,
        })
    }

    fn unwrap_response<T>(response: ApiResponse<T>) -> Result<T, Error> {
        if !response.success {
            let detail: Vec<String> = response
                .errors
                .iter()
                .map(|e| format!("{} (code {})", e.message, e.code))
                .collect();
            return Err(Error::Provider(detail.join("; ")));
        }
        response
            .result
            .ok_or_else(|| Error::Provider("missing result in successful response".to_string()))
    }

    async fn lookup_record(
        &self,
        zone: &ZoneId,
        name: &str,
        record_type: &str,
    ) -> Result<Option<RecordObject>, Error> {
        let response: ApiResponse<Vec<RecordObject>> = self
            .client
            .get(format!("{API_BASE}/zones/{zone}/dns_records"))
            .query(&[("type", record_type), ("name", name)])
            .bearer_auth(&self.api_token)
            .send()
            .await?
            .json()
            .await?;
        Ok(Self::unwrap_response(response)?.into_iter().next())
    }
}

#[async_trait::async_trait]
impl ZoneStore for CloudflareZoneStore {
    async fn list_zones(&self) -> Result<Vec<Zone>, Error> {
        let response: ApiResponse<Vec<ZoneObject>> = self
            .client
            .get(format!("{API_BASE}/zones"))
            .query(&[("per_page", "50")])
            .bearer_auth(&self.api_token)
            .send()
            .await?
            .json()
            .await?;

        // Cloudflare returns bare zone names; qualify to hold the
        // dot-terminated invariant.
        Ok(Self::unwrap_response(response)?
            .into_iter()
            .map(|z| Zone {
                id: ZoneId(z.id),
                name: qualify(&z.name),
            })
            .collect())
    }

    async fn upsert_address_record(
        &mut self,
        zone: &ZoneId,
        fqdn: &str,
        address: &str,
        ttl: Duration,
    ) -> Result<UpdateReceipt, Error> {
        let record_type = record_type(address);
        // Record names on the wire are unqualified.
        let name = fqdn.strip_suffix('.').unwrap_or(fqdn);
        let payload = RecordPayload {
            record_type,
            name,
            content: address,
            ttl: ttl.as_secs(),
        };

        let existing = self.lookup_record(zone, name, record_type).await?;
        let request = match &existing {
            Some(record) => self
                .client
                .put(format!("{API_BASE}/zones/{zone}/dns_records/{}", record.id)),
            None => self
                .client
                .post(format!("{API_BASE}/zones/{zone}/dns_records")),
        };

        let response: ApiResponse<RecordObject> = request
            .json(&payload)
            .bearer_auth(&self.api_token)
            .send()
            .await?
            .json()
            .await?;
        let record = Self::unwrap_response(response)?;

        Ok(UpdateReceipt {
            hostname: fqdn.to_string(),
            address: address.to_string(),
            zone: zone.clone(),
            submitted_at: record.modified_on,
        })
    }
}
