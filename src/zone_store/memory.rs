use crate::error::Error;
use crate::update::params::qualify;
use crate::zone_store::{UpdateReceipt, Zone, ZoneId, ZoneStore};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use std::collections::HashMap;
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// One stored address record.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub address: String,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub ttl: Duration,
}

/// An in-memory zone store holding a fixed set of zones and their address
/// records. Not durable; used by tests and local development.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryZoneStore {
    zones: Vec<Zone>,
    // zone id -> fqdn -> record
    records: HashMap<String, HashMap<String, AddressRecord>>,
}

impl InMemoryZoneStore {
    /// Create a store serving the given zone names. Names are qualified with
    /// a trailing dot if needed; ids are synthesized per zone.
    pub fn new(zone_names: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let zones = zone_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Zone {
                id: ZoneId(format!("zone-{i}")),
                name: qualify(name.as_ref()),
            })
            .collect();
        InMemoryZoneStore {
            zones,
            records: HashMap::default(),
        }
    }

    /// Get the stored record for the given zone and FQDN (if any).
    pub fn record(&self, zone: &ZoneId, fqdn: &str) -> Option<&AddressRecord> {
        self.records.get(&zone.0).and_then(|z| z.get(fqdn))
    }
}

#[async_trait::async_trait]
impl ZoneStore for InMemoryZoneStore {
    async fn list_zones(&self) -> Result<Vec<Zone>, Error> {
        Ok(self.zones.clone())
    }

    async fn upsert_address_record(
        &mut self,
        zone: &ZoneId,
        fqdn: &str,
        address: &str,
        ttl: Duration,
    ) -> Result<UpdateReceipt, Error> {
        if !self.zones.iter().any(|z| z.id == *zone) {
            return Err(Error::Provider(format!("no such zone: {zone}")));
        }

        // NB: unwrap is safe: RFC 3339 formatting of a UTC now cannot fail.
        let submitted_at = OffsetDateTime::now_utc().format(&Rfc3339).unwrap();

        self.records.entry(zone.0.clone()).or_default().insert(
            fqdn.to_string(),
            AddressRecord {
                address: address.to_string(),
                ttl,
            },
        );

        Ok(UpdateReceipt {
            hostname: fqdn.to_string(),
            address: address.to_string(),
            zone: zone.clone(),
            submitted_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_replaces_existing_record() {
        let mut store = InMemoryZoneStore::new(["example.com."]);
        let zone = ZoneId("zone-0".to_string());

        store
            .upsert_address_record(&zone, "host.example.com.", "1.2.3.4", Duration::from_secs(300))
            .await
            .unwrap();
        store
            .upsert_address_record(&zone, "host.example.com.", "5.6.7.8", Duration::from_secs(300))
            .await
            .unwrap();

        let record = store.record(&zone, "host.example.com.").unwrap();
        assert_eq!(record.address, "5.6.7.8");
    }

    #[tokio::test]
    async fn upsert_unknown_zone_is_a_provider_error() {
        let mut store = InMemoryZoneStore::new(["example.com."]);
        let err = store
            .upsert_address_record(
                &ZoneId("nope".to_string()),
                "host.example.com.",
                "1.2.3.4",
                Duration::from_secs(300),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }

    #[tokio::test]
    async fn zone_names_are_qualified_on_construction() {
        let store = InMemoryZoneStore::new(["example.com", "internal."]);
        let names: Vec<String> = store
            .list_zones()
            .await
            .unwrap()
            .into_iter()
            .map(|z| z.name)
            .collect();
        assert_eq!(names, vec!["example.com.", "internal."]);
    }
}
