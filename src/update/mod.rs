//! The DynDNS update flow: request parsing, zone resolution and record
//! upserts.
//!
//! One pass per request: parse the query into an [`UpdateRequest`], fetch a
//! single zone listing shared across the whole batch, then resolve and
//! upsert each hostname in input order. The batch is fail-fast: the first
//! hostname that cannot be resolved or written aborts the rest, and no
//! partial success is reported to the caller. Upserts committed before the
//! failure are not rolled back; the provider has no batch transaction.

use crate::error::Error;
use crate::zone_store::{DynZoneStore, UpdateReceipt};
use std::time::Duration;

pub mod params;
pub mod zones;

pub use params::UpdateRequest;
pub use zones::resolve;

/// Run one update batch against the store, returning a receipt per hostname
/// in input order.
///
/// # Errors
///
/// Returns [`Error::NoZoneFound`] or [`Error::Provider`] for the first
/// hostname that fails; receipts for earlier hostnames are dropped.
pub async fn run(
    store: &DynZoneStore,
    request: &UpdateRequest,
    ttl: Duration,
) -> Result<Vec<UpdateReceipt>, Error> {
    let snapshot = store.read().await.list_zones().await?;

    let mut receipts = Vec::with_capacity(request.hostnames.len());
    for hostname in &request.hostnames {
        let zone = zones::resolve(hostname, &snapshot)?;
        let receipt = store
            .write()
            .await
            .upsert_address_record(&zone, hostname, &request.address, ttl)
            .await?;
        tracing::info!("update complete for {hostname} = {}", request.address);
        receipts.push(receipt);
    }

    Ok(receipts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone_store::{InMemoryZoneStore, ZoneId};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    const TTL: Duration = Duration::from_secs(300);

    fn store(zone_names: &[&str]) -> (DynZoneStore, Arc<RwLock<InMemoryZoneStore>>) {
        let inner = Arc::new(RwLock::new(InMemoryZoneStore::new(zone_names.iter().copied())));
        let store: DynZoneStore = inner.clone();
        (store, inner)
    }

    fn request(hostnames: &[&str], address: &str) -> UpdateRequest {
        UpdateRequest {
            hostnames: hostnames.iter().map(|h| (*h).to_string()).collect(),
            address: address.to_string(),
        }
    }

    #[tokio::test]
    async fn batch_yields_one_receipt_per_hostname_in_order() {
        let (store, _) = store(&["internal."]);
        let receipts = run(&store, &request(&["a.internal.", "b.internal."], "1.2.3.4"), TTL)
            .await
            .unwrap();

        let hostnames: Vec<&str> = receipts.iter().map(|r| r.hostname.as_str()).collect();
        assert_eq!(hostnames, vec!["a.internal.", "b.internal."]);
        assert!(receipts.iter().all(|r| r.address == "1.2.3.4"));
    }

    #[tokio::test]
    async fn hostname_lands_in_the_most_specific_zone() {
        let (store, inner) = store(&["internal.", "b.internal."]);
        run(&store, &request(&["a.b.internal."], "1.2.3.4"), TTL)
            .await
            .unwrap();

        let inner = inner.read().await;
        assert!(inner
            .record(&ZoneId("zone-1".to_string()), "a.b.internal.")
            .is_some());
        assert!(inner
            .record(&ZoneId("zone-0".to_string()), "a.b.internal.")
            .is_none());
    }

    #[tokio::test]
    async fn second_hostname_failing_aborts_the_batch() {
        let (store, inner) = store(&["internal."]);
        let err = run(&store, &request(&["a.internal.", "b.other."], "1.2.3.4"), TTL)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoZoneFound(h) if h == "b.other."));

        // The first upsert had already been committed when the batch died.
        let inner = inner.read().await;
        assert!(inner
            .record(&ZoneId("zone-0".to_string()), "a.internal.")
            .is_some());
    }

    #[tokio::test]
    async fn repeated_batches_converge_to_one_record() {
        let (store, inner) = store(&["internal."]);
        let req = request(&["a.internal."], "1.2.3.4");
        run(&store, &req, TTL).await.unwrap();
        run(&store, &req, TTL).await.unwrap();

        let inner = inner.read().await;
        let record = inner
            .record(&ZoneId("zone-0".to_string()), "a.internal.")
            .unwrap();
        assert_eq!(record.address, "1.2.3.4");
    }
}
