//! Dyngate
//!
//! A minimal self-hosted [DynDNS v2] compatible front-end for hosted DNS
//! zones. Lets stock dynamic-DNS clients (ddclient, router firmware) keep
//! address records current in a managed authoritative account without
//! handing them provider credentials.
//!
//! An update request names one or more hostnames and a candidate address;
//! each hostname is matched to the most specific owning zone in the
//! provider's listing by longest-suffix match, and its A/AAAA record is
//! idempotently upserted with a fixed TTL. The endpoint sits behind an HTTP
//! Basic authentication gate.
//!
//! [DynDNS v2]: https://help.dyn.com/remote-access-api/perform-update/
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod update;
pub mod zone_store;

pub use api::new as new_http;
pub use config::{Config, Shared};
pub use zone_store::{CloudflareZoneStore, InMemoryZoneStore};
