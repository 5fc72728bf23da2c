//! HTTP API implementing the DynDNS v2 update contract.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the
//!   service is operational. Not authenticated.
//!
//! ## `/nic/update` (GET)
//!
//!   The DynDNS v2 update endpoint, gated by HTTP Basic authentication
//!   against the configured username/password pair. Query parameters:
//!
//!   - `hostname` (required): one or more comma-separated hostnames to
//!     update. Names need not carry a trailing dot; they are fully qualified
//!     before use.
//!   - `myip` (optional): the address to write. When absent, the client's
//!     source address as observed on the connection is used instead.
//!   - `system` (optional): protocol-dialect hint sent by some ddclient
//!     versions; accepted and ignored.
//!
//!   Any other parameter is rejected with HTTP 400.
//!
//!   Each hostname is matched to the most specific zone in the provider's
//!   account (longest dot-terminated suffix wins) and its address record is
//!   upserted with the configured TTL. On success, returns HTTP 200 and a
//!   `text/plain` body with one line per hostname, in request order:
//!
//!   ```text
//!   good 203.0.113.7
//!   good 203.0.113.7
//!   ```
//!
//!   The batch is fail-fast: the first hostname that fails to resolve or to
//!   write aborts the remainder and the response is an HTTP 400 with the
//!   error message as its plain-text body. Updates committed before the
//!   failure are not rolled back.

mod api_error;
mod routes;
pub mod server;

use crate::config::Shared;
use crate::zone_store::DynZoneStore;
use axum::Router;
use server::AppState;

pub use server::new;

/// Build the API router without binding a listener. Lets tests drive the
/// service through `tower::ServiceExt`.
#[must_use]
pub fn router(config: Shared, zone_store: DynZoneStore) -> Router {
    routes::new(AppState { config, zone_store })
}
