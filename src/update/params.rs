//! Update request parsing and normalization.

use crate::error::Error;
use std::collections::BTreeMap;
use std::net::IpAddr;

/// A validated DynDNS v2 update command: one or more fully qualified
/// hostnames and the candidate address to write for each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub hostnames: Vec<String>,
    pub address: String,
}

/// Qualify a hostname by appending a trailing dot if absent. Idempotent.
pub fn qualify(hostname: &str) -> String {
    if hostname.ends_with('.') {
        hostname.to_string()
    } else {
        format!("{hostname}.")
    }
}

impl UpdateRequest {
    /// Parse the query parameters of an update call.
    ///
    /// `hostname` is required and may carry multiple comma-separated names;
    /// each is qualified with a trailing dot. `myip` is used verbatim when
    /// present, otherwise the address falls back to `source_ip`. `system` is
    /// a protocol-dialect hint sent by some ddclient versions; it would
    /// matter if more than one dialect were implemented, for now it is
    /// ignored. Any other parameter is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingHostname`], [`Error::NoSourceAddress`] or
    /// [`Error::UnknownParameters`] as described above.
    pub fn parse(
        mut params: BTreeMap<String, String>,
        source_ip: Option<IpAddr>,
    ) -> Result<Self, Error> {
        let hostname = params.remove("hostname").ok_or(Error::MissingHostname)?;
        let hostnames = hostname.split(',').map(qualify).collect();

        let address = match params.remove("myip") {
            Some(addr) => addr,
            None => source_ip.ok_or(Error::NoSourceAddress)?.to_string(),
        };

        params.remove("system");

        if !params.is_empty() {
            let unknown: Vec<String> = params.into_keys().collect();
            return Err(Error::UnknownParameters(unknown.join(", ")));
        }

        Ok(UpdateRequest {
            hostnames,
            address,
        })
    }
}
