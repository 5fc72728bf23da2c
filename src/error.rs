//! Error types.

use axum::extract::rejection::QueryRejection;

/// Error enumerates the possible Dyngate error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when an update request has no `hostname` query parameter.
    #[error("hostname is a required parameter")]
    MissingHostname,

    /// Returned when an update request has no `myip` query parameter and the
    /// client's source address could not be observed by the transport.
    #[error("myip not given and source IP cannot be determined")]
    NoSourceAddress,

    /// Returned when an update request carries query parameters outside the
    /// `hostname`/`myip`/`system` set. The update endpoint is a strict
    /// closed-set validator.
    #[error("unknown parameters: {0}")]
    UnknownParameters(String),

    /// Returned when no zone in the provider's listing is a dot-terminated
    /// suffix of the requested hostname.
    #[error("no zone found for hostname \"{0}\"")]
    NoZoneFound(String),

    /// Returned when the DNS provider rejects a listing or upsert call. The
    /// message is the provider's own. Never retried here; retry policy
    /// belongs to the caller.
    #[error("provider error: {0}")]
    Provider(String),

    /// Returned when the query string itself fails to deserialize.
    #[error(transparent)]
    QueryExtractorRejection(#[from] QueryRejection),

    /// Returned for an `Authorization` header that is not two
    /// whitespace-separated tokens, or whose payload is not valid base64
    /// `user:pass`.
    #[error("invalid authorization header")]
    InvalidAuthHeader,

    /// Returned for an `Authorization` scheme other than `Basic`.
    #[error("only \"Basic\" authorization is supported, got \"{0}\"")]
    UnsupportedAuthScheme(String),

    /// Returned when presented credentials decode cleanly but do not match
    /// the configured pair.
    #[error("unauthorized")]
    Unauthorized,

    /// Returned when the expected username or password is missing from the
    /// configuration. This is a deployment fault, distinct from a normal
    /// authentication failure.
    #[error("username and password must be configured")]
    MissingCredentials,

    /// Returned when a provider API call fails at the HTTP layer.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when processing JSON (e.g. loading a
    /// [`Config`][crate::config::Config] from disk) fails due to invalid
    /// JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
