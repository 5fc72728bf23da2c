use crate::error::Error;
use axum::extract::rejection::QueryRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Renders crate errors as the plain-text responses DynDNS clients parse.
///
/// Provider-side failures map to 400 like client errors; the v2 contract
/// never distinguished them and downstream clients key off the status class.
pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let any_err = self.0;
        let status = match any_err.downcast_ref::<Error>() {
            Some(
                Error::MissingHostname
                | Error::NoSourceAddress
                | Error::UnknownParameters(_)
                | Error::NoZoneFound(_)
                | Error::Provider(_)
                | Error::Http(_)
                | Error::QueryExtractorRejection(_),
            ) => StatusCode::BAD_REQUEST,
            Some(
                Error::InvalidAuthHeader | Error::UnsupportedAuthScheme(_) | Error::Unauthorized,
            ) => StatusCode::UNAUTHORIZED,
            // Extractor rejections arrive unwrapped via the blanket From.
            _ if any_err.downcast_ref::<QueryRejection>().is_some() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = format!("{any_err}");
        if status == StatusCode::UNAUTHORIZED {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"dyngate\"")],
                body,
            )
                .into_response();
        }
        (status, body).into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
