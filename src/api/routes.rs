use crate::api::api_error::APIError;
use crate::api::server::AppState;
use crate::auth;
use crate::error::Error;
use crate::update::{self, UpdateRequest};
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{header, Request};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    let gated = Router::new()
        .route("/nic/update", get(nic_update))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ));

    Router::new()
        .route("/healthcheck", get(health_check))
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

/// The access gate in front of the update endpoint. A missing or malformed
/// header and a credential mismatch both end up as 401; a missing configured
/// credential pair is a 500, it is the deployment that is broken.
async fn require_basic_auth<B>(
    State(state): State<AppState>,
    request: Request<B>,
    next: Next<B>,
) -> Result<Response, APIError> {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(Error::InvalidAuthHeader)?;

    let decision = auth::authorize(presented, &state.config.username, &state.config.password)?;
    if !decision.allow {
        tracing::debug!("rejected credentials for \"{}\"", decision.principal);
        return Err(Error::Unauthorized.into());
    }

    Ok(next.run(request).await)
}

async fn nic_update(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    WithRejection(Query(params), _): WithRejection<Query<BTreeMap<String, String>>, APIError>,
) -> Result<String, APIError> {
    let request = UpdateRequest::parse(params, Some(client_addr.ip()))?;
    let receipts = update::run(&state.zone_store, &request, state.config.ttl).await?;

    let mut body = String::new();
    for receipt in &receipts {
        body.push_str("good ");
        body.push_str(&receipt.address);
        body.push('\n');
    }
    Ok(body)
}
