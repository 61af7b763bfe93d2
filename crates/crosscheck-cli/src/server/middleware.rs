//! Request middleware for the API routes.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::error::ApiError;
use super::state::AppState;

/// Reject clients that have spent their request budget.
///
/// Clients are keyed by peer address; requests without connection info
/// (in-process calls) share one budget.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if state.limiter.check_key(&client).is_err() {
        tracing::warn!(%client, "rate limit exceeded");
        return ApiError::TooManyRequests(
            "Too many requests from this IP, please try again later.".to_string(),
        )
        .into_response();
    }

    next.run(request).await
}
