use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use ridegate_core::AppError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::state::{AppState, IpRateLimiter};

pub const RATE_LIMITED: &str = "Too many requests, please try again later.";

fn forwarded_ip(req: &Request) -> Option<IpAddr> {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|ip| ip.trim().parse::<IpAddr>().ok())
}

fn peer_ip(req: &Request) -> Option<IpAddr> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

/// Client address used as the limiter key.
///
/// The socket peer, unless `trust_proxy` is set, in which case the first
/// `x-forwarded-for` hop wins and the peer is the fallback.
pub fn client_ip(req: &Request, trust_proxy: bool) -> IpAddr {
    let forwarded = if trust_proxy { forwarded_ip(req) } else { None };

    forwarded
        .or_else(|| peer_ip(req))
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Global per-IP quota, applied ahead of every route.
pub async fn rate_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(limiter) = &state.rate_limiter {
        let ip = client_ip(&req, state.rate_limit_config.trust_proxy);
        if limiter.check_key(&ip).is_err() {
            warn!(%ip, "Rate limit exceeded");
            return Err(AppError::too_many_requests(RATE_LIMITED));
        }
    }

    Ok(next.run(req).await)
}

/// Periodically drops limiter entries for clients that are back at a full
/// allowance, so the keyed state stays bounded by recently active clients.
pub fn spawn_limiter_upkeep(limiter: Arc<IpRateLimiter>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(every).await;
            limiter.retain_recent();
            limiter.shrink_to_fit();
            debug!(tracked_clients = limiter.len(), "Rate limiter upkeep");
        }
    })
}
