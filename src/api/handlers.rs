//! API Handlers
//!
//! HTTP request handlers for the inspection endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::{KeepAliveError, Result};
use crate::keepalive::Viewport;
use crate::models::{
    ClearResponse, EntryResponse, HealthResponse, MaxCacheRequest, MaxCacheResponse,
    NavigateRequest, NavigateResponse, PolicyRequest, PolicyResponse, RemoveResponse,
    StatsResponse, ViewportRequest, ViewportResponse,
};
use crate::simulator::BrowserSession;
use crate::tasks::spawn_deferred_restore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The simulated browser session owning the view cache
    pub session: Arc<RwLock<BrowserSession>>,
    /// Delay before deferred scroll restores fire
    pub frame_interval: Duration,
}

impl AppState {
    pub fn new(session: BrowserSession, frame_interval: Duration) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            frame_interval,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let session = BrowserSession::from_config(&config.keepalive)?;
        Ok(Self::new(
            session,
            Duration::from_millis(config.frame_interval_ms),
        ))
    }
}

/// Handler for POST /navigate
///
/// Hands a navigation to the cache and schedules the next paint.
pub async fn navigate_handler(
    State(state): State<AppState>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<NavigateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(KeepAliveError::InvalidRequest(error_msg));
    }

    let nav = {
        let mut session = state.session.write().await;
        session.navigate(&req.to_navigation())?
    };

    spawn_deferred_restore(
        state.session.clone(),
        nav.frame,
        nav.restore.clone(),
        state.frame_interval,
    );

    Ok(Json(NavigateResponse::from(&nav)))
}

/// Handler for GET /entries/:key
pub async fn entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<EntryResponse>> {
    let session = state.session.read().await;
    let keepalive = session.keepalive();
    let entry = keepalive
        .entry(&key)
        .ok_or_else(|| KeepAliveError::NotFound(key.clone()))?;

    Ok(Json(EntryResponse::new(entry, keepalive.state_of(&key))))
}

/// Handler for DELETE /entries/:key
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<RemoveResponse>> {
    let mut session = state.session.write().await;
    if !session.keepalive_mut().remove_entry(&key) {
        return Err(KeepAliveError::NotFound(key));
    }

    Ok(Json(RemoveResponse::new(key)))
}

/// Handler for DELETE /entries
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut session = state.session.write().await;
    let removed = session.keepalive_mut().clear_all();

    Json(ClearResponse { removed })
}

/// Handler for PUT /max-cache
pub async fn max_cache_handler(
    State(state): State<AppState>,
    Json(req): Json<MaxCacheRequest>,
) -> Result<Json<MaxCacheResponse>> {
    let mut session = state.session.write().await;
    let evicted = session.keepalive_mut().set_max_cache(req.max_cache)?;

    Ok(Json(MaxCacheResponse {
        max_cache: req.max_cache,
        evicted,
    }))
}

/// Handler for PUT /policy
pub async fn policy_handler(
    State(state): State<AppState>,
    Json(req): Json<PolicyRequest>,
) -> Json<PolicyResponse> {
    let mut session = state.session.write().await;
    let keepalive = session.keepalive_mut();
    let pruned = keepalive.update_policy(req.into());

    Json(PolicyResponse::new(keepalive.policy(), pruned))
}

/// Handler for GET /viewport
pub async fn viewport_handler(State(state): State<AppState>) -> Json<ViewportResponse> {
    let session = state.session.read().await;
    Json(viewport_response(&session))
}

/// Handler for PUT /viewport
///
/// Simulates the user scrolling the visible page.
pub async fn scroll_handler(
    State(state): State<AppState>,
    Json(req): Json<ViewportRequest>,
) -> Result<Json<ViewportResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(KeepAliveError::InvalidRequest(error_msg));
    }

    let mut session = state.session.write().await;
    session.viewport_mut().user_scroll(req.offset);

    Ok(Json(viewport_response(&session)))
}

fn viewport_response(session: &BrowserSession) -> ViewportResponse {
    ViewportResponse {
        offset: session.viewport().scroll_offset(),
        laid_out: session.viewport().is_laid_out(),
        current_path: session.current_page().map(|page| page.path.clone()),
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let session = state.session.read().await;
    let keepalive = session.keepalive();

    Json(StatsResponse::new(
        keepalive.get_stats(),
        keepalive.scroll_restoration(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
