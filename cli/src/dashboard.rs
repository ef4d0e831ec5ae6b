//! HTTP front-end over the published inventory.
//!
//! Handlers only read: a cache snapshot, the scheduler phase and a fresh
//! address lookup. None of them ever waits on scan work.

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::sync::watch;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use webdeck_common::network::address::LocalAddress;
use webdeck_common::scanning::AddressResolver;
use webdeck_common::service::Inventory;
use webdeck_core::cache::{CacheSnapshot, ServiceCache};
use webdeck_core::scheduler::CyclePhase;

mod render;

#[derive(Clone)]
pub struct DashboardState {
    pub cache: Arc<ServiceCache>,
    pub resolver: Arc<dyn AddressResolver>,
    pub phase: watch::Receiver<CyclePhase>,
}

/// Everything a page render needs, captured once per request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub ip: LocalAddress,
    pub web_services: Arc<Inventory>,
    pub no_services: bool,
    pub phase: String,
    pub generation: u64,
}

impl DashboardView {
    fn capture(state: &DashboardState) -> Self {
        let snapshot: CacheSnapshot = state.cache.snapshot();
        // Resolved per request, so it may briefly disagree with the address
        // the published inventory was built from.
        let ip: LocalAddress = state.resolver.resolve();

        Self {
            ip,
            web_services: snapshot.services,
            no_services: snapshot.no_services,
            phase: state.phase.borrow().to_string(),
            generation: snapshot.generation,
        }
    }
}

pub fn router(state: DashboardState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/services", get(services))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<DashboardState>) -> Html<String> {
    Html(render::page(&DashboardView::capture(&state)))
}

async fn services(State(state): State<DashboardState>) -> Json<DashboardView> {
    Json(DashboardView::capture(&state))
}
