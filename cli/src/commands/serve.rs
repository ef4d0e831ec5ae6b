use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use webdeck_common::config::Config;
use webdeck_core::cache::ServiceCache;
use webdeck_core::network::interface::InterfaceResolver;
use webdeck_core::probe::ServiceProber;
use webdeck_core::probe::http::HttpFetcher;
use webdeck_core::scanner::PortSweep;
use webdeck_core::scheduler::Scheduler;

use crate::dashboard::{self, DashboardState};

pub async fn serve(cfg: Config) -> anyhow::Result<()> {
    let cache: Arc<ServiceCache> = Arc::new(ServiceCache::new());
    let prober = ServiceProber::new(HttpFetcher::new()?);

    let scheduler = Scheduler::new(
        cache.clone(),
        Box::new(InterfaceResolver),
        Box::new(PortSweep::new()),
        prober,
    )
    .exclude_own_port(cfg.listen_port);

    let state = DashboardState {
        cache,
        resolver: Arc::new(InterfaceResolver),
        phase: scheduler.phases(),
    };

    let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, cfg.listen_port));
    let listener: TcpListener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind dashboard to {bind_addr}"))?;
    info!("Dashboard listening on http://{bind_addr}");

    let shutdown = CancellationToken::new();
    let scheduler_handle = tokio::spawn(scheduler.run(shutdown.clone()));

    let app = dashboard::router(state, &cfg.static_dir);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal(shutdown.clone()))
        .await;

    shutdown.cancel();
    info!("Waiting for the current scan cycle to finish");
    if let Err(e) = scheduler_handle.await {
        warn!("Scheduler task ended abnormally: {e}");
    }

    served.context("dashboard server failed")
}

async fn wait_for_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("Failed to listen for Ctrl-C: {e}");
                return shutdown.cancelled().await;
            }
            info!("Shutdown requested");
        }
        _ = shutdown.cancelled() => {}
    }
}
