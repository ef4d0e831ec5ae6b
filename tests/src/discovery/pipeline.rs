use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use webdeck_common::config::DEFAULT_ICON;
use webdeck_common::network::address::LocalAddress;
use webdeck_common::service::ServiceRecord;
use webdeck_core::cache::ServiceCache;
use webdeck_core::probe::ServiceProber;
use webdeck_core::probe::http::HttpFetcher;
use webdeck_core::scheduler::{CyclePhase, Scheduler};

use crate::utils::{FixedResolver, FixedScanner, released_port, spawn_page};

const ROUTER_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>
        Router Admin
    </title>
    <link rel="shortcut icon" href="/f.ico">
  </head>
  <body><title>ignored</title></body>
</html>"#;

fn scheduler(cache: Arc<ServiceCache>, open: Vec<u16>) -> Scheduler {
    Scheduler::new(
        cache,
        Box::new(FixedResolver(LocalAddress::V4(Ipv4Addr::LOCALHOST))),
        Box::new(FixedScanner(open)),
        ServiceProber::new(HttpFetcher::new().unwrap()),
    )
}

#[tokio::test]
async fn cycle_publishes_only_html_services() {
    let html = spawn_page("text/html; charset=utf-8", ROUTER_PAGE).await;
    let bare = spawn_page("text/html", "<html><body>no head</body></html>").await;
    let json = spawn_page("application/json", "<html><title>not me</title></html>").await;
    let own = spawn_page("text/html", "<title>webdeck</title>").await;
    let closed = released_port().await;

    let cache = Arc::new(ServiceCache::new());
    assert!(cache.snapshot().no_services);

    let report = scheduler(cache.clone(), vec![html, json, own, closed, bare])
        .exclude_own_port(own)
        .run_cycle()
        .await;

    assert_eq!(report.open_ports, 5);
    assert_eq!(report.services, 2);

    let snapshot = cache.snapshot();
    assert!(!snapshot.no_services);
    assert_eq!(
        *snapshot.services,
        vec![
            ServiceRecord {
                title: "Router Admin".into(),
                icon: format!("http://127.0.0.1:{html}//f.ico"),
                link: format!("http://127.0.0.1:{html}"),
                port: html,
            },
            ServiceRecord {
                title: format!("Unnamed page ({bare})"),
                icon: DEFAULT_ICON.into(),
                link: format!("http://127.0.0.1:{bare}"),
                port: bare,
            },
        ]
    );
}

#[tokio::test]
async fn scheduler_finishes_cycle_then_honours_shutdown() {
    let html = spawn_page("text/html", "<title>Printer</title>").await;
    let cache = Arc::new(ServiceCache::new());
    let scheduler = scheduler(cache.clone(), vec![html]);
    let mut phases = scheduler.phases();

    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(scheduler.run(shutdown.clone()));

    tokio::time::timeout(
        Duration::from_secs(10),
        phases.wait_for(|phase| *phase == CyclePhase::Sleeping),
    )
    .await
    .expect("first cycle did not finish")
    .unwrap();
    shutdown.cancel();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("scheduler ignored shutdown")
        .unwrap();

    let snapshot = cache.snapshot();
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.services[0].title, "Printer");
}
