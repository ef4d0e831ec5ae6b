use std::net::Ipv4Addr;

use async_trait::async_trait;
use axum::Router;
use axum::http::header;
use axum::routing::get;
use tokio::net::TcpListener;

use webdeck_common::network::address::LocalAddress;
use webdeck_common::scanning::{AddressResolver, PortScanner};

/// Serves `body` with the given content type at `/` on a loopback port.
pub async fn spawn_page(content_type: &'static str, body: &'static str) -> u16 {
    let app = Router::new().route(
        "/",
        get(move || async move { ([(header::CONTENT_TYPE, content_type)], body) }),
    );
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    port
}

/// A loopback port that nothing listens on any more.
pub async fn released_port() -> u16 {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    listener.local_addr().unwrap().port()
}

pub struct FixedResolver(pub LocalAddress);

impl AddressResolver for FixedResolver {
    fn resolve(&self) -> LocalAddress {
        self.0
    }
}

/// Reports a fixed list of open ports without touching the network.
pub struct FixedScanner(pub Vec<u16>);

#[async_trait]
impl PortScanner for FixedScanner {
    async fn scan(&self, _ip: Ipv4Addr) -> Vec<u16> {
        self.0.clone()
    }
}
