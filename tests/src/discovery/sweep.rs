use std::collections::HashSet;
use std::net::Ipv4Addr;

use tokio::net::TcpListener;
use webdeck_core::scanner::PortSweep;

/// Sweeps the real loopback interface. Other services on the machine may
/// show up too, so only containment of our own listeners is asserted.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn sweep_finds_bound_loopback_listeners() {
    let mut listeners: Vec<TcpListener> = Vec::new();
    for _ in 0..3 {
        listeners.push(TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap());
    }
    let bound: HashSet<u16> = listeners
        .iter()
        .map(|l| l.local_addr().unwrap().port())
        .collect();

    let sweep = PortSweep::new();
    for _ in 0..2 {
        let open: HashSet<u16> = sweep.sweep(Ipv4Addr::LOCALHOST).await.into_iter().collect();
        assert!(
            bound.is_subset(&open),
            "missing listeners: {:?}",
            bound.difference(&open).collect::<Vec<_>>()
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn released_port_is_not_reported() {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let open = PortSweep::new().sweep(Ipv4Addr::LOCALHOST).await;

    assert!(!open.contains(&port));
}
