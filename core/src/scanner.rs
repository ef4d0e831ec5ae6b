//! Bounded-concurrency TCP connect sweep over the full port space.
//!
//! A fixed pool of workers pulls ports from a shared [`PortQueue`] and
//! reports successful connections to a collector task. [`PortSweep::sweep`]
//! only returns once every worker has drained the queue, so callers never
//! observe a partial result.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error};

use webdeck_common::config::{PORT_RANGE, SCAN_WORKERS};
use webdeck_common::scanning::PortScanner;

use crate::network::tcp::{Connector, TcpConnector};

mod queue;

pub use queue::PortQueue;

/// Invoked after every attempted port with the number of attempts so far.
pub type ProgressCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Number of ports a sweep attempts.
pub fn total_ports() -> usize {
    PORT_RANGE.len()
}

pub struct PortSweep<C = TcpConnector> {
    connector: Arc<C>,
    workers: usize,
    on_progress: Option<ProgressCallback>,
}

impl PortSweep<TcpConnector> {
    pub fn new() -> Self {
        Self::with_connector(TcpConnector::default())
    }
}

impl Default for PortSweep<TcpConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector + 'static> PortSweep<C> {
    pub fn with_connector(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            workers: SCAN_WORKERS,
            on_progress: None,
        }
    }

    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Attempts every port in [`PORT_RANGE`] exactly once and returns the
    /// open ones in the order the collector received them.
    pub async fn sweep(&self, ip: Ipv4Addr) -> Vec<u16> {
        let queue: Arc<PortQueue> = Arc::new(PortQueue::new(PORT_RANGE));
        let attempted: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
        let (open_tx, mut open_rx) = mpsc::unbounded_channel::<u16>();

        let collector = tokio::spawn(async move {
            let mut open_ports: Vec<u16> = Vec::new();
            while let Some(port) = open_rx.recv().await {
                open_ports.push(port);
            }
            open_ports
        });

        let mut workers: JoinSet<()> = JoinSet::new();
        for _ in 0..self.workers {
            let queue = queue.clone();
            let attempted = attempted.clone();
            let open_tx = open_tx.clone();
            let connector = self.connector.clone();
            let on_progress = self.on_progress.clone();

            workers.spawn(async move {
                while let Some(port) = queue.pop() {
                    let addr = SocketAddr::new(IpAddr::V4(ip), port);
                    if connector.is_open(addr).await {
                        debug!("port open: {port}");
                        let _ = open_tx.send(port);
                    }

                    let done = attempted.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(callback) = &on_progress {
                        callback(done);
                    }
                }
            });
        }
        drop(open_tx);

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!("Sweep worker terminated abnormally: {e}");
            }
        }

        match collector.await {
            Ok(open_ports) => open_ports,
            Err(e) => {
                error!("Open port collector failed: {e}");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl<C: Connector + 'static> PortScanner for PortSweep<C> {
    async fn scan(&self, ip: Ipv4Addr) -> Vec<u16> {
        debug!("sweeping {} ports on {ip}", total_ports());
        self.sweep(ip).await
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every attempt and reports the configured ports as open.
    struct RecordingConnector {
        open: HashSet<u16>,
        attempts: Mutex<Vec<u16>>,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
        delay: Duration,
    }

    impl RecordingConnector {
        fn new(open: &[u16]) -> Self {
            Self {
                open: open.iter().copied().collect(),
                attempts: Mutex::new(Vec::new()),
                in_flight: AtomicUsize::new(0),
                peak_in_flight: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl Connector for RecordingConnector {
        async fn is_open(&self, addr: SocketAddr) -> bool {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
            self.attempts.lock().unwrap().push(addr.port());

            if self.delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(self.delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.open.contains(&addr.port())
        }
    }

    fn sweep_with(connector: RecordingConnector) -> PortSweep<RecordingConnector> {
        PortSweep::with_connector(connector)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn every_port_is_attempted_exactly_once() {
        let sweep = sweep_with(RecordingConnector::new(&[]));
        sweep.sweep(Ipv4Addr::LOCALHOST).await;

        let mut attempts = sweep.connector.attempts.lock().unwrap().clone();
        assert_eq!(attempts.len(), 65_535);
        attempts.sort_unstable();
        let expected: Vec<u16> = (1..=u16::MAX).collect();
        assert_eq!(attempts, expected);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn open_set_matches_listeners_across_runs() {
        let listeners: [u16; 5] = [1, 22, 80, 8080, 65_535];
        let sweep = sweep_with(RecordingConnector::new(&listeners));
        let expected: HashSet<u16> = listeners.iter().copied().collect();

        for _ in 0..3 {
            let found: HashSet<u16> = sweep.sweep(Ipv4Addr::LOCALHOST).await.into_iter().collect();
            assert_eq!(found, expected);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn in_flight_attempts_never_exceed_worker_count() {
        let sweep = sweep_with(RecordingConnector::new(&[]).with_delay(Duration::from_micros(50)));
        sweep.sweep(Ipv4Addr::LOCALHOST).await;

        let peak = sweep.connector.peak_in_flight.load(Ordering::SeqCst);
        assert!(peak <= SCAN_WORKERS, "peak in-flight was {peak}");
        assert!(peak > 1, "sweep never ran concurrently");
    }

    #[tokio::test]
    async fn progress_reaches_total() {
        let last = Arc::new(AtomicUsize::new(0));
        let seen = last.clone();
        let sweep = sweep_with(RecordingConnector::new(&[443])).on_progress(Arc::new(move |n| {
            seen.fetch_max(n, Ordering::Relaxed);
        }));

        let open = sweep.sweep(Ipv4Addr::LOCALHOST).await;

        assert_eq!(open, vec![443]);
        assert_eq!(last.load(Ordering::Relaxed), total_ports());
    }
}
