//! # Refresh Scheduler
//!
//! Drives the perpetual Resolving → Scanning → Classifying → Publishing →
//! Sleeping loop that keeps the [`ServiceCache`] current.

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use webdeck_common::config::REFRESH_INTERVAL;
use webdeck_common::network::address::LocalAddress;
use webdeck_common::scanning::{AddressResolver, PortScanner};
use webdeck_common::service::{Inventory, ServiceRecord};

use crate::cache::ServiceCache;
use crate::probe::ServiceProber;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Resolving,
    Scanning,
    Classifying,
    Publishing,
    Sleeping,
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CyclePhase::Resolving => "resolving",
            CyclePhase::Scanning => "scanning",
            CyclePhase::Classifying => "classifying",
            CyclePhase::Publishing => "publishing",
            CyclePhase::Sleeping => "sleeping",
        };
        f.write_str(name)
    }
}

/// Summary of one finished cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub address: LocalAddress,
    pub open_ports: usize,
    pub services: usize,
    pub generation: u64,
    pub elapsed: Duration,
}

pub struct Scheduler {
    cache: Arc<ServiceCache>,
    resolver: Box<dyn AddressResolver>,
    scanner: Box<dyn PortScanner>,
    prober: ServiceProber,
    own_port: Option<u16>,
    phase: watch::Sender<CyclePhase>,
}

impl Scheduler {
    pub fn new(
        cache: Arc<ServiceCache>,
        resolver: Box<dyn AddressResolver>,
        scanner: Box<dyn PortScanner>,
        prober: ServiceProber,
    ) -> Self {
        let (phase, _) = watch::channel(CyclePhase::Resolving);
        Self {
            cache,
            resolver,
            scanner,
            prober,
            own_port: None,
            phase,
        }
    }

    /// Leaves `port` on the local address out of every inventory.
    ///
    /// Used for the dashboard's own listener.
    pub fn exclude_own_port(mut self, port: u16) -> Self {
        self.own_port = Some(port);
        self
    }

    /// Follows the phase the scheduler is currently in.
    pub fn phases(&self) -> watch::Receiver<CyclePhase> {
        self.phase.subscribe()
    }

    /// Runs cycles until `shutdown` fires.
    ///
    /// Cancellation is only observed while sleeping: a cycle that has
    /// started always publishes before the loop exits.
    pub async fn run(self, shutdown: CancellationToken) {
        loop {
            let report: CycleReport = self.run_cycle().await;
            info!(
                "Cache updated: {} service(s) on {} from {} open port(s) in {:.1}s, next scan in {} min",
                report.services,
                report.address,
                report.open_ports,
                report.elapsed.as_secs_f64(),
                REFRESH_INTERVAL.as_secs() / 60,
            );

            self.enter(CyclePhase::Sleeping);
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(REFRESH_INTERVAL) => {}
            }
        }
        info!("Scheduler stopped");
    }

    /// Resolves, scans, probes and publishes once.
    pub async fn run_cycle(&self) -> CycleReport {
        let started: Instant = Instant::now();

        self.enter(CyclePhase::Resolving);
        let address: LocalAddress = self.resolver.resolve();

        let (open_ports, inventory) = match address.ip() {
            Some(ip) => {
                self.enter(CyclePhase::Scanning);
                let open_ports: Vec<u16> = self.scanner.scan(ip).await;
                info!("Port scan on {ip} finished: {} open", open_ports.len());

                self.enter(CyclePhase::Classifying);
                let inventory: Inventory = self.describe_all(ip, &open_ports).await;
                (open_ports.len(), inventory)
            }
            None => {
                warn!("Local address unknown, publishing an empty inventory");
                (0, Inventory::new())
            }
        };

        self.enter(CyclePhase::Publishing);
        let services: usize = inventory.len();
        let generation: u64 = self.cache.publish(inventory);

        CycleReport {
            address,
            open_ports,
            services,
            generation,
            elapsed: started.elapsed(),
        }
    }

    /// Probes ports one at a time, in the order the sweep reported them.
    async fn describe_all(&self, ip: Ipv4Addr, open_ports: &[u16]) -> Inventory {
        let mut inventory: Inventory = Vec::new();
        for &port in open_ports {
            if self.own_port == Some(port) {
                debug!("Skipping own listener on port {port}");
                continue;
            }
            if let Some(record) = self.prober.describe(ip, port).await {
                log_record(&record);
                inventory.push(record);
            }
        }
        inventory
    }

    fn enter(&self, phase: CyclePhase) {
        debug!("scheduler: {phase}");
        self.phase.send_replace(phase);
    }
}

fn log_record(record: &ServiceRecord) {
    debug!("web service on port {}: {} ({})", record.port, record.title, record.link);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
