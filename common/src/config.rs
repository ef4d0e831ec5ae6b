use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

/// Every cycle sweeps the whole TCP port space.
pub const PORT_RANGE: RangeInclusive<u16> = 1..=u16::MAX;

/// Upper bound on in-flight connection attempts during a sweep.
pub const SCAN_WORKERS: usize = 100;

pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Applies to each HTTP request made while classifying or describing a port.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Pause between the end of one publish and the start of the next cycle.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(20 * 60);

/// Some embedded servers refuse or degrade requests from unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/114.0.5735.110 Safari/537.36";

/// Icon shown for pages that do not advertise one.
pub const DEFAULT_ICON: &str = "/static/logo.webp";

pub const DEFAULT_DASHBOARD_PORT: u16 = 80;

/// Runtime settings of the dashboard process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the dashboard listens on (all interfaces).
    ///
    /// Also the port that is left out of the inventory, so the dashboard
    /// never lists itself.
    pub listen_port: u16,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_DASHBOARD_PORT,
            static_dir: PathBuf::from("./static"),
        }
    }
}
