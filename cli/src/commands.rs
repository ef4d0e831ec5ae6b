pub mod info;
pub mod scan;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use webdeck_common::config::{Config, DEFAULT_DASHBOARD_PORT};

#[derive(Parser)]
#[command(name = "webdeck")]
#[command(about = "Finds the web services running on this machine and lists them on a dashboard.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard and rescan every 20 minutes (default)
    #[command(alias = "s")]
    Serve(ServeArgs),
    /// Run a single scan cycle and print the services found
    #[command(alias = "sc")]
    Scan,
    /// Show the local address that would be scanned
    #[command(alias = "i")]
    Info,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port the dashboard listens on; it is left out of the listing
    #[arg(short, long, default_value_t = DEFAULT_DASHBOARD_PORT)]
    pub port: u16,
    /// Directory served under /static
    #[arg(long, default_value = "./static")]
    pub static_dir: PathBuf,
}

impl Default for ServeArgs {
    fn default() -> Self {
        let cfg = Config::default();
        Self {
            port: cfg.listen_port,
            static_dir: cfg.static_dir,
        }
    }
}

impl From<ServeArgs> for Config {
    fn from(args: ServeArgs) -> Self {
        Config {
            listen_port: args.port,
            static_dir: args.static_dir,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
