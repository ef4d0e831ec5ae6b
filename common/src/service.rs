//! # Service Inventory Model

use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

/// URL scheme a web service was reached with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Order in which schemes are tried; plaintext wins when both qualify.
    pub const PREFERENCE: [Scheme; 2] = [Scheme::Http, Scheme::Https];

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// `scheme://ip:port`, the form used for dashboard links.
    pub fn origin(self, ip: Ipv4Addr, port: u16) -> String {
        format!("{}://{}:{}", self.as_str(), ip, port)
    }

    /// `scheme://ip:port/`, the URL that is actually requested.
    pub fn page_url(self, ip: Ipv4Addr, port: u16) -> String {
        format!("{}/", self.origin(ip, port))
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of probing an open port for an HTML-serving endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Web { scheme: Scheme, url: String },
    NotWeb,
}

impl Classification {
    pub fn is_web(&self) -> bool {
        matches!(self, Classification::Web { .. })
    }
}

/// One entry of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRecord {
    pub title: String,
    /// Absolute favicon URL or the local default asset path.
    pub icon: String,
    /// `scheme://address:port`.
    pub link: String,
    pub port: u16,
}

/// All records produced by one cycle, in processing order.
pub type Inventory = Vec<ServiceRecord>;
