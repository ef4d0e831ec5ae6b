use thiserror::Error;

/// Why no local address could be chosen.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no interfaces reported by the operating system")]
    NoInterfaces,
    #[error("none of the {interfaces} interface(s) carries a non-loopback IPv4 address")]
    NoQualifyingAddress { interfaces: usize },
}

/// A single HTTP request that did not produce a usable response.
///
/// All variants are terminal for the unit of work that hit them: the scheme
/// is skipped or the port is left out of the inventory.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http client could not be built: {0}")]
    Client(String),
    #[error("invalid request url {url}")]
    InvalidUrl { url: String },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("could not reach {url}: {reason}")]
    Connect { url: String, reason: String },
    #[error("failed to read body of {url}: {reason}")]
    Body { url: String, reason: String },
}
