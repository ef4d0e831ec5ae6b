//! Classification and description of open ports.
//!
//! For each open port the [`ServiceProber`] decides whether an HTML-serving
//! HTTP(S) endpoint is reachable, then fetches the page a second time and
//! turns its `<title>` and favicon into a [`ServiceRecord`].

use std::net::Ipv4Addr;
use std::sync::Arc;

use tracing::{debug, trace};

use webdeck_common::config::DEFAULT_ICON;
use webdeck_common::http::PageFetcher;
use webdeck_common::service::{Classification, Scheme, ServiceRecord};

pub mod extract;
pub mod http;

use extract::PageMetadata;

const HTML_CONTENT_TYPE: &str = "text/html";

#[derive(Clone)]
pub struct ServiceProber {
    fetcher: Arc<dyn PageFetcher>,
}

impl ServiceProber {
    pub fn new(fetcher: impl PageFetcher + 'static) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    /// Tries each scheme in [`Scheme::PREFERENCE`] order and returns the
    /// first one answering with an HTML content type.
    ///
    /// A failed request skips that scheme; nothing is retried.
    pub async fn classify(&self, ip: Ipv4Addr, port: u16) -> Classification {
        for scheme in Scheme::PREFERENCE {
            let url: String = scheme.page_url(ip, port);
            match self.fetcher.content_type(&url).await {
                Ok(Some(content_type)) if content_type.contains(HTML_CONTENT_TYPE) => {
                    return Classification::Web { scheme, url };
                }
                Ok(content_type) => {
                    trace!("{url} is not html ({content_type:?})");
                }
                Err(e) => {
                    trace!("{e}");
                }
            }
        }
        Classification::NotWeb
    }

    /// Builds the dashboard record for a port, or `None` when the port is
    /// not a web service or its page could not be fetched again.
    pub async fn describe(&self, ip: Ipv4Addr, port: u16) -> Option<ServiceRecord> {
        let Classification::Web { scheme, url } = self.classify(ip, port).await else {
            return None;
        };

        let document: String = match self.fetcher.document(&url).await {
            Ok(document) => document,
            Err(e) => {
                debug!("Dropping port {port}: {e}");
                return None;
            }
        };

        let metadata: PageMetadata = extract::inspect(&document);

        Some(ServiceRecord {
            title: metadata
                .title
                .unwrap_or_else(|| format!("Unnamed page ({port})")),
            icon: metadata
                .icon_href
                .map(|href| extract::resolve_icon(&url, &href))
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            link: scheme.origin(ip, port),
            port,
        })
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
