//! Title and favicon lookup over a parsed HTML tree.
//!
//! Both lookups are independent pre-order walks driven by an explicit
//! stack, so hostile nesting depth cannot exhaust the call stack. The first
//! match in document order wins.

use scraper::{ElementRef, Html};

/// What a page says about itself.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// Trimmed text of the first non-empty `<title>`.
    pub title: Option<String>,
    /// Raw `href` of the first icon `<link>`, unresolved.
    pub icon_href: Option<String>,
}

/// Parses `document` and extracts its metadata.
///
/// html5ever recovers from any malformed input, so this never fails.
pub fn inspect(document: &str) -> PageMetadata {
    let html: Html = Html::parse_document(document);

    PageMetadata {
        title: find_first(&html, title_text),
        icon_href: find_first(&html, icon_href),
    }
}

/// Turns an icon `href` into the URL shown on the dashboard.
///
/// Hrefs that carry a scheme are kept verbatim. Everything else is appended
/// to the page URL as-is, so `/f.ico` on `http://x:1/` becomes
/// `http://x:1//f.ico` and `../f.ico` is not normalised.
pub fn resolve_icon(page_url: &str, href: &str) -> String {
    if has_scheme(href) {
        href.to_string()
    } else {
        format!("{page_url}{href}")
    }
}

fn find_first<F>(html: &Html, mut matcher: F) -> Option<String>
where
    F: FnMut(ElementRef<'_>) -> Option<String>,
{
    let mut stack = vec![html.tree.root()];

    while let Some(node) = stack.pop() {
        if let Some(found) = ElementRef::wrap(node).and_then(&mut matcher) {
            return Some(found);
        }
        stack.extend(node.children().rev());
    }
    None
}

fn title_text(element: ElementRef<'_>) -> Option<String> {
    if element.value().name() != "title" {
        return None;
    }
    let text: String = element.text().collect();
    let trimmed: &str = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn icon_href(element: ElementRef<'_>) -> Option<String> {
    let value = element.value();
    if value.name() != "link" {
        return None;
    }
    let rel: &str = value.attr("rel")?;
    let href: &str = value.attr("href")?;
    (rel.contains("icon") && !href.is_empty()).then(|| href.to_string())
}

/// RFC 3986 scheme followed by `:` (`http:`, `https:`, `data:` ...).
fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
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
