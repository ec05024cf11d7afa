use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::routes::{Operation, Route};
use crate::types::PageName;
use crate::utils::escape_html;

static LINK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([a-zA-Z0-9]+)\]").expect("link marker pattern is valid"));

/// Render a page body as HTML, turning `[PageName]` markers into view links.
///
/// The body is escaped first. Escaping never produces or consumes brackets or
/// alphanumerics, so markers survive it unchanged and the captured name is
/// always a valid page name.
pub fn render_links(body: &[u8]) -> String {
    let escaped = escape_html(&String::from_utf8_lossy(body));
    LINK_MARKER
        .replace_all(&escaped, |caps: &Captures| {
            let label = &caps[1];
            match PageName::parse(label) {
                Ok(name) => {
                    let href = Route::new(Operation::View, name).path();
                    format!("<a href=\"{}\">{}</a>", href, label)
                }
                Err(_) => caps[0].to_string(),
            }
        })
        .into_owned()
}
