//! Ledger Wiki - a small wiki server
//!
//! Pages are plain-text files named by an alphanumeric page name. They are
//! viewed as HTML with `[PageName]` markers turned into links, edited through
//! a form, and listed on the index page.

pub mod components;
pub mod config;
pub mod errors;
pub mod fs_utils;
pub mod handlers;
pub mod logger;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use components::{TemplateComponent, TemplateId};
pub use config::Config;
pub use errors::WikiError;
pub use router::create_router;
pub use routes::{Operation, Route};
pub use services::{render_links, Outcome, PageStore, WikiService};
pub use types::{AppState, Page, PageListing, PageName};
pub use utils::{escape_html, is_valid_page_name};
