pub mod link_service;
pub mod page_store;
pub mod wiki_service;

pub use link_service::render_links;
pub use page_store::PageStore;
pub use wiki_service::{Outcome, WikiService};
