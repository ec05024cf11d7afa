use std::fmt;
use std::sync::Arc;
use std::path::PathBuf;

use crate::components::TemplateComponent;
use crate::config::Config;
use crate::errors::WikiError;
use crate::services::{PageStore, WikiService};
use crate::utils::is_valid_page_name;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub wiki: WikiService,
    pub templates: Arc<TemplateComponent>,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    /// Open the page store and load templates once, before serving
    pub fn from_config(config: &Config) -> Result<Self, WikiError> {
        let store = PageStore::open(config.data_dir.as_path())?;
        let templates = TemplateComponent::load(&config.template_dir)?;
        Ok(Self {
            wiki: WikiService::new(store),
            templates: Arc::new(templates),
            static_dir: config.static_dir.clone(),
        })
    }
}

/// A page name that has passed validation.
///
/// Only constructible through [`PageName::parse`], so holding one is proof the
/// name is safe to use as a storage key and as a URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageName(String);

impl PageName {
    pub fn parse(candidate: &str) -> Result<Self, WikiError> {
        if is_valid_page_name(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(WikiError::InvalidName)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wiki page read from (or destined for) the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name: PageName,
    pub body: Vec<u8>,
}

impl Page {
    /// Placeholder for a page that has not been written yet
    pub fn empty(name: PageName) -> Self {
        Self { name, body: Vec::new() }
    }
}

/// Data bound to the index template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageListing {
    pub names: Vec<PageName>,
}
