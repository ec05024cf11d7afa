use log::{debug, info};
use tokio::task;

use crate::errors::WikiError;
use crate::routes::{Operation, Route};
use crate::services::PageStore;
use crate::types::{Page, PageListing, PageName};

/// What a page operation decided, independent of the HTTP transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Render the page with the view template
    View(Page),
    /// Render the page with the edit template
    Edit(Page),
    /// Render the listing with the index template
    Index(PageListing),
    /// Send the client to another page route
    Redirect(Route),
}

/// Page operations on top of a [`PageStore`].
///
/// Store calls run on the blocking thread pool so request tasks only suspend
/// at filesystem boundaries.
#[derive(Clone)]
pub struct WikiService {
    store: PageStore,
}

impl WikiService {
    pub fn new(store: PageStore) -> Self {
        Self { store }
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, WikiError>
    where
        T: Send + 'static,
        F: FnOnce(PageStore) -> Result<T, WikiError> + Send + 'static,
    {
        let store = self.store.clone();
        task::spawn_blocking(move || f(store))
            .await
            .map_err(|e| WikiError::Io(std::io::Error::other(e)))?
    }

    async fn load(&self, name: &PageName) -> Result<Page, WikiError> {
        let key = name.clone();
        let body = self.blocking(move |store| store.get(&key)).await?;
        Ok(Page { name: name.clone(), body })
    }

    /// Show a page, or send the client to create it when it does not exist yet
    pub async fn view(&self, name: PageName) -> Result<Outcome, WikiError> {
        match self.load(&name).await {
            Ok(page) => Ok(Outcome::View(page)),
            Err(WikiError::NotFound) => {
                debug!("Page {} does not exist, redirecting to edit", name);
                Ok(Outcome::Redirect(Route::new(Operation::Edit, name)))
            }
            Err(e) => Err(e),
        }
    }

    /// Open the editor on a page, starting from an empty body for new pages
    pub async fn edit(&self, name: PageName) -> Result<Outcome, WikiError> {
        match self.load(&name).await {
            Ok(page) => Ok(Outcome::Edit(page)),
            Err(WikiError::NotFound) => {
                debug!("Editing new page {}", name);
                Ok(Outcome::Edit(Page::empty(name)))
            }
            Err(e) => Err(e),
        }
    }

    /// Store a page body and send the client to view it
    pub async fn save(&self, name: PageName, body: Vec<u8>) -> Result<Outcome, WikiError> {
        let key = name.clone();
        self.blocking(move |store| store.put(&key, &body)).await?;
        info!("Page {} saved", name);
        Ok(Outcome::Redirect(Route::new(Operation::View, name)))
    }

    /// List every page, sorted by name for display
    pub async fn list(&self) -> Result<Outcome, WikiError> {
        let mut names = self.blocking(|store| store.list()).await?;
        names.sort();
        Ok(Outcome::Index(PageListing { names }))
    }
}
