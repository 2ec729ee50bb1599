//! Help article lookup with degrade-to-empty error handling.
//!
//! Lookup failures are deliberately indistinguishable from "no help defined":
//! the help feature is always optional and must never break the page it is
//! attached to. Transport errors are logged and swallowed here; they do not
//! cross this boundary.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use helpdeck_client::HelpClient;
use helpdeck_shared::{HelpArticle, ResolvedLocator, SearchCriteria};

/// Resolve a locator to zero-or-one article.
///
/// Short-circuits without a network call when either key is empty. Exactly
/// one match is the success condition; zero or many matches, and any
/// transport/server error, all yield `None`.
#[instrument(skip(client), fields(owner = %locator.owner_key, article = %locator.article_key))]
pub async fn find_article(client: &HelpClient, locator: &ResolvedLocator) -> Option<HelpArticle> {
    if !locator.is_complete() {
        debug!("incomplete locator, skipping lookup");
        return None;
    }

    let criteria = SearchCriteria::exact(&locator.owner_key, &locator.article_key);
    match client.search(&criteria).await {
        Ok(page) if page.total_elements == 1 => page.stream.into_iter().next(),
        Ok(page) => {
            debug!(total_elements = page.total_elements, "no unique match");
            None
        }
        Err(e) => {
            warn!(error = %e, "help lookup failed, treating as no article");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// HelpLookup
// ---------------------------------------------------------------------------

/// Stateful lookup handle publishing the most recently requested result.
///
/// Concurrent in-flight refreshes are resolved last-requested-wins: each
/// refresh takes a generation number, and a completed lookup publishes its
/// result only if no newer refresh has started in the meantime. A slow, stale
/// response can therefore never overwrite a newer one.
#[derive(Debug)]
pub struct HelpLookup {
    client: HelpClient,
    generation: AtomicU64,
    latest: watch::Sender<Option<HelpArticle>>,
}

impl HelpLookup {
    /// Create a lookup handle over the given client.
    pub fn new(client: HelpClient) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            client,
            generation: AtomicU64::new(0),
            latest,
        }
    }

    /// Subscribe to the most recently published lookup result.
    pub fn subscribe(&self) -> watch::Receiver<Option<HelpArticle>> {
        self.latest.subscribe()
    }

    /// Run a lookup for `locator` and publish the result unless superseded.
    ///
    /// Returns this invocation's own result either way.
    pub async fn refresh(&self, locator: &ResolvedLocator) -> Option<HelpArticle> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let article = find_article(&self.client, locator).await;

        if self.generation.load(Ordering::SeqCst) == generation {
            self.latest.send_replace(article.clone());
        } else {
            debug!(generation, "superseded lookup result discarded");
        }

        article
    }
}
