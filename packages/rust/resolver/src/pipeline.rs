//! End-to-end "open help" pipeline: locator → lookup → URL resolution.

use tracing::{info, instrument};
use url::Url;

use helpdeck_client::HelpClient;
use helpdeck_shared::{ResolvedLocator, Result};

use crate::link::{LinkTarget, resolve_target};
use crate::lookup::find_article;

/// Terminal outcome of an "open help" request.
///
/// Never silent: the caller either navigates, shows the "no help item"
/// fallback, or (via the `Err` path) reports a help page error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpOutcome {
    /// A navigable absolute URL; opening it is the success indicator.
    Navigate(Url),
    /// No applicable article, or the article carries no location fields.
    /// Carries the resolved article key for display in the fallback dialog.
    NoHelpItem { article_key: String },
}

/// Run the full pipeline for one explicit "open help" request.
///
/// Lookup failures and ambiguous matches land in [`HelpOutcome::NoHelpItem`];
/// only URL construction failures surface as errors.
#[instrument(skip_all, fields(owner = %locator.owner_key, article = %locator.article_key))]
pub async fn open_help(
    client: &HelpClient,
    locator: &ResolvedLocator,
    origin: &Url,
    deployment_base_path: &str,
) -> Result<HelpOutcome> {
    let no_help_item = || HelpOutcome::NoHelpItem {
        article_key: locator.article_key.clone(),
    };

    let Some(article) = find_article(client, locator).await else {
        return Ok(no_help_item());
    };

    match resolve_target(&article, origin, deployment_base_path)? {
        LinkTarget::Navigable(url) => {
            info!(%url, "resolved help target");
            Ok(HelpOutcome::Navigate(url))
        }
        LinkTarget::NotDefined => Ok(no_help_item()),
    }
}
