//! Context resolution: deriving the current help locator from the host.
//!
//! The hosting application publishes two independently-updating signals — the
//! current page descriptor and the current host descriptor — modeled here as
//! `tokio::sync::watch` channels. [`spawn_context_resolver`] combines them
//! with combine-latest semantics: whenever either input changes, a new
//! [`ResolvedLocator`] is computed from the most recent value of both.

use tokio::sync::watch;
use tracing::debug;

use helpdeck_shared::{HostInfo, OwnerSource, PageInfo, ResolvedLocator};

/// Compute the locator for one snapshot of page, host, and navigation path.
///
/// Article key precedence: the page's explicit help article id, then its page
/// name, then the navigation path with any `#fragment` stripped. The owner
/// key comes from the host descriptor field selected by `owner_source`.
/// Absent fields degrade to empty strings, never to an error.
pub fn resolve_locator(
    page: &PageInfo,
    host: &HostInfo,
    nav_path: &str,
    owner_source: OwnerSource,
) -> ResolvedLocator {
    let article_key = page
        .help_article_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| page.page_name.as_deref().filter(|s| !s.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| strip_fragment(nav_path).to_string());

    let owner_key = owner_source
        .owner_key(host)
        .filter(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string();

    ResolvedLocator {
        owner_key,
        article_key,
    }
}

/// Drop everything from the first `#` onward.
fn strip_fragment(path: &str) -> &str {
    path.split('#').next().unwrap_or(path)
}

/// Spawn a task that keeps a [`ResolvedLocator`] channel up to date.
///
/// The returned receiver re-emits every time the page or host signal changes,
/// combining the latest value of each. The navigation path is sampled at
/// recompute time (it is a fallback, not a trigger). The task exits when both
/// upstream senders are dropped or when every downstream receiver is gone.
pub fn spawn_context_resolver(
    mut page_rx: watch::Receiver<PageInfo>,
    mut host_rx: watch::Receiver<HostInfo>,
    nav_rx: watch::Receiver<String>,
    owner_source: OwnerSource,
) -> watch::Receiver<ResolvedLocator> {
    let initial = resolve_locator(
        &page_rx.borrow(),
        &host_rx.borrow(),
        &nav_rx.borrow(),
        owner_source,
    );
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        let mut page_open = true;
        let mut host_open = true;

        loop {
            let updated = tokio::select! {
                res = page_rx.changed(), if page_open => match res {
                    Ok(()) => true,
                    Err(_) => {
                        page_open = false;
                        false
                    }
                },
                res = host_rx.changed(), if host_open => match res {
                    Ok(()) => true,
                    Err(_) => {
                        host_open = false;
                        false
                    }
                },
                _ = tx.closed() => break,
            };

            if !updated {
                if !page_open && !host_open {
                    // Both upstreams are gone; the last combined value stays current.
                    break;
                }
                continue;
            }

            let locator = resolve_locator(
                &page_rx.borrow(),
                &host_rx.borrow(),
                &nav_rx.borrow(),
                owner_source,
            );
            debug!(owner = %locator.owner_key, article = %locator.article_key, "context updated");
            tx.send_replace(locator);
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(help_article_id: Option<&str>, page_name: Option<&str>) -> PageInfo {
        PageInfo {
            help_article_id: help_article_id.map(String::from),
            page_name: page_name.map(String::from),
        }
    }

    fn host(product_name: Option<&str>, app_id: Option<&str>) -> HostInfo {
        HostInfo {
            product_name: product_name.map(String::from),
            app_id: app_id.map(String::from),
        }
    }

    #[test]
    fn article_key_prefers_help_article_id() {
        let locator = resolve_locator(
            &page(Some("PAGE_HELP_SEARCH"), Some("search")),
            &host(Some("help-mgmt-ui"), None),
            "/portal/search",
            OwnerSource::ProductName,
        );
        assert_eq!(locator.article_key, "PAGE_HELP_SEARCH");
        assert_eq!(locator.owner_key, "help-mgmt-ui");
    }

    #[test]
    fn article_key_falls_back_to_page_name() {
        let locator = resolve_locator(
            &page(None, Some("search")),
            &host(Some("p1"), None),
            "/portal/search",
            OwnerSource::ProductName,
        );
        assert_eq!(locator.article_key, "search");
    }

    #[test]
    fn empty_help_article_id_is_treated_as_absent() {
        let locator = resolve_locator(
            &page(Some(""), Some("search")),
            &host(Some("p1"), None),
            "/portal/search",
            OwnerSource::ProductName,
        );
        assert_eq!(locator.article_key, "search");
    }

    #[test]
    fn article_key_falls_back_to_nav_path_without_fragment() {
        let locator = resolve_locator(
            &page(None, None),
            &host(Some("p1"), None),
            "/portal/search#section-2",
            OwnerSource::ProductName,
        );
        assert_eq!(locator.article_key, "/portal/search");
    }

    #[test]
    fn absent_owner_degrades_to_empty_string() {
        let locator = resolve_locator(
            &page(Some("PAGE_A"), None),
            &host(None, Some("ignored-in-this-variant")),
            "/",
            OwnerSource::ProductName,
        );
        assert_eq!(locator.owner_key, "");
        assert!(!locator.is_complete());
    }

    #[test]
    fn app_id_variant_reads_app_id_only() {
        let locator = resolve_locator(
            &page(Some("PAGE_A"), None),
            &host(Some("product"), Some("legacy-app")),
            "/",
            OwnerSource::AppId,
        );
        assert_eq!(locator.owner_key, "legacy-app");
    }

    #[tokio::test]
    async fn resolver_emits_on_either_input_change() {
        let (page_tx, page_rx) = watch::channel(page(Some("PAGE_A"), None));
        let (host_tx, host_rx) = watch::channel(host(Some("p1"), None));
        let (_nav_tx, nav_rx) = watch::channel("/".to_string());

        let mut out =
            spawn_context_resolver(page_rx, host_rx, nav_rx, OwnerSource::ProductName);

        assert_eq!(out.borrow().article_key, "PAGE_A");
        assert_eq!(out.borrow().owner_key, "p1");

        page_tx.send(page(Some("PAGE_B"), None)).unwrap();
        out.changed().await.expect("page update");
        assert_eq!(out.borrow().article_key, "PAGE_B");
        // Combined with the latest host value, not a stale one
        assert_eq!(out.borrow().owner_key, "p1");

        host_tx.send(host(Some("p2"), None)).unwrap();
        out.changed().await.expect("host update");
        assert_eq!(out.borrow().owner_key, "p2");
        assert_eq!(out.borrow().article_key, "PAGE_B");
    }

    #[tokio::test]
    async fn resolver_survives_one_upstream_closing() {
        let (page_tx, page_rx) = watch::channel(page(Some("PAGE_A"), None));
        let (host_tx, host_rx) = watch::channel(host(Some("p1"), None));
        let (_nav_tx, nav_rx) = watch::channel("/".to_string());

        let mut out =
            spawn_context_resolver(page_rx, host_rx, nav_rx, OwnerSource::ProductName);

        drop(host_tx);

        page_tx.send(page(Some("PAGE_B"), None)).unwrap();
        out.changed().await.expect("page update after host closed");
        assert_eq!(out.borrow().article_key, "PAGE_B");
        assert_eq!(out.borrow().owner_key, "p1");
    }
}
