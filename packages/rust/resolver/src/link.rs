//! URL construction for found help articles.
//!
//! A help article stores up to three location fields: a base URL, a resource
//! path appended to it, and a context fragment appended verbatim. This module
//! combines them and applies the relative-vs-absolute rule: a combined string
//! that stays on the host's origin is treated as relative and re-resolved
//! under the deployment base path, while a fully-qualified URL to another
//! host is used verbatim.

use url::Url;

use helpdeck_shared::{HelpArticle, HelpdeckError, Result};

/// Where a resolved article points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A navigable absolute URL.
    Navigable(Url),
    /// The article carries no location fields; show the "no help item"
    /// fallback rather than an error.
    NotDefined,
}

/// Join two URL parts with exactly one separator at the junction.
///
/// Leading/trailing slashes on either side are collapsed: `("a/", "/b")`,
/// `("a", "b")` and `("a/", "b")` all yield `"a/b"`. An empty side leaves
/// the other unchanged.
pub fn join_url_parts(base: &str, resource: &str) -> String {
    if resource.is_empty() {
        return base.to_string();
    }
    if base.is_empty() {
        return resource.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        resource.trim_start_matches('/')
    )
}

/// The combined base + resource + context string, or `None` when the article
/// has no base URL and no resource URL.
fn combined_location(article: &HelpArticle) -> Option<String> {
    let base = article.base_url.as_deref().unwrap_or("");
    let resource = article.resource_url.as_deref().unwrap_or("");
    if base.is_empty() && resource.is_empty() {
        return None;
    }

    let mut combined = join_url_parts(base, resource);
    // The context is appended with no separator; any '#' it needs is its own.
    if let Some(context) = article.context.as_deref() {
        combined.push_str(context);
    }
    Some(combined)
}

/// Resolve an article's location fields to a final navigable URL.
///
/// Three terminal outcomes: a URL, [`LinkTarget::NotDefined`], or a
/// construction error when the combined string cannot be parsed.
pub fn resolve_target(
    article: &HelpArticle,
    origin: &Url,
    deployment_base_path: &str,
) -> Result<LinkTarget> {
    let Some(combined) = combined_location(article) else {
        return Ok(LinkTarget::NotDefined);
    };

    let absolute = Url::options()
        .base_url(Some(origin))
        .parse(&combined)
        .map_err(|e| HelpdeckError::UrlConstruction(format!("'{combined}': {e}")))?;

    if absolute.origin() != origin.origin() {
        // Fully qualified URL to another host: use verbatim.
        return Ok(LinkTarget::Navigable(absolute));
    }

    // Same origin: the stored location is relative to the hosting
    // application's deployment prefix, not the document root.
    let origin_prefix = origin.origin().ascii_serialization();
    let relative = combined.strip_prefix(&origin_prefix).unwrap_or(&combined);
    let prefixed = join_url_parts(deployment_base_path, relative);

    Url::options()
        .base_url(Some(origin))
        .parse(&prefixed)
        .map(LinkTarget::Navigable)
        .map_err(|e| HelpdeckError::UrlConstruction(format!("'{prefixed}': {e}")))
}
