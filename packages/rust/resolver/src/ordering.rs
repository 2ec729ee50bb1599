//! Default display ordering for help article lists.
//!
//! Applied whenever results are shown without an explicit user sort: owner
//! key first, item key as tie-break, both case-insensitive with empty keys
//! sorting before any non-empty value.

use std::cmp::Ordering;

use helpdeck_shared::HelpArticle;

/// Total-order comparator over (owner key, item key).
pub fn default_order(a: &HelpArticle, b: &HelpArticle) -> Ordering {
    cmp_case_insensitive(&a.product_name, &b.product_name)
        .then_with(|| cmp_case_insensitive(&a.item_id, &b.item_id))
}

/// Case-insensitive comparison via Unicode lowercase folding. The empty
/// string compares less than any non-empty value.
fn cmp_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort a slice of articles in place by [`default_order`] (stable).
pub fn sort_by_default_order(articles: &mut [HelpArticle]) {
    articles.sort_by(default_order);
}
