//! Core domain types for Helpdeck articles and context resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HelpdeckError, Result};

/// Minimum length of an article's item key.
pub const ITEM_ID_MIN_LEN: usize = 2;

/// Maximum length of an article's item key.
pub const ITEM_ID_MAX_LEN: usize = 255;

// ---------------------------------------------------------------------------
// HelpArticle
// ---------------------------------------------------------------------------

/// One stored help record, as exchanged with the help content service.
///
/// The pair (`product_name`, `item_id`) is the natural key used for lookup.
/// The resolution pipeline only ever reads articles; create/update/delete go
/// through the surrounding CRUD commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpArticle {
    /// Server-assigned identifier; absent for not-yet-created records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Key identifying a page/feature within the owning application.
    pub item_id: String,
    /// Key identifying the owning application/product.
    pub product_name: String,
    /// Optional absolute or relative base path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Optional path segment appended to `base_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,
    /// Optional fragment identifier appended verbatim after base + resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Optimistic-lock token; echoed back unchanged on updates.
    #[serde(default)]
    pub modification_count: i32,
    /// Server-maintained creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<DateTime<Utc>>,
    /// Server-maintained last-modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification_date: Option<DateTime<Utc>>,
}

impl HelpArticle {
    /// Validate field-level constraints before create/update/import.
    ///
    /// The item key must be 2–255 characters and the owner key non-empty.
    pub fn validate(&self) -> Result<()> {
        let len = self.item_id.chars().count();
        if len < ITEM_ID_MIN_LEN || len > ITEM_ID_MAX_LEN {
            return Err(HelpdeckError::validation(format!(
                "item key must be {ITEM_ID_MIN_LEN}-{ITEM_ID_MAX_LEN} characters, got {len}"
            )));
        }
        if self.product_name.is_empty() {
            return Err(HelpdeckError::validation("owner key (productName) is required"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Context descriptors
// ---------------------------------------------------------------------------

/// The current page descriptor, supplied by the host application context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Preferred article key for the current page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_article_id: Option<String>,
    /// Fallback article key when no explicit help article id is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
}

/// The current hosting-application descriptor.
///
/// `product_name` and `app_id` are two deployment variants of the same owner
/// key; which one is read is a configuration choice, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

/// The (owner key, article key) pair used to look up a help article.
///
/// Transient value computed by the context resolver; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLocator {
    pub owner_key: String,
    pub article_key: String,
}

impl ResolvedLocator {
    /// Whether both keys are present; an incomplete locator short-circuits
    /// lookup to "no article found".
    pub fn is_complete(&self) -> bool {
        !self.owner_key.is_empty() && !self.article_key.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Search wire types
// ---------------------------------------------------------------------------

/// Exact-match search criteria for the help content service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    100
}

impl SearchCriteria {
    /// Criteria matching exactly one (owner key, article key) pair.
    pub fn exact(owner_key: &str, article_key: &str) -> Self {
        Self {
            product_name: Some(owner_key.to_string()),
            item_id: Some(article_key.to_string()),
            page_number: 0,
            page_size: default_page_size(),
        }
    }
}

/// One page of search results from the help content service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    /// The records on this page.
    #[serde(default)]
    pub stream: Vec<HelpArticle>,
    /// Total number of matching records across all pages.
    #[serde(default)]
    pub total_elements: i64,
    /// Zero-based page number.
    #[serde(default)]
    pub number: u32,
    /// Requested page size.
    #[serde(default)]
    pub size: u32,
}
