//! Shared types, error model, and configuration for Helpdeck.
//!
//! This crate is the foundation depended on by all other Helpdeck crates.
//! It provides:
//! - [`HelpdeckError`] — the unified error type
//! - Domain types ([`HelpArticle`], [`PageInfo`], [`HostInfo`], [`ResolvedLocator`])
//! - Search wire types ([`SearchCriteria`], [`ArticlePage`])
//! - Configuration ([`AppConfig`], [`OwnerSource`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, OwnerSource, ResolverConfig, ServiceConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{HelpdeckError, Result};
pub use types::{
    ArticlePage, HelpArticle, HostInfo, ITEM_ID_MAX_LEN, ITEM_ID_MIN_LEN, PageInfo,
    ResolvedLocator, SearchCriteria,
};
