//! Help article resolution pipeline.
//!
//! This crate implements the core of Helpdeck:
//! - [`context`] — combine-latest resolution of the current help locator
//!   from the hosting application's page and host signals
//! - [`lookup`] — exact-match article lookup with degrade-to-empty error
//!   handling and a last-requested-wins staleness guard
//! - [`link`] — URL join and relative-vs-absolute target resolution
//! - [`ordering`] — the default display order for article lists
//! - [`pipeline`] — the end-to-end "open help" flow

pub mod context;
pub mod link;
pub mod lookup;
pub mod ordering;
pub mod pipeline;

pub use context::{resolve_locator, spawn_context_resolver};
pub use link::{LinkTarget, join_url_parts, resolve_target};
pub use lookup::{HelpLookup, find_article};
pub use ordering::{default_order, sort_by_default_order};
pub use pipeline::{HelpOutcome, open_help};
