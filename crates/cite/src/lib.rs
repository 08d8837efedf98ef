//! Citation handling for generated articles.
//!
//! Generated text ends with a free-form "References" section. [`extract`]
//! turns the bracket-numbered lines of that section into [`Citation`]
//! records, and [`link_citations`] rewrites in-text `[n]` markers into links.

pub mod extract;
pub mod link;
pub mod model;

pub use extract::{extract, extract_citations, Extraction, SkipReason, SkippedLine};
pub use link::link_citations;
pub use model::{Citation, WEB_SOURCE};
