//! Structural filters
//!
//! The four tree transforms behind the canonical pipelines, plus the deep
//! ancestry-preserving query filter. Every filter here consumes a borrowed
//! list and returns a newly-owned tree; inputs are never mutated.

pub mod comments;
pub mod deep;
pub mod directives;
pub mod sort;

pub use comments::{CommentConsolidator, CommentStrip};
pub use deep::DeepFilter;
pub use directives::DirectiveConsolidator;
pub use sort::SortFilter;
