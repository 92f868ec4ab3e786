//! tidytree: marker-tree filtering and source reorganization
//!
//! The engine behind tidytree takes the marker tree an external parser
//! produced for one source file and reorganizes it two ways:
//!
//! 1. **Display tree**: comments eliminated, items pruned to the canonical
//!    kind table and sorted: the view an interactive browser wants.
//! 2. **Commit tree**: conditional-compilation blocks and comment runs
//!    consolidated into atomic units, then sorted; output assignment
//!    slices it into one file per top-level declaration.
//!
//! # Design Philosophy
//!
//! - **Clone, never mutate**: every filter returns a newly-owned tree;
//!   the input is reusable afterwards and trees can be filtered on
//!   separate threads with no shared mutable state.
//! - **Graceful degradation**: malformed structure (an unmatched `#if`,
//!   a dangling comment run) passes through untouched; only configuration
//!   mistakes fail, and they fail at construction time.
//! - **One capability**: identity rules, query templates, chains, and the
//!   structural filters all compose through the same [`MarkerRule`] trait.
//!
//! # Example
//!
//! ```rust
//! use tidytree::{FixedChain, MarkerRule, ReorgOptions};
//! use tidytree_marker::{Marker, MarkerKind, Span};
//!
//! let tree = vec![
//!     Marker::new("// note", MarkerKind::LineComment, Span::new(0, 7, 1, 1)),
//!     Marker::new("Widget", MarkerKind::Class, Span::new(8, 40, 2, 4)),
//! ];
//! let display = FixedChain::display_pipeline(&ReorgOptions::default());
//! let filtered = display.apply_filter(&tree);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].name, "Widget");
//! ```

pub mod core;

// Re-export the primary surface for convenience
pub use crate::core::{
    assign_units,
    config::{ReorgOptions, SortDirection, CANONICAL_KIND_ORDER},
    error::{Result, ResultExt, TidyError},
    leading_text, render_unit, write_units, CommentConsolidator, CommentStrip, DeepFilter,
    DirectiveConsolidator, FixedChain, FlagTemplate, FnRule, KindRule, LevelRule, MarkerRule,
    OutputUnit, PassMode, QueryTemplate, RuleChain, SortFilter, UnitError, WriteReport,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
