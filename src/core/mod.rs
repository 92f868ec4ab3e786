//! Core engine: rules, filters, configuration, and output assignment

pub mod config;
pub mod error;
pub mod filters;
pub mod output;
pub mod rules;

pub use config::{ReorgOptions, SortDirection, CANONICAL_KIND_ORDER, DEFAULT_FOLDER_NAMES};
pub use error::{Result, ResultExt, TidyError};
pub use filters::{CommentConsolidator, CommentStrip, DeepFilter, DirectiveConsolidator, SortFilter};
pub use output::{assign_units, leading_text, render_unit, write_units, OutputUnit, UnitError, WriteReport};
pub use rules::{
    FixedChain, FlagTemplate, FnRule, KindRule, LevelRule, MarkerRule, PassMode, QueryTemplate,
    RuleChain,
};
