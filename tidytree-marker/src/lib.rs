//! tidytree-marker: Language-agnostic Marker Model
//!
//! This crate defines the structural model consumed by the tidytree engine.
//! A `Marker` represents one parsed syntactic construct (a type, a member,
//! a comment, a preprocessor directive) with exact source positions; trees
//! of markers are produced by an external parser and handed to this system
//! as JSON.
//!
//! # Design Philosophy
//!
//! - **Owned trees**: a marker owns its ordered `children`; two trees never
//!   share a child list. Filters clone, they do not mutate.
//! - **Positions are the truth**: every marker carries the byte span it
//!   covers in the original text, and output reconstruction slices those
//!   spans verbatim.
//! - **No parent pointers**: ancestor walks are the consumer's concern and
//!   are resolved through non-owning handles, never stored on the node.
//!
//! # Example
//!
//! ```rust
//! use tidytree_marker::{Marker, MarkerKind, Span};
//!
//! let method = Marker::new("DoWork", MarkerKind::Method, Span::new(10, 42, 3, 5));
//! assert!(method.kind.is_declaration());
//! assert!(!method.is_comment());
//! ```

pub mod error;
pub mod marker;

pub use error::{MarkerError, Result};
pub use marker::{
    list_from_json_str, list_to_json_string, Access, Marker, MarkerFlags, MarkerKind, MarkerList,
    Span,
};

/// Version of the marker JSON schema
pub const SCHEMA_VERSION: &str = "v1";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
