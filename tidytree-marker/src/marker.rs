//! Core marker types
//!
//! This module defines the structural model shared by every tidytree
//! filter stage. All types are designed for:
//!
//! 1. **Determinism**: plain ordered containers, no map iteration order
//! 2. **Serialization**: full serde support; JSON is the parser contract
//! 3. **Clone discipline**: filters copy metadata shallowly and rebuild
//!    child lists, so an input tree is never mutated

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// ============================================================================
// Span
// ============================================================================

/// A contiguous region in source text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,

    /// End byte offset (exclusive)
    pub end: usize,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed)
    pub end_line: usize,

    /// Start column (0-indexed, in bytes)
    pub start_column: usize,

    /// End column (0-indexed, in bytes)
    pub end_column: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, start_line: usize, end_line: usize) -> Self {
        Self {
            start,
            end,
            start_line,
            end_line,
            start_column: 0,
            end_column: 0,
        }
    }

    /// Builder: set the column pair
    pub fn with_columns(mut self, start_column: usize, end_column: usize) -> Self {
        self.start_column = start_column;
        self.end_column = end_column;
        self
    }

    /// Check if this span contains a byte offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The smallest span covering both `self` and `other`.
    ///
    /// A consolidation node's span is the cover of its constituents.
    pub fn cover(&self, other: &Span) -> Span {
        let (start, start_line, start_column) = if self.start <= other.start {
            (self.start, self.start_line, self.start_column)
        } else {
            (other.start, other.start_line, other.start_column)
        };
        let (end, end_line, end_column) = if self.end >= other.end {
            (self.end, self.end_line, self.end_column)
        } else {
            (other.end, other.end_line, other.end_column)
        };
        Span {
            start,
            end,
            start_line,
            end_line,
            start_column,
            end_column,
        }
    }

    /// A span running from the start of `open` to the end of `close`
    pub fn between(open: &Span, close: &Span) -> Span {
        Span {
            start: open.start,
            end: close.end,
            start_line: open.start_line,
            end_line: close.end_line,
            start_column: open.start_column,
            end_column: close.end_column,
        }
    }
}

// ============================================================================
// Marker Kind
// ============================================================================

/// The tagged category of a marker
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    Namespace,
    Interface,
    Class,
    Record,
    Struct,
    Enum,
    Const,
    Delegate,
    Constructor,
    Destructor,
    Method,
    Property,
    Indexer,
    Field,
    Operator,
    EnumValue,
    FieldValue,
    Event,
    #[serde(rename = "get")]
    Getter,
    #[serde(rename = "set")]
    Setter,
    #[serde(rename = "add")]
    Adder,
    #[serde(rename = "remove")]
    Remover,
    LineComment,
    BlockComment,
    DocComment,
    Directive,
    Using,
    /// Synthetic grouping node supplied by a parser; filter-synthesized
    /// consolidation nodes keep the kind of the marker they stand in for.
    Consolidation,
}

impl MarkerKind {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Interface => "interface",
            Self::Class => "class",
            Self::Record => "record",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Const => "const",
            Self::Delegate => "delegate",
            Self::Constructor => "constructor",
            Self::Destructor => "destructor",
            Self::Method => "method",
            Self::Property => "property",
            Self::Indexer => "indexer",
            Self::Field => "field",
            Self::Operator => "operator",
            Self::EnumValue => "enum-value",
            Self::FieldValue => "field-value",
            Self::Event => "event",
            Self::Getter => "get",
            Self::Setter => "set",
            Self::Adder => "add",
            Self::Remover => "remove",
            Self::LineComment => "line-comment",
            Self::BlockComment => "block-comment",
            Self::DocComment => "doc-comment",
            Self::Directive => "directive",
            Self::Using => "using",
            Self::Consolidation => "consolidation",
        }
    }

    /// Check if this is any comment kind (line, block, or documentation)
    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            Self::LineComment | Self::BlockComment | Self::DocComment
        )
    }

    /// Check if this is a type declaration kind
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Self::Interface | Self::Class | Self::Record | Self::Struct | Self::Enum | Self::Delegate
        )
    }

    /// Check if this kind declares a named code element (as opposed to a
    /// comment, directive, import, or structural wrapper)
    pub fn is_declaration(&self) -> bool {
        !matches!(
            self,
            Self::Namespace
                | Self::LineComment
                | Self::BlockComment
                | Self::DocComment
                | Self::Directive
                | Self::Using
                | Self::Consolidation
        )
    }
}

// ============================================================================
// Access Modifiers
// ============================================================================

bitflags! {
    /// Combinable access-modifier set (`protected internal` carries two bits).
    ///
    /// Serializes through the bitflags serde support as a flag-name string.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Access: u8 {
        const PRIVATE = 1 << 0;
        const PROTECTED = 1 << 1;
        const INTERNAL = 1 << 2;
        const PUBLIC = 1 << 3;
        const GLOBAL = 1 << 4;
    }
}

// ============================================================================
// Modifier Flags
// ============================================================================

fn is_false(value: &bool) -> bool {
    !*value
}

/// Boolean modifier flags carried by a marker.
///
/// In filter templates each flag is tri-state (absent means "don't care");
/// on the marker itself every flag is concrete.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MarkerFlags {
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_abstract: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_sealed: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_virtual: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_override: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_partial: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_extern: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_unsafe: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_async: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_readonly: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_ref: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_new: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_explicit: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_implicit: bool,
}

impl MarkerFlags {
    /// Check if no flag is set
    pub fn is_empty(&self) -> bool {
        *self == MarkerFlags::default()
    }
}

// ============================================================================
// Marker
// ============================================================================

/// Ordered sequence of markers; the unit every filter consumes and produces
pub type MarkerList = Vec<Marker>;

/// A node representing one parsed syntactic construct
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Marker {
    /// The construct's name (directive and comment markers carry their text)
    pub name: String,

    /// What kind of construct this is
    pub kind: MarkerKind,

    /// The exact text span the marker covers in the original source
    pub span: Span,

    /// Enclosing namespace, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Generic parameter list text (`<T, U>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generics: Option<String>,

    /// Base types / implemented interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inheritance: Vec<String>,

    /// Attribute text attached to the declaration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,

    /// Generic constraint clause text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,

    /// Modifier flags
    #[serde(default, skip_serializing_if = "MarkerFlags::is_empty")]
    pub flags: MarkerFlags,

    /// Access-modifier set
    #[serde(default, skip_serializing_if = "Access::is_empty")]
    pub access: Access,

    /// Nesting depth (0 = top level)
    #[serde(default)]
    pub level: usize,

    /// Ordered child markers; always an owned list, never aliased
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Marker>,
}

impl Marker {
    /// Create a new marker
    pub fn new(name: impl Into<String>, kind: MarkerKind, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            span,
            namespace: None,
            generics: None,
            inheritance: Vec::new(),
            attributes: Vec::new(),
            where_clause: None,
            flags: MarkerFlags::default(),
            access: Access::empty(),
            level: 0,
            children: Vec::new(),
        }
    }

    /// Builder: set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Builder: set the nesting level
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    /// Builder: set the access-modifier set
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Builder: set the modifier flags
    pub fn with_flags(mut self, flags: MarkerFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Builder: set the child list
    pub fn with_children(mut self, children: Vec<Marker>) -> Self {
        self.children = children;
        self
    }

    /// Copy every scalar/metadata field and reset `children` to a fresh,
    /// empty list. This is the clone every filter stage starts from.
    pub fn shallow_clone(&self) -> Marker {
        Marker {
            name: self.name.clone(),
            kind: self.kind,
            span: self.span,
            namespace: self.namespace.clone(),
            generics: self.generics.clone(),
            inheritance: self.inheritance.clone(),
            attributes: self.attributes.clone(),
            where_clause: self.where_clause.clone(),
            flags: self.flags,
            access: self.access,
            level: self.level,
            children: Vec::new(),
        }
    }

    /// Check if this marker is any comment kind
    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    /// Check if this marker is a documentation comment
    pub fn is_doc_comment(&self) -> bool {
        self.kind == MarkerKind::DocComment
    }

    /// Check if this marker is a type declaration
    pub fn is_type(&self) -> bool {
        self.kind.is_type()
    }

    /// Check if this marker opens a conditional-compilation block
    pub fn is_directive_open(&self) -> bool {
        self.kind == MarkerKind::Directive && self.name.trim_start().starts_with("#if")
    }

    /// Check if this marker closes a conditional-compilation block
    pub fn is_directive_close(&self) -> bool {
        self.kind == MarkerKind::Directive && self.name.trim_start().starts_with("#endif")
    }

    /// Structural identity within a single list: same kind and name.
    /// Used to locate an item when splicing synthetic siblings around it.
    pub fn structural_eq(&self, other: &Marker) -> bool {
        self.kind == other.kind && self.name == other.name
    }

    /// Create a display identifier for this marker
    pub fn id(&self) -> String {
        format!("{}:{}:{}", self.kind.as_str(), self.name, self.span.start_line)
    }

    /// Walk the subtree and verify the position invariant
    /// (`end >= start` for every node).
    pub fn validate(&self) -> crate::Result<()> {
        if self.span.end < self.span.start {
            return Err(crate::MarkerError::InvalidSpan {
                id: self.id(),
                start: self.span.start,
                end: self.span.end,
            });
        }
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }

    /// Parse one marker tree from JSON
    pub fn from_json_str(json: &str) -> crate::Result<Marker> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this marker tree to JSON
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse a marker list (the usual parser hand-off) from JSON
pub fn list_from_json_str(json: &str) -> crate::Result<MarkerList> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize a marker list to JSON
pub fn list_to_json_string(markers: &[Marker]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(markers)?)
}

// ============================================================================
// Tests
// ============================================================================
