//! Positive-identity rules
//!
//! The simplest building blocks: a marker passes when its kind (and, for
//! the level variant, its nesting depth) equals the configured value.

use tidytree_marker::{Marker, MarkerKind};

use super::MarkerRule;

/// Passes markers of exactly one kind
#[derive(Debug, Clone, Copy)]
pub struct KindRule {
    kind: MarkerKind,
}

impl KindRule {
    /// Create a rule matching `kind`
    pub fn new(kind: MarkerKind) -> Self {
        Self { kind }
    }

    /// The configured kind
    pub fn kind(&self) -> MarkerKind {
        self.kind
    }
}

impl MarkerRule for KindRule {
    fn is_valid(&self, marker: &Marker) -> bool {
        marker.kind == self.kind
    }
}

/// Passes markers of one kind at one nesting depth
/// ("top-level field only" is `LevelRule::new(Field, 0)`)
#[derive(Debug, Clone, Copy)]
pub struct LevelRule {
    kind: MarkerKind,
    level: usize,
}

impl LevelRule {
    /// Create a rule matching `kind` at `level`
    pub fn new(kind: MarkerKind, level: usize) -> Self {
        Self { kind, level }
    }
}

impl MarkerRule for LevelRule {
    fn is_valid(&self, marker: &Marker) -> bool {
        marker.kind == self.kind && marker.level == self.level
    }
}
