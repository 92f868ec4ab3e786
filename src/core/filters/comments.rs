//! Comment-run consolidation and comment elimination
//!
//! The commit tree must keep a construct's leading comments attached to
//! it through sorting and file splitting: a run of consecutive comment
//! markers collapses into a consolidation node cloned from the first
//! non-comment marker after the run, covering run start to that marker's
//! end. Namespace wrappers are dissolved here (their children spliced into
//! the parent list; wrapping is rebuilt from the `namespace` field at
//! emission), and using/import markers are dropped.
//!
//! The display tree wants the opposite treatment: `CommentStrip` removes
//! every comment marker at every depth.

use tidytree_marker::{Marker, MarkerKind, Span};

use crate::core::rules::MarkerRule;

/// Collapses comment runs onto the marker that follows them
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentConsolidator;

impl CommentConsolidator {
    /// Create a consolidator
    pub fn new() -> Self {
        Self
    }

    fn consolidate(&self, markers: &[Marker]) -> Vec<Marker> {
        let mut result = Vec::new();
        let mut index = 0;
        while index < markers.len() {
            let marker = &markers[index];
            match marker.kind {
                MarkerKind::Using => {
                    index += 1;
                }
                MarkerKind::Namespace => {
                    result.extend(self.consolidate(&marker.children));
                    index += 1;
                }
                kind if kind.is_comment() => {
                    index = self.consume_run(markers, index, &mut result);
                }
                _ => {
                    result.push(self.rebuild(marker));
                    index += 1;
                }
            }
        }
        result
    }

    /// Consume the comment run starting at `start`. Returns the index the
    /// scan resumes at.
    fn consume_run(&self, markers: &[Marker], start: usize, result: &mut Vec<Marker>) -> usize {
        let mut end = start;
        while end < markers.len() && markers[end].is_comment() {
            end += 1;
        }

        let terminator = match markers.get(end) {
            Some(m) if !matches!(m.kind, MarkerKind::Namespace | MarkerKind::Using) => m,
            // no terminating marker: the run passes through untouched
            _ => {
                for comment in &markers[start..end] {
                    result.push(self.rebuild(comment));
                }
                return end;
            }
        };

        let mut node = terminator.shallow_clone();
        node.span = Span::between(&markers[start].span, &terminator.span);
        node.children = markers[start..=end].iter().map(|m| self.rebuild(m)).collect();
        result.push(node);
        end + 1
    }

    fn rebuild(&self, marker: &Marker) -> Marker {
        let mut clone = marker.shallow_clone();
        clone.children = self.consolidate(&marker.children);
        clone
    }
}

impl MarkerRule for CommentConsolidator {
    fn is_valid(&self, marker: &Marker) -> bool {
        marker.kind != MarkerKind::Using
    }

    fn apply_filter(&self, markers: &[Marker]) -> Vec<Marker> {
        self.consolidate(markers)
    }
}

// ============================================================================
// CommentStrip
// ============================================================================

/// Removes every comment marker at every depth (display pipeline)
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentStrip;

impl CommentStrip {
    /// Create a comment-elimination rule
    pub fn new() -> Self {
        Self
    }
}

impl MarkerRule for CommentStrip {
    fn is_valid(&self, marker: &Marker) -> bool {
        !marker.is_comment()
    }
}
