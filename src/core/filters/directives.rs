//! Conditional-compilation block consolidation
//!
//! A `#if ... #endif` region must travel as one atomic unit through
//! sorting and file splitting. This filter finds matching directive pairs
//! (nesting counted, including nesting that continues inside a sibling's
//! own children), and replaces each region with a consolidation node
//! cloned from the first rank-table marker inside it. Regions with no
//! matching closer, or with nothing worth anchoring to, pass through
//! untouched.

use std::collections::HashSet;

use tidytree_marker::{Marker, MarkerKind, Span};

use crate::core::rules::MarkerRule;

/// Consolidates matched directive regions into single atomic nodes
pub struct DirectiveConsolidator {
    ranked: HashSet<MarkerKind>,
}

impl DirectiveConsolidator {
    /// Create a consolidator anchored on the given kind table
    pub fn new(order: Vec<MarkerKind>) -> Self {
        Self {
            ranked: order.into_iter().collect(),
        }
    }

    fn consolidate(&self, markers: &[Marker]) -> Vec<Marker> {
        let mut result = Vec::new();
        let mut index = 0;
        while index < markers.len() {
            let marker = &markers[index];
            if marker.is_directive_open() {
                if let Some(node) = self.try_consolidate_region(markers, index) {
                    let (node, end_index) = node;
                    result.push(node);
                    index = end_index + 1;
                    continue;
                }
            }
            let mut clone = marker.shallow_clone();
            clone.children = self.consolidate(&marker.children);
            result.push(clone);
            index += 1;
        }
        result
    }

    /// Attempt to consolidate the region opened at `open_index`. Returns the
    /// synthesized node and the sibling index the scan resumes after, or
    /// None when the region degrades gracefully.
    fn try_consolidate_region(
        &self,
        markers: &[Marker],
        open_index: usize,
    ) -> Option<(Marker, usize)> {
        let (end_index, close_span) = self.find_close(markers, open_index)?;
        let range = &markers[open_index..=end_index];

        let anchor = range.iter().find(|m| self.ranked.contains(&m.kind))?;
        let mut node = anchor.shallow_clone();
        node.span = Span::between(&markers[open_index].span, &close_span);
        node.children = range
            .iter()
            .map(|member| {
                let mut clone = member.shallow_clone();
                clone.children = self.consolidate(&member.children);
                clone
            })
            .collect();
        Some((node, end_index))
    }

    /// Find the closer matching the opener at `open_index`, scanning the
    /// sibling list in document order (each sibling, then its subtree)
    /// with one depth counter across the whole walk. Returns the sibling
    /// index the region ends at and the closer's own span.
    fn find_close(&self, markers: &[Marker], open_index: usize) -> Option<(usize, Span)> {
        let mut depth: usize = 0;
        for (index, marker) in markers.iter().enumerate().skip(open_index) {
            if marker.is_directive_open() {
                depth += 1;
            } else if marker.is_directive_close() {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some((index, marker.span));
                }
            } else if let Some(span) = Self::close_in_subtree(&marker.children, &mut depth) {
                return Some((index, span));
            }
        }
        None
    }

    fn close_in_subtree(markers: &[Marker], depth: &mut usize) -> Option<Span> {
        for marker in markers {
            if marker.is_directive_open() {
                *depth += 1;
            } else if marker.is_directive_close() {
                *depth = depth.saturating_sub(1);
                if *depth == 0 {
                    return Some(marker.span);
                }
            } else if let Some(span) = Self::close_in_subtree(&marker.children, depth) {
                return Some(span);
            }
        }
        None
    }
}

impl MarkerRule for DirectiveConsolidator {
    fn is_valid(&self, _marker: &Marker) -> bool {
        // a structural transform: no marker is invalid on its own
        true
    }

    fn apply_filter(&self, markers: &[Marker]) -> Vec<Marker> {
        self.consolidate(markers)
    }
}
