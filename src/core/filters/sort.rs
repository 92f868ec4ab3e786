//! Sort/prune filter
//!
//! Orders a tree by the canonical kind rank, then case-insensitively by
//! name, recursively at every level. Markers whose kind is absent from the
//! rank table are pruned. The sort is an in-place unstable quicksort;
//! exact (kind, name) ties keep no particular order.

use std::cmp::Ordering;
use std::collections::HashMap;

use tidytree_marker::{Marker, MarkerKind};

use crate::core::config::{SortDirection, CANONICAL_KIND_ORDER};
use crate::core::rules::MarkerRule;

/// Two-key recursive sort with kind-table pruning
pub struct SortFilter {
    rank: HashMap<MarkerKind, usize>,
    direction: SortDirection,
}

impl SortFilter {
    /// Create a sort filter over the given kind order
    pub fn new(order: Vec<MarkerKind>, direction: SortDirection) -> Self {
        let rank = order
            .into_iter()
            .enumerate()
            .map(|(index, kind)| (kind, index))
            .collect();
        Self { rank, direction }
    }

    /// Create a sort filter over the canonical kind order
    pub fn canonical(direction: SortDirection) -> Self {
        Self::new(CANONICAL_KIND_ORDER.to_vec(), direction)
    }

    /// Rank of a kind in the configured order, if present
    pub fn rank_of(&self, kind: MarkerKind) -> Option<usize> {
        self.rank.get(&kind).copied()
    }

    /// The two-key comparator: kind rank, then case-insensitive name.
    /// Unranked kinds never reach the comparator (they are pruned first),
    /// but compare as greatest for completeness.
    pub fn compare(&self, a: &Marker, b: &Marker) -> Ordering {
        let by_rank = match (self.rank_of(a.kind), self.rank_of(b.kind)) {
            (Some(ra), Some(rb)) => ra.cmp(&rb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        let ordering = by_rank.then_with(|| name_cmp(&a.name, &b.name));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Case-insensitive name comparison without allocating
fn name_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

impl MarkerRule for SortFilter {
    fn is_valid(&self, marker: &Marker) -> bool {
        self.rank.contains_key(&marker.kind)
    }

    fn apply_filter(&self, markers: &[Marker]) -> Vec<Marker> {
        let mut survivors: Vec<Marker> = markers
            .iter()
            .filter(|marker| self.is_valid(marker))
            .map(|marker| {
                let mut clone = marker.shallow_clone();
                clone.children = self.apply_filter(&marker.children);
                clone
            })
            .collect();
        survivors.sort_unstable_by(|a, b| self.compare(a, b));
        survivors
    }
}
