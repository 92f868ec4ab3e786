//! Deep, ancestry-preserving filter
//!
//! Selects markers matching a rule at any depth while keeping, for every
//! match, the chain of ancestors up to a top-level node, each ancestor
//! appearing once no matter how many of its descendants matched. A run of
//! documentation comments sitting immediately before a selected marker in
//! the original sibling list rides along with it, so query results keep
//! their attached docs.

use tidytree_marker::Marker;

use crate::core::rules::MarkerRule;

/// Ancestry-preserving recursive selection over a rule
pub struct DeepFilter<R: MarkerRule> {
    rule: R,
}

impl<R: MarkerRule> DeepFilter<R> {
    /// Create a deep filter over `rule`
    pub fn new(rule: R) -> Self {
        Self { rule }
    }

    /// The wrapped rule
    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// One recursion scope: process a sibling list, returning the distinct
    /// topmost surviving clones in first-seen order.
    fn filter_list(&self, markers: &[Marker]) -> Vec<Marker> {
        // First pass: verdicts and filtered children per item. Doc-run
        // splicing needs to know whether an earlier sibling survived on
        // its own, so verdicts are settled before assembly.
        let mut children: Vec<Vec<Marker>> = markers
            .iter()
            .map(|marker| self.filter_list(&marker.children))
            .collect();
        let survives: Vec<bool> = markers
            .iter()
            .zip(&children)
            .map(|(marker, filtered)| self.rule.is_valid(marker) || !filtered.is_empty())
            .collect();

        let mut result = Vec::new();
        for index in 0..markers.len() {
            if !survives[index] {
                continue;
            }

            // Contiguous doc-comment run ending just before this item, in
            // the ORIGINAL list: an elided marker in between breaks the run.
            let mut run_start = index;
            while run_start > 0 && markers[run_start - 1].is_doc_comment() {
                run_start -= 1;
            }
            for doc_index in run_start..index {
                // a doc comment that survived on its own is already in the
                // result; splicing it again would duplicate it
                if survives[doc_index] {
                    continue;
                }
                result.push(markers[doc_index].shallow_clone());
            }

            let mut clone = markers[index].shallow_clone();
            clone.children = std::mem::take(&mut children[index]);
            result.push(clone);
        }
        result
    }
}

impl<R: MarkerRule> MarkerRule for DeepFilter<R> {
    fn is_valid(&self, marker: &Marker) -> bool {
        self.rule.is_valid(marker)
    }

    fn apply_filter(&self, markers: &[Marker]) -> Vec<Marker> {
        self.filter_list(markers)
    }
}
