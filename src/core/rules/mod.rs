//! Filter rule abstractions
//!
//! Every filter stage in the engine (identity rules, query templates,
//! chains, and the structural filters) exposes the same capability:
//! a pure validity predicate over one marker, and a whole-list transform
//! that returns a new, independently-owned list. Chains compose boxed
//! rules uniformly through this one trait, which keeps the rule set flat
//! instead of growing an inheritance tree.

pub mod chain;
pub mod identity;
pub mod template;

pub use chain::{FixedChain, PassMode, RuleChain};
pub use identity::{KindRule, LevelRule};
pub use template::{FlagTemplate, QueryTemplate};

use tidytree_marker::Marker;

/// The one capability every rule and filter stage implements.
///
/// `is_valid` is a pure predicate over a single marker and must not
/// inspect tree structure. `apply_filter` transforms a whole list; the
/// default implementation keeps valid markers and recurses into children,
/// cloning as it goes; the input list is never mutated.
pub trait MarkerRule: Send + Sync {
    /// Pure validity predicate over one marker
    fn is_valid(&self, marker: &Marker) -> bool;

    /// Transform a list into a new, independently-owned list
    fn apply_filter(&self, markers: &[Marker]) -> Vec<Marker> {
        markers
            .iter()
            .filter(|marker| self.is_valid(marker))
            .map(|marker| {
                let mut clone = marker.shallow_clone();
                clone.children = self.apply_filter(&marker.children);
                clone
            })
            .collect()
    }
}

/// Adapter turning a plain predicate closure into a rule
pub struct FnRule<F>(pub F)
where
    F: Fn(&Marker) -> bool + Send + Sync;

impl<F> MarkerRule for FnRule<F>
where
    F: Fn(&Marker) -> bool + Send + Sync,
{
    fn is_valid(&self, marker: &Marker) -> bool {
        (self.0)(marker)
    }
}
