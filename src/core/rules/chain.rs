//! Chain combinators
//!
//! A chain aggregates an ordered list of rules under one pass-mode. As a
//! predicate it combines sub-rule verdicts (AND or OR, short-circuiting);
//! as a filter it is a pipeline: each stage consumes the previous stage's
//! output, and there is no rollback: a later stage never undoes an
//! earlier stage's effect.

use tidytree_marker::Marker;

use crate::core::config::ReorgOptions;
use crate::core::error::{Result, TidyError};
use crate::core::filters::{
    CommentConsolidator, CommentStrip, DirectiveConsolidator, SortFilter,
};

use super::MarkerRule;

/// Combination semantics for a rule chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassMode {
    /// True iff every sub-rule passes (short-circuits on first failure)
    #[default]
    All,
    /// True iff at least one sub-rule passes (short-circuits on first pass)
    Any,
}

fn chain_is_valid(rules: &[Box<dyn MarkerRule>], mode: PassMode, marker: &Marker) -> bool {
    match mode {
        PassMode::All => rules.iter().all(|rule| rule.is_valid(marker)),
        PassMode::Any => rules.iter().any(|rule| rule.is_valid(marker)),
    }
}

fn chain_apply(rules: &[Box<dyn MarkerRule>], markers: &[Marker]) -> Vec<Marker> {
    let mut current = markers.to_vec();
    for rule in rules {
        current = rule.apply_filter(&current);
    }
    current
}

// ============================================================================
// RuleChain
// ============================================================================

/// A mutable, ordered composition of rules
#[derive(Default)]
pub struct RuleChain {
    rules: Vec<Box<dyn MarkerRule>>,
    mode: PassMode,
}

impl RuleChain {
    /// Create an empty chain with the given pass-mode
    pub fn new(mode: PassMode) -> Self {
        Self {
            rules: Vec::new(),
            mode,
        }
    }

    /// Builder pattern: append a rule
    pub fn with_rule(mut self, rule: impl MarkerRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Append a rule
    pub fn push(&mut self, rule: impl MarkerRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Number of rules in the chain
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the chain holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The chain's pass-mode
    pub fn mode(&self) -> PassMode {
        self.mode
    }
}

impl MarkerRule for RuleChain {
    fn is_valid(&self, marker: &Marker) -> bool {
        chain_is_valid(&self.rules, self.mode, marker)
    }

    fn apply_filter(&self, markers: &[Marker]) -> Vec<Marker> {
        chain_apply(&self.rules, markers)
    }
}

// ============================================================================
// FixedChain
// ============================================================================

/// An immutable chain whose stage list is hard-wired at construction.
///
/// The two canonical instances are [`FixedChain::commit_pipeline`] and
/// [`FixedChain::display_pipeline`].
pub struct FixedChain {
    rules: Vec<Box<dyn MarkerRule>>,
    mode: PassMode,
}

impl FixedChain {
    /// Create a fixed chain. Rejects an empty stage list.
    pub fn new(rules: Vec<Box<dyn MarkerRule>>, mode: PassMode) -> Result<Self> {
        if rules.is_empty() {
            return Err(TidyError::EmptyChain);
        }
        Ok(Self { rules, mode })
    }

    /// The pipeline producing the commit tree used for file splitting:
    /// directive-block consolidation, comment-run consolidation, sort/prune.
    pub fn commit_pipeline(options: &ReorgOptions) -> Self {
        let order = options.effective_kind_order();
        Self {
            rules: vec![
                Box::new(DirectiveConsolidator::new(order.clone())),
                Box::new(CommentConsolidator::new()),
                Box::new(SortFilter::new(order, options.sort_direction)),
            ],
            mode: PassMode::All,
        }
    }

    /// The pipeline producing the cleaned display tree:
    /// comment elimination, sort/prune.
    pub fn display_pipeline(options: &ReorgOptions) -> Self {
        Self {
            rules: vec![
                Box::new(CommentStrip::new()),
                Box::new(SortFilter::new(
                    options.effective_kind_order(),
                    options.sort_direction,
                )),
            ],
            mode: PassMode::All,
        }
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// A fixed chain is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The chain's declared pass-mode
    pub fn mode(&self) -> PassMode {
        self.mode
    }
}

impl MarkerRule for FixedChain {
    fn is_valid(&self, marker: &Marker) -> bool {
        chain_is_valid(&self.rules, self.mode, marker)
    }

    fn apply_filter(&self, markers: &[Marker]) -> Vec<Marker> {
        chain_apply(&self.rules, markers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::{FnRule, KindRule};
    use tidytree_marker::{MarkerKind, Span};

    fn marker(name: &str, kind: MarkerKind) -> Marker {
        Marker::new(name, kind, Span::new(0, 10, 1, 1))
    }

    #[test]
    fn test_pass_all_semantics() {
        let chain = RuleChain::new(PassMode::All)
            .with_rule(KindRule::new(MarkerKind::Method))
            .with_rule(FnRule(|m: &Marker| m.name.starts_with("Do")));

        assert!(chain.is_valid(&marker("DoWork", MarkerKind::Method)));
        assert!(!chain.is_valid(&marker("Work", MarkerKind::Method)));
        assert!(!chain.is_valid(&marker("DoWork", MarkerKind::Field)));
    }

    #[test]
    fn test_pass_any_semantics() {
        let chain = RuleChain::new(PassMode::Any)
            .with_rule(KindRule::new(MarkerKind::Method))
            .with_rule(KindRule::new(MarkerKind::Field));

        assert!(chain.is_valid(&marker("a", MarkerKind::Method)));
        assert!(chain.is_valid(&marker("b", MarkerKind::Field)));
        assert!(!chain.is_valid(&marker("c", MarkerKind::Class)));
    }

    #[test]
    fn test_empty_chain_verdicts() {
        // vacuous truth under All, vacuous falsity under Any
        let all = RuleChain::new(PassMode::All);
        let any = RuleChain::new(PassMode::Any);
        let m = marker("x", MarkerKind::Method);
        assert!(all.is_valid(&m));
        assert!(!any.is_valid(&m));
    }

    #[test]
    fn test_pipeline_order() {
        // stage 1 drops comments, stage 2 drops fields; both effects persist
        let chain = RuleChain::new(PassMode::All)
            .with_rule(FnRule(|m: &Marker| !m.is_comment()))
            .with_rule(FnRule(|m: &Marker| m.kind != MarkerKind::Field));

        let input = vec![
            marker("// note", MarkerKind::LineComment),
            marker("count", MarkerKind::Field),
            marker("DoWork", MarkerKind::Method),
        ];
        let output = chain.apply_filter(&input);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].name, "DoWork");
    }

    #[test]
    fn test_fixed_chain_rejects_empty() {
        let result = FixedChain::new(Vec::new(), PassMode::All);
        assert!(matches!(result, Err(TidyError::EmptyChain)));
    }

    #[test]
    fn test_fixed_chain_construction() {
        let chain = FixedChain::new(
            vec![Box::new(KindRule::new(MarkerKind::Method))],
            PassMode::All,
        )
        .unwrap();
        assert_eq!(chain.len(), 1);
        assert!(!chain.is_empty());
        assert_eq!(chain.mode(), PassMode::All);
    }

    #[test]
    fn test_canonical_pipelines_have_declared_stages() {
        let options = ReorgOptions::default();
        assert_eq!(FixedChain::commit_pipeline(&options).len(), 3);
        assert_eq!(FixedChain::display_pipeline(&options).len(), 2);
    }
}
