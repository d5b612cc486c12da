//! Successor groups: ordered batches of rules that run only when their
//! owning rule passes.

use super::error::RuleError;
use super::rule::Rule;

/// An ordered, fixed-size, non-empty batch of rules attached to a parent
/// rule in a single call.
pub struct SuccessorGroup {
    rules: Vec<Rule>,
}

impl SuccessorGroup {
    /// Create a group from rules in evaluation order.
    ///
    /// `owner` names the parent rule for the error report.
    pub(crate) fn new(owner: &str, rules: Vec<Rule>) -> Result<Self, RuleError> {
        if rules.is_empty() {
            return Err(RuleError::EmptySuccessorGroup {
                rule: owner.to_string(),
            });
        }
        Ok(Self { rules })
    }

    /// Rules in this group, in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub(crate) fn rules_mut(&mut self) -> &mut [Rule] {
        &mut self.rules
    }
}

impl<'a> IntoIterator for &'a SuccessorGroup {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Read-only access to the successor groups owned by a rule.
///
/// Lets callers inspect the shape of a rule tree without executing or
/// mutating it.
pub trait SuccessorContainer {
    /// Successor groups in attachment order.
    fn successors(&self) -> &[SuccessorGroup];
}

/// Depth-first, pre-order walk over a rule tree.
///
/// Yields `(depth, rule)` pairs where the root has depth 0. Pre-order
/// matches the order in which execution visits rules when nothing fails.
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Rule)>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(root: &'a Rule) -> Self {
        Self {
            stack: vec![(0, root)],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Rule);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, rule) = self.stack.pop()?;
        // Push in reverse so the first successor of the first group pops next.
        for group in rule.successors().iter().rev() {
            for child in group.rules().iter().rev() {
                self.stack.push((depth + 1, child));
            }
        }
        Some((depth, rule))
    }
}
