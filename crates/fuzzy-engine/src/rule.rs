//! Fuzzy Rules

use crate::expr::Expr;
use crate::variable::VariableHandle;

/// IF `premise` THEN `variable` IS `label`
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub(crate) premise: Expr,
    pub(crate) consequent: VariableHandle,
    pub(crate) label: String,
}

impl Rule {
    pub fn new(premise: Expr, consequent: VariableHandle, label: &str) -> Self {
        Self {
            premise,
            consequent,
            label: label.to_string(),
        }
    }

    pub fn premise(&self) -> &Expr {
        &self.premise
    }

    /// Output variable this rule contributes to
    pub fn consequent(&self) -> VariableHandle {
        self.consequent
    }

    /// Output term clipped by this rule
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Ordered collection of rules. Order never affects the aggregated result.
#[derive(Debug, Clone, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// Build and append a rule
    pub fn add(&mut self, premise: Expr, consequent: VariableHandle, label: &str) {
        self.0.push(Rule::new(premise, consequent, label));
    }

    pub fn push(&mut self, rule: Rule) {
        self.0.push(rule);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Rule> for Rules {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Rules(iter.into_iter().collect())
    }
}
