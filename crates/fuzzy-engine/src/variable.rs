//! Linguistic Variables

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::error::ConfigError;
use crate::membership::MembershipFunction;
use crate::universe::Universe;

new_key_type! {
    /// Key of a variable inside a [`Variables`] registry
    pub struct VariableKey;
}

static NEXT_REGISTRY: AtomicU64 = AtomicU64::new(1);

/// Copyable reference to a declared variable.
///
/// Only resolves in the registry that issued it (or a clone of that
/// registry); any other registry treats it as undeclared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableHandle {
    pub(crate) registry: u64,
    pub(crate) key: VariableKey,
}

/// Whether a variable is fuzzified from an input or defuzzified to an output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Input, fuzzified from a crisp measurement
    Antecedent,
    /// Output, defuzzified to a crisp result
    Consequent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Antecedent => "antecedent",
            Role::Consequent => "consequent",
        }
    }
}

/// Named fuzzy term owned by one variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub label: String,
    pub membership: MembershipFunction,
}

/// Sampled membership curve of one term, for plotting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermSeries {
    pub label: String,
    pub points: Vec<f64>,
    pub degrees: Vec<f64>,
}

/// Variable with a universe of discourse and its terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinguisticVariable {
    name: String,
    role: Role,
    universe: Universe,
    terms: Vec<Term>,
}

impl LinguisticVariable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Look up a term by label
    pub fn term(&self, label: &str) -> Option<&Term> {
        self.terms.iter().find(|t| t.label == label)
    }

    /// Degree of `x` in the term `label`, if the term exists
    pub fn degree(&self, label: &str, x: f64) -> Option<f64> {
        self.term(label).map(|t| t.membership.evaluate(x))
    }

    /// Degree of `x` in every term. Degrees are not normalized.
    pub fn fuzzify(&self, x: f64) -> BTreeMap<&str, f64> {
        self.terms
            .iter()
            .map(|t| (t.label.as_str(), t.membership.evaluate(x)))
            .collect()
    }

    /// Membership of `label` at every sample point of the universe
    pub fn sampled(&self, label: &str) -> Option<Vec<f64>> {
        let term = self.term(label)?;
        Some(
            self.universe
                .samples()
                .map(|x| term.membership.evaluate(x))
                .collect(),
        )
    }

    /// Sampled curves of all terms over the universe
    pub fn series(&self) -> Vec<TermSeries> {
        let points: Vec<f64> = self.universe.samples().collect();
        self.terms
            .iter()
            .map(|t| TermSeries {
                label: t.label.clone(),
                degrees: points.iter().map(|&x| t.membership.evaluate(x)).collect(),
                points: points.clone(),
            })
            .collect()
    }
}

/// Registry of the variables of one inference system
#[derive(Debug, Clone)]
pub struct Variables {
    id: u64,
    pub(crate) slots: SlotMap<VariableKey, LinguisticVariable>,
    pub(crate) by_name: HashMap<String, VariableKey>,
}

impl Default for Variables {
    fn default() -> Self {
        Self::new()
    }
}

impl Variables {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed),
            slots: SlotMap::with_key(),
            by_name: HashMap::new(),
        }
    }

    fn issue(&self, key: VariableKey) -> VariableHandle {
        VariableHandle {
            registry: self.id,
            key,
        }
    }

    /// Slot key of `handle`, if this registry issued it
    pub(crate) fn key_of(&self, handle: VariableHandle) -> Option<VariableKey> {
        (handle.registry == self.id && self.slots.contains_key(handle.key)).then_some(handle.key)
    }

    /// Declare an input variable over `[min, max]` sampled every `step`
    pub fn antecedent(
        &mut self,
        name: &str,
        min: f64,
        max: f64,
        step: f64,
    ) -> Result<VariableHandle, ConfigError> {
        self.define(name, Role::Antecedent, min, max, step)
    }

    /// Declare an output variable over `[min, max]` sampled every `step`
    pub fn consequent(
        &mut self,
        name: &str,
        min: f64,
        max: f64,
        step: f64,
    ) -> Result<VariableHandle, ConfigError> {
        self.define(name, Role::Consequent, min, max, step)
    }

    /// Declare a variable with an explicit role
    pub fn define(
        &mut self,
        name: &str,
        role: Role,
        min: f64,
        max: f64,
        step: f64,
    ) -> Result<VariableHandle, ConfigError> {
        if self.by_name.contains_key(name) {
            return Err(ConfigError::DuplicateVariable(name.to_string()));
        }
        let universe = Universe::new(min, max, step).ok_or_else(|| ConfigError::InvalidUniverse {
            name: name.to_string(),
            min,
            max,
            step,
        })?;

        let key = self.slots.insert(LinguisticVariable {
            name: name.to_string(),
            role,
            universe,
            terms: Vec::new(),
        });
        self.by_name.insert(name.to_string(), key);

        debug!(
            "Defined {} {} over [{}, {}] step {}",
            role.as_str(),
            name,
            min,
            max,
            step
        );
        Ok(self.issue(key))
    }

    /// Register a triangular term `(a, b, c)` on a declared variable
    pub fn add_term(
        &mut self,
        handle: VariableHandle,
        label: &str,
        a: f64,
        b: f64,
        c: f64,
    ) -> Result<(), ConfigError> {
        let key = self.key_of(handle).ok_or(ConfigError::UnknownVariable)?;
        let var = self.slots.get_mut(key).ok_or(ConfigError::UnknownVariable)?;

        let membership = MembershipFunction::triangular(a, b, c).ok_or_else(|| {
            ConfigError::InvalidMembershipParams {
                label: label.to_string(),
                a,
                b,
                c,
            }
        })?;

        if var.term(label).is_some() {
            return Err(ConfigError::DuplicateTerm {
                variable: var.name.clone(),
                label: label.to_string(),
            });
        }

        var.terms.push(Term {
            label: label.to_string(),
            membership,
        });
        Ok(())
    }

    /// Resolve a handle
    pub fn get(&self, handle: VariableHandle) -> Option<&LinguisticVariable> {
        self.key_of(handle).and_then(|key| self.slots.get(key))
    }

    /// Resolve a name
    pub fn by_name(&self, name: &str) -> Option<&LinguisticVariable> {
        self.by_name.get(name).and_then(|key| self.slots.get(*key))
    }

    /// Handle of a named variable
    pub fn handle(&self, name: &str) -> Option<VariableHandle> {
        self.by_name.get(name).map(|key| self.issue(*key))
    }

    /// Iterate over all declared variables
    pub fn iter(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temperature() -> (Variables, VariableHandle) {
        let mut vars = Variables::new();
        let temp = vars.antecedent("temperature", 0.0, 150.0, 1.0).unwrap();
        vars.add_term(temp, "low", 0.0, 0.0, 50.0).unwrap();
        vars.add_term(temp, "medium", 30.0, 75.0, 120.0).unwrap();
        vars.add_term(temp, "high", 100.0, 150.0, 150.0).unwrap();
        (vars, temp)
    }

    #[test]
    fn test_fuzzify_peak() {
        let (vars, temp) = temperature();
        let degrees = vars.get(temp).unwrap().fuzzify(75.0);
        assert_eq!(degrees["medium"], 1.0);
        assert_eq!(degrees["low"], 0.0);
        assert_eq!(degrees["high"], 0.0);
    }

    #[test]
    fn test_fuzzify_overlap_not_normalized() {
        let (vars, temp) = temperature();
        let degrees = vars.get(temp).unwrap().fuzzify(40.0);
        assert!((degrees["low"] - 0.2).abs() < 1e-12);
        assert!((degrees["medium"] - 10.0 / 45.0).abs() < 1e-12);
        assert!(degrees.values().sum::<f64>() < 1.0);
    }

    #[test]
    fn test_fuzzify_outside_universe_does_not_fail() {
        let (vars, temp) = temperature();
        let var = vars.get(temp).unwrap();
        assert!(!var.universe().contains(400.0));
        let degrees = var.fuzzify(400.0);
        assert_eq!(degrees.len(), 3);
        assert!(degrees.values().all(|d| *d == 0.0));
    }

    #[test]
    fn test_duplicate_term() {
        let (mut vars, temp) = temperature();
        let err = vars.add_term(temp, "low", 0.0, 10.0, 20.0).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTerm { .. }));
    }

    #[test]
    fn test_invalid_membership_params() {
        let (mut vars, temp) = temperature();
        let err = vars.add_term(temp, "weird", 50.0, 40.0, 60.0).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidMembershipParams {
                label: "weird".into(),
                a: 50.0,
                b: 40.0,
                c: 60.0,
            }
        );
    }

    #[test]
    fn test_duplicate_variable_and_bad_universe() {
        let (mut vars, _) = temperature();
        assert_eq!(
            vars.consequent("temperature", 0.0, 1.0, 0.1).unwrap_err(),
            ConfigError::DuplicateVariable("temperature".into())
        );
        assert!(matches!(
            vars.consequent("risk", 100.0, 0.0, 1.0),
            Err(ConfigError::InvalidUniverse { .. })
        ));
    }

    #[test]
    fn test_foreign_handle() {
        let (_, temp) = temperature();
        let mut other = Variables::new();
        assert_eq!(
            other.add_term(temp, "low", 0.0, 0.0, 1.0).unwrap_err(),
            ConfigError::UnknownVariable
        );
    }

    #[test]
    fn test_foreign_handle_in_occupied_slot() {
        let (mut vars, temp) = temperature();
        let mut other = Variables::new();
        let pressure = other.antecedent("pressure", 0.0, 10.0, 1.0).unwrap();

        // Both handles point at the first slot of their own registry
        assert_eq!(pressure.key, temp.key);
        assert!(vars.get(pressure).is_none());
        assert_eq!(
            vars.add_term(pressure, "high", 5.0, 10.0, 10.0).unwrap_err(),
            ConfigError::UnknownVariable
        );
        assert_eq!(vars.get(temp).unwrap().terms().len(), 3);
    }

    #[test]
    fn test_clone_accepts_source_handles() {
        let (vars, temp) = temperature();
        let copy = vars.clone();
        assert_eq!(copy.get(temp).unwrap().name(), "temperature");
        assert_eq!(copy.handle("temperature"), Some(temp));
    }

    #[test]
    fn test_oversized_universe_rejected() {
        let mut vars = Variables::new();
        assert!(matches!(
            vars.consequent("out", 0.0, 1e300, 1e-10),
            Err(ConfigError::InvalidUniverse { .. })
        ));
        assert!(matches!(
            vars.consequent("risk", 0.0, 100.0, 1e-12),
            Err(ConfigError::InvalidUniverse { .. })
        ));
        assert!(vars.is_empty());
    }

    #[test]
    fn test_series_for_plotting() {
        let (vars, temp) = temperature();
        let series = vars.get(temp).unwrap().series();
        assert_eq!(series.len(), 3);
        assert_eq!(series[1].label, "medium");
        assert_eq!(series[1].points.len(), 151);
        assert_eq!(series[1].degrees[75], 1.0);
        assert_eq!(series[0].degrees[0], 1.0);
    }
}
