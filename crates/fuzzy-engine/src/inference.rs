//! Mamdani Inference System

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, warn};

use crate::aggregate::AggregatedSet;
use crate::context::EvaluationContext;
use crate::defuzz::DefuzzMethod;
use crate::error::{ConfigError, EvalError};
use crate::inputs::Inputs;
use crate::rule::Rules;
use crate::variable::{LinguisticVariable, Role, VariableHandle, VariableKey, Variables};

/// Immutable variables and rules, validated once and shared by every call.
///
/// Holds no per-call state, so one instance can be evaluated from many
/// threads at once behind a plain `Arc`.
#[derive(Debug, Clone)]
pub struct InferenceSystem {
    variables: Variables,
    rules: Rules,
    /// Antecedents referenced by at least one rule
    required: Vec<VariableKey>,
    /// Every declared consequent, in declaration order
    outputs: Vec<VariableKey>,
    /// Consequent term sampled over its universe, indexed like `rules`
    consequent_samples: Vec<Vec<f64>>,
    defuzz: DefuzzMethod,
}

/// Aggregated output sets of one call
#[derive(Debug, Clone)]
pub struct Inference<'s> {
    system: &'s InferenceSystem,
    strengths: Vec<f64>,
    sets: Vec<AggregatedSet>,
}

impl InferenceSystem {
    /// Validate rules against the variables and freeze both.
    pub fn new(variables: Variables, rules: Rules) -> Result<Self, ConfigError> {
        let mut required = Vec::new();
        let mut seen = HashSet::new();
        let mut consequent_samples = Vec::with_capacity(rules.len());

        for rule in rules.iter() {
            for (handle, label) in rule.premise.propositions() {
                let (key, var) = resolve(&variables, handle, label)?;
                expect_role(var, Role::Antecedent)?;
                if seen.insert(key) {
                    required.push(key);
                }
            }

            let (_, var) = resolve(&variables, rule.consequent, &rule.label)?;
            expect_role(var, Role::Consequent)?;
            let samples = var.sampled(&rule.label).ok_or_else(|| dangling(var.name(), &rule.label))?;
            consequent_samples.push(samples);
        }

        let outputs: Vec<VariableKey> = variables
            .slots
            .iter()
            .filter(|(_, v)| v.role() == Role::Consequent)
            .map(|(k, _)| k)
            .collect();

        info!(
            "Built inference system: {} variables, {} rules, {} outputs",
            variables.len(),
            rules.len(),
            outputs.len()
        );

        Ok(Self {
            variables,
            rules,
            required,
            outputs,
            consequent_samples,
            defuzz: DefuzzMethod::default(),
        })
    }

    /// Use a different defuzzification method
    pub fn with_defuzz(mut self, defuzz: DefuzzMethod) -> Self {
        self.defuzz = defuzz;
        self
    }

    pub fn defuzz(&self) -> DefuzzMethod {
        self.defuzz
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Names of the antecedents a call must supply
    pub fn required_inputs(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .filter_map(|k| self.variables.slots.get(*k))
            .map(|v| v.name())
    }

    /// Names of the declared outputs
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs
            .iter()
            .filter_map(|k| self.variables.slots.get(*k))
            .map(|v| v.name())
    }

    /// Fire every rule and aggregate the implied sets per output.
    ///
    /// Outputs without any firing rule get an all-zero set.
    pub fn infer(&self, inputs: &Inputs) -> Result<Inference<'_>, EvalError> {
        self.check_inputs(inputs)?;
        let ctx = EvaluationContext::new(&self.variables, inputs);

        let mut sets: Vec<AggregatedSet> = self
            .outputs
            .iter()
            .filter_map(|k| self.variables.slots.get(*k))
            .map(|v| AggregatedSet::zeros(v.name(), v.universe().len()))
            .collect();

        let mut strengths = Vec::with_capacity(self.rules.len());
        for (rule, term) in self.rules.iter().zip(&self.consequent_samples) {
            let strength = rule.premise.strength(&ctx)?;
            strengths.push(strength);

            if let Some(i) = self.outputs.iter().position(|k| *k == rule.consequent.key) {
                sets[i].absorb(term, strength);
            }
        }

        debug!("Rule strengths: {:?}", strengths);
        Ok(Inference {
            system: self,
            strengths,
            sets,
        })
    }

    /// Crisp value of every output.
    ///
    /// Fails with `NoApplicableRule` naming the first output, in declaration
    /// order, whose aggregated set is zero everywhere.
    pub fn evaluate(&self, inputs: &Inputs) -> Result<BTreeMap<String, f64>, EvalError> {
        let inference = self.infer(inputs)?;
        let mut ctx = EvaluationContext::new(&self.variables, inputs);

        for set in inference.sets() {
            let crisp = inference.defuzzify_set(set)?;
            ctx.set_output(set.variable(), crisp);
        }

        Ok(ctx.into_outputs())
    }

    fn check_inputs(&self, inputs: &Inputs) -> Result<(), EvalError> {
        for key in &self.required {
            let Some(var) = self.variables.slots.get(*key) else {
                continue;
            };
            let value = inputs
                .get(var.name())
                .ok_or_else(|| EvalError::MissingInput(var.name().to_string()))?;
            if !value.is_finite() {
                return Err(EvalError::NonFiniteInput {
                    name: var.name().to_string(),
                    value,
                });
            }
            if !var.universe().contains(value) {
                warn!(
                    "Input {}={} outside universe [{}, {}]",
                    var.name(),
                    value,
                    var.universe().min(),
                    var.universe().max()
                );
            }
        }

        for (name, _) in inputs.iter() {
            match self.variables.by_name(name) {
                Some(var) if var.role() == Role::Antecedent => {}
                _ => warn!("Ignoring input {} with no matching antecedent", name),
            }
        }

        Ok(())
    }
}

impl<'s> Inference<'s> {
    /// Firing strength of each rule, in rule order
    pub fn strengths(&self) -> &[f64] {
        &self.strengths
    }

    /// One aggregated set per declared output
    pub fn sets(&self) -> &[AggregatedSet] {
        &self.sets
    }

    /// Aggregated set of the named output
    pub fn set(&self, output: &str) -> Option<&AggregatedSet> {
        self.sets.iter().find(|s| s.variable() == output)
    }

    /// Crisp value of the named output
    pub fn defuzzify(&self, output: &str) -> Result<f64, EvalError> {
        let set = self
            .set(output)
            .ok_or_else(|| EvalError::UnknownVariable(output.to_string()))?;
        self.defuzzify_set(set)
    }

    /// Crisp value or failure for every output, keyed by name
    pub fn defuzzify_all(&self) -> BTreeMap<String, Result<f64, EvalError>> {
        self.sets
            .iter()
            .map(|s| (s.variable().to_string(), self.defuzzify_set(s)))
            .collect()
    }

    fn defuzzify_set(&self, set: &AggregatedSet) -> Result<f64, EvalError> {
        let var = self
            .system
            .variables
            .by_name(set.variable())
            .ok_or_else(|| EvalError::UnknownVariable(set.variable().to_string()))?;
        self.system.defuzz.defuzzify(set, var.universe())
    }
}

fn resolve<'v>(
    variables: &'v Variables,
    handle: VariableHandle,
    label: &str,
) -> Result<(VariableKey, &'v LinguisticVariable), ConfigError> {
    let key = variables
        .key_of(handle)
        .ok_or_else(|| dangling("<undeclared>", label))?;
    let var = variables
        .slots
        .get(key)
        .ok_or_else(|| dangling("<undeclared>", label))?;
    if var.term(label).is_none() {
        return Err(dangling(var.name(), label));
    }
    Ok((key, var))
}

fn expect_role(var: &LinguisticVariable, used_as: Role) -> Result<(), ConfigError> {
    if var.role() == used_as {
        Ok(())
    } else {
        Err(ConfigError::RoleMismatch {
            variable: var.name().to_string(),
            used_as: used_as.as_str(),
            declared: var.role().as_str(),
        })
    }
}

fn dangling(variable: &str, label: &str) -> ConfigError {
    ConfigError::DanglingReference {
        variable: variable.to_string(),
        label: label.to_string(),
    }
}
