//! Evaluation Context

use std::collections::BTreeMap;

use crate::error::EvalError;
use crate::inputs::Inputs;
use crate::variable::{VariableHandle, Variables};

/// Per-call state: the crisp inputs and, once computed, the crisp outputs.
///
/// Fuzzification happens on demand when a term reference is evaluated.
/// A context borrows the shared configuration and is dropped with the call.
#[derive(Debug)]
pub struct EvaluationContext<'a> {
    variables: &'a Variables,
    inputs: &'a Inputs,
    outputs: BTreeMap<String, f64>,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(variables: &'a Variables, inputs: &'a Inputs) -> Self {
        Self {
            variables,
            inputs,
            outputs: BTreeMap::new(),
        }
    }

    /// Crisp input of a variable
    pub fn input(&self, name: &str) -> Option<f64> {
        self.inputs.get(name)
    }

    /// Degree of the input stored for `handle` in its term `label`
    pub fn degree(&self, handle: VariableHandle, label: &str) -> Result<f64, EvalError> {
        let var = self
            .variables
            .get(handle)
            .ok_or_else(|| EvalError::UnknownVariable(format!("{:?}", handle)))?;
        let x = self
            .inputs
            .get(var.name())
            .ok_or_else(|| EvalError::MissingInput(var.name().to_string()))?;

        var.degree(label, x).ok_or_else(|| EvalError::UnknownTerm {
            variable: var.name().to_string(),
            label: label.to_string(),
        })
    }

    /// Record the crisp value computed for an output
    pub fn set_output(&mut self, name: &str, value: f64) {
        self.outputs.insert(name.to_string(), value);
    }

    pub fn output(&self, name: &str) -> Option<f64> {
        self.outputs.get(name).copied()
    }

    /// Consume the context, keeping only the computed outputs
    pub fn into_outputs(self) -> BTreeMap<String, f64> {
        self.outputs
    }
}
