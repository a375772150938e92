//! Fuzzy Engine Error Types

use thiserror::Error;

/// Errors detected while building variables, rules, or an inference system.
///
/// These are fatal to construction and never coerced into a usable system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Universe bounds or step are unusable, or the grid exceeds `MAX_SAMPLES` points
    #[error("Invalid universe for {name}: [{min}, {max}] with step {step}")]
    InvalidUniverse {
        name: String,
        min: f64,
        max: f64,
        step: f64,
    },

    /// Triangular control points are not ordered `a <= b <= c`
    #[error("Invalid membership parameters for {label}: ({a}, {b}, {c}) must satisfy a <= b <= c")]
    InvalidMembershipParams { label: String, a: f64, b: f64, c: f64 },

    /// Variable name declared twice
    #[error("Variable {0} is already defined")]
    DuplicateVariable(String),

    /// Term label declared twice on the same variable
    #[error("Term {label} is already defined on {variable}")]
    DuplicateTerm { variable: String, label: String },

    /// Handle does not belong to this registry
    #[error("Unknown variable handle")]
    UnknownVariable,

    /// Rule references a variable or term that was never declared
    #[error("Rule references undeclared {variable}[{label}]")]
    DanglingReference { variable: String, label: String },

    /// Rule uses a variable in the wrong role
    #[error("Variable {variable} is used as {used_as} but declared as {declared}")]
    RoleMismatch {
        variable: String,
        used_as: &'static str,
        declared: &'static str,
    },
}

/// Errors detected while evaluating a single set of inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Required antecedent has no crisp value
    #[error("Missing input for {0}")]
    MissingInput(String),

    /// Crisp input is NaN or infinite
    #[error("Input {name} is not finite: {value}")]
    NonFiniteInput { name: String, value: f64 },

    /// Expression names a variable the context cannot resolve
    #[error("Unknown variable {0}")]
    UnknownVariable(String),

    /// Expression names a term the variable does not own
    #[error("Unknown term {label} on {variable}")]
    UnknownTerm { variable: String, label: String },

    /// Aggregated set for the output is zero everywhere
    #[error("No applicable rule for output {0}")]
    NoApplicableRule(String),
}
