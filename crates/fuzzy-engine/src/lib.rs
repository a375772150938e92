//! Fuzzy Inference Engine
//!
//! Mamdani-style inference over linguistic variables:
//! - Triangular membership functions over discretized universes
//! - Rule antecedents as explicit AND (`min`) / OR (`max`) trees
//! - Implication by clipping, aggregation by pointwise `max`
//! - Centroid (and alternative) defuzzification
//!
//! ```
//! use fuzzy_engine::{InferenceSystem, Inputs, Rules, Variables};
//!
//! let mut vars = Variables::new();
//! let temp = vars.antecedent("temperature", 0.0, 150.0, 1.0)?;
//! vars.add_term(temp, "high", 100.0, 150.0, 150.0)?;
//! let risk = vars.consequent("risk", 0.0, 100.0, 1.0)?;
//! vars.add_term(risk, "high", 60.0, 80.0, 90.0)?;
//!
//! let mut rules = Rules::new();
//! rules.add(temp.is("high"), risk, "high");
//! let system = InferenceSystem::new(vars, rules)?;
//!
//! let outputs = system.evaluate(&Inputs::from_iter([("temperature", 125.0)]))?;
//! assert!(outputs["risk"] > 60.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod aggregate;
mod context;
mod defuzz;
mod error;
mod expr;
mod inference;
mod inputs;
mod membership;
mod rule;
mod universe;
mod variable;

pub use aggregate::AggregatedSet;
pub use context::EvaluationContext;
pub use defuzz::DefuzzMethod;
pub use error::{ConfigError, EvalError};
pub use expr::Expr;
pub use inference::{Inference, InferenceSystem};
pub use inputs::Inputs;
pub use membership::MembershipFunction;
pub use rule::{Rule, Rules};
pub use universe::{Samples, Universe, MAX_SAMPLES};
pub use variable::{LinguisticVariable, Role, Term, TermSeries, VariableHandle, VariableKey, Variables};
