//! Reference Risk Model
//!
//! Three antecedents (temperature, current, voltage variation) and one
//! consequent (risk), with three or four triangular terms each and four rules.

use fuzzy_engine::{ConfigError, InferenceSystem, Rules, Variables};

use crate::config::ResolutionConfig;

pub const TEMPERATURE: &str = "temperature";
pub const CURRENT: &str = "current";
pub const VOLTAGE_VARIATION: &str = "voltage_variation";
pub const RISK: &str = "risk";

/// Build the reference system at the given resolution
pub fn build_system(resolution: &ResolutionConfig) -> Result<InferenceSystem, ConfigError> {
    let mut vars = Variables::new();

    // Temperature (°C)
    let temp = vars.antecedent(TEMPERATURE, 0.0, 150.0, resolution.temperature_step)?;
    vars.add_term(temp, "low", 0.0, 0.0, 50.0)?;
    vars.add_term(temp, "medium", 30.0, 75.0, 120.0)?;
    vars.add_term(temp, "high", 100.0, 150.0, 150.0)?;

    // Current (A)
    let current = vars.antecedent(CURRENT, 0.0, 500.0, resolution.current_step)?;
    vars.add_term(current, "low", 0.0, 0.0, 150.0)?;
    vars.add_term(current, "medium", 100.0, 250.0, 400.0)?;
    vars.add_term(current, "high", 350.0, 500.0, 500.0)?;

    // Voltage variation (%)
    let voltage = vars.antecedent(VOLTAGE_VARIATION, 0.0, 20.0, resolution.voltage_step)?;
    vars.add_term(voltage, "small", 0.0, 0.0, 7.0)?;
    vars.add_term(voltage, "medium", 5.0, 10.0, 15.0)?;
    vars.add_term(voltage, "large", 13.0, 20.0, 20.0)?;

    // Risk (%)
    let risk = vars.consequent(RISK, 0.0, 100.0, resolution.risk_step)?;
    vars.add_term(risk, "low", 0.0, 0.0, 30.0)?;
    vars.add_term(risk, "moderate", 20.0, 50.0, 70.0)?;
    vars.add_term(risk, "high", 60.0, 80.0, 90.0)?;
    vars.add_term(risk, "critical", 85.0, 100.0, 100.0)?;

    let mut rules = Rules::with_capacity(4);
    rules.add(
        temp.is("low").and(current.is("low")).and(voltage.is("small")),
        risk,
        "low",
    );
    rules.add(
        temp.is("medium").and(current.is("medium")).and(voltage.is("medium")),
        risk,
        "moderate",
    );
    rules.add(
        temp.is("high").or(current.is("high")).or(voltage.is("large")),
        risk,
        "high",
    );
    rules.add(
        temp.is("high").and(current.is("high")).and(voltage.is("large")),
        risk,
        "critical",
    );

    InferenceSystem::new(vars, rules)
}
