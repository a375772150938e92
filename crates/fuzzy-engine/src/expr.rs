//! Rule Expressions
//!
//! Antecedents are explicit trees: a leaf references one term of one
//! variable, inner nodes combine two subtrees with Zadeh AND (`min`) or
//! OR (`max`). Precedence is the shape of the tree.

use crate::context::EvaluationContext;
use crate::error::EvalError;
use crate::variable::VariableHandle;

/// Antecedent expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Degree of the input of a variable in one of its terms
    Is(VariableHandle, String),
    /// `min(left, right)`
    And(Box<Expr>, Box<Expr>),
    /// `max(left, right)`
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    /// Firing strength in `[0, 1]` for the inputs held by `ctx`
    pub fn strength(&self, ctx: &EvaluationContext<'_>) -> Result<f64, EvalError> {
        match self {
            Expr::Is(handle, label) => ctx.degree(*handle, label),
            Expr::And(left, right) => Ok(f64::min(left.strength(ctx)?, right.strength(ctx)?)),
            Expr::Or(left, right) => Ok(f64::max(left.strength(ctx)?, right.strength(ctx)?)),
        }
    }

    /// All term references in the tree, left to right
    pub fn propositions(&self) -> Vec<(VariableHandle, &str)> {
        fn walk<'e>(expr: &'e Expr, out: &mut Vec<(VariableHandle, &'e str)>) {
            match expr {
                Expr::Is(handle, label) => out.push((*handle, label.as_str())),
                Expr::And(left, right) | Expr::Or(left, right) => {
                    walk(left, out);
                    walk(right, out);
                }
            }
        }

        let mut props = Vec::new();
        walk(self, &mut props);
        props
    }
}

impl VariableHandle {
    /// Leaf expression: this variable is `label`
    pub fn is(self, label: &str) -> Expr {
        Expr::Is(self, label.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variables;
    use crate::Inputs;
    use proptest::prelude::*;

    struct Fixture {
        vars: Variables,
        x: VariableHandle,
        y: VariableHandle,
    }

    // Identity-shaped terms over [0, 1] so a crisp input is its own degree
    fn fixture() -> Fixture {
        let mut vars = Variables::new();
        let x = vars.antecedent("x", 0.0, 1.0, 0.01).unwrap();
        let y = vars.antecedent("y", 0.0, 1.0, 0.01).unwrap();
        vars.add_term(x, "up", 0.0, 1.0, 1.0).unwrap();
        vars.add_term(y, "up", 0.0, 1.0, 1.0).unwrap();
        Fixture { vars, x, y }
    }

    fn inputs(x: f64, y: f64) -> Inputs {
        Inputs::from_iter([("x", x), ("y", y)])
    }

    #[test]
    fn test_leaf_strength() {
        let f = fixture();
        let ins = inputs(0.3, 0.8);
        let ctx = EvaluationContext::new(&f.vars, &ins);
        assert!((f.x.is("up").strength(&ctx).unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_nested_tree_shape() {
        let f = fixture();
        let mut vars = f.vars.clone();
        let z = vars.antecedent("z", 0.0, 1.0, 0.01).unwrap();
        vars.add_term(z, "up", 0.0, 1.0, 1.0).unwrap();

        let mut ins = inputs(0.2, 0.9);
        ins.add("z", 0.5);
        let ctx = EvaluationContext::new(&vars, &ins);

        // (x AND y) OR z = max(min(.2, .9), .5)
        let left = f.x.is("up").and(f.y.is("up")).or(z.is("up"));
        // x AND (y OR z) = min(.2, max(.9, .5))
        let right = f.x.is("up").and(f.y.is("up").or(z.is("up")));

        assert!((left.strength(&ctx).unwrap() - 0.5).abs() < 1e-12);
        assert!((right.strength(&ctx).unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_term() {
        let f = fixture();
        let ins = inputs(0.3, 0.8);
        let ctx = EvaluationContext::new(&f.vars, &ins);
        assert_eq!(
            f.x.is("down").strength(&ctx),
            Err(EvalError::UnknownTerm {
                variable: "x".into(),
                label: "down".into(),
            })
        );
    }

    #[test]
    fn test_unknown_variable() {
        let f = fixture();
        let mut other = Variables::new();
        let foreign = other.antecedent("x", 0.0, 1.0, 0.1).unwrap();
        other.add_term(foreign, "up", 0.0, 1.0, 1.0).unwrap();
        let ins = inputs(0.3, 0.8);
        let ctx = EvaluationContext::new(&f.vars, &ins);
        assert!(matches!(
            foreign.is("up").strength(&ctx),
            Err(EvalError::UnknownVariable(_))
        ));
    }

    #[test]
    fn test_missing_input() {
        let f = fixture();
        let ins = Inputs::from_iter([("x", 0.5)]);
        let ctx = EvaluationContext::new(&f.vars, &ins);
        assert_eq!(
            f.x.is("up").and(f.y.is("up")).strength(&ctx),
            Err(EvalError::MissingInput("y".into()))
        );
    }

    #[test]
    fn test_propositions() {
        let f = fixture();
        let expr = f.x.is("up").and(f.y.is("up").or(f.x.is("up")));
        let props = expr.propositions();
        assert_eq!(props.len(), 3);
        assert_eq!(props[0], (f.x, "up"));
        assert_eq!(props[1], (f.y, "up"));
    }

    proptest! {
        #[test]
        fn prop_and_is_min_and_commutes(a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
            let f = fixture();
            let ins = inputs(a, b);
            let ctx = EvaluationContext::new(&f.vars, &ins);
            let l = f.x.is("up").strength(&ctx).unwrap();
            let r = f.y.is("up").strength(&ctx).unwrap();
            let lr = f.x.is("up").and(f.y.is("up")).strength(&ctx).unwrap();
            let rl = f.y.is("up").and(f.x.is("up")).strength(&ctx).unwrap();
            prop_assert_eq!(lr, l.min(r));
            prop_assert_eq!(lr, rl);
        }

        #[test]
        fn prop_or_is_max_and_commutes(a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
            let f = fixture();
            let ins = inputs(a, b);
            let ctx = EvaluationContext::new(&f.vars, &ins);
            let l = f.x.is("up").strength(&ctx).unwrap();
            let r = f.y.is("up").strength(&ctx).unwrap();
            let lr = f.x.is("up").or(f.y.is("up")).strength(&ctx).unwrap();
            let rl = f.y.is("up").or(f.x.is("up")).strength(&ctx).unwrap();
            prop_assert_eq!(lr, l.max(r));
            prop_assert_eq!(lr, rl);
        }
    }
}
