// Evaluation engine for the expression language

use crate::diagnostics::Diagnostics;
use crate::interpreter::environment::Environment;
use crate::interpreter::errors::{RuntimeWarning, StatementError};
use crate::parser::ast::{AstNode, BinOp};
use crate::parser::parse::{ParseError, Parser};

/// Tree-walking evaluator over a borrowed environment.
///
/// Warnings are logged as they happen and also kept, in order, for the
/// caller to inspect.
pub struct Evaluator<'env> {
    env: &'env mut Environment,
    warnings: Vec<RuntimeWarning>,
}

impl<'env> Evaluator<'env> {
    pub fn new(env: &'env mut Environment) -> Self {
        Self {
            env,
            warnings: Vec::new(),
        }
    }

    /// Evaluate `node`, applying any assignment to the environment.
    ///
    /// Binary operands are evaluated left before right; an assignment nested
    /// in the left operand is visible to the right one.
    pub fn evaluate(&mut self, node: &AstNode) -> f64 {
        match node {
            AstNode::Number(value) => *value,

            AstNode::Variable(name) => match self.env.get(name) {
                Some(value) => value,
                None => {
                    self.report(RuntimeWarning::UndefinedVariable { name: name.clone() });
                    0.0
                }
            },

            AstNode::BinaryOp { op, left, right } => {
                let left = self.evaluate(left);
                let right = self.evaluate(right);
                self.apply_binary(*op, left, right)
            }

            AstNode::Assignment { name, value } => {
                let value = self.evaluate(value);
                self.env.set(name, value);
                tracing::debug!(%name, value, "assigned");
                value
            }
        }
    }

    fn apply_binary(&mut self, op: BinOp, left: f64, right: f64) -> f64 {
        match op {
            BinOp::Add => left + right,
            BinOp::Sub => left - right,
            BinOp::Mul => left * right,
            BinOp::Div => {
                if right == 0.0 {
                    self.report(RuntimeWarning::DivisionByZero);
                    0.0
                } else {
                    left / right
                }
            }
        }
    }

    fn report(&mut self, warning: RuntimeWarning) {
        tracing::warn!(%warning, "evaluation continued with 0");
        self.warnings.push(warning);
    }

    pub fn into_warnings(self) -> Vec<RuntimeWarning> {
        self.warnings
    }
}

/// Evaluate `node` against `env`. Warnings are only logged.
pub fn evaluate(node: &AstNode, env: &mut Environment) -> f64 {
    Evaluator::new(env).evaluate(node)
}

/// Evaluate `node` against `env`, also returning the warnings raised.
pub fn evaluate_with_warnings(
    node: &AstNode,
    env: &mut Environment,
) -> (f64, Vec<RuntimeWarning>) {
    let mut evaluator = Evaluator::new(env);
    let value = evaluator.evaluate(node);
    (value, evaluator.into_warnings())
}

/// Parse and evaluate one statement in a fresh, throwaway environment
pub fn parse_and_evaluate(input: &str) -> Result<f64, ParseError> {
    let ast = Parser::new(input).parse()?;
    let mut env = Environment::new();
    Ok(evaluate(&ast, &mut env))
}

/// Result of running one statement in an [`Interpreter`]
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub value: f64,
    pub ast: AstNode,
    pub diagnostics: Diagnostics,
}

/// An interpreter session.
///
/// Owns the environment, so variables assigned by one statement are visible
/// to the next. A statement that fails to parse leaves the environment as it
/// was.
#[derive(Debug, Default)]
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with pre-populated variables
    pub fn with_environment(env: Environment) -> Self {
        Self { env }
    }

    /// Parse and evaluate one statement
    pub fn run(&mut self, source: &str) -> Result<Outcome, StatementError> {
        let mut parser = Parser::new(source);
        let ast = match parser.parse() {
            Ok(ast) => ast,
            Err(error) => {
                tracing::debug!(%error, "statement rejected");
                return Err(StatementError {
                    error,
                    diagnostics: Diagnostics {
                        lex_errors: parser.take_lex_errors(),
                        warnings: Vec::new(),
                    },
                });
            }
        };

        let lex_errors = parser.take_lex_errors();
        let (value, warnings) = evaluate_with_warnings(&ast, &mut self.env);

        Ok(Outcome {
            value,
            ast,
            diagnostics: Diagnostics {
                lex_errors,
                warnings,
            },
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn get_variable(&self, name: &str) -> Option<f64> {
        self.env.get(name)
    }

    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.env.set(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse;

    fn eval_fresh(source: &str) -> (f64, Vec<RuntimeWarning>) {
        let ast = parse(source).unwrap();
        let mut env = Environment::new();
        evaluate_with_warnings(&ast, &mut env)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(parse_and_evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(parse_and_evaluate("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(parse_and_evaluate("10 - 2 - 3").unwrap(), 5.0);
        assert_eq!(parse_and_evaluate("100 / 5 / 2").unwrap(), 10.0);
        assert_eq!(parse_and_evaluate("-3 + 5").unwrap(), 2.0);
        assert_eq!(parse_and_evaluate("7 / 2").unwrap(), 3.5);
    }

    #[test]
    fn test_division_by_zero_warns() {
        let (value, warnings) = eval_fresh("5 / 0");
        assert_eq!(value, 0.0);
        assert_eq!(warnings, vec![RuntimeWarning::DivisionByZero]);
    }

    #[test]
    fn test_division_by_zero_substitutes_only_that_node() {
        let (value, warnings) = eval_fresh("1 + 5 / (2 - 2)");
        assert_eq!(value, 1.0);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_undefined_variable_warns() {
        let (value, warnings) = eval_fresh("y + 1");
        assert_eq!(value, 1.0);
        assert_eq!(
            warnings,
            vec![RuntimeWarning::UndefinedVariable {
                name: "y".to_string()
            }]
        );
    }

    #[test]
    fn test_undefined_variable_not_materialized() {
        let ast = parse("ghost * 2").unwrap();
        let mut env = Environment::new();
        evaluate(&ast, &mut env);
        assert!(!env.contains("ghost"));
    }

    #[test]
    fn test_assignment_returns_and_stores_value() {
        let ast = parse("x = 2 * 21").unwrap();
        let mut env = Environment::new();

        assert_eq!(evaluate(&ast, &mut env), 42.0);
        assert_eq!(env.get("x"), Some(42.0));
    }

    #[test]
    fn test_left_operand_evaluated_first() {
        // The nested assignment only exists in the AST; the grammar cannot
        // produce it, but evaluation order is still observable through it.
        let ast = AstNode::binary(
            BinOp::Add,
            AstNode::assignment("a", AstNode::Number(3.0)),
            AstNode::Variable("a".to_string()),
        );
        let mut env = Environment::new();
        let (value, warnings) = evaluate_with_warnings(&ast, &mut env);

        assert_eq!(value, 6.0);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_warnings_in_evaluation_order() {
        let (_, warnings) = eval_fresh("a / 0 + b");
        assert_eq!(
            warnings,
            vec![
                RuntimeWarning::UndefinedVariable {
                    name: "a".to_string()
                },
                RuntimeWarning::DivisionByZero,
                RuntimeWarning::UndefinedVariable {
                    name: "b".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_session_persists_variables() {
        let mut interpreter = Interpreter::new();

        assert_eq!(interpreter.run("x = 5").unwrap().value, 5.0);
        assert_eq!(interpreter.run("x + 1").unwrap().value, 6.0);
        assert_eq!(interpreter.run("x = x * 2;").unwrap().value, 10.0);
        assert_eq!(interpreter.get_variable("x"), Some(10.0));
    }

    #[test]
    fn test_failed_parse_leaves_environment_untouched() {
        let mut interpreter = Interpreter::new();
        interpreter.run("x = 5").unwrap();

        assert!(interpreter.run("x = 2 +").is_err());
        assert!(interpreter.run("*3").is_err());
        assert_eq!(interpreter.get_variable("x"), Some(5.0));
        assert_eq!(interpreter.environment().len(), 1);
    }

    #[test]
    fn test_rejected_statement_keeps_lex_errors() {
        let mut interpreter = Interpreter::new();
        let err = interpreter.run("2 + $").unwrap_err();

        assert!(matches!(err.error, ParseError::ExpectedFactor { .. }));
        assert_eq!(err.diagnostics.lex_errors.len(), 1);
        assert_eq!(err.diagnostics.lex_errors[0].character, '$');
        assert!(err.diagnostics.warnings.is_empty());
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 6: expected a number, identifier, '(' or unary operator, found end of input"
        );
    }

    #[test]
    fn test_long_chain_is_rejected_not_overflowed() {
        let source = format!("total = 1{}", " + 1".repeat(100_000));
        let mut interpreter = Interpreter::new();

        let err = interpreter.run(&source).unwrap_err();
        assert!(matches!(err.error, ParseError::TreeTooTall { .. }));
        assert!(parse_and_evaluate(&source).is_err());
        assert_eq!(interpreter.get_variable("total"), None);
    }

    #[test]
    fn test_tallest_accepted_chain_evaluates() {
        use crate::parser::constants::MAX_TREE_HEIGHT;

        let source = format!("1{}", " + 1".repeat(MAX_TREE_HEIGHT - 1));
        assert_eq!(parse_and_evaluate(&source).unwrap(), MAX_TREE_HEIGHT as f64);
    }

    #[test]
    fn test_trailing_statement_not_run() {
        let mut interpreter = Interpreter::new();

        assert_eq!(interpreter.run("x = 1; y = 2").unwrap().value, 1.0);
        assert_eq!(interpreter.get_variable("x"), Some(1.0));
        assert_eq!(interpreter.get_variable("y"), None);
        assert_eq!(parse_and_evaluate("1.2.3").unwrap(), 1.2);
    }

    #[test]
    fn test_outcome_carries_diagnostics() {
        let mut interpreter = Interpreter::new();
        let outcome = interpreter.run("z = 4 $ / 0").unwrap();

        assert_eq!(outcome.value, 0.0);
        assert_eq!(outcome.diagnostics.lex_errors.len(), 1);
        assert_eq!(outcome.diagnostics.warnings, vec![RuntimeWarning::DivisionByZero]);
        assert_eq!(interpreter.get_variable("z"), Some(0.0));
    }

    #[test]
    fn test_preset_variables() {
        let mut env = Environment::new();
        env.set("pi", 3.5);
        let mut interpreter = Interpreter::with_environment(env);
        interpreter.set_variable("r", 2.0);

        assert_eq!(interpreter.run("pi * r * r").unwrap().value, 14.0);
    }

    #[test]
    fn test_parse_and_evaluate_does_not_persist() {
        assert_eq!(parse_and_evaluate("q = 3").unwrap(), 3.0);
        assert_eq!(parse_and_evaluate("q").unwrap(), 0.0);
    }
}
