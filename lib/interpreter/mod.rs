mod builtins;
mod environment;
mod error;
mod evaluator;
mod object;

use anyhow::Result;
pub use environment::Environment;
pub use error::EvalError;
pub use evaluator::{eval, Evaluator, EvaluatorConfig};
pub use object::{Builtin, Function, HashKey, HashKeyType, HashPair, HashPairs, Object};

use crate::{parser, Engine};

pub fn new_engine() -> Box<dyn Engine> {
    new_engine_with_config(EvaluatorConfig::default())
}

pub fn new_engine_with_config(config: EvaluatorConfig) -> Box<dyn Engine> {
    Box::new(EngineImpl {
        evaluator: Evaluator::with_config(Environment::new(), config),
    })
}

struct EngineImpl {
    evaluator: Evaluator,
}

impl Engine for EngineImpl {
    fn run(&mut self, input: &str) -> Result<String> {
        let program = parser::parse(input)?;

        let result = self.evaluator.try_eval(&program)?;

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_persist_across_runs() {
        let mut engine = new_engine();
        assert_eq!(engine.run("let add = fn(a, b) { a + b };").unwrap(), "null");
        assert_eq!(engine.run("let x = add(1, 2);").unwrap(), "null");
        assert_eq!(engine.run("x * 2").unwrap(), "6");
    }

    #[test]
    fn parse_errors_are_not_evaluated() {
        let mut engine = new_engine();
        let err = engine.run("let x = 1; let = 2;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected next token to be IDENT, got = instead\nno prefix parse function for = found"
        );
        assert!(engine.run("x").is_err());
    }

    #[test]
    fn runtime_errors_are_reported_with_their_message() {
        let mut engine = new_engine();
        let err = engine.run("1 + true").unwrap_err();
        assert_eq!(err.to_string(), "type mismatch: INTEGER + BOOLEAN");
        assert_eq!(
            err.downcast_ref::<EvalError>(),
            Some(&EvalError::TypeMismatch {
                left: "INTEGER",
                operator: crate::token::Token::Plus,
                right: "BOOLEAN",
            })
        );
    }

    #[test]
    fn engine_recovers_after_runtime_error() {
        let mut engine = new_engine_with_config(EvaluatorConfig { max_call_depth: 20 });
        let err = engine.run("let loop = fn() { loop() }; loop()").unwrap_err();
        assert_eq!(err.to_string(), "maximum call depth exceeded: 20");
        assert_eq!(engine.run("let y = 3; y").unwrap(), "3");
    }

    #[test]
    fn renders_results() {
        let mut engine = new_engine();
        let cases = vec![
            (r#""Hello" + " " + "World""#, "Hello World"),
            ("[1, 2 * 2, true]", "[1, 4, true]"),
            (r#"{"a": 1}"#, "{a: 1}"),
            ("if (false) { 1 }", "null"),
            ("len", "builtin function"),
        ];
        for (input, expected) in cases {
            assert_eq!(engine.run(input).unwrap(), expected, "input: {input}");
        }
    }
}
