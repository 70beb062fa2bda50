use thiserror::Error;

use crate::token::Token;

/// Runtime failures. The rendered messages are what programs observe as error values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: &'static str,
        operator: Token,
        right: &'static str,
    },
    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator {
        operator: Token,
        right: &'static str,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        operator: Token,
        right: &'static str,
    },
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    #[error("not a function: {0}")]
    NotAFunction(&'static str),
    #[error("unusable as hash key: {0}")]
    UnusableHashKey(&'static str),
    #[error("index operator not supported: {0}")]
    IndexNotSupported(&'static str),
    #[error("division by zero")]
    DivisionByZero,
    #[error("maximum call depth exceeded: {0}")]
    CallDepthExceeded(usize),
    #[error("wrong number of arguments: got={got}, want={want}")]
    WrongArgumentCount { got: usize, want: usize },
    #[error("argument to `{builtin}` not supported, got={got}")]
    UnsupportedArgument {
        builtin: &'static str,
        got: &'static str,
    },
    #[error("argument to `{builtin}` must be ARRAY, got={got}")]
    ExpectedArray {
        builtin: &'static str,
        got: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_errors_compare_by_value() {
        let mismatch = EvalError::TypeMismatch {
            left: "INTEGER",
            operator: Token::Plus,
            right: "BOOLEAN",
        };
        assert_eq!(mismatch.clone(), mismatch);
        assert_ne!(
            mismatch,
            EvalError::TypeMismatch {
                left: "INTEGER",
                operator: Token::Minus,
                right: "BOOLEAN",
            }
        );
    }

    #[test]
    fn messages() {
        let cases = vec![
            (
                EvalError::UnknownPrefixOperator {
                    operator: Token::Minus,
                    right: "STRING",
                },
                "unknown operator: -STRING",
            ),
            (
                EvalError::UnknownInfixOperator {
                    left: "BOOLEAN",
                    operator: Token::Lt,
                    right: "BOOLEAN",
                },
                "unknown operator: BOOLEAN < BOOLEAN",
            ),
            (EvalError::CallDepthExceeded(3), "maximum call depth exceeded: 3"),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }
}
