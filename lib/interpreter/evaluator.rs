use std::{cell::RefCell, rc::Rc};

use log::{debug, trace};

use crate::{
    ast::{BlockStatement, Expression, Program, Statement},
    stack::ensure_sufficient_stack,
    token::Token,
};

use super::{
    builtins,
    environment::Environment,
    error::EvalError,
    object::{Function, HashPair, HashPairs, Object, FALSE, NULL, TRUE},
};

type Result<T> = std::result::Result<T, EvalError>;

// Evaluates a sub-expression. A pending `return` from an `if` arm is handed
// straight back to the enclosing statement instead of being used as a value.
macro_rules! operand {
    ($evaluator:ident, $expression:expr) => {
        match $evaluator.eval_expression($expression)? {
            pending @ Object::ReturnValue(_) => return Ok(pending),
            value => value,
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Nested user function calls allowed before evaluation fails.
    pub max_call_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_call_depth: 10_000,
        }
    }
}

/// Evaluates `program` against `env`, turning a failure into an `Object::Error`.
pub fn eval(program: &Program, env: &Rc<RefCell<Environment>>) -> Object {
    Evaluator::new(env.clone()).eval(program)
}

pub struct Evaluator {
    env: Rc<RefCell<Environment>>,
    config: EvaluatorConfig,
    depth: usize,
}

impl Evaluator {
    pub fn new(env: Rc<RefCell<Environment>>) -> Self {
        Self::with_config(env, EvaluatorConfig::default())
    }

    pub fn with_config(env: Rc<RefCell<Environment>>, config: EvaluatorConfig) -> Self {
        Self {
            env,
            config,
            depth: 0,
        }
    }

    pub fn eval(&mut self, program: &Program) -> Object {
        match self.try_eval(program) {
            Ok(object) => object,
            Err(err) => Object::Error(err.to_string()),
        }
    }

    /// Like [`Evaluator::eval`] but keeps the failure typed.
    pub fn try_eval(&mut self, program: &Program) -> Result<Object> {
        debug!("evaluating {} statements", program.statements.len());
        let mut result = NULL;
        for statement in &program.statements {
            result = match self.eval_statement(statement) {
                Ok(Object::ReturnValue(value)) => return Ok(*value),
                Ok(object) => object,
                Err(err) => {
                    debug!("evaluation failed: {}", err);
                    return Err(err);
                }
            };
        }
        Ok(result)
    }

    fn eval_statement(&mut self, statement: &Statement) -> Result<Object> {
        match statement {
            Statement::Expression(expression) => self.eval_expression(expression),
            Statement::Return(expression) => {
                let value = operand!(self, expression);
                Ok(Object::ReturnValue(Box::new(value)))
            }
            Statement::Let { name, value } => {
                let value = operand!(self, value);
                self.env.borrow_mut().set(name, value);
                Ok(NULL)
            }
        }
    }

    fn eval_block_statement(&mut self, block: &BlockStatement) -> Result<Object> {
        let mut result = NULL;
        for statement in &block.statements {
            result = self.eval_statement(statement)?;
            if let Object::ReturnValue(_) = result {
                return Ok(result);
            }
        }
        Ok(result)
    }

    fn eval_expression(&mut self, expression: &Expression) -> Result<Object> {
        ensure_sufficient_stack(|| match expression {
            Expression::IntegerLiteral(value) => Ok(Object::Integer(*value)),
            Expression::StringLiteral(value) => Ok(Object::String(value.clone())),
            Expression::BooleanLiteral(value) => Ok(native_bool_to_boolean_object(*value)),
            Expression::Prefix { operator, right } => {
                let right = operand!(self, right);
                eval_prefix_expression(operator, right)
            }
            Expression::Infix {
                left,
                operator,
                right,
            } => {
                let left = operand!(self, left);
                let right = operand!(self, right);
                eval_infix_expression(left, operator, right)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
            } => self.eval_if_expression(condition, consequence, alternative.as_ref()),
            Expression::Identifier(name) => self.eval_identifier(name),
            Expression::FunctionLiteral { parameters, body } => {
                Ok(Object::Function(Rc::new(Function {
                    parameters: parameters.clone(),
                    body: body.clone(),
                    env: self.env.clone(),
                })))
            }
            Expression::Call {
                function,
                arguments,
            } => {
                let function = operand!(self, function);
                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(operand!(self, argument));
                }
                self.apply_function(function, values)
            }
            Expression::ArrayLiteral(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(operand!(self, element));
                }
                Ok(Object::Array(Rc::new(values)))
            }
            Expression::HashLiteral(pairs) => self.eval_hash_literal(pairs),
            Expression::Index { left, index } => {
                let left = operand!(self, left);
                let index = operand!(self, index);
                eval_index_expression(left, index)
            }
        })
    }

    fn eval_if_expression(
        &mut self,
        condition: &Expression,
        consequence: &BlockStatement,
        alternative: Option<&BlockStatement>,
    ) -> Result<Object> {
        let condition = operand!(self, condition);
        if is_truthy(&condition) {
            self.eval_block_statement(consequence)
        } else if let Some(alternative) = alternative {
            self.eval_block_statement(alternative)
        } else {
            Ok(NULL)
        }
    }

    fn eval_identifier(&mut self, name: &str) -> Result<Object> {
        if let Some(value) = self.env.borrow().get(name) {
            return Ok(value);
        }
        builtins::lookup(name).ok_or_else(|| EvalError::IdentifierNotFound(name.to_string()))
    }

    fn apply_function(&mut self, function: Object, arguments: Vec<Object>) -> Result<Object> {
        match function {
            Object::Function(function) => {
                if self.depth >= self.config.max_call_depth {
                    return Err(EvalError::CallDepthExceeded(self.config.max_call_depth));
                }

                // Missing arguments leave their parameters unbound; extra ones are ignored.
                let call_env = Environment::new_enclosed(function.env.clone());
                {
                    let mut call_env = call_env.borrow_mut();
                    for (parameter, argument) in function.parameters.iter().zip(arguments) {
                        call_env.set(parameter, argument);
                    }
                }

                self.depth += 1;
                trace!("call depth {}", self.depth);
                let caller_env = std::mem::replace(&mut self.env, call_env);
                let result = self.eval_block_statement(&function.body);
                self.env = caller_env;
                self.depth -= 1;

                match result? {
                    Object::ReturnValue(value) => Ok(*value),
                    object => Ok(object),
                }
            }
            Object::Builtin(builtin) => {
                trace!("calling builtin {}", builtin.name);
                (builtin.function)(&arguments)
            }
            other => Err(EvalError::NotAFunction(other.type_name())),
        }
    }

    fn eval_hash_literal(&mut self, pairs: &[(Expression, Expression)]) -> Result<Object> {
        let mut hash = HashPairs::new();
        for (key, value) in pairs {
            let key = operand!(self, key);
            let hash_key = key
                .hash_key()
                .ok_or(EvalError::UnusableHashKey(key.type_name()))?;
            let value = operand!(self, value);
            hash.insert(hash_key, HashPair { key, value });
        }
        Ok(Object::Hash(Rc::new(hash)))
    }
}

fn eval_prefix_expression(operator: &Token, right: Object) -> Result<Object> {
    match operator {
        Token::Bang => Ok(eval_bang_operator_expression(&right)),
        Token::Minus => eval_minus_prefix_operator_expression(right),
        _ => Err(EvalError::UnknownPrefixOperator {
            operator: operator.clone(),
            right: right.type_name(),
        }),
    }
}

fn eval_bang_operator_expression(right: &Object) -> Object {
    match right {
        Object::Boolean(true) => FALSE,
        Object::Boolean(false) => TRUE,
        Object::Null => TRUE,
        _ => FALSE,
    }
}

fn eval_minus_prefix_operator_expression(right: Object) -> Result<Object> {
    match right {
        Object::Integer(value) => Ok(Object::Integer(value.wrapping_neg())),
        other => Err(EvalError::UnknownPrefixOperator {
            operator: Token::Minus,
            right: other.type_name(),
        }),
    }
}

fn eval_infix_expression(left: Object, operator: &Token, right: Object) -> Result<Object> {
    match (&left, &right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_expression(*left, operator, *right)
        }
        (Object::String(left), Object::String(right)) => {
            eval_string_infix_expression(left, operator, right)
        }
        _ => match operator {
            Token::Eq => Ok(native_bool_to_boolean_object(is_identical(&left, &right))),
            Token::NotEq => Ok(native_bool_to_boolean_object(!is_identical(&left, &right))),
            _ if left.type_name() != right.type_name() => Err(EvalError::TypeMismatch {
                left: left.type_name(),
                operator: operator.clone(),
                right: right.type_name(),
            }),
            _ => Err(EvalError::UnknownInfixOperator {
                left: left.type_name(),
                operator: operator.clone(),
                right: right.type_name(),
            }),
        },
    }
}

fn eval_integer_infix_expression(left: i64, operator: &Token, right: i64) -> Result<Object> {
    match operator {
        Token::Plus => Ok(Object::Integer(left.wrapping_add(right))),
        Token::Minus => Ok(Object::Integer(left.wrapping_sub(right))),
        Token::Asterisk => Ok(Object::Integer(left.wrapping_mul(right))),
        Token::Slash => {
            if right == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Object::Integer(left.wrapping_div(right)))
        }
        Token::Lt => Ok(native_bool_to_boolean_object(left < right)),
        Token::Gt => Ok(native_bool_to_boolean_object(left > right)),
        Token::Eq => Ok(native_bool_to_boolean_object(left == right)),
        Token::NotEq => Ok(native_bool_to_boolean_object(left != right)),
        _ => Err(EvalError::UnknownInfixOperator {
            left: "INTEGER",
            operator: operator.clone(),
            right: "INTEGER",
        }),
    }
}

fn eval_string_infix_expression(left: &str, operator: &Token, right: &str) -> Result<Object> {
    match operator {
        Token::Plus => Ok(Object::String(format!("{}{}", left, right))),
        Token::Lt => Ok(native_bool_to_boolean_object(left < right)),
        Token::Gt => Ok(native_bool_to_boolean_object(left > right)),
        Token::Eq => Ok(native_bool_to_boolean_object(left == right)),
        Token::NotEq => Ok(native_bool_to_boolean_object(left != right)),
        _ => Err(EvalError::UnknownInfixOperator {
            left: "STRING",
            operator: operator.clone(),
            right: "STRING",
        }),
    }
}

fn eval_index_expression(left: Object, index: Object) -> Result<Object> {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(index)) => Ok(usize::try_from(*index)
            .ok()
            .and_then(|index| elements.get(index))
            .cloned()
            .unwrap_or(NULL)),
        (Object::Hash(pairs), _) => {
            let key = index
                .hash_key()
                .ok_or(EvalError::UnusableHashKey(index.type_name()))?;
            Ok(pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(NULL))
        }
        _ => Err(EvalError::IndexNotSupported(left.type_name())),
    }
}

/// Reference equality for operands that are not both integers or both strings.
fn is_identical(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(left), Object::Boolean(right)) => left == right,
        (Object::Null, Object::Null) => true,
        (Object::Array(left), Object::Array(right)) => Rc::ptr_eq(left, right),
        (Object::Hash(left), Object::Hash(right)) => Rc::ptr_eq(left, right),
        (Object::Function(left), Object::Function(right)) => Rc::ptr_eq(left, right),
        (Object::Builtin(left), Object::Builtin(right)) => left.name == right.name,
        _ => false,
    }
}

fn is_truthy(object: &Object) -> bool {
    !matches!(object, Object::Null | Object::Boolean(false))
}

fn native_bool_to_boolean_object(input: bool) -> Object {
    if input {
        TRUE
    } else {
        FALSE
    }
}
