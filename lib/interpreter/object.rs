use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::ast::BlockStatement;

use super::{environment::Environment, error::EvalError};

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

pub type BuiltinFunction = fn(&[Object]) -> Result<Object, EvalError>;

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    Array(Rc<Vec<Object>>),
    Hash(Rc<HashPairs>),
    Function(Rc<Function>),
    Builtin(Builtin),
    /// Carries a `return` out of nested blocks; unwrapped at call and program boundaries.
    ReturnValue(Box<Object>),
    Error(String),
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::String(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
        }
    }

    /// Structural key for hash storage. Only integers, booleans and strings are hashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey {
                object_type: HashKeyType::Integer,
                value: *value as u64,
            }),
            Object::Boolean(value) => Some(HashKey {
                object_type: HashKeyType::Boolean,
                value: u64::from(*value),
            }),
            Object::String(value) => Some(HashKey {
                object_type: HashKeyType::String,
                value: fnv1a(value.as_bytes()),
            }),
            _ => None,
        }
    }
}

// Rust-level equality used by tests and hash pair comparison. Functions compare by
// identity so cyclic closure environments are never walked.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(left), Object::Integer(right)) => left == right,
            (Object::Boolean(left), Object::Boolean(right)) => left == right,
            (Object::Null, Object::Null) => true,
            (Object::String(left), Object::String(right)) => left == right,
            (Object::Array(left), Object::Array(right)) => left == right,
            (Object::Hash(left), Object::Hash(right)) => left == right,
            (Object::Function(left), Object::Function(right)) => Rc::ptr_eq(left, right),
            (Object::Builtin(left), Object::Builtin(right)) => left.name == right.name,
            (Object::ReturnValue(left), Object::ReturnValue(right)) => left == right,
            (Object::Error(left), Object::Error(right)) => left == right,
            _ => false,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::String(value) => write!(f, "{}", value),
            Object::Array(elements) => {
                let elements: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Object::Hash(pairs) => {
                let pairs = pairs
                    .iter()
                    .map(|pair| format!("{}: {}", pair.key, pair.value))
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{{{}}}", pairs)
            }
            Object::Function(function) => write!(
                f,
                "fn({}) {{\n{}\n}}",
                function.parameters.join(", "),
                function.body
            ),
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

pub struct Function {
    pub parameters: Rc<[String]>,
    pub body: Rc<BlockStatement>,
    pub env: Rc<RefCell<Environment>>,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub function: BuiltinFunction,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKeyType {
    Integer,
    Boolean,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub object_type: HashKeyType,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// Hash entries in insertion order. Re-inserting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashPairs {
    pairs: Vec<HashPair>,
    positions: HashMap<HashKey, usize>,
}

impl HashPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: HashKey, pair: HashPair) {
        match self.positions.get(&key) {
            Some(&position) => self.pairs[position] = pair,
            None => {
                self.positions.insert(key, self.pairs.len());
                self.pairs.push(pair);
            }
        }
    }

    pub fn get(&self, key: &HashKey) -> Option<&HashPair> {
        self.positions.get(key).map(|&position| &self.pairs[position])
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HashPair> {
        self.pairs.iter()
    }
}

// 64-bit FNV-1a
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
    })
}
