use std::{collections::HashMap, rc::Rc};

use lazy_static::lazy_static;

use super::{
    error::EvalError,
    object::{Builtin, BuiltinFunction, Object, NULL},
};

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, BuiltinFunction> = {
        let mut builtins: HashMap<&'static str, BuiltinFunction> = HashMap::new();
        builtins.insert("len", len_fn);
        builtins.insert("first", first_fn);
        builtins.insert("last", last_fn);
        builtins.insert("rest", rest_fn);
        builtins.insert("push", push_fn);
        builtins.insert("print", print_fn);
        builtins
    };
}

pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS
        .get_key_value(name)
        .map(|(name, function)| {
            Object::Builtin(Builtin {
                name: *name,
                function: *function,
            })
        })
}

fn check_arity(args: &[Object], want: usize) -> Result<(), EvalError> {
    if args.len() != want {
        return Err(EvalError::WrongArgumentCount {
            got: args.len(),
            want,
        });
    }
    Ok(())
}

fn array_argument<'a>(builtin: &'static str, arg: &'a Object) -> Result<&'a Rc<Vec<Object>>, EvalError> {
    match arg {
        Object::Array(elements) => Ok(elements),
        other => Err(EvalError::ExpectedArray {
            builtin,
            got: other.type_name(),
        }),
    }
}

fn len_fn(args: &[Object]) -> Result<Object, EvalError> {
    check_arity(args, 1)?;

    match &args[0] {
        Object::String(value) => Ok(Object::Integer(value.len() as i64)),
        Object::Array(elements) => Ok(Object::Integer(elements.len() as i64)),
        other => Err(EvalError::UnsupportedArgument {
            builtin: "len",
            got: other.type_name(),
        }),
    }
}

fn first_fn(args: &[Object]) -> Result<Object, EvalError> {
    check_arity(args, 1)?;
    let elements = array_argument("first", &args[0])?;
    Ok(elements.first().cloned().unwrap_or(NULL))
}

fn last_fn(args: &[Object]) -> Result<Object, EvalError> {
    check_arity(args, 1)?;
    let elements = array_argument("last", &args[0])?;
    Ok(elements.last().cloned().unwrap_or(NULL))
}

fn rest_fn(args: &[Object]) -> Result<Object, EvalError> {
    check_arity(args, 1)?;
    let elements = array_argument("rest", &args[0])?;
    if elements.is_empty() {
        return Ok(NULL);
    }
    Ok(Object::Array(Rc::new(elements[1..].to_vec())))
}

fn push_fn(args: &[Object]) -> Result<Object, EvalError> {
    check_arity(args, 2)?;
    let elements = array_argument("push", &args[0])?;
    let mut new_elements = Vec::with_capacity(elements.len() + 1);
    new_elements.extend(elements.iter().cloned());
    new_elements.push(args[1].clone());
    Ok(Object::Array(Rc::new(new_elements)))
}

fn print_fn(args: &[Object]) -> Result<Object, EvalError> {
    for arg in args {
        println!("{}", arg);
    }
    Ok(NULL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: Vec<Object>) -> Result<Object, EvalError> {
        match lookup(name) {
            Some(Object::Builtin(builtin)) => (builtin.function)(&args),
            other => panic!("expected builtin {name}, found {other:?}"),
        }
    }

    fn array(values: Vec<i64>) -> Object {
        Object::Array(Rc::new(values.into_iter().map(Object::Integer).collect()))
    }

    #[test]
    fn lookup_only_knows_the_fixed_table() {
        for name in ["len", "first", "last", "rest", "push", "print"] {
            assert!(lookup(name).is_some(), "missing builtin {name}");
        }
        assert!(lookup("puts").is_none());
    }

    #[test]
    fn push_does_not_mutate_its_input() {
        let original = array(vec![1, 2, 3, 4]);
        let pushed = call("push", vec![original.clone(), Object::Integer(5)]).unwrap();
        assert_eq!(original, array(vec![1, 2, 3, 4]));
        assert_eq!(pushed, array(vec![1, 2, 3, 4, 5]));
    }

    #[test]
    fn rest_does_not_mutate_its_input() {
        let original = array(vec![1, 2, 3]);
        let rest = call("rest", vec![original.clone()]).unwrap();
        assert_eq!(original, array(vec![1, 2, 3]));
        assert_eq!(rest, array(vec![2, 3]));
    }

    #[test]
    fn errors() {
        let cases = vec![
            ("len", vec![Object::Integer(1)], "argument to `len` not supported, got=INTEGER"),
            ("len", vec![], "wrong number of arguments: got=0, want=1"),
            ("first", vec![NULL], "argument to `first` must be ARRAY, got=NULL"),
            ("push", vec![array(vec![])], "wrong number of arguments: got=1, want=2"),
        ];
        for (name, args, expected) in cases {
            assert_eq!(call(name, args).unwrap_err().to_string(), expected);
        }
    }

    #[test]
    fn print_returns_null() {
        assert_eq!(call("print", vec![Object::Integer(1)]).unwrap(), NULL);
    }
}
