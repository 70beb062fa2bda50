use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use super::object::Object;

/// One lexical scope. Function calls enclose the scope the function was defined in,
/// not the caller's.
#[derive(Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Environment::default()))
    }

    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => match &self.outer {
                Some(outer) => outer.borrow().get(name),
                None => None,
            },
        }
    }

    /// Binds `name` in this scope only, shadowing any outer binding.
    pub fn set(&mut self, name: &str, value: Object) {
        self.store.insert(name.to_string(), value);
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<&String> = self.store.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("enclosed", &self.outer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outward() {
        let global = Environment::new();
        global.borrow_mut().set("a", Object::Integer(1));
        global.borrow_mut().set("b", Object::Integer(2));

        let local = Environment::new_enclosed(global.clone());
        local.borrow_mut().set("b", Object::Integer(20));

        assert_eq!(local.borrow().get("a"), Some(Object::Integer(1)));
        assert_eq!(local.borrow().get("b"), Some(Object::Integer(20)));
        assert_eq!(global.borrow().get("b"), Some(Object::Integer(2)));
        assert_eq!(local.borrow().get("c"), None);
    }

    #[test]
    fn set_overwrites_locally() {
        let env = Environment::new();
        env.borrow_mut().set("x", Object::Integer(1));
        env.borrow_mut().set("x", Object::String("one".to_string()));
        assert_eq!(env.borrow().get("x"), Some(Object::String("one".to_string())));
    }

    #[test]
    fn outer_bindings_are_visible_after_later_writes() {
        let global = Environment::new();
        let local = Environment::new_enclosed(global.clone());
        global.borrow_mut().set("late", Object::Boolean(true));
        assert_eq!(local.borrow().get("late"), Some(Object::Boolean(true)));
    }
}
