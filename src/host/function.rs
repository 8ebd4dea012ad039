//! Callable host values.

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::error::HostError;
use crate::host::object::{HostObjectType, ObjectBase, ObjectType};
use crate::host::value::HostValue;

/// Function signature for native functions.
pub type NativeFn = fn(args: Vec<HostValue>) -> Result<HostValue, HostError>;

/// The body of a function object.
pub enum Callable {
    /// Direct function pointer.
    Native(NativeFn),
    /// Closure with captured state.
    Boxed(Rc<dyn Fn(Vec<HostValue>) -> Result<HostValue, HostError>>),
}
impl Clone for Callable {
    fn clone(&self) -> Self {
        match self {
            Callable::Native(f) => Callable::Native(*f),
            Callable::Boxed(f) => Callable::Boxed(f.clone()),
        }
    }
}
impl Callable {
    pub fn call(&self, args: Vec<HostValue>) -> Result<HostValue, HostError> {
        match self {
            Callable::Native(f) => f(args),
            Callable::Boxed(f) => f(args),
        }
    }
}

/// A callable body plus its own property map, so values like an `amd`
/// marker or a `prototype` object can hang off the function itself.
pub struct FunctionObject {
    name: String,
    base: ObjectBase,
    callable: Callable,
}

impl FunctionObject {
    pub fn native(name: impl Into<String>, f: NativeFn) -> Self {
        FunctionObject {
            name: name.into(),
            base: ObjectBase::new(),
            callable: Callable::Native(f),
        }
    }

    pub fn from_closure<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Vec<HostValue>) -> Result<HostValue, HostError> + 'static,
    {
        FunctionObject {
            name: name.into(),
            base: ObjectBase::new(),
            callable: Callable::Boxed(Rc::new(f)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> &ObjectBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    /// The body, cloned out so callers can drop their borrow of the
    /// function object before invoking it.
    pub fn callable(&self) -> Callable {
        self.callable.clone()
    }
}

pub fn new_native_function(name: impl Into<String>, f: NativeFn) -> HostObjectType {
    Rc::new(RefCell::new(ObjectType::Function(FunctionObject::native(
        name, f,
    ))))
}

pub fn new_closure_function<F>(name: impl Into<String>, f: F) -> HostObjectType
where
    F: Fn(Vec<HostValue>) -> Result<HostValue, HostError> + 'static,
{
    Rc::new(RefCell::new(ObjectType::Function(
        FunctionObject::from_closure(name, f),
    )))
}
