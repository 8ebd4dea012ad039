use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::host::function::FunctionObject;
use crate::host::value::HostValue;

pub type HostObjectType = Rc<RefCell<ObjectType>>;

pub enum ObjectType {
    Ordinary(PlainObject),
    Function(FunctionObject),
    Array(ArrayObject),
    Element(ElementObject),
}
impl ObjectType {
    pub fn is_callable(&self) -> bool {
        match self {
            ObjectType::Function(_) => true,
            _ => false,
        }
    }

    pub fn as_base(&self) -> Option<&ObjectBase> {
        match self {
            ObjectType::Ordinary(o) => Some(o.base()),
            ObjectType::Function(o) => Some(o.base()),
            ObjectType::Array(_) => None,
            ObjectType::Element(_) => None,
        }
    }

    pub fn as_base_mut(&mut self) -> Option<&mut ObjectBase> {
        match self {
            ObjectType::Ordinary(o) => Some(o.base_mut()),
            ObjectType::Function(o) => Some(o.base_mut()),
            ObjectType::Array(_) => None,
            ObjectType::Element(_) => None,
        }
    }
}
impl Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ObjectType::Ordinary(_) => write!(f, "[object Object]"),
            ObjectType::Function(o) => write!(f, "function {}() {{ [native code] }}", o.name()),
            ObjectType::Array(o) => write!(f, "[array({})]", o.elements.len()),
            ObjectType::Element(o) => write!(f, "[element {}]", o.kind),
        }
    }
}

pub struct ObjectBase {
    properties: HashMap<String, HostValue>,
}
impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&HostValue> {
        self.properties.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: HostValue) {
        self.properties.insert(key.into(), value);
    }

    pub fn has(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    // Sorted so that callers iterating properties stay deterministic.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.properties.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }
}

pub struct PlainObject {
    base: ObjectBase,
}
impl PlainObject {
    pub fn new() -> Self {
        PlainObject {
            base: ObjectBase::new(),
        }
    }

    pub fn base(&self) -> &ObjectBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }
}

pub struct ArrayObject {
    pub elements: Vec<HostValue>,
}

pub struct ElementObject {
    pub kind: ElementKind,
    pub props: HostValue,
    pub children: Vec<HostValue>,
}

pub enum ElementKind {
    /// Intrinsic tag, e.g. `div` or `h3`.
    Tag(String),
    /// A component value invoked by the host renderer.
    Component(HostValue),
}
impl Display for ElementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Tag(t) => write!(f, "{}", t),
            ElementKind::Component(_) => write!(f, "component"),
        }
    }
}

pub fn new_ordinary_object() -> HostObjectType {
    Rc::new(RefCell::new(ObjectType::Ordinary(PlainObject::new())))
}

pub fn new_array_object(elements: Vec<HostValue>) -> HostObjectType {
    Rc::new(RefCell::new(ObjectType::Array(ArrayObject { elements })))
}

pub fn new_element_object(element: ElementObject) -> HostObjectType {
    Rc::new(RefCell::new(ObjectType::Element(element)))
}
