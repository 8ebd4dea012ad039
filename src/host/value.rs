use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::host::classify::TYPE_STR_UNDEFINED;
use crate::host::object::HostObjectType;
use crate::host::symbol::SymbolData;

/// A host language value. Objects are reference-typed; every other
/// variant is an immediate.
#[derive(Clone)]
pub enum HostValue {
    Undefined,
    Null,
    Boolean(bool),
    String(String),
    Symbol(SymbolData),
    Number(HostNumber),
    Object(HostObjectType),
}

impl Display for HostValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Undefined => f.write_str(TYPE_STR_UNDEFINED),
            HostValue::Null => f.write_str("null"),
            HostValue::Boolean(b) => write!(f, "bool({})", b),
            HostValue::String(s) => write!(f, "\"{}\"", s),
            HostValue::Symbol(s) => Display::fmt(s, f),
            HostValue::Number(n) => Display::fmt(n, f),
            HostValue::Object(o) => Display::fmt(&*(**o).borrow(), f),
        }
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Undefined => f.write_str("Undefined"),
            HostValue::Null => f.write_str("Null"),
            HostValue::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            HostValue::String(s) => f.debug_tuple("String").field(s).finish(),
            HostValue::Symbol(s) => write!(f, "Symbol({})", s.description()),
            HostValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            // Object graphs can be cyclic, so print the address instead
            // of recursing into the contents.
            HostValue::Object(o) => write!(f, "Object@{:p}", Rc::as_ptr(o)),
        }
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        use HostValue::*;
        match (self, other) {
            (Undefined, Undefined) | (Null, Null) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Symbol(a), Symbol(b)) => a == b,
            (Number(a), Number(b)) => a == b,
            // Objects compare by identity, never by contents.
            (Object(a), Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostNumber {
    Integer(i64),
    Float(f64),
}

impl Display for HostNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            HostNumber::Integer(i) => write!(f, "{}", i),
            HostNumber::Float(x) => write!(f, "{}", x),
        }
    }
}
