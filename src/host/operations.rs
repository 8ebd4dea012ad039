use crate::host::classify::get_type;
use crate::host::error::HostError;
use crate::host::function::Callable;
use crate::host::object::{ElementKind, HostObjectType, ObjectType};
use crate::host::value::{HostNumber, HostValue};

/// Property read. Missing properties and non-object targets read as
/// Undefined; this is the lenient lookup the global-namespace dependency
/// path relies on.
pub fn get_property(target: &HostValue, key: &str) -> HostValue {
    match target {
        HostValue::Object(o) => match (**o).borrow().as_base() {
            Some(base) => match base.get(key) {
                Some(v) => v.clone(),
                None => HostValue::Undefined,
            },
            None => HostValue::Undefined,
        },
        _ => HostValue::Undefined,
    }
}

/// Property write. Overwrites silently; only property-bearing objects can
/// be written through.
pub fn set_property(target: &HostValue, key: &str, value: HostValue) -> Result<(), HostError> {
    if let HostValue::Object(o) = target {
        if let Some(base) = (**o).borrow_mut().as_base_mut() {
            base.set(key, value);
            return Ok(());
        }
    }
    Err(HostError::TypeError(format!(
        "cannot set property '{}' on {}",
        key,
        get_type(target)
    )))
}

/// Property write on an object handle known to bear properties. Writes on
/// arrays and elements are dropped.
pub fn define_property(object: &HostObjectType, key: &str, value: HostValue) {
    if let Some(base) = (**object).borrow_mut().as_base_mut() {
        base.set(key, value);
    }
}

/// Invoke a value. The callable body is cloned out first so the borrow on
/// the function object is released before the body runs.
pub fn call_value(target: &HostValue, args: Vec<HostValue>) -> Result<HostValue, HostError> {
    let callable: Callable = match target {
        HostValue::Object(o) => {
            let object = (**o).borrow();
            match &*object {
                ObjectType::Function(f) => f.callable(),
                _ => {
                    return Err(HostError::TypeError(format!(
                        "{} is not a function",
                        target
                    )))
                }
            }
        }
        _ => {
            return Err(HostError::TypeError(format!(
                "{} is not a function",
                target
            )))
        }
    };
    callable.call(args)
}

/// Host truthiness.
pub fn to_boolean(value: &HostValue) -> bool {
    match value {
        HostValue::Undefined => false,
        HostValue::Null => false,
        HostValue::Boolean(b) => *b,
        HostValue::Number(HostNumber::Integer(i)) => *i != 0,
        HostValue::Number(HostNumber::Float(f)) => *f != 0.0 && !f.is_nan(),
        HostValue::String(s) => !s.is_empty(),
        HostValue::Symbol(_) => true,
        HostValue::Object(_) => true,
    }
}

fn number_as_float(n: &HostNumber) -> f64 {
    match n {
        HostNumber::Integer(i) => *i as f64,
        HostNumber::Float(f) => *f,
    }
}

/// SameValue: pointer identity for objects, structural equality for
/// primitives, numeric equality across integer and float representations.
pub fn same_value(a: &HostValue, b: &HostValue) -> bool {
    match (a, b) {
        (HostValue::Number(na), HostValue::Number(nb)) => {
            let fa = number_as_float(na);
            let fb = number_as_float(nb);
            if fa.is_nan() && fb.is_nan() {
                true
            } else {
                fa == fb
            }
        }
        _ => a == b,
    }
}

/// Deep structural comparison for rendered trees and plain data. Objects
/// that are pointer-identical compare equal without descending; functions
/// compare by identity only.
pub fn structurally_equivalent(a: &HostValue, b: &HostValue) -> bool {
    if same_value(a, b) {
        return true;
    }
    let (oa, ob) = match (a, b) {
        (HostValue::Object(oa), HostValue::Object(ob)) => (oa, ob),
        _ => return false,
    };
    let ba = (**oa).borrow();
    let bb = (**ob).borrow();
    match (&*ba, &*bb) {
        (ObjectType::Ordinary(pa), ObjectType::Ordinary(pb)) => {
            let keys = pa.base().keys();
            if keys != pb.base().keys() {
                return false;
            }
            keys.iter().all(|k| {
                let va = pa.base().get(k);
                let vb = pb.base().get(k);
                match (va, vb) {
                    (Some(va), Some(vb)) => structurally_equivalent(va, vb),
                    _ => false,
                }
            })
        }
        (ObjectType::Array(aa), ObjectType::Array(ab)) => {
            aa.elements.len() == ab.elements.len()
                && aa
                    .elements
                    .iter()
                    .zip(ab.elements.iter())
                    .all(|(x, y)| structurally_equivalent(x, y))
        }
        (ObjectType::Element(ea), ObjectType::Element(eb)) => {
            let kinds_match = match (&ea.kind, &eb.kind) {
                (ElementKind::Tag(ta), ElementKind::Tag(tb)) => ta == tb,
                (ElementKind::Component(ca), ElementKind::Component(cb)) => same_value(ca, cb),
                _ => false,
            };
            kinds_match
                && structurally_equivalent(&ea.props, &eb.props)
                && ea.children.len() == eb.children.len()
                && ea
                    .children
                    .iter()
                    .zip(eb.children.iter())
                    .all(|(x, y)| structurally_equivalent(x, y))
        }
        _ => false,
    }
}

/// Walk a rendered tree and collect every component invocation as a
/// (component, props) pair, in document order.
pub fn collect_component_invocations(tree: &HostValue) -> Vec<(HostValue, HostValue)> {
    let mut found = Vec::new();
    walk_components(tree, &mut found);
    found
}

fn walk_components(node: &HostValue, found: &mut Vec<(HostValue, HostValue)>) {
    if let HostValue::Object(o) = node {
        if let ObjectType::Element(element) = &*(**o).borrow() {
            if let ElementKind::Component(component) = &element.kind {
                found.push((component.clone(), element.props.clone()));
            }
            for child in &element.children {
                walk_components(child, found);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::object::new_ordinary_object;

    #[test]
    fn test_get_property_on_missing_key_is_undefined() {
        let obj = HostValue::Object(new_ordinary_object());
        assert_eq!(get_property(&obj, "nope"), HostValue::Undefined);
    }

    #[test]
    fn test_get_property_on_primitive_is_undefined() {
        assert_eq!(
            get_property(&HostValue::Boolean(true), "x"),
            HostValue::Undefined
        );
    }

    #[test]
    fn test_set_then_get_property() {
        let obj = HostValue::Object(new_ordinary_object());
        set_property(&obj, "x", HostValue::Number(HostNumber::Integer(7))).unwrap();
        assert_eq!(
            get_property(&obj, "x"),
            HostValue::Number(HostNumber::Integer(7))
        );
    }

    #[test]
    fn test_set_property_on_primitive_is_type_error() {
        let err = set_property(&HostValue::Undefined, "x", HostValue::Null).unwrap_err();
        assert!(matches!(err, HostError::TypeError(_)));
    }

    #[test]
    fn test_call_value_on_non_callable_is_type_error() {
        let err = call_value(&HostValue::Null, vec![]).unwrap_err();
        assert!(matches!(err, HostError::TypeError(_)));
    }

    #[test]
    fn test_to_boolean_table() {
        assert!(!to_boolean(&HostValue::Undefined));
        assert!(!to_boolean(&HostValue::Null));
        assert!(!to_boolean(&HostValue::String(String::new())));
        assert!(!to_boolean(&HostValue::Number(HostNumber::Integer(0))));
        assert!(to_boolean(&HostValue::String("x".to_string())));
        assert!(to_boolean(&HostValue::Object(new_ordinary_object())));
    }

    #[test]
    fn test_same_value_across_number_representations() {
        assert!(same_value(
            &HostValue::Number(HostNumber::Integer(1)),
            &HostValue::Number(HostNumber::Float(1.0))
        ));
        assert!(same_value(
            &HostValue::Number(HostNumber::Float(f64::NAN)),
            &HostValue::Number(HostNumber::Float(f64::NAN))
        ));
    }

    #[test]
    fn test_same_value_objects_by_identity() {
        let a = HostValue::Object(new_ordinary_object());
        let b = HostValue::Object(new_ordinary_object());
        assert!(same_value(&a, &a.clone()));
        assert!(!same_value(&a, &b));
    }

    #[test]
    fn test_structural_equivalence_of_plain_objects() {
        let a = HostValue::Object(new_ordinary_object());
        let b = HostValue::Object(new_ordinary_object());
        set_property(&a, "k", HostValue::String("v".to_string())).unwrap();
        set_property(&b, "k", HostValue::String("v".to_string())).unwrap();
        assert!(structurally_equivalent(&a, &b));
        set_property(&b, "extra", HostValue::Null).unwrap();
        assert!(!structurally_equivalent(&a, &b));
    }
}
