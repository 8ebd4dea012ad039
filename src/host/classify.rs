use crate::host::object::ObjectType;
use crate::host::operations::{get_property, same_value};
use crate::host::realm::{HostRealm, SYMBOL_BINDING};
use crate::host::value::HostValue;

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_SYMBOL: &str = "symbol";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

/// The host `typeof` operator. Null reports as "object", callables as
/// "function", every other object shape as "object".
pub fn get_type(a: &HostValue) -> &'static str {
    match a {
        HostValue::Undefined => TYPE_STR_UNDEFINED,
        HostValue::Null => TYPE_STR_OBJECT,
        HostValue::Boolean(_) => TYPE_STR_BOOLEAN,
        HostValue::String(_) => TYPE_STR_STRING,
        HostValue::Symbol(_) => TYPE_STR_SYMBOL,
        HostValue::Number(_) => TYPE_STR_NUMBER,
        HostValue::Object(o) => match *(**o).borrow() {
            ObjectType::Ordinary(_) => TYPE_STR_OBJECT,
            ObjectType::Function(_) => TYPE_STR_FUNCTION,
            ObjectType::Array(_) => TYPE_STR_OBJECT,
            ObjectType::Element(_) => TYPE_STR_OBJECT,
        },
    }
}

/// Classification strategy for host values.
///
/// Environments with a native symbol tag report symbols directly; older
/// environments see a symbol polyfill as a plain object and need its shape
/// inspected instead. The strategy is picked once per realm, up front, by
/// [`select_classifier`].
pub trait ValueClassifier {
    fn classify(&self, value: &HostValue) -> &'static str;

    fn name(&self) -> &str;
}

/// Trusts the native type tags on values.
pub struct TagClassifier;

impl ValueClassifier for TagClassifier {
    fn classify(&self, value: &HostValue) -> &'static str {
        get_type(value)
    }

    fn name(&self) -> &str {
        "tag_classifier"
    }
}

/// Duck-types polyfilled symbols: an ordinary object whose `constructor`
/// is the realm's symbol function, and which is not that function's own
/// `prototype` object, classifies as "symbol".
pub struct ShapeClassifier {
    symbol_constructor: Option<HostValue>,
}

impl ShapeClassifier {
    pub fn new(symbol_constructor: Option<HostValue>) -> Self {
        ShapeClassifier { symbol_constructor }
    }

    fn is_polyfilled_symbol(&self, value: &HostValue) -> bool {
        let constructor = match &self.symbol_constructor {
            Some(c) => c,
            None => return false,
        };
        let object = match value {
            HostValue::Object(o) => o,
            _ => return false,
        };
        if !matches!(*(**object).borrow(), ObjectType::Ordinary(_)) {
            return false;
        }
        if !same_value(&get_property(value, "constructor"), constructor) {
            return false;
        }
        !same_value(value, &get_property(constructor, "prototype"))
    }
}

impl ValueClassifier for ShapeClassifier {
    fn classify(&self, value: &HostValue) -> &'static str {
        if self.is_polyfilled_symbol(value) {
            TYPE_STR_SYMBOL
        } else {
            get_type(value)
        }
    }

    fn name(&self) -> &str {
        "shape_classifier"
    }
}

/// Probe the realm once and pick a strategy: native tags are trusted only
/// when `Symbol` is a function whose `iterator` property is a native
/// symbol value. Everything else falls back to shape inspection, which
/// compares constructors only against a callable `Symbol` binding.
pub fn select_classifier(realm: &HostRealm) -> Box<dyn ValueClassifier> {
    let symbol = realm.lookup(SYMBOL_BINDING);
    let symbol_is_function = get_type(&symbol) == TYPE_STR_FUNCTION;
    let native_tags = symbol_is_function
        && get_type(&get_property(&symbol, "iterator")) == TYPE_STR_SYMBOL;
    if native_tags {
        Box::new(TagClassifier)
    } else {
        Box::new(ShapeClassifier::new(if symbol_is_function {
            Some(symbol)
        } else {
            None
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::object::new_ordinary_object;
    use crate::host::operations::define_property;
    use crate::host::value::HostNumber;

    #[test]
    fn test_get_type_of_primitives() {
        assert_eq!(get_type(&HostValue::Undefined), TYPE_STR_UNDEFINED);
        assert_eq!(get_type(&HostValue::Null), TYPE_STR_OBJECT);
        assert_eq!(get_type(&HostValue::Boolean(true)), TYPE_STR_BOOLEAN);
        assert_eq!(
            get_type(&HostValue::Number(HostNumber::Integer(3))),
            TYPE_STR_NUMBER
        );
        assert_eq!(
            get_type(&HostValue::String("x".to_string())),
            TYPE_STR_STRING
        );
    }

    #[test]
    fn test_get_type_of_objects() {
        assert_eq!(
            get_type(&HostValue::Object(new_ordinary_object())),
            TYPE_STR_OBJECT
        );
    }

    #[test]
    fn test_shape_classifier_without_symbol_constructor() {
        let classifier = ShapeClassifier::new(None);
        let plain = HostValue::Object(new_ordinary_object());
        assert_eq!(classifier.classify(&plain), TYPE_STR_OBJECT);
    }

    #[test]
    fn test_select_classifier_ignores_a_non_callable_symbol() {
        let mut realm = HostRealm::new();
        let fake_symbol = HostValue::Object(new_ordinary_object());
        realm.bind(SYMBOL_BINDING, fake_symbol.clone());

        let classifier = select_classifier(&realm);
        let value = HostValue::Object(new_ordinary_object());
        if let HostValue::Object(o) = &value {
            define_property(o, "constructor", fake_symbol);
        }
        assert_eq!(classifier.classify(&value), TYPE_STR_OBJECT);
    }
}
