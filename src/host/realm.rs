//! Host realms.
//!
//! A realm is the top-level scope a module script observes, held as explicit
//! data: a map of named bindings plus the implicit receiver a non-strict
//! script would see as `this`. Nothing here is ambient process state, so a
//! test can stand up any environment shape it wants and hand it to the
//! detector and loaders.
//!
//! The profile constructors build the recognizable hosts: a browser page, a
//! browser old enough to need a symbol polyfill, a CommonJS module scope, an
//! AMD page, a worker, and a bare script host with nothing but an implicit
//! receiver.

use std::collections::HashMap;

use crate::host::error::HostError;
use crate::host::function::{new_closure_function, new_native_function};
use crate::host::object::new_ordinary_object;
use crate::host::operations::define_property;
use crate::host::symbol::{SymbolData, SYMBOL_ITERATOR};
use crate::host::value::HostValue;

pub const EXPORTS_BINDING: &str = "exports";
pub const MODULE_BINDING: &str = "module";
pub const DEFINE_BINDING: &str = "define";
pub const REQUIRE_BINDING: &str = "require";
pub const AMD_FLAG_PROP: &str = "amd";
pub const SYMBOL_BINDING: &str = "Symbol";

/// Global handle candidates, probed in exactly this order. The implicit
/// receiver is the final fallback after all three.
pub const GLOBAL_HANDLE_CANDIDATES: [&str; 3] = ["window", "global", "self"];

pub struct HostRealm {
    bindings: HashMap<String, HostValue>,
    implicit_this: Option<HostValue>,
}

impl HostRealm {
    /// An empty, strict realm: no bindings and no implicit receiver.
    pub fn new() -> Self {
        HostRealm {
            bindings: HashMap::new(),
            implicit_this: None,
        }
    }

    pub fn bind(&mut self, name: impl Into<String>, value: HostValue) {
        self.bindings.insert(name.into(), value);
    }

    /// Read a binding the way `typeof` would: absent names are Undefined,
    /// never an error.
    pub fn lookup(&self, name: &str) -> HostValue {
        match self.bindings.get(name) {
            Some(v) => v.clone(),
            None => HostValue::Undefined,
        }
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn implicit_this(&self) -> Option<&HostValue> {
        self.implicit_this.as_ref()
    }

    pub fn set_implicit_this(&mut self, receiver: Option<HostValue>) {
        self.implicit_this = receiver;
    }

    /// Resolve the object that global-namespace registration writes into.
    ///
    /// Candidates are probed in the fixed order `window`, `global`, `self`,
    /// then the implicit receiver; the first defined one wins even when a
    /// later candidate is also defined. A realm with none of them has no
    /// discoverable global, which is fatal for the global branch.
    pub fn resolve_global_handle(&self) -> Result<HostValue, HostError> {
        for name in GLOBAL_HANDLE_CANDIDATES.iter() {
            let candidate = self.lookup(name);
            if !matches!(candidate, HostValue::Undefined) {
                return require_namespace_object(name, candidate);
            }
        }
        match &self.implicit_this {
            Some(receiver) => require_namespace_object("this", receiver.clone()),
            None => Err(HostError::ReferenceError(
                "unable to locate global object".to_string(),
            )),
        }
    }

    // ── profiles ──

    /// A browser page: `window`, a native `Symbol` intrinsic, and `window`
    /// doubling as the implicit receiver.
    pub fn browser() -> Self {
        let mut realm = HostRealm::new();
        let window = new_ordinary_object();
        realm.bind("window", HostValue::Object(window.clone()));
        realm.bind(SYMBOL_BINDING, native_symbol_intrinsic());
        realm.set_implicit_this(Some(HostValue::Object(window)));
        realm
    }

    /// A browser without native symbols: `Symbol` is a polyfill function
    /// whose instances are ordinary objects carrying a `constructor`
    /// back-pointer.
    pub fn legacy_browser() -> Self {
        let mut realm = HostRealm::new();
        let window = new_ordinary_object();
        realm.bind("window", HostValue::Object(window.clone()));
        realm.bind(SYMBOL_BINDING, polyfilled_symbol_intrinsic());
        realm.set_implicit_this(Some(HostValue::Object(window)));
        realm
    }

    /// A CommonJS module scope with an empty module table.
    pub fn node() -> Self {
        Self::node_with_modules(Vec::new())
    }

    /// A CommonJS module scope: `module` whose `exports` property aliases
    /// the `exports` binding, a `require` backed by the given module table,
    /// a `global` object, and `module.exports` as the implicit receiver.
    pub fn node_with_modules(modules: Vec<(&str, HostValue)>) -> Self {
        let mut realm = HostRealm::new();
        let global = new_ordinary_object();
        realm.bind("global", HostValue::Object(global));
        realm.bind(SYMBOL_BINDING, native_symbol_intrinsic());

        let exports = new_ordinary_object();
        let module = new_ordinary_object();
        define_property(&module, EXPORTS_BINDING, HostValue::Object(exports.clone()));
        realm.bind(EXPORTS_BINDING, HostValue::Object(exports.clone()));
        realm.bind(MODULE_BINDING, HostValue::Object(module));
        realm.set_implicit_this(Some(HostValue::Object(exports)));

        let table: HashMap<String, HostValue> = modules
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        let require = new_closure_function(REQUIRE_BINDING, move |args| {
            let id = match args.into_iter().next() {
                Some(HostValue::String(s)) => s,
                _ => {
                    return Err(HostError::TypeError(
                        "module id must be a string".to_string(),
                    ))
                }
            };
            match table.get(&id) {
                Some(v) => Ok(v.clone()),
                None => Err(HostError::ReferenceError(format!(
                    "cannot find module '{}'",
                    id
                ))),
            }
        });
        realm.bind(REQUIRE_BINDING, HostValue::Object(require));
        realm
    }

    /// An AMD page: `window` plus a caller-supplied `define` registrar.
    /// See `umd::loader::recording_registrar` for a registrar that records
    /// what it receives.
    pub fn amd(define: HostValue) -> Self {
        let mut realm = HostRealm::new();
        let window = new_ordinary_object();
        realm.bind("window", HostValue::Object(window.clone()));
        realm.bind(SYMBOL_BINDING, native_symbol_intrinsic());
        realm.bind(DEFINE_BINDING, define);
        realm.set_implicit_this(Some(HostValue::Object(window)));
        realm
    }

    /// A worker scope: `self` only.
    pub fn worker() -> Self {
        let mut realm = HostRealm::new();
        let worker_self = new_ordinary_object();
        realm.bind("self", HostValue::Object(worker_self.clone()));
        realm.bind(SYMBOL_BINDING, native_symbol_intrinsic());
        realm.set_implicit_this(Some(HostValue::Object(worker_self)));
        realm
    }

    /// A host with no named globals at all; only the implicit receiver
    /// survives. Running the same script under strict mode is modeled by
    /// `HostRealm::new`, where even that receiver is gone.
    pub fn bare() -> Self {
        let mut realm = HostRealm::new();
        realm.set_implicit_this(Some(HostValue::Object(new_ordinary_object())));
        realm
    }
}

impl Default for HostRealm {
    fn default() -> Self {
        Self::new()
    }
}

fn require_namespace_object(name: &str, candidate: HostValue) -> Result<HostValue, HostError> {
    let property_bearing = match &candidate {
        HostValue::Object(o) => (**o).borrow().as_base().is_some(),
        _ => false,
    };
    if property_bearing {
        Ok(candidate)
    } else {
        Err(HostError::TypeError(format!(
            "global candidate '{}' is not an object",
            name
        )))
    }
}

fn symbol_constructor_body(args: Vec<HostValue>) -> Result<HostValue, HostError> {
    Ok(HostValue::Symbol(match args.into_iter().next() {
        Some(HostValue::String(description)) => SymbolData::new(description),
        _ => SymbolData::new_anonymous(),
    }))
}

fn native_symbol_intrinsic() -> HostValue {
    let symbol = new_native_function(SYMBOL_BINDING, symbol_constructor_body);
    define_property(
        &symbol,
        "iterator",
        HostValue::Symbol(SYMBOL_ITERATOR.clone()),
    );
    define_property(
        &symbol,
        "prototype",
        HostValue::Object(new_ordinary_object()),
    );
    HostValue::Object(symbol)
}

fn polyfilled_symbol_intrinsic() -> HostValue {
    use std::cell::RefCell;
    use std::rc::Rc;

    // Instances need a constructor back-pointer to the function that is
    // still being built, so the closure reads it from a shared slot filled
    // in afterwards.
    let constructor_slot: Rc<RefCell<HostValue>> = Rc::new(RefCell::new(HostValue::Undefined));
    let slot = constructor_slot.clone();
    let symbol = new_closure_function(SYMBOL_BINDING, move |args| {
        let instance = new_ordinary_object();
        define_property(&instance, "constructor", slot.borrow().clone());
        define_property(
            &instance,
            "description",
            match args.into_iter().next() {
                Some(HostValue::String(d)) => HostValue::String(d),
                _ => HostValue::String(SymbolData::new_anonymous().description().to_string()),
            },
        );
        Ok(HostValue::Object(instance))
    });
    let symbol_value = HostValue::Object(symbol.clone());
    *constructor_slot.borrow_mut() = symbol_value.clone();

    let prototype = new_ordinary_object();
    define_property(&prototype, "constructor", symbol_value.clone());
    define_property(&symbol, "prototype", HostValue::Object(prototype));

    let iterator = new_ordinary_object();
    define_property(&iterator, "constructor", symbol_value);
    define_property(
        &iterator,
        "description",
        HostValue::String("Symbol.iterator".to_string()),
    );
    define_property(&symbol, "iterator", HostValue::Object(iterator));

    HostValue::Object(symbol)
}
