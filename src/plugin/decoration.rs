//! The component decoration contract.
//!
//! A plugin definition is a function that, applied to the host's system
//! object, returns a payload whose `wrapComponents` property maps
//! component names to decorator functions. A decorator is called with
//! the original component and the system object, and returns the
//! component that replaces the original. Names in the map that match
//! no registered component are ignored, and components the map does not
//! name pass through untouched.

use crate::host::classify::{get_type, TYPE_STR_FUNCTION};
use crate::host::error::HostError;
use crate::host::function::new_closure_function;
use crate::host::object::new_ordinary_object;
use crate::host::operations::{call_value, define_property, get_property};
use crate::host::value::HostValue;

/// Property of a plugin payload that holds its decoration map.
pub const WRAP_COMPONENTS_KEY: &str = "wrapComponents";

/// Builder for the payload a plugin definition returns. Each `wrap` call
/// adds one decorator; `into_value` produces the host object carrying
/// the decoration map.
pub struct ComponentDecorations {
    wrappers: Vec<(String, HostValue)>,
}

impl ComponentDecorations {
    pub fn new() -> Self {
        ComponentDecorations {
            wrappers: Vec::new(),
        }
    }

    /// Register a decorator for `component`. The closure receives the
    /// original component and the system object.
    pub fn wrap<F>(mut self, component: &str, decorator: F) -> Self
    where
        F: Fn(HostValue, HostValue) -> Result<HostValue, HostError> + 'static,
    {
        let wrapper = new_closure_function(component, move |args| {
            let mut args = args.into_iter();
            let original = args.next().unwrap_or(HostValue::Undefined);
            let system = args.next().unwrap_or(HostValue::Undefined);
            decorator(original, system)
        });
        self.wrappers
            .push((component.to_string(), HostValue::Object(wrapper)));
        self
    }

    /// Build the payload object. A definition should construct a new
    /// `ComponentDecorations` on every call, so no two payloads share a
    /// map.
    pub fn into_value(self) -> HostValue {
        let map = new_ordinary_object();
        for (name, wrapper) in self.wrappers {
            define_property(&map, &name, wrapper);
        }
        let payload = new_ordinary_object();
        define_property(&payload, WRAP_COMPONENTS_KEY, HostValue::Object(map));
        HostValue::Object(payload)
    }
}

impl Default for ComponentDecorations {
    fn default() -> Self {
        Self::new()
    }
}

/// The decoration map of a plugin payload, or `Undefined` when the
/// payload carries none.
pub fn decoration_map(payload: &HostValue) -> HostValue {
    get_property(payload, WRAP_COMPONENTS_KEY)
}

/// The decorator a payload holds for `component`, or `Undefined`.
pub fn decorator_for(payload: &HostValue, component: &str) -> HostValue {
    get_property(&decoration_map(payload), component)
}

/// A callable plugin is a definition and yields its payload when invoked
/// with the system object; anything else is taken as the payload itself.
fn resolve_payload(plugin: &HostValue, system: &HostValue) -> Result<HostValue, HostError> {
    if get_type(plugin) == TYPE_STR_FUNCTION {
        call_value(plugin, vec![system.clone()])
    } else {
        Ok(plugin.clone())
    }
}

/// Run a plugin over a component registry the way a host loader does.
/// Order and names are preserved; only components the decoration map
/// names are replaced. A map entry that is not callable surfaces as a
/// type error.
pub fn decorate_components(
    plugin: &HostValue,
    system: &HostValue,
    components: Vec<(String, HostValue)>,
) -> Result<Vec<(String, HostValue)>, HostError> {
    let payload = resolve_payload(plugin, system)?;
    let map = decoration_map(&payload);
    let mut decorated = Vec::with_capacity(components.len());
    for (name, component) in components {
        let next = match get_property(&map, &name) {
            HostValue::Undefined => component,
            decorator => call_value(&decorator, vec![component, system.clone()])?,
        };
        decorated.push((name, next));
    }
    Ok(decorated)
}
