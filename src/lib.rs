//! # omnidef - Module-system detection and component decoration in Rust
//!
//! A ground-up model of how a universally-packaged plugin reaches its host:
//! - Host value model (`undefined`, `null`, primitives, reference-counted objects)
//! - Realms describing what a host scope binds, with capability-probed
//!   value classification (native `typeof` or a polyfill shape check)
//! - Environment detection with a fixed branch priority and a guaranteed
//!   fallback
//! - Pluggable module loaders for export-object, async-definition and
//!   global-namespace hosts
//! - A component decoration contract plus a PEG-parsed markup template
//!   language for the decorated output
//!
//! ## Quick Start
//!
//! ### Detecting the module system
//!
//! ```
//! use omnidef::host::classify::select_classifier;
//! use omnidef::host::realm::HostRealm;
//! use omnidef::umd::{detect, EnvironmentKind};
//!
//! let realm = HostRealm::browser();
//! let classifier = select_classifier(&realm);
//! let kind = detect(&realm, classifier.as_ref());
//! assert_eq!(kind, EnvironmentKind::GlobalNamespace);
//! ```
//!
//! ### Registering a plugin
//!
//! ```
//! use omnidef::host::classify::get_type;
//! use omnidef::host::operations::{call_value, get_property};
//! use omnidef::host::realm::HostRealm;
//! use omnidef::host::value::HostValue;
//! use omnidef::plugin::banner::{install_banner_plugin, MODULE_NAME};
//! use omnidef::plugin::decoration::decorator_for;
//! use omnidef::umd::EnvironmentKind;
//!
//! let mut realm = HostRealm::browser();
//! let kind = install_banner_plugin(&mut realm).unwrap();
//! assert_eq!(kind, EnvironmentKind::GlobalNamespace);
//!
//! // The factory result landed on the global namespace object: the
//! // plugin definition, waiting for the host's system object.
//! let window = realm.lookup("window");
//! let definition = get_property(&window, MODULE_NAME);
//! assert_eq!(get_type(&definition), "function");
//!
//! let payload = call_value(&definition, vec![HostValue::Undefined]).unwrap();
//! assert_eq!(get_type(&decorator_for(&payload, "info")), "function");
//! ```
//!
//! ### Decorating a component and rendering it
//!
//! ```
//! use omnidef::host::function::new_closure_function;
//! use omnidef::host::object::new_ordinary_object;
//! use omnidef::host::operations::{call_value, set_property};
//! use omnidef::host::value::{HostNumber, HostValue};
//! use omnidef::plugin::banner::plugin_definition;
//! use omnidef::plugin::decoration::decorate_components;
//! use omnidef::render::format_node;
//!
//! let info = HostValue::Object(new_closure_function("Info", |_args| {
//!     Ok(HostValue::Undefined)
//! }));
//! let system = HostValue::Object(new_ordinary_object());
//! let decorated = decorate_components(
//!     &plugin_definition(),
//!     &system,
//!     vec![("info".to_string(), info)],
//! )
//! .unwrap();
//!
//! let props = HostValue::Object(new_ordinary_object());
//! set_property(&props, "a", HostValue::Number(HostNumber::Integer(1))).unwrap();
//! let tree = call_value(&decorated[0].1, vec![props]).unwrap();
//! println!("{}", format_node(&tree));
//! ```
//!
//! ## Detection priority
//!
//! Detection looks at what the realm binds, never at where the code thinks
//! it is running:
//!
//! 1. **Export object** - `exports` is an object and `module` is defined.
//!    Dependencies resolve strictly through `require` and the factory
//!    result replaces `module.exports`.
//! 2. **Async definition** - `define` is a function whose `amd` property
//!    is truthy. The dependency names and the factory are handed to
//!    `define`; completion is the registrar's business.
//! 3. **Global namespace** - always available. Dependencies resolve
//!    leniently to `undefined` when absent and the factory result is
//!    written to exactly one property of the global handle.
//!
//! The asymmetry between the strict first branch and the lenient last one
//! is deliberate and preserved.
//!
//! ## Architecture
//!
//! - **[`host`]** - Values, objects, realms, classification and the
//!   shared operations on them
//! - **[`markup`]** - PEG parser for the fragment template language
//! - **[`render`]** - Element creation and fragment evaluation
//! - **[`umd`]** - Environment detection and the module loaders
//! - **[`plugin`]** - The decoration contract and the banner plugin

#[macro_use]
extern crate lazy_static;

pub mod host;
pub mod markup;
pub mod plugin;
pub mod render;
pub mod umd;
