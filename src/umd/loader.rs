//! Registration branches.
//!
//! One loader per environment kind, behind a common trait so callers pick
//! a branch once and drive it polymorphically. The dependency-resolution
//! asymmetry between the branches is deliberate and load-bearing: the
//! export-object branch resolves through `require` and propagates the
//! first failure, while the global-namespace branch reads properties off
//! the global handle and passes Undefined through silently.

use std::cell::RefCell;
use std::rc::Rc;

use super::detect::EnvironmentKind;
use crate::host::error::HostError;
use crate::host::function::new_closure_function;
use crate::host::object::{new_array_object, new_ordinary_object, ObjectType};
use crate::host::operations::{call_value, define_property, get_property, set_property};
use crate::host::realm::{
    HostRealm, AMD_FLAG_PROP, DEFINE_BINDING, EXPORTS_BINDING, MODULE_BINDING, REQUIRE_BINDING,
};
use crate::host::value::HostValue;

pub trait ModuleLoader {
    fn kind(&self) -> EnvironmentKind;

    fn register(
        &self,
        realm: &mut HostRealm,
        module_name: &str,
        dependency_names: &[&str],
        factory: &HostValue,
    ) -> Result<(), HostError>;

    fn name(&self) -> &str;
}

/// CommonJS-shaped registration: resolve dependencies through `require`,
/// call the factory, and replace the `module` object's `exports` property
/// with the result. The stale `exports` binding keeps pointing at the
/// object it aliased before.
pub struct ExportObjectLoader;

impl ModuleLoader for ExportObjectLoader {
    fn kind(&self) -> EnvironmentKind {
        EnvironmentKind::ExportObject
    }

    fn register(
        &self,
        realm: &mut HostRealm,
        _module_name: &str,
        dependency_names: &[&str],
        factory: &HostValue,
    ) -> Result<(), HostError> {
        let require = realm.lookup(REQUIRE_BINDING);
        let mut resolved = Vec::with_capacity(dependency_names.len());
        for name in dependency_names {
            resolved.push(call_value(
                &require,
                vec![HostValue::String((*name).to_string())],
            )?);
        }
        let result = call_value(factory, resolved)?;
        let module = realm.lookup(MODULE_BINDING);
        set_property(&module, EXPORTS_BINDING, result)
    }

    fn name(&self) -> &str {
        "export_object_loader"
    }
}

/// AMD-shaped registration: hand `(dependency names, factory)` to the
/// realm's `define` and return. Completion is the registrar's business;
/// nothing is observed beyond the call itself.
pub struct AsyncDefinitionLoader;

impl ModuleLoader for AsyncDefinitionLoader {
    fn kind(&self) -> EnvironmentKind {
        EnvironmentKind::AsyncDefinition
    }

    fn register(
        &self,
        realm: &mut HostRealm,
        _module_name: &str,
        dependency_names: &[&str],
        factory: &HostValue,
    ) -> Result<(), HostError> {
        let define = realm.lookup(DEFINE_BINDING);
        let names = new_array_object(
            dependency_names
                .iter()
                .map(|n| HostValue::String((*n).to_string()))
                .collect(),
        );
        call_value(&define, vec![HostValue::Object(names), factory.clone()])?;
        Ok(())
    }

    fn name(&self) -> &str {
        "async_definition_loader"
    }
}

/// Global-namespace registration: resolve the global handle, read each
/// dependency as a property of it (missing ones are Undefined), call the
/// factory, and write the result to exactly one property of the handle,
/// `handle[module_name]`, overwriting whatever was there.
pub struct GlobalNamespaceLoader;

impl ModuleLoader for GlobalNamespaceLoader {
    fn kind(&self) -> EnvironmentKind {
        EnvironmentKind::GlobalNamespace
    }

    fn register(
        &self,
        realm: &mut HostRealm,
        module_name: &str,
        dependency_names: &[&str],
        factory: &HostValue,
    ) -> Result<(), HostError> {
        let handle = realm.resolve_global_handle()?;
        let resolved: Vec<HostValue> = dependency_names
            .iter()
            .map(|n| get_property(&handle, n))
            .collect();
        let result = call_value(factory, resolved)?;
        set_property(&handle, module_name, result)
    }

    fn name(&self) -> &str {
        "global_namespace_loader"
    }
}

/// The loader for a detected environment kind.
pub fn loader_for(kind: EnvironmentKind) -> &'static dyn ModuleLoader {
    match kind {
        EnvironmentKind::ExportObject => &ExportObjectLoader,
        EnvironmentKind::AsyncDefinition => &AsyncDefinitionLoader,
        EnvironmentKind::GlobalNamespace => &GlobalNamespaceLoader,
    }
}

/// One registration recorded by the test-double registrar.
pub struct AmdRegistration {
    pub dependency_names: Vec<String>,
    pub factory: HostValue,
}

pub type AmdLog = Rc<RefCell<Vec<AmdRegistration>>>;

/// A `define` test double: a function carrying the `amd` marker that
/// records each `(dependency names, factory)` hand-off it receives.
/// Substitute it for a real registrar when standing up an AMD realm.
pub fn recording_registrar() -> (HostValue, AmdLog) {
    let log: AmdLog = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let define = new_closure_function(DEFINE_BINDING, move |args| {
        let mut args = args.into_iter();
        let names_value = args.next().unwrap_or(HostValue::Undefined);
        let factory = args.next().unwrap_or(HostValue::Undefined);
        let dependency_names = match &names_value {
            HostValue::Object(o) => match &*(**o).borrow() {
                ObjectType::Array(a) => a
                    .elements
                    .iter()
                    .map(|e| match e {
                        HostValue::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        sink.borrow_mut().push(AmdRegistration {
            dependency_names,
            factory,
        });
        Ok(HostValue::Undefined)
    });
    define_property(
        &define,
        AMD_FLAG_PROP,
        HostValue::Object(new_ordinary_object()),
    );
    (HostValue::Object(define), log)
}
