use std::fmt;
use std::fmt::{Display, Formatter};

use crate::host::classify::{
    ValueClassifier, TYPE_STR_FUNCTION, TYPE_STR_OBJECT, TYPE_STR_UNDEFINED,
};
use crate::host::operations::{get_property, to_boolean};
use crate::host::realm::{
    HostRealm, AMD_FLAG_PROP, DEFINE_BINDING, EXPORTS_BINDING, MODULE_BINDING,
};

/// The three shapes of host environment a module can find itself in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentKind {
    ExportObject,
    AsyncDefinition,
    GlobalNamespace,
}
impl Display for EnvironmentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentKind::ExportObject => write!(f, "export-object"),
            EnvironmentKind::AsyncDefinition => write!(f, "async-definition"),
            EnvironmentKind::GlobalNamespace => write!(f, "global-namespace"),
        }
    }
}

/// Classify the environment. A pure read of the realm, asking in strict
/// priority order:
///
/// 1. `exports` classifies as an object and `module` is defined: the
///    export-object shape.
/// 2. `define` classifies as a function and carries a truthy `amd` marker:
///    the async-definition shape.
/// 3. Otherwise the global-namespace shape, which is the guaranteed
///    fallback; detection never fails.
///
/// A realm offering both the export surface and a registrar still detects
/// as export-object. Detection happens once per module load.
pub fn detect(realm: &HostRealm, classifier: &dyn ValueClassifier) -> EnvironmentKind {
    let exports = realm.lookup(EXPORTS_BINDING);
    let module = realm.lookup(MODULE_BINDING);
    if classifier.classify(&exports) == TYPE_STR_OBJECT
        && classifier.classify(&module) != TYPE_STR_UNDEFINED
    {
        return EnvironmentKind::ExportObject;
    }
    let define = realm.lookup(DEFINE_BINDING);
    if classifier.classify(&define) == TYPE_STR_FUNCTION
        && to_boolean(&get_property(&define, AMD_FLAG_PROP))
    {
        return EnvironmentKind::AsyncDefinition;
    }
    EnvironmentKind::GlobalNamespace
}
