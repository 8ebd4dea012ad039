//! Universal module registration.
//!
//! A module that has to load everywhere cannot know, ahead of time, whether
//! it is sitting in a CommonJS module scope, a page with an asynchronous
//! module registrar, or a plain script tag. This module models the shim
//! that makes such loading work, as three separable steps:
//!
//! 1. **Strategy selection**: probe the realm once for native symbol
//!    support and pick a [`crate::host::classify::ValueClassifier`].
//! 2. **Detection**: [`detect`] reads the realm and names its shape as an
//!    [`EnvironmentKind`]. Strict priority, guaranteed fallback, no side
//!    effects.
//! 3. **Registration**: [`register`] drives the branch-specific
//!    [`ModuleLoader`], which resolves dependencies, calls the factory, and
//!    delivers the result where that environment expects it.
//!
//! [`install`] runs all three against a realm, which is what the shipped
//! plugin does in [`crate::plugin::banner::install_banner_plugin`].

pub mod detect;
pub mod loader;

pub use detect::{detect, EnvironmentKind};
pub use loader::{loader_for, recording_registrar, ModuleLoader};

use crate::host::classify::select_classifier;
use crate::host::error::HostError;
use crate::host::realm::HostRealm;
use crate::host::value::HostValue;

/// Register a factory through the branch for an already-detected kind.
pub fn register(
    realm: &mut HostRealm,
    kind: EnvironmentKind,
    module_name: &str,
    dependency_names: &[&str],
    factory: &HostValue,
) -> Result<(), HostError> {
    loader_for(kind).register(realm, module_name, dependency_names, factory)
}

/// The whole shim in one call: pick a classification strategy, detect the
/// environment, and register through the matching branch. Returns the kind
/// that was detected so callers can observe where the module went.
pub fn install(
    realm: &mut HostRealm,
    module_name: &str,
    dependency_names: &[&str],
    factory: &HostValue,
) -> Result<EnvironmentKind, HostError> {
    let classifier = select_classifier(realm);
    let kind = detect(realm, classifier.as_ref());
    register(realm, kind, module_name, dependency_names, factory)?;
    Ok(kind)
}
