//! Registration tests for the three module loaders.
//!
//! The export-object branch resolves dependencies strictly and replaces
//! `module.exports`; the async-definition branch hands off to `define`
//! without calling the factory; the global-namespace branch resolves
//! dependencies leniently and writes exactly one property of the handle.

extern crate omnidef;

use omnidef::host::error::HostError;
use omnidef::host::function::new_closure_function;
use omnidef::host::object::new_ordinary_object;
use omnidef::host::operations::{get_property, same_value, set_property};
use omnidef::host::realm::HostRealm;
use omnidef::host::value::HostValue;
use omnidef::umd::{install, loader_for, recording_registrar, register, EnvironmentKind};
use std::cell::RefCell;
use std::rc::Rc;

type CallLog = Rc<RefCell<Vec<Vec<HostValue>>>>;

/// A factory that records every argument list it receives and returns
/// `result` each time.
fn recording_factory(result: HostValue) -> (HostValue, CallLog) {
    let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    let factory = HostValue::Object(new_closure_function("factory", move |args| {
        sink.borrow_mut().push(args);
        Ok(result.clone())
    }));
    (factory, calls)
}

fn fresh_object() -> HostValue {
    HostValue::Object(new_ordinary_object())
}

/// Own property names of an object value, sorted.
fn own_keys(value: &HostValue) -> Vec<String> {
    match value {
        HostValue::Object(o) => match (**o).borrow().as_base() {
            Some(base) => base.keys(),
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

// ── export-object branch ─────────────────────────────────────────────

#[test]
fn test_node_registration_replaces_module_exports() {
    let mut realm = HostRealm::node();
    let original_exports = realm.lookup("exports");
    let result = fresh_object();
    let (factory, _calls) = recording_factory(result.clone());

    let kind = install(&mut realm, "MyPlugin", &[], &factory).unwrap();
    assert_eq!(kind, EnvironmentKind::ExportObject);

    let module_exports = get_property(&realm.lookup("module"), "exports");
    assert!(same_value(&module_exports, &result));
    // The free-standing `exports` binding still aliases the object from
    // before registration; replacement went through `module`.
    assert!(same_value(&realm.lookup("exports"), &original_exports));
    assert!(!same_value(&realm.lookup("exports"), &result));
}

#[test]
fn test_node_dependencies_resolve_strictly_through_require() {
    let dep = fresh_object();
    let mut realm = HostRealm::node_with_modules(vec![("react", dep.clone())]);
    let (factory, calls) = recording_factory(fresh_object());

    install(&mut realm, "MyPlugin", &["react"], &factory).unwrap();

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    assert!(same_value(&calls[0][0], &dep));
}

#[test]
fn test_node_missing_dependency_aborts_registration() {
    let mut realm = HostRealm::node();
    let original_exports = realm.lookup("exports");
    let (factory, calls) = recording_factory(fresh_object());

    let err = install(&mut realm, "MyPlugin", &["react"], &factory).unwrap_err();
    assert!(matches!(err, HostError::ReferenceError(_)));
    assert_eq!(calls.borrow().len(), 0);
    let module_exports = get_property(&realm.lookup("module"), "exports");
    assert!(same_value(&module_exports, &original_exports));
}

// ── async-definition branch ──────────────────────────────────────────

#[test]
fn test_amd_hand_off_does_not_call_the_factory() {
    let (define, log) = recording_registrar();
    let mut realm = HostRealm::amd(define);
    let (factory, calls) = recording_factory(fresh_object());

    let kind = install(&mut realm, "MyPlugin", &["react", "redux"], &factory).unwrap();
    assert_eq!(kind, EnvironmentKind::AsyncDefinition);
    assert_eq!(calls.borrow().len(), 0);

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(
        log[0].dependency_names,
        vec!["react".to_string(), "redux".to_string()]
    );
    assert!(same_value(&log[0].factory, &factory));
}

// ── global-namespace branch ──────────────────────────────────────────

#[test]
fn test_global_registration_writes_exactly_one_property() {
    let mut realm = HostRealm::browser();
    let result = fresh_object();
    let (factory, _calls) = recording_factory(result.clone());

    let kind = install(&mut realm, "MyPlugin", &[], &factory).unwrap();
    assert_eq!(kind, EnvironmentKind::GlobalNamespace);

    let window = realm.lookup("window");
    assert_eq!(own_keys(&window), vec!["MyPlugin".to_string()]);
    assert!(same_value(&get_property(&window, "MyPlugin"), &result));
}

#[test]
fn test_global_registration_overwrites_an_existing_value() {
    let mut realm = HostRealm::browser();
    let window = realm.lookup("window");
    set_property(&window, "MyPlugin", HostValue::String("stale".to_string())).unwrap();

    let result = fresh_object();
    let (factory, _calls) = recording_factory(result.clone());
    install(&mut realm, "MyPlugin", &[], &factory).unwrap();

    assert_eq!(own_keys(&window), vec!["MyPlugin".to_string()]);
    assert!(same_value(&get_property(&window, "MyPlugin"), &result));
}

#[test]
fn test_global_dependencies_resolve_leniently() {
    let mut realm = HostRealm::browser();
    let window = realm.lookup("window");
    let react = fresh_object();
    set_property(&window, "React", react.clone()).unwrap();
    let (factory, calls) = recording_factory(fresh_object());

    install(&mut realm, "MyPlugin", &["React", "Redux"], &factory).unwrap();

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 2);
    assert!(same_value(&calls[0][0], &react));
    assert_eq!(calls[0][1], HostValue::Undefined);
}

// ── global handle resolution ─────────────────────────────────────────

#[test]
fn test_handle_priority_prefers_window() {
    let mut realm = HostRealm::worker();
    let window = fresh_object();
    realm.bind("window", window.clone());
    let result = fresh_object();
    let (factory, _calls) = recording_factory(result.clone());

    install(&mut realm, "MyPlugin", &[], &factory).unwrap();

    assert!(same_value(&get_property(&window, "MyPlugin"), &result));
    assert_eq!(
        get_property(&realm.lookup("self"), "MyPlugin"),
        HostValue::Undefined
    );
}

#[test]
fn test_handle_priority_prefers_global_over_self() {
    let mut realm = HostRealm::new();
    let global = fresh_object();
    realm.bind("global", global.clone());
    realm.bind("self", fresh_object());
    let result = fresh_object();
    let (factory, _calls) = recording_factory(result.clone());

    install(&mut realm, "MyPlugin", &[], &factory).unwrap();

    assert!(same_value(&get_property(&global, "MyPlugin"), &result));
    assert_eq!(
        get_property(&realm.lookup("self"), "MyPlugin"),
        HostValue::Undefined
    );
}

#[test]
fn test_worker_registration_lands_on_self() {
    let mut realm = HostRealm::worker();
    let result = fresh_object();
    let (factory, _calls) = recording_factory(result.clone());

    install(&mut realm, "MyPlugin", &[], &factory).unwrap();

    assert!(same_value(
        &get_property(&realm.lookup("self"), "MyPlugin"),
        &result
    ));
}

#[test]
fn test_implicit_receiver_is_the_last_resort() {
    let mut realm = HostRealm::bare();
    let result = fresh_object();
    let (factory, _calls) = recording_factory(result.clone());

    install(&mut realm, "MyPlugin", &[], &factory).unwrap();

    let receiver = realm.implicit_this().cloned().unwrap();
    assert!(same_value(&get_property(&receiver, "MyPlugin"), &result));
}

#[test]
fn test_strict_empty_realm_fails_with_reference_error() {
    let mut realm = HostRealm::new();
    let (factory, calls) = recording_factory(fresh_object());

    let err = install(&mut realm, "MyPlugin", &[], &factory).unwrap_err();
    assert!(matches!(err, HostError::ReferenceError(_)));
    assert_eq!(calls.borrow().len(), 0);
}

#[test]
fn test_primitive_global_candidate_is_a_type_error() {
    let mut realm = HostRealm::new();
    realm.bind("window", HostValue::Boolean(true));
    let (factory, calls) = recording_factory(fresh_object());

    let err = install(&mut realm, "MyPlugin", &[], &factory).unwrap_err();
    assert!(matches!(err, HostError::TypeError(_)));
    assert_eq!(calls.borrow().len(), 0);
}

// ── loader dispatch ──────────────────────────────────────────────────

#[test]
fn test_loader_for_matches_its_kind() {
    let kinds = [
        EnvironmentKind::ExportObject,
        EnvironmentKind::AsyncDefinition,
        EnvironmentKind::GlobalNamespace,
    ];
    for kind in kinds.iter() {
        assert_eq!(loader_for(*kind).kind(), *kind);
    }
}

#[test]
fn test_register_honors_an_explicit_kind() {
    let mut realm = HostRealm::node();
    let result = fresh_object();
    let (factory, _calls) = recording_factory(result.clone());

    register(
        &mut realm,
        EnvironmentKind::GlobalNamespace,
        "MyPlugin",
        &[],
        &factory,
    )
    .unwrap();

    assert!(same_value(
        &get_property(&realm.lookup("global"), "MyPlugin"),
        &result
    ));
    let module_exports = get_property(&realm.lookup("module"), "exports");
    assert!(!same_value(&module_exports, &result));
}
