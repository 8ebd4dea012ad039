//! CLI demo for omnidef module registration.
//!
//! Usage:
//!   omnidef                  # Run the demo in every host profile
//!   omnidef <profile>        # Run one: browser, legacy, node, amd, worker, bare

use omnidef::host::function::new_closure_function;
use omnidef::host::object::new_ordinary_object;
use omnidef::host::operations::{call_value, get_property, set_property};
use omnidef::host::realm::HostRealm;
use omnidef::host::value::{HostNumber, HostValue};
use omnidef::plugin::banner::{install_banner_plugin, MODULE_NAME};
use omnidef::plugin::decoration::decorate_components;
use omnidef::render::format_node;
use omnidef::umd::{recording_registrar, EnvironmentKind};
use std::env;
use std::process;

const PROFILES: [&str; 6] = ["browser", "legacy", "node", "amd", "worker", "bare"];

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => {
            // No arguments: walk every profile
            for name in PROFILES.iter() {
                run_profile(name);
                println!();
            }
        }
        2 => {
            let arg = &args[1];
            if arg == "-h" || arg == "--help" {
                print_usage();
                process::exit(0);
            }
            run_profile(arg);
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("omnidef - module-system detection and component decoration demo");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  omnidef                  Run the demo in every host profile");
    eprintln!("  omnidef <profile>        Run one: browser, legacy, node, amd, worker, bare");
}

fn make_realm(name: &str) -> Option<HostRealm> {
    match name {
        "browser" => Some(HostRealm::browser()),
        "legacy" => Some(HostRealm::legacy_browser()),
        "node" => Some(HostRealm::node()),
        "worker" => Some(HostRealm::worker()),
        "bare" => Some(HostRealm::bare()),
        _ => None,
    }
}

fn run_profile(name: &str) {
    if name == "amd" {
        run_amd();
        return;
    }
    let mut realm = match make_realm(name) {
        Some(realm) => realm,
        None => {
            print_usage();
            process::exit(1);
        }
    };
    println!("--- {} ---", name);
    let kind = match install_banner_plugin(&mut realm) {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("Registration error: {}", e);
            process::exit(1);
        }
    };
    println!("Detected branch: {}", kind);

    let definition = match kind {
        EnvironmentKind::ExportObject => {
            println!("module.exports holds the factory result");
            get_property(&realm.lookup("module"), "exports")
        }
        EnvironmentKind::GlobalNamespace => {
            let handle = match realm.resolve_global_handle() {
                Ok(handle) => handle,
                Err(e) => {
                    eprintln!("Registration error: {}", e);
                    process::exit(1);
                }
            };
            println!(
                "global namespace property '{}' holds the factory result",
                MODULE_NAME
            );
            get_property(&handle, MODULE_NAME)
        }
        EnvironmentKind::AsyncDefinition => {
            // Reachable only through a `define` binding, which make_realm
            // never installs.
            eprintln!("unexpected async-definition branch for profile '{}'", name);
            process::exit(1);
        }
    };
    show_decoration(&definition);
}

fn run_amd() {
    println!("--- amd ---");
    let (define, log) = recording_registrar();
    let mut realm = HostRealm::amd(define);
    let kind = match install_banner_plugin(&mut realm) {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("Registration error: {}", e);
            process::exit(1);
        }
    };
    println!("Detected branch: {}", kind);

    let registrations = log.borrow();
    let registration = match registrations.first() {
        Some(registration) => registration,
        None => {
            eprintln!("define was never called");
            process::exit(1);
        }
    };
    println!(
        "define received {} dependency name(s) and a factory it may call later",
        registration.dependency_names.len()
    );
    let definition = match call_value(&registration.factory, Vec::new()) {
        Ok(definition) => definition,
        Err(e) => {
            eprintln!("Factory error: {}", e);
            process::exit(1);
        }
    };
    show_decoration(&definition);
}

fn show_decoration(definition: &HostValue) {
    let info = HostValue::Object(new_closure_function("Info", |_args| {
        Ok(HostValue::Undefined)
    }));
    let system = HostValue::Object(new_ordinary_object());
    let decorated =
        match decorate_components(definition, &system, vec![("info".to_string(), info)]) {
            Ok(decorated) => decorated,
            Err(e) => {
                eprintln!("Decoration error: {}", e);
                process::exit(1);
            }
        };

    let props = HostValue::Object(new_ordinary_object());
    let written = set_property(&props, "a", HostValue::Number(HostNumber::Integer(1)))
        .and_then(|_| set_property(&props, "b", HostValue::String("x".to_string())));
    if let Err(e) = written {
        eprintln!("Props error: {}", e);
        process::exit(1);
    }

    let tree = match call_value(&decorated[0].1, vec![props]) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Render error: {}", e);
            process::exit(1);
        }
    };
    println!("{}", format_node(&tree));
}
