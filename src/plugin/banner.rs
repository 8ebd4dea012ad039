//! The banner plugin.
//!
//! Decorates the `info` component with a greeting heading rendered above
//! the original. The factory is what a host's module system receives;
//! calling it yields the plugin definition, a function the host applies
//! to its system object to obtain a payload built with
//! [`ComponentDecorations`](crate::plugin::decoration::ComponentDecorations).

use crate::host::error::HostError;
use crate::host::function::new_closure_function;
use crate::host::realm::HostRealm;
use crate::host::value::HostValue;
use crate::markup::ast::Fragment;
use crate::markup::MarkupParser;
use crate::plugin::decoration::ComponentDecorations;
use crate::render::{evaluate_fragment, SlotBindings};
use crate::umd::{install, EnvironmentKind};

/// Name the plugin registers under.
pub const MODULE_NAME: &str = "BannerPlugin";

/// The one component this plugin decorates.
pub const INFO_COMPONENT: &str = "info";

/// Heading text rendered above the original component.
pub const BANNER_TEXT: &str = "Hello world! I am above the Info component.";

fn banner_template() -> String {
    format!(
        "<div>\n  <h3>{}</h3>\n  <Original {{...props}} />\n</div>",
        BANNER_TEXT
    )
}

lazy_static! {
    // Parsed once; the template is a fixed string, so a parse failure is
    // a bug in this file.
    static ref BANNER_FRAGMENT: Fragment = match MarkupParser::parse_fragment(&banner_template()) {
        Ok(fragment) => fragment,
        Err(error) => panic!("banner template does not parse: {}", error),
    };
}

/// Decorator for the `info` component. The wrapped component forwards the
/// exact props object it receives to the original.
fn info_decorator(original: HostValue, _system: HostValue) -> Result<HostValue, HostError> {
    Ok(HostValue::Object(new_closure_function(
        "wrappedComponent",
        move |args| {
            let props = args.into_iter().next().unwrap_or(HostValue::Undefined);
            let mut bindings = SlotBindings::new();
            bindings.insert("Original".to_string(), original.clone());
            bindings.insert("props".to_string(), props);
            evaluate_fragment(&BANNER_FRAGMENT, &bindings)
        },
    )))
}

/// The plugin definition. Applying it to the host's system object yields
/// a fresh `{ wrapComponents: { info } }` payload per call.
pub fn plugin_definition() -> HostValue {
    HostValue::Object(new_closure_function("bannerPlugin", |_args| {
        Ok(ComponentDecorations::new()
            .wrap(INFO_COMPONENT, info_decorator)
            .into_value())
    }))
}

/// The factory handed to a module system. Calling it any number of times
/// yields independent definition functions.
pub fn plugin_factory() -> HostValue {
    HostValue::Object(new_closure_function("bannerPluginFactory", |_args| {
        Ok(plugin_definition())
    }))
}

/// Register the banner plugin in whatever module system `realm` offers,
/// reporting which branch was taken. The plugin has no dependencies.
pub fn install_banner_plugin(realm: &mut HostRealm) -> Result<EnvironmentKind, HostError> {
    install(realm, MODULE_NAME, &[], &plugin_factory())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::classify::{get_type, TYPE_STR_FUNCTION};
    use crate::host::object::{new_ordinary_object, ElementKind, ObjectType};
    use crate::host::operations::{
        call_value, collect_component_invocations, get_property, same_value, set_property,
    };
    use crate::host::value::HostNumber;
    use crate::plugin::decoration::{decoration_map, decorator_for};

    #[test]
    fn test_banner_template_parses() {
        let parsed = MarkupParser::parse_fragment(&banner_template()).unwrap();
        assert_eq!(*BANNER_FRAGMENT, parsed);
    }

    #[test]
    fn test_definition_wraps_only_info() {
        let definition = plugin_definition();
        assert_eq!(get_type(&definition), TYPE_STR_FUNCTION);
        let payload = call_value(&definition, vec![HostValue::Undefined]).unwrap();
        assert_eq!(
            get_type(&decorator_for(&payload, INFO_COMPONENT)),
            TYPE_STR_FUNCTION
        );
        assert_eq!(decorator_for(&payload, "layout"), HostValue::Undefined);
    }

    #[test]
    fn test_each_factory_call_yields_a_fresh_definition() {
        let factory = plugin_factory();
        let first = call_value(&factory, Vec::new()).unwrap();
        let second = call_value(&factory, Vec::new()).unwrap();
        assert!(!same_value(&first, &second));
    }

    #[test]
    fn test_each_definition_call_yields_a_fresh_payload() {
        let definition = plugin_definition();
        let system = HostValue::Object(new_ordinary_object());
        let first = call_value(&definition, vec![system.clone()]).unwrap();
        let second = call_value(&definition, vec![system]).unwrap();
        assert!(!same_value(&first, &second));
        assert!(!same_value(
            &decoration_map(&first),
            &decoration_map(&second)
        ));
    }

    #[test]
    fn test_wrapped_component_renders_banner_above_original() {
        let original = HostValue::Object(new_closure_function("Info", |_args| {
            Ok(HostValue::Undefined)
        }));
        let payload = call_value(&plugin_definition(), vec![HostValue::Undefined]).unwrap();
        let decorator = decorator_for(&payload, INFO_COMPONENT);
        let wrapped = call_value(
            &decorator,
            vec![original.clone(), HostValue::Undefined],
        )
        .unwrap();

        let props = HostValue::Object(new_ordinary_object());
        set_property(&props, "a", HostValue::Number(HostNumber::Integer(1))).unwrap();
        let tree = call_value(&wrapped, vec![props.clone()]).unwrap();

        match &tree {
            HostValue::Object(o) => match &*(**o).borrow() {
                ObjectType::Element(div) => {
                    match &div.kind {
                        ElementKind::Tag(tag) => assert_eq!(tag, "div"),
                        _ => panic!("expected an intrinsic tag"),
                    }
                    assert_eq!(div.children.len(), 2);
                    match &div.children[0] {
                        HostValue::Object(h) => match &*(**h).borrow() {
                            ObjectType::Element(h3) => {
                                match &h3.kind {
                                    ElementKind::Tag(tag) => assert_eq!(tag, "h3"),
                                    _ => panic!("expected an intrinsic tag"),
                                }
                                assert_eq!(
                                    h3.children,
                                    vec![HostValue::String(BANNER_TEXT.to_string())]
                                );
                            }
                            _ => panic!("expected the heading element"),
                        },
                        _ => panic!("expected an object child"),
                    }
                }
                _ => panic!("expected the wrapper element"),
            },
            _ => panic!("expected an object"),
        }

        let invocations = collect_component_invocations(&tree);
        assert_eq!(invocations.len(), 1);
        assert!(same_value(&invocations[0].0, &original));
        assert!(same_value(&invocations[0].1, &props));
        assert_eq!(
            get_property(&invocations[0].1, "a"),
            HostValue::Number(HostNumber::Integer(1))
        );
    }
}
