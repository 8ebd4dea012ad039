//! Element creation and fragment evaluation.
//!
//! `create_element` is the host's element-creation primitive; everything a
//! decorator renders bottoms out in calls to it. `evaluate_fragment` drives
//! it from a parsed markup template, resolving component slots and spread
//! attributes against caller-supplied bindings.

use std::collections::HashMap;

use crate::host::error::HostError;
use crate::host::object::{
    new_element_object, new_ordinary_object, ElementKind, ElementObject, ObjectType,
};
use crate::host::operations::set_property;
use crate::host::value::HostValue;
use crate::markup::ast::{Fragment, TemplateAttribute, TemplateNode};

const TAB_WIDTH: usize = 2;

/// Values a fragment's component slots and spread attributes resolve to.
pub type SlotBindings = HashMap<String, HostValue>;

/// Build one element node. Children are other elements or text values.
pub fn create_element(kind: ElementKind, props: HostValue, children: Vec<HostValue>) -> HostValue {
    HostValue::Object(new_element_object(ElementObject {
        kind,
        props,
        children,
    }))
}

/// Evaluate a parsed fragment against slot bindings, producing an element
/// tree.
pub fn evaluate_fragment(fragment: &Fragment, bindings: &SlotBindings) -> Result<HostValue, HostError> {
    evaluate_node(&fragment.root, bindings)
}

fn evaluate_node(node: &TemplateNode, bindings: &SlotBindings) -> Result<HostValue, HostError> {
    match node {
        TemplateNode::Text(t) => Ok(HostValue::String(t.clone())),
        TemplateNode::Element {
            tag,
            attributes,
            children,
        } => {
            let props = evaluate_attributes(attributes, bindings)?;
            let children = evaluate_children(children, bindings)?;
            Ok(create_element(ElementKind::Tag(tag.clone()), props, children))
        }
        TemplateNode::Slot {
            name,
            attributes,
            children,
        } => {
            let component = match bindings.get(name) {
                Some(v) => v.clone(),
                None => {
                    return Err(HostError::ReferenceError(format!(
                        "no binding for component slot '{}'",
                        name
                    )))
                }
            };
            let props = evaluate_attributes(attributes, bindings)?;
            let children = evaluate_children(children, bindings)?;
            Ok(create_element(
                ElementKind::Component(component),
                props,
                children,
            ))
        }
    }
}

fn evaluate_children(
    children: &[TemplateNode],
    bindings: &SlotBindings,
) -> Result<Vec<HostValue>, HostError> {
    children
        .iter()
        .map(|c| evaluate_node(c, bindings))
        .collect()
}

/// Attribute evaluation. A lone spread passes the bound value through
/// untouched, keeping the object identity the fragment author handed in;
/// any other combination builds a fresh props object, copying spread
/// entries and applying literals in order.
fn evaluate_attributes(
    attributes: &[TemplateAttribute],
    bindings: &SlotBindings,
) -> Result<HostValue, HostError> {
    if attributes.is_empty() {
        return Ok(HostValue::Undefined);
    }
    if let [TemplateAttribute::Spread { binding }] = attributes {
        return lookup_binding(bindings, binding);
    }
    let props = HostValue::Object(new_ordinary_object());
    for attribute in attributes {
        match attribute {
            TemplateAttribute::Literal { name, value } => {
                set_property(&props, name, HostValue::String(value.clone()))?;
            }
            TemplateAttribute::Spread { binding } => {
                let source = lookup_binding(bindings, binding)?;
                copy_own_properties(&source, &props)?;
            }
        }
    }
    Ok(props)
}

// Non-object spread sources contribute nothing, the way object spread
// treats primitives.
fn copy_own_properties(source: &HostValue, target: &HostValue) -> Result<(), HostError> {
    if let HostValue::Object(o) = source {
        if let Some(base) = (**o).borrow().as_base() {
            for key in base.keys() {
                if let Some(v) = base.get(&key) {
                    set_property(target, &key, v.clone())?;
                }
            }
        }
    }
    Ok(())
}

fn lookup_binding(bindings: &SlotBindings, name: &str) -> Result<HostValue, HostError> {
    match bindings.get(name) {
        Some(v) => Ok(v.clone()),
        None => Err(HostError::ReferenceError(format!(
            "no binding for '{}' in this fragment",
            name
        ))),
    }
}

/// Indented dump of a rendered tree, for the demo binary and debugging.
pub fn format_node(value: &HostValue) -> String {
    node_to_lines(value, 0).join("\n")
}

fn node_to_lines(value: &HostValue, level: usize) -> Vec<String> {
    let pad = spaces(level * TAB_WIDTH);
    if let HostValue::Object(o) = value {
        if let ObjectType::Element(element) = &*(**o).borrow() {
            let label = match &element.kind {
                ElementKind::Tag(tag) => format!("<{}>", tag),
                ElementKind::Component(component) => {
                    format!("<{}>", component_label(component))
                }
            };
            let props = match &element.props {
                HostValue::Undefined => String::new(),
                p => format!(" props={}", short_value(p)),
            };
            let mut lines = vec![format!("{}{}{}", pad, label, props)];
            for child in &element.children {
                lines.append(node_to_lines(child, level + 1).as_mut());
            }
            return lines;
        }
    }
    vec![format!("{}{}", pad, value)]
}

fn short_value(value: &HostValue) -> String {
    match value {
        HostValue::Object(o) => match &*(**o).borrow() {
            ObjectType::Ordinary(p) => {
                let parts: Vec<String> = p
                    .base()
                    .keys()
                    .iter()
                    .map(|k| {
                        let v = match p.base().get(k) {
                            Some(v) => short_value(v),
                            None => String::new(),
                        };
                        format!("{}: {}", k, v)
                    })
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            ObjectType::Function(f) => format!("function {}", f.name()),
            ObjectType::Array(a) => format!("[{} items]", a.elements.len()),
            ObjectType::Element(_) => "<element>".to_string(),
        },
        _ => value.to_string(),
    }
}

fn component_label(component: &HostValue) -> String {
    if let HostValue::Object(o) = component {
        if let ObjectType::Function(f) = &*(**o).borrow() {
            return f.name().to_string();
        }
    }
    "anonymous".to_string()
}

fn spaces(count: usize) -> String {
    let mut pads = String::with_capacity(count);
    for _ in 0..count {
        pads.push(' ');
    }
    pads
}
