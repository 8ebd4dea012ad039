//! AST for markup fragments.

#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub root: TemplateNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// Intrinsic element, e.g. `<div>` or `<h3>`.
    Element {
        tag: String,
        attributes: Vec<TemplateAttribute>,
        children: Vec<TemplateNode>,
    },
    /// Component slot, e.g. `<Original {...props} />`. The capitalized name
    /// is resolved against slot bindings at evaluation time.
    Slot {
        name: String,
        attributes: Vec<TemplateAttribute>,
        children: Vec<TemplateNode>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateAttribute {
    /// `name="value"`
    Literal { name: String, value: String },
    /// `{...binding}`
    Spread { binding: String },
}
