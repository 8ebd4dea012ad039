use pest::error::{Error, ErrorVariant};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use super::ast::{Fragment, TemplateAttribute, TemplateNode};
use crate::host::error::HostError;

#[derive(Parser)]
#[grammar = "markup/markup_grammar.pest"] // relative to src
pub struct MarkupParser;

impl MarkupParser {
    /// Parse one markup fragment into its template AST.
    pub fn parse_fragment(source: &str) -> Result<Fragment, HostError> {
        let mut pairs = MarkupParser::parse(Rule::fragment, source)
            .map_err(|e| HostError::SyntaxError(format!("{}", e)))?;
        let fragment_pair = match pairs.next() {
            Some(p) => p,
            None => return Err(HostError::SyntaxError("empty fragment".to_string())),
        };
        let root_pair = fragment_pair
            .into_inner()
            .find(|p| p.as_rule() == Rule::node);
        match root_pair {
            Some(p) => Ok(Fragment {
                root: build_node(p).map_err(|e| HostError::SyntaxError(format!("{}", e)))?,
            }),
            None => Err(HostError::SyntaxError("empty fragment".to_string())),
        }
    }
}

fn get_unexpected_error(code: usize, pair: &Pair<Rule>) -> Error<Rule> {
    Error::new_from_span(
        ErrorVariant::CustomError {
            message: format!("Unexpected rule {:?} ({})", pair.as_rule(), code),
        },
        pair.as_span(),
    )
}

fn custom_error(message: String, span: pest::Span) -> Error<Rule> {
    Error::new_from_span(ErrorVariant::CustomError { message }, span)
}

fn is_component_name(name: &str) -> bool {
    name.chars()
        .next()
        .map(|c| c.is_ascii_uppercase())
        .unwrap_or(false)
}

fn build_node(pair: Pair<Rule>) -> Result<TemplateNode, Error<Rule>> {
    let span = pair.as_span();
    let inner = match pair.into_inner().next() {
        Some(p) => p,
        None => return Err(custom_error("empty node".to_string(), span)),
    };
    match inner.as_rule() {
        Rule::element => {
            let span = inner.as_span();
            match inner.into_inner().next() {
                Some(p) => build_element(p),
                None => Err(custom_error("empty element".to_string(), span)),
            }
        }
        Rule::text => Ok(TemplateNode::Text(inner.as_str().trim().to_string())),
        _ => Err(get_unexpected_error(1, &inner)),
    }
}

fn build_element(pair: Pair<Rule>) -> Result<TemplateNode, Error<Rule>> {
    let self_closing = pair.as_rule() == Rule::self_closing_element;
    let span = pair.as_span();
    let mut name = String::new();
    let mut attributes = vec![];
    let mut children = vec![];
    let mut closing_name: Option<String> = None;
    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::tag_name => name = p.as_str().to_string(),
            Rule::attribute => attributes.push(build_attribute(p)?),
            Rule::node => children.push(build_node(p)?),
            Rule::close_tag => {
                closing_name = p.into_inner().next().map(|t| t.as_str().to_string())
            }
            _ => return Err(get_unexpected_error(2, &p)),
        }
    }
    if !self_closing {
        match &closing_name {
            Some(closing) if *closing == name => {}
            _ => {
                return Err(custom_error(
                    format!("mismatched closing tag for <{}>", name),
                    span,
                ))
            }
        }
    }
    Ok(if is_component_name(&name) {
        TemplateNode::Slot {
            name,
            attributes,
            children,
        }
    } else {
        TemplateNode::Element {
            tag: name,
            attributes,
            children,
        }
    })
}

fn build_attribute(pair: Pair<Rule>) -> Result<TemplateAttribute, Error<Rule>> {
    let span = pair.as_span();
    let inner = match pair.into_inner().next() {
        Some(p) => p,
        None => return Err(custom_error("empty attribute".to_string(), span)),
    };
    match inner.as_rule() {
        Rule::spread_attribute => {
            let span = inner.as_span();
            match inner.into_inner().next() {
                Some(identifier) => Ok(TemplateAttribute::Spread {
                    binding: identifier.as_str().to_string(),
                }),
                None => Err(custom_error("malformed spread attribute".to_string(), span)),
            }
        }
        Rule::literal_attribute => {
            let span = inner.as_span();
            let mut parts = inner.into_inner();
            let name = match parts.next() {
                Some(p) => p.as_str().to_string(),
                None => return Err(custom_error("malformed attribute".to_string(), span)),
            };
            let value = match parts.next().and_then(|v| v.into_inner().next()) {
                Some(p) => p.as_str().to_string(),
                None => return Err(custom_error("malformed attribute value".to_string(), span)),
            };
            Ok(TemplateAttribute::Literal { name, value })
        }
        _ => Err(get_unexpected_error(3, &inner)),
    }
}
