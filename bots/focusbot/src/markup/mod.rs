// SPDX-License-Identifier: PMPL-1.0-or-later
//! Markup element nodes as the checker sees them.
//!
//! Syntax trees arrive as loosely-shaped JSON (ESTree or Babel flavoured).
//! The [`estree`] module normalizes each JSX opening element into an
//! [`ElementNode`] with a fixed field set, so nothing past this boundary has
//! to guess at node shapes.

pub mod estree;

use crate::collaborators::{AttributeLookup, LastMatchLookup};
use std::fmt;

/// Name of the click-activation handler prop
pub const ON_CLICK: &str = "onClick";

/// The tag of a markup element, as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementName {
    /// `div`, `Button`
    Identifier(String),
    /// `Foo.Bar.Baz`
    Member(Vec<String>),
    /// `svg:rect`
    Namespaced { namespace: String, name: String },
}

impl ElementName {
    /// Build a name from its written form, splitting on `.` and `:`.
    pub fn from_tag(tag: &str) -> Self {
        if tag.contains('.') {
            return ElementName::Member(tag.split('.').map(str::to_string).collect());
        }
        match tag.split_once(':') {
            Some((namespace, name)) => ElementName::Namespaced {
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            None => ElementName::Identifier(tag.to_string()),
        }
    }
}

impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementName::Identifier(name) => write!(f, "{}", name),
            ElementName::Member(segments) => write!(f, "{}", segments.join(".")),
            ElementName::Namespaced { namespace, name } => write!(f, "{}:{}", namespace, name),
        }
    }
}

/// What can be known statically about an attribute expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `{undefined}`, `{void 0}`, `{}`
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// A reference to some binding other than `undefined`
    Identifier(String),
    /// A JSX element used as a value
    Element,
    /// Anything that needs evaluation to resolve
    Dynamic,
}

/// The value side of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Shorthand attribute with no value (`<div hidden />`), boolean true
    Implicit,
    /// Quoted string (`tabIndex="0"`)
    Literal(String),
    /// Braced expression (`tabIndex={0}`)
    Expression(Expression),
}

impl AttributeValue {
    /// True only for a value that is explicitly the `undefined` sentinel.
    pub fn is_undefined(&self) -> bool {
        matches!(self, AttributeValue::Expression(Expression::Undefined))
    }

    /// Static string content, if the value is a string.
    pub fn as_static_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Literal(s) | AttributeValue::Expression(Expression::String(s)) => {
                Some(s)
            }
            _ => None,
        }
    }

    /// Static boolean reading. The strings `"true"` and `"false"`, in any
    /// case, count as booleans, the way attribute values are coerced in markup.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Implicit => Some(true),
            AttributeValue::Expression(Expression::Bool(b)) => Some(*b),
            other => match other.as_static_str() {
                Some(s) if s.eq_ignore_ascii_case("true") => Some(true),
                Some(s) if s.eq_ignore_ascii_case("false") => Some(false),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

/// Source position of a node, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// One markup element: its tag and its attributes in source order.
///
/// Duplicate attribute names are kept; lookups resolve them with
/// last-occurrence-wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub name: ElementName,
    pub attributes: Vec<Attribute>,
    pub span: Option<Span>,
}

impl ElementNode {
    pub fn new(tag: &str) -> Self {
        Self {
            name: ElementName::from_tag(tag),
            attributes: Vec::new(),
            span: None,
        }
    }

    /// Append an attribute
    pub fn with_attribute(mut self, name: &str, value: AttributeValue) -> Self {
        self.attributes.push(Attribute {
            name: name.to_string(),
            value,
        });
        self
    }

    /// Set the source position
    pub fn with_span(mut self, line: usize, column: usize) -> Self {
        self.span = Some(Span { line, column });
        self
    }

    /// The literal tag as written in the markup
    pub fn tag(&self) -> String {
        self.name.to_string()
    }

    /// True iff an `onClick` attribute is present and not explicitly `undefined`.
    pub fn has_click_handler(&self) -> bool {
        LastMatchLookup
            .lookup(&self.attributes, ON_CLICK)
            .map_or(false, |value| !value.is_undefined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_name_forms() {
        assert_eq!(ElementName::from_tag("div"), ElementName::Identifier("div".into()));
        assert_eq!(
            ElementName::from_tag("Foo.Bar.Baz"),
            ElementName::Member(vec!["Foo".into(), "Bar".into(), "Baz".into()])
        );
        assert_eq!(ElementName::from_tag("svg:rect").to_string(), "svg:rect");
        assert_eq!(ElementName::from_tag("Foo.Bar").to_string(), "Foo.Bar");
    }

    #[test]
    fn test_bool_coercion() {
        assert_eq!(AttributeValue::Implicit.as_bool(), Some(true));
        assert_eq!(AttributeValue::Literal("true".into()).as_bool(), Some(true));
        assert_eq!(AttributeValue::Literal("false".into()).as_bool(), Some(false));
        assert_eq!(AttributeValue::Expression(Expression::Bool(false)).as_bool(), Some(false));
        assert_eq!(AttributeValue::Literal("TRUE".into()).as_bool(), Some(true));
        assert_eq!(
            AttributeValue::Expression(Expression::String("False".into())).as_bool(),
            Some(false)
        );
        assert_eq!(AttributeValue::Literal("yes".into()).as_bool(), None);
        assert_eq!(AttributeValue::Expression(Expression::Dynamic).as_bool(), None);
    }

    #[test]
    fn test_click_handler_detection() {
        let handler = AttributeValue::Expression(Expression::Identifier("f".into()));
        assert!(ElementNode::new("div").with_attribute("onClick", handler.clone()).has_click_handler());
        assert!(!ElementNode::new("div").has_click_handler());
        assert!(!ElementNode::new("div")
            .with_attribute("onClick", AttributeValue::Expression(Expression::Undefined))
            .has_click_handler());
        // Last occurrence wins
        assert!(!ElementNode::new("div")
            .with_attribute("onClick", handler)
            .with_attribute("onClick", AttributeValue::Expression(Expression::Undefined))
            .has_click_handler());
    }
}
