// SPDX-License-Identifier: PMPL-1.0-or-later
//! Normalization of ESTree / Babel JSON syntax trees into [`ElementNode`]s.
//!
//! Both the ESTree `Literal` form and the Babel `StringLiteral` /
//! `NumericLiteral` / `BooleanLiteral` / `NullLiteral` forms are accepted.

use super::{Attribute, AttributeValue, ElementName, ElementNode, Expression, Span};
use crate::error::MarkupError;
use serde_json::Value;
use tracing::debug;

/// Node type of a JSX opening element
pub const OPENING_ELEMENT: &str = "JSXOpeningElement";

/// Root node types: Babel wraps its `Program` in a `File`
pub const TREE_ROOTS: &[&str] = &["File", "Program"];

/// The `type` tag of a syntax-tree node
pub fn node_type(node: &Value) -> Option<&str> {
    node.get("type").and_then(Value::as_str)
}

/// Whether `value` is the root of a whole syntax tree.
pub fn is_tree_root(value: &Value) -> bool {
    node_type(value).is_some_and(|kind| TREE_ROOTS.contains(&kind))
}

impl ElementNode {
    /// Normalize one `JSXOpeningElement` node.
    pub fn from_estree(node: &Value) -> Result<Self, MarkupError> {
        let kind = node_type(node)
            .ok_or_else(|| MarkupError::MalformedNode("node has no type".to_string()))?;
        if kind != OPENING_ELEMENT {
            return Err(MarkupError::NotAnElement(kind.to_string()));
        }

        let name = node
            .get("name")
            .ok_or_else(|| MarkupError::MalformedNode("element has no name".to_string()))?;
        let name = element_name(name)?;

        let mut attributes = Vec::new();
        match node.get("attributes") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for item in items {
                    push_attribute(item, &mut attributes)?;
                }
            }
            Some(_) => {
                return Err(MarkupError::MalformedNode(
                    "attributes is not an array".to_string(),
                ))
            }
        }

        Ok(ElementNode {
            name,
            attributes,
            span: span_of(node),
        })
    }
}

fn identifier(node: &Value) -> Result<String, MarkupError> {
    match node_type(node) {
        Some("JSXIdentifier") | Some("Identifier") => node
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| MarkupError::MalformedNode("identifier without a name".to_string())),
        other => Err(MarkupError::MalformedNode(format!(
            "expected an identifier, found {}",
            other.unwrap_or("untyped node")
        ))),
    }
}

fn element_name(node: &Value) -> Result<ElementName, MarkupError> {
    match node_type(node) {
        Some("JSXIdentifier") => Ok(ElementName::Identifier(identifier(node)?)),
        Some("JSXNamespacedName") => Ok(ElementName::Namespaced {
            namespace: identifier(field(node, "namespace")?)?,
            name: identifier(field(node, "name")?)?,
        }),
        Some("JSXMemberExpression") => {
            let mut segments = match element_name(field(node, "object")?)? {
                ElementName::Identifier(root) => vec![root],
                ElementName::Member(segments) => segments,
                ElementName::Namespaced { .. } => {
                    return Err(MarkupError::MalformedNode(
                        "namespaced name inside a member expression".to_string(),
                    ))
                }
            };
            segments.push(identifier(field(node, "property")?)?);
            Ok(ElementName::Member(segments))
        }
        other => Err(MarkupError::MalformedNode(format!(
            "unsupported element name {}",
            other.unwrap_or("untyped node")
        ))),
    }
}

fn field<'a>(node: &'a Value, key: &str) -> Result<&'a Value, MarkupError> {
    node.get(key)
        .ok_or_else(|| MarkupError::MalformedNode(format!("missing `{}`", key)))
}

fn attribute_name(node: &Value) -> Result<String, MarkupError> {
    match node_type(node) {
        Some("JSXNamespacedName") => Ok(format!(
            "{}:{}",
            identifier(field(node, "namespace")?)?,
            identifier(field(node, "name")?)?
        )),
        _ => identifier(node),
    }
}

fn push_attribute(item: &Value, out: &mut Vec<Attribute>) -> Result<(), MarkupError> {
    match node_type(item) {
        Some("JSXAttribute") => {
            let name = attribute_name(field(item, "name")?)?;
            let value = attribute_value(item.get("value"));
            out.push(Attribute { name, value });
            Ok(())
        }
        Some("JSXSpreadAttribute") => {
            if let Some(argument) = item.get("argument") {
                expand_spread(argument, out);
            }
            Ok(())
        }
        other => Err(MarkupError::MalformedNode(format!(
            "unsupported attribute {}",
            other.unwrap_or("untyped node")
        ))),
    }
}

/// Object-literal spreads contribute their static keys as attributes; any
/// other spread is opaque and contributes nothing.
fn expand_spread(argument: &Value, out: &mut Vec<Attribute>) {
    if node_type(argument) != Some("ObjectExpression") {
        debug!("Dropping opaque spread attribute");
        return;
    }

    let properties = argument
        .get("properties")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for property in properties {
        if !matches!(node_type(property), Some("Property") | Some("ObjectProperty")) {
            continue;
        }
        if property.get("computed").and_then(Value::as_bool).unwrap_or(false) {
            continue;
        }
        let Some(key) = property.get("key").and_then(property_key) else {
            continue;
        };
        let value = property
            .get("value")
            .map(expression)
            .unwrap_or(Expression::Dynamic);
        out.push(Attribute {
            name: key,
            value: AttributeValue::Expression(value),
        });
    }
}

fn property_key(key: &Value) -> Option<String> {
    match node_type(key) {
        Some("Identifier") => key.get("name").and_then(Value::as_str).map(str::to_string),
        Some("Literal") | Some("StringLiteral") => {
            key.get("value").and_then(Value::as_str).map(str::to_string)
        }
        _ => None,
    }
}

fn attribute_value(value: Option<&Value>) -> AttributeValue {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return AttributeValue::Implicit;
    };

    match node_type(value) {
        Some("Literal") | Some("StringLiteral") => match value.get("value") {
            Some(Value::String(s)) => AttributeValue::Literal(s.clone()),
            _ => AttributeValue::Expression(expression(value)),
        },
        Some("JSXExpressionContainer") => AttributeValue::Expression(
            value
                .get("expression")
                .map(expression)
                .unwrap_or(Expression::Undefined),
        ),
        _ => AttributeValue::Expression(expression(value)),
    }
}

/// Statically evaluate as much of an expression as is safe.
pub fn expression(node: &Value) -> Expression {
    match node_type(node) {
        Some("Literal") => {
            // Regex and bigint literals carry a null `value` alongside their own keys
            if node.get("regex").is_some() || node.get("bigint").is_some() {
                return Expression::Dynamic;
            }
            match node.get("value") {
                Some(Value::String(s)) => Expression::String(s.clone()),
                Some(Value::Bool(b)) => Expression::Bool(*b),
                Some(Value::Number(n)) => n.as_f64().map_or(Expression::Dynamic, Expression::Number),
                Some(Value::Null) | None => Expression::Null,
                Some(_) => Expression::Dynamic,
            }
        }
        Some("StringLiteral") => node
            .get("value")
            .and_then(Value::as_str)
            .map_or(Expression::Dynamic, |s| Expression::String(s.to_string())),
        Some("NumericLiteral") => node
            .get("value")
            .and_then(Value::as_f64)
            .map_or(Expression::Dynamic, Expression::Number),
        Some("BooleanLiteral") => node
            .get("value")
            .and_then(Value::as_bool)
            .map_or(Expression::Dynamic, Expression::Bool),
        Some("NullLiteral") => Expression::Null,
        Some("Identifier") => match node.get("name").and_then(Value::as_str) {
            Some("undefined") => Expression::Undefined,
            Some(name) => Expression::Identifier(name.to_string()),
            None => Expression::Dynamic,
        },
        Some("JSXEmptyExpression") => Expression::Undefined,
        Some("TemplateLiteral") => template_literal(node),
        Some("UnaryExpression") => unary(node),
        Some("JSXElement") | Some("JSXFragment") => Expression::Element,
        Some("ParenthesizedExpression")
        | Some("TSAsExpression")
        | Some("TSNonNullExpression")
        | Some("TSSatisfiesExpression")
        | Some("TypeCastExpression") => node
            .get("expression")
            .map(expression)
            .unwrap_or(Expression::Dynamic),
        _ => Expression::Dynamic,
    }
}

fn template_literal(node: &Value) -> Expression {
    let has_interpolation = node
        .get("expressions")
        .and_then(Value::as_array)
        .map_or(false, |e| !e.is_empty());
    if has_interpolation {
        return Expression::Dynamic;
    }

    let quasis = node.get("quasis").and_then(Value::as_array);
    match quasis.map(Vec::as_slice) {
        Some([quasi]) => quasi
            .get("value")
            .and_then(|v| v.get("cooked"))
            .and_then(Value::as_str)
            .map_or(Expression::Dynamic, |s| Expression::String(s.to_string())),
        _ => Expression::Dynamic,
    }
}

fn unary(node: &Value) -> Expression {
    let operator = node.get("operator").and_then(Value::as_str);
    let argument = node.get("argument").map(expression);

    match (operator, argument) {
        (Some("void"), _) => Expression::Undefined,
        (Some("-"), Some(Expression::Number(n))) => Expression::Number(-n),
        (Some("+"), Some(Expression::Number(n))) => Expression::Number(n),
        (Some("!"), Some(Expression::Bool(b))) => Expression::Bool(!b),
        _ => Expression::Dynamic,
    }
}

fn span_of(node: &Value) -> Option<Span> {
    let start = node.get("loc")?.get("start")?;
    let line = start.get("line")?.as_u64()? as usize;
    let column = start.get("column")?.as_u64()? as usize;
    Some(Span {
        line,
        column: column + 1,
    })
}
