// SPDX-License-Identifier: PMPL-1.0-or-later
//! `tabIndex` parsing.

use super::TabIndexResolver;
use crate::markup::{AttributeValue, Expression};

/// Accepts integers written as numbers or numeric strings. Negative values
/// are returned as-is; they are still defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericTabIndex;

impl TabIndexResolver for NumericTabIndex {
    fn resolve(&self, value: Option<&AttributeValue>) -> Option<i64> {
        match value? {
            AttributeValue::Literal(text) | AttributeValue::Expression(Expression::String(text)) => {
                parse_integer(text)
            }
            AttributeValue::Expression(Expression::Number(n)) => integral(*n),
            // Booleans, shorthand, null, undefined and anything dynamic
            _ => None,
        }
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().and_then(integral)
}

fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 {
        Some(n as i64)
    } else {
        None
    }
}
