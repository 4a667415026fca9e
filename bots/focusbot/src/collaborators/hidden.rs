// SPDX-License-Identifier: PMPL-1.0-or-later
//! Elements removed from the accessibility tree.

use super::{AttributeLookup, HiddenPredicate, LastMatchLookup};
use crate::markup::Attribute;

/// Hidden when `aria-hidden` is statically true, or for `<input type="hidden">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AriaHiddenPredicate;

impl HiddenPredicate for AriaHiddenPredicate {
    fn is_hidden(&self, tag: &str, attributes: &[Attribute]) -> bool {
        if tag.eq_ignore_ascii_case("input") {
            let input_type = LastMatchLookup
                .lookup(attributes, "type")
                .and_then(|value| value.as_static_str());
            if input_type.map_or(false, |t| t.eq_ignore_ascii_case("hidden")) {
                return true;
            }
        }

        LastMatchLookup
            .lookup(attributes, "aria-hidden")
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{AttributeValue, Expression};

    fn with(name: &str, value: AttributeValue) -> Vec<Attribute> {
        vec![Attribute { name: name.into(), value }]
    }

    #[test]
    fn test_aria_hidden_forms() {
        let p = AriaHiddenPredicate;
        assert!(p.is_hidden("div", &with("aria-hidden", AttributeValue::Implicit)));
        assert!(p.is_hidden("div", &with("aria-hidden", AttributeValue::Literal("true".into()))));
        assert!(p.is_hidden(
            "div",
            &with("aria-hidden", AttributeValue::Expression(Expression::Bool(true)))
        ));
        assert!(p.is_hidden("div", &with("aria-hidden", AttributeValue::Literal("TRUE".into()))));
        assert!(p.is_hidden("div", &with("aria-hidden", AttributeValue::Literal("True".into()))));
        assert!(!p.is_hidden("div", &with("aria-hidden", AttributeValue::Literal("false".into()))));
        assert!(!p.is_hidden(
            "div",
            &with("aria-hidden", AttributeValue::Expression(Expression::Identifier("hide".into())))
        ));
        assert!(!p.is_hidden("div", &[]));
    }

    #[test]
    fn test_hidden_input() {
        let p = AriaHiddenPredicate;
        assert!(p.is_hidden("input", &with("type", AttributeValue::Literal("HIDDEN".into()))));
        assert!(!p.is_hidden("input", &with("type", AttributeValue::Literal("text".into()))));
        assert!(!p.is_hidden("div", &with("type", AttributeValue::Literal("hidden".into()))));
    }
}
