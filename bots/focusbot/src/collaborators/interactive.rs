// SPDX-License-Identifier: PMPL-1.0-or-later
//! Native DOM elements that take keyboard focus without a tabIndex.

use super::{AttributeLookup, InteractiveClassifier, LastMatchLookup};
use crate::markup::Attribute;

/// Elements that are always interactive
const INTERACTIVE_ELEMENTS: &[&str] = &[
    "button", "datalist", "menuitem", "option", "select", "summary", "textarea",
];

/// Elements that are interactive only when they link somewhere
const LINK_ELEMENTS: &[&str] = &["a", "area"];

/// Classifies DOM tags. Custom components are never interactive.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomInteractiveClassifier;

impl InteractiveClassifier for DomInteractiveClassifier {
    fn is_interactive(&self, tag: &str, attributes: &[Attribute]) -> bool {
        if LINK_ELEMENTS.contains(&tag) {
            return LastMatchLookup
                .lookup(attributes, "href")
                .map_or(false, |href| !href.is_undefined());
        }

        if tag == "input" {
            let input_type = LastMatchLookup
                .lookup(attributes, "type")
                .and_then(|value| value.as_static_str());
            return !input_type.map_or(false, |t| t.eq_ignore_ascii_case("hidden"));
        }

        INTERACTIVE_ELEMENTS.contains(&tag)
    }
}
