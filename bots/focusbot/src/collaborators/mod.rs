// SPDX-License-Identifier: PMPL-1.0-or-later
//! Facts about a single element that the focusability check builds on.
//!
//! Each fact sits behind a trait so a checker can be wired with any
//! implementation. The defaults here resolve everything statically and
//! answer `false` / `None` whenever a value cannot be known.

pub mod hidden;
pub mod interactive;
pub mod tab_index;
pub mod tags;

pub use hidden::AriaHiddenPredicate;
pub use interactive::DomInteractiveClassifier;
pub use tab_index::NumericTabIndex;
pub use tags::SettingsTagResolver;

use crate::markup::{Attribute, AttributeValue, ElementNode};

/// Finds an attribute value by name.
pub trait AttributeLookup: Send + Sync {
    fn lookup<'a>(&self, attributes: &'a [Attribute], name: &str) -> Option<&'a AttributeValue>;
}

/// Resolves the tag an element effectively renders as.
pub trait TagResolver: Send + Sync {
    fn resolve(&self, node: &ElementNode) -> String;
}

/// Whether assistive technology can reach the element at all.
pub trait HiddenPredicate: Send + Sync {
    fn is_hidden(&self, tag: &str, attributes: &[Attribute]) -> bool;
}

/// Whether the element is focusable by platform default.
pub trait InteractiveClassifier: Send + Sync {
    fn is_interactive(&self, tag: &str, attributes: &[Attribute]) -> bool;
}

/// Parses a `tabIndex` value into an integer.
pub trait TabIndexResolver: Send + Sync {
    fn resolve(&self, value: Option<&AttributeValue>) -> Option<i64>;
}

/// Last attribute with a matching name, compared ASCII case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastMatchLookup;

impl AttributeLookup for LastMatchLookup {
    fn lookup<'a>(&self, attributes: &'a [Attribute], name: &str) -> Option<&'a AttributeValue> {
        attributes
            .iter()
            .rev()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| &attr.value)
    }
}
