// SPDX-License-Identifier: PMPL-1.0-or-later
//! Tag resolution through component aliases and polymorphic props.

use super::{AttributeLookup, LastMatchLookup, TagResolver};
use crate::config::Settings;
use crate::markup::ElementNode;

/// Resolves tags using the shared JSX [`Settings`].
///
/// A static string on the polymorphic prop replaces the literal tag first;
/// the `components` map is then applied to whatever tag results.
#[derive(Debug, Clone, Default)]
pub struct SettingsTagResolver {
    settings: Settings,
}

impl SettingsTagResolver {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    fn polymorphic_tag<'a>(&self, node: &'a ElementNode, literal: &str) -> Option<&'a str> {
        let prop = self.settings.polymorphic_prop_name.as_deref()?;
        let allow_list = &self.settings.polymorphic_allow_list;
        if !allow_list.is_empty() && !allow_list.iter().any(|t| t == literal) {
            return None;
        }
        LastMatchLookup
            .lookup(&node.attributes, prop)
            .and_then(|value| value.as_static_str())
            .filter(|tag| !tag.is_empty())
    }
}

impl TagResolver for SettingsTagResolver {
    fn resolve(&self, node: &ElementNode) -> String {
        let literal = node.tag();
        let tag = match self.polymorphic_tag(node, &literal) {
            Some(tag) => tag.to_string(),
            None => literal,
        };

        match self.settings.components.get(&tag) {
            Some(alias) => alias.clone(),
            None => tag,
        }
    }
}
