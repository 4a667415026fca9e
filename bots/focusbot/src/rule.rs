// SPDX-License-Identifier: PMPL-1.0-or-later
//! onclick-has-focus: elements with click handlers must be keyboard focusable.
//!
//! A click handler on an element that never receives keyboard focus leaves
//! keyboard-only users with no way to trigger it (WCAG 2.1.1 Keyboard).

use crate::collaborators::{
    AriaHiddenPredicate, AttributeLookup, DomInteractiveClassifier, HiddenPredicate,
    InteractiveClassifier, LastMatchLookup, NumericTabIndex, SettingsTagResolver, TabIndexResolver,
    TagResolver,
};
use crate::config::Settings;
use crate::engine::{ReportSink, Rule};
use crate::markup::{ElementNode, ON_CLICK};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rule name used in reports
pub const RULE_NAME: &str = "onclick-has-focus";

/// Reported verbatim for every violation
pub const ONCLICK_HAS_FOCUS_MESSAGE: &str = "Elements with onClick handlers must be focusable. \
Either set the tabIndex property to a valid value (usually 0), or use an element type which is \
inherently focusable such as a button.";

/// Options object accepted by the rule. It has no keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOptions {}

/// Why a node passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    HiddenFromAssistiveTech,
    InherentlyInteractive,
    ExplicitTabIndex,
}

/// Outcome of checking one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No click handler; the rule does not apply
    Skip,
    Pass(PassReason),
    Violation(&'static str),
}

impl Verdict {
    pub fn is_violation(&self) -> bool {
        matches!(self, Verdict::Violation(_))
    }
}

/// Decides whether a clickable element can take keyboard focus.
pub struct FocusabilityChecker {
    lookup: Box<dyn AttributeLookup>,
    tags: Box<dyn TagResolver>,
    hidden: Box<dyn HiddenPredicate>,
    interactive: Box<dyn InteractiveClassifier>,
    tab_index: Box<dyn TabIndexResolver>,
}

impl FocusabilityChecker {
    pub fn new(
        lookup: Box<dyn AttributeLookup>,
        tags: Box<dyn TagResolver>,
        hidden: Box<dyn HiddenPredicate>,
        interactive: Box<dyn InteractiveClassifier>,
        tab_index: Box<dyn TabIndexResolver>,
    ) -> Self {
        Self {
            lookup,
            tags,
            hidden,
            interactive,
            tab_index,
        }
    }

    /// Checker wired with the default collaborators.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Box::new(LastMatchLookup),
            Box::new(SettingsTagResolver::new(settings.clone())),
            Box::new(AriaHiddenPredicate),
            Box::new(DomInteractiveClassifier),
            Box::new(NumericTabIndex),
        )
    }

    pub fn check(&self, node: &ElementNode) -> Verdict {
        let attributes = node.attributes.as_slice();

        match self.lookup.lookup(attributes, ON_CLICK) {
            None => return Verdict::Skip,
            Some(handler) if handler.is_undefined() => return Verdict::Skip,
            Some(_) => {}
        }

        let tag = self.tags.resolve(node);

        if self.hidden.is_hidden(&tag, attributes) {
            return Verdict::Pass(PassReason::HiddenFromAssistiveTech);
        }
        if self.interactive.is_interactive(&tag, attributes) {
            return Verdict::Pass(PassReason::InherentlyInteractive);
        }
        let tab_index = self.lookup.lookup(attributes, "tabIndex");
        if self.tab_index.resolve(tab_index).is_some() {
            return Verdict::Pass(PassReason::ExplicitTabIndex);
        }

        Verdict::Violation(ONCLICK_HAS_FOCUS_MESSAGE)
    }
}

impl Default for FocusabilityChecker {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Rule for FocusabilityChecker {
    fn name(&self) -> &str {
        RULE_NAME
    }

    fn visit_element(&self, node: &ElementNode, sink: &mut dyn ReportSink) {
        let verdict = self.check(node);
        debug!(element = %node.name, ?verdict, "checked element");
        if let Verdict::Violation(message) = verdict {
            sink.report(self.name(), node, message);
        }
    }
}
