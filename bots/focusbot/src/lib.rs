// SPDX-License-Identifier: PMPL-1.0-or-later
//! Focusbot - keyboard focusability checks for click handlers
//!
//! Part of the gitbot-fleet ecosystem. Focusbot reads JSX syntax trees that
//! a parser has already serialized to JSON and flags every element that has
//! an `onClick` handler but can never receive keyboard focus (WCAG 2.1.1).
//!
//! ## Decision
//!
//! For each element with a click handler, in order:
//!
//! 1. hidden from assistive technology: pass
//! 2. natively interactive (`<button>`, `<a href>`, ...): pass
//! 3. has a parseable integer `tabIndex`: pass
//! 4. otherwise: violation
//!
//! The facts feeding each step come from the traits in [`collaborators`],
//! injected into [`FocusabilityChecker`].

pub mod analyzers;
pub mod collaborators;
pub mod config;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod markup;
pub mod report;
pub mod rule;
pub mod scanner;

pub use config::{Config, Settings};
pub use engine::{CollectingSink, Engine, Report, ReportSink, Rule};
pub use error::{FocusbotError, MarkupError, Result};
pub use markup::{Attribute, AttributeValue, ElementName, ElementNode, Expression};
pub use rule::{FocusabilityChecker, PassReason, Verdict, ONCLICK_HAS_FOCUS_MESSAGE};
