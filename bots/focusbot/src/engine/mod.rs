// SPDX-License-Identifier: PMPL-1.0-or-later
//! Tree traversal and report collection.
//!
//! The engine walks a JSON syntax tree depth-first in document order and
//! hands every JSX opening element, once, to each registered [`Rule`].
//! Rules speak back only through a [`ReportSink`].

use crate::markup::estree::{node_type, OPENING_ELEMENT};
use crate::markup::{ElementNode, Span};
use serde_json::Value;
use tracing::warn;

/// A check run against every markup element.
pub trait Rule: Send + Sync {
    fn name(&self) -> &str;

    /// Inspect one element, reporting any problem to `sink`
    fn visit_element(&self, node: &ElementNode, sink: &mut dyn ReportSink);
}

/// Receives rule reports.
pub trait ReportSink {
    fn report(&mut self, rule: &str, node: &ElementNode, message: &str);
}

/// One report, detached from the node it was raised on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub rule: String,
    pub element: String,
    pub span: Option<Span>,
    pub message: String,
}

/// Sink that keeps every report in order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub reports: Vec<Report>,
}

impl ReportSink for CollectingSink {
    fn report(&mut self, rule: &str, node: &ElementNode, message: &str) {
        self.reports.push(Report {
            rule: rule.to_string(),
            element: node.tag(),
            span: node.span,
            message: message.to_string(),
        });
    }
}

/// Counters from one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Elements handed to the rules
    pub elements_visited: usize,
    /// Element nodes rejected at the markup boundary
    pub elements_rejected: usize,
}

/// Keys that never hold child nodes worth visiting
const SKIPPED_KEYS: &[&str] = &["loc", "range", "tokens", "comments", "extra", "start", "end"];

/// Runs a set of rules over syntax trees.
pub struct Engine {
    rules: Vec<Box<dyn Rule>>,
}

impl Engine {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Walk `tree`, visiting each opening element exactly once.
    pub fn run(&self, tree: &Value, sink: &mut dyn ReportSink) -> TraversalStats {
        let mut stats = TraversalStats::default();
        self.walk(tree, sink, &mut stats);
        stats
    }

    fn walk(&self, value: &Value, sink: &mut dyn ReportSink, stats: &mut TraversalStats) {
        match value {
            Value::Array(items) => {
                for item in items {
                    self.walk(item, sink, stats);
                }
            }
            Value::Object(map) => {
                if node_type(value) == Some(OPENING_ELEMENT) {
                    self.visit(value, sink, stats);
                }

                let mut children: Vec<(&str, &Value)> = map
                    .iter()
                    .filter(|(key, child)| {
                        !SKIPPED_KEYS.contains(&key.as_str())
                            && (child.is_object() || child.is_array())
                    })
                    .map(|(key, child)| (key.as_str(), child))
                    .collect();
                // Object keys carry no order; restore source order from positions
                children.sort_by_key(|(key, child)| (position(child), key_rank(key)));

                for (_, child) in children {
                    self.walk(child, sink, stats);
                }
            }
            _ => {}
        }
    }

    fn visit(&self, value: &Value, sink: &mut dyn ReportSink, stats: &mut TraversalStats) {
        match ElementNode::from_estree(value) {
            Ok(node) => {
                stats.elements_visited += 1;
                for rule in &self.rules {
                    rule.visit_element(&node, sink);
                }
            }
            Err(e) => {
                stats.elements_rejected += 1;
                warn!("Skipping element: {}", e);
            }
        }
    }
}

/// Start position of a node, or of the first node in an array.
///
/// Character offsets (`start`, then `range[0]`) are preferred; `loc.start`
/// is used when a parser emitted only line and column.
fn position(value: &Value) -> (u64, u64) {
    let node = match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    };
    let Some(node) = node else {
        return (u64::MAX, u64::MAX);
    };

    let offset = node
        .get("start")
        .and_then(Value::as_u64)
        .or_else(|| node.get("range").and_then(|r| r.get(0)).and_then(Value::as_u64));
    if let Some(offset) = offset {
        return (offset, 0);
    }

    node.get("loc")
        .and_then(|loc| loc.get("start"))
        .and_then(|start| {
            let line = start.get("line")?.as_u64()?;
            let column = start.get("column")?.as_u64()?;
            Some((line, column))
        })
        .unwrap_or((u64::MAX, u64::MAX))
}

/// Tie-break for siblings without positions: a JSX element's opening tag
/// precedes its children, which precede its closing tag.
fn key_rank(key: &str) -> u8 {
    match key {
        "openingElement" => 0,
        "closingElement" => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Recorder;

    impl Rule for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn visit_element(&self, node: &ElementNode, sink: &mut dyn ReportSink) {
            sink.report(self.name(), node, "visited");
        }
    }

    fn at(line: u64, column: u64) -> Value {
        json!({ "start": { "line": line, "column": column } })
    }

    fn element(tag: &str, line: u64, children: Vec<Value>) -> Value {
        json!({
            "type": "JSXElement",
            "loc": at(line, 0),
            "children": children,
            "closingElement": null,
            "openingElement": {
                "type": "JSXOpeningElement",
                "loc": at(line, 0),
                "name": { "type": "JSXIdentifier", "name": tag },
                "attributes": []
            }
        })
    }

    #[test]
    fn test_visits_in_document_order() {
        let tree = json!({
            "type": "Program",
            "body": [element("main", 1, vec![element("div", 2, vec![element("span", 3, vec![])]), element("p", 4, vec![])])]
        });
        let engine = Engine::new(vec![Box::new(Recorder)]);
        let mut sink = CollectingSink::default();
        let stats = engine.run(&tree, &mut sink);

        let order: Vec<_> = sink.reports.iter().map(|r| r.element.as_str()).collect();
        assert_eq!(order, vec!["main", "div", "span", "p"]);
        assert_eq!(stats.elements_visited, 4);
        assert_eq!(stats.elements_rejected, 0);
    }

    #[test]
    fn test_elements_in_attributes_are_visited() {
        let mut outer = element("Tooltip", 1, vec![]);
        outer["openingElement"]["attributes"] = json!([{
            "type": "JSXAttribute",
            "name": { "type": "JSXIdentifier", "name": "content" },
            "value": {
                "type": "JSXExpressionContainer",
                "expression": element("b", 1, vec![])
            }
        }]);
        let engine = Engine::new(vec![Box::new(Recorder)]);
        let mut sink = CollectingSink::default();
        engine.run(&outer, &mut sink);
        assert_eq!(sink.reports.len(), 2);
    }

    #[test]
    fn test_malformed_elements_are_skipped_not_fatal() {
        let tree = json!({
            "type": "Program",
            "body": [
                { "type": "JSXOpeningElement", "attributes": [], "loc": at(1, 0) },
                element("div", 2, vec![])
            ]
        });
        let engine = Engine::new(vec![Box::new(Recorder)]);
        let mut sink = CollectingSink::default();
        let stats = engine.run(&tree, &mut sink);
        assert_eq!(stats.elements_rejected, 1);
        assert_eq!(stats.elements_visited, 1);
        assert_eq!(sink.reports[0].element, "div");
    }

    fn reposition(node: &mut Value, offset: Option<u64>) {
        let map = node.as_object_mut().unwrap();
        map.remove("loc");
        if let Some(offset) = offset {
            map.insert("start".into(), json!(offset));
            map.insert("range".into(), json!([offset, offset + 1]));
        }
    }

    /// An element carrying offsets instead of `loc`, or no position at all
    fn bare(tag: &str, offset: Option<u64>, children: Vec<Value>) -> Value {
        let mut node = element(tag, 0, children);
        reposition(&mut node, offset);
        reposition(&mut node["openingElement"], offset);
        node
    }

    fn order(tree: &Value) -> Vec<String> {
        let engine = Engine::new(vec![Box::new(Recorder)]);
        let mut sink = CollectingSink::default();
        engine.run(tree, &mut sink);
        sink.reports.into_iter().map(|r| r.element).collect()
    }

    #[test]
    fn test_offsets_order_parent_before_child() {
        // acorn-style output: offsets and ranges, no loc
        let tree = json!({
            "type": "Program",
            "start": 0,
            "body": [bare("div", Some(0), vec![bare("span", Some(17), vec![])])]
        });
        assert_eq!(order(&tree), vec!["div", "span"]);
    }

    #[test]
    fn test_range_only_orders_siblings() {
        let mut first = bare("ul", None, vec![]);
        first["range"] = json!([0, 10]);
        let mut second = bare("ol", None, vec![]);
        second["range"] = json!([11, 20]);
        let tree = json!({ "type": "Program", "body": { "a": second, "b": first } });
        assert_eq!(order(&tree), vec!["ul", "ol"]);
    }

    #[test]
    fn test_positionless_tree_visits_opening_element_first() {
        let tree = json!({
            "type": "Program",
            "body": [bare("div", None, vec![bare("span", None, vec![])])]
        });
        assert_eq!(order(&tree), vec!["div", "span"]);
    }

    #[test]
    fn test_no_rules_still_counts() {
        let engine = Engine::new(Vec::new());
        let mut sink = CollectingSink::default();
        let stats = engine.run(&element("div", 1, vec![]), &mut sink);
        assert_eq!(stats.elements_visited, 1);
        assert!(sink.reports.is_empty());
    }
}
