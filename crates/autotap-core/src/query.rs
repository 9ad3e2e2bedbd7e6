//! UI tree query engine.
//!
//! Every function here is a pure search over one frozen snapshot. Results
//! borrow from the snapshot and go stale as soon as the real UI changes;
//! callers fetch a fresh tree for every decision.
//!
//! Traversal is pre-order depth-first, so "first" means first in document
//! order and collecting variants return matches in document order.

use std::fmt::Write as _;

use autotap_config::OutOfStockMarker;
use autotap_protocols::{SearchCriteria, UiNode};

use crate::selector;

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;

/// Pre-order iterator over a subtree, the root included.
pub struct PreOrder<'a> {
    stack: Vec<&'a UiNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a UiNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

pub fn walk(root: &UiNode) -> PreOrder<'_> {
    PreOrder { stack: vec![root] }
}

pub fn find_first<'a>(root: &'a UiNode, criteria: &SearchCriteria) -> Option<&'a UiNode> {
    walk(root).find(|node| criteria.matches(node))
}

pub fn find_all<'a>(root: &'a UiNode, criteria: &SearchCriteria) -> Vec<&'a UiNode> {
    walk(root).filter(|node| criteria.matches(node)).collect()
}

/// Exact resource id match.
pub fn find_by_id<'a>(root: &'a UiNode, id: &str) -> Option<&'a UiNode> {
    find_first(root, &SearchCriteria::new().id(id))
}

pub fn find_all_by_id<'a>(root: &'a UiNode, id: &str) -> Vec<&'a UiNode> {
    find_all(root, &SearchCriteria::new().id(id))
}

/// Substring match on text or content description.
pub fn find_by_text<'a>(root: &'a UiNode, text: &str) -> Option<&'a UiNode> {
    find_first(root, &SearchCriteria::new().text_contains(text))
}

pub fn find_all_by_text<'a>(root: &'a UiNode, text: &str) -> Vec<&'a UiNode> {
    find_all(root, &SearchCriteria::new().text_contains(text))
}

/// Substring match on class name.
pub fn find_by_class<'a>(root: &'a UiNode, class_name: &str) -> Option<&'a UiNode> {
    find_first(root, &SearchCriteria::new().class_contains(class_name))
}

pub fn find_all_by_class<'a>(root: &'a UiNode, class_name: &str) -> Vec<&'a UiNode> {
    find_all(root, &SearchCriteria::new().class_contains(class_name))
}

/// Class-name path search, not anchored at `root`.
///
/// A node matching the first segment continues the remaining segments in
/// its children, and the full path is re-attempted at every descendant. A
/// node reachable through several partial matches is returned once per
/// match, so duplicates are expected. An empty path yields `root`.
pub fn find_by_path<'a, S: AsRef<str>>(root: &'a UiNode, segments: &[S]) -> Vec<&'a UiNode> {
    let mut out = Vec::new();
    collect_path(root, segments, &mut out);
    out
}

fn collect_path<'a, S: AsRef<str>>(node: &'a UiNode, segments: &[S], out: &mut Vec<&'a UiNode>) {
    let Some((head, rest)) = segments.split_first() else {
        out.push(node);
        return;
    };

    if node.class_name.contains(head.as_ref()) {
        if rest.is_empty() {
            out.push(node);
        } else {
            for child in &node.children {
                collect_path(child, rest, out);
            }
        }
    }

    for child in &node.children {
        collect_path(child, segments, out);
    }
}

/// Class-name path search anchored at `root`: `root` must match the first
/// segment and each following segment must match a direct child of the
/// previous match. Never yields duplicates.
pub fn find_by_path_anchored<'a, S: AsRef<str>>(
    root: &'a UiNode,
    segments: &[S],
) -> Vec<&'a UiNode> {
    let mut out = Vec::new();
    collect_anchored(root, segments, &mut out);
    out
}

fn collect_anchored<'a, S: AsRef<str>>(
    node: &'a UiNode,
    segments: &[S],
    out: &mut Vec<&'a UiNode>,
) {
    let Some((head, rest)) = segments.split_first() else {
        out.push(node);
        return;
    };

    if !node.class_name.contains(head.as_ref()) {
        return;
    }

    if rest.is_empty() {
        out.push(node);
    } else {
        for child in &node.children {
            collect_anchored(child, rest, out);
        }
    }
}

/// Minimal XPath-like lookup.
///
/// - `//Button` searches every node whose class contains `Button`
/// - `LinearLayout/TextView` runs [`find_by_path`]
/// - a bare `Button` behaves like `//Button`
pub fn find_by_xpath<'a>(root: &'a UiNode, expr: &str) -> Vec<&'a UiNode> {
    if let Some(class_name) = expr.strip_prefix("//") {
        find_all_by_class(root, class_name)
    } else if expr.contains('/') {
        let segments: Vec<&str> = expr.split('/').collect();
        find_by_path(root, &segments)
    } else {
        find_all_by_class(root, expr)
    }
}

/// Attribute selector lookup, e.g. `Button[text='OK'][clickable='true']`.
pub fn find_by_selector<'a>(root: &'a UiNode, selector: &str) -> Vec<&'a UiNode> {
    find_all(root, &selector::parse(selector))
}

/// Search the subtree of the first node with `container_id`. Empty when the
/// container is absent.
pub fn find_in_container<'a>(
    root: &'a UiNode,
    container_id: &str,
    criteria: &SearchCriteria,
) -> Vec<&'a UiNode> {
    match find_by_id(root, container_id) {
        Some(container) => find_all(container, criteria),
        None => Vec::new(),
    }
}

/// Direct children that are clickable, in order.
pub fn clickable_children(node: &UiNode) -> Vec<&UiNode> {
    node.children.iter().filter(|child| child.clickable).collect()
}

/// Whether any node of the subtree, `node` included, carries one of the
/// `(id, text)` markers exactly.
pub fn subtree_has_marker(node: &UiNode, markers: &[OutOfStockMarker]) -> bool {
    walk(node).any(|n| markers.iter().any(|m| n.id == m.id && n.text == m.text))
}

/// Indented one-line-per-node dump for diagnostics.
pub fn describe_tree(root: &UiNode) -> String {
    let mut out = String::new();
    describe_into(root, 0, &mut out);
    out
}

fn describe_into(node: &UiNode, depth: usize, out: &mut String) {
    let b = node.bounds;
    let _ = write!(
        out,
        "{:indent$}{} [{},{}][{},{}]",
        "",
        if node.class_name.is_empty() { "?" } else { node.class_name.as_str() },
        b.left,
        b.top,
        b.right,
        b.bottom,
        indent = depth * 2
    );
    if !node.id.is_empty() {
        let _ = write!(out, " id={}", node.id);
    }
    if !node.text.is_empty() {
        let _ = write!(out, " text={:?}", node.text);
    }
    if !node.content_description.is_empty() {
        let _ = write!(out, " desc={:?}", node.content_description);
    }
    if node.clickable {
        out.push_str(" clickable");
    }
    if !node.enabled {
        out.push_str(" disabled");
    }
    if node.checked {
        out.push_str(" checked");
    }
    if node.scrollable {
        out.push_str(" scrollable");
    }
    out.push('\n');

    for child in &node.children {
        describe_into(child, depth + 1, out);
    }
}
