use super::*;
use crate::action::Point;

fn button(id: &str, text: &str) -> UiNode {
    UiNode::new("android.widget.Button")
        .with_id(id)
        .with_text(text)
        .clickable(true)
        .enabled(true)
}

// === Bounds ===

#[test]
fn test_bounds_dimensions() {
    let b = Bounds::new(10, 20, 110, 70);
    assert_eq!(b.width(), 100);
    assert_eq!(b.height(), 50);
    assert!(!b.is_empty());
    assert_eq!(b.center(), Point::new(60.0, 45.0));
}

#[test]
fn test_bounds_empty() {
    assert!(Bounds::default().is_empty());
    assert!(Bounds::new(10, 10, 10, 50).is_empty());
    assert!(Bounds::new(50, 0, 10, 10).is_empty());
}

#[test]
fn test_bounds_center_truncates() {
    let b = Bounds::new(0, 0, 5, 5);
    assert_eq!(b.center(), Point::new(2.0, 2.0));
}

// === UiNode ===

#[test]
fn test_node_decodes_accessor_json() {
    let json = r#"{
        "id": "pkg:id/buy",
        "text": "Buy",
        "className": "android.widget.TextView",
        "contentDescription": null,
        "isClickable": true,
        "isEnabled": true,
        "isChecked": false,
        "isScrollable": false,
        "packageName": "pkg",
        "bounds": {"left": 0, "top": 10, "right": 100, "bottom": 60},
        "children": [{"className": "android.view.View"}]
    }"#;

    let node: UiNode = serde_json::from_str(json).unwrap();
    assert_eq!(node.id, "pkg:id/buy");
    assert_eq!(node.class_name, "android.widget.TextView");
    assert_eq!(node.content_description, "");
    assert!(node.clickable);
    assert_eq!(node.bounds.bottom, 60);
    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].id, "");
    assert!(!node.children[0].clickable);
}

#[test]
fn test_node_missing_fields_default() {
    let node: UiNode = serde_json::from_str("{}").unwrap();
    assert_eq!(node, UiNode::default());
    assert!(node.bounds.is_empty());
}

#[test]
fn test_node_serializes_wire_names() {
    let node = button("pkg:id/ok", "OK");
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(json["className"], "android.widget.Button");
    assert_eq!(json["isClickable"], true);
    assert!(json.get("class_name").is_none());
}

#[test]
fn test_subtree_len() {
    let tree = UiNode::new("root")
        .with_child(UiNode::new("a").with_child(UiNode::new("a1")))
        .with_children(vec![UiNode::new("b"), UiNode::new("c")]);
    assert_eq!(tree.subtree_len(), 5);
}

// === SearchCriteria ===

#[test]
fn test_wildcard_matches_everything() {
    let criteria = SearchCriteria::default();
    assert!(criteria.is_wildcard());
    assert!(criteria.matches(&UiNode::default()));
    assert!(criteria.matches(&button("x", "y")));
}

#[test]
fn test_all_present_predicates_must_hold() {
    let node = button("pkg:id/ok", "Confirm order");
    let criteria = SearchCriteria::new().id("pkg:id/ok").clickable(true);
    assert!(criteria.matches(&node));

    let criteria = SearchCriteria::new().id("pkg:id/ok").clickable(false);
    assert!(!criteria.matches(&node));
}

#[test]
fn test_text_contains_checks_description() {
    let node = UiNode::new("View").with_description("Retry now");
    assert!(SearchCriteria::new().text_contains("Retry").matches(&node));
    assert!(!SearchCriteria::new().text("Retry now").matches(&node));
    assert!(SearchCriteria::new().content_description("Retry now").matches(&node));
}

#[test]
fn test_absent_attribute_never_matches_non_empty_predicate() {
    let node = UiNode::default();
    assert!(!SearchCriteria::new().id("pkg:id/x").matches(&node));
    assert!(!SearchCriteria::new().text_contains("x").matches(&node));
    assert!(!SearchCriteria::new().class_contains("Button").matches(&node));
}

#[test]
fn test_class_predicates() {
    let node = button("a", "b");
    assert!(SearchCriteria::new().class_contains("Button").matches(&node));
    assert!(!SearchCriteria::new().class_name("Button").matches(&node));
    assert!(SearchCriteria::new().class_name("android.widget.Button").matches(&node));
}

#[test]
fn test_criteria_deserialize_partial() {
    let criteria: SearchCriteria = serde_json::from_str(r#"{"text": "Go"}"#).unwrap();
    assert_eq!(criteria.text.as_deref(), Some("Go"));
    assert!(criteria.id.is_none());
}

// === PageState ===

#[test]
fn test_page_state_display() {
    assert_eq!(PageState::CaptchaChallenge.to_string(), "captcha_challenge");
    assert_eq!(PageState::default(), PageState::Unknown);
    let json = serde_json::to_string(&PageState::TicketSelectionPage).unwrap();
    assert_eq!(json, "\"ticket_selection_page\"");
}
