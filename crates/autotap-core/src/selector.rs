//! Attribute selector parsing.
//!
//! Grammar: an optional leading class name followed by any number of
//! `[attr='value']` filters. Recognized attributes are `id`, `text`,
//! `textContains`, `contentDescription`, `clickable` and `enabled`; unknown
//! attributes are ignored.

use autotap_protocols::SearchCriteria;
use regex::Regex;
use tracing::debug;

/// Parse a selector into criteria. The class name becomes a class-contains
/// predicate, so `Button` matches `android.widget.Button`.
pub fn parse(selector: &str) -> SearchCriteria {
    let mut criteria = SearchCriteria::new();
    let selector = selector.trim();

    let class_end = selector.find('[').unwrap_or(selector.len());
    let class_name = selector[..class_end].trim();
    if !class_name.is_empty() && class_name != "*" {
        criteria = criteria.class_contains(class_name);
    }

    let Ok(attr_re) = Regex::new(r"\[\s*([A-Za-z]+)\s*=\s*'([^']*)'\s*\]") else {
        return criteria;
    };

    for cap in attr_re.captures_iter(&selector[class_end..]) {
        let value = cap[2].to_string();
        criteria = match &cap[1] {
            "id" => criteria.id(value),
            "text" => criteria.text(value),
            "textContains" => criteria.text_contains(value),
            "contentDescription" => criteria.content_description(value),
            "clickable" => criteria.clickable(value == "true"),
            "enabled" => criteria.enabled(value == "true"),
            other => {
                debug!("Ignoring unknown selector attribute: {}", other);
                criteria
            }
        };
    }

    criteria
}
