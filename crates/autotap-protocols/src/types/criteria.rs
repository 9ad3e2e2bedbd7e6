//! Node search predicates.

use serde::{Deserialize, Serialize};

use super::node::UiNode;

/// A set of optional predicates over [`UiNode`] attributes.
///
/// A node matches iff every present predicate holds; absent predicates are
/// wildcards, so `SearchCriteria::default()` matches every node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Substring of the text or of the content description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_contains: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_contains: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn text_contains(mut self, text: impl Into<String>) -> Self {
        self.text_contains = Some(text.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn class_contains(mut self, class_name: impl Into<String>) -> Self {
        self.class_contains = Some(class_name.into());
        self
    }

    pub fn content_description(mut self, description: impl Into<String>) -> Self {
        self.content_description = Some(description.into());
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = Some(clickable);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// True when no predicate is set.
    pub fn is_wildcard(&self) -> bool {
        self == &Self::default()
    }

    /// Check a single node against every present predicate.
    pub fn matches(&self, node: &UiNode) -> bool {
        if let Some(id) = &self.id {
            if node.id != *id {
                return false;
            }
        }

        if let Some(text) = &self.text {
            if node.text != *text {
                return false;
            }
        }

        if let Some(needle) = &self.text_contains {
            if !node.text.contains(needle.as_str())
                && !node.content_description.contains(needle.as_str())
            {
                return false;
            }
        }

        if let Some(class_name) = &self.class_name {
            if node.class_name != *class_name {
                return false;
            }
        }

        if let Some(needle) = &self.class_contains {
            if !node.class_name.contains(needle.as_str()) {
                return false;
            }
        }

        if let Some(description) = &self.content_description {
            if node.content_description != *description {
                return false;
            }
        }

        if let Some(clickable) = self.clickable {
            if node.clickable != clickable {
                return false;
            }
        }

        if let Some(enabled) = self.enabled {
            if node.enabled != enabled {
                return false;
            }
        }

        true
    }
}
