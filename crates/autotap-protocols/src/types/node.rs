//! UI tree snapshot nodes.
//!
//! A [`UiNode`] tree is a value copied out of the platform at fetch time. It
//! is never updated in place: once the real UI changes the snapshot is stale
//! and has to be fetched again.

use serde::{Deserialize, Deserializer, Serialize};

use crate::action::Point;

/// Screen rectangle in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub right: i32,
    #[serde(default)]
    pub bottom: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Integer center, matching how the platform reports it.
    pub fn center(&self) -> Point {
        Point::new(
            ((self.left + self.right) / 2) as f32,
            ((self.top + self.bottom) / 2) as f32,
        )
    }
}

/// One node of a UI tree snapshot.
///
/// Field names on the wire follow the privileged accessor's JSON encoding.
/// Missing or `null` string attributes decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiNode {
    /// Namespaced resource id, e.g. `com.example:id/submit`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,

    #[serde(default, rename = "className", deserialize_with = "null_as_empty")]
    pub class_name: String,

    #[serde(
        default,
        rename = "contentDescription",
        deserialize_with = "null_as_empty"
    )]
    pub content_description: String,

    #[serde(default, rename = "packageName", deserialize_with = "null_as_empty")]
    pub package_name: String,

    #[serde(default)]
    pub bounds: Bounds,

    #[serde(default, rename = "isClickable")]
    pub clickable: bool,

    #[serde(default, rename = "isEnabled")]
    pub enabled: bool,

    #[serde(default, rename = "isChecked")]
    pub checked: bool,

    #[serde(default, rename = "isScrollable")]
    pub scrollable: bool,

    #[serde(default)]
    pub children: Vec<UiNode>,
}

impl UiNode {
    /// Create a node of the given class with every other attribute empty.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.content_description = description.into();
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package_name = package.into();
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_child(mut self, child: UiNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = UiNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Total number of nodes in this subtree, the node itself included.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(UiNode::subtree_len).sum::<usize>()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
