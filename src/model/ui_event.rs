//! UI events and the element tree they target.
//!
//! Just enough of a DOM to answer "is this element, or one of its
//! ancestors, a link / an input / inside a designated region".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ===== EventKind =====

/// Declared kind of a UI event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Simple primary-button click. The only primary activation kind.
    Click,
    /// Double click.
    #[serde(rename = "dblclick")]
    DoubleClick,
    /// Middle or other non-primary button click.
    #[serde(rename = "auxclick")]
    AuxClick,
    /// Context menu request (right click, long press).
    #[serde(rename = "contextmenu")]
    ContextMenu,
    /// Any other event type, by name.
    #[serde(untagged)]
    Other(String),
}

impl EventKind {
    /// Whether this is the primary activation kind.
    pub fn is_primary(&self) -> bool {
        matches!(self, EventKind::Click)
    }
}

// ===== TargetElement =====

/// An element in the rendered tree, with its ancestor chain.
///
/// `ancestors` is ordered nearest first: `ancestors[0]` is the parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetElement {
    /// Lowercase tag name (`"a"`, `"span"`, ...).
    pub tag: String,
    /// CSS classes on the element.
    #[serde(default)]
    pub classes: Vec<String>,
    /// Enclosing elements, nearest first.
    #[serde(default)]
    pub ancestors: Vec<ElementNode>,
}

/// A single element without its ancestry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNode {
    /// Lowercase tag name.
    pub tag: String,
    /// CSS classes on the element.
    #[serde(default)]
    pub classes: Vec<String>,
}

impl ElementNode {
    /// Create a node with a tag and classes.
    pub fn new<I, S>(tag: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

impl TargetElement {
    /// Create a target element with no ancestors.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            classes: Vec::new(),
            ancestors: Vec::new(),
        }
    }

    /// Add a class to the element.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Append the next enclosing element (call nearest first).
    pub fn within(mut self, ancestor: ElementNode) -> Self {
        self.ancestors.push(ancestor);
        self
    }

    fn as_node(&self) -> ElementNode {
        ElementNode {
            tag: self.tag.clone(),
            classes: self.classes.clone(),
        }
    }

    /// Whether the element itself matches `selector`.
    pub fn matches(&self, selector: &Selector) -> bool {
        selector.matches_node(&self.tag, |c| self.classes.iter().any(|own| own == c))
    }

    /// Whether the element or any ancestor matches `selector`.
    pub fn closest(&self, selector: &Selector) -> bool {
        self.matches(selector)
            || self
                .ancestors
                .iter()
                .any(|node| selector.matches_node(&node.tag, |c| node.has_class(c)))
    }

    /// Path from the element outwards, for diagnostics.
    pub fn path(&self) -> Vec<ElementNode> {
        std::iter::once(self.as_node())
            .chain(self.ancestors.iter().cloned())
            .collect()
    }
}

// ===== UiEvent =====

/// A UI event as forwarded by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiEvent {
    /// Declared event kind.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Resolved target element, when one could be determined.
    #[serde(default)]
    pub target: Option<TargetElement>,
}

impl UiEvent {
    /// A primary click on `target`.
    pub fn click(target: TargetElement) -> Self {
        Self {
            kind: EventKind::Click,
            target: Some(target),
        }
    }

    /// An event of `kind` with no resolvable target.
    pub fn untargeted(kind: EventKind) -> Self {
        Self { kind, target: None }
    }
}

// ===== Selector =====

/// Simple CSS selector: `tag`, `.class`, or `tag.class`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    class: Option<String>,
}

impl Selector {
    /// Selector matching a tag name.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into().to_ascii_lowercase()),
            class: None,
        }
    }

    /// Selector matching a class.
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            tag: None,
            class: Some(class.into()),
        }
    }

    fn matches_node(&self, tag: &str, has_class: impl Fn(&str) -> bool) -> bool {
        let tag_ok = self
            .tag
            .as_deref()
            .is_none_or(|t| t.eq_ignore_ascii_case(tag));
        let class_ok = self.class.as_deref().is_none_or(has_class);
        tag_ok && class_ok
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            f.write_str(tag)?;
        }
        if let Some(class) = &self.class {
            write!(f, ".{}", class)?;
        }
        Ok(())
    }
}

/// Rejected selector text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSelector {
    /// Empty selector.
    #[error("Selector cannot be empty")]
    Empty,
    /// Anything beyond `tag`, `.class` or `tag.class`.
    #[error("Unsupported selector '{0}': only tag, .class and tag.class are supported")]
    Unsupported(String),
}

impl FromStr for Selector {
    type Err = InvalidSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidSelector::Empty);
        }

        let valid_ident = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };

        let (tag, class) = match s.split_once('.') {
            Some((tag, class)) => (tag, Some(class)),
            None => (s, None),
        };

        let tag = if tag.is_empty() {
            None
        } else if valid_ident(tag) {
            Some(tag.to_ascii_lowercase())
        } else {
            return Err(InvalidSelector::Unsupported(s.to_string()));
        };

        let class = match class {
            Some(class) if valid_ident(class) => Some(class.to_string()),
            Some(_) => return Err(InvalidSelector::Unsupported(s.to_string())),
            None => None,
        };

        Ok(Self { tag, class })
    }
}
