mod compose;

pub use compose::compose;
use serde::{Serialize, Serializer, ser::SerializeStruct};

/// One entry in the navigation sidebar.
///
/// Nodes are constructed fresh on each composition and immutable once
/// returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavNode {
  /// A directory containing an index document and no subdirectories.
  Leaf {
    /// Display label.
    text: String,
    /// Link path, always ending with a trailing slash.
    link: String,
  },

  /// A directory containing subdirectories.
  ///
  /// The link, if present, points either to the group's own index document
  /// or to the link collapsed out of a same-named child.
  Group {
    text:     String,
    link:     Option<String>,
    children: Vec<NavNode>,
  },
}

impl NavNode {
  /// Display label of this entry.
  #[must_use]
  pub fn text(&self) -> &str {
    match self {
      Self::Leaf { text, .. } | Self::Group { text, .. } => text,
    }
  }

  /// Link path of this entry, if it has one.
  #[must_use]
  pub fn link(&self) -> Option<&str> {
    match self {
      Self::Leaf { link, .. } => Some(link),
      Self::Group { link, .. } => link.as_deref(),
    }
  }

  /// Child entries; empty for leaves.
  #[must_use]
  pub fn children(&self) -> &[Self] {
    match self {
      Self::Leaf { .. } => &[],
      Self::Group { children, .. } => children,
    }
  }

  /// Whether the theme should render this entry as collapsible.
  #[must_use]
  pub fn is_collapsible(&self) -> bool {
    !self.children().is_empty()
  }

  /// Key used for lexicographic sibling ordering: the link path, falling
  /// back to the display label for linkless groups.
  pub(crate) fn sort_key(&self) -> &str {
    self.link().unwrap_or_else(|| self.text())
  }

  pub(crate) fn into_link(self) -> Option<String> {
    match self {
      Self::Leaf { link, .. } => Some(link),
      Self::Group { link, .. } => link,
    }
  }
}

// Serialized with the flat `{ text, link, collapsible, children }` shape that
// theme layers consume, for both variants.
impl Serialize for NavNode {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    let mut state = serializer.serialize_struct("NavNode", 4)?;
    state.serialize_field("text", self.text())?;
    state.serialize_field("link", &self.link())?;
    state.serialize_field("collapsible", &self.is_collapsible())?;
    state.serialize_field("children", self.children())?;
    state.end()
  }
}
