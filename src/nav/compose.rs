use std::{
  fs,
  path::{Path, PathBuf},
};

use log::debug;

use crate::{config::Config, error::SidenavError, nav::NavNode};

/// Label keyword forcing an entry to the front of its sibling list.
const PINNED_KEYWORD: &str = "QuickStart";

/// Compose the sidebar tree for the configured documentation root.
///
/// Returns the ordered top-level entries, preceded by a fixed Home leaf
/// linking to the resolved base path (or `/` when none was resolved). The
/// tree is rebuilt from the filesystem on every call.
///
/// # Errors
///
/// Returns an error if the documentation root or any directory beneath it
/// cannot be read. Composition runs at build time under operator control, so
/// filesystem failures are fatal rather than skipped.
pub fn compose(config: &Config) -> Result<Vec<NavNode>, SidenavError> {
  let prefix = config.base.as_deref().unwrap_or("").trim_end_matches('/');
  debug!("composing sidebar from {}", config.docs_dir.display());

  let mut dirs = subdirectories(&config.docs_dir)?;
  dirs.retain(|(name, _)| name != &config.reserved_dir);

  let items = compose_items(config, dirs, prefix)?;

  let mut nodes = Vec::with_capacity(items.len() + 1);
  nodes.push(NavNode::Leaf {
    text: config.home_title.clone(),
    link: config.base.clone().unwrap_or_else(|| "/".to_string()),
  });
  nodes.extend(items);

  Ok(nodes)
}

/// Immediate subdirectories of `dir` as (name, path) pairs.
fn subdirectories(
  dir: &Path,
) -> Result<Vec<(String, PathBuf)>, SidenavError> {
  let mut dirs = Vec::new();

  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    if !entry.file_type()?.is_dir() {
      continue;
    }
    let name = entry.file_name().to_string_lossy().into_owned();
    dirs.push((name, entry.path()));
  }

  Ok(dirs)
}

/// Recursively classify a sibling set of directories into navigation nodes.
///
/// A directory with subdirectories becomes a group: linked through its own
/// index document when it has one, otherwise through a same-named child when
/// one can be collapsed. A directory with only an index document becomes a
/// leaf. A directory with neither yields no node at all.
fn compose_items(
  config: &Config,
  dirs: Vec<(String, PathBuf)>,
  parent: &str,
) -> Result<Vec<NavNode>, SidenavError> {
  let mut items = Vec::new();

  for (name, path) in dirs {
    let subdirs = subdirectories(&path)?;
    let has_index = path.join(&config.index_file).is_file();
    let own_link = format!("{parent}/{name}/");

    if subdirs.is_empty() {
      if has_index {
        items.push(NavNode::Leaf {
          text: display_text(&name),
          link: own_link,
        });
      }
      continue;
    }

    let mut children =
      compose_items(config, subdirs, &format!("{parent}/{name}"))?;
    let link = if has_index {
      Some(own_link)
    } else {
      collapse_same_name(&name, &mut children)
    };

    items.push(NavNode::Group {
      text: display_text(&name),
      link,
      children,
    });
  }

  sort_items(&mut items);
  Ok(items)
}

/// Collapse a same-named child into its parent: remove the child whose link
/// ends with `/{name}/` (case-insensitive) from the sibling list and hand its
/// link back for the parent to adopt.
fn collapse_same_name(
  name: &str,
  children: &mut Vec<NavNode>,
) -> Option<String> {
  let needle = format!("/{}/", name.to_uppercase());
  let index = children.iter().position(|child| {
    child
      .link()
      .is_some_and(|link| link.to_uppercase().ends_with(&needle))
  })?;

  children.remove(index).into_link()
}

/// Order a sibling list with three successive stable passes: lexicographic by
/// link path (label when linkless), then entries that are linked or
/// collapsible ahead of bare groups, then any pinned-keyword entry forced to
/// the front.
fn sort_items(items: &mut [NavNode]) {
  items.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
  items.sort_by_key(|item| {
    std::cmp::Reverse(
      u8::from(item.link().is_some()) + u8::from(item.is_collapsible()),
    )
  });
  items.sort_by_key(|item| !item.text().contains(PINNED_KEYWORD));
}

/// Directory name with its first character uppercased.
fn display_text(name: &str) -> String {
  let mut chars = name.chars();
  chars.next().map_or_else(String::new, |first| {
    first.to_uppercase().collect::<String>() + chars.as_str()
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn leaf(text: &str, link: &str) -> NavNode {
    NavNode::Leaf {
      text: text.to_string(),
      link: link.to_string(),
    }
  }

  #[test]
  fn test_display_text_uppercases_first_char() {
    assert_eq!(display_text("guide"), "Guide");
    assert_eq!(display_text("How To"), "How To");
    assert_eq!(display_text(""), "");
  }

  #[test]
  fn test_collapse_same_name_removes_child() {
    let mut children = vec![
      leaf("Models", "/api/models/"),
      leaf("Api", "/api/api/"),
    ];

    let link = collapse_same_name("api", &mut children);
    assert_eq!(link, Some("/api/api/".to_string()));
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].text(), "Models");
  }

  #[test]
  fn test_collapse_is_case_insensitive() {
    let mut children = vec![leaf("API", "/stuff/API/")];

    let link = collapse_same_name("api", &mut children);
    assert_eq!(link, Some("/stuff/API/".to_string()));
    assert!(children.is_empty());
  }

  #[test]
  fn test_collapse_without_match_leaves_children_alone() {
    let mut children = vec![leaf("Models", "/api/models/")];

    assert_eq!(collapse_same_name("api", &mut children), None);
    assert_eq!(children.len(), 1);
  }

  #[test]
  fn test_sort_is_lexicographic_by_link() {
    let mut items = vec![leaf("B", "/b/"), leaf("A", "/a/")];
    sort_items(&mut items);

    assert_eq!(items[0].text(), "A");
    assert_eq!(items[1].text(), "B");
  }

  #[test]
  fn test_sort_puts_bare_groups_last() {
    let mut items = vec![
      NavNode::Group {
        text:     "Appendix".to_string(),
        link:     None,
        children: vec![],
      },
      leaf("Zebra", "/zebra/"),
    ];
    sort_items(&mut items);

    assert_eq!(items[0].text(), "Zebra");
    assert_eq!(items[1].text(), "Appendix");
  }

  #[test]
  fn test_sort_pins_quickstart_first() {
    let mut items = vec![
      leaf("Advanced", "/advanced/"),
      leaf("QuickStart", "/quickstart/"),
      leaf("Basics", "/basics/"),
    ];
    sort_items(&mut items);

    assert_eq!(items[0].text(), "QuickStart");
    assert_eq!(items[1].text(), "Advanced");
    assert_eq!(items[2].text(), "Basics");
  }
}
