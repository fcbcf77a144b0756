//! Tree fixtures - JSON descriptions of tabs and folders
//!
//! ```json
//! {
//!   "current": "docs",
//!   "items": [
//!     { "title": "mail", "pinned": true },
//!     { "container": "work", "collapsed": false, "children": [{ "title": "docs" }] },
//!     { "title": "news", "group": 1 }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{NavError, Result};
use crate::tree::{GroupId, ItemId, TabTree};

/// Top-level fixture document
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    /// Title of the item to make current
    pub current: Option<String>,
    /// Only show this workspace
    pub active_group: Option<u32>,
    pub items: Vec<FixtureItem>,
}

/// One tab or folder
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FixtureItem {
    Container {
        container: String,
        #[serde(default)]
        collapsed: bool,
        #[serde(default)]
        group: u32,
        #[serde(default)]
        children: Vec<FixtureItem>,
    },
    Leaf {
        title: String,
        #[serde(default)]
        pinned: bool,
        #[serde(default)]
        group: u32,
    },
}

impl Fixture {
    /// Parse a fixture from JSON text
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| NavError::fixture(e.to_string()))
    }

    /// Read and parse a fixture file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// A small mixed tree for trying the navigator out
    pub fn sample() -> Self {
        let leaf = |title: &str, pinned: bool| FixtureItem::Leaf {
            title: title.to_string(),
            pinned,
            group: 0,
        };
        Self {
            current: Some("inbox".to_string()),
            active_group: None,
            items: vec![
                leaf("mail", true),
                leaf("calendar", true),
                FixtureItem::Container {
                    container: "work".to_string(),
                    collapsed: false,
                    group: 0,
                    children: vec![leaf("tracker", true), leaf("review", true), leaf("ci", true)],
                },
                FixtureItem::Container {
                    container: "reading".to_string(),
                    collapsed: true,
                    group: 0,
                    children: vec![leaf("paper", true), leaf("blog", true)],
                },
                leaf("inbox", false),
                leaf("search", false),
                leaf("docs", false),
                leaf("news", false),
                leaf("music", false),
            ],
        }
    }

    /// Build the tree this fixture describes
    pub fn build(&self) -> Result<TabTree> {
        let mut tree = TabTree::new();
        for item in &self.items {
            add(&mut tree, item, None)?;
        }
        tree.set_active_group(self.active_group.map(GroupId));

        // Collapse after building so children attach to an expanded folder
        collapse(&mut tree, &self.items)?;

        let current = match &self.current {
            Some(title) => Some(
                tree.find_by_title(title)
                    .ok_or_else(|| NavError::fixture(format!("no item titled '{}'", title)))?,
            ),
            None => tree.visible_at(0),
        };
        if let Some(id) = current {
            tree.set_current(id)?;
        }
        Ok(tree)
    }
}

fn add(tree: &mut TabTree, item: &FixtureItem, parent: Option<ItemId>) -> Result<()> {
    match item {
        FixtureItem::Leaf {
            title,
            pinned,
            group,
        } => {
            tree.add_leaf(parent, title.as_str(), GroupId(*group), *pinned)?;
        }
        FixtureItem::Container {
            container,
            group,
            children,
            ..
        } => {
            let id = tree.add_container(parent, container.as_str(), GroupId(*group))?;
            for child in children {
                add(tree, child, Some(id))?;
            }
        }
    }
    Ok(())
}

fn collapse(tree: &mut TabTree, items: &[FixtureItem]) -> Result<()> {
    for item in items {
        if let FixtureItem::Container {
            container,
            collapsed,
            children,
            ..
        } = item
        {
            if *collapsed {
                if let Some(id) = tree.find_by_title(container) {
                    tree.set_collapsed(id, true)?;
                }
            }
            collapse(tree, children)?;
        }
    }
    Ok(())
}
