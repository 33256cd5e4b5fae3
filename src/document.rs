use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::error::{Diagnostic, WndError, WndResult};
use crate::parser;
use crate::validator::{validate_tree, BlockContext};
use crate::window::{WindowId, WindowNode};

/// Metadata key written first in every file.
pub const FILE_VERSION: &str = "FILE_VERSION";

/// A parsed WND file: metadata, optional layout block, and the window forest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<IndexMap<String, String>>,
    /// Declaration order is paint order.
    pub windows: Vec<WindowNode>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_version(&self) -> Option<&str> {
        self.metadata.get(FILE_VERSION).map(String::as_str)
    }

    pub fn find(&self, id: WindowId) -> Option<&WindowNode> {
        self.windows.iter().find_map(|w| w.find(id))
    }

    pub fn find_mut(&mut self, id: WindowId) -> Option<&mut WindowNode> {
        self.windows.iter_mut().find_map(|w| w.find_mut(id))
    }

    /// Depth-first `(depth, node)` pairs in declaration order.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.windows.iter().rev().map(|w| (0, w)).collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Equal metadata, layout, fields and tree shape, ignoring identities.
    pub fn structurally_eq(&self, other: &Document) -> bool {
        self.metadata == other.metadata
            && self.layout == other.layout
            && self.windows.len() == other.windows.len()
            && self
                .windows
                .iter()
                .zip(&other.windows)
                .all(|(a, b)| a.structurally_eq(b))
    }

    /// Re-run the value checks over every window, e.g. after in-memory edits.
    pub fn validate(&self, config: &ParserConfig) -> WndResult<Vec<Diagnostic>> {
        let ctx = BlockContext::new("<memory>", 0);
        let mut warnings = Vec::new();
        for window in &self.windows {
            warnings.extend(validate_tree(window, &ctx, config)?);
        }
        Ok(warnings)
    }

    /// Detach a subtree.
    pub fn remove(&mut self, id: WindowId) -> Option<WindowNode> {
        detach(&mut self.windows, id)
    }

    /// Move a node under `parent` (or to the root list) at `index`, clamped to the end.
    pub fn move_node(
        &mut self,
        id: WindowId,
        parent: Option<WindowId>,
        index: usize,
    ) -> WndResult<()> {
        let node = self.find(id).ok_or_else(|| WndError::NodeNotFound {
            id: id.to_string(),
        })?;

        if let Some(parent_id) = parent {
            if node.contains(parent_id) {
                return Err(WndError::InvalidMove {
                    id: id.to_string(),
                    reason: "a window cannot become its own descendant".to_string(),
                });
            }
            if self.find(parent_id).is_none() {
                return Err(WndError::NodeNotFound {
                    id: parent_id.to_string(),
                });
            }
        }

        let node = self.remove(id).ok_or_else(|| WndError::NodeNotFound {
            id: id.to_string(),
        })?;

        let siblings = match parent {
            Some(parent_id) => match self.find_mut(parent_id) {
                Some(p) => &mut p.children,
                None => {
                    return Err(WndError::NodeNotFound {
                        id: parent_id.to_string(),
                    })
                }
            },
            None => &mut self.windows,
        };
        let index = index.min(siblings.len());
        siblings.insert(index, node);
        log::debug!("moved window {} to index {}", id, index);
        Ok(())
    }

    /// Re-parse an edited block and swap it in as the node's property set.
    ///
    /// The node keeps its identity and children. On error nothing changes.
    pub fn replace_properties(
        &mut self,
        id: WindowId,
        text: &str,
        config: &ParserConfig,
    ) -> WndResult<Vec<Diagnostic>> {
        if self.find(id).is_none() {
            return Err(WndError::NodeNotFound { id: id.to_string() });
        }

        let parsed = parser::parse_block_with_config(text, id, "<edit>", config)?;
        let target = self
            .find_mut(id)
            .ok_or_else(|| WndError::NodeNotFound { id: id.to_string() })?;
        target.properties = parsed.value.properties;
        Ok(parsed.diagnostics)
    }
}

fn detach(nodes: &mut Vec<WindowNode>, id: WindowId) -> Option<WindowNode> {
    if let Some(pos) = nodes.iter().position(|n| n.id == id) {
        return Some(nodes.remove(pos));
    }
    nodes.iter_mut().find_map(|n| detach(&mut n.children, id))
}

/// Iterator returned by [`Document::walk`].
pub struct Walk<'a> {
    stack: Vec<(usize, &'a WindowNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a WindowNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::create_default;
    use pretty_assertions::assert_eq;

    fn node(kind: &str, name: &str) -> WindowNode {
        let mut n = create_default(kind, WindowId::new()).unwrap();
        n.properties.name.name = name.to_string();
        n
    }

    /// root(a, b(c)), other
    fn sample() -> Document {
        let mut b = node("USER", "b");
        b.children.push(node("PUSHBUTTON", "c"));
        let mut root = node("USER", "root");
        root.children.push(node("STATICTEXT", "a"));
        root.children.push(b);
        Document {
            windows: vec![root, node("USER", "other")],
            ..Document::default()
        }
    }

    fn names(doc: &Document) -> Vec<(usize, String)> {
        doc.walk()
            .map(|(d, n)| (d, n.display_name().to_string()))
            .collect()
    }

    fn id_of(doc: &Document, name: &str) -> WindowId {
        doc.walk()
            .find(|(_, n)| n.display_name() == name)
            .map(|(_, n)| n.id)
            .unwrap()
    }

    #[test]
    fn test_walk_is_depth_first_in_order() {
        let doc = sample();
        assert_eq!(
            names(&doc),
            vec![
                (0, "root".to_string()),
                (1, "a".to_string()),
                (1, "b".to_string()),
                (2, "c".to_string()),
                (0, "other".to_string()),
            ]
        );
        assert_eq!(doc.node_count(), 5);
    }

    #[test]
    fn test_find_nested() {
        let doc = sample();
        let c = id_of(&doc, "c");
        assert_eq!(doc.find(c).map(|n| n.display_name()), Some("c"));
        assert!(doc.find(WindowId::new()).is_none());
    }

    #[test]
    fn test_move_into_other_parent() {
        let mut doc = sample();
        let c = id_of(&doc, "c");
        let other = id_of(&doc, "other");
        doc.move_node(c, Some(other), 0).unwrap();
        assert_eq!(
            names(&doc),
            vec![
                (0, "root".to_string()),
                (1, "a".to_string()),
                (1, "b".to_string()),
                (0, "other".to_string()),
                (1, "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_move_to_root_clamps_index() {
        let mut doc = sample();
        let a = id_of(&doc, "a");
        doc.move_node(a, None, 99).unwrap();
        assert_eq!(doc.windows.last().map(|w| w.display_name()), Some("a"));
    }

    #[test]
    fn test_move_into_own_subtree_is_refused() {
        let mut doc = sample();
        let root = id_of(&doc, "root");
        let c = id_of(&doc, "c");
        let before = doc.clone();
        assert!(matches!(
            doc.move_node(root, Some(c), 0),
            Err(WndError::InvalidMove { .. })
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_validate_reaches_nested_windows() {
        let mut doc = sample();
        assert_eq!(doc.validate(&ParserConfig::default()).unwrap(), Vec::new());

        let c = id_of(&doc, "c");
        doc.find_mut(c).unwrap().properties.font.size = 99;
        assert!(matches!(
            doc.validate(&ParserConfig::default()),
            Err(WndError::Value { .. })
        ));
    }

    #[test]
    fn test_remove_returns_subtree() {
        let mut doc = sample();
        let b = id_of(&doc, "b");
        let removed = doc.remove(b).unwrap();
        assert_eq!(removed.children.len(), 1);
        assert_eq!(doc.node_count(), 3);
    }
}
