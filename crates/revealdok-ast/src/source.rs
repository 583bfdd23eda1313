//! Nested, serde-friendly form of the document tree
//!
//! The host pipeline hands trees over as nested [`SourceNode`] values
//! (typically JSON). They are flattened into a [`Doctree`] arena for the
//! transforms and can be dumped back out after rewriting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::node::{Attributes, NodeId, NodeKind};
use crate::tree::Doctree;

/// A node with its subtree inlined
///
/// ```json
/// {"type": "section", "ids": ["intro"], "children": [
///     {"type": "title", "children": [{"type": "text", "text": "Intro"}]}
/// ]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(flatten)]
    pub attrs: Attributes,
    /// Raw slide directive options (`class`, `background-color`, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SourceNode>,
}

impl SourceNode {
    /// A node without attributes or children
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: Attributes::default(),
            options: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style child append
    pub fn child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }
}

impl Doctree {
    /// Build a tree from its nested form, ignoring directive options
    pub fn from_source(source: &SourceNode) -> Result<Self, TreeError> {
        Self::from_source_with(source, |_, _| Ok(()))
    }

    /// Build a tree from its nested form
    ///
    /// `apply` is called for every node before it is attached and may turn
    /// the raw `options` into attributes.
    pub fn from_source_with<E, F>(source: &SourceNode, mut apply: F) -> Result<Self, E>
    where
        E: From<TreeError>,
        F: FnMut(&SourceNode, &mut Attributes) -> Result<(), E>,
    {
        if source.kind != NodeKind::Document {
            return Err(TreeError::RootNotDocument {
                found: source.kind.name().to_string(),
            }
            .into());
        }

        let mut tree = Doctree::new();
        let root = tree.root();
        let mut attrs = source.attrs.clone();
        apply(source, &mut attrs)?;
        tree.node_mut(root).attrs = attrs;

        for child in &source.children {
            tree.load_subtree(root, child, &mut apply)?;
        }
        Ok(tree)
    }

    fn load_subtree<E, F>(&mut self, parent: NodeId, source: &SourceNode, apply: &mut F) -> Result<(), E>
    where
        E: From<TreeError>,
        F: FnMut(&SourceNode, &mut Attributes) -> Result<(), E>,
    {
        let mut attrs = source.attrs.clone();
        apply(source, &mut attrs)?;
        let id = self.add_node_with(parent, source.kind.clone(), attrs)?;
        for child in &source.children {
            self.load_subtree(id, child, apply)?;
        }
        Ok(())
    }

    /// Dump a subtree back into its nested form
    pub fn to_source(&self, id: NodeId) -> SourceNode {
        let node = self.node(id);
        SourceNode {
            kind: node.kind.clone(),
            attrs: node.attrs.clone(),
            options: BTreeMap::new(),
            children: node
                .children()
                .iter()
                .map(|&child| self.to_source(child))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "document",
        "children": [
            {"type": "section", "ids": ["intro"], "children": [
                {"type": "title", "children": [{"type": "text", "text": "Intro"}]},
                {"type": "paragraph", "children": [{"type": "text", "text": "Hello"}]},
                {"type": "slide_break", "local_title": "+More", "options": {"transition": "fade"}}
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_nested_json() {
        let source: SourceNode = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(source.kind, NodeKind::Document);

        let section = &source.children[0];
        assert_eq!(section.attrs.ids, vec!["intro"]);
        assert_eq!(section.children.len(), 3);
        assert_eq!(
            section.children[2].options.get("transition").map(String::as_str),
            Some("fade")
        );
    }

    #[test]
    fn test_from_source_builds_arena() {
        let source: SourceNode = serde_json::from_str(SAMPLE).unwrap();
        let tree = Doctree::from_source(&source).unwrap();

        let breaks = tree.find_all(|n| n.kind.is_slide_break());
        assert_eq!(breaks.len(), 1);
        assert_eq!(tree.text_content(tree.root()), "IntroHello");
    }

    #[test]
    fn test_from_source_rejects_non_document_root() {
        let source = SourceNode::new(NodeKind::Paragraph);
        let err = Doctree::from_source(&source).unwrap_err();
        assert_eq!(
            err,
            TreeError::RootNotDocument {
                found: "paragraph".to_string()
            }
        );
    }

    #[test]
    fn test_to_source_mirrors_tree() {
        let source: SourceNode = serde_json::from_str(SAMPLE).unwrap();
        let tree = Doctree::from_source(&source).unwrap();
        let dumped = tree.to_source(tree.root());

        assert_eq!(dumped.children.len(), 1);
        assert_eq!(dumped.children[0].children[1].kind, NodeKind::Paragraph);
        // options are consumed on load
        assert!(dumped.children[0].children[2].options.is_empty());
    }
}
