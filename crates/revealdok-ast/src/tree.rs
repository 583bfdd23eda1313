//! Arena-backed document tree
//!
//! All nodes live in one vector owned by [`Doctree`]. Restructuring stages
//! work through the named surgery operations below (`detach`, `deep_copy`,
//! `copy_into`, `splice_children`, `replace`) so every rewrite keeps the
//! parent links consistent. Detached nodes stay in the arena until
//! [`Doctree::compact`] drops them.

use std::collections::HashSet;

use crate::error::{Result, TreeError};
use crate::node::{Attributes, Node, NodeId, NodeKind};

/// A document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Doctree {
    nodes: Vec<Node>,
    root: NodeId,
    /// Next candidate for [`Doctree::assign_auto_id`]
    next_auto_id: usize,
}

impl Default for Doctree {
    fn default() -> Self {
        Self::new()
    }
}

impl Doctree {
    /// Create a tree holding only a document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, Attributes::default())],
            root: NodeId::from_index(0),
            next_auto_id: 1,
        }
    }

    /// The document root
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, detached ones included
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Drop every node not reachable from the root
    ///
    /// Attached nodes are renumbered in document order, so any `NodeId` held
    /// from before the call is invalid afterwards. Returns the number of
    /// nodes kept.
    pub fn compact(&mut self) -> usize {
        let order = self.descendants(self.root);
        let mut remap = vec![None; self.nodes.len()];
        for (index, &old) in order.iter().enumerate() {
            remap[old.index()] = Some(NodeId::from_index(index));
        }

        let mut old_nodes: Vec<Option<Node>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());
        for old in order {
            let Some(mut node) = old_nodes[old.index()].take() else {
                continue;
            };
            node.parent = node.parent.and_then(|p| remap[p.index()]);
            node.children = node
                .children
                .iter()
                .filter_map(|c| remap[c.index()])
                .collect();
            nodes.push(node);
        }

        let dropped = old_nodes.len() - nodes.len();
        if dropped > 0 {
            log::debug!("Compacted arena: dropped {} detached nodes", dropped);
        }
        self.nodes = nodes;
        self.root = NodeId::from_index(0);
        self.nodes.len()
    }

    /// Look up a node
    pub fn try_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Look up a node
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Look up a node mutably
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }

    /// Allocate a detached node
    pub fn create(&mut self, kind: NodeKind, attrs: Attributes) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(kind, attrs));
        id
    }

    /// Position of `child` in the child list of `parent`
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.try_node(parent)?
            .children
            .iter()
            .position(|&c| c == child)
    }

    /// Whether `ancestor` appears on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Iterate over the parent chain of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.try_node(id).and_then(|n| n.parent),
        }
    }

    /// Whether the node is reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || self.is_ancestor(self.root, id)
    }

    /// Insert a detached node into `parent` at `index`
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        if self.node(child).parent.is_some() || child == self.root {
            return Err(TreeError::AlreadyAttached(child));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }
        let len = self.node(parent).children.len();
        if index > len {
            return Err(TreeError::IndexOutOfRange { parent, index, len });
        }

        self.node_mut(parent).children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Append a detached node to the children of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        let len = self.node(parent).children.len();
        self.insert_child(parent, len, child)
    }

    /// Create a node and append it to `parent`
    pub fn add_node(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId> {
        self.add_node_with(parent, kind, Attributes::default())
    }

    /// Create a node with attributes and append it to `parent`
    pub fn add_node_with(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        attrs: Attributes,
    ) -> Result<NodeId> {
        self.check(parent)?;
        let id = self.create(kind, attrs);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Remove a node from its parent, returning its former position
    ///
    /// The subtree stays intact and can be re-attached elsewhere.
    pub fn detach(&mut self, id: NodeId) -> Result<usize> {
        self.check(id)?;
        let parent = self.node(id).parent.ok_or(TreeError::NoParent(id))?;
        let index = self
            .index_of(parent, id)
            .ok_or(TreeError::NotAChild { parent, child: id })?;

        self.node_mut(parent).children.remove(index);
        self.node_mut(id).parent = None;
        Ok(index)
    }

    /// Copy a whole subtree, returning the detached copy
    pub fn deep_copy(&mut self, id: NodeId) -> Result<NodeId> {
        self.check(id)?;
        Ok(self.copy_subtree(id))
    }

    fn copy_subtree(&mut self, id: NodeId) -> NodeId {
        let (kind, attrs, children) = {
            let node = self.node(id);
            (node.kind.clone(), node.attrs.clone(), node.children.clone())
        };
        let copy = self.create(kind, attrs);
        for child in children {
            let child_copy = self.copy_subtree(child);
            self.node_mut(child_copy).parent = Some(copy);
            self.node_mut(copy).children.push(child_copy);
        }
        copy
    }

    /// Deep-copy `src` and append the copy to `parent`
    pub fn copy_into(&mut self, src: NodeId, parent: NodeId) -> Result<NodeId> {
        self.check(parent)?;
        let copy = self.deep_copy(src)?;
        self.append_child(parent, copy)?;
        Ok(copy)
    }

    /// Replace a node by its own children, in place
    ///
    /// Returns the number of children moved into the parent.
    pub fn splice_children(&mut self, id: NodeId) -> Result<usize> {
        self.check(id)?;
        let parent = self.node(id).parent.ok_or(TreeError::NoParent(id))?;
        let index = self
            .index_of(parent, id)
            .ok_or(TreeError::NotAChild { parent, child: id })?;

        let children = std::mem::take(&mut self.node_mut(id).children);
        for &child in &children {
            self.node_mut(child).parent = Some(parent);
        }
        let count = children.len();
        self.node_mut(parent)
            .children
            .splice(index..=index, children);
        self.node_mut(id).parent = None;
        Ok(count)
    }

    /// Put the detached node `new` where `old` currently sits
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<()> {
        self.check(old)?;
        self.check(new)?;
        let parent = self.node(old).parent.ok_or(TreeError::NoParent(old))?;
        if self.node(new).parent.is_some() {
            return Err(TreeError::AlreadyAttached(new));
        }
        if new == parent || self.is_ancestor(new, parent) {
            return Err(TreeError::Cycle { parent, child: new });
        }
        let index = self
            .index_of(parent, old)
            .ok_or(TreeError::NotAChild { parent, child: old })?;

        self.node_mut(parent).children[index] = new;
        self.node_mut(new).parent = Some(parent);
        self.node_mut(old).parent = None;
        Ok(())
    }

    /// Sibling immediately before `id`
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_of(parent, id)?;
        index
            .checked_sub(1)
            .map(|i| self.node(parent).children[i])
    }

    /// Pre-order list of `id` and everything below it
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.node(current).children.iter().rev());
        }
        out
    }

    /// Every attached node matching `pred`, in document order
    pub fn find_all(&self, pred: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| pred(self.node(id)))
            .collect()
    }

    /// First attached node matching `pred`, in document order
    pub fn find_first(&self, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| pred(self.node(id)))
    }

    /// Concatenated text of every text leaf under `id`
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| match &self.node(n).kind {
                NodeKind::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Give a node a fresh `idN` identifier unique within the attached tree
    ///
    /// Numbering continues from the last identifier handed out.
    pub fn assign_auto_id(&mut self, id: NodeId) -> String {
        let taken: HashSet<&str> = self
            .descendants(self.root)
            .into_iter()
            .flat_map(|n| self.node(n).attrs.ids.iter().map(String::as_str))
            .collect();

        let mut counter = self.next_auto_id;
        let fresh = loop {
            let candidate = format!("id{}", counter);
            if !taken.contains(candidate.as_str()) {
                break candidate;
            }
            counter += 1;
        };

        self.next_auto_id = counter + 1;
        self.node_mut(id).attrs.ids.push(fresh.clone());
        fresh
    }

    /// Append a title holding a single text leaf
    pub fn add_title(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        let title = self.add_node(parent, NodeKind::title())?;
        self.add_node(title, NodeKind::text(text))?;
        Ok(title)
    }

    /// Append a section with a title
    pub fn add_section(&mut self, parent: NodeId, title: &str) -> Result<NodeId> {
        let section = self.add_node(parent, NodeKind::section())?;
        self.add_title(section, title)?;
        Ok(section)
    }

    /// Append a paragraph holding a single text leaf
    pub fn add_paragraph(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        let para = self.add_node(parent, NodeKind::Paragraph)?;
        self.add_node(para, NodeKind::text(text))?;
        Ok(para)
    }
}

/// Iterator over the parent chain of a node
pub struct Ancestors<'a> {
    tree: &'a Doctree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.node(current).parent;
        Some(current)
    }
}
