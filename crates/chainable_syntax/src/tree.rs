//! Arena-backed declaration tree.
//!
//! Nodes live in a flat vector and refer to each other by [`NodeId`]. Parent
//! links are plain indices, so walking towards the root never needs shared
//! ownership.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::decl::Decl;
use crate::error::{Error, Result};
use crate::span::Span;

/// Index of a node within its [`SyntaxTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    /// Creates an id from a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A declaration together with its position in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// Declaration payload.
    pub decl: Decl,
    /// Source span, attributes included.
    pub span: Span,
    /// Enclosing node; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Member declarations in source order.
    pub children: Vec<NodeId>,
}

/// A tree of declarations rooted at a source file node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    /// Creates a tree containing only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                decl: Decl::SourceFile,
                span: Span::at_start(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Returns the root node id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the number of nodes, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree only holds its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Appends `decl` as the last member of `parent`.
    ///
    /// # Errors
    /// Returns an error if `parent` is not a node of this tree.
    pub fn add(&mut self, parent: NodeId, decl: Decl, span: Span) -> Result<NodeId> {
        let id = NodeId(self.nodes.len());
        self.nodes
            .get_mut(parent.0)
            .ok_or_else(|| Error::unknown_node(parent))?
            .children
            .push(id);
        self.nodes.push(Node {
            decl,
            span,
            parent: Some(parent),
            children: Vec::new(),
        });
        Ok(id)
    }

    /// Returns the node with the given id, if it exists.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Returns the node with the given id.
    ///
    /// # Errors
    /// Returns an error if `id` is not a node of this tree.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or_else(|| Error::unknown_node(id))
    }

    /// Returns a mutable reference to a node.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or_else(|| Error::unknown_node(id))
    }

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Returns the members of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Iterates over the enclosing nodes of `id`, nearest first, root last.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Returns every node below `id` in source order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        found
    }

    /// Finds the first node, in source order, whose declared name is `name`.
    #[must_use]
    pub fn find_named(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&id| self.get(id).and_then(|node| node.decl.name()) == Some(name))
    }
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the ancestors of a node.
///
/// Created by [`SyntaxTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.get(id)?;
        self.next = node.parent;
        Some((id, node))
    }
}
