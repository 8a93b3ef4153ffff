//! Element tree input and its flattened arena form.
//!
//! Documents arrive as a nested [`ElementNode`] tree (usually deserialized
//! from JSON) and are flattened into a [`Document`] whose node ids are the
//! pre-order indices of the tree. Ids are only meaningful within one build
//! pass.

use serde::Deserialize;
use trellis_types::{LayoutError, Result};

/// Index of a node in a [`Document`]. Equal to the node's pre-order index.
pub type NodeId = usize;

/// A declarative element: `{ type, id?, class?, textContent?, children }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementNode {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    /// Whitespace-separated class list.
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default, rename = "textContent")]
    pub text_content: Option<String>,
    #[serde(default)]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            class: None,
            text_content: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = Some(text.to_string());
        self
    }

    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ElementNode>) -> Self {
        self.children.extend(children);
        self
    }
}

/// One flattened element.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Element type, lowercased.
    pub tag: String,
    pub id: Option<String>,
    /// Class list in declaration order.
    pub classes: Vec<String>,
    pub text_content: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena of nodes in pre-order. `nodes[0]` is the root.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub root: NodeId,
}

impl Document {
    /// Flatten an element tree, assigning ids in pre-order.
    pub fn from_tree(root: &ElementNode) -> Self {
        let mut nodes = Vec::new();
        flatten(root, None, &mut nodes);
        Self { nodes, root: 0 }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node, failing with [`LayoutError::UnknownNode`].
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(LayoutError::UnknownNode(id))
    }

    /// First node (in pre-order) whose `id` attribute equals `element_id`.
    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(element_id))
    }

    /// Number of nodes in the subtree rooted at `id`, including `id`.
    /// Subtrees occupy the contiguous id range `id..id + subtree_len(id)`.
    pub fn subtree_len(&self, id: NodeId) -> usize {
        let mut end = id;
        let mut current = id;
        while let Some(&last) = self.nodes.get(current).and_then(|n| n.children.last()) {
            end = last;
            current = last;
        }
        if id < self.nodes.len() { end - id + 1 } else { 0 }
    }
}

fn flatten(element: &ElementNode, parent: Option<NodeId>, nodes: &mut Vec<Node>) -> NodeId {
    let id = nodes.len();
    nodes.push(Node {
        tag: element.tag.to_ascii_lowercase(),
        id: element.id.clone(),
        classes: element
            .class
            .as_deref()
            .unwrap_or("")
            .split_whitespace()
            .map(str::to_string)
            .collect(),
        text_content: element.text_content.clone(),
        parent,
        children: Vec::with_capacity(element.children.len()),
    });
    for child in &element.children {
        let child_id = flatten(child, Some(id), nodes);
        nodes[id].children.push(child_id);
    }
    id
}
