use derive_more::{Display, IsVariant};
use hashlink::LinkedHashSet;

/// Handle to a node stored in a [`FileTree`](super::FileTree).
///
/// Handles are only minted by the tree that owns the node.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("#{_0}")]
pub struct NodeId(pub(super) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node is, carrying only the fields that variant needs.
#[derive(Debug, Clone, IsVariant)]
pub enum NodeKind {
    File,
    /// Owns its children; insertion order is kept for stable iteration.
    Directory { children: LinkedHashSet<NodeId> },
    /// Points at another node without owning it.
    Link { target: Option<NodeId> },
}

impl NodeKind {
    pub(super) fn directory() -> Self {
        NodeKind::Directory {
            children: LinkedHashSet::new(),
        }
    }

    pub fn children(&self) -> Option<&LinkedHashSet<NodeId>> {
        match self {
            NodeKind::Directory { children } => Some(children),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilesystemNode {
    pub(super) base_name: String,
    pub(super) parent: Option<NodeId>,
    pub(super) kind: NodeKind,
}

impl FilesystemNode {
    /// The base name stored on this node itself. Links store their own
    /// name here but report their target's name through the tree.
    pub fn stored_base_name(&self) -> &str {
        &self.base_name
    }

    /// `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
