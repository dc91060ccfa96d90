//! In-memory filesystem tree whose node identities are expressed as names.
//!
//! Nodes are directories (that own other nodes), files, or links (that point
//! at another node without owning it). All nodes are stored in one arena
//! inside [`FileTree`] and referenced through [`NodeId`] handles.

mod node;
mod tree;

pub use node::{FilesystemNode, NodeId, NodeKind};
pub use tree::FileTree;
