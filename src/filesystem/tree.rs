use std::collections::HashSet;

use snafu::{OptionExt, ResultExt, ensure};
use tracing::{debug, warn};

use crate::contract::{IllegalArgumentSnafu, InvalidStateSnafu, Result, ServiceFailureSnafu};
use crate::filesystem::{FilesystemNode, NodeId, NodeKind};
use crate::names::{ComponentListName, Name, escape};

/// An in-memory tree of directories, files and links.
///
/// All nodes live in one arena owned by the tree. Directories own their
/// children through the child sets; the parent of a node and the target of a
/// link are plain handles and never own anything.
#[derive(Debug, Clone)]
pub struct FileTree {
    nodes: Vec<FilesystemNode>,
    root: NodeId,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    /// Creates a tree holding only the root directory, whose base name is empty.
    pub fn new() -> Self {
        let root = FilesystemNode {
            base_name: String::new(),
            parent: None,
            kind: NodeKind::directory(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn get(&self, id: NodeId) -> Result<&FilesystemNode> {
        self.nodes.get(id.0).context(IllegalArgumentSnafu {
            message: format!("unknown node {id}"),
        })
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut FilesystemNode> {
        self.nodes.get_mut(id.0).context(IllegalArgumentSnafu {
            message: format!("unknown node {id}"),
        })
    }

    pub fn kind(&self, id: NodeId) -> Result<&NodeKind> {
        Ok(self.get(id)?.kind())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(id)?.parent())
    }

    /// Children of a directory in insertion order; empty for other nodes.
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self
            .get(id)?
            .kind()
            .children()
            .map(|children| children.iter().copied().collect())
            .unwrap_or_default())
    }

    pub fn create_directory(&mut self, base_name: &str, parent: NodeId) -> Result<NodeId> {
        self.attach(base_name, parent, NodeKind::directory())
    }

    pub fn create_file(&mut self, base_name: &str, parent: NodeId) -> Result<NodeId> {
        self.attach(base_name, parent, NodeKind::File)
    }

    /// Creates a link. A link without target is valid, but asking for its
    /// base name or renaming it fails until a target is set.
    pub fn create_link(
        &mut self,
        base_name: &str,
        parent: NodeId,
        target: Option<NodeId>,
    ) -> Result<NodeId> {
        if let Some(target) = target {
            self.get(target)?;
        }
        self.attach(base_name, parent, NodeKind::Link { target })
    }

    pub fn link_target(&self, link: NodeId) -> Result<Option<NodeId>> {
        match self.get(link)?.kind() {
            NodeKind::Link { target } => Ok(*target),
            _ => IllegalArgumentSnafu {
                message: format!("node {link} is not a link"),
            }
            .fail(),
        }
    }

    pub fn set_link_target(&mut self, link: NodeId, new_target: NodeId) -> Result<()> {
        self.get(new_target)?;
        match &mut self.get_mut(link)?.kind {
            NodeKind::Link { target } => {
                *target = Some(new_target);
                debug!("Pointed link {} at {}", link, new_target);
                Ok(())
            }
            _ => IllegalArgumentSnafu {
                message: format!("node {link} is not a link"),
            }
            .fail(),
        }
    }

    fn attach(&mut self, base_name: &str, parent: NodeId, kind: NodeKind) -> Result<NodeId> {
        ensure!(
            self.get(parent)?.kind().is_directory(),
            IllegalArgumentSnafu {
                message: format!("parent {parent} is not a directory"),
            }
        );

        let id = NodeId(self.nodes.len());
        self.nodes.push(FilesystemNode {
            base_name: base_name.to_string(),
            parent: Some(parent),
            kind,
        });
        self.add_child_node(parent, id)?;

        ensure!(
            self.has_child_node(parent, id),
            InvalidStateSnafu {
                message: format!("{parent} does not contain new node {id}"),
            }
        );
        debug!("Created node {} '{}' under {}", id, base_name, parent);
        Ok(id)
    }

    pub fn has_child_node(&self, directory: NodeId, child: NodeId) -> bool {
        self.nodes
            .get(directory.0)
            .and_then(|node| node.kind().children())
            .is_some_and(|children| children.contains(&child))
    }

    /// Only node creation and [`FileTree::move_node`] touch child sets, so
    /// parent handles always agree with membership.
    pub(crate) fn add_child_node(&mut self, directory: NodeId, child: NodeId) -> Result<()> {
        self.get(child)?;
        match &mut self.get_mut(directory)?.kind {
            NodeKind::Directory { children } => {
                children.insert(child);
                Ok(())
            }
            _ => IllegalArgumentSnafu {
                message: format!("node {directory} is not a directory"),
            }
            .fail(),
        }
    }

    pub(crate) fn remove_child_node(&mut self, directory: NodeId, child: NodeId) -> Result<()> {
        self.get(child)?;
        match &mut self.get_mut(directory)?.kind {
            NodeKind::Directory { children } => {
                children.remove(&child);
                Ok(())
            }
            _ => IllegalArgumentSnafu {
                message: format!("node {directory} is not a directory"),
            }
            .fail(),
        }
    }

    /// Follows links until a directory or file is reached.
    fn resolve(&self, id: NodeId) -> Result<NodeId> {
        let mut current = id;
        for _ in 0..=self.nodes.len() {
            match self.get(current)?.kind() {
                NodeKind::Link { target } => {
                    current = (*target).context(IllegalArgumentSnafu {
                        message: format!("link {current} has no target"),
                    })?;
                }
                _ => return Ok(current),
            }
        }
        InvalidStateSnafu {
            message: format!("links starting at {id} form a cycle"),
        }
        .fail()
    }

    /// The base name of a node; links report the base name of their target.
    pub fn base_name(&self, id: NodeId) -> Result<String> {
        let node = self.get(self.resolve(id)?)?;
        ensure!(
            node.is_root() || !node.base_name.is_empty(),
            InvalidStateSnafu {
                message: "non-root nodes must have non-empty base names",
            }
        );
        Ok(node.base_name.clone())
    }

    /// Renames a node. Renaming a link renames its target instead.
    pub fn rename(&mut self, id: NodeId, new_base_name: &str) -> Result<()> {
        let target = self.resolve(id)?;
        let node = self.get_mut(target)?;
        debug!("Renaming {} from '{}' to '{}'", target, node.base_name, new_base_name);
        node.base_name = new_base_name.to_string();
        Ok(())
    }

    /// The name made of the base names from below the root down to `id`.
    /// The root contributes no component.
    pub fn full_name(&self, id: NodeId) -> Result<ComponentListName> {
        match self.get(id)?.parent() {
            None => Ok(ComponentListName::default()),
            Some(parent) => {
                let mut name = self.full_name(parent)?;
                let component = escape::escape(&self.base_name(id)?, name.delimiter());
                name.append(&component)?;
                Ok(name)
            }
        }
    }

    /// Moves `id` into the directory `to`.
    pub fn move_node(&mut self, id: NodeId, to: NodeId) -> Result<()> {
        let from = self.get(id)?.parent().context(IllegalArgumentSnafu {
            message: "the root cannot be moved",
        })?;
        ensure!(
            self.get(to)?.kind().is_directory(),
            IllegalArgumentSnafu {
                message: format!("move target {to} is not a directory"),
            }
        );
        ensure!(
            to != id && !self.is_descendant_of(to, id),
            IllegalArgumentSnafu {
                message: format!("cannot move {id} into its own subtree"),
            }
        );

        self.remove_child_node(from, id)?;
        self.add_child_node(to, id)?;
        self.get_mut(id)?.parent = Some(to);

        ensure!(
            self.has_child_node(to, id) && (from == to || !self.has_child_node(from, id)),
            InvalidStateSnafu {
                message: format!("{id} was not moved from {from} to {to}"),
            }
        );
        debug!("Moved {} from {} to {}", id, from, to);
        Ok(())
    }

    fn is_descendant_of(&self, candidate: NodeId, ancestor: NodeId) -> bool {
        let mut current = candidate;
        while let Some(parent) = self.nodes.get(current.0).and_then(FilesystemNode::parent) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    /// Every node in the subtree rooted at `id`, `id` included, whose base
    /// name is `base_name`. Links match on their target's name but their
    /// targets are not searched.
    pub fn find_nodes(&self, id: NodeId, base_name: &str) -> Result<HashSet<NodeId>> {
        self.get(id)?;
        let mut found = HashSet::new();
        self.collect_matches(id, base_name, &mut found)?;
        Ok(found)
    }

    fn collect_matches(
        &self,
        id: NodeId,
        base_name: &str,
        found: &mut HashSet<NodeId>,
    ) -> Result<()> {
        let own = self.base_name(id).inspect_err(|e| {
            warn!("Search for '{}' hit invalid node {}: {}", base_name, id, e);
        });
        let own = own.context(ServiceFailureSnafu {
            message: format!("service has invalid state at node {id}"),
        })?;
        if own == base_name {
            found.insert(id);
        }

        if let Some(children) = self.get(id)?.kind().children() {
            for &child in children {
                self.collect_matches(child, base_name, found)?;
            }
        }
        Ok(())
    }

    /// Creates the directories and final file a name describes below the
    /// root, reusing nodes that already exist. Returns the last node.
    pub fn insert_path(&mut self, path: &dyn Name) -> Result<NodeId> {
        let base_names = Self::logical_components(path)?;

        let mut current = self.root;
        let last = base_names.len() - 1;
        for (i, base_name) in base_names.iter().enumerate() {
            current = match self.child_named(current, base_name) {
                Some(existing) if i == last => existing,
                Some(existing) => {
                    ensure!(
                        self.get(existing)?.kind().is_directory(),
                        IllegalArgumentSnafu {
                            message: format!("cannot insert below '{base_name}', it is not a directory"),
                        }
                    );
                    existing
                }
                None if i == last => self.create_file(base_name, current)?,
                None => self.create_directory(base_name, current)?,
            };
        }
        Ok(current)
    }

    /// Finds the node a name describes below the root.
    /// An empty name is the full name of the root.
    pub fn lookup(&self, path: &dyn Name) -> Result<Option<NodeId>> {
        if path.is_empty() {
            return Ok(Some(self.root));
        }
        let base_names = Self::logical_components(path)?;

        let mut current = self.root;
        for base_name in &base_names {
            match self.child_named(current, base_name) {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    fn logical_components(path: &dyn Name) -> Result<Vec<String>> {
        let delimiter = path.delimiter();
        let base_names = path
            .components()
            .iter()
            .map(|c| escape::unescape(c, delimiter))
            .collect::<Vec<_>>();
        ensure!(
            !base_names.is_empty() && base_names.iter().all(|b| !b.is_empty()),
            IllegalArgumentSnafu {
                message: format!("path '{}' has empty components", path.as_string()),
            }
        );
        Ok(base_names)
    }

    /// Links whose base name cannot be resolved never match.
    fn child_named(&self, directory: NodeId, base_name: &str) -> Option<NodeId> {
        self.nodes
            .get(directory.0)?
            .kind()
            .children()?
            .iter()
            .copied()
            .find(|&child| self.base_name(child).is_ok_and(|b| b == base_name))
    }
}
