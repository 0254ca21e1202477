//! Nested key/value trees read from and written to locale files.

mod format;

pub use format::TreeFormat;

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};

/// A value in a [`TranslationTree`]: either a translated string or a nested group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Leaf(String),
    Branch(TranslationTree),
}

impl Node {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Branch(_) => None,
        }
    }

    pub const fn as_branch(&self) -> Option<&TranslationTree> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(tree) => Some(tree),
        }
    }

    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "string",
            Self::Branch(_) => "group",
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Leaf(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Leaf(value)
    }
}

impl From<TranslationTree> for Node {
    fn from(tree: TranslationTree) -> Self {
        Self::Branch(tree)
    }
}

/// Insertion-ordered mapping of keys to leaves or nested trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTree(IndexMap<String, Node>);

impl TranslationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for literals.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, node: impl Into<Node>) -> Self {
        self.insert(key, node);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) {
        self.0.insert(key.into(), node.into());
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    /// Looks up a leaf by dotted path (`auth.failed`).
    ///
    /// A top-level key containing the dots literally wins, so flat files
    /// with dotted keys resolve too.
    pub fn get_path(&self, path: &str) -> Option<&str> {
        if let Some(value) = self.0.get(path).and_then(Node::as_leaf) {
            return Some(value);
        }

        let (head, rest) = path.split_once('.')?;
        self.0.get(head)?.as_branch()?.get_path(rest)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, Node> {
        self.0.iter()
    }

    /// Number of leaves at any depth.
    pub fn leaf_count(&self) -> usize {
        self.0
            .values()
            .map(|node| match node {
                Node::Leaf(_) => 1,
                Node::Branch(tree) => tree.leaf_count(),
            })
            .sum()
    }

    /// Same tree with leaves ahead of groups at every level.
    ///
    /// TOML cannot place a bare key after a table header.
    pub(crate) fn leaves_first(&self) -> Self {
        let leaves = self
            .iter()
            .filter(|(_, node)| matches!(node, Node::Leaf(_)))
            .map(|(k, node)| (k.clone(), node.clone()));
        let branches = self.iter().filter_map(|(k, node)| match node {
            Node::Branch(tree) => Some((k.clone(), Node::Branch(tree.leaves_first()))),
            Node::Leaf(_) => None,
        });
        Self(leaves.chain(branches).collect())
    }
}

impl<'a> IntoIterator for &'a TranslationTree {
    type Item = (&'a String, &'a Node);
    type IntoIter = Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, N: Into<Node>> FromIterator<(K, N)> for TranslationTree {
    fn from_iter<T: IntoIterator<Item = (K, N)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, n)| (k.into(), n.into())).collect())
    }
}
