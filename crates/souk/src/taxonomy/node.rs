use derive_more::Deref;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A category in a taxonomy.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TaxonomyNode {
    pub(crate) key: String,
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
}

/// Whether a category accepts listings or only groups other categories.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum NodeKind {
    /// A category listings can be attached to directly.
    Leaf,

    /// A category that narrows down into one or more subcategories.
    Branch(Children),
}

/// The subcategories of a branch, in definition order. Never empty.
#[derive(Debug, PartialEq, Eq, Clone, Deref)]
pub struct Children(pub(crate) IndexMap<String, TaxonomyNode>);

impl TaxonomyNode {
    /// The key of this category, unique among its siblings.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The display name of this category.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns whether listings can be attached to this category.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    /// Returns the subcategories of this category, in definition order.
    ///
    /// Leaves have no subcategories.
    pub fn children(&self) -> impl Iterator<Item = (&str, &TaxonomyNode)> + '_ {
        let children = match &self.kind {
            NodeKind::Leaf => None,
            NodeKind::Branch(children) => Some(children),
        };

        children
            .into_iter()
            .flat_map(|children| children.iter())
            .map(|(key, node)| (key.as_str(), node))
    }

    /// Returns the subcategory with the given key.
    pub fn child(&self, key: &str) -> Option<&TaxonomyNode> {
        match &self.kind {
            NodeKind::Leaf => None,
            NodeKind::Branch(children) => children.get(key),
        }
    }
}

impl Serialize for TaxonomyNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("name", &self.name)?;
        match &self.kind {
            NodeKind::Leaf => map.serialize_entry("isLeaf", &true)?,
            NodeKind::Branch(children) => map.serialize_entry("subcategories", children)?,
        }
        map.end()
    }
}

impl Serialize for Children {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter())
    }
}
