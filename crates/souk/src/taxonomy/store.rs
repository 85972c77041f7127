use std::path::{Path, PathBuf};
use std::{fs, io};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::taxonomy::{
    CategoryDefinition, CategoryPath, Children, Definition, NodeKind, TaxonomyNode,
};

const MARKETPLACE_TAXONOMY: &str = include_str!("marketplace.toml");

/// An inconsistency in a taxonomy definition.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum MalformedTaxonomyError {
    #[error("category '{path}' is marked as a leaf but has subcategories")]
    LeafWithSubcategories { path: CategoryPath },

    #[error("category '{path}' has no subcategories and is not marked as a leaf")]
    DanglingBranch { path: CategoryPath },

    #[error("duplicate category key '{path}'")]
    DuplicateKey { path: CategoryPath },

    #[error("invalid category key {key:?} under '{parent}'")]
    InvalidKey { parent: CategoryPath, key: String },
}

#[derive(Error, Debug)]
pub enum LoadTaxonomyError {
    #[error("failed to read taxonomy definition: {0}")]
    Io(#[from] io::Error),

    #[error("invalid TOML taxonomy definition: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON taxonomy definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported taxonomy definition format: '{filepath}'")]
    UnsupportedFormat { filepath: PathBuf },

    #[error("malformed taxonomy: {0}")]
    Malformed(#[from] MalformedTaxonomyError),
}

/// An immutable forest of categories.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TaxonomyStore {
    pub(crate) roots: IndexMap<String, TaxonomyNode>,
}

impl TaxonomyStore {
    /// Builds a [`TaxonomyStore`] from the given [`Definition`].
    pub fn load(definition: &Definition) -> Result<Self, MalformedTaxonomyError> {
        let roots = build_children(&CategoryPath::empty(), definition).map_err(|err| {
            log::warn!("rejected taxonomy definition: {err}");
            err
        })?;

        let store = Self { roots };

        log::debug!(
            "loaded taxonomy with {} root categories ({} categories in total)",
            store.roots.len(),
            store.len()
        );

        Ok(store)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, LoadTaxonomyError> {
        let definition = Definition::from_toml_str(text)?;
        Ok(Self::load(&definition)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoadTaxonomyError> {
        let definition = Definition::from_json_str(text)?;
        Ok(Self::load(&definition)?)
    }

    /// Loads a taxonomy from a `.toml` or `.json` definition file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadTaxonomyError> {
        let path = path.as_ref();

        log::debug!("loading taxonomy definition from {path:?}");

        match path.extension().and_then(|extension| extension.to_str()) {
            Some("toml") => Self::from_toml_str(&fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?),
            _ => Err(LoadTaxonomyError::UnsupportedFormat {
                filepath: path.to_owned(),
            }),
        }
    }

    /// Loads the marketplace taxonomy compiled into this crate.
    pub fn embedded() -> Result<Self, LoadTaxonomyError> {
        Self::from_toml_str(MARKETPLACE_TAXONOMY)
    }

    /// Returns the top-level categories, in definition order.
    pub fn roots(&self) -> impl Iterator<Item = (&str, &TaxonomyNode)> + '_ {
        self.roots.iter().map(|(key, node)| (key.as_str(), node))
    }
}

impl Serialize for TaxonomyStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.roots.iter())
    }
}

fn build_children(
    parent: &CategoryPath,
    definition: &Definition,
) -> Result<IndexMap<String, TaxonomyNode>, MalformedTaxonomyError> {
    let mut children = IndexMap::with_capacity(definition.len());

    for (key, category) in definition.iter() {
        if !CategoryPath::is_valid_key(key) {
            return Err(MalformedTaxonomyError::InvalidKey {
                parent: parent.clone(),
                key: key.clone(),
            });
        }

        let path = parent.child(key.as_str());
        if children.contains_key(key) {
            return Err(MalformedTaxonomyError::DuplicateKey { path });
        }

        let node = build_node(path, key, category)?;
        children.insert(key.clone(), node);
    }

    Ok(children)
}

fn build_node(
    path: CategoryPath,
    key: &str,
    category: &CategoryDefinition,
) -> Result<TaxonomyNode, MalformedTaxonomyError> {
    let subcategories = category
        .subcategories
        .as_ref()
        .filter(|subcategories| !subcategories.is_empty());

    let kind = match (category.is_leaf, subcategories) {
        (true, None) => NodeKind::Leaf,
        (true, Some(_)) => return Err(MalformedTaxonomyError::LeafWithSubcategories { path }),
        (false, Some(subcategories)) => {
            NodeKind::Branch(Children(build_children(&path, subcategories)?))
        }
        (false, None) => return Err(MalformedTaxonomyError::DanglingBranch { path }),
    };

    Ok(TaxonomyNode {
        key: key.to_owned(),
        name: category.name.clone(),
        kind,
    })
}
