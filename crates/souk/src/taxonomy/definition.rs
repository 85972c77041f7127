use std::fmt;

use derive_more::Deref;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// A taxonomy definition: category keys mapped to their [`CategoryDefinition`]s,
/// in the order they were written.
///
/// Unlike a map, a definition keeps every entry it was given, including
/// repeated sibling keys, so that loading it can reject them instead of
/// silently keeping one.
#[derive(Debug, PartialEq, Eq, Clone, Default, Deref)]
pub struct Definition(Vec<(String, CategoryDefinition)>);

/// A single category as written in a taxonomy definition.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryDefinition {
    pub name: String,

    #[serde(default, rename = "isLeaf")]
    pub is_leaf: bool,

    #[serde(default)]
    pub subcategories: Option<Definition>,
}

impl Definition {
    /// Returns a new, empty [`Definition`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a category to the definition.
    pub fn category(mut self, key: impl Into<String>, category: CategoryDefinition) -> Self {
        self.0.push((key.into(), category));
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl CategoryDefinition {
    /// Returns a category that listings can be attached to.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_leaf: true,
            subcategories: None,
        }
    }

    /// Returns a category that groups the given subcategories.
    pub fn branch(name: impl Into<String>, subcategories: Definition) -> Self {
        Self {
            name: name.into(),
            is_leaf: false,
            subcategories: Some(subcategories),
        }
    }
}

impl<'de> Deserialize<'de> for Definition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DefinitionVisitor;

        impl<'de> Visitor<'de> for DefinitionVisitor {
            type Value = Definition;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category keys to categories")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, CategoryDefinition>()? {
                    entries.push(entry);
                }

                Ok(Definition(entries))
            }
        }

        deserializer.deserialize_map(DefinitionVisitor)
    }
}
