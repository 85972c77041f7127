use std::fmt;

use crate::taxonomy::TaxonomyStore;

const INDENT: &str = "  ";

/// An indented list of the categories in a taxonomy, one per line.
///
/// Categories that accept listings are marked with `*`.
pub struct Outline<'a>(&'a TaxonomyStore);

impl TaxonomyStore {
    pub fn outline(&self) -> Outline<'_> {
        Outline(self)
    }
}

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, node) in self.0.nodes() {
            let indent = INDENT.repeat(path.len() - 1);
            let marker = if node.is_leaf() { " *" } else { "" };

            writeln!(f, "{indent}{} ({}){marker}", node.name(), node.key())?;
        }

        Ok(())
    }
}
