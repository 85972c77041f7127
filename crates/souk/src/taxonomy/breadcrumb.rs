use std::fmt;

use derive_more::Deref;

const SEPARATOR: &str = " > ";

/// The display names of a category and its ancestors, from the root down.
#[derive(Debug, PartialEq, Eq, Clone, Deref)]
pub struct Breadcrumb<'a>(pub(crate) Vec<&'a str>);

impl fmt::Display for Breadcrumb<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(SEPARATOR))
    }
}
