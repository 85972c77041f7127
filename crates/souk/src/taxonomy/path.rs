use std::fmt;
use std::str::FromStr;

use derive_more::Deref;
use thiserror::Error;

const SEPARATOR: char = '/';

/// The address of a category: the keys from a root category down to it.
///
/// Paths are written with `/` between keys, e.g. `motors/heavy-vehicles/buses`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Default, Deref)]
pub struct CategoryPath(Vec<String>);

impl CategoryPath {
    /// Returns the empty path, which addresses no category.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        Self(
            segments
                .iter()
                .map(|segment| segment.as_ref().to_owned())
                .collect(),
        )
    }

    /// Returns a new path addressing the child `key` of this path.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }

    /// Returns the path of the parent category, or `None` for a root (or empty) path.
    pub fn parent(&self) -> Option<Self> {
        match self.0.split_last() {
            Some((_, parent)) if !parent.is_empty() => Some(Self(parent.to_vec())),
            _ => None,
        }
    }

    /// Returns the key of the addressed category.
    pub fn key(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub(crate) fn is_valid_key(key: &str) -> bool {
        !key.is_empty() && !key.contains(SEPARATOR)
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCategoryPathError {
    #[error("empty category key at position {position} in '{path}'")]
    EmptySegment { path: String, position: usize },
}

impl FromStr for CategoryPath {
    type Err = ParseCategoryPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix(SEPARATOR).unwrap_or(s);
        let trimmed = trimmed.strip_suffix(SEPARATOR).unwrap_or(trimmed);

        if trimmed.is_empty() {
            return Ok(Self::empty());
        }

        trimmed
            .split(SEPARATOR)
            .enumerate()
            .map(|(position, segment)| {
                if segment.is_empty() {
                    Err(ParseCategoryPathError::EmptySegment {
                        path: s.to_owned(),
                        position,
                    })
                } else {
                    Ok(segment.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl<S: AsRef<str>> From<&[S]> for CategoryPath {
    fn from(segments: &[S]) -> Self {
        Self::from_segments(segments)
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for CategoryPath {
    fn from(segments: [S; N]) -> Self {
        Self::from_segments(&segments)
    }
}
