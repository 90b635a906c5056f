//! Cache keys for logical reads.
//!
//! A [`QueryKey`] is an ordered sequence of primitive parts that uniquely
//! identifies a logical read for caching and invalidation purposes.
//! Invalidation uses prefix matching: invalidating `["exam"]` also marks
//! `["exam", "e1"]` stale.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single element of a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyPart {
    /// String part.
    Str(String),
    /// Integer part.
    Int(i64),
    /// Boolean part.
    Bool(bool),
    /// UUID part.
    Id(Uuid),
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for KeyPart {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for KeyPart {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Uuid> for KeyPart {
    fn from(value: Uuid) -> Self {
        Self::Id(value)
    }
}

/// An ordered sequence of [`KeyPart`]s identifying a logical read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey(Vec<KeyPart>);

impl QueryKey {
    /// Build a key from an ordered list of parts.
    pub fn new(parts: Vec<KeyPart>) -> Self {
        Self(parts)
    }

    /// The parts of this key, in order.
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// Append a part, returning the extended key.
    pub fn with(mut self, part: impl Into<KeyPart>) -> Self {
        self.0.push(part.into());
        self
    }

    /// Render the canonical cache-addressing string for this key.
    ///
    /// Parts are escaped so that `/` inside a part can never collide with
    /// the part separator.
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|part| part.to_string().replace('%', "%25").replace('/', "%2F"))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Whether this key is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &QueryKey) -> bool {
        self.0.len() <= other.0.len() && self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b)
    }
}

impl<P: Into<KeyPart>> FromIterator<P> for QueryKey {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_stable() {
        let key: QueryKey = ["user", "u1"].into_iter().collect();
        assert_eq!(key.render(), "user/u1");
    }

    #[test]
    fn test_render_escapes_separator() {
        let key: QueryKey = ["exam", "a/b"].into_iter().collect();
        assert_eq!(key.render(), "exam/a%2Fb");
        let other: QueryKey = ["exam", "a", "b"].into_iter().collect();
        assert_ne!(key.render(), other.render());
    }

    #[test]
    fn test_prefix_matching() {
        let parent: QueryKey = ["exam"].into_iter().collect();
        let child: QueryKey = ["exam", "e1"].into_iter().collect();
        let sibling: QueryKey = ["user", "u1"].into_iter().collect();
        assert!(parent.is_prefix_of(&child));
        assert!(parent.is_prefix_of(&parent));
        assert!(!parent.is_prefix_of(&sibling));
        assert!(!child.is_prefix_of(&parent));
    }

    #[test]
    fn test_mixed_part_types() {
        let key = QueryKey::new(vec![KeyPart::from("exams"), KeyPart::from(2i64)])
            .with(true);
        assert_eq!(key.render(), "exams/2/true");
    }
}
