//! Cycle paths

use serde::Serialize;
use std::fmt;

use super::TypeKey;

/// Value Object: ordered dependency chain forming a cycle
///
/// The last element repeats the first, closing the loop, so a self
/// reference on `A` is `[A, A]` and a three-node cycle has length 4.
/// Cycle paths compare and hash by content.
///
/// ## Example
///
/// ```rust
/// use weave_domain::{CyclePath, TypeKey};
///
/// struct A;
/// struct B;
///
/// let path = CyclePath::closing(vec![TypeKey::of::<A>(), TypeKey::of::<B>()]);
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "A -> B -> A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CyclePath(Vec<TypeKey>);

impl CyclePath {
    /// Build a path from an open chain, appending the first node to close it
    ///
    /// An empty chain yields an empty path.
    pub fn closing(mut chain: Vec<TypeKey>) -> Self {
        if let Some(first) = chain.first().copied() {
            chain.push(first);
        }
        Self(chain)
    }

    /// Build the path a live guard reports when `key` re-enters `stack`
    ///
    /// Takes the stack from the first occurrence of `key` to its end and
    /// appends `key`. Returns `None` when `key` is not on the stack.
    pub fn from_stack(stack: &[TypeKey], key: TypeKey) -> Option<Self> {
        let start = stack.iter().position(|k| *k == key)?;
        let mut nodes = stack[start..].to_vec();
        nodes.push(key);
        Some(Self(nodes))
    }

    /// Ordered nodes, closing node included
    pub fn nodes(&self) -> &[TypeKey] {
        &self.0
    }

    /// Distinct nodes of the loop (closing node excluded)
    pub fn members(&self) -> &[TypeKey] {
        match self.0.len() {
            0 => &[],
            n => &self.0[..n - 1],
        }
    }

    /// Number of elements, closing node included
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path holds no nodes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `key` takes part in this cycle
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.0.contains(key)
    }

    /// Node the cycle starts (and ends) on
    pub fn start(&self) -> Option<&TypeKey> {
        self.0.first()
    }

    /// Rotate the loop so the member with the lowest `rank` comes first
    ///
    /// Two discoveries of the same loop from different entry points become
    /// equal after canonicalisation with the same ranking.
    pub fn canonicalize_by<F>(self, rank: F) -> Self
    where
        F: Fn(&TypeKey) -> usize,
    {
        let pivot = self
            .members()
            .iter()
            .enumerate()
            .min_by_key(|(_, key)| rank(key))
            .map(|(i, _)| i);
        let Some(pivot) = pivot else {
            return self;
        };
        let members = self.members();
        let mut chain = Vec::with_capacity(members.len());
        chain.extend_from_slice(&members[pivot..]);
        chain.extend_from_slice(&members[..pivot]);
        Self::closing(chain)
    }
}

impl fmt::Display for CyclePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl From<CyclePath> for Vec<TypeKey> {
    fn from(path: CyclePath) -> Self {
        path.0
    }
}
