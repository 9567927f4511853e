//! Type identity
//!
//! A [`TypeKey`] stands in for a Rust type inside the registry, the
//! dependency graph and the resolution stack.

use serde::{Serialize, Serializer};
use std::any::{TypeId, type_name};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Value Object: stable identity of a registered type
///
/// Equality and hashing use only the [`TypeId`], so both are O(1) and stable
/// for the lifetime of the process. The type name is carried for
/// diagnostics and never participates in identity.
///
/// ## Example
///
/// ```rust
/// use weave_domain::TypeKey;
///
/// struct Database;
///
/// let key = TypeKey::of::<Database>();
/// assert_eq!(key, TypeKey::of::<Database>());
/// assert_ne!(key, TypeKey::of::<String>());
/// assert_eq!(key.short_name(), "Database");
/// ```
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Underlying type id
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with every module path stripped, generics included
    ///
    /// `alloc::sync::Arc<app::db::Pool>` becomes `Arc<Pool>`.
    pub fn short_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut segment = String::new();
        let mut chars = self.name.chars().peekable();
        while let Some(c) = chars.next() {
            if c == ':' && chars.peek() == Some(&':') {
                chars.next();
                segment.clear();
            } else if c.is_alphanumeric() || c == '_' {
                segment.push(c);
            } else {
                out.push_str(&segment);
                segment.clear();
                out.push(c);
            }
        }
        out.push_str(&segment);
        out
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// Name first so sorted output reads naturally; the id breaks ties between
// distinct types that happen to share a name.
impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.id == other.id {
            return Ordering::Equal;
        }
        self.name
            .cmp(other.name)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

impl Serialize for TypeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}
