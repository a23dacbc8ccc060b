//! Contract identity.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a contract or implementation type.
///
/// Keys compare and hash by `TypeId` only. The type name is carried for
/// diagnostics and error messages. Unsized contracts such as `dyn Trait`
/// have a `TypeId` of their own, so trait objects and concrete types share
/// one key space.
///
/// # Examples
///
/// ```rust
/// use ioclite::{key_of, Key};
///
/// trait Greeter: Send + Sync {}
///
/// let a = key_of::<dyn Greeter>();
/// let b = key_of::<dyn Greeter>();
/// assert_eq!(a, b);
/// assert!(a.name().contains("Greeter"));
/// assert_ne!(a, key_of::<String>());
/// ```
#[derive(Clone, Copy)]
pub struct Key {
    id: TypeId,
    name: &'static str,
}

impl Key {
    /// Creates a key from its parts.
    pub fn new(id: TypeId, name: &'static str) -> Self {
        Self { id, name }
    }

    /// The `TypeId` backing this key.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The `std::any::type_name` of the keyed type.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Key {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Key {}

impl Hash for Key {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Key for `T`, which may be unsized.
#[inline(always)]
pub fn key_of<T: ?Sized + 'static>() -> Key {
    Key::new(TypeId::of::<T>(), std::any::type_name::<T>())
}
