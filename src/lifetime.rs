//! Instance lifetime policy.

/// Lifetimes controlling instance reuse
///
/// A lifetime is fixed when a contract is registered. Registering the
/// contract again starts over with the new descriptor's lifetime.
///
/// # Examples
///
/// ```rust
/// use ioclite::{Container, Lifetime};
/// use std::sync::Arc;
///
/// struct Clock;
/// ioclite::injectable!(Clock);
///
/// let mut container = Container::new();
/// container.register::<Clock, Clock>(Lifetime::Singleton);
///
/// let a = container.resolve::<Clock>().unwrap();
/// let b = container.resolve::<Clock>().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// assert_eq!(Lifetime::default(), Lifetime::Transient);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Lifetime {
    /// One instance per contract for the life of the container
    ///
    /// Built on the first successful resolution and returned unchanged
    /// by every later one.
    Singleton,
    /// New instance per resolution, never cached
    ///
    /// Two transient dependencies under one parent are two distinct
    /// instances.
    #[default]
    Transient,
}

impl Lifetime {
    /// Whether instances of this lifetime are cached by the container.
    #[inline]
    pub fn is_cached(self) -> bool {
        matches!(self, Lifetime::Singleton)
    }
}
