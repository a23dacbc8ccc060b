//! Resolver context handed to constructors.

use std::sync::Arc;

use crate::container::Container;
use crate::error::{IocError, IocResult};
use crate::key::{key_of, Key};
use crate::registration::AnyArc;

/// Context passed to every constructor.
///
/// A context is one step of the current resolution path. Resolving a
/// dependency through it creates a child context for that dependency, so
/// the chain from any context back to the root is the path of contracts
/// being built on this call stack.
///
/// # Examples
///
/// ```
/// use ioclite::{Container, Injectable, IocResult, ResolverContext};
///
/// struct Leaf {
///     depth: usize,
///     path: Vec<&'static str>,
/// }
///
/// impl Injectable for Leaf {
///     fn construct(ctx: &ResolverContext<'_>) -> IocResult<Self> {
///         Ok(Leaf { depth: ctx.depth(), path: ctx.path() })
///     }
/// }
///
/// let mut container = Container::new();
/// container.register_transient::<Leaf, Leaf>();
///
/// let leaf = container.resolve::<Leaf>().unwrap();
/// assert_eq!(leaf.depth, 1);
/// assert_eq!(leaf.path.len(), 1);
/// ```
pub struct ResolverContext<'a> {
    container: &'a Container,
    parent: Option<&'a ResolverContext<'a>>,
    key: Option<Key>,
    depth: usize,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn root(container: &'a Container) -> Self {
        Self {
            container,
            parent: None,
            key: None,
            depth: 0,
        }
    }

    pub(crate) fn child(&'a self, key: Key) -> ResolverContext<'a> {
        ResolverContext {
            container: self.container,
            parent: Some(self),
            key: Some(key),
            depth: self.depth + 1,
        }
    }

    /// Resolves contract `C` as a dependency of the contract being built.
    pub fn resolve<C>(&self) -> IocResult<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let any = self.resolve_any(&key_of::<C>())?;
        downcast::<C>(any)
    }

    /// Untyped form of [`resolve`](Self::resolve). The returned value holds
    /// an `Arc<C>` for the contract `C` behind `key`.
    pub fn resolve_any(&self, key: &Key) -> IocResult<AnyArc> {
        self.container.resolve_in(key, self)
    }

    /// Number of contracts on the path, 0 at the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Contract being constructed, `None` at the root.
    pub fn current(&self) -> Option<Key> {
        self.key
    }

    /// Type names of the contracts on the path, outermost first.
    pub fn path(&self) -> Vec<&'static str> {
        let mut path: Vec<&'static str> = self.frames().map(|k| k.name()).collect();
        path.reverse();
        path
    }

    /// Whether `key` is already being constructed on this path.
    pub(crate) fn is_resolving(&self, key: &Key) -> bool {
        self.frames().any(|k| k == *key)
    }

    fn frames(&self) -> impl Iterator<Item = Key> + '_ {
        std::iter::successors(Some(self), |ctx| ctx.parent).filter_map(|ctx| ctx.key)
    }
}

/// Recovers the `Arc<C>` stored behind a type-erased instance.
pub(crate) fn downcast<C>(any: AnyArc) -> IocResult<Arc<C>>
where
    C: ?Sized + Send + Sync + 'static,
{
    any.downcast::<Arc<C>>()
        .map(|boxed| (*boxed).clone())
        .map_err(|_| IocError::TypeMismatch(std::any::type_name::<C>()))
}
