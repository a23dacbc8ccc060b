//! Construction capture: how implementations are built and bound to
//! contracts.
//!
//! An implementation declares its one constructor by implementing
//! [`Injectable`]. The constructor receives a [`ResolverContext`] and
//! resolves each dependency through it, in argument order, which is what
//! wires a whole graph from a single `resolve` call. [`Implements`] ties an
//! implementation to a contract it satisfies; the compiler rejects pairs
//! that do not fit.

use std::sync::Arc;

use crate::container::ResolverContext;
use crate::error::IocResult;

/// A concrete type the container knows how to construct.
///
/// # Examples
///
/// ```rust
/// use ioclite::{Container, Injectable, IocResult, ResolverContext};
/// use std::sync::Arc;
///
/// trait Name: Send + Sync {
///     fn get(&self) -> String;
/// }
///
/// struct FixedName;
/// impl Name for FixedName {
///     fn get(&self) -> String { "Ada".to_string() }
/// }
/// ioclite::injectable!(FixedName);
/// ioclite::implements!(FixedName => dyn Name);
///
/// struct Greeting {
///     name: Arc<dyn Name>,
///     punctuation: char,
/// }
///
/// impl Injectable for Greeting {
///     fn construct(ctx: &ResolverContext<'_>) -> IocResult<Self> {
///         Ok(Greeting { name: ctx.resolve::<dyn Name>()?, punctuation: '!' })
///     }
/// }
///
/// let mut container = Container::new();
/// container
///     .register_transient::<dyn Name, FixedName>()
///     .register_transient::<Greeting, Greeting>();
///
/// let greeting = container.resolve::<Greeting>().unwrap();
/// assert_eq!(format!("{}{}", greeting.name.get(), greeting.punctuation), "Ada!");
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Builds an instance, resolving dependencies from `ctx`.
    fn construct(ctx: &ResolverContext<'_>) -> IocResult<Self>;
}

/// A value that can be produced from a [`ResolverContext`], used for the
/// fields of [`injectable!`] structs.
pub trait Inject: Sized {
    fn inject(ctx: &ResolverContext<'_>) -> IocResult<Self>;
}

impl<T> Inject for Arc<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    #[inline]
    fn inject(ctx: &ResolverContext<'_>) -> IocResult<Self> {
        ctx.resolve::<T>()
    }
}

/// Upcast from an implementation to a contract it satisfies.
///
/// Every type implements itself. Trait-object contracts are bound with
/// [`implements!`].
pub trait Implements<C: ?Sized>: Send + Sync + 'static {
    fn upcast(self: Arc<Self>) -> Arc<C>;
}

impl<T> Implements<T> for T
where
    T: Send + Sync + 'static,
{
    #[inline]
    fn upcast(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// Declares that an implementation satisfies one or more trait-object
/// contracts.
///
/// ```rust
/// trait Reader: Send + Sync {}
/// trait Writer: Send + Sync {}
///
/// struct File;
/// impl Reader for File {}
/// impl Writer for File {}
///
/// ioclite::implements!(File => dyn Reader, dyn Writer);
/// ```
///
/// Binding a type to a trait it does not implement fails to compile:
///
/// ```compile_fail
/// trait Reader: Send + Sync {}
/// struct Socket;
/// ioclite::implements!(Socket => dyn Reader);
/// ```
#[macro_export]
macro_rules! implements {
    ($implementation:ty => $($contract:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<$contract> for $implementation {
                #[inline]
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$contract> {
                    self
                }
            }
        )+
    };
}

/// Derives [`Injectable`] for a unit struct or a struct with named fields.
///
/// Each listed field is produced by [`Inject`], in the order given, so an
/// `Arc<dyn Contract>` field is resolved from the container.
///
/// ```rust
/// use ioclite::{Container, Lifetime};
/// use std::sync::Arc;
///
/// trait Name: Send + Sync {}
/// struct Anonymous;
/// impl Name for Anonymous {}
///
/// trait Person: Send + Sync {
///     fn name(&self) -> &Arc<dyn Name>;
/// }
/// struct Citizen {
///     name: Arc<dyn Name>,
/// }
/// impl Person for Citizen {
///     fn name(&self) -> &Arc<dyn Name> { &self.name }
/// }
///
/// ioclite::injectable!(Anonymous);
/// ioclite::injectable!(Citizen { name });
/// ioclite::implements!(Anonymous => dyn Name);
/// ioclite::implements!(Citizen => dyn Person);
///
/// let mut container = Container::new();
/// container.register::<dyn Name, Anonymous>(Lifetime::Singleton);
/// container.register::<dyn Person, Citizen>(Lifetime::Transient);
///
/// let a = container.resolve::<dyn Person>().unwrap();
/// let b = container.resolve::<dyn Person>().unwrap();
/// assert!(!Arc::ptr_eq(&a, &b));
/// assert!(Arc::ptr_eq(a.name(), b.name()));
/// ```
#[macro_export]
macro_rules! injectable {
    ($implementation:ident) => {
        impl $crate::Injectable for $implementation {
            fn construct(_: &$crate::ResolverContext<'_>) -> $crate::IocResult<Self> {
                ::std::result::Result::Ok($implementation)
            }
        }
    };
    ($implementation:ident { $($field:ident),* $(,)? }) => {
        impl $crate::Injectable for $implementation {
            #[allow(unused_variables)]
            fn construct(ctx: &$crate::ResolverContext<'_>) -> $crate::IocResult<Self> {
                ::std::result::Result::Ok($implementation {
                    $($field: $crate::Inject::inject(ctx)?,)*
                })
            }
        }
    };
}
