//! The container: registration entry points and the recursive resolver.

use std::sync::Arc;
use std::time::Instant;

use crate::component::{Implements, Injectable};
use crate::error::{IocError, IocResult};
use crate::internal::circular;
use crate::key::{key_of, Key};
use crate::lifetime::Lifetime;
use crate::observer::{ContainerObserver, Observers};
use crate::options::ContainerOptions;
use crate::registration::{constructor, AnyArc, ContractDescriptor, Registry};

pub mod context;
pub use context::ResolverContext;
use context::downcast;

/// Inversion-of-control container.
///
/// A container owns one registration table and the singleton instances it
/// has built. Nothing is shared between containers and there is no global
/// default container.
///
/// Registration takes `&mut self` and resolution takes `&self`, so all
/// registrations are complete before a container can be shared for
/// resolving. Resolution is safe from many threads at once; concurrent
/// first resolutions of one singleton construct it exactly once.
///
/// # Examples
///
/// ```
/// use ioclite::{Container, Lifetime};
/// use std::sync::Arc;
///
/// trait Name: Send + Sync {}
/// struct Name1;
/// impl Name for Name1 {}
///
/// trait Person: Send + Sync {
///     fn name(&self) -> &Arc<dyn Name>;
/// }
/// struct Person1 {
///     name: Arc<dyn Name>,
/// }
/// impl Person for Person1 {
///     fn name(&self) -> &Arc<dyn Name> { &self.name }
/// }
///
/// ioclite::injectable!(Name1);
/// ioclite::injectable!(Person1 { name });
/// ioclite::implements!(Name1 => dyn Name);
/// ioclite::implements!(Person1 => dyn Person);
///
/// let mut container = Container::new();
/// container
///     .register::<dyn Name, Name1>(Lifetime::Singleton)
///     .register::<dyn Person, Person1>(Lifetime::Transient);
///
/// let first = container.resolve::<dyn Person>().unwrap();
/// let second = container.resolve::<dyn Person>().unwrap();
/// assert!(!Arc::ptr_eq(&first, &second));
/// assert!(Arc::ptr_eq(first.name(), second.name()));
/// ```
pub struct Container {
    registry: Registry,
    observers: Observers,
    options: ContainerOptions,
}

impl Container {
    /// Creates an empty container with default options.
    pub fn new() -> Self {
        Self::with_options(ContainerOptions::default())
    }

    /// Creates an empty container with the given options.
    pub fn with_options(options: ContainerOptions) -> Self {
        Self {
            registry: Registry::new(),
            observers: Observers::new(),
            options,
        }
    }

    /// Options this container was created with.
    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    // ----- Registration -----

    /// Registers implementation `I` for contract `C`.
    ///
    /// An earlier registration of `C` is replaced, including any singleton
    /// it had already built.
    pub fn register<C, I>(&mut self, lifetime: Lifetime) -> &mut Self
    where
        C: ?Sized + Send + Sync + 'static,
        I: Injectable + Implements<C>,
    {
        let ctor = constructor(|ctx| {
            let instance = <I as Implements<C>>::upcast(Arc::new(I::construct(ctx)?));
            Ok(Arc::new(instance) as AnyArc)
        });
        self.insert(ContractDescriptor::new(key_of::<C>(), key_of::<I>(), lifetime, ctor))
    }

    /// Registers `I` for `C` with a fresh instance per resolution.
    pub fn register_transient<C, I>(&mut self) -> &mut Self
    where
        C: ?Sized + Send + Sync + 'static,
        I: Injectable + Implements<C>,
    {
        self.register::<C, I>(Lifetime::Transient)
    }

    /// Registers `I` for `C` with one shared instance.
    pub fn register_singleton<C, I>(&mut self) -> &mut Self
    where
        C: ?Sized + Send + Sync + 'static,
        I: Injectable + Implements<C>,
    {
        self.register::<C, I>(Lifetime::Singleton)
    }

    /// Registers `I` for `C` unless `C` already has a registration.
    ///
    /// Returns `true` if the registration was added.
    pub fn try_register<C, I>(&mut self, lifetime: Lifetime) -> bool
    where
        C: ?Sized + Send + Sync + 'static,
        I: Injectable + Implements<C>,
    {
        if self.registry.contains_key(&key_of::<C>()) {
            return false;
        }
        self.register::<C, I>(lifetime);
        true
    }

    /// Registers a factory closure for contract `C`.
    ///
    /// The factory resolves its own dependencies from the context it is
    /// given. Errors it returns propagate unchanged out of `resolve`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ioclite::{Container, Lifetime};
    /// use std::sync::Arc;
    ///
    /// trait Port: Send + Sync { fn number(&self) -> u16; }
    /// struct Fixed(u16);
    /// impl Port for Fixed { fn number(&self) -> u16 { self.0 } }
    ///
    /// let mut container = Container::new();
    /// container.register_factory::<dyn Port, _>(Lifetime::Singleton, |_ctx| {
    ///     Ok(Arc::new(Fixed(8080)))
    /// });
    ///
    /// assert_eq!(container.resolve::<dyn Port>().unwrap().number(), 8080);
    /// ```
    pub fn register_factory<C, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        C: ?Sized + Send + Sync + 'static,
        F: Fn(&ResolverContext<'_>) -> IocResult<Arc<C>> + Send + Sync + 'static,
    {
        let ctor = constructor(move |ctx| Ok(Arc::new(factory(ctx)?) as AnyArc));
        self.insert(ContractDescriptor::new(key_of::<C>(), key_of::<F>(), lifetime, ctor))
    }

    /// Registers an already-built instance as the singleton for `C`.
    pub fn register_instance<C>(&mut self, instance: Arc<C>) -> &mut Self
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let ctor = constructor(move |_| Ok(Arc::new(instance.clone()) as AnyArc));
        self.insert(ContractDescriptor::new(key_of::<C>(), key_of::<C>(), Lifetime::Singleton, ctor))
    }

    /// Runs a batch of registrations against this container, in order.
    pub fn register_all<I, F>(&mut self, registrations: I) -> &mut Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(&mut Container),
    {
        for registration in registrations {
            registration(self);
        }
        self
    }

    /// Adds an observer notified of every resolution step.
    pub fn add_observer(&mut self, observer: Arc<dyn ContainerObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    fn insert(&mut self, descriptor: ContractDescriptor) -> &mut Self {
        let contract = descriptor.contract().name();
        let implementation = descriptor.implementation().name();
        let lifetime = descriptor.lifetime();
        match self.registry.insert(descriptor) {
            Some(previous) => tracing::debug!(
                contract,
                implementation,
                ?lifetime,
                replaced = previous.implementation().name(),
                "contract re-registered"
            ),
            None => tracing::debug!(contract, implementation, ?lifetime, "contract registered"),
        }
        self
    }

    // ----- Lookup -----

    /// Descriptor registered for `key`, if any.
    pub fn lookup(&self, key: &Key) -> Option<&ContractDescriptor> {
        self.registry.get(key)
    }

    /// Descriptor registered for contract `C`, if any.
    pub fn descriptor<C: ?Sized + 'static>(&self) -> Option<&ContractDescriptor> {
        self.lookup(&key_of::<C>())
    }

    /// Whether contract `C` has a registration.
    pub fn is_registered<C: ?Sized + 'static>(&self) -> bool {
        self.registry.contains_key(&key_of::<C>())
    }

    /// All registered descriptors, in no particular order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ContractDescriptor> {
        self.registry.iter()
    }

    /// Number of registered contracts.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether no contract is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ----- Resolution -----

    /// Resolves contract `C`, building its whole dependency graph.
    ///
    /// Fails with [`IocError::Unregistered`] naming the first contract,
    /// at any depth, that has no registration.
    pub fn resolve<C>(&self) -> IocResult<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let any = self.resolve_any(&key_of::<C>())?;
        downcast::<C>(any)
    }

    /// Untyped resolution. The returned value holds an `Arc<C>` for the
    /// contract `C` behind `key`.
    pub fn resolve_any(&self, key: &Key) -> IocResult<AnyArc> {
        let root = ResolverContext::root(self);
        self.resolve_in(key, &root)
    }

    /// Resolves `key` as a dependency of whatever `parent` is building.
    pub(crate) fn resolve_in(&self, key: &Key, parent: &ResolverContext<'_>) -> IocResult<AnyArc> {
        if !self.observers.has_observers() {
            return self.resolve_unobserved(key, parent);
        }

        let start = Instant::now();
        self.observers.resolving(key);
        let result = self.resolve_unobserved(key, parent);
        match &result {
            Ok(_) => self.observers.resolved(key, start.elapsed()),
            Err(err) => self.observers.failed(key, err),
        }
        result
    }

    fn resolve_unobserved(&self, key: &Key, parent: &ResolverContext<'_>) -> IocResult<AnyArc> {
        let descriptor = self
            .registry
            .get(key)
            .ok_or(IocError::Unregistered(key.name()))?;

        circular::enter(parent, key, descriptor.lifetime().is_cached(), &self.options)?;

        if let Some(instance) = descriptor.cached() {
            tracing::trace!(contract = key.name(), "singleton cache hit");
            return Ok(instance);
        }

        tracing::trace!(
            contract = key.name(),
            implementation = descriptor.implementation().name(),
            depth = parent.depth() + 1,
            "constructing"
        );
        let ctx = parent.child(*key);
        descriptor.instantiate(&ctx)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registrations", &self.registry.len())
            .field("options", &self.options)
            .finish()
    }
}
