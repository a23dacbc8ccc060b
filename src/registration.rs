//! The registration table.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::container::ResolverContext;
use crate::error::IocResult;
use crate::internal::SingletonSlot;
use crate::key::Key;
use crate::lifetime::Lifetime;

// Type-erased Arc for storage. Holds an `Arc<C>` for contract `C`.
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// Captured construction function for one implementation.
pub(crate) type Constructor =
    Arc<dyn for<'a> Fn(&ResolverContext<'a>) -> IocResult<AnyArc> + Send + Sync>;

/// Boxes a closure as a [`Constructor`], fixing its signature.
pub(crate) fn constructor<F>(f: F) -> Constructor
where
    F: for<'a> Fn(&ResolverContext<'a>) -> IocResult<AnyArc> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(feature = "ahash")]
type Map<K, V> = HashMap<K, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
type Map<K, V> = HashMap<K, V>;

/// One registered contract: which implementation backs it and how long
/// its instances live.
///
/// Descriptors are created by the `register*` family on
/// [`Container`](crate::Container) and replaced wholesale when the same
/// contract is registered again. A replaced singleton descriptor takes
/// its cached instance with it.
///
/// # Examples
///
/// ```rust
/// use ioclite::{key_of, Container, Lifetime};
///
/// trait Store: Send + Sync {}
/// struct MemoryStore;
/// impl Store for MemoryStore {}
/// ioclite::injectable!(MemoryStore);
/// ioclite::implements!(MemoryStore => dyn Store);
///
/// let mut container = Container::new();
/// container.register::<dyn Store, MemoryStore>(Lifetime::Singleton);
///
/// let descriptor = container.descriptor::<dyn Store>().unwrap();
/// assert_eq!(descriptor.implementation(), key_of::<MemoryStore>());
/// assert_eq!(descriptor.lifetime(), Lifetime::Singleton);
/// assert!(!descriptor.is_cached());
/// ```
pub struct ContractDescriptor {
    contract: Key,
    implementation: Key,
    lifetime: Lifetime,
    ctor: Constructor,
    slot: Option<SingletonSlot>,
}

impl ContractDescriptor {
    pub(crate) fn new(contract: Key, implementation: Key, lifetime: Lifetime, ctor: Constructor) -> Self {
        let slot = lifetime.is_cached().then(SingletonSlot::new);
        Self {
            contract,
            implementation,
            lifetime,
            ctor,
            slot,
        }
    }

    /// The contract this descriptor is registered under.
    pub fn contract(&self) -> Key {
        self.contract
    }

    /// The concrete type constructed for the contract.
    pub fn implementation(&self) -> Key {
        self.implementation
    }

    /// Lifetime fixed at registration.
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Whether a singleton instance has been built and stored.
    pub fn is_cached(&self) -> bool {
        self.slot.as_ref().is_some_and(|slot| slot.get().is_some())
    }

    #[inline]
    pub(crate) fn cached(&self) -> Option<AnyArc> {
        self.slot.as_ref().and_then(SingletonSlot::get)
    }

    /// Runs the constructor, going through the singleton slot when the
    /// lifetime asks for caching.
    pub(crate) fn instantiate(&self, ctx: &ResolverContext<'_>) -> IocResult<AnyArc> {
        match &self.slot {
            Some(slot) => slot.get_or_try_init(|| {
                let instance = (self.ctor)(ctx)?;
                tracing::debug!(
                    contract = self.contract.name(),
                    implementation = self.implementation.name(),
                    "singleton created"
                );
                Ok(instance)
            }),
            None => (self.ctor)(ctx),
        }
    }
}

impl fmt::Debug for ContractDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractDescriptor")
            .field("contract", &self.contract)
            .field("implementation", &self.implementation)
            .field("lifetime", &self.lifetime)
            .field("cached", &self.is_cached())
            .finish()
    }
}

/// Contract-to-descriptor table.
///
/// Keys are unique. The first few registrations live in a Vec, which is
/// faster to scan than hashing for small containers; the rest go to a map.
pub(crate) struct Registry {
    small: Vec<(Key, ContractDescriptor)>,
    large: Map<Key, ContractDescriptor>,
    small_threshold: usize,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            small: Vec::new(),
            large: Map::default(),
            small_threshold: 16,
        }
    }

    /// Inserts `descriptor` under its contract, returning the descriptor it
    /// replaced.
    pub(crate) fn insert(&mut self, descriptor: ContractDescriptor) -> Option<ContractDescriptor> {
        let key = descriptor.contract;
        if let Some(pos) = self.small.iter().position(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut self.small[pos].1, descriptor));
        }
        if self.small.len() < self.small_threshold && !self.large.contains_key(&key) {
            self.small.push((key, descriptor));
            None
        } else {
            self.large.insert(key, descriptor)
        }
    }

    #[inline(always)]
    pub(crate) fn get(&self, key: &Key) -> Option<&ContractDescriptor> {
        for (k, descriptor) in &self.small {
            if k == key {
                return Some(descriptor);
            }
        }
        self.large.get(key)
    }

    pub(crate) fn contains_key(&self, key: &Key) -> bool {
        self.get(key).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.small.len() + self.large.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &ContractDescriptor> {
        self.small
            .iter()
            .map(|(_, descriptor)| descriptor)
            .chain(self.large.values())
    }
}
