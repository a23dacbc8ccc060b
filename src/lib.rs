//! # ioclite
//!
//! A small inversion-of-control container. Contracts (usually trait
//! objects) are mapped to implementation types, each with a lifetime, and
//! a single `resolve` call builds the whole dependency graph behind a
//! contract.
//!
//! ## Features
//!
//! - **Two lifetimes**: `Singleton` (one instance per container) and
//!   `Transient` (a new instance per resolution)
//! - **Constructor injection**: an implementation's [`Injectable`] impl is
//!   its constructor, resolving each dependency in argument order
//! - **Checked bindings**: [`implements!`] only compiles when the
//!   implementation satisfies the contract
//! - **Thread-safe resolution**: concurrent first resolutions of a
//!   singleton build it once
//! - **Cycle detection**: a dependency cycle fails with the full path
//!   instead of overflowing the stack
//! - **Modules and discovery**: batch registration through [`Module`] and,
//!   with the `auto-register` feature, link-time [`component!`] discovery
//!
//! ## Quick Start
//!
//! ```rust
//! use ioclite::{Container, Lifetime};
//! use std::sync::Arc;
//!
//! trait Name: Send + Sync {
//!     fn value(&self) -> &str;
//! }
//!
//! trait Person: Send + Sync {
//!     fn name(&self) -> &Arc<dyn Name>;
//! }
//!
//! struct FirstName;
//! impl Name for FirstName {
//!     fn value(&self) -> &str { "Grace" }
//! }
//!
//! struct Employee {
//!     name: Arc<dyn Name>,
//! }
//! impl Person for Employee {
//!     fn name(&self) -> &Arc<dyn Name> { &self.name }
//! }
//!
//! ioclite::injectable!(FirstName);
//! ioclite::injectable!(Employee { name });
//! ioclite::implements!(FirstName => dyn Name);
//! ioclite::implements!(Employee => dyn Person);
//!
//! let mut container = Container::new();
//! container
//!     .register::<dyn Name, FirstName>(Lifetime::Transient)
//!     .register::<dyn Person, Employee>(Lifetime::Singleton);
//!
//! let person = container.resolve::<dyn Person>().unwrap();
//! assert_eq!(person.name().value(), "Grace");
//! assert!(Arc::ptr_eq(&person, &container.resolve::<dyn Person>().unwrap()));
//! ```
//!
//! ## Re-registration
//!
//! Registering a contract again replaces the earlier descriptor. A
//! singleton built under the old descriptor is dropped from the container
//! along with it.

pub mod component;
pub mod container;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod module;
pub mod observer;
pub mod options;
pub mod registration;

mod internal;

pub use component::{Implements, Inject, Injectable};
pub use container::{Container, ResolverContext};
pub use error::{IocError, IocResult};
pub use key::{key_of, Key};
pub use lifetime::Lifetime;
pub use module::Module;
pub use observer::{ContainerObserver, LoggingObserver};
pub use options::{ContainerOptions, DEFAULT_MAX_DEPTH};
pub use registration::ContractDescriptor;

#[cfg(feature = "auto-register")]
pub use module::discovery::{components, ComponentRegistration};

#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "auto-register")]
    pub use inventory;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    trait Name: Send + Sync {}
    trait Person: Send + Sync {
        fn name(&self) -> &Arc<dyn Name>;
    }

    struct Name1;
    impl Name for Name1 {}

    struct Person1 {
        name: Arc<dyn Name>,
    }
    impl Person for Person1 {
        fn name(&self) -> &Arc<dyn Name> {
            &self.name
        }
    }

    crate::injectable!(Name1);
    crate::injectable!(Person1 { name });
    crate::implements!(Name1 => dyn Name);
    crate::implements!(Person1 => dyn Person);

    #[test]
    fn test_singleton_resolution() {
        let mut container = Container::new();
        container.register_singleton::<dyn Person, Person1>();
        container.register_transient::<dyn Name, Name1>();

        let a = container.resolve::<dyn Person>().unwrap();
        let b = container.resolve::<dyn Person>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_transient_resolution() {
        let mut container = Container::new();
        container.register_transient::<dyn Name, Name1>();

        let a = container.resolve::<dyn Name>().unwrap();
        let b = container.resolve::<dyn Name>().unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_nested_singleton_shared_by_transient_parents() {
        let mut container = Container::new();
        container.register_transient::<dyn Person, Person1>();
        container.register_singleton::<dyn Name, Name1>();

        let a = container.resolve::<dyn Person>().unwrap();
        let b = container.resolve::<dyn Person>().unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(a.name(), b.name()));
    }

    #[test]
    fn test_container_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Container>();
    }
}
