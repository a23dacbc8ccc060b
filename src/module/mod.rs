//! Grouping registrations into installable modules.

use crate::container::Container;

#[cfg(feature = "auto-register")]
pub mod discovery;

/// A batch of registrations that can be installed on a container.
///
/// Modules only call the container's `register*` methods; the container
/// keeps no record of which module registered what.
///
/// # Examples
///
/// ```rust
/// use ioclite::{Container, Module};
///
/// trait Name: Send + Sync {}
/// struct Name1;
/// impl Name for Name1 {}
/// ioclite::injectable!(Name1);
/// ioclite::implements!(Name1 => dyn Name);
///
/// struct NamesModule;
///
/// impl Module for NamesModule {
///     fn register_components(&self, container: &mut Container) {
///         container.register_transient::<dyn Name, Name1>();
///     }
/// }
///
/// let mut container = Container::new();
/// container.install(&NamesModule);
/// assert!(container.is_registered::<dyn Name>());
/// ```
pub trait Module {
    /// Registers this module's components with `container`.
    fn register_components(&self, container: &mut Container);
}

impl<F> Module for F
where
    F: Fn(&mut Container),
{
    fn register_components(&self, container: &mut Container) {
        self(container)
    }
}

impl Container {
    /// Installs `module`, applying its registrations to this container.
    pub fn install<M: Module + ?Sized>(&mut self, module: &M) -> &mut Self {
        tracing::debug!(module = std::any::type_name::<M>(), "installing module");
        module.register_components(self);
        self
    }
}
