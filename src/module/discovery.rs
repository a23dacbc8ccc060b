//! Link-time component discovery.
//!
//! Types declared with [`component!`](crate::component!) are collected by
//! `inventory` when the program is linked. [`Container::register_components`]
//! walks that collection and registers each of them. This sits entirely on
//! top of the public `register*` API.

use crate::container::Container;

/// A self-registration submitted by [`component!`](crate::component!).
pub struct ComponentRegistration {
    /// Type name of the component, for diagnostics.
    pub name: &'static str,
    /// Applies the registration.
    pub register: fn(&mut Container),
}

inventory::collect!(ComponentRegistration);

/// Declares a component that [`Container::register_components`] will
/// register as a singleton.
///
/// `component!(Type)` registers `Type` as its own contract;
/// `component!(Type => dyn Contract)` registers it under the contract.
///
/// ```rust
/// use ioclite::Container;
///
/// pub struct HealthController;
/// ioclite::injectable!(HealthController);
/// ioclite::component!(HealthController);
///
/// fn main() {
///     let mut container = Container::new();
///     container.register_components();
///     assert!(container.resolve::<HealthController>().is_ok());
/// }
/// ```
#[macro_export]
macro_rules! component {
    ($implementation:ty => $contract:ty) => {
        $crate::__private::inventory::submit! {
            $crate::ComponentRegistration {
                name: ::std::stringify!($implementation),
                register: |container: &mut $crate::Container| {
                    container.register_singleton::<$contract, $implementation>();
                },
            }
        }
    };
    ($implementation:ty) => {
        $crate::component!($implementation => $implementation);
    };
}

/// Every component submitted anywhere in the program.
pub fn components() -> impl Iterator<Item = &'static ComponentRegistration> {
    inventory::iter::<ComponentRegistration>.into_iter()
}

impl Container {
    /// Registers every component declared with
    /// [`component!`](crate::component!) in the linked program.
    pub fn register_components(&mut self) -> &mut Self {
        for component in components() {
            tracing::debug!(component = component.name, "auto-registering component");
            (component.register)(self);
        }
        self
    }
}
