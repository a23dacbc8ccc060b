//! Container configuration.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Default ceiling on the depth of a single resolution.
///
/// Low enough that a chain this deep fits on a 2 MiB thread stack in an
/// unoptimized build.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Tunables for a [`Container`](crate::Container).
///
/// With the `config` feature the options deserialize from any serde
/// format; missing fields take their defaults.
///
/// # Examples
///
/// ```rust
/// use ioclite::{Container, ContainerOptions};
///
/// let options = ContainerOptions::default()
///     .with_max_depth(32)
///     .with_cycle_detection(false);
///
/// let container = Container::with_options(options.clone());
/// assert_eq!(container.options(), &options);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerOptions {
    /// Deepest dependency chain a single `resolve` may build.
    pub max_depth: usize,
    /// Fail with [`IocError::Circular`](crate::IocError::Circular) when a
    /// contract reappears in its own resolution path. When off, a cycle
    /// through transient contracts runs into the depth limit instead;
    /// singletons are checked either way.
    pub detect_cycles: bool,
}

impl ContainerOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            detect_cycles: true,
        }
    }
}
