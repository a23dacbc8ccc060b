//! Error types for the container.

use std::error::Error;
use std::sync::Arc;

use thiserror::Error;

/// Container errors
///
/// Every failure aborts the whole `resolve` call it occurred in. Nothing
/// built along the way is cached.
///
/// # Examples
///
/// ```rust
/// use ioclite::{Container, IocError};
///
/// trait Clock: Send + Sync {}
///
/// let container = Container::new();
/// match container.resolve::<dyn Clock>() {
///     Err(IocError::Unregistered(name)) => assert!(name.contains("Clock")),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum IocError {
    /// No descriptor for the contract, at whatever depth it was requested
    #[error("Unable to resolve implementation for contract of type {0}")]
    Unregistered(&'static str),
    /// Stored instance could not be downcast to the requested contract
    #[error("Type mismatch for: {0}")]
    TypeMismatch(&'static str),
    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<&'static str>),
    /// Maximum resolution depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// A constructor failed; the underlying error is carried as-is
    #[error(transparent)]
    Factory(Arc<dyn Error + Send + Sync>),
}

impl IocError {
    /// Wraps an error raised by user construction code.
    pub fn factory<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        IocError::Factory(Arc::new(err))
    }

    /// Name of the contract that could not be resolved, if this is an
    /// [`IocError::Unregistered`] error.
    pub fn unregistered_contract(&self) -> Option<&'static str> {
        match self {
            IocError::Unregistered(name) => Some(name),
            _ => None,
        }
    }
}

/// Result type for container operations
pub type IocResult<T> = Result<T, IocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Boom;

    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("boom")
        }
    }

    impl Error for Boom {}

    #[test]
    fn test_unregistered_display_names_contract() {
        let err = IocError::Unregistered("app::Clock");
        assert_eq!(
            err.to_string(),
            "Unable to resolve implementation for contract of type app::Clock"
        );
        assert_eq!(err.unregistered_contract(), Some("app::Clock"));
    }

    #[test]
    fn test_circular_display_joins_path() {
        let err = IocError::Circular(vec!["A", "B", "A"]);
        assert_eq!(err.to_string(), "Circular dependency: A -> B -> A");
        assert_eq!(err.unregistered_contract(), None);
    }

    #[test]
    fn test_factory_error_forwards_display() {
        let err = IocError::factory(Boom);
        assert_eq!(err.to_string(), "boom");
        match err {
            IocError::Factory(inner) => assert!(inner.downcast_ref::<Boom>().is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
