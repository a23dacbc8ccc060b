use ioclite::{Container, IocError, IocResult, Lifetime};
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct ConnectionRefused {
    port: u16,
}

impl fmt::Display for ConnectionRefused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection refused on port {}", self.port)
    }
}

impl std::error::Error for ConnectionRefused {}

struct Database;

struct Service {
    _db: Arc<Database>,
}
ioclite::injectable!(Service { _db });

fn failing_database(container: &mut Container) {
    container.register_factory::<Database, _>(Lifetime::Singleton, |_| -> IocResult<Arc<Database>> {
        Err(IocError::factory(ConnectionRefused { port: 5432 }))
    });
}

#[test]
fn test_factory_error_propagates_unchanged() {
    let mut container = Container::new();
    failing_database(&mut container);
    container.register_transient::<Service, Service>();

    let err = container.resolve::<Service>().err().unwrap();
    assert_eq!(err.to_string(), "connection refused on port 5432");
    match err {
        IocError::Factory(source) => {
            let refused = source.downcast_ref::<ConnectionRefused>().unwrap();
            assert_eq!(refused.port, 5432);
        }
        other => panic!("expected factory error, got {other:?}"),
    }
    assert!(!container.descriptor::<Database>().unwrap().is_cached());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        IocError::Unregistered("app::Clock").to_string(),
        "Unable to resolve implementation for contract of type app::Clock"
    );
    assert_eq!(IocError::TypeMismatch("app::Clock").to_string(), "Type mismatch for: app::Clock");
    assert_eq!(IocError::DepthExceeded(8).to_string(), "Max depth 8 exceeded");
    assert_eq!(
        IocError::Circular(vec!["a::A", "a::B", "a::A"]).to_string(),
        "Circular dependency: a::A -> a::B -> a::A"
    );
}

#[test]
fn test_errors_are_cloneable_and_sendable() {
    fn assert_error<E: std::error::Error + Clone + Send + Sync + 'static>() {}
    assert_error::<IocError>();

    let err = IocError::factory(ConnectionRefused { port: 1 });
    let copy = err.clone();
    assert_eq!(err.to_string(), copy.to_string());
}

#[derive(Debug)]
struct PoolExhausted {
    cause: ConnectionRefused,
}

impl fmt::Display for PoolExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("connection pool exhausted")
    }
}

impl std::error::Error for PoolExhausted {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

#[test]
fn test_factory_error_forwards_source() {
    use std::error::Error;

    let err = IocError::factory(PoolExhausted {
        cause: ConnectionRefused { port: 6379 },
    });
    assert_eq!(err.to_string(), "connection pool exhausted");

    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "connection refused on port 6379");
    assert!(source.downcast_ref::<ConnectionRefused>().is_some());
}
