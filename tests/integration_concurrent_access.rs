//! Concurrent access integration tests
//!
//! A built container is shared across threads for resolution. These tests
//! check singleton identity and single construction under contention.

use crossbeam_utils::thread;
use ioclite::{Container, Injectable, IocResult, ResolverContext};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::time::Duration;

const THREADS: usize = 8;

trait Counter: Send + Sync {
    fn increment(&self) -> usize;
    fn get(&self) -> usize;
}

#[derive(Default)]
struct AtomicCounter {
    count: AtomicUsize,
}

impl Counter for AtomicCounter {
    fn increment(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

ioclite::implements!(AtomicCounter => dyn Counter);

static SLOW_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

struct SlowCounter {
    inner: AtomicCounter,
}

impl Counter for SlowCounter {
    fn increment(&self) -> usize {
        self.inner.increment()
    }

    fn get(&self) -> usize {
        self.inner.get()
    }
}

impl Injectable for SlowCounter {
    fn construct(_: &ResolverContext<'_>) -> IocResult<Self> {
        SLOW_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        Ok(SlowCounter {
            inner: AtomicCounter::default(),
        })
    }
}

ioclite::implements!(SlowCounter => dyn Counter);

#[test]
fn test_first_singleton_resolution_constructs_once() {
    let mut container = Container::new();
    container.register_singleton::<dyn Counter, SlowCounter>();

    let barrier = Barrier::new(THREADS);
    let resolved: Vec<Arc<dyn Counter>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|_| {
                    barrier.wait();
                    container.resolve::<dyn Counter>().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
    .unwrap();

    assert_eq!(SLOW_CONSTRUCTIONS.load(Ordering::SeqCst), 1);
    for counter in &resolved[1..] {
        assert!(Arc::ptr_eq(&resolved[0], counter));
    }
}

#[test]
fn test_singleton_state_is_shared_across_threads() {
    let calls = Arc::new(AtomicUsize::new(0));
    let factory_calls = calls.clone();

    let mut container = Container::new();
    container.register_factory::<dyn Counter, _>(ioclite::Lifetime::Singleton, move |_| {
        factory_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(AtomicCounter::default()))
    });

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|_| {
                for _ in 0..100 {
                    container.resolve::<dyn Counter>().unwrap().increment();
                }
            });
        }
    })
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(container.resolve::<dyn Counter>().unwrap().get(), THREADS * 100);
}

#[test]
fn test_transient_instances_are_per_resolution_across_threads() {
    struct Ticket;
    ioclite::injectable!(Ticket);

    let mut container = Container::new();
    container.register_transient::<Ticket, Ticket>();
    let container = Arc::new(container);

    let tickets: Vec<Arc<Ticket>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| s.spawn(|_| container.resolve::<Ticket>().unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
    .unwrap();

    for (i, a) in tickets.iter().enumerate() {
        for b in &tickets[i + 1..] {
            assert!(!Arc::ptr_eq(a, b));
        }
    }
}

#[test]
fn test_failed_singleton_can_be_retried_concurrently() {
    struct NeedsName {
        _name: Arc<String>,
    }
    ioclite::injectable!(NeedsName { _name });

    let mut container = Container::new();
    container.register_singleton::<NeedsName, NeedsName>();

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|_| assert!(container.resolve::<NeedsName>().is_err()));
        }
    })
    .unwrap();
    assert!(!container.descriptor::<NeedsName>().unwrap().is_cached());

    container.register_instance(Arc::new(String::from("ada")));
    let first = container.resolve::<NeedsName>().unwrap();
    assert!(Arc::ptr_eq(&first, &container.resolve::<NeedsName>().unwrap()));
}
