//! Cycle and depth guards for recursive resolution.

use crate::container::ResolverContext;
use crate::error::{IocError, IocResult};
use crate::key::Key;
use crate::options::ContainerOptions;

/// Checks that resolving `key` underneath `parent` neither closes a cycle
/// nor exceeds the configured depth.
///
/// Runs before any singleton slot is touched. Singletons are always
/// checked, whatever `detect_cycles` says, since re-entering a slot that is
/// still being filled would block forever.
pub(crate) fn enter(
    parent: &ResolverContext<'_>,
    key: &Key,
    singleton: bool,
    options: &ContainerOptions,
) -> IocResult<()> {
    if (options.detect_cycles || singleton) && parent.is_resolving(key) {
        let mut path = parent.path();
        path.push(key.name());
        return Err(IocError::Circular(path));
    }

    if parent.depth() >= options.max_depth {
        return Err(IocError::DepthExceeded(options.max_depth));
    }

    Ok(())
}
