//! Per-contract singleton storage.

use crate::error::IocResult;
use crate::registration::AnyArc;

#[cfg(feature = "once-cell")]
use once_cell::sync::OnceCell;

#[cfg(all(not(feature = "once-cell"), feature = "parking-lot"))]
use parking_lot::Mutex;
#[cfg(all(not(feature = "once-cell"), not(feature = "parking-lot")))]
use std::sync::Mutex;

/// Holds the one instance of a singleton contract.
///
/// Initialization is single-flight: concurrent first resolutions block on
/// the slot while one of them constructs, and every caller then receives
/// the stored instance. A failed construction leaves the slot empty.
pub(crate) struct SingletonSlot {
    #[cfg(feature = "once-cell")]
    cell: OnceCell<AnyArc>,
    #[cfg(not(feature = "once-cell"))]
    cell: Mutex<Option<AnyArc>>,
}

impl SingletonSlot {
    pub(crate) fn new() -> Self {
        Self {
            #[cfg(feature = "once-cell")]
            cell: OnceCell::new(),
            #[cfg(not(feature = "once-cell"))]
            cell: Mutex::new(None),
        }
    }

    /// Returns the stored instance, if any.
    #[inline]
    pub(crate) fn get(&self) -> Option<AnyArc> {
        #[cfg(feature = "once-cell")]
        {
            self.cell.get().cloned()
        }
        #[cfg(not(feature = "once-cell"))]
        {
            self.lock().clone()
        }
    }

    /// Returns the stored instance, constructing it with `init` first if the
    /// slot is empty. `init` runs at most once per successful fill.
    pub(crate) fn get_or_try_init<F>(&self, init: F) -> IocResult<AnyArc>
    where
        F: FnOnce() -> IocResult<AnyArc>,
    {
        #[cfg(feature = "once-cell")]
        {
            self.cell.get_or_try_init(init).cloned()
        }
        #[cfg(not(feature = "once-cell"))]
        {
            let mut guard = self.lock();
            if let Some(existing) = guard.as_ref() {
                return Ok(existing.clone());
            }
            let value = init()?;
            *guard = Some(value.clone());
            Ok(value)
        }
    }

    #[cfg(all(not(feature = "once-cell"), feature = "parking-lot"))]
    fn lock(&self) -> parking_lot::MutexGuard<'_, Option<AnyArc>> {
        self.cell.lock()
    }

    // A panicking constructor poisons the lock without storing anything.
    #[cfg(all(not(feature = "once-cell"), not(feature = "parking-lot")))]
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<AnyArc>> {
        self.cell.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
