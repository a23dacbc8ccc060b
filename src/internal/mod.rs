//! Internal implementation details.

pub(crate) mod circular;
pub(crate) mod slot;

pub(crate) use slot::SingletonSlot;
