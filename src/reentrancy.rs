//! Debug-only reentrancy detection for key-policy callbacks.
//!
//! Table operations call user code (hash and equality) while walking a
//! bucket. Key policies must not touch the table they serve. Tables keep no
//! interior-mutable state, so such a call could only read through a shared
//! reference; the guard exists to enforce that contract, not to protect
//! memory. In debug builds, entering a second operation while one is active
//! panics and names both operations. In release builds the guard compiles
//! away and the nested call simply runs.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-table tracker of the operation currently running.
#[derive(Debug)]
pub struct OpGuard {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    // Tables are single-threaded: keep them !Send + !Sync.
    _nosend: PhantomData<*mut ()>,
}

impl OpGuard {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            _nosend: PhantomData,
        }
    }

    /// Mark `op` as running until the returned section is dropped.
    #[inline]
    pub fn enter(&self, op: &'static str) -> Section<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(outer) = self.active.get() {
                panic!(
                    "reentrancy detected: `{op}` called from a key-policy callback inside `{outer}`"
                );
            }
            self.active.set(Some(op));
            return Section { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            return Section { _z: PhantomData };
        }
    }

    /// Name of the operation currently running, if any (always `None` in
    /// release builds).
    pub fn active(&self) -> Option<&'static str> {
        #[cfg(debug_assertions)]
        {
            return self.active.get();
        }
        #[cfg(not(debug_assertions))]
        {
            return None;
        }
    }
}

impl Default for OpGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII section returned by [`OpGuard::enter`].
pub struct Section<'a> {
    #[cfg(debug_assertions)]
    owner: &'a OpGuard,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for Section<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.owner.active.get().is_some());
            self.owner.active.set(None);
        }
    }
}
