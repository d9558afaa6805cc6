//! Shared access to one registry from several threads.
//!
//! The registry's structures are not built for concurrent access: growth
//! rewrites every bucket chain. All operations are therefore serialized
//! behind a single mutex.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::config::AfunConfig;
use crate::table::SymbolRegistry;

/// Cloneable handle to a mutex-guarded [`SymbolRegistry`]
///
/// # Examples
///
/// ```
/// use aterm_afun::SharedRegistry;
///
/// let shared = SharedRegistry::default();
/// let other = shared.clone();
///
/// let f = shared.with(|reg| reg.intern("f", 2, false));
/// assert_eq!(other.with(|reg| reg.intern("f", 2, false)), f);
/// ```
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<SymbolRegistry>>,
}

impl SharedRegistry {
    pub fn new(config: AfunConfig) -> crate::config::Result<Self> {
        Ok(Self::from(SymbolRegistry::new(config)?))
    }

    /// Lock the registry for a sequence of operations
    pub fn lock(&self) -> MutexGuard<'_, SymbolRegistry> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the registry
    pub fn with<R>(&self, f: impl FnOnce(&mut SymbolRegistry) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}

impl From<SymbolRegistry> for SharedRegistry {
    fn from(registry: SymbolRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }
}
