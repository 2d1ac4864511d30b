//! Shared cart

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    cart::{
        observer::{CartObserver, NoopObserver},
        store::CartStore,
    },
    storage::CartStorage,
};

/// A cart that can be entered from several threads.
///
/// Every access holds the lock for the full operation, including the storage
/// write, so mutations are applied and persisted one at a time.
#[derive(Debug)]
pub struct SharedCartStore<S: CartStorage, O: CartObserver = NoopObserver> {
    inner: Arc<Mutex<CartStore<S, O>>>,
}

impl<S: CartStorage, O: CartObserver> Clone for SharedCartStore<S, O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: CartStorage, O: CartObserver> SharedCartStore<S, O> {
    /// Wrap a cart store.
    pub fn new(store: CartStore<S, O>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Lock the cart.
    ///
    /// A panic in another holder does not leave the cart half-mutated (every
    /// operation validates before it mutates), so a poisoned lock is recovered.
    pub fn lock(&self) -> MutexGuard<'_, CartStore<S, O>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the cart.
    pub fn with<R>(&self, f: impl FnOnce(&mut CartStore<S, O>) -> R) -> R {
        f(&mut self.lock())
    }
}

impl<S: CartStorage, O: CartObserver> From<CartStore<S, O>> for SharedCartStore<S, O> {
    fn from(store: CartStore<S, O>) -> Self {
        Self::new(store)
    }
}
