//! Cart observers

use crate::cart::{errors::PersistenceError, models::CartItem};

/// Hooks called by the cart store as its state and durability change.
///
/// All methods default to doing nothing, so implementors only override the
/// events they care about.
pub trait CartObserver: Send {
    /// Called after persisted items were restored.
    ///
    /// # Parameters
    ///
    /// - `items`: The restored items, possibly empty
    fn on_restored(&mut self, _items: &[CartItem]) {}

    /// Called when persisted state could not be read or parsed and the cart
    /// started empty instead.
    fn on_restore_failed(&mut self, _error: &PersistenceError) {}

    /// Called when a mutation was applied in memory but could not be written.
    ///
    /// The next session will not see the change unless a later write succeeds.
    fn on_persist_failed(&mut self, _error: &PersistenceError) {}

    /// Called after every completed mutation with the current items.
    fn on_changed(&mut self, _items: &[CartItem]) {}
}

/// No-op observer for unobserved carts.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {}

impl<O: CartObserver + ?Sized> CartObserver for Box<O> {
    fn on_restored(&mut self, items: &[CartItem]) {
        (**self).on_restored(items);
    }

    fn on_restore_failed(&mut self, error: &PersistenceError) {
        (**self).on_restore_failed(error);
    }

    fn on_persist_failed(&mut self, error: &PersistenceError) {
        (**self).on_persist_failed(error);
    }

    fn on_changed(&mut self, items: &[CartItem]) {
        (**self).on_changed(items);
    }
}
