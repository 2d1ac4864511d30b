//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CartCommand, CartError, CartItem, CartObserver, CartStore, Durability, InvalidInput,
        NoopObserver, PersistenceError, SharedCartStore,
    },
    config::{CartConfig, ConfigError},
    images::{CanonicalImage, resolve_image, resolve_images, storage_url},
    products::{ImageRef, PriceInput, ProductId, ProductSnapshot},
    storage::{CartStorage, FileStorage, MemoryStorage, StorageError},
};
