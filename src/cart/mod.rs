//! Cart
//!
//! The cart store and everything it persists.

pub mod codec;
pub mod commands;
pub mod errors;
pub mod models;
pub mod observer;
pub mod shared;
pub mod store;

pub use commands::CartCommand;
pub use errors::{CartError, InvalidInput, PersistenceError};
pub use models::CartItem;
pub use observer::{CartObserver, NoopObserver};
pub use shared::SharedCartStore;
pub use store::{CartStore, Durability};
