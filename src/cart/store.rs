//! Cart Store

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tracing::{debug, error, warn};

use crate::{
    cart::{
        codec,
        commands::CartCommand,
        errors::{CartError, InvalidInput, PersistenceError},
        models::{CartItem, checked_total},
        observer::{CartObserver, NoopObserver},
    },
    config::CartConfig,
    images::resolve_image,
    products::{ProductId, ProductSnapshot},
    storage::CartStorage,
};

/// Whether the last write reached storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Durability {
    /// Storage matches the in-memory cart.
    #[default]
    Synced,

    /// The last write failed; storage holds an older cart.
    Degraded,
}

/// The authoritative cart, mirrored to a [`CartStorage`] after every mutation.
#[derive(Debug)]
pub struct CartStore<S: CartStorage, O: CartObserver = NoopObserver> {
    items: Vec<CartItem>,
    storage: S,
    observer: O,
    config: CartConfig,
    durability: Durability,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart persisted in `storage`, or an empty cart if there is none.
    ///
    /// Never fails: unreadable or corrupt state is logged and discarded.
    pub fn new(storage: S, config: CartConfig) -> Self {
        Self::with_observer(storage, config, NoopObserver)
    }
}

impl<S: CartStorage, O: CartObserver> CartStore<S, O> {
    /// Open the cart with an observer notified of restores, changes and
    /// persistence failures.
    pub fn with_observer(storage: S, config: CartConfig, observer: O) -> Self {
        let mut store = Self {
            items: Vec::new(),
            storage,
            observer,
            config,
            durability: Durability::Synced,
        };

        store.reload();

        store
    }

    /// Replace the in-memory cart with the persisted one.
    ///
    /// Falls back to an empty cart if storage cannot be read or parsed.
    pub fn reload(&mut self) {
        match self.restore() {
            Ok(items) => {
                debug!(
                    key = %self.config.storage_key,
                    lines = items.len(),
                    "restored cart"
                );

                self.items = items;
                self.observer.on_restored(&self.items);
            }
            Err(err) => {
                warn!(
                    key = %self.config.storage_key,
                    error = %err,
                    "discarding persisted cart"
                );

                self.items.clear();
                self.observer.on_restore_failed(&err);
            }
        }
    }

    fn restore(&self) -> Result<Vec<CartItem>, PersistenceError> {
        let bytes = self
            .storage
            .read(&self.config.storage_key)
            .map_err(PersistenceError::StorageUnavailable)?;

        match bytes {
            Some(bytes) => codec::decode(&bytes),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&mut self) {
        let result = codec::encode(&self.items).and_then(|bytes| {
            self.storage
                .write(&self.config.storage_key, &bytes)
                .map_err(PersistenceError::StorageWriteFailed)
        });

        match result {
            Ok(()) => self.durability = Durability::Synced,
            Err(err) => {
                error!(
                    key = %self.config.storage_key,
                    error = %err,
                    "cart change not persisted"
                );

                self.durability = Durability::Degraded;
                self.observer.on_persist_failed(&err);
            }
        }

        self.observer.on_changed(&self.items);
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product_id == product_id)
    }

    /// Add `quantity` of `product` to the cart and return a copy of its line.
    ///
    /// An existing line for the same id keeps its position, gains `quantity` and
    /// takes name, category, price and image from the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidInput`] if the id is missing, `quantity` is 0,
    /// the price cannot be coerced, or the quantity or cart total would
    /// overflow. The cart is left untouched.
    pub fn add_to_cart(
        &mut self,
        product: &ProductSnapshot,
        quantity: u32,
    ) -> Result<CartItem, CartError> {
        let product_id = product
            .id
            .as_ref()
            .filter(|id| !id.is_blank())
            .ok_or(InvalidInput::MissingProductId)?;

        if quantity == 0 {
            return Err(InvalidInput::ZeroQuantity.into());
        }

        let unit_price = product.price.coerce()?;
        let quantity = match self.item(product_id) {
            Some(item) => item
                .quantity
                .checked_add(quantity)
                .ok_or(InvalidInput::QuantityOverflow)?,
            None => quantity,
        };

        self.check_amount(product_id, unit_price, quantity)?;

        let image = resolve_image(product, &self.config.storage_base_url);
        let category = product
            .category
            .as_ref()
            .filter(|category| !category.trim().is_empty())
            .unwrap_or(&self.config.default_category)
            .clone();

        let line = if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
        {
            item.quantity = quantity;
            item.name.clone_from(&product.name);
            item.category = category;
            item.unit_price = unit_price;
            item.raw_images.clone_from(&product.images);
            item.set_image(image);

            item.clone()
        } else {
            let mut item = CartItem {
                product_id: product_id.clone(),
                name: product.name.clone(),
                category,
                unit_price,
                quantity,
                image_url: None,
                image_path: None,
                raw_images: product.images.clone(),
            };
            item.set_image(image);

            self.items.push(item.clone());

            item
        };

        debug!(product_id = %product_id, quantity, "added to cart");

        self.persist();

        Ok(line)
    }

    /// Add a single unit of `product`.
    ///
    /// # Errors
    ///
    /// See [`CartStore::add_to_cart`].
    pub fn add_one(&mut self, product: &ProductSnapshot) -> Result<CartItem, CartError> {
        self.add_to_cart(product, 1)
    }

    /// Reject a line of `quantity × unit_price` for `product_id` if it, or the
    /// cart total with it in place of the current line, is not representable.
    fn check_amount(
        &self,
        product_id: &ProductId,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<(), InvalidInput> {
        let others = checked_total(
            self.items
                .iter()
                .filter(|item| &item.product_id != product_id),
        );

        unit_price
            .checked_mul(Decimal::from(quantity))
            .zip(others)
            .and_then(|(line, others)| others.checked_add(line))
            .map(|_total| ())
            .ok_or(InvalidInput::AmountOverflow)
    }

    /// Remove a product's line, returning it. Absent ids are a no-op.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> Option<CartItem> {
        let removed = self.position(product_id).map(|idx| self.items.remove(idx));

        debug!(
            product_id = %product_id,
            removed = removed.is_some(),
            "removed from cart"
        );

        self.persist();

        removed
    }

    /// Set a product's quantity exactly. 0 removes the line; absent ids are a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::AmountOverflow`] if the line or cart total would
    /// not be representable. The cart is left untouched.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove_from_cart(product_id);
            return Ok(());
        }

        if let Some(unit_price) = self.item(product_id).map(|item| item.unit_price) {
            self.check_amount(product_id, unit_price, quantity)?;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
        {
            item.quantity = quantity;
            debug!(product_id = %product_id, quantity, "updated quantity");
        }

        self.persist();

        Ok(())
    }

    /// Add one to a product's quantity and return the new quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotFound`]: the product is not in the cart.
    /// - [`CartError::InvalidInput`]: the quantity or cart total would overflow.
    pub fn increment_quantity(&mut self, product_id: &ProductId) -> Result<u32, CartError> {
        let current = self.current_quantity(product_id)?;
        let quantity = current
            .checked_add(1)
            .ok_or(InvalidInput::QuantityOverflow)?;

        self.update_quantity(product_id, quantity)?;

        Ok(quantity)
    }

    /// Take one from a product's quantity and return the new quantity. Reaching 0
    /// removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] if the product is not in the cart.
    pub fn decrement_quantity(&mut self, product_id: &ProductId) -> Result<u32, CartError> {
        let quantity = self.current_quantity(product_id)?.saturating_sub(1);

        self.update_quantity(product_id, quantity)?;

        Ok(quantity)
    }

    fn current_quantity(&self, product_id: &ProductId) -> Result<u32, CartError> {
        self.item(product_id)
            .map(|item| item.quantity)
            .ok_or_else(|| CartError::NotFound(product_id.clone()))
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();

        debug!("cleared cart");

        self.persist();
    }

    /// Execute a command.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying operation.
    pub fn apply(&mut self, command: CartCommand) -> Result<(), CartError> {
        match command {
            CartCommand::Add { product, quantity } => {
                self.add_to_cart(&product, quantity)?;
            }
            CartCommand::Remove(id) => {
                self.remove_from_cart(&id);
            }
            CartCommand::UpdateQuantity(id, quantity) => self.update_quantity(&id, quantity)?,
            CartCommand::Increment(id) => {
                self.increment_quantity(&id)?;
            }
            CartCommand::Decrement(id) => {
                self.decrement_quantity(&id)?;
            }
            CartCommand::Clear => self.clear_cart(),
        }

        Ok(())
    }

    /// Quantity of a product, 0 if absent.
    pub fn item_quantity(&self, product_id: &ProductId) -> u32 {
        self.item(product_id).map_or(0, |item| item.quantity)
    }

    /// Whether the product has a line.
    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.item(product_id).is_some()
    }

    /// A product's line.
    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| &item.product_id == product_id)
    }

    /// All lines, in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `unit_price × quantity` over all lines.
    pub fn total_amount(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.line_total()))
    }

    /// Sum of quantities over all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// [`CartStore::total_amount`] in the configured currency.
    pub fn total_money(&self) -> Money<'static, Currency> {
        Money::from_decimal(self.total_amount(), self.config.currency)
    }

    /// Whether the last write reached storage.
    pub fn durability(&self) -> Durability {
        self.durability
    }

    /// Active configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Attached observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }
}
