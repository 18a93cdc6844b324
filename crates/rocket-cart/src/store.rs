//! The cart store: authoritative cart state with write-through persistence.

use std::sync::Arc;

use rocket_inventory::{InventoryClient, ProductId};
use rocket_storage::{storage_key, Storage, StorageExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tracing::instrument;

use crate::cart::{Cart, Product};
use crate::error::{CartError, CartOperation};
use crate::notice::{Notifier, TracingNotifier};

/// Default storage namespace.
pub const DEFAULT_NAMESPACE: &str = "@App";

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Prefix of the durable record key; the cart lives at `"{namespace}:cart"`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

impl StoreConfig {
    /// Key of the durable cart record.
    pub fn cart_key(&self) -> String {
        storage_key!(self.namespace.as_str(), "cart")
    }
}

/// Arguments of [`CartStore::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

struct Inner {
    key: String,
    storage: Arc<dyn Storage>,
    inventory: Arc<dyn InventoryClient>,
    notifier: Arc<dyn Notifier>,
    /// Held for the whole read-validate-commit sequence of a mutation.
    gate: Mutex<()>,
    state: watch::Sender<Cart>,
}

/// Shared handle to the cart.
///
/// Construct once at startup and clone the handle into every consumer.
/// Mutations are serialized; reads return the last committed snapshot.
/// Failed operations never surface as errors: they leave the cart untouched
/// and emit a [`Notice`](crate::Notice) through the configured notifier.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("cart", &*self.inner.state.borrow())
            .finish()
    }
}

/// Builder for [`CartStore`].
pub struct CartStoreBuilder {
    config: StoreConfig,
    storage: Arc<dyn Storage>,
    inventory: Arc<dyn InventoryClient>,
    notifier: Arc<dyn Notifier>,
}

impl CartStoreBuilder {
    /// Replace the whole configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the storage namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    /// Set the notice sink. Defaults to [`TracingNotifier`].
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Load the persisted cart and build the store.
    ///
    /// A missing record opens an empty cart, and so does a record that
    /// cannot be decoded. Only an unreadable storage backend is an error.
    pub fn open(self) -> Result<CartStore, CartError> {
        let key = self.config.cart_key();
        let cart = load_cart(self.storage.as_ref(), &key)?;
        tracing::debug!(%key, lines = cart.len(), "cart loaded");

        let (state, _) = watch::channel(cart);
        Ok(CartStore {
            inner: Arc::new(Inner {
                key,
                storage: self.storage,
                inventory: self.inventory,
                notifier: self.notifier,
                gate: Mutex::new(()),
                state,
            }),
        })
    }
}

fn load_cart(storage: &dyn Storage, key: &str) -> Result<Cart, CartError> {
    match storage.get::<Vec<Product>>(key) {
        Ok(Some(items)) => {
            let (cart, repaired) = Cart::from_persisted(items);
            if repaired {
                tracing::warn!(%key, "persisted cart had invalid lines; repaired");
            }
            Ok(cart)
        }
        Ok(None) => Ok(Cart::new()),
        Err(e) if e.is_corrupt() => {
            tracing::warn!(%key, error = %e, "persisted cart is malformed; starting empty");
            Ok(Cart::new())
        }
        Err(e) => Err(e.into()),
    }
}

impl CartStore {
    /// Start building a store over `storage`, validating against `inventory`.
    pub fn builder<S, I>(storage: S, inventory: I) -> CartStoreBuilder
    where
        S: Storage + 'static,
        I: InventoryClient + 'static,
    {
        CartStoreBuilder {
            config: StoreConfig::default(),
            storage: Arc::new(storage),
            inventory: Arc::new(inventory),
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.state.subscribe()
    }

    /// Key of the durable cart record.
    pub fn storage_key(&self) -> &str {
        &self.inner.key
    }

    /// Add one unit of a product.
    ///
    /// A product not yet in the cart is fetched from the catalog and appended
    /// with amount 1; a product already present is incremented. Both paths
    /// require the new amount to be covered by stock.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) {
        let _gate = self.inner.gate.lock().await;
        let result = self.try_add_product(product_id).await;
        self.finish(CartOperation::Add, result);
    }

    /// Remove a product's line entirely.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) {
        let _gate = self.inner.gate.lock().await;
        let result = self.try_remove_product(product_id);
        self.finish(CartOperation::Remove, result);
    }

    /// Set a product's amount.
    ///
    /// Amounts below 1 are ignored without a notice; use
    /// [`remove_product`](Self::remove_product) to delete a line.
    #[instrument(skip(self, update), fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(&self, update: UpdateProductAmount) {
        if update.amount < 1 {
            tracing::debug!("amount below 1 ignored");
            return;
        }

        let _gate = self.inner.gate.lock().await;
        let result = self.try_update_product_amount(update).await;
        self.finish(CartOperation::Update, result);
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let stock = self.inner.inventory.stock(product_id).await?;
        if !stock.is_available() {
            return Err(CartError::OutOfStock {
                product_id,
                requested: 1,
                available: stock.amount,
            });
        }

        let mut cart = self.cart();
        if cart.contains(product_id) {
            cart.increment(product_id, &stock)?;
        } else {
            let product = self.inner.inventory.product(product_id).await?;
            cart.add_line(Product::from_catalog(product, 1))?;
        }

        self.persist(&cart)?;
        Ok(cart)
    }

    fn try_remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let mut cart = self.cart();
        cart.remove(product_id)?;
        self.persist(&cart)?;
        Ok(cart)
    }

    async fn try_update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<Cart, CartError> {
        let UpdateProductAmount { product_id, amount } = update;

        let stock = self.inner.inventory.stock(product_id).await?;
        if !stock.can_fulfill(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let mut cart = self.cart();
        cart.set_amount(product_id, amount)?;
        self.persist(&cart)?;
        Ok(cart)
    }

    fn persist(&self, cart: &Cart) -> Result<(), CartError> {
        self.inner
            .storage
            .set(&self.inner.key, cart.products())
            .map_err(|e| {
                tracing::error!(key = %self.inner.key, error = %e, "failed to persist cart");
                CartError::from(e)
            })
    }

    /// Publish a committed cart, or turn the error into a notice.
    fn finish(&self, op: CartOperation, result: Result<Cart, CartError>) {
        match result {
            Ok(cart) => {
                tracing::debug!(
                    operation = op.as_str(),
                    lines = cart.len(),
                    items = cart.item_count(),
                    "cart committed"
                );
                self.inner.state.send_replace(cart);
            }
            Err(err) => {
                let notice = err.notice(op);
                tracing::warn!(
                    operation = op.as_str(),
                    notice = notice.kind(),
                    error = %err,
                    "cart operation rejected"
                );
                self.inner.notifier.notify(notice);
            }
        }
    }
}
