use crate::domain::model::{CartItem, PaymentOutcome};
use crate::domain::ports::KeyValueStore;
use crate::store;
use crate::utils::error::{KitError, Result};

/// Shopping cart persisted under the `cart` key after every change.
#[derive(Debug)]
pub struct Cart<S: KeyValueStore> {
    store: S,
    items: Vec<CartItem>,
}

impl<S: KeyValueStore> Cart<S> {
    /// Empty cart that has not read anything from the store yet.
    pub fn new(store: S) -> Self {
        Self {
            store,
            items: Vec::new(),
        }
    }

    /// Restores the saved cart. A saved value that cannot be decoded is
    /// dropped from the store and the cart starts empty.
    pub fn load(store: S) -> Result<Self> {
        let items = match store::CART.get(&store) {
            Ok(items) => items.unwrap_or_default(),
            Err(KitError::SerializationError(e)) => {
                tracing::warn!("⚠️ Discarding unreadable saved cart: {}", e);
                store::CART.clear(&store)?;
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        tracing::debug!("Cart restored with {} lines", items.len());
        Ok(Self { store, items })
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a product. For a product already in the cart the quantities are
    /// merged, but only when the result still fits in stock; returns whether
    /// the cart changed.
    pub fn add(&mut self, item: CartItem) -> Result<bool> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let new_quantity = existing.quantity.saturating_add(item.quantity);
            if item.quantity == 0 || new_quantity > existing.stock {
                tracing::debug!(
                    "Ignoring add for product {}: {} would exceed stock {}",
                    item.id,
                    new_quantity,
                    existing.stock
                );
                return Ok(false);
            }
            existing.quantity = new_quantity;
        } else {
            if item.quantity == 0 || item.quantity > item.stock {
                return Err(KitError::CartError {
                    product_id: item.id,
                    message: format!(
                        "quantity {} must be between 1 and stock {}",
                        item.quantity, item.stock
                    ),
                });
            }
            self.items.push(item);
        }

        self.persist()?;
        Ok(true)
    }

    /// Removes a product; returns whether it was in the cart.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        let removed = self.items.len() != before;

        self.persist()?;
        Ok(removed)
    }

    /// Sets the quantity of a line. Out-of-range quantities and unknown
    /// products leave the cart untouched.
    pub fn update_quantity(&mut self, id: u64, quantity: u32) -> Result<bool> {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return Ok(false);
        };

        if quantity == 0 || quantity > item.stock {
            return Ok(false);
        }

        item.quantity = quantity;
        self.persist()?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        store::CART.clear(&self.store)
    }

    /// Empties the cart once the gateway reports a successful payment.
    pub fn apply_payment_outcome(&mut self, outcome: &PaymentOutcome) -> Result<bool> {
        if !outcome.is_success() {
            return Ok(false);
        }

        tracing::info!(
            "💳 Payment succeeded for order {}, clearing cart",
            outcome.orden.as_deref().unwrap_or("-")
        );
        self.clear()?;
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        store::CART.set(&self.store, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn item(id: u64, price: i64, quantity: u32, stock: u32) -> CartItem {
        CartItem {
            id,
            name: format!("Producto {}", id),
            price,
            quantity,
            image: None,
            stock,
        }
    }

    #[test]
    fn test_totals_follow_mutations() {
        let mut cart = Cart::new(MemoryStore::new());
        cart.add(item(1, 9990, 2, 5)).unwrap();
        cart.add(item(2, 1500, 1, 1)).unwrap();

        assert_eq!(cart.total(), 2 * 9990 + 1500);
        assert_eq!(cart.item_count(), 3);

        assert!(cart.update_quantity(1, 5).unwrap());
        assert_eq!(cart.total(), 5 * 9990 + 1500);

        assert!(cart.remove(2).unwrap());
        assert!(!cart.remove(2).unwrap());
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_merges_within_stock_only() {
        let mut cart = Cart::new(MemoryStore::new());
        cart.add(item(1, 1000, 2, 3)).unwrap();

        assert!(cart.add(item(1, 1000, 1, 3)).unwrap());
        assert_eq!(cart.items()[0].quantity, 3);

        assert!(!cart.add(item(1, 1000, 1, 3)).unwrap());
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_add_rejects_new_line_over_stock() {
        let mut cart = Cart::new(MemoryStore::new());
        let err = cart.add(item(9, 1000, 4, 3)).unwrap_err();
        assert!(matches!(err, KitError::CartError { product_id: 9, .. }));

        assert!(cart.add(item(9, 1000, 0, 3)).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_ignores_out_of_range() {
        let mut cart = Cart::new(MemoryStore::new());
        cart.add(item(1, 1000, 2, 3)).unwrap();

        assert!(!cart.update_quantity(1, 0).unwrap());
        assert!(!cart.update_quantity(1, 4).unwrap());
        assert!(!cart.update_quantity(42, 1).unwrap());
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_cart_survives_reload() {
        let store = MemoryStore::new();
        {
            let mut cart = Cart::new(&store);
            cart.add(item(1, 2500, 2, 10)).unwrap();
        }

        let cart = Cart::load(&store).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total(), 5000);
    }

    #[test]
    fn test_corrupt_saved_cart_is_discarded() {
        let store = MemoryStore::new();
        store.set_raw("cart", "[{\"id\":").unwrap();

        let cart = Cart::load(&store).unwrap();
        assert!(cart.is_empty());
        assert_eq!(store.get_raw("cart").unwrap(), None);
    }

    #[test]
    fn test_clear_and_payment_outcome() {
        let store = MemoryStore::new();
        let mut cart = Cart::new(&store);
        cart.add(item(1, 1000, 1, 1)).unwrap();

        let failed = PaymentOutcome::from_query("estado=fallido&orden=A1");
        assert!(!cart.apply_payment_outcome(&failed).unwrap());
        assert_eq!(cart.item_count(), 1);

        let ok = PaymentOutcome::from_query("estado=exito&orden=A1");
        assert!(cart.apply_payment_outcome(&ok).unwrap());
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
        assert_eq!(store.get_raw("cart").unwrap(), None);
    }
}
