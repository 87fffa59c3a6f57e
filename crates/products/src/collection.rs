//! The loaded page of products.
//!
//! The collection keeps the order the server returned. It is only ever
//! replaced wholesale (a new listing), patched in place (status changes) or
//! grown at the front (a product created in this session).

use serde_json::Value;

use crate::product::{Product, ProductId};

/// Every row of `data.data` in a listing body, in order and unmodified.
///
/// Any other shape is an empty listing, not an error.
pub fn listing_rows(body: &Value) -> Vec<Product> {
    body.get("data")
        .and_then(|data| data.get("data"))
        .and_then(Value::as_array)
        .map(|rows| rows.iter().cloned().map(Product::from_row).collect())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCollection {
    products: Vec<Product>,
}

impl ProductCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id() == Some(id))
    }

    /// Replace the first product matching `id` with a copy carrying `active`.
    ///
    /// Returns `false` when no product has that id.
    pub fn set_active(&mut self, id: &ProductId, active: bool) -> bool {
        match self.position(id) {
            Some(index) => {
                self.products[index] = self.products[index].with_active(active);
                true
            }
            None => false,
        }
    }

    /// Set `active` on every product whose id is in `ids`. Returns the number
    /// of products touched.
    pub fn set_active_many(&mut self, ids: &[ProductId], active: bool) -> usize {
        let mut touched = 0;
        for product in self.products.iter_mut() {
            if product.id().is_some_and(|id| ids.contains(id)) {
                *product = product.with_active(active);
                touched += 1;
            }
        }
        touched
    }

    pub fn prepend(&mut self, product: Product) {
        self.products.insert(0, product);
    }
}
