// storefront/src/catalog.rs

//! Static product reference data. Loaded once, never mutated, looked up by id.

use crate::models::{Price, ProductId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub description: String,
  pub price: Price,
}

impl Product {
  pub fn new(id: ProductId, name: &str, description: &str, price: Price) -> Self {
    Self {
      id,
      name: name.to_string(),
      description: description.to_string(),
      price,
    }
  }
}

/// Immutable, id-ordered list of purchasable products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  products: Vec<Product>,
}

impl Catalog {
  /// Builds a catalog from an arbitrary list. Products are kept sorted by id;
  /// when an id repeats, the first occurrence wins.
  pub fn new(mut products: Vec<Product>) -> Self {
    products.sort_by_key(|p| p.id);
    products.dedup_by_key(|p| p.id);
    Self { products }
  }

  /// The products the storefront sells out of the box.
  pub fn builtin() -> Self {
    Self::new(vec![
      Product::new(1, "Coffee", "A bag of freshly roasted beans", 450),
      Product::new(2, "Tea", "Loose-leaf green tea, 100 g", 300),
      Product::new(3, "Mug", "Ceramic mug, 350 ml", 700),
      Product::new(4, "Cookies", "Oat cookies, pack of 12", 250),
    ])
  }

  pub fn get(&self, id: ProductId) -> Option<&Product> {
    self
      .products
      .binary_search_by_key(&id, |p| p.id)
      .ok()
      .and_then(|idx| self.products.get(idx))
  }

  pub fn price_of(&self, id: ProductId) -> Option<Price> {
    self.get(id).map(|p| p.price)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Product> {
    self.products.iter()
  }

  pub fn len(&self) -> usize {
    self.products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.is_empty()
  }
}
