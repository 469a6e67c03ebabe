// storefront/src/cart.rs

//! Single-slot shopping cart.
//!
//! The cart holds at most one [`CartLine`]. Adding the product already in the
//! slot increments its quantity; adding any other product replaces the line.
//! A line never has quantity 0: removing the last unit empties the slot.

use crate::catalog::Catalog;
use crate::models::{CreateOrderRequest, Price, ProductId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
  pub product_id: ProductId,
  /// Always >= 1 while the line exists.
  pub quantity: u32,
}

/// A cart line resolved against the catalog, ready to render or submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItem {
  pub product_id: ProductId,
  pub amount: u32,
  /// 0 when the product is not in the catalog.
  pub product_price: Price,
}

impl CartItem {
  pub fn total(&self) -> Price {
    self.product_price * Price::from(self.amount)
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cart {
  line: Option<CartLine>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, product_id: ProductId) {
    self.line = match self.line {
      Some(line) if line.product_id == product_id => Some(CartLine {
        product_id,
        quantity: line.quantity.saturating_add(1),
      }),
      _ => Some(CartLine { product_id, quantity: 1 }),
    };
  }

  /// Takes one unit off the line. No-op unless the line holds `product_id`.
  pub fn remove_one(&mut self, product_id: ProductId) {
    self.line = match self.line {
      Some(line) if line.product_id == product_id && line.quantity > 1 => Some(CartLine {
        product_id,
        quantity: line.quantity - 1,
      }),
      Some(line) if line.product_id == product_id => None,
      other => other,
    };
  }

  pub fn clear(&mut self) {
    self.line = None;
  }

  pub fn line(&self) -> Option<CartLine> {
    self.line
  }

  pub fn is_empty(&self) -> bool {
    self.line.is_none()
  }

  pub fn item_count(&self) -> u32 {
    self.line.map_or(0, |l| l.quantity)
  }

  pub fn quantity_of(&self, product_id: ProductId) -> u32 {
    match self.line {
      Some(line) if line.product_id == product_id => line.quantity,
      _ => 0,
    }
  }

  pub fn contains(&self, product_id: ProductId) -> bool {
    self.quantity_of(product_id) > 0
  }

  pub fn item(&self, catalog: &Catalog) -> Option<CartItem> {
    self.line.map(|line| CartItem {
      product_id: line.product_id,
      amount: line.quantity,
      product_price: catalog.price_of(line.product_id).unwrap_or(0),
    })
  }

  /// `quantity x unit price`, 0 for an empty cart.
  pub fn total(&self, catalog: &Catalog) -> Price {
    self.item(catalog).map_or(0, |item| item.total())
  }

  /// Snapshots the line into an order request, or `None` when the cart is empty.
  pub fn to_order_request(&self, catalog: &Catalog, user_id: UserId, description: &str) -> Option<CreateOrderRequest> {
    self.item(catalog).map(|item| CreateOrderRequest {
      user_id,
      product_id: item.product_id,
      amount: item.amount,
      description: description.to_string(),
      product_price: item.product_price,
    })
  }
}
