// storefront/src/models/order.rs

use super::{Price, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// Server-side decision on an order. The client only ever observes it.
///
/// Any value other than `pending` or `approved` is read as [`OrderStatus::Rejected`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum OrderStatus {
  #[default]
  Pending,
  Approved,
  Rejected,
}

impl From<String> for OrderStatus {
  fn from(raw: String) -> Self {
    match raw.to_ascii_lowercase().as_str() {
      "pending" => OrderStatus::Pending,
      "approved" => OrderStatus::Approved,
      _ => OrderStatus::Rejected,
    }
  }
}

impl OrderStatus {
  pub fn is_final(self) -> bool {
    !matches!(self, OrderStatus::Pending)
  }

  /// Short label for rendering next to an order.
  pub fn label(self) -> &'static str {
    match self {
      OrderStatus::Approved => "Paid",
      OrderStatus::Pending => "Pending",
      OrderStatus::Rejected => "Declined",
    }
  }
}

impl std::fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let raw = match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Approved => "approved",
      OrderStatus::Rejected => "rejected",
    };
    f.write_str(raw)
  }
}

/// Read-only copy of an order owned by the remote order service.
///
/// Missing fields default so that sparse responses (an id and little else)
/// still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
  pub id: String,
  pub user_id: UserId,
  pub product_id: ProductId,
  pub product_price: Price,
  pub amount: u32,
  pub description: String,
  pub status: OrderStatus,
}

impl Order {
  /// Price captured at submission times the ordered quantity. Saturates
  /// rather than overflowing on out-of-range server data.
  pub fn total(&self) -> Price {
    self.product_price.saturating_mul(Price::from(self.amount))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_status_reads_as_rejected() {
    let parsed: Vec<OrderStatus> = serde_json::from_str(r#"["pending","approved","rejected","cancelled"]"#).unwrap();
    assert_eq!(
      parsed,
      vec![
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Rejected,
        OrderStatus::Rejected
      ]
    );
    assert_eq!(serde_json::to_string(&OrderStatus::Approved).unwrap(), r#""approved""#);
  }

  #[test]
  fn sparse_order_decodes() {
    let order: Order = serde_json::from_str(r#"{"id":"o1"}"#).unwrap();
    assert_eq!(order.id, "o1");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total(), 0);
  }

  #[test]
  fn total_multiplies_price_by_amount() {
    let order = Order {
      id: "o2".into(),
      product_price: 120,
      amount: 3,
      ..Default::default()
    };
    assert_eq!(order.total(), 360);
    assert_eq!(OrderStatus::Rejected.label(), "Declined");
  }

  #[test]
  fn total_saturates_on_huge_prices() {
    let order: Order = serde_json::from_str(&format!(r#"{{"id":"o3","product_price":{},"amount":4}}"#, Price::MAX)).unwrap();
    assert_eq!(order.total(), Price::MAX);

    let refund = Order {
      product_price: Price::MIN,
      amount: 2,
      ..Default::default()
    };
    assert_eq!(refund.total(), Price::MIN);
  }

  #[test]
  fn only_pending_is_not_final() {
    assert!(!OrderStatus::Pending.is_final());
    assert!(OrderStatus::Approved.is_final());
    assert!(OrderStatus::Rejected.is_final());
  }
}
