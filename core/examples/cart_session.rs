// storefront/examples/cart_session.rs

use storefront::{Cart, Catalog, Session, StorefrontError};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), StorefrontError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Cart Session Example ---");

  // 1. The built-in catalog is what the storefront sells.
  let catalog = Catalog::builtin();
  for product in catalog.iter() {
    info!("#{} {} - {} ({})", product.id, product.name, product.price, product.description);
  }

  // 2. A session with no user yet. Watchers see every later change.
  let session = Session::new();
  let mut watcher = session.watch();

  // 3. The cart holds a single line: adding another product replaces it.
  let mut cart = Cart::new();
  cart.add(1);
  cart.add(1);
  info!("After two coffees: {:?}, total {}", cart.line(), cart.total(&catalog));

  cart.add(3);
  info!("After a mug: {:?}, total {}", cart.line(), cart.total(&catalog));
  assert_eq!(cart.quantity_of(1), 0);

  // 4. Without a user there is nothing to submit.
  if session.user_id().is_none() {
    info!("No user entered yet; an order cannot be placed.");
  }

  // 5. Entering a user id notifies watchers.
  session.set_user_id(Some(42));
  if let Some(user_id) = watcher.changed().await {
    info!("Session user is now {:?}", user_id);
  }

  let user_id = session
    .user_id()
    .ok_or_else(|| StorefrontError::validation("Enter a user ID first"))?;
  let request = cart
    .to_order_request(&catalog, user_id, "desk mug")
    .ok_or_else(|| StorefrontError::validation("Your cart is empty"))?;
  info!("Order request ready: {:?}", request);

  // 6. Removing the last unit empties the slot.
  cart.remove_one(3);
  info!("Cart empty: {}", cart.is_empty());

  info!("--- Cart Session Example Finished ---");
  Ok(())
}
