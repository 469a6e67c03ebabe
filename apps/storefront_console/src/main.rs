// storefront_console/src/main.rs

// Declare modules for the application
mod commands;
mod config;
mod errors;
mod views;

use crate::commands::{Command, HELP};
use crate::config::AppConfig;
use crate::errors::Result as AppResult;

use anyhow::Context;
use std::io::Write;
use storefront::{Session, Storefront};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so they don't interleave with the rendered views.
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_writer(std::io::stderr)
    .init();

  tracing::info!("Starting storefront console...");

  let config = AppConfig::from_env().context("Failed to load application configuration")?;
  let session = match config.initial_user_id {
    Some(user_id) => Session::with_user(user_id),
    None => Session::new(),
  };
  let store = Storefront::from_config(&config.storefront, session).context("Failed to start the storefront")?;
  tracing::info!(context = ?config.context, base_url = %config.storefront.base_url, "Storefront ready.");

  println!("{}", views::products(store.catalog()));
  println!("Type 'help' for commands.");

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    print!("> ");
    std::io::stdout().flush()?;

    let line = tokio::select! {
      line = lines.next_line() => line?,
      _ = tokio::signal::ctrl_c() => {
        tracing::info!("Interrupted.");
        None
      }
    };
    let Some(line) = line else {
      break;
    };

    match Command::parse(&line) {
      Ok(None) => continue,
      Ok(Some(Command::Quit)) => break,
      Ok(Some(command)) => {
        if let Err(e) = run_command(&store, command).await {
          println!("{}", e);
        }
      }
      Err(e) => println!("{}", e),
    }
  }

  store.shutdown();
  tracing::info!("Storefront console stopped.");
  Ok(())
}

async fn run_command(store: &Storefront, command: Command) -> AppResult<()> {
  match command {
    Command::User(user_id) => {
      if store.set_user_id(user_id) {
        match user_id {
          Some(id) => println!("Signed in as user {}. Loading account and orders...", id),
          None => println!("Signed out."),
        }
      } else {
        println!("User unchanged.");
      }
    }
    Command::Products => println!("{}", views::products(store.catalog())),
    Command::Add(product_id) => {
      store.add_to_cart(product_id)?;
      println!("{}", views::cart(store.catalog(), store.cart_item()));
    }
    Command::Remove(product_id) => {
      store.remove_one_from_cart(product_id);
      println!("{}", views::cart(store.catalog(), store.cart_item()));
    }
    Command::Cart => println!("{}", views::cart(store.catalog(), store.cart_item())),
    Command::Describe(text) => {
      store.set_description(text);
      println!("Description set.");
    }
    Command::Order => {
      store.place_order().await?;
      println!("{}", views::order_notice(&store.orders().snapshot()));
    }
    Command::Orders => {
      store.history().fetch_orders().await;
      println!("{}", views::orders(&store.history().snapshot()));
    }
    Command::Status(order_id) => {
      store.order_status(&order_id).await;
      println!("{}", views::order_status(&store.status().snapshot()));
    }
    Command::Account => {
      store.account().fetch_account().await;
      println!("{}", views::account(store.user_id(), &store.account().snapshot()));
    }
    Command::CreateAccount => {
      store.create_account().await;
      println!("{}", views::account(store.user_id(), &store.account().snapshot()));
    }
    Command::Amount(amount) => {
      store.set_deposit_amount(Some(amount));
      println!("Deposit amount set to {}.", amount);
    }
    Command::Deposit => {
      store.deposit().await;
      println!("{}", views::account(store.user_id(), &store.account().snapshot()));
    }
    Command::Balance => {
      store.account().refresh_balance().await;
      println!("{}", views::account(store.user_id(), &store.account().snapshot()));
    }
    Command::Help => println!("{}", HELP),
    Command::Quit => {}
  }
  Ok(())
}
