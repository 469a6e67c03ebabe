// storefront_console/src/commands.rs

//! One typed line, one command.

use crate::errors::{AppError, Result};
use storefront::{Price, ProductId, UserId};

pub const HELP: &str = "\
Commands:
  user <id>|none     set or clear the session user
  products           list the catalog
  add <id>           put one unit of a product in the cart
  remove <id>        take one unit out of the cart
  cart               show the cart
  describe <text>    set the order description
  order              place an order for the cart
  orders             list your orders
  status <order id>  look up an order's status
  account            load your bank account
  create-account     open a bank account
  amount <n>         set the amount to deposit
  deposit            deposit the amount
  balance            refresh the balance
  help               show this text
  quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  User(Option<UserId>),
  Products,
  Add(ProductId),
  Remove(ProductId),
  Cart,
  Describe(String),
  Order,
  Orders,
  Status(String),
  Account,
  CreateAccount,
  Amount(Price),
  Deposit,
  Balance,
  Help,
  Quit,
}

impl Command {
  /// `Ok(None)` for a blank line.
  pub fn parse(line: &str) -> Result<Option<Self>> {
    let line = line.trim();
    if line.is_empty() {
      return Ok(None);
    }
    let (name, rest) = match line.split_once(char::is_whitespace) {
      Some((name, rest)) => (name, rest.trim()),
      None => (line, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
      "user" => match rest {
        "none" | "clear" => Command::User(None),
        raw => Command::User(Some(number(raw, "user <id>|none")?)),
      },
      "products" => Command::Products,
      "add" => Command::Add(number(rest, "add <product id>")?),
      "remove" => Command::Remove(number(rest, "remove <product id>")?),
      "cart" => Command::Cart,
      // The description may legitimately be empty.
      "describe" => Command::Describe(rest.to_string()),
      "order" => Command::Order,
      "orders" => Command::Orders,
      "status" if !rest.is_empty() => Command::Status(rest.to_string()),
      "status" => return Err(AppError::Command("Usage: status <order id>".to_string())),
      "account" => Command::Account,
      "create-account" => Command::CreateAccount,
      "amount" => Command::Amount(number(rest, "amount <n>")?),
      "deposit" => Command::Deposit,
      "balance" => Command::Balance,
      "help" | "?" => Command::Help,
      "quit" | "exit" => Command::Quit,
      other => {
        return Err(AppError::Command(format!(
          "Unknown command '{}'. Type 'help' for the list.",
          other
        )))
      }
    };
    Ok(Some(command))
  }
}

fn number(raw: &str, usage: &str) -> Result<i64> {
  raw
    .parse::<i64>()
    .map_err(|_| AppError::Command(format!("Usage: {}", usage)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_commands_with_arguments() {
    assert_eq!(Command::parse("user 12").unwrap(), Some(Command::User(Some(12))));
    assert_eq!(Command::parse("user none").unwrap(), Some(Command::User(None)));
    assert_eq!(Command::parse("  ADD 3 ").unwrap(), Some(Command::Add(3)));
    assert_eq!(
      Command::parse("describe birthday gift").unwrap(),
      Some(Command::Describe("birthday gift".to_string()))
    );
    assert_eq!(Command::parse("describe").unwrap(), Some(Command::Describe(String::new())));
    assert_eq!(Command::parse("status o-17").unwrap(), Some(Command::Status("o-17".to_string())));
    assert_eq!(Command::parse("amount -5").unwrap(), Some(Command::Amount(-5)));
    assert_eq!(Command::parse("create-account").unwrap(), Some(Command::CreateAccount));
  }

  #[test]
  fn blank_and_bad_lines() {
    assert_eq!(Command::parse("   ").unwrap(), None);
    assert!(matches!(Command::parse("add"), Err(AppError::Command(_))));
    assert!(matches!(Command::parse("user abc"), Err(AppError::Command(_))));
    assert!(matches!(Command::parse("status"), Err(AppError::Command(_))));
    let err = Command::parse("fly").unwrap_err();
    assert!(err.to_string().contains("Unknown command 'fly'"));
  }
}
