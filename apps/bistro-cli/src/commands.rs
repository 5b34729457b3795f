//! # CLI Commands
//!
//! Argument parsing and the four subcommands.
//!
//! ## Usage
//! ```bash
//! bistro menu
//! bistro add-item "Pizza Hawaiana" 12.50 plato principal
//! bistro order "Pizza Hawaiana=2" Refresco --pay tarjeta
//! bistro demo
//! ```
//!
//! Output goes to any `io::Write` so commands can be run against a buffer.

use std::io::Write;

use bistro_core::validation::validate_price_decimal;
use bistro_core::{
    Category, MenuCatalog, MenuStorage, Money, Order, OrderDispatcher, PaymentMethod,
    PaymentTransaction, SeededSettlement, SettlementSource, ThreadSettlement,
};
use bistro_store::JsonMenuStore;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

pub const USAGE: &str = "\
Usage: bistro <command> [args]

Commands:
  menu                                        List the menu
  add-item <name> <price> <category> [subtype]
                                              Add an item to the menu
  order <item>[=qty]... [--pay <method>]      Price an order, optionally pay it
  demo                                        Seed a sample menu and run an order
  help                                        Show this message";

/// Items put on the menu by `demo` when they are missing.
const DEMO_MENU: &[(&str, i64, Category, &str)] = &[
    ("Refresco", 250, Category::Beverage, "mediano"),
    ("Ensalada Felipe", 650, Category::Dish, "entrada"),
    ("Pizza Hawaiana", 1250, Category::Dish, "principal"),
    ("Banana split", 500, Category::Dessert, "postre"),
];

/// What `demo` orders.
const DEMO_ORDER: &[(&str, i64)] = &[("Pizza Hawaiana", 2), ("Banana split", 1)];

// =============================================================================
// Parsing
// =============================================================================

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Menu,
    AddItem {
        name: String,
        price: Money,
        category: Category,
        subtype: Option<String>,
    },
    Order {
        items: Vec<(String, i64)>,
        pay: Option<PaymentMethod>,
    },
    Demo,
    Help,
}

impl Command {
    /// Parses the arguments after the program name.
    pub fn parse(args: &[String]) -> CliResult<Command> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };

        match name.as_str() {
            "menu" => Ok(Command::Menu),
            "demo" => Ok(Command::Demo),
            "help" | "--help" | "-h" => Ok(Command::Help),
            "add-item" => Self::parse_add_item(rest),
            "order" => Self::parse_order(rest),
            other => Err(CliError::usage(format!("unknown command '{}'", other))),
        }
    }

    fn parse_add_item(args: &[String]) -> CliResult<Command> {
        let (name, price, category, subtype) = match args {
            [name, price, category] => (name, price, category, None),
            [name, price, category, subtype] => (name, price, category, Some(subtype.clone())),
            _ => {
                return Err(CliError::usage(
                    "add-item takes <name> <price> <category> [subtype]",
                ))
            }
        };

        let price: f64 = price
            .trim()
            .parse()
            .map_err(|_| CliError::usage(format!("'{}' is not a price", price)))?;

        Ok(Command::AddItem {
            name: name.clone(),
            price: validate_price_decimal(price)?,
            category: category.parse()?,
            subtype,
        })
    }

    fn parse_order(args: &[String]) -> CliResult<Command> {
        let mut items = Vec::new();
        let mut pay = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--pay" => {
                    let method = args
                        .get(i + 1)
                        .ok_or_else(|| CliError::usage("--pay needs a method"))?;
                    pay = Some(method.parse::<PaymentMethod>()?);
                    i += 1;
                }
                arg => items.push(parse_item_arg(arg)?),
            }
            i += 1;
        }

        if items.is_empty() {
            return Err(CliError::usage("order needs at least one item"));
        }

        Ok(Command::Order { items, pay })
    }
}

/// `"Pizza Hawaiana=2"` → `("Pizza Hawaiana", 2)`, `"Flan"` → `("Flan", 1)`.
fn parse_item_arg(arg: &str) -> CliResult<(String, i64)> {
    match arg.rsplit_once('=') {
        Some((name, qty)) => {
            let qty = qty
                .trim()
                .parse()
                .map_err(|_| CliError::usage(format!("bad quantity in '{}'", arg)))?;
            Ok((name.to_string(), qty))
        }
        None => Ok((arg.to_string(), 1)),
    }
}

// =============================================================================
// Execution
// =============================================================================

/// Runs a command, writing everything meant for the user to `out`.
pub fn execute<W: Write>(command: &Command, config: &AppConfig, out: &mut W) -> CliResult<()> {
    match command {
        Command::Help => {
            writeln!(out, "{}", USAGE)?;
            Ok(())
        }
        Command::Menu => {
            let menu = open_menu(config)?;
            print_menu(&menu, config, out)
        }
        Command::AddItem {
            name,
            price,
            category,
            subtype,
        } => {
            let mut menu = open_menu(config)?;
            let entry = menu.add_item(name, *price, *category, subtype.as_deref())?;
            writeln!(
                out,
                "Added {}: {} ({}/{})",
                entry.name(),
                entry.price().format_with(&config.currency_symbol),
                entry.category(),
                entry.subtype()
            )?;
            Ok(())
        }
        Command::Order { items, pay } => {
            let menu = open_menu(config)?;
            let order = build_order(&menu, items)?;
            print_invoice(&order, config, out)?;
            if let Some(method) = pay {
                settle(&order, *method, config, out)?;
            }
            Ok(())
        }
        Command::Demo => run_demo(config, out),
    }
}

fn open_menu(config: &AppConfig) -> CliResult<MenuCatalog<JsonMenuStore>> {
    debug!(path = %config.menu_path.display(), "Opening menu");
    Ok(MenuCatalog::open(JsonMenuStore::new(&config.menu_path))?)
}

/// Queues an order, fills it from the menu and takes it off the queue.
fn build_order<S: MenuStorage>(menu: &MenuCatalog<S>, items: &[(String, i64)]) -> CliResult<Order> {
    let mut dispatcher = OrderDispatcher::new();
    let id = dispatcher.create_order().id();

    for (name, qty) in items {
        dispatcher.add_to_order(id, menu, name, *qty)?;
    }

    dispatcher
        .pop_next_order()
        .ok_or_else(|| CliError::usage("no order to dispatch"))
}

fn settlement_source(config: &AppConfig) -> Box<dyn SettlementSource> {
    match config.payment.seed {
        Some(seed) => Box::new(SeededSettlement::new(seed)),
        None => Box::new(ThreadSettlement),
    }
}

fn settle<W: Write>(
    order: &Order,
    method: PaymentMethod,
    config: &AppConfig,
    out: &mut W,
) -> CliResult<bool> {
    let mut payment =
        PaymentTransaction::new(order, method).with_success_rate(config.payment.success_rate)?;
    let mut source = settlement_source(config);

    let settled = payment.process_payment(source.as_mut());
    if settled {
        writeln!(out, "Payment completed")?;
    } else {
        writeln!(out, "Payment failed")?;
    }

    writeln!(out)?;
    writeln!(out, "{}", payment.receipt().with_currency(&config.currency_symbol))?;
    Ok(settled)
}

fn print_menu<S: MenuStorage, W: Write>(
    menu: &MenuCatalog<S>,
    config: &AppConfig,
    out: &mut W,
) -> CliResult<()> {
    writeln!(out, "--- MENU ---")?;
    if menu.is_empty() {
        writeln!(out, "(empty)")?;
    }
    for entry in menu.entries() {
        writeln!(
            out,
            "{}: {} ({}/{})",
            entry.name(),
            entry.price().format_with(&config.currency_symbol),
            entry.category(),
            entry.subtype()
        )?;
    }
    Ok(())
}

fn print_invoice<W: Write>(order: &Order, config: &AppConfig, out: &mut W) -> CliResult<()> {
    writeln!(out, "{}", order.invoice().with_currency(&config.currency_symbol))?;
    Ok(())
}

fn run_demo<W: Write>(config: &AppConfig, out: &mut W) -> CliResult<()> {
    let mut menu = open_menu(config)?;

    for (name, cents, category, subtype) in DEMO_MENU {
        if menu.get_item(name).is_none() {
            menu.add_item(name, Money::from_cents(*cents), *category, Some(*subtype))?;
        }
    }
    print_menu(&menu, config, out)?;

    writeln!(out)?;
    writeln!(out, "--- ORDER ---")?;
    let items: Vec<(String, i64)> = DEMO_ORDER
        .iter()
        .map(|(name, qty)| (name.to_string(), *qty))
        .collect();
    let order = build_order(&menu, &items)?;

    for line in order.iter_items() {
        writeln!(
            out,
            "{} x{} ({}/{}) unit {} total {}",
            line.name,
            line.quantity,
            line.category,
            line.subtype,
            line.unit_price.format_with(&config.currency_symbol),
            line.line_total.format_with(&config.currency_symbol)
        )?;
    }

    writeln!(out)?;
    print_invoice(&order, config, out)?;

    writeln!(out)?;
    writeln!(out, "--- PAYMENT ---")?;
    let settled = settle(&order, PaymentMethod::Card, config, out)?;
    info!(order_id = %order.id(), settled, "Demo finished");

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::ValidationError;
    use tempfile::TempDir;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn config_in(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.menu_path = dir.path().join("menu.json");
        config.payment.seed = Some(1);
        config.payment.success_rate = 1.0;
        config
    }

    fn run(command: &Command, config: &AppConfig) -> CliResult<String> {
        let mut out = Vec::new();
        execute(command, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse(&[]).unwrap(), Command::Help);
        assert_eq!(Command::parse(&args(&["menu"])).unwrap(), Command::Menu);
        assert_eq!(Command::parse(&args(&["demo"])).unwrap(), Command::Demo);
        assert!(matches!(
            Command::parse(&args(&["cook"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn test_parse_add_item() {
        let command = Command::parse(&args(&["add-item", "Cerveza", "4.00", "Bebida", "grande"])).unwrap();
        assert_eq!(
            command,
            Command::AddItem {
                name: "Cerveza".to_string(),
                price: Money::from_cents(400),
                category: Category::Beverage,
                subtype: Some("grande".to_string()),
            }
        );

        assert!(matches!(
            Command::parse(&args(&["add-item", "Flan", "tres", "postre"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            Command::parse(&args(&["add-item", "Flan", "3", "comida"])),
            Err(CliError::Validation(ValidationError::NotAllowed { .. }))
        ));
        assert!(Command::parse(&args(&["add-item", "Flan"])).is_err());
    }

    #[test]
    fn test_parse_order() {
        let command =
            Command::parse(&args(&["order", "Pizza Hawaiana=2", "Flan", "--pay", "Efectivo"])).unwrap();
        assert_eq!(
            command,
            Command::Order {
                items: vec![("Pizza Hawaiana".to_string(), 2), ("Flan".to_string(), 1)],
                pay: Some(PaymentMethod::Cash),
            }
        );

        assert!(Command::parse(&args(&["order"])).is_err());
        assert!(Command::parse(&args(&["order", "Flan=x"])).is_err());
        assert!(Command::parse(&args(&["order", "Flan", "--pay"])).is_err());
        assert!(Command::parse(&args(&["order", "Flan", "--pay", "cheque"])).is_err());
    }

    #[test]
    fn test_demo_run() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let output = run(&Command::Demo, &config).unwrap();
        assert!(output.contains("Pizza Hawaiana: $12.50 (dish/main)"));
        assert!(output.contains("Pizza Hawaiana x2 (dish/main) unit $12.50 total $22.50"));
        assert!(output.contains("Subtotal: $27.50"));
        assert!(output.contains("Tax (19%): +$5.23"));
        assert!(output.contains("TOTAL: $32.73"));
        assert!(output.contains("Payment completed"));
        assert!(output.contains("Thank you for your purchase!"));

        // Seeding is idempotent.
        run(&Command::Demo, &config).unwrap();
        let menu = run(&Command::Menu, &config).unwrap();
        assert_eq!(menu.lines().count(), 5);
    }

    #[test]
    fn test_add_item_then_order() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let add = Command::parse(&args(&["add-item", "Torta", "30", "postre"])).unwrap();
        let output = run(&add, &config).unwrap();
        assert_eq!(output.trim(), "Added Torta: $30.00 (dessert/dessert)");

        assert!(matches!(
            run(&add, &config),
            Err(CliError::Core(_))
        ));

        let order = Command::parse(&args(&["order", "Torta=2", "--pay", "card"])).unwrap();
        let output = run(&order, &config).unwrap();
        assert!(output.contains("Discount (10%): -$6.00"));
        assert!(output.contains("TOTAL: $65.40"));
        assert!(output.contains("Total paid: $65.40"));
    }

    #[test]
    fn test_order_with_unknown_item() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let order = Command::parse(&args(&["order", "Vino"])).unwrap();
        assert!(matches!(
            run(&order, &config),
            Err(CliError::Validation(ValidationError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_failed_payment_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.payment.success_rate = 0.0;

        let output = run(&Command::Demo, &config).unwrap();
        assert!(output.contains("Payment failed"));
        assert!(output.contains("Status: failed"));
        assert!(output.trim_end().ends_with("Please try again"));
    }
}
