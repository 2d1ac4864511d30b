//! Cart Example
//!
//! Replays a cart script fixture against a cart store and prints the resulting
//! lines and totals.
//!
//! Use `-s` to pick a script from `fixtures/scripts`
//! Use `-d` to persist the cart in a directory; rerunning picks it up again
//! Use `--fresh` to clear a persisted cart first

use anyhow::Result;
use clap::Parser;
use tabled::{builder::Builder, settings::Style};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trolley::{
    fixtures::Script,
    prelude::{CartConfig, CartStorage, CartStore, FileStorage, MemoryStorage},
    utils::ExampleCartArgs,
};

/// Cart Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let args = ExampleCartArgs::parse();

    let config = match args.config.as_deref() {
        Some(path) => CartConfig::from_file(path)?,
        None => CartConfig::default(),
    };

    let storage: Box<dyn CartStorage> = match args.data_dir {
        Some(dir) => Box::new(FileStorage::new(dir)),
        None => Box::new(MemoryStorage::new()),
    };

    let mut cart = CartStore::new(storage, config);

    if args.fresh {
        cart.clear_cart();
    }

    info!(lines = cart.len(), "opened cart");

    let script = Script::from_set(&args.script)?;
    let catalog = script.load_catalog()?;

    for command in script.commands(&catalog)? {
        if let Err(err) = cart.apply(command) {
            warn!(error = %err, "step rejected");
        }
    }

    let currency = cart.config().currency;
    let mut builder = Builder::default();
    builder.push_record(["Product", "Category", "Qty", "Unit price", "Total", "Image"]);

    for item in cart.items() {
        builder.push_record([
            item.name.clone(),
            item.category.clone(),
            item.quantity.to_string(),
            item.unit_price.to_string(),
            item.line_money(currency).to_string(),
            item.image_url.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    println!("{table}");
    println!("\nItems: {}", cart.total_quantity());
    println!("Total: {}", cart.total_money());

    Ok(())
}
