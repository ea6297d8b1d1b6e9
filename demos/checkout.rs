//! Checkout Example
//!
//! Replays a sequence of clicks against the cart widget and prints every render.
//!
//! Use `-c` to pick the catalog of add-to-cart triggers
//! Use `--config` to load a cart configuration (currency, tax rate)
//! Pass actions as `add:NAME`, `inc:NAME`, `dec:NAME` or `continue`
//!
//! ```text
//! cargo run --example checkout -- add:Bread add:Bread add:Milk dec:Milk continue
//! ```

use std::io;

use anyhow::Result;
use clap::Parser;
use till::{
    catalog::Catalog, config::CartConfig, render::TableRenderer, utils::ExampleCheckoutArgs,
    widget::Widget,
};
use tracing_subscriber::EnvFilter;

/// Checkout Example
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = ExampleCheckoutArgs::parse();

    let config = match &args.config {
        Some(path) => CartConfig::load(path)?,
        None => CartConfig::default(),
    };

    let catalog = Catalog::load(&args.catalog, config.currency)?;

    let stdout = io::stdout();
    let mut widget = Widget::mount(&config, catalog, TableRenderer::new(stdout.lock()))?;

    for action in &args.actions {
        action.apply(&mut widget)?;
    }

    Ok(())
}
