//! Till
//!
//! Till is the core of a shopping-cart widget: it tracks cart lines and quantities, derives
//! subtotal, tax and total, and hands read-only snapshots to a renderer after every change.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod lines;
pub mod prelude;
pub mod prices;
pub mod render;
pub mod totals;
pub mod utils;
pub mod view;
pub mod widget;
