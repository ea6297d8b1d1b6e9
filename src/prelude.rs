//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, InvalidInput, LineChange},
    catalog::{AddButton, Catalog, CatalogError},
    config::{CartConfig, ConfigError},
    lines::CartLine,
    prices::{PriceError, format_amount, format_money, parse_price},
    render::{NoopRenderer, RecordingRenderer, Render, RenderError, TableRenderer},
    totals::{TaxRate, TaxRateError, Totals},
    view::{CartView, LineView, SummaryView},
    widget::{DeliveryPanel, Widget, WidgetError},
};
