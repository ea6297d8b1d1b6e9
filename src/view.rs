//! View
//!
//! Read-only snapshot of the cart handed to renderers after every mutation.

use rust_decimal::Decimal;

use crate::{
    cart::{Cart, CartError},
    lines::CartLine,
    prices::{format_amount, format_money},
    totals::Totals,
    widget::DeliveryPanel,
};

/// Render model for one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    /// Item name.
    pub name: String,

    /// Unit price, formatted.
    pub unit_price: String,

    /// Quantity.
    pub quantity: u32,

    /// Unit price times quantity, formatted.
    pub line_total: String,
}

/// Render model for the totals block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    /// Subtotal, formatted.
    pub subtotal: String,

    /// Tax label including the rate (e.g. `VAT (21%)`).
    pub tax_label: String,

    /// Tax, formatted.
    pub tax: String,

    /// Total, formatted.
    pub total: String,
}

/// Render model for the whole widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// Lines in display order.
    pub lines: Vec<LineView>,

    /// Totals block; `None` when the cart is empty.
    pub summary: Option<SummaryView>,

    /// Show the "cart is empty" indicator.
    pub show_empty_indicator: bool,

    /// Whether the continue action can be used.
    pub continue_enabled: bool,

    /// Whether the delivery details panel is shown.
    pub delivery_visible: bool,

    /// Scroll the delivery details panel into view on this render.
    pub scroll_to_delivery: bool,
}

impl CartView {
    /// Build a snapshot of the cart and the delivery panel.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if a line total or the cart totals cannot be represented.
    pub fn build(cart: &Cart, delivery: DeliveryPanel) -> Result<Self, CartError> {
        let lines = cart.iter().map(line_view).collect::<Result<Vec<_>, _>>()?;

        let is_empty = cart.is_empty();

        let summary = if is_empty {
            None
        } else {
            Some(summary_view(&cart.totals()?))
        };

        let delivery_visible = delivery.is_visible() && !is_empty;

        Ok(CartView {
            lines,
            summary,
            show_empty_indicator: is_empty,
            continue_enabled: !is_empty,
            delivery_visible,
            scroll_to_delivery: delivery_visible && delivery.scroll_requested(),
        })
    }
}

fn line_view(line: &CartLine) -> Result<LineView, CartError> {
    let line_total = line.line_total().ok_or(CartError::Overflow)?;

    Ok(LineView {
        name: line.name().to_string(),
        unit_price: format_money(line.unit_price()),
        quantity: line.quantity().get(),
        line_total: format_money(&line_total),
    })
}

fn summary_view(totals: &Totals) -> SummaryView {
    let currency = totals.currency();

    SummaryView {
        subtotal: format_amount(totals.subtotal(), currency),
        tax_label: tax_label(totals.tax_rate().percent_points()),
        tax: format_amount(totals.tax(), currency),
        total: format_amount(totals.total(), currency),
    }
}

fn tax_label(percent_points: Decimal) -> String {
    format!("VAT ({percent_points}%)")
}
