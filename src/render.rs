//! Render
//!
//! Renderers consume [`CartView`] snapshots and never touch the cart itself.

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::view::{CartView, SummaryView};

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error writing the output
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Draws a cart snapshot.
pub trait Render {
    /// Draw the given snapshot, replacing whatever was drawn before.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the output cannot be written.
    fn render(&mut self, view: &CartView) -> Result<(), RenderError>;
}

impl<R: Render + ?Sized> Render for &mut R {
    fn render(&mut self, view: &CartView) -> Result<(), RenderError> {
        (**self).render(view)
    }
}

impl<R: Render + ?Sized> Render for Box<R> {
    fn render(&mut self, view: &CartView) -> Result<(), RenderError> {
        (**self).render(view)
    }
}

/// Renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl Render for NoopRenderer {
    fn render(&mut self, _view: &CartView) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Renderer that keeps every snapshot it was given.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    views: Vec<CartView>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All snapshots, oldest first.
    pub fn views(&self) -> &[CartView] {
        &self.views
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&CartView> {
        self.views.last()
    }

    /// Number of renders so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.views.len()
    }
}

impl Render for RecordingRenderer {
    fn render(&mut self, view: &CartView) -> Result<(), RenderError> {
        self.views.push(view.clone());

        Ok(())
    }
}

/// Renders the cart as a terminal table followed by the totals block.
#[derive(Debug)]
pub struct TableRenderer<W> {
    out: W,
}

impl<W: io::Write> TableRenderer<W> {
    /// Create a renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> Render for TableRenderer<W> {
    fn render(&mut self, view: &CartView) -> Result<(), RenderError> {
        if view.show_empty_indicator {
            writeln!(self.out, "\nYour cart is empty.")?;
        } else {
            write_lines_table(&mut self.out, view)?;
        }

        if let Some(summary) = &view.summary {
            write_summary(&mut self.out, summary)?;
        }

        if view.continue_enabled {
            writeln!(self.out, "\n[ Continue order ]")?;
        }

        if view.delivery_visible {
            write_delivery_panel(&mut self.out, view.scroll_to_delivery)?;
        }

        self.out.flush()?;

        Ok(())
    }
}

fn write_lines_table(out: &mut impl io::Write, view: &CartView) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Price", "Qty", "Total"]);

    for line in &view.lines {
        builder.push_record([
            line.name.clone(),
            line.unit_price.clone(),
            line.quantity.to_string(),
            line.line_total.clone(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..4), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}

fn write_summary(out: &mut impl io::Write, summary: &SummaryView) -> Result<(), RenderError> {
    let rows = [
        ("Subtotal:".to_string(), summary.subtotal.as_str()),
        (format!("{}:", summary.tax_label), summary.tax.as_str()),
        ("Total:".to_string(), summary.total.as_str()),
    ];

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in &rows {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
    }

    Ok(())
}

fn write_delivery_panel(out: &mut impl io::Write, scroll: bool) -> Result<(), RenderError> {
    writeln!(out, "\n── Delivery details ──")?;

    if scroll {
        writeln!(out, "(scrolled into view)")?;
    }

    Ok(())
}
