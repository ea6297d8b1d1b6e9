//! Widget
//!
//! Presentation adapter around a [`Cart`]. Each interaction handler mutates the cart, then
//! builds a fresh [`CartView`] and hands it to the renderer.

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartError, LineChange},
    catalog::Catalog,
    config::CartConfig,
    render::{Render, RenderError},
    view::CartView,
};

/// Errors returned by interaction handlers.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// No add-to-cart trigger with this name.
    #[error("Unknown catalog entry: {0}")]
    UnknownButton(String),

    /// The cart rejected the mutation or its totals overflowed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The renderer failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Visibility of the delivery details panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryPanel {
    visible: bool,
    scroll_requested: bool,
}

impl DeliveryPanel {
    /// A visible panel that asks to be scrolled into view.
    #[must_use]
    pub fn revealed() -> Self {
        Self {
            visible: true,
            scroll_requested: true,
        }
    }

    /// Whether the panel is shown.
    #[must_use]
    pub fn is_visible(self) -> bool {
        self.visible
    }

    /// Whether the next render should scroll the panel into view.
    #[must_use]
    pub fn scroll_requested(self) -> bool {
        self.scroll_requested
    }
}

/// Shopping-cart widget: one cart, its add-to-cart triggers and a renderer.
///
/// Handlers take `&mut self`, so each one runs to completion before the next begins.
#[derive(Debug)]
pub struct Widget<R> {
    cart: Cart,
    catalog: Catalog,
    renderer: R,
    delivery: DeliveryPanel,
}

impl<R: Render> Widget<R> {
    /// Create a widget with an empty cart. Nothing is rendered until [`Widget::render`].
    pub fn new(config: &CartConfig, catalog: Catalog, renderer: R) -> Self {
        Self {
            cart: Cart::with_config(config),
            catalog,
            renderer,
            delivery: DeliveryPanel::default(),
        }
    }

    /// Create a widget and draw the initial (empty) state.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::Render`] if the initial render fails.
    pub fn mount(config: &CartConfig, catalog: Catalog, renderer: R) -> Result<Self, WidgetError> {
        let mut widget = Self::new(config, catalog, renderer);

        widget.render()?;

        Ok(widget)
    }

    /// Handle a click on an add-to-cart trigger.
    ///
    /// # Errors
    ///
    /// - [`WidgetError::UnknownButton`]: no trigger with this name.
    /// - [`WidgetError::Cart`]: the cart rejected the item.
    /// - [`WidgetError::Render`]: the re-render failed.
    pub fn on_add_click(&mut self, button: &str) -> Result<(), WidgetError> {
        let trigger = self
            .catalog
            .get(button)
            .ok_or_else(|| WidgetError::UnknownButton(button.to_string()))?;

        let change = self
            .cart
            .add_item(trigger.name(), *trigger.price())?;

        debug!(item = button, ?change, "add clicked");

        self.render()
    }

    /// Handle a click on a line's `+` control.
    ///
    /// A missing line is ignored without re-rendering.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity overflows or the re-render fails.
    pub fn on_increment(&mut self, name: &str) -> Result<(), WidgetError> {
        let result = self.cart.increment_line(name);

        self.apply(name, result)
    }

    /// Handle a click on a line's `-` control.
    ///
    /// A missing line is ignored without re-rendering. Emptying the cart hides the delivery
    /// panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the re-render fails.
    pub fn on_decrement(&mut self, name: &str) -> Result<(), WidgetError> {
        let result = self.cart.decrement_line(name);

        if self.cart.is_empty() {
            self.delivery = DeliveryPanel::default();
        }

        self.apply(name, result)
    }

    /// Handle the continue action.
    ///
    /// Reveals the delivery panel and requests a scroll to it. Does nothing and returns
    /// `false` when the cart is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the re-render fails.
    pub fn on_continue(&mut self) -> Result<bool, WidgetError> {
        if self.cart.is_empty() {
            debug!("continue ignored for empty cart");

            return Ok(false);
        }

        self.delivery = DeliveryPanel::revealed();
        self.render()?;

        Ok(true)
    }

    /// Draw the current state.
    ///
    /// A pending scroll request is consumed by a successful render; it stays pending if the
    /// renderer fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the totals overflow or the renderer fails.
    pub fn render(&mut self) -> Result<(), WidgetError> {
        let view = CartView::build(&self.cart, self.delivery)?;

        self.renderer.render(&view)?;
        self.delivery.scroll_requested = false;

        Ok(())
    }

    /// The cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The add-to-cart triggers.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The delivery panel state.
    pub fn delivery(&self) -> DeliveryPanel {
        self.delivery
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consume the widget, returning the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn apply(&mut self, name: &str, result: Result<LineChange, CartError>) -> Result<(), WidgetError> {
        match result {
            Ok(change) => {
                debug!(item = name, ?change, "line changed");

                self.render()
            }
            Err(CartError::LineNotFound(_)) => {
                warn!(item = name, "no line to change");

                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io, num::NonZeroU32};

    use rusty_money::{Money, iso::EUR};
    use testresult::TestResult;

    use crate::{catalog::AddButton, render::RecordingRenderer};

    use super::*;

    /// Records snapshots, but fails the render with the given (1-based) call number.
    #[derive(Debug, Default)]
    struct FailingRenderer {
        calls: usize,
        fail_on: usize,
        views: Vec<CartView>,
    }

    impl Render for FailingRenderer {
        fn render(&mut self, view: &CartView) -> Result<(), RenderError> {
            self.calls += 1;

            if self.calls == self.fail_on {
                return Err(io::Error::other("display detached").into());
            }

            self.views.push(view.clone());

            Ok(())
        }
    }

    fn catalog() -> Result<Catalog, Box<dyn std::error::Error>> {
        Ok(Catalog::with_buttons([
            AddButton::new("Bread", Money::from_minor(200, EUR)),
            AddButton::new("Milk", Money::from_minor(150, EUR)),
        ])?)
    }

    fn widget() -> Result<Widget<RecordingRenderer>, Box<dyn std::error::Error>> {
        Ok(Widget::mount(
            &CartConfig::default(),
            catalog()?,
            RecordingRenderer::new(),
        )?)
    }

    #[test]
    fn mount_renders_empty_state() -> TestResult {
        let widget = widget()?;

        let view = widget.renderer().last().ok_or("no render")?;

        assert_eq!(widget.renderer().count(), 1);
        assert!(view.show_empty_indicator);

        Ok(())
    }

    #[test]
    fn add_click_forwards_trigger_and_renders() -> TestResult {
        let mut widget = widget()?;

        widget.on_add_click("Bread")?;

        let line = widget.cart().get("Bread").ok_or("missing line")?;

        assert_eq!(line.unit_price(), &Money::from_minor(200, EUR));
        assert_eq!(widget.renderer().count(), 2);

        Ok(())
    }

    #[test]
    fn unknown_trigger_is_an_error() -> TestResult {
        let mut widget = widget()?;

        let result = widget.on_add_click("Caviar");

        assert!(matches!(result, Err(WidgetError::UnknownButton(name)) if name == "Caviar"));
        assert_eq!(widget.renderer().count(), 1);

        Ok(())
    }

    #[test]
    fn missing_line_is_a_silent_no_op() -> TestResult {
        let mut widget = widget()?;

        widget.on_increment("Milk")?;
        widget.on_decrement("Milk")?;

        assert!(widget.cart().is_empty());
        assert_eq!(widget.renderer().count(), 1);

        Ok(())
    }

    #[test]
    fn continue_on_empty_cart_does_nothing() -> TestResult {
        let mut widget = widget()?;

        assert!(!widget.on_continue()?);
        assert!(!widget.delivery().is_visible());
        assert_eq!(widget.renderer().count(), 1);

        Ok(())
    }

    #[test]
    fn continue_reveals_delivery_and_scrolls_once() -> TestResult {
        let mut widget = widget()?;

        widget.on_add_click("Milk")?;

        assert!(widget.on_continue()?);

        let view = widget.renderer().last().ok_or("no render")?;

        assert!(view.delivery_visible);
        assert!(view.scroll_to_delivery);

        widget.on_increment("Milk")?;

        let view = widget.renderer().last().ok_or("no render")?;

        assert!(view.delivery_visible);
        assert!(!view.scroll_to_delivery);

        Ok(())
    }

    #[test]
    fn emptying_the_cart_hides_delivery() -> TestResult {
        let mut widget = widget()?;

        widget.on_add_click("Milk")?;
        widget.on_continue()?;
        widget.on_decrement("Milk")?;

        let view = widget.renderer().last().ok_or("no render")?;

        assert!(!widget.delivery().is_visible());
        assert!(view.show_empty_indicator);
        assert!(!view.delivery_visible);

        widget.on_add_click("Milk")?;

        let view = widget.renderer().last().ok_or("no render")?;

        assert!(!view.delivery_visible);

        Ok(())
    }

    #[test]
    fn failed_render_keeps_scroll_request() -> TestResult {
        // mount, add, continue (fails), retry
        let renderer = FailingRenderer {
            fail_on: 3,
            ..FailingRenderer::default()
        };
        let mut widget = Widget::mount(&CartConfig::default(), catalog()?, renderer)?;

        widget.on_add_click("Bread")?;

        assert!(matches!(widget.on_continue(), Err(WidgetError::Render(_))));
        assert!(widget.delivery().is_visible());
        assert!(widget.delivery().scroll_requested());

        widget.render()?;

        let view = widget.renderer().views.last().ok_or("no render")?;

        assert!(view.scroll_to_delivery);
        assert!(!widget.delivery().scroll_requested());

        Ok(())
    }

    #[test]
    fn quantity_overflow_is_reported_without_rendering() -> TestResult {
        let mut widget = widget()?;

        widget.on_add_click("Milk")?;
        widget
            .cart
            .line_mut("Milk")
            .ok_or("missing line")?
            .set_quantity(NonZeroU32::MAX);

        let result = widget.on_increment("Milk");

        assert!(matches!(
            result,
            Err(WidgetError::Cart(CartError::QuantityOverflow(name))) if name == "Milk"
        ));
        assert_eq!(
            widget.cart().get("Milk").map(|line| line.quantity()),
            Some(NonZeroU32::MAX)
        );
        assert_eq!(widget.renderer().count(), 2);

        Ok(())
    }

    #[test]
    fn borrowed_renderer_outlives_widget() -> TestResult {
        let mut recorder = RecordingRenderer::new();

        {
            let mut widget = Widget::mount(&CartConfig::default(), catalog()?, &mut recorder)?;

            widget.on_add_click("Bread")?;
        }

        let view = recorder.last().ok_or("no render")?;

        assert_eq!(recorder.count(), 2);
        assert_eq!(view.lines.len(), 1);

        Ok(())
    }
}
