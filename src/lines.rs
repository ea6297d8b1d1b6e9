//! Cart lines

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};

/// One cart entry for a distinct item identity.
///
/// The unit price is fixed when the line is created. The quantity can never be zero:
/// a line that would drop below one is removed from the cart instead.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    name: String,
    unit_price: Money<'static, Currency>,
    quantity: NonZeroU32,
}

impl CartLine {
    /// Creates a new line with a quantity of one.
    pub(crate) fn new(name: String, unit_price: Money<'static, Currency>) -> Self {
        Self {
            name,
            unit_price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Returns the item identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price set when the line was created.
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Returns `unit_price * quantity` in minor units, or `None` on overflow.
    pub fn line_total_minor(&self) -> Option<i64> {
        self.unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity.get()))
    }

    /// Returns `unit_price * quantity`, or `None` on overflow.
    pub fn line_total(&self) -> Option<Money<'static, Currency>> {
        self.line_total_minor()
            .map(|minor| Money::from_minor(minor, self.unit_price.currency()))
    }

    /// Adds one to the quantity. Returns `None`, leaving the line untouched, on overflow.
    pub(crate) fn increment(&mut self) -> Option<NonZeroU32> {
        self.quantity = self.quantity.checked_add(1)?;

        Some(self.quantity)
    }

    /// Removes one from the quantity.
    ///
    /// Returns `None` when the quantity is already one; the caller removes the line.
    pub(crate) fn decrement(&mut self) -> Option<NonZeroU32> {
        self.quantity = self.quantity.get().checked_sub(1).and_then(NonZeroU32::new)?;

        Some(self.quantity)
    }

    #[cfg(test)]
    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;

    use super::*;

    fn bread() -> CartLine {
        CartLine::new("Bread".to_string(), Money::from_minor(200, EUR))
    }

    #[test]
    fn new_line_has_quantity_one() {
        let line = bread();

        assert_eq!(line.name(), "Bread");
        assert_eq!(line.unit_price(), &Money::from_minor(200, EUR));
        assert_eq!(line.quantity().get(), 1);
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let mut line = bread();

        line.increment();
        line.increment();

        assert_eq!(line.line_total_minor(), Some(600));
        assert_eq!(line.line_total(), Some(Money::from_minor(600, EUR)));
    }

    #[test]
    fn decrement_stops_at_one() {
        let mut line = bread();

        line.increment();

        assert_eq!(line.decrement().map(NonZeroU32::get), Some(1));
        assert_eq!(line.decrement(), None);
        assert_eq!(line.quantity().get(), 1);
    }

    #[test]
    fn increment_reports_overflow_without_changing_quantity() {
        let mut line = bread();
        line.quantity = NonZeroU32::MAX;

        assert_eq!(line.increment(), None);
        assert_eq!(line.quantity(), NonZeroU32::MAX);
    }

    #[test]
    fn line_total_reports_overflow() {
        let mut line = CartLine::new("Gold".to_string(), Money::from_minor(i64::MAX, EUR));
        line.increment();

        assert_eq!(line.line_total_minor(), None);
    }
}
