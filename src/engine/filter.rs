//! Price-band eligibility filter

use crate::types::PriceQuote;
use rust_decimal::Decimal;

/// Closed price interval a ticker must trade inside to be alertable.
#[derive(Debug, Clone, Copy)]
pub struct PriceBand {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceBand {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// A ticker is eligible iff a price was obtainable and lies within the
    /// band. An unavailable price fails closed, never open.
    pub fn is_eligible(&self, quote: &PriceQuote) -> bool {
        match quote.price {
            Some(price) => self.min <= price && price <= self.max,
            None => false,
        }
    }
}
