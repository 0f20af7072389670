//! Price selection
//!
//! Top-of-book prices win whenever the requested side is present and
//! non-zero. Otherwise the last traded price is used as a fallback. A zero
//! `puntas` price counts as missing; a reported `ultimoPrecio` is taken as
//! is, so a zero there flows into the calculator's division guard instead
//! of being silently skipped.

use broker::{PriceSide, Quote};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::MepError;
use crate::Result;

/// Extract a usable price for `side` from `quote`
pub fn select_price(quote: &Quote, side: PriceSide) -> Result<Decimal> {
    if let Some(price) = quote.best(side).filter(|p| *p > Decimal::ZERO) {
        return Ok(price);
    }

    if let Some(price) = quote.last_traded().filter(|p| *p >= Decimal::ZERO) {
        info!(
            ticker = %quote.ticker,
            %side,
            %price,
            "No puntas price, using ultimoPrecio"
        );
        return Ok(price);
    }

    Err(MepError::NoPriceAvailable {
        ticker: quote.ticker.clone(),
        side,
    })
}
