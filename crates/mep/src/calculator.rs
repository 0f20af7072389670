//! Fee-adjusted MEP rate for one bond pair
//!
//! Buying the dollar bond costs the ask plus broker commission plus market
//! fee; selling the peso bond yields the bid minus market fee. The MEP rate
//! is pesos received per dollar-bond unit paid.

use broker::{AccessToken, BrokerClient, PriceSide, Quote};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::MepError;
use crate::selector::select_price;
use crate::types::{BondPair, PairResult};
use crate::Result;

/// Broker commission on the dollar leg (0.49%)
pub const COMMISSION_RATE: Decimal = dec!(0.0049);

/// Market fee on either leg (0.01%)
pub const MARKET_FEE_RATE: Decimal = dec!(0.0001);

/// Fetch both legs concurrently and compute the pair's MEP rate.
///
/// Tickers are lower-cased before hitting the broker. Either leg failing
/// fails the pair.
pub async fn calculate_pair<C>(
    client: &C,
    token: &AccessToken,
    pair: &BondPair,
) -> Result<PairResult>
where
    C: BrokerClient + ?Sized,
{
    let dollar_ticker = pair.dollar.to_lowercase();
    let peso_ticker = pair.peso.to_lowercase();

    let (dollar_quote, peso_quote) = tokio::try_join!(
        client.fetch_quote(token, &dollar_ticker),
        client.fetch_quote(token, &peso_ticker),
    )?;

    compute_pair(pair, &dollar_quote, &peso_quote)
}

/// Compute a pair result from already fetched quotes
pub fn compute_pair(pair: &BondPair, dollar_quote: &Quote, peso_quote: &Quote) -> Result<PairResult> {
    let dollar_buy_price = select_price(dollar_quote, PriceSide::Buy)?;
    let peso_sell_price = select_price(peso_quote, PriceSide::Sell)?;

    price_pair(pair, dollar_buy_price, peso_sell_price)
}

/// Apply fees to both legs and divide
pub fn price_pair(
    pair: &BondPair,
    dollar_buy_price: Decimal,
    peso_sell_price: Decimal,
) -> Result<PairResult> {
    let overflow = || MepError::Overflow { pair: pair.label() };

    let dollar_commission_fee = dollar_buy_price
        .checked_mul(COMMISSION_RATE)
        .ok_or_else(overflow)?;
    let dollar_market_fee = dollar_buy_price
        .checked_mul(MARKET_FEE_RATE)
        .ok_or_else(overflow)?;
    let dollar_final = dollar_buy_price
        .checked_add(dollar_commission_fee)
        .and_then(|v| v.checked_add(dollar_market_fee))
        .ok_or_else(overflow)?;

    let peso_market_fee = peso_sell_price
        .checked_mul(MARKET_FEE_RATE)
        .ok_or_else(overflow)?;
    let peso_final = peso_sell_price - peso_market_fee;

    if dollar_final.is_zero() {
        return Err(MepError::DivisionByZero { pair: pair.label() });
    }

    let mep_rate = peso_final.checked_div(dollar_final).ok_or_else(overflow)?;

    debug!(
        pair = %pair.label(),
        %dollar_final,
        %peso_final,
        %mep_rate,
        "Pair priced"
    );

    Ok(PairResult {
        pair: pair.clone(),
        dollar_buy_price,
        dollar_commission_fee,
        dollar_market_fee,
        dollar_final,
        peso_sell_price,
        peso_market_fee,
        peso_final,
        mep_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::format_fixed;
    use assert_matches::assert_matches;
    use broker::{BrokerError, MockBrokerClient, QuoteSnapshot};
    use std::time::Duration;

    fn al30() -> BondPair {
        BondPair::new("AL30D", "AL30")
    }

    #[test]
    fn test_dollar_leg_costs_half_a_percent() {
        for p in [dec!(1), dec!(61.25), dec!(1000), dec!(73450.5)] {
            let result = price_pair(&al30(), p, dec!(100)).unwrap();

            assert_eq!(result.dollar_commission_fee + result.dollar_market_fee, p * dec!(0.005));
            assert_eq!(result.dollar_final, p * dec!(1.005));
            assert!(result.dollar_final >= result.dollar_buy_price);
        }
    }

    #[test]
    fn test_peso_leg_keeps_9999_bps() {
        for q in [dec!(1), dec!(950), dec!(72500.75)] {
            let result = price_pair(&al30(), dec!(100), q).unwrap();

            assert_eq!(result.peso_final, q * dec!(0.9999));
            assert!(result.peso_final <= result.peso_sell_price);
        }
    }

    #[test]
    fn test_reference_values() {
        let result = price_pair(&al30(), dec!(1000), dec!(900)).unwrap();

        assert_eq!(format_fixed(result.dollar_final), "1005.0000");
        assert_eq!(format_fixed(result.peso_final), "899.9100");
        assert_eq!(format_fixed(result.mep_rate), "0.8954");
        assert_eq!(result.mep_rate, result.peso_final / result.dollar_final);
    }

    #[test]
    fn test_zero_dollar_price_is_division_by_zero() {
        let result = price_pair(&al30(), Decimal::ZERO, dec!(900));

        assert_matches!(result, Err(MepError::DivisionByZero { pair }) if pair == "AL30D/AL30");
    }

    #[tokio::test]
    async fn test_calculate_pair_fetches_both_legs() {
        let client = MockBrokerClient::new()
            .with_quote("al30d", QuoteSnapshot::with_puntas(dec!(1000), dec!(1002)))
            .with_quote("al30", QuoteSnapshot::with_puntas(dec!(948), dec!(950)));
        let token = AccessToken::new("t");

        let result = calculate_pair(&client, &token, &al30()).await.unwrap();

        assert_eq!(result.dollar_buy_price, dec!(1000));
        assert_eq!(result.peso_sell_price, dec!(950));
        assert_eq!(format_fixed(result.mep_rate), "0.9452");

        let mut fetched = client.fetched_tickers();
        fetched.sort();
        assert_eq!(fetched, vec!["al30".to_string(), "al30d".to_string()]);
    }

    #[tokio::test]
    async fn test_calculate_pair_last_traded_zero_dollar_leg() {
        let client = MockBrokerClient::new()
            .with_quote("al30d", QuoteSnapshot::with_last_price(Decimal::ZERO))
            .with_quote("al30", QuoteSnapshot::with_puntas(dec!(948), dec!(950)));
        let token = AccessToken::new("t");

        let result = calculate_pair(&client, &token, &al30()).await;

        assert_matches!(result, Err(MepError::DivisionByZero { .. }));
    }

    #[tokio::test]
    async fn test_calculate_pair_fails_if_either_leg_fails() {
        let client = MockBrokerClient::new()
            .with_delayed_quote(
                "al30d",
                QuoteSnapshot::with_puntas(dec!(1000), dec!(1002)),
                Duration::from_millis(20),
            )
            .with_failure("al30", BrokerError::quote_fetch("al30", "Internal Server Error"));
        let token = AccessToken::new("t");

        let result = calculate_pair(&client, &token, &al30()).await;

        assert_matches!(
            result,
            Err(MepError::Broker(BrokerError::QuoteFetch { ticker, .. })) if ticker == "al30"
        );
    }
}
