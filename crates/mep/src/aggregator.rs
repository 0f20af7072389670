//! Concurrent calculation across all configured bond pairs

use broker::{AccessToken, BrokerClient};
use futures::future::try_join_all;
use tracing::info;

use crate::calculator::calculate_pair;
use crate::types::{BondPair, PairResult};
use crate::Result;

/// Calculate every pair concurrently.
///
/// Results come back in `pairs` order regardless of completion order. The
/// first failing pair fails the whole batch; pending calculations are
/// dropped and no partial result is returned.
pub async fn aggregate<C>(
    client: &C,
    token: &AccessToken,
    pairs: &[BondPair],
) -> Result<Vec<PairResult>>
where
    C: BrokerClient + ?Sized,
{
    info!(pairs = pairs.len(), "Calculating MEP for bond pairs");

    let results = try_join_all(pairs.iter().map(|pair| calculate_pair(client, token, pair))).await?;

    info!(pairs = results.len(), "MEP calculation completed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MepError;
    use assert_matches::assert_matches;
    use broker::{BrokerError, MockBrokerClient, QuoteSnapshot};
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn pairs() -> Vec<BondPair> {
        vec![
            BondPair::new("AL30D", "AL30"),
            BondPair::new("GD30D", "GD30"),
            BondPair::new("AL35D", "AL35"),
        ]
    }

    #[tokio::test]
    async fn test_output_follows_input_order() {
        // First pair finishes last, last pair finishes first
        let client = MockBrokerClient::new()
            .with_delayed_quote("al30d", QuoteSnapshot::with_puntas(dec!(1000), dec!(1001)), Duration::from_millis(60))
            .with_delayed_quote("al30", QuoteSnapshot::with_puntas(dec!(949), dec!(950)), Duration::from_millis(60))
            .with_delayed_quote("gd30d", QuoteSnapshot::with_puntas(dec!(1000), dec!(1001)), Duration::from_millis(30))
            .with_delayed_quote("gd30", QuoteSnapshot::with_puntas(dec!(959), dec!(960)), Duration::from_millis(30))
            .with_quote("al35d", QuoteSnapshot::with_puntas(dec!(1000), dec!(1001)))
            .with_quote("al35", QuoteSnapshot::with_puntas(dec!(969), dec!(970)));
        let token = AccessToken::new("t");

        let results = aggregate(&client, &token, &pairs()).await.unwrap();

        let labels: Vec<String> = results.iter().map(|r| r.pair.label()).collect();
        assert_eq!(labels, vec!["AL30D/AL30", "GD30D/GD30", "AL35D/AL35"]);
        assert_eq!(results[0].peso_sell_price, dec!(950));
        assert_eq!(results[1].peso_sell_price, dec!(960));
        assert_eq!(results[2].peso_sell_price, dec!(970));

        // Completion order really was reversed
        let fetched = client.fetched_tickers();
        assert!(fetched.iter().position(|t| t == "al35d") < fetched.iter().position(|t| t == "al30d"));
    }

    #[tokio::test]
    async fn test_one_failure_fails_everything() {
        let client = MockBrokerClient::new()
            .with_quote("al30d", QuoteSnapshot::with_puntas(dec!(1000), dec!(1001)))
            .with_quote("al30", QuoteSnapshot::with_puntas(dec!(949), dec!(950)))
            .with_quote("gd30d", QuoteSnapshot::with_puntas(dec!(1000), dec!(1001)))
            .with_failure("gd30", BrokerError::quote_fetch("gd30", "Service Unavailable"))
            .with_quote("al35d", QuoteSnapshot::with_puntas(dec!(1000), dec!(1001)))
            .with_quote("al35", QuoteSnapshot::with_puntas(dec!(969), dec!(970)));
        let token = AccessToken::new("t");

        let result = aggregate(&client, &token, &pairs()).await;

        assert_matches!(
            result,
            Err(MepError::Broker(BrokerError::QuoteFetch { ticker, .. })) if ticker == "gd30"
        );
    }

    #[tokio::test]
    async fn test_invalid_quote_fails_everything() {
        let client = MockBrokerClient::new()
            .with_quote("al30d", QuoteSnapshot::with_puntas(dec!(1000), dec!(1001)))
            .with_quote("al30", QuoteSnapshot::default());
        let token = AccessToken::new("t");

        let result = aggregate(&client, &token, &pairs()[..1]).await;

        assert_matches!(result, Err(MepError::Broker(BrokerError::InvalidQuoteData { .. })));
    }

    #[tokio::test]
    async fn test_empty_pair_list() {
        let client = MockBrokerClient::new();
        let token = AccessToken::new("t");

        let results = aggregate(&client, &token, &[]).await.unwrap();

        assert!(results.is_empty());
    }
}
