//! Per-request orchestration: authenticate once, then aggregate

use broker::{BrokerClient, BrokerEndpoints, Credentials, HttpBrokerClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::aggregator::aggregate;
use crate::error::MepError;
use crate::types::{BondPair, PairResult};
use crate::Result;

/// Immutable per-process state needed to answer a calculation request
#[derive(Clone)]
pub struct MepService {
    client: Arc<dyn BrokerClient>,
    credentials: Credentials,
    pairs: Vec<BondPair>,
}

impl MepService {
    pub fn new(client: Arc<dyn BrokerClient>, credentials: Credentials, pairs: Vec<BondPair>) -> Self {
        Self {
            client,
            credentials,
            pairs,
        }
    }

    /// Build the service with an HTTP broker client from configuration
    pub fn from_config(config: &config::MepConfig) -> Result<Self> {
        let broker = &config.broker;
        let endpoints = BrokerEndpoints {
            auth_url: broker.auth_url.clone(),
            api_url: broker.api_url.clone(),
            market: broker.market.clone(),
        };

        let client = HttpBrokerClient::new(
            endpoints,
            Duration::from_secs(broker.timeout_seconds),
            Duration::from_secs(broker.connect_timeout_seconds),
        )
        .map_err(|e| MepError::Config(e.to_string()))?;

        let credentials = Credentials::new(broker.username.clone(), broker.password.clone());
        let pairs = config.bonds.iter().map(BondPair::from).collect();

        Ok(Self::new(Arc::new(client), credentials, pairs))
    }

    /// Configured pairs, in output order
    pub fn pairs(&self) -> &[BondPair] {
        &self.pairs
    }

    /// Fetch a fresh token and compute every configured pair.
    ///
    /// The token lives only for this call.
    pub async fn calculate(&self) -> Result<Vec<PairResult>> {
        let token = self.client.authenticate(&self.credentials).await?;
        let results = aggregate(self.client.as_ref(), &token, &self.pairs).await?;

        for result in &results {
            info!(
                pair = %result.pair.label(),
                mep_rate = %result.mep_rate.round_dp(4),
                dollar_buy_price = %result.dollar_buy_price,
                peso_sell_price = %result.peso_sell_price,
                "MEP rate computed"
            );
        }

        Ok(results)
    }
}
