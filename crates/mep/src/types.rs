//! Bond pairs, per-pair results and the wire format served to the front end

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places used for every figure in responses
pub const OUTPUT_DECIMALS: u32 = 4;

/// A dollar-denominated bond and its peso-denominated twin
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BondPair {
    pub dollar: String,
    pub peso: String,
}

impl BondPair {
    pub fn new(dollar: impl Into<String>, peso: impl Into<String>) -> Self {
        Self {
            dollar: dollar.into(),
            peso: peso.into(),
        }
    }

    /// Display label, e.g. `AL30D/AL30`
    pub fn label(&self) -> String {
        format!("{}/{}", self.dollar, self.peso)
    }
}

impl From<&config::BondPairConfig> for BondPair {
    fn from(pair: &config::BondPairConfig) -> Self {
        Self::new(pair.dollar.trim().to_uppercase(), pair.peso.trim().to_uppercase())
    }
}

/// Fee-adjusted outcome for one bond pair, at full precision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairResult {
    pub pair: BondPair,
    pub dollar_buy_price: Decimal,
    pub dollar_commission_fee: Decimal,
    pub dollar_market_fee: Decimal,
    pub dollar_final: Decimal,
    pub peso_sell_price: Decimal,
    pub peso_market_fee: Decimal,
    pub peso_final: Decimal,
    pub mep_rate: Decimal,
}

/// Render a value with exactly [`OUTPUT_DECIMALS`] digits, half away from zero
pub fn format_fixed(value: Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(OUTPUT_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(OUTPUT_DECIMALS);
    rounded.to_string()
}

/// One entry of the `bonds` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondQuote {
    pub pair: String,
    pub dollar_bond: String,
    pub peso_bond: String,
    pub dollar_buy_price: String,
    pub dollar_commission_fee: String,
    pub dollar_market_fee: String,
    pub peso_sell_price: String,
    pub peso_market_fee: String,
    pub mep_rate: String,
}

impl From<&PairResult> for BondQuote {
    fn from(result: &PairResult) -> Self {
        Self {
            pair: result.pair.label(),
            dollar_bond: result.pair.dollar.clone(),
            peso_bond: result.pair.peso.clone(),
            dollar_buy_price: format_fixed(result.dollar_buy_price),
            dollar_commission_fee: format_fixed(result.dollar_commission_fee),
            dollar_market_fee: format_fixed(result.dollar_market_fee),
            peso_sell_price: format_fixed(result.peso_sell_price),
            peso_market_fee: format_fixed(result.peso_market_fee),
            mep_rate: format_fixed(result.mep_rate),
        }
    }
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MepResponse {
    pub bonds: Vec<BondQuote>,
}

impl From<&[PairResult]> for MepResponse {
    fn from(results: &[PairResult]) -> Self {
        Self {
            bonds: results.iter().map(BondQuote::from).collect(),
        }
    }
}

/// Failure response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_fixed_pads_and_rounds() {
        assert_eq!(format_fixed(dec!(1000)), "1000.0000");
        assert_eq!(format_fixed(dec!(4.9)), "4.9000");
        assert_eq!(format_fixed(dec!(0.94517910447761194)), "0.9452");
        assert_eq!(format_fixed(dec!(0.00005)), "0.0001");
        assert_eq!(format_fixed(dec!(0.00004)), "0.0000");
    }

    #[test]
    fn test_bond_pair_from_config() {
        let cfg = config::BondPairConfig {
            dollar: " al30d".to_string(),
            peso: "al30 ".to_string(),
        };
        let pair = BondPair::from(&cfg);

        assert_eq!(pair, BondPair::new("AL30D", "AL30"));
        assert_eq!(pair.label(), "AL30D/AL30");
    }

    #[test]
    fn test_bond_quote_wire_names() {
        let result = PairResult {
            pair: BondPair::new("AL30D", "AL30"),
            dollar_buy_price: dec!(1000),
            dollar_commission_fee: dec!(4.9),
            dollar_market_fee: dec!(0.1),
            dollar_final: dec!(1005),
            peso_sell_price: dec!(900),
            peso_market_fee: dec!(0.09),
            peso_final: dec!(899.91),
            mep_rate: dec!(0.8954328358),
        };

        let json = serde_json::to_value(MepResponse::from(std::slice::from_ref(&result))).unwrap();
        let bond = &json["bonds"][0];

        assert_eq!(bond["pair"], "AL30D/AL30");
        assert_eq!(bond["dollarBond"], "AL30D");
        assert_eq!(bond["pesoBond"], "AL30");
        assert_eq!(bond["dollarBuyPrice"], "1000.0000");
        assert_eq!(bond["dollarCommissionFee"], "4.9000");
        assert_eq!(bond["dollarMarketFee"], "0.1000");
        assert_eq!(bond["pesoSellPrice"], "900.0000");
        assert_eq!(bond["pesoMarketFee"], "0.0900");
        assert_eq!(bond["mepRate"], "0.8954");
    }
}
