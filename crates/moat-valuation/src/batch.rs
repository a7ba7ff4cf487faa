//! Valuation over a securities table.

use moat_core::numeric::non_negative;
use moat_core::parallel::map_batch;
use moat_core::{BatchConfig, PriceMap};

use crate::fundamentals::SecurityFundamentals;
use crate::model::value_security;
use crate::params::ValuationParams;
use crate::result::ValuationResult;

/// Price used to evaluate a security.
///
/// A positive override price wins; otherwise the fetched price, with a
/// missing code resolving to 0.
#[must_use]
pub fn price_for(security: &SecurityFundamentals, prices: &PriceMap) -> f64 {
    match security.override_price {
        Some(p) if p > 0.0 && p.is_finite() => p,
        _ => non_negative(prices.price_or_zero(&security.code)),
    }
}

/// Values every scored security and ranks the results by base score.
///
/// Price-only securities are skipped. Each security is independent, so the
/// work may run in parallel; the ranking is the same either way.
#[must_use]
pub fn value_securities(
    securities: &[SecurityFundamentals],
    prices: &PriceMap,
    params: &ValuationParams,
    config: &BatchConfig,
) -> Vec<ValuationResult> {
    let scored: Vec<&SecurityFundamentals> = securities.iter().filter(|s| !s.price_only).collect();

    let mut results = map_batch(&scored, config, |s| {
        value_security(s, price_for(s, prices), params)
    });

    results.sort_by(ValuationResult::by_score_desc);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<SecurityFundamentals> {
        vec![
            SecurityFundamentals::new("Cheap", "SH600001", 1.0)
                .with_roic_history(vec![20.0; 5])
                .with_forward_eps(1.0),
            SecurityFundamentals::new("Dear", "SH600002", 1.0)
                .with_roic_history(vec![20.0; 5])
                .with_forward_eps(1.0),
            SecurityFundamentals::new("Gold", "SH518880", 1.0).price_only(),
        ]
    }

    fn prices() -> PriceMap {
        [("SH600001", 8.0), ("SH600002", 40.0), ("SH518880", 5.5)]
            .into_iter()
            .map(|(c, p)| (c.to_string(), p))
            .collect()
    }

    #[test]
    fn test_price_for() {
        let prices = prices();
        let s = SecurityFundamentals::new("A", "SH600001", 1.0);
        assert_eq!(price_for(&s, &prices), 8.0);

        let missing = SecurityFundamentals::new("B", "SZ000001", 1.0);
        assert_eq!(price_for(&missing, &prices), 0.0);

        let fixed = s.clone().with_override_price(12.0);
        assert_eq!(price_for(&fixed, &prices), 12.0);

        let zero_override = s.with_override_price(0.0);
        assert_eq!(price_for(&zero_override, &prices), 8.0);
    }

    #[test]
    fn test_skips_price_only_and_ranks() {
        let results = value_securities(
            &table(),
            &prices(),
            &ValuationParams::default(),
            &BatchConfig::sequential(),
        );

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Cheap");
        assert_eq!(results[1].name, "Dear");
        assert!(results[0].base.value > results[1].base.value);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let securities: Vec<SecurityFundamentals> = (0..150)
            .map(|i| {
                SecurityFundamentals::new(format!("S{i}"), format!("C{i}"), 1.0)
                    .with_roic_history(vec![f64::from(i % 30); 5])
                    .with_forward_eps(1.0)
            })
            .collect();
        let prices: PriceMap = (0..150)
            .map(|i| (format!("C{i}"), 5.0 + f64::from(i % 17)))
            .collect();
        let params = ValuationParams::default();

        let seq = value_securities(&securities, &prices, &params, &BatchConfig::sequential());
        let par = value_securities(
            &securities,
            &prices,
            &params,
            &BatchConfig::new().with_min_parallel_batch(10),
        );
        assert_eq!(seq, par);
    }
}
