//! Batch mapping over a securities table.
//!
//! [`map_batch`] hands the table to rayon when [`BatchConfig::runs_parallel`]
//! allows it and maps on the calling thread otherwise. Output order always
//! follows input order, so a caller that sorts afterwards gets the same
//! ranking on both paths.

use crate::config::BatchConfig;

/// Applies `f` to every item and collects the results in input order.
///
/// ```ignore
/// let results = map_batch(&scored, config, |s| value_security(s, price_for(s, prices), params));
/// ```
#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
pub fn map_batch<T, U, F>(items: &[T], config: &BatchConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.runs_parallel(items.len()) {
            return items.par_iter().map(f).collect();
        }
    }

    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Code and price pairs, long enough to cross the default threshold.
    fn quotes() -> Vec<(String, f64)> {
        (0..250)
            .map(|i| (format!("SH60{i:04}"), 1.0 + f64::from(i % 37) * 0.5))
            .collect()
    }

    #[test]
    fn test_keeps_table_order() {
        let quotes = quotes();
        let codes = map_batch(&quotes, &BatchConfig::new().with_min_parallel_batch(1), |(c, _)| {
            c.clone()
        });
        assert_eq!(codes.first().map(String::as_str), Some("SH600000"));
        assert_eq!(codes.last().map(String::as_str), Some("SH600249"));
    }

    #[test]
    fn test_ranking_independent_of_path() {
        let quotes = quotes();
        let earnings_yield = |(_, price): &(String, f64)| 100.0 / price;

        let seq = map_batch(&quotes, &BatchConfig::sequential(), earnings_yield);
        let par = map_batch(&quotes, &BatchConfig::new().with_min_parallel_batch(1), earnings_yield);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_empty_table() {
        let none: Vec<(String, f64)> = Vec::new();
        assert!(map_batch(&none, &BatchConfig::new(), |(_, p)| *p).is_empty());
    }
}
