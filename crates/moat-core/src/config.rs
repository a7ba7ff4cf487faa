//! Batch evaluation settings.

use serde::{Deserialize, Serialize};

/// How a securities table is spread over threads.
///
/// Valuing one security never reads another, so this only decides where the
/// work runs. Rankings and scores do not depend on it.
///
/// ```toml
/// [batch]
/// parallel = true
/// min_parallel_batch = 100
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Allow rayon when the `parallel` feature is compiled in.
    pub parallel: bool,

    /// Smallest table worth handing to the thread pool.
    pub min_parallel_batch: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_batch: 100,
        }
    }
}

impl BatchConfig {
    /// Default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings that keep every batch on the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the smallest batch that runs in parallel.
    #[must_use]
    pub fn with_min_parallel_batch(mut self, size: usize) -> Self {
        self.min_parallel_batch = size;
        self
    }

    /// Whether a batch of `len` securities goes to the thread pool.
    #[must_use]
    pub fn runs_parallel(&self, len: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && len >= self.min_parallel_batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_tables_stay_sequential() {
        let config = BatchConfig::new();
        // a typical dashboard carries a few dozen securities
        assert!(!config.runs_parallel(40));
        assert_eq!(config.runs_parallel(100), cfg!(feature = "parallel"));
    }

    #[test]
    fn test_sequential_ignores_size() {
        assert!(!BatchConfig::sequential().runs_parallel(5_000));
        assert!(!BatchConfig::sequential().with_min_parallel_batch(0).runs_parallel(1));
    }

    #[test]
    fn test_partial_section() {
        let parsed: BatchConfig = serde_json::from_str(r#"{"min_parallel_batch": 8}"#).unwrap();
        assert!(parsed.parallel);
        assert_eq!(parsed, BatchConfig::new().with_min_parallel_batch(8));

        let off: BatchConfig = serde_json::from_str(r#"{"parallel": false}"#).unwrap();
        assert_eq!(off, BatchConfig::sequential());
    }
}
