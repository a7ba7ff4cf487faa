//! Tencent simple-quote format.
//!
//! A response is a sequence of `;`-terminated assignments:
//!
//! ```text
//! v_s_sh600519="1~贵州茅台~600519~1500.00~-12.30~-0.81~...";
//! v_s_hk00700="100~腾讯控股~00700~381.400~...";
//! ```
//!
//! The price is the fourth `~`-separated field. A missing, unparsable or
//! zero price reads as 0.

use moat_core::PriceMap;

/// Index of the last price in a simple quote.
const PRICE_FIELD: usize = 3;

/// Maps a quote code to its Tencent symbol.
///
/// `SH`, `SZ`, `HK` and `US` prefixes become `s_sh`, `s_sz`, `s_hk` and
/// `s_us`; anything else is lowercased behind `s_`.
#[must_use]
pub fn tencent_symbol(code: &str) -> String {
    let upper = code.to_uppercase();
    for (prefix, market) in [("SH", "s_sh"), ("SZ", "s_sz"), ("HK", "s_hk"), ("US", "s_us")] {
        if let Some(rest) = upper.strip_prefix(prefix) {
            return format!("{market}{rest}");
        }
    }
    format!("s_{}", code.to_lowercase())
}

/// Parses a simple-quote response into `(symbol, price)` pairs.
///
/// Assignments without a quoted payload are skipped.
#[must_use]
pub fn parse_tencent_quotes(text: &str) -> Vec<(String, f64)> {
    text.split(';')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let (name, payload) = line.split_once("=\"")?;
            let data = payload.split('"').next().unwrap_or_default();
            let symbol = name.trim().trim_start_matches("v_").to_string();
            Some((symbol, quote_price(data)))
        })
        .collect()
}

fn quote_price(data: &str) -> f64 {
    data.split('~')
        .nth(PRICE_FIELD)
        .and_then(|field| field.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p != 0.0)
        .unwrap_or(0.0)
}

/// Resolves the requested codes against parsed quotes.
///
/// Codes without a matching symbol are left out of the map.
#[must_use]
pub fn prices_for_codes(quotes: &[(String, f64)], codes: &[String]) -> PriceMap {
    codes
        .iter()
        .filter_map(|code| {
            let symbol = tencent_symbol(code);
            quotes
                .iter()
                .find(|(s, _)| *s == symbol)
                .map(|(_, price)| (code.clone(), *price))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = concat!(
        "v_s_sh600519=\"1~贵州茅台~600519~1500.00~-12.30~-0.81~23873~358291~~18844.15~GP-A\";\n",
        "v_s_hk00700=\"100~腾讯控股~00700~381.400~2.600~0.69~1234~5678~~36123~GP\";\n",
        "v_s_usAAPL=\"200~苹果~AAPL.OQ~0.000~0~0~0~0~~0~GP\";\n",
        "v_s_sz000001=\"51~平安银行~000001~N/A~0~0\";\n",
        "v_pv_none_match=\"1\";\n",
    );

    #[test]
    fn test_symbol_mapping() {
        assert_eq!(tencent_symbol("SH600519"), "s_sh600519");
        assert_eq!(tencent_symbol("sz000001"), "s_sz000001");
        assert_eq!(tencent_symbol("HK00700"), "s_hk00700");
        assert_eq!(tencent_symbol("USAAPL"), "s_usAAPL");
        assert_eq!(tencent_symbol("JP7203"), "s_jp7203");
    }

    #[test]
    fn test_parse_prices() {
        let quotes = parse_tencent_quotes(RESPONSE);
        assert_eq!(quotes.len(), 5);
        assert_eq!(quotes[0], ("s_sh600519".to_string(), 1500.0));
        assert_eq!(quotes[1], ("s_hk00700".to_string(), 381.4));
        // zero and unparsable prices read as 0
        assert_eq!(quotes[2].1, 0.0);
        assert_eq!(quotes[3].1, 0.0);
        // too few fields
        assert_eq!(quotes[4].1, 0.0);
    }

    #[test]
    fn test_skips_malformed() {
        let quotes = parse_tencent_quotes("garbage;;v_s_sh1=\"1~a~1~2.5\"");
        assert_eq!(quotes, vec![("s_sh1".to_string(), 2.5)]);
    }

    #[test]
    fn test_prices_for_codes() {
        let quotes = parse_tencent_quotes(RESPONSE);
        let codes = vec![
            "SH600519".to_string(),
            "HK00700".to_string(),
            "SZ000002".to_string(),
        ];
        let prices = prices_for_codes(&quotes, &codes);

        assert_eq!(prices.len(), 2);
        assert_eq!(prices.price_or_zero("SH600519"), 1500.0);
        assert_eq!(prices.price_or_zero("HK00700"), 381.4);
        assert!(!prices.contains("SZ000002"));
    }
}
