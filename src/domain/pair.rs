/// Helpers for decomposing exchange pair symbols such as `BTCUSDT`.
///
/// The backend lists pairs as concatenated base+quote symbols; the selector
/// shows them as `BASE/QUOTE`.
pub struct PairSymbol;

impl PairSymbol {
    pub fn get_base(text: &str) -> Option<&str> {
        let quote = Self::get_quote(text)?;
        // `strip_suffix` returns `None` for a malformed name whose quote
        // match is not actually at the end.
        text.strip_suffix(quote)
    }

    // Finds the trading quote at the end of the pair name and returns it.
    // Returns None if no matching quote is found.
    pub fn get_quote(text: &str) -> Option<&str> {
        static PAIR_QUOTES: &[&str] = &["USDT", "USDC", "FDUSD", "BTC", "ETH"];
        PAIR_QUOTES
            .iter()
            .find(|&&ext| text.ends_with(ext))
            .copied()
    }

    pub fn get_base_and_quote(text: &str) -> Option<(&str, &str)> {
        let base = Self::get_base(text)?;
        let quote = Self::get_quote(text)?;
        Some((base, quote))
    }

    /// Display form, e.g. `BTC/USDT`. Falls back to the raw symbol when the
    /// quote cannot be recognized.
    pub fn display_name(text: &str) -> String {
        match Self::get_base_and_quote(text) {
            Some((base, quote)) if !base.is_empty() => format!("{}/{}", base, quote),
            _ => text.to_string(),
        }
    }
}
