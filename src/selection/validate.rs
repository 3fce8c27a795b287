use std::fmt;

use crate::domain::{PairCatalog, Tier};

/// Why a proposed scan request was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRequestError {
    /// More pairs than the plan allows
    TooManyPairs { tier: Tier, max_pairs: usize },
    /// Symbols the backend does not list
    UnknownPairs(Vec<String>),
}

impl fmt::Display for ScanRequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanRequestError::TooManyPairs { tier, max_pairs } => write!(
                f,
                "Your {} plan allows up to {} pairs per scan",
                tier, max_pairs
            ),
            ScanRequestError::UnknownPairs(pairs) => {
                write!(f, "Invalid pairs: {}", pairs.join(", "))
            }
        }
    }
}

impl std::error::Error for ScanRequestError {}

/// Check a proposed scan request against the plan bound and the catalog.
/// Symbol matching ignores case, the same way the backend uppercases
/// everything before comparing.
pub fn validate_scan_request(
    pairs: &[String],
    tier: Tier,
    catalog: &PairCatalog,
) -> Result<(), ScanRequestError> {
    if let Some(max_pairs) = tier.max_pairs() {
        if pairs.len() > max_pairs {
            return Err(ScanRequestError::TooManyPairs { tier, max_pairs });
        }
    }

    let unknown: Vec<String> = pairs
        .iter()
        .filter(|pair| !catalog.contains(pair))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(ScanRequestError::UnknownPairs(unknown));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed() -> PairCatalog {
        PairCatalog::new(vec![
            "BTCUSDT".to_string(),
            "ETHUSDT".to_string(),
            "SOLUSDT".to_string(),
        ])
    }

    fn pairs(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accepts_a_request_within_the_plan() {
        let result = validate_scan_request(&pairs(&["BTCUSDT", "ethusdt"]), Tier::Starter, &listed());
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn rejects_more_pairs_than_the_plan_allows() {
        let too_many: Vec<String> = (0..11).map(|i| format!("P{i}USDT")).collect();
        let result = validate_scan_request(&too_many, Tier::Starter, &listed());
        assert_eq!(
            result,
            Err(ScanRequestError::TooManyPairs {
                tier: Tier::Starter,
                max_pairs: 10
            })
        );
    }

    #[test]
    fn unbounded_plan_skips_the_count_check() {
        let many: Vec<String> = (0..100).map(|_| "BTCUSDT".to_string()).collect();
        assert_eq!(validate_scan_request(&many, Tier::Pro, &listed()), Ok(()));
    }

    #[test]
    fn names_the_unlisted_symbols() {
        let result = validate_scan_request(
            &pairs(&["BTCUSDT", "XMRUSDT", "FAKEUSDT"]),
            Tier::Plus,
            &listed(),
        );
        match result {
            Err(ScanRequestError::UnknownPairs(unknown)) => {
                assert_eq!(unknown, vec!["XMRUSDT", "FAKEUSDT"]);
            }
            other => panic!("expected UnknownPairs, got {other:?}"),
        }
    }

    #[test]
    fn rejection_messages_are_user_facing() {
        let err = ScanRequestError::TooManyPairs {
            tier: Tier::Plus,
            max_pairs: 25,
        };
        assert_eq!(err.to_string(), "Your Plus plan allows up to 25 pairs per scan");

        let err = ScanRequestError::UnknownPairs(pairs(&["XMRUSDT"]));
        assert_eq!(err.to_string(), "Invalid pairs: XMRUSDT");
    }
}
