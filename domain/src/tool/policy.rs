//! Policy for composite operations that fetch many items.

use serde::{Deserialize, Serialize};

/// What a composite fetch does when one item fails.
///
/// `list_variables` with an entity filter fetches the detail of every
/// variable; this decides whether one bad detail aborts the listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPolicy {
    /// Drop the failing item and keep going.
    #[default]
    SkipOnError,
    /// Abort with the first error.
    FailFast,
}

impl FetchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchPolicy::SkipOnError => "skip_on_error",
            FetchPolicy::FailFast => "fail_fast",
        }
    }
}

impl std::fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FetchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "skip_on_error" | "skip" => Ok(FetchPolicy::SkipOnError),
            "fail_fast" | "fail" => Ok(FetchPolicy::FailFast),
            other => Err(format!(
                "Invalid fetch policy: '{}'. Valid values: skip_on_error, fail_fast",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_skip() {
        assert_eq!(FetchPolicy::default(), FetchPolicy::SkipOnError);
    }

    #[test]
    fn test_parse() {
        assert_eq!("fail-fast".parse::<FetchPolicy>().unwrap(), FetchPolicy::FailFast);
        assert_eq!("SKIP_ON_ERROR".parse::<FetchPolicy>().unwrap(), FetchPolicy::SkipOnError);
        assert!("sometimes".parse::<FetchPolicy>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&FetchPolicy::FailFast).unwrap();
        assert_eq!(json, "\"fail_fast\"");
        let parsed: FetchPolicy = serde_json::from_str("\"skip_on_error\"").unwrap();
        assert_eq!(parsed, FetchPolicy::SkipOnError);
    }
}
