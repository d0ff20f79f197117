//! Fixed currency table

use crate::client::RateError;
use serde::Serialize;
use std::fmt;

/// A supported currency: ISO-style code plus display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
}

/// The currencies the shell offers. Immutable, loaded at startup.
pub const CURRENCIES: [Currency; 9] = [
    Currency { code: "USD", name: "US Dollar" },
    Currency { code: "EUR", name: "Euro" },
    Currency { code: "GBP", name: "British Pound" },
    Currency { code: "PKR", name: "Pakistani Rupee" },
    Currency { code: "INR", name: "Indian Rupee" },
    Currency { code: "AUD", name: "Australian Dollar" },
    Currency { code: "CAD", name: "Canadian Dollar" },
    Currency { code: "JPY", name: "Japanese Yen" },
    Currency { code: "CNY", name: "Chinese Yuan" },
];

impl Currency {
    /// Resolve a free-form code against the fixed table, case-insensitively.
    ///
    /// Codes arrive as arbitrary strings even though the shell only offers
    /// valid ones, so resolution validates independently.
    pub fn resolve(code: &str) -> Result<&'static Currency, RateError> {
        CURRENCIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| RateError::UnknownCurrency(code.to_string()))
    }

    /// Label as offered by the shell, e.g. "US Dollar (USD)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_codes_resolve() {
        for code in ["USD", "EUR", "GBP", "PKR", "INR", "AUD", "CAD", "JPY", "CNY"] {
            assert_eq!(Currency::resolve(code).unwrap().code, code);
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(Currency::resolve("usd").unwrap().code, "USD");
    }

    #[test]
    fn test_unknown_code() {
        let err = Currency::resolve("XXX").unwrap_err();
        assert!(matches!(err, RateError::UnknownCurrency(ref c) if c == "XXX"));
    }

    #[test]
    fn test_label() {
        let usd = Currency::resolve("USD").unwrap();
        assert_eq!(usd.label(), "US Dollar (USD)");
    }
}
