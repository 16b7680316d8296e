/// Validated newtype wrappers for core domain string and numeric types.
///
/// Each newtype enforces its shape constraint at construction time via
/// [`TryFrom`]. Once constructed, the inner value is immutable (no
/// `DerefMut`). Serde `Deserialize` impls re-run validation so invalid data
/// cannot enter the type system from untrusted JSON.
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced when constructing a validated newtype from invalid input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewtypeError {
    /// The input did not match the expected format.
    InvalidFormat {
        /// Name of the type that rejected the input.
        type_name: &'static str,
        /// A human-readable description of the expected format.
        expected: &'static str,
        /// The input that was rejected.
        got: String,
    },
}

impl fmt::Display for NewtypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat {
                type_name,
                expected,
                got,
            } => write!(f, "invalid {type_name}: expected {expected}, got {got:?}"),
        }
    }
}

impl std::error::Error for NewtypeError {}

// ---------------------------------------------------------------------------
// Regex statics
//
// The pattern is a compile-time string literal; Regex::new never returns Err
// for it. The fallback chain is required because the workspace bans expect()
// and unwrap(), but "a^" (a pattern that never matches) is always valid, so
// we use it as a safe fallback that satisfies the type checker.
// ---------------------------------------------------------------------------

/// Matches an all-digit product identifier.
static SKU_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+$").unwrap_or_else(|_| {
        // Never reached: the pattern above is always valid.
        Regex::new("a^").unwrap_or_else(|_| {
            Regex::new(".").unwrap_or_else(|_| {
                Regex::new(".").unwrap_or_else(|_| unreachable!("regex engine broken"))
            })
        })
    })
});

// ---------------------------------------------------------------------------
// Sku
// ---------------------------------------------------------------------------

/// All-digit product identifier shared across supplier price lists.
///
/// Validates that the string matches `^\d+$` (digits only; no sign, decimal
/// point, or whitespace). The original string is stored verbatim, so
/// `"007"` and `"7"` are distinct identifiers, but ordering is by numeric
/// value: `"2"` sorts before `"10"`. Map iteration over [`Sku`] keys is
/// therefore the catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sku(String);

impl Sku {
    /// The digits with leading zeros stripped, used for value comparison.
    fn significant_digits(&self) -> &str {
        self.0.trim_start_matches('0')
    }
}

impl TryFrom<&str> for Sku {
    type Error = NewtypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if SKU_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(NewtypeError::InvalidFormat {
                type_name: "Sku",
                expected: "digits only (e.g. 004523)",
                got: s.to_owned(),
            })
        }
    }
}

impl Ord for Sku {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.significant_digits();
        let b = other.significant_digits();
        // Equal-length digit strings compare numerically via lexicographic
        // order; a longer digit string is always the larger value. The final
        // full-string comparison keeps "007" and "7" distinct yet ordered.
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Sku {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Deref for Sku {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Sku {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Sku {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::try_from(s.as_str()).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Precision
// ---------------------------------------------------------------------------

/// Number of decimal digits used when rounding unit prices for tie
/// detection. Valid range is 0–6; the default is 2 (whole cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Precision(u8);

/// The largest supported number of comparison decimals.
pub const MAX_PRECISION: u8 = 6;

impl Precision {
    /// Returns the number of decimal digits.
    pub fn digits(self) -> u8 {
        self.0
    }

    /// Returns `10^digits` as an `f64` scale factor.
    pub fn scale(self) -> f64 {
        10f64.powi(i32::from(self.0))
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for Precision {
    type Error = NewtypeError;

    fn try_from(digits: u8) -> Result<Self, Self::Error> {
        if digits <= MAX_PRECISION {
            Ok(Self(digits))
        } else {
            Err(NewtypeError::InvalidFormat {
                type_name: "Precision",
                expected: "integer between 0 and 6",
                got: digits.to_string(),
            })
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Precision {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let digits = u8::deserialize(d)?;
        Self::try_from(digits).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn sku(s: &str) -> Sku {
        Sku::try_from(s).expect("valid sku")
    }

    #[test]
    fn sku_accepts_digit_strings() {
        assert_eq!(sku("001").to_string(), "001");
        assert_eq!(sku("9").to_string(), "9");
    }

    #[test]
    fn sku_rejects_non_digits() {
        for bad in ["", "12a", "-3", "1.5", " 12", "12 "] {
            assert!(Sku::try_from(bad).is_err(), "should reject {bad:?}");
        }
    }

    #[test]
    fn sku_orders_by_numeric_value() {
        assert!(sku("2") < sku("10"));
        assert!(sku("099") < sku("100"));
        assert!(sku("10") > sku("2"));
    }

    #[test]
    fn sku_leading_zeros_stay_distinct_but_ordered() {
        assert_ne!(sku("007"), sku("7"));
        assert!(sku("007") < sku("7"));
        assert!(sku("007") < sku("8"));
        assert!(sku("007") > sku("6"));
    }

    #[test]
    fn sku_serde_round_trip_revalidates() {
        let json = serde_json::to_string(&sku("042")).expect("serialize");
        assert_eq!(json, "\"042\"");
        let back: Sku = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, sku("042"));
        let bad: Result<Sku, _> = serde_json::from_str("\"x1\"");
        assert!(bad.is_err());
    }

    #[test]
    fn precision_bounds() {
        assert!(Precision::try_from(0).is_ok());
        assert!(Precision::try_from(6).is_ok());
        assert!(Precision::try_from(7).is_err());
        assert_eq!(Precision::default().digits(), 2);
    }

    #[test]
    fn precision_scale() {
        let p = Precision::try_from(3).expect("valid precision");
        assert!((p.scale() - 1000.0).abs() < f64::EPSILON);
    }
}
