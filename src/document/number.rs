//! Arbitrary-precision JSON numbers.
//!
//! A `JsonNumber` keeps the literal text it was parsed from, so diagnostics show
//! the number exactly as the document wrote it, and compares by decimal value so
//! that `5`, `5.0`, `5.00` and `5e0` are all equal. No floating-point rounding is
//! involved: `0.1` and `0.10000000000000001` are different numbers.
//!
//! # Example
//!
//! ```
//! use treematch::document::number::JsonNumber;
//!
//! let a = JsonNumber::parse("5").unwrap();
//! let b = JsonNumber::parse("5.00").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(b.to_string(), "5.00");
//! ```

use std::cmp::Ordering;
use std::fmt;

/// Canonical decimal: `digits * 10^exponent`.
///
/// `digits` never has leading or trailing zeros; zero is the empty digit string
/// with exponent 0 and a positive sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Decimal {
    negative: bool,
    digits: String,
    exponent: i64,
}

impl Decimal {
    fn parse(text: &str) -> Option<Self> {
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(pos) => {
                let exp_text = &rest[pos + 1..];
                let exp_digits = exp_text
                    .strip_prefix('+')
                    .or_else(|| exp_text.strip_prefix('-'))
                    .unwrap_or(exp_text);
                if exp_digits.is_empty() || !exp_digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                (&rest[..pos], exp_text.parse::<i64>().ok()?)
            }
            None => (rest, 0),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.is_empty() {
                    return None;
                }
                (int_part, frac_part)
            }
            None => (mantissa, ""),
        };
        if int_part.is_empty()
            || !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let frac_len = i64::try_from(frac_part.len()).ok()?;
        let mut exponent = exponent.checked_sub(frac_len)?;

        let all_digits = format!("{}{}", int_part, frac_part);
        let trimmed = all_digits.trim_start_matches('0');
        let significant = trimmed.trim_end_matches('0');
        if significant.is_empty() {
            return Some(Self::zero());
        }
        let stripped = i64::try_from(trimmed.len() - significant.len()).ok()?;
        exponent = exponent.checked_add(stripped)?;

        Some(Self {
            negative,
            digits: significant.to_string(),
            exponent,
        })
    }

    fn zero() -> Self {
        Self {
            negative: false,
            digits: String::new(),
            exponent: 0,
        }
    }

    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Position of the most significant digit relative to the decimal point.
    fn magnitude(&self) -> i128 {
        i128::from(self.exponent) + self.digits.len() as i128
    }

    fn cmp_abs(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .magnitude()
                .cmp(&other.magnitude())
                .then_with(|| self.digits.cmp(&other.digits)),
        }
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let sign = |d: &Decimal| -> i8 {
            if d.is_zero() {
                0
            } else if d.negative {
                -1
            } else {
                1
            }
        };
        match sign(self).cmp(&sign(other)) {
            Ordering::Equal if self.negative => other.cmp_abs(self),
            Ordering::Equal => self.cmp_abs(other),
            unequal => unequal,
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A JSON number with value-based equality.
#[derive(Debug, Clone)]
pub struct JsonNumber {
    text: String,
    value: Decimal,
}

impl JsonNumber {
    /// Parses a JSON number literal.
    ///
    /// Returns `None` if `text` is not a valid JSON number (leading `+`,
    /// missing integer part, dangling `.` or exponent, `NaN`, ...).
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        Decimal::parse(trimmed).map(|value| Self {
            text: trimmed.to_string(),
            value,
        })
    }

    /// Builds a number from a finite float. Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() {
            Self::parse(&value.to_string())
        } else {
            None
        }
    }

    /// The literal text this number was created from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_integer(&self) -> bool {
        self.value.is_zero() || self.value.exponent >= 0
    }
}

impl From<i64> for JsonNumber {
    fn from(value: i64) -> Self {
        let text = value.to_string();
        let value = Decimal::parse(&text).unwrap_or_else(Decimal::zero);
        Self { text, value }
    }
}

impl From<u64> for JsonNumber {
    fn from(value: u64) -> Self {
        let text = value.to_string();
        let value = Decimal::parse(&text).unwrap_or_else(Decimal::zero);
        Self { text, value }
    }
}

impl PartialEq for JsonNumber {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for JsonNumber {}

impl PartialOrd for JsonNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JsonNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
