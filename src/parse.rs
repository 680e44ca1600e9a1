// Copyright Materialize, Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parsing decimal numbers from text.

use std::str::FromStr;

use crate::decimal128::Decimal128;
use crate::error::ParseDecimalError;
use crate::power::POWERS_OF_TEN;

/// The number of decimal digits that always fit in an `i64`.
const I64_DECIMAL_DIGITS: usize = 18;

impl Decimal128 {
    /// Parses a number from its string representation, returning the value
    /// together with the precision and scale implied by the text.
    ///
    /// The accepted form is an optional sign, digits with at most one
    /// decimal point, and an optional exponent introduced by `E` or `e`; the
    /// exponent is only accepted after a fractional part. The precision is
    /// the number of digits after leading-zero stripping, and the scale is
    /// the number of fractional digits, adjusted by the exponent when one is
    /// present.
    ///
    /// ```
    /// use dec128::Decimal128;
    /// let (value, precision, scale) = Decimal128::from_string("12345.6789")?;
    /// assert_eq!(value, Decimal128::from(123_456_789));
    /// assert_eq!(precision, 9);
    /// assert_eq!(scale, 4);
    /// # Ok::<_, dec128::ParseDecimalError>(())
    /// ```
    pub fn from_string(s: &str) -> Result<(Decimal128, i32, i32), ParseDecimalError> {
        if s.is_empty() {
            return Err(ParseDecimalError::new(
                "empty string cannot be converted to decimal",
            ));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        let first_char = bytes[0];
        let is_negative = first_char == b'-';
        if first_char == b'+' || first_char == b'-' {
            pos += 1;
        }

        if pos == bytes.len() {
            return Err(ParseDecimalError::new(format!(
                "single character '{}' is not a valid decimal value",
                first_char as char,
            )));
        }

        let numeric_start = pos;

        // Skip leading zeros.
        while pos < bytes.len() && bytes[pos] == b'0' {
            pos += 1;
        }

        // All zeros and no decimal point. The precision is the count of
        // zeros consumed; callers that want "0" to have precision 1 must
        // post-process.
        if pos == bytes.len() {
            let precision = (pos - numeric_start) as i32;
            return Ok((Decimal128::ZERO, precision, 0));
        }

        let whole_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let whole = &s[whole_start..pos];

        if pos < bytes.len() && bytes[pos] == b'.' {
            pos += 1;
            if pos == bytes.len() {
                return Err(ParseDecimalError::new(
                    "decimal point must be followed by at least one base ten digit; \
                     reached the end of the string",
                ));
            }
            if !bytes[pos].is_ascii_digit() {
                return Err(ParseDecimalError::new(format!(
                    "decimal point must be followed by a base ten digit; found '{}'",
                    char_at(s, pos),
                )));
            }
        } else if pos < bytes.len() {
            return Err(ParseDecimalError::new(format!(
                "expected base ten digit or decimal point but found '{}'",
                char_at(s, pos),
            )));
        }

        let fractional_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos < bytes.len() && bytes[pos] != b'E' && bytes[pos] != b'e' {
            return Err(ParseDecimalError::new(format!(
                "found non base ten digit character '{}' before the end of the string",
                char_at(s, pos),
            )));
        }
        let fractional = &s[fractional_start..pos];

        let precision = (whole.len() + fractional.len()) as i32;

        let scale = if pos < bytes.len() {
            // The remaining text is an exponent: an optional sign followed
            // by at least one digit.
            pos += 1;
            let exponent_start = pos;
            if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
                pos += 1;
            }
            let digits_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos < bytes.len() {
                return Err(ParseDecimalError::new(format!(
                    "found non decimal digit exponent value '{}'",
                    char_at(s, pos),
                )));
            }
            if digits_start == pos {
                return Err(ParseDecimalError::new(
                    "exponent must be followed by at least one base ten digit",
                ));
            }
            let exponent: i32 = s[exponent_start..].parse().map_err(|_| {
                ParseDecimalError::new(format!(
                    "exponent value '{}' is out of range",
                    &s[exponent_start..],
                ))
            })?;
            -exponent + precision - 1
        } else {
            fractional.len() as i32
        };

        let mut value = string_to_integer(&[whole, fractional].concat());
        if is_negative {
            value = value.wrapping_neg();
        }

        Ok((value, precision, scale))
    }
}

impl FromStr for Decimal128 {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Decimal128, ParseDecimalError> {
        let (value, _, _) = Decimal128::from_string(s)?;
        Ok(value)
    }
}

/// Returns the character starting at byte offset `pos`.
///
/// The scanner only advances past ASCII, so `pos` is always a character
/// boundary.
fn char_at(s: &str, pos: usize) -> char {
    s[pos..].chars().next().unwrap_or('\u{FFFD}')
}

/// Converts a string of decimal digits to a value, consuming the digits in
/// chunks of up to eighteen so each chunk fits a 64-bit parse.
fn string_to_integer(digits: &str) -> Decimal128 {
    debug_assert!(!digits.is_empty(), "digit string must be non-empty");
    let mut value = Decimal128::ZERO;
    for chunk in digits.as_bytes().chunks(I64_DECIMAL_DIGITS) {
        let mut chunk_value = 0i64;
        for &b in chunk {
            debug_assert!(b.is_ascii_digit());
            chunk_value = chunk_value * 10 + i64::from(b - b'0');
        }
        value = value * POWERS_OF_TEN[chunk.len()] + Decimal128::from(chunk_value);
    }
    value
}
