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

//! Formatting decimal numbers as text.

use std::fmt;

use crate::decimal128::Decimal128;
use crate::power::POWERS_OF_TEN;

impl Decimal128 {
    /// Formats the mantissa as a decimal integer string, with no decimal
    /// point.
    ///
    /// The digits come out in two divisions: everything at or above
    /// 10<sup>36</sup> prints first, then the next eighteen digits, then the
    /// last eighteen, the lower chunks zero-padded whenever a higher chunk
    /// printed before them.
    pub fn to_integer_string(&self) -> String {
        let mut buf = String::new();
        let mut need_fill = false;

        // Get anything at or above 10^36 and print it.
        let (top, mut remainder) = self
            .div_rem(POWERS_OF_TEN[36])
            .expect("power of ten divisor is non-zero");
        if !top.is_zero() {
            buf.push_str(&top.low_i64().to_string());
            remainder = remainder.wrapping_abs();
            need_fill = true;
        }

        // Now get anything at or above 10^18 and print it.
        let (middle, mut tail) = remainder
            .div_rem(POWERS_OF_TEN[18])
            .expect("power of ten divisor is non-zero");
        if need_fill || !middle.is_zero() {
            if need_fill {
                buf.push_str(&format!("{:018}", middle.low_i64()));
            } else {
                need_fill = true;
                tail = tail.wrapping_abs();
                buf.push_str(&middle.low_i64().to_string());
            }
        }

        // Finally print the tail, which is less than 10^18.
        if need_fill {
            buf.push_str(&format!("{:018}", tail.low_i64()));
        } else {
            buf.push_str(&tail.low_i64().to_string());
        }
        buf
    }

    /// Formats the number at the given decimal scale.
    ///
    /// Plain notation inserts the decimal point `scale` digits from the
    /// right, padding with zeros when the value has fewer digits than the
    /// scale. Scientific notation, with one leading integer digit and an
    /// explicitly signed exponent, is used when the scale is negative or
    /// when the adjusted exponent drops below −6.
    ///
    /// ```
    /// use dec128::Decimal128;
    /// let d = Decimal128::from(123_456_789);
    /// assert_eq!(d.to_string_with_scale(4), "12345.6789");
    /// assert_eq!(Decimal128::from(123).to_string_with_scale(12), "1.23E-10");
    /// ```
    pub fn to_string_with_scale(&self, scale: i32) -> String {
        let string = self.to_integer_string();

        if scale == 0 {
            return string;
        }

        let is_negative = self.is_negative();
        let len = string.len() as i32;
        let is_negative_offset = i32::from(is_negative);
        // The -6 threshold is taken from the Java BigDecimal documentation.
        let adjusted_exponent = -scale + (len - 1 - is_negative_offset);

        if scale < 0 || adjusted_exponent < -6 {
            return to_scientific_string(&string, adjusted_exponent, is_negative);
        }

        if is_negative {
            if len - 1 > scale {
                let n = (len - scale) as usize;
                format!("{}.{}", &string[..n], &string[n..])
            } else if len - 1 == scale {
                format!("-0.{}", &string[1..])
            } else {
                let zeros = (scale - len + 1) as usize;
                format!("-0.{}{}", "0".repeat(zeros), &string[1..])
            }
        } else if len > scale {
            let n = (len - scale) as usize;
            format!("{}.{}", &string[..n], &string[n..])
        } else if len == scale {
            format!("0.{}", string)
        } else {
            let zeros = (scale - len) as usize;
            format!("0.{}{}", "0".repeat(zeros), string)
        }
    }
}

/// Renders scientific notation from an integer string: the first digit, a
/// decimal point, the remaining digits, and a signed exponent. The decimal
/// point appears even when no digits follow it.
fn to_scientific_string(digits: &str, adjusted_exponent: i32, is_negative: bool) -> String {
    let offset = 1 + usize::from(is_negative);
    format!(
        "{}.{}E{:+}",
        &digits[..offset],
        &digits[offset..],
        adjusted_exponent,
    )
}

impl fmt::Debug for Decimal128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Decimal128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_integer_string())
    }
}
