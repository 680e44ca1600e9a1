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

//! Signed long division over 32-bit limbs.
//!
//! The dividend and divisor are expanded into arrays of 32-bit limbs, most
//! significant first, and divided with Knuth's Algorithm D. A one-limb
//! divisor takes a simpler path that carries a 64-bit running remainder
//! instead.

use std::convert::TryFrom;

use crate::decimal128::Decimal128;
use crate::error::DivideByZeroError;

impl Decimal128 {
    /// Divides the number by `divisor`, truncating toward zero, and returns
    /// the quotient and remainder.
    ///
    /// The remainder takes the sign of the dividend and is strictly smaller
    /// than the divisor in magnitude, so that
    /// `quotient * divisor + remainder` reproduces the dividend.
    ///
    /// ```
    /// use dec128::Decimal128;
    /// let dividend: Decimal128 = "1000000000000000000000".parse()?;
    /// let (quotient, remainder) = dividend.div_rem(Decimal128::from(3))?;
    /// assert_eq!(quotient, "333333333333333333333".parse()?);
    /// assert_eq!(remainder, Decimal128::from(1));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn div_rem(
        self,
        divisor: Decimal128,
    ) -> Result<(Decimal128, Decimal128), DivideByZeroError> {
        // The dividend keeps one extra zero limb in front: subtracting a
        // slightly-too-large multiple of the divisor can briefly borrow
        // into it.
        let mut dividend_array = [0u32; 5];
        let mut divisor_array = [0u32; 4];
        let (n, dividend_was_negative) = fill_in_array(self, &mut dividend_array[1..]);
        let dividend_length = n + 1;
        let (divisor_length, divisor_was_negative) = fill_in_array(divisor, &mut divisor_array);

        if dividend_length <= divisor_length {
            return Ok((Decimal128::ZERO, self));
        }

        if divisor_length == 0 {
            return Err(DivideByZeroError);
        }

        if divisor_length == 1 {
            let (quotient, r) =
                single_divide(&dividend_array[..dividend_length], divisor_array[0]);
            let remainder = Decimal128::from(r as i64);
            return Ok(fix_division_signs(
                quotient,
                remainder,
                dividend_was_negative,
                divisor_was_negative,
            ));
        }

        let dividend = &mut dividend_array[..dividend_length];
        let divisor = &mut divisor_array[..divisor_length];
        let result_length = dividend_length - divisor_length;
        let mut result_array = [0u32; 4];

        // Normalize by shifting both operands left until the divisor's top
        // limb has its high bit set, which keeps the digit guesses below
        // within two of the true digit.
        let normalize_bits = divisor[0].leading_zeros();
        shift_array_left(divisor, normalize_bits);
        shift_array_left(dividend, normalize_bits);

        for j in 0..result_length {
            // Guess the next quotient digit, clamping when the top limbs
            // are equal and the two-limb quotient would not fit.
            let high_dividend =
                (u64::from(dividend[j]) << 32) | u64::from(dividend[j + 1]);
            let mut guess = if dividend[j] == divisor[0] {
                u32::MAX
            } else {
                (high_dividend / u64::from(divisor[0])) as u32
            };

            // Catch all of the cases where the guess is two too large and
            // most of the cases where it is one too large, stopping once
            // the running remainder no longer fits in 32 bits.
            let mut rhat =
                high_dividend.wrapping_sub(u64::from(guess) * u64::from(divisor[0])) as u32;
            while u64::from(divisor[1]) * u64::from(guess)
                > (u64::from(rhat) << 32) + u64::from(dividend[j + 2])
            {
                guess -= 1;
                rhat = rhat.wrapping_add(divisor[0]);
                if rhat < divisor[0] {
                    break;
                }
            }

            // Subtract guess * divisor from the dividend slice, detecting
            // each limb's borrow by comparing it against its prior value.
            let mut borrow = 0u64;
            for i in (0..divisor_length).rev() {
                borrow += u64::from(guess) * u64::from(divisor[i]);
                let prev = dividend[j + i + 1];
                dividend[j + i + 1] = prev.wrapping_sub(borrow as u32);
                borrow >>= 32;
                if dividend[j + i + 1] > prev {
                    borrow += 1;
                }
            }
            let prev = dividend[j];
            dividend[j] = prev.wrapping_sub(borrow as u32);

            // The guess was still one too large: undo one multiple of the
            // divisor.
            if dividend[j] > prev {
                guess -= 1;
                let mut carry = 0u32;
                for i in (0..divisor_length).rev() {
                    let sum = u64::from(divisor[i])
                        + u64::from(dividend[j + i + 1])
                        + u64::from(carry);
                    dividend[j + i + 1] = sum as u32;
                    carry = (sum >> 32) as u32;
                }
                dividend[j] = dividend[j].wrapping_add(carry);
            }

            result_array[j] = guess;
        }

        // The remainder was normalized along with the operands; shift it
        // back.
        shift_array_right(dividend, normalize_bits);

        let quotient = build_from_array(&result_array[..result_length]);
        let remainder = build_from_array(dividend);
        Ok(fix_division_signs(
            quotient,
            remainder,
            dividend_was_negative,
            divisor_was_negative,
        ))
    }
}

/// Expands a value into 32-bit limbs, most significant first, dropping
/// leading zero limbs. The limbs hold the absolute value; the sign is
/// returned alongside the limb count.
fn fill_in_array(value: Decimal128, array: &mut [u32]) -> (usize, bool) {
    let was_negative = value.is_negative();
    let abs = value.wrapping_abs();
    let high = abs.high() as u64;
    let low = abs.low();

    if high != 0 {
        if high > u64::from(u32::MAX) {
            array[0] = (high >> 32) as u32;
            array[1] = high as u32;
            array[2] = (low >> 32) as u32;
            array[3] = low as u32;
            (4, was_negative)
        } else {
            array[0] = high as u32;
            array[1] = (low >> 32) as u32;
            array[2] = low as u32;
            (3, was_negative)
        }
    } else if low > u64::from(u32::MAX) {
        array[0] = (low >> 32) as u32;
        array[1] = low as u32;
        (2, was_negative)
    } else if low == 0 {
        (0, was_negative)
    } else {
        array[0] = low as u32;
        (1, was_negative)
    }
}

/// Shifts the limbs left by `bits` positions, `0 <= bits < 32`. Bits shifted
/// out of the leading limb are lost.
fn shift_array_left(array: &mut [u32], bits: u32) {
    if array.is_empty() || bits == 0 {
        return;
    }
    for i in 0..array.len() - 1 {
        array[i] = (array[i] << bits) | (array[i + 1] >> (32 - bits));
    }
    let last = array.len() - 1;
    array[last] <<= bits;
}

/// Shifts the limbs right by `bits` positions, `0 <= bits < 32`.
fn shift_array_right(array: &mut [u32], bits: u32) {
    if array.is_empty() || bits == 0 {
        return;
    }
    for i in (1..array.len()).rev() {
        array[i] = (array[i] >> bits) | (array[i - 1] << (32 - bits));
    }
    array[0] >>= bits;
}

/// Reassembles a limb array, most significant first, into a value.
fn build_from_array(array: &[u32]) -> Decimal128 {
    let array = match array.len() {
        5 => {
            assert_eq!(array[0], 0, "limb array exceeds 128 bits");
            &array[1..]
        }
        0..=4 => array,
        n => panic!("limb array of length {} exceeds 128 bits", n),
    };
    match *array {
        [] => Decimal128::ZERO,
        [a] => Decimal128::from(i64::from(a)),
        [a, b] => Decimal128::new(0, (u64::from(a) << 32) | u64::from(b)),
        [a, b, c] => Decimal128::new(i64::from(a), (u64::from(b) << 32) | u64::from(c)),
        [a, b, c, d] => Decimal128::new(
            (i64::from(a) << 32) | i64::from(b),
            (u64::from(c) << 32) | u64::from(d),
        ),
        _ => unreachable!(),
    }
}

/// Divides by a divisor that fits in a single 32-bit limb, carrying a 64-bit
/// running remainder from limb to limb.
fn single_divide(dividend: &[u32], divisor: u32) -> (Decimal128, u64) {
    let mut result_array = [0u32; 5];
    let mut r = 0u64;
    for (j, &limb) in dividend.iter().enumerate() {
        r = (r << 32) + u64::from(limb);
        result_array[j] = u32::try_from(r / u64::from(divisor)).unwrap();
        r %= u64::from(divisor);
    }
    (build_from_array(&result_array[..dividend.len()]), r)
}

/// Fixes the signs of the quotient and remainder from the signs of the
/// dividend and divisor: the quotient is negative when the signs disagree,
/// and the remainder follows the dividend.
fn fix_division_signs(
    mut quotient: Decimal128,
    mut remainder: Decimal128,
    dividend_was_negative: bool,
    divisor_was_negative: bool,
) -> (Decimal128, Decimal128) {
    if dividend_was_negative != divisor_was_negative {
        quotient = quotient.wrapping_neg();
    }
    if dividend_was_negative {
        remainder = remainder.wrapping_neg();
    }
    (quotient, remainder)
}
