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

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::convert::TryInto;
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

#[cfg(feature = "num-traits")]
use num_traits::{MulAdd, MulAddAssign, One, Zero};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TryFromDecimalError;

const LIMB_MASK: u64 = 0xFFFF_FFFF;

/// A 128-bit signed integer mantissa for decimal values.
///
/// A `Decimal128` is a two's-complement 128-bit integer stored as a signed
/// high half and an unsigned low half. It carries no scale of its own: the
/// number of fractional digits is a property of the schema the value belongs
/// to, and is passed in explicitly when formatting with
/// [`to_string_with_scale`](Decimal128::to_string_with_scale) or converting
/// between scales with [`rescale`](Decimal128::rescale).
///
/// All arithmetic wraps modulo 2<sup>128</sup>. For convenience,
/// `Decimal128` overloads the standard Rust operators:
///
/// ```
/// use dec128::Decimal128;
/// let a = Decimal128::from(1);
/// let b = Decimal128::from(2);
/// assert_eq!(a + b, Decimal128::from(3));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Decimal128 {
    high: i64,
    low: u64,
}

impl Decimal128 {
    /// The value that represents zero.
    pub const ZERO: Decimal128 = Decimal128 { high: 0, low: 0 };

    /// The value that represents one.
    pub const ONE: Decimal128 = Decimal128 { high: 0, low: 1 };

    /// The smallest representable value, −2<sup>127</sup>.
    pub const MIN: Decimal128 = Decimal128 {
        high: i64::MIN,
        low: 0,
    };

    /// The largest representable value, 2<sup>127</sup> − 1.
    pub const MAX: Decimal128 = Decimal128 {
        high: i64::MAX,
        low: u64::MAX,
    };

    /// Creates a number from its high and low 64-bit halves.
    pub const fn new(high: i64, low: u64) -> Decimal128 {
        Decimal128 { high, low }
    }

    /// Returns the signed high half of the number.
    pub const fn high(&self) -> i64 {
        self.high
    }

    /// Returns the unsigned low half of the number.
    pub const fn low(&self) -> u64 {
        self.low
    }

    /// Creates a number from an `i128` with the same two's-complement bit
    /// pattern.
    pub const fn from_i128(n: i128) -> Decimal128 {
        Decimal128 {
            high: (n >> 64) as i64,
            low: n as u64,
        }
    }

    /// Returns the number as an `i128` with the same two's-complement bit
    /// pattern.
    pub const fn to_i128(&self) -> i128 {
        ((self.high as i128) << 64) | self.low as i128
    }

    /// Creates a number from its representation as a 16-byte little-endian
    /// array: the low half in bytes 0..8, the high half in bytes 8..16.
    pub fn from_le_bytes(bytes: [u8; 16]) -> Decimal128 {
        Decimal128 {
            high: i64::from_le_bytes(bytes[8..16].try_into().unwrap()),
            low: u64::from_le_bytes(bytes[0..8].try_into().unwrap()),
        }
    }

    /// Creates a number from its representation as a 16-byte big-endian
    /// array.
    pub fn from_be_bytes(mut bytes: [u8; 16]) -> Decimal128 {
        bytes.reverse();
        Decimal128::from_le_bytes(bytes)
    }

    /// Creates a number from its representation as a byte array in the
    /// native endianness of the target platform.
    pub fn from_ne_bytes(bytes: [u8; 16]) -> Decimal128 {
        if cfg!(target_endian = "big") {
            Decimal128::from_be_bytes(bytes)
        } else {
            Decimal128::from_le_bytes(bytes)
        }
    }

    /// Returns the memory representation of the number as a 16-byte array in
    /// little-endian order.
    ///
    /// ```
    /// use dec128::Decimal128;
    /// assert_eq!(Decimal128::from(-1).to_le_bytes(), [0xFF; 16]);
    /// ```
    pub fn to_le_bytes(&self) -> [u8; 16] {
        let mut bytes = [0; 16];
        bytes[0..8].copy_from_slice(&self.low.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.high.to_le_bytes());
        bytes
    }

    /// Returns the memory representation of the number as a 16-byte array in
    /// big-endian order.
    pub fn to_be_bytes(&self) -> [u8; 16] {
        let mut bytes = self.to_le_bytes();
        bytes.reverse();
        bytes
    }

    /// Returns the memory representation of the number as a byte array in
    /// the native endianness of the target platform.
    pub fn to_ne_bytes(&self) -> [u8; 16] {
        if cfg!(target_endian = "big") {
            self.to_be_bytes()
        } else {
            self.to_le_bytes()
        }
    }

    /// Reports whether the number is less than zero.
    pub const fn is_negative(&self) -> bool {
        self.high < 0
    }

    /// Reports whether the number is zero.
    pub const fn is_zero(&self) -> bool {
        self.high == 0 && self.low == 0
    }

    /// Computes the two's-complement negation of the number, wrapping around
    /// at the boundary of the type.
    ///
    /// The one value with no positive counterpart, [`Decimal128::MIN`],
    /// negates to itself.
    pub const fn wrapping_neg(self) -> Decimal128 {
        let low = (!self.low).wrapping_add(1);
        let mut high = !self.high;
        if low == 0 {
            high = high.wrapping_add(1);
        }
        Decimal128 { high, low }
    }

    /// Computes the absolute value of the number, wrapping around at the
    /// boundary of the type.
    ///
    /// [`Decimal128::MIN`] is its own absolute value.
    pub const fn wrapping_abs(self) -> Decimal128 {
        if self.is_negative() {
            self.wrapping_neg()
        } else {
            self
        }
    }

    /// Adds `rhs` to the number, wrapping around at the boundary of the
    /// type.
    ///
    /// The carry out of the low half is detected by comparing the unsigned
    /// sum against the original low half.
    pub const fn wrapping_add(self, rhs: Decimal128) -> Decimal128 {
        let sum = self.low.wrapping_add(rhs.low);
        let mut high = self.high.wrapping_add(rhs.high);
        if sum < self.low {
            high = high.wrapping_add(1);
        }
        Decimal128 { high, low: sum }
    }

    /// Subtracts `rhs` from the number, wrapping around at the boundary of
    /// the type.
    pub const fn wrapping_sub(self, rhs: Decimal128) -> Decimal128 {
        let diff = self.low.wrapping_sub(rhs.low);
        let mut high = self.high.wrapping_sub(rhs.high);
        if diff > self.low {
            high = high.wrapping_sub(1);
        }
        Decimal128 { high, low: diff }
    }

    /// Multiplies the number by `rhs`, keeping the low 128 bits of the
    /// 256-bit product.
    ///
    /// Both operands are decomposed into 32-bit limbs and multiplied
    /// schoolbook-style; partial products that would only contribute to bits
    /// at or above 2<sup>128</sup> are never computed.
    pub fn wrapping_mul(self, rhs: Decimal128) -> Decimal128 {
        // Limbs are least significant first. Each product of two limbs fits
        // in a u64, and each column accumulates at most eight 32-bit
        // halves, leaving ample headroom before the final carry pass.
        let left = limbs(self);
        let right = limbs(rhs);

        let mut columns = [0u64; 4];
        for (i, &l) in left.iter().enumerate() {
            for (j, &r) in right.iter().enumerate() {
                if i + j >= 4 {
                    break;
                }
                let product = l * r;
                columns[i + j] += product & LIMB_MASK;
                if i + j + 1 < 4 {
                    columns[i + j + 1] += product >> 32;
                }
            }
        }

        let mut carry = 0;
        for column in columns.iter_mut() {
            *column += carry;
            carry = *column >> 32;
            *column &= LIMB_MASK;
        }

        Decimal128 {
            high: ((columns[3] << 32) | columns[2]) as i64,
            low: (columns[1] << 32) | columns[0],
        }
    }

    /// Returns the low 64 bits reinterpreted as a signed integer.
    ///
    /// Callers must have established that the value fits, i.e. that the high
    /// half is pure sign fill.
    pub(crate) fn low_i64(&self) -> i64 {
        debug_assert!(
            self.high == 0 || self.high == -1,
            "high half must be sign fill to truncate to 64 bits, got {}",
            self.high,
        );
        self.low as i64
    }
}

/// Splits a number into four 32-bit limbs, least significant first.
fn limbs(d: Decimal128) -> [u64; 4] {
    [
        d.low & LIMB_MASK,
        d.low >> 32,
        (d.high as u64) & LIMB_MASK,
        (d.high as u64) >> 32,
    ]
}

impl Default for Decimal128 {
    fn default() -> Decimal128 {
        Decimal128::ZERO
    }
}

impl PartialOrd for Decimal128 {
    fn partial_cmp(&self, other: &Decimal128) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal128 {
    fn cmp(&self, other: &Decimal128) -> Ordering {
        // Signed 128-bit ordering: the high halves compare signed, and only
        // when they are equal do the low halves compare unsigned.
        self.high
            .cmp(&other.high)
            .then_with(|| self.low.cmp(&other.low))
    }
}

impl From<i8> for Decimal128 {
    fn from(n: i8) -> Decimal128 {
        Decimal128::from(i64::from(n))
    }
}

impl From<i16> for Decimal128 {
    fn from(n: i16) -> Decimal128 {
        Decimal128::from(i64::from(n))
    }
}

impl From<i32> for Decimal128 {
    fn from(n: i32) -> Decimal128 {
        Decimal128::from(i64::from(n))
    }
}

impl From<i64> for Decimal128 {
    fn from(n: i64) -> Decimal128 {
        Decimal128 {
            high: n >> 63,
            low: n as u64,
        }
    }
}

impl From<u8> for Decimal128 {
    fn from(n: u8) -> Decimal128 {
        Decimal128::from(u64::from(n))
    }
}

impl From<u16> for Decimal128 {
    fn from(n: u16) -> Decimal128 {
        Decimal128::from(u64::from(n))
    }
}

impl From<u32> for Decimal128 {
    fn from(n: u32) -> Decimal128 {
        Decimal128::from(u64::from(n))
    }
}

impl From<u64> for Decimal128 {
    fn from(n: u64) -> Decimal128 {
        Decimal128 { high: 0, low: n }
    }
}

impl From<i128> for Decimal128 {
    fn from(n: i128) -> Decimal128 {
        Decimal128::from_i128(n)
    }
}

impl From<Decimal128> for i128 {
    fn from(n: Decimal128) -> i128 {
        n.to_i128()
    }
}

impl TryFrom<Decimal128> for i64 {
    type Error = TryFromDecimalError;

    fn try_from(n: Decimal128) -> Result<i64, TryFromDecimalError> {
        // The value fits iff the high half is exactly the sign extension of
        // the low half's top bit.
        if n.high == (n.low as i64) >> 63 {
            Ok(n.low as i64)
        } else {
            Err(TryFromDecimalError)
        }
    }
}

impl Neg for Decimal128 {
    type Output = Decimal128;

    fn neg(self) -> Decimal128 {
        self.wrapping_neg()
    }
}

impl Add<Decimal128> for Decimal128 {
    type Output = Decimal128;

    fn add(self, rhs: Decimal128) -> Decimal128 {
        self.wrapping_add(rhs)
    }
}

impl AddAssign<Decimal128> for Decimal128 {
    fn add_assign(&mut self, rhs: Decimal128) {
        *self = self.wrapping_add(rhs);
    }
}

impl Sub<Decimal128> for Decimal128 {
    type Output = Decimal128;

    fn sub(self, rhs: Decimal128) -> Decimal128 {
        self.wrapping_sub(rhs)
    }
}

impl SubAssign<Decimal128> for Decimal128 {
    fn sub_assign(&mut self, rhs: Decimal128) {
        *self = self.wrapping_sub(rhs);
    }
}

impl Mul<Decimal128> for Decimal128 {
    type Output = Decimal128;

    fn mul(self, rhs: Decimal128) -> Decimal128 {
        self.wrapping_mul(rhs)
    }
}

impl MulAssign<Decimal128> for Decimal128 {
    fn mul_assign(&mut self, rhs: Decimal128) {
        *self = self.wrapping_mul(rhs);
    }
}

impl Div<Decimal128> for Decimal128 {
    type Output = Decimal128;

    fn div(self, rhs: Decimal128) -> Decimal128 {
        match self.div_rem(rhs) {
            Ok((quotient, _)) => quotient,
            Err(_) => panic!("attempt to divide by zero"),
        }
    }
}

impl DivAssign<Decimal128> for Decimal128 {
    fn div_assign(&mut self, rhs: Decimal128) {
        *self = *self / rhs;
    }
}

impl Rem<Decimal128> for Decimal128 {
    type Output = Decimal128;

    fn rem(self, rhs: Decimal128) -> Decimal128 {
        match self.div_rem(rhs) {
            Ok((_, remainder)) => remainder,
            Err(_) => panic!("attempt to calculate the remainder with a divisor of zero"),
        }
    }
}

impl RemAssign<Decimal128> for Decimal128 {
    fn rem_assign(&mut self, rhs: Decimal128) {
        *self = *self % rhs;
    }
}

impl Not for Decimal128 {
    type Output = Decimal128;

    fn not(self) -> Decimal128 {
        Decimal128 {
            high: !self.high,
            low: !self.low,
        }
    }
}

impl BitAnd<Decimal128> for Decimal128 {
    type Output = Decimal128;

    fn bitand(self, rhs: Decimal128) -> Decimal128 {
        Decimal128 {
            high: self.high & rhs.high,
            low: self.low & rhs.low,
        }
    }
}

impl BitAndAssign<Decimal128> for Decimal128 {
    fn bitand_assign(&mut self, rhs: Decimal128) {
        *self = *self & rhs;
    }
}

impl BitOr<Decimal128> for Decimal128 {
    type Output = Decimal128;

    fn bitor(self, rhs: Decimal128) -> Decimal128 {
        Decimal128 {
            high: self.high | rhs.high,
            low: self.low | rhs.low,
        }
    }
}

impl BitOrAssign<Decimal128> for Decimal128 {
    fn bitor_assign(&mut self, rhs: Decimal128) {
        *self = *self | rhs;
    }
}

impl BitXor<Decimal128> for Decimal128 {
    type Output = Decimal128;

    fn bitxor(self, rhs: Decimal128) -> Decimal128 {
        Decimal128 {
            high: self.high ^ rhs.high,
            low: self.low ^ rhs.low,
        }
    }
}

impl BitXorAssign<Decimal128> for Decimal128 {
    fn bitxor_assign(&mut self, rhs: Decimal128) {
        *self = *self ^ rhs;
    }
}

impl Shl<u32> for Decimal128 {
    type Output = Decimal128;

    fn shl(self, bits: u32) -> Decimal128 {
        if bits == 0 {
            self
        } else if bits < 64 {
            Decimal128 {
                high: (self.high << bits) | ((self.low >> (64 - bits)) as i64),
                low: self.low << bits,
            }
        } else if bits < 128 {
            Decimal128 {
                high: (self.low << (bits - 64)) as i64,
                low: 0,
            }
        } else {
            Decimal128::ZERO
        }
    }
}

impl ShlAssign<u32> for Decimal128 {
    fn shl_assign(&mut self, bits: u32) {
        *self = *self << bits;
    }
}

impl Shr<u32> for Decimal128 {
    type Output = Decimal128;

    /// Arithmetic right shift: the vacated high bits fill with the sign.
    fn shr(self, bits: u32) -> Decimal128 {
        if bits == 0 {
            self
        } else if bits < 64 {
            Decimal128 {
                high: self.high >> bits,
                low: (self.low >> bits) | ((self.high as u64) << (64 - bits)),
            }
        } else if bits < 128 {
            Decimal128 {
                high: self.high >> 63,
                low: (self.high >> (bits - 64)) as u64,
            }
        } else {
            let fill = self.high >> 63;
            Decimal128 {
                high: fill,
                low: fill as u64,
            }
        }
    }
}

impl ShrAssign<u32> for Decimal128 {
    fn shr_assign(&mut self, bits: u32) {
        *self = *self >> bits;
    }
}

impl Sum for Decimal128 {
    fn sum<I>(iter: I) -> Decimal128
    where
        I: Iterator<Item = Decimal128>,
    {
        iter.fold(Decimal128::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Decimal128> for Decimal128 {
    fn sum<I>(iter: I) -> Decimal128
    where
        I: Iterator<Item = &'a Decimal128>,
    {
        iter.copied().sum()
    }
}

impl Product for Decimal128 {
    fn product<I>(iter: I) -> Decimal128
    where
        I: Iterator<Item = Decimal128>,
    {
        iter.fold(Decimal128::ONE, Mul::mul)
    }
}

impl<'a> Product<&'a Decimal128> for Decimal128 {
    fn product<I>(iter: I) -> Decimal128
    where
        I: Iterator<Item = &'a Decimal128>,
    {
        iter.copied().product()
    }
}

#[cfg(feature = "num-traits")]
impl Zero for Decimal128 {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_zero()
    }
}

#[cfg(feature = "num-traits")]
impl One for Decimal128 {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }
}

#[cfg(feature = "num-traits")]
impl MulAdd for Decimal128 {
    type Output = Self;

    fn mul_add(self, a: Self, b: Self) -> Self::Output {
        self.wrapping_mul(a).wrapping_add(b)
    }
}

#[cfg(feature = "num-traits")]
impl MulAddAssign for Decimal128 {
    #[inline]
    fn mul_add_assign(&mut self, a: Self, b: Self) {
        *self = self.mul_add(a, b)
    }
}
