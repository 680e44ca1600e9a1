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

//! The powers of ten and scale conversion.

use crate::decimal128::Decimal128;
use crate::error::RescaleDataLossError;

/// The powers of ten that fit in 128 bits: `10^n` for `n` in `[0, 38]`.
pub(crate) const POWERS_OF_TEN: [Decimal128; 39] = {
    let mut table = [Decimal128::ZERO; 39];
    let mut n = 0;
    while n < table.len() {
        table[n] = Decimal128::from_i128(10i128.pow(n as u32));
        n += 1;
    }
    table
};

impl Decimal128 {
    /// Converts the number from one decimal scale to another, multiplying or
    /// dividing by the corresponding power of ten.
    ///
    /// Increasing the scale multiplies the mantissa; the multiplication is
    /// flagged as data loss when the product compares less than the input
    /// under signed comparison. That check is conservative: for negative or
    /// near-boundary inputs it can miss an overflow or flag one that did
    /// not happen. Decreasing the scale divides the mantissa and is flagged
    /// as data loss when the division leaves a nonzero remainder.
    ///
    /// The scales must differ, by no more than 38.
    ///
    /// ```
    /// use dec128::Decimal128;
    /// let d = Decimal128::from(12345);
    /// assert_eq!(d.rescale(2, 5)?, Decimal128::from(12_345_000));
    /// assert!(d.rescale(5, 2).is_err());
    /// # Ok::<_, dec128::RescaleDataLossError>(())
    /// ```
    pub fn rescale(
        &self,
        original_scale: i32,
        new_scale: i32,
    ) -> Result<Decimal128, RescaleDataLossError> {
        debug_assert_ne!(original_scale, new_scale);

        let delta_scale = new_scale - original_scale;
        let abs_delta_scale = delta_scale.abs();
        debug_assert!((1..=38).contains(&abs_delta_scale));

        let multiplier = POWERS_OF_TEN[abs_delta_scale as usize];

        if delta_scale < 0 {
            let (result, remainder) = self
                .div_rem(multiplier)
                .expect("power of ten divisor is non-zero");
            if !remainder.is_zero() {
                return Err(RescaleDataLossError::new(*self, original_scale, new_scale));
            }
            Ok(result)
        } else {
            let result = *self * multiplier;
            if result < *self {
                return Err(RescaleDataLossError::new(*self, original_scale, new_scale));
            }
            Ok(result)
        }
    }
}
