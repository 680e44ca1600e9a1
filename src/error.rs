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

use std::error::Error;
use std::fmt;

use crate::decimal128::Decimal128;

/// An error indicating that a string is not a valid decimal number.
///
/// The message identifies the offending character or position in the input.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseDecimalError {
    message: String,
}

impl ParseDecimalError {
    pub(crate) fn new<S>(message: S) -> ParseDecimalError
    where
        S: Into<String>,
    {
        ParseDecimalError {
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ParseDecimalError {}

/// An error indicating that the divisor in a decimal division was zero.
#[derive(Debug, Eq, PartialEq)]
pub struct DivideByZeroError;

impl fmt::Display for DivideByZeroError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("division by zero")
    }
}

impl Error for DivideByZeroError {}

/// An error indicating that a decimal did not fit in the requested integer
/// type.
#[derive(Debug, Eq, PartialEq)]
pub struct TryFromDecimalError;

impl fmt::Display for TryFromDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("decimal out of range for integer conversion")
    }
}

impl Error for TryFromDecimalError {}

/// An error indicating that changing the scale of a decimal would lose
/// digits, either by overflowing the 128-bit mantissa or by truncating a
/// nonzero remainder.
#[derive(Debug, Eq, PartialEq)]
pub struct RescaleDataLossError {
    value: String,
    original_scale: i32,
    new_scale: i32,
}

impl RescaleDataLossError {
    pub(crate) fn new(
        value: Decimal128,
        original_scale: i32,
        new_scale: i32,
    ) -> RescaleDataLossError {
        RescaleDataLossError {
            value: value.to_string_with_scale(original_scale),
            original_scale,
            new_scale,
        }
    }
}

impl fmt::Display for RescaleDataLossError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "rescaling decimal value {} from original scale of {} to new scale of {} \
             would cause data loss",
            self.value, self.original_scale, self.new_scale
        )
    }
}

impl Error for RescaleDataLossError {}
