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

//! dec128 is a fixed-width decimal arithmetic library for Rust.
//!
//! # Introduction
//!
//! Columnar data formats store decimal numbers as a fixed-width integer
//! mantissa, with the decimal scale recorded once in the schema rather than
//! on every value. Binary floating-point is unsuitable for these columns:
//! the value 0.1, for example, would need an infinitely recurring binary
//! fraction, so sums and comparisons drift away from the results achieved
//! by decimal hand arithmetic.
//!
//! dec128 implements the widest such mantissa, a 128-bit two's-complement
//! signed integer stored as a signed high half and an unsigned low half.
//! It provides exact wrapping arithmetic (including signed long division),
//! bit operations, textual parsing and formatting with scientific notation,
//! 16-byte little-endian serialization, and rescaling between decimal
//! scales with exact loss detection.
//!
//! # Details
//!
//! The main entry points are as follows:
//!
//!  * [`Decimal128`], the value itself, which overloads the standard
//!    arithmetic, bitwise, shift, and comparison operators, all wrapping
//!    modulo 2<sup>128</sup>.
//!
//!  * [`Decimal128::from_string`], which parses text into a value together
//!    with its precision and scale, and
//!    [`Decimal128::to_string_with_scale`], which formats a value at a given
//!    scale, selecting between plain and scientific notation.
//!
//!  * [`Decimal128::div_rem`], the checked division returning both quotient
//!    and remainder, truncated toward zero.
//!
//!  * [`Decimal128::rescale`], which moves a value between decimal scales
//!    and reports any loss of digits as an error.
//!
//! # Examples
//!
//! ```
//! use dec128::Decimal128;
//!
//! let (value, precision, scale) = Decimal128::from_string("12345.6789")?;
//! assert_eq!(precision, 9);
//! assert_eq!(scale, 4);
//! assert_eq!(value.to_string_with_scale(scale), "12345.6789");
//!
//! let (quotient, remainder) = value.div_rem(Decimal128::from(1_000))?;
//! assert_eq!(quotient, Decimal128::from(123_456));
//! assert_eq!(remainder, Decimal128::from(789));
//!
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_debug_implementations, missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod decimal128;
mod divide;
mod error;
mod format;
mod parse;
mod power;

pub use decimal128::Decimal128;
pub use error::{
    DivideByZeroError, ParseDecimalError, RescaleDataLossError, TryFromDecimalError,
};
