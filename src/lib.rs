//! 32-bit signed binary fixed-point numbers for targets without an FPU
//!
//! This library provides one numeric type, [`Fx32<F>`], a thin wrapper over
//! an `i32` whose low `F` bits hold the fraction:
//!
//! - **`Q24_8`** (`Fx32<8>`): the default split
//!   - Range: ±8,388,608
//!   - Precision: 1/256 (0.00390625)
//! - **`Q16_16`** (`Fx32<16>`): range ±32,768, precision 1/65536
//! - **`Q8_24`** (`Fx32<24>`): range ±128, precision 2^-24
//!
//! Any `F` with `0 < F < 32` is accepted; other values fail to compile.
//!
//! ## Features
//!
//! - **Widened arithmetic**: multiplication and division go through `i64`
//!   so the rescale never overflows mid-operation
//! - **Native fast path**: [`ArithMode::Native`] keeps everything in `i32`
//!   for callers that know their magnitudes are small
//! - **Two fractional input conventions**: raw low bits ([`Fx32::new`]) or
//!   human-legible decimal fractions ([`Fx32::from_decimal`])
//! - **no_std**: no allocation, no float hardware needed for arithmetic
//! - **Serde support**: raw `i32` representation behind the `serde` feature
//! - **Comprehensive operations**: checked, saturating, wrapping and
//!   `try_` variants
//!
//! ## Example
//!
//! ```rust
//! use fx32::Q24_8;
//!
//! let a = Q24_8::from_decimal(1, 250); // 1.250
//! let b = Q24_8::from_decimal(0, 750); // 0.750
//!
//! assert_eq!((a + b).resolve(), 2);
//! assert_eq!((a * b).to_f32(), 0.9375);
//! assert!(a.try_div(Q24_8::ZERO).is_err());
//! ```

#![no_std]
#![cfg_attr(test, allow(unused_imports))]

#[cfg(test)]
extern crate std;

mod fx32;

pub use fx32::{ArithMode, DEFAULT_QUANTIZATION, Fx32, MAX_QUANTIZATION, Q8_24, Q16_16, Q24_8};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedError {
    #[error("overflow: value too large to represent")]
    Overflow,

    #[error("underflow: value too small to represent")]
    Underflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("fractional part out of range for this representation")]
    FractionOutOfRange,

    #[error("value is NaN or infinite")]
    NotFinite,
}

pub type Result<T> = core::result::Result<T, FixedError>;
