use core::fmt;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::FixedError;

/// Default quantization limit for [`Fx32::from_decimal`]: fractions are thousandths.
pub const DEFAULT_QUANTIZATION: u32 = 1000;

/// Largest quantization limit accepted by [`Fx32::from_quantized`].
pub const MAX_QUANTIZATION: u32 = 1 << GUARD_BITS;

/// Extra precision carried through the decimal rescale before the final shift.
const GUARD_BITS: u32 = 16;

/// 32-bit signed fixed-point number with `F` fractional bits.
///
/// The represented value is `raw / 2^F`. `F` defaults to 8, so a bare
/// `Fx32` is [`Q24_8`]. `F` must satisfy `0 < F < 32`; any other value is
/// rejected at compile time the first time a value of that type is
/// constructed.
///
/// Plain operators (`+`, `-`, `*`, `/`, unary `-`) wrap on overflow of the
/// backing `i32`, in debug and release builds alike. Use the `checked_`,
/// `saturating_` or `try_` families where overflow must be observed.
///
/// # Compile-time checks
///
/// Zero fractional bits:
///
/// ```compile_fail
/// use fx32::Fx32;
///
/// let v = Fx32::<0>::from_raw(1);
/// assert_eq!(v.to_raw(), 1);
/// ```
///
/// No integer bits left:
///
/// ```compile_fail
/// use fx32::Fx32;
///
/// let v = Fx32::<32>::from_raw(1);
/// assert_eq!(v.to_raw(), 1);
/// ```
///
/// A quantization limit of zero:
///
/// ```compile_fail
/// use fx32::Q24_8;
///
/// let v = Q24_8::from_quantized::<0>(1, 0);
/// assert_eq!(v.resolve(), 1);
/// ```
///
/// A quantization limit past 65536:
///
/// ```compile_fail
/// use fx32::Q24_8;
///
/// let v = Q24_8::from_quantized::<65537>(1, 0);
/// assert_eq!(v.resolve(), 1);
/// ```
///
/// 1.0 with 31 fractional bits:
///
/// ```compile_fail
/// use fx32::Fx32;
///
/// let one = Fx32::<31>::ONE;
/// assert!(one.is_positive());
/// ```
///
/// The same calls at the edges of the valid ranges compile:
///
/// ```
/// use fx32::{Fx32, Q24_8};
///
/// assert_eq!(Fx32::<1>::from_raw(1).to_f32(), 0.5);
/// assert_eq!(Fx32::<31>::from_raw(1 << 30).to_f64(), 0.5);
/// assert_eq!(Q24_8::from_quantized::<1>(1, 0).resolve(), 1);
/// assert_eq!(Q24_8::from_quantized::<65536>(1, 32768).to_f32(), 1.5);
/// assert_eq!(Fx32::<30>::ONE.to_raw(), 1 << 30);
///
/// let default: Fx32 = Q24_8::from_decimal(1, 500);
/// assert_eq!(<Fx32>::FRAC_BITS, 8);
/// assert_eq!(default.to_f32(), 1.5);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Fx32<const F: u32 = 8> {
    value: i32,
}

/// 24 whole bits, 8 fractional bits. The default split, same as a bare `Fx32`.
pub type Q24_8 = Fx32;

/// 16 whole bits, 16 fractional bits.
pub type Q16_16 = Fx32<16>;

/// 8 whole bits, 24 fractional bits.
pub type Q8_24 = Fx32<24>;

/// Algorithm used to rescale products and quotients.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArithMode {
    /// Widen both operands to `i64`, rescale, then narrow back to `i32`.
    #[default]
    Widened,
    /// Stay in `i32` throughout. Faster on 32-bit targets, but the
    /// intermediate product wraps once the whole parts multiply past
    /// `2^(31 - 2F)`, and the pre-shifted dividend wraps once the dividend
    /// itself passes that bound.
    Native,
}

// ============================================================================
// Constants
// ============================================================================

impl<const F: u32> Fx32<F> {
    const VALID: () = assert!(F > 0 && F < 32, "Fx32 requires 0 < F < 32 fractional bits");

    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = F;

    /// The scale factor 2^F. Kept in `i64` since 2^31 does not fit an `i32`.
    const SCALE: i64 = {
        let () = Self::VALID;
        1 << F
    };

    const SCALE_F32: f32 = Self::SCALE as f32;
    const SCALE_F64: f64 = Self::SCALE as f64;

    /// Raw value of one half, 2^(F-1).
    const HALF_RAW: i64 = Self::SCALE >> 1;

    /// Mask selecting the fractional bits of the raw value.
    pub const MASK: i32 = (Self::SCALE - 1) as i32;

    /// Smallest whole number [`Fx32::new`] accepts.
    pub const MIN_WHOLE: i32 = i32::MIN >> F;

    /// Largest whole number [`Fx32::new`] accepts.
    pub const MAX_WHOLE: i32 = i32::MAX >> F;

    /// Zero
    pub const ZERO: Self = Self::from_raw(0);

    /// One (1.0)
    ///
    /// Not representable with 31 fractional bits; using it on `Fx32<31>` is
    /// a compile error.
    pub const ONE: Self = {
        assert!(F < 31, "1.0 is not representable with 31 fractional bits");
        Self::from_raw(1 << F)
    };

    /// One half (0.5)
    pub const HALF: Self = Self::from_raw(Self::HALF_RAW as i32);

    /// Smallest positive value, 2^-F.
    pub const DELTA: Self = Self::from_raw(1);

    /// Maximum value
    pub const MAX: Self = Self::from_raw(i32::MAX);

    /// Minimum value
    pub const MIN: Self = Self::from_raw(i32::MIN);
}

// ============================================================================
// Constructors and Raw Access
// ============================================================================

impl<const F: u32> Default for Fx32<F> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const F: u32> Fx32<F> {
    /// Creates a value from its raw scaled representation.
    #[inline(always)]
    pub const fn from_raw(value: i32) -> Self {
        let () = Self::VALID;
        Self { value }
    }

    /// Returns the raw internal value (scaled by 2^F).
    #[inline(always)]
    pub const fn to_raw(self) -> i32 {
        self.value
    }

    /// Creates a value from a whole part and raw fractional bits:
    /// `(whole << F) | frac`.
    ///
    /// `frac` is OR-ed into the low bits regardless of the sign of `whole`,
    /// so `new(-1, 64)` on `Q24_8` is `-1 + 0.25 = -0.75`.
    ///
    /// # Panics
    /// Panics if `frac >= 2^F` or `whole` lies outside
    /// `MIN_WHOLE..=MAX_WHOLE`.
    pub const fn new(whole: i32, frac: u32) -> Self {
        match Self::try_new(whole, frac) {
            Ok(v) => v,
            Err(FixedError::FractionOutOfRange) => {
                panic!("fraction out of range in Fx32::new: must be below 2^F")
            }
            Err(_) => panic!("overflow in Fx32::new: whole part out of range"),
        }
    }

    /// Creates a value from a whole part and raw fractional bits, returning
    /// an error instead of panicking.
    pub const fn try_new(whole: i32, frac: u32) -> crate::Result<Self> {
        if frac as i64 >= Self::SCALE {
            return Err(FixedError::FractionOutOfRange);
        }
        if whole > Self::MAX_WHOLE {
            return Err(FixedError::Overflow);
        }
        if whole < Self::MIN_WHOLE {
            return Err(FixedError::Underflow);
        }

        Ok(Self::from_raw((whole << F) | frac as i32))
    }

    /// Creates a value from a whole part and a fraction in thousandths.
    /// Example: `from_decimal(1, 250)` → 1.25
    ///
    /// The fraction is quantized down to the nearest multiple of 2^-F.
    ///
    /// # Panics
    /// Panics if `frac >= 1000` or `whole` is out of range.
    pub const fn from_decimal(whole: i32, frac: u32) -> Self {
        Self::from_quantized::<DEFAULT_QUANTIZATION>(whole, frac)
    }

    /// Like [`from_decimal`](Self::from_decimal) but returns an error
    /// instead of panicking.
    pub const fn try_from_decimal(whole: i32, frac: u32) -> crate::Result<Self> {
        Self::try_from_quantized::<DEFAULT_QUANTIZATION>(whole, frac)
    }

    /// Creates a value from a whole part and a fraction expressed as
    /// `frac / Q`.
    ///
    /// `Q` must satisfy `0 < Q <= 65536`, checked at compile time.
    ///
    /// # Panics
    /// Panics if `frac >= Q` or `whole` is out of range.
    pub const fn from_quantized<const Q: u32>(whole: i32, frac: u32) -> Self {
        match Self::try_from_quantized::<Q>(whole, frac) {
            Ok(v) => v,
            Err(FixedError::FractionOutOfRange) => {
                panic!("fraction out of range in Fx32::from_quantized: must be below Q")
            }
            Err(_) => panic!("overflow in Fx32::from_quantized: whole part out of range"),
        }
    }

    /// Creates a value from a whole part and a fraction expressed as
    /// `frac / Q`, returning an error instead of panicking.
    pub const fn try_from_quantized<const Q: u32>(whole: i32, frac: u32) -> crate::Result<Self> {
        const {
            assert!(
                Q > 0 && Q <= MAX_QUANTIZATION,
                "quantization limit must be in 1..=65536"
            )
        };

        if frac >= Q {
            return Err(FixedError::FractionOutOfRange);
        }

        Self::try_new(whole, Self::quantize(frac, Q))
    }

    /// Rescales `frac / q` to `F` fractional bits, rounding down.
    ///
    /// frac < 2^16, SCALE <= 2^31 and 16 guard bits keep the numerator below 2^63.
    #[inline(always)]
    const fn quantize(frac: u32, q: u32) -> u32 {
        let rescaled = ((frac as u64 * Self::SCALE as u64) << GUARD_BITS) / q as u64;
        (rescaled >> GUARD_BITS) as u32
    }
}

// ============================================================================
// Arithmetic Operations - Addition
// ============================================================================

impl<const F: u32> Fx32<F> {
    /// Checked addition. Returns `None` if overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.value.checked_add(rhs.value) {
            Some(value) => Some(Self { value }),
            None => None,
        }
    }

    /// Saturating addition. Clamps on overflow.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self {
            value: self.value.saturating_add(rhs.value),
        }
    }

    /// Wrapping addition. Wraps on overflow.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        Self {
            value: self.value.wrapping_add(rhs.value),
        }
    }

    /// Checked addition. Returns an error if overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn try_add(self, rhs: Self) -> crate::Result<Self> {
        match self.checked_add(rhs) {
            Some(result) => Ok(result),
            None => Err(FixedError::Overflow),
        }
    }
}

// ============================================================================
// Arithmetic Operations - Subtraction
// ============================================================================

impl<const F: u32> Fx32<F> {
    /// Checked subtraction. Returns `None` if overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.value.checked_sub(rhs.value) {
            Some(value) => Some(Self { value }),
            None => None,
        }
    }

    /// Saturating subtraction. Clamps on overflow.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self {
            value: self.value.saturating_sub(rhs.value),
        }
    }

    /// Wrapping subtraction. Wraps on overflow.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        Self {
            value: self.value.wrapping_sub(rhs.value),
        }
    }

    /// Checked subtraction. Returns an error if overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn try_sub(self, rhs: Self) -> crate::Result<Self> {
        match self.checked_sub(rhs) {
            Some(result) => Ok(result),
            None => Err(FixedError::Overflow),
        }
    }
}

// ============================================================================
// Arithmetic Operations - Multiplication
// ============================================================================

impl<const F: u32> Fx32<F> {
    /// `(a * b) >> F` in i64. |a * b| <= 2^62, so the product cannot overflow.
    #[inline(always)]
    const fn widened_mul(a: i32, b: i32) -> i64 {
        (a as i64 * b as i64) >> F
    }

    /// Narrows a widened result, returning None if it doesn't fit in i32.
    #[inline(always)]
    const fn narrow(wide: i64) -> Option<Self> {
        if wide > i32::MAX as i64 || wide < i32::MIN as i64 {
            None
        } else {
            Some(Self { value: wide as i32 })
        }
    }

    /// Checked multiplication. Returns `None` if the product doesn't fit.
    ///
    /// The rescale shift rounds toward negative infinity.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_mul(self, rhs: Self) -> Option<Self> {
        Self::narrow(Self::widened_mul(self.value, rhs.value))
    }

    /// Saturating multiplication. Clamps on overflow.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn saturating_mul(self, rhs: Self) -> Self {
        let wide = Self::widened_mul(self.value, rhs.value);
        match Self::narrow(wide) {
            Some(result) => result,
            None => {
                if wide > 0 {
                    Self::MAX
                } else {
                    Self::MIN
                }
            }
        }
    }

    /// Wrapping multiplication. Rescales in i64, then truncates to i32.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_mul(self, rhs: Self) -> Self {
        Self {
            value: Self::widened_mul(self.value, rhs.value) as i32,
        }
    }

    /// Checked multiplication. Returns an error if overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn try_mul(self, rhs: Self) -> crate::Result<Self> {
        match self.checked_mul(rhs) {
            Some(result) => Ok(result),
            None => Err(FixedError::Overflow),
        }
    }

    /// Multiplication entirely in i32: `(a * b) >> F`, wrapping.
    ///
    /// The intermediate product is scaled by 2^(2F) and overflows long
    /// before the result would. Only use it when both operands are known
    /// to be small.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn mul_native(self, rhs: Self) -> Self {
        Self {
            value: self.value.wrapping_mul(rhs.value) >> F,
        }
    }

    /// Multiplies with an explicitly chosen algorithm. Both wrap on overflow.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn mul_with(self, rhs: Self, mode: ArithMode) -> Self {
        match mode {
            ArithMode::Widened => self.wrapping_mul(rhs),
            ArithMode::Native => self.mul_native(rhs),
        }
    }

    /// Multiply by an integer, without rescaling.
    pub const fn mul_i32(self, rhs: i32) -> Option<Self> {
        match self.value.checked_mul(rhs) {
            Some(value) => Some(Self { value }),
            None => None,
        }
    }
}

// ============================================================================
// Arithmetic Operations - Division
// ============================================================================

impl<const F: u32> Fx32<F> {
    /// `(a << F) / b` in i64. |a << F| <= 2^62, so neither the shift nor
    /// the division can overflow. Truncates toward zero.
    #[inline(always)]
    const fn widened_div(a: i32, b: i32) -> i64 {
        ((a as i64) << F) / b as i64
    }

    /// Checked division. Returns `None` if `rhs` is zero or overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.value == 0 {
            return None;
        }
        Self::narrow(Self::widened_div(self.value, rhs.value))
    }

    /// Saturating division. Clamps on overflow.
    ///
    /// # Panics
    /// Panics if `rhs` is zero, like [`i32::saturating_div`]. Use
    /// [`try_div`](Self::try_div) to get [`FixedError::DivisionByZero`] instead.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn saturating_div(self, rhs: Self) -> Self {
        assert!(rhs.value != 0, "attempt to divide by zero");

        let wide = Self::widened_div(self.value, rhs.value);
        match Self::narrow(wide) {
            Some(result) => result,
            None => {
                if wide > 0 {
                    Self::MAX
                } else {
                    Self::MIN
                }
            }
        }
    }

    /// Wrapping division. Wraps on overflow.
    ///
    /// # Panics
    /// Panics if `rhs` is zero, like [`i32::wrapping_div`].
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_div(self, rhs: Self) -> Self {
        assert!(rhs.value != 0, "attempt to divide by zero");
        Self {
            value: Self::widened_div(self.value, rhs.value) as i32,
        }
    }

    /// Checked division. Returns an error if `rhs` is zero or overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn try_div(self, rhs: Self) -> crate::Result<Self> {
        if rhs.value == 0 {
            return Err(FixedError::DivisionByZero);
        }
        match self.checked_div(rhs) {
            Some(result) => Ok(result),
            None => Err(FixedError::Overflow),
        }
    }

    /// Division entirely in i32: `(a << F) / b`, wrapping.
    ///
    /// The pre-shift of the dividend drops its top `F` bits, so any
    /// `|self| >= 2^(31 - 2F)` in whole units gives a wrong quotient.
    /// Returns an error only for a zero divisor.
    #[inline(always)]
    pub const fn try_div_native(self, rhs: Self) -> crate::Result<Self> {
        if rhs.value == 0 {
            return Err(FixedError::DivisionByZero);
        }
        Ok(Self {
            value: (self.value << F).wrapping_div(rhs.value),
        })
    }

    /// Divides with an explicitly chosen algorithm.
    ///
    /// Both algorithms wrap on overflow; the only error is a zero divisor.
    /// Use [`try_div`](Self::try_div) to also detect overflow.
    #[inline(always)]
    pub const fn div_with(self, rhs: Self, mode: ArithMode) -> crate::Result<Self> {
        if rhs.value == 0 {
            return Err(FixedError::DivisionByZero);
        }
        match mode {
            ArithMode::Widened => Ok(self.wrapping_div(rhs)),
            ArithMode::Native => self.try_div_native(rhs),
        }
    }

    /// Divide by an integer, without rescaling. Returns `None` if `rhs` is
    /// zero or the quotient overflows.
    pub const fn div_i32(self, rhs: i32) -> Option<Self> {
        match self.value.checked_div(rhs) {
            Some(value) => Some(Self { value }),
            None => None,
        }
    }
}

// ============================================================================
// Arithmetic Operations - Negation and Absolute Value
// ============================================================================

impl<const F: u32> Fx32<F> {
    /// Checked negation. Returns `None` for `MIN`.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_neg(self) -> Option<Self> {
        match self.value.checked_neg() {
            Some(value) => Some(Self { value }),
            None => None,
        }
    }

    /// Wrapping negation. `MIN` stays `MIN`.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn wrapping_neg(self) -> Self {
        Self {
            value: self.value.wrapping_neg(),
        }
    }

    /// Returns the absolute value of `self`. `MIN` wraps to `MIN`.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn abs(self) -> Self {
        Self {
            value: self.value.wrapping_abs(),
        }
    }

    /// Checked absolute value. Returns `None` for `MIN`.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_abs(self) -> Option<Self> {
        match self.value.checked_abs() {
            Some(value) => Some(Self { value }),
            None => None,
        }
    }
}

// ============================================================================
// Sign Operations
// ============================================================================

impl<const F: u32> Fx32<F> {
    /// Returns `true` if `self` is positive.
    #[inline(always)]
    pub const fn is_positive(self) -> bool {
        self.value > 0
    }

    /// Returns `true` if `self` is negative.
    #[inline(always)]
    pub const fn is_negative(self) -> bool {
        self.value < 0
    }

    /// Returns `true` if `self` is zero.
    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Returns the sign of `self` as -1, 0, or 1.
    #[inline(always)]
    pub const fn signum(self) -> i32 {
        self.value.signum()
    }
}

// ============================================================================
// Rounding Operations
// ============================================================================

impl<const F: u32> Fx32<F> {
    /// Returns the largest integer less than or equal to `self`.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn floor(self) -> Self {
        Self {
            value: self.value & !Self::MASK,
        }
    }

    /// Returns the smallest integer greater than or equal to `self`.
    ///
    /// Integral values are returned unchanged. Values above the largest
    /// representable integer wrap to `MIN`; see [`checked_ceil`](Self::checked_ceil).
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn ceil(self) -> Self {
        Self {
            value: self.value.wrapping_add(Self::MASK) & !Self::MASK,
        }
    }

    /// Checked ceiling. Returns `None` if the result is not representable.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn checked_ceil(self) -> Option<Self> {
        match self.value.checked_add(Self::MASK) {
            Some(value) => Some(Self {
                value: value & !Self::MASK,
            }),
            None => None,
        }
    }

    /// Returns the integer part of `self`, rounding toward zero.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn trunc(self) -> Self {
        if self.value < 0 {
            self.ceil()
        } else {
            self.floor()
        }
    }

    /// Returns the fractional bits of `self` as a non-negative value.
    ///
    /// `floor(x) + fract(x) == x` for every `x`.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn fract(self) -> Self {
        Self {
            value: self.value & Self::MASK,
        }
    }

    /// Rounds to the nearest integer, halves toward positive infinity.
    /// Wraps if the result exceeds the representable range.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn round(self) -> Self {
        let rounded = (self.value as i64 + Self::HALF_RAW) & !(Self::MASK as i64);
        Self {
            value: rounded as i32,
        }
    }

    /// Resolves to the nearest whole number, halves toward positive infinity:
    /// `(v + HALF) >> F`.
    ///
    /// This is the default whole-number conversion. Computed in i64, so it
    /// is total over the whole range.
    #[inline(always)]
    pub const fn resolve(self) -> i32 {
        ((self.value as i64 + Self::HALF_RAW) >> F) as i32
    }

    /// Resolves to a whole number by dropping the fractional bits: `v >> F`.
    ///
    /// The arithmetic shift rounds toward negative infinity, so `-1.25`
    /// resolves to `-2`.
    #[inline(always)]
    pub const fn resolve_floor(self) -> i32 {
        self.value >> F
    }
}

// ============================================================================
// Mathematical Operations
// ============================================================================

impl<const F: u32> Fx32<F> {
    /// Returns the reciprocal of `self`.
    ///
    /// Returns `None` if `self` is zero or the result overflows.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn recip(self) -> Option<Self> {
        Self::ONE.checked_div(self)
    }

    /// Checked reciprocal. Returns an error if `self` is zero or the result overflows.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn try_recip(self) -> crate::Result<Self> {
        Self::ONE.try_div(self)
    }
}

// ============================================================================
// Integer Conversions
// ============================================================================

impl<const F: u32> Fx32<F> {
    /// Creates a value from a whole number. Returns `None` if out of range.
    #[inline(always)]
    pub const fn from_i32(whole: i32) -> Option<Self> {
        match Self::try_new(whole, 0) {
            Ok(v) => Some(v),
            Err(_) => None,
        }
    }

    /// Creates a value from a whole number, returning an error if out of range.
    #[inline(always)]
    pub const fn try_from_i32(whole: i32) -> crate::Result<Self> {
        Self::try_new(whole, 0)
    }
}

// ============================================================================
// Float Conversions
// ============================================================================

impl<const F: u32> Fx32<F> {
    /// Creates a value from an f32 by scaling and truncating toward zero.
    ///
    /// The float-to-int cast saturates: values beyond the range clamp to
    /// `MIN`/`MAX` and NaN becomes zero. Use [`try_from_f32`](Self::try_from_f32)
    /// to reject those inputs.
    #[inline(always)]
    pub fn from_f32(value: f32) -> Self {
        Self {
            value: (value * Self::SCALE_F32) as i32,
        }
    }

    /// Converts to f32. Exact while the raw value fits the f32 mantissa.
    #[inline(always)]
    pub fn to_f32(self) -> f32 {
        self.value as f32 / Self::SCALE_F32
    }

    /// Creates a value from an f64 by scaling and truncating toward zero.
    ///
    /// Saturates like [`from_f32`](Self::from_f32).
    #[inline(always)]
    pub fn from_f64(value: f64) -> Self {
        Self {
            value: (value * Self::SCALE_F64) as i32,
        }
    }

    /// Converts to f64. Always exact.
    #[inline(always)]
    pub fn to_f64(self) -> f64 {
        self.value as f64 / Self::SCALE_F64
    }

    /// Creates a value from an f32, returning an error if invalid.
    #[inline(always)]
    pub fn try_from_f32(value: f32) -> crate::Result<Self> {
        // Scaling by 2^F is exact in both widths, so f64 truncates identically.
        Self::try_from_f64(value as f64)
    }

    /// Creates a value from an f64, returning an error if invalid.
    #[inline(always)]
    pub fn try_from_f64(value: f64) -> crate::Result<Self> {
        if !value.is_finite() {
            return Err(FixedError::NotFinite);
        }

        let scaled = value * Self::SCALE_F64;

        // Truncation toward zero: anything in (i32::MIN - 1, i32::MAX + 1) fits.
        if scaled >= 2_147_483_648.0 {
            return Err(FixedError::Overflow);
        }
        if scaled <= -2_147_483_649.0 {
            return Err(FixedError::Underflow);
        }

        Ok(Self {
            value: scaled as i32,
        })
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl<const F: u32> Add for Fx32<F> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        self.wrapping_add(rhs)
    }
}

impl<const F: u32> Sub for Fx32<F> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.wrapping_sub(rhs)
    }
}

impl<const F: u32> Mul for Fx32<F> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        self.wrapping_mul(rhs)
    }
}

impl<const F: u32> Div for Fx32<F> {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        self.wrapping_div(rhs)
    }
}

impl<const F: u32> Neg for Fx32<F> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.wrapping_neg()
    }
}

impl<const F: u32> AddAssign for Fx32<F> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const F: u32> SubAssign for Fx32<F> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const F: u32> MulAssign for Fx32<F> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const F: u32> DivAssign for Fx32<F> {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

// ============================================================================
// Standard Library Trait Implementations
// ============================================================================

impl<const F: u32> TryFrom<i32> for Fx32<F> {
    type Error = FixedError;

    #[inline(always)]
    fn try_from(value: i32) -> crate::Result<Self> {
        Self::try_from_i32(value)
    }
}

impl<const F: u32> TryFrom<f32> for Fx32<F> {
    type Error = FixedError;

    #[inline(always)]
    fn try_from(value: f32) -> crate::Result<Self> {
        Self::try_from_f32(value)
    }
}

impl<const F: u32> TryFrom<f64> for Fx32<F> {
    type Error = FixedError;

    #[inline(always)]
    fn try_from(value: f64) -> crate::Result<Self> {
        Self::try_from_f64(value)
    }
}

impl<const F: u32> From<Fx32<F>> for f32 {
    #[inline(always)]
    fn from(value: Fx32<F>) -> Self {
        value.to_f32()
    }
}

impl<const F: u32> From<Fx32<F>> for f64 {
    #[inline(always)]
    fn from(value: Fx32<F>) -> Self {
        value.to_f64()
    }
}

impl<const F: u32> fmt::Debug for Fx32<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // {:#?} shows raw internals
            f.debug_struct("Fx32")
                .field("frac_bits", &F)
                .field("value", &self.value)
                .finish()
        } else {
            write!(f, "Fx32<{}>({:?})", F, self.to_f64())
        }
    }
}

// ============================================================================
// Iterator Trait Implementations
// ============================================================================

impl<const F: u32> Sum for Fx32<F> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<'a, const F: u32> Sum<&'a Fx32<F>> for Fx32<F> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + *x)
    }
}

impl<const F: u32> Product for Fx32<F> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<'a, const F: u32> Product<&'a Fx32<F>> for Fx32<F> {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * *x)
    }
}

// ============================================================================
// Serde Support
// ============================================================================

// Always the raw i32: there is no textual form, and the raw bits are only
// meaningful to a reader using the same F.
#[cfg(feature = "serde")]
impl<const F: u32> Serialize for Fx32<F> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, const F: u32> Deserialize<'de> for Fx32<F> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        Ok(Self::from_raw(value))
    }
}


#[cfg(test)]
mod construction_tests {
    use super::*;

    #[test]
    fn test_new_packs_raw_fraction() {
        assert_eq!(Q24_8::new(1, 64).to_raw(), 320); // 1.25
        assert_eq!(Q24_8::new(0, 192).to_raw(), 192); // 0.75
        assert_eq!(Q24_8::new(5, 0).to_raw(), 1280);
    }

    #[test]
    fn test_new_negative_whole_ors_fraction() {
        // -1 + 64/256
        assert_eq!(Q24_8::new(-1, 64).to_f32(), -0.75);
        assert_eq!(Q24_8::new(-3, 0).to_raw(), -768);
    }

    #[test]
    fn test_new_is_const() {
        const QUARTER: Q24_8 = Q24_8::new(0, 64);
        const TENTH: Q24_8 = Q24_8::from_decimal(0, 100);
        assert_eq!(QUARTER.to_f32(), 0.25);
        assert_eq!(TENTH.to_raw(), 25);
    }

    #[test]
    fn test_try_new_fraction_out_of_range() {
        assert_eq!(Q24_8::try_new(0, 256), Err(FixedError::FractionOutOfRange));
        assert_eq!(Q24_8::try_new(0, 255).map(Q24_8::to_raw), Ok(255));
    }

    #[test]
    fn test_try_new_whole_out_of_range() {
        assert_eq!(
            Q24_8::try_new(Q24_8::MAX_WHOLE + 1, 0),
            Err(FixedError::Overflow)
        );
        assert_eq!(
            Q24_8::try_new(Q24_8::MIN_WHOLE - 1, 0),
            Err(FixedError::Underflow)
        );
        assert_eq!(
            Q24_8::try_new(Q24_8::MAX_WHOLE, 255).map(Q24_8::to_raw),
            Ok(i32::MAX)
        );
        assert_eq!(
            Q24_8::try_new(Q24_8::MIN_WHOLE, 0).map(Q24_8::to_raw),
            Ok(i32::MIN)
        );
    }

    #[test]
    #[should_panic(expected = "fraction out of range")]
    fn test_new_panics_on_wide_fraction() {
        let _ = Q24_8::new(1, 300);
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn test_new_panics_on_large_whole() {
        let _ = Q24_8::new(i32::MAX, 0);
    }

    #[test]
    fn test_from_decimal_thousandths() {
        assert_eq!(Q24_8::from_decimal(1, 250).to_raw(), 320);
        assert_eq!(Q24_8::from_decimal(0, 750).to_raw(), 192);
        assert_eq!(Q24_8::from_decimal(1, 500).to_raw(), 384);
        assert_eq!(Q24_8::from_decimal(7, 0), Q24_8::new(7, 0));
    }

    #[test]
    fn test_from_decimal_quantizes_down() {
        // 0.001 * 256 = 0.256 -> 0
        assert_eq!(Q24_8::from_decimal(0, 1).to_raw(), 0);
        // 0.999 * 256 = 255.744 -> 255
        assert_eq!(Q24_8::from_decimal(0, 999).to_raw(), 255);
        // 0.001 * 65536 = 65.536 -> 65
        assert_eq!(Q16_16::from_decimal(0, 1).to_raw(), 65);
    }

    #[test]
    fn test_from_decimal_is_independent_of_frac_bits() {
        assert_eq!(Q16_16::from_decimal(1, 250).to_f32(), 1.25);
        assert_eq!(Q8_24::from_decimal(1, 250).to_f32(), 1.25);
        assert_eq!(Fx32::<31>::from_decimal(0, 500).to_raw(), 1 << 30);
    }

    #[test]
    fn test_try_from_decimal_rejects_full_unit() {
        assert_eq!(
            Q24_8::try_from_decimal(0, 1000),
            Err(FixedError::FractionOutOfRange)
        );
    }

    #[test]
    #[should_panic(expected = "fraction out of range")]
    fn test_from_decimal_panics_on_full_unit() {
        let _ = Q24_8::from_decimal(2, 1000);
    }

    #[test]
    fn test_from_quantized_custom_limits() {
        // hundredths
        assert_eq!(Q24_8::from_quantized::<100>(2, 50).to_f32(), 2.5);
        // sixteenths map exactly onto 8 fractional bits
        assert_eq!(Q24_8::from_quantized::<16>(0, 3).to_raw(), 48);
        // the largest limit: raw 16-bit fractions
        assert_eq!(Q16_16::from_quantized::<65536>(0, 12_345).to_raw(), 12_345);
        assert_eq!(
            Q24_8::try_from_quantized::<100>(0, 100),
            Err(FixedError::FractionOutOfRange)
        );
    }

    #[test]
    fn test_from_i32() {
        assert_eq!(Q24_8::from_i32(5), Some(Q24_8::new(5, 0)));
        assert_eq!(Q24_8::from_i32(-5).map(Q24_8::to_raw), Some(-1280));
        assert_eq!(Q24_8::from_i32(Q24_8::MAX_WHOLE + 1), None);
        assert_eq!(Q16_16::try_from_i32(40_000), Err(FixedError::Overflow));
        assert_eq!(Q16_16::try_from(-40_000i32), Err(FixedError::Underflow));
    }
}

#[cfg(test)]
mod conversion_tests {
    use super::*;

    #[test]
    fn test_to_f32_exact() {
        assert_eq!(Q24_8::new(1, 64).to_f32(), 1.25);
        assert_eq!(Q24_8::from_raw(-384).to_f32(), -1.5);
        assert_eq!(f32::from(Q24_8::HALF), 0.5);
    }

    #[test]
    fn test_to_f32_approximation() {
        let v = Q24_8::new(0, 255).to_f32();
        assert!((0.99..=1.0).contains(&v));
    }

    #[test]
    fn test_from_f32_whole() {
        assert_eq!(Q24_8::from_f32(5.0), Q24_8::new(5, 0));
        assert_eq!(Q24_8::from_f32(-5.0), Q24_8::from_i32(-5).unwrap());
        assert_eq!(Q16_16::from_f32(5.0), Q16_16::new(5, 0));
    }

    #[test]
    fn test_from_f32_truncates_toward_zero() {
        // 0.999 * 256 = 255.744
        assert_eq!(Q24_8::from_f32(0.999).to_raw(), 255);
        assert_eq!(Q24_8::from_f32(-0.999).to_raw(), -255);
    }

    #[test]
    fn test_from_f32_saturates() {
        assert_eq!(Q24_8::from_f32(f32::NAN), Q24_8::ZERO);
        assert_eq!(Q24_8::from_f32(f32::INFINITY), Q24_8::MAX);
        assert_eq!(Q24_8::from_f32(-1.0e12), Q24_8::MIN);
    }

    #[test]
    fn test_try_from_f32_errors() {
        assert_eq!(Q24_8::try_from_f32(f32::NAN), Err(FixedError::NotFinite));
        assert_eq!(
            Q24_8::try_from_f32(f32::NEG_INFINITY),
            Err(FixedError::NotFinite)
        );
        assert_eq!(Q24_8::try_from_f32(1.0e10), Err(FixedError::Overflow));
        assert_eq!(Q24_8::try_from_f32(-1.0e10), Err(FixedError::Underflow));
        assert_eq!(Q24_8::try_from(2.5f32), Ok(Q24_8::from_decimal(2, 500)));
    }

    #[test]
    fn test_try_from_f64_boundaries() {
        assert_eq!(
            Q24_8::try_from_f64(8_388_607.996_093_75),
            Ok(Q24_8::MAX)
        );
        assert_eq!(Q24_8::try_from_f64(8_388_608.0), Err(FixedError::Overflow));
        assert_eq!(Q24_8::try_from_f64(-8_388_608.0), Ok(Q24_8::MIN));
        // truncates back into range
        assert_eq!(Q24_8::try_from_f64(-8_388_608.001), Ok(Q24_8::MIN));
        assert_eq!(
            Q24_8::try_from_f64(-8_388_608.004),
            Err(FixedError::Underflow)
        );
    }

    #[test]
    fn test_f64_round_trip_is_exact() {
        for raw in [i32::MIN, -1, 0, 1, 12_345_678, i32::MAX] {
            let v = Q24_8::from_raw(raw);
            assert_eq!(Q24_8::from_f64(v.to_f64()), v);
            assert_eq!(f64::from(v), v.to_f64());
        }
    }

    #[test]
    fn test_resolve_rounds_to_nearest() {
        assert_eq!(Q24_8::from_decimal(2, 250).resolve(), 2);
        assert_eq!(Q24_8::from_decimal(2, 500).resolve(), 3);
        assert_eq!(Q24_8::from_decimal(2, 750).resolve(), 3);
        assert_eq!(Q24_8::from_f32(-1.25).resolve(), -1);
        // halves go toward positive infinity
        assert_eq!(Q24_8::from_f32(-1.5).resolve(), -1);
        assert_eq!(Q24_8::from_f32(-1.75).resolve(), -2);
    }

    #[test]
    fn test_resolve_floor_drops_fraction() {
        assert_eq!(Q24_8::from_decimal(2, 750).resolve_floor(), 2);
        assert_eq!(Q24_8::from_f32(-1.25).resolve_floor(), -2);
        assert_eq!(Q24_8::from_i32(-3).unwrap().resolve_floor(), -3);
    }

    #[test]
    fn test_resolve_policies_diverge() {
        let v = Q24_8::from_decimal(2, 500);
        assert_ne!(v.resolve(), v.resolve_floor());

        // both agree on whole values
        let whole = Q24_8::from_i32(5).unwrap();
        assert_eq!(whole.resolve(), 5);
        assert_eq!(whole.resolve_floor(), 5);
    }

    #[test]
    fn test_resolve_at_extremes() {
        assert_eq!(Q24_8::MAX.resolve(), 8_388_608);
        assert_eq!(Q24_8::MAX.resolve_floor(), 8_388_607);
        assert_eq!(Q24_8::MIN.resolve(), -8_388_608);
        assert_eq!(Fx32::<31>::MAX.resolve(), 1);
    }

    #[test]
    fn test_debug_format() {
        use std::format;

        let v = Q24_8::from_decimal(1, 500);
        assert_eq!(format!("{:?}", v), "Fx32<8>(1.5)");
        assert_eq!(
            format!("{:#?}", v),
            "Fx32 {\n    frac_bits: 8,\n    value: 384,\n}"
        );
    }
}
