//! Canonical theory values stored inside value terms

use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::fmt;

/// Fixed-width bit-vector value, stored as an unsigned integer below `2^width`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BvValue {
    width: u32,
    bits: BigUint,
}

impl BvValue {
    /// Build a value, reducing `bits` modulo `2^width`
    #[must_use]
    pub fn new(width: u32, bits: BigUint) -> Self {
        debug_assert!(width > 0);
        let bits = if bits.bits() > u64::from(width) {
            bits & Self::mask(width)
        } else {
            bits
        };
        Self { width, bits }
    }

    /// All bits zero
    #[must_use]
    pub fn zero(width: u32) -> Self {
        Self::new(width, BigUint::zero())
    }

    /// Value one
    #[must_use]
    pub fn one(width: u32) -> Self {
        Self::new(width, BigUint::one())
    }

    /// All bits one
    #[must_use]
    pub fn ones(width: u32) -> Self {
        Self::new(width, Self::mask(width))
    }

    /// Smallest signed value: `1` followed by `width - 1` zeros
    #[must_use]
    pub fn min_signed(width: u32) -> Self {
        Self::new(width, BigUint::one() << (width - 1))
    }

    /// Largest signed value: `0` followed by `width - 1` ones
    #[must_use]
    pub fn max_signed(width: u32) -> Self {
        Self::new(width, Self::mask(width - 1))
    }

    /// Boolean as a width-1 value
    #[must_use]
    pub fn from_bool(b: bool) -> Self {
        if b { Self::one(1) } else { Self::zero(1) }
    }

    /// `2^width - 1`
    #[must_use]
    pub fn mask(width: u32) -> BigUint {
        (BigUint::one() << width) - BigUint::one()
    }

    /// Width in bits
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Unsigned interpretation
    #[must_use]
    pub fn bits(&self) -> &BigUint {
        &self.bits
    }

    /// Bit at position `i` (0 = least significant)
    #[must_use]
    pub fn bit(&self, i: u32) -> bool {
        self.bits.bit(u64::from(i))
    }

    /// True iff all bits are zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.bits.is_zero()
    }

    /// Width-1 value read as a Boolean
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        (self.width == 1).then(|| !self.bits.is_zero())
    }

    /// Binary digits, most significant first, padded to the width
    #[must_use]
    pub fn to_bin_string(&self) -> String {
        (0..self.width)
            .rev()
            .map(|i| if self.bit(i) { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for BvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#b{}", self.to_bin_string())
    }
}

/// Floating-point format: exponent and significand widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FpFormat {
    /// Exponent width
    pub exponent: u32,
    /// Significand width including the hidden bit
    pub significand: u32,
}

impl FpFormat {
    /// IEEE binary16
    pub const FLOAT16: Self = Self::new(5, 11);
    /// IEEE binary32
    pub const FLOAT32: Self = Self::new(8, 24);
    /// IEEE binary64
    pub const FLOAT64: Self = Self::new(11, 53);

    /// Create a format
    #[must_use]
    pub const fn new(exponent: u32, significand: u32) -> Self {
        Self {
            exponent,
            significand,
        }
    }

    /// Exponent bias, `2^(e-1) - 1`
    #[must_use]
    pub const fn bias(self) -> i64 {
        (1i64 << (self.exponent - 1)) - 1
    }

    /// Width of the stored (trailing) significand field
    #[must_use]
    pub const fn trailing_bits(self) -> u32 {
        self.significand - 1
    }
}

/// Floating-point value in IEEE-754 interchange layout
///
/// All NaN payloads are folded into one canonical NaN by [`FpValue::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FpValue {
    format: FpFormat,
    sign: bool,
    exponent: BigUint,
    significand: BigUint,
}

impl FpValue {
    /// Build from sign, biased exponent field and trailing significand field
    #[must_use]
    pub fn new(format: FpFormat, sign: bool, exponent: BigUint, significand: BigUint) -> Self {
        let exponent = exponent & BvValue::mask(format.exponent);
        let significand = significand & BvValue::mask(format.trailing_bits());
        if exponent == BvValue::mask(format.exponent) && !significand.is_zero() {
            return Self::nan(format);
        }
        Self {
            format,
            sign,
            exponent,
            significand,
        }
    }

    /// +0
    #[must_use]
    pub fn pos_zero(format: FpFormat) -> Self {
        Self::zero(format, false)
    }

    /// -0
    #[must_use]
    pub fn neg_zero(format: FpFormat) -> Self {
        Self::zero(format, true)
    }

    /// Signed zero
    #[must_use]
    pub fn zero(format: FpFormat, sign: bool) -> Self {
        Self {
            format,
            sign,
            exponent: BigUint::zero(),
            significand: BigUint::zero(),
        }
    }

    /// +oo
    #[must_use]
    pub fn pos_infinity(format: FpFormat) -> Self {
        Self::infinity(format, false)
    }

    /// -oo
    #[must_use]
    pub fn neg_infinity(format: FpFormat) -> Self {
        Self::infinity(format, true)
    }

    /// Signed infinity
    #[must_use]
    pub fn infinity(format: FpFormat, sign: bool) -> Self {
        Self {
            format,
            sign,
            exponent: BvValue::mask(format.exponent),
            significand: BigUint::zero(),
        }
    }

    /// The canonical (quiet) NaN
    #[must_use]
    pub fn nan(format: FpFormat) -> Self {
        Self {
            format,
            sign: false,
            exponent: BvValue::mask(format.exponent),
            significand: BigUint::one() << (format.trailing_bits().saturating_sub(1)),
        }
    }

    /// Largest finite magnitude with the given sign
    #[must_use]
    pub fn max_finite(format: FpFormat, sign: bool) -> Self {
        Self {
            format,
            sign,
            exponent: BvValue::mask(format.exponent) - BigUint::one(),
            significand: BvValue::mask(format.trailing_bits()),
        }
    }

    /// Format of this value
    #[must_use]
    pub fn format(&self) -> FpFormat {
        self.format
    }

    /// Sign bit
    #[must_use]
    pub fn sign(&self) -> bool {
        self.sign
    }

    /// Biased exponent field
    #[must_use]
    pub fn exponent(&self) -> &BigUint {
        &self.exponent
    }

    /// Trailing significand field
    #[must_use]
    pub fn significand(&self) -> &BigUint {
        &self.significand
    }

    fn exponent_all_ones(&self) -> bool {
        self.exponent == BvValue::mask(self.format.exponent)
    }

    /// NaN
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.exponent_all_ones() && !self.significand.is_zero()
    }

    /// +oo or -oo
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        self.exponent_all_ones() && self.significand.is_zero()
    }

    /// +0 or -0
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.exponent.is_zero() && self.significand.is_zero()
    }

    /// +0
    #[must_use]
    pub fn is_pos_zero(&self) -> bool {
        self.is_zero() && !self.sign
    }

    /// -0
    #[must_use]
    pub fn is_neg_zero(&self) -> bool {
        self.is_zero() && self.sign
    }

    /// +oo
    #[must_use]
    pub fn is_pos_infinity(&self) -> bool {
        self.is_infinite() && !self.sign
    }

    /// -oo
    #[must_use]
    pub fn is_neg_infinity(&self) -> bool {
        self.is_infinite() && self.sign
    }

    /// Subnormal (denormal) number
    #[must_use]
    pub fn is_subnormal(&self) -> bool {
        self.exponent.is_zero() && !self.significand.is_zero()
    }

    /// Normal number
    #[must_use]
    pub fn is_normal(&self) -> bool {
        !self.exponent.is_zero() && !self.exponent_all_ones()
    }

    /// The three fields as bit-vector values (sign, exponent, trailing significand)
    #[must_use]
    pub fn to_bv_fields(&self) -> (BvValue, BvValue, BvValue) {
        (
            BvValue::from_bool(self.sign),
            BvValue::new(self.format.exponent, self.exponent.clone()),
            BvValue::new(self.format.trailing_bits(), self.significand.clone()),
        )
    }
}

impl fmt::Display for FpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let FpFormat {
            exponent,
            significand,
        } = self.format;
        if self.is_nan() {
            return write!(f, "(_ NaN {exponent} {significand})");
        }
        if self.is_infinite() {
            let sign = if self.sign { '-' } else { '+' };
            return write!(f, "(_ {sign}oo {exponent} {significand})");
        }
        let (s, e, m) = self.to_bv_fields();
        write!(f, "(fp {s} {e} {m})")
    }
}

/// IEEE-754 rounding modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoundingMode {
    /// Round to nearest, ties to even
    Rne,
    /// Round to nearest, ties away from zero
    Rna,
    /// Round toward positive infinity
    Rtp,
    /// Round toward negative infinity
    Rtn,
    /// Round toward zero
    Rtz,
}

impl RoundingMode {
    /// All five modes
    pub const ALL: [Self; 5] = [Self::Rne, Self::Rna, Self::Rtp, Self::Rtn, Self::Rtz];

    /// SMT-LIB short name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rne => "RNE",
            Self::Rna => "RNA",
            Self::Rtp => "RTP",
            Self::Rtn => "RTN",
            Self::Rtz => "RTZ",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
