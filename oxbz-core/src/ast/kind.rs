//! Operator kinds accepted by [`TermManager::mk_term`](super::TermManager::mk_term)

use std::fmt;

macro_rules! kinds {
    ($($(#[$doc:meta])* $variant:ident => $name:literal,)*) => {
        /// Operator kind of an application term
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Kind {
            $($(#[$doc])* $variant,)*
        }

        impl Kind {
            /// Every kind, in declaration order
            pub const ALL: &'static [Kind] = &[$(Kind::$variant,)*];

            /// SMT-LIB operator symbol
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Kind::$variant => $name,)*
                }
            }
        }
    };
}

kinds! {
    /// Boolean negation
    Not => "not",
    /// Boolean conjunction
    And => "and",
    /// Boolean disjunction
    Or => "or",
    /// Boolean exclusive or
    Xor => "xor",
    /// Boolean implication (right associative)
    Implies => "=>",
    /// Boolean equivalence
    Iff => "iff",
    /// Equality over any sort
    Equal => "=",
    /// Pairwise disequality
    Distinct => "distinct",
    /// If-then-else
    Ite => "ite",
    /// Function application
    Apply => "apply",
    /// Lambda abstraction
    Lambda => "lambda",
    /// Universal quantifier
    Forall => "forall",
    /// Existential quantifier
    Exists => "exists",
    /// Array read
    ArraySelect => "select",
    /// Array write
    ArrayStore => "store",
    /// Bitwise not
    BvNot => "bvnot",
    /// Two's complement negation
    BvNeg => "bvneg",
    /// Increment by one
    BvInc => "bvinc",
    /// Decrement by one
    BvDec => "bvdec",
    /// And-reduction to one bit
    BvRedand => "bvredand",
    /// Or-reduction to one bit
    BvRedor => "bvredor",
    /// Xor-reduction to one bit
    BvRedxor => "bvredxor",
    /// Addition
    BvAdd => "bvadd",
    /// Subtraction
    BvSub => "bvsub",
    /// Multiplication
    BvMul => "bvmul",
    /// Bitwise and
    BvAnd => "bvand",
    /// Bitwise or
    BvOr => "bvor",
    /// Bitwise xor
    BvXor => "bvxor",
    /// Bitwise nand
    BvNand => "bvnand",
    /// Bitwise nor
    BvNor => "bvnor",
    /// Bitwise xnor
    BvXnor => "bvxnor",
    /// Shift left
    BvShl => "bvshl",
    /// Logical shift right
    BvShr => "bvlshr",
    /// Arithmetic shift right
    BvAshr => "bvashr",
    /// Unsigned division
    BvUdiv => "bvudiv",
    /// Unsigned remainder
    BvUrem => "bvurem",
    /// Signed division
    BvSdiv => "bvsdiv",
    /// Signed remainder (sign follows dividend)
    BvSrem => "bvsrem",
    /// Signed modulo (sign follows divisor)
    BvSmod => "bvsmod",
    /// Rotate left by a bit-vector amount
    BvRol => "bvrol",
    /// Rotate right by a bit-vector amount
    BvRor => "bvror",
    /// Equality as a one-bit value
    BvComp => "bvcomp",
    /// Concatenation
    BvConcat => "concat",
    /// Unsigned less than
    BvUlt => "bvult",
    /// Unsigned less or equal
    BvUle => "bvule",
    /// Unsigned greater than
    BvUgt => "bvugt",
    /// Unsigned greater or equal
    BvUge => "bvuge",
    /// Signed less than
    BvSlt => "bvslt",
    /// Signed less or equal
    BvSle => "bvsle",
    /// Signed greater than
    BvSgt => "bvsgt",
    /// Signed greater or equal
    BvSge => "bvsge",
    /// Unsigned addition overflow
    BvUaddo => "bvuaddo",
    /// Signed addition overflow
    BvSaddo => "bvsaddo",
    /// Unsigned multiplication overflow
    BvUmulo => "bvumulo",
    /// Signed multiplication overflow
    BvSmulo => "bvsmulo",
    /// Unsigned subtraction overflow
    BvUsubo => "bvusubo",
    /// Signed subtraction overflow
    BvSsubo => "bvssubo",
    /// Signed division overflow
    BvSdivo => "bvsdivo",
    /// Bit range `[hi:lo]`
    BvExtract => "extract",
    /// Repeat `n` times
    BvRepeat => "repeat",
    /// Rotate left by a constant
    BvRoli => "rotate_left",
    /// Rotate right by a constant
    BvRori => "rotate_right",
    /// Sign extension by `n` bits
    BvSignExtend => "sign_extend",
    /// Zero extension by `n` bits
    BvZeroExtend => "zero_extend",
    /// Absolute value
    FpAbs => "fp.abs",
    /// Negation
    FpNeg => "fp.neg",
    /// Addition
    FpAdd => "fp.add",
    /// Subtraction
    FpSub => "fp.sub",
    /// Multiplication
    FpMul => "fp.mul",
    /// Division
    FpDiv => "fp.div",
    /// Fused multiply-add
    FpFma => "fp.fma",
    /// Square root
    FpSqrt => "fp.sqrt",
    /// Round to integral
    FpRti => "fp.roundToIntegral",
    /// Remainder
    FpRem => "fp.rem",
    /// Minimum
    FpMin => "fp.min",
    /// Maximum
    FpMax => "fp.max",
    /// IEEE equality
    FpEq => "fp.eq",
    /// Less or equal
    FpLeq => "fp.leq",
    /// Less than
    FpLt => "fp.lt",
    /// Greater or equal
    FpGeq => "fp.geq",
    /// Greater than
    FpGt => "fp.gt",
    /// Is infinite
    FpIsInf => "fp.isInfinite",
    /// Is NaN
    FpIsNan => "fp.isNaN",
    /// Is negative
    FpIsNeg => "fp.isNegative",
    /// Is normal
    FpIsNormal => "fp.isNormal",
    /// Is positive
    FpIsPos => "fp.isPositive",
    /// Is subnormal
    FpIsSubnormal => "fp.isSubnormal",
    /// Is zero
    FpIsZero => "fp.isZero",
    /// Floating-point value from sign, exponent and significand bit-vectors
    FpFp => "fp",
    /// Reinterpret a bit-vector as a float
    FpToFpFromBv => "to_fp",
    /// Convert between float formats
    FpToFpFromFp => "to_fp",
    /// Signed bit-vector to float
    FpToFpFromSbv => "to_fp",
    /// Unsigned bit-vector to float
    FpToFpFromUbv => "to_fp_unsigned",
    /// Float to signed bit-vector
    FpToSbv => "fp.to_sbv",
    /// Float to unsigned bit-vector
    FpToUbv => "fp.to_ubv",
}

impl Kind {
    /// Kinds that bind variables: all operands but the last are variables
    #[must_use]
    pub const fn is_binder(self) -> bool {
        matches!(self, Self::Lambda | Self::Forall | Self::Exists)
    }

    /// Kinds that belong to the floating-point theory
    #[must_use]
    pub const fn is_fp(self) -> bool {
        matches!(
            self,
            Self::FpAbs
                | Self::FpNeg
                | Self::FpAdd
                | Self::FpSub
                | Self::FpMul
                | Self::FpDiv
                | Self::FpFma
                | Self::FpSqrt
                | Self::FpRti
                | Self::FpRem
                | Self::FpMin
                | Self::FpMax
                | Self::FpEq
                | Self::FpLeq
                | Self::FpLt
                | Self::FpGeq
                | Self::FpGt
                | Self::FpIsInf
                | Self::FpIsNan
                | Self::FpIsNeg
                | Self::FpIsNormal
                | Self::FpIsPos
                | Self::FpIsSubnormal
                | Self::FpIsZero
                | Self::FpFp
                | Self::FpToFpFromBv
                | Self::FpToFpFromFp
                | Self::FpToFpFromSbv
                | Self::FpToFpFromUbv
                | Self::FpToSbv
                | Self::FpToUbv
        )
    }

    /// Number of `u32` indices the kind takes
    #[must_use]
    pub const fn num_indices(self) -> usize {
        match self {
            Self::BvExtract
            | Self::FpToFpFromBv
            | Self::FpToFpFromFp
            | Self::FpToFpFromSbv
            | Self::FpToFpFromUbv => 2,
            Self::BvRepeat
            | Self::BvRoli
            | Self::BvRori
            | Self::BvSignExtend
            | Self::BvZeroExtend
            | Self::FpToSbv
            | Self::FpToUbv => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
