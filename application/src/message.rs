//! Message values with their own rendering.

use std::fmt;

/// Values with a fixed-width bit pattern.
pub trait BitPattern: Copy {
    /// Width of the pattern in bits.
    const WIDTH: usize;

    fn fmt_bits(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

macro_rules! impl_bit_pattern {
    ($($t:ty),* $(,)?) => {
        $(
            impl BitPattern for $t {
                const WIDTH: usize = <$t>::BITS as usize;

                fn fmt_bits(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    // Signed integers already render as two's complement.
                    write!(f, "{:0width$b}", self, width = Self::WIDTH)
                }
            }
        )*
    };
}

impl_bit_pattern!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl BitPattern for char {
    const WIDTH: usize = u32::BITS as usize;

    fn fmt_bits(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        u32::from(*self).fmt_bits(f)
    }
}

/// Renders a value as its full-width binary string.
///
/// ```ignore
/// logger.push("flags=").push(Binary(0b1010_u8)); // "flags=00001010"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binary<T>(pub T);

impl<T: BitPattern> fmt::Display for Binary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_bits(f)
    }
}
