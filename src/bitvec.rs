//! Fixed-width bit-vector primitives.
//!
//! A [`BitVector`] is conceptually the MSB-first sequence of single-bit
//! values described by the datapath's data model: two vectors are equal
//! only if they share both width and value. Internally the value is
//! carried as a masked `u64` rather than a `Vec<bool>` -- width is just
//! carried alongside it -- which keeps every arithmetic primitive built
//! on top a few native shifts and masks instead of a bit-by-bit walk.
//! Bit-level helpers (hex/binary formatting, sign/zero-extension) sit at
//! the I/O boundary, where the "sequence of bits" framing earns its keep.

use crate::error::BitVecError;

/// A bit-vector of a fixed, explicit width (1..=64).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitVector {
    width: u32,
    value: u64,
}

fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

impl BitVector {
    /// Build a bit-vector from an unsigned value, masking it to `width`.
    pub fn from_unsigned(value: u64, width: u32) -> Self {
        Self {
            width,
            value: value & width_mask(width),
        }
    }

    /// Build a bit-vector from a signed value. Fails if `value` does not
    /// fit in `width` bits two's-complement.
    pub fn from_signed(value: i64, width: u32) -> Result<Self, BitVecError> {
        let lo = -(1i64 << (width - 1));
        let hi = (1i64 << (width - 1)) - 1;
        if value < lo || value > hi {
            return Err(BitVecError::OutOfRange { value, width });
        }
        Ok(Self::from_unsigned(value as u64 & width_mask(width), width))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn to_unsigned(&self) -> u64 {
        self.value
    }

    /// Interpret the vector as a two's-complement signed integer: test
    /// the MSB and, if set, negate the bitwise complement plus one.
    pub fn to_signed(&self) -> i64 {
        let sign_bit = 1u64 << (self.width - 1);
        if self.value & sign_bit != 0 {
            -(((!self.value) & width_mask(self.width)).wrapping_add(1) as i64)
        } else {
            self.value as i64
        }
    }

    /// Render as an upper-case `0x`-prefixed hex string, zero-padded to
    /// exactly `width.div_ceil(4)` digits.
    pub fn to_hex(&self) -> String {
        let digits = self.width.div_ceil(4) as usize;
        format!("0x{:0width$X}", self.value, width = digits)
    }

    /// Parse a hex string (case-insensitive, optional `0x` prefix) as a
    /// bit-vector of `width` bits. Fails on invalid digits or length
    /// mismatch against `width.div_ceil(4)` digits.
    pub fn from_hex(text: &str, width: u32) -> Result<Self, BitVecError> {
        let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
        let expected = width.div_ceil(4) as usize;
        if digits.len() != expected {
            return Err(BitVecError::WrongHexLength(text.to_string(), digits.len(), expected));
        }
        let value = u64::from_str_radix(digits, 16)
            .map_err(|_| BitVecError::InvalidHex(text.to_string()))?;
        Ok(Self::from_unsigned(value, width))
    }

    /// Render as a space-separated, nibble-grouped binary string.
    pub fn to_bin(&self) -> String {
        let full = format!("{:0width$b}", self.value, width = self.width as usize);
        full.as_bytes()
            .rchunks(4)
            .rev()
            .map(|chunk| std::str::from_utf8(chunk).unwrap())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Widen to `new_width`, replicating the MSB into the new high bits.
    pub fn sign_extend(&self, new_width: u32) -> BitVector {
        debug_assert!(new_width >= self.width);
        BitVector::from_unsigned(sign_extend_u64(self.value, self.width), new_width)
    }

    /// Widen to `new_width`, filling the new high bits with zero.
    pub fn zero_extend(&self, new_width: u32) -> BitVector {
        debug_assert!(new_width >= self.width);
        BitVector::from_unsigned(self.value, new_width)
    }

    /// Narrow to `new_width`, taking the low bits.
    pub fn truncate(&self, new_width: u32) -> BitVector {
        debug_assert!(new_width <= self.width);
        BitVector::from_unsigned(self.value, new_width)
    }

    /// Two's-complement negate: bitwise NOT then +1.
    pub fn negate(&self) -> BitVector {
        let inverted = (!self.value) & width_mask(self.width);
        BitVector::from_unsigned(inverted.wrapping_add(1), self.width)
    }
}

/// Replicate bit `width - 1` of `value` into all higher bits of a 64-bit
/// word. Shared by [`BitVector::sign_extend`] and the raw-`u32` helpers
/// the decoder and ALU use directly.
pub fn sign_extend_u64(value: u64, width: u32) -> u64 {
    let sign_bit = 1u64 << (width - 1);
    if value & sign_bit != 0 {
        value | !width_mask(width)
    } else {
        value
    }
}

/// Replicate bit `sign_bit_position` of a 32-bit word into all higher
/// bits, returning the result as `u32`. The hot-path equivalent of
/// [`sign_extend_u64`] used by the decoder's immediate assembly.
pub fn sign_extend_u32(value: u32, sign_bit_position: u32) -> u32 {
    sign_extend_u64(value as u64, sign_bit_position + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_signed_values() {
        for v in [-2i64.pow(31), -1, 0, 1, 2i64.pow(31) - 1] {
            let bv = BitVector::from_signed(v, 32).unwrap();
            assert_eq!(bv.to_signed(), v);
        }
    }

    #[test]
    fn hex_round_trip_is_canonical() {
        let bv = BitVector::from_unsigned(0xdead_beef, 32);
        assert_eq!(bv.to_hex(), "0xDEADBEEF");
        assert_eq!(BitVector::from_hex("0xdeadbeef", 32).unwrap(), bv);
        assert_eq!(BitVector::from_hex("deadbeef", 32).unwrap(), bv);
    }

    #[test]
    fn rejects_wrong_length_hex() {
        assert!(BitVector::from_hex("0x1", 32).is_err());
    }

    #[test]
    fn sign_extend_preserves_value() {
        let bv = BitVector::from_signed(-1, 8).unwrap();
        let wide = bv.sign_extend(32);
        assert_eq!(wide.to_signed(), -1);
    }

    #[test]
    fn zero_extend_fills_high_bits_with_zero() {
        let bv = BitVector::from_unsigned(0xff, 8);
        let wide = bv.zero_extend(16);
        assert_eq!(wide.to_unsigned(), 0xff);
    }

    #[test]
    fn truncate_takes_low_bits() {
        let bv = BitVector::from_unsigned(0x1_2345, 20);
        assert_eq!(bv.truncate(8).to_unsigned(), 0x45);
    }

    #[test]
    fn negate_is_two_complement() {
        let bv = BitVector::from_unsigned(1, 8);
        assert_eq!(bv.negate().to_unsigned(), 0xff);
        assert_eq!(BitVector::from_unsigned(0, 8).negate().to_unsigned(), 0);
    }

    #[test]
    fn width_is_exact_and_vectors_compare_by_width_and_value() {
        let a = BitVector::from_unsigned(3, 8);
        let b = BitVector::from_unsigned(3, 16);
        assert_ne!(a, b);
        assert_eq!(a.width(), 8);
    }
}
