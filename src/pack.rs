use {
    crate::error::CodingError,
    bitvec::prelude::*,
};

/// Packs a bit sequence into bytes for persistence: bit `i` of the sequence
/// lands at bit `i % 8` of byte `i / 8`, least significant bit first. Unused
/// trailing bits of the final byte are zero.
///
/// Packing is lossy about the sequence length: trailing zero payload bits
/// are indistinguishable from padding. Callers must persist the true bit
/// count alongside the bytes and hand it back to [`unpack_bits`].
pub fn pack_bits(bits: &BitSlice<u8, Lsb0>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((bits.len() + 7) / 8);
    let mut current = 0u8;
    let mut filled = 0;
    for bit in bits.iter().by_vals() {
        if bit {
            current |= 1 << filled;
        }
        filled += 1;
        if filled == 8 {
            bytes.push(current);
            current = 0;
            filled = 0;
        }
    }
    if filled > 0 {
        bytes.push(current);
    }
    bytes
}

/// Recovers the first `bit_length` bits of a packed buffer.
///
/// `bit_length` is the true sequence length persisted at pack time. Fails
/// with [`CodingError::InvalidPackedLength`] when it exceeds what the buffer
/// can hold.
pub fn unpack_bits(bytes: &[u8], bit_length: usize) -> Result<BitVec<u8, Lsb0>, CodingError> {
    let capacity = bytes.len() * 8;
    if bit_length > capacity {
        return Err(CodingError::InvalidPackedLength {
            requested: bit_length,
            capacity,
        });
    }
    let bits = BitSlice::<u8, Lsb0>::from_slice(bytes);
    Ok(bits[..bit_length].to_bitvec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_pack_least_significant_first() {
        // 1, then seven 0s, then 1: the ninth bit starts a second byte.
        let bits = bits![u8, Lsb0; 1, 0, 0, 0, 0, 0, 0, 0, 1];
        assert_eq!(pack_bits(bits), vec![0b0000_0001, 0b0000_0001]);
    }

    #[test]
    fn trailing_bits_are_zero_filled() {
        let bits = bits![u8, Lsb0; 1, 1, 1];
        assert_eq!(pack_bits(bits), vec![0b0000_0111]);
    }

    #[test]
    fn empty_sequence_packs_to_no_bytes() {
        let none = BitVec::<u8, Lsb0>::new();
        assert_eq!(pack_bits(&none), Vec::<u8>::new());
        assert_eq!(unpack_bits(&[], 0).unwrap(), none);
    }

    #[test]
    fn unpack_restores_the_exact_length() {
        let bits = bits![u8, Lsb0; 0, 1, 1, 0, 1, 0, 0, 0, 0, 0, 1];
        let packed = pack_bits(bits);
        assert_eq!(unpack_bits(&packed, bits.len()).unwrap(), bits);
    }

    #[test]
    fn unpack_rejects_lengths_past_capacity() {
        assert_eq!(
            unpack_bits(&[0xff], 9).unwrap_err(),
            CodingError::InvalidPackedLength {
                requested: 9,
                capacity: 8
            }
        );
    }
}
