//! MSB-first bit serialization of byte payloads and its inverse.

/// Serialize bytes to bits, most significant bit first within each byte.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1 == 1);
        }
    }
    bits
}

/// Pack bits into bytes, MSB first. A trailing partial byte is discarded.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len() / 8);
    for chunk in bits.chunks_exact(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            if bit {
                byte |= 1 << (7 - i);
            }
        }
        bytes.push(byte);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_bits_msb_first() {
        let bits = bytes_to_bits(&[0b1000_0001]);
        assert_eq!(
            bits,
            vec![true, false, false, false, false, false, false, true]
        );
    }

    #[test]
    fn test_roundtrip() {
        let data = vec![0x00, 0xFF, 0xA5, 0x5A, 0x42];
        assert_eq!(bits_to_bytes(&bytes_to_bits(&data)), data);
    }

    #[test]
    fn test_empty() {
        assert!(bytes_to_bits(&[]).is_empty());
        assert!(bits_to_bytes(&[]).is_empty());
    }

    #[test]
    fn test_partial_byte_discarded() {
        let mut bits = bytes_to_bits(&[0xC3]);
        bits.extend_from_slice(&[true, false, true]);
        assert_eq!(bits_to_bytes(&bits), vec![0xC3]);
    }
}
