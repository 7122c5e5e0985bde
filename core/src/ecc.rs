//! Hamming(7,4) forward error correction over bit streams.
//!
//! Each 4-bit nibble (MSB first) becomes a 7-bit codeword with parity at
//! positions 1, 2 and 4 and data at positions 3, 5, 6 and 7. The decoder
//! corrects any single flipped bit per codeword; two flips in one codeword
//! miscorrect silently, which the link accepts.

/// Codeword = GENERATOR · nibble (mod 2), one row per emitted bit.
const GENERATOR: [[u8; 4]; 7] = [
    [1, 1, 0, 1],
    [1, 0, 1, 1],
    [1, 0, 0, 0],
    [0, 1, 1, 1],
    [0, 1, 0, 0],
    [0, 0, 1, 0],
    [0, 0, 0, 1],
];

/// Syndrome = PARITY_CHECK · codeword (mod 2). Row i contributes bit i of
/// the syndrome value, which reads out the 1-indexed error position.
const PARITY_CHECK: [[u8; 7]; 3] = [
    [1, 0, 1, 0, 1, 0, 1],
    [0, 1, 1, 0, 0, 1, 1],
    [0, 0, 0, 1, 1, 1, 1],
];

/// Encode a bit stream nibble by nibble. The input length must be a
/// multiple of 4; byte-aligned payloads always satisfy this.
pub fn encode(bits: &[bool]) -> Vec<bool> {
    debug_assert_eq!(bits.len() % 4, 0);
    let mut encoded = Vec::with_capacity(bits.len() / 4 * 7);
    for nibble in bits.chunks_exact(4) {
        for row in &GENERATOR {
            let mut parity = false;
            for (j, &g) in row.iter().enumerate() {
                if g == 1 {
                    parity ^= nibble[j];
                }
            }
            encoded.push(parity);
        }
    }
    encoded
}

/// Decode a codeword stream, correcting single-bit errors. Returns the
/// data bits and the number of corrections applied. A trailing partial
/// codeword is discarded; decoding never fails.
pub fn decode(bits: &[bool]) -> (Vec<bool>, usize) {
    let mut decoded = Vec::with_capacity(bits.len() / 7 * 4);
    let mut corrected = 0;
    for group in bits.chunks_exact(7) {
        let mut codeword = [false; 7];
        codeword.copy_from_slice(group);

        let mut syndrome = 0usize;
        for (i, row) in PARITY_CHECK.iter().enumerate() {
            let mut parity = false;
            for (j, &h) in row.iter().enumerate() {
                if h == 1 {
                    parity ^= codeword[j];
                }
            }
            if parity {
                syndrome |= 1 << i;
            }
        }

        if syndrome != 0 {
            codeword[syndrome - 1] = !codeword[syndrome - 1];
            corrected += 1;
        }

        decoded.extend_from_slice(&[codeword[2], codeword[4], codeword[5], codeword[6]]);
    }
    (decoded, corrected)
}
