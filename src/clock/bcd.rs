//! Binary-coded-decimal helpers.
//!
//! The clock chip stores every field as two packed decimal digits: tens in
//! the high nibble, ones in the low nibble.

/// Encode `0..=99` as packed BCD. Larger inputs produce a tens nibble above 9.
pub const fn dec_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decode packed BCD. Non-BCD nibbles are decoded arithmetically, not rejected.
pub const fn bcd_to_dec(byte: u8) -> u8 {
    (byte >> 4) * 10 + (byte & 0x0F)
}

/// ASCII for the low nibble: `0..=9` as digits, `10..=15` as `A..=F`.
pub const fn low_nibble_ascii(byte: u8) -> u8 {
    let n = byte & 0x0F;
    if n < 10 { b'0' + n } else { b'A' + (n - 10) }
}

/// ASCII for the high nibble.
pub const fn high_nibble_ascii(byte: u8) -> u8 {
    low_nibble_ascii(byte >> 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_tens_in_high_nibble() {
        assert_eq!(dec_to_bcd(0), 0x00);
        assert_eq!(dec_to_bcd(9), 0x09);
        assert_eq!(dec_to_bcd(10), 0x10);
        assert_eq!(dec_to_bcd(59), 0x59);
        assert_eq!(dec_to_bcd(99), 0x99);
    }

    #[test]
    fn decodes_packed_digits() {
        assert_eq!(bcd_to_dec(0x00), 0);
        assert_eq!(bcd_to_dec(0x23), 23);
        assert_eq!(bcd_to_dec(0x99), 99);
    }

    #[test]
    fn malformed_nibbles_decode_without_panicking() {
        assert_eq!(bcd_to_dec(0x1A), 20);
        assert_eq!(bcd_to_dec(0xFF), 165);
    }

    #[test]
    fn nibbles_map_to_hex_ascii() {
        assert_eq!(low_nibble_ascii(0x07), b'7');
        assert_eq!(low_nibble_ascii(0x3A), b'A');
        assert_eq!(low_nibble_ascii(0x0F), b'F');
        assert_eq!(high_nibble_ascii(0xC4), b'C');
        assert_eq!(high_nibble_ascii(0x59), b'5');
    }
}
