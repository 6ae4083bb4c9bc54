//! Bit-level field extraction from single bytes.

/// Extract `width` bits of `value` starting at `start_bit`.
///
/// Bit 0 is the least significant bit. Callers only use fixed splits of a
/// byte (4+4 and 4+2+1+1), so `start_bit + width` never exceeds 8.
pub fn extract_bits(value: u8, start_bit: u8, width: u8) -> u8 {
    debug_assert!(
        start_bit as u16 + width as u16 <= 8,
        "bit range {start_bit}+{width} exceeds a byte"
    );
    let mask = ((1u16 << width) - 1) as u8;
    (value >> start_bit) & mask
}
