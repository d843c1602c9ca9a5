//! # Bit-Level Buffer Access
//!
//! Helpers for reading and writing fields that do not start or end on a byte
//! boundary. Bits are numbered MSB-first across the whole buffer: bit 0 is the
//! high bit of byte 0, bit 8 is the high bit of byte 1, and so on. This is the
//! numbering a big-endian integer of the same length would use, read left to
//! right.
//!
//! Fields are limited to 57 bits so that the bytes covering any field fit in a
//! `u64` regardless of where the field starts within its first byte.

/// Widest field these helpers accept.
pub const MAX_FIELD_BITS: u32 = 57;

/// Byte range `[first, last]` covering `width` bits at `bit_offset`.
///
/// Returns `None` when the field is empty, too wide, or runs past `len_bytes`.
pub fn covering_bytes(bit_offset: usize, width: u32, len_bytes: usize) -> Option<(usize, usize)> {
    if width == 0 || width > MAX_FIELD_BITS {
        return None;
    }
    let end = bit_offset.checked_add(width as usize)?;
    if end > len_bytes.checked_mul(8)? {
        return None;
    }
    Some((bit_offset / 8, (end - 1) / 8))
}

/// Read `width` bits starting at `bit_offset`, returned right-aligned.
///
/// Returns `None` if the field does not lie entirely within `buf`.
///
/// # Example
/// ```
/// use daylight_mask::bits::extract_bits;
///
/// // 0b0000_0011 0b1100_0000: bits 6..10 are all ones
/// let buf = [0x03, 0xC0];
/// assert_eq!(extract_bits(&buf, 6, 4), Some(0b1111));
/// assert_eq!(extract_bits(&buf, 14, 4), None);
/// ```
pub fn extract_bits(buf: &[u8], bit_offset: usize, width: u32) -> Option<u64> {
    let (first, last) = covering_bytes(bit_offset, width, buf.len())?;
    let window = buf[first..=last]
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));

    // Trailing bits of the last byte that belong to the next field
    let shift = (last + 1) * 8 - (bit_offset + width as usize);
    Some((window >> shift) & field_mask(width))
}

/// Overwrite `width` bits starting at `bit_offset` with the low bits of `value`.
///
/// Bits of `value` above `width` are discarded. Returns `false`, leaving the
/// buffer untouched, if the field does not lie entirely within `buf`.
pub fn insert_bits(buf: &mut [u8], bit_offset: usize, width: u32, value: u64) -> bool {
    let Some((first, last)) = covering_bytes(bit_offset, width, buf.len()) else {
        return false;
    };
    let shift = (last + 1) * 8 - (bit_offset + width as usize);
    let mask = field_mask(width) << shift;
    let bits = (value & field_mask(width)) << shift;

    let span = last - first + 1;
    for (i, byte) in buf[first..=last].iter_mut().enumerate() {
        // Byte i of the covering window sits (span - 1 - i) bytes above the LSB
        let byte_shift = (span - 1 - i) * 8;
        let byte_mask = (mask >> byte_shift) as u8;
        let byte_bits = (bits >> byte_shift) as u8;
        *byte = (*byte & !byte_mask) | byte_bits;
    }
    true
}

fn field_mask(width: u32) -> u64 {
    (1u64 << width) - 1
}
