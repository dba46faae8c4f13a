//! Little-endian bit extraction from raw report buffers.

/// Largest field width [`read_bits`] can return in one value.
pub const MAX_READ_BITS: usize = 32;

/// Read `bit_len` bits starting at `bit_offset`, least-significant bit first.
///
/// Bits are taken from `buf` in the order HID packs them: bit 0 of byte 0
/// first, crossing byte boundaries freely. The result is packed LSB-first.
///
/// Returns `None` when the range does not fit inside `buf` or `bit_len`
/// exceeds [`MAX_READ_BITS`]. Reading zero bits yields `Some(0)`.
///
/// # Example
///
/// ```
/// use hid_report::read_bits;
///
/// let buf = [0b1010_0000, 0b0000_0011];
/// assert_eq!(read_bits(&buf, 5, 5), Some(0b11101));
/// assert_eq!(read_bits(&buf, 12, 8), None);
/// ```
#[must_use]
pub fn read_bits(buf: &[u8], bit_offset: usize, bit_len: usize) -> Option<u32> {
    if bit_len > MAX_READ_BITS {
        return None;
    }
    let end = bit_offset.checked_add(bit_len)?;
    if end > buf.len().checked_mul(8)? {
        return None;
    }

    let bytes = buf.get(bit_offset / 8..end.div_ceil(8))?;
    // At most 5 bytes: 7 bits of leading offset plus 32 bits of payload
    let raw = bytes
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << (8 * i)));

    let mask = (1u64 << bit_len) - 1;
    Some(((raw >> (bit_offset % 8)) & mask) as u32)
}

/// Interpret the low `bits` bits of `value` as a two's complement number.
#[inline]
#[must_use]
pub fn sign_extend(value: u32, bits: u32) -> i32 {
    if bits == 0 || bits >= 32 {
        return value as i32;
    }
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}
