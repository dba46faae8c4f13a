//! Report descriptor tokenizer.
//!
//! A report descriptor is a flat sequence of short items:
//!
//! ```text
//! prefix | data[0] .. data[n]
//! prefix = tag (bits 7..4) | type (bits 3..2) | size code (bits 1..0)
//! ```
//!
//! Size code 0, 1 and 2 mean that many data bytes, size code 3 means 4 bytes.
//! Long items (prefix `0xFE`) carry an explicit size byte and are skipped.

/// Prefix byte announcing a long item.
const LONG_ITEM_PREFIX: u8 = 0xFE;

/// Mask selecting tag and type bits of a short item prefix.
const TAG_MASK: u8 = 0xFC;

/// Mask selecting the size code of a short item prefix.
const SIZE_MASK: u8 = 0x03;

/// Item tag, decoded from the prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tag {
    // Main items
    Input,
    Output,
    Feature,
    Collection,
    EndCollection,
    // Global items
    UsagePage,
    LogicalMinimum,
    LogicalMaximum,
    PhysicalMinimum,
    PhysicalMaximum,
    UnitExponent,
    Unit,
    ReportSize,
    ReportId,
    ReportCount,
    Push,
    Pop,
    // Local items
    Usage,
    UsageMinimum,
    UsageMaximum,
    DesignatorIndex,
    DesignatorMinimum,
    DesignatorMaximum,
    StringIndex,
    StringMinimum,
    StringMaximum,
    Delimiter,
    /// Long item, payload discarded.
    Long,
    /// Reserved tag (prefix with size bits masked off).
    Unknown(u8),
}

impl Tag {
    /// Decode a short item prefix byte.
    #[must_use]
    pub const fn from_prefix(prefix: u8) -> Self {
        match prefix & TAG_MASK {
            0x80 => Tag::Input,
            0x90 => Tag::Output,
            0xB0 => Tag::Feature,
            0xA0 => Tag::Collection,
            0xC0 => Tag::EndCollection,
            0x04 => Tag::UsagePage,
            0x14 => Tag::LogicalMinimum,
            0x24 => Tag::LogicalMaximum,
            0x34 => Tag::PhysicalMinimum,
            0x44 => Tag::PhysicalMaximum,
            0x54 => Tag::UnitExponent,
            0x64 => Tag::Unit,
            0x74 => Tag::ReportSize,
            0x84 => Tag::ReportId,
            0x94 => Tag::ReportCount,
            0xA4 => Tag::Push,
            0xB4 => Tag::Pop,
            0x08 => Tag::Usage,
            0x18 => Tag::UsageMinimum,
            0x28 => Tag::UsageMaximum,
            0x38 => Tag::DesignatorIndex,
            0x48 => Tag::DesignatorMinimum,
            0x58 => Tag::DesignatorMaximum,
            0x78 => Tag::StringIndex,
            0x88 => Tag::StringMinimum,
            0x98 => Tag::StringMaximum,
            0xA8 => Tag::Delimiter,
            other => Tag::Unknown(other),
        }
    }

    /// True for Input, Output and Feature: the items that seal pending usages.
    #[inline]
    #[must_use]
    pub const fn is_data(self) -> bool {
        matches!(self, Tag::Input | Tag::Output | Tag::Feature)
    }
}

/// One decoded descriptor item: a tag and up to 4 payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Item {
    tag: Tag,
    data: [u8; 4],
    len: u8,
    offset: usize,
}

impl Item {
    /// Build an item from a tag and its payload (at most 4 bytes are kept).
    #[must_use]
    pub fn new(tag: Tag, payload: &[u8]) -> Self {
        let len = payload.len().min(4);
        let mut data = [0u8; 4];
        if let (Some(dst), Some(src)) = (data.get_mut(..len), payload.get(..len)) {
            dst.copy_from_slice(src);
        }
        Self {
            tag,
            data,
            len: len as u8,
            offset: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    /// Payload bytes (0, 1, 2 or 4 of them).
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.get(..usize::from(self.len)).unwrap_or(&[])
    }

    /// Payload size in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset of the prefix inside the descriptor.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Payload as an unsigned little-endian number.
    #[inline]
    #[must_use]
    pub const fn value_u32(&self) -> u32 {
        u32::from_le_bytes(self.data)
    }

    /// Payload as a sign-extended little-endian number.
    ///
    /// Logical and physical extents are signed in the HID encoding: `0x15 0x81`
    /// is -127, not 129.
    #[must_use]
    pub const fn value_i32(&self) -> i32 {
        match self.len {
            1 => self.data[0] as i8 as i32,
            2 => i16::from_le_bytes([self.data[0], self.data[1]]) as i32,
            4 => i32::from_le_bytes(self.data),
            _ => 0,
        }
    }
}

/// Lazy, forward-only iterator over the items of a descriptor.
///
/// Stops at the end of the buffer, or early when an item claims more payload
/// bytes than remain; [`Items::is_truncated`] reports the latter.
#[derive(Debug, Clone)]
pub struct Items<'a> {
    bytes: &'a [u8],
    offset: usize,
    truncated: bool,
}

impl<'a> Items<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            truncated: false,
        }
    }

    /// True once iteration stopped on an item whose payload ran past the end.
    #[inline]
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Byte offset of the next item to be read.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    fn stop_truncated(&mut self) -> Option<Item> {
        self.truncated = true;
        self.offset = self.bytes.len();
        None
    }
}

impl Iterator for Items<'_> {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        let start = self.offset;
        let prefix = *self.bytes.get(start)?;

        if prefix == LONG_ITEM_PREFIX {
            // prefix | bDataSize | bLongItemTag | data
            let Some(&size) = self.bytes.get(start + 1) else {
                return self.stop_truncated();
            };
            let end = start + 3 + usize::from(size);
            if end > self.bytes.len() {
                return self.stop_truncated();
            }
            self.offset = end;
            return Some(Item {
                tag: Tag::Long,
                data: [0; 4],
                len: 0,
                offset: start,
            });
        }

        let len = match prefix & SIZE_MASK {
            3 => 4,
            n => usize::from(n),
        };
        let Some(payload) = self.bytes.get(start + 1..start + 1 + len) else {
            return self.stop_truncated();
        };

        self.offset = start + 1 + len;
        let mut item = Item::new(Tag::from_prefix(prefix), payload);
        item.offset = start;
        Some(item)
    }
}

/// Iterate the items of `bytes`.
///
/// Iteration is restartable: each call starts over from the first byte.
#[inline]
#[must_use]
pub const fn items(bytes: &[u8]) -> Items<'_> {
    Items::new(bytes)
}
