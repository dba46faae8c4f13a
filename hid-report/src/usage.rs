//! Usage and collection resolver.
//!
//! Folds the item stream into reports. Global items update one
//! [`GlobalState`]; local items queue pending [`Usage`]s; Input, Output and
//! Feature items seal the pending usages into field spans of the active
//! report. Application collections delimit reports.

use heapless::Vec;

use crate::bits::sign_extend;
use crate::descriptor::{Application, DescriptorError, ReportDescriptor};
use crate::item::{Item, Tag};

/// Maximum local usages queued before one Input/Output/Feature item.
pub const MAX_PENDING_USAGES: usize = 16;

/// Well-known usage page ids.
pub mod page {
    pub const GENERIC_DESKTOP: u32 = 0x01;
    pub const BUTTON: u32 = 0x09;
    pub const VENDOR_DEFINED_FIRST: u32 = 0xFF00;
    pub const VENDOR_DEFINED_LAST: u32 = 0xFFFF;
}

/// Width of the synthetic Report Id field.
const REPORT_ID_BITS: u32 = 8;

/// Usage page classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsagePage {
    GenericDesktop,
    Button,
    VendorDefined(u16),
    #[default]
    Unknown,
    Other(u32),
}

impl UsagePage {
    /// Classify a numeric page id.
    #[must_use]
    pub const fn from_id(id: u32) -> Self {
        match id {
            0 => UsagePage::Unknown,
            page::GENERIC_DESKTOP => UsagePage::GenericDesktop,
            page::BUTTON => UsagePage::Button,
            page::VENDOR_DEFINED_FIRST..=page::VENDOR_DEFINED_LAST => {
                UsagePage::VendorDefined(id as u16)
            }
            other => UsagePage::Other(other),
        }
    }
}

/// Collection type, from the Collection item payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CollectionKind {
    Physical,
    Application,
    Logical,
    Report,
    NamedArray,
    UsageSwitch,
    UsageModifier,
    Other(u32),
}

impl CollectionKind {
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        match value {
            0x00 => CollectionKind::Physical,
            0x01 => CollectionKind::Application,
            0x02 => CollectionKind::Logical,
            0x03 => CollectionKind::Report,
            0x04 => CollectionKind::NamedArray,
            0x05 => CollectionKind::UsageSwitch,
            0x06 => CollectionKind::UsageModifier,
            other => CollectionKind::Other(other),
        }
    }
}

/// Which main item sealed a usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
    Feature,
}

impl Direction {
    const fn from_tag(tag: Tag) -> Option<Self> {
        match tag {
            Tag::Input => Some(Direction::Input),
            Tag::Output => Some(Direction::Output),
            Tag::Feature => Some(Direction::Feature),
            _ => None,
        }
    }
}

/// Data bits of an Input, Output or Feature item.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MainFlags(pub u32);

impl MainFlags {
    pub const CONSTANT: Self = Self(1 << 0);
    pub const VARIABLE: Self = Self(1 << 1);
    pub const RELATIVE: Self = Self(1 << 2);
    pub const WRAP: Self = Self(1 << 3);
    pub const NON_LINEAR: Self = Self(1 << 4);
    pub const NO_PREFERRED: Self = Self(1 << 5);
    pub const NULL_STATE: Self = Self(1 << 6);
    pub const VOLATILE: Self = Self(1 << 7);
    pub const BUFFERED_BYTES: Self = Self(1 << 8);

    #[inline]
    #[must_use]
    pub const fn contains(self, flag: MainFlags) -> bool {
        (self.0 & flag.0) == flag.0
    }

    /// Constant (padding) data rather than device data.
    #[inline]
    #[must_use]
    pub const fn is_constant(self) -> bool {
        self.contains(Self::CONSTANT)
    }

    #[inline]
    #[must_use]
    pub const fn is_variable(self) -> bool {
        self.contains(Self::VARIABLE)
    }

    #[inline]
    #[must_use]
    pub const fn is_relative(self) -> bool {
        self.contains(Self::RELATIVE)
    }
}

/// Global item state, shared by every usage sealed while it is current.
///
/// Extents are captured twice: sign-extended and raw-unsigned. The unsigned
/// view is the fallback for devices that encode `0..=255` as `0x25 0xFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlobalState {
    pub page: UsagePage,
    pub logical_min: i32,
    pub logical_min_unsigned: u32,
    pub logical_max: i32,
    pub logical_max_unsigned: u32,
    pub physical_min: i32,
    pub physical_min_unsigned: u32,
    pub physical_max: i32,
    pub physical_max_unsigned: u32,
    pub unit: u32,
    pub unit_exponent: i32,
    /// Bits per field.
    pub report_size: u32,
    /// Fields per Input/Output/Feature item.
    pub report_count: u32,
}

impl GlobalState {
    /// Replace an inverted maximum with its unsigned capture.
    ///
    /// Seen on real hardware; not something the HID class definition allows.
    pub fn fix_inverted_ranges(&mut self) {
        if self.logical_max < self.logical_min {
            self.logical_max = widen(self.logical_max_unsigned);
        }
        if self.physical_max < self.physical_min {
            self.physical_max = widen(self.physical_max_unsigned);
        }
    }

    /// Snapshot the field properties for a usage repeated `count` times.
    #[must_use]
    pub const fn property(&self, count: u32) -> Property {
        Property {
            logical_min: self.logical_min,
            logical_max: self.logical_max,
            physical_min: self.physical_min,
            physical_max: self.physical_max,
            unit: self.unit,
            unit_exponent: self.unit_exponent,
            size: self.report_size,
            count,
        }
    }
}

/// Unsigned capture as a signed extent, saturating past `i32::MAX`.
fn widen(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Field properties frozen when a usage is sealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Property {
    pub logical_min: i32,
    pub logical_max: i32,
    pub physical_min: i32,
    pub physical_max: i32,
    pub unit: u32,
    pub unit_exponent: i32,
    /// Bits per field.
    pub size: u32,
    /// Number of fields this usage expands into.
    pub count: u32,
}

impl Property {
    /// Total bits covered: `size * count`.
    #[inline]
    #[must_use]
    pub const fn bit_len(&self) -> u64 {
        self.size as u64 * self.count as u64
    }
}

/// What a usage refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsageSource {
    /// Synthetic leading Report Id field carrying the expected id.
    ReportId(u32),
    /// Data item with no usage attached.
    Padding,
    /// A usage on a page, scalar or ranged.
    Page {
        page: UsagePage,
        usage: u32,
        usage_min: u32,
        usage_max: u32,
        /// Placeholder opened by Usage Minimum/Maximum: the kind walks the
        /// range. Scalars keep their own code and only take ids from it.
        ranged: bool,
    },
}

/// One resolved usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Usage {
    pub source: UsageSource,
    /// `None` until sealed by a main item.
    pub direction: Option<Direction>,
    pub flags: MainFlags,
    pub property: Property,
}

impl Usage {
    const fn pending(source: UsageSource) -> Self {
        Self {
            source,
            direction: None,
            flags: MainFlags(0),
            property: Property {
                logical_min: 0,
                logical_max: 0,
                physical_min: 0,
                physical_max: 0,
                unit: 0,
                unit_exponent: 0,
                size: 0,
                count: 0,
            },
        }
    }

    /// Scalar usage: `usage_min == usage_max == usage`.
    #[must_use]
    pub const fn scalar(page: UsagePage, usage: u32) -> Self {
        Self::pending(UsageSource::Page {
            page,
            usage,
            usage_min: usage,
            usage_max: usage,
            ranged: false,
        })
    }

    /// Placeholder created by a Usage Minimum/Maximum with nothing pending.
    #[must_use]
    pub const fn range(page: UsagePage) -> Self {
        Self::pending(UsageSource::Page {
            page,
            usage: 0,
            usage_min: 0,
            usage_max: 0,
            ranged: true,
        })
    }

    #[must_use]
    pub const fn padding() -> Self {
        Self::pending(UsageSource::Padding)
    }

    /// The 8-bit Report Id field prepended to a report id set.
    #[must_use]
    pub const fn report_id(id: u32, direction: Direction) -> Self {
        let mut usage = Self::pending(UsageSource::ReportId(id));
        usage.direction = Some(direction);
        usage.property.size = REPORT_ID_BITS;
        usage.property.count = 1;
        usage
    }

    /// Application identity, when this usage names a top-level collection.
    #[must_use]
    pub const fn application(&self) -> Option<Application> {
        match self.source {
            UsageSource::Page { page, usage, .. } => Some(Application { page, usage }),
            _ => None,
        }
    }

    fn set_bound(&mut self, tag: Tag, value: u32, page_override: Option<UsagePage>) {
        if let UsageSource::Page {
            page,
            usage_min,
            usage_max,
            ..
        } = &mut self.source
        {
            if let Some(p) = page_override {
                *page = p;
            }
            match tag {
                Tag::UsageMinimum => *usage_min = value,
                _ => *usage_max = value,
            }
        }
    }
}

/// Split a local usage payload: 4-byte payloads carry their own page.
fn split_extended(item: &Item) -> (Option<UsagePage>, u32) {
    let value = item.value_u32();
    if item.len() == 4 {
        (Some(UsagePage::from_id(value >> 16)), value & 0xFFFF)
    } else {
        (None, value)
    }
}

/// Accumulator folded over the item stream.
///
/// Each [`Resolver::step`] applies one item; [`Resolver::finish`] yields the
/// assembled [`ReportDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    global: GlobalState,
    pending: Vec<Usage, MAX_PENDING_USAGES>,
    pending_report_id: Option<u32>,
    descriptor: ReportDescriptor,
}

impl Resolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub const fn global(&self) -> &GlobalState {
        &self.global
    }

    /// Local usages waiting for the next main item.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> &[Usage] {
        &self.pending
    }

    #[inline]
    #[must_use]
    pub const fn pending_report_id(&self) -> Option<u32> {
        self.pending_report_id
    }

    /// The reports assembled so far.
    #[inline]
    #[must_use]
    pub const fn descriptor(&self) -> &ReportDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn finish(self) -> ReportDescriptor {
        self.descriptor
    }

    /// Apply one item.
    ///
    /// Fails only when a fixed-capacity container would overflow.
    pub fn step(&mut self, item: &Item) -> Result<(), DescriptorError> {
        match item.tag() {
            Tag::UsagePage => self.global.page = UsagePage::from_id(item.value_u32()),

            Tag::Usage => {
                let (page, usage) = split_extended(item);
                let page = page.unwrap_or(self.global.page);
                self.push_pending(Usage::scalar(page, usage))?;
            }

            tag @ (Tag::UsageMinimum | Tag::UsageMaximum) => {
                if self.pending.is_empty() {
                    self.push_pending(Usage::range(self.global.page))?;
                }
                let (page, value) = split_extended(item);
                for usage in self.pending.iter_mut() {
                    usage.set_bound(tag, value, page);
                }
            }

            Tag::ReportId => {
                let id = item.value_u32();
                self.pending_report_id = (id != 0).then_some(id);
            }

            Tag::LogicalMinimum => {
                self.global.logical_min = item.value_i32();
                self.global.logical_min_unsigned = item.value_u32();
            }
            Tag::LogicalMaximum => {
                self.global.logical_max = item.value_i32();
                self.global.logical_max_unsigned = item.value_u32();
            }
            Tag::PhysicalMinimum => {
                self.global.physical_min = item.value_i32();
                self.global.physical_min_unsigned = item.value_u32();
            }
            Tag::PhysicalMaximum => {
                self.global.physical_max = item.value_i32();
                self.global.physical_max_unsigned = item.value_u32();
            }
            Tag::UnitExponent => {
                // Signed nibble
                self.global.unit_exponent = sign_extend(item.value_u32() & 0xF, 4);
            }
            Tag::Unit => self.global.unit = item.value_u32(),
            Tag::ReportSize => self.global.report_size = item.value_u32(),
            Tag::ReportCount => self.global.report_count = item.value_u32(),

            tag @ (Tag::Input | Tag::Output | Tag::Feature) => {
                if let Some(direction) = Direction::from_tag(tag) {
                    self.seal(direction, MainFlags(item.value_u32()))?;
                }
            }

            Tag::Collection => {
                let kind = CollectionKind::from_u32(item.value_u32());
                if kind == CollectionKind::Application {
                    let application = self.pending.first().and_then(Usage::application);
                    self.descriptor.begin_report(application)?;
                    debug!(
                        "hid: report {} starts at offset {}",
                        self.descriptor.len() - 1,
                        item.offset()
                    );
                }
                // Usages naming a collection never become fields
                self.pending.clear();
            }

            Tag::Push | Tag::Pop => {
                debug!("hid: push/pop at offset {} ignored", item.offset());
            }

            Tag::EndCollection
            | Tag::Delimiter
            | Tag::DesignatorIndex
            | Tag::DesignatorMinimum
            | Tag::DesignatorMaximum
            | Tag::StringIndex
            | Tag::StringMinimum
            | Tag::StringMaximum
            | Tag::Long
            | Tag::Unknown(_) => {}
        }
        Ok(())
    }

    fn push_pending(&mut self, usage: Usage) -> Result<(), DescriptorError> {
        self.pending.push(usage).map_err(|_| {
            warn!("hid: more than {} pending usages", MAX_PENDING_USAGES);
            DescriptorError::TooManyUsages
        })
    }

    /// Seal pending usages into the active report.
    fn seal(&mut self, direction: Direction, flags: MainFlags) -> Result<(), DescriptorError> {
        if self.pending.is_empty() {
            self.push_pending(Usage::padding())?;
        }
        self.global.fix_inverted_ranges();

        if let Some(id) = self.pending_report_id.take() {
            self.descriptor
                .push_span(direction, Usage::report_id(id, direction))?;
        }

        let total = self.global.report_count;
        if self.global.report_size == 0 {
            debug!("hid: zero-width data item dropped ({} fields)", total);
            self.pending.clear();
            return Ok(());
        }

        // Count is shared evenly; leading usages take one extra each
        let shares = self.pending.len() as u32;
        let each = total / shares;
        let extra = total % shares;

        for (i, pending) in self.pending.iter().enumerate() {
            let count = if (i as u32) < extra { each + 1 } else { each };
            if count == 0 {
                continue;
            }
            let usage = Usage {
                direction: Some(direction),
                flags,
                property: self.global.property(count),
                ..*pending
            };
            self.descriptor.push_span(direction, usage)?;
        }

        trace!(
            "hid: sealed {} usages, {} x {} bits",
            shares,
            total,
            self.global.report_size
        );
        self.pending.clear();
        Ok(())
    }
}
