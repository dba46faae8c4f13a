//! Field classification.
//!
//! A sealed [`Usage`] with a Report Count of `n` expands into `n` fields;
//! each field is classified from its page and usage code.

use crate::usage::{MainFlags, Usage, UsagePage, UsageSource};

/// Generic Desktop usage codes.
pub mod generic_desktop {
    pub const POINTER: u32 = 0x01;
    pub const MOUSE: u32 = 0x02;
    pub const JOYSTICK: u32 = 0x04;
    pub const GAMEPAD: u32 = 0x05;
    pub const KEYBOARD: u32 = 0x06;
    pub const KEYPAD: u32 = 0x07;
    pub const MULTI_AXIS_CONTROLLER: u32 = 0x08;
    pub const X: u32 = 0x30;
    pub const WHEEL: u32 = 0x38;
    pub const HAT_SWITCH: u32 = 0x39;
}

/// Absolute axis usages, in Generic Desktop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AxisKind {
    X = 0,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
    Slider,
    Dial,
    Wheel,
}

impl AxisKind {
    pub const COUNT: usize = 9;

    pub const ALL: [AxisKind; Self::COUNT] = [
        AxisKind::X,
        AxisKind::Y,
        AxisKind::Z,
        AxisKind::Rx,
        AxisKind::Ry,
        AxisKind::Rz,
        AxisKind::Slider,
        AxisKind::Dial,
        AxisKind::Wheel,
    ];

    /// Position in [`AxisKind::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Axis for a Generic Desktop usage code (`0x30..=0x38`).
    #[must_use]
    pub const fn from_usage(usage: u32) -> Option<Self> {
        if usage < generic_desktop::X || usage > generic_desktop::WHEEL {
            return None;
        }
        Some(Self::ALL[(usage - generic_desktop::X) as usize])
    }
}

/// What one field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    /// Leading 8-bit Report Id byte.
    ReportId,
    /// Any usage on a vendor page (`0xFF00..=0xFFFF`); payload is the code.
    VendorDefined(u32),
    Padding,
    Button,
    Axis(AxisKind),
    HatSwitch,
    /// Recognised page, unrecognised usage; payload is the code.
    Unknown(u32),
}

impl FieldKind {
    /// Classify a usage code on a page.
    #[must_use]
    pub const fn classify(page: UsagePage, code: u32) -> Self {
        match page {
            UsagePage::VendorDefined(_) => FieldKind::VendorDefined(code),
            UsagePage::Button => FieldKind::Button,
            UsagePage::GenericDesktop => {
                if code == generic_desktop::HAT_SWITCH {
                    FieldKind::HatSwitch
                } else if let Some(axis) = AxisKind::from_usage(code) {
                    FieldKind::Axis(axis)
                } else {
                    FieldKind::Unknown(code)
                }
            }
            UsagePage::Unknown | UsagePage::Other(_) => FieldKind::Unknown(code),
        }
    }
}

/// One expanded field of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    pub kind: FieldKind,
    /// Usage id: `usage_min + index` for page usages, the expected id for
    /// Report Id fields.
    pub usage: u32,
    /// Repetition index inside its usage.
    pub index: u32,
    /// Width in bits.
    pub size: u32,
    pub logical_min: i32,
    pub logical_max: i32,
    pub physical_min: i32,
    pub physical_max: i32,
    pub unit: u32,
    pub unit_exponent: i32,
    pub flags: MainFlags,
}

impl Field {
    /// Expand repetition `index` of a sealed usage.
    #[must_use]
    pub fn expand(usage: &Usage, index: u32) -> Self {
        let (kind, id) = match usage.source {
            UsageSource::ReportId(id) => (FieldKind::ReportId, id),
            UsageSource::Padding => (FieldKind::Padding, index),
            UsageSource::Page {
                page,
                usage: scalar,
                usage_min,
                usage_max,
                ranged,
            } => {
                let id = usage_min.saturating_add(index);
                let code = if !ranged {
                    scalar
                } else if usage_max >= usage_min {
                    id.min(usage_max)
                } else {
                    id
                };
                (FieldKind::classify(page, code), id)
            }
        };

        let p = &usage.property;
        Self {
            kind,
            usage: id,
            index,
            size: p.size,
            logical_min: p.logical_min,
            logical_max: p.logical_max,
            physical_min: p.physical_min,
            physical_max: p.physical_max,
            unit: p.unit,
            unit_exponent: p.unit_exponent,
            flags: usage.flags,
        }
    }

    /// Constant (padding) data.
    #[inline]
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        self.flags.is_constant()
    }

    /// Whether raw values need sign extension before rescaling.
    #[inline]
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.logical_min < 0
    }
}

/// Iterate the fields of one sealed usage.
pub(crate) fn expand(usage: &Usage) -> impl Iterator<Item = Field> + '_ {
    (0..usage.property.count).map(move |index| Field::expand(usage, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::{Direction, GlobalState};

    fn sealed(source: UsageSource, size: u32, count: u32) -> Usage {
        let global = GlobalState {
            logical_min: 0,
            logical_max: 255,
            report_size: size,
            ..GlobalState::default()
        };
        Usage {
            source,
            direction: Some(Direction::Input),
            flags: MainFlags::VARIABLE,
            property: global.property(count),
        }
    }

    #[test]
    fn test_axis_from_usage() {
        assert_eq!(AxisKind::from_usage(0x30), Some(AxisKind::X));
        assert_eq!(AxisKind::from_usage(0x35), Some(AxisKind::Rz));
        assert_eq!(AxisKind::from_usage(0x38), Some(AxisKind::Wheel));
        assert_eq!(AxisKind::from_usage(0x39), None);
        assert_eq!(AxisKind::from_usage(0x2F), None);
        for (i, axis) in AxisKind::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            FieldKind::classify(UsagePage::GenericDesktop, 0x31),
            FieldKind::Axis(AxisKind::Y)
        );
        assert_eq!(
            FieldKind::classify(UsagePage::GenericDesktop, 0x39),
            FieldKind::HatSwitch
        );
        assert_eq!(
            FieldKind::classify(UsagePage::GenericDesktop, 0x3D),
            FieldKind::Unknown(0x3D)
        );
        assert_eq!(FieldKind::classify(UsagePage::Button, 7), FieldKind::Button);
        assert_eq!(
            FieldKind::classify(UsagePage::VendorDefined(0xFF00), 0x20),
            FieldKind::VendorDefined(0x20)
        );
        assert_eq!(
            FieldKind::classify(UsagePage::Other(0x0C), 0xE9),
            FieldKind::Unknown(0xE9)
        );
    }

    #[test]
    fn test_ranged_button_usage_ids() {
        let usage = sealed(
            UsageSource::Page {
                page: UsagePage::Button,
                usage: 0,
                usage_min: 1,
                usage_max: 16,
                ranged: true,
            },
            1,
            16,
        );
        let mut count = 0;
        for (i, field) in expand(&usage).enumerate() {
            assert_eq!(field.kind, FieldKind::Button);
            assert_eq!(field.index, i as u32);
            assert_eq!(field.usage, i as u32 + 1);
            assert_eq!(field.size, 1);
            count += 1;
        }
        assert_eq!(count, 16);
    }

    #[test]
    fn test_ranged_axes_walk_usage_codes() {
        let usage = sealed(
            UsageSource::Page {
                page: UsagePage::GenericDesktop,
                usage: 0,
                usage_min: 0x30,
                usage_max: 0x35,
                ranged: true,
            },
            8,
            6,
        );
        let kinds: [FieldKind; 6] = core::array::from_fn(|i| Field::expand(&usage, i as u32).kind);
        assert_eq!(
            kinds,
            [
                FieldKind::Axis(AxisKind::X),
                FieldKind::Axis(AxisKind::Y),
                FieldKind::Axis(AxisKind::Z),
                FieldKind::Axis(AxisKind::Rx),
                FieldKind::Axis(AxisKind::Ry),
                FieldKind::Axis(AxisKind::Rz),
            ]
        );
    }

    #[test]
    fn test_range_past_maximum_repeats_last_code() {
        let usage = sealed(
            UsageSource::Page {
                page: UsagePage::GenericDesktop,
                usage: 0,
                usage_min: 0x30,
                usage_max: 0x31,
                ranged: true,
            },
            8,
            3,
        );
        assert_eq!(Field::expand(&usage, 2).kind, FieldKind::Axis(AxisKind::Y));
    }

    #[test]
    fn test_scalar_usage_keeps_kind() {
        let usage = sealed(
            UsageSource::Page {
                page: UsagePage::GenericDesktop,
                usage: 0x39,
                usage_min: 0x39,
                usage_max: 0x39,
                ranged: false,
            },
            4,
            2,
        );
        assert_eq!(Field::expand(&usage, 1).kind, FieldKind::HatSwitch);
    }

    #[test]
    fn test_report_id_and_padding() {
        let id = Usage::report_id(4, Direction::Input);
        let field = Field::expand(&id, 0);
        assert_eq!(field.kind, FieldKind::ReportId);
        assert_eq!(field.usage, 4);
        assert_eq!(field.size, 8);

        let pad = sealed(UsageSource::Padding, 3, 1);
        assert_eq!(Field::expand(&pad, 0).kind, FieldKind::Padding);
    }

    #[test]
    fn test_signedness_follows_logical_min() {
        let mut usage = sealed(UsageSource::Padding, 8, 1);
        assert!(!Field::expand(&usage, 0).is_signed());
        usage.property.logical_min = -127;
        assert!(Field::expand(&usage, 0).is_signed());
    }

    #[test]
    fn test_constant_flag_carried() {
        let mut usage = sealed(UsageSource::Padding, 8, 1);
        assert!(!Field::expand(&usage, 0).is_constant());
        usage.flags = MainFlags(0x01);
        assert!(Field::expand(&usage, 0).is_constant());
    }
}
