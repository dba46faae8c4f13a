//! Joystick report decoder.
//!
//! Walks the Input fields of a parsed [`ReportDescriptor`] over one raw
//! input report and produces a [`JoystickState`].
//!
//! # Example
//!
//! ```
//! use hid_report::{AxisKind, Joystick, ReportDescriptor};
//!
//! let descriptor = ReportDescriptor::parse(&[
//!     0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, // Gamepad
//!     0x15, 0x00, 0x26, 0xFF, 0x00, 0x75, 0x08, 0x95, 0x01, //
//!     0x09, 0x30, 0x81, 0x02, // X
//!     0xC0,
//! ])
//! .unwrap();
//!
//! let joystick = Joystick::new(&descriptor).unwrap();
//! let state = joystick.decode(&[0xFF]).unwrap();
//! assert_eq!(state.axis(AxisKind::X), i16::MAX);
//! ```

use crate::bits::{read_bits, sign_extend, MAX_READ_BITS};
use crate::descriptor::{FieldGroup, ReportDescriptor};
use crate::field::{AxisKind, Field, FieldKind};

/// Button slots in a [`JoystickState`].
pub const MAX_BUTTONS: usize = 32;

/// Hat switch direction, clockwise from up.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Hat {
    Up = 0,
    UpRight = 1,
    Right = 2,
    DownRight = 3,
    Down = 4,
    DownLeft = 5,
    Left = 6,
    UpLeft = 7,
    #[default]
    Neutral = 8,
}

impl Hat {
    /// Map a raw hat value; anything outside 0-7 is neutral.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Hat::Up,
            1 => Hat::UpRight,
            2 => Hat::Right,
            3 => Hat::DownRight,
            4 => Hat::Down,
            5 => Hat::DownLeft,
            6 => Hat::Left,
            7 => Hat::UpLeft,
            _ => Hat::Neutral,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_up(self) -> bool {
        matches!(self, Hat::UpLeft | Hat::Up | Hat::UpRight)
    }

    #[inline]
    #[must_use]
    pub const fn is_down(self) -> bool {
        matches!(self, Hat::DownLeft | Hat::Down | Hat::DownRight)
    }

    #[inline]
    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Hat::UpLeft | Hat::Left | Hat::DownLeft)
    }

    #[inline]
    #[must_use]
    pub const fn is_right(self) -> bool {
        matches!(self, Hat::UpRight | Hat::Right | Hat::DownRight)
    }
}

/// Which axes and hat a decoded report supplied.
///
/// One bit per [`AxisKind`] in index order, then the hat switch.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Support(pub u16);

impl Support {
    pub const X: Self = Self::axis(AxisKind::X);
    pub const Y: Self = Self::axis(AxisKind::Y);
    pub const Z: Self = Self::axis(AxisKind::Z);
    pub const RX: Self = Self::axis(AxisKind::Rx);
    pub const RY: Self = Self::axis(AxisKind::Ry);
    pub const RZ: Self = Self::axis(AxisKind::Rz);
    pub const SLIDER: Self = Self::axis(AxisKind::Slider);
    pub const DIAL: Self = Self::axis(AxisKind::Dial);
    pub const WHEEL: Self = Self::axis(AxisKind::Wheel);
    pub const HAT_SWITCH: Self = Self(1 << AxisKind::COUNT);

    pub const NONE: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn axis(kind: AxisKind) -> Self {
        Self(1 << kind.index())
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, other: Support) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: Support) {
        self.0 |= other.0;
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Decoded joystick report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickState {
    /// Index of the report whose layout decoded the buffer.
    pub report: usize,
    pub support: Support,
    /// Axis values in [-32768, 32767], indexed by [`AxisKind::index`].
    pub axes: [i16; AxisKind::COUNT],
    pub hat: Hat,
    /// One bit per button slot; slot 0 is Button 1.
    pub buttons: u32,
    /// Button slots declared by the report.
    pub button_count: u8,
}

impl JoystickState {
    /// Centred axes, neutral hat, nothing pressed.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            report: 0,
            support: Support::NONE,
            axes: [0; AxisKind::COUNT],
            hat: Hat::Neutral,
            buttons: 0,
            button_count: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn axis(&self, kind: AxisKind) -> i16 {
        self.axes[kind.index()]
    }

    #[inline]
    #[must_use]
    pub const fn has_axis(&self, kind: AxisKind) -> bool {
        self.support.contains(Support::axis(kind))
    }

    #[inline]
    #[must_use]
    pub const fn has_hat(&self) -> bool {
        self.support.contains(Support::HAT_SWITCH)
    }

    /// Button slot state; slots past [`MAX_BUTTONS`] read as released.
    #[inline]
    #[must_use]
    pub const fn button(&self, slot: usize) -> bool {
        slot < MAX_BUTTONS && (self.buttons >> slot) & 1 == 1
    }

    fn set_axis(&mut self, kind: AxisKind, value: i16) {
        if let Some(axis) = self.axes.get_mut(kind.index()) {
            *axis = value;
        }
        self.support.insert(Support::axis(kind));
    }

    /// Record a Button-page usage; usage 0 and slots past the bitset are
    /// ignored.
    fn set_button(&mut self, usage: u32, pressed: bool) {
        let Some(slot) = usage.checked_sub(1) else {
            return;
        };
        if slot as usize >= MAX_BUTTONS {
            return;
        }
        self.button_count = self.button_count.max(slot as u8 + 1);
        if pressed {
            self.buttons |= 1 << slot;
        }
    }
}

/// Reasons a decoder cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JoystickError {
    /// The descriptor holds no reports.
    NoReports,
    /// No report is a Generic Desktop Joystick or Gamepad.
    NoJoystickReports,
}

impl core::fmt::Display for JoystickError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            JoystickError::NoReports => write!(f, "descriptor has no reports"),
            JoystickError::NoJoystickReports => write!(f, "descriptor has no joystick reports"),
        }
    }
}

/// Reasons a raw report failed to decode against every candidate layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// No layout's Report Id matched the buffer.
    UnknownReportId,
    /// The buffer ended before a layout's last field.
    Truncated,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::UnknownReportId => write!(f, "no report matches the report id"),
            DecodeError::Truncated => write!(f, "report shorter than its layout"),
        }
    }
}

/// Joystick decoder bound to one parsed descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Joystick<'a> {
    descriptor: &'a ReportDescriptor,
    joysticks_only: bool,
}

impl<'a> Joystick<'a> {
    /// Decode against every report of `descriptor`.
    pub fn new(descriptor: &'a ReportDescriptor) -> Result<Self, JoystickError> {
        if descriptor.is_empty() {
            return Err(JoystickError::NoReports);
        }
        Ok(Self {
            descriptor,
            joysticks_only: false,
        })
    }

    /// Decode only against Joystick and Gamepad application reports.
    pub fn joysticks_only(descriptor: &'a ReportDescriptor) -> Result<Self, JoystickError> {
        if descriptor.is_empty() {
            return Err(JoystickError::NoReports);
        }
        if descriptor.joystick_count() == 0 {
            return Err(JoystickError::NoJoystickReports);
        }
        Ok(Self {
            descriptor,
            joysticks_only: true,
        })
    }

    #[inline]
    #[must_use]
    pub const fn descriptor(&self) -> &'a ReportDescriptor {
        self.descriptor
    }

    /// Decode one raw input report.
    ///
    /// Candidate layouts are tried in descriptor order; the first that
    /// decodes without a Report Id mismatch or overrun is returned.
    pub fn decode(&self, raw: &[u8]) -> Result<JoystickState, DecodeError> {
        let mut error = DecodeError::UnknownReportId;
        let candidates = self
            .descriptor
            .reports()
            .filter(|r| !self.joysticks_only || r.is_joystick());

        for report in candidates {
            for group in report.inputs() {
                match decode_group(&group, raw) {
                    Ok(mut state) => {
                        state.report = report.index();
                        return Ok(state);
                    }
                    Err(e) => {
                        trace!("hid: report {} rejected: {}", report.index(), e);
                        if e == DecodeError::Truncated {
                            error = e;
                        }
                    }
                }
            }
        }
        Err(error)
    }
}

/// Decode one field group into a fresh state.
fn decode_group(group: &FieldGroup<'_>, raw: &[u8]) -> Result<JoystickState, DecodeError> {
    let mut state = JoystickState::neutral();
    let total_bits = raw.len() as u64 * 8;
    let mut offset: u64 = 0;

    for field in group.fields() {
        let end = offset + u64::from(field.size);
        if end > total_bits {
            return Err(DecodeError::Truncated);
        }
        let value = if field.size as usize <= MAX_READ_BITS {
            read_bits(raw, offset as usize, field.size as usize).unwrap_or(0)
        } else {
            0
        };
        offset = end;

        match field.kind {
            FieldKind::ReportId => {
                if value != field.usage {
                    return Err(DecodeError::UnknownReportId);
                }
            }
            FieldKind::Button => state.set_button(field.usage, value != 0),
            FieldKind::Axis(kind) => {
                if !state.has_axis(kind) {
                    state.set_axis(kind, rescale(&field, value));
                }
            }
            FieldKind::HatSwitch => {
                if !state.has_hat() {
                    state.hat = Hat::from_raw(value);
                    state.support.insert(Support::HAT_SWITCH);
                }
            }
            FieldKind::Padding | FieldKind::VendorDefined(_) | FieldKind::Unknown(_) => {}
        }
    }
    Ok(state)
}

/// Rescale a raw field value from its logical range to `i16`.
///
/// An empty or inverted range yields 0.
fn rescale(field: &Field, raw: u32) -> i16 {
    let (min, max) = (i64::from(field.logical_min), i64::from(field.logical_max));
    if max <= min {
        return 0;
    }
    let value = if field.is_signed() {
        i64::from(sign_extend(raw, field.size))
    } else {
        i64::from(raw)
    };
    let value = value.clamp(min, max);
    let scaled = (value - min) * 65535 / (max - min) - 32768;
    scaled.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 8-bit X and Y (0..255) then 8 buttons.
    const GAMEPAD: &[u8] = &[
        0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, //
        0x15, 0x00, 0x26, 0xFF, 0x00, 0x75, 0x08, 0x95, 0x02, //
        0x09, 0x30, 0x09, 0x31, 0x81, 0x02, //
        0x05, 0x09, 0x19, 0x01, 0x29, 0x08, //
        0x15, 0x00, 0x25, 0x01, 0x75, 0x01, 0x95, 0x08, 0x81, 0x02, //
        0xC0,
    ];

    /// Two joystick reports, ids 1 and 2, each one 8-bit axis.
    const TWO_REPORTS: &[u8] = &[
        0x05, 0x01, 0x09, 0x04, 0xA1, 0x01, //
        0x85, 0x01, 0x15, 0x00, 0x26, 0xFF, 0x00, 0x75, 0x08, 0x95, 0x01, //
        0x09, 0x30, 0x81, 0x02, 0xC0, //
        0x05, 0x01, 0x09, 0x04, 0xA1, 0x01, //
        0x85, 0x02, 0x09, 0x31, 0x81, 0x02, 0xC0,
    ];

    fn parse(bytes: &[u8]) -> ReportDescriptor {
        ReportDescriptor::parse(bytes).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let desc = parse(GAMEPAD);
        let joystick = Joystick::new(&desc).unwrap();
        let state = joystick.decode(&[0x80, 0x40, 0x05]).unwrap();

        assert_eq!(state.report, 0);
        assert_eq!(state.axis(AxisKind::X), 128);
        assert_eq!(state.axis(AxisKind::Y), -16320);
        assert!(state.button(0));
        assert!(!state.button(1));
        assert!(state.button(2));
        assert_eq!(state.buttons, 0b101);
        assert_eq!(state.button_count, 8);
        assert!(state.has_axis(AxisKind::X));
        assert!(state.has_axis(AxisKind::Y));
        assert!(!state.has_axis(AxisKind::Z));
        assert!(!state.has_hat());
        assert_eq!(state.hat, Hat::Neutral);
    }

    #[test]
    fn test_full_scale() {
        let desc = parse(GAMEPAD);
        let joystick = Joystick::new(&desc).unwrap();
        let state = joystick.decode(&[0x00, 0xFF, 0x00]).unwrap();
        assert_eq!(state.axis(AxisKind::X), i16::MIN);
        assert_eq!(state.axis(AxisKind::Y), i16::MAX);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let desc = parse(GAMEPAD);
        let joystick = Joystick::new(&desc).unwrap();
        let raw = [0x12, 0xE0, 0xA5];
        assert_eq!(joystick.decode(&raw), joystick.decode(&raw));
    }

    #[test]
    fn test_short_buffer_fails() {
        let desc = parse(GAMEPAD);
        let joystick = Joystick::new(&desc).unwrap();
        assert_eq!(joystick.decode(&[0x80, 0x40]), Err(DecodeError::Truncated));
        assert_eq!(joystick.decode(&[]), Err(DecodeError::Truncated));
    }

    #[test]
    fn test_longer_buffer_accepted() {
        let desc = parse(GAMEPAD);
        let joystick = Joystick::new(&desc).unwrap();
        assert!(joystick.decode(&[0x80, 0x40, 0x05, 0xEE]).is_ok());
    }

    #[test]
    fn test_report_id_selects_layout() {
        let desc = parse(TWO_REPORTS);
        let joystick = Joystick::new(&desc).unwrap();

        let state = joystick.decode(&[0x02, 0xFF]).unwrap();
        assert_eq!(state.report, 1);
        assert!(state.has_axis(AxisKind::Y));
        assert!(!state.has_axis(AxisKind::X));
        assert_eq!(state.axis(AxisKind::Y), i16::MAX);

        let state = joystick.decode(&[0x01, 0x00]).unwrap();
        assert_eq!(state.report, 0);
        assert_eq!(state.axis(AxisKind::X), i16::MIN);
    }

    #[test]
    fn test_unknown_report_id() {
        let desc = parse(TWO_REPORTS);
        let joystick = Joystick::new(&desc).unwrap();
        assert_eq!(
            joystick.decode(&[0x03, 0x00]),
            Err(DecodeError::UnknownReportId)
        );
    }

    #[test]
    fn test_hat_switch() {
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, //
            0x15, 0x00, 0x25, 0x07, 0x75, 0x04, 0x95, 0x01, //
            0x09, 0x39, 0x81, 0x42, // Hat, null state
            0x75, 0x04, 0x81, 0x03, // padding
            0xC0,
        ]);
        let joystick = Joystick::new(&desc).unwrap();

        let state = joystick.decode(&[0x02]).unwrap();
        assert!(state.has_hat());
        assert_eq!(state.hat, Hat::Right);

        let state = joystick.decode(&[0x07]).unwrap();
        assert_eq!(state.hat, Hat::UpLeft);

        let state = joystick.decode(&[0x08]).unwrap();
        assert_eq!(state.hat, Hat::Neutral);

        let state = joystick.decode(&[0x0F]).unwrap();
        assert_eq!(state.hat, Hat::Neutral);
    }

    #[test]
    fn test_hat_directions() {
        assert!(Hat::UpRight.is_up() && Hat::UpRight.is_right());
        assert!(Hat::Down.is_down() && !Hat::Down.is_left());
        assert!(!Hat::Neutral.is_up() && !Hat::Neutral.is_right());
        assert_eq!(Hat::from_raw(6), Hat::Left);
    }

    #[test]
    fn test_signed_axis() {
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x04, 0xA1, 0x01, //
            0x15, 0x81, 0x25, 0x7F, 0x75, 0x08, 0x95, 0x01, //
            0x09, 0x32, 0x81, 0x02, 0xC0,
        ]);
        let joystick = Joystick::new(&desc).unwrap();
        assert_eq!(joystick.decode(&[0x81]).unwrap().axis(AxisKind::Z), i16::MIN);
        assert_eq!(joystick.decode(&[0x7F]).unwrap().axis(AxisKind::Z), i16::MAX);
        // -128 is below the logical range and clamps
        assert_eq!(joystick.decode(&[0x80]).unwrap().axis(AxisKind::Z), i16::MIN);
    }

    #[test]
    fn test_sixteen_bit_axis_across_bytes() {
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x04, 0xA1, 0x01, //
            0x75, 0x04, 0x95, 0x01, 0x81, 0x03, // 4 bits padding
            0x15, 0x00, 0x27, 0xFF, 0xFF, 0x00, 0x00, 0x75, 0x10, //
            0x09, 0x36, 0x81, 0x02, // Slider
            0x75, 0x04, 0x81, 0x03, //
            0xC0,
        ]);
        let joystick = Joystick::new(&desc).unwrap();
        let state = joystick.decode(&[0xF0, 0xFF, 0x0F]).unwrap();
        assert_eq!(state.axis(AxisKind::Slider), i16::MAX);
        let state = joystick.decode(&[0x0F, 0x00, 0xF0]).unwrap();
        assert_eq!(state.axis(AxisKind::Slider), i16::MIN);
    }

    #[test]
    fn test_inverted_range_is_corrected() {
        // Logical Maximum 0xFF parses as -1 signed
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x04, 0xA1, 0x01, //
            0x15, 0x00, 0x25, 0xFF, 0x75, 0x08, 0x95, 0x01, //
            0x09, 0x30, 0x81, 0x02, 0xC0,
        ]);
        let joystick = Joystick::new(&desc).unwrap();
        assert_eq!(joystick.decode(&[0xFF]).unwrap().axis(AxisKind::X), i16::MAX);
        assert_eq!(joystick.decode(&[0x00]).unwrap().axis(AxisKind::X), i16::MIN);
    }

    #[test]
    fn test_empty_range_yields_zero() {
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x04, 0xA1, 0x01, //
            0x15, 0x05, 0x25, 0x05, 0x75, 0x08, 0x95, 0x01, //
            0x09, 0x30, 0x81, 0x02, 0xC0,
        ]);
        let joystick = Joystick::new(&desc).unwrap();
        assert_eq!(joystick.decode(&[0xAB]).unwrap().axis(AxisKind::X), 0);
    }

    #[test]
    fn test_first_axis_supplier_wins() {
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x04, 0xA1, 0x01, //
            0x15, 0x00, 0x26, 0xFF, 0x00, 0x75, 0x08, 0x95, 0x02, //
            0x09, 0x30, 0x09, 0x30, 0x81, 0x02, 0xC0,
        ]);
        let joystick = Joystick::new(&desc).unwrap();
        let state = joystick.decode(&[0xFF, 0x00]).unwrap();
        assert_eq!(state.axis(AxisKind::X), i16::MAX);
    }

    #[test]
    fn test_out_of_range_buttons_ignored() {
        // Buttons 31..=34: slots 30 and 31 fit, 32 and 33 do not
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, //
            0x05, 0x09, 0x19, 0x1F, 0x29, 0x22, //
            0x15, 0x00, 0x25, 0x01, 0x75, 0x01, 0x95, 0x04, 0x81, 0x02, //
            0x75, 0x04, 0x95, 0x01, 0x81, 0x03, //
            0xC0,
        ]);
        let joystick = Joystick::new(&desc).unwrap();
        let state = joystick.decode(&[0x0F]).unwrap();
        assert_eq!(state.buttons, 0xC000_0000);
        assert_eq!(state.button_count, 32);
    }

    #[test]
    fn test_button_zero_ignored() {
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, //
            0x05, 0x09, 0x19, 0x00, 0x29, 0x07, //
            0x15, 0x00, 0x25, 0x01, 0x75, 0x01, 0x95, 0x08, 0x81, 0x02, //
            0xC0,
        ]);
        let joystick = Joystick::new(&desc).unwrap();
        let state = joystick.decode(&[0x03]).unwrap();
        // Button 0 is "no button"; Button 1 lands in slot 0
        assert_eq!(state.buttons, 0b1);
    }

    #[test]
    fn test_constant_padding_shifts_fields() {
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, //
            0x15, 0x00, 0x26, 0xFF, 0x00, 0x75, 0x08, 0x95, 0x01, //
            0x81, 0x03, // Constant, no usage
            0x09, 0x30, 0x81, 0x02, // Data X
            0xC0,
        ]);
        let joystick = Joystick::new(&desc).unwrap();
        let state = joystick.decode(&[0xFF, 0x00]).unwrap();
        assert_eq!(state.axis(AxisKind::X), i16::MIN);
    }

    #[test]
    fn test_constant_field_with_usage_decodes_by_kind() {
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, //
            0x15, 0x00, 0x26, 0xFF, 0x00, 0x75, 0x08, 0x95, 0x01, //
            0x09, 0x30, 0x81, 0x03, // Constant X
            0xC0,
        ]);
        let joystick = Joystick::new(&desc).unwrap();
        let state = joystick.decode(&[0xFF]).unwrap();
        assert!(state.has_axis(AxisKind::X));
        assert_eq!(state.axis(AxisKind::X), i16::MAX);
    }

    #[test]
    fn test_truncated_report_falls_through_to_next() {
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x04, 0xA1, 0x01, // 16-bit X
            0x15, 0x00, 0x27, 0xFF, 0xFF, 0x00, 0x00, 0x75, 0x10, 0x95, 0x01, //
            0x09, 0x30, 0x81, 0x02, 0xC0, //
            0x05, 0x01, 0x09, 0x04, 0xA1, 0x01, // 8-bit Y
            0x15, 0x00, 0x26, 0xFF, 0x00, 0x75, 0x08, //
            0x09, 0x31, 0x81, 0x02, 0xC0,
        ]);
        let joystick = Joystick::new(&desc).unwrap();
        let state = joystick.decode(&[0xFF]).unwrap();
        assert_eq!(state.report, 1);
        assert!(state.has_axis(AxisKind::Y));
        assert!(!state.has_axis(AxisKind::X));
        assert_eq!(state.axis(AxisKind::Y), i16::MAX);

        let state = joystick.decode(&[0x00, 0x00]).unwrap();
        assert_eq!(state.report, 0);
        assert_eq!(state.axis(AxisKind::X), i16::MIN);
    }

    #[test]
    fn test_joysticks_only_skips_other_applications() {
        let desc = parse(&[
            0x05, 0x01, 0x09, 0x02, 0xA1, 0x01, // Mouse
            0x85, 0x01, 0x15, 0x00, 0x26, 0xFF, 0x00, 0x75, 0x08, 0x95, 0x01, //
            0x09, 0x30, 0x81, 0x02, 0xC0, //
            0x05, 0x01, 0x09, 0x05, 0xA1, 0x01, // Gamepad
            0x85, 0x01, 0x09, 0x31, 0x81, 0x02, 0xC0,
        ]);
        let all = Joystick::new(&desc).unwrap();
        assert_eq!(all.decode(&[0x01, 0x10]).unwrap().report, 0);

        let joysticks = Joystick::joysticks_only(&desc).unwrap();
        let state = joysticks.decode(&[0x01, 0x10]).unwrap();
        assert_eq!(state.report, 1);
        assert!(state.has_axis(AxisKind::Y));
    }

    #[test]
    fn test_refuses_unusable_descriptor() {
        let empty = ReportDescriptor::default();
        assert_eq!(Joystick::new(&empty).err(), Some(JoystickError::NoReports));
        assert_eq!(
            Joystick::joysticks_only(&empty).err(),
            Some(JoystickError::NoReports)
        );

        let mouse = parse(&[0x05, 0x01, 0x09, 0x02, 0xA1, 0x01, 0xC0]);
        assert!(Joystick::new(&mouse).is_ok());
        assert_eq!(
            Joystick::joysticks_only(&mouse).err(),
            Some(JoystickError::NoJoystickReports)
        );
    }

    #[test]
    fn test_support_bits() {
        let mut support = Support::NONE;
        assert!(support.is_empty());
        support.insert(Support::RZ);
        support.insert(Support::HAT_SWITCH);
        assert!(support.contains(Support::RZ));
        assert!(support.contains(Support::HAT_SWITCH));
        assert!(!support.contains(Support::X));
        assert_eq!(Support::WHEEL.0, 1 << 8);
        assert_eq!(Support::HAT_SWITCH.0, 1 << 9);
    }
}
