//! Canonical gamepad types: Buttons, AnalogStick, GamepadState.
//!
//! Every input source produces a [`GamepadState`]; per-console encoders
//! consume it.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Button state as a 16-bit bitfield.
///
/// # Example
///
/// ```
/// use gamepad_core::Buttons;
///
/// let buttons = Buttons::A | Buttons::DPAD_UP;
/// assert!(buttons.contains(Buttons::A));
/// assert!(!buttons.contains(Buttons::B));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const X: Self = Self(1 << 2);
    pub const Y: Self = Self(1 << 3);
    pub const LB: Self = Self(1 << 4); // Left bumper
    pub const RB: Self = Self(1 << 5); // Right bumper
    pub const BACK: Self = Self(1 << 6); // Select/Back/Share
    pub const START: Self = Self(1 << 7);
    pub const GUIDE: Self = Self(1 << 8); // Home/PS
    pub const LS: Self = Self(1 << 9); // Left stick press
    pub const RS: Self = Self(1 << 10); // Right stick press
    pub const DPAD_UP: Self = Self(1 << 11);
    pub const DPAD_DOWN: Self = Self(1 << 12);
    pub const DPAD_LEFT: Self = Self(1 << 13);
    pub const DPAD_RIGHT: Self = Self(1 << 14);
    pub const MISC: Self = Self(1 << 15); // Capture/touchpad/mute

    pub const NONE: Self = Self(0);

    /// All four D-pad bits.
    pub const DPAD: Self =
        Self(Self::DPAD_UP.0 | Self::DPAD_DOWN.0 | Self::DPAD_LEFT.0 | Self::DPAD_RIGHT.0);

    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// D-pad bits for the given directions; opposite directions cancel.
    #[must_use]
    pub const fn dpad(up: bool, down: bool, left: bool, right: bool) -> Self {
        let mut bits = 0;
        if up != down {
            bits |= if up { Self::DPAD_UP.0 } else { Self::DPAD_DOWN.0 };
        }
        if left != right {
            bits |= if left { Self::DPAD_LEFT.0 } else { Self::DPAD_RIGHT.0 };
        }
        Self(bits)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Buttons {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for Buttons {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

/// Analog stick, each axis in [-32768, 32767].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogStick {
    pub x: i16,
    pub y: i16,
}

impl AnalogStick {
    pub const NEUTRAL: Self = Self { x: 0, y: 0 };

    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Flip an axis around centre; full scale maps to full scale.
#[inline]
#[must_use]
pub const fn invert_axis(value: i16) -> i16 {
    value.saturating_neg()
}

/// Map a full-range axis onto a 0-255 trigger.
#[inline]
#[must_use]
pub const fn axis_to_trigger(value: i16) -> u8 {
    ((value as i32 + 32768) >> 8) as u8
}

/// Complete gamepad snapshot: 16 buttons, two sticks, two 0-255 triggers.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadState {
    pub buttons: Buttons,
    pub left_stick: AnalogStick,
    pub right_stick: AnalogStick,
    pub left_trigger: u8,
    pub right_trigger: u8,
}

impl GamepadState {
    /// No buttons pressed, sticks centred, triggers released.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            left_stick: AnalogStick::NEUTRAL,
            right_stick: AnalogStick::NEUTRAL,
            left_trigger: 0,
            right_trigger: 0,
        }
    }
}
