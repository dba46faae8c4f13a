//! Generic USB HID joystick input.
//!
//! A device's report descriptor is parsed once at mount time into a
//! [`ReportDescriptor`]; every raw input report is then decoded into a
//! [`JoystickState`] and mapped onto a [`GamepadState`] through a
//! [`HidMapping`].

use core::future::Future;

use heapless::Vec;
use hid_report::{AxisKind, Hat, Joystick, JoystickState, ReportDescriptor};

use crate::input::{InputError, InputSource};
use crate::types::{axis_to_trigger, invert_axis, AnalogStick, Buttons, GamepadState};

/// Largest raw input report accepted (full-speed interrupt endpoint).
pub const MAX_REPORT_SIZE: usize = 64;

/// Button slots a [`HidMapping`] can route.
pub const MAPPED_BUTTONS: usize = 16;

/// What a HID button slot drives on the gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonTarget {
    /// Not routed.
    None,
    Button(Buttons),
    /// Full-scale left trigger while held.
    LeftTrigger,
    /// Full-scale right trigger while held.
    RightTrigger,
}

/// HID joystick to gamepad mapping.
///
/// Customize this at compile-time by creating your own const.
#[derive(Debug, Clone, Copy)]
pub struct HidMapping {
    /// Targets for button slots 0-15 (HID Button 1-16).
    pub buttons: [ButtonTarget; MAPPED_BUTTONS],
    pub left_stick_x: AxisKind,
    pub left_stick_y: AxisKind,
    pub right_stick_x: AxisKind,
    pub right_stick_y: AxisKind,
    /// Analog axis driving the left trigger, if any.
    pub left_trigger_axis: Option<AxisKind>,
    /// Analog axis driving the right trigger, if any.
    pub right_trigger_axis: Option<AxisKind>,
    pub invert_left_x: bool,
    pub invert_left_y: bool,
    pub invert_right_x: bool,
    pub invert_right_y: bool,
}

/// Mapping for the common DirectInput pad layout.
///
/// - Buttons 1-4 -> X, A, B, Y
/// - Buttons 5-8 -> LB, RB, LT, RT
/// - Buttons 9-14 -> Back, Start, LS, RS, Guide, Misc
/// - X/Y -> left stick, Z/Rz -> right stick
pub const DEFAULT_HID_MAPPING: HidMapping = HidMapping {
    buttons: [
        ButtonTarget::Button(Buttons::X),
        ButtonTarget::Button(Buttons::A),
        ButtonTarget::Button(Buttons::B),
        ButtonTarget::Button(Buttons::Y),
        ButtonTarget::Button(Buttons::LB),
        ButtonTarget::Button(Buttons::RB),
        ButtonTarget::LeftTrigger,
        ButtonTarget::RightTrigger,
        ButtonTarget::Button(Buttons::BACK),
        ButtonTarget::Button(Buttons::START),
        ButtonTarget::Button(Buttons::LS),
        ButtonTarget::Button(Buttons::RS),
        ButtonTarget::Button(Buttons::GUIDE),
        ButtonTarget::Button(Buttons::MISC),
        ButtonTarget::None,
        ButtonTarget::None,
    ],
    left_stick_x: AxisKind::X,
    left_stick_y: AxisKind::Y,
    right_stick_x: AxisKind::Z,
    right_stick_y: AxisKind::Rz,
    left_trigger_axis: None,
    right_trigger_axis: None,
    invert_left_x: false,
    invert_left_y: false,
    invert_right_x: false,
    invert_right_y: false,
};

/// D-pad bits for a hat direction; diagonals press two.
#[inline]
#[must_use]
pub const fn hat_to_dpad(hat: Hat) -> Buttons {
    Buttons::dpad(hat.is_up(), hat.is_down(), hat.is_left(), hat.is_right())
}

/// Map a decoded joystick report to a gamepad state.
#[must_use]
pub fn joystick_to_gamepad(state: &JoystickState, mapping: &HidMapping) -> GamepadState {
    let stick = |kind: AxisKind, invert: bool| {
        let value = state.axis(kind);
        if invert {
            invert_axis(value)
        } else {
            value
        }
    };
    let trigger = |axis: Option<AxisKind>| match axis {
        Some(kind) if state.has_axis(kind) => axis_to_trigger(state.axis(kind)),
        _ => 0,
    };

    let mut gamepad = GamepadState {
        buttons: hat_to_dpad(state.hat),
        left_stick: AnalogStick::new(
            stick(mapping.left_stick_x, mapping.invert_left_x),
            stick(mapping.left_stick_y, mapping.invert_left_y),
        ),
        right_stick: AnalogStick::new(
            stick(mapping.right_stick_x, mapping.invert_right_x),
            stick(mapping.right_stick_y, mapping.invert_right_y),
        ),
        left_trigger: trigger(mapping.left_trigger_axis),
        right_trigger: trigger(mapping.right_trigger_axis),
    };

    for (slot, target) in mapping.buttons.iter().enumerate() {
        if !state.button(slot) {
            continue;
        }
        match *target {
            ButtonTarget::Button(button) => gamepad.buttons |= button,
            ButtonTarget::LeftTrigger => gamepad.left_trigger = u8::MAX,
            ButtonTarget::RightTrigger => gamepad.right_trigger = u8::MAX,
            ButtonTarget::None => {}
        }
    }

    gamepad
}

/// Async source of raw HID input reports (interrupt-IN transfers).
pub trait ReportReader {
    /// Wait for the next input report, copy it into `buf` and return its
    /// length.
    fn read_report(&mut self, buf: &mut [u8]) -> impl Future<Output = Result<usize, InputError>>;

    /// Check if the device is still attached.
    fn is_connected(&self) -> bool;
}

/// Input source for a generic HID joystick or gamepad.
///
/// Holds the decoder for the mounted device; remounting means building a
/// new source from the new descriptor.
pub struct HidInputSource<'d, R> {
    reader: R,
    joystick: Joystick<'d>,
    mapping: &'d HidMapping,
    /// Receive buffer for one raw report.
    buffer: [u8; MAX_REPORT_SIZE],
    /// Last report that decoded, byte for byte.
    last_report: Vec<u8, MAX_REPORT_SIZE>,
    joystick_state: JoystickState,
    state: GamepadState,
}

impl<'d, R: ReportReader> HidInputSource<'d, R> {
    /// Mount a device from its parsed report descriptor.
    ///
    /// Fails with [`InputError::Unsupported`] when no report is a Joystick or
    /// Gamepad application.
    pub fn new(
        reader: R,
        descriptor: &'d ReportDescriptor,
        mapping: &'d HidMapping,
    ) -> Result<Self, InputError> {
        let joystick = Joystick::joysticks_only(descriptor)?;
        debug!(
            "hid: mounted {} reports, {} joystick",
            descriptor.len(),
            descriptor.joystick_count()
        );
        Ok(Self::from_joystick(reader, joystick, mapping))
    }

    /// Mount with an already configured decoder.
    pub fn from_joystick(reader: R, joystick: Joystick<'d>, mapping: &'d HidMapping) -> Self {
        Self {
            reader,
            joystick,
            mapping,
            buffer: [0; MAX_REPORT_SIZE],
            last_report: Vec::new(),
            joystick_state: JoystickState::neutral(),
            state: GamepadState::neutral(),
        }
    }

    /// State produced by the last accepted report.
    #[must_use]
    pub const fn state(&self) -> GamepadState {
        self.state
    }

    /// Decoded report behind [`Self::state`].
    #[must_use]
    pub const fn joystick_state(&self) -> &JoystickState {
        &self.joystick_state
    }

    pub fn into_reader(self) -> R {
        self.reader
    }
}

impl<R: ReportReader> InputSource for HidInputSource<'_, R> {
    async fn receive(&mut self) -> Result<GamepadState, InputError> {
        loop {
            let len = self.reader.read_report(&mut self.buffer).await?;
            let raw = self.buffer.get(..len).ok_or(InputError::BufferOverflow)?;

            // Devices repeat unchanged reports; skip the decode
            if !self.last_report.is_empty() && raw == self.last_report.as_slice() {
                return Ok(self.state);
            }

            match self.joystick.decode(raw) {
                Ok(decoded) => {
                    self.state = joystick_to_gamepad(&decoded, self.mapping);
                    self.joystick_state = decoded;
                    self.last_report.clear();
                    self.last_report
                        .extend_from_slice(raw)
                        .map_err(|_| InputError::BufferOverflow)?;
                    return Ok(self.state);
                }
                Err(_e) => {
                    trace!("hid: dropped {}-byte report: {}", len, _e);
                }
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.reader.is_connected()
    }
}
