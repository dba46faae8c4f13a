//! Input source trait and error types.

use core::future::Future;

use hid_report::{DecodeError, DescriptorError, JoystickError};

use crate::types::GamepadState;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Transport I/O error.
    Io,
    /// Input data could not be interpreted.
    Parse,
    /// Device gone.
    Disconnected,
    /// Report or descriptor larger than the fixed buffers.
    BufferOverflow,
    /// Device reports nothing usable as a gamepad.
    Unsupported,
}

impl From<DescriptorError> for InputError {
    fn from(err: DescriptorError) -> Self {
        match err {
            DescriptorError::TooManyReports
            | DescriptorError::TooManyGroups
            | DescriptorError::TooManyFields
            | DescriptorError::TooManyUsages => InputError::BufferOverflow,
        }
    }
}

impl From<JoystickError> for InputError {
    fn from(err: JoystickError) -> Self {
        match err {
            JoystickError::NoReports | JoystickError::NoJoystickReports => InputError::Unsupported,
        }
    }
}

impl From<DecodeError> for InputError {
    fn from(_: DecodeError) -> Self {
        InputError::Parse
    }
}

/// Async trait for gamepad input sources.
///
/// Implementations are `no_std` and allocate nothing.
pub trait InputSource {
    /// Wait for and receive the next gamepad state.
    fn receive(&mut self) -> impl Future<Output = Result<GamepadState, InputError>>;

    /// Check if the input source is connected/ready.
    fn is_connected(&self) -> bool;
}
